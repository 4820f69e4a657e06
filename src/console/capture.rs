//! CaptureConsole - keeps every fragment in memory for inspection

use super::{Console, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub severity: Option<Severity>,
}

#[derive(Debug, Default)]
pub struct CaptureConsole {
    lines: Vec<Vec<Fragment>>,
    current: Vec<Fragment>,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed lines as plain text. A pending, unterminated line is included.
    pub fn lines(&self) -> Vec<String> {
        let mut out: Vec<String> = self.lines.iter().map(|l| join(l)).collect();
        if !self.current.is_empty() {
            out.push(join(&self.current));
        }
        out
    }

    pub fn output(&self) -> String {
        self.lines().join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output().contains(needle)
    }

    /// True when some fragment containing `needle` carries `severity`.
    pub fn has_styled(&self, needle: &str, severity: Severity) -> bool {
        self.fragments()
            .any(|f| f.severity == Some(severity) && f.text.contains(needle))
    }

    /// Text of every fragment with the given severity, in output order.
    pub fn styled(&self, severity: Severity) -> Vec<String> {
        self.fragments()
            .filter(|f| f.severity == Some(severity))
            .map(|f| f.text.clone())
            .collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.output().matches(needle).count()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.current.clear();
    }

    fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.lines.iter().flatten().chain(self.current.iter())
    }
}

fn join(fragments: &[Fragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

impl Console for CaptureConsole {
    fn emit(&mut self, text: &str, severity: Option<Severity>) {
        self.current.push(Fragment { text: text.to_string(), severity });
    }

    fn end_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_tracks_fragments_and_lines() {
        let mut console = CaptureConsole::new();
        console.emit("Local blockchain height: ", None);
        console.emit("100", Some(Severity::Success));
        console.end_line();
        console.blank();
        console.warning("Be patient");

        assert_eq!(console.lines(), vec!["Local blockchain height: 100", "", "Be patient"]);
        assert!(console.has_styled("100", Severity::Success));
        assert!(!console.has_styled("100", Severity::Warning));
        assert_eq!(console.styled(Severity::Warning), vec!["Be patient"]);
    }
}
