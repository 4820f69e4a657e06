//! Password confirmation before revealing secrets.

use crate::console::Console;
use crate::error::{WalletError, WalletResult};
use std::collections::VecDeque;
use zeroize::Zeroizing;

pub const CONFIRM_PROMPT: &str = "Confirm your current password: ";

/// Source of typed passwords.
pub trait PasswordPrompt {
    fn read_password(&mut self, prompt: &str) -> WalletResult<Zeroizing<String>>;
}

/// Reads from the controlling terminal without echo.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&mut self, prompt: &str) -> WalletResult<Zeroizing<String>> {
        rpassword::prompt_password(prompt)
            .map(Zeroizing::new)
            .map_err(|e| WalletError::Prompt(e.to_string()))
    }
}

/// Replays canned answers; fails once they run out.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: usize,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), asked: 0 }
    }

    pub fn asked(&self) -> usize { self.asked }
}

impl PasswordPrompt for ScriptedPrompt {
    fn read_password(&mut self, _prompt: &str) -> WalletResult<Zeroizing<String>> {
        self.asked += 1;
        self.answers
            .pop_front()
            .map(Zeroizing::new)
            .ok_or_else(|| WalletError::Prompt("no more input".into()))
    }
}

/// Ask for the wallet password up to `attempts` times.
///
/// `Ok(false)` when every attempt missed; `Err` only when the prompt itself fails.
pub fn confirm_password(
    console: &mut dyn Console,
    prompt: &mut dyn PasswordPrompt,
    expected: &str,
    attempts: u32,
) -> WalletResult<bool> {
    let verifier = blake3::hash(expected.as_bytes());
    for _ in 0..attempts {
        let typed = prompt.read_password(CONFIRM_PROMPT)?;
        // blake3::Hash equality is constant-time.
        if blake3::hash(typed.as_bytes()) == verifier {
            return Ok(true);
        }
        console.warning("Incorrect password! Try again.");
    }
    tracing::warn!(attempts, "password confirmation failed");
    Ok(false)
}
