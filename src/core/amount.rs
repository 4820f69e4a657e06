//! Amount formatting for atomic units

/// Coin ticker shown after every amount.
pub const TICKER: &str = "BLOC";

/// Atomic units carry this many decimal places.
pub const DECIMAL_PLACES: u32 = 4;

const UNIT: u64 = 10u64.pow(DECIMAL_PLACES);

/// `12345678` → `"1,234.5678 BLOC"`
pub fn format_amount(amount: u64) -> String {
    let whole = amount / UNIT;
    let fraction = amount % UNIT;
    format!(
        "{}.{:0width$} {}",
        group_thousands(whole),
        fraction,
        TICKER,
        width = DECIMAL_PLACES as usize
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
