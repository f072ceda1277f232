pub mod aggregate;
pub mod blend;

/// Rounds the exact binary value to two decimals. Scaling by 100 first can
/// land a value just above a tie exactly on it, so the formatter does the
/// rounding instead.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
