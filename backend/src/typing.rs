//! Typing-delay simulation
//!
//! Replies are held back for a time proportional to their length so the
//! widget can show a typing indicator.

use std::time::Duration;

/// Milliseconds of delay per character
pub const MS_PER_CHAR: u64 = 20;
/// Shortest delay in milliseconds
pub const MIN_DELAY_MS: u64 = 500;
/// Longest delay in milliseconds
pub const MAX_DELAY_MS: u64 = 1000;

/// Delay for a reply: `clamp(chars * 20, 500, 1000)` milliseconds
pub fn typing_delay(text: &str) -> Duration {
    let chars = text.chars().count() as u64;
    let ms = chars
        .saturating_mul(MS_PER_CHAR)
        .clamp(MIN_DELAY_MS, MAX_DELAY_MS);
    Duration::from_millis(ms)
}

/// Wait for the typing delay of `text`, then hand it back unchanged
///
/// Suspends the calling task only; other tasks keep running.
pub async fn simulate_typing(text: String) -> String {
    tokio::time::sleep(typing_delay(&text)).await;
    text
}
