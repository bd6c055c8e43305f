//! Utility functions for the TUI

use unicode_width::UnicodeWidthStr;

/// Frames of the busy indicator
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner character for the given tick
pub fn spinner_frame(tick: u64) -> char {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Current unix time in seconds
pub fn now_unix() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Shorten a long identifier (hash, pubkey) keeping both ends
pub fn truncate_middle(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len || max_len < 5 {
        return s.to_string();
    }

    let keep = (max_len - 3) / 2;
    let head: String = s.chars().take(keep).collect();
    let tail: String = s.chars().skip(len - keep).collect();
    format!("{}...{}", head, tail)
}

/// Terminal column width of a string
pub fn display_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}
