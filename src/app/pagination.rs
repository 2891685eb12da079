//! Page navigation arithmetic.
//!
//! Page indices are zero-based everywhere except in the indicator text.
//! Navigation functions return `None` when the move would be a no-op so the
//! caller can skip the fetch entirely.

/// The page before `current`, or `None` on the first page.
#[must_use]
pub const fn previous(current: usize) -> Option<usize> {
    current.checked_sub(1)
}

/// The page after `current`, or `None` on the last page.
///
/// With zero pages there is nowhere to go.
#[must_use]
pub const fn next(current: usize, total_pages: usize) -> Option<usize> {
    if current + 1 < total_pages {
        Some(current + 1)
    } else {
        None
    }
}

/// Controls are only shown when there is more than one page.
#[must_use]
pub const fn is_visible(total_pages: usize) -> bool {
    total_pages > 1
}

/// One-based indicator text, e.g. `"Page 1 of 3"`.
#[must_use]
pub fn indicator(current: usize, total_pages: usize) -> String {
    format!("Page {} of {}", current + 1, total_pages)
}
