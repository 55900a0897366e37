//! Fitting text to the character budget

use core::fmt;

/// Characters per row (84 px / 6 px cell)
pub const MAX_CHARS: usize = 14;

/// Truncation marker
pub const ELLIPSIS: char = '\u{2026}';

/// Text fitted to a character budget
///
/// Borrows the kept prefix of the input, so any budget works without a
/// bounded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clipped<'a> {
    kept: &'a str,
    truncated: bool,
}

impl<'a> Clipped<'a> {
    /// The part of the input that is shown
    pub fn kept(&self) -> &'a str {
        self.kept
    }

    /// Whether [`ELLIPSIS`] follows the kept text
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Characters to draw, marker included
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.kept.chars().chain(self.truncated.then_some(ELLIPSIS))
    }
}

impl fmt::Display for Clipped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kept)?;
        if self.truncated {
            fmt::Write::write_char(f, ELLIPSIS)?;
        }
        Ok(())
    }
}

/// Fit `text` into `budget` characters
///
/// Text that fits is returned unchanged. Longer text keeps its first
/// `budget - 1` characters followed by [`ELLIPSIS`]. A zero budget yields an
/// empty result.
pub fn clip(text: &str, budget: usize) -> Clipped<'_> {
    if budget == 0 {
        return Clipped {
            kept: "",
            truncated: false,
        };
    }
    if text.char_indices().nth(budget).is_none() {
        return Clipped {
            kept: text,
            truncated: false,
        };
    }

    let end = text
        .char_indices()
        .nth(budget - 1)
        .map_or(text.len(), |(idx, _)| idx);
    Clipped {
        kept: &text[..end],
        truncated: true,
    }
}
