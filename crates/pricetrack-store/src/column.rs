//! Spreadsheet column letters and layout tokens.

/// Highest column a worksheet can address (`XFD`).
pub const MAX_COLUMN: u32 = 16_384;

const BLANK_MARKER: &str = "blank column";

/// One entry of a column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnToken {
    /// Leave the output column empty.
    Blank,
    /// Copy the source column at this 1-based index.
    Source(u32),
    /// Unresolvable reference; produces an empty output column.
    Invalid,
}

impl ColumnToken {
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case(BLANK_MARKER) {
            return ColumnToken::Blank;
        }
        column_index(token).map_or(ColumnToken::Invalid, ColumnToken::Source)
    }
}

/// 1-based index of a column reference such as `A`, `ar` or `XFD`.
///
/// Case-insensitive, surrounding whitespace ignored. Returns `None` for
/// anything that is not 1 to 3 letters or lies past [`MAX_COLUMN`].
pub fn column_index(letters: &str) -> Option<u32> {
    let letters = letters.trim();
    if letters.is_empty() || letters.len() > 3 || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let index = letters
        .bytes()
        .map(|b| u32::from(b.to_ascii_uppercase() - b'A') + 1)
        .fold(0, |acc, digit| acc * 26 + digit);

    (index <= MAX_COLUMN).then_some(index)
}
