//! Byte level helpers shared by the scanner and the token views.

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum QuoteState {
    None,
    Single,
    Double,
}

impl QuoteState {
    /// Advances the quote state for one byte of tag content.
    #[inline]
    #[must_use]
    pub(crate) const fn next(self, byte: u8) -> Self {
        match (self, byte) {
            (QuoteState::None, b'"') => QuoteState::Double,
            (QuoteState::None, b'\'') => QuoteState::Single,
            (QuoteState::Double, b'"') | (QuoteState::Single, b'\'') => QuoteState::None,
            (state, _) => state,
        }
    }
}

#[inline]
#[must_use]
pub(crate) const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
#[must_use]
pub(crate) fn peek(bytes: &[u8]) -> Option<u8> {
    bytes.first().copied()
}

#[inline]
#[must_use]
pub(crate) fn peek2(bytes: &[u8]) -> Option<u8> {
    bytes.get(1).copied()
}

/// Index just past the first occurrence of `needle` at or after `from`.
#[must_use]
pub(crate) fn find_end_of(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if bytes.len() < from {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos + needle.len())
}
