//! Lenient conversions of element text into field values.
//!
//! The core client's replies are trusted to have the right shape, not the
//! right content. A value which does not convert leaves the field at its
//! default instead of failing the whole reply.

/// Parses a 32-bit integer.
#[must_use]
pub fn int(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Parses a 64-bit integer.
#[must_use]
pub fn long(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parses a double.
#[must_use]
pub fn double(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Parses a decimal number and truncates it towards zero.
///
/// The core client writes some integral quantities (message timestamps,
/// transfer request times) with a fractional part.
#[must_use]
pub fn truncated(text: &str) -> Option<i64> {
    let value = double(text)?;
    value.is_finite().then(|| value.trunc() as i64)
}

/// A boolean written as an integer: any non-zero value is true.
///
/// `"0"` and `"00"` are false, `"1"` and `"11"` are true. Text which is not
/// an integer is false.
#[must_use]
pub fn truthy(text: &str) -> bool {
    long(text).map_or(false, |value| value != 0)
}

/// A boolean written as a presence flag like `<have_cuda/>`.
///
/// An element without text is true, otherwise the text follows [`truthy()`].
#[must_use]
pub fn flag(text: &str) -> bool {
    text.trim().is_empty() || truthy(text)
}
