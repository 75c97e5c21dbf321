//! Per-element character data accumulation.

/// Collects the character data of one element.
///
/// Character data reaches an element in several spans when it is split by
/// child elements, comments or CDATA sections. The spans are joined the way
/// the BOINC manager always joined them:
///
/// * leading whitespace of a span is dropped,
/// * a non-empty span after existing text is separated by exactly one space,
/// * trailing whitespace is removed with [`trim_end()`][TextBuffer::trim_end].
///
/// ```
/// use boinc_rpc::xml::TextBuffer;
///
/// let mut text = TextBuffer::new();
/// text.append("\n  This is a test string.");
/// text.append("   This is a test string.\n");
/// text.trim_end();
/// assert_eq!("This is a test string. This is a test string.", text.as_str());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    buf: String,
}

impl TextBuffer {
    /// Creates an empty buffer.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Appends a span of character data.
    pub fn append(&mut self, span: &str) {
        let span = span.trim_start();
        if span.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.trim_end();
            self.buf.push(' ');
        }
        self.buf.push_str(span);
    }

    /// Removes trailing whitespace.
    pub fn trim_end(&mut self) {
        let len = self.buf.trim_end().len();
        self.buf.truncate(len);
    }

    /// Returns true if no text has been collected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The collected text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Discards the collected text.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Returns the collected text.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}
