//! Lexer for the reply text.

use core::iter;

use super::token::Token;

mod scanner;

use scanner::scan;

/// Tokenizes XML input into a [`Token`].
///
/// It does not allocate. The lexer is non-validating: it identifies markup
/// and character data, it does not check that tags are balanced.
///
/// # Examples
///
/// ```
/// use boinc_rpc::xml::{Lexer, Ty};
///
/// let input = "<seqno>12</seqno>";
///
/// let lexer = Lexer::new(input);
/// let mut pos = 0;
///
/// let token = lexer.tokenize(&mut pos).unwrap();
/// assert_eq!(0, token.offset());
/// match token.ty() {
///     Ty::StartTag(tag) => assert_eq!("seqno", tag.name()),
///     _ => panic!("unexpected token"),
/// }
///
/// // Position was assigned to the index after the end of the token
/// assert_eq!(7, pos);
///
/// let names = lexer
///     .iter(0)
///     .filter_map(|token| match token.ty() {
///         Ty::StartTag(tag) => Some(tag.name()),
///         Ty::EndTag(tag) => Some(tag.name()),
///         _ => None,
///     })
///     .collect::<Vec<_>>();
/// assert_eq!(vec!["seqno", "seqno"], names);
/// ```
///
/// If the input ends in the middle of a token, `tokenize` returns `None`
/// without moving `pos`. Comparing `pos` with the input length tells a
/// complete document apart from a truncated one.
///
/// ```
/// use boinc_rpc::xml::Lexer;
///
/// let input = "<seqno>12</seqno";
/// let lexer = Lexer::new(input);
/// let mut pos = 0;
/// while lexer.tokenize(&mut pos).is_some() {}
/// assert_eq!(9, pos);
/// assert_ne!(input.len(), pos);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a new instance with the given UTF-8 string input.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenizes the input starting at the given position.
    ///
    /// If a token is found, the position is also updated to after the token.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of the input or not on a character
    /// boundary.
    #[must_use]
    pub fn tokenize(&self, pos: &mut usize) -> Option<Token<'a>> {
        let ty = scan(&self.input[*pos..])?;
        let token = Token::new(ty, *pos);
        *pos += token.len();
        Some(token)
    }

    /// Returns an iterator for tokens starting at the given position.
    ///
    /// The `pos` parameter is **not** updated.
    #[inline]
    pub fn iter(&self, mut pos: usize) -> impl Iterator<Item = Token<'a>> + '_ {
        iter::from_fn(move || self.tokenize(&mut pos))
    }
}

impl<'a> IntoIterator for Lexer<'a> {
    type Item = Token<'a>;

    type IntoIter = IntoIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self, pos: 0 }
    }
}

/// The returned iterator type when [`IntoIterator::into_iter()`] is called on [`Lexer`].
#[derive(Debug)]
pub struct IntoIter<'a> {
    inner: Lexer<'a>,
    pos: usize,
}

impl<'a> Iterator for IntoIter<'a> {
    type Item = Token<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.tokenize(&mut self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::token::{Characters, EndTag, StartTag, Ty};

    #[test]
    fn none_on_empty() {
        let lexer = Lexer::new("");
        let mut pos = 0;
        assert_eq!(None, lexer.tokenize(&mut pos));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn panic_on_pos_greater_than_input_len() {
        let lexer = Lexer::new("hello");
        let mut pos = "hello".len() + 1;
        let _ = lexer.tokenize(&mut pos);
    }

    #[test]
    fn offsets_follow_tokens() {
        let lexer = Lexer::new("<pri>1</pri>");
        let tokens = lexer.into_iter().collect::<Vec<_>>();
        assert_eq!(
            tokens,
            vec![
                Token::new(Ty::StartTag(StartTag::from_str("<pri>")), 0),
                Token::new(Ty::Characters(Characters::from_str("1")), 5),
                Token::new(Ty::EndTag(EndTag::from_str("</pri>")), 6),
            ]
        );
    }

    #[test]
    fn incomplete_token_keeps_position() {
        let lexer = Lexer::new("Hello<wo");
        let mut pos = 0;
        assert_eq!(
            Some(Token::new(Ty::Characters(Characters::from_str("Hello")), 0)),
            lexer.tokenize(&mut pos)
        );
        assert_eq!(5, pos);
        assert_eq!(None, lexer.tokenize(&mut pos));
        assert_eq!(5, pos);
    }
}
