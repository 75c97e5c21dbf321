//! Tokens are views of sub-slices of the reply text.
//!
//! [`Token`] pairs a [`Ty`] with the offset it was found at. The specific
//! token types like [`StartTag`] borrow the raw markup and provide helper
//! methods for the parts the reply parsers care about.

use std::borrow::Cow;

use crate::bytes::is_space;

use super::escape;

/// A token found at a byte offset of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    ty: Ty<'a>,
    offset: usize,
}

impl<'a> Token<'a> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(ty: Ty<'a>, offset: usize) -> Self {
        Self { ty, offset }
    }

    /// The token type.
    #[inline]
    #[must_use]
    pub const fn ty(&self) -> Ty<'a> {
        self.ty
    }

    /// Byte offset of the token in the input.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length of the token in bytes.
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// The raw text of the token.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self.ty {
            Ty::StartTag(t) => t.as_str(),
            Ty::EmptyElementTag(t) => t.as_str(),
            Ty::EndTag(t) => t.as_str(),
            Ty::Characters(t) => t.as_str(),
            Ty::ProcessingInstruction(t) => t.as_str(),
            Ty::Declaration(t) => t.as_str(),
            Ty::Comment(t) => t.as_str(),
            Ty::Cdata(t) => t.as_str(),
        }
    }
}

macro_rules! converters {
    ($name:ident) => {
        impl<'a> $name<'a> {
            /// Instantiates a new view with the given string.
            #[inline]
            #[must_use]
            pub const fn from_str(input: &'a str) -> Self {
                Self(input)
            }

            /// The raw markup of the token.
            #[inline]
            #[must_use]
            pub const fn as_str(&self) -> &'a str {
                self.0
            }

            /// Returns the length in bytes.
            #[allow(clippy::len_without_is_empty)]
            #[inline]
            #[must_use]
            pub const fn len(&self) -> usize {
                self.0.len()
            }
        }

        impl<'a> From<&'a str> for $name<'a> {
            #[inline]
            fn from(value: &'a str) -> Self {
                Self(value)
            }
        }
    };
}

/// Type of token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty<'a> {
    /// A start tag like `<project>`.
    StartTag(StartTag<'a>),
    /// A standalone empty element tag like `<have_cuda/>`.
    EmptyElementTag(EmptyElementTag<'a>),
    /// An end element tag like `</project>`.
    EndTag(EndTag<'a>),
    /// The character content between markup.
    Characters(Characters<'a>),
    /// A processing instruction like `<?xml version="1.0"?>`.
    ProcessingInstruction(ProcessingInstruction<'a>),
    /// A declaration like `<!DOCTYPE >`.
    Declaration(Declaration<'a>),
    /// A comment like `<!-- Example -->`.
    Comment(Comment<'a>),
    /// Character data like `<![CDATA[ Example ]]>`.
    Cdata(Cdata<'a>),
}

/// Name of a tag which starts after `skip` bytes and ends at the first
/// space or at `end` bytes before the end of the markup.
fn tag_name(markup: &str, skip: usize, end: usize) -> &str {
    let bytes = markup.as_bytes();
    let stop = bytes
        .iter()
        .skip(skip)
        .position(|b| is_space(*b))
        .map_or(bytes.len().saturating_sub(end), |pos| pos + skip);
    markup.get(skip..stop.max(skip)).unwrap_or_default()
}

/// A start tag for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartTag<'a>(&'a str);

impl<'a> StartTag<'a> {
    /// The name of the tag.
    #[must_use]
    pub fn name(&self) -> &'a str {
        tag_name(self.0, 1, 1)
    }
}

converters!(StartTag);

/// An element which has no content.
///
/// A tag like `<have_ati/>` would be an empty element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmptyElementTag<'a>(&'a str);

impl<'a> EmptyElementTag<'a> {
    /// The name of the tag.
    #[must_use]
    pub fn name(&self) -> &'a str {
        tag_name(self.0, 1, 2)
    }
}

converters!(EmptyElementTag);

/// An end tag for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndTag<'a>(&'a str);

impl<'a> EndTag<'a> {
    /// The name of the tag.
    #[must_use]
    pub fn name(&self) -> &'a str {
        tag_name(self.0, 2, 1)
    }
}

converters!(EndTag);

/// Content between markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Characters<'a>(&'a str);

impl<'a> Characters<'a> {
    /// The text content with entity and character references decoded.
    #[inline]
    #[must_use]
    pub fn content(&self) -> Cow<'a, str> {
        escape::unescape(self.0)
    }
}

converters!(Characters);

/// A document processing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessingInstruction<'a>(&'a str);

converters!(ProcessingInstruction);

/// A declaration like `<!DOCTYPE >`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Declaration<'a>(&'a str);

converters!(Declaration);

/// A comment like `<!-- Example -->`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Comment<'a>(&'a str);

converters!(Comment);

/// Character data like `<![CDATA[ Example ]]>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cdata<'a>(&'a str);

impl<'a> Cdata<'a> {
    /// The literal content between `<![CDATA[` and `]]>`.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &'a str {
        self.0
            .get("<![CDATA[".len()..self.0.len().saturating_sub("]]>".len()))
            .unwrap_or_default()
    }
}

converters!(Cdata);
