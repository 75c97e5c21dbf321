//! A small non-validating XML layer for GUI RPC replies.
//!
//! The [`Lexer`] splits text into [`Token`]s without allocating.
//! [`parse_document()`] turns the tokens of one reply into an owned
//! [`Element`] tree, collecting each element's character data in its own
//! [`TextBuffer`]. The reply parsers work on that tree.

mod element;
pub(crate) mod escape;
mod lexer;
mod text;
mod token;
pub mod value;

pub use element::{parse_document, Element, MAX_DEPTH};
pub use lexer::{IntoIter, Lexer};
pub use text::TextBuffer;
pub use token::{
    Cdata, Characters, Comment, Declaration, EmptyElementTag, EndTag, ProcessingInstruction,
    StartTag, Token, Ty,
};
