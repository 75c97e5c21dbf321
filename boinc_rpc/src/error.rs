//! Error type shared by the parsers and the RPC client.

use std::io;

use thiserror::Error;

/// Errors from parsing a reply or talking to the core client.
///
/// Field-level problems (a number which does not parse, a record without a
/// name) are never errors; the field keeps its default or the record is
/// dropped.
#[derive(Debug, Error)]
pub enum Error {
    /// The reply text was empty or whitespace only.
    #[error("empty reply")]
    EmptyInput,

    /// The reply is not a well-formed document.
    #[error("malformed reply at byte {offset}: {reason}")]
    Malformed {
        /// Byte offset where the problem was found.
        offset: usize,
        /// What was wrong.
        reason: &'static str,
    },

    /// The element a single-record reply is built from is absent.
    #[error("reply has no <{0}> element")]
    MissingElement(&'static str),

    /// The core client refused the request because the connection is not
    /// authorized.
    #[error("not authorized")]
    Unauthorized,

    /// The core client answered with an `<error>` message.
    #[error("core client error: {0}")]
    Rpc(String),

    /// The transport failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The reply bytes are not UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    #[inline]
    #[must_use]
    pub(crate) const fn malformed(offset: usize, reason: &'static str) -> Self {
        Error::Malformed { offset, reason }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
