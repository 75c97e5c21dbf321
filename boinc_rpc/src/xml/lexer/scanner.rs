//! Scans the reply text for tokens.

use crate::{
    bytes::{self, QuoteState},
    xml::token::{
        Cdata, Characters, Comment, Declaration, EmptyElementTag, EndTag, ProcessingInstruction,
        StartTag, Ty,
    },
};

/// Finds the `>` which closes a tag, skipping quoted text.
///
/// If `brackets` is set, a `>` inside `[` `]` pairs does not close the tag
/// (used for declarations with internal subsets).
#[must_use]
fn find_tag_end(input: &[u8], from: usize, brackets: bool) -> Option<usize> {
    let mut quote_state = QuoteState::None;
    let mut depth = 0u32;

    for (pos, &byte) in input.iter().enumerate().skip(from) {
        quote_state = quote_state.next(byte);
        if quote_state != QuoteState::None {
            continue;
        }
        match byte {
            b'[' if brackets => depth += 1,
            b']' if brackets => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(pos + 1),
            _ => {}
        }
    }

    None
}

#[must_use]
fn scan_characters(input: &str) -> Ty<'_> {
    debug_assert!(!input.is_empty());

    let len = input.find('<').unwrap_or(input.len());
    Ty::Characters(Characters::from_str(&input[..len]))
}

#[must_use]
fn scan_markup(input: &str) -> Option<Ty<'_>> {
    let bytes = input.as_bytes();
    debug_assert_eq!(bytes::peek(bytes), Some(b'<'));

    match bytes::peek2(bytes)? {
        b'/' => find_tag_end(bytes, 2, false).map(|end| Ty::EndTag(EndTag::from_str(&input[..end]))),
        b'?' => {
            // The `?` of `<?` cannot be reused, `<?>` is incomplete
            bytes::find_end_of(bytes, 2, b"?>")
                .map(|end| Ty::ProcessingInstruction(ProcessingInstruction::from_str(&input[..end])))
        }
        b'!' => scan_bang(input),
        _ => {
            let end = find_tag_end(bytes, 1, false)?;
            let markup = &input[..end];
            if end > 2 && bytes[end - 2] == b'/' {
                Some(Ty::EmptyElementTag(EmptyElementTag::from_str(markup)))
            } else {
                Some(Ty::StartTag(StartTag::from_str(markup)))
            }
        }
    }
}

/// Comments, CDATA sections and declarations all start with `<!`.
#[must_use]
fn scan_bang(input: &str) -> Option<Ty<'_>> {
    const COMMENT: &[u8] = b"<!--";
    const CDATA: &[u8] = b"<![CDATA[";

    let bytes = input.as_bytes();
    if bytes.len() < COMMENT.len() && COMMENT.starts_with(bytes) {
        return None;
    }

    if bytes.starts_with(COMMENT) {
        // `<!-->` is not a complete comment, the dashes are not reused
        bytes::find_end_of(bytes, COMMENT.len(), b"-->")
            .map(|end| Ty::Comment(Comment::from_str(&input[..end])))
    } else if bytes.len() > CDATA.len() && bytes.starts_with(CDATA) {
        bytes::find_end_of(bytes, CDATA.len(), b"]]>")
            .map(|end| Ty::Cdata(Cdata::from_str(&input[..end])))
    } else {
        find_tag_end(bytes, 2, true)
            .map(|end| Ty::Declaration(Declaration::from_str(&input[..end])))
    }
}

/// Scans the input from the beginning and attempts to find a token.
///
/// If a token is not found, then either the input is empty, the input is
/// malformed, or more data is required to complete the token (e.g. `<name`).
///
/// The function does not carry any state.
#[must_use]
pub(super) fn scan(input: &str) -> Option<Ty<'_>> {
    match bytes::peek(input.as_bytes()) {
        None => None,
        Some(b'<') => scan_markup(input),
        Some(_) => Some(scan_characters(input)),
    }
}
