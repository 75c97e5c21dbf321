use crate::{
    error::Result,
    records::SimpleReply,
    xml::{parse_document, Element},
};

impl SimpleReply {
    /// Reads `<success/>` or `<error>` from the reply element.
    #[must_use]
    pub fn from_reply(root: &Element) -> Self {
        Self {
            success: root.has_child("success"),
            error_message: root.child_text("error").unwrap_or_default().to_owned(),
        }
    }
}

/// Parses the reply to a request which only succeeds or fails.
///
/// # Errors
///
/// [`Error::EmptyInput`](crate::Error::EmptyInput) or
/// [`Error::Malformed`](crate::Error::Malformed). Any well-formed reply
/// without `<success/>` is an unsuccessful [`SimpleReply`].
pub fn parse_simple_reply(xml: &str) -> Result<SimpleReply> {
    let root = parse_document(xml)?;
    Ok(SimpleReply::from_reply(&root))
}

/// Reads the value of the first `<seqno>`, or -1 if there is none.
#[must_use]
pub(crate) fn message_count_from(root: &Element) -> i32 {
    root.find("seqno").and_then(Element::int).unwrap_or(-1)
}

/// Parses the reply to `get_message_count`.
///
/// # Errors
///
/// [`Error::EmptyInput`](crate::Error::EmptyInput) or
/// [`Error::Malformed`](crate::Error::Malformed). A reply without a numeric
/// `<seqno>` is -1.
pub fn parse_message_count(xml: &str) -> Result<i32> {
    let root = parse_document(xml)?;
    Ok(message_count_from(&root))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn success() {
        let reply = parse_simple_reply("<boinc_gui_rpc_reply>\n<success/>\n</boinc_gui_rpc_reply>")
            .unwrap();
        assert!(reply.success);
        assert_eq!("", reply.error_message);
    }

    #[test]
    fn error() {
        let reply = parse_simple_reply(
            "<boinc_gui_rpc_reply>\n<error>no such project</error>\n</boinc_gui_rpc_reply>",
        )
        .unwrap();
        assert!(!reply.success);
        assert_eq!("no such project", reply.error_message);
    }

    #[test]
    fn neither() {
        assert_eq!(
            SimpleReply::default(),
            parse_simple_reply("<boinc_gui_rpc_reply/>").unwrap()
        );
    }

    #[test]
    fn message_count() {
        assert_eq!(
            42,
            parse_message_count("<boinc_gui_rpc_reply>\n<seqno>42</seqno>\n</boinc_gui_rpc_reply>")
                .unwrap()
        );
        assert_eq!(
            -1,
            parse_message_count("<boinc_gui_rpc_reply></boinc_gui_rpc_reply>").unwrap()
        );
        assert_eq!(-1, parse_message_count("<seqno>many</seqno>").unwrap());
        assert!(matches!(parse_message_count(""), Err(Error::EmptyInput)));
    }
}
