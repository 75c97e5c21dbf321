use crate::{
    error::Result,
    records::{AccountOut, ProjectAttachReply},
    xml::{parse_document, Element},
};

use super::{parse_single, set, FromElement};

impl FromElement for AccountOut {
    const TAG: &'static str = "account_out";

    fn from_element(element: &Element) -> Self {
        let mut account = Self::default();
        for child in element.children() {
            match child.name() {
                "error_num" => set(&mut account.error_num, child.int()),
                "error_msg" => account.error_msg = child.string(),
                "authenticator" => account.authenticator = child.string(),
                _ => {}
            }
        }
        account
    }
}

impl FromElement for ProjectAttachReply {
    const TAG: &'static str = "project_attach_reply";

    fn from_element(element: &Element) -> Self {
        let mut reply = Self::default();
        for child in element.children() {
            match child.name() {
                "error_num" => set(&mut reply.error_num, child.int()),
                "message" => reply.messages.push(child.string()),
                _ => {}
            }
        }
        reply
    }
}

/// Reads an [`AccountOut`] from `<account_out>`, or from the reply element
/// itself when the client answers with a bare `<error_num>`.
#[must_use]
pub(crate) fn account_out_from(root: &Element) -> AccountOut {
    AccountOut::from_element(root.find(AccountOut::TAG).unwrap_or(root))
}

/// Parses the reply to `lookup_account_poll` and `create_account_poll`.
///
/// # Errors
///
/// [`Error::EmptyInput`](crate::Error::EmptyInput) or
/// [`Error::Malformed`](crate::Error::Malformed). A reply without an
/// `<account_out>` element is read from its root element.
pub fn parse_account_out(xml: &str) -> Result<AccountOut> {
    let root = parse_document(xml)?;
    Ok(account_out_from(&root))
}

/// Parses the reply to `project_attach_poll`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_project_attach_reply(xml: &str) -> Result<ProjectAttachReply> {
    parse_single(xml)
}
