use crate::{
    error::Result,
    records::{AcctMgrInfo, AcctMgrRpcReply},
    xml::Element,
};

use super::{parse_single, set, FromElement};

impl FromElement for AcctMgrInfo {
    const TAG: &'static str = "acct_mgr_info";

    fn from_element(element: &Element) -> Self {
        let mut info = Self::default();
        for child in element.children() {
            match child.name() {
                "acct_mgr_name" => info.acct_mgr_name = child.string(),
                "acct_mgr_url" => info.acct_mgr_url = child.string(),
                "have_credentials" => info.have_credentials = child.flag(),
                "cookie_required" => info.cookie_required = child.flag(),
                "cookie_failure_url" => info.cookie_failure_url = child.string(),
                _ => {}
            }
        }
        info
    }
}

impl FromElement for AcctMgrRpcReply {
    const TAG: &'static str = "acct_mgr_rpc_reply";

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

/// Parses the reply to `acct_mgr_info`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_acct_mgr_info(xml: &str) -> Result<AcctMgrInfo> {
    parse_single(xml)
}

/// Parses the reply to `acct_mgr_rpc_poll`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_acct_mgr_rpc_reply(xml: &str) -> Result<AcctMgrRpcReply> {
    parse_single(xml)
}
