use crate::{error::Result, records::Message, xml::Element};

use super::{parse_list, set, FromElement};

impl FromElement for Message {
    const TAG: &'static str = "msg";

    fn from_element(element: &Element) -> Self {
        let mut msg = Self::default();
        for child in element.children() {
            match child.name() {
                "project" => msg.project = child.string(),
                "pri" => set(&mut msg.priority, child.int()),
                "seqno" => set(&mut msg.seqno, child.int()),
                "time" => set(&mut msg.timestamp, child.truncated()),
                "body" => msg.body = child.string(),
                _ => {}
            }
        }
        msg
    }
}

/// Parses the reply to `get_messages`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_messages(xml: &str) -> Result<Vec<Message>> {
    parse_list(xml)
}
