use crate::{error::Result, records::Notice, xml::Element};

use super::{parse_list, set, FromElement};

impl FromElement for Notice {
    const TAG: &'static str = "notice";

    fn from_element(element: &Element) -> Self {
        let mut notice = Self::default();
        for child in element.children() {
            match child.name() {
                "seqno" => set(&mut notice.seqno, child.int()),
                "title" => notice.title = child.string(),
                "description" => notice.description = child.string(),
                "create_time" => set(&mut notice.create_time, child.double()),
                "arrival_time" => set(&mut notice.arrival_time, child.double()),
                "is_private" => notice.is_private = child.flag(),
                "project_name" => notice.project_name = child.string(),
                "category" => notice.category = child.string(),
                "link" => notice.link = child.string(),
                _ => {}
            }
        }
        notice
    }

    fn is_valid(&self) -> bool {
        self.seqno != -1
    }
}

/// Parses the reply to `get_notices`.
///
/// Notices without a sequence number are dropped.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_notices(xml: &str) -> Result<Vec<Notice>> {
    parse_list(xml)
}
