//! Reply parsers.
//!
//! Every reply is first turned into an [`Element`] tree by
//! [`parse_document()`]. The record types then read their fields from the
//! direct children of their record element, so a tag nested in a
//! sub-structure (a `<name>` inside `<gui_url>`) never lands in the outer
//! record.
//!
//! All parsers follow the same convention:
//!
//! * empty input is [`Error::EmptyInput`],
//! * a document which is not well-formed is [`Error::Malformed`],
//! * a list reply without valid records is an empty `Vec`,
//! * a single-record reply without its record element is
//!   [`Error::MissingElement`].
//!
//! # Examples
//!
//! ```
//! use boinc_rpc::parse::parse_messages;
//!
//! let messages = parse_messages(
//!     "<msgs><msg><body>Body</body><time>10</time><seqno>1</seqno><pri>1</pri>\
//!      <project>Project</project></msg></msgs>",
//! )?;
//! assert_eq!(1, messages.len());
//! assert_eq!("Body", messages[0].body);
//! assert_eq!(10, messages[0].timestamp);
//! # Ok::<(), boinc_rpc::Error>(())
//! ```

use log::trace;

use crate::{
    error::{Error, Result},
    xml::{parse_document, Element},
};

mod account;
mod acct_mgr;
mod apps;
mod cc_state;
mod cc_status;
mod global_prefs;
mod host_info;
mod messages;
mod notices;
mod project_config;
mod project_list;
mod projects;
mod results;
mod simple_reply;
mod transfers;
mod version_info;
mod workunits;

pub use account::{parse_account_out, parse_project_attach_reply};
pub use acct_mgr::{parse_acct_mgr_info, parse_acct_mgr_rpc_reply};
pub use apps::{parse_app_versions, parse_apps};
pub use cc_state::parse_cc_state;
pub use cc_status::parse_cc_status;
pub use global_prefs::parse_global_preferences;
pub use host_info::parse_host_info;
pub use messages::parse_messages;
pub use notices::parse_notices;
pub use project_config::parse_project_config;
pub use project_list::{parse_account_managers, parse_project_infos};
pub use projects::parse_projects;
pub use results::parse_results;
pub use simple_reply::{parse_message_count, parse_simple_reply};
pub use transfers::parse_transfers;
pub use version_info::parse_version_info;
pub use workunits::parse_workunits;

#[cfg(feature = "client")]
pub(crate) use account::account_out_from;
#[cfg(feature = "client")]
pub(crate) use simple_reply::message_count_from;

/// A record which is read from one element of a reply.
pub trait FromElement: Sized {
    /// Tag name of the record element.
    const TAG: &'static str;

    /// Reads the record from its element.
    ///
    /// Unknown children are ignored and fields whose text does not convert
    /// keep their default.
    fn from_element(element: &Element) -> Self;

    /// Returns false if the record is too incomplete to be reported.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Collects the valid records of type `T` below `root`.
#[must_use]
pub fn list_from<T: FromElement>(root: &Element) -> Vec<T> {
    let mut records = Vec::new();
    for element in root.find_all(T::TAG) {
        push_valid(&mut records, T::from_element(element));
    }
    records
}

/// Reads the first record of type `T` in `root`.
///
/// # Errors
///
/// [`Error::MissingElement`] if there is no `T::TAG` element.
pub fn single_from<T: FromElement>(root: &Element) -> Result<T> {
    root.find(T::TAG)
        .map(T::from_element)
        .ok_or(Error::MissingElement(T::TAG))
}

pub(crate) fn parse_list<T: FromElement>(xml: &str) -> Result<Vec<T>> {
    let root = parse_document(xml)?;
    Ok(list_from(&root))
}

pub(crate) fn parse_single<T: FromElement>(xml: &str) -> Result<T> {
    let root = parse_document(xml)?;
    single_from(&root)
}

pub(crate) fn push_valid<T: FromElement>(records: &mut Vec<T>, record: T) {
    if record.is_valid() {
        records.push(record);
    } else {
        trace!("dropping incomplete <{}> record", T::TAG);
    }
}

/// Overwrites `field` if the value converted.
#[inline]
pub(crate) fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[inline]
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        name: String,
        count: i32,
    }

    impl FromElement for Item {
        const TAG: &'static str = "item";

        fn from_element(element: &Element) -> Self {
            let mut item = Self::default();
            for child in element.children() {
                match child.name() {
                    "name" => item.name = child.string(),
                    "count" => set(&mut item.count, child.int()),
                    _ => {}
                }
            }
            item
        }

        fn is_valid(&self) -> bool {
            !is_blank(&self.name)
        }
    }

    #[test]
    fn list_keeps_only_valid_records() {
        let items: Vec<Item> = parse_list(
            "<items><item><name>a</name><count>1</count></item>\
             <item><count>2</count></item>\
             <item><name> </name></item>\
             <item><name>b</name><count>x</count></item></items>",
        )
        .unwrap();
        assert_eq!(
            vec![
                Item {
                    name: "a".into(),
                    count: 1
                },
                Item {
                    name: "b".into(),
                    count: 0
                },
            ],
            items
        );
    }

    #[test]
    fn list_without_records_is_empty() {
        let items: Vec<Item> = parse_list("<items/>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_list::<Item>(""), Err(Error::EmptyInput)));
        assert!(matches!(parse_single::<Item>(""), Err(Error::EmptyInput)));
    }

    #[test]
    fn single_record_may_be_the_root() {
        let item: Item = parse_single("<item><name>a</name></item>").unwrap();
        assert_eq!("a", item.name);
    }

    #[test]
    fn missing_single_record() {
        assert!(matches!(
            parse_single::<Item>("<reply><other/></reply>"),
            Err(Error::MissingElement("item"))
        ));
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(
            parse_list::<Item>("<items><item></items>"),
            Err(Error::Malformed { .. })
        ));
    }
}
