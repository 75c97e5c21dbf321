use crate::{error::Result, records::VersionInfo, xml::Element};

use super::{parse_single, set, FromElement};

impl FromElement for VersionInfo {
    const TAG: &'static str = "server_version";

    fn from_element(element: &Element) -> Self {
        let mut version = Self::default();
        for child in element.children() {
            match child.name() {
                "major" => set(&mut version.major, child.int()),
                "minor" => set(&mut version.minor, child.int()),
                "release" => set(&mut version.release, child.int()),
                _ => {}
            }
        }
        version
    }
}

/// Parses the reply to `exchange_versions`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_version_info(xml: &str) -> Result<VersionInfo> {
    parse_single(xml)
}
