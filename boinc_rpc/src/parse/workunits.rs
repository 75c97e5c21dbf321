use crate::{error::Result, records::Workunit, xml::Element};

use super::{is_blank, parse_list, set, FromElement};

impl FromElement for Workunit {
    const TAG: &'static str = "workunit";

    fn from_element(element: &Element) -> Self {
        let mut workunit = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => workunit.name = child.string(),
                "app_name" => workunit.app_name = child.string(),
                "version_num" => set(&mut workunit.version_num, child.int()),
                "rsc_fpops_est" => set(&mut workunit.rsc_fpops_est, child.double()),
                "rsc_fpops_bound" => set(&mut workunit.rsc_fpops_bound, child.double()),
                "rsc_memory_bound" => set(&mut workunit.rsc_memory_bound, child.double()),
                "rsc_disk_bound" => set(&mut workunit.rsc_disk_bound, child.double()),
                _ => {}
            }
        }
        workunit
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

/// Parses the `<workunit>` records of a reply.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_workunits(xml: &str) -> Result<Vec<Workunit>> {
    parse_list(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workunit() {
        let workunits = parse_workunits(
            "<workunits><workunit>\n    <name>wu_1</name>\n    <app_name>einstein_S6</app_name>\n    <version_num>105</version_num>\n    <rsc_fpops_est>1e13</rsc_fpops_est>\n    <rsc_fpops_bound>2.5e14</rsc_fpops_bound>\n    <rsc_memory_bound>100000000.000000</rsc_memory_bound>\n    <rsc_disk_bound>bad</rsc_disk_bound>\n</workunit></workunits>",
        )
        .unwrap();
        assert_eq!(
            vec![Workunit {
                name: "wu_1".into(),
                app_name: "einstein_S6".into(),
                version_num: 105,
                rsc_fpops_est: 1e13,
                rsc_fpops_bound: 2.5e14,
                rsc_memory_bound: 1e8,
                rsc_disk_bound: 0.0,
                project_url: String::new(),
            }],
            workunits
        );
    }

    #[test]
    fn workunit_without_name_is_dropped() {
        let workunits =
            parse_workunits("<workunits><workunit><app_name>a</app_name></workunit></workunits>")
                .unwrap();
        assert!(workunits.is_empty());
    }
}
