use crate::{
    error::Result,
    records::{AccountManager, ProjectInfo},
    xml::Element,
};

use super::{is_blank, parse_list, FromElement};

impl FromElement for ProjectInfo {
    const TAG: &'static str = "project";

    fn from_element(element: &Element) -> Self {
        let mut info = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => info.name = child.string(),
                "url" => info.url = child.string(),
                "general_area" => info.general_area = child.string(),
                "specific_area" => info.specific_area = child.string(),
                "description" => info.description = child.string(),
                "home" => info.home = child.string(),
                "platforms" => info
                    .platforms
                    .extend(child.children_named("name").map(Element::string)),
                "image" => info.image = child.string(),
                "summary" => info.summary = child.string(),
                _ => {}
            }
        }
        info
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

impl FromElement for AccountManager {
    const TAG: &'static str = "account_manager";

    fn from_element(element: &Element) -> Self {
        let mut manager = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => manager.name = child.string(),
                "url" => manager.url = child.string(),
                "description" => manager.description = child.string(),
                "image" => manager.image = child.string(),
                _ => {}
            }
        }
        manager
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

/// Parses the projects of the reply to `get_all_projects_list`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_project_infos(xml: &str) -> Result<Vec<ProjectInfo>> {
    parse_list(xml)
}

/// Parses the account managers of the reply to `get_all_projects_list`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_account_managers(xml: &str) -> Result<Vec<AccountManager>> {
    parse_list(xml)
}
