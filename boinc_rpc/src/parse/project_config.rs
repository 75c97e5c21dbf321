use crate::{
    error::Result,
    records::{PlatformInfo, ProjectConfig},
    xml::Element,
};

use super::{parse_single, set, FromElement};

impl FromElement for PlatformInfo {
    const TAG: &'static str = "platform";

    fn from_element(element: &Element) -> Self {
        let mut platform = Self::default();
        for child in element.children() {
            match child.name() {
                "platform_name" => platform.name = child.string(),
                "user_friendly_name" => platform.friendly_name = child.string(),
                "plan_class" => platform.plan_class = child.string(),
                _ => {}
            }
        }
        platform
    }
}

impl FromElement for ProjectConfig {
    const TAG: &'static str = "project_config";

    fn from_element(element: &Element) -> Self {
        let mut config = Self::default();
        for child in element.children() {
            match child.name() {
                "error_num" => set(&mut config.error_num, child.int()),
                "name" => config.name = child.string(),
                "master_url" => config.master_url = child.string(),
                "web_rpc_url_base" => config.web_rpc_url_base = child.string(),
                "local_revision" => config.local_revision = child.string(),
                "min_passwd_length" => set(&mut config.min_passwd_length, child.int()),
                "account_manager" => config.account_manager = child.flag(),
                "uses_username" => config.uses_username = child.flag(),
                "account_creation_disabled" => config.account_creation_disabled = child.flag(),
                "client_account_creation_disabled" => {
                    config.client_account_creation_disabled = child.flag();
                }
                "terms_of_use" => config.terms_of_use = child.string(),
                "min_client_version" => set(&mut config.min_client_version, child.int()),
                "rpc_prefix" => config.rpc_prefix = child.string(),
                "platforms" => config.platforms.extend(
                    child
                        .children_named(PlatformInfo::TAG)
                        .map(PlatformInfo::from_element),
                ),
                _ => {}
            }
        }
        config
    }
}

/// Parses the reply to `get_project_config_poll`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_project_config(xml: &str) -> Result<ProjectConfig> {
    parse_single(xml)
}
