use crate::{
    error::Result,
    records::{App, AppVersion},
    xml::Element,
};

use super::{is_blank, parse_list, set, FromElement};

impl FromElement for App {
    const TAG: &'static str = "app";

    fn from_element(element: &Element) -> Self {
        let mut app = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => app.name = child.string(),
                "user_friendly_name" => app.user_friendly_name = child.string(),
                "non_cpu_intensive" => set(&mut app.non_cpu_intensive, child.int()),
                _ => {}
            }
        }
        app
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

impl FromElement for AppVersion {
    const TAG: &'static str = "app_version";

    fn from_element(element: &Element) -> Self {
        let mut version = Self::default();
        for child in element.children() {
            match child.name() {
                "app_name" => version.app_name = child.string(),
                "version_num" => set(&mut version.version_num, child.int()),
                "platform" => version.platform = child.string(),
                "plan_class" => version.plan_class = child.string(),
                "api_version" => version.api_version = child.string(),
                "avg_ncpus" => set(&mut version.avg_ncpus, child.double()),
                "max_ncpus" => set(&mut version.max_ncpus, child.double()),
                "gpu_ram" => set(&mut version.gpu_ram, child.double()),
                _ => {}
            }
        }
        version
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.app_name)
    }
}

/// Parses the `<app>` records of a reply.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_apps(xml: &str) -> Result<Vec<App>> {
    parse_list(xml)
}

/// Parses the `<app_version>` records of a reply.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_app_versions(xml: &str) -> Result<Vec<AppVersion>> {
    parse_list(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app() {
        let apps = parse_apps(
            "<apps><app>\n    <name>setiathome_v7</name>\n    <user_friendly_name>SETI@home v7</user_friendly_name>\n    <non_cpu_intensive>0</non_cpu_intensive>\n</app></apps>",
        )
        .unwrap();
        assert_eq!(
            vec![App {
                name: "setiathome_v7".into(),
                user_friendly_name: "SETI@home v7".into(),
                non_cpu_intensive: 0,
                project_url: String::new(),
            }],
            apps
        );
        assert_eq!("SETI@home v7", apps[0].display_name());
    }

    #[test]
    fn app_without_name_is_dropped() {
        let apps = parse_apps(
            "<apps><app><user_friendly_name>Nameless</user_friendly_name></app></apps>",
        )
        .unwrap();
        assert!(apps.is_empty());
    }

    #[test]
    fn non_numeric_flag_keeps_other_fields() {
        let apps = parse_apps(
            "<apps><app><name>a</name><non_cpu_intensive>yes</non_cpu_intensive><user_friendly_name>A</user_friendly_name></app></apps>",
        )
        .unwrap();
        assert_eq!(0, apps[0].non_cpu_intensive);
        assert_eq!("A", apps[0].user_friendly_name);
    }

    #[test]
    fn app_version() {
        let versions = parse_app_versions(
            "<app_versions><app_version>\n    <app_name>einstein_S6</app_name>\n    <version_num>105</version_num>\n    <platform>arm-android-linux-gnueabi</platform>\n    <plan_class>NEON</plan_class>\n    <avg_ncpus>1.000000</avg_ncpus>\n    <max_ncpus>1.000000</max_ncpus>\n    <api_version>7.1.0</api_version>\n</app_version></app_versions>",
        )
        .unwrap();
        assert_eq!(1, versions.len());
        let version = &versions[0];
        assert_eq!("einstein_S6", version.app_name);
        assert_eq!(105, version.version_num);
        assert_eq!("arm-android-linux-gnueabi", version.platform);
        assert_eq!("NEON", version.plan_class);
        assert_eq!("7.1.0", version.api_version);
        assert_eq!(1.0, version.avg_ncpus);
        assert_eq!(1.0, version.max_ncpus);
    }

    #[test]
    fn app_version_without_app_name_is_dropped() {
        let versions =
            parse_app_versions("<app_versions><app_version><version_num>1</version_num></app_version></app_versions>")
                .unwrap();
        assert!(versions.is_empty());
    }
}
