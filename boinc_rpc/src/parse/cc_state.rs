use crate::{
    error::Result,
    records::{App, AppVersion, CcState, HostInfo, Project, Task, Workunit},
    xml::Element,
};

use super::{parse_single, push_valid, set, FromElement};

impl FromElement for CcState {
    const TAG: &'static str = "client_state";

    /// Apps, app versions and workunits belong to the `<project>` which
    /// precedes them in the document.
    fn from_element(element: &Element) -> Self {
        let mut state = Self::default();
        let mut project_url = String::new();
        for child in element.children() {
            match child.name() {
                "host_info" => state.host_info = HostInfo::from_element(child),
                "project" => {
                    let project = Project::from_element(child);
                    project_url.clone_from(&project.master_url);
                    push_valid(&mut state.projects, project);
                }
                "app" => {
                    let mut app = App::from_element(child);
                    app.project_url.clone_from(&project_url);
                    push_valid(&mut state.apps, app);
                }
                "app_version" => {
                    let mut version = AppVersion::from_element(child);
                    version.project_url.clone_from(&project_url);
                    push_valid(&mut state.app_versions, version);
                }
                "workunit" => {
                    let mut workunit = Workunit::from_element(child);
                    workunit.project_url.clone_from(&project_url);
                    push_valid(&mut state.workunits, workunit);
                }
                "result" => push_valid(&mut state.results, Task::from_element(child)),
                "core_client_major_version" => set(&mut state.version_info.major, child.int()),
                "core_client_minor_version" => set(&mut state.version_info.minor, child.int()),
                "core_client_release" => set(&mut state.version_info.release, child.int()),
                "platform_name" => state.platform_name = child.string(),
                "have_ati" => state.have_ati = child.flag(),
                "have_cuda" => state.have_cuda = child.flag(),
                _ => {}
            }
        }
        state
    }
}

/// Parses the reply to `get_state` into a new snapshot.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_cc_state(xml: &str) -> Result<CcState> {
    parse_single(xml)
}
