use crate::{
    error::Result,
    records::{GuiUrl, Project},
    xml::Element,
};

use super::{is_blank, parse_list, set, FromElement};

impl FromElement for GuiUrl {
    const TAG: &'static str = "gui_url";

    fn from_element(element: &Element) -> Self {
        let mut gui_url = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => gui_url.name = child.string(),
                "description" => gui_url.description = child.string(),
                "url" => gui_url.url = child.string(),
                _ => {}
            }
        }
        gui_url
    }
}

impl FromElement for Project {
    const TAG: &'static str = "project";

    fn from_element(element: &Element) -> Self {
        let mut project = Self::default();
        for child in element.children() {
            match child.name() {
                "master_url" => project.master_url = child.string(),
                "project_dir" => project.project_dir = child.string(),
                "resource_share" => set(&mut project.resource_share, child.double()),
                "project_name" => project.project_name = child.string(),
                "user_name" => project.user_name = child.string(),
                "team_name" => project.team_name = child.string(),
                "host_venue" => project.host_venue = child.string(),
                "hostid" => set(&mut project.hostid, child.int()),
                "gui_urls" => project
                    .gui_urls
                    .extend(child.children_named(GuiUrl::TAG).map(GuiUrl::from_element)),
                "gui_url" => project.gui_urls.push(GuiUrl::from_element(child)),
                "user_total_credit" => set(&mut project.user_total_credit, child.double()),
                "user_expavg_credit" => set(&mut project.user_expavg_credit, child.double()),
                "host_total_credit" => set(&mut project.host_total_credit, child.double()),
                "host_expavg_credit" => set(&mut project.host_expavg_credit, child.double()),
                "nrpc_failures" => set(&mut project.nrpc_failures, child.int()),
                "master_fetch_failures" => set(&mut project.master_fetch_failures, child.int()),
                "min_rpc_time" => set(&mut project.min_rpc_time, child.double()),
                "download_backoff" => set(&mut project.download_backoff, child.double()),
                "upload_backoff" => set(&mut project.upload_backoff, child.double()),
                "duration_correction_factor" => {
                    set(&mut project.duration_correction_factor, child.double());
                }
                "sched_rpc_pending" => set(&mut project.sched_rpc_pending, child.int()),
                "master_url_fetch_pending" => project.master_url_fetch_pending = child.flag(),
                "non_cpu_intensive" => project.non_cpu_intensive = child.flag(),
                "suspended_via_gui" => project.suspended_via_gui = child.flag(),
                "dont_request_more_work" => project.dont_request_more_work = child.flag(),
                "scheduler_rpc_in_progress" => project.scheduler_rpc_in_progress = child.flag(),
                "attached_via_acct_mgr" => project.attached_via_acct_mgr = child.flag(),
                "detach_when_done" => project.detach_when_done = child.flag(),
                "ended" => project.ended = child.flag(),
                "trickle_up_pending" => project.trickle_up_pending = child.flag(),
                "project_files_downloaded_time" => {
                    set(&mut project.project_files_downloaded_time, child.double());
                }
                "last_rpc_time" => set(&mut project.last_rpc_time, child.double()),
                "no_cpu_pref" => project.no_cpu_pref = child.flag(),
                "no_cuda_pref" => project.no_cuda_pref = child.flag(),
                "no_ati_pref" => project.no_ati_pref = child.flag(),
                _ => {}
            }
        }
        project
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.master_url)
    }
}

/// Parses the reply to `get_project_status`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_projects(xml: &str) -> Result<Vec<Project>> {
    parse_list(xml)
}
