use crate::{
    error::Result,
    records::{ActiveTask, Task},
    xml::Element,
};

use super::{is_blank, parse_list, set, FromElement};

impl FromElement for ActiveTask {
    const TAG: &'static str = "active_task";

    fn from_element(element: &Element) -> Self {
        let mut active = Self::default();
        for child in element.children() {
            match child.name() {
                "active_task_state" => set(&mut active.active_task_state, child.int()),
                "app_version_num" => set(&mut active.app_version_num, child.int()),
                "slot" => set(&mut active.slot, child.int()),
                "pid" => set(&mut active.pid, child.int()),
                "scheduler_state" => set(&mut active.scheduler_state, child.int()),
                "checkpoint_cpu_time" => set(&mut active.checkpoint_cpu_time, child.double()),
                "current_cpu_time" => set(&mut active.current_cpu_time, child.double()),
                "fraction_done" => set(&mut active.fraction_done, child.double()),
                "elapsed_time" => set(&mut active.elapsed_time, child.double()),
                "swap_size" => set(&mut active.swap_size, child.double()),
                "working_set_size_smoothed" => {
                    set(&mut active.working_set_size_smoothed, child.double());
                }
                "progress_rate" => set(&mut active.progress_rate, child.double()),
                "too_large" => active.too_large = child.flag(),
                "needs_shmem" => active.needs_shmem = child.flag(),
                "edf_scheduled" => active.edf_scheduled = child.flag(),
                "graphics_exec_path" => active.graphics_exec_path = child.string(),
                "slot_path" => active.slot_path = child.string(),
                _ => {}
            }
        }
        active
    }
}

impl FromElement for Task {
    const TAG: &'static str = "result";

    fn from_element(element: &Element) -> Self {
        let mut task = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => task.name = child.string(),
                "wu_name" => task.wu_name = child.string(),
                "project_url" => task.project_url = child.string(),
                "version_num" => set(&mut task.version_num, child.int()),
                "plan_class" => task.plan_class = child.string(),
                "platform" => task.platform = child.string(),
                "ready_to_report" => task.ready_to_report = child.flag(),
                "got_server_ack" => task.got_server_ack = child.flag(),
                "final_cpu_time" => set(&mut task.final_cpu_time, child.double()),
                "final_elapsed_time" => set(&mut task.final_elapsed_time, child.double()),
                "state" => set(&mut task.state, child.int()),
                "exit_status" => set(&mut task.exit_status, child.int()),
                "signal" => set(&mut task.signal, child.int()),
                "stderr_out" => task.stderr_out = child.string(),
                "suspended_via_gui" => task.suspended_via_gui = child.flag(),
                "project_suspended_via_gui" => task.project_suspended_via_gui = child.flag(),
                "coproc_missing" => task.coproc_missing = child.flag(),
                "gpu_mem_wait" => task.gpu_mem_wait = child.flag(),
                "report_deadline" => set(&mut task.report_deadline, child.double()),
                "received_time" => set(&mut task.received_time, child.double()),
                "estimated_cpu_time_remaining" => {
                    set(&mut task.estimated_cpu_time_remaining, child.double());
                }
                "resources" => task.resources = child.string(),
                "active_task" => task.active_task = Some(ActiveTask::from_element(child)),
                _ => {}
            }
        }
        task
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

/// Parses the reply to `get_results`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_results(xml: &str) -> Result<Vec<Task>> {
    parse_list(xml)
}
