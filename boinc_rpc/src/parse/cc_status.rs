use crate::{error::Result, records::CcStatus, xml::Element};

use super::{parse_single, set, FromElement};

impl FromElement for CcStatus {
    const TAG: &'static str = "cc_status";

    fn from_element(element: &Element) -> Self {
        let mut status = Self::default();
        for child in element.children() {
            match child.name() {
                "network_status" => set(&mut status.network_status, child.int()),
                "ams_password_error" => status.ams_password_error = child.truthy(),
                "manager_must_quit" => status.manager_must_quit = child.truthy(),
                "task_suspend_reason" => set(&mut status.task_suspend_reason, child.int()),
                "task_mode" => set(&mut status.task_mode, child.int()),
                "task_mode_perm" => set(&mut status.task_mode_perm, child.int()),
                "task_mode_delay" => set(&mut status.task_mode_delay, child.double()),
                "gpu_suspend_reason" => set(&mut status.gpu_suspend_reason, child.int()),
                "gpu_mode" => set(&mut status.gpu_mode, child.int()),
                "gpu_mode_perm" => set(&mut status.gpu_mode_perm, child.int()),
                "gpu_mode_delay" => set(&mut status.gpu_mode_delay, child.double()),
                "network_suspend_reason" => set(&mut status.network_suspend_reason, child.int()),
                "network_mode" => set(&mut status.network_mode, child.int()),
                "network_mode_perm" => set(&mut status.network_mode_perm, child.int()),
                "network_mode_delay" => set(&mut status.network_mode_delay, child.double()),
                "disallow_attach" => status.disallow_attach = child.truthy(),
                "simple_gui_only" => status.simple_gui_only = child.truthy(),
                "max_event_log_lines" => set(&mut status.max_event_log_lines, child.int()),
                _ => {}
            }
        }
        status
    }
}

/// Parses the reply to `get_cc_status`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_cc_status(xml: &str) -> Result<CcStatus> {
    parse_single(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_flags(ams_password_error: &str, manager_must_quit: &str) -> CcStatus {
        parse_cc_status(&format!(
            "<cc_status><ams_password_error>{ams_password_error}</ams_password_error><manager_must_quit>{manager_must_quit}</manager_must_quit></cc_status>"
        ))
        .unwrap()
    }

    #[test]
    fn status() {
        let status = parse_cc_status(
            "<boinc_gui_rpc_reply>
<cc_status>
   <network_status>2</network_status>
   <ams_password_error>0</ams_password_error>
   <task_suspend_reason>4</task_suspend_reason>
   <task_mode>2</task_mode>
   <task_mode_perm>2</task_mode_perm>
   <task_mode_delay>0.000000</task_mode_delay>
   <gpu_suspend_reason>0</gpu_suspend_reason>
   <gpu_mode>3</gpu_mode>
   <gpu_mode_perm>3</gpu_mode_perm>
   <gpu_mode_delay>0.000000</gpu_mode_delay>
   <network_suspend_reason>0</network_suspend_reason>
   <network_mode>2</network_mode>
   <network_mode_perm>2</network_mode_perm>
   <network_mode_delay>120.500000</network_mode_delay>
   <disallow_attach>0</disallow_attach>
   <simple_gui_only>0</simple_gui_only>
   <max_event_log_lines>2000</max_event_log_lines>
</cc_status>
</boinc_gui_rpc_reply>",
        )
        .unwrap();
        assert_eq!(2, status.network_status);
        assert_eq!(4, status.task_suspend_reason);
        assert_eq!(2, status.task_mode);
        assert_eq!(3, status.gpu_mode);
        assert_eq!(120.5, status.network_mode_delay);
        assert_eq!(2000, status.max_event_log_lines);
        assert!(!status.ams_password_error);
        assert!(!status.manager_must_quit);
        assert!(!status.disallow_attach);
    }

    #[test]
    fn truthy_flags() {
        assert!(!with_flags("0", "0").ams_password_error);
        assert!(with_flags("1", "0").ams_password_error);
        assert!(with_flags("0", "1").manager_must_quit);
        assert!(with_flags("11", "11").ams_password_error);
        assert!(with_flags("11", "11").manager_must_quit);
        assert!(!with_flags("00", "00").ams_password_error);
        assert!(!with_flags("00", "00").manager_must_quit);
    }

    #[test]
    fn non_numeric_flags_are_false() {
        let status = with_flags("yes", "");
        assert!(!status.ams_password_error);
        assert!(!status.manager_must_quit);
    }
}
