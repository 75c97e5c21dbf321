use log::trace;

use crate::{
    error::Result,
    records::{GlobalPreferences, TimeSpan},
    xml::Element,
};

use super::{parse_single, set, FromElement};

/// Per-weekday overrides (`<day_prefs>`).
#[derive(Debug, Default)]
struct DayPrefs {
    day_of_week: Option<usize>,
    start_hour: Option<f64>,
    end_hour: Option<f64>,
    net_start_hour: Option<f64>,
    net_end_hour: Option<f64>,
}

impl DayPrefs {
    fn from_element(element: &Element) -> Self {
        let mut day = Self::default();
        for child in element.children() {
            match child.name() {
                "day_of_week" => {
                    day.day_of_week = child
                        .int()
                        .and_then(|d| usize::try_from(d).ok())
                        .filter(|d| *d < 7);
                }
                "start_hour" => day.start_hour = child.double(),
                "end_hour" => day.end_hour = child.double(),
                "net_start_hour" => day.net_start_hour = child.double(),
                "net_end_hour" => day.net_end_hour = child.double(),
                _ => {}
            }
        }
        day
    }

    fn span(start_hour: Option<f64>, end_hour: Option<f64>) -> Option<TimeSpan> {
        match (start_hour, end_hour) {
            (Some(start_hour), Some(end_hour)) => Some(TimeSpan {
                start_hour,
                end_hour,
            }),
            _ => None,
        }
    }

    fn apply(self, prefs: &mut GlobalPreferences) {
        let Some(day) = self.day_of_week else {
            trace!("ignoring <day_prefs> without a valid <day_of_week>");
            return;
        };
        if let Some(span) = Self::span(self.start_hour, self.end_hour) {
            prefs.cpu_times.week_prefs[day] = Some(span);
        }
        if let Some(span) = Self::span(self.net_start_hour, self.net_end_hour) {
            prefs.net_times.week_prefs[day] = Some(span);
        }
    }
}

impl FromElement for GlobalPreferences {
    const TAG: &'static str = "global_preferences";

    fn from_element(element: &Element) -> Self {
        let mut prefs = Self::default();
        for child in element.children() {
            match child.name() {
                "run_on_batteries" => prefs.run_on_batteries = child.flag(),
                "battery_charge_min_pct" => set(&mut prefs.battery_charge_min_pct, child.double()),
                "battery_max_temperature" => {
                    set(&mut prefs.battery_max_temperature, child.double());
                }
                "run_gpu_if_user_active" => prefs.run_gpu_if_user_active = child.flag(),
                "run_if_user_active" => prefs.run_if_user_active = child.flag(),
                "idle_time_to_run" => set(&mut prefs.idle_time_to_run, child.double()),
                "suspend_cpu_usage" => set(&mut prefs.suspend_cpu_usage, child.double()),
                "leave_apps_in_memory" => prefs.leave_apps_in_memory = child.flag(),
                "dont_verify_images" => prefs.dont_verify_images = child.flag(),
                "work_buf_min_days" => set(&mut prefs.work_buf_min_days, child.double()),
                "work_buf_additional_days" => {
                    set(&mut prefs.work_buf_additional_days, child.double());
                }
                "max_ncpus_pct" => set(&mut prefs.max_ncpus_pct, child.double()),
                "cpu_scheduling_period_minutes" => {
                    set(&mut prefs.cpu_scheduling_period_minutes, child.double());
                }
                "disk_interval" => set(&mut prefs.disk_interval, child.double()),
                "disk_max_used_gb" => set(&mut prefs.disk_max_used_gb, child.double()),
                "disk_max_used_pct" => set(&mut prefs.disk_max_used_pct, child.double()),
                "disk_min_free_gb" => set(&mut prefs.disk_min_free_gb, child.double()),
                "vm_max_used_pct" => {
                    set(&mut prefs.vm_max_used_frac, child.double().map(|p| p / 100.0));
                }
                "ram_max_used_busy_pct" => {
                    set(&mut prefs.ram_max_used_busy_frac, child.double().map(|p| p / 100.0));
                }
                "ram_max_used_idle_pct" => {
                    set(&mut prefs.ram_max_used_idle_frac, child.double().map(|p| p / 100.0));
                }
                "max_bytes_sec_up" => set(&mut prefs.max_bytes_sec_up, child.double()),
                "max_bytes_sec_down" => set(&mut prefs.max_bytes_sec_down, child.double()),
                "cpu_usage_limit" => set(&mut prefs.cpu_usage_limit, child.double()),
                "daily_xfer_limit_mb" => set(&mut prefs.daily_xfer_limit_mb, child.double()),
                "daily_xfer_period_days" => set(&mut prefs.daily_xfer_period_days, child.int()),
                "network_wifi_only" => prefs.network_wifi_only = child.flag(),
                "start_hour" => set(&mut prefs.cpu_times.start_hour, child.double()),
                "end_hour" => set(&mut prefs.cpu_times.end_hour, child.double()),
                "net_start_hour" => set(&mut prefs.net_times.start_hour, child.double()),
                "net_end_hour" => set(&mut prefs.net_times.end_hour, child.double()),
                "day_prefs" => DayPrefs::from_element(child).apply(&mut prefs),
                _ => {}
            }
        }
        prefs
    }
}

/// Parses a `<global_preferences>` document, as returned by
/// `get_global_prefs_working` and `get_global_prefs_override`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_global_preferences(xml: &str) -> Result<GlobalPreferences> {
    parse_single(xml)
}
