//! Plain data records for the GUI RPC replies.
//!
//! Each record mirrors one element of the core client's reply schema. Field
//! names are the wire tag names, so the schema documentation of the core
//! client applies to them directly. Records refer to each other by key
//! (`project_url`, `app_name`, `wu_name`), never by resolved object.

// Field names are the wire schema.
#![allow(missing_docs)]

use core::fmt;

/// One entry of the event log (`<msg>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub project: String,
    pub priority: i32,
    pub seqno: i32,
    /// Seconds since the epoch (`<time>`).
    pub timestamp: i64,
    pub body: String,
}

/// A notice from a project or the client (`<notice>`).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// -1 until the notice has been read from a reply.
    pub seqno: i32,
    pub title: String,
    pub description: String,
    pub create_time: f64,
    pub arrival_time: f64,
    pub is_private: bool,
    pub project_name: String,
    pub category: String,
    pub link: String,
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            seqno: -1,
            title: String::new(),
            description: String::new(),
            create_time: 0.0,
            arrival_time: 0.0,
            is_private: false,
            project_name: String::new(),
            category: String::new(),
            link: String::new(),
        }
    }
}

impl Notice {
    /// Notices with the `server` category come from the BOINC server, not a
    /// project.
    #[must_use]
    pub fn is_server_notice(&self) -> bool {
        self.category == "server"
    }
}

/// An application of a project (`<app>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct App {
    pub name: String,
    pub user_friendly_name: String,
    pub non_cpu_intensive: i32,
    /// Master URL of the owning project, only known inside a client state.
    pub project_url: String,
}

impl App {
    /// The friendly name if the project set one, the short name otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.user_friendly_name.is_empty() {
            &self.name
        } else {
            &self.user_friendly_name
        }
    }
}

/// A version of an application (`<app_version>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppVersion {
    pub app_name: String,
    pub version_num: i32,
    pub platform: String,
    pub plan_class: String,
    pub api_version: String,
    pub avg_ncpus: f64,
    pub max_ncpus: f64,
    pub gpu_ram: f64,
    /// Master URL of the owning project, only known inside a client state.
    pub project_url: String,
}

/// A link the project asks the manager to show (`<gui_url>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuiUrl {
    pub name: String,
    pub description: String,
    pub url: String,
}

/// An attached project (`<project>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub master_url: String,
    pub project_dir: String,
    pub resource_share: f64,
    pub project_name: String,
    pub user_name: String,
    pub team_name: String,
    pub host_venue: String,
    pub hostid: i32,
    pub gui_urls: Vec<GuiUrl>,
    pub user_total_credit: f64,
    pub user_expavg_credit: f64,
    pub host_total_credit: f64,
    pub host_expavg_credit: f64,
    pub nrpc_failures: i32,
    pub master_fetch_failures: i32,
    pub min_rpc_time: f64,
    pub download_backoff: f64,
    pub upload_backoff: f64,
    pub duration_correction_factor: f64,
    pub sched_rpc_pending: i32,
    pub master_url_fetch_pending: bool,
    pub non_cpu_intensive: bool,
    pub suspended_via_gui: bool,
    pub dont_request_more_work: bool,
    pub scheduler_rpc_in_progress: bool,
    pub attached_via_acct_mgr: bool,
    pub detach_when_done: bool,
    pub ended: bool,
    pub trickle_up_pending: bool,
    pub project_files_downloaded_time: f64,
    pub last_rpc_time: f64,
    pub no_cpu_pref: bool,
    pub no_cuda_pref: bool,
    pub no_ati_pref: bool,
}

impl Project {
    /// The project name, or the master URL while the name is still unknown.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.project_name.is_empty() {
            &self.master_url
        } else {
            &self.project_name
        }
    }
}

/// Runtime state of a task which has been started (`<active_task>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveTask {
    pub active_task_state: i32,
    pub app_version_num: i32,
    pub slot: i32,
    pub pid: i32,
    pub scheduler_state: i32,
    pub checkpoint_cpu_time: f64,
    pub current_cpu_time: f64,
    pub fraction_done: f64,
    pub elapsed_time: f64,
    pub swap_size: f64,
    pub working_set_size_smoothed: f64,
    pub progress_rate: f64,
    pub too_large: bool,
    pub needs_shmem: bool,
    pub edf_scheduled: bool,
    pub graphics_exec_path: String,
    pub slot_path: String,
}

/// A task (`<result>`): one instance of a workunit assigned to this host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    pub name: String,
    pub wu_name: String,
    pub project_url: String,
    pub version_num: i32,
    pub plan_class: String,
    pub platform: String,
    pub ready_to_report: bool,
    pub got_server_ack: bool,
    pub final_cpu_time: f64,
    pub final_elapsed_time: f64,
    pub state: i32,
    pub exit_status: i32,
    pub signal: i32,
    pub stderr_out: String,
    pub suspended_via_gui: bool,
    pub project_suspended_via_gui: bool,
    pub coproc_missing: bool,
    pub gpu_mem_wait: bool,
    pub report_deadline: f64,
    pub received_time: f64,
    pub estimated_cpu_time_remaining: f64,
    pub resources: String,
    /// Present while the task has a slot on the host.
    pub active_task: Option<ActiveTask>,
}

impl Task {
    /// Fraction done of the running task, 0 if it never started.
    #[must_use]
    pub fn fraction_done(&self) -> f64 {
        self.active_task.as_ref().map_or(0.0, |t| t.fraction_done)
    }
}

/// A unit of work of a project (`<workunit>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workunit {
    pub name: String,
    pub app_name: String,
    pub version_num: i32,
    pub rsc_fpops_est: f64,
    pub rsc_fpops_bound: f64,
    pub rsc_memory_bound: f64,
    pub rsc_disk_bound: f64,
    /// Master URL of the owning project, only known inside a client state.
    pub project_url: String,
}

/// A file upload or download (`<file_transfer>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transfer {
    pub name: String,
    pub project_url: String,
    pub project_name: String,
    pub generated_locally: bool,
    pub nbytes: f64,
    pub status: i32,
    pub is_upload: bool,
    pub project_backoff: f64,
    pub num_retries: i32,
    pub first_request_time: i64,
    pub next_request_time: i64,
    pub time_so_far: f64,
    pub last_bytes_xferred: f64,
    /// True while a `<file_xfer>` is in progress.
    pub xfer_active: bool,
    pub bytes_xferred: f64,
    pub file_offset: f64,
    pub xfer_speed: f64,
    pub url: String,
}

/// Hardware and OS description of the host (`<host_info>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub timezone: i32,
    pub domain_name: String,
    pub ip_addr: String,
    pub host_cpid: String,
    pub p_ncpus: i32,
    pub p_vendor: String,
    pub p_model: String,
    pub p_features: String,
    pub p_fpops: f64,
    pub p_iops: f64,
    pub p_membw: f64,
    pub p_calculated: f64,
    pub product_name: String,
    pub m_nbytes: f64,
    pub m_cache: f64,
    pub m_swap: f64,
    pub d_total: f64,
    pub d_free: f64,
    pub os_name: String,
    pub os_version: String,
    pub virtualbox_version: String,
}

/// Hours of a day in which an activity is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeSpan {
    pub start_hour: f64,
    pub end_hour: f64,
}

/// Allowed hours for every day with optional per-weekday overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimePreferences {
    pub start_hour: f64,
    pub end_hour: f64,
    /// Index 0 is Sunday.
    pub week_prefs: [Option<TimeSpan>; 7],
}

/// Computing preferences (`<global_preferences>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalPreferences {
    pub run_on_batteries: bool,
    pub battery_charge_min_pct: f64,
    pub battery_max_temperature: f64,
    pub run_gpu_if_user_active: bool,
    pub run_if_user_active: bool,
    pub idle_time_to_run: f64,
    pub suspend_cpu_usage: f64,
    pub leave_apps_in_memory: bool,
    pub dont_verify_images: bool,
    pub work_buf_min_days: f64,
    pub work_buf_additional_days: f64,
    pub max_ncpus_pct: f64,
    pub cpu_scheduling_period_minutes: f64,
    pub disk_interval: f64,
    pub disk_max_used_gb: f64,
    pub disk_max_used_pct: f64,
    pub disk_min_free_gb: f64,
    pub vm_max_used_frac: f64,
    pub ram_max_used_busy_frac: f64,
    pub ram_max_used_idle_frac: f64,
    pub max_bytes_sec_up: f64,
    pub max_bytes_sec_down: f64,
    pub cpu_usage_limit: f64,
    pub daily_xfer_limit_mb: f64,
    pub daily_xfer_period_days: i32,
    pub network_wifi_only: bool,
    pub cpu_times: TimePreferences,
    pub net_times: TimePreferences,
}

/// Version of the core client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    pub major: i32,
    pub minor: i32,
    pub release: i32,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}

/// Account manager the client is attached to (`<acct_mgr_info>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcctMgrInfo {
    pub acct_mgr_name: String,
    pub acct_mgr_url: String,
    pub have_credentials: bool,
    pub cookie_required: bool,
    pub cookie_failure_url: String,
}

impl AcctMgrInfo {
    /// Returns true if an account manager is configured.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.acct_mgr_url.is_empty()
    }
}

/// Outcome of an account manager RPC (`<acct_mgr_rpc_reply>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcctMgrRpcReply {
    pub error_num: i32,
    pub messages: Vec<String>,
}

/// A platform a project has applications for (`<platform>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformInfo {
    pub name: String,
    pub friendly_name: String,
    pub plan_class: String,
}

/// Configuration a project publishes for attaching (`<project_config>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub error_num: i32,
    pub name: String,
    pub master_url: String,
    pub web_rpc_url_base: String,
    pub local_revision: String,
    pub min_passwd_length: i32,
    pub account_manager: bool,
    pub uses_username: bool,
    pub account_creation_disabled: bool,
    pub client_account_creation_disabled: bool,
    pub terms_of_use: String,
    pub min_client_version: i32,
    pub rpc_prefix: String,
    pub platforms: Vec<PlatformInfo>,
}

impl ProjectConfig {
    /// URL the web RPCs go to: `web_rpc_url_base` if set, the master URL
    /// otherwise.
    #[must_use]
    pub fn secure_url_if_available(&self) -> &str {
        if self.web_rpc_url_base.is_empty() {
            &self.master_url
        } else {
            &self.web_rpc_url_base
        }
    }
}

/// A project from the list of all known projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub url: String,
    pub general_area: String,
    pub specific_area: String,
    pub description: String,
    pub home: String,
    pub platforms: Vec<String>,
    pub image: String,
    pub summary: String,
}

/// An account manager from the list of all known projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountManager {
    pub name: String,
    pub url: String,
    pub description: String,
    pub image: String,
}

/// Outcome of a project attach (`<project_attach_reply>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectAttachReply {
    pub error_num: i32,
    pub messages: Vec<String>,
}

/// Outcome of an account lookup or creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountOut {
    pub error_num: i32,
    pub error_msg: String,
    pub authenticator: String,
}

/// Client status (`<cc_status>`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CcStatus {
    pub network_status: i32,
    pub ams_password_error: bool,
    pub manager_must_quit: bool,
    pub task_suspend_reason: i32,
    pub task_mode: i32,
    pub task_mode_perm: i32,
    pub task_mode_delay: f64,
    pub gpu_suspend_reason: i32,
    pub gpu_mode: i32,
    pub gpu_mode_perm: i32,
    pub gpu_mode_delay: f64,
    pub network_suspend_reason: i32,
    pub network_mode: i32,
    pub network_mode_perm: i32,
    pub network_mode_delay: f64,
    pub disallow_attach: bool,
    pub simple_gui_only: bool,
    pub max_event_log_lines: i32,
}

/// Reply to a request which only succeeds or fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleReply {
    pub success: bool,
    pub error_message: String,
}

/// A complete snapshot of the client (`<client_state>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CcState {
    pub version_info: VersionInfo,
    pub host_info: HostInfo,
    pub platform_name: String,
    pub have_ati: bool,
    pub have_cuda: bool,
    pub projects: Vec<Project>,
    pub apps: Vec<App>,
    pub app_versions: Vec<AppVersion>,
    pub workunits: Vec<Workunit>,
    pub results: Vec<Task>,
}

impl CcState {
    /// The project with the given master URL.
    #[must_use]
    pub fn project(&self, master_url: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.master_url == master_url)
    }

    /// The first application with the given name.
    #[must_use]
    pub fn app(&self, name: &str) -> Option<&App> {
        self.apps.iter().find(|a| a.name == name)
    }

    /// The workunit with the given name.
    #[must_use]
    pub fn workunit(&self, name: &str) -> Option<&Workunit> {
        self.workunits.iter().find(|w| w.name == name)
    }

    /// The project a task belongs to.
    #[must_use]
    pub fn project_for_task(&self, task: &Task) -> Option<&Project> {
        self.project(&task.project_url)
    }

    /// The application a task runs, found through its workunit.
    #[must_use]
    pub fn app_for_task(&self, task: &Task) -> Option<&App> {
        let workunit = self.workunit(&task.wu_name)?;
        self.apps
            .iter()
            .find(|a| a.name == workunit.app_name && a.project_url == task.project_url)
    }
}
