//! Request bodies for the GUI RPC protocol.
//!
//! Every request is a `<boinc_gui_rpc_request>` document followed by the
//! `0x03` byte which ends a message on the wire. Text values are escaped, so
//! user input such as a team name cannot change the document structure.
//!
//! ```
//! use boinc_rpc::request;
//!
//! let request = request::get_messages(12, false);
//! assert_eq!("get_messages", request.tag());
//! assert_eq!(
//!     "<boinc_gui_rpc_request>\n<get_messages>\n<seqno>12</seqno>\n</get_messages>\n</boinc_gui_rpc_request>\n\u{3}",
//!     request.as_str()
//! );
//! ```

use core::fmt;

use md5::{Digest, Md5};

use crate::{
    records::{GlobalPreferences, TimePreferences, VersionInfo},
    xml::escape::escape,
};

/// Ends every request and reply on the wire.
pub const TERMINATOR: u8 = 0x03;

/// A complete request document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    tag: &'static str,
    body: String,
}

impl Request {
    /// The tag of the operation, for example `get_state`.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The request document including the terminator.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// The bytes to write to the connection.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// Writes one request document.
#[derive(Debug)]
struct Writer {
    tag: &'static str,
    buf: String,
}

impl Writer {
    fn new(tag: &'static str) -> Self {
        let mut buf = String::with_capacity(128);
        buf.push_str("<boinc_gui_rpc_request>\n");
        Self { tag, buf }
    }

    fn open(mut self, tag: &str) -> Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self
    }

    fn close(mut self, tag: &str) -> Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self
    }

    fn empty(mut self, tag: &str) -> Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push_str("/>\n");
        self
    }

    fn empty_if(self, tag: &str, condition: bool) -> Self {
        if condition {
            self.empty(tag)
        } else {
            self
        }
    }

    fn raw(mut self, tag: &str, value: &str) -> Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
        self.buf.push_str(value);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
        self
    }

    fn text(self, tag: &str, value: &str) -> Self {
        let value = escape(value);
        self.raw(tag, &value)
    }

    fn int(self, tag: &str, value: impl fmt::Display) -> Self {
        self.raw(tag, &value.to_string())
    }

    fn double(self, tag: &str, value: f64) -> Self {
        self.raw(tag, &format!("{value:.6}"))
    }

    fn bool(self, tag: &str, value: bool) -> Self {
        self.raw(tag, if value { "1" } else { "0" })
    }

    fn finish(mut self) -> Request {
        self.buf.push_str("</boinc_gui_rpc_request>\n");
        self.buf.push(char::from(TERMINATOR));
        Request {
            tag: self.tag,
            body: self.buf,
        }
    }
}

/// A request without arguments, `<tag/>`.
fn bare(tag: &'static str) -> Request {
    Writer::new(tag).empty(tag).finish()
}

/// Lowercase hex MD5 of the concatenated parts.
#[must_use]
pub fn md5_hex(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Credentials for looking up or creating an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountIn {
    /// Master URL of the project.
    pub url: String,
    /// Email address of the account.
    pub email_addr: String,
    /// User name, used to log in when the project uses user names.
    pub user_name: String,
    /// Log in with [`user_name`](Self::user_name) instead of the email address.
    pub uses_name: bool,
    /// Team to join when the account is created.
    pub team_name: String,
    /// Plain text password; only its hash is sent.
    pub passwd: String,
}

impl AccountIn {
    /// The login identifier: the user name or the email address.
    #[must_use]
    pub fn login(&self) -> &str {
        if self.uses_name {
            &self.user_name
        } else {
            &self.email_addr
        }
    }

    /// `md5(password + lowercase(login))` as the projects expect it.
    #[must_use]
    pub fn passwd_hash(&self) -> String {
        md5_hex(&[&self.passwd, &self.login().to_lowercase()])
    }
}

/// Suspension mode for computing, GPU use and network access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Run regardless of preferences.
    Always,
    /// Run according to preferences.
    Auto,
    /// Suspend.
    Never,
    /// Go back to the previous permanent mode.
    Restore,
}

impl RunMode {
    /// The mode number used in `<cc_status>`.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            RunMode::Always => 1,
            RunMode::Auto => 2,
            RunMode::Never => 3,
            RunMode::Restore => 4,
        }
    }

    /// The mode for a number from `<cc_status>`.
    #[must_use]
    pub const fn from_number(number: i32) -> Option<Self> {
        match number {
            1 => Some(RunMode::Always),
            2 => Some(RunMode::Auto),
            3 => Some(RunMode::Never),
            4 => Some(RunMode::Restore),
            _ => None,
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            RunMode::Always => "always",
            RunMode::Auto => "auto",
            RunMode::Never => "never",
            RunMode::Restore => "restore",
        }
    }
}

/// Operations on an attached project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectOp {
    /// Contact the project scheduler now.
    Update,
    /// Stop computing for the project.
    Suspend,
    /// Continue computing for the project.
    Resume,
    /// Do not fetch new work.
    NoMoreWork,
    /// Fetch new work again.
    AllowMoreWork,
    /// Detach from the project.
    Detach,
    /// Discard all work and files of the project.
    Reset,
    /// Detach once the current work is done.
    DetachWhenDone,
    /// Cancel [`ProjectOp::DetachWhenDone`].
    DontDetachWhenDone,
}

impl ProjectOp {
    const fn tag(self) -> &'static str {
        match self {
            ProjectOp::Update => "project_update",
            ProjectOp::Suspend => "project_suspend",
            ProjectOp::Resume => "project_resume",
            ProjectOp::NoMoreWork => "project_nomorework",
            ProjectOp::AllowMoreWork => "project_allowmorework",
            ProjectOp::Detach => "project_detach",
            ProjectOp::Reset => "project_reset",
            ProjectOp::DetachWhenDone => "project_detach_when_done",
            ProjectOp::DontDetachWhenDone => "project_dont_detach_when_done",
        }
    }
}

/// Operations on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOp {
    /// Suspend the task.
    Suspend,
    /// Resume the task.
    Resume,
    /// Abort the task.
    Abort,
}

impl TaskOp {
    const fn tag(self) -> &'static str {
        match self {
            TaskOp::Suspend => "suspend_result",
            TaskOp::Resume => "resume_result",
            TaskOp::Abort => "abort_result",
        }
    }
}

/// Operations on a file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferOp {
    /// Retry the transfer now.
    Retry,
    /// Abort the transfer.
    Abort,
}

impl TransferOp {
    const fn tag(self) -> &'static str {
        match self {
            TransferOp::Retry => "retry_file_transfer",
            TransferOp::Abort => "abort_file_transfer",
        }
    }
}

/// First step of authorization; the reply carries a nonce.
#[must_use]
pub fn auth1() -> Request {
    bare("auth1")
}

/// Second step of authorization with the hash of nonce and password.
#[must_use]
pub fn auth2(nonce: &str, password: &str) -> Request {
    Writer::new("auth2")
        .open("auth2")
        .raw("nonce_hash", &md5_hex(&[nonce, password]))
        .close("auth2")
        .finish()
}

/// Announces the manager version; the reply carries the client version.
#[must_use]
pub fn exchange_versions(version: &VersionInfo) -> Request {
    Writer::new("exchange_versions")
        .open("exchange_versions")
        .int("major", version.major)
        .int("minor", version.minor)
        .int("release", version.release)
        .close("exchange_versions")
        .finish()
}

/// Requests the complete client state.
#[must_use]
pub fn get_state() -> Request {
    bare("get_state")
}

/// Requests the client status.
#[must_use]
pub fn get_cc_status() -> Request {
    bare("get_cc_status")
}

/// Requests the tasks, optionally only those with a slot.
#[must_use]
pub fn get_results(active_only: bool) -> Request {
    Writer::new("get_results")
        .open("get_results")
        .bool("active_only", active_only)
        .close("get_results")
        .finish()
}

/// Requests the file transfers.
#[must_use]
pub fn get_file_transfers() -> Request {
    bare("get_file_transfers")
}

/// Requests the attached projects.
#[must_use]
pub fn get_project_status() -> Request {
    bare("get_project_status")
}

/// Requests the host description.
#[must_use]
pub fn get_host_info() -> Request {
    bare("get_host_info")
}

/// Requests the messages after `seqno`.
#[must_use]
pub fn get_messages(seqno: i32, translatable: bool) -> Request {
    Writer::new("get_messages")
        .open("get_messages")
        .int("seqno", seqno)
        .empty_if("translatable", translatable)
        .close("get_messages")
        .finish()
}

/// Requests the sequence number of the latest message.
#[must_use]
pub fn get_message_count() -> Request {
    bare("get_message_count")
}

/// Requests the notices after `seqno`.
#[must_use]
pub fn get_notices(seqno: i32) -> Request {
    Writer::new("get_notices")
        .open("get_notices")
        .int("seqno", seqno)
        .close("get_notices")
        .finish()
}

/// Requests the list of all known projects and account managers.
#[must_use]
pub fn get_all_projects_list() -> Request {
    bare("get_all_projects_list")
}

/// Starts fetching the configuration of the project at `url`.
#[must_use]
pub fn get_project_config(url: &str) -> Request {
    Writer::new("get_project_config")
        .open("get_project_config")
        .text("url", url)
        .close("get_project_config")
        .finish()
}

/// Polls for the result of [`get_project_config()`].
#[must_use]
pub fn get_project_config_poll() -> Request {
    bare("get_project_config_poll")
}

/// Starts looking up the authenticator of an account.
#[must_use]
pub fn lookup_account(account: &AccountIn) -> Request {
    Writer::new("lookup_account")
        .open("lookup_account")
        .text("url", &account.url)
        .text("email_addr", account.login())
        .raw("passwd_hash", &account.passwd_hash())
        .raw("ldap_auth", "0")
        .close("lookup_account")
        .finish()
}

/// Polls for the result of [`lookup_account()`].
#[must_use]
pub fn lookup_account_poll() -> Request {
    bare("lookup_account_poll")
}

/// Starts creating an account.
#[must_use]
pub fn create_account(account: &AccountIn) -> Request {
    Writer::new("create_account")
        .open("create_account")
        .text("url", &account.url)
        .text("email_addr", &account.email_addr)
        .raw("passwd_hash", &account.passwd_hash())
        .text("user_name", &account.user_name)
        .text("team_name", &account.team_name)
        .close("create_account")
        .finish()
}

/// Polls for the result of [`create_account()`].
#[must_use]
pub fn create_account_poll() -> Request {
    bare("create_account_poll")
}

/// Starts attaching to a project with an authenticator.
#[must_use]
pub fn project_attach(url: &str, authenticator: &str, project_name: &str) -> Request {
    Writer::new("project_attach")
        .open("project_attach")
        .text("project_url", url)
        .text("authenticator", authenticator)
        .text("project_name", project_name)
        .close("project_attach")
        .finish()
}

/// Polls for the result of [`project_attach()`].
#[must_use]
pub fn project_attach_poll() -> Request {
    bare("project_attach_poll")
}

/// Requests the account manager configuration.
#[must_use]
pub fn acct_mgr_info() -> Request {
    bare("acct_mgr_info")
}

/// Starts attaching to, or synchronizing with, an account manager.
///
/// An empty `url` detaches from the current account manager.
#[must_use]
pub fn acct_mgr_rpc(url: &str, name: &str, password: &str) -> Request {
    Writer::new("acct_mgr_rpc")
        .open("acct_mgr_rpc")
        .text("url", url)
        .text("name", name)
        .raw("password_hash", &md5_hex(&[password, &name.to_lowercase()]))
        .close("acct_mgr_rpc")
        .finish()
}

/// Synchronizes with the configured account manager.
#[must_use]
pub fn acct_mgr_rpc_with_config() -> Request {
    Writer::new("acct_mgr_rpc")
        .open("acct_mgr_rpc")
        .empty("use_config_file")
        .close("acct_mgr_rpc")
        .finish()
}

/// Polls for the result of [`acct_mgr_rpc()`].
#[must_use]
pub fn acct_mgr_rpc_poll() -> Request {
    bare("acct_mgr_rpc_poll")
}

/// Applies `op` to the project at `url`.
#[must_use]
pub fn project_op(op: ProjectOp, url: &str) -> Request {
    let tag = op.tag();
    Writer::new(tag)
        .open(tag)
        .text("project_url", url)
        .close(tag)
        .finish()
}

/// Applies `op` to the task `name` of the project at `url`.
#[must_use]
pub fn task_op(op: TaskOp, url: &str, name: &str) -> Request {
    let tag = op.tag();
    Writer::new(tag)
        .open(tag)
        .text("project_url", url)
        .text("name", name)
        .close(tag)
        .finish()
}

/// Applies `op` to the transfer of `filename` of the project at `url`.
#[must_use]
pub fn transfer_op(op: TransferOp, url: &str, filename: &str) -> Request {
    let tag = op.tag();
    Writer::new(tag)
        .open(tag)
        .text("project_url", url)
        .text("filename", filename)
        .close(tag)
        .finish()
}

fn mode(tag: &'static str, mode: RunMode, duration: f64) -> Request {
    Writer::new(tag)
        .open(tag)
        .empty(mode.tag())
        .double("duration", duration)
        .close(tag)
        .finish()
}

/// Sets the computing mode for `duration` seconds, 0 for permanently.
#[must_use]
pub fn set_run_mode(run_mode: RunMode, duration: f64) -> Request {
    mode("set_run_mode", run_mode, duration)
}

/// Sets the GPU mode for `duration` seconds, 0 for permanently.
#[must_use]
pub fn set_gpu_mode(gpu_mode: RunMode, duration: f64) -> Request {
    mode("set_gpu_mode", gpu_mode, duration)
}

/// Sets the network mode for `duration` seconds, 0 for permanently.
#[must_use]
pub fn set_network_mode(network_mode: RunMode, duration: f64) -> Request {
    mode("set_network_mode", network_mode, duration)
}

/// Runs the CPU benchmarks.
#[must_use]
pub fn run_benchmarks() -> Request {
    bare("run_benchmarks")
}

fn day_prefs(mut writer: Writer, cpu: &TimePreferences, net: &TimePreferences) -> Writer {
    for (day, (cpu_day, net_day)) in cpu.week_prefs.iter().zip(&net.week_prefs).enumerate() {
        if cpu_day.is_none() && net_day.is_none() {
            continue;
        }
        writer = writer.open("day_prefs").int("day_of_week", day);
        if let Some(span) = cpu_day {
            writer = writer
                .double("start_hour", span.start_hour)
                .double("end_hour", span.end_hour);
        }
        if let Some(span) = net_day {
            writer = writer
                .double("net_start_hour", span.start_hour)
                .double("net_end_hour", span.end_hour);
        }
        writer = writer.close("day_prefs");
    }
    writer
}

/// Writes `prefs` as the override file of the client.
///
/// The client only applies it after [`read_global_prefs_override()`].
#[must_use]
pub fn set_global_prefs_override(prefs: &GlobalPreferences) -> Request {
    let writer = Writer::new("set_global_prefs_override")
        .open("set_global_prefs_override")
        .open("global_preferences")
        .bool("run_on_batteries", prefs.run_on_batteries)
        .double("battery_charge_min_pct", prefs.battery_charge_min_pct)
        .double("battery_max_temperature", prefs.battery_max_temperature)
        .bool("run_gpu_if_user_active", prefs.run_gpu_if_user_active)
        .bool("run_if_user_active", prefs.run_if_user_active)
        .double("idle_time_to_run", prefs.idle_time_to_run)
        .double("suspend_cpu_usage", prefs.suspend_cpu_usage)
        .bool("leave_apps_in_memory", prefs.leave_apps_in_memory)
        .bool("dont_verify_images", prefs.dont_verify_images)
        .double("work_buf_min_days", prefs.work_buf_min_days)
        .double("work_buf_additional_days", prefs.work_buf_additional_days)
        .double("max_ncpus_pct", prefs.max_ncpus_pct)
        .double(
            "cpu_scheduling_period_minutes",
            prefs.cpu_scheduling_period_minutes,
        )
        .double("disk_interval", prefs.disk_interval)
        .double("disk_max_used_gb", prefs.disk_max_used_gb)
        .double("disk_max_used_pct", prefs.disk_max_used_pct)
        .double("disk_min_free_gb", prefs.disk_min_free_gb)
        .double("vm_max_used_pct", prefs.vm_max_used_frac * 100.0)
        .double("ram_max_used_busy_pct", prefs.ram_max_used_busy_frac * 100.0)
        .double("ram_max_used_idle_pct", prefs.ram_max_used_idle_frac * 100.0)
        .double("max_bytes_sec_up", prefs.max_bytes_sec_up)
        .double("max_bytes_sec_down", prefs.max_bytes_sec_down)
        .double("cpu_usage_limit", prefs.cpu_usage_limit)
        .double("daily_xfer_limit_mb", prefs.daily_xfer_limit_mb)
        .int("daily_xfer_period_days", prefs.daily_xfer_period_days)
        .bool("network_wifi_only", prefs.network_wifi_only)
        .double("start_hour", prefs.cpu_times.start_hour)
        .double("end_hour", prefs.cpu_times.end_hour)
        .double("net_start_hour", prefs.net_times.start_hour)
        .double("net_end_hour", prefs.net_times.end_hour);
    day_prefs(writer, &prefs.cpu_times, &prefs.net_times)
        .close("global_preferences")
        .close("set_global_prefs_override")
        .finish()
}

/// Makes the client apply its override file.
#[must_use]
pub fn read_global_prefs_override() -> Request {
    bare("read_global_prefs_override")
}

/// Requests the preferences in effect.
#[must_use]
pub fn get_global_prefs_working() -> Request {
    bare("get_global_prefs_working")
}

/// Requests the contents of the override file.
#[must_use]
pub fn get_global_prefs_override() -> Request {
    bare("get_global_prefs_override")
}

/// Tells the client that the network is available.
#[must_use]
pub fn network_available() -> Request {
    bare("network_available")
}

/// Asks the client to exit.
#[must_use]
pub fn quit() -> Request {
    bare("quit")
}
