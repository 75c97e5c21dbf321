//! Blocking GUI RPC client.
//!
//! [`RpcClient`] writes a [`Request`] and reads the reply up to the `0x03`
//! terminator. The reply is parsed into an [`Element`] tree and handed to the
//! matching parser. It works over any `Read + Write` stream; [`RpcClient::connect()`]
//! opens a TCP connection to a core client.
//!
//! ```no_run
//! use boinc_rpc::client::{Config, RpcClient};
//!
//! let config = Config::default().with_password("secret");
//! let mut client = RpcClient::connect(&config)?;
//! for task in client.get_results(true)? {
//!     println!("{} {:.1}%", task.name, task.fraction_done() * 100.0);
//! }
//! # Ok::<(), boinc_rpc::Error>(())
//! ```

use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::{TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

use log::{debug, trace, warn};

use crate::{
    error::{Error, Result},
    parse::{self, list_from, single_from, FromElement},
    records::{
        AccountManager, AccountOut, AcctMgrInfo, AcctMgrRpcReply, CcState, CcStatus,
        GlobalPreferences, HostInfo, Message, Notice, Project, ProjectAttachReply, ProjectConfig,
        ProjectInfo, SimpleReply, Task, Transfer, VersionInfo,
    },
    request::{self, AccountIn, Request, TERMINATOR},
    xml::{parse_document, Element},
};

pub use crate::request::{ProjectOp, RunMode, TaskOp, TransferOp};

/// `error_num` of a poll reply while the operation is still running.
pub const ERR_IN_PROGRESS: i32 = -204;

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host name or address of the core client.
    pub host: String,
    /// GUI RPC port.
    pub port: u16,
    /// Password from `gui_rpc_auth.cfg`; `None` skips authorization.
    pub password: Option<String>,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Time allowed to wait for a reply.
    pub read_timeout: Duration,
    /// Time allowed to write a request.
    pub write_timeout: Duration,
    /// Pause between two polls of a long running operation.
    pub poll_interval: Duration,
    /// Maximum number of polls of a long running operation.
    pub poll_attempts: u32,
    /// Largest reply accepted, in bytes, including the terminator.
    pub max_reply_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 31416,
            password: None,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
            poll_attempts: 60,
            max_reply_size: 64 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the password used to authorize the connection.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the write timeout.
    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Sets how long operations are polled.
    #[must_use]
    pub fn with_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts;
        self
    }

    /// Sets the largest reply accepted.
    #[must_use]
    pub fn with_max_reply_size(mut self, bytes: u64) -> Self {
        self.max_reply_size = bytes;
        self
    }
}

/// A connection to a core client.
#[derive(Debug)]
pub struct RpcClient<S> {
    stream: BufReader<S>,
    poll_interval: Duration,
    poll_attempts: u32,
    max_reply_size: u64,
}

impl RpcClient<TcpStream> {
    /// Connects to the core client and authorizes if a password is set.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if no address of the host accepts the connection and
    /// [`Error::Unauthorized`] if the password is rejected.
    pub fn connect(config: &Config) -> Result<Self> {
        let mut last_err = None;
        let mut connected = None;
        for addr in (config.host.as_str(), config.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, config.connect_timeout) {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(err) => {
                    debug!("connecting to {addr} failed: {err}");
                    last_err = Some(err);
                }
            }
        }
        let stream = connected.ok_or_else(|| {
            let err = last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "host has no address")
            });
            warn!("cannot connect to {}:{}: {err}", config.host, config.port);
            err
        })?;
        stream.set_read_timeout(Some(config.read_timeout))?;
        stream.set_write_timeout(Some(config.write_timeout))?;
        stream.set_nodelay(true)?;

        let mut client = Self::with_config(stream, config);
        if let Some(password) = &config.password {
            if !client.authorize(password)? {
                warn!("core client at {}:{} rejected the password", config.host, config.port);
                return Err(Error::Unauthorized);
            }
        }
        Ok(client)
    }
}

impl<S: Read + Write> RpcClient<S> {
    /// Wraps an open stream with the default polling settings.
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &Config::default())
    }

    /// Wraps an open stream with the polling settings of `config`.
    pub fn with_config(stream: S, config: &Config) -> Self {
        Self {
            stream: BufReader::new(stream),
            poll_interval: config.poll_interval,
            poll_attempts: config.poll_attempts.max(1),
            max_reply_size: config.max_reply_size,
        }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    fn send(&mut self, request: &Request) -> io::Result<()> {
        let stream = self.stream.get_mut();
        stream.write_all(request.as_bytes())?;
        stream.flush()
    }

    fn receive(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        let read =
            Read::take(&mut self.stream, self.max_reply_size).read_until(TERMINATOR, &mut buf)?;
        if buf.pop() != Some(TERMINATOR) {
            if read as u64 >= self.max_reply_size {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "reply exceeds the maximum reply size",
                )
                .into());
            }
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before the end of the reply",
            )
            .into());
        }
        String::from_utf8(buf).map_err(|err| Error::Utf8(err.utf8_error()))
    }

    fn exchange(&mut self, request: &Request) -> Result<String> {
        self.send(request)?;
        self.receive()
    }

    /// Sends a request and parses the reply document.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the transport fails, [`Error::Unauthorized`] if the
    /// reply is `<unauthorized/>` and the document errors of
    /// [`parse_document()`].
    pub fn call(&mut self, request: &Request) -> Result<Element> {
        debug!("rpc <{}>", request.tag());
        let reply = self.exchange(request).map_err(|err| {
            warn!("rpc <{}> failed: {err}", request.tag());
            err
        })?;
        trace!("rpc <{}> reply: {reply}", request.tag());
        let root = parse_document(&reply)?;
        if root.name() == "unauthorized" || root.has_child("unauthorized") {
            return Err(Error::Unauthorized);
        }
        Ok(root)
    }

    fn single<T: FromElement>(&mut self, request: &Request) -> Result<T> {
        let root = self.call(request)?;
        single_from(&root).map_err(|err| rpc_error(&root).unwrap_or(err))
    }

    fn list<T: FromElement>(&mut self, request: &Request) -> Result<Vec<T>> {
        let root = self.call(request)?;
        match rpc_error(&root) {
            Some(err) => Err(err),
            None => Ok(list_from(&root)),
        }
    }

    fn simple(&mut self, request: &Request) -> Result<bool> {
        let reply = SimpleReply::from_reply(&self.call(request)?);
        if !reply.success {
            debug!("rpc <{}> refused: {}", request.tag(), reply.error_message);
        }
        Ok(reply.success)
    }

    /// Repeats `request` while the reply reports [`ERR_IN_PROGRESS`], at
    /// most `poll_attempts` times.
    fn poll<T>(
        &mut self,
        request: &Request,
        read: impl Fn(&Element) -> Result<T>,
        error_num: impl Fn(&T) -> i32,
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            let reply = read(&self.call(request)?)?;
            if error_num(&reply) != ERR_IN_PROGRESS || attempt >= self.poll_attempts {
                return Ok(reply);
            }
            attempt += 1;
            thread::sleep(self.poll_interval);
        }
    }

    /// Authorizes the connection with the GUI RPC password.
    ///
    /// Returns false if the core client rejects the password.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the transport fails and
    /// [`Error::MissingElement`] if the first reply has no nonce.
    pub fn authorize(&mut self, password: &str) -> Result<bool> {
        let root = self.call(&request::auth1())?;
        let nonce = root
            .find("nonce")
            .map(Element::text)
            .ok_or(Error::MissingElement("nonce"))?;
        match self.call(&request::auth2(nonce, password)) {
            Ok(root) => Ok(root.has_child("authorized") || root.name() == "authorized"),
            Err(Error::Unauthorized) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Exchanges versions and returns the version of the core client.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn exchange_versions(&mut self, manager: &VersionInfo) -> Result<VersionInfo> {
        self.single(&request::exchange_versions(manager))
    }

    /// Returns a new snapshot of the client state.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_state(&mut self) -> Result<CcState> {
        self.single(&request::get_state())
    }

    /// Returns the client status.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_cc_status(&mut self) -> Result<CcStatus> {
        self.single(&request::get_cc_status())
    }

    /// Returns the tasks, optionally only those with a slot.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_results(&mut self, active_only: bool) -> Result<Vec<Task>> {
        self.list(&request::get_results(active_only))
    }

    /// Returns the file transfers.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_file_transfers(&mut self) -> Result<Vec<Transfer>> {
        self.list(&request::get_file_transfers())
    }

    /// Returns the attached projects.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_project_status(&mut self) -> Result<Vec<Project>> {
        self.list(&request::get_project_status())
    }

    /// Returns the host description.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_host_info(&mut self) -> Result<HostInfo> {
        self.single(&request::get_host_info())
    }

    /// Returns the messages after `seqno`.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_messages(&mut self, seqno: i32, translatable: bool) -> Result<Vec<Message>> {
        self.list(&request::get_messages(seqno, translatable))
    }

    /// Returns the sequence number of the latest message, -1 if unknown.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_message_count(&mut self) -> Result<i32> {
        let root = self.call(&request::get_message_count())?;
        Ok(parse::message_count_from(&root))
    }

    /// Returns the notices after `seqno`.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_notices(&mut self, seqno: i32) -> Result<Vec<Notice>> {
        self.list(&request::get_notices(seqno))
    }

    /// Returns all known projects and account managers.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_all_projects_list(&mut self) -> Result<(Vec<ProjectInfo>, Vec<AccountManager>)> {
        let root = self.call(&request::get_all_projects_list())?;
        if let Some(err) = rpc_error(&root) {
            return Err(err);
        }
        Ok((list_from(&root), list_from(&root)))
    }

    /// Starts fetching a project configuration.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_project_config(&mut self, url: &str) -> Result<bool> {
        self.simple(&request::get_project_config(url))
    }

    /// Polls once for the project configuration.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_project_config_poll(&mut self) -> Result<ProjectConfig> {
        self.single(&request::get_project_config_poll())
    }

    /// Fetches a project configuration and polls until it is available.
    ///
    /// # Errors
    ///
    /// Transport and reply errors. A configuration which is still pending
    /// after the last poll is returned with [`ERR_IN_PROGRESS`].
    pub fn project_config(&mut self, url: &str) -> Result<ProjectConfig> {
        if !self.get_project_config(url)? {
            return Err(Error::Rpc(format!("cannot fetch the configuration of {url}")));
        }
        self.poll(
            &request::get_project_config_poll(),
            single_from,
            |config: &ProjectConfig| config.error_num,
        )
    }

    /// Starts an account lookup.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn lookup_account(&mut self, account: &AccountIn) -> Result<bool> {
        self.simple(&request::lookup_account(account))
    }

    /// Polls once for the account lookup.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn lookup_account_poll(&mut self) -> Result<AccountOut> {
        let root = self.call(&request::lookup_account_poll())?;
        Ok(parse::account_out_from(&root))
    }

    /// Looks up an account and polls until the authenticator is known.
    ///
    /// # Errors
    ///
    /// Transport and reply errors. Lookup failures are reported in
    /// [`AccountOut::error_num`].
    pub fn lookup_credentials(&mut self, account: &AccountIn) -> Result<AccountOut> {
        if !self.lookup_account(account)? {
            return Err(Error::Rpc(format!("cannot look up the account at {}", account.url)));
        }
        self.poll(
            &request::lookup_account_poll(),
            |root| Ok(parse::account_out_from(root)),
            |out: &AccountOut| out.error_num,
        )
    }

    /// Starts creating an account.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn create_account(&mut self, account: &AccountIn) -> Result<bool> {
        self.simple(&request::create_account(account))
    }

    /// Polls once for the account creation.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn create_account_poll(&mut self) -> Result<AccountOut> {
        let root = self.call(&request::create_account_poll())?;
        Ok(parse::account_out_from(&root))
    }

    /// Creates an account and polls until the authenticator is known.
    ///
    /// # Errors
    ///
    /// Transport and reply errors. Creation failures are reported in
    /// [`AccountOut::error_num`].
    pub fn create_account_and_wait(&mut self, account: &AccountIn) -> Result<AccountOut> {
        if !self.create_account(account)? {
            return Err(Error::Rpc(format!("cannot create an account at {}", account.url)));
        }
        self.poll(
            &request::create_account_poll(),
            |root| Ok(parse::account_out_from(root)),
            |out: &AccountOut| out.error_num,
        )
    }

    /// Starts attaching to a project.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn project_attach(
        &mut self,
        url: &str,
        authenticator: &str,
        project_name: &str,
    ) -> Result<bool> {
        self.simple(&request::project_attach(url, authenticator, project_name))
    }

    /// Polls once for the project attach.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn project_attach_poll(&mut self) -> Result<ProjectAttachReply> {
        self.single(&request::project_attach_poll())
    }

    /// Attaches to a project and polls until the attach finished.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn attach_project(
        &mut self,
        url: &str,
        authenticator: &str,
        project_name: &str,
    ) -> Result<ProjectAttachReply> {
        if !self.project_attach(url, authenticator, project_name)? {
            return Err(Error::Rpc(format!("cannot attach to {url}")));
        }
        self.poll(
            &request::project_attach_poll(),
            single_from,
            |reply: &ProjectAttachReply| reply.error_num,
        )
    }

    /// Returns the account manager configuration.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn acct_mgr_info(&mut self) -> Result<AcctMgrInfo> {
        self.single(&request::acct_mgr_info())
    }

    /// Starts an account manager RPC.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn acct_mgr_rpc(&mut self, url: &str, name: &str, password: &str) -> Result<bool> {
        self.simple(&request::acct_mgr_rpc(url, name, password))
    }

    /// Polls once for the account manager RPC.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn acct_mgr_rpc_poll(&mut self) -> Result<AcctMgrRpcReply> {
        self.single(&request::acct_mgr_rpc_poll())
    }

    /// Runs an account manager RPC and polls until it finished.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn attach_acct_mgr(
        &mut self,
        url: &str,
        name: &str,
        password: &str,
    ) -> Result<AcctMgrRpcReply> {
        if !self.acct_mgr_rpc(url, name, password)? {
            return Err(Error::Rpc(format!("cannot contact the account manager at {url}")));
        }
        self.poll(
            &request::acct_mgr_rpc_poll(),
            single_from,
            |reply: &AcctMgrRpcReply| reply.error_num,
        )
    }

    /// Starts synchronizing with the configured account manager.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn acct_mgr_rpc_with_config(&mut self) -> Result<bool> {
        self.simple(&request::acct_mgr_rpc_with_config())
    }

    /// Synchronizes with the configured account manager and polls until it
    /// finished.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn sync_acct_mgr(&mut self) -> Result<AcctMgrRpcReply> {
        if !self.acct_mgr_rpc_with_config()? {
            return Err(Error::Rpc(String::from(
                "cannot contact the configured account manager",
            )));
        }
        self.poll(
            &request::acct_mgr_rpc_poll(),
            single_from,
            |reply: &AcctMgrRpcReply| reply.error_num,
        )
    }

    /// Applies an operation to a project.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn project_op(&mut self, op: ProjectOp, url: &str) -> Result<bool> {
        self.simple(&request::project_op(op, url))
    }

    /// Applies an operation to a task.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn task_op(&mut self, op: TaskOp, url: &str, name: &str) -> Result<bool> {
        self.simple(&request::task_op(op, url, name))
    }

    /// Applies an operation to a file transfer.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn transfer_op(&mut self, op: TransferOp, url: &str, filename: &str) -> Result<bool> {
        self.simple(&request::transfer_op(op, url, filename))
    }

    /// Sets the computing mode for `duration` seconds, 0 for permanently.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn set_run_mode(&mut self, mode: RunMode, duration: f64) -> Result<bool> {
        self.simple(&request::set_run_mode(mode, duration))
    }

    /// Sets the GPU mode for `duration` seconds, 0 for permanently.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn set_gpu_mode(&mut self, mode: RunMode, duration: f64) -> Result<bool> {
        self.simple(&request::set_gpu_mode(mode, duration))
    }

    /// Sets the network mode for `duration` seconds, 0 for permanently.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn set_network_mode(&mut self, mode: RunMode, duration: f64) -> Result<bool> {
        self.simple(&request::set_network_mode(mode, duration))
    }

    /// Runs the CPU benchmarks.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn run_benchmarks(&mut self) -> Result<bool> {
        self.simple(&request::run_benchmarks())
    }

    /// Writes the override preferences. Apply them with
    /// [`read_global_prefs_override()`](Self::read_global_prefs_override).
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn set_global_prefs_override(&mut self, prefs: &GlobalPreferences) -> Result<bool> {
        self.simple(&request::set_global_prefs_override(prefs))
    }

    /// Makes the client apply its override preferences.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn read_global_prefs_override(&mut self) -> Result<bool> {
        self.simple(&request::read_global_prefs_override())
    }

    /// Returns the preferences in effect.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_global_prefs_working(&mut self) -> Result<GlobalPreferences> {
        self.single(&request::get_global_prefs_working())
    }

    /// Returns the override preferences.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn get_global_prefs_override(&mut self) -> Result<GlobalPreferences> {
        self.single(&request::get_global_prefs_override())
    }

    /// Tells the client that the network is available.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn network_available(&mut self) -> Result<bool> {
        self.simple(&request::network_available())
    }

    /// Asks the client to exit.
    ///
    /// # Errors
    ///
    /// Transport and reply errors.
    pub fn quit(&mut self) -> Result<bool> {
        self.simple(&request::quit())
    }
}

/// The `<error>` message of a reply, if any.
fn rpc_error(root: &Element) -> Option<Error> {
    root.child_text("error")
        .map(|message| Error::Rpc(message.to_owned()))
}
