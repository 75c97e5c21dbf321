#![cfg(feature = "client")]

use std::{
    io::{self, Cursor, Read, Write},
    time::Duration,
};

use boinc_rpc::{
    client::{Config, RpcClient, RunMode, TaskOp},
    request::{self, AccountIn, TERMINATOR},
    Error,
};

const GET_STATE_XML: &str = include_str!("../tests/resources/get_state.xml");
const GET_MESSAGES_XML: &str = include_str!("../tests/resources/get_messages.xml");
const SUCCESS_XML: &str = include_str!("../tests/resources/success.xml");

/// An in-memory connection: replies are read from `input`, requests are
/// collected in `output`.
#[derive(Debug, Default)]
struct Connection {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl Connection {
    fn replying(replies: &[&str]) -> Self {
        let mut input = Vec::new();
        for reply in replies {
            input.extend_from_slice(reply.as_bytes());
            input.push(TERMINATOR);
        }
        Self {
            input: Cursor::new(input),
            output: Vec::new(),
        }
    }

    fn sent(&self) -> String {
        String::from_utf8(self.output.clone()).unwrap()
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fails every write, like a connection the core client has closed.
#[derive(Debug)]
struct BrokenPipe;

impl Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn client(replies: &[&str]) -> RpcClient<Connection> {
    let config = Config::default().with_polling(Duration::ZERO, 5);
    RpcClient::with_config(Connection::replying(replies), &config)
}

#[test]
fn session() {
    let mut client = client(&[
        "<boinc_gui_rpc_reply>\n<nonce>1370015043.654321</nonce>\n</boinc_gui_rpc_reply>\n",
        "<boinc_gui_rpc_reply>\n<authorized/>\n</boinc_gui_rpc_reply>\n",
        "<boinc_gui_rpc_reply>\n<server_version>\n<major>7</major>\n<minor>2</minor>\n<release>42</release>\n</server_version>\n</boinc_gui_rpc_reply>\n",
        GET_STATE_XML,
        GET_MESSAGES_XML,
        SUCCESS_XML,
    ]);

    assert!(client.authorize("secret").unwrap());
    let version = client
        .exchange_versions(&boinc_rpc::VersionInfo {
            major: 7,
            minor: 2,
            release: 0,
        })
        .unwrap();
    assert_eq!("7.2.42", version.to_string());

    let state = client.get_state().unwrap();
    assert_eq!(2, state.projects.len());
    assert_eq!(2, state.results.len());

    let messages = client.get_messages(0, false).unwrap();
    assert_eq!(4, messages.len());

    let running = &state.results[0];
    assert!(client
        .task_op(TaskOp::Suspend, &running.project_url, &running.name)
        .unwrap());

    let sent = client.into_inner().sent();
    let requests: Vec<_> = sent.split(char::from(TERMINATOR)).collect();
    assert_eq!(7, requests.len());
    assert_eq!("", requests[6]);
    assert_eq!(request::auth1().as_str(), format!("{}\u{3}", requests[0]));
    assert!(requests[2].contains("<release>0</release>"));
    assert!(requests[3].contains("<get_state/>"));
    assert!(requests[5].contains("<suspend_result>"));
    assert!(requests[5].contains(&format!("<name>{}</name>", running.name)));
}

#[test]
fn replies_are_read_one_at_a_time() {
    let mut client = client(&[
        "<boinc_gui_rpc_reply><seqno>4</seqno></boinc_gui_rpc_reply>",
        "<boinc_gui_rpc_reply><seqno>5</seqno></boinc_gui_rpc_reply>",
    ]);
    assert_eq!(4, client.get_message_count().unwrap());
    assert_eq!(5, client.get_message_count().unwrap());
    assert!(matches!(
        client.get_message_count(),
        Err(Error::Io(ref err)) if err.kind() == io::ErrorKind::UnexpectedEof
    ));
}

#[test]
fn transport_failure_is_an_error() {
    let mut client = RpcClient::new(BrokenPipe);
    let err = client.set_run_mode(RunMode::Never, 0.0).unwrap_err();
    assert!(matches!(err, Error::Io(ref err) if err.kind() == io::ErrorKind::BrokenPipe));
}

#[test]
fn malformed_reply() {
    let mut client = client(&["<boinc_gui_rpc_reply><cc_status></boinc_gui_rpc_reply>"]);
    assert!(matches!(
        client.get_cc_status(),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn create_account_and_attach() {
    let mut client = client(&[
        SUCCESS_XML,
        "<boinc_gui_rpc_reply><error_num>-204</error_num></boinc_gui_rpc_reply>",
        "<boinc_gui_rpc_reply><account_out><authenticator>0123abcd</authenticator></account_out></boinc_gui_rpc_reply>",
        SUCCESS_XML,
        "<boinc_gui_rpc_reply><project_attach_reply><error_num>-204</error_num></project_attach_reply></boinc_gui_rpc_reply>",
        "<boinc_gui_rpc_reply><project_attach_reply><error_num>0</error_num></project_attach_reply></boinc_gui_rpc_reply>",
    ]);
    let account = AccountIn {
        url: "http://einstein.phys.uwm.edu/".into(),
        email_addr: "volunteer@example.org".into(),
        user_name: "volunteer".into(),
        team_name: "BOINC@Android".into(),
        passwd: "secret".into(),
        ..AccountIn::default()
    };

    let out = client.create_account_and_wait(&account).unwrap();
    assert_eq!(0, out.error_num);
    assert_eq!("0123abcd", out.authenticator);

    let reply = client
        .attach_project(&account.url, &out.authenticator, "Einstein@Home")
        .unwrap();
    assert_eq!(0, reply.error_num);

    let sent = client.into_inner().sent();
    assert!(sent.contains(&format!(
        "<passwd_hash>{}</passwd_hash>",
        request::md5_hex(&["secret", "volunteer@example.org"])
    )));
    assert!(sent.contains("<team_name>BOINC@Android</team_name>"));
    assert!(sent.contains("<authenticator>0123abcd</authenticator>"));
    assert_eq!(2, sent.matches("<project_attach_poll/>").count());
}

#[test]
fn all_projects_list() {
    let mut client = client(&[include_str!("../tests/resources/get_all_projects_list.xml")]);
    let (projects, managers) = client.get_all_projects_list().unwrap();
    assert_eq!(2, projects.len());
    assert_eq!(2, managers.len());
}
