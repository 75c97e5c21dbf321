use boinc_rpc::{
    parse::{
        parse_account_managers, parse_acct_mgr_info, parse_app_versions, parse_apps,
        parse_cc_status, parse_global_preferences, parse_host_info, parse_message_count,
        parse_messages, parse_notices, parse_project_config, parse_project_infos,
        parse_projects, parse_results, parse_simple_reply, parse_transfers, parse_version_info,
        parse_workunits,
    },
    xml::MAX_DEPTH,
    Error, GuiUrl, Message, Project,
};

const GET_MESSAGES_XML: &str = include_str!("../tests/resources/get_messages.xml");
const GET_ALL_PROJECTS_LIST_XML: &str = include_str!("../tests/resources/get_all_projects_list.xml");
const GET_CC_STATUS_XML: &str = include_str!("../tests/resources/get_cc_status.xml");
const GET_STATE_XML: &str = include_str!("../tests/resources/get_state.xml");
const SUCCESS_XML: &str = include_str!("../tests/resources/success.xml");

#[test]
fn empty_input_is_an_error_for_every_parser() {
    macro_rules! assert_empty_input {
        ($($parse:ident),+ $(,)?) => {
            $(
                assert!(
                    matches!($parse(""), Err(Error::EmptyInput)),
                    "{} accepted empty input",
                    stringify!($parse)
                );
            )+
        };
    }

    assert_empty_input!(
        parse_messages,
        parse_notices,
        parse_apps,
        parse_app_versions,
        parse_projects,
        parse_results,
        parse_workunits,
        parse_transfers,
        parse_project_infos,
        parse_account_managers,
        parse_host_info,
        parse_global_preferences,
        parse_version_info,
        parse_acct_mgr_info,
        parse_project_config,
        parse_cc_status,
        parse_simple_reply,
        parse_message_count,
    );
}

#[test]
fn lists_without_records_are_empty() {
    let reply = "<boinc_gui_rpc_reply>\n</boinc_gui_rpc_reply>\n";
    assert!(parse_messages(reply).unwrap().is_empty());
    assert!(parse_notices(reply).unwrap().is_empty());
    assert!(parse_apps(reply).unwrap().is_empty());
    assert!(parse_projects(reply).unwrap().is_empty());
    assert!(parse_results(reply).unwrap().is_empty());
    assert!(parse_workunits(reply).unwrap().is_empty());
    assert!(parse_transfers(reply).unwrap().is_empty());
    assert!(parse_project_infos(reply).unwrap().is_empty());
    assert!(parse_account_managers(reply).unwrap().is_empty());
}

#[test]
fn single_records_are_required() {
    let reply = "<boinc_gui_rpc_reply>\n</boinc_gui_rpc_reply>\n";
    assert!(matches!(
        parse_host_info(reply),
        Err(Error::MissingElement("host_info"))
    ));
    assert!(matches!(
        parse_cc_status(reply),
        Err(Error::MissingElement("cc_status"))
    ));
    assert!(matches!(
        parse_version_info(reply),
        Err(Error::MissingElement("server_version"))
    ));
    assert!(matches!(
        parse_global_preferences(reply),
        Err(Error::MissingElement("global_preferences"))
    ));
    assert_eq!(-1, parse_message_count(reply).unwrap());
}

#[test]
fn malformed_documents() {
    for xml in [
        "<msgs><msg><body>Body</body></msgs>",
        "<msgs><msg>",
        "</msgs>",
        "<msgs></msgs><msgs></msgs>",
    ] {
        assert!(
            matches!(parse_messages(xml), Err(Error::Malformed { .. })),
            "{xml:?} was accepted"
        );
    }
}

#[test]
fn deeply_nested_reply_is_malformed() {
    for depth in [MAX_DEPTH, 20_000] {
        let xml = format!(
            "<host_infos>{}{}</host_infos>",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        assert!(
            matches!(
                parse_host_info(&xml),
                Err(Error::Malformed {
                    reason: "nesting too deep",
                    ..
                })
            ),
            "depth {depth} was accepted"
        );
    }
}

#[test]
fn message_literal() {
    let messages = parse_messages(
        "<msgs><msg><body>Body</body><time>10</time><seqno>1</seqno><pri>1</pri><project>Project</project></msg></msgs>",
    )
    .unwrap();
    assert_eq!(
        vec![Message {
            body: "Body".into(),
            timestamp: 10,
            seqno: 1,
            priority: 1,
            project: "Project".into(),
        }],
        messages
    );
}

#[test]
fn project_literal() {
    let projects = parse_projects(
        "<project>\n<master_url>Master URL</master_url>\n<gui_url>\n<name>Name</name>\n<description>Description</description>\n<url>URL</url>\n</gui_url>\n</project>",
    )
    .unwrap();
    assert_eq!(1, projects.len());
    assert_eq!("Master URL", projects[0].master_url);
    assert_eq!(
        vec![GuiUrl {
            name: "Name".into(),
            description: "Description".into(),
            url: "URL".into(),
        }],
        projects[0].gui_urls
    );
    assert_eq!(
        Project {
            master_url: "Master URL".into(),
            gui_urls: projects[0].gui_urls.clone(),
            ..Project::default()
        },
        projects[0]
    );
}

#[test]
fn messages_reply() {
    let messages = parse_messages(GET_MESSAGES_XML).unwrap();
    assert_eq!(4, messages.len());
    assert_eq!(
        "Starting BOINC client version 7.2.42 for arm-android-linux-gnueabi",
        messages[0].body
    );
    assert_eq!("", messages[0].project);
    assert_eq!("Einstein@Home", messages[3].project);
    assert_eq!(3, messages[3].priority);
    assert_eq!(1_370_015_160, messages[3].timestamp);
    assert_eq!("Scheduler request failed: HTTP error & timeout", messages[3].body);
    assert_eq!(
        vec![1, 2, 3, 4],
        messages.iter().map(|m| m.seqno).collect::<Vec<_>>()
    );
}

#[test]
fn all_projects_list_reply() {
    let projects = parse_project_infos(GET_ALL_PROJECTS_LIST_XML).unwrap();
    assert_eq!(
        vec!["Einstein@Home", "Rosetta@home"],
        projects.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(3, projects[0].platforms.len());
    assert_eq!("Biology", projects[1].specific_area);

    let managers = parse_account_managers(GET_ALL_PROJECTS_LIST_XML).unwrap();
    assert_eq!(2, managers.len());
    assert_eq!("https://www.gridrepublic.org/", managers[1].url);
    assert_eq!("", managers[1].description);
}

#[test]
fn cc_status_reply() {
    let status = parse_cc_status(GET_CC_STATUS_XML).unwrap();
    assert_eq!(8, status.network_suspend_reason);
    assert_eq!(3, status.network_mode);
    assert_eq!(2, status.network_mode_perm);
    assert_eq!(3600.0, status.network_mode_delay);
    assert!(!status.manager_must_quit);
}

#[test]
fn leaf_parsers_read_client_state() {
    let projects = parse_projects(GET_STATE_XML).unwrap();
    assert_eq!(2, projects.len());
    assert_eq!(2, projects[0].gui_urls.len());
    assert!(projects[0].gui_urls.iter().all(|u| !u.url.is_empty()));
    assert!(projects[1].gui_urls.is_empty());
    assert!(projects[1].suspended_via_gui);

    assert_eq!(2, parse_apps(GET_STATE_XML).unwrap().len());
    assert_eq!(2, parse_app_versions(GET_STATE_XML).unwrap().len());
    assert_eq!(2, parse_workunits(GET_STATE_XML).unwrap().len());
    assert_eq!(2, parse_results(GET_STATE_XML).unwrap().len());
    assert_eq!(4, parse_host_info(GET_STATE_XML).unwrap().p_ncpus);
}

#[test]
fn simple_reply_with_declaration() {
    assert!(parse_simple_reply(SUCCESS_XML).unwrap().success);
}

#[test]
fn unknown_tags_are_ignored() {
    let info = parse_acct_mgr_info(
        "<acct_mgr_info><acct_mgr_name>BAM!</acct_mgr_name><future_field>x</future_field></acct_mgr_info>",
    )
    .unwrap();
    assert_eq!("BAM!", info.acct_mgr_name);

    let config = parse_project_config(
        "<project_config><name>P</name><unknown><name>nested</name></unknown></project_config>",
    )
    .unwrap();
    assert_eq!("P", config.name);
}
