use mockito::Matcher;
use pretty_assertions::assert_eq;
use test_context::{test_context, AsyncTestContext};

use crate::config::Config;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    name: String,
    args: Vec<String>,
    logged_in: bool,
    want_out: Vec<String>,
    not_want_out: Vec<String>,
    want_err: String,
    want_code: i32,
}

const NOT_AUTHORIZED: &str =
    r#"{"code": 10003, "description": "You are not authorized to perform the requested action", "error_code": "CF-NotAuthorized"}"#;
const USER_NOT_FOUND: &str =
    r#"{"code": 20003, "description": "The user could not be found: ghost", "error_code": "CF-UserNotFound"}"#;

struct MainContext {
    server: mockito::ServerGuard,
    _mocks: Vec<mockito::Mock>,
    no_network: mockito::Mock,
}

fn username(name: &str) -> Matcher {
    Matcher::Json(serde_json::json!({ "username": name }))
}

fn orgs_body(guid: Option<&str>) -> String {
    match guid {
        Some(guid) => serde_json::json!({
            "total_results": 1,
            "resources": [{ "metadata": { "guid": guid }, "entity": { "name": "org" } }],
        }),
        None => serde_json::json!({ "total_results": 0, "resources": [] }),
    }
    .to_string()
}

#[async_trait::async_trait]
impl AsyncTestContext for MainContext {
    async fn setup() -> Self {
        let mut server = mockito::Server::new_async().await;
        let mut mocks = Vec::new();

        for (org, guid) in [("acme", Some("acme-guid")), ("vault", Some("vault-guid")), ("no-such-org", None)] {
            mocks.push(
                server
                    .mock("GET", "/v2/organizations")
                    .match_query(Matcher::UrlEncoded("q".into(), format!("name:{}", org)))
                    .with_status(200)
                    .with_header("content-type", "application/json")
                    .with_body(orgs_body(guid))
                    .create_async()
                    .await,
            );
        }

        for path in ["managers", "billing_managers", "auditors", "users"] {
            mocks.push(
                server
                    .mock("PUT", format!("/v2/organizations/acme-guid/{}", path).as_str())
                    .match_body(username("alice"))
                    .with_status(201)
                    .with_header("content-type", "application/json")
                    .with_body("{}")
                    .create_async()
                    .await,
            );
        }

        mocks.push(
            server
                .mock("PUT", "/v2/organizations/acme-guid/auditors")
                .match_body(username("ghost"))
                .with_status(404)
                .with_header("content-type", "application/json")
                .with_body(USER_NOT_FOUND)
                .create_async()
                .await,
        );

        mocks.push(
            server
                .mock("PUT", "/v2/organizations/vault-guid/auditors")
                .with_status(403)
                .with_header("content-type", "application/json")
                .with_body(NOT_AUTHORIZED)
                .create_async()
                .await,
        );

        // Requests for these orgs must never reach the server.
        let no_network = server
            .mock("GET", "/v2/organizations")
            .match_query(Matcher::Regex("offline".to_string()))
            .expect(0)
            .create_async()
            .await;

        Self {
            server,
            _mocks: mocks,
            no_network,
        }
    }

    async fn teardown(self) {
        self.no_network.assert_async().await;
    }
}

fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

fn lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

const HELP: &[&str] = &[
    "NAME:",
    "   set-org-role - Assign an org role to a user",
    "USAGE:",
    "   cf set-org-role USERNAME ORG ROLE",
    "ROLES:",
    "   'OrgManager' - Invite and manage users, select and change plans, and set spending limits",
    "   'BillingManager' - Create and manage the billing account and payment info",
    "   'OrgAuditor' - Read-only access to org info and reports",
    "SEE ALSO:",
    "   org-users, set-space-role",
];

#[test_context(MainContext)]
#[tokio::test]
#[serial_test::serial]
async fn test_main(ctx: &mut MainContext) {
    let tests: Vec<TestItem> = vec![
        TestItem {
            name: "help".to_string(),
            args: args(&["cf", "set-org-role", "-h"]),
            want_out: lines(HELP),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "help wins over bad arguments".to_string(),
            args: args(&["cf", "set-org-role", "some-user", "offline", "NotARealRole", "extra", "--help"]),
            want_out: lines(HELP),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "help command".to_string(),
            args: args(&["cf", "help", "set-org-role"]),
            want_out: lines(HELP),
            not_want_out: lines(&["cf-set-org-role", "ROLE is one of"]),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "help command for an unknown command".to_string(),
            args: args(&["cf", "help", "offline"]),
            want_out: lines(&["FAILED", "'offline' is not a registered command. See 'cf help'"]),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "not enough arguments".to_string(),
            args: args(&["cf", "set-org-role", "foo", "bar"]),
            logged_in: true,
            want_out: lines(HELP),
            want_err: "Incorrect Usage: the required argument `ROLE` was not provided".to_string(),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "no arguments".to_string(),
            args: args(&["cf", "set-org-role"]),
            logged_in: true,
            want_out: lines(HELP),
            want_err: "Incorrect Usage: the required argument `USERNAME` was not provided".to_string(),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "too many arguments".to_string(),
            args: args(&["cf", "set-org-role", "some-user", "offline", "OrgManager", "some-extra-argument"]),
            logged_in: true,
            want_out: lines(&[&["Incorrect Usage. Requires USERNAME, ORG, ROLE as arguments"][..], HELP].concat()),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "invalid role".to_string(),
            args: args(&["cf", "set-org-role", "alice", "offline", "NotARealRole"]),
            logged_in: true,
            want_out: lines(HELP),
            not_want_out: lines(&["Assigning role", "FAILED"]),
            want_err: r#"Incorrect Usage: ROLE must be "OrgManager", "BillingManager" and "OrgAuditor""#.to_string(),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "not logged in".to_string(),
            args: args(&["cf", "set-org-role", "some-user", "offline", "BillingManager"]),
            logged_in: false,
            want_out: lines(&["FAILED", "Not logged in. Use 'cf login' to log in."]),
            not_want_out: lines(&["Assigning role"]),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "assign org role".to_string(),
            args: args(&["cf", "set-org-role", "alice", "acme", "OrgAuditor"]),
            logged_in: true,
            want_out: lines(&["Assigning role OrgAuditor to user alice in org acme as admin...", "OK"]),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "assign another org role".to_string(),
            args: args(&["cf", "set-org-role", "alice", "acme", "OrgManager"]),
            logged_in: true,
            want_out: lines(&["Assigning role OrgManager to user alice in org acme as admin...", "OK"]),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "assign the same org role again".to_string(),
            args: args(&["cf", "set-org-role", "alice", "acme", "OrgManager"]),
            logged_in: true,
            want_out: lines(&["Assigning role OrgManager to user alice in org acme as admin...", "OK"]),
            want_code: 0,
            ..Default::default()
        },
        TestItem {
            name: "org does not exist".to_string(),
            args: args(&["cf", "set-org-role", "alice", "no-such-org", "OrgAuditor"]),
            logged_in: true,
            want_out: lines(&["FAILED", "Organization no-such-org not found"]),
            not_want_out: lines(&["Assigning role"]),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "user does not exist".to_string(),
            args: args(&["cf", "set-org-role", "ghost", "acme", "OrgAuditor"]),
            logged_in: true,
            want_out: lines(&[
                "Assigning role OrgAuditor to user ghost in org acme as admin...",
                "FAILED",
                "Server error, status code: 404, error code: 20003, message: The user could not be found: ghost",
            ]),
            not_want_out: lines(&["OK"]),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "insufficient permissions".to_string(),
            args: args(&["cf", "set-org-role", "alice", "vault", "OrgAuditor"]),
            logged_in: true,
            want_out: lines(&[
                "Assigning role OrgAuditor to user alice in org vault as admin...",
                "FAILED",
                "Server error, status code: 403, error code: 10003, message: You are not authorized to perform the requested action",
            ]),
            want_code: 1,
            ..Default::default()
        },
        TestItem {
            name: "version".to_string(),
            args: args(&["cf", "version"]),
            want_out: lines(&[&format!("cf version {}", clap::crate_version!())]),
            want_code: 0,
            ..Default::default()
        },
    ];

    for t in tests {
        let mut config = crate::config::new_blank_config().unwrap();
        if t.logged_in {
            config.set(&ctx.server.url(), "token", "my-token").unwrap();
            config.set(&ctx.server.url(), "user", "admin").unwrap();
        }

        let (io, stdout_path, stderr_path) = crate::iostreams::IoStreams::test();
        let mut ctx = crate::context::Context {
            config: &mut config,
            io,
            debug: false,
        };

        let code = crate::do_main(t.args.clone(), &mut ctx).await.unwrap();

        let stdout = std::fs::read_to_string(stdout_path).unwrap_or_default();
        let stderr = std::fs::read_to_string(stderr_path).unwrap_or_default();

        assert_eq!(code, t.want_code, "test {} ->\nstdout: {}\nstderr: {}", t.name, stdout, stderr);

        // The expected lines have to show up in order.
        let mut rest = stdout.as_str();
        for want in &t.want_out {
            match rest.find(want.as_str()) {
                Some(i) => rest = &rest[i + want.len()..],
                None => panic!("test {} ->\nstdout: {}\nwant (in order): {}", t.name, stdout, want),
            }
        }

        for not_want in &t.not_want_out {
            assert!(
                !stdout.contains(not_want.as_str()),
                "test {} ->\nstdout: {}\nnot want: {}",
                t.name,
                stdout,
                not_want
            );
        }

        assert_eq!(stderr.is_empty(), t.want_err.is_empty(), "test {} -> stderr: {}", t.name, stderr);
        assert!(
            stderr.contains(&t.want_err),
            "test {} ->\nstderr: {}\nwant: {}",
            t.name,
            stderr,
            t.want_err
        );
    }
}

#[test_context(MainContext)]
#[tokio::test]
#[serial_test::serial]
async fn test_repeat_assignment_output_is_identical(ctx: &mut MainContext) {
    let mut outputs = Vec::new();

    for _ in 0..2 {
        let mut config = crate::config::new_blank_config().unwrap();
        config.set(&ctx.server.url(), "token", "my-token").unwrap();
        config.set(&ctx.server.url(), "user", "admin").unwrap();

        let (io, stdout_path, _) = crate::iostreams::IoStreams::test();
        let mut ctx = crate::context::Context {
            config: &mut config,
            io,
            debug: false,
        };

        let code = crate::do_main(args(&["cf", "set-org-role", "alice", "acme", "BillingManager"]), &mut ctx)
            .await
            .unwrap();

        outputs.push((code, std::fs::read_to_string(stdout_path).unwrap()));
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(
        outputs[0],
        (
            0,
            "Assigning role BillingManager to user alice in org acme as admin...\nOK\n".to_string()
        )
    );
}

#[test_context(MainContext)]
#[tokio::test]
#[serial_test::serial]
async fn test_debug_runs_back_to_back(ctx: &mut MainContext) {
    let runs = [
        args(&["cf", "-d", "set-org-role", "alice", "acme", "OrgAuditor"]),
        args(&["cf", "set-org-role", "-d", "alice", "acme", "OrgAuditor"]),
        args(&["cf", "set-org-role", "alice", "acme", "OrgAuditor"]),
    ];

    for run in runs {
        let mut config = crate::config::new_blank_config().unwrap();
        config.set(&ctx.server.url(), "token", "my-token").unwrap();
        config.set(&ctx.server.url(), "user", "admin").unwrap();

        let (io, stdout_path, stderr_path) = crate::iostreams::IoStreams::test();
        let mut ctx = crate::context::Context {
            config: &mut config,
            io,
            debug: false,
        };

        let code = crate::do_main(run.clone(), &mut ctx).await.unwrap();

        assert_eq!(code, 0, "args {:?}", run);
        assert_eq!(
            std::fs::read_to_string(stdout_path).unwrap(),
            "Assigning role OrgAuditor to user alice in org acme as admin...\nOK\n"
        );
        // Debug records go to the process stderr, never into the command's streams.
        assert_eq!(std::fs::read_to_string(stderr_path).unwrap(), "");
    }

    assert_eq!(log::max_level(), log::LevelFilter::Off);
}
