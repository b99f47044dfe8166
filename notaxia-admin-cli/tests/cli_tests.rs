use clap::Parser;
use notaxia_admin_cli::cli::{AttachmentsCommand, PageArgs, ThoughtsCommand, UsersCommand};
use notaxia_admin_cli::{Cli, Command, Console, api_config};
use notaxia_api::admin::AttachmentKind;
use notaxia_api::{ApiConfig, RecordingNavigator};
use notaxia_session::{FileSessionStore, LOGIN_ROUTE, SessionStore, SessionToken};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("notaxia-admin").chain(args.iter().copied())).unwrap()
}

struct Setup {
    console: Console,
    store: Arc<FileSessionStore>,
    navigator: Arc<RecordingNavigator>,
    _dir: TempDir,
}

fn setup(server: &MockServer, token: Option<&str>) -> Setup {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
    if let Some(token) = token {
        store.set(SessionToken::new(token).unwrap()).unwrap();
    }
    let navigator = Arc::new(RecordingNavigator::new());
    let console =
        Console::with_navigator(ApiConfig::new(server.uri()), store.clone(), navigator.clone())
            .unwrap();
    Setup {
        console,
        store,
        navigator,
        _dir: dir,
    }
}

// ── Parsing ─────────────────────────────────────────────────────

#[test]
fn parse_global_flags_after_subcommand() {
    let cli = parse(&["stats", "--api-url", "http://localhost:3000", "-v"]);
    assert_eq!(cli.api_url.as_deref(), Some("http://localhost:3000"));
    assert!(cli.verbose);
    assert_eq!(cli.command, Command::Stats);
}

#[test]
fn parse_status_alias() {
    assert_eq!(parse(&["status"]).command, Command::Whoami);
}

#[test]
fn parse_thoughts_list_defaults() {
    let cli = parse(&["thoughts", "list", "--status", "FAILED"]);
    assert_eq!(
        cli.command,
        Command::Thoughts(ThoughtsCommand::List {
            paging: PageArgs { page: 1, limit: 50 },
            status: Some("FAILED".into()),
            user_id: None,
            include_content: false,
        })
    );
}

#[test]
fn parse_grant_pro() {
    let cli = parse(&["users", "grant-pro", "u1", "--expires-at", "2026-12-31"]);
    assert_eq!(
        cli.command,
        Command::Users(UsersCommand::GrantPro {
            id: "u1".into(),
            expires_at: Some("2026-12-31".into()),
        })
    );
}

#[test]
fn parse_notify_with_repeated_users() {
    let cli = parse(&["notify", "--title", "T", "--body", "B", "--user-id", "a", "--user-id", "b"]);
    let Command::Notify { user_ids, .. } = cli.command else {
        panic!("expected notify");
    };
    assert_eq!(user_ids, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn parse_attachments_type_filter() {
    let cli = parse(&["attachments", "list", "--type", "audio"]);
    assert_eq!(
        cli.command,
        Command::Attachments(AttachmentsCommand::List {
            paging: PageArgs { page: 1, limit: 50 },
            kind: Some(AttachmentKind::Audio),
        })
    );
    assert!(Cli::try_parse_from(["notaxia-admin", "attachments", "list", "--type", "video"]).is_err());
}

#[test]
fn zero_timeout_is_rejected() {
    assert!(api_config(&parse(&["--timeout", "0", "stats"])).is_err());
    let config = api_config(&parse(&["--timeout", "5", "--api-url", "http://localhost:3000", "stats"]))
        .unwrap();
    assert_eq!(config.timeout_ms, Some(5_000));
}

#[test]
fn login_requires_email() {
    assert!(Cli::try_parse_from(["notaxia-admin", "login"]).is_err());
}

#[test]
fn commands_map_to_dashboard_routes() {
    assert_eq!(parse(&["stats"]).command.route(), "/admin");
    assert_eq!(parse(&["users", "list"]).command.route(), "/admin/users");
    assert_eq!(parse(&["users", "ban", "u1"]).command.route(), "/admin/users/u1");
    assert_eq!(parse(&["attachments", "list"]).command.route(), "/admin/thought-attachments");
    assert_eq!(parse(&["health"]).command.route(), "/admin/system");
    assert_eq!(parse(&["login", "--email", "a@b.com"]).command.route(), LOGIN_ROUTE);
}

// ── Guarded execution ───────────────────────────────────────────

#[tokio::test]
async fn protected_command_without_session_is_refused() {
    let server = MockServer::start().await;
    let mut s = setup(&server, None);

    let err = s.console.run(Command::Stats).await.unwrap_err();
    assert!(err.to_string().contains("Not signed in"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn whoami_reports_state() {
    let server = MockServer::start().await;
    let mut s = setup(&server, None);
    let out = s.console.run(Command::Whoami).await.unwrap();
    assert_eq!(out["signedIn"], false);
    assert_eq!(out["state"], "Unauthorized");

    s.store.set(SessionToken::new("tok").unwrap()).unwrap();
    let out = s.console.run(Command::Whoami).await.unwrap();
    assert_eq!(out["signedIn"], true);
}

#[tokio::test]
async fn login_with_code_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/auth/verify-otp"))
        .and(body_json(json!({ "email": "a@b.com", "code": "123456" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok1",
            "user": { "id": "adm-1", "email": "a@b.com" }
        })))
        .mount(&server)
        .await;

    let mut s = setup(&server, None);
    let out = s
        .console
        .run(Command::Login {
            email: "a@b.com".into(),
            code: Some("123456".into()),
        })
        .await
        .unwrap();

    assert_eq!(out["signedIn"], true);
    assert_eq!(out["user"]["id"], "adm-1");
    assert_eq!(s.store.get().unwrap().unwrap().as_str(), "tok1");

    let reopened = FileSessionStore::new(s.store.path());
    assert!(reopened.has_token().unwrap());
}

#[tokio::test]
async fn login_when_signed_in_skips_the_server() {
    let server = MockServer::start().await;
    let mut s = setup(&server, Some("tok"));
    let out = s
        .console
        .run(Command::Login {
            email: "a@b.com".into(),
            code: Some("1".into()),
        })
        .await
        .unwrap();
    assert_eq!(out["alreadySignedIn"], true);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_session_file() {
    let server = MockServer::start().await;
    let mut s = setup(&server, Some("tok"));
    s.console.run(Command::Logout).await.unwrap();
    assert!(!s.store.has_token().unwrap());
    assert_eq!(s.navigator.last().as_deref(), Some(LOGIN_ROUTE));
}

#[tokio::test]
async fn logout_recovers_from_corrupt_session_file() {
    let server = MockServer::start().await;
    let mut s = setup(&server, None);
    std::fs::write(s.store.path(), "{not json").unwrap();

    s.console.run(Command::Logout).await.unwrap();
    assert!(!s.store.has_token().unwrap());
}

#[tokio::test]
async fn attachments_list_filters_by_type() {
    let server = MockServer::start().await;
    let row = |kind: &str, url: &str| {
        json!({
            "thoughtId": "t1",
            "userId": "u1",
            "userEmail": "ada@example.com",
            "thoughtCreatedAt": "2026-03-01T00:00:00Z",
            "type": kind,
            "url": url
        })
    };
    Mock::given(method("GET"))
        .and(path("/api/admin/thought-attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachments": [
                row("image", "https://cdn.example.com/a.png"),
                row("audio", "https://cdn.example.com/b.m4a"),
                row("image", "https://cdn.example.com/c.png")
            ],
            "totalThoughtsWithAttachments": 1,
            "page": 1,
            "limit": 50
        })))
        .mount(&server)
        .await;

    let mut s = setup(&server, Some("tok"));
    let out = s
        .console
        .run(parse(&["attachments", "list", "--type", "image"]).command)
        .await
        .unwrap();

    let rows = out["attachments"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["type"] == "image"));
    assert_eq!(out["totalThoughtsWithAttachments"], 1);
}

#[tokio::test]
async fn users_list_filters_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(query_param("limit", "500"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "u1", "email": "ada@example.com", "createdAt": "2026-01-01T00:00:00Z" },
            { "id": "u2", "email": "bob@example.com", "createdAt": "2026-01-02T00:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let mut s = setup(&server, Some("tok"));
    let cli = parse(&["users", "list", "--search", "ada", "--limit", "500"]);
    let out = s.console.run(cli.command).await.unwrap();

    let rows = out.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "u1");
}

#[tokio::test]
async fn thoughts_list_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/thoughts"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("userId", "u1"))
        .and(query_param("includeContent", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thoughts": [],
            "totalCount": 0,
            "page": 2,
            "limit": 25
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut s = setup(&server, Some("tok"));
    let cli = parse(&[
        "thoughts",
        "list",
        "--page",
        "2",
        "--limit",
        "25",
        "--user-id",
        "u1",
        "--include-content",
    ]);
    let out = s.console.run(cli.command).await.unwrap();
    assert_eq!(out["page"], 2);
}

#[tokio::test]
async fn user_action_reports_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users/u1/reset-usage"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut s = setup(&server, Some("tok"));
    let out = s.console.run(parse(&["users", "reset-usage", "u1"]).command).await.unwrap();
    assert_eq!(out, json!({ "ok": true, "action": "reset-usage", "userId": "u1" }));
}

#[tokio::test]
async fn expired_session_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut s = setup(&server, Some("stale"));
    let err = s.console.run(Command::Stats).await.unwrap_err();

    assert!(err.to_string().starts_with("Session expired"));
    assert!(!s.store.has_token().unwrap());
    assert_eq!(s.navigator.last().as_deref(), Some(LOGIN_ROUTE));

    let err = s.console.run(Command::Stats).await.unwrap_err();
    assert!(err.to_string().contains("Not signed in"));
}

#[tokio::test]
async fn notify_validation_happens_before_sending() {
    let server = MockServer::start().await;
    let mut s = setup(&server, Some("tok"));
    let err = s
        .console
        .run(parse(&["notify", "--title", " ", "--body", "B"]).command)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Title is required.");
    assert!(server.received_requests().await.unwrap().is_empty());
}
