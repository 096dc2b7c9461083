use super::*;
use sec_client::state::storage::MemoryStorage;

fn anonymous_client() -> SecClient<MemoryStorage> {
    SecClient::new(&ClientConfig::default(), MemoryStorage::new()).unwrap()
}

fn signed_in_client() -> SecClient<MemoryStorage> {
    let mut client = anonymous_client();
    let session = client.session_mut();
    session.set_auth("665f");
    session.set_user_id("665f");
    session.set_role("teacher");
    session.set_name("Ana");
    client
}

// =============================================================================
// argument parsing
// =============================================================================

#[test]
fn parses_register_role() {
    let cli = Cli::try_parse_from([
        "sec", "register", "--name", "Luis", "--email", "luis@example.com", "--password", "pw", "--role", "Parent",
    ])
    .unwrap();
    match cli.command {
        Command::Register { role, .. } => assert_eq!(role, Role::Parent),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_role() {
    let result = Cli::try_parse_from([
        "sec", "register", "--name", "x", "--email", "x@y", "--password", "pw", "--role", "janitor",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_repeated_file_ids() {
    let cli = Cli::try_parse_from([
        "sec", "resources", "create", "i1", "c1", "--title", "Notes", "--file-id", "f1", "--file-id", "f2",
    ])
    .unwrap();
    match cli.command {
        Command::Resources(ResourceCommand {
            command: ResourceSubcommand::Create { file_ids, description, .. },
        }) => {
            assert_eq!(file_ids, vec!["f1", "f2"]);
            assert_eq!(description, "");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

// =============================================================================
// config overrides
// =============================================================================

#[test]
fn flags_override_config() {
    let cfg = resolve_config(Some("https://sec.example.test/api/v1/"), Some(PathBuf::from("/tmp/s.json"))).unwrap();
    assert_eq!(cfg.base_url, "https://sec.example.test/api/v1");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/s.json"));
}

#[test]
fn absent_flags_use_defaults() {
    let cfg = resolve_config(None, None).unwrap();
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn blank_flags_use_defaults() {
    let cfg = resolve_config(Some("   "), Some(PathBuf::new())).unwrap();
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn bad_base_url_flag_is_config_error() {
    let err = resolve_config(Some("localhost:8000"), None).unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::InvalidBaseUrl(_))));
}

#[tokio::test]
async fn valid_flag_wins_over_invalid_environment() {
    // SAFETY: the other tests that parse flags never inspect `base_url`.
    unsafe { std::env::set_var("SEC_API_BASE_URL", "localhost:8000/api/v1") };
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let cli = Cli::try_parse_from([
        "sec",
        "--base-url",
        "http://127.0.0.1:9/api/v1",
        "--session-file",
        session_file.to_str().unwrap(),
        "whoami",
    ])
    .unwrap();
    unsafe { std::env::remove_var("SEC_API_BASE_URL") };

    assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9/api/v1"));
    run(cli).await.unwrap();
}

// =============================================================================
// guard + reports
// =============================================================================

#[test]
fn require_view_refuses_anonymous() {
    let mut client = anonymous_client();
    let err = require_view(&mut client, &Route::Class { id: "5".into() }).unwrap_err();
    assert!(matches!(err, CliError::NotSignedIn));
}

#[test]
fn require_view_allows_signed_in() {
    let mut client = signed_in_client();
    require_view(&mut client, &Route::DEFAULT).unwrap();
    assert_eq!(client.router().current(), Some(&Route::Classes));
}

#[test]
fn whoami_reports_anonymous() {
    assert_eq!(whoami(&anonymous_client()), json!({ "authenticated": false }));
}

#[test]
fn whoami_reports_user() {
    let report = whoami(&signed_in_client());
    assert_eq!(report["authenticated"], true);
    assert_eq!(report["name"], "Ana");
    assert_eq!(report["role"], "teacher");
}

#[test]
fn navigation_report_marks_redirects() {
    let mut client = anonymous_client();
    let nav = client.navigate("/classes/9");
    let report = navigation_report("/classes/9", &nav);
    assert_eq!(report["view"], "login");
    assert_eq!(report["path"], "/login");
    assert_eq!(report["redirected"], true);
}
