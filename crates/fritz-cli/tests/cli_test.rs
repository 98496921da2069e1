//! Integration tests for the `fritz` CLI binary.
//!
//! Argument handling runs without a router; the end-to-end cases talk to a
//! wiremock stand-in over plain HTTP.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fritz_api::session::challenge_response;

// ── Helpers ─────────────────────────────────────────────────────────

const SID: &str = "5eed5eed5eed5eed";
const CHALLENGE: &str = "4f1c2e9a";
const PASSWORD: &str = "geheim";

/// Build a [`Command`] for the `fritz` binary with env isolation.
///
/// Clears login and `FRITZ_*` variables and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn fritz_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("fritz");
    cmd.env("HOME", "/tmp/fritz-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fritz-cli-test-nonexistent")
        .env_remove("FBHOST")
        .env_remove("FBUSER")
        .env_remove("FBPASS")
        .env_remove("FRITZ_DATA_DIR")
        .env_remove("FRITZ_SNAPSHOTS")
        .env_remove("FRITZ_TIMEOUT")
        .env_remove("FRITZ_INSECURE")
        .env_remove("FRITZ_CA_CERT")
        .env_remove("FRITZ_LANG")
        .env_remove("RUST_LOG");
    cmd
}

fn session_info(sid: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><SessionInfo><SID>{sid}</SID>\
         <Challenge>{CHALLENGE}</Challenge><BlockTime>0</BlockTime></SessionInfo>"
    )
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/login_sid.lua"))
        .respond_with(ResponseTemplate::new(200).set_body_string(session_info("0000000000000000")))
        .expect(1)
        .mount(server)
        .await;

    let response = format!("{CHALLENGE}-{}", challenge_response(CHALLENGE, PASSWORD));
    Mock::given(method("POST"))
        .and(path("/login_sid.lua"))
        .and(body_string_contains(format!("response={response}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(session_info(SID)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/data.lua"))
        .and(body_string_contains(format!("sid={SID}&page={page}")))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Run the binary off the async runtime and collect its output.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = fritz_cmd();
    cmd.env("FBHOST", server.uri())
        .env("FBUSER", "admin")
        .env("FBPASS", PASSWORD)
        .args(args);
    output_of(cmd).await
}

async fn output_of(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn counter_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(
        "<html>\n<script>\nconst data = {\"Today\":{\"BytesSentHigh\":\"0\",\
         \"BytesSentLow\":\"1000000\",\"BytesReceivedHigh\":\"1\",\
         \"BytesReceivedLow\":\"0\"}};\n</script>\n",
    )
}

async fn data_requests(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/data.lua")
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    fritz_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("FBHOST")
            .and(predicate::str::contains("--overview"))
            .and(predicate::str::contains("--devices"))
            .and(predicate::str::contains("--counter"))
            .and(predicate::str::contains("--add_mac"))
            .and(predicate::str::contains("--loop")),
    );
}

#[test]
fn test_version_flag() {
    fritz_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fritz"));
}

#[test]
fn test_completions_zsh() {
    fritz_cmd()
        .args(["--completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_missing_credentials_without_terminal() {
    fritz_cmd()
        .arg("--overview")
        .write_stdin("")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("FBHOST"));
}

#[test]
fn test_invalid_mac_is_usage_error() {
    // No credentials set: the MAC is rejected before anything is asked for.
    fritz_cmd()
        .args(["--add_mac", "aa:bb:cc:dd:ee"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("add_mac"));
}

#[test]
fn test_unknown_period() {
    fritz_cmd()
        .args(["--counter", "--period", "forever"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("possible values"));
}

// ── Against a stand-in router ───────────────────────────────────────

#[tokio::test]
async fn test_overview_and_counter_end_to_end() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_page(
        &server,
        "overview",
        ResponseTemplate::new(200).set_body_json(json!({
            "pid": "overview",
            "data": {
                "fritzos": { "Productname": "FRITZ!Box 7530", "nspver": "7.29" },
                "internet": { "connections": [{ "active": true, "provider_id": "Telekom" }] }
            }
        })),
    )
    .await;
    mount_page(&server, "netCnt", counter_page()).await;

    let data_dir = tempfile::tempdir().unwrap();
    let data_arg = data_dir.path().to_str().unwrap().to_owned();
    let output = run_against(&server, &["--overview", "--counter", "--data-dir", &data_arg]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("> overview <"), "{stdout}");
    assert!(stdout.contains("FRITZ!Box 7530"), "{stdout}");
    assert!(stdout.contains("Telekom"), "{stdout}");
    assert!(stdout.contains("> counter <"), "{stdout}");
    assert!(
        stdout.contains("Today: total 4296 MB, outgoing 1 MB, incoming 4295 MB"),
        "{stdout}"
    );
    assert!(stdout.find("> overview <") < stdout.find("> counter <"));

    // Exactly two page fetches, in order, after one login.
    let pages = data_requests(&server).await;
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("page=overview"));
    assert!(pages[1].contains("page=netCnt"));

    // One dated snapshot directory holding both pages.
    let days: Vec<_> = std::fs::read_dir(data_dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(days.len(), 1);
    assert!(days[0].join("overview.json").is_file());
    assert!(days[0].join("netCnt.html").is_file());
}

#[tokio::test]
async fn test_rejected_add_mac_exits_nonzero() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/data.lua"))
        .and(body_string_contains("page=wKey&mac0=00&mac1=11"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "add_mac": "error" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["--add_mac", "00:11:22:33:44:55", "--overview", "--no-snapshots"],
    )
    .await;

    assert_eq!(output.status.code(), Some(9));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Adding device with MAC 00:11:22:33:44:55"));
    // --add_mac runs alone: no overview request was made.
    let requests = server.received_requests().await.unwrap();
    assert!(
        !requests
            .iter()
            .any(|r| String::from_utf8_lossy(&r.body).contains("page=overview"))
    );
}

#[tokio::test]
async fn test_wrong_password_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(path("/login_sid.lua"))
        .respond_with(ResponseTemplate::new(200).set_body_string(session_info("0000000000000000")))
        .mount(&server)
        .await;

    let output = run_against(&server, &["--devices", "--no-snapshots"]).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Login failed"));
}

#[tokio::test]
async fn test_successful_add_mac() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/data.lua"))
        .and(body_string_contains("page=wKey&mac0=00&mac1=11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "add_mac": "ok" } })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["--add-mac", "00:11:22:33:44:55", "--no-snapshots"]).await;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Adding device with MAC 00:11:22:33:44:55"), "{stdout}");
    assert!(stdout.contains("Success!"), "{stdout}");
}

#[tokio::test]
async fn test_loop_stops_on_failing_iteration() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/data.lua"))
        .and(body_string_contains("page=netCnt"))
        .respond_with(counter_page())
        .up_to_n_times(2)
        .mount(&server)
        .await;
    // Once the two good answers are used up, the router serves an error page.
    Mock::given(method("POST"))
        .and(path("/data.lua"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal error</html>"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["--counter", "--loop", "1", "--no-snapshots"]).await;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("> counter <").count(), 3, "{stdout}");
    assert_eq!(stdout.matches("Today: total").count(), 2, "{stdout}");
    // Logged in once, then three iterations of the same page.
    let pages = data_requests(&server).await;
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|p| p.contains("page=netCnt")));
}

#[tokio::test]
async fn test_credentials_from_env_file() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_page(&server, "netCnt", counter_page()).await;

    let workdir = tempfile::tempdir().unwrap();
    std::fs::write(
        workdir.path().join(".env"),
        format!("FBHOST={}\nFBUSER=admin\nFBPASS={PASSWORD}\n", server.uri()),
    )
    .unwrap();

    let mut cmd = fritz_cmd();
    cmd.current_dir(workdir.path())
        .args(["--counter", "--no-snapshots"])
        .write_stdin("");
    let output = output_of(cmd).await;

    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Today: total 4296 MB"));
    assert_eq!(data_requests(&server).await.len(), 1);
}
