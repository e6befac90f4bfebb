use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn mvz_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("mvz");
    path
}

fn setup_test_env(bind: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    // Port 9 (discard) refuses connections immediately, so remote calls
    // exercise the collapse-to-empty contract without touching the network.
    let config_content = format!(
        r#"[db]
path = "{}/data/mevzuat.sqlite"

[remote]
base_url = "http://127.0.0.1:9"
timeout_secs = 2
page_size = 100
throttle_ms = 0

[server]
bind = "{}"
"#,
        root.display(),
        bind
    );

    let config_path = config_dir.join("mvz.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_mvz(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = mvz_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run mvz binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env("127.0.0.1:0");

    let (stdout, stderr, success) = run_mvz(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data").join("mevzuat.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:0");

    let (_, _, success1) = run_mvz(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_mvz(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_categories_seeded_once() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:0");

    run_mvz(&config_path, &["init"]);
    run_mvz(&config_path, &["init"]);

    let (stdout, _, success) = run_mvz(&config_path, &["categories"]);
    assert!(success, "categories failed: {}", stdout);
    assert!(stdout.contains("Anayasa Hukuku"));
    assert!(stdout.contains("Bankacılık Hukuku"));
    assert!(stdout.contains("İdare Hukuku"));

    // Header plus exactly twelve category rows, even after a double init.
    assert_eq!(stdout.lines().count(), 13, "unexpected output: {}", stdout);
}

#[test]
fn test_get_missing_document() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:0");

    run_mvz(&config_path, &["init"]);

    let (_, stderr, success) = run_mvz(&config_path, &["get", "0000"]);
    assert!(!success, "get with missing number should fail");
    assert!(
        stderr.contains("not found"),
        "Should report not found, got: {}",
        stderr
    );
}

#[test]
fn test_sync_unreachable_remote_yields_empty_batch() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:0");

    run_mvz(&config_path, &["init"]);

    // The fetch client collapses remote failure to an empty candidate list,
    // so the run succeeds with nothing to do.
    let (stdout, stderr, success) = run_mvz(&config_path, &["sync", "--days", "1"]);
    assert!(success, "sync failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("fetched: 0 candidates"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_sync_dry_run() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:0");

    run_mvz(&config_path, &["init"]);

    let (stdout, _, success) = run_mvz(&config_path, &["sync", "--days", "1", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("candidates found: 0"));
}

#[test]
fn test_missing_config_fails() {
    let binary = mvz_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg("/nonexistent/mvz.toml")
        .arg("init")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_serve_api_health() {
    let bind = "127.0.0.1:17461";
    let (_tmp, config_path) = setup_test_env(bind);

    run_mvz(&config_path, &["init"]);

    let mut child = Command::new(mvz_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(["serve", "api"])
        .spawn()
        .unwrap();

    let http = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();

    let url = format!("http://{}/health", bind);
    let mut health: Option<serde_json::Value> = None;
    for _ in 0..40 {
        if let Ok(response) = http.get(&url).send() {
            if response.status().is_success() {
                health = response.json().ok();
                break;
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(250));
    }

    child.kill().ok();
    child.wait().ok();

    let health = health.expect("server never answered /health");
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "mevzuat-sync");
}
