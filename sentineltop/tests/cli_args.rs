//! CLI arg parsing tests for sentineltop
use assert_cmd::Command;

fn bin() -> Command {
    Command::cargo_bin("sentineltop").expect("sentineltop binary")
}

fn run(args: &[&str]) -> (bool, String) {
    let output = bin()
        .args(args)
        .output()
        .expect("run sentineltop");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (output.status.success(), text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let (ok, text) = run(&["--help"]);
    assert!(ok);
    for flag in ["--profile", "-P", "--demo", "--window", "--alert-cap", "--sort"] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn test_flags_with_help_still_succeed() {
    for args in [
        &["--profile", "dev", "--help"][..],
        &["-P", "dev", "--help"][..],
        &["--window", "60", "--sort", "cpu", "--help"][..],
        &["--alert-cap=10", "--help"][..],
    ] {
        let (ok, text) = run(args);
        assert!(ok, "{args:?} did not succeed: {text}");
        assert!(text.contains("Usage:"));
    }
}

#[test]
fn test_bad_values_are_rejected() {
    let (ok, text) = run(&["--window", "many"]);
    assert!(!ok);
    assert!(text.contains("--window"), "{text}");

    let (ok, _) = run(&["--sort", "mem"]);
    assert!(!ok);

    let (ok, _) = run(&["--bogus"]);
    assert!(!ok);
}

#[test]
fn test_dry_run_normalizes_http_url() {
    let td = tempfile::tempdir().unwrap();
    bin()
        .env("XDG_CONFIG_HOME", td.path())
        .env("SENTINELTOP_LOG_FILE", td.path().join("log"))
        .args(["http://127.0.0.1:5000", "--dry-run"])
        .assert()
        .success()
        .stdout("ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket\n");
}

#[test]
fn test_window_must_be_in_range() {
    for bad in ["0", "10001", "18446744073709551615"] {
        let (ok, text) = run(&["--window", bad, "--demo", "--dry-run"]);
        assert!(!ok, "--window {bad} was accepted");
        assert!(text.contains("--window"), "{text}");
    }
    let td = tempfile::tempdir().unwrap();
    bin()
        .env("SENTINELTOP_LOG_FILE", td.path().join("log"))
        .args(["--window", "10000", "--demo", "--dry-run"])
        .assert()
        .success()
        .stdout("demo\n");
}

#[test]
fn test_dry_run_rejects_unsupported_scheme() {
    let td = tempfile::tempdir().unwrap();
    bin()
        .env("XDG_CONFIG_HOME", td.path())
        .env("SENTINELTOP_LOG_FILE", td.path().join("log"))
        .args(["ftp://host/x", "--dry-run"])
        .assert()
        .failure();
}
