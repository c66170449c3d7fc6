//! Tests for profile load/save and resolution logic (non-interactive paths only)
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

// Each test gets its own config dir, passed to the child process only.
fn run_sentineltop(config_home: &Path, args: &[&str]) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_sentineltop");
    let output = Command::new(exe)
        .env("XDG_CONFIG_HOME", config_home)
        .env("SENTINELTOP_LOG_FILE", config_home.join("sentineltop.log"))
        .args(args)
        .output()
        .expect("run sentineltop");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

fn profiles_path(config_home: &Path) -> PathBuf {
    config_home.join("sentineltop").join("profiles.json")
}

#[test]
fn test_profile_created_on_first_use() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_sentineltop(
        td.path(),
        &["--profile", "unittest", "ws://example:1/ws", "--dry-run"],
    );
    assert!(ok, "{out}");
    let data = fs::read_to_string(profiles_path(td.path())).expect("profiles.json created");
    assert!(
        data.contains("unittest"),
        "profiles.json missing profile entry: {data}"
    );
}

#[test]
fn test_profile_overwrite_only_when_changed() {
    let td = tempfile::tempdir().unwrap();
    let path = profiles_path(td.path());
    run_sentineltop(td.path(), &["--profile", "prod", "ws://one/ws", "--dry-run"]);
    let first = fs::read_to_string(&path).unwrap();
    // Re-run identical (should not duplicate or corrupt)
    run_sentineltop(td.path(), &["--profile", "prod", "ws://one/ws", "--dry-run"]);
    let second = fs::read_to_string(&path).unwrap();
    assert_eq!(first, second, "Profile file changed despite identical input");
    // Overwrite with different URL using --save (no prompt path)
    run_sentineltop(
        td.path(),
        &["--profile", "prod", "--save", "ws://two/ws", "--dry-run"],
    );
    let third = fs::read_to_string(&path).unwrap();
    assert!(third.contains("two"), "Updated URL not written: {third}");
}

#[test]
fn test_saved_profile_is_loaded_by_name() {
    let td = tempfile::tempdir().unwrap();
    run_sentineltop(td.path(), &["--profile", "lab", "ws://lab:5000/ws", "--dry-run"]);
    let (ok, out) = run_sentineltop(td.path(), &["--profile", "lab", "--dry-run"]);
    assert!(ok, "{out}");
    assert!(out.contains("ws://lab:5000/ws"), "{out}");
}

#[test]
fn test_no_url_and_no_profiles_exits_cleanly() {
    let td = tempfile::tempdir().unwrap();
    let (ok, out) = run_sentineltop(td.path(), &["--dry-run"]);
    assert!(ok);
    assert!(out.contains("No URL provided"), "{out}");
}
