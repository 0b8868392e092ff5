//! `--format json` keeps stdout a single parseable document.

use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

fn run(bin: &str, dir: &std::path::Path, envs: &[(&str, String)], args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_clear()
        .env("RUST_LOG", "info")
        .envs(envs.iter().map(|(k, v)| (*k, v.as_str())))
        .output()
        .unwrap()
}

#[test]
fn upload_assets_json_stdout_parses() {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    fs::create_dir_all(public.join("models")).unwrap();
    fs::write(public.join("models/shoe [v2].glb"), b"glTF").unwrap();
    fs::write(public.join("models/notes.txt"), b"notes").unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_upload_assets"),
        dir.path(),
        &[
            ("ASSET_STORAGE_BACKEND", "local".to_string()),
            (
                "LOCAL_STORAGE_PATH",
                dir.path().join("mirror").display().to_string(),
            ),
        ],
        &["--root", "public", "--format", "json"],
    );

    assert!(output.status.success());
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["uploaded"][0]["key"], "models/shoe [v2].glb");
    assert_eq!(summary["skipped"], 1);

    // Progress events still reach the log, on stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Uploading"));
    assert!(!stderr.contains('\u{1b}'));
    assert!(dir.path().join("mirror/models/shoe [v2].glb").exists());
}

#[test]
fn db_sync_missing_tool_prints_nothing_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-psql").display().to_string();

    let output = run(
        env!("CARGO_BIN_EXE_db_sync"),
        dir.path(),
        &[("PSQL_PATH", missing)],
        &["--format", "json"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found in PATH"));
}
