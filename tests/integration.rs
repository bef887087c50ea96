use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn bkm_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("bkm");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(
        root.join("bookmarks.json"),
        r#"[
            {"title": "Rust Book", "url": "https://doc.rust-lang.org/book/", "tags": ["rust", "docs"]},
            {"title": "Crates.io", "url": "https://crates.io/", "tags": ["rust", "packages"]},
            {"title": "Python Docs", "url": "https://docs.python.org/3/", "tags": ["python"]}
        ]"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[store]
path = "{}/data/menu.sqlite"

[menu]
name = "dev-bookmarks"

[source]
export = "{}/bookmarks.json"
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("bkm.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_bkm(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = bkm_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run bkm binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_store() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_bkm(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_bkm(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_bkm(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_sync_populates_menu() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    let (stdout, stderr, success) = run_bkm(&config_path, &["sync", "rust"]);
    assert!(success, "sync failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("menu items: 2"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_sync_twice_no_duplicates() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    let (stdout1, _, _) = run_bkm(&config_path, &["sync", "rust"]);
    assert!(stdout1.contains("menu items: 2"));

    let (stdout2, _, _) = run_bkm(&config_path, &["sync", "rust"]);
    assert!(stdout2.contains("menu items: 2"));
}

#[test]
fn test_sync_prunes_removed_bookmarks() {
    let (tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    run_bkm(&config_path, &["sync", "rust"]);

    // Crates.io disappears from the export
    fs::write(
        tmp.path().join("bookmarks.json"),
        r#"[
            {"title": "Rust Book", "url": "https://doc.rust-lang.org/book/", "tags": ["rust", "docs"]}
        ]"#,
    )
    .unwrap();

    let (stdout, _, success) = run_bkm(&config_path, &["sync", "rust"]);
    assert!(success);
    assert!(stdout.contains("menu items: 1"));

    let (list, _, _) = run_bkm(&config_path, &["list"]);
    assert!(list.contains("Rust Book"));
    assert!(!list.contains("Crates.io"));
}

#[test]
fn test_list_shows_entries_in_order() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    run_bkm(&config_path, &["sync", "rust"]);

    let (stdout, _, success) = run_bkm(&config_path, &["list"]);
    assert!(success);
    assert!(stdout.contains("Crates.io"));
    assert!(stdout.contains("Rust Book"));
    assert!(stdout.contains("doc.rust-lang.org"));
}

#[test]
fn test_reorder_survives_resync() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    run_bkm(&config_path, &["sync", "rust"]);

    // sha256 of the two synced urls
    let book_id = "f4441b18e618c306ffcc74fed72e4cad87f297065ca66f3e8de847910b7ef72b";
    let crates_id = "48462c0f1c881cf9f9db046e20cb6bc58c9d2a3035ced1633dc1733e73fef99b";

    let (_, _, success) = run_bkm(&config_path, &["reorder", book_id, crates_id]);
    assert!(success);

    let (list, _, _) = run_bkm(&config_path, &["list"]);
    let book_pos = list.find("Rust Book").unwrap();
    let crates_pos = list.find("Crates.io").unwrap();
    assert!(book_pos < crates_pos, "expected Rust Book first:\n{}", list);

    // The manual ordering survives another sync
    run_bkm(&config_path, &["sync", "rust"]);
    let (list, _, _) = run_bkm(&config_path, &["list"]);
    let book_pos = list.find("Rust Book").unwrap();
    let crates_pos = list.find("Crates.io").unwrap();
    assert!(book_pos < crates_pos, "ordering lost on re-sync:\n{}", list);
}

#[test]
fn test_favicon_and_get() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    run_bkm(&config_path, &["sync", "rust"]);

    let (stdout, _, success) = run_bkm(
        &config_path,
        &[
            "favicon",
            "https://doc.rust-lang.org/",
            "https://doc.rust-lang.org/favicon.ico",
        ],
    );
    assert!(success);
    assert!(stdout.contains("doc.rust-lang.org"));

    let book_id = "f4441b18e618c306ffcc74fed72e4cad87f297065ca66f3e8de847910b7ef72b";
    let (entry, _, success) = run_bkm(&config_path, &["get", book_id]);
    assert!(success);
    assert!(entry.contains("https://doc.rust-lang.org/favicon.ico"));
}

#[test]
fn test_get_unknown_identity() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    let (stdout, _, success) = run_bkm(&config_path, &["get", "deadbeef"]);
    assert!(success);
    assert!(stdout.contains("No entry"));
}

#[test]
fn test_sync_without_export_fails() {
    let (tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    fs::remove_file(tmp.path().join("bookmarks.json")).unwrap();

    // The provider failure is swallowed by the reconcile pass; the command
    // still succeeds and the menu stays empty.
    let (stdout, _, success) = run_bkm(&config_path, &["sync", "rust"]);
    assert!(success);
    assert!(stdout.contains("menu items: 0"));
}

#[test]
fn test_status_reports_store_and_export() {
    let (_tmp, config_path) = setup_test_env();

    run_bkm(&config_path, &["init"]);
    let (stdout, _, success) = run_bkm(&config_path, &["status"]);
    assert!(success);
    assert!(stdout.contains("store"));
    assert!(stdout.contains("export"));
    assert!(stdout.contains("dev-bookmarks"));
}
