//! End-to-end tests for the `quire` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn quire() -> Command {
    let mut cmd = Command::cargo_bin("quire").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let write = |rel: &str, content: &str| {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };
    write("alice.md", "---\nrole: designer\n---\n# Alice\n\nWorks on [[projects/web]]\n");
    write(
        "projects/web.md",
        "---\nstatus: active\n---\n# Website\n\n- [ ] draft copy !!1 #work\n- [x] pick fonts #work\n\n![[agenda]]\n",
    );
    write("agenda.md", "1. Budget\n2. Timeline\n");
    dir
}

fn path(dir: &TempDir, rel: &str) -> String {
    dir.path().join(rel).to_str().unwrap().to_string()
}

fn read(dir: &TempDir, rel: &str) -> String {
    fs::read_to_string(dir.path().join(rel)).unwrap()
}

#[test]
fn test_parse_prints_note_json() {
    let dir = vault();
    let output = quire().arg("parse").arg(path(&dir, "projects/web.md")).output().unwrap();
    assert!(output.status.success());

    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["id"], "web");
    assert_eq!(note["title"], "Website");
    assert_eq!(note["tags"], serde_json::json!(["work"]));
    assert_eq!(note["links"], serde_json::json!(["agenda"]));
    assert_eq!(note["tasks"][0]["priority"], 1);
    assert_eq!(note["frontmatter"]["status"], "active");
}

#[test]
fn test_query_notes() {
    let dir = vault();
    quire()
        .args(["query", dir.path().to_str().unwrap(), "backlinks:>0 sort:title"])
        .assert()
        .success()
        .stdout("agenda\tagenda\nprojects/web\tWebsite\n");
}

#[test]
fn test_query_tasks_with_default_sort_from_config() {
    let dir = vault();
    let config = dir.path().join("quire.toml");
    fs::write(&config, "[query]\ndefault_sort = \"completed:desc\"\n").unwrap();

    quire()
        .args(["--config", config.to_str().unwrap()])
        .args(["query", dir.path().to_str().unwrap(), "tag:work", "--tasks"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("projects/web:").and(predicate::str::contains("[x] pick fonts #work")))
        .stdout(predicate::function(|out: &str| {
            out.find("pick fonts").unwrap() < out.find("draft copy").unwrap()
        }));
}

#[test]
fn test_set_and_delete_frontmatter() {
    let dir = vault();
    quire()
        .args(["set", &path(&dir, "alice.md"), "rating", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));
    assert!(read(&dir, "alice.md").starts_with("---\nrole: designer\nrating: 5\n---\n"));

    quire().args(["set", &path(&dir, "alice.md"), "role"]).assert().success();
    quire().args(["set", &path(&dir, "alice.md"), "rating"]).assert().success();
    assert_eq!(read(&dir, "alice.md"), "# Alice\n\nWorks on [[projects/web]]\n");
}

#[test]
fn test_set_string_flag_quotes() {
    let dir = vault();
    quire()
        .args(["set", &path(&dir, "alice.md"), "zip", "02134", "--string"])
        .assert()
        .success();
    assert!(read(&dir, "alice.md").contains("zip: \"02134\"\n"));
}

#[test]
fn test_rename_key_collision() {
    let dir = vault();
    quire().args(["set", &path(&dir, "alice.md"), "team", "design"]).assert().success();
    quire()
        .args(["rename-key", &path(&dir, "alice.md"), "role", "team"])
        .assert()
        .success();
    assert!(read(&dir, "alice.md").starts_with("---\nteam1: designer\nteam: design\n---\n"));
}

#[test]
fn test_toggle_by_offset() {
    let dir = vault();
    let content = read(&dir, "projects/web.md");
    let offset = content.find("- [ ] draft").unwrap();

    quire()
        .args(["toggle", &path(&dir, "projects/web.md"), &offset.to_string()])
        .assert()
        .success()
        .stdout(format!("Completed task at {offset}\n"));
    assert!(read(&dir, "projects/web.md").contains("- [x] draft copy"));

    quire()
        .args(["toggle", &path(&dir, "projects/web.md"), &(offset + 2).to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task at offset"));
}

#[test]
fn test_export_inlines_embeds() {
    let dir = vault();
    quire()
        .args(["export", dir.path().to_str().unwrap(), "projects/web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("> 1. Budget\n> 2. Timeline"))
        .stdout(predicate::str::contains("![[agenda]]").not());

    quire()
        .args(["export", dir.path().to_str().unwrap(), "projects/web", "--depth", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget").not());
}

#[test]
fn test_missing_note_fails() {
    let dir = vault();
    quire()
        .args(["export", dir.path().to_str().unwrap(), "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No note nope"));
}

#[test]
fn test_bad_config_fails() {
    let dir = vault();
    quire()
        .args(["--config", Path::new("/nonexistent/quire.toml").to_str().unwrap()])
        .args(["parse", &path(&dir, "alice.md")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
