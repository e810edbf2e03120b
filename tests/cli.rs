use assert_cmd::Command;
use folio::model::{Category, Item};
use folio::store::fs::FileStore;
use folio::store::DataStore;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn folio(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_DATA", dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn seeded() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    let web = Category::new("Web", "web");
    store.save(&web).unwrap();

    let mut site = Item::new("Site X", "site-x", web.id);
    site.description = "A shop front".to_string();
    site.is_published = true;
    store.save(&site).unwrap();
    store.save(&Item::new("Draft Y", "draft-y", web.id)).unwrap();
    dir
}

#[test]
fn empty_data_dir_lists_no_items() {
    let dir = tempfile::tempdir().unwrap();
    folio(dir.path())
        .args(["items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No portfolio items."));
}

#[test]
fn items_list_includes_drafts_and_filters() {
    let dir = seeded();
    folio(dir.path())
        .args(["items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Site X"))
        .stdout(predicate::str::contains("Draft Y"))
        .stdout(predicate::str::contains("12 chars, 0 tag(s), no image"));

    folio(dir.path())
        .args(["items", "list", "--drafts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft Y"))
        .stdout(predicate::str::contains("Site X").not());
}

#[test]
fn publish_then_show() {
    let dir = seeded();
    folio(dir.path())
        .args(["items", "publish", "draft-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Published 1 item(s)."));

    folio(dir.path())
        .args(["items", "show", "draft-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft Y [published]"));
}

#[test]
fn unknown_slug_fails_without_changes() {
    let dir = seeded();
    folio(dir.path())
        .args(["items", "publish", "draft-y", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    folio(dir.path())
        .args(["items", "list", "--published"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft Y").not());
}

#[test]
fn categories_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    folio(dir.path())
        .args(["categories", "add", "Print Design", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category created: Print Design (print)"));

    folio(dir.path())
        .args(["categories", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Print Design  print"));

    folio(dir.path())
        .args(["categories", "rm", "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category removed: Print Design"));

    folio(dir.path())
        .args(["categories", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories."));
}

#[test]
fn duplicate_tag_slug_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    folio(dir.path()).args(["tags", "add", "Rust", "rust"]).assert().success();
    folio(dir.path())
        .args(["tags", "add", "Rust again", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn clients_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    folio(dir.path())
        .args(["clients", "add", "Acme", "hello@acme.test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Client created: Acme"));

    folio(dir.path())
        .args(["clients", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello@acme.test"));
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    folio(dir.path())
        .args(["config", "paginate_by", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paginate_by set to 6"));

    folio(dir.path())
        .args(["config", "paginate_by"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6"));

    folio(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("site_title"));
}
