//! Create / list / delete lifecycle of the study registry.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use pathta_core::TAXONOMY;
use pathta_store::json;
use pathta_study::{AssumeYes, StudyError, StudyRegistry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    registry: StudyRegistry,
    data: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().expect("tempdir should create");
    let data = temp.path().join("data");
    fs::create_dir(&data).expect("data dir should create");
    let registry =
        StudyRegistry::open(temp.path().join("studies.json")).expect("registry should open");
    Fixture {
        _temp: temp,
        registry,
        data,
    }
}

#[test]
fn create_registers_once_and_builds_taxonomy() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();

    let record = registry
        .create("Alpha", &data)
        .expect("create should succeed")
        .expect("study should be new");

    assert_eq!(record.path(), data.join("Alpha"));
    assert_eq!(
        registry.list().into_iter().filter(|n| n == "Alpha").count(),
        1
    );
    for folder in TAXONOMY {
        assert!(data.join("Alpha").join(folder).is_dir(), "{folder} missing");
    }

    let document = json::load(registry.path()).expect("registry should load");
    let entry = &document["Alpha"];
    assert_eq!(entry["path"], serde_json::json!(data.join("Alpha")));
    assert!(entry["created"].is_string());
}

#[test]
fn duplicate_create_is_a_no_op() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    registry.create("Alpha", &data).expect("first create");
    let before = fs::read_to_string(registry.path()).expect("registry should read");

    let second = registry.create("Alpha", &data).expect("duplicate is not an error");

    assert!(second.is_none());
    assert_eq!(
        fs::read_to_string(registry.path()).expect("registry should read"),
        before
    );
    assert_eq!(registry.list().len(), 1);
}

#[test]
fn registry_is_shared_between_handles() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    let mut other = StudyRegistry::open(registry.path()).expect("second handle");

    registry.create("Alpha", &data).expect("create alpha");
    other.create("Beta", &data).expect("create beta");

    registry.reload().expect("reload");
    assert_eq!(
        registry.list().into_iter().collect::<Vec<_>>(),
        vec!["Alpha".to_string(), "Beta".to_string()]
    );
}

#[test]
fn declined_delete_keeps_everything() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    registry.create("Alpha", &data).expect("create");

    let asked = Cell::new(0);
    let deleted = registry
        .delete("Alpha", &|prompt: &str| {
            asked.set(asked.get() + 1);
            assert!(prompt.contains("Alpha"));
            false
        })
        .expect("declined delete is not an error");

    assert!(!deleted);
    assert_eq!(asked.get(), 1);
    assert!(registry.contains("Alpha"));
    assert!(data.join("Alpha").is_dir());
}

#[test]
fn confirmed_delete_removes_tree_and_entry() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    registry.create("Alpha", &data).expect("create alpha");
    registry.create("Beta", &data).expect("create beta");
    fs::write(data.join("Alpha/feature/f.txt"), "x").expect("fixture file");

    assert!(registry.delete("Alpha", &AssumeYes).expect("delete"));

    assert!(!data.join("Alpha").exists());
    assert!(data.join("Beta").is_dir());
    let reopened = StudyRegistry::open(registry.path()).expect("reopen");
    assert_eq!(
        reopened.list().into_iter().collect::<Vec<_>>(),
        vec!["Beta".to_string()]
    );
}

#[test]
fn delete_with_missing_root_is_a_desync() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    registry.create("Alpha", &data).expect("create");
    fs::remove_dir_all(data.join("Alpha")).expect("remove behind the registry's back");

    let err = registry.delete("Alpha", &AssumeYes).unwrap_err();

    assert!(matches!(err, StudyError::Desync { .. }));
    assert!(registry.contains("Alpha"));
}

#[test]
fn lock_file_is_released_after_mutations() {
    let Fixture {
        _temp,
        mut registry,
        data,
    } = fixture();
    registry.create("Alpha", &data).expect("create");

    let lock = pathta_study::lock::RegistryLock::path_for(registry.path());
    assert!(!lock.exists());
}

#[test]
fn first_open_waits_for_a_concurrent_writer() {
    let temp = TempDir::new().expect("tempdir should create");
    let path = temp.path().join("studies.json");

    let held = pathta_study::lock::RegistryLock::acquire(&path, std::time::Duration::from_secs(1))
        .expect("lock");
    let opener = {
        let path = path.clone();
        std::thread::spawn(move || StudyRegistry::open(path))
    };
    json::save(
        &path,
        &serde_json::json!({"Alpha": {"path": "/srv/Alpha", "created": "3/7/2024, 9:5:2"}}),
    )
    .expect("concurrent write");
    drop(held);

    let registry = opener
        .join()
        .expect("opener thread")
        .expect("registry should open");
    assert!(registry.contains("Alpha"));
    assert_eq!(
        json::load(&path).expect("registry should load")["Alpha"]["path"],
        serde_json::json!("/srv/Alpha")
    );
}
