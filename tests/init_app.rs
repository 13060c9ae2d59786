// tests/init_app.rs

// `init_app` goes through the process-wide cache, so this file keeps a single
// test that owns it.

use projtree::init_app;
use std::{fs, sync::Arc};
use tempfile::TempDir;

#[test]
fn test_init_app_first_call_wins() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("proj");
    fs::create_dir_all(root.join("conf")).unwrap();
    fs::write(
        root.join("project_structure.yaml"),
        "root:\n  name: proj\n  app_name: demo\n  structure:\n    conf: {}\n    data:\n      content:\n        raw: {}\n",
    )
    .unwrap();
    fs::write(root.join("conf/first.json"), r#"{"threshold": 1}"#).unwrap();
    fs::write(root.join("conf/second.json"), r#"{"threshold": 2}"#).unwrap();

    let first = init_app(root.join("first.py")).unwrap();
    let second = init_app(root.join("second.py")).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.logger.script_name(), "first");
    assert_eq!(second.script_config.get("threshold"), Some(&serde_json::json!(1)));
    assert_eq!(
        second.node_path(&["data", "raw"]).unwrap(),
        second.project_root.join("data").join("raw")
    );
}
