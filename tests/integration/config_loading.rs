use filetree::{ConfigLoader, FileTree};
use std::fs;
use tempfile::TempDir;

#[test]
fn tree_built_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("filetree.toml");
    fs::write(&path, "verify_invariants = true\n").unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert!(config.verify_invariants);

    let mut tree = FileTree::with_config(&config);
    tree.init().unwrap();
    tree.insert_dir("/a/b").unwrap();
    assert_eq!(tree.node_count(), 2);
}
