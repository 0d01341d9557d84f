use filetree::{FileTree, NodeKind, NodeStat, TreeError};

fn initialized() -> FileTree {
    let mut tree = FileTree::new();
    tree.init().unwrap();
    tree
}

#[test]
fn inserted_directory_is_found_with_its_path() {
    let mut tree = initialized();
    tree.insert_dir("/usr/local/lib").unwrap();

    let node = tree.find_node("/usr/local/lib").unwrap();
    assert_eq!(node.path().as_str(), "/usr/local/lib");
    assert_eq!(node.kind(), NodeKind::Directory);
    assert_eq!(node.parent().unwrap().path().as_str(), "/usr/local");
    assert!(tree.contains_dir("/usr/local/lib"));
}

#[test]
fn second_insert_of_same_path_changes_nothing() {
    let mut tree = initialized();
    tree.insert_dir("/a/b").unwrap();
    tree.insert_file("/a/b/f", b"1".to_vec()).unwrap();
    let listing = tree.to_listing().unwrap();
    let count = tree.node_count();

    assert!(matches!(tree.insert_dir("/a/b"), Err(TreeError::AlreadyInTree(_))));
    assert!(matches!(
        tree.insert_file("/a/b/f", b"2".to_vec()),
        Err(TreeError::AlreadyInTree(_))
    ));
    assert_eq!(tree.node_count(), count);
    assert_eq!(tree.to_listing().unwrap(), listing);
    assert_eq!(tree.get_file_contents("/a/b/f"), Some(&b"1"[..]));
}

#[test]
fn listing_puts_files_before_directories() {
    let mut tree = initialized();
    tree.insert_dir("/a/y").unwrap();
    tree.insert_file("/a/x", Vec::new()).unwrap();
    assert_eq!(tree.to_listing().unwrap(), "/a\n/a/x\n/a/y\n");
}

#[test]
fn removing_directory_drops_whole_subtree() {
    let mut tree = initialized();
    tree.insert_dir("/a/b/c/d").unwrap();
    tree.insert_file("/a/b/c/f", b"x".to_vec()).unwrap();
    tree.insert_file("/a/g", b"y".to_vec()).unwrap();
    assert_eq!(tree.node_count(), 6);

    tree.rm_dir("/a/b").unwrap();
    assert_eq!(tree.node_count(), 2);
    for gone in ["/a/b", "/a/b/c", "/a/b/c/d"] {
        assert!(!tree.contains_dir(gone));
        assert!(matches!(tree.find_node(gone), Err(TreeError::NoSuchPath(_))));
    }
    assert!(!tree.contains_file("/a/b/c/f"));
    assert!(tree.contains_file("/a/g"));
    assert!(tree.check());
}

#[test]
fn replace_returns_previous_contents() {
    let mut tree = initialized();
    tree.insert_dir("/etc").unwrap();
    tree.insert_file("/etc/hosts", b"127.0.0.1".to_vec()).unwrap();

    let old = tree.replace_file_contents("/etc/hosts", b"::1".to_vec());
    assert_eq!(old.as_deref(), Some(&b"127.0.0.1"[..]));
    assert_eq!(tree.get_file_contents("/etc/hosts"), Some(&b"::1"[..]));
    assert_eq!(tree.stat("/etc/hosts"), Ok(NodeStat::File { size: 3 }));
}

#[test]
fn destroy_init_destroy_on_empty_tree() {
    let mut tree = initialized();
    tree.destroy().unwrap();
    assert_eq!(tree.node_count(), 0);
    tree.init().unwrap();
    assert_eq!(tree.node_count(), 0);
    tree.destroy().unwrap();
    assert_eq!(tree.node_count(), 0);
    assert!(tree.check());
}

#[test]
fn boundary_cases() {
    let mut tree = initialized();
    assert!(matches!(tree.insert_file("/", Vec::new()), Err(TreeError::ConflictingPath(_))));

    tree.insert_dir("/a").unwrap();
    tree.insert_file("/a/f", Vec::new()).unwrap();
    assert!(matches!(tree.insert_dir("/a/f/sub"), Err(TreeError::BadPath(_))));
    assert!(matches!(tree.stat("/nope"), Err(TreeError::ConflictingPath(_))));
    assert!(matches!(tree.stat("/a/nope"), Err(TreeError::NoSuchPath(_))));
}

#[test]
fn independent_trees_do_not_share_state() {
    let mut first = initialized();
    let mut second = initialized();
    first.insert_dir("/a").unwrap();
    second.insert_dir("/b").unwrap();
    assert!(first.contains_dir("/a"));
    assert!(!first.contains_dir("/b"));
    assert!(second.contains_dir("/b"));
}

#[test]
fn node_handles_walk_children_in_storage_order() {
    let mut tree = initialized();
    tree.insert_dir("/a/m").unwrap();
    tree.insert_file("/a/c", Vec::new()).unwrap();
    tree.insert_dir("/a/b").unwrap();

    let root = tree.root().unwrap();
    assert_eq!(root.num_children().unwrap(), 3);
    let names: Vec<&str> = root.children().map(|c| c.path().name()).collect();
    assert_eq!(names, vec!["b", "c", "m"]);
    assert!(matches!(root.child(3), Err(TreeError::NoSuchPath(_))));

    let file = root.child(1).unwrap();
    assert!(matches!(file.num_children(), Err(TreeError::NotADirectory(_))));
}

#[test]
fn very_deep_directory_chain_is_handled_without_recursion() {
    let mut tree = initialized();
    let deep: String = (0..6_000).map(|_| "/d").collect();
    tree.insert_dir(&deep).unwrap();
    assert_eq!(tree.node_count(), 6_000);
    assert!(tree.check());

    let listing = tree.to_listing().unwrap();
    assert_eq!(listing.lines().count(), 6_000);
    assert!(listing.ends_with(&format!("{}\n", deep)));

    tree.destroy().unwrap();
    assert_eq!(tree.node_count(), 0);
    assert!(tree.check());
}
