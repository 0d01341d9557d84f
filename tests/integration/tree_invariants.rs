//! Property tests: random insert/remove sequences keep every invariant.

use filetree::{FileTree, TreeError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertDir(String),
    InsertFile(String, Vec<u8>),
    RmDir(String),
    RmFile(String),
}

fn pathname() -> impl Strategy<Value = String> {
    let root = prop::sample::select(vec!["r", "r", "r", "s"]);
    let rest = prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..4);
    (root, rest).prop_map(|(root, rest)| {
        let mut path = format!("/{}", root);
        for component in rest {
            path.push('/');
            path.push_str(component);
        }
        path
    })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        pathname().prop_map(Op::InsertDir),
        (pathname(), prop::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(p, bytes)| Op::InsertFile(p, bytes)),
        pathname().prop_map(Op::RmDir),
        pathname().prop_map(Op::RmFile),
    ]
}

fn listing(tree: &FileTree) -> String {
    tree.to_listing().unwrap()
}

/// Nodes at or below `pathname`, counted from the listing
fn subtree_size(tree: &FileTree, pathname: &str) -> usize {
    let below = format!("{}/", pathname);
    listing(tree)
        .lines()
        .filter(|line| *line == pathname || line.starts_with(&below))
        .count()
}

fn apply(tree: &mut FileTree, op: &Op) -> Result<(), TreeError> {
    match op {
        Op::InsertDir(p) => tree.insert_dir(p),
        Op::InsertFile(p, bytes) => tree.insert_file(p, bytes.clone()),
        Op::RmDir(p) => tree.rm_dir(p),
        Op::RmFile(p) => tree.rm_file(p),
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..40)) {
        let mut tree = FileTree::new();
        tree.init().unwrap();

        for op in &ops {
            let before = listing(&tree);
            let count_before = tree.node_count();
            let removed = match op {
                Op::RmDir(p) | Op::RmFile(p) => subtree_size(&tree, p),
                _ => 0,
            };

            let result = apply(&mut tree, op);

            prop_assert_eq!(tree.check_invariants(), Ok(()));
            prop_assert_eq!(listing(&tree).lines().count(), tree.node_count());

            match (op, result) {
                (_, Err(_)) => {
                    prop_assert_eq!(listing(&tree), before);
                    prop_assert_eq!(tree.node_count(), count_before);
                }
                (Op::InsertDir(p), Ok(())) => {
                    prop_assert!(tree.contains_dir(p));
                    prop_assert!(tree.node_count() > count_before);
                }
                (Op::InsertFile(p, bytes), Ok(())) => {
                    prop_assert!(tree.contains_file(p));
                    prop_assert_eq!(tree.get_file_contents(p), Some(&bytes[..]));
                }
                (Op::RmDir(p), Ok(())) | (Op::RmFile(p), Ok(())) => {
                    prop_assert_eq!(tree.node_count(), count_before - removed);
                    prop_assert!(!tree.contains_dir(p) && !tree.contains_file(p));
                }
            }
        }
    }

    #[test]
    fn kind_sticks_until_removed(p in pathname()) {
        let mut tree = FileTree::new();
        tree.init().unwrap();
        tree.insert_dir("/r").unwrap();

        if tree.insert_dir(&p).is_ok() {
            prop_assert!(tree.insert_file(&p, vec![1]).is_err());
            prop_assert!(tree.contains_dir(&p));
            prop_assert!(!tree.contains_file(&p));
        }
    }
}
