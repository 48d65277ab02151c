use pretty_assertions::assert_eq;

use super::PathTree;

fn labels(tree: &PathTree) -> Vec<(String, usize)> {
    tree.walk()
        .map(|(id, depth)| (tree[id].label.clone(), depth))
        .collect()
}

#[test]
fn test_shared_directory() {
    let mut tree = PathTree::new();
    tree.insert_path("a/b.txt");
    tree.insert_path("a/c.txt");

    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.len(), 3);

    let a = &tree[tree.roots()[0]];
    assert_eq!(a.label, "a");
    assert_eq!(a.key, "a");
    assert!(!a.is_leaf);

    let children: Vec<(&str, &str, bool)> = a
        .children()
        .iter()
        .map(|id| {
            let node = &tree[*id];
            (node.label.as_str(), node.key.as_str(), node.is_leaf)
        })
        .collect();
    assert_eq!(
        children,
        vec![("b.txt", "a/b.txt", true), ("c.txt", "a/c.txt", true)]
    );
}

#[test]
fn test_duplicate_path() {
    let mut tree = PathTree::new();
    tree.insert_path("a/b.txt");
    tree.insert_path("a/c.txt");
    tree.insert_path("a/b.txt");

    assert_eq!(tree.len(), 3);
    assert_eq!(tree[tree.roots()[0]].children().len(), 2);
}

#[test]
fn test_forest() {
    let tree = PathTree::from_paths('/', ["a/x.txt", "b/y.txt"]);

    let roots: Vec<&str> = tree
        .roots()
        .iter()
        .map(|id| tree[*id].label.as_str())
        .collect();
    assert_eq!(roots, vec!["a", "b"]);
}

#[test]
fn test_repeated_segment_names() {
    let tree = PathTree::from_paths('/', ["src/lib/src/lib.rs", "src/lib.rs"]);

    assert_eq!(
        labels(&tree),
        vec![
            ("src".to_owned(), 0),
            ("lib".to_owned(), 1),
            ("src".to_owned(), 2),
            ("lib.rs".to_owned(), 3),
            ("lib.rs".to_owned(), 1),
        ]
    );

    let inner = tree.get("src/lib/src").unwrap();
    assert_eq!(tree.parent(inner), tree.get("src/lib"));

    let leaf = tree.get("src/lib.rs").unwrap();
    assert_eq!(tree.parent(leaf), tree.get("src"));
}

#[test]
fn test_file_and_directory_share_prefix() {
    let tree = PathTree::from_paths('/', ["a/b", "a/b/c"]);

    let b = tree.find("a/b").unwrap();
    assert!(b.is_leaf);
    assert_eq!(b.children().len(), 1);

    // a later path ending at an existing directory marks it as a file too
    let tree = PathTree::from_paths('/', ["a/b/c", "a/b"]);
    assert!(tree.find("a/b").unwrap().is_leaf);
}

#[test]
fn test_empty_segments() {
    let tree = PathTree::from_paths('/', ["/usr/x.c", "a//b.c"]);

    let root = tree.find("").unwrap();
    assert_eq!(root.label, "");
    assert_eq!(root.children().len(), 1);
    assert!(tree.find("/usr/x.c").unwrap().is_leaf);

    let empty = tree.find("a/").unwrap();
    assert_eq!(empty.label, "");
    assert!(tree.find("a//b.c").unwrap().is_leaf);
}

#[test]
fn test_windows_separator() {
    let tree = PathTree::from_paths('\\', [r"c:\src\main.c", r"c:\src\util.c"]);

    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.find(r"c:\src").unwrap().children().len(), 2);
    assert_eq!(tree.separator(), '\\');
}

#[test]
fn test_find_ancestor() {
    let tree = PathTree::from_paths('/', ["a/b/c/d.txt"]);
    let leaf = tree.get("a/b/c/d.txt").unwrap();

    let b = tree.find_ancestor(leaf, |node| node.label == "b");
    assert_eq!(b, tree.get("a/b"));

    let root = tree.find_ancestor(leaf, |node| node.parent().is_none());
    assert_eq!(root, tree.get("a"));

    // the starting node is not its own ancestor
    let itself = tree.find_ancestor(leaf, |node| node.is_leaf);
    assert_eq!(itself, None);

    let a = tree.get("a").unwrap();
    assert_eq!(tree.find_ancestor(a, |_| true), None);
}

#[test]
fn test_walk_from() {
    let tree = PathTree::from_paths('/', ["a/b/x.c", "a/b/y.c", "a/z.c", "q.c"]);
    let b = tree.get("a/b").unwrap();

    let walked: Vec<(&str, usize)> = tree
        .walk_from(b)
        .map(|(id, depth)| (tree[id].key.as_str(), depth))
        .collect();

    assert_eq!(walked, vec![("a/b", 0), ("a/b/x.c", 1), ("a/b/y.c", 1)]);
    assert_eq!(tree.walk().count(), tree.len());
}

#[test]
fn test_missing_key() {
    let tree = PathTree::from_paths('/', ["a/b.txt"]);

    assert!(tree.get("a/c.txt").is_none());
    assert!(tree.get("b").is_none());
    assert!(PathTree::new().is_empty());
}
