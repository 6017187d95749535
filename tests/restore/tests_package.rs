//! Package restoration: scope, import objects, then files.

use dectree::positioned::PNode;
use dectree::syntax::{ObjKind, Object, Scope};
use dectree::{DecoratedTree, Node, NodeId, RestoreOptions, TextSize, restore};
use smol_str::SmolStr;

use crate::helpers::assertions::restored_as;

struct TwoFiles {
    tree: DecoratedTree,
    root: NodeId,
    a: NodeId,
    b: NodeId,
}

/// Package `p` with files `a.go` and `b.go`, both importing `fmt`.
fn two_files() -> TwoFiles {
    let mut tree = DecoratedTree::new();
    let fmt = tree.add_object(Object::new(ObjKind::Pkg, "fmt"));
    let scope = tree.add_scope(Scope::new(None));
    if let Some(scope) = tree.scope_mut(scope) {
        scope.insert("fmt", fmt);
    }

    let file = |tree: &mut DecoratedTree| {
        let name = tree.ident("p");
        tree.alloc(Node::File {
            name,
            decls: Vec::new(),
            scope: None,
            imports: Vec::new(),
            unresolved: Vec::new(),
        })
    };
    let a = file(&mut tree);
    let b = file(&mut tree);
    let root = tree.alloc(Node::Package {
        name: "p".into(),
        scope: Some(scope),
        imports: [(SmolStr::from("fmt"), fmt)].into_iter().collect(),
        files: [(SmolStr::from("a.go"), a), (SmolStr::from("b.go"), b)]
            .into_iter()
            .collect(),
    });

    TwoFiles { tree, root, a, b }
}

#[test]
fn test_import_object_shared_with_scope_binding() {
    let pkg = two_files();
    let restored = restore(&pkg.tree, pkg.root, &RestoreOptions::default()).unwrap();

    let Some(PNode::Package {
        scope: Some(scope),
        imports,
        ..
    }) = restored.root_node()
    else {
        panic!("expected Package root with a scope");
    };
    let bound = restored.scope(*scope).unwrap().lookup("fmt");
    assert_eq!(bound, imports.get("fmt").copied());
    assert_eq!(restored.object_count(), 1);
}

#[test]
fn test_files_restored_in_map_order() {
    let pkg = two_files();
    let restored = restore(&pkg.tree, pkg.root, &RestoreOptions::default()).unwrap();

    let Some(PNode::Package { files, .. }) = restored.root_node() else {
        panic!("expected Package root");
    };
    let a = restored_as(&restored, pkg.a);
    let b = restored_as(&restored, pkg.b);
    assert_eq!(
        files.keys().map(SmolStr::as_str).collect::<Vec<_>>(),
        vec!["a.go", "b.go"]
    );
    assert_eq!(files.values().copied().collect::<Vec<_>>(), vec![a, b]);

    let package_pos = |id| match restored.node(id) {
        Some(PNode::File { package, .. }) => *package,
        other => panic!("expected File, found {other:?}"),
    };
    // "package p" is 9 bytes per file
    assert_eq!(package_pos(a), TextSize::new(1));
    assert_eq!(package_pos(b), TextSize::new(10));
    assert_eq!(restored.end(), TextSize::new(1 + 9 + 9));
}

#[test]
fn test_package_books_no_tokens_of_its_own() {
    let pkg = two_files();
    let restored = restore(&pkg.tree, pkg.root, &RestoreOptions::default()).unwrap();

    let texts: Vec<_> = restored.tokens().iter().map(|t| t.text.to_string()).collect();
    assert_eq!(texts, vec!["package", "p", "package", "p"]);
    assert!(restored.annotations().is_empty());
}

#[test]
fn test_without_symbols_drops_scope_and_imports() {
    let pkg = two_files();
    let options = RestoreOptions::default().without_symbols();
    let restored = restore(&pkg.tree, pkg.root, &options).unwrap();

    let Some(PNode::Package {
        scope,
        imports,
        files,
        ..
    }) = restored.root_node()
    else {
        panic!("expected Package root");
    };
    assert_eq!(*scope, None);
    assert!(imports.is_empty());
    assert_eq!(files.len(), 2);
    assert_eq!(restored.object_count(), 0);
    assert_eq!(restored.scope_count(), 0);
}
