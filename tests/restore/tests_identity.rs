//! Shared identity: subtrees and symbols restored exactly once.

use dectree::positioned::{PDeclRef, PNode};
use dectree::{
    Annotation, DecoratedTree, Decorations, LitKind, Node, RestoreError, RestoreOptions, Restorer,
    Slot, TextSize, Token, restore,
};

use crate::helpers::assertions::{assert_contiguous, restored_as};
use crate::helpers::fixtures::hello_file;
use crate::helpers::printer::print;

#[test]
fn test_file_imports_and_unresolved_share_identity() {
    let hello = hello_file();
    let restored = restore(&hello.tree, hello.root, &RestoreOptions::default()).unwrap();

    let Some(PNode::File {
        imports,
        unresolved,
        scope,
        ..
    }) = restored.root_node()
    else {
        panic!("expected File root");
    };
    assert_eq!(imports, &vec![restored_as(&restored, hello.import_spec)]);
    assert_eq!(unresolved, &vec![restored_as(&restored, hello.fmt_use)]);
    assert_eq!(
        restored.origins().filter(|(_, o)| *o == hello.fmt_use).count(),
        1
    );
    assert!(scope.is_some());
}

#[test]
fn test_object_decl_points_at_restored_func() {
    let hello = hello_file();
    let restored = restore(&hello.tree, hello.root, &RestoreOptions::default()).unwrap();

    let Some(PNode::File {
        scope: Some(scope), ..
    }) = restored.root_node()
    else {
        panic!("expected File root with a scope");
    };
    let main = restored.scope(*scope).unwrap().lookup("main").unwrap();
    assert_eq!(
        restored.object(main).unwrap().decl,
        Some(PDeclRef::Node(restored_as(&restored, hello.func_decl)))
    );
}

#[test]
fn test_shared_subtree_restored_once() {
    // x * x where both operands are the same decorated node
    let mut tree = DecoratedTree::new();
    let x = tree.ident("x");
    let root = tree.alloc(Node::BinaryExpr {
        x,
        op: Token::Mul,
        y: x,
    });

    let restored = restore(&tree, root, &RestoreOptions::default()).unwrap();

    assert_eq!(restored.len(), 2);
    let Some(PNode::BinaryExpr { x: left, y: right, .. }) = restored.root_node() else {
        panic!("expected BinaryExpr root");
    };
    assert_eq!(left, right);
    assert_eq!(restored.end(), TextSize::new(3));
}

#[test]
fn test_restorer_exactly_once() {
    let hello = hello_file();
    let mut restorer = Restorer::new(&hello.tree, RestoreOptions::default());

    let first = restorer.restore_node(hello.root).unwrap();
    let end = restorer.offset();
    let again = restorer.restore_node(hello.root).unwrap();
    let inner = restorer.restore_node(hello.func_decl).unwrap();

    assert_eq!(first, again);
    assert_eq!(restorer.offset(), end);
    let restored = restorer.finish(first).unwrap();
    assert_eq!(inner, restored_as(&restored, hello.func_decl));
    assert_eq!(restored.len(), hello.tree.len());
}

#[test]
fn test_monotonic_token_offsets() {
    let hello = hello_file();
    let restored = restore(&hello.tree, hello.root, &RestoreOptions::default()).unwrap();

    let tokens = restored.tokens();
    assert!(tokens.windows(2).all(|pair| pair[0].offset < pair[1].offset));
    assert!(tokens.iter().all(|token| token.offset < restored.end()));
}

#[test]
fn test_unshared_file_import_books_nothing() {
    // package main // end, with an import spec that no declaration holds
    let mut tree = DecoratedTree::new();
    let path = tree.lit(LitKind::String, "\"os\"");
    let stray = tree.alloc(Node::ImportSpec { name: None, path });
    let name = tree.ident("main");
    let root = tree.alloc_decorated(
        Node::File {
            name,
            decls: Vec::new(),
            scope: None,
            imports: vec![stray],
            unresolved: Vec::new(),
        },
        Decorations::new().with(Slot::End, Annotation::trailing("// end")),
    );

    let restored = restore(&tree, root, &RestoreOptions::default()).unwrap();

    let Some(PNode::File { imports, .. }) = restored.root_node() else {
        panic!("expected File root");
    };
    assert!(imports.is_empty());
    assert!(restored.origins().all(|(_, origin)| origin != stray && origin != path));
    assert_eq!(print(&restored), "package main // end");
    assert_contiguous(&restored, TextSize::new(1));
    assert_eq!(restored.end(), TextSize::new(18));
}

#[test]
fn test_file_link_of_wrong_kind_is_rejected() {
    let mut tree = DecoratedTree::new();
    let name = tree.ident("main");
    let root = tree.alloc(Node::File {
        name,
        decls: Vec::new(),
        scope: None,
        imports: vec![name],
        unresolved: Vec::new(),
    });

    let err = restore(&tree, root, &RestoreOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        RestoreError::UnexpectedChild { field: "imports", .. }
    ));
}
