//! Decorated tree fixtures.

use dectree::syntax::{DeclRef, ObjKind, Object, Scope};
use dectree::{Annotation, DecoratedTree, Decorations, LitKind, Node, NodeId, Slot, Token};

/// A small file with a comment and blank-line hints.
pub struct HelloFile {
    pub tree: DecoratedTree,
    pub root: NodeId,
    pub func_decl: NodeId,
    pub fmt_use: NodeId,
    pub import_spec: NodeId,
}

/// Canonical print of [`hello_file`].
pub const HELLO_PRINTED: &str =
    "package main\nimport \"fmt\"\nfunc main ( ) { // greet\nfmt . Println ( \"hi\" , name ) }";

/// ```text
/// package main
/// import "fmt"
/// func main() {
///     // greet
///     fmt.Println("hi", name)
/// }
/// ```
pub fn hello_file() -> HelloFile {
    let mut tree = DecoratedTree::new();
    let file_scope = tree.add_scope(Scope::new(None));
    let main_obj = tree.add_object(Object::new(ObjKind::Fun, "main"));
    let name_obj = tree.add_object(Object::new(ObjKind::Var, "name"));
    if let Some(scope) = tree.scope_mut(file_scope) {
        scope.insert("main", main_obj);
    }

    let path = tree.lit(LitKind::String, "\"fmt\"");
    let import_spec = tree.alloc(Node::ImportSpec { name: None, path });
    let import = tree.alloc_decorated(
        Node::GenDecl {
            tok: Token::Import,
            lparen: false,
            specs: vec![import_spec],
            rparen: false,
        },
        Decorations::new().with(Slot::End, Annotation::newline()),
    );

    let fmt_use = tree.ident("fmt");
    let println = tree.ident("Println");
    let fun = tree.alloc(Node::SelectorExpr {
        x: fmt_use,
        sel: println,
    });
    let hi = tree.lit(LitKind::String, "\"hi\"");
    let name = tree.ident_of("name", name_obj);
    let call = tree.alloc(Node::CallExpr {
        fun,
        args: vec![hi, name],
        ellipsis: false,
    });
    let stmt = tree.alloc_decorated(
        Node::ExprStmt { x: call },
        Decorations::new()
            .with(Slot::Start, Annotation::own_line("// greet"))
            .with(Slot::Start, Annotation::newline()),
    );
    let body = tree.block(vec![stmt]);
    let main_name = tree.ident_of("main", main_obj);
    let params = tree.params(Vec::new());
    let func_decl = tree.alloc(Node::FuncDecl {
        recv: None,
        name: main_name,
        params,
        results: None,
        body: Some(body),
    });
    if let Some(object) = tree.object_mut(main_obj) {
        object.decl = Some(DeclRef::Node(func_decl));
    }

    let file_name = tree.ident("main");
    let root = tree.alloc_decorated(
        Node::File {
            name: file_name,
            decls: vec![import, func_decl],
            scope: Some(file_scope),
            imports: vec![import_spec],
            unresolved: vec![fmt_use],
        },
        Decorations::new().with(Slot::AfterName, Annotation::newline()),
    );

    HelloFile {
        tree,
        root,
        func_decl,
        fmt_use,
        import_spec,
    }
}
