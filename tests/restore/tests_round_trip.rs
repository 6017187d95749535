//! Round-trip tests: restored trees print back to their source.

use dectree::syntax::{ChanDir, Delim};
use dectree::{DecoratedTree, LitKind, Node, NodeId, RestoreOptions, TextSize, Token, restore};

use crate::helpers::assertions::{assert_annotations_monotonic, assert_contiguous};
use crate::helpers::fixtures::{HELLO_PRINTED, hello_file};
use crate::helpers::printer::print;

fn assert_prints(tree: &DecoratedTree, root: NodeId, expected: &str) {
    let restored = restore(tree, root, &RestoreOptions::default()).unwrap();
    assert_eq!(print(&restored), expected);
    assert_contiguous(&restored, TextSize::new(1));
}

fn call(tree: &mut DecoratedTree, name: &str, args: Vec<NodeId>) -> NodeId {
    let fun = tree.ident(name);
    tree.alloc(Node::CallExpr {
        fun,
        args,
        ellipsis: false,
    })
}

#[test]
fn test_hello_file_round_trip() {
    let hello = hello_file();
    let restored = restore(&hello.tree, hello.root, &RestoreOptions::default()).unwrap();

    assert_eq!(print(&restored), HELLO_PRINTED);
    assert_contiguous(&restored, TextSize::new(1));
    assert_annotations_monotonic(&restored);
}

#[test]
fn test_switch_with_init_and_default() {
    let mut tree = DecoratedTree::new();
    let x = tree.ident("x");
    let f = call(&mut tree, "f", Vec::new());
    let init = tree.alloc(Node::AssignStmt {
        lhs: vec![x],
        tok: Token::Define,
        rhs: vec![f],
    });
    let tag = tree.ident("x");
    let one = tree.lit(LitKind::Int, "1");
    let two = tree.lit(LitKind::Int, "2");
    let ret = tree.alloc(Node::ReturnStmt {
        results: Vec::new(),
    });
    let case = tree.alloc(Node::CaseClause {
        list: vec![one, two],
        body: vec![ret],
    });
    let default = tree.alloc(Node::CaseClause {
        list: Vec::new(),
        body: Vec::new(),
    });
    let body = tree.block(vec![case, default]);
    let root = tree.alloc(Node::SwitchStmt {
        init: Some(init),
        tag: Some(tag),
        body,
    });

    assert_prints(
        &tree,
        root,
        "switch x := f ( ) ; x { case 1 , 2 : return default : }",
    );
}

#[test]
fn test_range_with_key_and_value() {
    let mut tree = DecoratedTree::new();
    let k = tree.ident("k");
    let v = tree.ident("v");
    let m = tree.ident("m");
    let body = tree.block(Vec::new());
    let root = tree.alloc(Node::RangeStmt {
        key: Some(k),
        value: Some(v),
        tok: Some(Token::Define),
        x: m,
        body,
    });

    assert_prints(&tree, root, "for k , v := range m { }");
}

#[test]
fn test_bare_range() {
    let mut tree = DecoratedTree::new();
    let ch = tree.ident("ch");
    let body = tree.block(Vec::new());
    let root = tree.alloc(Node::RangeStmt {
        key: None,
        value: None,
        tok: None,
        x: ch,
        body,
    });

    assert_prints(&tree, root, "for range ch { }");
}

#[test]
fn test_select_with_send_case() {
    let mut tree = DecoratedTree::new();
    let ch = tree.ident("ch");
    let one = tree.lit(LitKind::Int, "1");
    let send = tree.alloc(Node::SendStmt {
        chan: ch,
        value: one,
    });
    let clause = tree.alloc(Node::CommClause {
        comm: Some(send),
        body: Vec::new(),
    });
    let body = tree.block(vec![clause]);
    let root = tree.alloc(Node::SelectStmt { body });

    assert_prints(&tree, root, "select { case ch <- 1 : }");
}

#[test]
fn test_type_decl_with_struct_and_map() {
    let mut tree = DecoratedTree::new();
    let a = tree.ident("a");
    let key = tree.ident("string");
    let value = tree.ident("int");
    let map = tree.alloc(Node::MapType { key, value });
    let tag = tree.lit(LitKind::String, "`json:\"a\"`");
    let field = tree.alloc(Node::Field {
        names: vec![a],
        ty: map,
        tag: Some(tag),
    });
    let fields = tree.alloc(Node::FieldList {
        delim: Delim::Brace,
        opening: true,
        list: vec![field],
        closing: true,
    });
    let strukt = tree.alloc(Node::StructType {
        fields,
        incomplete: false,
    });
    let name = tree.ident("T");
    let spec = tree.alloc(Node::TypeSpec {
        name,
        assign: false,
        ty: strukt,
    });
    let root = tree.alloc(Node::GenDecl {
        tok: Token::Type,
        lparen: false,
        specs: vec![spec],
        rparen: false,
    });

    assert_prints(
        &tree,
        root,
        "type T struct { a map [ string ] int `json:\"a\"` }",
    );
}

#[test]
fn test_grouped_var_decl() {
    let mut tree = DecoratedTree::new();
    let a = tree.ident("a");
    let b = tree.ident("b");
    let int = tree.ident("int");
    let one = tree.lit(LitKind::Int, "1");
    let two = tree.lit(LitKind::Int, "2");
    let spec = tree.alloc(Node::ValueSpec {
        names: vec![a, b],
        ty: Some(int),
        values: vec![one, two],
    });
    let root = tree.alloc(Node::GenDecl {
        tok: Token::Var,
        lparen: true,
        specs: vec![spec],
        rparen: true,
    });

    assert_prints(&tree, root, "var ( a , b int = 1 , 2 )");
}

#[test]
fn test_labeled_loop_with_break() {
    let mut tree = DecoratedTree::new();
    let target = tree.ident("L");
    let brk = tree.alloc(Node::BranchStmt {
        tok: Token::Break,
        label: Some(target),
    });
    let body = tree.block(vec![brk]);
    let for_stmt = tree.alloc(Node::ForStmt {
        init: None,
        cond: None,
        post: None,
        body,
    });
    let label = tree.ident("L");
    let root = tree.alloc(Node::LabeledStmt {
        label,
        stmt: for_stmt,
    });

    assert_prints(&tree, root, "L : for { break L }");
}

#[test]
fn test_three_clause_for() {
    let mut tree = DecoratedTree::new();
    let i = tree.ident("i");
    let zero = tree.lit(LitKind::Int, "0");
    let init = tree.alloc(Node::AssignStmt {
        lhs: vec![i],
        tok: Token::Define,
        rhs: vec![zero],
    });
    let i2 = tree.ident("i");
    let n = tree.ident("n");
    let cond = tree.alloc(Node::BinaryExpr {
        x: i2,
        op: Token::Lss,
        y: n,
    });
    let i3 = tree.ident("i");
    let post = tree.alloc(Node::IncDecStmt {
        x: i3,
        tok: Token::Inc,
    });
    let body = tree.block(Vec::new());
    let root = tree.alloc(Node::ForStmt {
        init: Some(init),
        cond: Some(cond),
        post: Some(post),
        body,
    });

    assert_prints(&tree, root, "for i := 0 ; i < n ; i ++ { }");
}

#[test]
fn test_if_else_if_chain() {
    let mut tree = DecoratedTree::new();
    let err = tree.ident("err");
    let g = call(&mut tree, "g", Vec::new());
    let init = tree.alloc(Node::AssignStmt {
        lhs: vec![err],
        tok: Token::Define,
        rhs: vec![g],
    });
    let err2 = tree.ident("err");
    let nil = tree.ident("nil");
    let cond = tree.alloc(Node::BinaryExpr {
        x: err2,
        op: Token::Neq,
        y: nil,
    });
    let ok = tree.ident("ok");
    let inner_body = tree.block(Vec::new());
    let inner = tree.alloc(Node::IfStmt {
        init: None,
        cond: ok,
        body: inner_body,
        els: None,
    });
    let body = tree.block(Vec::new());
    let root = tree.alloc(Node::IfStmt {
        init: Some(init),
        cond,
        body,
        els: Some(inner),
    });

    assert_prints(
        &tree,
        root,
        "if err := g ( ) ; err != nil { } else if ok { }",
    );
}

#[test]
fn test_deferred_func_literal() {
    let mut tree = DecoratedTree::new();
    let params = tree.params(Vec::new());
    let ty = tree.alloc(Node::FuncType {
        func: true,
        params,
        results: None,
    });
    let body = tree.block(Vec::new());
    let lit = tree.alloc(Node::FuncLit { ty, body });
    let call = tree.alloc(Node::CallExpr {
        fun: lit,
        args: Vec::new(),
        ellipsis: false,
    });
    let root = tree.alloc(Node::DeferStmt { call });

    assert_prints(&tree, root, "defer func ( ) { } ( )");
}

#[test]
fn test_composite_literal_with_keys() {
    let mut tree = DecoratedTree::new();
    let elt = tree.ident("int");
    let ty = tree.alloc(Node::ArrayType { len: None, elt });
    let k1 = tree.lit(LitKind::Int, "0");
    let v1 = tree.lit(LitKind::Int, "7");
    let kv = tree.alloc(Node::KeyValueExpr { key: k1, value: v1 });
    let v2 = tree.lit(LitKind::Int, "8");
    let root = tree.alloc(Node::CompositeLit {
        ty: Some(ty),
        elts: vec![kv, v2],
        incomplete: false,
    });

    assert_prints(&tree, root, "[ ] int { 0 : 7 , 8 }");
}

#[test]
fn test_expression_forms() {
    // *p = (a[i] + -b[1:2])
    let mut tree = DecoratedTree::new();
    let p = tree.ident("p");
    let star = tree.alloc(Node::StarExpr { x: p });
    let a = tree.ident("a");
    let i = tree.ident("i");
    let index = tree.alloc(Node::IndexExpr { x: a, index: i });
    let b = tree.ident("b");
    let low = tree.lit(LitKind::Int, "1");
    let high = tree.lit(LitKind::Int, "2");
    let slice = tree.alloc(Node::SliceExpr {
        x: b,
        low: Some(low),
        high: Some(high),
        max: None,
        slice3: false,
    });
    let neg = tree.alloc(Node::UnaryExpr {
        op: Token::Sub,
        x: slice,
    });
    let sum = tree.alloc(Node::BinaryExpr {
        x: index,
        op: Token::Add,
        y: neg,
    });
    let paren = tree.alloc(Node::ParenExpr { x: sum });
    let root = tree.alloc(Node::AssignStmt {
        lhs: vec![star],
        tok: Token::Assign,
        rhs: vec![paren],
    });

    assert_prints(&tree, root, "* p = ( a [ i ] + - b [ 1 : 2 ] )");
}

#[test]
fn test_method_with_receiver_and_results() {
    let mut tree = DecoratedTree::new();
    let r = tree.ident("r");
    let recv_ty = tree.ident("R");
    let recv_field = tree.alloc(Node::Field {
        names: vec![r],
        ty: recv_ty,
        tag: None,
    });
    let recv = tree.params(vec![recv_field]);
    let name = tree.ident("Len");
    let params = tree.params(Vec::new());
    let int = tree.ident("int");
    let result = tree.alloc(Node::Field {
        names: Vec::new(),
        ty: int,
        tag: None,
    });
    let results = tree.alloc(Node::FieldList {
        delim: Delim::Paren,
        opening: false,
        list: vec![result],
        closing: false,
    });
    let root = tree.alloc(Node::FuncDecl {
        recv: Some(recv),
        name,
        params,
        results: Some(results),
        body: None,
    });

    assert_prints(&tree, root, "func ( r R ) Len ( ) int");
}

#[test]
fn test_go_stmt_with_variadic_call() {
    let mut tree = DecoratedTree::new();
    let xs = tree.ident("xs");
    let fun = tree.ident("work");
    let call = tree.alloc(Node::CallExpr {
        fun,
        args: vec![xs],
        ellipsis: true,
    });
    let root = tree.alloc(Node::GoStmt { call });

    assert_prints(&tree, root, "go work ( xs ... )");
}

#[test]
fn test_interface_and_chan_types() {
    let mut tree = DecoratedTree::new();
    let name = tree.ident("Close");
    let params = tree.params(Vec::new());
    let method_ty = tree.alloc(Node::FuncType {
        func: false,
        params,
        results: None,
    });
    let method = tree.alloc(Node::Field {
        names: vec![name],
        ty: method_ty,
        tag: None,
    });
    let methods = tree.alloc(Node::FieldList {
        delim: Delim::Brace,
        opening: true,
        list: vec![method],
        closing: true,
    });
    let iface = tree.alloc(Node::InterfaceType {
        methods,
        incomplete: false,
    });
    let root = tree.alloc(Node::ChanType {
        dir: ChanDir::Recv,
        value: iface,
    });

    assert_prints(&tree, root, "<- chan interface { Close ( ) }");
}

#[test]
fn test_type_switch_with_init() {
    let mut tree = DecoratedTree::new();
    let x = tree.ident("x");
    let f = call(&mut tree, "f", Vec::new());
    let init = tree.alloc(Node::AssignStmt {
        lhs: vec![x],
        tok: Token::Define,
        rhs: vec![f],
    });
    let v = tree.ident("v");
    let guarded = tree.ident("x");
    let guard = tree.alloc(Node::TypeAssertExpr {
        x: guarded,
        ty: None,
    });
    let assign = tree.alloc(Node::AssignStmt {
        lhs: vec![v],
        tok: Token::Define,
        rhs: vec![guard],
    });
    let int = tree.ident("int");
    let case = tree.alloc(Node::CaseClause {
        list: vec![int],
        body: Vec::new(),
    });
    let default = tree.alloc(Node::CaseClause {
        list: Vec::new(),
        body: Vec::new(),
    });
    let body = tree.block(vec![case, default]);
    let root = tree.alloc(Node::TypeSwitchStmt {
        init: Some(init),
        assign,
        body,
    });

    assert_prints(
        &tree,
        root,
        "switch x := f ( ) ; v := x . ( type ) { case int : default : }",
    );
}

#[test]
fn test_array_literal_with_ellipsis_length() {
    let mut tree = DecoratedTree::new();
    let len = tree.alloc(Node::Ellipsis { elt: None });
    let int = tree.ident("int");
    let ty = tree.alloc(Node::ArrayType {
        len: Some(len),
        elt: int,
    });
    let one = tree.lit(LitKind::Int, "1");
    let two = tree.lit(LitKind::Int, "2");
    let root = tree.alloc(Node::CompositeLit {
        ty: Some(ty),
        elts: vec![one, two],
        incomplete: false,
    });

    assert_prints(&tree, root, "[ ... ] int { 1 , 2 }");
}

#[test]
fn test_variadic_parameter() {
    let mut tree = DecoratedTree::new();
    let args = tree.ident("args");
    let string = tree.ident("string");
    let variadic = tree.alloc(Node::Ellipsis { elt: Some(string) });
    let field = tree.alloc(Node::Field {
        names: vec![args],
        ty: variadic,
        tag: None,
    });
    let params = tree.params(vec![field]);
    let name = tree.ident("f");
    let root = tree.alloc(Node::FuncDecl {
        recv: None,
        name,
        params,
        results: None,
        body: None,
    });

    assert_prints(&tree, root, "func f ( args ... string )");
}
