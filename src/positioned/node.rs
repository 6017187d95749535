//! Positioned node kinds, scopes and objects.

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::id::arena_id;
use crate::base::{LitKind, Token};
use crate::syntax::{ChanDir, Delim, NodeKind, ObjKind};

arena_id!(
    /// Identity of a node in a [`PositionedTree`](super::PositionedTree).
    PosId
);

arena_id!(
    /// Identity of a restored scope.
    PScopeId
);

arena_id!(
    /// Identity of a restored object.
    PObjectId
);

/// A list whose elements are separated by implicit commas.
///
/// `commas[i]` is the offset of the comma booked after `items[i]`, so there
/// is always one comma fewer than items (none for lists that separate their
/// elements implicitly).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommaList {
    pub items: Vec<PosId>,
    pub commas: Vec<TextSize>,
}

impl CommaList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A construct with resolved token offsets.
///
/// Token offsets of optional tokens are `Option`s that are `Some` exactly
/// when the token was booked.
#[derive(Debug, Clone, PartialEq)]
pub enum PNode {
    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    BadExpr {
        from: TextSize,
        to: TextSize,
    },
    BasicLit {
        value_pos: TextSize,
        kind: LitKind,
        value: SmolStr,
    },
    BinaryExpr {
        x: PosId,
        op_pos: TextSize,
        op: Token,
        y: PosId,
    },
    CallExpr {
        fun: PosId,
        lparen: TextSize,
        args: CommaList,
        ellipsis: Option<TextSize>,
        rparen: TextSize,
    },
    CompositeLit {
        ty: Option<PosId>,
        lbrace: TextSize,
        elts: CommaList,
        rbrace: TextSize,
        incomplete: bool,
    },
    Ellipsis {
        ellipsis: TextSize,
        elt: Option<PosId>,
    },
    FuncLit {
        ty: PosId,
        body: PosId,
    },
    Ident {
        name_pos: TextSize,
        name: SmolStr,
        obj: Option<PObjectId>,
    },
    IndexExpr {
        x: PosId,
        lbrack: TextSize,
        index: PosId,
        rbrack: TextSize,
    },
    KeyValueExpr {
        key: PosId,
        colon: TextSize,
        value: PosId,
    },
    ParenExpr {
        lparen: TextSize,
        x: PosId,
        rparen: TextSize,
    },
    SelectorExpr {
        x: PosId,
        period: TextSize,
        sel: PosId,
    },
    SliceExpr {
        x: PosId,
        lbrack: TextSize,
        low: Option<PosId>,
        colon1: TextSize,
        high: Option<PosId>,
        colon2: Option<TextSize>,
        max: Option<PosId>,
        rbrack: TextSize,
        slice3: bool,
    },
    StarExpr {
        star: TextSize,
        x: PosId,
    },
    TypeAssertExpr {
        x: PosId,
        period: TextSize,
        lparen: TextSize,
        ty: Option<PosId>,
        /// Offset of the `type` keyword when `ty` is absent.
        type_kw: Option<TextSize>,
        rparen: TextSize,
    },
    UnaryExpr {
        op_pos: TextSize,
        op: Token,
        x: PosId,
    },

    // =========================================================================
    // TYPES
    // =========================================================================
    ArrayType {
        lbrack: TextSize,
        len: Option<PosId>,
        rbrack: TextSize,
        elt: PosId,
    },
    ChanType {
        /// Offset of the first token: `<-` for receive-only channels, `chan` otherwise.
        begin: TextSize,
        /// The `chan` keyword following a leading `<-`.
        chan: Option<TextSize>,
        /// The `<-` following `chan` in send-only channels.
        arrow: Option<TextSize>,
        dir: ChanDir,
        value: PosId,
    },
    FuncType {
        func: Option<TextSize>,
        params: PosId,
        results: Option<PosId>,
    },
    InterfaceType {
        interface: TextSize,
        methods: PosId,
        incomplete: bool,
    },
    MapType {
        map: TextSize,
        lbrack: TextSize,
        key: PosId,
        rbrack: TextSize,
        value: PosId,
    },
    StructType {
        struct_pos: TextSize,
        fields: PosId,
        incomplete: bool,
    },

    // =========================================================================
    // STATEMENTS
    // =========================================================================
    AssignStmt {
        lhs: CommaList,
        tok_pos: TextSize,
        tok: Token,
        rhs: CommaList,
    },
    BadStmt {
        from: TextSize,
        to: TextSize,
    },
    BlockStmt {
        lbrace: TextSize,
        list: Vec<PosId>,
        rbrace: TextSize,
    },
    BranchStmt {
        tok_pos: TextSize,
        tok: Token,
        label: Option<PosId>,
    },
    CaseClause {
        /// Offset of `case`, or of `default` when `list` is empty.
        case_pos: TextSize,
        list: CommaList,
        colon: TextSize,
        body: Vec<PosId>,
    },
    CommClause {
        /// Offset of `case`, or of `default` when `comm` is absent.
        case_pos: TextSize,
        comm: Option<PosId>,
        colon: TextSize,
        body: Vec<PosId>,
    },
    DeclStmt {
        decl: PosId,
    },
    DeferStmt {
        defer: TextSize,
        call: PosId,
    },
    EmptyStmt {
        semicolon: TextSize,
        implicit: bool,
    },
    ExprStmt {
        x: PosId,
    },
    ForStmt {
        for_pos: TextSize,
        init: Option<PosId>,
        init_semi: Option<TextSize>,
        cond: Option<PosId>,
        cond_semi: Option<TextSize>,
        post: Option<PosId>,
        body: PosId,
    },
    GoStmt {
        go: TextSize,
        call: PosId,
    },
    IfStmt {
        if_pos: TextSize,
        init: Option<PosId>,
        init_semi: Option<TextSize>,
        cond: PosId,
        body: PosId,
        else_pos: Option<TextSize>,
        els: Option<PosId>,
    },
    IncDecStmt {
        x: PosId,
        tok_pos: TextSize,
        tok: Token,
    },
    LabeledStmt {
        label: PosId,
        colon: TextSize,
        stmt: PosId,
    },
    RangeStmt {
        for_pos: TextSize,
        key: Option<PosId>,
        comma: Option<TextSize>,
        value: Option<PosId>,
        tok_pos: Option<TextSize>,
        tok: Option<Token>,
        range: TextSize,
        x: PosId,
        body: PosId,
    },
    ReturnStmt {
        return_pos: TextSize,
        results: CommaList,
    },
    SelectStmt {
        select: TextSize,
        body: PosId,
    },
    SendStmt {
        chan: PosId,
        arrow: TextSize,
        value: PosId,
    },
    SwitchStmt {
        switch: TextSize,
        init: Option<PosId>,
        init_semi: Option<TextSize>,
        tag: Option<PosId>,
        body: PosId,
    },
    TypeSwitchStmt {
        switch: TextSize,
        init: Option<PosId>,
        init_semi: Option<TextSize>,
        assign: PosId,
        body: PosId,
    },

    // =========================================================================
    // DECLARATIONS AND SPECS
    // =========================================================================
    BadDecl {
        from: TextSize,
        to: TextSize,
    },
    FuncDecl {
        func: TextSize,
        recv: Option<PosId>,
        name: PosId,
        params: PosId,
        results: Option<PosId>,
        body: Option<PosId>,
    },
    GenDecl {
        tok_pos: TextSize,
        tok: Token,
        lparen: Option<TextSize>,
        specs: Vec<PosId>,
        rparen: Option<TextSize>,
    },
    ImportSpec {
        name: Option<PosId>,
        path: PosId,
    },
    TypeSpec {
        name: PosId,
        assign: Option<TextSize>,
        ty: PosId,
    },
    ValueSpec {
        names: CommaList,
        ty: Option<PosId>,
        assign: Option<TextSize>,
        values: CommaList,
    },

    // =========================================================================
    // FIELDS, FILES AND PACKAGES
    // =========================================================================
    Field {
        names: CommaList,
        ty: PosId,
        tag: Option<PosId>,
    },
    FieldList {
        delim: Delim,
        opening: Option<TextSize>,
        list: CommaList,
        closing: Option<TextSize>,
    },
    File {
        package: TextSize,
        name: PosId,
        decls: Vec<PosId>,
        scope: Option<PScopeId>,
        imports: Vec<PosId>,
        unresolved: Vec<PosId>,
    },
    Package {
        name: SmolStr,
        scope: Option<PScopeId>,
        imports: IndexMap<SmolStr, PObjectId>,
        files: IndexMap<SmolStr, PosId>,
    },
}

impl PNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            PNode::ArrayType { .. } => NodeKind::ArrayType,
            PNode::AssignStmt { .. } => NodeKind::AssignStmt,
            PNode::BadDecl { .. } => NodeKind::BadDecl,
            PNode::BadExpr { .. } => NodeKind::BadExpr,
            PNode::BadStmt { .. } => NodeKind::BadStmt,
            PNode::BasicLit { .. } => NodeKind::BasicLit,
            PNode::BinaryExpr { .. } => NodeKind::BinaryExpr,
            PNode::BlockStmt { .. } => NodeKind::BlockStmt,
            PNode::BranchStmt { .. } => NodeKind::BranchStmt,
            PNode::CallExpr { .. } => NodeKind::CallExpr,
            PNode::CaseClause { .. } => NodeKind::CaseClause,
            PNode::ChanType { .. } => NodeKind::ChanType,
            PNode::CommClause { .. } => NodeKind::CommClause,
            PNode::CompositeLit { .. } => NodeKind::CompositeLit,
            PNode::DeclStmt { .. } => NodeKind::DeclStmt,
            PNode::DeferStmt { .. } => NodeKind::DeferStmt,
            PNode::Ellipsis { .. } => NodeKind::Ellipsis,
            PNode::EmptyStmt { .. } => NodeKind::EmptyStmt,
            PNode::ExprStmt { .. } => NodeKind::ExprStmt,
            PNode::Field { .. } => NodeKind::Field,
            PNode::FieldList { .. } => NodeKind::FieldList,
            PNode::File { .. } => NodeKind::File,
            PNode::ForStmt { .. } => NodeKind::ForStmt,
            PNode::FuncDecl { .. } => NodeKind::FuncDecl,
            PNode::FuncLit { .. } => NodeKind::FuncLit,
            PNode::FuncType { .. } => NodeKind::FuncType,
            PNode::GenDecl { .. } => NodeKind::GenDecl,
            PNode::GoStmt { .. } => NodeKind::GoStmt,
            PNode::Ident { .. } => NodeKind::Ident,
            PNode::IfStmt { .. } => NodeKind::IfStmt,
            PNode::ImportSpec { .. } => NodeKind::ImportSpec,
            PNode::IncDecStmt { .. } => NodeKind::IncDecStmt,
            PNode::IndexExpr { .. } => NodeKind::IndexExpr,
            PNode::InterfaceType { .. } => NodeKind::InterfaceType,
            PNode::KeyValueExpr { .. } => NodeKind::KeyValueExpr,
            PNode::LabeledStmt { .. } => NodeKind::LabeledStmt,
            PNode::MapType { .. } => NodeKind::MapType,
            PNode::Package { .. } => NodeKind::Package,
            PNode::ParenExpr { .. } => NodeKind::ParenExpr,
            PNode::RangeStmt { .. } => NodeKind::RangeStmt,
            PNode::ReturnStmt { .. } => NodeKind::ReturnStmt,
            PNode::SelectStmt { .. } => NodeKind::SelectStmt,
            PNode::SelectorExpr { .. } => NodeKind::SelectorExpr,
            PNode::SendStmt { .. } => NodeKind::SendStmt,
            PNode::SliceExpr { .. } => NodeKind::SliceExpr,
            PNode::StarExpr { .. } => NodeKind::StarExpr,
            PNode::StructType { .. } => NodeKind::StructType,
            PNode::SwitchStmt { .. } => NodeKind::SwitchStmt,
            PNode::TypeAssertExpr { .. } => NodeKind::TypeAssertExpr,
            PNode::TypeSpec { .. } => NodeKind::TypeSpec,
            PNode::TypeSwitchStmt { .. } => NodeKind::TypeSwitchStmt,
            PNode::UnaryExpr { .. } => NodeKind::UnaryExpr,
            PNode::ValueSpec { .. } => NodeKind::ValueSpec,
        }
    }

    /// Child nodes in source order.
    ///
    /// File imports and unresolved idents are not children: they are
    /// references to nodes that already occur under the file's declarations.
    pub fn children(&self) -> Vec<PosId> {
        let mut out = Vec::new();
        match self {
            PNode::BadExpr { .. }
            | PNode::BadStmt { .. }
            | PNode::BadDecl { .. }
            | PNode::BasicLit { .. }
            | PNode::Ident { .. }
            | PNode::EmptyStmt { .. } => {}
            PNode::BinaryExpr { x, y, .. } => out.extend([*x, *y]),
            PNode::CallExpr { fun, args, .. } => {
                out.push(*fun);
                out.extend(&args.items);
            }
            PNode::CompositeLit { ty, elts, .. } => {
                out.extend(*ty);
                out.extend(&elts.items);
            }
            PNode::Ellipsis { elt, .. } => out.extend(*elt),
            PNode::FuncLit { ty, body } => out.extend([*ty, *body]),
            PNode::IndexExpr { x, index, .. } => out.extend([*x, *index]),
            PNode::KeyValueExpr { key, value, .. } => out.extend([*key, *value]),
            PNode::ParenExpr { x, .. }
            | PNode::StarExpr { x, .. }
            | PNode::UnaryExpr { x, .. }
            | PNode::ExprStmt { x }
            | PNode::IncDecStmt { x, .. } => out.push(*x),
            PNode::SelectorExpr { x, sel, .. } => out.extend([*x, *sel]),
            PNode::SliceExpr {
                x, low, high, max, ..
            } => {
                out.push(*x);
                out.extend([*low, *high, *max].into_iter().flatten());
            }
            PNode::TypeAssertExpr { x, ty, .. } => {
                out.push(*x);
                out.extend(*ty);
            }
            PNode::ArrayType { len, elt, .. } => {
                out.extend(*len);
                out.push(*elt);
            }
            PNode::ChanType { value, .. } => out.push(*value),
            PNode::FuncType {
                params, results, ..
            } => {
                out.push(*params);
                out.extend(*results);
            }
            PNode::InterfaceType { methods, .. } => out.push(*methods),
            PNode::MapType { key, value, .. } => out.extend([*key, *value]),
            PNode::StructType { fields, .. } => out.push(*fields),
            PNode::AssignStmt { lhs, rhs, .. } => {
                out.extend(&lhs.items);
                out.extend(&rhs.items);
            }
            PNode::BlockStmt { list, .. } => out.extend(list),
            PNode::BranchStmt { label, .. } => out.extend(*label),
            PNode::CaseClause { list, body, .. } => {
                out.extend(&list.items);
                out.extend(body);
            }
            PNode::CommClause { comm, body, .. } => {
                out.extend(*comm);
                out.extend(body);
            }
            PNode::DeclStmt { decl } => out.push(*decl),
            PNode::DeferStmt { call, .. } | PNode::GoStmt { call, .. } => out.push(*call),
            PNode::ForStmt {
                init,
                cond,
                post,
                body,
                ..
            } => {
                out.extend([*init, *cond, *post].into_iter().flatten());
                out.push(*body);
            }
            PNode::IfStmt {
                init,
                cond,
                body,
                els,
                ..
            } => {
                out.extend(*init);
                out.extend([*cond, *body]);
                out.extend(*els);
            }
            PNode::LabeledStmt { label, stmt, .. } => out.extend([*label, *stmt]),
            PNode::RangeStmt {
                key,
                value,
                x,
                body,
                ..
            } => {
                out.extend([*key, *value].into_iter().flatten());
                out.extend([*x, *body]);
            }
            PNode::ReturnStmt { results, .. } => out.extend(&results.items),
            PNode::SelectStmt { body, .. } => out.push(*body),
            PNode::SendStmt { chan, value, .. } => out.extend([*chan, *value]),
            PNode::SwitchStmt {
                init, tag, body, ..
            } => {
                out.extend([*init, *tag].into_iter().flatten());
                out.push(*body);
            }
            PNode::TypeSwitchStmt {
                init, assign, body, ..
            } => {
                out.extend(*init);
                out.extend([*assign, *body]);
            }
            PNode::FuncDecl {
                recv,
                name,
                params,
                results,
                body,
                ..
            } => {
                out.extend(*recv);
                out.extend([*name, *params]);
                out.extend([*results, *body].into_iter().flatten());
            }
            PNode::GenDecl { specs, .. } => out.extend(specs),
            PNode::ImportSpec { name, path } => {
                out.extend(*name);
                out.push(*path);
            }
            PNode::TypeSpec { name, ty, .. } => out.extend([*name, *ty]),
            PNode::ValueSpec {
                names, ty, values, ..
            } => {
                out.extend(&names.items);
                out.extend(*ty);
                out.extend(&values.items);
            }
            PNode::Field { names, ty, tag } => {
                out.extend(&names.items);
                out.push(*ty);
                out.extend(*tag);
            }
            PNode::FieldList { list, .. } => out.extend(&list.items),
            PNode::File { name, decls, .. } => {
                out.push(*name);
                out.extend(decls);
            }
            PNode::Package { files, .. } => out.extend(files.values()),
        }
        out
    }
}

/// A restored scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PScope {
    pub outer: Option<PScopeId>,
    pub objects: IndexMap<SmolStr, PObjectId>,
}

impl PScope {
    pub fn lookup(&self, name: &str) -> Option<PObjectId> {
        self.objects.get(name).copied()
    }
}

/// Restored back-reference from an object to its declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PDeclRef {
    Node(PosId),
    Scope(PScopeId),
}

/// Restored object payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PObjectData {
    Int(i64),
    Scope(PScopeId),
}

/// A restored declaration identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PObject {
    pub kind: ObjKind,
    pub name: SmolStr,
    pub decl: Option<PDeclRef>,
    pub data: Option<PObjectData>,
}
