//! Decorated node kinds.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::{ObjectId, ScopeId};
use crate::base::id::arena_id;
use crate::base::{LitKind, Token};

arena_id!(
    /// Identity of a decorated node in its [`DecoratedTree`](super::DecoratedTree).
    NodeId
);

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
    /// `chan T`
    Both,
}

/// Delimiters of a field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delim {
    /// Parameter and result lists; fields are separated by commas.
    #[default]
    Paren,
    /// Struct and interface bodies; fields are separated implicitly.
    Brace,
}

impl Delim {
    pub fn open(self) -> Token {
        match self {
            Delim::Paren => Token::LParen,
            Delim::Brace => Token::LBrace,
        }
    }

    pub fn close(self) -> Token {
        match self {
            Delim::Paren => Token::RParen,
            Delim::Brace => Token::RBrace,
        }
    }
}

/// A construct of the grammar with its semantic fields.
///
/// Required children are plain ids, optional ones are `Option`s and
/// repeated ones are `Vec`s. Optional tokens are governed by the boolean
/// flags next to them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    BadExpr {
        length: u32,
    },
    BasicLit {
        kind: LitKind,
        value: SmolStr,
    },
    BinaryExpr {
        x: NodeId,
        op: Token,
        y: NodeId,
    },
    CallExpr {
        fun: NodeId,
        args: Vec<NodeId>,
        ellipsis: bool,
    },
    CompositeLit {
        ty: Option<NodeId>,
        elts: Vec<NodeId>,
        incomplete: bool,
    },
    Ellipsis {
        elt: Option<NodeId>,
    },
    FuncLit {
        ty: NodeId,
        body: NodeId,
    },
    Ident {
        name: SmolStr,
        obj: Option<ObjectId>,
    },
    IndexExpr {
        x: NodeId,
        index: NodeId,
    },
    KeyValueExpr {
        key: NodeId,
        value: NodeId,
    },
    ParenExpr {
        x: NodeId,
    },
    SelectorExpr {
        x: NodeId,
        sel: NodeId,
    },
    SliceExpr {
        x: NodeId,
        low: Option<NodeId>,
        high: Option<NodeId>,
        max: Option<NodeId>,
        slice3: bool,
    },
    StarExpr {
        x: NodeId,
    },
    TypeAssertExpr {
        x: NodeId,
        /// `None` spells the `.(type)` form of a type switch guard.
        ty: Option<NodeId>,
    },
    UnaryExpr {
        op: Token,
        x: NodeId,
    },

    // =========================================================================
    // TYPES
    // =========================================================================
    ArrayType {
        /// `None` for slice types.
        len: Option<NodeId>,
        elt: NodeId,
    },
    ChanType {
        dir: ChanDir,
        value: NodeId,
    },
    FuncType {
        /// Whether the `func` keyword is spelled (it is not for interface methods).
        func: bool,
        params: NodeId,
        results: Option<NodeId>,
    },
    InterfaceType {
        methods: NodeId,
        incomplete: bool,
    },
    MapType {
        key: NodeId,
        value: NodeId,
    },
    StructType {
        fields: NodeId,
        incomplete: bool,
    },

    // =========================================================================
    // STATEMENTS
    // =========================================================================
    AssignStmt {
        lhs: Vec<NodeId>,
        tok: Token,
        rhs: Vec<NodeId>,
    },
    BadStmt {
        length: u32,
    },
    BlockStmt {
        list: Vec<NodeId>,
    },
    BranchStmt {
        tok: Token,
        label: Option<NodeId>,
    },
    CaseClause {
        /// Empty for the `default` clause.
        list: Vec<NodeId>,
        body: Vec<NodeId>,
    },
    CommClause {
        /// `None` for the `default` clause.
        comm: Option<NodeId>,
        body: Vec<NodeId>,
    },
    DeclStmt {
        decl: NodeId,
    },
    DeferStmt {
        call: NodeId,
    },
    EmptyStmt {
        /// An implicit statement books no `;`.
        implicit: bool,
    },
    ExprStmt {
        x: NodeId,
    },
    ForStmt {
        init: Option<NodeId>,
        cond: Option<NodeId>,
        post: Option<NodeId>,
        body: NodeId,
    },
    GoStmt {
        call: NodeId,
    },
    IfStmt {
        init: Option<NodeId>,
        cond: NodeId,
        body: NodeId,
        els: Option<NodeId>,
    },
    IncDecStmt {
        x: NodeId,
        tok: Token,
    },
    LabeledStmt {
        label: NodeId,
        stmt: NodeId,
    },
    RangeStmt {
        key: Option<NodeId>,
        value: Option<NodeId>,
        /// `None` for the `for range x` form.
        tok: Option<Token>,
        x: NodeId,
        body: NodeId,
    },
    ReturnStmt {
        results: Vec<NodeId>,
    },
    SelectStmt {
        body: NodeId,
    },
    SendStmt {
        chan: NodeId,
        value: NodeId,
    },
    SwitchStmt {
        init: Option<NodeId>,
        tag: Option<NodeId>,
        body: NodeId,
    },
    TypeSwitchStmt {
        init: Option<NodeId>,
        assign: NodeId,
        body: NodeId,
    },

    // =========================================================================
    // DECLARATIONS AND SPECS
    // =========================================================================
    BadDecl {
        length: u32,
    },
    FuncDecl {
        recv: Option<NodeId>,
        name: NodeId,
        params: NodeId,
        results: Option<NodeId>,
        body: Option<NodeId>,
    },
    GenDecl {
        tok: Token,
        lparen: bool,
        specs: Vec<NodeId>,
        rparen: bool,
    },
    ImportSpec {
        name: Option<NodeId>,
        path: NodeId,
    },
    TypeSpec {
        name: NodeId,
        assign: bool,
        ty: NodeId,
    },
    ValueSpec {
        names: Vec<NodeId>,
        ty: Option<NodeId>,
        values: Vec<NodeId>,
    },

    // =========================================================================
    // FIELDS, FILES AND PACKAGES
    // =========================================================================
    Field {
        names: Vec<NodeId>,
        ty: NodeId,
        tag: Option<NodeId>,
    },
    FieldList {
        delim: Delim,
        opening: bool,
        list: Vec<NodeId>,
        closing: bool,
    },
    File {
        name: NodeId,
        decls: Vec<NodeId>,
        scope: Option<ScopeId>,
        /// Import specs of the file, normally shared with its declarations.
        imports: Vec<NodeId>,
        /// Identifiers left unresolved by the decorating stage.
        unresolved: Vec<NodeId>,
    },
    Package {
        name: SmolStr,
        scope: Option<ScopeId>,
        imports: IndexMap<SmolStr, ObjectId>,
        files: IndexMap<SmolStr, NodeId>,
    },
}

/// Fieldless mirror of [`Node`]'s variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ArrayType,
    AssignStmt,
    BadDecl,
    BadExpr,
    BadStmt,
    BasicLit,
    BinaryExpr,
    BlockStmt,
    BranchStmt,
    CallExpr,
    CaseClause,
    ChanType,
    CommClause,
    CompositeLit,
    DeclStmt,
    DeferStmt,
    Ellipsis,
    EmptyStmt,
    ExprStmt,
    Field,
    FieldList,
    File,
    ForStmt,
    FuncDecl,
    FuncLit,
    FuncType,
    GenDecl,
    GoStmt,
    Ident,
    IfStmt,
    ImportSpec,
    IncDecStmt,
    IndexExpr,
    InterfaceType,
    KeyValueExpr,
    LabeledStmt,
    MapType,
    Package,
    ParenExpr,
    RangeStmt,
    ReturnStmt,
    SelectStmt,
    SelectorExpr,
    SendStmt,
    SliceExpr,
    StarExpr,
    StructType,
    SwitchStmt,
    TypeAssertExpr,
    TypeSpec,
    TypeSwitchStmt,
    UnaryExpr,
    ValueSpec,
}

/// Syntactic category a construct kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Expr,
    Stmt,
    Decl,
    Spec,
    Field,
    FieldList,
    File,
    Package,
}

impl NodeKind {
    pub fn class(self) -> NodeClass {
        use NodeKind::*;
        match self {
            ArrayType | BadExpr | BasicLit | BinaryExpr | CallExpr | ChanType | CompositeLit
            | Ellipsis | FuncLit | FuncType | Ident | IndexExpr | InterfaceType | KeyValueExpr
            | MapType | ParenExpr | SelectorExpr | SliceExpr | StarExpr | StructType
            | TypeAssertExpr | UnaryExpr => NodeClass::Expr,
            AssignStmt | BadStmt | BlockStmt | BranchStmt | CaseClause | CommClause | DeclStmt
            | DeferStmt | EmptyStmt | ExprStmt | ForStmt | GoStmt | IfStmt | IncDecStmt
            | LabeledStmt | RangeStmt | ReturnStmt | SelectStmt | SendStmt | SwitchStmt
            | TypeSwitchStmt => NodeClass::Stmt,
            BadDecl | FuncDecl | GenDecl => NodeClass::Decl,
            ImportSpec | TypeSpec | ValueSpec => NodeClass::Spec,
            Field => NodeClass::Field,
            FieldList => NodeClass::FieldList,
            File => NodeClass::File,
            Package => NodeClass::Package,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a grammar rule accepts in one of its child positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Any construct of the category.
    Class(NodeClass),
    /// Exactly one construct kind.
    Kind(NodeKind),
}

impl Shape {
    pub const EXPR: Shape = Shape::Class(NodeClass::Expr);
    pub const STMT: Shape = Shape::Class(NodeClass::Stmt);
    pub const DECL: Shape = Shape::Class(NodeClass::Decl);
    pub const SPEC: Shape = Shape::Class(NodeClass::Spec);
    pub const IDENT: Shape = Shape::Kind(NodeKind::Ident);
    pub const BASIC_LIT: Shape = Shape::Kind(NodeKind::BasicLit);
    pub const BLOCK: Shape = Shape::Kind(NodeKind::BlockStmt);
    pub const CALL: Shape = Shape::Kind(NodeKind::CallExpr);
    pub const FIELD: Shape = Shape::Kind(NodeKind::Field);
    pub const FIELD_LIST: Shape = Shape::Kind(NodeKind::FieldList);
    pub const FUNC_TYPE: Shape = Shape::Kind(NodeKind::FuncType);
    pub const FILE: Shape = Shape::Kind(NodeKind::File);

    /// Check whether a construct of `kind` may stand in this position
    pub fn admits(self, kind: NodeKind) -> bool {
        match self {
            Shape::Class(class) => kind.class() == class,
            Shape::Kind(expected) => kind == expected,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Class(NodeClass::Expr) => f.write_str("expression"),
            Shape::Class(NodeClass::Stmt) => f.write_str("statement"),
            Shape::Class(NodeClass::Decl) => f.write_str("declaration"),
            Shape::Class(NodeClass::Spec) => f.write_str("spec"),
            Shape::Class(class) => write!(f, "{class:?}"),
            Shape::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::ArrayType { .. } => NodeKind::ArrayType,
            Node::AssignStmt { .. } => NodeKind::AssignStmt,
            Node::BadDecl { .. } => NodeKind::BadDecl,
            Node::BadExpr { .. } => NodeKind::BadExpr,
            Node::BadStmt { .. } => NodeKind::BadStmt,
            Node::BasicLit { .. } => NodeKind::BasicLit,
            Node::BinaryExpr { .. } => NodeKind::BinaryExpr,
            Node::BlockStmt { .. } => NodeKind::BlockStmt,
            Node::BranchStmt { .. } => NodeKind::BranchStmt,
            Node::CallExpr { .. } => NodeKind::CallExpr,
            Node::CaseClause { .. } => NodeKind::CaseClause,
            Node::ChanType { .. } => NodeKind::ChanType,
            Node::CommClause { .. } => NodeKind::CommClause,
            Node::CompositeLit { .. } => NodeKind::CompositeLit,
            Node::DeclStmt { .. } => NodeKind::DeclStmt,
            Node::DeferStmt { .. } => NodeKind::DeferStmt,
            Node::Ellipsis { .. } => NodeKind::Ellipsis,
            Node::EmptyStmt { .. } => NodeKind::EmptyStmt,
            Node::ExprStmt { .. } => NodeKind::ExprStmt,
            Node::Field { .. } => NodeKind::Field,
            Node::FieldList { .. } => NodeKind::FieldList,
            Node::File { .. } => NodeKind::File,
            Node::ForStmt { .. } => NodeKind::ForStmt,
            Node::FuncDecl { .. } => NodeKind::FuncDecl,
            Node::FuncLit { .. } => NodeKind::FuncLit,
            Node::FuncType { .. } => NodeKind::FuncType,
            Node::GenDecl { .. } => NodeKind::GenDecl,
            Node::GoStmt { .. } => NodeKind::GoStmt,
            Node::Ident { .. } => NodeKind::Ident,
            Node::IfStmt { .. } => NodeKind::IfStmt,
            Node::ImportSpec { .. } => NodeKind::ImportSpec,
            Node::IncDecStmt { .. } => NodeKind::IncDecStmt,
            Node::IndexExpr { .. } => NodeKind::IndexExpr,
            Node::InterfaceType { .. } => NodeKind::InterfaceType,
            Node::KeyValueExpr { .. } => NodeKind::KeyValueExpr,
            Node::LabeledStmt { .. } => NodeKind::LabeledStmt,
            Node::MapType { .. } => NodeKind::MapType,
            Node::Package { .. } => NodeKind::Package,
            Node::ParenExpr { .. } => NodeKind::ParenExpr,
            Node::RangeStmt { .. } => NodeKind::RangeStmt,
            Node::ReturnStmt { .. } => NodeKind::ReturnStmt,
            Node::SelectStmt { .. } => NodeKind::SelectStmt,
            Node::SelectorExpr { .. } => NodeKind::SelectorExpr,
            Node::SendStmt { .. } => NodeKind::SendStmt,
            Node::SliceExpr { .. } => NodeKind::SliceExpr,
            Node::StarExpr { .. } => NodeKind::StarExpr,
            Node::StructType { .. } => NodeKind::StructType,
            Node::SwitchStmt { .. } => NodeKind::SwitchStmt,
            Node::TypeAssertExpr { .. } => NodeKind::TypeAssertExpr,
            Node::TypeSpec { .. } => NodeKind::TypeSpec,
            Node::TypeSwitchStmt { .. } => NodeKind::TypeSwitchStmt,
            Node::UnaryExpr { .. } => NodeKind::UnaryExpr,
            Node::ValueSpec { .. } => NodeKind::ValueSpec,
        }
    }
}
