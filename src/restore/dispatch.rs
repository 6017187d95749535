//! The grammar table.
//!
//! One match arm per construct kind. Each arm books the construct's tokens,
//! flushes its slots and restores its children in source order. Every kind
//! except `Package` opens with its `Start` slot and closes with its `End`
//! slot; those two are flushed by [`Restorer::restore_node`].

use indexmap::IndexMap;
use text_size::TextSize;
use tracing::{debug, trace};

use super::flush::Frame;
use super::{RestoreError, Restorer, Result};
use crate::base::Token;
use crate::positioned::{CommaList, PNode, PosId};
use crate::syntax::{ChanDir, Delim, Node, NodeId, NodeKind, Shape, Slot};

const IMPORT_SPEC: Shape = Shape::Kind(NodeKind::ImportSpec);

impl<'t> Restorer<'t> {
    /// Restore decorated node `id`, or return its id if it was reached before.
    pub fn restore_node(&mut self, id: NodeId) -> Result<PosId> {
        if let Some(cached) = self.cache.node(id) {
            trace!("[RESTORE] Node {:?} already restored as {:?}", id, cached.id());
            return Ok(cached.id());
        }
        let tree = self.tree;
        let decorated = tree.get(id).ok_or(RestoreError::MissingNode(id))?;
        let kind = decorated.node.kind();
        let at = self.reserve(id, kind);
        let frame = Frame {
            at,
            kind,
            decs: &decorated.decs,
        };

        let framed = !matches!(kind, NodeKind::Package);
        if framed {
            self.flush(&frame, Slot::Start);
        }
        let node = self.dispatch(&frame, &decorated.node)?;
        // A file flushes End itself, before its symbol links.
        if framed && kind != NodeKind::File {
            self.flush(&frame, Slot::End);
        }

        self.complete(id, at, node);
        Ok(at)
    }

    fn dispatch(&mut self, f: &Frame<'t>, node: &'t Node) -> Result<PNode> {
        let node = match node {
            // =================================================================
            // EXPRESSIONS
            // =================================================================
            Node::BadExpr { length } => {
                let (from, to) = self.raw_span(*length)?;
                PNode::BadExpr { from, to }
            }
            Node::BasicLit { kind, value } => PNode::BasicLit {
                value_pos: self.cursor.advance(value),
                kind: *kind,
                value: value.clone(),
            },
            Node::BinaryExpr { x, op, y } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let op_pos = self.token(*op);
                self.flush(f, Slot::AfterOp);
                let y = self.child(f, "y", Shape::EXPR, *y)?;
                PNode::BinaryExpr {
                    x,
                    op_pos,
                    op: *op,
                    y,
                }
            }
            Node::CallExpr {
                fun,
                args,
                ellipsis,
            } => {
                let fun = self.child(f, "fun", Shape::EXPR, *fun)?;
                self.flush(f, Slot::AfterFun);
                let lparen = self.token(Token::LParen);
                self.flush(f, Slot::AfterLparen);
                let args = self.comma_list(f, "args", Shape::EXPR, args)?;
                self.flush(f, Slot::AfterArgs);
                let ellipsis = self.token_if(Token::Ellipsis, *ellipsis);
                self.flush_if(f, Slot::AfterEllipsis, ellipsis.is_some());
                let rparen = self.token(Token::RParen);
                PNode::CallExpr {
                    fun,
                    lparen,
                    args,
                    ellipsis,
                    rparen,
                }
            }
            Node::CompositeLit {
                ty,
                elts,
                incomplete,
            } => {
                let ty = self.opt_child(f, "type", Shape::EXPR, *ty)?;
                self.flush_if(f, Slot::AfterType, ty.is_some());
                let lbrace = self.token(Token::LBrace);
                self.flush(f, Slot::AfterLbrace);
                let elts = self.comma_list(f, "elts", Shape::EXPR, elts)?;
                let rbrace = self.token(Token::RBrace);
                PNode::CompositeLit {
                    ty,
                    lbrace,
                    elts,
                    rbrace,
                    incomplete: *incomplete,
                }
            }
            Node::Ellipsis { elt } => {
                let ellipsis = self.token(Token::Ellipsis);
                self.flush(f, Slot::AfterEllipsis);
                let elt = self.opt_child(f, "elt", Shape::EXPR, *elt)?;
                PNode::Ellipsis { ellipsis, elt }
            }
            Node::FuncLit { ty, body } => {
                let ty = self.child(f, "type", Shape::FUNC_TYPE, *ty)?;
                self.flush(f, Slot::AfterType);
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::FuncLit { ty, body }
            }
            Node::Ident { name, obj } => {
                let name_pos = self.cursor.advance(name);
                let obj = match obj {
                    Some(obj) if self.options.restore_symbols => Some(self.restore_object(*obj)?),
                    _ => None,
                };
                PNode::Ident {
                    name_pos,
                    name: name.clone(),
                    obj,
                }
            }
            Node::IndexExpr { x, index } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let lbrack = self.token(Token::LBrack);
                self.flush(f, Slot::AfterLbrack);
                let index = self.child(f, "index", Shape::EXPR, *index)?;
                self.flush(f, Slot::AfterIndex);
                let rbrack = self.token(Token::RBrack);
                PNode::IndexExpr {
                    x,
                    lbrack,
                    index,
                    rbrack,
                }
            }
            Node::KeyValueExpr { key, value } => {
                let key = self.child(f, "key", Shape::EXPR, *key)?;
                self.flush(f, Slot::AfterKey);
                let colon = self.token(Token::Colon);
                self.flush(f, Slot::AfterColon);
                let value = self.child(f, "value", Shape::EXPR, *value)?;
                PNode::KeyValueExpr { key, colon, value }
            }
            Node::ParenExpr { x } => {
                let lparen = self.token(Token::LParen);
                self.flush(f, Slot::AfterLparen);
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let rparen = self.token(Token::RParen);
                PNode::ParenExpr { lparen, x, rparen }
            }
            Node::SelectorExpr { x, sel } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                let period = self.token(Token::Period);
                self.flush(f, Slot::AfterX);
                let sel = self.child(f, "sel", Shape::IDENT, *sel)?;
                PNode::SelectorExpr { x, period, sel }
            }
            Node::SliceExpr {
                x,
                low,
                high,
                max,
                slice3,
            } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let lbrack = self.token(Token::LBrack);
                self.flush(f, Slot::AfterLbrack);
                let low = self.opt_child(f, "low", Shape::EXPR, *low)?;
                let colon1 = self.token(Token::Colon);
                self.flush(f, Slot::AfterLow);
                let high = self.opt_child(f, "high", Shape::EXPR, *high)?;
                let colon2 = self.token_if(Token::Colon, *slice3);
                self.flush_if(f, Slot::AfterHigh, high.is_some() || *slice3);
                let max = self.opt_child(f, "max", Shape::EXPR, *max)?;
                self.flush_if(f, Slot::AfterMax, max.is_some());
                let rbrack = self.token(Token::RBrack);
                PNode::SliceExpr {
                    x,
                    lbrack,
                    low,
                    colon1,
                    high,
                    colon2,
                    max,
                    rbrack,
                    slice3: *slice3,
                }
            }
            Node::StarExpr { x } => {
                let star = self.token(Token::Mul);
                self.flush(f, Slot::AfterStar);
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                PNode::StarExpr { star, x }
            }
            Node::TypeAssertExpr { x, ty } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                let period = self.token(Token::Period);
                self.flush(f, Slot::AfterX);
                let lparen = self.token(Token::LParen);
                self.flush(f, Slot::AfterLparen);
                let ty = self.opt_child(f, "type", Shape::EXPR, *ty)?;
                let type_kw = self.token_if(Token::Type, ty.is_none());
                self.flush(f, Slot::AfterType);
                let rparen = self.token(Token::RParen);
                PNode::TypeAssertExpr {
                    x,
                    period,
                    lparen,
                    ty,
                    type_kw,
                    rparen,
                }
            }
            Node::UnaryExpr { op, x } => {
                let op_pos = self.token(*op);
                self.flush(f, Slot::AfterOp);
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                PNode::UnaryExpr { op_pos, op: *op, x }
            }

            // =================================================================
            // TYPES
            // =================================================================
            Node::ArrayType { len, elt } => {
                let lbrack = self.token(Token::LBrack);
                self.flush(f, Slot::AfterLbrack);
                let len = self.opt_child(f, "len", Shape::EXPR, *len)?;
                let rbrack = self.token(Token::RBrack);
                self.flush(f, Slot::AfterLen);
                let elt = self.child(f, "elt", Shape::EXPR, *elt)?;
                PNode::ArrayType {
                    lbrack,
                    len,
                    rbrack,
                    elt,
                }
            }
            Node::ChanType { dir, value } => {
                let recv = *dir == ChanDir::Recv;
                let send = *dir == ChanDir::Send;
                let begin = self.token(if recv { Token::Arrow } else { Token::Chan });
                let chan = self.token_if(Token::Chan, recv);
                self.flush(f, Slot::AfterBegin);
                let arrow = self.token_if(Token::Arrow, send);
                self.flush_if(f, Slot::AfterArrow, send);
                let value = self.child(f, "value", Shape::EXPR, *value)?;
                PNode::ChanType {
                    begin,
                    chan,
                    arrow,
                    dir: *dir,
                    value,
                }
            }
            Node::FuncType {
                func,
                params,
                results,
            } => {
                let func = self.token_if(Token::Func, *func);
                self.flush_if(f, Slot::AfterFunc, func.is_some());
                let params = self.child(f, "params", Shape::FIELD_LIST, *params)?;
                self.flush(f, Slot::AfterParams);
                let results = self.opt_child(f, "results", Shape::FIELD_LIST, *results)?;
                PNode::FuncType {
                    func,
                    params,
                    results,
                }
            }
            Node::InterfaceType {
                methods,
                incomplete,
            } => {
                let interface = self.token(Token::Interface);
                self.flush(f, Slot::AfterInterface);
                let methods = self.child(f, "methods", Shape::FIELD_LIST, *methods)?;
                PNode::InterfaceType {
                    interface,
                    methods,
                    incomplete: *incomplete,
                }
            }
            Node::MapType { key, value } => {
                let map = self.token(Token::Map);
                let lbrack = self.token(Token::LBrack);
                self.flush(f, Slot::AfterMap);
                let key = self.child(f, "key", Shape::EXPR, *key)?;
                let rbrack = self.token(Token::RBrack);
                self.flush(f, Slot::AfterKey);
                let value = self.child(f, "value", Shape::EXPR, *value)?;
                PNode::MapType {
                    map,
                    lbrack,
                    key,
                    rbrack,
                    value,
                }
            }
            Node::StructType { fields, incomplete } => {
                let struct_pos = self.token(Token::Struct);
                self.flush(f, Slot::AfterStruct);
                let fields = self.child(f, "fields", Shape::FIELD_LIST, *fields)?;
                PNode::StructType {
                    struct_pos,
                    fields,
                    incomplete: *incomplete,
                }
            }

            // =================================================================
            // STATEMENTS
            // =================================================================
            Node::AssignStmt { lhs, tok, rhs } => {
                let lhs = self.comma_list(f, "lhs", Shape::EXPR, lhs)?;
                self.flush(f, Slot::AfterLhs);
                let tok_pos = self.token(*tok);
                self.flush(f, Slot::AfterTok);
                let rhs = self.comma_list(f, "rhs", Shape::EXPR, rhs)?;
                PNode::AssignStmt {
                    lhs,
                    tok_pos,
                    tok: *tok,
                    rhs,
                }
            }
            Node::BadStmt { length } => {
                let (from, to) = self.raw_span(*length)?;
                PNode::BadStmt { from, to }
            }
            Node::BlockStmt { list } => {
                let lbrace = self.token(Token::LBrace);
                self.flush(f, Slot::AfterLbrace);
                let list = self.list(f, "list", Shape::STMT, list)?;
                let rbrace = self.token(Token::RBrace);
                PNode::BlockStmt {
                    lbrace,
                    list,
                    rbrace,
                }
            }
            Node::BranchStmt { tok, label } => {
                let tok_pos = self.token(*tok);
                self.flush(f, Slot::AfterTok);
                let label = self.opt_child(f, "label", Shape::IDENT, *label)?;
                PNode::BranchStmt {
                    tok_pos,
                    tok: *tok,
                    label,
                }
            }
            Node::CaseClause { list, body } => {
                let keyword = if list.is_empty() {
                    Token::Default
                } else {
                    Token::Case
                };
                let case_pos = self.token(keyword);
                self.flush(f, Slot::AfterCase);
                let list = self.comma_list(f, "list", Shape::EXPR, list)?;
                self.flush_if(f, Slot::AfterList, !list.is_empty());
                let colon = self.token(Token::Colon);
                self.flush(f, Slot::AfterColon);
                let body = self.list(f, "body", Shape::STMT, body)?;
                PNode::CaseClause {
                    case_pos,
                    list,
                    colon,
                    body,
                }
            }
            Node::CommClause { comm, body } => {
                let keyword = if comm.is_some() {
                    Token::Case
                } else {
                    Token::Default
                };
                let case_pos = self.token(keyword);
                self.flush(f, Slot::AfterCase);
                let comm = self.opt_child(f, "comm", Shape::STMT, *comm)?;
                self.flush_if(f, Slot::AfterComm, comm.is_some());
                let colon = self.token(Token::Colon);
                self.flush(f, Slot::AfterColon);
                let body = self.list(f, "body", Shape::STMT, body)?;
                PNode::CommClause {
                    case_pos,
                    comm,
                    colon,
                    body,
                }
            }
            Node::DeclStmt { decl } => PNode::DeclStmt {
                decl: self.child(f, "decl", Shape::DECL, *decl)?,
            },
            Node::DeferStmt { call } => {
                let defer = self.token(Token::Defer);
                self.flush(f, Slot::AfterDefer);
                let call = self.child(f, "call", Shape::CALL, *call)?;
                PNode::DeferStmt { defer, call }
            }
            Node::EmptyStmt { implicit } => {
                let semicolon = if *implicit {
                    self.cursor.offset()
                } else {
                    self.token(Token::Semicolon)
                };
                PNode::EmptyStmt {
                    semicolon,
                    implicit: *implicit,
                }
            }
            Node::ExprStmt { x } => PNode::ExprStmt {
                x: self.child(f, "x", Shape::EXPR, *x)?,
            },
            Node::ForStmt {
                init,
                cond,
                post,
                body,
            } => {
                let three_clause = init.is_some() || post.is_some();
                let for_pos = self.token(Token::For);
                self.flush(f, Slot::AfterFor);
                let init = self.opt_child(f, "init", Shape::STMT, *init)?;
                let init_semi = self.token_if(Token::Semicolon, three_clause);
                self.flush_if(f, Slot::AfterInit, init.is_some());
                let cond = self.opt_child(f, "cond", Shape::EXPR, *cond)?;
                let cond_semi = self.token_if(Token::Semicolon, three_clause);
                self.flush_if(f, Slot::AfterCond, cond.is_some() || three_clause);
                let post = self.opt_child(f, "post", Shape::STMT, *post)?;
                self.flush_if(f, Slot::AfterPost, post.is_some());
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::ForStmt {
                    for_pos,
                    init,
                    init_semi,
                    cond,
                    cond_semi,
                    post,
                    body,
                }
            }
            Node::GoStmt { call } => {
                let go = self.token(Token::Go);
                self.flush(f, Slot::AfterGo);
                let call = self.child(f, "call", Shape::CALL, *call)?;
                PNode::GoStmt { go, call }
            }
            Node::IfStmt {
                init,
                cond,
                body,
                els,
            } => {
                let if_pos = self.token(Token::If);
                self.flush(f, Slot::AfterIf);
                let init = self.opt_child(f, "init", Shape::STMT, *init)?;
                let init_semi = self.token_if(Token::Semicolon, init.is_some());
                self.flush_if(f, Slot::AfterInit, init.is_some());
                let cond = self.child(f, "cond", Shape::EXPR, *cond)?;
                self.flush(f, Slot::AfterCond);
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                let else_pos = self.token_if(Token::Else, els.is_some());
                self.flush_if(f, Slot::AfterElse, els.is_some());
                let els = self.opt_child(f, "else", Shape::STMT, *els)?;
                PNode::IfStmt {
                    if_pos,
                    init,
                    init_semi,
                    cond,
                    body,
                    else_pos,
                    els,
                }
            }
            Node::IncDecStmt { x, tok } => {
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let tok_pos = self.token(*tok);
                PNode::IncDecStmt {
                    x,
                    tok_pos,
                    tok: *tok,
                }
            }
            Node::LabeledStmt { label, stmt } => {
                let label = self.child(f, "label", Shape::IDENT, *label)?;
                self.flush(f, Slot::AfterLabel);
                let colon = self.token(Token::Colon);
                self.flush(f, Slot::AfterColon);
                let stmt = self.child(f, "stmt", Shape::STMT, *stmt)?;
                PNode::LabeledStmt { label, colon, stmt }
            }
            Node::RangeStmt {
                key,
                value,
                tok,
                x,
                body,
            } => {
                let for_pos = self.token(Token::For);
                self.flush(f, Slot::AfterFor);
                let key = self.opt_child(f, "key", Shape::EXPR, *key)?;
                let comma = self.token_if(Token::Comma, value.is_some());
                self.flush_if(f, Slot::AfterKey, key.is_some());
                let value = self.opt_child(f, "value", Shape::EXPR, *value)?;
                self.flush_if(f, Slot::AfterValue, value.is_some());
                let tok_pos = tok.map(|tok| self.token(tok));
                let range = self.token(Token::Range);
                self.flush(f, Slot::AfterRange);
                let x = self.child(f, "x", Shape::EXPR, *x)?;
                self.flush(f, Slot::AfterX);
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::RangeStmt {
                    for_pos,
                    key,
                    comma,
                    value,
                    tok_pos,
                    tok: *tok,
                    range,
                    x,
                    body,
                }
            }
            Node::ReturnStmt { results } => {
                let return_pos = self.token(Token::Return);
                self.flush(f, Slot::AfterReturn);
                let results = self.comma_list(f, "results", Shape::EXPR, results)?;
                PNode::ReturnStmt {
                    return_pos,
                    results,
                }
            }
            Node::SelectStmt { body } => {
                let select = self.token(Token::Select);
                self.flush(f, Slot::AfterSelect);
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::SelectStmt { select, body }
            }
            Node::SendStmt { chan, value } => {
                let chan = self.child(f, "chan", Shape::EXPR, *chan)?;
                self.flush(f, Slot::AfterChan);
                let arrow = self.token(Token::Arrow);
                self.flush(f, Slot::AfterArrow);
                let value = self.child(f, "value", Shape::EXPR, *value)?;
                PNode::SendStmt { chan, arrow, value }
            }
            Node::SwitchStmt { init, tag, body } => {
                let switch = self.token(Token::Switch);
                self.flush(f, Slot::AfterSwitch);
                let init = self.opt_child(f, "init", Shape::STMT, *init)?;
                let init_semi = self.token_if(Token::Semicolon, init.is_some());
                self.flush_if(f, Slot::AfterInit, init.is_some());
                let tag = self.opt_child(f, "tag", Shape::EXPR, *tag)?;
                self.flush_if(f, Slot::AfterTag, tag.is_some());
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::SwitchStmt {
                    switch,
                    init,
                    init_semi,
                    tag,
                    body,
                }
            }
            Node::TypeSwitchStmt { init, assign, body } => {
                let switch = self.token(Token::Switch);
                self.flush(f, Slot::AfterSwitch);
                let init = self.opt_child(f, "init", Shape::STMT, *init)?;
                let init_semi = self.token_if(Token::Semicolon, init.is_some());
                self.flush_if(f, Slot::AfterInit, init.is_some());
                let assign = self.child(f, "assign", Shape::STMT, *assign)?;
                self.flush(f, Slot::AfterAssign);
                let body = self.child(f, "body", Shape::BLOCK, *body)?;
                PNode::TypeSwitchStmt {
                    switch,
                    init,
                    init_semi,
                    assign,
                    body,
                }
            }

            // =================================================================
            // DECLARATIONS AND SPECS
            // =================================================================
            Node::BadDecl { length } => {
                let (from, to) = self.raw_span(*length)?;
                PNode::BadDecl { from, to }
            }
            Node::FuncDecl {
                recv,
                name,
                params,
                results,
                body,
            } => {
                let func = self.token(Token::Func);
                self.flush(f, Slot::AfterFunc);
                let recv = self.opt_child(f, "recv", Shape::FIELD_LIST, *recv)?;
                self.flush_if(f, Slot::AfterRecv, recv.is_some());
                let name = self.child(f, "name", Shape::IDENT, *name)?;
                self.flush(f, Slot::AfterName);
                let params = self.child(f, "params", Shape::FIELD_LIST, *params)?;
                self.flush(f, Slot::AfterParams);
                let results = self.opt_child(f, "results", Shape::FIELD_LIST, *results)?;
                self.flush_if(f, Slot::AfterResults, results.is_some());
                let body = self.opt_child(f, "body", Shape::BLOCK, *body)?;
                PNode::FuncDecl {
                    func,
                    recv,
                    name,
                    params,
                    results,
                    body,
                }
            }
            Node::GenDecl {
                tok,
                lparen,
                specs,
                rparen,
            } => {
                let tok_pos = self.token(*tok);
                self.flush(f, Slot::AfterTok);
                let lparen = self.token_if(Token::LParen, *lparen);
                self.flush_if(f, Slot::AfterLparen, lparen.is_some());
                let specs = self.list(f, "specs", Shape::SPEC, specs)?;
                let rparen = self.token_if(Token::RParen, *rparen);
                PNode::GenDecl {
                    tok_pos,
                    tok: *tok,
                    lparen,
                    specs,
                    rparen,
                }
            }
            Node::ImportSpec { name, path } => {
                let name = self.opt_child(f, "name", Shape::IDENT, *name)?;
                self.flush_if(f, Slot::AfterName, name.is_some());
                let path = self.child(f, "path", Shape::BASIC_LIT, *path)?;
                PNode::ImportSpec { name, path }
            }
            Node::TypeSpec { name, assign, ty } => {
                let name = self.child(f, "name", Shape::IDENT, *name)?;
                let assign = self.token_if(Token::Assign, *assign);
                self.flush(f, Slot::AfterName);
                let ty = self.child(f, "type", Shape::EXPR, *ty)?;
                PNode::TypeSpec { name, assign, ty }
            }
            Node::ValueSpec { names, ty, values } => {
                let names = self.comma_list(f, "names", Shape::IDENT, names)?;
                self.flush(f, Slot::AfterNames);
                let ty = self.opt_child(f, "type", Shape::EXPR, *ty)?;
                let assign = self.token_if(Token::Assign, !values.is_empty());
                self.flush_if(f, Slot::AfterAssign, assign.is_some());
                let values = self.comma_list(f, "values", Shape::EXPR, values)?;
                PNode::ValueSpec {
                    names,
                    ty,
                    assign,
                    values,
                }
            }

            // =================================================================
            // FIELDS, FILES AND PACKAGES
            // =================================================================
            Node::Field { names, ty, tag } => {
                let names = self.comma_list(f, "names", Shape::IDENT, names)?;
                self.flush_if(f, Slot::AfterNames, !names.is_empty());
                let ty = self.child(f, "type", Shape::EXPR, *ty)?;
                self.flush(f, Slot::AfterType);
                let tag = self.opt_child(f, "tag", Shape::BASIC_LIT, *tag)?;
                PNode::Field { names, ty, tag }
            }
            Node::FieldList {
                delim,
                opening,
                list,
                closing,
            } => {
                let opening = self.token_if(delim.open(), *opening);
                self.flush_if(f, Slot::AfterOpening, opening.is_some());
                let list = match delim {
                    Delim::Paren => self.comma_list(f, "list", Shape::FIELD, list)?,
                    Delim::Brace => CommaList {
                        items: self.list(f, "list", Shape::FIELD, list)?,
                        commas: Vec::new(),
                    },
                };
                let closing = self.token_if(delim.close(), *closing);
                PNode::FieldList {
                    delim: *delim,
                    opening,
                    list,
                    closing,
                }
            }
            Node::File {
                name,
                decls,
                scope,
                imports,
                unresolved,
            } => {
                let package = self.token(Token::Package);
                self.flush(f, Slot::AfterPackage);
                let name = self.child(f, "name", Shape::IDENT, *name)?;
                self.flush(f, Slot::AfterName);
                let decls = self.list(f, "decls", Shape::DECL, decls)?;
                self.flush(f, Slot::End);
                let scope = match scope {
                    Some(scope) if self.options.restore_symbols => {
                        Some(self.restore_scope(*scope)?)
                    }
                    _ => None,
                };
                let imports = self.links(f, "imports", IMPORT_SPEC, imports)?;
                let unresolved = self.links(f, "unresolved", Shape::IDENT, unresolved)?;
                PNode::File {
                    package,
                    name,
                    decls,
                    scope,
                    imports,
                    unresolved,
                }
            }
            Node::Package {
                name,
                scope,
                imports,
                files,
            } => {
                let mut restored_imports = IndexMap::new();
                let scope = if self.options.restore_symbols {
                    let scope = scope.map(|scope| self.restore_scope(scope)).transpose()?;
                    for (name, object) in imports {
                        restored_imports.insert(name.clone(), self.restore_object(*object)?);
                    }
                    scope
                } else {
                    None
                };
                let mut restored_files = IndexMap::new();
                for (name, file) in files {
                    restored_files.insert(name.clone(), self.child(f, "files", Shape::FILE, *file)?);
                }
                PNode::Package {
                    name: name.clone(),
                    scope,
                    imports: restored_imports,
                    files: restored_files,
                }
            }
        };
        Ok(node)
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn token(&mut self, token: Token) -> TextSize {
        self.cursor.advance_token(token)
    }

    fn token_if(&mut self, token: Token, present: bool) -> Option<TextSize> {
        present.then(|| self.token(token))
    }

    /// Book a raw span of `length` bytes. Returns its start and end.
    fn raw_span(&mut self, length: u32) -> Result<(TextSize, TextSize)> {
        let offset = self.cursor.offset();
        let from = self
            .cursor
            .checked_advance_by(TextSize::new(length))
            .ok_or(RestoreError::OffsetOverflow { offset, length })?;
        Ok((from, self.cursor.offset()))
    }

    fn check_shape(
        &self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        id: NodeId,
    ) -> Result<()> {
        let found = self
            .tree
            .node(id)
            .ok_or(RestoreError::MissingNode(id))?
            .kind();
        if shape.admits(found) {
            Ok(())
        } else {
            Err(RestoreError::unexpected(f.kind, field, shape, found))
        }
    }

    fn child(
        &mut self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        id: NodeId,
    ) -> Result<PosId> {
        self.check_shape(f, field, shape, id)?;
        self.restore_node(id)
    }

    fn opt_child(
        &mut self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        id: Option<NodeId>,
    ) -> Result<Option<PosId>> {
        id.map(|id| self.child(f, field, shape, id)).transpose()
    }

    fn list(
        &mut self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        ids: &[NodeId],
    ) -> Result<Vec<PosId>> {
        ids.iter()
            .map(|id| self.child(f, field, shape, *id))
            .collect()
    }

    /// Resolve references to nodes restored elsewhere in the tree.
    ///
    /// Books nothing. An entry that was never reached is dropped.
    fn links(
        &self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        ids: &[NodeId],
    ) -> Result<Vec<PosId>> {
        let mut linked = Vec::with_capacity(ids.len());
        for id in ids {
            self.check_shape(f, field, shape, *id)?;
            match self.cache.node(*id) {
                Some(cached) => linked.push(cached.id()),
                None => debug!(
                    "[RESTORE] {}.{}: {:?} is not part of the restored tree, dropping link",
                    f.kind, field, id
                ),
            }
        }
        Ok(linked)
    }

    /// Restore a list, booking a `,` after every element but the last.
    fn comma_list(
        &mut self,
        f: &Frame<'_>,
        field: &'static str,
        shape: Shape,
        ids: &[NodeId],
    ) -> Result<CommaList> {
        let mut list = CommaList::default();
        for (index, id) in ids.iter().enumerate() {
            list.items.push(self.child(f, field, shape, *id)?);
            if index + 1 < ids.len() {
                list.commas.push(self.token(Token::Comma));
            }
        }
        Ok(list)
    }
}
