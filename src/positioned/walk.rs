//! Token walk over a positioned tree.
//!
//! Lists every booked token with its offset. A shared subtree is listed
//! once, at the position it was restored at.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextSize;

use super::{CommaList, PNode, PositionedTree, PosId};
use crate::base::Token;
use crate::syntax::ChanDir;

/// A booked token and the offset it was booked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedToken {
    pub offset: TextSize,
    pub text: SmolStr,
}

impl PlacedToken {
    fn new(offset: TextSize, text: impl Into<SmolStr>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }
}

impl PositionedTree {
    /// Every booked token in emission order.
    ///
    /// Raw spans of bad constructs carry no text and are not listed.
    pub fn tokens(&self) -> Vec<PlacedToken> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.node(id) else {
                continue;
            };
            own_tokens(node, &mut out);
            stack.extend(node.children().into_iter().rev());
        }
        out.sort_by_key(|token| token.offset);
        out
    }

    /// Ids of all nodes reachable from the root, parents before children.
    pub fn preorder(&self) -> Vec<PosId> {
        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.node(id) {
                order.push(id);
                stack.extend(node.children().into_iter().rev());
            }
        }
        order
    }
}

fn commas(list: &CommaList, out: &mut Vec<PlacedToken>) {
    out.extend(
        list.commas
            .iter()
            .map(|offset| PlacedToken::new(*offset, Token::Comma.as_str())),
    );
}

fn tok(out: &mut Vec<PlacedToken>, offset: TextSize, token: Token) {
    out.push(PlacedToken::new(offset, token.as_str()));
}

fn opt_tok(out: &mut Vec<PlacedToken>, offset: Option<TextSize>, token: Token) {
    if let Some(offset) = offset {
        tok(out, offset, token);
    }
}

fn own_tokens(node: &PNode, out: &mut Vec<PlacedToken>) {
    match node {
        PNode::BadExpr { .. }
        | PNode::BadStmt { .. }
        | PNode::BadDecl { .. }
        | PNode::FuncLit { .. }
        | PNode::DeclStmt { .. }
        | PNode::ExprStmt { .. }
        | PNode::ImportSpec { .. }
        | PNode::Package { .. } => {}
        PNode::BasicLit {
            value_pos, value, ..
        } => out.push(PlacedToken::new(*value_pos, value.clone())),
        PNode::BinaryExpr { op_pos, op, .. } | PNode::UnaryExpr { op_pos, op, .. } => {
            tok(out, *op_pos, *op)
        }
        PNode::CallExpr {
            lparen,
            args,
            ellipsis,
            rparen,
            ..
        } => {
            tok(out, *lparen, Token::LParen);
            commas(args, out);
            opt_tok(out, *ellipsis, Token::Ellipsis);
            tok(out, *rparen, Token::RParen);
        }
        PNode::CompositeLit {
            lbrace,
            elts,
            rbrace,
            ..
        } => {
            tok(out, *lbrace, Token::LBrace);
            commas(elts, out);
            tok(out, *rbrace, Token::RBrace);
        }
        PNode::Ellipsis { ellipsis, .. } => tok(out, *ellipsis, Token::Ellipsis),
        PNode::Ident { name_pos, name, .. } => out.push(PlacedToken::new(*name_pos, name.clone())),
        PNode::IndexExpr { lbrack, rbrack, .. } | PNode::ArrayType { lbrack, rbrack, .. } => {
            tok(out, *lbrack, Token::LBrack);
            tok(out, *rbrack, Token::RBrack);
        }
        PNode::KeyValueExpr { colon, .. } | PNode::LabeledStmt { colon, .. } => {
            tok(out, *colon, Token::Colon)
        }
        PNode::ParenExpr { lparen, rparen, .. } => {
            tok(out, *lparen, Token::LParen);
            tok(out, *rparen, Token::RParen);
        }
        PNode::SelectorExpr { period, .. } => tok(out, *period, Token::Period),
        PNode::SliceExpr {
            lbrack,
            colon1,
            colon2,
            rbrack,
            ..
        } => {
            tok(out, *lbrack, Token::LBrack);
            tok(out, *colon1, Token::Colon);
            opt_tok(out, *colon2, Token::Colon);
            tok(out, *rbrack, Token::RBrack);
        }
        PNode::StarExpr { star, .. } => tok(out, *star, Token::Mul),
        PNode::TypeAssertExpr {
            period,
            lparen,
            type_kw,
            rparen,
            ..
        } => {
            tok(out, *period, Token::Period);
            tok(out, *lparen, Token::LParen);
            opt_tok(out, *type_kw, Token::Type);
            tok(out, *rparen, Token::RParen);
        }
        PNode::ChanType {
            begin,
            chan,
            arrow,
            dir,
            ..
        } => {
            let first = match dir {
                ChanDir::Recv => Token::Arrow,
                ChanDir::Send | ChanDir::Both => Token::Chan,
            };
            tok(out, *begin, first);
            opt_tok(out, *chan, Token::Chan);
            opt_tok(out, *arrow, Token::Arrow);
        }
        PNode::FuncType { func, .. } => opt_tok(out, *func, Token::Func),
        PNode::InterfaceType { interface, .. } => tok(out, *interface, Token::Interface),
        PNode::MapType {
            map,
            lbrack,
            rbrack,
            ..
        } => {
            tok(out, *map, Token::Map);
            tok(out, *lbrack, Token::LBrack);
            tok(out, *rbrack, Token::RBrack);
        }
        PNode::StructType { struct_pos, .. } => tok(out, *struct_pos, Token::Struct),
        PNode::AssignStmt {
            lhs,
            tok_pos,
            tok: token,
            rhs,
        } => {
            commas(lhs, out);
            tok(out, *tok_pos, *token);
            commas(rhs, out);
        }
        PNode::BlockStmt { lbrace, rbrace, .. } => {
            tok(out, *lbrace, Token::LBrace);
            tok(out, *rbrace, Token::RBrace);
        }
        PNode::BranchStmt {
            tok_pos, tok: token, ..
        }
        | PNode::IncDecStmt {
            tok_pos, tok: token, ..
        } => tok(out, *tok_pos, *token),
        PNode::GenDecl {
            tok_pos,
            tok: token,
            lparen,
            rparen,
            ..
        } => {
            tok(out, *tok_pos, *token);
            opt_tok(out, *lparen, Token::LParen);
            opt_tok(out, *rparen, Token::RParen);
        }
        PNode::CaseClause {
            case_pos,
            list,
            colon,
            ..
        } => {
            let keyword = if list.is_empty() {
                Token::Default
            } else {
                Token::Case
            };
            tok(out, *case_pos, keyword);
            commas(list, out);
            tok(out, *colon, Token::Colon);
        }
        PNode::CommClause {
            case_pos,
            comm,
            colon,
            ..
        } => {
            let keyword = if comm.is_some() {
                Token::Case
            } else {
                Token::Default
            };
            tok(out, *case_pos, keyword);
            tok(out, *colon, Token::Colon);
        }
        PNode::DeferStmt { defer, .. } => tok(out, *defer, Token::Defer),
        PNode::EmptyStmt {
            semicolon,
            implicit,
        } => {
            if !implicit {
                tok(out, *semicolon, Token::Semicolon);
            }
        }
        PNode::ForStmt {
            for_pos,
            init_semi,
            cond_semi,
            ..
        } => {
            tok(out, *for_pos, Token::For);
            opt_tok(out, *init_semi, Token::Semicolon);
            opt_tok(out, *cond_semi, Token::Semicolon);
        }
        PNode::GoStmt { go, .. } => tok(out, *go, Token::Go),
        PNode::IfStmt {
            if_pos,
            init_semi,
            else_pos,
            ..
        } => {
            tok(out, *if_pos, Token::If);
            opt_tok(out, *init_semi, Token::Semicolon);
            opt_tok(out, *else_pos, Token::Else);
        }
        PNode::RangeStmt {
            for_pos,
            comma,
            tok_pos,
            tok: token,
            range,
            ..
        } => {
            tok(out, *for_pos, Token::For);
            opt_tok(out, *comma, Token::Comma);
            if let (Some(offset), Some(token)) = (tok_pos, token) {
                tok(out, *offset, *token);
            }
            tok(out, *range, Token::Range);
        }
        PNode::ReturnStmt {
            return_pos,
            results,
        } => {
            tok(out, *return_pos, Token::Return);
            commas(results, out);
        }
        PNode::SelectStmt { select, .. } => tok(out, *select, Token::Select),
        PNode::SendStmt { arrow, .. } => tok(out, *arrow, Token::Arrow),
        PNode::SwitchStmt {
            switch, init_semi, ..
        }
        | PNode::TypeSwitchStmt {
            switch, init_semi, ..
        } => {
            tok(out, *switch, Token::Switch);
            opt_tok(out, *init_semi, Token::Semicolon);
        }
        PNode::FuncDecl { func, .. } => tok(out, *func, Token::Func),
        PNode::TypeSpec { assign, .. } => opt_tok(out, *assign, Token::Assign),
        PNode::ValueSpec {
            names,
            assign,
            values,
            ..
        } => {
            commas(names, out);
            opt_tok(out, *assign, Token::Assign);
            commas(values, out);
        }
        PNode::Field { names, .. } => commas(names, out),
        PNode::FieldList {
            delim,
            opening,
            list,
            closing,
        } => {
            opt_tok(out, *opening, delim.open());
            commas(list, out);
            opt_tok(out, *closing, delim.close());
        }
        PNode::File { package, .. } => tok(out, *package, Token::Package),
    }
}
