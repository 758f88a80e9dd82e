//! Recursive-descent parser for the JavaScript subset unchain understands
//!
//! Statements are parsed by recursive descent and expressions by precedence
//! climbing. Binary and assignment nodes are opened retroactively with Rowan
//! checkpoints, so the operand that was parsed first becomes the node's first
//! child. Parenthesized expressions stay in the tree as `ParenExpr` nodes.
//!
//! Trivia is flushed into whatever node is open right before the next
//! significant token or node start, so every node starts with a significant
//! token.

use std::ops::Range;

use super::lexer::LexerError;
use super::{CstBuilder, CstToken, JsSyntaxKind, JsSyntaxNode};

/// A syntax error with the byte span it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl From<LexerError> for ParseError {
    fn from(err: LexerError) -> Self {
        Self {
            message: err.message,
            span: err.span,
        }
    }
}

/// Output of a parse: the lossless tree plus every lexer and parser error
#[derive(Debug, Clone)]
pub struct Parse {
    pub root: JsSyntaxNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse JavaScript source into a `Program` CST
///
/// ```rust,ignore
/// use unchain_core::cst::parse_program;
///
/// let parse = parse_program("var a = b = c;");
/// assert!(parse.errors.is_empty());
/// assert_eq!(parse.root.text().to_string(), "var a = b = c;");
/// ```
pub fn parse_program(source: &str) -> Parse {
    let (tokens, lex_errors) = super::lex_with_trivia(source);
    let mut parser = Parser::new(&tokens);
    parser.parse_program();
    let (root, parse_errors) = parser.finish();

    let mut errors: Vec<ParseError> = lex_errors.into_iter().map(ParseError::from).collect();
    errors.extend(parse_errors);
    errors.sort_by_key(|e| e.span.start);

    Parse { root, errors }
}

/// Binding power of binary operators, higher binds tighter
fn binary_precedence(kind: JsSyntaxKind) -> Option<u8> {
    let prec = match kind {
        JsSyntaxKind::QuestionQuestion => 1,
        JsSyntaxKind::PipePipe => 2,
        JsSyntaxKind::AmpAmp => 3,
        JsSyntaxKind::Pipe => 4,
        JsSyntaxKind::Caret => 5,
        JsSyntaxKind::Amp => 6,
        JsSyntaxKind::EqEq
        | JsSyntaxKind::BangEq
        | JsSyntaxKind::EqEqEq
        | JsSyntaxKind::BangEqEq => 7,
        JsSyntaxKind::Lt
        | JsSyntaxKind::Gt
        | JsSyntaxKind::LtEq
        | JsSyntaxKind::GtEq
        | JsSyntaxKind::InstanceofKw
        | JsSyntaxKind::InKw => 8,
        JsSyntaxKind::Shl | JsSyntaxKind::Shr | JsSyntaxKind::UShr => 9,
        JsSyntaxKind::Plus | JsSyntaxKind::Minus => 10,
        JsSyntaxKind::Star | JsSyntaxKind::Slash | JsSyntaxKind::Percent => 11,
        JsSyntaxKind::StarStar => 12,
        _ => return None,
    };
    Some(prec)
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
    errors: Vec<ParseError>,
    /// Set while parsing a `for` header initializer, where `in` ends the expression
    no_in: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
            no_in: false,
        }
    }

    fn finish(self) -> (JsSyntaxNode, Vec<ParseError>) {
        (self.builder.finish(), self.errors)
    }

    fn parse_program(&mut self) {
        self.builder.start_node(JsSyntaxKind::Program);

        while !self.at_end() {
            self.parse_statement();
        }

        // Trailing trivia and the zero-width EOF belong to the program
        self.eat_trivia();
        self.builder.finish_node(); // PROGRAM
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_statement(&mut self) {
        self.eat_trivia();
        let start = self.pos;

        match self.current_kind() {
            JsSyntaxKind::VarKw | JsSyntaxKind::LetKw | JsSyntaxKind::ConstKw => {
                self.parse_var_decl(false)
            }
            JsSyntaxKind::ExportKw => self.parse_export(),
            JsSyntaxKind::FunctionKw => self.parse_function(JsSyntaxKind::FunctionDecl),
            JsSyntaxKind::LBrace => self.parse_block(),
            JsSyntaxKind::IfKw => self.parse_if(),
            JsSyntaxKind::ForKw => self.parse_for(),
            JsSyntaxKind::WhileKw => self.parse_while(),
            JsSyntaxKind::DoKw => self.parse_do_while(),
            JsSyntaxKind::ReturnKw => self.parse_return(),
            JsSyntaxKind::BreakKw => self.parse_jump(JsSyntaxKind::BreakStmt),
            JsSyntaxKind::ContinueKw => self.parse_jump(JsSyntaxKind::ContinueStmt),
            JsSyntaxKind::Semicolon => {
                self.start_node(JsSyntaxKind::EmptyStmt);
                self.bump();
                self.builder.finish_node();
            }
            _ => self.parse_expr_stmt(),
        }

        // Always make progress, even on garbage input
        if self.pos == start && !self.at_end() {
            self.error_and_bump("Unexpected token");
        }
    }

    fn parse_expr_stmt(&mut self) {
        self.start_node(JsSyntaxKind::ExprStmt);
        self.parse_expression();
        self.consume_semicolon();
        self.builder.finish_node(); // EXPR_STMT
    }

    /// Parse a `var`/`let`/`const` declaration
    ///
    /// Inside a `for` header the declaration does not own the `;`.
    fn parse_var_decl(&mut self, in_for_header: bool) {
        self.start_node(JsSyntaxKind::VarDecl);
        self.bump(); // var / let / const

        loop {
            self.parse_declarator();
            if self.at(JsSyntaxKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }

        if !in_for_header {
            self.consume_semicolon();
        }
        self.builder.finish_node(); // VAR_DECL
    }

    fn parse_declarator(&mut self) {
        self.start_node(JsSyntaxKind::VarDeclarator);

        match self.current_kind() {
            JsSyntaxKind::Ident => {
                self.start_node(JsSyntaxKind::NameRef);
                self.bump();
                self.builder.finish_node();
            }
            // Destructuring patterns parse as literals of the same shape
            JsSyntaxKind::LBracket => self.parse_array(),
            JsSyntaxKind::LBrace => self.parse_object(),
            _ => self.error("Expected a binding name"),
        }

        if self.at(JsSyntaxKind::Eq) {
            self.bump();
            self.parse_assignment();
        }

        self.builder.finish_node(); // VAR_DECLARATOR
    }

    fn parse_export(&mut self) {
        self.start_node(JsSyntaxKind::ExportDecl);
        self.bump(); // export

        match self.current_kind() {
            JsSyntaxKind::VarKw | JsSyntaxKind::LetKw | JsSyntaxKind::ConstKw => {
                self.parse_var_decl(false)
            }
            JsSyntaxKind::FunctionKw => self.parse_function(JsSyntaxKind::FunctionDecl),
            JsSyntaxKind::LBrace => {
                // export { a, b as c } [from "module"];
                self.skip_balanced(JsSyntaxKind::LBrace, JsSyntaxKind::RBrace);
                if self.at_ident_text("from") {
                    self.bump();
                    self.expect(JsSyntaxKind::String);
                }
                self.consume_semicolon();
            }
            _ if self.at_ident_text("default") => {
                self.bump();
                if self.at(JsSyntaxKind::FunctionKw) {
                    self.parse_function(JsSyntaxKind::FunctionDecl);
                } else {
                    self.parse_expr_stmt();
                }
            }
            _ => self.error("Expected a declaration after 'export'"),
        }

        self.builder.finish_node(); // EXPORT_DECL
    }

    /// Parse `function name(params) { body }` as a declaration or expression
    fn parse_function(&mut self, kind: JsSyntaxKind) {
        self.start_node(kind);
        self.bump(); // function
        if self.at(JsSyntaxKind::Star) {
            self.bump();
        }
        if self.at(JsSyntaxKind::Ident) {
            self.bump();
        } else if kind == JsSyntaxKind::FunctionDecl {
            self.error("Expected a function name");
        }
        self.parse_param_list();
        self.parse_block();
        self.builder.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(JsSyntaxKind::ParamList);
        self.expect(JsSyntaxKind::LParen);
        while !self.at(JsSyntaxKind::RParen) && !self.at_end() {
            self.eat_trivia();
            let start = self.pos;
            if self.at(JsSyntaxKind::DotDotDot) {
                self.bump();
            }
            self.parse_assignment();
            if !self.at(JsSyntaxKind::RParen) {
                self.expect(JsSyntaxKind::Comma);
            }
            if self.pos == start {
                break;
            }
        }
        self.expect(JsSyntaxKind::RParen);
        self.builder.finish_node(); // PARAM_LIST
    }

    fn parse_block(&mut self) {
        self.start_node(JsSyntaxKind::Block);
        self.expect(JsSyntaxKind::LBrace);
        while !self.at(JsSyntaxKind::RBrace) && !self.at_end() {
            self.parse_statement();
        }
        self.expect(JsSyntaxKind::RBrace);
        self.builder.finish_node(); // BLOCK
    }

    fn parse_if(&mut self) {
        self.start_node(JsSyntaxKind::IfStmt);
        self.bump(); // if
        self.parse_condition();
        self.parse_statement();
        if self.at(JsSyntaxKind::ElseKw) {
            self.bump();
            self.parse_statement();
        }
        self.builder.finish_node(); // IF_STMT
    }

    fn parse_while(&mut self) {
        self.start_node(JsSyntaxKind::WhileStmt);
        self.bump(); // while
        self.parse_condition();
        self.parse_statement();
        self.builder.finish_node(); // WHILE_STMT
    }

    fn parse_do_while(&mut self) {
        self.start_node(JsSyntaxKind::DoWhileStmt);
        self.bump(); // do
        self.parse_statement();
        self.expect(JsSyntaxKind::WhileKw);
        self.parse_condition();
        if self.at(JsSyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node(); // DO_WHILE_STMT
    }

    /// `( expression )` of `if`/`while`, kept as a `ParenExpr`
    fn parse_condition(&mut self) {
        if self.at(JsSyntaxKind::LParen) {
            self.parse_paren();
        } else {
            self.error("Expected '('");
        }
    }

    /// Parse `for (init; test; update)`, `for (x in o)` and `for (x of o)`
    fn parse_for(&mut self) {
        self.start_node(JsSyntaxKind::ForStmt);
        self.bump(); // for
        self.expect(JsSyntaxKind::LParen);

        let saved_no_in = std::mem::replace(&mut self.no_in, true);
        match self.current_kind() {
            JsSyntaxKind::VarKw | JsSyntaxKind::LetKw | JsSyntaxKind::ConstKw => {
                self.parse_var_decl(true)
            }
            JsSyntaxKind::Semicolon => {}
            _ => self.parse_expression(),
        }
        self.no_in = saved_no_in;

        if self.at(JsSyntaxKind::InKw) || self.at_ident_text("of") {
            self.bump();
            self.parse_expression();
        } else {
            self.expect(JsSyntaxKind::Semicolon);
            if !self.at(JsSyntaxKind::Semicolon) {
                self.parse_expression();
            }
            self.expect(JsSyntaxKind::Semicolon);
            if !self.at(JsSyntaxKind::RParen) {
                self.parse_expression();
            }
        }

        self.expect(JsSyntaxKind::RParen);
        self.parse_statement();
        self.builder.finish_node(); // FOR_STMT
    }

    fn parse_return(&mut self) {
        self.start_node(JsSyntaxKind::ReturnStmt);
        self.bump(); // return
        if !self.at_statement_end() {
            self.parse_expression();
        }
        self.consume_semicolon();
        self.builder.finish_node(); // RETURN_STMT
    }

    fn parse_jump(&mut self, kind: JsSyntaxKind) {
        self.start_node(kind);
        self.bump(); // break / continue
        if self.at(JsSyntaxKind::Ident) && !self.has_newline_before() {
            self.bump();
        }
        self.consume_semicolon();
        self.builder.finish_node();
    }

    /// Accept a `;`, or insert one automatically where the grammar allows it
    fn consume_semicolon(&mut self) {
        if self.at(JsSyntaxKind::Semicolon) {
            self.bump();
        } else if !self.at_statement_end() {
            self.error("Expected ';'");
        }
    }

    fn at_statement_end(&self) -> bool {
        self.at(JsSyntaxKind::Semicolon)
            || self.at(JsSyntaxKind::RBrace)
            || self.at_end()
            || self.has_newline_before()
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Comma-separated expression list
    fn parse_expression(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_assignment();

        if self.at(JsSyntaxKind::Comma) {
            self.builder
                .start_node_at(checkpoint, JsSyntaxKind::SequenceExpr);
            while self.at(JsSyntaxKind::Comma) {
                self.bump();
                self.parse_assignment();
            }
            self.builder.finish_node(); // SEQUENCE_EXPR
        }
    }

    /// Assignment expressions are right-associative: `a = b = c` is `a = (b = c)`
    fn parse_assignment(&mut self) {
        if self.at_arrow_function() {
            self.parse_arrow();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_conditional();

        if self.current_kind().is_assign_op() {
            self.builder.start_node_at(checkpoint, JsSyntaxKind::AssignExpr);
            self.bump(); // operator
            self.parse_assignment();
            self.builder.finish_node(); // ASSIGN_EXPR
        }
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(0);

        if self.at(JsSyntaxKind::Question) {
            self.builder
                .start_node_at(checkpoint, JsSyntaxKind::ConditionalExpr);
            self.bump(); // ?
            let saved_no_in = std::mem::replace(&mut self.no_in, false);
            self.parse_assignment();
            self.no_in = saved_no_in;
            self.expect(JsSyntaxKind::Colon);
            self.parse_assignment();
            self.builder.finish_node(); // CONDITIONAL_EXPR
        }
    }

    fn parse_binary(&mut self, min_prec: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();

        loop {
            let op = self.current_kind();
            if self.no_in && op == JsSyntaxKind::InKw {
                break;
            }
            let Some(prec) = binary_precedence(op) else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let kind = match op {
                JsSyntaxKind::AmpAmp | JsSyntaxKind::PipePipe | JsSyntaxKind::QuestionQuestion => {
                    JsSyntaxKind::LogicalExpr
                }
                _ => JsSyntaxKind::BinaryExpr,
            };
            self.builder.start_node_at(checkpoint, kind);
            self.bump(); // operator
            // `**` is right-associative, everything else binds left
            let next_min = if op == JsSyntaxKind::StarStar { prec } else { prec + 1 };
            self.parse_binary(next_min);
            self.builder.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        match self.current_kind() {
            JsSyntaxKind::Bang
            | JsSyntaxKind::Tilde
            | JsSyntaxKind::Plus
            | JsSyntaxKind::Minus
            | JsSyntaxKind::TypeofKw
            | JsSyntaxKind::VoidKw
            | JsSyntaxKind::DeleteKw => {
                self.start_node(JsSyntaxKind::UnaryExpr);
                self.bump();
                self.parse_unary();
                self.builder.finish_node();
            }
            JsSyntaxKind::PlusPlus | JsSyntaxKind::MinusMinus => {
                self.start_node(JsSyntaxKind::UpdateExpr);
                self.bump();
                self.parse_unary();
                self.builder.finish_node();
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_call_member();

        if matches!(
            self.current_kind(),
            JsSyntaxKind::PlusPlus | JsSyntaxKind::MinusMinus
        ) && !self.has_newline_before()
        {
            self.builder.start_node_at(checkpoint, JsSyntaxKind::UpdateExpr);
            self.bump();
            self.builder.finish_node();
        }
    }

    fn parse_call_member(&mut self) {
        let checkpoint = self.checkpoint();

        if self.at(JsSyntaxKind::NewKw) {
            self.start_node(JsSyntaxKind::NewExpr);
            self.bump(); // new
            self.parse_member_only();
            if self.at(JsSyntaxKind::LParen) {
                self.parse_args();
            }
            self.builder.finish_node(); // NEW_EXPR
        } else {
            self.parse_primary();
        }

        loop {
            match self.current_kind() {
                JsSyntaxKind::Dot | JsSyntaxKind::QuestionDot => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::MemberExpr);
                    self.bump();
                    match self.current_kind() {
                        JsSyntaxKind::LParen => self.parse_args(),
                        JsSyntaxKind::LBracket => self.parse_index_tail(),
                        kind if kind == JsSyntaxKind::Ident || kind.is_keyword() => self.bump(),
                        _ => self.error("Expected a property name"),
                    }
                    self.builder.finish_node();
                }
                JsSyntaxKind::LBracket => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::IndexExpr);
                    self.parse_index_tail();
                    self.builder.finish_node();
                }
                JsSyntaxKind::LParen => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::CallExpr);
                    self.parse_args();
                    self.builder.finish_node();
                }
                // Tagged template
                JsSyntaxKind::Template => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::CallExpr);
                    self.bump();
                    self.builder.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Callee of `new`: a primary followed by member accesses only
    fn parse_member_only(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        loop {
            match self.current_kind() {
                JsSyntaxKind::Dot => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::MemberExpr);
                    self.bump();
                    if self.at(JsSyntaxKind::Ident) || self.current_kind().is_keyword() {
                        self.bump();
                    } else {
                        self.error("Expected a property name");
                    }
                    self.builder.finish_node();
                }
                JsSyntaxKind::LBracket => {
                    self.builder.start_node_at(checkpoint, JsSyntaxKind::IndexExpr);
                    self.parse_index_tail();
                    self.builder.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_index_tail(&mut self) {
        self.bump(); // [
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.parse_expression();
        self.no_in = saved_no_in;
        self.expect(JsSyntaxKind::RBracket);
    }

    fn parse_args(&mut self) {
        self.start_node(JsSyntaxKind::ArgList);
        self.bump(); // (
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        while !self.at(JsSyntaxKind::RParen) && !self.at_end() {
            self.eat_trivia();
            let start = self.pos;
            if self.at(JsSyntaxKind::DotDotDot) {
                self.bump();
            }
            self.parse_assignment();
            if !self.at(JsSyntaxKind::RParen) {
                self.expect(JsSyntaxKind::Comma);
            }
            if self.pos == start {
                break;
            }
        }
        self.no_in = saved_no_in;
        self.expect(JsSyntaxKind::RParen);
        self.builder.finish_node(); // ARG_LIST
    }

    fn parse_primary(&mut self) {
        match self.current_kind() {
            JsSyntaxKind::Ident | JsSyntaxKind::ThisKw => {
                self.start_node(JsSyntaxKind::NameRef);
                self.bump();
                self.builder.finish_node();
            }
            kind if kind.is_literal() => {
                self.start_node(JsSyntaxKind::Literal);
                self.bump();
                self.builder.finish_node();
            }
            JsSyntaxKind::LParen => self.parse_paren(),
            JsSyntaxKind::LBracket => self.parse_array(),
            JsSyntaxKind::LBrace => self.parse_object(),
            JsSyntaxKind::FunctionKw => self.parse_function(JsSyntaxKind::FunctionExpr),
            JsSyntaxKind::RParen
            | JsSyntaxKind::RBrace
            | JsSyntaxKind::RBracket
            | JsSyntaxKind::Semicolon
            | JsSyntaxKind::Eof => self.error("Expected an expression"),
            _ => self.error_and_bump("Expected an expression"),
        }
    }

    fn parse_paren(&mut self) {
        self.start_node(JsSyntaxKind::ParenExpr);
        self.bump(); // (
        let saved_no_in = std::mem::replace(&mut self.no_in, false);
        self.parse_expression();
        self.no_in = saved_no_in;
        self.expect(JsSyntaxKind::RParen);
        self.builder.finish_node(); // PAREN_EXPR
    }

    fn parse_array(&mut self) {
        self.start_node(JsSyntaxKind::ArrayExpr);
        self.bump(); // [
        while !self.at(JsSyntaxKind::RBracket) && !self.at_end() {
            self.eat_trivia();
            let start = self.pos;
            if self.at(JsSyntaxKind::Comma) {
                // Hole
                self.bump();
                continue;
            }
            if self.at(JsSyntaxKind::DotDotDot) {
                self.bump();
            }
            self.parse_assignment();
            if !self.at(JsSyntaxKind::RBracket) {
                self.expect(JsSyntaxKind::Comma);
            }
            if self.pos == start {
                break;
            }
        }
        self.expect(JsSyntaxKind::RBracket);
        self.builder.finish_node(); // ARRAY_EXPR
    }

    fn parse_object(&mut self) {
        self.start_node(JsSyntaxKind::ObjectExpr);
        self.bump(); // {
        while !self.at(JsSyntaxKind::RBrace) && !self.at_end() {
            self.eat_trivia();
            let start = self.pos;
            self.parse_property();
            if !self.at(JsSyntaxKind::RBrace) {
                self.expect(JsSyntaxKind::Comma);
            }
            if self.pos == start {
                break;
            }
        }
        self.expect(JsSyntaxKind::RBrace);
        self.builder.finish_node(); // OBJECT_EXPR
    }

    fn parse_property(&mut self) {
        self.start_node(JsSyntaxKind::Property);

        if self.at(JsSyntaxKind::DotDotDot) {
            self.bump();
            self.parse_assignment();
            self.builder.finish_node();
            return;
        }

        match self.current_kind() {
            JsSyntaxKind::LBracket => {
                self.bump();
                self.parse_assignment();
                self.expect(JsSyntaxKind::RBracket);
            }
            JsSyntaxKind::Ident | JsSyntaxKind::String | JsSyntaxKind::Number => self.bump(),
            kind if kind.is_keyword() => self.bump(),
            _ => self.error("Expected a property key"),
        }

        match self.current_kind() {
            JsSyntaxKind::Colon => {
                self.bump();
                self.parse_assignment();
            }
            JsSyntaxKind::LParen => {
                // Method shorthand
                self.parse_param_list();
                self.parse_block();
            }
            // Shorthand with default, only valid in patterns: `{ a = 1 } = o`
            JsSyntaxKind::Eq => {
                self.bump();
                self.parse_assignment();
            }
            _ => {}
        }

        self.builder.finish_node(); // PROPERTY
    }

    /// `x => ...` or `(a, b) => ...`
    fn at_arrow_function(&self) -> bool {
        match self.current_kind() {
            JsSyntaxKind::Ident => self.nth_kind(1) == JsSyntaxKind::Arrow,
            JsSyntaxKind::LParen => {
                let Some(start) = self.significant_index(0) else {
                    return false;
                };
                let mut depth = 0usize;
                let mut idx = start;
                while let Some(token) = self.tokens.get(idx) {
                    match token.kind {
                        JsSyntaxKind::LParen => depth += 1,
                        JsSyntaxKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return self.next_significant_kind(idx + 1)
                                    == JsSyntaxKind::Arrow;
                            }
                        }
                        JsSyntaxKind::Eof => return false,
                        _ => {}
                    }
                    idx += 1;
                }
                false
            }
            _ => false,
        }
    }

    fn parse_arrow(&mut self) {
        self.start_node(JsSyntaxKind::ArrowExpr);
        if self.at(JsSyntaxKind::Ident) {
            self.start_node(JsSyntaxKind::ParamList);
            self.bump();
            self.builder.finish_node();
        } else {
            self.parse_param_list();
        }
        self.expect(JsSyntaxKind::Arrow);
        if self.at(JsSyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.parse_assignment();
        }
        self.builder.finish_node(); // ARROW_EXPR
    }

    // ------------------------------------------------------------------
    // Helper methods
    // ------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.current_kind() == JsSyntaxKind::Eof
    }

    /// Index of the `n`th significant token at or after the cursor
    fn significant_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| idx)
    }

    fn next_significant_kind(&self, from: usize) -> JsSyntaxKind {
        self.tokens
            .iter()
            .skip(from)
            .find(|t| !t.kind.is_trivia())
            .map_or(JsSyntaxKind::Eof, |t| t.kind)
    }

    fn nth_kind(&self, n: usize) -> JsSyntaxKind {
        self.significant_index(n)
            .map_or(JsSyntaxKind::Eof, |idx| self.tokens[idx].kind)
    }

    fn current(&self) -> Option<&CstToken> {
        self.significant_index(0).map(|idx| &self.tokens[idx])
    }

    fn current_kind(&self) -> JsSyntaxKind {
        self.current().map_or(JsSyntaxKind::Eof, |t| t.kind)
    }

    fn at(&self, kind: JsSyntaxKind) -> bool {
        self.current_kind() == kind
    }

    /// Contextual keywords (`of`, `from`, `default`) lex as identifiers
    fn at_ident_text(&self, text: &str) -> bool {
        self.current()
            .is_some_and(|t| t.kind == JsSyntaxKind::Ident && t.text == text)
    }

    /// Whether a line break separates the previous significant token from the current one
    fn has_newline_before(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| {
                t.kind == JsSyntaxKind::Newline
                    || (t.kind == JsSyntaxKind::CommentBlock && t.text.contains('\n'))
            })
    }

    /// Flush pending trivia into the currently open node
    fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.add_token(token);
            self.pos += 1;
        }
    }

    fn start_node(&mut self, kind: JsSyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind);
    }

    fn checkpoint(&mut self) -> rowan::Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    /// Add the current significant token to the tree and move past it
    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(token) = self.tokens.get(self.pos)
            && token.kind != JsSyntaxKind::Eof
        {
            self.builder.add_token(token);
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: JsSyntaxKind) {
        if self.at(kind) {
            self.bump();
        } else {
            self.error(format!("Expected {kind}"));
        }
    }

    /// Consume tokens up to and including the bracket matching the current one
    fn skip_balanced(&mut self, open: JsSyntaxKind, close: JsSyntaxKind) {
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current_kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
        }
    }

    fn current_span(&self) -> Range<usize> {
        match self.current() {
            Some(token) => token.span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |t| t.span.end);
                end..end
            }
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let found = self.current_kind();
        let message = format!("{}, found {found}", message.into());
        self.errors.push(ParseError::new(message, self.current_span()));
    }

    fn error_and_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(JsSyntaxKind::Error);
        self.bump();
        self.builder.finish_node(); // ERROR
    }
}
