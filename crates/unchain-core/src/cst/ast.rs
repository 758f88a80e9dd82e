//! Typed AST layer over CST
//!
//! Wrappers give the ESTree view of the tree that lint rules reason about:
//! parentheses are not nodes there, so `left`, `right`, `init` and
//! [`parent_expr`] look through `ParenExpr` wrappers.
//!
//! # Example
//!
//! ```ignore
//! use unchain_core::cst::{parse_program, ast::{AssignExpr, AstNode}};
//!
//! let parse = parse_program("a = (b)");
//! let assign = parse.root.descendants().find_map(AssignExpr::cast).unwrap();
//! assert_eq!(assign.right().unwrap().text().to_string(), "b");
//! ```

use super::{JsSyntaxKind, JsSyntaxNode, JsSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: JsSyntaxKind) -> bool;
    fn cast(node: JsSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &JsSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: JsSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: JsSyntaxKind) -> bool {
                kind == JsSyntaxKind::$kind
            }

            fn cast(node: JsSyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &JsSyntaxNode {
                &self.syntax
            }
        }
    };
}

/// Strip any number of `ParenExpr` wrappers
pub fn skip_parens(node: JsSyntaxNode) -> JsSyntaxNode {
    let mut current = node;
    while current.kind() == JsSyntaxKind::ParenExpr {
        match current.first_child() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// The ESTree parent of an expression: the nearest ancestor that is not a
/// `ParenExpr`
pub fn parent_expr(node: &JsSyntaxNode) -> Option<JsSyntaxNode> {
    node.ancestors()
        .skip(1)
        .find(|ancestor| ancestor.kind() != JsSyntaxKind::ParenExpr)
}

/// First direct child token matching `pred`
fn child_token(
    parent: &JsSyntaxNode,
    pred: impl Fn(JsSyntaxKind) -> bool,
) -> Option<JsSyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| pred(t.kind()))
}

// ============================================================================
// Program and statements
// ============================================================================

ast_node!(
    /// Root of every parse
    Program,
    Program
);

impl Program {
    pub fn statements(&self) -> impl Iterator<Item = JsSyntaxNode> + '_ {
        self.syntax.children().filter(|n| n.kind().is_statement())
    }
}

ast_node!(
    /// An expression followed by an optional `;`
    ExprStmt,
    ExprStmt
);

impl ExprStmt {
    pub fn expr(&self) -> Option<JsSyntaxNode> {
        self.syntax.first_child()
    }

    pub fn semicolon(&self) -> Option<JsSyntaxToken> {
        child_token(&self.syntax, |k| k == JsSyntaxKind::Semicolon)
    }
}

ast_node!(
    /// `var`, `let` or `const` declaration with one or more declarators
    VarDecl,
    VarDecl
);

impl VarDecl {
    /// The `var`/`let`/`const` keyword
    pub fn keyword(&self) -> Option<JsSyntaxToken> {
        child_token(&self.syntax, |k| {
            matches!(
                k,
                JsSyntaxKind::VarKw | JsSyntaxKind::LetKw | JsSyntaxKind::ConstKw
            )
        })
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + '_ {
        self.syntax.children().filter_map(VarDeclarator::cast)
    }
}

ast_node!(
    /// One `binding [= init]` inside a declaration
    VarDeclarator,
    VarDeclarator
);

impl VarDeclarator {
    pub fn binding(&self) -> Option<JsSyntaxNode> {
        self.syntax.first_child()
    }

    pub fn eq_token(&self) -> Option<JsSyntaxToken> {
        child_token(&self.syntax, |k| k == JsSyntaxKind::Eq)
    }

    /// Initializer, looking through parentheses
    pub fn init(&self) -> Option<JsSyntaxNode> {
        self.eq_token()?;
        self.syntax.children().nth(1).map(skip_parens)
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(
    /// `left op right` where `op` is `=` or a compound assignment operator
    AssignExpr,
    AssignExpr
);

impl AssignExpr {
    pub fn operator(&self) -> Option<JsSyntaxToken> {
        child_token(&self.syntax, JsSyntaxKind::is_assign_op)
    }

    /// Whether this is a plain `=` assignment
    pub fn is_plain(&self) -> bool {
        self.operator()
            .is_some_and(|op| op.kind() == JsSyntaxKind::Eq)
    }

    /// Assignment target, looking through parentheses
    pub fn left(&self) -> Option<JsSyntaxNode> {
        self.syntax.first_child().map(skip_parens)
    }

    /// Assigned value, looking through parentheses
    pub fn right(&self) -> Option<JsSyntaxNode> {
        self.syntax.children().nth(1).map(skip_parens)
    }
}

ast_node!(
    /// `( expression )`
    ParenExpr,
    ParenExpr
);

impl ParenExpr {
    pub fn expr(&self) -> Option<JsSyntaxNode> {
        self.syntax.first_child()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_program;

    fn first<N: AstNode>(source: &str) -> N {
        parse_program(source)
            .root
            .descendants()
            .find_map(N::cast)
            .expect("node not found")
    }

    #[test]
    fn test_assign_expr_accessors() {
        let assign: AssignExpr = first("a += (b)");
        assert_eq!(assign.operator().unwrap().text(), "+=");
        assert!(!assign.is_plain());
        assert_eq!(assign.left().unwrap().text().to_string(), "a");
        assert_eq!(assign.right().unwrap().kind(), JsSyntaxKind::NameRef);
    }

    #[test]
    fn test_left_looks_through_parens() {
        let assign: AssignExpr = first("((b)) = (c)");
        assert!(assign.is_plain());
        let left = assign.left().unwrap();
        assert_eq!(left.kind(), JsSyntaxKind::NameRef);
        assert_eq!(left.text().to_string(), "b");
    }

    #[test]
    fn test_parent_expr_skips_parens() {
        let parse = parse_program("a = (b = c)");
        let inner = parse
            .root
            .descendants()
            .filter_map(AssignExpr::cast)
            .nth(1)
            .unwrap();
        let parent = parent_expr(inner.syntax()).unwrap();
        assert_eq!(parent.kind(), JsSyntaxKind::AssignExpr);
    }

    #[test]
    fn test_declarations() {
        let decl: VarDecl = first("let a, b = 0;");
        assert_eq!(decl.keyword().unwrap().kind(), JsSyntaxKind::LetKw);
        let declarators: Vec<_> = decl.declarators().collect();
        assert_eq!(declarators.len(), 2);
        assert!(declarators[0].init().is_none());
        assert_eq!(declarators[1].init().unwrap().text().to_string(), "0");
        assert_eq!(declarators[1].binding().unwrap().text().to_string(), "b");
    }

    #[test]
    fn test_program_statements() {
        let program: Program = first("a = 1;\nvar b;\n;");
        let kinds: Vec<_> = program.statements().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                JsSyntaxKind::ExprStmt,
                JsSyntaxKind::VarDecl,
                JsSyntaxKind::EmptyStmt
            ]
        );
        let stmt: ExprStmt = first("a = 1;");
        assert!(stmt.semicolon().is_some());
        assert_eq!(stmt.expr().unwrap().kind(), JsSyntaxKind::AssignExpr);
    }
}
