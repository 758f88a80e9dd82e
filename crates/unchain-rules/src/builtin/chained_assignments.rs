//! Chained assignment detection and splitting
//!
//! `a = b = c;` is reported at the nested link `b = c` and rewritten as
//!
//! ```text
//! a = c;
//! b = c;
//! ```
//!
//! Every link of a chain is reported, so an N-target chain yields N-1
//! diagnostics. Overlapping edits are deferred by the fix loop, which peels
//! one link off per pass.
//!
//! The rewrite never re-serializes the tree. All text is sliced out of the
//! original buffer at token boundaries, so comments, line breaks and
//! parentheses inside the copied ranges survive unchanged.

use std::ops::Range;

use tracing::debug;
use unchain_core::cst::ast::{AssignExpr, AstNode, VarDecl, VarDeclarator, parent_expr, skip_parens};
use unchain_core::cst::{JsSyntaxKind, JsSyntaxNode, JsSyntaxToken, SourceCode};
use unchain_core::{CodeSuggestion, Diagnostic, DiagnosticCategory, Result, Severity, UnchainError};

/// Rule ID for chained assignments
pub const NO_CHAINED_ASSIGNMENTS: &str = "style/no-chained-assignments";

/// Message attached to every chain link
pub const MESSAGE: &str = "chained assignment detected";

/// A single replace-range edit over the source buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range to replace
    pub range: Range<usize>,
    pub replacement: String,
}

/// Check one assignment and report it if it is a chain link
///
/// A safe fix is attached when [`is_safely_fixable`] holds and the file
/// parsed without errors.
pub fn check_chained_assignment(
    source: &SourceCode,
    assign: &AssignExpr,
) -> Result<Option<Diagnostic>> {
    if !is_chain_link(assign) {
        return Ok(None);
    }

    let mut diagnostic = Diagnostic::new(
        NO_CHAINED_ASSIGNMENTS,
        Severity::Warning,
        MESSAGE,
        source.node_location(assign.syntax()),
    )
    .with_category(DiagnosticCategory::Style);

    if !source.has_errors() && is_safely_fixable(assign) {
        let edit = split_chained_assignment(source, assign)?;
        diagnostic = diagnostic.with_suggestion(CodeSuggestion::safe(
            "Split the chained assignment into separate statements",
            edit.replacement,
            source.location(edit.range),
        ));
    } else {
        debug!(
            "No fix offered for chain link at {}",
            source.node_location(assign.syntax())
        );
    }

    Ok(Some(diagnostic))
}

/// Whether an assignment is a chain link
///
/// True when its parent, looking through parentheses, is another assignment
/// or a declarator initializer. The outermost assignment of a chain is not
/// a link.
pub fn is_chain_link(assign: &AssignExpr) -> bool {
    parent_expr(assign.syntax()).is_some_and(|parent| {
        AssignExpr::can_cast(parent.kind()) || VarDeclarator::can_cast(parent.kind())
    })
}

/// The innermost non-assignment expression on the right of a chain
pub fn terminal_right_side(assign: &AssignExpr) -> Result<JsSyntaxNode> {
    let mut current = assign
        .right()
        .ok_or_else(|| UnchainError::malformed_tree("assignment has no right-hand side"))?;

    while let Some(inner) = AssignExpr::cast(current.clone()) {
        current = inner
            .right()
            .ok_or_else(|| UnchainError::malformed_tree("assignment has no right-hand side"))?;
    }

    Ok(current)
}

/// The nearest expression statement or declaration containing `node`
pub fn enclosing_statement(node: &JsSyntaxNode) -> Result<JsSyntaxNode> {
    node.ancestors()
        .skip(1)
        .find(|ancestor| {
            matches!(
                ancestor.kind(),
                JsSyntaxKind::ExprStmt | JsSyntaxKind::VarDecl
            )
        })
        .ok_or_else(|| {
            UnchainError::malformed_tree("assignment is not inside a statement or declaration")
        })
}

/// Whether splitting this link preserves behavior and keeps the program valid
///
/// Holds when:
/// - the link and every assignment nested on its right use plain `=`
/// - no assignment nested on its right is wrapped in parentheses
/// - the chain runs to the end of its statement: only assignments (through
///   their right operand) sit between the link and an expression statement
///   or the last declarator of a declaration
/// - that statement sits directly in a statement list (program, block or a
///   top-level `export`), so the appended statement runs unconditionally
///   right after it
pub fn is_safely_fixable(assign: &AssignExpr) -> bool {
    right_descent_is_plain(assign) && chain_ends_statement(assign)
}

fn right_descent_is_plain(assign: &AssignExpr) -> bool {
    let mut current = assign.clone();
    loop {
        if !current.is_plain() {
            return false;
        }
        let Some(right) = current.syntax().children().nth(1) else {
            return false;
        };
        match AssignExpr::cast(right.clone()) {
            Some(inner) => current = inner,
            None => return !AssignExpr::can_cast(skip_parens(right).kind()),
        }
    }
}

fn chain_ends_statement(assign: &AssignExpr) -> bool {
    let mut child = assign.syntax().clone();

    for ancestor in assign.syntax().ancestors().skip(1) {
        match ancestor.kind() {
            JsSyntaxKind::AssignExpr => {
                if ancestor.children().nth(1).as_ref() != Some(&child) {
                    return false;
                }
                child = ancestor;
            }
            JsSyntaxKind::ExprStmt => return in_statement_list(&ancestor),
            JsSyntaxKind::VarDeclarator => {
                let Some(decl) = ancestor.parent().and_then(VarDecl::cast) else {
                    return false;
                };
                let is_last = decl
                    .declarators()
                    .last()
                    .is_some_and(|last| last.syntax() == &ancestor);
                return is_last && in_statement_list(decl.syntax());
            }
            _ => return false,
        }
    }

    false
}

fn in_statement_list(statement: &JsSyntaxNode) -> bool {
    match statement.parent().map(|parent| (parent.kind(), parent)) {
        Some((JsSyntaxKind::Program | JsSyntaxKind::Block, _)) => true,
        Some((JsSyntaxKind::ExportDecl, export)) => {
            export
                .parent()
                .is_some_and(|parent| parent.kind() == JsSyntaxKind::Program)
        }
        _ => false,
    }
}

fn is_assign_operator(token: &JsSyntaxToken) -> bool {
    token.kind().is_assign_op()
}

fn token_start(token: Option<&JsSyntaxToken>, what: &str) -> Result<usize> {
    token
        .map(|token| SourceCode::token_range(token).start)
        .ok_or_else(|| UnchainError::malformed_tree(format!("no token after {what}")))
}

/// Compute the edit that splits off one link of a chain
///
/// For the link `b = c` in `a = b = c;` the statement tail starting at `b`
/// is replaced by the rest of the statement after the link's operator,
/// followed on a new line by `b = <terminal value>`:
///
/// ```text
/// a = b = c;   ->   a = c;
///                   b = c;
/// ```
///
/// The operator keeps the whitespace written around it, and the terminal
/// value is copied with everything after it up to the statement end (its
/// parentheses and the `;`).
pub fn split_chained_assignment(source: &SourceCode, assign: &AssignExpr) -> Result<TextEdit> {
    let left = assign
        .left()
        .ok_or_else(|| UnchainError::malformed_tree("assignment has no target"))?;
    let right_side = terminal_right_side(assign)?;
    let statement = enclosing_statement(assign.syntax())?;
    let statement_end = source.node_range(&statement).end;

    // Terminal value through the end of the statement
    let value_operator = source
        .find_token_before(source.node_range(&right_side).start, is_assign_operator)
        .ok_or_else(|| UnchainError::malformed_tree("no operator before the assigned value"))?;
    let value_start = token_start(
        source.token_after_token(value_operator),
        "the value operator",
    )?;
    let right_text = source.slice(value_start..statement_end);

    // Operator of this link with the whitespace around it
    let left_range = source.node_range(&left);
    let operator = source
        .find_token_after(left_range.end, is_assign_operator)
        .ok_or_else(|| UnchainError::malformed_tree("no operator after the assignment target"))?;
    let operator_range = SourceCode::token_range(operator);
    let before_operator = source
        .token_before_token(operator)
        .map_or(operator_range.start, |token| SourceCode::token_range(token).end);
    let after_operator = token_start(source.token_after_token(operator), "the link operator")?;
    let operator_text = source.slice(before_operator..after_operator);

    // The rest of the statement keeps the remaining links
    let remainder = source.slice(after_operator..statement_end);

    let target_operator = source
        .find_token_before(left_range.start, is_assign_operator)
        .ok_or_else(|| UnchainError::malformed_tree("no operator before the assignment target"))?;
    let start = token_start(
        source.token_after_token(target_operator),
        "the target operator",
    )?;

    let replacement = format!(
        "{remainder}\n{}{operator_text}{right_text}",
        source.slice(left_range)
    );

    Ok(TextEdit {
        range: start..statement_end,
        replacement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceCode {
        SourceCode::parse("test.js", text)
    }

    fn assignments(source: &SourceCode) -> Vec<AssignExpr> {
        source
            .root()
            .descendants()
            .filter_map(AssignExpr::cast)
            .collect()
    }

    fn links(source: &SourceCode) -> Vec<AssignExpr> {
        assignments(source)
            .into_iter()
            .filter(is_chain_link)
            .collect()
    }

    /// Apply the edit for the first link of `text`
    fn split_first(text: &str) -> String {
        let source = parse(text);
        let link = links(&source).into_iter().next().expect("no chain link");
        let edit = split_chained_assignment(&source, &link).unwrap();
        let mut output = text.to_string();
        output.replace_range(edit.range, &edit.replacement);
        output
    }

    #[test]
    fn test_chain_links_exclude_outermost_assignment() {
        let source = parse("a = b = c = d;");
        let found: Vec<_> = links(&source)
            .iter()
            .map(|link| source.text_of(link.syntax()).to_string())
            .collect();
        assert_eq!(found, vec!["b = c = d", "c = d"]);
    }

    #[test]
    fn test_declarator_initializer_is_a_link() {
        let source = parse("let foo = bar = 100;");
        assert_eq!(links(&source).len(), 1);
    }

    #[test]
    fn test_flat_code_has_no_links() {
        for text in [
            "var a, b, c,\nd = 0;",
            "const a = 1, b = 2, c = 3;",
            "var a = 1 + (b === 10 ? 5 : 4);",
            "for(var a = 0, b = 0;;){}",
            "x = a ? b = 1 : c;",
            "f(a = 1);",
        ] {
            assert!(links(&parse(text)).is_empty(), "{text:?}");
        }
    }

    #[test]
    fn test_parenthesized_link_is_still_a_link() {
        let source = parse("a = (b = c);");
        assert_eq!(links(&source).len(), 1);
    }

    #[test]
    fn test_terminal_right_side_skips_nested_links() {
        let source = parse("a = b = c = (d + 1);");
        let link = &links(&source)[0];
        let value = terminal_right_side(link).unwrap();
        assert_eq!(source.text_of(&value), "d + 1");
    }

    #[test]
    fn test_enclosing_statement_kinds() {
        let source = parse("var a = b = c;");
        let statement = enclosing_statement(links(&source)[0].syntax()).unwrap();
        assert_eq!(statement.kind(), JsSyntaxKind::VarDecl);

        let source = parse("a = b = c;");
        let statement = enclosing_statement(links(&source)[0].syntax()).unwrap();
        assert_eq!(statement.kind(), JsSyntaxKind::ExprStmt);
    }

    #[test]
    fn test_enclosing_statement_missing_is_malformed() {
        let source = parse("for (a = b = c;;) {}");
        let link = &links(&source)[0];
        let err = enclosing_statement(link.syntax()).unwrap_err();
        assert!(matches!(err, UnchainError::MalformedTree { .. }));
    }

    #[test]
    fn test_split_declaration() {
        assert_eq!(split_first("var a = b = c;"), "var a = c;\nb = c;");
    }

    #[test]
    fn test_split_keeps_operator_spacing() {
        assert_eq!(split_first("a=b=c"), "a=c\nb=c");
        assert_eq!(split_first("a\n=b\n=c"), "a\n=c\nb\n=c");
    }

    #[test]
    fn test_split_parenthesized_operands() {
        assert_eq!(
            split_first("var a = (b) = (((c)))"),
            "var a = (((c)))\nb = (((c)))"
        );
        assert_eq!(split_first("var a = ((b)) = (c)"), "var a = (c)\nb = (c)");
        assert_eq!(
            split_first("var a =\n((b))\n = (c)"),
            "var a =\n(c)\nb\n = (c)"
        );
    }

    #[test]
    fn test_split_complex_values() {
        assert_eq!(
            split_first("var a = b = ( (c * 12) + 2)"),
            "var a = ( (c * 12) + 2)\nb = ( (c * 12) + 2)"
        );
        assert_eq!(
            split_first("a = b = '=' + c + 'foo';"),
            "a = '=' + c + 'foo';\nb = '=' + c + 'foo';"
        );
        assert_eq!(
            split_first("a = b = 7 * 12 + 5;"),
            "a = 7 * 12 + 5;\nb = 7 * 12 + 5;"
        );
        assert_eq!(
            split_first("x = y = z == 1;"),
            "x = z == 1;\ny = z == 1;"
        );
    }

    #[test]
    fn test_split_outermost_link_of_deep_chain() {
        assert_eq!(split_first("a = b = c = d;"), "a = c = d;\nb = d;");
    }

    #[test]
    fn test_split_keeps_trailing_comment_outside() {
        assert_eq!(
            split_first("a = b = c; // note"),
            "a = c;\nb = c; // note"
        );
    }

    #[test]
    fn test_split_compound_outer_assignment() {
        assert_eq!(split_first("a += b = c;"), "a += c;\nb = c;");
    }

    #[test]
    fn test_fixable_chains() {
        for text in [
            "var a = b = c;",
            "a = b = c = d;",
            "a += b = c;",
            "export let a = b = 1;",
            "if (x) { a = b = c; }",
            "function f() { var a = b = c; }",
            "var x = 1, a = b = c;",
        ] {
            let source = parse(text);
            assert!(
                links(&source).iter().all(is_safely_fixable),
                "{text:?} should be fixable"
            );
        }
    }

    #[test]
    fn test_unfixable_chains() {
        for text in [
            "a = b += c;",
            "a = b = c += d;",
            "a = (b = c);",
            "(a = b = c);",
            "var a = b = c, d = 1;",
            "for (var a = b = c;;) {}",
            "if (x) a = b = c;",
            "f(() => a = b = c);",
            "a = b = c, d;",
        ] {
            let source = parse(text);
            let found = links(&source);
            assert!(!found.is_empty(), "{text:?} should contain a link");
            assert!(
                !found.iter().any(is_safely_fixable),
                "{text:?} should not be fixable"
            );
        }
    }

    #[test]
    fn test_check_reports_position_and_fix() {
        let source = parse("var a = b = c;");
        let link = &links(&source)[0];
        let diagnostic = check_chained_assignment(&source, link).unwrap().unwrap();

        assert_eq!(diagnostic.rule_id, NO_CHAINED_ASSIGNMENTS);
        assert_eq!(diagnostic.message, MESSAGE);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!((diagnostic.location.line, diagnostic.location.column), (1, 9));

        let suggestion = &diagnostic.suggestions[0];
        assert_eq!(suggestion.replacement, "c;\nb = c;");
        assert_eq!(suggestion.location.range(), 8..14);
        assert!(diagnostic.has_safe_fixes());
    }

    #[test]
    fn test_check_skips_outermost_assignment() {
        let source = parse("a = b;");
        let assign = &assignments(&source)[0];
        assert!(check_chained_assignment(&source, assign).unwrap().is_none());
    }

    #[test]
    fn test_check_without_fix_for_compound_link() {
        let source = parse("a = b += c;");
        let link = &links(&source)[0];
        let diagnostic = check_chained_assignment(&source, link).unwrap().unwrap();
        assert!(diagnostic.suggestions.is_empty());
    }

    #[test]
    fn test_check_without_fix_when_file_has_errors() {
        let source = parse("a = b = c;\nlet = ;");
        assert!(source.has_errors());
        let link = &links(&source)[0];
        let diagnostic = check_chained_assignment(&source, link).unwrap().unwrap();
        assert!(!diagnostic.is_fixable());
    }
}
