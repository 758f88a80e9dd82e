//! Tests for CST construction across the lexer, parser and typed layer

use super::*;
use crate::cst::ast::{AssignExpr, AstNode, VarDeclarator, parent_expr};

const CORPUS: &[&str] = &[
    "var a = b = c;",
    "a=b=c=d=e",
    "let foo = bar = cee = 100;",
    "var a =\n((b))\n = (c)",
    "a = b = '=' + c + 'foo';",
    "x = a ? b = 1 : (c = 2);",
    "for(var a = 0, b = 0;;){}",
    "export let a,\n b = 0;",
    "if (a == b) { c = d = e; }\n",
    "  // leading comment\n\ta = /* inline */ b\r\n",
    "obj.x = obj.y = [1, 2, {z: 3}];",
    "const fn = (a, b = 1) => { return a = b; };",
];

#[test]
fn test_lossless_round_trip() {
    for source in CORPUS {
        let parse = parse_program(source);
        assert!(parse.errors.is_empty(), "{source:?}: {:?}", parse.errors);
        assert_eq!(&parse.root.text().to_string(), source);
    }
}

#[test]
fn test_lossless_round_trip_with_errors() {
    for source in ["var = = ;", "a = (b = ", "}}} a = 1", "let x = 'unterminated\nx = 2"] {
        let parse = parse_program(source);
        assert!(parse.has_errors(), "{source:?} should not parse cleanly");
        assert_eq!(parse.root.text().to_string(), source);
    }
}

#[test]
fn test_every_node_starts_with_a_significant_token() {
    for source in CORPUS {
        let parse = parse_program(source);
        for node in parse.root.descendants().skip(1) {
            if let Some(first) = node.first_token() {
                assert!(
                    !first.kind().is_trivia(),
                    "{:?} in {source:?} starts with trivia",
                    node.kind()
                );
            }
        }
    }
}

#[test]
fn test_chain_parents_in_estree_view() {
    let parse = parse_program("var a = b = (c = d);");
    let assigns: Vec<_> = parse.root.descendants().filter_map(AssignExpr::cast).collect();
    assert_eq!(assigns.len(), 2);

    let outer_parent = parent_expr(assigns[0].syntax()).unwrap();
    assert!(VarDeclarator::can_cast(outer_parent.kind()));

    let inner_parent = parent_expr(assigns[1].syntax()).unwrap();
    assert_eq!(inner_parent, assigns[0].syntax().clone());
}

#[test]
fn test_source_code_token_stream_matches_lexer() {
    let text = "a = b = '=' + c; // done";
    let source = SourceCode::parse("chain.js", text);
    let (lexed, _) = lex_with_trivia(text);
    let expected: Vec<_> = lexed
        .iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != JsSyntaxKind::Eof)
        .map(|t| t.text.clone())
        .collect();
    let actual: Vec<_> = source
        .tokens()
        .iter()
        .map(|t| t.text().to_string())
        .collect();
    assert_eq!(actual, expected);
}
