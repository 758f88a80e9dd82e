//! CST-aware lexer that preserves all trivia (whitespace, comments)
//!
//! Every byte of the input ends up in exactly one token, which is what lets
//! the parser guarantee `parse(source).text() == source`.

use crate::cst::JsSyntaxKind;
use std::ops::Range;

/// Simple span representing a byte range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: JsSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: JsSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

/// Lex input preserving ALL trivia for CST construction
///
/// Whitespace, newlines and comments become their own tokens. The returned
/// vector always ends with a zero-width `Eof` token.
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;
    let mut last_significant: Option<JsSyntaxKind> = None;

    while let Some((current, size)) = next_char(input, i) {
        let start = i;

        let (kind, end) = match current {
            '\n' => (JsSyntaxKind::Newline, i + size),
            '\r' => {
                // \r\n is a single newline
                let mut end = i + size;
                if let Some(('\n', nl_size)) = next_char(input, end) {
                    end += nl_size;
                }
                (JsSyntaxKind::Newline, end)
            }
            c if c.is_whitespace() => {
                let mut end = i + size;
                while let Some((next_ch, next_size)) = next_char(input, end) {
                    if next_ch.is_whitespace() && next_ch != '\n' && next_ch != '\r' {
                        end += next_size;
                    } else {
                        break;
                    }
                }
                (JsSyntaxKind::Whitespace, end)
            }
            '/' if input[i..].starts_with("//") => {
                let end = input[start..]
                    .find(['\n', '\r'])
                    .map_or(len, |rel| start + rel);
                (JsSyntaxKind::CommentLine, end)
            }
            '/' if input[i..].starts_with("/*") => match input[start + 2..].find("*/") {
                Some(rel) => (JsSyntaxKind::CommentBlock, start + 2 + rel + 2),
                None => {
                    errors.push(LexerError::new(
                        "Unterminated block comment",
                        span(start, len),
                    ));
                    (JsSyntaxKind::CommentBlock, len)
                }
            },
            '/' if regex_allowed(last_significant) => {
                let (end, error) = lex_regex(input, start);
                errors.extend(error);
                (JsSyntaxKind::Regex, end)
            }
            '"' | '\'' => {
                let (end, error) = lex_string(input, start, current);
                errors.extend(error);
                (JsSyntaxKind::String, end)
            }
            '`' => {
                let (end, error) = lex_template(input, start);
                errors.extend(error);
                (JsSyntaxKind::Template, end)
            }
            c if c.is_ascii_digit() => (JsSyntaxKind::Number, lex_number(input, start)),
            '.' if input[i + 1..].starts_with(|c: char| c.is_ascii_digit()) => {
                (JsSyntaxKind::Number, lex_number(input, start))
            }
            c if is_ident_start(c) => {
                let end = read_word(input, start);
                let kind = JsSyntaxKind::from_keyword(&input[start..end])
                    .unwrap_or(JsSyntaxKind::Ident);
                (kind, end)
            }
            _ => match lex_punctuator(input, start) {
                Some((kind, end)) => (kind, end),
                None => {
                    errors.push(LexerError::new(
                        format!("Unexpected character '{current}'"),
                        span(start, start + size),
                    ));
                    (JsSyntaxKind::Error, start + size)
                }
            },
        };

        tokens.push(CstToken::new(kind, &input[start..end], span(start, end)));
        if !kind.is_trivia() {
            last_significant = Some(kind);
        }
        i = end;
    }

    tokens.push(CstToken::new(JsSyntaxKind::Eof, "", span(len, len)));

    (tokens, errors)
}

/// A `/` starts a regex literal unless it follows something that ends an
/// expression, in which case it is division.
fn regex_allowed(previous: Option<JsSyntaxKind>) -> bool {
    match previous {
        None => true,
        Some(
            JsSyntaxKind::Ident
            | JsSyntaxKind::Number
            | JsSyntaxKind::String
            | JsSyntaxKind::Template
            | JsSyntaxKind::Regex
            | JsSyntaxKind::RParen
            | JsSyntaxKind::RBracket
            | JsSyntaxKind::RBrace
            | JsSyntaxKind::PlusPlus
            | JsSyntaxKind::MinusMinus
            | JsSyntaxKind::ThisKw
            | JsSyntaxKind::NullKw
            | JsSyntaxKind::TrueKw
            | JsSyntaxKind::FalseKw,
        ) => false,
        Some(_) => true,
    }
}

fn lex_punctuator(input: &str, start: usize) -> Option<(JsSyntaxKind, usize)> {
    let rest = &input[start..];
    JsSyntaxKind::PUNCTUATORS.iter().find_map(|&kind| {
        let text = kind.token_text()?;
        rest.starts_with(text).then(|| (kind, start + text.len()))
    })
}

/// Lex a single- or double-quoted string literal
fn lex_string(input: &str, start: usize, quote: char) -> (usize, Option<LexerError>) {
    let mut i = start + quote.len_utf8();
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
            }
            '\n' | '\r' => break,
            c if c == quote => return (i + size, None),
            _ => i += size,
        }
    }

    (
        i,
        Some(LexerError::new("Unterminated string", span(start, i))),
    )
}

/// Lex a template literal, skipping over `${ ... }` substitutions
fn lex_template(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let mut i = start + 1;
    let mut depth = 0usize;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
                continue;
            }
            '$' if depth == 0 && input[i + size..].starts_with('{') => {
                depth = 1;
                i += size + 1;
                continue;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '`' if depth == 0 => return (i + size, None),
            _ => {}
        }
        i += size;
    }

    (
        input.len(),
        Some(LexerError::new(
            "Unterminated template literal",
            span(start, input.len()),
        )),
    )
}

/// Lex a regex literal `/body/flags`
fn lex_regex(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let mut i = start + 1;
    let mut in_class = false;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
                continue;
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let end = read_word(input, i + size);
                return (end, None);
            }
            '\n' | '\r' => break,
            _ => {}
        }
        i += size;
    }

    (
        i,
        Some(LexerError::new("Unterminated regex literal", span(start, i))),
    )
}

/// Lex a numeric literal: decimal, hex/octal/binary, exponent, bigint suffix
fn lex_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = start;

    if bytes[i] == b'0'
        && i + 1 < len
        && matches!(bytes[i + 1], b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
    {
        i += 2;
        while i < len && (bytes[i].is_ascii_hexdigit() || bytes[i] == b'_') {
            i += 1;
        }
    } else {
        while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
            i += 1;
        }
        if i < len && bytes[i] == b'.' {
            i += 1;
            while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
                i += 1;
            }
        }
        if i < len && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < len && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            if j < len && bytes[j].is_ascii_digit() {
                i = j;
                while i < len && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }
    }

    if i < len && bytes[i] == b'n' {
        i += 1;
    }
    i
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Read an identifier-like word, returning its end offset
fn read_word(input: &str, start: usize) -> usize {
    fn is_word_char(ch: char) -> bool {
        ch == '_'
            || ch == '$'
            || ch.is_ascii_alphanumeric()
            || (!ch.is_ascii() && ch.is_alphanumeric())
    }

    let mut end = start;
    for (offset, ch) in input[start..].char_indices() {
        if is_word_char(ch) {
            end = start + offset + ch.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Get next character and its UTF-8 size
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input.get(pos..)?.chars().next().map(|c| (c, c.len_utf8()))
}

/// Create a span from start to end
fn span(start: usize, end: usize) -> CstSpan {
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(input: &str) -> Vec<(JsSyntaxKind, String)> {
        let (tokens, errors) = lex_with_trivia(input);
        assert!(errors.is_empty(), "unexpected lexer errors: {errors:?}");
        tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != JsSyntaxKind::Eof)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_preserves_whitespace() {
        let (tokens, _) = lex_with_trivia("var  a");

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, JsSyntaxKind::VarKw);
        assert_eq!(tokens[1].kind, JsSyntaxKind::Whitespace);
        assert_eq!(tokens[1].text, "  ");
        assert_eq!(tokens[2].kind, JsSyntaxKind::Ident);
        assert_eq!(tokens[3].kind, JsSyntaxKind::Eof);
    }

    #[test]
    fn test_lossless_reconstruction() {
        let input = "var a = b = c; // trailing\r\n/* block\n */ a\n=b\n=c";
        let (tokens, errors) = lex_with_trivia(input);
        assert!(errors.is_empty());

        let reconstructed: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(reconstructed, input);
    }

    #[test]
    fn test_equals_family_is_distinguished() {
        let kinds: Vec<_> = significant("a = b == c === d => e <= f >>>= g ??= h")
            .into_iter()
            .map(|(kind, _)| kind)
            .filter(|kind| kind.is_punct())
            .collect();
        assert_eq!(
            kinds,
            vec![
                JsSyntaxKind::Eq,
                JsSyntaxKind::EqEq,
                JsSyntaxKind::EqEqEq,
                JsSyntaxKind::Arrow,
                JsSyntaxKind::LtEq,
                JsSyntaxKind::UShrEq,
                JsSyntaxKind::QuestionQuestionEq,
            ]
        );
    }

    #[test]
    fn test_equals_inside_string_is_one_token() {
        let tokens = significant("a = b = '=' + \"x = y\"");
        assert_eq!(tokens[4], (JsSyntaxKind::String, "'='".to_string()));
        assert_eq!(tokens[6], (JsSyntaxKind::String, "\"x = y\"".to_string()));
        let assigns = tokens
            .iter()
            .filter(|(kind, _)| *kind == JsSyntaxKind::Eq)
            .count();
        assert_eq!(assigns, 2);
    }

    #[test]
    fn test_regex_versus_division() {
        let tokens = significant("x = a / b; y = /=+/g");
        assert_eq!(tokens[3].0, JsSyntaxKind::Slash);
        assert_eq!(tokens[8], (JsSyntaxKind::Regex, "/=+/g".to_string()));
    }

    #[test]
    fn test_template_with_substitution() {
        let tokens = significant("s = `a ${b = c} d`");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].0, JsSyntaxKind::Template);
    }

    #[test]
    fn test_numbers() {
        let tokens = significant("1 0x1F 1.5e-3 .5 10n 1_000");
        assert!(tokens.iter().all(|(kind, _)| *kind == JsSyntaxKind::Number));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let (tokens, errors) = lex_with_trivia("a = 'oops\nb");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unterminated string"));
        let reconstructed: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(reconstructed, "a = 'oops\nb");
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, errors) = lex_with_trivia("a # b");
        assert_eq!(errors.len(), 1);
        assert!(tokens.iter().any(|t| t.kind == JsSyntaxKind::Error));
    }
}
