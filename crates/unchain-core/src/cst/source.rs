//! Parsed source file with position-based token access
//!
//! Lint rules never re-serialize the tree. They slice the original text by
//! byte ranges, and locate punctuation through the significant-token stream
//! (trivia excluded), so comments and whitespace are carried over verbatim.

use std::ops::Range;
use std::path::{Path, PathBuf};

use super::{JsSyntaxNode, JsSyntaxToken, Parse, ParseError, parse_program};
use crate::diagnostics::{Location, SourceMap};

/// A parsed JavaScript file
#[derive(Debug, Clone)]
pub struct SourceCode {
    file: PathBuf,
    text: String,
    root: JsSyntaxNode,
    errors: Vec<ParseError>,
    /// Significant tokens in source order
    tokens: Vec<JsSyntaxToken>,
    source_map: SourceMap,
}

impl SourceCode {
    /// Parse `text` as the contents of `file`
    pub fn parse(file: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let Parse { root, errors } = parse_program(&text);
        let tokens = root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| !token.kind().is_trivia())
            .collect();
        let source_map = SourceMap::new(&text);

        Self {
            file: file.into(),
            text,
            root,
            errors,
            tokens,
            source_map,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> &JsSyntaxNode {
        &self.root
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn tokens(&self) -> &[JsSyntaxToken] {
        &self.tokens
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Byte range of a token
    pub fn token_range(token: &JsSyntaxToken) -> Range<usize> {
        let range = token.text_range();
        usize::from(range.start())..usize::from(range.end())
    }

    /// Range from a node's first significant token to its last one
    ///
    /// Nodes never carry leading trivia, but may end with trivia that was
    /// flushed into them, so the end is taken from the last token.
    pub fn node_range(&self, node: &JsSyntaxNode) -> Range<usize> {
        let mut tokens = node
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| !token.kind().is_trivia());

        match tokens.next() {
            Some(first) => {
                let start = Self::token_range(&first).start;
                let end = tokens
                    .last()
                    .map_or(Self::token_range(&first).end, |last| {
                        Self::token_range(&last).end
                    });
                start..end
            }
            None => {
                let range = node.text_range();
                usize::from(range.start())..usize::from(range.start())
            }
        }
    }

    /// Index of the first token starting at or after `offset`
    fn index_after(&self, offset: usize) -> usize {
        self.tokens
            .partition_point(|token| Self::token_range(token).start < offset)
    }

    /// Index one past the last token ending at or before `offset`
    fn index_before(&self, offset: usize) -> usize {
        self.tokens
            .partition_point(|token| Self::token_range(token).end <= offset)
    }

    /// The nearest significant token ending at or before `offset`
    pub fn token_before(&self, offset: usize) -> Option<&JsSyntaxToken> {
        let idx = self.index_before(offset);
        idx.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The nearest significant token starting at or after `offset`
    pub fn token_after(&self, offset: usize) -> Option<&JsSyntaxToken> {
        self.tokens.get(self.index_after(offset))
    }

    /// The token immediately before a node
    pub fn token_before_node(&self, node: &JsSyntaxNode) -> Option<&JsSyntaxToken> {
        self.token_before(self.node_range(node).start)
    }

    /// The token immediately after a node
    pub fn token_after_node(&self, node: &JsSyntaxNode) -> Option<&JsSyntaxToken> {
        self.token_after(self.node_range(node).end)
    }

    /// The token immediately after another token
    pub fn token_after_token(&self, token: &JsSyntaxToken) -> Option<&JsSyntaxToken> {
        self.token_after(Self::token_range(token).end)
    }

    /// The token immediately before another token
    pub fn token_before_token(&self, token: &JsSyntaxToken) -> Option<&JsSyntaxToken> {
        self.token_before(Self::token_range(token).start)
    }

    /// Walk tokens backwards from `offset` (exclusive) until `pred` matches
    pub fn find_token_before(
        &self,
        offset: usize,
        pred: impl Fn(&JsSyntaxToken) -> bool,
    ) -> Option<&JsSyntaxToken> {
        self.tokens[..self.index_before(offset)]
            .iter()
            .rev()
            .find(|token| pred(token))
    }

    /// Walk tokens forwards from `offset` (inclusive) until `pred` matches
    pub fn find_token_after(
        &self,
        offset: usize,
        pred: impl Fn(&JsSyntaxToken) -> bool,
    ) -> Option<&JsSyntaxToken> {
        self.tokens[self.index_after(offset)..]
            .iter()
            .find(|token| pred(token))
    }

    /// Source text of a node, excluding surrounding trivia
    pub fn text_of(&self, node: &JsSyntaxNode) -> &str {
        self.slice(self.node_range(node))
    }

    /// Raw slice of the source buffer; out-of-range requests yield ""
    pub fn slice(&self, range: Range<usize>) -> &str {
        self.text.get(range).unwrap_or_default()
    }

    /// Diagnostic location covering a byte range
    pub fn location(&self, range: Range<usize>) -> Location {
        self.source_map
            .span_to_diagnostic_location(&range, &self.text, &self.file)
    }

    /// Diagnostic location of a node
    pub fn node_location(&self, node: &JsSyntaxNode) -> Location {
        self.location(self.node_range(node))
    }
}
