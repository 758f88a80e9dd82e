//! Byte offset to line/column conversion

use std::ops::Range;
use std::path::Path;

use super::Location;

/// Source map for efficient byte offset to line/column conversion
///
/// Uses a precomputed table of line start offsets for O(log n) lookups.
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Byte offsets of each line start (line 0, line 1, ...)
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a source map from source text
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (idx, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(idx + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert byte offset to 1-based `(line, column)`
    ///
    /// Columns count characters, not bytes.
    pub fn offset_to_position(&self, offset: usize, source: &str) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        let line_start = self.line_starts[line_idx];
        let line_text = source
            .get(line_start..offset.min(source.len()))
            .unwrap_or_default();

        (line_idx + 1, line_text.chars().count() + 1)
    }

    /// Convert a span to `(start_line, start_col, end_line, end_col)`, all 1-based
    pub fn span_to_location(
        &self,
        span: &Range<usize>,
        source: &str,
    ) -> (usize, usize, usize, usize) {
        let (start_line, start_col) = self.offset_to_position(span.start, source);
        let (end_line, end_col) = self.offset_to_position(span.end, source);
        (start_line, start_col, end_line, end_col)
    }

    /// Create a Location struct from a span
    pub fn span_to_diagnostic_location(
        &self,
        span: &Range<usize>,
        source: &str,
        file_path: &Path,
    ) -> Location {
        let (line, column, end_line, end_column) = self.span_to_location(span, source);

        Location {
            file: file_path.to_path_buf(),
            line,
            column,
            end_line: Some(end_line),
            end_column: Some(end_column),
            offset: span.start,
            length: span.end.saturating_sub(span.start),
        }
    }

    /// Number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
