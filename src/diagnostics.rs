//! Syntax diagnostics.
//!
//! Both the lexer and the parser report problems as [`SyntaxError`] values
//! instead of aborting: a lex or parse run always produces output plus a
//! (possibly empty) list of errors. Errors integrate with `miette` so callers
//! can render fancy labeled reports against the source buffer.

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::cst::Span;

/// Phase that produced a [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A single lexing or parsing diagnostic with its source span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            message: message.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            span,
        }
    }
}

impl Diagnostic for SyntaxError {
    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(
            Some(self.message.clone()),
            miette::SourceSpan::new(self.span.start.into(), self.span.len()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// LINE INDEX
// ============================================================================

/// Byte-offset to line/column mapping for a source buffer.
///
/// Lines and columns are 1-based; columns count bytes, matching how the
/// spans themselves are measured.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Map a byte offset to `(line, column)`.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (line + 1, offset - self.line_starts[line] + 1)
    }
}
