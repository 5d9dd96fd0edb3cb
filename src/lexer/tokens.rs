//! Token types for the Viper lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (including word operators like `union`)
//! - `Op(OperatorId)` for symbol operators
//! - `Punct(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Every token carries its literal text: concatenating the texts of a lex
//!   run, in order, reproduces the source buffer exactly.
//! - Comments and whitespace are ordinary tokens (`LineComment`,
//!   `BlockComment`, `Whitespace`); the parser attaches them to the tree
//!   without any production referencing them.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::cst::Span;
use crate::lang::keywords::{self, KeywordId};
use crate::lang::operators::OperatorId;
use crate::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
///
/// ## Notes
/// - Keyword/operator/punctuation tokens carry stable IDs from `crate::lang`.
/// - `Error` marks a maximal run of characters matching no token pattern;
///   lexing resumes after the run and the parser carries the token through
///   as an extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Op(OperatorId),
    Punct(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident,
    IntLit,

    // ========== Extras ==========
    LineComment,
    BlockComment,
    Whitespace,

    // ========== Special ==========
    Error,
    Eof,
}

/// A token with its kind, literal text, and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
