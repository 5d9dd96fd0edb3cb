//! Syntax frontend for the Viper intermediate verification language: lexer, parser,
//! lossless concrete syntax tree, diagnostics.
//!
//! This crate is intended for reuse across verifier front-ends, formatters, and future
//! interactive tooling, so the tree it produces preserves every byte of the input:
//! whitespace, comments, and even lexically invalid runs survive as tokens, and parse
//! errors are contained in `error` nodes instead of aborting the run.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not do name resolution, type
//!   checking, or verification-condition generation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from the `lang`
//!   registries, including operator precedence consumed by the expression parser.
//!
//! ## Examples
//! ```rust
//! use viper_syntax::parser;
//!
//! let parse = parser::parse_source("method m() { assert true }");
//! assert!(parse.is_valid());
//! assert_eq!(parse.root.text(), "method m() { assert true }");
//! ```
//!
//! ## See also
//! - [`lang`] for registry-backed language vocabulary (keywords/operators/punctuation).

pub mod cst;
pub mod diagnostics;
pub mod lang;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

pub use cst::{NodeKind, Span, SyntaxNode};
pub use diagnostics::{LineIndex, SyntaxError};
pub use lexer::{Lexed, Token, TokenKind, lex};
pub use parser::{Parse, parse, parse_source};
