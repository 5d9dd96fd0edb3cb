//! Parser for the Viper surface syntax
//!
//! Converts a token stream into a lossless concrete syntax tree: every token,
//! including whitespace, comments, and lexically invalid runs, appears in the
//! tree, and the tree's text reproduces the input exactly. Parse errors are
//! collected rather than fatal; the damaged region is captured in an `error`
//! node and parsing resumes at the next declaration or statement boundary.
//!
//! ## Examples
//!
//! ```rust
//! use viper_syntax::parser;
//!
//! let parse = parser::parse_source("field balance: Int");
//! assert!(parse.is_valid());
//! assert_eq!(parse.root.text(), "field balance: Int");
//! ```

use crate::cst::{NodeBuilder, NodeKind, SyntaxNode};
use crate::diagnostics::SyntaxError;
use crate::lang::keywords::{self, KeywordId};
use crate::lang::operators::{self, OperatorId};
use crate::lang::punctuation::{self, PunctuationId};
use crate::lexer::{Token, TokenKind};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
