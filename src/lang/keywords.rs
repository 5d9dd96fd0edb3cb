//! Keyword vocabulary.
//!
//! Every reserved word of the Viper surface syntax, including the word
//! operators `union` and `setminus` (those also appear in
//! [`crate::lang::operators`] with precedence metadata; use that module when
//! you need operator semantics).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use viper_syntax::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("inhale"), Some(KeywordId::Inhale));
//! assert_eq!(keywords::from_str("Inhale"), None);
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Domain,
    Field,
    Function,
    Predicate,
    Method,
    Returns,
    Requires,
    Ensures,
    Axiom,

    // Statements
    Var,
    Label,
    Goto,
    If,
    Else,
    Inhale,
    Exhale,
    Assert,
    Assume,
    Fold,
    Unfold,

    // Expressions
    Old,
    Let,
    In,
    Unfolding,
    Forall,
    Exists,
    True,
    False,

    // Word operators (also in the operator registry)
    Union,
    SetMinus,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    /// `true` if this spelling is also an operator (e.g. `union`).
    pub is_operator_spelling: bool,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    kw(KeywordId::Domain, "domain", false),
    kw(KeywordId::Field, "field", false),
    kw(KeywordId::Function, "function", false),
    kw(KeywordId::Predicate, "predicate", false),
    kw(KeywordId::Method, "method", false),
    kw(KeywordId::Returns, "returns", false),
    kw(KeywordId::Requires, "requires", false),
    kw(KeywordId::Ensures, "ensures", false),
    kw(KeywordId::Axiom, "axiom", false),
    kw(KeywordId::Var, "var", false),
    kw(KeywordId::Label, "label", false),
    kw(KeywordId::Goto, "goto", false),
    kw(KeywordId::If, "if", false),
    kw(KeywordId::Else, "else", false),
    kw(KeywordId::Inhale, "inhale", false),
    kw(KeywordId::Exhale, "exhale", false),
    kw(KeywordId::Assert, "assert", false),
    kw(KeywordId::Assume, "assume", false),
    kw(KeywordId::Fold, "fold", false),
    kw(KeywordId::Unfold, "unfold", false),
    kw(KeywordId::Old, "old", false),
    kw(KeywordId::Let, "let", false),
    kw(KeywordId::In, "in", false),
    kw(KeywordId::Unfolding, "unfolding", false),
    kw(KeywordId::Forall, "forall", false),
    kw(KeywordId::Exists, "exists", false),
    kw(KeywordId::True, "true", false),
    kw(KeywordId::False, "false", false),
    kw(KeywordId::Union, "union", true),
    kw(KeywordId::SetMinus, "setminus", true),
];

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == spelling).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn kw(id: KeywordId, canonical: &'static str, is_operator_spelling: bool) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        is_operator_spelling,
    }
}
