//! Punctuation vocabulary.
//!
//! Delimiters and separators that carry no operator semantics of their own.
//! The ternary's `?` and `:` live here (the expression parser anchors on the
//! `?` token directly), as does the `::` separating quantifier binders from
//! their body.

/// Stable identifier for every punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    ColonColon,
    Dot,
    Question,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
}

/// Registry of all punctuation.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    punct(PunctuationId::LParen, "("),
    punct(PunctuationId::RParen, ")"),
    punct(PunctuationId::LBrace, "{"),
    punct(PunctuationId::RBrace, "}"),
    punct(PunctuationId::LBracket, "["),
    punct(PunctuationId::RBracket, "]"),
    punct(PunctuationId::Comma, ","),
    punct(PunctuationId::Colon, ":"),
    punct(PunctuationId::ColonColon, "::"),
    punct(PunctuationId::Dot, "."),
    punct(PunctuationId::Question, "?"),
];

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION.iter().find(|p| p.id == id).expect("punctuation info missing")
}

// --- helpers -----------------------------------------------------------------

const fn punct(id: PunctuationId, canonical: &'static str) -> PunctuationInfo {
    PunctuationInfo { id, canonical }
}
