//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`
//! and word operators like `union`) along with precedence, associativity, and
//! fixity. The expression parser's climbing loop consults this table instead
//! of hard-coding binding strengths.
//!
//! ## Notes
//! - Precedence is a relative ordering where higher binds tighter: the
//!   arithmetic/comparison/`&&`/set tier sits at 3, implication at 2, prefix
//!   `!` and the ternary at 1, and function calls at 10.
//! - Postfix field access/indexing is pinned at [`POSTFIX_PRECEDENCE`]
//!   (tighter than every binary operator, looser than a call); see DESIGN.md
//!   for the full table.
//! - Word-operator spellings also appear in the keyword registry
//!   ([`crate::lang::keywords`]); those entries have
//!   [`OperatorInfo::is_keyword_spelling`] set to `true`.
//!
//! ## Examples
//! ```rust
//! use viper_syntax::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("==>"), Some(OperatorId::Implies));
//! assert_eq!(operators::info_for(OperatorId::Implies).precedence, 2);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Slash,

    // Set operators (word spellings)
    Union,
    SetMinus,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Boolean
    AndAnd,
    Implies,
    Not,

    // Statement-level assignment `:=` (never an expression operator)
    Assign,
}

/// Binding strength of a function call (`f(x)`), the tightest form.
pub const CALL_PRECEDENCE: u8 = 10;

/// Binding strength of postfix field access and indexing.
///
/// Tighter than every binary operator so `a.b + c` parses as `(a.b) + c` and
/// `a[i][j]` as `(a[i])[j]`, looser than a call.
pub const POSTFIX_PRECEDENCE: u8 = 9;

/// Binding strength of the ternary conditional `cond ? a : b`.
pub const TERNARY_PRECEDENCE: u8 = 1;

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic and set tier
    op(OperatorId::Plus, &["+"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, &["-"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, &["/"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Union, &["union"], 3, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::SetMinus, &["setminus"], 3, Associativity::Left, Fixity::Infix, true),
    // Comparison
    op(OperatorId::EqEq, &["=="], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, &["!="], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, &["<"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, &["<="], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, &[">"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, &[">="], 3, Associativity::Left, Fixity::Infix, false),
    // Boolean
    op(OperatorId::AndAnd, &["&&"], 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Implies, &["==>"], 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Not, &["!"], 1, Associativity::Left, Fixity::Prefix, false),
    // Assignment
    op(OperatorId::Assign, &[":="], 0, Associativity::None, Fixity::Infix, false),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Return the infix binding strength of `id`, if it is an expression-level
/// binary operator.
///
/// `Assign` and the prefix `Not` return `None`: the former is consumed at the
/// statement level, the latter only ever applies in prefix position.
pub fn infix_precedence(id: OperatorId) -> Option<u8> {
    let info = info_for(id);
    match (info.fixity, id) {
        (_, OperatorId::Assign) => None,
        (Fixity::Prefix, _) => None,
        (Fixity::Infix, _) => Some(info.precedence),
    }
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}
