//! Concrete syntax tree.
//!
//! The parser produces a **lossless** tree: every token of the input,
//! including whitespace and comments, appears exactly once as a leaf, in
//! source order. Concatenating the token texts of the root reproduces the
//! source buffer byte-for-byte, even for inputs that failed to parse.
//!
//! Nodes are untyped: a [`SyntaxNode`] carries a [`NodeKind`] plus an ordered
//! child list, and grammar fields (`name`, `body`, `condition`, ...) are
//! name-to-child annotations resolved with [`SyntaxNode::field_node`]. This
//! keeps malformed trees representable; later phases layer typed views on top.

use crate::lexer::tokens::{Token, TokenKind};

// ============================================================================
// SPANS
// ============================================================================

/// Half-open byte range `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

// ============================================================================
// NODE KINDS
// ============================================================================

/// Kind tag for a [`SyntaxNode`], one per grammar production.
///
/// Literal and identifier leaves get wrapper nodes (`Ident`, `IntLiteral`,
/// `BoolLiteral`) so that tree consumers can navigate nodes uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,

    // Declarations
    Method,
    Returns,
    FieldDecl,
    Predicate,
    Domain,
    DomainFunction,
    Axiom,
    Function,
    Requires,
    Ensures,
    SpecExpr,
    Parameter,
    Typ,

    // Statements
    Block,
    VarDecl,
    Label,
    AssignStmt,
    InhaleStmt,
    ExhaleStmt,
    AssertStmt,
    AssumeStmt,
    FoldStmt,
    UnfoldStmt,
    GotoStmt,
    IfStmt,

    // Expressions
    BinExpr,
    UnaryExpr,
    TernaryExpr,
    FieldAccessExpr,
    IndexExpr,
    FunctionCall,
    OldExpr,
    LetExpr,
    Unfolding,
    QuantifiedExpr,
    Triggers,
    ParenExpr,
    Ident,
    IntLiteral,
    BoolLiteral,

    /// Skipped-token container produced by error recovery.
    Error,
}

impl NodeKind {
    /// Grammar-facing name, used by [`SyntaxNode::to_sexp`].
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::Method => "method",
            NodeKind::Returns => "returns",
            NodeKind::FieldDecl => "field",
            NodeKind::Predicate => "predicate",
            NodeKind::Domain => "domain",
            NodeKind::DomainFunction => "domain_function",
            NodeKind::Axiom => "axiom",
            NodeKind::Function => "function",
            NodeKind::Requires => "requires",
            NodeKind::Ensures => "ensures",
            NodeKind::SpecExpr => "spec_expr",
            NodeKind::Parameter => "parameter",
            NodeKind::Typ => "typ",
            NodeKind::Block => "block",
            NodeKind::VarDecl => "var_decl",
            NodeKind::Label => "label",
            NodeKind::AssignStmt => "assign_stmt",
            NodeKind::InhaleStmt => "inhale_stmt",
            NodeKind::ExhaleStmt => "exhale_stmt",
            NodeKind::AssertStmt => "assert_stmt",
            NodeKind::AssumeStmt => "assume_stmt",
            NodeKind::FoldStmt => "fold_stmt",
            NodeKind::UnfoldStmt => "unfold_stmt",
            NodeKind::GotoStmt => "goto_stmt",
            NodeKind::IfStmt => "if_stmt",
            NodeKind::BinExpr => "bin_expr",
            NodeKind::UnaryExpr => "unary_expr",
            NodeKind::TernaryExpr => "ternary_expr",
            NodeKind::FieldAccessExpr => "field_access_expr",
            NodeKind::IndexExpr => "index_expr",
            NodeKind::FunctionCall => "function_call",
            NodeKind::OldExpr => "old_expr",
            NodeKind::LetExpr => "let_expr",
            NodeKind::Unfolding => "unfolding",
            NodeKind::QuantifiedExpr => "quantified_expr",
            NodeKind::Triggers => "triggers",
            NodeKind::ParenExpr => "paren_expr",
            NodeKind::Ident => "ident",
            NodeKind::IntLiteral => "int_literal",
            NodeKind::BoolLiteral => "bool_literal",
            NodeKind::Error => "error",
        }
    }
}

// ============================================================================
// TREE
// ============================================================================

/// A child of a [`SyntaxNode`]: either a token leaf or a nested node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Token(Token),
    Node(SyntaxNode),
}

impl Child {
    pub fn span(&self) -> Span {
        match self {
            Child::Token(t) => t.span,
            Child::Node(n) => n.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            Child::Node(n) => Some(n),
            Child::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(t) => Some(t),
            Child::Node(_) => None,
        }
    }
}

/// An inner node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Child>,
    /// Grammar field annotations: `(name, index into children)`.
    pub fields: Vec<(&'static str, usize)>,
    /// Diagnostic message, present on `Error` nodes only.
    pub message: Option<String>,
}

impl SyntaxNode {
    /// Iterate the node children, skipping token leaves.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// Look up a grammar field by name.
    pub fn field(&self, name: &str) -> Option<&Child> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, idx)| &self.children[*idx])
    }

    /// Look up a grammar field expected to be a node.
    pub fn field_node(&self, name: &str) -> Option<&SyntaxNode> {
        self.field(name).and_then(Child::as_node)
    }

    /// Look up a grammar field expected to be a token.
    pub fn field_token(&self, name: &str) -> Option<&Token> {
        self.field(name).and_then(Child::as_token)
    }

    /// First non-trivia token in the subtree, in source order.
    pub fn first_significant_token(&self) -> Option<&Token> {
        for child in &self.children {
            match child {
                Child::Token(t) if !t.kind.is_trivia() => return Some(t),
                Child::Token(_) => {}
                Child::Node(n) => {
                    if let Some(t) = n.first_significant_token() {
                        return Some(t);
                    }
                }
            }
        }
        None
    }

    /// Reconstruct the exact source text covered by this subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Child::Token(t) => out.push_str(&t.text),
                Child::Node(n) => n.collect_text(out),
            }
        }
    }

    /// Compact s-expression rendering, for tests and debugging.
    ///
    /// Trivia and un-fielded punctuation tokens are omitted; the remaining
    /// token leaves print their quoted text, and fielded children carry a
    /// `name:` prefix.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.as_str());
        for (idx, child) in self.children.iter().enumerate() {
            let field = self.fields.iter().find(|(_, i)| *i == idx).map(|(n, _)| *n);
            if let Child::Token(t) = child {
                if t.kind.is_trivia() {
                    continue;
                }
                if field.is_none() && matches!(t.kind, TokenKind::Punct(_)) {
                    continue;
                }
            }
            out.push(' ');
            if let Some(name) = field {
                out.push_str(name);
                out.push_str(": ");
            }
            match child {
                Child::Token(t) => {
                    out.push('"');
                    out.push_str(&t.text);
                    out.push('"');
                }
                Child::Node(n) => n.write_sexp(out),
            }
        }
        out.push(')');
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Incremental builder for one [`SyntaxNode`].
///
/// Children are pushed in source order; [`NodeBuilder::name_last`] attaches a
/// grammar field name to the most recently pushed child.
#[derive(Debug)]
pub struct NodeBuilder {
    kind: NodeKind,
    children: Vec<Child>,
    fields: Vec<(&'static str, usize)>,
    message: Option<String>,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            fields: Vec::new(),
            message: None,
        }
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(Child::Token(token));
    }

    pub fn push_node(&mut self, node: SyntaxNode) {
        self.children.push(Child::Node(node));
    }

    /// Attach a grammar field name to the last pushed child.
    pub fn name_last(&mut self, name: &'static str) {
        debug_assert!(!self.children.is_empty(), "name_last on empty builder");
        self.fields.push((name, self.children.len() - 1));
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn finish(self) -> SyntaxNode {
        let span = match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::default(),
        };
        SyntaxNode {
            kind: self.kind,
            span,
            children: self.children,
            fields: self.fields,
            message: self.message,
        }
    }
}
