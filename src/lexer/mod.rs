//! Lexer for the Viper surface syntax.
//!
//! Handles tokenization including:
//! - Keywords (`method`, `inhale`, `forall`, word operators like `union`, ...)
//! - Identifiers and integer literals
//! - Operators and punctuation (`==>`, `:=`, `::`, ...)
//! - Comments and whitespace, emitted as ordinary tokens so the token stream
//!   is lossless
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//!
//! ## Notes
//! - Scanning is maximal munch: `==>` wins over `==`, `:=` and `::` over `:`.
//! - Character runs that match no token pattern become a single `Error` token
//!   and a lexical diagnostic; scanning resumes after the run.

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::cst::Span;
use crate::diagnostics::SyntaxError;
use crate::lang::operators::OperatorId;
use crate::lang::punctuation::PunctuationId;

/// Result of lexing a source buffer.
///
/// The token stream always ends with an `Eof` token, and the texts of
/// `tokens` concatenate back to the input even when `errors` is non-empty.
#[derive(Debug)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub errors: Vec<SyntaxError>,
}

/// Tokenize a source buffer.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Lexed {
    let lexed = Lexer::new(source).tokenize();
    tracing::debug!(
        tokens = lexed.tokens.len(),
        errors = lexed.errors.len(),
        "lexed source"
    );
    lexed
}

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Viper source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Never fails: invalid runs become `Error` tokens with diagnostics, and
    /// the stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Lexed {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.current_pos, self.current_pos),
        ));

        Lexed {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Whitespace (including the BOM-ish extras the grammar allows)
            c if is_space(c) => {
                while let Some(c) = self.peek() {
                    if is_space(c) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.add_token(TokenKind::Whitespace, start);
            }

            // Comments and `/`
            '/' => {
                if self.match_char('/') {
                    // Stops before '\r' as well so CRLF line endings stay
                    // out of the comment token
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.advance();
                    }
                    self.add_token(TokenKind::LineComment, start);
                } else if self.match_char('*') {
                    self.scan_block_comment(start);
                } else {
                    self.add_op(OperatorId::Slash, start);
                }
            }

            // `:` / `::` / `:=`
            ':' => {
                if self.match_char(':') {
                    self.add_punct(PunctuationId::ColonColon, start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::Assign, start);
                } else {
                    self.add_punct(PunctuationId::Colon, start);
                }
            }

            // `==` / `==>`; a lone `=` matches nothing
            '=' => {
                if self.match_char('=') {
                    if self.match_char('>') {
                        self.add_op(OperatorId::Implies, start);
                    } else {
                        self.add_op(OperatorId::EqEq, start);
                    }
                } else {
                    self.emit_error(start);
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.add_op(OperatorId::Not, start);
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::LtEq, start);
                } else {
                    self.add_op(OperatorId::Lt, start);
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }

            // `&&`; a lone `&` matches nothing
            '&' => {
                if self.match_char('&') {
                    self.add_op(OperatorId::AndAnd, start);
                } else {
                    self.emit_error(start);
                }
            }

            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),

            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '?' => self.add_punct(PunctuationId::Question, start),

            // Numbers
            '0'..='9' => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.add_token(TokenKind::IntLit, start);
            }

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                // Extend the run over everything that cannot begin a token
                while let Some(c) = self.peek() {
                    if can_start_token(c) {
                        break;
                    }
                    self.advance();
                }
                self.emit_error(start);
            }
        }
    }

    // ========================================================================
    // Token emission
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let span = Span::new(start, self.current_pos);
        self.tokens
            .push(Token::new(kind, &self.source[start..self.current_pos], span));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Op(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punct(id), start);
    }

    /// Emit an `Error` token for `[start, current_pos)`, merging with an
    /// immediately preceding error run so adjacent bad characters produce one
    /// token and one diagnostic.
    fn emit_error(&mut self, start: usize) {
        let end = self.current_pos;
        let text = &self.source[start..end];

        if let Some(last) = self.tokens.last_mut() {
            if last.kind == TokenKind::Error && last.span.end == start {
                last.text.push_str(text);
                last.span.end = end;
                let merged = last.text.clone();
                if let Some(err) = self.errors.last_mut() {
                    if err.span.end == start {
                        err.span.end = end;
                        err.message = format!("Unexpected characters '{merged}'");
                        return;
                    }
                }
                return;
            }
        }

        let span = Span::new(start, end);
        self.errors.push(SyntaxError::lexical(
            format!("Unexpected characters '{text}'"),
            span,
        ));
        self.tokens.push(Token::new(TokenKind::Error, text, span));
    }

    // ========================================================================
    // Multi-character tokens
    // ========================================================================

    /// Scan the tail of a block comment; `/*` is already consumed.
    ///
    /// An unterminated comment still becomes a `BlockComment` token covering
    /// the rest of the buffer, plus a lexical diagnostic.
    fn scan_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                Some(_) => {}
                None => {
                    self.errors.push(SyntaxError::lexical(
                        "Unterminated block comment",
                        Span::new(start, self.current_pos),
                    ));
                    break;
                }
            }
        }
        self.add_token(TokenKind::BlockComment, start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry.
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident, start);
        }
    }
}

// ============================================================================
// Character classes
// ============================================================================

fn is_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{FEFF}' | '\u{2060}' | '\u{200B}')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// `true` if `c` can begin some token; used to bound error runs.
fn can_start_token(c: char) -> bool {
    is_space(c)
        || is_ident_start(c)
        || c.is_ascii_digit()
        || matches!(
            c,
            '/' | ':' | '=' | '!' | '<' | '>' | '&' | '+' | '-' | '(' | ')' | '{' | '}' | '['
                | ']' | ',' | '.' | '?'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::keywords::{KEYWORDS, KeywordId};
    use crate::lang::operators::OPERATORS;
    use crate::lang::punctuation::PUNCTUATION;
    use proptest::prelude::*;

    fn significant_kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .tokens
            .into_iter()
            .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .map(|t| t.kind)
            .collect()
    }

    fn reassemble(source: &str) -> String {
        lex(source).tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn every_keyword_lexes_to_its_registry_id() {
        for info in KEYWORDS {
            let lexed = lex(info.canonical);
            assert!(lexed.errors.is_empty(), "keyword {:?}", info.id);
            assert_eq!(
                lexed.tokens[0].kind,
                TokenKind::Keyword(info.id),
                "keyword {:?}",
                info.id
            );
        }
    }

    #[test]
    fn every_symbol_operator_lexes_to_its_registry_id() {
        for info in OPERATORS {
            if info.is_keyword_spelling {
                continue;
            }
            for spelling in info.spellings {
                let lexed = lex(spelling);
                assert!(lexed.errors.is_empty(), "operator {:?}", info.id);
                assert_eq!(
                    lexed.tokens[0].kind,
                    TokenKind::Op(info.id),
                    "operator {:?}",
                    info.id
                );
            }
        }
    }

    #[test]
    fn every_punctuation_lexes_to_its_registry_id() {
        for info in PUNCTUATION {
            let lexed = lex(info.canonical);
            assert!(lexed.errors.is_empty(), "punctuation {:?}", info.id);
            assert_eq!(
                lexed.tokens[0].kind,
                TokenKind::Punct(info.id),
                "punctuation {:?}",
                info.id
            );
        }
    }

    #[test]
    fn word_operators_lex_as_keywords() {
        assert_eq!(
            significant_kinds("union setminus"),
            vec![
                TokenKind::Keyword(KeywordId::Union),
                TokenKind::Keyword(KeywordId::SetMinus),
            ]
        );
    }

    #[test]
    fn maximal_munch_prefers_longest_operator() {
        use crate::lang::operators::OperatorId as O;
        use crate::lang::punctuation::PunctuationId as P;
        assert_eq!(
            significant_kinds("==> == := :: : <= < >= > !="),
            vec![
                TokenKind::Op(O::Implies),
                TokenKind::Op(O::EqEq),
                TokenKind::Op(O::Assign),
                TokenKind::Punct(P::ColonColon),
                TokenKind::Punct(P::Colon),
                TokenKind::Op(O::LtEq),
                TokenKind::Op(O::Lt),
                TokenKind::Op(O::GtEq),
                TokenKind::Op(O::Gt),
                TokenKind::Op(O::NotEq),
            ]
        );
    }

    #[test]
    fn identifiers_allow_dollar_after_first_char() {
        let lexed = lex("perm$x _tmp1");
        assert_eq!(lexed.tokens[0].kind, TokenKind::Ident);
        assert_eq!(lexed.tokens[0].text, "perm$x");
        assert_eq!(lexed.tokens[2].kind, TokenKind::Ident);
        assert_eq!(lexed.tokens[2].text, "_tmp1");
    }

    #[test]
    fn integer_literals_are_digit_runs() {
        let lexed = lex("0 00123");
        assert_eq!(lexed.tokens[0].kind, TokenKind::IntLit);
        assert_eq!(lexed.tokens[0].text, "0");
        assert_eq!(lexed.tokens[2].kind, TokenKind::IntLit);
        assert_eq!(lexed.tokens[2].text, "00123");
    }

    #[test]
    fn comments_become_tokens() {
        let source = "a // note\n/* multi\nline */ b";
        let lexed = lex(source);
        assert!(lexed.errors.is_empty());
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::LineComment));
        assert!(kinds.contains(&TokenKind::BlockComment));
        assert_eq!(reassemble(source), source);
    }

    #[test]
    fn line_comment_excludes_crlf_line_ending() {
        let source = "a // note\r\nb";
        let lexed = lex(source);
        assert!(lexed.errors.is_empty());
        let comment = lexed
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::LineComment)
            .unwrap();
        assert_eq!(comment.text, "// note");
        assert_eq!(reassemble(source), source);
    }

    #[test]
    fn unterminated_block_comment_reports_error_but_keeps_text() {
        let source = "/* never closed";
        let lexed = lex(source);
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(lexed.tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(lexed.tokens[0].text, source);
    }

    #[test]
    fn unicode_whitespace_is_lexed_as_whitespace() {
        let source = "a\u{00A0}\u{200B}\u{FEFF}\u{2060}b";
        let lexed = lex(source);
        assert!(lexed.errors.is_empty());
        assert_eq!(lexed.tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(reassemble(source), source);
    }

    #[test]
    fn bad_characters_form_one_error_run() {
        let lexed = lex("x @#~ y");
        assert_eq!(lexed.errors.len(), 1);
        let error_tokens: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Error)
            .collect();
        assert_eq!(error_tokens.len(), 1);
        assert_eq!(error_tokens[0].text, "@#~");
    }

    #[test]
    fn lone_equals_is_a_lexical_error() {
        let lexed = lex("a = b");
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(lexed.tokens[2].kind, TokenKind::Error);
        assert_eq!(lexed.tokens[2].text, "=");
        assert_eq!(reassemble("a = b"), "a = b");
    }

    #[test]
    fn lone_ampersand_merges_into_adjacent_error_run() {
        let lexed = lex("@&");
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Error);
        assert_eq!(lexed.tokens[0].text, "@&");
    }

    #[test]
    fn stream_ends_with_eof() {
        let lexed = lex("method");
        let last = lexed.tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Eof);
        assert_eq!(last.text, "");
    }

    proptest! {
        #[test]
        fn lexing_is_lossless(source in any::<String>()) {
            prop_assert_eq!(reassemble(&source), source.clone());
        }
    }
}
