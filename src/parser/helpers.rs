/// Token-stream navigation and expectation helpers.
///
/// Lookahead (`peek`, `peek_next`, the `check_*` family) always skips
/// trivia and lexical `Error` tokens; consumption (`bump`, the `match_*` /
/// `expect_*` families) first flushes the skipped tokens into the node under
/// construction so the tree stays lossless.
impl<'a> Parser<'a> {
    fn peek_index(&self) -> usize {
        let mut i = self.pos;
        while i + 1 < self.tokens.len() && skippable(self.tokens[i].kind) {
            i += 1;
        }
        i
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.peek_index()]
    }

    /// Second significant token, used for `ident '('` call lookahead.
    fn peek_next(&self) -> &Token {
        let mut i = self.peek_index() + 1;
        while i + 1 < self.tokens.len() && skippable(self.tokens[i].kind) {
            i += 1;
        }
        &self.tokens[i.min(self.tokens.len() - 1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Move trivia (and lexical `Error` tokens) at the cursor into `n`.
    fn flush_trivia(&mut self, n: &mut NodeBuilder) {
        while self.pos < self.tokens.len() && skippable(self.tokens[self.pos].kind) {
            n.push_token(self.tokens[self.pos].clone());
            self.pos += 1;
        }
    }

    /// Consume the next significant token into `n`, carrying any preceding
    /// trivia along with it.
    fn bump(&mut self, n: &mut NodeBuilder) -> Token {
        self.flush_trivia(n);
        let token = self.tokens[self.pos].clone();
        debug_assert!(token.kind != TokenKind::Eof, "bump at end of input");
        self.pos += 1;
        n.push_token(token.clone());
        token
    }

    // ========================================================================
    // Checks (non-consuming)
    // ========================================================================

    fn check_ident(&self) -> bool {
        self.peek().kind == TokenKind::Ident
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    // ========================================================================
    // Conditional and mandatory consumption
    // ========================================================================

    fn match_keyword(&mut self, n: &mut NodeBuilder, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.bump(n);
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, n: &mut NodeBuilder, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.bump(n);
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, n: &mut NodeBuilder, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.bump(n);
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, n: &mut NodeBuilder, id: KeywordId) -> Result<(), SyntaxError> {
        if self.check_keyword(id) {
            self.bump(n);
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", keywords::info_for(id).canonical)))
        }
    }

    fn expect_op(&mut self, n: &mut NodeBuilder, id: OperatorId) -> Result<(), SyntaxError> {
        if self.check_op(id) {
            self.bump(n);
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", operators::info_for(id).spellings[0])))
        }
    }

    fn expect_punct(&mut self, n: &mut NodeBuilder, id: PunctuationId) -> Result<(), SyntaxError> {
        if self.check_punct(id) {
            self.bump(n);
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", punctuation::info_for(id).canonical)))
        }
    }

    /// Consume an identifier into a fresh `ident` node pushed onto `n`,
    /// optionally naming it as a grammar field.
    fn ident(&mut self, n: &mut NodeBuilder, field: Option<&'static str>) -> Result<(), SyntaxError> {
        self.flush_trivia(n);
        if !self.check_ident() {
            return Err(self.expected("an identifier"));
        }
        let mut id = NodeBuilder::new(NodeKind::Ident);
        id.push_token(self.tokens[self.pos].clone());
        self.pos += 1;
        n.push_node(id.finish());
        if let Some(name) = field {
            n.name_last(name);
        }
        Ok(())
    }

    /// Build an "Expected X, found Y" diagnostic at the cursor.
    fn expected(&self, what: &str) -> SyntaxError {
        let token = self.peek();
        let found = match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", token.text),
        };
        SyntaxError::syntax(format!("Expected {what}, found {found}"), token.span)
    }

    /// Consume `}` if present; otherwise record a diagnostic and continue so
    /// an unterminated body still yields a usable node.
    fn close_brace(&mut self, n: &mut NodeBuilder) {
        if self.check_punct(PunctuationId::RBrace) {
            self.bump(n);
        } else {
            let err = self.expected("'}'");
            self.errors.push(err);
        }
    }
}

/// Tokens the parser looks through: trivia plus lexical error runs.
fn skippable(kind: TokenKind) -> bool {
    kind.is_trivia() || kind == TokenKind::Error
}
