/// Expression parsing: precedence climbing over the operator registry.
///
/// Binding strengths come from `crate::lang::operators`: calls bind tightest,
/// then postfix field access/indexing, then the binary tier, then `==>`,
/// with prefix `!` and the ternary at the bottom. All binary operators are
/// left-associative, so the right operand is parsed one level tighter.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> ParseResult {
        self.expr_bp(0)
    }

    fn expr_bp(&mut self, min_prec: u8) -> ParseResult {
        let mut lhs = if self.check_op(OperatorId::Not) {
            let mut n = NodeBuilder::new(NodeKind::UnaryExpr);
            self.bump(&mut n);
            // `!` binds looser than any binary operator, so `!a == b`
            // negates the whole comparison; a trailing `? :` still wins.
            let operand = self.expr_bp(operators::TERNARY_PRECEDENCE + 1)?;
            n.push_node(operand);
            n.finish()
        } else {
            self.primary()?
        };

        loop {
            if self.check_punct(PunctuationId::Dot) {
                if operators::POSTFIX_PRECEDENCE < min_prec {
                    break;
                }
                let mut n = NodeBuilder::new(NodeKind::FieldAccessExpr);
                n.push_node(lhs);
                self.bump(&mut n);
                self.ident(&mut n, None)?;
                lhs = n.finish();
            } else if self.check_punct(PunctuationId::LBracket) {
                if operators::POSTFIX_PRECEDENCE < min_prec {
                    break;
                }
                let mut n = NodeBuilder::new(NodeKind::IndexExpr);
                n.push_node(lhs);
                self.bump(&mut n);
                let index = self.expression()?;
                n.push_node(index);
                self.expect_punct(&mut n, PunctuationId::RBracket)?;
                lhs = n.finish();
            } else if let Some(prec) = self.peek_infix_precedence() {
                if prec < min_prec {
                    break;
                }
                let mut n = NodeBuilder::new(NodeKind::BinExpr);
                n.push_node(lhs);
                n.name_last("lhs");
                self.bump(&mut n);
                n.name_last("operator");
                let rhs = self.expr_bp(prec + 1)?;
                n.push_node(rhs);
                n.name_last("rhs");
                lhs = n.finish();
            } else if self.check_punct(PunctuationId::Question) {
                if operators::TERNARY_PRECEDENCE < min_prec {
                    break;
                }
                let mut n = NodeBuilder::new(NodeKind::TernaryExpr);
                n.push_node(lhs);
                n.name_last("condition");
                self.bump(&mut n);
                let then_expr = self.expression()?;
                n.push_node(then_expr);
                n.name_last("then_expr");
                self.expect_punct(&mut n, PunctuationId::Colon)?;
                let else_expr = self.expr_bp(operators::TERNARY_PRECEDENCE + 1)?;
                n.push_node(else_expr);
                n.name_last("else_expr");
                lhs = n.finish();
            } else {
                break;
            }
        }

        Ok(lhs)
    }

    /// Binding strength of the next token as an infix operator, if it is
    /// one. Word operators (`union`, `setminus`) arrive as keyword tokens.
    fn peek_infix_precedence(&self) -> Option<u8> {
        match self.peek().kind {
            TokenKind::Op(id) => operators::infix_precedence(id),
            TokenKind::Keyword(KeywordId::Union) => {
                operators::infix_precedence(OperatorId::Union)
            }
            TokenKind::Keyword(KeywordId::SetMinus) => {
                operators::infix_precedence(OperatorId::SetMinus)
            }
            _ => None,
        }
    }

    fn primary(&mut self) -> ParseResult {
        match self.peek().kind {
            TokenKind::Punct(PunctuationId::LParen) => {
                let mut n = NodeBuilder::new(NodeKind::ParenExpr);
                self.bump(&mut n);
                let inner = self.expression()?;
                n.push_node(inner);
                self.expect_punct(&mut n, PunctuationId::RParen)?;
                Ok(n.finish())
            }
            TokenKind::Keyword(KeywordId::True | KeywordId::False) => {
                let mut n = NodeBuilder::new(NodeKind::BoolLiteral);
                self.bump(&mut n);
                Ok(n.finish())
            }
            TokenKind::IntLit => {
                let mut n = NodeBuilder::new(NodeKind::IntLiteral);
                self.bump(&mut n);
                Ok(n.finish())
            }
            TokenKind::Keyword(KeywordId::Old) => self.old_expr(),
            TokenKind::Keyword(KeywordId::Let) => self.let_expr(),
            TokenKind::Keyword(KeywordId::Unfolding) => self.unfolding_expr(),
            TokenKind::Keyword(KeywordId::Forall) => self.quantified_expr(KeywordId::Forall),
            TokenKind::Keyword(KeywordId::Exists) => self.quantified_expr(KeywordId::Exists),
            TokenKind::Ident => {
                // `ident '('` lookahead distinguishes a call from a variable
                if self.peek_next().kind.is_punctuation(PunctuationId::LParen) {
                    self.function_call()
                } else {
                    let mut n = NodeBuilder::new(NodeKind::Ident);
                    self.bump(&mut n);
                    Ok(n.finish())
                }
            }
            _ => Err(self.expected("an expression")),
        }
    }

    /// `f(e, ...)`
    fn function_call(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::FunctionCall);
        self.ident(&mut n, None)?;
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let arg = self.expression()?;
                n.push_node(arg);
                if !self.match_punct(&mut n, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        Ok(n.finish())
    }

    /// `old(e)` or `old[l](e)` with an at-label.
    fn old_expr(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::OldExpr);
        self.expect_keyword(&mut n, KeywordId::Old)?;
        if self.match_punct(&mut n, PunctuationId::LBracket) {
            self.ident(&mut n, Some("label"))?;
            self.expect_punct(&mut n, PunctuationId::RBracket)?;
        }
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        let inner = self.expression()?;
        n.push_node(inner);
        n.name_last("expr");
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        Ok(n.finish())
    }

    /// `let x == (e) in body`; the bound expression is always
    /// parenthesized.
    fn let_expr(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::LetExpr);
        self.expect_keyword(&mut n, KeywordId::Let)?;
        self.ident(&mut n, None)?;
        self.expect_op(&mut n, OperatorId::EqEq)?;
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        let bound = self.expression()?;
        n.push_node(bound);
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        self.expect_keyword(&mut n, KeywordId::In)?;
        let body = self.expression()?;
        n.push_node(body);
        Ok(n.finish())
    }

    /// `unfolding P(x) in body`
    fn unfolding_expr(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Unfolding);
        self.expect_keyword(&mut n, KeywordId::Unfolding)?;
        let predicate = self.expression()?;
        n.push_node(predicate);
        self.expect_keyword(&mut n, KeywordId::In)?;
        let body = self.expression()?;
        n.push_node(body);
        Ok(n.finish())
    }

    /// `forall x: Int :: { f(x) } body` / `exists x: Int :: body`.
    ///
    /// Triggers are optional; when present they sit between `::` and the
    /// body as a braced, comma-separated expression list.
    fn quantified_expr(&mut self, kw: KeywordId) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::QuantifiedExpr);
        self.expect_keyword(&mut n, kw)?;
        loop {
            let p = self.parameter()?;
            n.push_node(p);
            if !self.match_punct(&mut n, PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(&mut n, PunctuationId::ColonColon)?;
        if self.check_punct(PunctuationId::LBrace) {
            let t = self.triggers()?;
            n.push_node(t);
        }
        let body = self.expression()?;
        n.push_node(body);
        Ok(n.finish())
    }

    fn triggers(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Triggers);
        self.expect_punct(&mut n, PunctuationId::LBrace)?;
        loop {
            let e = self.expression()?;
            n.push_node(e);
            if !self.match_punct(&mut n, PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(&mut n, PunctuationId::RBrace)?;
        Ok(n.finish())
    }
}
