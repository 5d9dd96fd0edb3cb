/// Declaration parsing: top-level items, methods, functions, predicates,
/// fields, and domains.
impl<'a> Parser<'a> {
    /// One top-level item. The `source_file` rule is permissive: declarations,
    /// statements, and bare expressions are all accepted.
    fn item(&mut self) -> ParseResult {
        match self.peek().kind {
            TokenKind::Keyword(KeywordId::Domain) => self.domain(),
            TokenKind::Keyword(KeywordId::Field) => self.field_decl(),
            TokenKind::Keyword(KeywordId::Function) => self.function_decl(),
            TokenKind::Keyword(KeywordId::Predicate) => self.predicate_decl(),
            TokenKind::Keyword(KeywordId::Method) => self.method_decl(),
            _ if self.at_statement_start() => self.statement(),
            _ => self.expr_led_item(),
        }
    }

    /// `field x: Int`
    fn field_decl(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::FieldDecl);
        self.expect_keyword(&mut n, KeywordId::Field)?;
        self.ident(&mut n, None)?;
        self.expect_punct(&mut n, PunctuationId::Colon)?;
        self.ident(&mut n, None)?;
        Ok(n.finish())
    }

    /// `method m(x: Int) returns (y: Int) requires ... ensures ... { ... }`
    ///
    /// The `returns` clause, contracts, and body are all optional; contracts
    /// come as `requires` clauses followed by `ensures` clauses.
    fn method_decl(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Method);
        self.expect_keyword(&mut n, KeywordId::Method)?;
        self.ident(&mut n, Some("name"))?;
        self.parameter_list(&mut n)?;
        if self.check_keyword(KeywordId::Returns) {
            let returns = self.returns_clause()?;
            n.push_node(returns);
        }
        self.contracts(&mut n)?;
        if self.check_punct(PunctuationId::LBrace) {
            let body = self.block()?;
            n.push_node(body);
            n.name_last("body");
        }
        Ok(n.finish())
    }

    /// `returns (y: Int, z: Ref)` with at least one out-parameter.
    fn returns_clause(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Returns);
        self.expect_keyword(&mut n, KeywordId::Returns)?;
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        loop {
            let p = self.parameter()?;
            n.push_node(p);
            if !self.match_punct(&mut n, PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        Ok(n.finish())
    }

    /// `function f(x: Int): Int requires ... ensures ... { ... }`
    fn function_decl(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Function);
        self.expect_keyword(&mut n, KeywordId::Function)?;
        self.ident(&mut n, Some("name"))?;
        self.parameter_list(&mut n)?;
        self.expect_punct(&mut n, PunctuationId::Colon)?;
        self.ident(&mut n, None)?;
        self.contracts(&mut n)?;
        if self.match_punct(&mut n, PunctuationId::LBrace) {
            let body = self.expression()?;
            n.push_node(body);
            n.name_last("body");
            self.expect_punct(&mut n, PunctuationId::RBrace)?;
        }
        Ok(n.finish())
    }

    /// `predicate P(r: Ref) { ... }`; the body is optional (abstract predicate).
    fn predicate_decl(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Predicate);
        self.expect_keyword(&mut n, KeywordId::Predicate)?;
        self.ident(&mut n, Some("name"))?;
        self.parameter_list(&mut n)?;
        if self.match_punct(&mut n, PunctuationId::LBrace) {
            let body = self.expression()?;
            n.push_node(body);
            n.name_last("body");
            self.expect_punct(&mut n, PunctuationId::RBrace)?;
        }
        Ok(n.finish())
    }

    /// `domain D { function ... axiom ... }`
    ///
    /// Member errors are contained: a bad member becomes an `error` node and
    /// parsing resumes at the next `function`/`axiom` or the closing brace.
    fn domain(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Domain);
        self.expect_keyword(&mut n, KeywordId::Domain)?;
        self.ident(&mut n, Some("name"))?;
        self.expect_punct(&mut n, PunctuationId::LBrace)?;
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let checkpoint = self.pos;
            let member = if self.check_keyword(KeywordId::Function) {
                self.domain_function()
            } else if self.check_keyword(KeywordId::Axiom) {
                self.axiom()
            } else {
                Err(self.expected("a domain function or axiom"))
            };
            match member {
                Ok(node) => n.push_node(node),
                Err(e) => {
                    let node = self.recover(checkpoint, e, Recovery::DomainMember);
                    n.push_node(node);
                }
            }
        }
        self.close_brace(&mut n);
        Ok(n.finish())
    }

    /// `function f(Int, x: Int): Int`: domain signatures may mix named
    /// parameters and bare types.
    fn domain_function(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::DomainFunction);
        self.expect_keyword(&mut n, KeywordId::Function)?;
        self.ident(&mut n, Some("name"))?;
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let arg = self.parameter_or_typ()?;
                n.push_node(arg);
                if !self.match_punct(&mut n, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        self.expect_punct(&mut n, PunctuationId::Colon)?;
        self.ident(&mut n, None)?;
        Ok(n.finish())
    }

    /// `axiom name { expr }`; the name is optional.
    fn axiom(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Axiom);
        self.expect_keyword(&mut n, KeywordId::Axiom)?;
        if self.check_ident() {
            self.ident(&mut n, Some("name"))?;
        }
        self.expect_punct(&mut n, PunctuationId::LBrace)?;
        let body = self.expression()?;
        n.push_node(body);
        self.expect_punct(&mut n, PunctuationId::RBrace)?;
        Ok(n.finish())
    }

    /// `requires` clauses followed by `ensures` clauses, each with a
    /// `spec_expr`.
    fn contracts(&mut self, n: &mut NodeBuilder) -> Result<(), SyntaxError> {
        while self.check_keyword(KeywordId::Requires) {
            let clause = self.contract_clause(KeywordId::Requires, NodeKind::Requires)?;
            n.push_node(clause);
        }
        while self.check_keyword(KeywordId::Ensures) {
            let clause = self.contract_clause(KeywordId::Ensures, NodeKind::Ensures)?;
            n.push_node(clause);
        }
        Ok(())
    }

    fn contract_clause(&mut self, kw: KeywordId, kind: NodeKind) -> ParseResult {
        let mut n = NodeBuilder::new(kind);
        self.expect_keyword(&mut n, kw)?;
        let spec = self.spec_expr()?;
        n.push_node(spec);
        Ok(n.finish())
    }

    /// A contract expression: either a plain expression or a bracketed pair
    /// `[e1, e2]`.
    fn spec_expr(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::SpecExpr);
        if self.match_punct(&mut n, PunctuationId::LBracket) {
            let first = self.expression()?;
            n.push_node(first);
            self.expect_punct(&mut n, PunctuationId::Comma)?;
            let second = self.expression()?;
            n.push_node(second);
            self.expect_punct(&mut n, PunctuationId::RBracket)?;
        } else {
            let e = self.expression()?;
            n.push_node(e);
        }
        Ok(n.finish())
    }

    /// `( parameter, ... )` with zero or more parameters, consumed into `n`.
    fn parameter_list(&mut self, n: &mut NodeBuilder) -> Result<(), SyntaxError> {
        self.expect_punct(n, PunctuationId::LParen)?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let p = self.parameter()?;
                n.push_node(p);
                if !self.match_punct(n, PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(n, PunctuationId::RParen)
    }
}
