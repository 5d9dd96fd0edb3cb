/// Statement parsing.
impl<'a> Parser<'a> {
    fn at_statement_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(
                KeywordId::Var
                    | KeywordId::Label
                    | KeywordId::Goto
                    | KeywordId::If
                    | KeywordId::Inhale
                    | KeywordId::Exhale
                    | KeywordId::Assert
                    | KeywordId::Assume
                    | KeywordId::Fold
                    | KeywordId::Unfold
            )
        )
    }

    fn statement(&mut self) -> ParseResult {
        match self.peek().kind {
            TokenKind::Keyword(KeywordId::Var) => self.var_decl(),
            TokenKind::Keyword(KeywordId::Label) => self.label_stmt(),
            TokenKind::Keyword(KeywordId::Goto) => self.goto_stmt(),
            TokenKind::Keyword(KeywordId::If) => self.if_stmt(),
            TokenKind::Keyword(KeywordId::Inhale) => {
                self.keyword_stmt(KeywordId::Inhale, NodeKind::InhaleStmt)
            }
            TokenKind::Keyword(KeywordId::Exhale) => {
                self.keyword_stmt(KeywordId::Exhale, NodeKind::ExhaleStmt)
            }
            TokenKind::Keyword(KeywordId::Assert) => {
                self.keyword_stmt(KeywordId::Assert, NodeKind::AssertStmt)
            }
            TokenKind::Keyword(KeywordId::Assume) => {
                self.keyword_stmt(KeywordId::Assume, NodeKind::AssumeStmt)
            }
            TokenKind::Keyword(KeywordId::Fold) => {
                self.keyword_stmt(KeywordId::Fold, NodeKind::FoldStmt)
            }
            TokenKind::Keyword(KeywordId::Unfold) => {
                self.keyword_stmt(KeywordId::Unfold, NodeKind::UnfoldStmt)
            }
            _ => self.expr_statement(),
        }
    }

    /// `{ stmt* }` with per-statement error containment.
    ///
    /// A declaration keyword inside a block means the closing brace is
    /// missing; the loop stops so the enclosing declaration can resume.
    fn block(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Block);
        self.expect_punct(&mut n, PunctuationId::LBrace)?;
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            if self.at_decl_start() {
                break;
            }
            let checkpoint = self.pos;
            match self.statement() {
                Ok(stmt) => n.push_node(stmt),
                Err(e) => {
                    let node = self.recover(checkpoint, e, Recovery::Statement);
                    n.push_node(node);
                }
            }
        }
        self.close_brace(&mut n);
        Ok(n.finish())
    }

    /// `var x: Int` with an optional `:= expr` initializer.
    fn var_decl(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::VarDecl);
        self.expect_keyword(&mut n, KeywordId::Var)?;
        self.ident(&mut n, Some("ident"))?;
        self.expect_punct(&mut n, PunctuationId::Colon)?;
        let t = self.typ()?;
        n.push_node(t);
        if self.match_op(&mut n, OperatorId::Assign) {
            let init = self.expression()?;
            n.push_node(init);
            n.name_last("expr");
        }
        Ok(n.finish())
    }

    /// `label l`
    fn label_stmt(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Label);
        self.expect_keyword(&mut n, KeywordId::Label)?;
        self.ident(&mut n, None)?;
        Ok(n.finish())
    }

    /// `goto l`
    fn goto_stmt(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::GotoStmt);
        self.expect_keyword(&mut n, KeywordId::Goto)?;
        self.ident(&mut n, Some("target"))?;
        Ok(n.finish())
    }

    /// `if (cond) { ... } else { ... }`; the else branch is optional.
    fn if_stmt(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::IfStmt);
        self.expect_keyword(&mut n, KeywordId::If)?;
        self.expect_punct(&mut n, PunctuationId::LParen)?;
        let condition = self.expression()?;
        n.push_node(condition);
        n.name_last("condition");
        self.expect_punct(&mut n, PunctuationId::RParen)?;
        let then_clause = self.block()?;
        n.push_node(then_clause);
        n.name_last("then_clause");
        if self.match_keyword(&mut n, KeywordId::Else) {
            let else_clause = self.block()?;
            n.push_node(else_clause);
            n.name_last("else_clause");
        }
        Ok(n.finish())
    }

    /// `inhale e` / `exhale e` / `assert e` / `assume e` / `fold e` /
    /// `unfold e`.
    fn keyword_stmt(&mut self, kw: KeywordId, kind: NodeKind) -> ParseResult {
        let mut n = NodeBuilder::new(kind);
        self.expect_keyword(&mut n, kw)?;
        let e = self.expression()?;
        n.push_node(e);
        Ok(n.finish())
    }

    /// Expression-led statement inside a block: an assignment or a call.
    fn expr_statement(&mut self) -> ParseResult {
        let expr = self.expression()?;
        if self.check_op(OperatorId::Assign) {
            return self.assign_stmt(expr);
        }
        if expr.kind == NodeKind::FunctionCall {
            return Ok(expr);
        }
        Err(SyntaxError::syntax("Expected a statement", expr.span))
    }

    /// Expression-led top-level item: an assignment, a call, or a bare
    /// expression (the permissive top level accepts all three).
    fn expr_led_item(&mut self) -> ParseResult {
        let expr = self.expression()?;
        if self.check_op(OperatorId::Assign) {
            return self.assign_stmt(expr);
        }
        Ok(expr)
    }

    /// `target := expr` where the target is an identifier or a field access.
    fn assign_stmt(&mut self, target: SyntaxNode) -> ParseResult {
        if !matches!(target.kind, NodeKind::Ident | NodeKind::FieldAccessExpr) {
            return Err(SyntaxError::syntax("Invalid assignment target", target.span));
        }
        let mut n = NodeBuilder::new(NodeKind::AssignStmt);
        n.push_node(target);
        n.name_last("target");
        self.expect_op(&mut n, OperatorId::Assign)?;
        let value = self.expression()?;
        n.push_node(value);
        n.name_last("expr");
        Ok(n.finish())
    }
}
