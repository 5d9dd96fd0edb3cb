/// Error recovery.
///
/// On a parse error the cursor rewinds to the checkpoint taken before the
/// failed production, so tokens half-consumed by the attempt are not lost.
/// Everything up to the next synchronization anchor is then swept into an
/// `error` node, which keeps the tree lossless and the damage contained.

/// Where to stop when discarding tokens after a parse error.
#[derive(Debug, Clone, Copy)]
enum Recovery {
    /// Resume at the next declaration or statement keyword; the permissive
    /// top level accepts both as sibling items.
    TopLevel,
    /// Resume at the next `function`/`axiom` or the domain's closing brace.
    DomainMember,
    /// Resume at the next statement keyword, declaration keyword, or the
    /// block's closing brace.
    Statement,
}

impl<'a> Parser<'a> {
    fn recover(&mut self, checkpoint: usize, error: SyntaxError, level: Recovery) -> SyntaxNode {
        self.pos = checkpoint;
        let mut n = NodeBuilder::new(NodeKind::Error);
        n.set_message(error.message.clone());
        self.errors.push(error);

        // Always consume at least one token so recovery makes progress even
        // when the cursor already sits on an anchor.
        let mut consumed = false;
        while !self.is_at_end() {
            if consumed && self.at_anchor(level) {
                break;
            }
            self.bump(&mut n);
            consumed = true;
        }
        n.finish()
    }

    fn at_decl_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(
                KeywordId::Domain
                    | KeywordId::Field
                    | KeywordId::Function
                    | KeywordId::Predicate
                    | KeywordId::Method
            )
        )
    }

    fn at_anchor(&self, level: Recovery) -> bool {
        match level {
            Recovery::TopLevel => self.at_decl_start() || self.at_statement_start(),
            Recovery::DomainMember => {
                self.at_decl_start()
                    || self.check_keyword(KeywordId::Axiom)
                    || self.check_punct(PunctuationId::RBrace)
            }
            Recovery::Statement => {
                self.at_decl_start()
                    || self.at_statement_start()
                    || self.check_punct(PunctuationId::RBrace)
            }
        }
    }
}
