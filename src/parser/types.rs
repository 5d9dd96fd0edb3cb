/// Type annotations and parameters.
impl<'a> Parser<'a> {
    /// `x: Int`, a named and typed binder.
    fn parameter(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Parameter);
        self.ident(&mut n, None)?;
        self.expect_punct(&mut n, PunctuationId::Colon)?;
        let t = self.typ()?;
        n.push_node(t);
        Ok(n.finish())
    }

    /// `Int` or `Seq[Int]`: a type name with an optional single type
    /// argument in brackets.
    fn typ(&mut self) -> ParseResult {
        let mut n = NodeBuilder::new(NodeKind::Typ);
        self.ident(&mut n, None)?;
        if self.match_punct(&mut n, PunctuationId::LBracket) {
            self.ident(&mut n, None)?;
            self.expect_punct(&mut n, PunctuationId::RBracket)?;
        }
        Ok(n.finish())
    }

    /// Domain function signatures accept either a named parameter or a bare
    /// type; `ident ':'` lookahead disambiguates.
    fn parameter_or_typ(&mut self) -> ParseResult {
        if self.check_ident() && self.peek_next().kind.is_punctuation(PunctuationId::Colon) {
            self.parameter()
        } else {
            self.typ()
        }
    }
}
