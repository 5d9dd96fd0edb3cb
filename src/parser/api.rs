/// Parse a token stream into a lossless tree.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Parse {
    let parse = Parser::new(tokens).parse();
    tracing::debug!(errors = parse.errors.len(), "parse complete");
    parse
}

/// Lex and parse a source buffer in one step, combining lexical and syntax
/// diagnostics in source order.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_source(source: &str) -> Parse {
    let lexed = crate::lexer::lex(source);
    let parsed = Parser::new(&lexed.tokens).parse();
    let mut errors = lexed.errors;
    errors.extend(parsed.errors);
    Parse {
        root: parsed.root,
        errors,
    }
}
