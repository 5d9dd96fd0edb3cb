/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the [`Parse`] output, and the
/// top-level `parse()` entrypoint that builds the `source_file` node.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type ParseResult = Result<SyntaxNode, SyntaxError>;

/// Result of a parse run: a lossless tree plus collected diagnostics.
///
/// The root is always a `source_file` node, even when `errors` is non-empty;
/// failed regions appear as `error` nodes holding the skipped tokens.
#[derive(Debug)]
pub struct Parse {
    pub root: SyntaxNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// `true` if the input lexed and parsed without diagnostics.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parser state.
///
/// ## Notes
/// - The parser is intentionally single-pass and recovers from errors where possible by
///   synchronizing at statement/declaration boundaries.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `crate::lexer`; must end with `Eof`.
    ///
    /// ## Panics
    /// - If the stream does not end with an `Eof` token (this indicates a
    ///   programming error).
    pub fn new(tokens: &'a [Token]) -> Self {
        assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a `source_file` tree.
    ///
    /// The top level is permissive: declarations, statements, and bare
    /// expressions are all accepted as items. Downstream phases decide what
    /// they tolerate.
    pub fn parse(mut self) -> Parse {
        let mut root = NodeBuilder::new(NodeKind::SourceFile);

        while !self.is_at_end() {
            let checkpoint = self.pos;
            match self.item() {
                Ok(item) => root.push_node(item),
                Err(e) => {
                    let error = self.recover(checkpoint, e, Recovery::TopLevel);
                    root.push_node(error);
                }
            }
        }

        // Trailing trivia belongs to the root
        self.flush_trivia(&mut root);

        Parse {
            root: root.finish(),
            errors: self.errors,
        }
    }
}
