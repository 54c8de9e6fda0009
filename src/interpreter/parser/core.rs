use crate::{
    ast::{Ast, Node, NodeHandle, NodeKind},
    error::ParseError,
    interpreter::lexer::Token,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a token stream into an abstract syntax tree.
///
/// Statements are separated by newline tokens; the lexer guarantees the
/// stream ends with one. Any error aborts parsing and yields no tree.
///
/// # Errors
/// Returns the first [`ParseError`] encountered, carrying the offending
/// token's line number.
///
/// # Example
/// ```
/// use propscript::interpreter::{lexer::lex, parser::parse};
///
/// let tokens = lex("x = 1 + 2").unwrap();
/// let ast = parse(&tokens).unwrap();
///
/// assert_eq!(ast.parents.len(), 1);
/// ```
pub fn parse(tokens: &[(Token, u32)]) -> ParseResult<Ast> {
    let mut parser = Parser::new(tokens);

    while !parser.at_end() {
        let statement = parser.parse_statement()?;
        parser.ast.parents.push(statement);
        parser.skip_newline();
    }

    Ok(parser.ast)
}

/// Parser state: a cursor into the token stream, the count of unclosed
/// parentheses and brackets, and the tree under construction.
///
/// While `open_parens` is nonzero, newline tokens are silently consumed so
/// expressions can span lines. Control-flow statements are rejected in that
/// state.
pub struct Parser<'a> {
    tokens:      &'a [(Token, u32)],
    pos:         usize,
    open_parens: u32,
    pub(in crate::interpreter::parser) ast: Ast,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [(Token, u32)]) -> Self {
        Self { tokens,
               pos: 0,
               open_parens: 0,
               ast: Ast::new() }
    }

    /// Returns `true` once every token has been consumed.
    pub(in crate::interpreter::parser) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn last_line(&self) -> u32 {
        self.tokens.last().map_or(1, |(_, line)| *line)
    }

    /// Returns the current token and its line, or an end-of-input error.
    pub(in crate::interpreter::parser) fn current(&self) -> ParseResult<(&Token, u32)> {
        self.tokens
            .get(self.pos)
            .map(|(token, line)| (token, *line))
            .ok_or(ParseError::UnexpectedEndOfInput { line: self.last_line() })
    }

    /// Peeks one token past the current position.
    pub(in crate::interpreter::parser) fn peek_next(&self) -> Option<&(Token, u32)> {
        self.tokens.get(self.pos + 1)
    }

    pub(in crate::interpreter::parser) fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consumes a single newline token if one is current.
    pub(in crate::interpreter::parser) fn skip_newline(&mut self) {
        if let Ok((Token::NewLine, _)) = self.current() {
            self.advance();
        }
    }

    /// Consumes a newline while inside unclosed parentheses, keeping the
    /// statement going across lines.
    pub(in crate::interpreter::parser) fn continue_statement(&mut self) -> ParseResult<()> {
        if self.open_parens != 0
           && let Ok((Token::NewLine, _)) = self.current()
        {
            self.advance();
            if self.at_end() {
                return Err(ParseError::ExpectedClosingParen { line: self.last_line() });
            }
        }
        Ok(())
    }

    pub(in crate::interpreter::parser) fn open_paren(&mut self) {
        self.open_parens += 1;
    }

    pub(in crate::interpreter::parser) fn close_paren(&mut self) {
        self.open_parens -= 1;
    }

    pub(in crate::interpreter::parser) fn in_parens(&self) -> bool {
        self.open_parens > 0
    }

    /// Appends a node to the tree and returns its handle.
    pub(in crate::interpreter::parser) fn add(&mut self, kind: NodeKind, line: u32) -> NodeHandle {
        self.ast.add(Node { kind, line })
    }

    /// Parses the next identifier token and returns its name.
    ///
    /// Keywords are invalid tokens here; anything else that is not an
    /// identifier is an unexpected operator.
    pub(in crate::interpreter::parser) fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current()? {
            (Token::Identifier(name), _) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            },
            (token @ (Token::Func
             | Token::Ret
             | Token::If
             | Token::Else
             | Token::For
             | Token::Break
             | Token::Continue),
             line) => {
                Err(ParseError::InvalidToken { token: token.describe(),
                                               line })
            },
            (token, line) => {
                Err(ParseError::UnexpectedOperator { token: token.describe(),
                                                     line })
            },
        }
    }
}
