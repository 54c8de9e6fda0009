use crate::{
    ast::{NodeHandle, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - an `if` or `for` construct,
    /// - a function declaration,
    /// - a `ret` statement,
    /// - `break` or `continue`,
    /// - an expression (assignment or computation).
    ///
    /// Dispatch looks at the current token only; everything that does not
    /// start with a keyword is parsed as an expression. Conditions and call
    /// arguments recurse through this function, so an assignment is legal in
    /// any expression position.
    ///
    /// # Returns
    /// The handle of the parsed statement's root node.
    pub fn parse_statement(&mut self) -> ParseResult<NodeHandle> {
        match self.current()?.0 {
            Token::If | Token::For => self.parse_control_flow(),
            Token::Func => self.parse_function_declaration(),
            Token::Ret => self.parse_return(),
            Token::Break | Token::Continue => self.parse_break_continue(),
            _ => self.parse_expression(),
        }
    }

    /// Parses an `if` or `for` statement.
    ///
    /// The condition is a full statement parse; for `for` it must be an `in`
    /// expression, which is checked at execution time. The body is either a
    /// `{ … }` block or a single statement. `if` accepts an optional `else`
    /// (after an optional newline) whose body is again a block or a single
    /// statement; `else if` chains are the single-statement form.
    ///
    /// Control flow inside parentheses is rejected.
    fn parse_control_flow(&mut self) -> ParseResult<NodeHandle> {
        let (token, line) = self.current()?;
        let is_for = matches!(token, Token::For);
        if self.in_parens() {
            return Err(ParseError::InvalidToken { token: token.describe(),
                                                  line });
        }
        self.advance();

        let condition = self.parse_statement()?;
        self.skip_newline();

        let code = self.parse_body()?;

        if is_for {
            return Ok(self.add(NodeKind::For { condition, code }, line));
        }

        self.skip_newline();

        let else_code = if !self.at_end() && matches!(self.current()?.0, Token::Else) {
            self.advance();
            self.skip_newline();
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(self.add(NodeKind::If { condition,
                                   code,
                                   else_code },
                    line))
    }

    /// Parses a function declaration.
    ///
    /// Syntax: `func <name> [(param, …)] { statements }`. The parameter list
    /// is optional and may be empty; the braced body is required.
    fn parse_function_declaration(&mut self) -> ParseResult<NodeHandle> {
        let line = self.current()?.1;
        self.advance();
        self.skip_newline();

        let name = self.expect_identifier()?;
        self.skip_newline();

        let mut params = Vec::new();
        if !self.at_end() && matches!(self.current()?.0, Token::LParen) {
            self.advance();
            self.open_paren();
            self.continue_statement()?;

            if matches!(self.current()?.0, Token::RParen) {
                self.advance();
            } else {
                loop {
                    params.push(self.expect_identifier()?);

                    match self.current()? {
                        (Token::RParen, _) => break,
                        (Token::Comma, _) => {},
                        (token, line) => {
                            return Err(ParseError::ExpectedOperator { token: token.describe(),
                                                                      line });
                        },
                    }

                    self.advance();
                    self.continue_statement()?;
                }
                self.advance();
            }
            self.close_paren();
        }

        self.skip_newline();

        match self.current()? {
            (Token::LBrace, _) => self.advance(),
            (_, line) => return Err(ParseError::ExpectedOpeningCurly { line }),
        }

        let code = self.parse_brace_block()?;

        Ok(self.add(NodeKind::Func { name,
                                     params,
                                     code },
                    line))
    }

    /// Parses a `ret` statement with its optional value.
    ///
    /// The value is omitted when the next token is a newline or a closing
    /// separator; such a return yields void.
    fn parse_return(&mut self) -> ParseResult<NodeHandle> {
        let line = self.current()?.1;
        self.advance();

        let value = if self.statement_ended() {
            None
        } else {
            Some(self.parse_statement()?)
        };

        Ok(self.add(NodeKind::Return { value }, line))
    }

    /// Parses a `break` or `continue` statement. Anything other than a
    /// newline or closing separator after the keyword is an error.
    fn parse_break_continue(&mut self) -> ParseResult<NodeHandle> {
        let (token, line) = self.current()?;
        let kind = if matches!(token, Token::Break) {
            NodeKind::Break
        } else {
            NodeKind::Continue
        };
        self.advance();

        if !self.statement_ended() {
            let (token, line) = self.current()?;
            return Err(ParseError::InvalidToken { token: token.describe(),
                                                  line });
        }

        Ok(self.add(kind, line))
    }

    /// Parses a statement body: a braced block, or a single statement.
    fn parse_body(&mut self) -> ParseResult<Vec<NodeHandle>> {
        if matches!(self.current()?.0, Token::LBrace) {
            self.advance();
            self.parse_brace_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    /// Parses newline-separated statements up to and including the closing
    /// `}`. The opening brace has already been consumed.
    fn parse_brace_block(&mut self) -> ParseResult<Vec<NodeHandle>> {
        self.skip_newline();

        let mut code = Vec::new();
        while !matches!(self.current()?.0, Token::RBrace) {
            code.push(self.parse_statement()?);
            self.skip_newline();
        }
        self.advance();

        Ok(code)
    }

    /// Returns `true` when the statement cannot continue: end of input, a
    /// newline, or a closing separator.
    pub(in crate::interpreter::parser) fn statement_ended(&self) -> bool {
        match self.current() {
            Ok((token, _)) => matches!(token, Token::NewLine) || token.is_closing_separator(),
            Err(_) => true,
        }
    }
}
