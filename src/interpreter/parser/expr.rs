use crate::{
    ast::{NodeHandle, NodeKind, OpKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses an expression statement.
    ///
    /// An expression is a non-operator followed by any number of
    /// `(operator, non-operator)` pairs, terminated by a newline, a `{`, or
    /// a closing separator. The tree is built around a running top node:
    ///
    /// - a new operator of equal or looser precedence wraps the tree (the
    ///   old top becomes its left child), which makes equal buckets
    ///   left-associative;
    /// - a tighter operator walks down the right spine past looser,
    ///   unparenthesized operators and is spliced in there.
    ///
    /// `in_parens` nodes stop the spine walk, so parenthesized groups keep
    /// their shape.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> ParseResult<NodeHandle> {
        let left = self.parse_non_op()?;
        if self.expression_ended() {
            return Ok(left);
        }

        let (op, op_line) = self.parse_operator()?;
        let right = self.parse_non_op()?;
        let mut top = self.add(NodeKind::Op { op,
                                              left,
                                              right,
                                              in_parens: false },
                               op_line);

        while !self.expression_ended() {
            let (new_op, new_line) = self.parse_operator()?;
            let right = self.parse_non_op()?;

            if new_op.precedence() >= self.op_precedence(top) {
                top = self.add(NodeKind::Op { op:        new_op,
                                              left:      top,
                                              right,
                                              in_parens: false },
                               new_line);
                continue;
            }

            // Find the lowest right-spine node the new operator still binds
            // tighter than; parenthesized children are opaque.
            let mut spine = top;
            loop {
                let child = self.op_right(spine);
                match &self.ast.node(child).kind {
                    NodeKind::Op { op, in_parens, .. }
                        if new_op.precedence() < op.precedence() && !*in_parens =>
                    {
                        spine = child;
                    },
                    _ => break,
                }
            }

            let child = self.op_right(spine);
            let inserted = self.add(NodeKind::Op { op:        new_op,
                                                   left:      child,
                                                   right,
                                                   in_parens: false },
                                    new_line);
            self.set_op_right(spine, inserted);
        }

        Ok(top)
    }

    /// Returns `true` when the expression cannot continue: end of input, a
    /// newline, an opening brace (a control-flow body follows), or a
    /// closing separator.
    fn expression_ended(&self) -> bool {
        match self.current() {
            Ok((token, _)) => {
                matches!(token, Token::NewLine | Token::LBrace) || token.is_closing_separator()
            },
            Err(_) => true,
        }
    }

    /// Parses anything that is not an operator: a parenthesized statement,
    /// or an identifier form (call, variable, literal).
    fn parse_non_op(&mut self) -> ParseResult<NodeHandle> {
        let handle = if matches!(self.current()?.0, Token::LParen) {
            self.parse_parenthesized()?
        } else {
            self.parse_id()?
        };

        self.continue_statement()?;
        Ok(handle)
    }

    /// Parses `( statement )`, marking a produced operator node as
    /// parenthesized so later precedence insertion cannot rearrange it.
    fn parse_parenthesized(&mut self) -> ParseResult<NodeHandle> {
        self.advance();
        self.open_paren();

        let handle = self.parse_statement()?;

        match self.current()? {
            (Token::RParen, _) => {},
            (_, line) => return Err(ParseError::ExpectedClosingParen { line }),
        }

        if let NodeKind::Op { in_parens, .. } = &mut self.ast.node_mut(handle).kind {
            *in_parens = true;
        }

        self.close_paren();
        self.advance();
        Ok(handle)
    }

    /// Parses an identifier form: a function call, an optionally indexed
    /// variable, or a numeric literal.
    ///
    /// A leading `-` is accepted only before these forms. Literals are
    /// negated in place; calls and variables desugar into a subtraction
    /// from a synthesized zero.
    fn parse_id(&mut self) -> ParseResult<NodeHandle> {
        let negative = if matches!(self.current()?.0, Token::Minus) {
            self.advance();
            true
        } else {
            false
        };

        match self.current()? {
            (Token::Int(value), line) => {
                let value = if negative { -*value } else { *value };
                self.advance();
                Ok(self.add(NodeKind::Int(value), line))
            },
            (Token::Float(value), line) => {
                let value = if negative { -*value } else { *value };
                self.advance();
                Ok(self.add(NodeKind::Float(value), line))
            },
            (Token::Identifier(_), _) => {
                if matches!(self.peek_next(), Some((Token::LParen, _))) {
                    self.parse_call(negative)
                } else {
                    self.parse_variable(negative)
                }
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

    /// Parses a call `name(arg, …)`, including the zero-argument form.
    /// Arguments are full statements, separated by commas.
    fn parse_call(&mut self, negative: bool) -> ParseResult<NodeHandle> {
        let (name, line) = match self.current()? {
            (Token::Identifier(name), line) => (name.clone(), line),
            (token, line) => {
                return Err(ParseError::UnexpectedOperator { token: token.describe(),
                                                            line });
            },
        };
        self.advance();
        self.advance();
        self.open_paren();
        self.continue_statement()?;

        let mut args = Vec::new();
        if matches!(self.current()?.0, Token::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_statement()?);

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

        let call = self.add(NodeKind::Call { name, args }, line);
        Ok(if negative { self.negate(call, line) } else { call })
    }

    /// Parses a variable reference with at most one `[index]`.
    fn parse_variable(&mut self, negative: bool) -> ParseResult<NodeHandle> {
        let (name, line) = match self.current()? {
            (Token::Identifier(name), line) => (name.clone(), line),
            (token, line) => {
                return Err(ParseError::UnexpectedOperator { token: token.describe(),
                                                            line });
            },
        };
        self.advance();

        let index = if !self.at_end() && matches!(self.current()?.0, Token::LBracket) {
            self.advance();
            self.open_paren();
            self.continue_statement()?;

            let index = self.parse_statement()?;

            match self.current()? {
                (Token::RBracket, _) => {},
                (_, line) => return Err(ParseError::ExpectedClosingParen { line }),
            }
            self.close_paren();
            self.advance();

            Some(index)
        } else {
            None
        };

        let var = self.add(NodeKind::Var { name, index }, line);
        Ok(if negative { self.negate(var, line) } else { var })
    }

    /// Wraps a node into `0 - node`, the desugaring of unary minus.
    fn negate(&mut self, operand: NodeHandle, line: u32) -> NodeHandle {
        let zero = self.add(NodeKind::Int(0), line);
        self.add(NodeKind::Op { op:        OpKind::Sub,
                                left:      zero,
                                right:     operand,
                                in_parens: false },
                 line)
    }

    /// Parses the current token as a binary operator and consumes it.
    fn parse_operator(&mut self) -> ParseResult<(OpKind, u32)> {
        let (token, line) = self.current()?;
        let op = match token {
            Token::In => OpKind::In,
            Token::Star => OpKind::Mul,
            Token::Slash => OpKind::Div,
            Token::Percent => OpKind::Mod,
            Token::Plus => OpKind::Add,
            Token::Minus => OpKind::Sub,
            Token::Equals => OpKind::Assign,
            Token::StarEqual => OpKind::MulAssign,
            Token::SlashEqual => OpKind::DivAssign,
            Token::PercentEqual => OpKind::ModAssign,
            Token::PlusEqual => OpKind::AddAssign,
            Token::MinusEqual => OpKind::SubAssign,
            Token::Less => OpKind::Less,
            Token::Greater => OpKind::Greater,
            Token::LessEqual => OpKind::LessEqual,
            Token::GreaterEqual => OpKind::GreaterEqual,
            Token::EqualEqual => OpKind::Equal,
            Token::BangEqual => OpKind::NotEqual,
            Token::And => OpKind::And,
            Token::Or => OpKind::Or,
            Token::LParen | Token::LBrace | Token::LBracket => {
                return Err(ParseError::InvalidToken { token: token.describe(),
                                                      line });
            },
            _ => {
                return Err(ParseError::ExpectedOperator { token: token.describe(),
                                                          line });
            },
        };

        self.advance();
        self.continue_statement()?;
        Ok((op, line))
    }

    /// Returns the precedence of an operator node's tag; non-operator
    /// handles report the tightest bucket so the spine walk stops on them.
    fn op_precedence(&self, handle: NodeHandle) -> u32 {
        match &self.ast.node(handle).kind {
            NodeKind::Op { op, .. } => op.precedence(),
            _ => 0,
        }
    }

    /// Returns the right child of an operator node, or the node itself when
    /// it has none.
    fn op_right(&self, handle: NodeHandle) -> NodeHandle {
        match &self.ast.node(handle).kind {
            NodeKind::Op { right, .. } => *right,
            _ => handle,
        }
    }

    fn set_op_right(&mut self, handle: NodeHandle, new_right: NodeHandle) {
        if let NodeKind::Op { right, .. } = &mut self.ast.node_mut(handle).kind {
            *right = new_right;
        }
    }
}
