use crate::ast::{Arm, Block, Expr, InfixOp, PrefixOp, Statement};
use crate::interpreter::lexer::TokenKind;
use crate::interpreter::parser::core::{Parser, Precedence};

impl Parser {
    /// Pratt expression parsing: one prefix rule for the current token, then
    /// fold infix rules while the next token binds tighter than
    /// `precedence`.
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while precedence < self.peek_precedence() {
            if !Self::has_infix_rule(self.peek.kind) {
                return Some(left);
            }
            // A `(` continues the expression as a call only when it touches
            // the callee, mirroring the lexer's FUNCCALL rule; otherwise it
            // starts the next expression.
            if self.peek.kind == TokenKind::LParen && !self.paren_touches_callee() {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn paren_touches_callee(&self) -> bool {
        self.peek.line == self.cur.line
        && self.peek.column == self.cur.column + self.cur.literal.len()
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.cur.kind {
            TokenKind::Ident => Some(self.parse_identifier()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::Str => Some(self.parse_string_literal()),
            TokenKind::Interpolated => Some(self.parse_interpolated_string_literal()),
            TokenKind::Atom => Some(self.parse_atom_literal()),
            TokenKind::True | TokenKind::False => Some(self.parse_boolean_literal()),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_map_literal(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Cond => self.parse_cond_expression(),
            TokenKind::Case => self.parse_case_expression(),
            TokenKind::Backslash => self.parse_function_literal(),
            TokenKind::FuncCall => self.parse_call_expression(),
            _ => {
                let message = format!("no prefix parse rule for {}", self.cur.kind);
                self.error_at_cur(message);
                None
            },
        }
    }

    const fn has_infix_rule(kind: TokenKind) -> bool {
        matches!(kind, TokenKind::Dot | TokenKind::At | TokenKind::LParen)
        || InfixOp::from_token(kind).is_some()
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.cur.kind {
            TokenKind::Dot => self.parse_property_access_expression(left),
            TokenKind::At => self.parse_index_expression(left),
            TokenKind::LParen => self.parse_paren_call_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    /// Identifiers, including composite module names.
    ///
    /// When the identifier starts uppercase, `. Upper` pairs are greedily
    /// folded into one dotted name (`A.B.C`). The fold stops as soon as the
    /// segment after the dot is a call head or lowercase — that dot belongs
    /// to a property access instead.
    pub(super) fn parse_identifier(&mut self) -> Expr {
        let token = self.cur.clone();
        let mut name = token.literal.clone();

        if starts_uppercase(&name) {
            while self.peek_is(TokenKind::Dot)
                  && self.peek2_is(TokenKind::Ident)
                  && starts_uppercase(&self.peek2.literal)
            {
                self.next_token();
                name.push('.');
                name.push_str(&self.peek.literal);
                self.next_token();
            }
        }

        Expr::Identifier { token, name }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        let operator = match token.kind {
            TokenKind::Bang => PrefixOp::Not,
            _ => PrefixOp::Neg,
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expr::Prefix { token,
                            operator,
                            right: Box::new(right) })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let token = self.cur.clone();
        let Some(operator) = InfixOp::from_token(token.kind) else {
            let message = format!("no infix parse rule for {}", token.kind);
            self.error_at_cur(message);
            return None;
        };

        // `**` is right-associative: its right operand parses one level
        // below Exponent so an equal-precedence operator recurses rightward.
        let precedence = if operator == InfixOp::Pow {
            Precedence::Product
        } else {
            self.cur_precedence()
        };
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expr::Infix { token,
                           operator,
                           left: Box::new(left),
                           right: Box::new(right) })
    }

    /// `(…)` is a parenthesized expression when it holds exactly one
    /// expression, and a tuple literal when it holds two or more.
    pub(super) fn parse_grouped_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        let first = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(first);
        }

        let mut elements = vec![first];
        while !self.peek_is(TokenKind::RParen) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            elements.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(Expr::TupleLiteral { token, elements })
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expr::If { token,
                        condition: Box::new(condition),
                        consequence,
                        alternative })
    }

    /// `cond { c1 => body1 c2 => body2 … }`
    fn parse_cond_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let arms = self.parse_arms()?;
        Some(Expr::Cond { token, arms })
    }

    /// `case subject { pat1 => body1 pat2 => body2 … }`
    fn parse_case_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        let subject = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let arms = self.parse_arms()?;
        Some(Expr::Case { token,
                          subject: Box::new(subject),
                          arms })
    }

    /// The shared `condition => body` arm list of `cond` and `case`; a body
    /// that is a single expression is lifted into a one-statement block.
    fn parse_arms(&mut self) -> Option<Vec<Arm>> {
        let mut arms = Vec::new();

        while !self.peek_is(TokenKind::RBrace) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            let condition = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Arrow) {
                return None;
            }
            self.next_token();

            let body = if self.cur_is(TokenKind::LBrace) {
                self.parse_block_statement()
            } else {
                let token = self.cur.clone();
                let expression = self.parse_expression(Precedence::Lowest)?;
                Block { token:      token.clone(),
                        statements: vec![Statement::Expression { token, expression }], }
            };

            arms.push(Arm { condition, body });
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(arms)
    }

    /// A call whose head the lexer classified as `FUNCCALL`; the callee
    /// becomes a plain identifier expression.
    pub(super) fn parse_call_expression(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        let function = Expr::Identifier { token: self.cur.clone(),
                                          name:  self.cur.literal.clone(), };

        self.next_token(); // the `(`
        self.next_token();

        let arguments = if self.cur_is(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_call_arguments()?
        };

        Some(Expr::Call { token,
                          function: Box::new(function),
                          arguments })
    }

    /// A call whose callee is an arbitrary expression already parsed to the
    /// left of `(` — `(\x => x * 2)(5)`, or calling a call's result.
    fn parse_paren_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        let arguments = if self.cur_is(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_call_arguments()?
        };

        Some(Expr::Call { token,
                          function: Box::new(function),
                          arguments })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expr>> {
        let mut arguments = Vec::new();

        loop {
            arguments.push(self.parse_expression(Precedence::Lowest)?);
            if self.peek_is(TokenKind::RParen) || self.peek_is(TokenKind::Eof) {
                break;
            }
            self.next_token();
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(arguments)
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        // The index operand starts from its own token's precedence, so a
        // slice or arithmetic to the right of `@` stays inside the index.
        let index = self.parse_expression(self.cur_precedence())?;

        Some(Expr::Index { token,
                           left: Box::new(left),
                           index: Box::new(index) })
    }

    /// `left.right` where `right` must be an identifier or a call.
    fn parse_property_access_expression(&mut self, left: Expr) -> Option<Expr> {
        let token = self.cur.clone();

        let right = if self.peek_is(TokenKind::Ident) {
            self.next_token();
            Expr::Identifier { token: self.cur.clone(),
                               name:  self.cur.literal.clone(), }
        } else if self.peek_is(TokenKind::FuncCall) {
            self.next_token();
            self.parse_call_expression()?
        } else {
            self.error_at_peek("expected property name or call after '.'");
            return None;
        };

        Some(Expr::PropertyAccess { token,
                                    left: Box::new(left),
                                    right: Box::new(right) })
    }
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
