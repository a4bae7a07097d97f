use std::rc::Rc;

use crate::ast::{Block, Expr, Ident, Statement};
use crate::interpreter::lexer::TokenKind;
use crate::interpreter::parser::core::{Parser, Precedence};

impl Parser {
    /// Dispatches on the current token kind to the statement rule; anything
    /// that is not a keyword statement is an expression statement.
    pub(super) fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Function => self.parse_function_statement(),
            TokenKind::Module => self.parse_module_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `let <pattern> = <expression>`
    ///
    /// The pattern position accepts an identifier or a destructuring
    /// tuple/array/map literal; anything else is an invalid binding target.
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.next_token();

        let pattern = match self.cur.kind {
            TokenKind::Ident => Expr::Identifier { token: self.cur.clone(),
                                                   name:  self.cur.literal.clone(), },
            TokenKind::LParen => self.parse_grouped_expression()?,
            TokenKind::LBracket => self.parse_array_literal()?,
            TokenKind::LBrace => self.parse_map_literal()?,
            _ => {
                self.error_at_cur("invalid left-hand side of let binding");
                return None;
            },
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Statement::Let { token, pattern, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        Some(Statement::Expression { token, expression })
    }

    /// `fn name(p q) { body }`
    ///
    /// The lexer has already folded `name(` into a single `FUNCCALL` token,
    /// so the name arrives either as that or as a plain identifier with the
    /// paren following.
    fn parse_function_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();

        if !self.peek_is(TokenKind::Ident) && !self.peek_is(TokenKind::FuncCall) {
            self.error_at_peek("expected function name after fn");
            return None;
        }
        self.next_token();

        let name = Ident { token: self.cur.clone(),
                           name:  self.cur.literal.clone(), };

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_function_statement_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Statement::Function { token,
                                   name,
                                   parameters: Rc::new(parameters),
                                   body: Rc::new(body) })
    }

    fn parse_function_statement_parameters(&mut self) -> Option<Vec<Ident>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(Ident { token: self.cur.clone(),
                                name:  self.cur.literal.clone(), });

        while self.peek_is(TokenKind::Ident) {
            self.next_token();
            parameters.push(Ident { token: self.cur.clone(),
                                    name:  self.cur.literal.clone(), });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(parameters)
    }

    /// `module Name` claims the rest of the file as the module body.
    fn parse_module_statement(&mut self) -> Option<Statement> {
        let token = self.cur.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }

        let name_token = self.cur.clone();
        let name_expr = self.parse_identifier();
        let Expr::Identifier { name, .. } = name_expr else {
            return None;
        };
        let name = Ident { token: name_token, name };
        self.next_token();

        let mut body = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                body.push(statement);
            }
            self.next_token();
        }

        Some(Statement::Module { token, name, body })
    }

    /// Parses `{ … }` into a block; the current token must be the `{`.
    pub(super) fn parse_block_statement(&mut self) -> Block {
        let token = self.cur.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Block { token, statements }
    }
}
