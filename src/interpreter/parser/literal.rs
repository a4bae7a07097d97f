use std::rc::Rc;

use crate::ast::{Block, Expr, Ident, Statement};
use crate::interpreter::lexer::{Lexer, TokenKind};
use crate::interpreter::parser::core::{Parser, Precedence};

impl Parser {
    pub(super) fn parse_integer_literal(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expr::IntegerLiteral { token, value }),
            Err(_) => {
                let message = format!("could not parse {:?} as integer", token.literal);
                self.error_at_cur(message);
                None
            },
        }
    }

    pub(super) fn parse_float_literal(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expr::FloatLiteral { token, value }),
            Err(_) => {
                let message = format!("could not parse {:?} as float", token.literal);
                self.error_at_cur(message);
                None
            },
        }
    }

    pub(super) fn parse_string_literal(&mut self) -> Expr {
        Expr::StringLiteral { token: self.cur.clone(),
                              value: self.cur.literal.clone(), }
    }

    pub(super) fn parse_atom_literal(&mut self) -> Expr {
        Expr::AtomLiteral { token: self.cur.clone(),
                            value: self.cur.literal.clone(), }
    }

    pub(super) fn parse_boolean_literal(&mut self) -> Expr {
        Expr::BooleanLiteral { token: self.cur.clone(),
                               value: self.cur_is(TokenKind::True), }
    }

    /// `$"…"`: the lexed body is split into plain-string and `{expression}`
    /// segments; each embedded expression is parsed by a fresh sub-parser
    /// over just that span, and its errors are folded into this parser's
    /// list.
    pub(super) fn parse_interpolated_string_literal(&mut self) -> Expr {
        let token = self.cur.clone();
        let body = token.literal.clone();
        let segments = self.parse_string_segments(&body);
        Expr::InterpolatedString { token, segments }
    }

    fn parse_string_segments(&mut self, input: &str) -> Vec<Expr> {
        let mut segments = Vec::new();
        let mut buffer = String::new();
        let mut expr_buffer = String::new();
        let mut in_expression = false;

        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' if chars.peek() == Some(&'{') => {
                    buffer.push('{');
                    chars.next();
                },
                '{' if !in_expression => {
                    if !buffer.is_empty() {
                        segments.push(self.string_segment(&buffer));
                        buffer.clear();
                    }
                    in_expression = true;
                },
                '}' if in_expression => {
                    if let Some(expr) = self.parse_expression_from_source(&expr_buffer) {
                        segments.push(expr);
                    }
                    expr_buffer.clear();
                    in_expression = false;
                },
                _ => {
                    if in_expression {
                        expr_buffer.push(ch);
                    } else {
                        buffer.push(ch);
                    }
                },
            }
        }

        if !buffer.is_empty() {
            segments.push(self.string_segment(&buffer));
        }

        segments
    }

    fn string_segment(&self, value: &str) -> Expr {
        Expr::StringLiteral { token: self.cur.clone(),
                              value: value.to_string(), }
    }

    fn parse_expression_from_source(&mut self, source: &str) -> Option<Expr> {
        let lexer = Lexer::new(source, &self.cur.file);
        let mut parser = Parser::new(lexer);
        let expr = parser.parse_expression(Precedence::Lowest);
        for error in parser.into_errors() {
            self.record_error(error);
        }
        if expr.is_none() {
            self.error_at_cur(format!("could not parse interpolated expression {source:?}"));
        }
        expr
    }

    pub(super) fn parse_array_literal(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();

        let mut elements = Vec::new();
        while !self.cur_is(TokenKind::RBracket) && !self.cur_is(TokenKind::Eof) {
            elements.push(self.parse_expression(Precedence::Lowest)?);
            self.next_token();
        }

        Some(Expr::ArrayLiteral { token, elements })
    }

    /// `{ … }` map literal, or map update when the window shows
    /// `{ IDENT with`.
    ///
    /// A map-literal entry is either the `key: value` atom sugar (the lexer
    /// already turned `key:` into an atom) or an explicit `keyExpr = value`.
    pub(super) fn parse_map_literal(&mut self) -> Option<Expr> {
        if self.peek_is(TokenKind::Ident) && self.peek2_is(TokenKind::With) {
            return self.parse_map_update_literal();
        }

        let token = self.cur.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenKind::RBrace) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            let sugar = matches!(key, Expr::AtomLiteral { .. }) && !self.peek_is(TokenKind::Assign);
            if !sugar && !self.expect_peek(TokenKind::Assign) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(Expr::MapLiteral { token, pairs })
    }

    /// `{ base with k = v … }`
    fn parse_map_update_literal(&mut self) -> Option<Expr> {
        let token = self.cur.clone();
        self.next_token();
        let base = self.parse_identifier();
        self.next_token(); // the `with`

        let mut pairs = Vec::new();
        while !self.peek_is(TokenKind::RBrace) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            let sugar = matches!(key, Expr::AtomLiteral { .. }) && !self.peek_is(TokenKind::Assign);
            if !sugar && !self.expect_peek(TokenKind::Assign) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        Some(Expr::MapUpdate { token,
                               base: Box::new(base),
                               pairs })
    }

    /// `\p1 p2 => body` — a lambda with zero or more parameters and either a
    /// single-expression or brace-block body.
    pub(super) fn parse_function_literal(&mut self) -> Option<Expr> {
        let token = self.cur.clone();

        let parameters = self.parse_function_literal_parameters()?;
        self.next_token();

        let body = if self.cur_is(TokenKind::LBrace) {
            self.parse_block_statement()
        } else {
            let body_token = self.cur.clone();
            let expression = self.parse_expression(Precedence::Lowest)?;
            Block { token:      body_token.clone(),
                    statements: vec![Statement::Expression { token: body_token,
                                                             expression }], }
        };

        Some(Expr::FunctionLiteral { token,
                                     parameters: Rc::new(parameters),
                                     body: Rc::new(body) })
    }

    fn parse_function_literal_parameters(&mut self) -> Option<Vec<Ident>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenKind::Arrow) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(Ident { token: self.cur.clone(),
                                name:  self.cur.literal.clone(), });

        while !self.peek_is(TokenKind::Arrow) && !self.peek_is(TokenKind::Eof) {
            self.next_token();
            parameters.push(Ident { token: self.cur.clone(),
                                    name:  self.cur.literal.clone(), });
        }

        if !self.expect_peek(TokenKind::Arrow) {
            return None;
        }
        Some(parameters)
    }
}
