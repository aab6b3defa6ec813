// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pratt parser for plural expressions.
//!
//! Each token has a left binding power, a null denotation (when it starts an
//! expression: numbers, `n`, `!` and parentheses) and/or a left denotation
//! (when it continues an expression: binary operators and `?:`).

use crate::plural::{
    lexer::Lexer,
    token::{Ast, BinaryOp, Token, TokenType},
};

const TERNARY_BP: u8 = 20;
const NOT_BP: u8 = 80;

/// Maximum nesting of an expression (parentheses, operators and branches).
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("found invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("found invalid operator '{character}' at position {position} (expected '{character}{character}')")]
    InvalidOperator {
        character: char,
        found: Option<char>,
        position: usize,
    },

    #[error("number {literal} at position {position} does not fit in a 64-bit integer")]
    NumberOverflow { literal: String, position: usize },

    #[error("expected token \"{expected}\" but received \"{found}\"")]
    UnexpectedToken {
        expected: TokenType,
        found: TokenType,
    },

    #[error("unexpected token \"{found}\" at start of expression")]
    MissingOperand { found: TokenType },

    #[error("expression nested too deeply at position {position} (maximum depth is {})", MAX_DEPTH)]
    TooDeep { position: usize },
}

fn left_binding_power(kind: TokenType) -> u8 {
    match kind {
        TokenType::TernaryIf => TERNARY_BP,
        TokenType::Or => 30,
        TokenType::And => 40,
        TokenType::Equals | TokenType::NotEquals => 50,
        TokenType::GreaterThan
        | TokenType::LessThan
        | TokenType::GreaterOrEquals
        | TokenType::LessOrEquals => 55,
        TokenType::Minus | TokenType::Plus => 60,
        TokenType::Multiply | TokenType::Divide | TokenType::Modulo => 70,
        _ => 0,
    }
}

pub struct AstParser {
    lexer: Lexer,
    current: Token,
    /// Number of nested calls to `parse_expression`.
    depth: usize,
}

impl AstParser {
    /// Parse a plural expression (e.g. `n != 1`) and return its syntax tree.
    ///
    /// The expression ends at the end of input or at the first `;` or newline.
    pub fn parse(input: &str) -> Result<Ast, ParserError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let mut parser = AstParser {
            lexer,
            current,
            depth: 0,
        };
        let (ast, _) = parser.parse_expression(0)?;
        parser.expect(TokenType::Eof)?;
        Ok(ast)
    }

    fn advance(&mut self) -> Result<Token, ParserError> {
        let token = self.current;
        self.current = self.lexer.next_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: TokenType) -> Result<(), ParserError> {
        if self.current.kind != expected {
            return Err(ParserError::UnexpectedToken {
                expected,
                found: self.current.kind,
            });
        }
        self.advance()?;
        Ok(())
    }

    fn too_deep(&self) -> ParserError {
        ParserError::TooDeep {
            position: self.lexer.position(),
        }
    }

    /// Parse an expression and return it with the height of its tree.
    ///
    /// Both the recursion depth and the tree height are bounded by
    /// [`MAX_DEPTH`]: a chain like `n + n + ... + n` is parsed in a loop but
    /// still builds a deep tree.
    fn parse_expression(
        &mut self,
        right_binding_power: u8,
    ) -> Result<(Ast, usize), ParserError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        let token = self.advance()?;
        let (mut left, mut height) = self.null_denotation(token)?;
        while right_binding_power < left_binding_power(self.current.kind) {
            if height >= MAX_DEPTH {
                return Err(self.too_deep());
            }
            let token = self.advance()?;
            (left, height) = self.left_denotation(token, left, height)?;
        }
        if height > MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth -= 1;
        Ok((left, height))
    }

    fn null_denotation(&mut self, token: Token) -> Result<(Ast, usize), ParserError> {
        match token.kind {
            TokenType::Number => Ok((Ast::Number(token.value), 1)),
            TokenType::N => Ok((Ast::N, 1)),
            TokenType::Not => {
                let (expr, height) = self.parse_expression(NOT_BP)?;
                Ok((Ast::Not(Box::new(expr)), height + 1))
            }
            TokenType::LeftParenthesis => {
                let parsed = self.parse_expression(0)?;
                self.expect(TokenType::RightParenthesis)?;
                Ok(parsed)
            }
            found => Err(ParserError::MissingOperand { found }),
        }
    }

    fn left_denotation(
        &mut self,
        token: Token,
        left: Ast,
        left_height: usize,
    ) -> Result<(Ast, usize), ParserError> {
        if token.kind == TokenType::TernaryIf {
            // Both branches are parsed just below the ternary binding power:
            // `a ? b : c ? d : e` is `a ? b : (c ? d : e)`.
            let (if_true, true_height) = self.parse_expression(TERNARY_BP - 1)?;
            self.expect(TokenType::TernaryElse)?;
            let (if_false, false_height) = self.parse_expression(TERNARY_BP - 1)?;
            let height = left_height.max(true_height).max(false_height) + 1;
            return Ok((
                Ast::Ternary(Box::new(left), Box::new(if_true), Box::new(if_false)),
                height,
            ));
        }
        let Some(op) = BinaryOp::from_token(token.kind) else {
            return Err(ParserError::UnexpectedToken {
                expected: TokenType::Eof,
                found: token.kind,
            });
        };
        let (right, right_height) = self.parse_expression(left_binding_power(token.kind))?;
        Ok((
            Ast::Binary(op, Box::new(left), Box::new(right)),
            left_height.max(right_height) + 1,
        ))
    }
}
