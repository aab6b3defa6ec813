// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tokenizer for plural expressions.

use crate::plural::{
    parser::ParserError,
    token::{Token, TokenType},
};

pub struct Lexer {
    chars: Vec<char>,
    position: usize,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Return the position (in chars) of the next char to read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Return the char at the given position, NUL after the end of input.
    fn char_at(&self, position: usize) -> char {
        self.chars.get(position).copied().unwrap_or('\0')
    }

    fn next_if(&mut self, expected: char) -> bool {
        if self.char_at(self.position) == expected {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn read_number(&mut self, start: usize) -> Result<Token, ParserError> {
        while self.char_at(self.position).is_ascii_digit() {
            self.position += 1;
        }
        let literal: String = self.chars[start..self.position].iter().collect();
        literal
            .parse::<i64>()
            .map(Token::number)
            .map_err(|_| ParserError::NumberOverflow {
                literal,
                position: start,
            })
    }

    /// Return the next token.
    ///
    /// A terminator (`;`, newline, NUL or the end of input) is returned as
    /// [`TokenType::Eof`] and is not consumed, so it is returned again on the
    /// next call.
    pub fn next_token(&mut self) -> Result<Token, ParserError> {
        while matches!(self.char_at(self.position), ' ' | '\t') {
            self.position += 1;
        }
        let start = self.position;
        let c = self.char_at(start);
        if matches!(c, ';' | '\n' | '\0') {
            return Ok(Token::new(TokenType::Eof));
        }
        self.position += 1;
        let kind = match c {
            '0'..='9' => return self.read_number(start),
            '=' | '&' | '|' => {
                if !self.next_if(c) {
                    return Err(ParserError::InvalidOperator {
                        character: c,
                        found: self.chars.get(self.position).copied(),
                        position: start,
                    });
                }
                match c {
                    '=' => TokenType::Equals,
                    '&' => TokenType::And,
                    _ => TokenType::Or,
                }
            }
            '!' if self.next_if('=') => TokenType::NotEquals,
            '!' => TokenType::Not,
            '<' if self.next_if('=') => TokenType::LessOrEquals,
            '<' => TokenType::LessThan,
            '>' if self.next_if('=') => TokenType::GreaterOrEquals,
            '>' => TokenType::GreaterThan,
            '*' => TokenType::Multiply,
            '/' => TokenType::Divide,
            '%' => TokenType::Modulo,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            'n' => TokenType::N,
            '?' => TokenType::TernaryIf,
            ':' => TokenType::TernaryElse,
            '(' => TokenType::LeftParenthesis,
            ')' => TokenType::RightParenthesis,
            _ => {
                return Err(ParserError::InvalidCharacter {
                    character: c,
                    position: start,
                });
            }
        };
        Ok(Token::new(kind))
    }
}
