// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tokens and abstract syntax tree of plural expressions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    TernaryIf,
    TernaryElse,
    Or,
    And,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEquals,
    LessOrEquals,
    Minus,
    Plus,
    Multiply,
    Divide,
    Modulo,
    Not,
    N,
    Number,
    LeftParenthesis,
    RightParenthesis,
    Eof,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            TokenType::TernaryIf => "?",
            TokenType::TernaryElse => ":",
            TokenType::Or => "||",
            TokenType::And => "&&",
            TokenType::Equals => "==",
            TokenType::NotEquals => "!=",
            TokenType::GreaterThan => ">",
            TokenType::LessThan => "<",
            TokenType::GreaterOrEquals => ">=",
            TokenType::LessOrEquals => "<=",
            TokenType::Minus => "-",
            TokenType::Plus => "+",
            TokenType::Multiply => "*",
            TokenType::Divide => "/",
            TokenType::Modulo => "%",
            TokenType::Not => "!",
            TokenType::N => "n",
            TokenType::Number => "number",
            TokenType::LeftParenthesis => "(",
            TokenType::RightParenthesis => ")",
            TokenType::Eof => "end of input",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    /// Value of a number literal (0 for other tokens).
    pub value: i64,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenType) -> Self {
        Self { kind, value: 0 }
    }

    #[must_use]
    pub fn number(value: i64) -> Self {
        Self {
            kind: TokenType::Number,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEquals,
    LessOrEquals,
    Minus,
    Plus,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    #[must_use]
    pub fn from_token(kind: TokenType) -> Option<Self> {
        match kind {
            TokenType::Or => Some(BinaryOp::Or),
            TokenType::And => Some(BinaryOp::And),
            TokenType::Equals => Some(BinaryOp::Equals),
            TokenType::NotEquals => Some(BinaryOp::NotEquals),
            TokenType::GreaterThan => Some(BinaryOp::GreaterThan),
            TokenType::LessThan => Some(BinaryOp::LessThan),
            TokenType::GreaterOrEquals => Some(BinaryOp::GreaterOrEquals),
            TokenType::LessOrEquals => Some(BinaryOp::LessOrEquals),
            TokenType::Minus => Some(BinaryOp::Minus),
            TokenType::Plus => Some(BinaryOp::Plus),
            TokenType::Multiply => Some(BinaryOp::Multiply),
            TokenType::Divide => Some(BinaryOp::Divide),
            TokenType::Modulo => Some(BinaryOp::Modulo),
            _ => None,
        }
    }

    /// Apply the operator on two values.
    ///
    /// Arithmetic wraps on overflow, division and modulo truncate toward zero
    /// and return 0 when the right operand is 0. Comparisons and boolean
    /// operators return 0 or 1.
    #[must_use]
    pub fn apply(self, left: i64, right: i64) -> i64 {
        match self {
            BinaryOp::Or => i64::from(left != 0 || right != 0),
            BinaryOp::And => i64::from(left != 0 && right != 0),
            BinaryOp::Equals => i64::from(left == right),
            BinaryOp::NotEquals => i64::from(left != right),
            BinaryOp::GreaterThan => i64::from(left > right),
            BinaryOp::LessThan => i64::from(left < right),
            BinaryOp::GreaterOrEquals => i64::from(left >= right),
            BinaryOp::LessOrEquals => i64::from(left <= right),
            BinaryOp::Minus => left.wrapping_sub(right),
            BinaryOp::Plus => left.wrapping_add(right),
            BinaryOp::Multiply => left.wrapping_mul(right),
            BinaryOp::Divide => left.checked_div(right).unwrap_or(0),
            BinaryOp::Modulo => left.checked_rem(right).unwrap_or(0),
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterOrEquals => ">=",
            BinaryOp::LessOrEquals => "<=",
            BinaryOp::Minus => "-",
            BinaryOp::Plus => "+",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}

/// Node of a parsed plural expression; children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Number(i64),
    N,
    Not(Box<Ast>),
    Binary(BinaryOp, Box<Ast>, Box<Ast>),
    Ternary(Box<Ast>, Box<Ast>, Box<Ast>),
}

impl Ast {
    /// Evaluate the expression for the count `n`.
    #[must_use]
    pub fn evaluate(&self, n: i64) -> i64 {
        match self {
            Ast::Number(value) => *value,
            Ast::N => n,
            Ast::Not(operand) => i64::from(operand.evaluate(n) == 0),
            Ast::Binary(BinaryOp::And, left, right) => {
                i64::from(left.evaluate(n) != 0 && right.evaluate(n) != 0)
            }
            Ast::Binary(BinaryOp::Or, left, right) => {
                i64::from(left.evaluate(n) != 0 || right.evaluate(n) != 0)
            }
            Ast::Binary(op, left, right) => op.apply(left.evaluate(n), right.evaluate(n)),
            Ast::Ternary(cond, if_true, if_false) => {
                if cond.evaluate(n) == 0 {
                    if_false.evaluate(n)
                } else {
                    if_true.evaluate(n)
                }
            }
        }
    }
}

impl std::fmt::Display for Ast {
    /// Format the expression fully parenthesized.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ast::Number(value) => write!(f, "{value}"),
            Ast::N => write!(f, "n"),
            Ast::Not(operand) => write!(f, "!{operand}"),
            Ast::Binary(op, left, right) => write!(f, "({left} {} {right})", op.symbol()),
            Ast::Ternary(cond, if_true, if_false) => {
                write!(f, "({cond} ? {if_true} : {if_false})")
            }
        }
    }
}
