// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compilation of plural expressions to a stack machine program.
//!
//! The program is a flat list of instructions operating on a stack of 64-bit
//! integers. Ternary and boolean operators are compiled to conditional jumps,
//! so only one branch of a ternary is evaluated and `&&` / `||` short-circuit.

use crate::{
    error::Result,
    plural::{
        rule::{PluralRule, check_num_plurals},
        token::{Ast, BinaryOp},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push a constant.
    Push(i64),
    /// Push the count `n`.
    LoadN,
    /// Replace the top of stack by 1 if it is 0, by 0 otherwise.
    Not,
    /// Replace the top of stack by 1 if it is not 0.
    ToBool,
    /// Pop two values and push the result of a non short-circuit operator
    /// (arithmetic, comparison, equality and inequality).
    Binary(BinaryOp),
    /// Jump to an absolute position.
    Jump(usize),
    /// Pop a value and jump if it is 0.
    JumpIfZero(usize),
    /// Pop a value and jump if it is not 0.
    JumpIfNotZero(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    max_stack: usize,
}

struct Compiler {
    instructions: Vec<Instruction>,
    depth: usize,
    max_depth: usize,
}

impl Compiler {
    fn push(&mut self, instruction: Instruction) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.instructions.push(instruction);
    }

    fn pop(&mut self, instruction: Instruction) {
        self.depth -= 1;
        self.instructions.push(instruction);
    }

    /// Emit a jump with a placeholder target, return its position.
    fn jump(&mut self, make: fn(usize) -> Instruction, pops: bool) -> usize {
        if pops {
            self.pop(make(0));
        } else {
            self.instructions.push(make(0));
        }
        self.instructions.len() - 1
    }

    fn patch(&mut self, position: usize) {
        let target = self.instructions.len();
        if let Some(
            Instruction::Jump(address)
            | Instruction::JumpIfZero(address)
            | Instruction::JumpIfNotZero(address),
        ) = self.instructions.get_mut(position)
        {
            *address = target;
        }
    }

    fn emit(&mut self, ast: &Ast) {
        match ast {
            Ast::Number(value) => self.push(Instruction::Push(*value)),
            Ast::N => self.push(Instruction::LoadN),
            Ast::Not(operand) => {
                self.emit(operand);
                self.instructions.push(Instruction::Not);
            }
            Ast::Binary(op @ (BinaryOp::And | BinaryOp::Or), left, right) => {
                // a && b: a; jz false; b; tobool; jmp end; false: push 0; end:
                // a || b: a; jnz true; b; tobool; jmp end; true: push 1; end:
                self.emit(left);
                let short = if *op == BinaryOp::And {
                    self.jump(Instruction::JumpIfZero, true)
                } else {
                    self.jump(Instruction::JumpIfNotZero, true)
                };
                self.emit(right);
                self.instructions.push(Instruction::ToBool);
                let end = self.jump(Instruction::Jump, false);
                self.patch(short);
                self.depth -= 1;
                self.push(Instruction::Push(i64::from(*op == BinaryOp::Or)));
                self.patch(end);
            }
            Ast::Binary(op, left, right) => {
                self.emit(left);
                self.emit(right);
                self.pop(Instruction::Binary(*op));
            }
            Ast::Ternary(cond, if_true, if_false) => {
                self.emit(cond);
                let else_branch = self.jump(Instruction::JumpIfZero, true);
                self.emit(if_true);
                let end = self.jump(Instruction::Jump, false);
                self.patch(else_branch);
                self.depth -= 1;
                self.emit(if_false);
                self.patch(end);
            }
        }
    }
}

impl Program {
    /// Compile a syntax tree to a program.
    #[must_use]
    pub fn compile(ast: &Ast) -> Self {
        let mut compiler = Compiler {
            instructions: Vec::new(),
            depth: 0,
            max_depth: 0,
        };
        compiler.emit(ast);
        Self {
            instructions: compiler.instructions,
            max_stack: compiler.max_depth,
        }
    }

    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Run the program for the count `n` and return the value left on the
    /// stack.
    #[must_use]
    pub fn run(&self, n: i64) -> i64 {
        let mut stack: Vec<i64> = Vec::with_capacity(self.max_stack);
        let mut pc = 0;
        while let Some(instruction) = self.instructions.get(pc) {
            pc += 1;
            match *instruction {
                Instruction::Push(value) => stack.push(value),
                Instruction::LoadN => stack.push(n),
                Instruction::Not => {
                    if let Some(top) = stack.last_mut() {
                        *top = i64::from(*top == 0);
                    }
                }
                Instruction::ToBool => {
                    if let Some(top) = stack.last_mut() {
                        *top = i64::from(*top != 0);
                    }
                }
                Instruction::Binary(op) => {
                    let right = stack.pop().unwrap_or_default();
                    let left = stack.pop().unwrap_or_default();
                    stack.push(op.apply(left, right));
                }
                Instruction::Jump(address) => pc = address,
                Instruction::JumpIfZero(address) => {
                    if stack.pop().unwrap_or_default() == 0 {
                        pc = address;
                    }
                }
                Instruction::JumpIfNotZero(address) => {
                    if stack.pop().unwrap_or_default() != 0 {
                        pc = address;
                    }
                }
            }
        }
        stack.pop().unwrap_or_default()
    }
}

/// Rule evaluated by running a compiled program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPluralRule {
    num_plurals: usize,
    program: Program,
}

impl CompiledPluralRule {
    pub fn new(num_plurals: usize, ast: &Ast) -> Result<Self> {
        Ok(Self {
            num_plurals: check_num_plurals(num_plurals)?,
            program: Program::compile(ast),
        })
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl PluralRule for CompiledPluralRule {
    fn num_plurals(&self) -> usize {
        self.num_plurals
    }

    fn evaluate(&self, n: i64) -> i64 {
        self.program.run(n)
    }
}
