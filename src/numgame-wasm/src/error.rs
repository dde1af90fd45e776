/*
* Copyright (C) 2025  Henrique Almeida
* This file is part of NumGame.
*
* NumGame is free software: you can redistribute it and/or modify
* it under the terms of the GNU Affero General Public License as published
* by the Free Software Foundation, either version 3 of the License, or
* (at your option) any later version.
*
* NumGame is distributed in the hope that it will be useful,
* but WITHOUT ANY WARRANTY; without even the implied warranty of
* MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
* GNU Affero General Public License for more details.
*
* You should have received a copy of the GNU Affero General Public License
* along with NumGame.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Error types shared by the evaluator, the chain and the level tables.

use thiserror::Error;

/// Why the evaluator refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not positive")]
    NonPositiveResult,
}

/// Why a chain mutation was refused. The chain is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("line {0} does not exist")]
    LineOutOfRange(usize),
    #[error("pool index {0} does not exist")]
    PoolIndexOutOfRange(usize),
    #[error("operand is already consumed by another line")]
    SlotAlreadyConsumed,
    #[error("line {line} cannot use the result of line {source_line}")]
    ForwardOrSelfReference { line: usize, source_line: usize },
    #[error("line {0} has no result yet")]
    ResultUnavailable(usize),
    #[error("an operator needs a first operand")]
    MissingFirstOperand,
}

/// A puzzle that cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PuzzleError {
    #[error("a pool needs at least two numbers, got {0}")]
    PoolTooSmall(usize),
    #[error("pool value {0} is not positive")]
    NonPositiveValue(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LevelError {
    #[error("unknown level {0}, expected 1 to 5")]
    Unknown(u8),
    #[error("invalid level parameters: {0}")]
    InvalidParams(&'static str),
    #[error("invalid fallback puzzle: {0}")]
    Fallback(#[from] PuzzleError),
}
