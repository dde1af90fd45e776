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

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four arithmetic operations a chain line can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = ":", alias = "/")]
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The symbol shown to the player.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => ':',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "x" | "×" => Ok(Operator::Multiply),
            ":" | "/" | "÷" => Ok(Operator::Divide),
            other => Err(format!("unknown operator '{other}'")),
        }
    }
}

/// Where an operand comes from: a pool position or an earlier line's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "lowercase")]
pub enum OperandRef {
    Pool(usize),
    Result(usize),
}

/// The three fillable positions of a chain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    N1,
    Op,
    N2,
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n1" => Ok(Slot::N1),
            "op" => Ok(Slot::Op),
            "n2" => Ok(Slot::N2),
            other => Err(format!("unknown slot '{other}'")),
        }
    }
}

/// The two operand positions of a chain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandSlot {
    N1,
    N2,
}

impl From<OperandSlot> for Slot {
    fn from(slot: OperandSlot) -> Self {
        match slot {
            OperandSlot::N1 => Slot::N1,
            OperandSlot::N2 => Slot::N2,
        }
    }
}

impl FromStr for OperandSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Slot>()? {
            Slot::N1 => Ok(OperandSlot::N1),
            Slot::N2 => Ok(OperandSlot::N2),
            Slot::Op => Err("'op' is not an operand slot".to_string()),
        }
    }
}

/// A resolved operand of a solution step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOperand {
    pub value: f64,
    /// `Result(j)` names the step whose output is consumed.
    pub source: OperandRef,
}

/// One line of a solution found by the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub n1: StepOperand,
    pub op: Operator,
    pub n2: StepOperand,
    pub result: f64,
}

impl fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.n1.value, self.op, self.n2.value, self.result
        )
    }
}

/// A pool of numbers and the target the chain must reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub pool: Vec<f64>,
    pub target: f64,
}

impl Puzzle {
    /// Builds a puzzle, checking that it can hold at least one line.
    pub fn new(pool: Vec<f64>, target: f64) -> Result<Self, PuzzleError> {
        let puzzle = Puzzle { pool, target };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Checks a puzzle that was built without [`Puzzle::new`], e.g. deserialized.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.pool.len() < 2 {
            return Err(PuzzleError::PoolTooSmall(self.pool.len()));
        }
        if let Some(&bad) = self.pool.iter().find(|&&v| v <= 0.0 || v.is_nan()) {
            return Err(PuzzleError::NonPositiveValue(bad));
        }
        Ok(())
    }

    /// Number of lines a full chain has for this pool.
    pub fn line_count(&self) -> usize {
        self.pool.len().saturating_sub(1)
    }
}
