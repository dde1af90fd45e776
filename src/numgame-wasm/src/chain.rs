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

//! The calculation chain the player fills in, line by line.
//!
//! Every mutation is validated before anything changes, so a rejected call
//! leaves the chain exactly as it was. Dropping a line's result clears every
//! later line that consumed it, transitively.

use crate::error::{ChainError, EvalError};
use crate::evaluate::{self, apply};
use crate::types::{OperandRef, OperandSlot, Operator, Puzzle, Slot, SolutionStep};
use serde::Serialize;

/// One operation of the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChainLine {
    pub n1: Option<OperandRef>,
    pub op: Option<Operator>,
    pub n2: Option<OperandRef>,
    /// Set only while n1, op and n2 are all set and evaluate successfully.
    pub result: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineState {
    Empty,
    Partial,
    Complete,
}

/// Outcome of a successful fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Some part of the line is still missing.
    Incomplete,
    /// The line is full but the evaluator refused it.
    Rejected(EvalError),
    Complete(f64),
    /// The last line is complete and equals the target.
    Solved(f64),
}

impl ChainLine {
    pub fn state(&self) -> LineState {
        if self.result.is_some() {
            LineState::Complete
        } else if self.n1.is_none() && self.op.is_none() && self.n2.is_none() {
            LineState::Empty
        } else {
            LineState::Partial
        }
    }

    fn operand(&self, slot: OperandSlot) -> Option<OperandRef> {
        match slot {
            OperandSlot::N1 => self.n1,
            OperandSlot::N2 => self.n2,
        }
    }

    fn operand_mut(&mut self, slot: OperandSlot) -> &mut Option<OperandRef> {
        match slot {
            OperandSlot::N1 => &mut self.n1,
            OperandSlot::N2 => &mut self.n2,
        }
    }

    fn references_result(&self, line: usize) -> bool {
        [self.n1, self.n2].contains(&Some(OperandRef::Result(line)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chain {
    puzzle: Puzzle,
    lines: Vec<ChainLine>,
}

impl Chain {
    /// An empty chain with one line fewer than the pool has numbers.
    pub fn new(puzzle: Puzzle) -> Self {
        let lines = vec![ChainLine::default(); puzzle.line_count()];
        Chain { puzzle, lines }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn lines(&self) -> &[ChainLine] {
        &self.lines
    }

    /// The number an operand stands for, if it is currently available.
    pub fn value_of(&self, operand: OperandRef) -> Option<f64> {
        match operand {
            OperandRef::Pool(i) => self.puzzle.pool.get(i).copied(),
            OperandRef::Result(j) => self.lines.get(j).and_then(|l| l.result),
        }
    }

    /// Which pool positions are taken by some operand.
    pub fn used_pool_indices(&self) -> Vec<bool> {
        let mut used = vec![false; self.puzzle.pool.len()];
        for operand in self.lines.iter().flat_map(|l| [l.n1, l.n2]).flatten() {
            if let OperandRef::Pool(i) = operand {
                if let Some(flag) = used.get_mut(i) {
                    *flag = true;
                }
            }
        }
        used
    }

    /// Whether a later line currently consumes the result of `line`.
    pub fn is_result_consumed(&self, line: usize) -> bool {
        self.lines
            .iter()
            .skip(line.saturating_add(1))
            .any(|l| l.references_result(line))
    }

    pub fn is_solved(&self) -> bool {
        self.lines
            .last()
            .and_then(|l| l.result)
            .is_some_and(|r| evaluate::matches(r, self.puzzle.target))
    }

    /// Empties every line.
    pub fn reset(&mut self) {
        self.lines.fill(ChainLine::default());
    }

    /// Puts `operand` into `slot` of `line`, evaluating the line once it is full.
    pub fn fill_operand(
        &mut self,
        line: usize,
        slot: OperandSlot,
        operand: OperandRef,
    ) -> Result<Progress, ChainError> {
        self.try_fill_operand(line, slot, operand)
            .inspect_err(|err| {
                tracing::debug!(line, ?slot, ?operand, %err, "operand rejected");
            })
    }

    /// Sets the operator of `line`. The first operand must already be there.
    pub fn fill_operator(&mut self, line: usize, op: Operator) -> Result<Progress, ChainError> {
        self.try_fill_operator(line, op)
            .inspect_err(|err| {
                tracing::debug!(line, %op, %err, "operator rejected");
            })
    }

    /// Empties one slot of `line`.
    ///
    /// Returns the later lines that were wiped because they depended on this
    /// line's result. Clearing an empty slot changes nothing.
    pub fn clear_slot(&mut self, line: usize, slot: Slot) -> Result<Vec<usize>, ChainError> {
        let current = self
            .lines
            .get_mut(line)
            .ok_or(ChainError::LineOutOfRange(line))?;

        let was_set = match slot {
            Slot::N1 => current.n1.take().is_some(),
            Slot::Op => current.op.take().is_some(),
            Slot::N2 => current.n2.take().is_some(),
        };
        if !was_set {
            return Ok(Vec::new());
        }
        Ok(self.invalidate(line))
    }

    /// Replays solver output into an empty chain.
    ///
    /// On failure the chain is restored to what it was before the call.
    pub fn apply_steps(&mut self, steps: &[SolutionStep]) -> Result<Progress, ChainError> {
        let snapshot = self.lines.clone();
        self.reset();

        let mut progress = Progress::Incomplete;
        for (line, step) in steps.iter().enumerate() {
            match self.replay_step(line, step) {
                Ok(p) => progress = p,
                Err(err) => {
                    self.lines = snapshot;
                    return Err(err);
                }
            }
        }
        Ok(progress)
    }

    fn replay_step(&mut self, line: usize, step: &SolutionStep) -> Result<Progress, ChainError> {
        self.fill_operand(line, OperandSlot::N1, step.n1.source)?;
        self.fill_operator(line, step.op)?;
        self.fill_operand(line, OperandSlot::N2, step.n2.source)
    }

    fn try_fill_operand(
        &mut self,
        line: usize,
        slot: OperandSlot,
        operand: OperandRef,
    ) -> Result<Progress, ChainError> {
        let current = self
            .lines
            .get(line)
            .ok_or(ChainError::LineOutOfRange(line))?;

        match operand {
            OperandRef::Pool(i) => {
                if i >= self.puzzle.pool.len() {
                    return Err(ChainError::PoolIndexOutOfRange(i));
                }
            }
            OperandRef::Result(source) => {
                if source >= line {
                    return Err(ChainError::ForwardOrSelfReference {
                        line,
                        source_line: source,
                    });
                }
                if self.lines[source].result.is_none() {
                    return Err(ChainError::ResultUnavailable(source));
                }
            }
        }

        if current.operand(slot) == Some(operand) {
            return Ok(self.evaluate(line));
        }
        if self.is_consumed(operand) {
            return Err(ChainError::SlotAlreadyConsumed);
        }

        // The line's result is about to change; whoever consumed it loses it.
        self.invalidate(line);
        *self.lines[line].operand_mut(slot) = Some(operand);
        Ok(self.evaluate(line))
    }

    fn try_fill_operator(&mut self, line: usize, op: Operator) -> Result<Progress, ChainError> {
        let current = self
            .lines
            .get(line)
            .ok_or(ChainError::LineOutOfRange(line))?;
        if current.n1.is_none() {
            return Err(ChainError::MissingFirstOperand);
        }
        if current.op == Some(op) {
            return Ok(self.evaluate(line));
        }

        self.invalidate(line);
        self.lines[line].op = Some(op);
        Ok(self.evaluate(line))
    }

    /// Whether some slot of some line currently holds `operand`.
    fn is_consumed(&self, operand: OperandRef) -> bool {
        self.lines
            .iter()
            .any(|l| l.n1 == Some(operand) || l.n2 == Some(operand))
    }

    /// Drops the result of `line` and wipes its dependents. Returns the wiped lines.
    fn invalidate(&mut self, line: usize) -> Vec<usize> {
        if self.lines[line].result.take().is_none() {
            return Vec::new();
        }

        let mut cleared = Vec::new();
        let mut pending = vec![line];
        while let Some(source) = pending.pop() {
            for dependent in source + 1..self.lines.len() {
                if self.lines[dependent].references_result(source) {
                    self.lines[dependent] = ChainLine::default();
                    cleared.push(dependent);
                    pending.push(dependent);
                }
            }
        }
        cleared.sort_unstable();
        cleared
    }

    /// Recomputes the result of `line` from its operands.
    fn evaluate(&mut self, line: usize) -> Progress {
        let ChainLine { n1, op, n2, .. } = self.lines[line];
        let (Some(n1), Some(op), Some(n2)) = (n1, op, n2) else {
            self.lines[line].result = None;
            return Progress::Incomplete;
        };
        let (Some(a), Some(b)) = (self.value_of(n1), self.value_of(n2)) else {
            self.lines[line].result = None;
            return Progress::Incomplete;
        };

        match apply(a, op, b) {
            Ok(value) => {
                self.lines[line].result = Some(value);
                if line + 1 == self.lines.len() && evaluate::matches(value, self.puzzle.target) {
                    Progress::Solved(value)
                } else {
                    Progress::Complete(value)
                }
            }
            Err(err) => {
                self.lines[line].result = None;
                Progress::Rejected(err)
            }
        }
    }
}
