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

//! Exhaustive backtracking search over operation chains.
//!
//! A chain for a pool of `n` numbers has `n - 1` lines. Each line combines
//! either two unused pool numbers, or the result of an earlier line (as the
//! first operand) with an unused pool number. A result may be consumed once.

use crate::evaluate::{self, apply};
use crate::types::{OperandRef, Operator, SolutionStep, StepOperand};
use std::collections::VecDeque;

/// A produced value and the lines holding an unconsumed copy of it, oldest first.
struct Available {
    value: f64,
    producers: VecDeque<usize>,
}

struct Search<'a> {
    pool: &'a [f64],
    target: f64,
    ops: &'a [Operator],
    cap: usize,
    used: Vec<bool>,
    /// Insertion-ordered; entries stay once created, even when drained.
    available: Vec<Available>,
    steps: Vec<SolutionStep>,
    solutions: Vec<Vec<SolutionStep>>,
}

/// Finds chains over `pool` whose last line equals `target`.
///
/// Stops after `cap` solutions; `None` enumerates the whole space. The order
/// of the returned solutions is deterministic for a given input.
pub fn find_solutions(
    pool: &[f64],
    target: f64,
    ops: &[Operator],
    cap: Option<usize>,
) -> Vec<Vec<SolutionStep>> {
    let cap = cap.unwrap_or(usize::MAX);
    if pool.len() < 2 || ops.is_empty() || cap == 0 {
        return Vec::new();
    }

    let mut search = Search {
        pool,
        target,
        ops,
        cap,
        used: vec![false; pool.len()],
        available: Vec::new(),
        steps: Vec::with_capacity(pool.len() - 1),
        solutions: Vec::new(),
    };
    search.extend(0);

    tracing::trace!(
        ?pool,
        target,
        found = search.solutions.len(),
        "search finished"
    );
    search.solutions
}

/// Whether at least one chain over `pool` reaches `target`.
pub fn has_solution(pool: &[f64], target: f64, ops: &[Operator]) -> bool {
    !find_solutions(pool, target, ops, Some(1)).is_empty()
}

impl Search<'_> {
    #[inline]
    fn done(&self) -> bool {
        self.solutions.len() >= self.cap
    }

    /// Tries every legal line at position `line`, then recurses.
    fn extend(&mut self, line: usize) {
        if self.done() {
            return;
        }
        if line == self.pool.len() - 1 {
            if let Some(last) = self.steps.last() {
                if evaluate::matches(last.result, self.target) {
                    self.solutions.push(self.steps.clone());
                }
            }
            return;
        }

        let pool = self.pool;
        let ops = self.ops;
        let mut results_tried = false;

        for i in 0..pool.len() {
            if self.used[i] {
                continue;
            }
            // The result branch does not depend on `i`; repeating it for every
            // unused index would only yield duplicate chains.
            if !results_tried {
                results_tried = true;
                self.extend_from_results(line);
                if self.done() {
                    return;
                }
            }

            let n1 = StepOperand {
                value: pool[i],
                source: OperandRef::Pool(i),
            };
            self.used[i] = true;
            for j in 0..pool.len() {
                if self.used[j] {
                    continue;
                }
                self.used[j] = true;
                for &op in ops {
                    self.try_line(line, n1, op, j);
                }
                self.used[j] = false;
            }
            self.used[i] = false;

            if self.done() {
                return;
            }
        }
    }

    /// Lines whose first operand is an earlier, unconsumed result.
    fn extend_from_results(&mut self, line: usize) {
        let pool_len = self.pool.len();
        let ops = self.ops;

        for k in 0..self.available.len() {
            let Some(source) = self.available[k].producers.pop_front() else {
                continue;
            };
            let n1 = StepOperand {
                value: self.available[k].value,
                source: OperandRef::Result(source),
            };

            for &op in ops {
                for j in 0..pool_len {
                    if self.used[j] {
                        continue;
                    }
                    self.used[j] = true;
                    self.try_line(line, n1, op, j);
                    self.used[j] = false;
                }
            }

            self.available[k].producers.push_front(source);
            if self.done() {
                return;
            }
        }
    }

    /// Evaluates `n1 op pool[j]` and, if accepted, explores the rest of the chain.
    fn try_line(&mut self, line: usize, n1: StepOperand, op: Operator, j: usize) {
        if self.done() {
            return;
        }
        let n2 = StepOperand {
            value: self.pool[j],
            source: OperandRef::Pool(j),
        };
        let Ok(result) = apply(n1.value, op, n2.value) else {
            return;
        };

        self.steps.push(SolutionStep { n1, op, n2, result });
        let created = self.publish(result, line);
        self.extend(line + 1);
        self.retract(result, created);
        self.steps.pop();
    }

    /// Makes `value` available to later lines. Returns whether a new entry was created.
    fn publish(&mut self, value: f64, line: usize) -> bool {
        match self.available.iter_mut().find(|a| a.value == value) {
            Some(entry) => {
                entry.producers.push_back(line);
                false
            }
            None => {
                self.available.push(Available {
                    value,
                    producers: VecDeque::from([line]),
                });
                true
            }
        }
    }

    /// Undoes the matching [`Search::publish`].
    fn retract(&mut self, value: f64, created: bool) {
        if created {
            self.available.pop();
        } else if let Some(entry) = self.available.iter_mut().find(|a| a.value == value) {
            entry.producers.pop_back();
        }
    }
}
