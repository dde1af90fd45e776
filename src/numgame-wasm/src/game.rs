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

//! One play session: a level, its current puzzle, the chain and hint state.

use crate::chain::{Chain, Progress};
use crate::error::ChainError;
use crate::generate;
use crate::level::LevelParams;
use crate::types::{Puzzle, SolutionStep};

pub struct Game {
    params: LevelParams,
    chain: Chain,
    /// First solution found for the current puzzle, computed on the first hint.
    solution: Option<Vec<SolutionStep>>,
    hints_used: usize,
}

impl Game {
    /// Starts a session with a freshly generated puzzle.
    pub fn new(params: LevelParams) -> Self {
        let puzzle = generate::generate(&params);
        Game::with_puzzle(params, puzzle)
    }

    /// Starts a session on a given puzzle.
    pub fn with_puzzle(params: LevelParams, puzzle: Puzzle) -> Self {
        Game {
            params,
            chain: Chain::new(puzzle),
            solution: None,
            hints_used: 0,
        }
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    pub fn puzzle(&self) -> &Puzzle {
        self.chain.puzzle()
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut Chain {
        &mut self.chain
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// Replaces the puzzle with a new one and starts over.
    pub fn new_game(&mut self) {
        let puzzle = generate::generate(&self.params);
        self.chain = Chain::new(puzzle);
        self.solution = None;
        self.hints_used = 0;
    }

    fn first_solution(&mut self) -> Option<&[SolutionStep]> {
        if self.solution.is_none() {
            self.solution = self
                .params
                .solutions(self.chain.puzzle(), Some(1))
                .into_iter()
                .next();
        }
        self.solution.as_deref()
    }

    /// Reveals the next step of a solution.
    ///
    /// The chain is rewritten to hold the solution up to and including the
    /// revealed step. Returns `None` once every step has been shown, or when
    /// the puzzle has no solution.
    pub fn hint(&mut self) -> Result<Option<SolutionStep>, ChainError> {
        let revealed = self.hints_used;
        let Some(steps) = self.first_solution() else {
            return Ok(None);
        };
        let Some(&step) = steps.get(revealed) else {
            return Ok(None);
        };
        let prefix = steps[..=revealed].to_vec();

        self.chain.apply_steps(&prefix)?;
        self.hints_used += 1;
        tracing::debug!(line = revealed, %step, "hint revealed");
        Ok(Some(step))
    }

    /// Fills the whole chain with the first solution found.
    ///
    /// Returns `false` and leaves the chain alone when there is none.
    pub fn solve(&mut self) -> Result<bool, ChainError> {
        let Some(steps) = self.first_solution().map(<[SolutionStep]>::to_vec) else {
            tracing::info!(puzzle = ?self.chain.puzzle(), "no solution found");
            return Ok(false);
        };
        let progress = self.chain.apply_steps(&steps)?;
        self.hints_used = steps.len();
        Ok(matches!(progress, Progress::Solved(_)))
    }
}
