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

//! Difficulty levels and the acceptance policy the generator applies.

use crate::error::LevelError;
use crate::evaluate::is_effectively_integer;
use crate::solver::find_solutions;
use crate::types::{Operator, Puzzle, SolutionStep};
use serde::{Deserialize, Serialize};

/// Every number a pool can be drawn from.
pub const CATALOGUE: [f64; 13] = [
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0, 50.0, 100.0,
];

/// Numeric shape a level demands from its solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Any solution will do.
    Any,
    /// At least one solution keeps every intermediate result whole.
    Integer,
    /// No solution avoids fractions: the player has to go through one.
    Fraction,
}

/// Everything that defines a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelParams {
    pub pool_size: usize,
    pub catalogue: Vec<f64>,
    pub target_min: u32,
    pub target_max: u32,
    pub operators: Vec<Operator>,
    pub shape: Shape,
    /// Known-good puzzle served when sampling runs out of attempts.
    pub fallback: Puzzle,
}

impl LevelParams {
    /// Checks that the parameters can produce a puzzle at all.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.pool_size < 2 {
            return Err(LevelError::InvalidParams("pool size must be at least 2"));
        }
        if self.catalogue.len() < self.pool_size {
            return Err(LevelError::InvalidParams(
                "catalogue is smaller than the pool",
            ));
        }
        if self.catalogue.iter().any(|&v| v.is_nan() || v <= 0.0) {
            return Err(LevelError::InvalidParams(
                "catalogue values must be positive",
            ));
        }
        if self.target_min > self.target_max {
            return Err(LevelError::InvalidParams("empty target range"));
        }
        if self.operators.is_empty() {
            return Err(LevelError::InvalidParams("no operators allowed"));
        }
        if self.fallback.pool.len() != self.pool_size {
            return Err(LevelError::InvalidParams(
                "fallback pool does not match the pool size",
            ));
        }
        self.fallback.validate()?;
        if accept(&self.fallback, self).is_empty() {
            return Err(LevelError::InvalidParams(
                "fallback puzzle is rejected by its own level",
            ));
        }
        Ok(())
    }

    /// Searches for chains over `puzzle` with this level's operators.
    pub fn solutions(&self, puzzle: &Puzzle, cap: Option<usize>) -> Vec<Vec<SolutionStep>> {
        find_solutions(&puzzle.pool, puzzle.target, &self.operators, cap)
    }
}

/// The five predefined difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::One,
        Level::Two,
        Level::Three,
        Level::Four,
        Level::Five,
    ];

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn params(self) -> &'static LevelParams {
        &LEVELS[self as usize]
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1..=5 => Ok(Level::ALL[usize::from(number - 1)]),
            other => Err(LevelError::Unknown(other)),
        }
    }
}

/// Catalogue entries not larger than `max`.
fn catalogue_up_to(max: f64) -> Vec<f64> {
    CATALOGUE.iter().copied().filter(|&v| v <= max).collect()
}

fn puzzle(pool: &[f64], target: f64) -> Puzzle {
    Puzzle {
        pool: pool.to_vec(),
        target,
    }
}

lazy_static::lazy_static! {
    static ref LEVELS: [LevelParams; 5] = [
        LevelParams {
            pool_size: 3,
            catalogue: catalogue_up_to(10.0),
            target_min: 5,
            target_max: 30,
            operators: vec![Operator::Add, Operator::Subtract],
            shape: Shape::Any,
            fallback: puzzle(&[3.0, 5.0, 8.0], 16.0),
        },
        LevelParams {
            pool_size: 4,
            catalogue: catalogue_up_to(20.0),
            target_min: 10,
            target_max: 100,
            operators: vec![Operator::Add, Operator::Subtract, Operator::Multiply],
            shape: Shape::Any,
            fallback: puzzle(&[4.0, 8.0, 10.0, 20.0], 62.0),
        },
        LevelParams {
            pool_size: 4,
            catalogue: catalogue_up_to(20.0),
            target_min: 20,
            target_max: 200,
            operators: Operator::ALL.to_vec(),
            shape: Shape::Integer,
            fallback: puzzle(&[2.0, 5.0, 7.0, 8.0], 168.0),
        },
        // The classic game: six numbers, a three-digit target.
        LevelParams {
            pool_size: 6,
            catalogue: CATALOGUE.to_vec(),
            target_min: 50,
            target_max: 999,
            operators: Operator::ALL.to_vec(),
            shape: Shape::Integer,
            fallback: puzzle(&[1.0, 2.0, 5.0, 9.0, 50.0, 100.0], 557.0),
        },
        LevelParams {
            pool_size: 4,
            catalogue: catalogue_up_to(10.0),
            target_min: 10,
            target_max: 60,
            operators: Operator::ALL.to_vec(),
            shape: Shape::Fraction,
            fallback: puzzle(&[1.0, 5.0, 8.0, 10.0], 26.0),
        },
    ];
}

fn all_integer(solution: &[SolutionStep]) -> bool {
    solution.iter().all(|step| is_effectively_integer(step.result))
}

/// Decides whether `puzzle` is fit for a level.
///
/// Returns the solutions that justify acceptance, or an empty list when the
/// puzzle is rejected. For [`Shape::Any`] a single solution is enough; the
/// other shapes need the whole solution space.
pub fn accept(puzzle: &Puzzle, params: &LevelParams) -> Vec<Vec<SolutionStep>> {
    let first = params.solutions(puzzle, Some(1));
    if first.is_empty() {
        return first;
    }

    match params.shape {
        Shape::Any => first,
        Shape::Integer => params
            .solutions(puzzle, None)
            .into_iter()
            .filter(|solution| all_integer(solution))
            .collect(),
        Shape::Fraction => {
            let all = params.solutions(puzzle, None);
            if all.iter().any(|solution| all_integer(solution)) {
                Vec::new()
            } else {
                all
            }
        }
    }
}
