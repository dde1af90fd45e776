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

use crate::level::{self, LevelParams};
use crate::types::Puzzle;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{SeedableRng, rng};

/// How many random puzzles are tried before falling back.
pub const MAX_ATTEMPTS: usize = 1000;

/// Draws a pool from the level's catalogue and a target from its range.
fn sample_puzzle(params: &LevelParams, rng: &mut StdRng) -> Option<Puzzle> {
    let mut pool = params.catalogue.clone();
    pool.shuffle(rng);
    pool.truncate(params.pool_size);

    let target = (params.target_min..=params.target_max).choose(rng)?;
    Some(Puzzle {
        pool,
        target: f64::from(target),
    })
}

fn generate_with(params: &LevelParams, rng: &mut StdRng) -> Puzzle {
    if params.catalogue.len() < params.pool_size {
        tracing::warn!(
            catalogue = params.catalogue.len(),
            pool_size = params.pool_size,
            "catalogue too small to sample from, using fallback"
        );
        return params.fallback.clone();
    }

    for attempt in 1..=MAX_ATTEMPTS {
        let Some(puzzle) = sample_puzzle(params, rng) else {
            break;
        };
        if !level::accept(&puzzle, params).is_empty() {
            tracing::info!(
                attempt,
                pool = ?puzzle.pool,
                target = puzzle.target,
                "generated puzzle"
            );
            return puzzle;
        }
        tracing::debug!(attempt, pool = ?puzzle.pool, target = puzzle.target, "rejected");
    }

    tracing::warn!(
        attempts = MAX_ATTEMPTS,
        "no acceptable puzzle sampled, using fallback"
    );
    params.fallback.clone()
}

/// Generates a puzzle that satisfies the level's policy.
///
/// Sampling is retried up to [`MAX_ATTEMPTS`] times; after that the level's
/// fallback puzzle is returned, so the result is always playable.
pub fn generate(params: &LevelParams) -> Puzzle {
    let mut rng = StdRng::from_rng(&mut rng());
    generate_with(params, &mut rng)
}

/// Same as [`generate`], reproducible from `seed`.
pub fn generate_seeded(params: &LevelParams, seed: u64) -> Puzzle {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with(params, &mut rng)
}
