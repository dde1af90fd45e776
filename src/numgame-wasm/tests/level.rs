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

use numgame_wasm::error::{LevelError, PuzzleError};
use numgame_wasm::evaluate::is_effectively_integer;
use numgame_wasm::level::{self, CATALOGUE, Level, Shape};
use numgame_wasm::types::{Operator, Puzzle};

fn puzzle(pool: &[f64], target: f64) -> Puzzle {
    Puzzle::new(pool.to_vec(), target).unwrap()
}

#[test]
fn test_level_numbers() {
    for (i, level) in Level::ALL.into_iter().enumerate() {
        assert_eq!(level.number() as usize, i + 1);
        assert_eq!(Level::try_from(level.number()), Ok(level));
    }
    assert_eq!(Level::try_from(0), Err(LevelError::Unknown(0)));
    assert_eq!(Level::try_from(6), Err(LevelError::Unknown(6)));
}

#[test]
fn test_presets_are_valid() {
    for level in Level::ALL {
        let params = level.params();
        assert_eq!(params.validate(), Ok(()), "Level {level:?} is invalid.");
        assert!(
            params.catalogue.iter().all(|v| CATALOGUE.contains(v)),
            "Level {level:?} draws from outside the catalogue."
        );
        assert!((3..=6).contains(&params.pool_size));
    }
}

#[test]
fn test_catalogue() {
    assert_eq!(
        CATALOGUE,
        [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0, 50.0, 100.0]
    );
}

#[test]
fn test_catalogue_cutoff() {
    assert_eq!(
        Level::One.params().catalogue,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
    );
    assert_eq!(Level::Two.params().catalogue.len(), 11);
    assert_eq!(Level::Two.params().catalogue.last(), Some(&20.0));
    assert_eq!(Level::Four.params().catalogue, CATALOGUE.to_vec());
}

#[test]
fn test_classic_level() {
    let params = Level::Four.params();
    assert_eq!(params.pool_size, 6);
    assert_eq!((params.target_min, params.target_max), (50, 999));
    assert_eq!(params.operators, Operator::ALL.to_vec());
    assert_eq!(params.shape, Shape::Integer);
}

#[test]
fn test_every_fallback_passes_its_level() {
    for level in Level::ALL {
        let params = level.params();
        let fallback = &params.fallback;
        assert_eq!(fallback.pool.len(), params.pool_size);
        assert!(
            fallback.pool.iter().all(|v| params.catalogue.contains(v)),
            "Fallback of level {level:?} leaves the catalogue."
        );
        let target = fallback.target as u32;
        assert!((params.target_min..=params.target_max).contains(&target));
        assert!(
            !level::accept(fallback, params).is_empty(),
            "Fallback of level {level:?} is rejected by its own policy."
        );
    }
}

#[test]
fn test_classic_fallback_has_integer_solution() {
    let params = Level::Four.params();
    let accepted = level::accept(&params.fallback, params);
    assert!(!accepted.is_empty());
    for solution in &accepted {
        assert_eq!(solution.len(), 5);
        assert!(solution.iter().all(|s| is_effectively_integer(s.result)));
        assert_eq!(solution.last().map(|s| s.result), Some(557.0));
    }
}

#[test]
fn test_any_shape_returns_single_witness() {
    let params = Level::One.params();
    assert_eq!(params.shape, Shape::Any);
    let accepted = level::accept(&puzzle(&[1.0, 2.0, 3.0], 4.0), params);
    assert_eq!(accepted.len(), 1);
}

#[test]
fn test_unsolvable_puzzle_is_rejected() {
    let params = Level::One.params();
    assert!(level::accept(&puzzle(&[1.0, 2.0, 3.0], 30.0), params).is_empty());
}

#[test]
fn test_integer_level_returns_integer_solutions() {
    let params = Level::Three.params();
    assert_eq!(params.shape, Shape::Integer);

    let accepted = level::accept(&puzzle(&[2.0, 5.0, 7.0, 8.0], 168.0), params);
    assert_eq!(accepted.len(), 2);
    for solution in &accepted {
        assert!(solution.iter().all(|s| is_effectively_integer(s.result)));
    }
}

#[test]
fn test_integer_level_rejects_fraction_only_puzzle() {
    let params = Level::Three.params();
    assert!(level::accept(&puzzle(&[1.0, 5.0, 8.0, 10.0], 26.0), params).is_empty());
}

#[test]
fn test_fraction_level_rejects_integer_path() {
    let params = Level::Five.params();
    assert_eq!(params.shape, Shape::Fraction);
    assert!(
        level::accept(&puzzle(&[1.0, 2.0, 3.0, 4.0], 10.0), params).is_empty(),
        "1+2+3+4 needs no fraction."
    );
}

#[test]
fn test_fraction_level_accepts_fraction_only_puzzle() {
    let params = Level::Five.params();
    let accepted = level::accept(&puzzle(&[1.0, 5.0, 8.0, 10.0], 26.0), params);
    assert!(!accepted.is_empty());
    for solution in &accepted {
        assert!(solution.iter().any(|s| !is_effectively_integer(s.result)));
    }
}

#[test]
fn test_validate_rejects_broken_params() {
    let mut params = Level::Two.params().clone();
    params.target_min = 200;
    params.target_max = 100;
    assert!(matches!(params.validate(), Err(LevelError::InvalidParams(_))));

    let mut params = Level::Two.params().clone();
    params.catalogue.truncate(2);
    assert!(params.validate().is_err());

    let mut params = Level::Two.params().clone();
    params.operators.clear();
    assert!(params.validate().is_err());

    // 4 * 8 + 10 + 20 still reaches the fallback target.
    let mut params = Level::Two.params().clone();
    params.operators = vec![Operator::Add, Operator::Multiply];
    assert_eq!(params.validate(), Ok(()));
}

#[test]
fn test_validate_checks_fallback() {
    let mut params = Level::Two.params().clone();
    params.fallback.pool[1] = -8.0;
    assert_eq!(
        params.validate(),
        Err(LevelError::Fallback(PuzzleError::NonPositiveValue(-8.0)))
    );

    let mut params = Level::Two.params().clone();
    params.operators = vec![Operator::Add];
    assert!(
        matches!(params.validate(), Err(LevelError::InvalidParams(_))),
        "4 + 8 + 10 + 20 never reaches 62."
    );

    let mut params = Level::Three.params().clone();
    params.fallback = Level::Five.params().fallback.clone();
    assert!(params.validate().is_err(), "Fraction-only fallback on an integer level.");
}

#[test]
fn test_puzzle_validate_catches_deserialized_values() {
    let puzzle = Puzzle {
        pool: vec![3.0, f64::NAN],
        target: 6.0,
    };
    assert!(matches!(
        puzzle.validate(),
        Err(PuzzleError::NonPositiveValue(v)) if v.is_nan()
    ));
    assert_eq!(
        Puzzle { pool: vec![3.0], target: 3.0 }.validate(),
        Err(PuzzleError::PoolTooSmall(1))
    );
}

#[test]
fn test_puzzle_validation() {
    assert!(Puzzle::new(vec![4.0], 4.0).is_err());
    assert!(Puzzle::new(vec![4.0, 0.0], 4.0).is_err());
    assert_eq!(puzzle(&[3.0, 5.0, 8.0], 16.0).line_count(), 2);
}
