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

//! Single-operation arithmetic and the integer-shape test used by the levels.

use crate::error::EvalError;
use crate::types::Operator;

/// Tolerance used for every floating-point comparison in the game.
pub const EPSILON: f64 = 1e-4;

/// Applies `op` to `a` and `b`.
///
/// Non-positive results are refused, not only divisions by zero. The search
/// relies on this to prune its space, so the player is held to the same rule.
pub fn apply(a: f64, op: Operator, b: f64) -> Result<f64, EvalError> {
    let result = match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };

    if result.is_nan() || result <= 0.0 {
        return Err(EvalError::NonPositiveResult);
    }
    Ok(result)
}

/// Whether `x` is within [`EPSILON`] of its nearest integer.
#[inline]
pub fn is_effectively_integer(x: f64) -> bool {
    (x.round() - x).abs() < EPSILON
}

/// Whether two results are equal within [`EPSILON`].
#[inline]
pub fn matches(value: f64, target: f64) -> bool {
    (value - target).abs() < EPSILON
}
