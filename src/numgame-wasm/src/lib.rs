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

//! Engine for a chain-of-operations number puzzle, compiled to WebAssembly.
//!
//! The player gets a pool of numbers and a target and fills a chain of binary
//! operations, each consuming pool numbers or earlier results, until the last
//! line hits the target. This crate generates solvable puzzles, searches for
//! solutions and tracks the chain; rendering and input live in JavaScript.

pub mod chain;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod generate;
pub mod level;
pub mod solver;
pub mod types;

use chain::LineState;
use game::Game;
use level::{Level, LevelParams};
use serde::Serialize;
use types::{OperandRef, OperandSlot, Operator, Slot};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn level_from(number: u8) -> Result<Level, JsValue> {
    Level::try_from(number).map_err(js_error)
}

/// The parameters of a predefined level (1 to 5).
#[wasm_bindgen]
pub fn level_params(level: u8) -> Result<JsValue, JsValue> {
    to_js(level_from(level)?.params())
}

/// Generates `{ pool, target }` for a predefined level.
#[wasm_bindgen]
pub fn generate_puzzle(level: u8) -> Result<JsValue, JsValue> {
    let params = level_from(level)?.params();
    to_js(&generate::generate(params))
}

/// Generates a puzzle from parameters supplied as a plain object.
#[wasm_bindgen]
pub fn generate_custom(params: JsValue) -> Result<JsValue, JsValue> {
    let params: LevelParams = serde_wasm_bindgen::from_value(params).map_err(js_error)?;
    params.validate().map_err(js_error)?;
    to_js(&generate::generate(&params))
}

/// Solutions for `pool`/`target` with the operators of `level`.
///
/// `cap` limits how many are returned; omit it to enumerate them all.
#[wasm_bindgen]
pub fn find_solutions(
    pool: Vec<f64>,
    target: f64,
    level: u8,
    cap: Option<u32>,
) -> Result<JsValue, JsValue> {
    let params = level_from(level)?.params();
    let cap = cap.map(|c| c as usize);
    to_js(&solver::find_solutions(&pool, target, &params.operators, cap))
}

/// A chain line as the UI draws it: values next to their origins.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineView {
    n1: Option<f64>,
    n1_source: Option<OperandRef>,
    op: Option<Operator>,
    n2: Option<f64>,
    n2_source: Option<OperandRef>,
    result: Option<f64>,
    state: LineState,
    result_consumed: bool,
}

/// A play session exposed to JavaScript.
#[wasm_bindgen]
pub struct NumberGame {
    level: Level,
    game: Game,
}

#[wasm_bindgen]
impl NumberGame {
    /// Starts a game at `level` (1 to 5) with a generated puzzle.
    #[wasm_bindgen(constructor)]
    pub fn new(level: u8) -> Result<NumberGame, JsValue> {
        let level = level_from(level)?;
        Ok(NumberGame {
            level,
            game: Game::new(level.params().clone()),
        })
    }

    /// The level number this game was started at.
    pub fn level(&self) -> u8 {
        self.level.number()
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    pub fn pool(&self) -> Vec<f64> {
        self.game.puzzle().pool.clone()
    }

    pub fn target(&self) -> f64 {
        self.game.puzzle().target
    }

    pub fn hints_used(&self) -> usize {
        self.game.hints_used()
    }

    pub fn lines(&self) -> Result<JsValue, JsValue> {
        let chain = self.game.chain();
        let views: Vec<LineView> = chain
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| LineView {
                n1: line.n1.and_then(|r| chain.value_of(r)),
                n1_source: line.n1,
                op: line.op,
                n2: line.n2.and_then(|r| chain.value_of(r)),
                n2_source: line.n2,
                result: line.result,
                state: line.state(),
                result_consumed: chain.is_result_consumed(index),
            })
            .collect();
        to_js(&views)
    }

    /// Drops pool number `index` into `slot` ("n1" or "n2") of `line`.
    pub fn fill_pool_operand(&mut self, line: usize, slot: &str, index: usize) -> bool {
        self.fill_operand(line, slot, OperandRef::Pool(index))
    }

    /// Drops the result of line `source` into `slot` of `line`.
    pub fn fill_result_operand(&mut self, line: usize, slot: &str, source: usize) -> bool {
        self.fill_operand(line, slot, OperandRef::Result(source))
    }

    /// Sets the operator of `line` from its symbol.
    pub fn fill_operator(&mut self, line: usize, op: &str) -> bool {
        let Ok(op) = op.parse::<Operator>() else {
            return false;
        };
        self.game.chain_mut().fill_operator(line, op).is_ok()
    }

    /// Clears `slot` ("n1", "op" or "n2") of `line` and its dependents.
    pub fn clear_slot(&mut self, line: usize, slot: &str) -> bool {
        let Ok(slot) = slot.parse::<Slot>() else {
            return false;
        };
        self.game.chain_mut().clear_slot(line, slot).is_ok()
    }

    pub fn used_pool_indices(&self) -> Vec<u8> {
        self.game
            .chain()
            .used_pool_indices()
            .into_iter()
            .map(u8::from)
            .collect()
    }

    pub fn is_result_consumed(&self, line: usize) -> bool {
        self.game.chain().is_result_consumed(line)
    }

    pub fn is_solved(&self) -> bool {
        self.game.chain().is_solved()
    }

    /// Reveals the next solution step, or returns `null` when there is none.
    pub fn hint(&mut self) -> Result<JsValue, JsValue> {
        match self.game.hint().map_err(js_error)? {
            Some(step) => to_js(&step),
            None => Ok(JsValue::NULL),
        }
    }

    /// Fills the chain with a full solution. Returns whether one was found.
    pub fn solve(&mut self) -> Result<bool, JsValue> {
        self.game.solve().map_err(js_error)
    }
}

impl NumberGame {
    fn fill_operand(&mut self, line: usize, slot: &str, operand: OperandRef) -> bool {
        let Ok(slot) = slot.parse::<OperandSlot>() else {
            return false;
        };
        self.game
            .chain_mut()
            .fill_operand(line, slot, operand)
            .is_ok()
    }
}
