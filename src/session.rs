use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

use crate::config::Dimensions;
use crate::error::ReversiError;
use crate::game::Reversi;
use crate::types::{GameResult, GameState, Snapshot};

/// Holds the game for one player session.
///
/// A default 8x8 game is created the first time one is needed.
#[derive(Debug, Default)]
pub struct Session {
    game: Option<Reversi>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&mut self) -> &mut Reversi {
        self.game.get_or_insert_with(Reversi::default)
    }

    /// Replaces the game. A zero side falls back to 8. On a validation error
    /// the current game is kept.
    pub fn new_game(&mut self, width: usize, height: usize) -> Result<GameState, ReversiError> {
        let dims = Dimensions::from_request(width, height)?;
        info!(width = dims.width(), height = dims.height(), "new game");
        let game = self
            .game
            .insert(Reversi::new(dims.width(), dims.height()));
        Ok(game.to_game_state())
    }

    /// Plays the current player's piece at `(x, y)`.
    pub fn place(&mut self, x: i32, y: i32) -> Result<GameState, ReversiError> {
        let game = self.game();
        if game.is_conceded() {
            return Err(ReversiError::GameConceded);
        }
        if !game.apply_move(x, y) {
            warn!(x, y, "rejected illegal move");
            return Err(ReversiError::IllegalMove { x, y });
        }
        Ok(game.to_game_state())
    }

    pub fn concede(&mut self) -> GameState {
        let game = self.game();
        game.concede();
        game.to_game_state()
    }

    pub fn state(&mut self) -> GameState {
        self.game().to_game_state()
    }

    pub fn result(&mut self) -> GameResult {
        self.game().to_game_result()
    }

    pub fn export(&mut self) -> Snapshot {
        self.game().snapshot()
    }

    /// Restores a stored game. An invalid snapshot leaves the session as is.
    pub fn import(&mut self, snapshot: Snapshot) -> Result<GameState, ReversiError> {
        let game = self.game.insert(Reversi::from_snapshot(snapshot)?);
        Ok(game.to_game_state())
    }
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::new()));

fn session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn err_to_js(err: ReversiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen(js_name = newGame)]
pub fn new_game(width: u32, height: u32) -> Result<JsValue, JsValue> {
    let state = session()
        .new_game(width as usize, height as usize)
        .map_err(err_to_js)?;
    to_js(&state)
}

#[wasm_bindgen(js_name = getState)]
pub fn get_state() -> Result<JsValue, JsValue> {
    to_js(&session().state())
}

#[wasm_bindgen(js_name = placePiece)]
pub fn place_piece(x: i32, y: i32) -> Result<JsValue, JsValue> {
    let state = session().place(x, y).map_err(err_to_js)?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn concede() -> Result<JsValue, JsValue> {
    to_js(&session().concede())
}

#[wasm_bindgen(js_name = getResult)]
pub fn get_result() -> Result<JsValue, JsValue> {
    to_js(&session().result())
}

#[wasm_bindgen(js_name = exportSnapshot)]
pub fn export_snapshot() -> Result<JsValue, JsValue> {
    to_js(&session().export())
}

#[wasm_bindgen(js_name = importSnapshot)]
pub fn import_snapshot(snapshot: JsValue) -> Result<JsValue, JsValue> {
    let snapshot: Snapshot = serde_wasm_bindgen::from_value(snapshot)?;
    let state = session().import(snapshot).map_err(err_to_js)?;
    to_js(&state)
}
