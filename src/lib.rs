//! Reversi rules for even-sized boards from 4x4 up to 16x16.
//!
//! [`Reversi`] owns a [`Board`] and is the only way to change it.
//! [`session`] keeps one game per player and exposes it to a browser
//! front end through wasm-bindgen.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod types;

pub use board::Board;
pub use config::Dimensions;
pub use error::ReversiError;
pub use game::{DIRECTIONS, Reversi};
pub use session::Session;
pub use types::{CellState, GameResult, GameState, Position, Snapshot};
