//! Core types: sides, actions, board, observation, RNG, configuration, errors.
//!
//! The board and its encodings are pure data. The environment in
//! [`crate::env`] drives them.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod observation;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord, BOARD_SIZE, NUM_CELLS};
pub use board::{ActionList, Board};
pub use config::{EnvConfig, IllegalMoveMode, ObservationType, OpponentKind};
pub use error::{EnvError, Result};
pub use observation::{Observation, EMPTY_LAYER, NUM_LAYERS, OBSERVATION_SHAPE};
pub use player::Side;
pub use rng::{GameRng, GameRngState};
