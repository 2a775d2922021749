//! # tictactoe-env
//!
//! A two-player Tic-Tac-Toe environment for reinforcement learning.
//!
//! ## Design Principles
//!
//! 1. **Agent's Turn Only**: `reset` and `step` always return a board where
//!    the agent is to move. The opponent's replies, including its opening
//!    move when the agent plays Cross, happen inside the engine.
//!
//! 2. **Explicit Randomness**: Every environment owns its `GameRng`. The
//!    random opponent borrows it per move, so reseeding is a single
//!    replacement and two environments with the same seed replay the same
//!    episodes.
//!
//! 3. **Stable Encoding**: Internally one mark per cell; externally the
//!    3-layer one-hot observation (circle, cross, empty).
//!
//! ## Modules
//!
//! - `core`: Sides, actions, board, observation, RNG, configuration, errors
//! - `rules`: Winning lines and board evaluation
//! - `opponent`: Opponent policy contract and built-in policies
//! - `env`: The reset / step / render / seed environment
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod env;
pub mod opponent;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Board, EnvConfig, EnvError, GameRng, GameRngState, IllegalMoveMode,
    Observation, ObservationType, OpponentKind, Result, Side,
};

pub use crate::env::{BoxSpace, Discrete, Phase, RenderMode, StepInfo, StepResult, TicTacToeEnv};

pub use crate::opponent::{FnPolicy, Opponent, OpponentPolicy, RandomPolicy};

pub use crate::rules::{evaluate, Outcome};
