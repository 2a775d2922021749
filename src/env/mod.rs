//! The reinforcement-learning environment: reset / step / render / seed.
//!
//! `TicTacToeEnv` owns the board, the opponent and the random source, and
//! interleaves agent and opponent moves so the caller only ever sees boards
//! where it is the agent's turn.

pub mod render;
pub mod session;
pub mod spaces;

pub use render::{render_board, RenderMode};
pub use session::{Phase, StepInfo, StepResult, TicTacToeEnv};
pub use spaces::{BoxSpace, Discrete};
