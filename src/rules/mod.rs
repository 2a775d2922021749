//! Game rules: winning lines and board evaluation.
//!
//! The board never interprets its own contents; the environment asks
//! `evaluate` whether a line has been completed.

pub mod outcome;

pub use outcome::{evaluate, Outcome, WIN_LINES};
