//! Error kinds raised by the environment.

use thiserror::Error;

/// Errors that can occur while configuring or driving an environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Invalid construction or seeding parameter.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The agent tried to mark a cell that is occupied or off the board.
    ///
    /// Only raised under `IllegalMoveMode::Raise`. State is left unchanged.
    #[error("illegal move: action {action}")]
    IllegalMove { action: usize },

    /// An externally supplied opponent picked a cell that is occupied or
    /// off the board.
    #[error("opponent policy returned illegal action {action}")]
    IllegalOpponentMove { action: usize },

    /// An externally supplied opponent returned no move while cells were
    /// still empty.
    #[error("opponent policy passed with {empty} empty cells")]
    OpponentPassed { empty: usize },

    /// Board state that cannot arise from alternating legal play.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience Result type for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;
