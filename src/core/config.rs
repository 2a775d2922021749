//! Environment configuration.
//!
//! Callers configure an environment at construction time by providing:
//! - `agent_side`: which side the agent controls
//! - `opponent`: the built-in random opponent or an external policy
//! - `observation`: the observation encoding
//! - `illegal_move_mode`: what happens when the agent picks an occupied cell
//!
//! Every field can also be parsed from its textual keyword, so callers that
//! only hold strings (bindings, command lines) get the same validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{EnvError, Result};
use super::player::Side;

/// Which opponent the environment plays against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Uniformly random legal moves drawn from the session RNG.
    #[default]
    Random,
    /// A policy supplied by the caller at construction.
    External,
}

impl FromStr for OpponentKind {
    type Err = EnvError;

    /// Only `"random"` names an opponent; external policies are passed as
    /// values, never by keyword.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(OpponentKind::Random),
            _ => Err(EnvError::Configuration(format!(
                "unrecognized opponent policy '{}'",
                s
            ))),
        }
    }
}

/// Observation encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationType {
    /// Three `3x3` one-hot layers: circle, cross, empty.
    #[default]
    #[serde(rename = "numpy3c")]
    Numpy3c,
}

impl FromStr for ObservationType {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "numpy3c" => Ok(ObservationType::Numpy3c),
            _ => Err(EnvError::Configuration(format!(
                "unsupported observation type '{}'",
                s
            ))),
        }
    }
}

/// What `step` does with an action that targets an occupied cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IllegalMoveMode {
    /// Return `EnvError::IllegalMove` and leave the session untouched.
    Raise,
    /// End the episode with reward -1 for the agent.
    #[default]
    Lose,
}

impl FromStr for IllegalMoveMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raise" => Ok(IllegalMoveMode::Raise),
            "lose" => Ok(IllegalMoveMode::Lose),
            _ => Err(EnvError::Configuration(format!(
                "unsupported illegal move mode '{}'",
                s
            ))),
        }
    }
}

/// Environment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Side the agent controls. Fixed for the lifetime of the environment.
    pub agent_side: Side,

    /// Opponent selection.
    pub opponent: OpponentKind,

    /// Observation encoding.
    pub observation: ObservationType,

    /// Handling of illegal agent moves.
    pub illegal_move_mode: IllegalMoveMode,

    /// Initial RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            agent_side: Side::Circle,
            opponent: OpponentKind::Random,
            observation: ObservationType::Numpy3c,
            illegal_move_mode: IllegalMoveMode::Lose,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Build a config from textual keywords.
    ///
    /// ```
    /// use tictactoe_env::core::{EnvConfig, IllegalMoveMode, Side};
    ///
    /// let config = EnvConfig::parse("cross", "random", "numpy3c", "raise").unwrap();
    /// assert_eq!(config.agent_side, Side::Cross);
    /// assert_eq!(config.illegal_move_mode, IllegalMoveMode::Raise);
    /// ```
    pub fn parse(
        agent_side: &str,
        opponent: &str,
        observation: &str,
        illegal_move_mode: &str,
    ) -> Result<Self> {
        Ok(Self {
            agent_side: agent_side.parse()?,
            opponent: opponent.parse()?,
            observation: observation.parse()?,
            illegal_move_mode: illegal_move_mode.parse()?,
            seed: None,
        })
    }

    /// Set the agent side.
    pub fn with_agent_side(mut self, side: Side) -> Self {
        self.agent_side = side;
        self
    }

    /// Set the opponent kind.
    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }

    /// Set the illegal move mode.
    pub fn with_illegal_move_mode(mut self, mode: IllegalMoveMode) -> Self {
        self.illegal_move_mode = mode;
        self
    }

    /// Set the initial seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
