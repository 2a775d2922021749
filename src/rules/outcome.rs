//! Win detection over the eight winning lines.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Board, EnvError, Result, Side};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const WIN_LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Result of evaluating a board.
///
/// A full board with no completed line is still `Ongoing`; the environment
/// decides termination from fullness separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    CircleWins,
    CrossWins,
    Ongoing,
}

impl Outcome {
    /// The winner, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::CircleWins => Some(Side::Circle),
            Outcome::CrossWins => Some(Side::Cross),
            Outcome::Ongoing => None,
        }
    }

    /// Check whether a line was completed.
    #[must_use]
    pub fn is_win(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Raw score: +1 Circle wins, -1 Cross wins, 0 otherwise.
    #[must_use]
    pub fn score(self) -> f32 {
        match self {
            Outcome::CircleWins => 1.0,
            Outcome::CrossWins => -1.0,
            Outcome::Ongoing => 0.0,
        }
    }

    /// Score from `side`'s perspective.
    #[must_use]
    pub fn reward_for(self, side: Side) -> f32 {
        match side {
            Side::Circle => self.score(),
            Side::Cross => -self.score(),
        }
    }
}

fn completes_line(board: &Board, side: Side) -> bool {
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&cell| board.get(Action::new(cell)) == Some(side)))
}

/// Evaluate a board.
///
/// Both sides holding a completed line cannot happen under alternating play,
/// so it is reported as `EnvError::InvariantViolation`.
pub fn evaluate(board: &Board) -> Result<Outcome> {
    match (completes_line(board, Side::Circle), completes_line(board, Side::Cross)) {
        (false, false) => Ok(Outcome::Ongoing),
        (true, false) => Ok(Outcome::CircleWins),
        (false, true) => Ok(Outcome::CrossWins),
        (true, true) => Err(EnvError::InvariantViolation(
            "both players got a winning line".to_string(),
        )),
    }
}
