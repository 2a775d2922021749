//! Board state: a 3x3 grid of cells, each empty or marked by one side.
//!
//! The board stores one `Option<Side>` per cell, which makes the one-hot
//! property of the external 3-layer encoding hold by construction. The
//! layered form is produced at the boundary by [`Board::to_observation`]
//! and accepted back by [`Board::from_observation`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, NUM_CELLS};
use super::error::{EnvError, Result};
use super::observation::{Observation, EMPTY_LAYER};
use super::player::Side;
use crate::rules::{self, Outcome};

/// Legal actions for a board. Never more than nine, so it stays inline.
pub type ActionList = SmallVec<[Action; NUM_CELLS]>;

/// A 3x3 Tic-Tac-Toe board, cells in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Side>; NUM_CELLS],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mark at a cell, if any.
    #[must_use]
    pub fn get(&self, action: Action) -> Option<Side> {
        self.cells[action.index()]
    }

    /// Get the mark at `(row, col)`, if any.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Option<Side> {
        self.get(Action::from_coords(row, col))
    }

    /// Check whether `action` targets an empty cell.
    #[must_use]
    pub fn is_legal(&self, action: Action) -> bool {
        self.cells[action.index()].is_none()
    }

    /// Mark the target cell for `side`.
    ///
    /// The caller must check [`Board::is_legal`] first.
    pub fn apply(&mut self, action: Action, side: Side) {
        debug_assert!(
            self.is_legal(action),
            "cell {} already marked by {:?}",
            action,
            self.cells[action.index()]
        );
        self.cells[action.index()] = Some(side);
    }

    /// All actions whose cell is still empty, in row-major order.
    #[must_use]
    pub fn possible_actions(&self) -> ActionList {
        Action::all().filter(|&a| self.is_legal(a)).collect()
    }

    /// Evaluate the winning lines. See [`rules::evaluate`].
    pub fn evaluate(&self) -> Result<Outcome> {
        rules::evaluate(self)
    }

    /// Number of cells marked by `side`.
    #[must_use]
    pub fn mark_count(&self, side: Side) -> usize {
        self.cells.iter().filter(|&&c| c == Some(side)).count()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Check whether every cell is marked.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate over `(action, mark)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Action, Option<Side>)> + '_ {
        Action::all().map(move |a| (a, self.get(a)))
    }

    /// Encode as the 3-layer one-hot observation.
    #[must_use]
    pub fn to_observation(&self) -> Observation {
        let mut obs = Observation::zeros();
        for (action, mark) in self.cells() {
            let layer = mark.map_or(EMPTY_LAYER, Side::index);
            obs.set(layer, action.row(), action.col(), 1);
        }
        obs
    }

    /// Decode a 3-layer observation.
    ///
    /// Fails if any cell does not carry exactly one marker across the three
    /// layers.
    pub fn from_observation(obs: &Observation) -> Result<Self> {
        let mut board = Board::new();
        for action in Action::all() {
            let (row, col) = action.coords();
            let circle = obs.get(Side::Circle.index(), row, col);
            let cross = obs.get(Side::Cross.index(), row, col);
            let empty = obs.get(EMPTY_LAYER, row, col);
            board.cells[action.index()] = match (circle, cross, empty) {
                (1, 0, 0) => Some(Side::Circle),
                (0, 1, 0) => Some(Side::Cross),
                (0, 0, 1) => None,
                layers => {
                    return Err(EnvError::InvariantViolation(format!(
                        "cell ({}, {}) is not one-hot: {:?}",
                        row, col, layers
                    )))
                }
            };
        }
        Ok(board)
    }
}
