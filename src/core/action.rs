//! Action representation: a cell index on the 3x3 board.
//!
//! Actions map to board coordinates row-major and zero-indexed:
//! `action = row * 3 + col`, `row = action / 3`, `col = action % 3`.
//! The mapping is part of the public contract, since callers translate
//! between action IDs and coordinates when rendering or scripting games.

use serde::{Deserialize, Serialize};

use super::player::Side;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells, and so the size of the action space.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// A cell index in `0..9`.
///
/// ## Example
///
/// ```
/// use tictactoe_env::core::Action;
///
/// let centre = Action::from_coords(1, 1);
/// assert_eq!(centre.index(), 4);
/// assert_eq!(Action::new(7).coords(), (2, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action(u8);

impl Action {
    /// Create an action from a cell index.
    ///
    /// Panics in debug builds if the index is off the board.
    #[must_use]
    pub fn new(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_CELLS, "action {} off the board", index);
        Self(index)
    }

    /// Create an action, returning `None` if the index is off the board.
    #[must_use]
    pub fn try_new(index: usize) -> Option<Self> {
        (index < NUM_CELLS).then(|| Self(index as u8))
    }

    /// Create an action from zero-indexed board coordinates.
    #[must_use]
    pub fn from_coords(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self((row * BOARD_SIZE + col) as u8)
    }

    /// Get the raw cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Row of the target cell.
    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_SIZE
    }

    /// Column of the target cell.
    #[must_use]
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_SIZE
    }

    /// `(row, col)` of the target cell.
    #[must_use]
    pub const fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Iterate over every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Action> {
        (0..NUM_CELLS as u8).map(Action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A move that was applied during an episode.
///
/// Kept in the session history for replay and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that moved.
    pub side: Side,

    /// The cell that was marked.
    pub action: Action,

    /// Ply number within the episode, starting at 0.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(side: Side, action: Action, sequence: u32) -> Self {
        Self {
            side,
            action,
            sequence,
        }
    }
}
