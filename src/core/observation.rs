//! The 3-layer observation tensor handed to agents.
//!
//! Shape `[3, 3, 3]` indexed `[layer][row][col]`:
//! - layer 0: cells marked by Circle
//! - layer 1: cells marked by Cross
//! - layer 2: empty cells

use serde::{Deserialize, Serialize};

use super::action::BOARD_SIZE;

/// Number of layers in the encoding.
pub const NUM_LAYERS: usize = 3;

/// Layer index of the empty-cell mask.
pub const EMPTY_LAYER: usize = 2;

/// Shape of every observation.
pub const OBSERVATION_SHAPE: [usize; 3] = [NUM_LAYERS, BOARD_SIZE, BOARD_SIZE];

/// A `[layer][row][col]` grid of 0/1 markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    planes: [[[u8; BOARD_SIZE]; BOARD_SIZE]; NUM_LAYERS],
}

impl Observation {
    /// Create an all-zero observation. Not a valid board on its own.
    #[must_use]
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Get the marker at `[layer][row][col]`.
    #[must_use]
    pub fn get(&self, layer: usize, row: usize, col: usize) -> u8 {
        self.planes[layer][row][col]
    }

    /// Set the marker at `[layer][row][col]`.
    pub fn set(&mut self, layer: usize, row: usize, col: usize, value: u8) {
        self.planes[layer][row][col] = value;
    }

    /// Shape of the tensor.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        OBSERVATION_SHAPE
    }

    /// Flatten in `[layer][row][col]` order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.planes.iter().flatten().flatten().copied().collect()
    }

    /// Build from a flat `[layer][row][col]` slice.
    ///
    /// Returns `None` if the slice has the wrong length.
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() != NUM_LAYERS * BOARD_SIZE * BOARD_SIZE {
            return None;
        }
        let mut obs = Self::zeros();
        for (i, &value) in data.iter().enumerate() {
            let layer = i / (BOARD_SIZE * BOARD_SIZE);
            let row = (i / BOARD_SIZE) % BOARD_SIZE;
            let col = i % BOARD_SIZE;
            obs.set(layer, row, col, value);
        }
        Some(obs)
    }

    /// Check that every cell carries exactly one marker across the layers.
    #[must_use]
    pub fn is_one_hot(&self) -> bool {
        (0..BOARD_SIZE).all(|row| {
            (0..BOARD_SIZE).all(|col| {
                let mut markers = 0u32;
                for plane in &self.planes {
                    match plane[row][col] {
                        0 => {}
                        1 => markers += 1,
                        _ => return false,
                    }
                }
                markers == 1
            })
        })
    }
}
