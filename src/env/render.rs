//! Text rendering of the board.

use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Board, EnvError, Result, Side, BOARD_SIZE};

/// Where rendered output goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Write to standard output.
    #[default]
    Human,
    /// Return the text to the caller.
    Ansi,
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(RenderMode::Human),
            "ansi" => Ok(RenderMode::Ansi),
            _ => Err(EnvError::Configuration(format!(
                "unsupported render mode '{}'",
                s
            ))),
        }
    }
}

const ROW_LABELS: [char; BOARD_SIZE] = ['A', 'B', 'C'];

fn glyph(mark: Option<Side>) -> char {
    mark.map_or(' ', Side::symbol)
}

/// Format the board as a labelled grid, rows A-C and columns 1-3.
///
/// ```
/// use tictactoe_env::core::{Action, Board, Side};
/// use tictactoe_env::env::render_board;
///
/// let mut board = Board::new();
/// board.apply(Action::new(0), Side::Circle);
/// assert!(render_board(&board).starts_with("    1   2   3\n"));
/// ```
#[must_use]
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("    1   2   3\n");
    out.push_str("             \n");
    for (row, label) in ROW_LABELS.iter().enumerate() {
        if row > 0 {
            out.push_str("    - + - + -\n");
        }
        out.push_str(&format!(
            "{}   {} | {} | {}\n",
            label,
            glyph(board.at(row, 0)),
            glyph(board.at(row, 1)),
            glyph(board.at(row, 2)),
        ));
    }
    out
}

/// Render according to `mode`.
///
/// `Human` writes to stdout and returns `None`; `Ansi` returns the text.
pub fn render(board: &Board, mode: RenderMode) -> Option<String> {
    let text = render_board(board);
    match mode {
        RenderMode::Ansi => Some(text),
        RenderMode::Human => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
                tracing::warn!(%err, "failed to write board to stdout");
            }
            None
        }
    }
}
