//! Python bindings for the Tic-Tac-Toe environment.
//!
//! # Quick Start
//!
//! ```python
//! import tictactoe_env
//!
//! env = tictactoe_env.TicTacToeEnv("cross", "random", "numpy3c", "lose", seed=42)
//! obs = env.reset()            # (3, 3, 3) int8 array, opponent already moved
//! obs, reward, done, info = env.step(4)
//! print(env.render("ansi"))
//! ```
//!
//! An opponent can also be any callable taking the board array and
//! returning a cell index or `None`.

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// tictactoe_env: a Tic-Tac-Toe environment for reinforcement learning.
#[pymodule]
fn tictactoe_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTicTacToeEnv>()?;
    Ok(())
}
