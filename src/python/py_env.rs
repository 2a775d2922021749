//! Environment bindings for Python.

use std::sync::{Arc, Mutex};

use numpy::{PyArray1, PyArray3, PyArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{
    Action, Board, EnvConfig, EnvError, GameRng, Observation, OpponentKind, Side, NUM_CELLS,
    OBSERVATION_SHAPE,
};
use crate::env::{RenderMode, TicTacToeEnv};
use crate::opponent::{Opponent, OpponentPolicy};

/// Map an environment error onto the closest Python exception.
pub(crate) fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::InvariantViolation(_) => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Convert an observation to a `(3, 3, 3)` int8 numpy array.
fn observation_to_numpy<'py>(
    py: Python<'py>,
    obs: &Observation,
) -> PyResult<Bound<'py, PyArray3<i8>>> {
    let data: Vec<i8> = obs.to_vec().into_iter().map(|v| v as i8).collect();
    PyArray1::from_vec_bound(py, data)
        .reshape(OBSERVATION_SHAPE)
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))
}

/// Failure raised inside a Python opponent, held until the engine call
/// that triggered it returns.
type CallbackError = Arc<Mutex<Option<PyErr>>>;

/// Opponent backed by a Python callable `f(board) -> int | None`.
///
/// The callable receives the board as a `(3, 3, 3)` numpy array. If it
/// raises or returns something other than a cell index, the error is stored
/// and the policy passes, which ends the episode.
struct PyCallablePolicy {
    callback: PyObject,
    error: CallbackError,
}

impl PyCallablePolicy {
    fn call(&self, py: Python<'_>, board: &Board) -> PyResult<Option<Action>> {
        let obs = observation_to_numpy(py, &board.to_observation())?;
        let choice: Option<usize> = self.callback.call1(py, (obs,))?.extract(py)?;
        choice
            .map(|i| {
                Action::try_new(i).ok_or_else(|| {
                    PyValueError::new_err(format!(
                        "opponent returned action {} but cells run 0..{}",
                        i, NUM_CELLS
                    ))
                })
            })
            .transpose()
    }
}

impl OpponentPolicy for PyCallablePolicy {
    fn choose_action(&mut self, board: &Board, _side: Side, _rng: &mut GameRng) -> Option<Action> {
        Python::with_gil(|py| match self.call(py, board) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::error!(%e, "opponent callable failed");
                if let Ok(mut slot) = self.error.lock() {
                    *slot = Some(e);
                }
                None
            }
        })
    }
}

/// Python wrapper for TicTacToeEnv.
///
/// Play against a fixed opponent; the opponent answers every `step`.
#[pyclass(name = "TicTacToeEnv")]
pub struct PyTicTacToeEnv {
    env: TicTacToeEnv,
    callback_error: CallbackError,
}

impl PyTicTacToeEnv {
    /// Prefer a stored callback failure over the engine's own error.
    fn check<T>(&self, result: crate::core::Result<T>) -> PyResult<T> {
        let pending = self.callback_error.lock().ok().and_then(|mut slot| slot.take());
        match (pending, result) {
            (Some(err), _) => Err(err),
            (None, result) => result.map_err(to_py_err),
        }
    }
}

#[pymethods]
impl PyTicTacToeEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - player_color: "circle" or "cross"
    /// - opponent: "random" or a callable taking the board array
    /// - observation_type: state encoding, only "numpy3c"
    /// - illegal_move_mode: "raise" or "lose"
    /// - seed: RNG seed, drawn from OS entropy when omitted
    #[new]
    #[pyo3(signature = (
        player_color = "circle",
        opponent = None,
        observation_type = "numpy3c",
        illegal_move_mode = "lose",
        seed = None
    ))]
    fn new(
        player_color: &str,
        opponent: Option<&Bound<'_, PyAny>>,
        observation_type: &str,
        illegal_move_mode: &str,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let callback_error = CallbackError::default();
        let opponent = match opponent {
            None => Opponent::random(),
            Some(obj) if obj.is_callable() => Opponent::external(PyCallablePolicy {
                callback: obj.clone().unbind(),
                error: Arc::clone(&callback_error),
            }),
            Some(obj) => {
                let keyword: String = obj.extract().map_err(|_| {
                    PyValueError::new_err("opponent must be 'random' or a callable")
                })?;
                match keyword.parse::<OpponentKind>().map_err(to_py_err)? {
                    OpponentKind::Random => Opponent::random(),
                    OpponentKind::External => {
                        return Err(PyValueError::new_err(
                            "an external opponent must be passed as a callable",
                        ))
                    }
                }
            }
        };

        let config = EnvConfig {
            agent_side: player_color.parse().map_err(to_py_err)?,
            opponent: opponent.kind(),
            observation: observation_type.parse().map_err(to_py_err)?,
            illegal_move_mode: illegal_move_mode.parse().map_err(to_py_err)?,
            seed,
        };
        let env = TicTacToeEnv::with_opponent(config, opponent);
        if let Some(err) = callback_error.lock().ok().and_then(|mut slot| slot.take()) {
            return Err(err);
        }
        Ok(Self {
            env: env.map_err(to_py_err)?,
            callback_error,
        })
    }

    /// Start a new episode and return the initial board.
    fn reset<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyArray3<i8>>> {
        let result = self.env.reset();
        let obs = self.check(result)?;
        observation_to_numpy(py, &obs)
    }

    /// Play an action. Returns `(observation, reward, done, info)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray3<i8>>, f32, bool, Bound<'py, PyDict>)> {
        let result = self.env.step(action);
        let result = self.check(result)?;
        let obs = observation_to_numpy(py, &result.observation)?;
        let info = PyDict::new_bound(py);
        info.set_item("state", observation_to_numpy(py, &result.info.board)?)?;
        Ok((obs, result.reward, result.done, info))
    }

    /// Render the board. "human" prints it, "ansi" returns it.
    #[pyo3(signature = (mode = "human"))]
    fn render(&self, mode: &str) -> PyResult<Option<String>> {
        let mode: RenderMode = mode.parse().map_err(to_py_err)?;
        Ok(self.env.render(mode))
    }

    /// Reseed the environment. Returns `[seed]`.
    #[pyo3(signature = (seed = None))]
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        self.env.seed(seed)
    }

    /// Cells the agent may mark now.
    fn legal_actions(&self) -> Vec<usize> {
        self.env.legal_actions().into_iter().map(Action::index).collect()
    }

    /// Size of the discrete action space.
    #[getter]
    fn action_space_n(&self) -> usize {
        NUM_CELLS
    }

    /// Shape of each observation.
    #[getter]
    fn observation_shape(&self) -> (usize, usize, usize) {
        let [l, r, c] = OBSERVATION_SHAPE;
        (l, r, c)
    }

    #[getter]
    fn done(&self) -> bool {
        self.env.is_done()
    }

    /// Side to move, "circle" or "cross".
    #[getter]
    fn to_play(&self) -> String {
        self.env.to_play().to_string()
    }

    #[getter]
    fn player_color(&self) -> String {
        self.env.agent_side().to_string()
    }

    fn __repr__(&self) -> String {
        let status = if self.env.is_done() { "terminal" } else { "ongoing" };
        format!(
            "TicTacToeEnv(player={}, moves={}, status={})",
            self.env.agent_side(),
            self.env.history().len(),
            status
        )
    }
}
