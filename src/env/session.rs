//! The game session: turn order, opponent replies and rewards.
//!
//! ## Phases
//!
//! - `AwaitingAgentMove`: the only phase a caller ever observes mid-episode
//! - `AwaitingOpponentMove`: entered and left inside a single `reset`/`step`
//! - `Terminal`: absorbing until the next `reset`
//!
//! ## Example
//!
//! ```
//! use tictactoe_env::core::{EnvConfig, Side};
//! use tictactoe_env::env::TicTacToeEnv;
//!
//! let config = EnvConfig::default().with_agent_side(Side::Circle).with_seed(42);
//! let mut env = TicTacToeEnv::new(config).unwrap();
//!
//! let obs = env.reset().unwrap();
//! assert!(obs.is_one_hot());
//!
//! let result = env.step(4).unwrap();
//! assert!(!result.done);
//! assert_eq!(result.reward, 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    Action, ActionList, ActionRecord, Board, EnvConfig, EnvError, GameRng, GameRngState,
    IllegalMoveMode, Observation, OpponentKind, Result, Side, NUM_CELLS,
};
use crate::opponent::Opponent;
use crate::rules::Outcome;

use super::render::{self, RenderMode};
use super::spaces::{BoxSpace, Discrete};

/// Where the session is in the turn protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingAgentMove,
    AwaitingOpponentMove,
    Terminal,
}

/// Diagnostic information returned with every step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// The board after the step.
    pub board: Observation,
}

/// Everything `step` hands back to the agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    /// Reward from the agent's perspective: -1, 0 or 1.
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// A Tic-Tac-Toe environment where the agent plays one side and an
/// opponent policy answers every move.
#[derive(Debug)]
pub struct TicTacToeEnv {
    config: EnvConfig,
    opponent: Opponent,
    rng: GameRng,
    board: Board,
    to_play: Side,
    phase: Phase,
    history: Vec<ActionRecord>,
}

impl TicTacToeEnv {
    /// Create an environment against the opponent named in `config`.
    ///
    /// Only the random opponent can be named; use
    /// [`TicTacToeEnv::with_opponent`] to supply a policy.
    pub fn new(config: EnvConfig) -> Result<Self> {
        match config.opponent {
            OpponentKind::Random => Self::with_opponent(config, Opponent::random()),
            OpponentKind::External => Err(EnvError::Configuration(
                "an external opponent must be supplied as a policy".to_string(),
            )),
        }
    }

    /// Create an environment against the given opponent.
    ///
    /// The environment is reset before it is returned, so when the agent
    /// plays Cross the opponent's opening move is already on the board.
    pub fn with_opponent(mut config: EnvConfig, opponent: Opponent) -> Result<Self> {
        config.opponent = opponent.kind();
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let mut env = Self {
            config,
            opponent,
            rng,
            board: Board::new(),
            to_play: Side::FIRST,
            phase: Phase::AwaitingAgentMove,
            history: Vec::new(),
        };
        env.reset()?;
        Ok(env)
    }

    /// Start a new episode and return the initial observation.
    ///
    /// The returned board is always positioned for the agent to move.
    pub fn reset(&mut self) -> Result<Observation> {
        self.board = Board::new();
        self.history.clear();
        self.to_play = Side::FIRST;
        self.phase = Phase::AwaitingAgentMove;

        if self.config.agent_side != Side::FIRST {
            self.phase = Phase::AwaitingOpponentMove;
            self.opponent_reply()?;
            self.to_play = self.config.agent_side;
            self.phase = Phase::AwaitingAgentMove;
        }

        debug!(agent = %self.config.agent_side, marks = NUM_CELLS - self.board.empty_count(), "episode reset");
        Ok(self.board.to_observation())
    }

    /// Play the agent's move, let the opponent answer, and score the board.
    ///
    /// After the episode has ended this is a no-op returning reward 0.
    pub fn step(&mut self, action: usize) -> Result<StepResult> {
        if self.phase == Phase::Terminal {
            return Ok(self.result(0.0));
        }
        debug_assert_eq!(self.to_play, self.config.agent_side, "step called out of turn");

        let action = match Action::try_new(action).filter(|&a| self.board.is_legal(a)) {
            Some(action) => action,
            None => return self.reject(action),
        };

        let agent = self.config.agent_side;
        self.apply_move(action, agent);

        self.phase = Phase::AwaitingOpponentMove;
        self.opponent_reply()?;

        let outcome = self.board.evaluate()?;
        let reward = outcome.reward_for(agent);
        if outcome.is_win() || self.board.is_full() {
            self.phase = Phase::Terminal;
            info!(?outcome, reward, plies = self.history.len(), "episode finished");
        } else {
            self.phase = Phase::AwaitingAgentMove;
        }

        Ok(self.result(reward))
    }

    /// Render the board. See [`render::render`].
    pub fn render(&self, mode: RenderMode) -> Option<String> {
        render::render(&self.board, mode)
    }

    /// Replace the random source and return the seed used.
    ///
    /// With `None` a seed is drawn from OS entropy. The board is untouched;
    /// the new generator takes effect from the next opponent move.
    pub fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        self.rng = seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!(seed = self.rng.seed(), "reseeded");
        vec![self.rng.seed()]
    }

    /// The action space: one action per cell.
    #[must_use]
    pub fn action_space(&self) -> Discrete {
        Discrete::new(NUM_CELLS)
    }

    /// The observation space: three `3x3` layers of 0/1 markers.
    #[must_use]
    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::board()
    }

    /// Actions the agent may take now. Empty once the episode is over.
    #[must_use]
    pub fn legal_actions(&self) -> ActionList {
        match self.phase {
            Phase::Terminal => ActionList::new(),
            _ => self.board.possible_actions(),
        }
    }

    /// Get the current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the current observation.
    #[must_use]
    pub fn observation(&self) -> Observation {
        self.board.to_observation()
    }

    /// Side to move.
    #[must_use]
    pub fn to_play(&self) -> Side {
        self.to_play
    }

    /// Side the agent controls.
    #[must_use]
    pub fn agent_side(&self) -> Side {
        self.config.agent_side
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Moves applied this episode, opponent moves included.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Seed of the current random source.
    #[must_use]
    pub fn seed_used(&self) -> u64 {
        self.rng.seed()
    }

    /// Snapshot of the random source, for checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    fn query_opponent(&mut self) -> Option<Action> {
        let side = self.config.agent_side.other();
        self.opponent.choose_action(&self.board, side, &mut self.rng)
    }

    /// Ask the opponent for a move and play it unless the game is already
    /// decided. A pass is only accepted on a full board; otherwise the
    /// episode ends with `EnvError::OpponentPassed`.
    fn opponent_reply(&mut self) -> Result<()> {
        let reply = self.query_opponent();
        if self.board.evaluate()? != Outcome::Ongoing {
            return Ok(());
        }
        match reply {
            Some(action) => self.apply_opponent_move(action),
            None if self.board.is_full() => Ok(()),
            None => {
                self.phase = Phase::Terminal;
                let empty = self.board.empty_count();
                warn!(empty, "opponent passed before the board was full");
                Err(EnvError::OpponentPassed { empty })
            }
        }
    }

    fn apply_opponent_move(&mut self, action: Action) -> Result<()> {
        if action.index() >= NUM_CELLS || !self.board.is_legal(action) {
            self.phase = Phase::Terminal;
            return Err(EnvError::IllegalOpponentMove {
                action: action.index(),
            });
        }
        self.apply_move(action, self.config.agent_side.other());
        Ok(())
    }

    fn apply_move(&mut self, action: Action, side: Side) {
        self.board.apply(action, side);
        self.history
            .push(ActionRecord::new(side, action, self.history.len() as u32));
        self.to_play = side.other();
        debug!(%side, action = action.index(), "move applied");
    }

    fn reject(&mut self, action: usize) -> Result<StepResult> {
        match self.config.illegal_move_mode {
            IllegalMoveMode::Raise => {
                warn!(action, "illegal move rejected");
                Err(EnvError::IllegalMove { action })
            }
            IllegalMoveMode::Lose => {
                warn!(action, "illegal move forfeits the episode");
                self.phase = Phase::Terminal;
                Ok(self.result(-1.0))
            }
        }
    }

    fn result(&self, reward: f32) -> StepResult {
        let observation = self.board.to_observation();
        StepResult {
            observation,
            reward,
            done: self.phase == Phase::Terminal,
            info: StepInfo { board: observation },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(side: Side, seed: u64) -> TicTacToeEnv {
        TicTacToeEnv::new(EnvConfig::default().with_agent_side(side).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_reset_as_circle_is_empty() {
        let mut env = env(Side::Circle, 1);
        let obs = env.reset().unwrap();

        assert_eq!(obs, Board::new().to_observation());
        assert_eq!(env.to_play(), Side::Circle);
        assert_eq!(env.phase(), Phase::AwaitingAgentMove);
        assert!(env.history().is_empty());
    }

    #[test]
    fn test_reset_as_cross_has_opening_move() {
        let mut env = env(Side::Cross, 1);
        env.reset().unwrap();

        assert_eq!(env.board().mark_count(Side::Circle), 1);
        assert_eq!(env.board().mark_count(Side::Cross), 0);
        assert_eq!(env.to_play(), Side::Cross);
        assert_eq!(env.history().len(), 1);
        assert_eq!(env.history()[0].side, Side::Circle);
    }

    #[test]
    fn test_step_applies_both_moves() {
        let mut env = env(Side::Circle, 5);
        let result = env.step(0).unwrap();

        assert_eq!(env.board().get(Action::new(0)), Some(Side::Circle));
        assert_eq!(env.board().mark_count(Side::Cross), 1);
        assert_eq!(result.info.board, result.observation);
        assert_eq!(env.to_play(), Side::Circle);
    }

    #[test]
    fn test_external_requires_policy() {
        let config = EnvConfig::default().with_opponent(OpponentKind::External);
        assert!(matches!(
            TicTacToeEnv::new(config),
            Err(EnvError::Configuration(_))
        ));
    }

    #[test]
    fn test_illegal_opponent_move_reported() {
        let config = EnvConfig::default().with_seed(0);
        let mut env =
            TicTacToeEnv::with_opponent(config, Opponent::from_fn(|_| Some(Action::new(0)))).unwrap();

        let err = env.step(0).unwrap_err();
        assert_eq!(err, EnvError::IllegalOpponentMove { action: 0 });
        assert!(env.is_done());
    }

    #[test]
    fn test_opponent_pass_ends_episode_mid_game() {
        let config = EnvConfig::default().with_seed(0);
        let mut env = TicTacToeEnv::with_opponent(config, Opponent::from_fn(|_| None)).unwrap();

        let err = env.step(0).unwrap_err();
        assert_eq!(err, EnvError::OpponentPassed { empty: 8 });
        assert_eq!(env.phase(), Phase::Terminal);
        assert!(env.legal_actions().is_empty());
        assert_eq!(env.step(1).unwrap().reward, 0.0);
    }

    #[test]
    fn test_opponent_pass_on_opening_move() {
        let config = EnvConfig::default().with_agent_side(Side::Cross).with_seed(0);
        let err = TicTacToeEnv::with_opponent(config, Opponent::from_fn(|_| None)).unwrap_err();
        assert_eq!(err, EnvError::OpponentPassed { empty: 9 });
    }

    #[test]
    fn test_spaces() {
        let env = env(Side::Circle, 0);
        assert_eq!(env.action_space(), Discrete::new(9));
        assert_eq!(env.observation_space().shape, [3, 3, 3]);
    }

    #[test]
    fn test_seed_replaces_rng() {
        let mut env = env(Side::Circle, 0);
        assert_eq!(env.seed(Some(99)), vec![99]);
        assert_eq!(env.seed_used(), 99);
        assert_eq!(env.rng_state().seed, 99);
    }
}
