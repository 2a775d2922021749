//! Opponent policies.
//!
//! - `OpponentPolicy`: the calling contract every opponent satisfies
//! - `RandomPolicy`: uniform choice over the empty cells
//! - `FnPolicy`: adapts a caller-supplied closure
//! - `Opponent`: the tagged variant the environment holds

use crate::core::{Action, Board, GameRng, OpponentKind, Side};

/// Policy for choosing the opponent's move.
///
/// The environment lends its RNG for the duration of a single call, so a
/// policy never holds randomness of its own and reseeding the environment
/// reseeds every policy with it.
pub trait OpponentPolicy: Send {
    /// Choose a cell for `side` to mark.
    ///
    /// Returns `None` if no legal actions exist.
    fn choose_action(&mut self, board: &Board, side: Side, rng: &mut GameRng) -> Option<Action>;
}

/// Uniform random opponent policy.
///
/// Selects uniformly from the board's possible actions.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose_action(&mut self, board: &Board, _side: Side, rng: &mut GameRng) -> Option<Action> {
        let actions = board.possible_actions();
        rng.choose(&actions).copied()
    }
}

/// Policy backed by a closure from board to action.
///
/// ```
/// use tictactoe_env::core::Board;
/// use tictactoe_env::opponent::FnPolicy;
///
/// // Always takes the first empty cell.
/// let first_free = FnPolicy::new(|board: &Board| board.possible_actions().first().copied());
/// ```
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: FnMut(&Board) -> Option<Action> + Send,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> OpponentPolicy for FnPolicy<F>
where
    F: FnMut(&Board) -> Option<Action> + Send,
{
    fn choose_action(&mut self, board: &Board, _side: Side, _rng: &mut GameRng) -> Option<Action> {
        (self.f)(board)
    }
}

impl<F> std::fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnPolicy")
    }
}

/// The opponent an environment plays against, fixed at construction.
pub enum Opponent {
    /// Built-in uniform random policy.
    Random(RandomPolicy),
    /// Caller-supplied policy.
    External(Box<dyn OpponentPolicy>),
}

impl Opponent {
    /// The built-in random opponent.
    #[must_use]
    pub fn random() -> Self {
        Opponent::Random(RandomPolicy)
    }

    /// Wrap a caller-supplied policy.
    pub fn external(policy: impl OpponentPolicy + 'static) -> Self {
        Opponent::External(Box::new(policy))
    }

    /// Wrap a closure from board to action.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(&Board) -> Option<Action> + Send + 'static,
    {
        Self::external(FnPolicy::new(f))
    }

    /// Which variant this is.
    #[must_use]
    pub fn kind(&self) -> OpponentKind {
        match self {
            Opponent::Random(_) => OpponentKind::Random,
            Opponent::External(_) => OpponentKind::External,
        }
    }

    /// Ask the policy for a move.
    pub fn choose_action(&mut self, board: &Board, side: Side, rng: &mut GameRng) -> Option<Action> {
        match self {
            Opponent::Random(policy) => policy.choose_action(board, side, rng),
            Opponent::External(policy) => policy.choose_action(board, side, rng),
        }
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::random()
    }
}

impl std::fmt::Debug for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Opponent::Random(_) => f.write_str("Opponent::Random"),
            Opponent::External(_) => f.write_str("Opponent::External"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_policy_picks_legal_cell() {
        let mut board = Board::new();
        board.apply(Action::new(0), Side::Circle);
        board.apply(Action::new(4), Side::Cross);

        let mut rng = GameRng::new(42);
        let mut policy = RandomPolicy;
        for _ in 0..50 {
            let action = policy.choose_action(&board, Side::Circle, &mut rng).unwrap();
            assert!(board.is_legal(action));
        }
    }

    #[test]
    fn test_random_policy_full_board() {
        let mut board = Board::new();
        for action in Action::all() {
            let side = if action.index() % 2 == 0 { Side::Circle } else { Side::Cross };
            board.apply(action, side);
        }

        let mut rng = GameRng::new(42);
        assert_eq!(RandomPolicy.choose_action(&board, Side::Cross, &mut rng), None);
    }

    #[test]
    fn test_random_policy_deterministic() {
        let board = Board::new();
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        let seq1: Vec<_> = (0..20)
            .map(|_| RandomPolicy.choose_action(&board, Side::Circle, &mut rng1))
            .collect();
        let seq2: Vec<_> = (0..20)
            .map(|_| RandomPolicy.choose_action(&board, Side::Circle, &mut rng2))
            .collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_fn_policy() {
        let mut opponent = Opponent::from_fn(|board| board.possible_actions().last().copied());
        assert_eq!(opponent.kind(), OpponentKind::External);

        let mut rng = GameRng::new(0);
        let action = opponent.choose_action(&Board::new(), Side::Cross, &mut rng);
        assert_eq!(action, Some(Action::new(8)));
    }

    #[test]
    fn test_opponent_default_is_random() {
        assert_eq!(Opponent::default().kind(), OpponentKind::Random);
    }
}
