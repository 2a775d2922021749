//! Opponent policies that move automatically after each agent action.
//!
//! The environment only relies on the calling contract: given the current
//! board, return a legal action or `None` when the board is full. How good
//! the choice is belongs to the policy.

pub mod policy;

pub use policy::{FnPolicy, Opponent, OpponentPolicy, RandomPolicy};
