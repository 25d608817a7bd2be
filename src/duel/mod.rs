//! Duel engine: hands, round rules, and the match state machine.
//!
//! ## Key Types
//!
//! - `DuelRng`: deterministic RNG for opponent draws
//! - `Hand`: five cards plus per-round selection/played state
//! - `RoundResult` / `RoundWinner`: one card-vs-card comparison
//! - `DuelEngine` / `DuelPhase`: the best-of-five state machine
//! - `MatchResult` / `MatchScore`: the frozen outcome

pub mod engine;
pub mod hand;
pub mod rng;
pub mod round;

pub use engine::{
    DuelEngine, DuelError, DuelPhase, MatchResult, MatchScore, MatchWinner, MAX_ROUNDS,
    WINS_TO_TAKE_MATCH,
};
pub use hand::{Hand, HAND_SIZE};
pub use rng::{DuelRng, DuelRngState};
pub use round::{dominates, resolve, RoundResult, RoundWinner};
