//! Duel engine: the best-of-five match state machine.
//!
//! ## Phases
//!
//! `Selection -> Prepare -> Round -> Result`, with `Result -> Selection`
//! on reset.
//!
//! - `Selection`: the caller stages exactly five cards from their
//!   inventory via [`DuelEngine::begin`].
//! - `Prepare`: [`DuelEngine::prepare`] draws the opponent's five cards
//!   from the catalog pool without replacement. The opponent hand stays
//!   hidden; only played cards surface through round results.
//! - `Round`: the engine auto-selects an unplayed opponent card at
//!   round start; the caller selects and confirms, triggering
//!   resolution.
//! - `Result`: the frozen [`MatchResult`] is available until reset.
//!
//! A match ends the moment either side reaches three round wins, or
//! after round five by comparing counters.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hand::{Hand, HAND_SIZE};
use super::rng::DuelRng;
use super::round::{resolve, RoundResult, RoundWinner};
use crate::catalog::Card;

/// Round wins needed to take the match outright.
pub const WINS_TO_TAKE_MATCH: u8 = 3;

/// Maximum number of rounds in a match.
pub const MAX_ROUNDS: u8 = 5;

/// Where the duel currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelPhase {
    Selection,
    Prepare,
    Round,
    Result,
}

/// Errors from duel operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DuelError {
    #[error("expected {expected:?} phase, duel is in {actual:?}")]
    Phase {
        expected: DuelPhase,
        actual: DuelPhase,
    },

    #[error("a duel hand needs exactly 5 cards, got {got}")]
    SelectionSize { got: usize },

    #[error("draw pool has {available} cards, need at least 5")]
    PoolTooSmall { available: usize },

    #[error("card index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("no card selected for this round")]
    NoCardSelected,
}

/// Per-side round-win counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub player: u8,
    pub opponent: u8,
}

/// Winner of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchWinner {
    Player,
    Opponent,
    Draw,
}

/// Frozen outcome of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: MatchWinner,
    pub score: MatchScore,
}

/// The duel state machine.
///
/// ## Example
///
/// ```
/// use cardmart::catalog::{Card, CardId};
/// use cardmart::duel::{DuelEngine, DuelPhase};
///
/// let owned: Vec<Card> = (0..5)
///     .map(|i| Card::monster(CardId::new(i), format!("M{i}"), 1000, 800))
///     .collect();
/// let pool: Vec<Card> = (10..20)
///     .map(|i| Card::monster(CardId::new(i), format!("P{i}"), 900, 700))
///     .collect();
///
/// let mut duel = DuelEngine::new(42);
/// duel.begin(owned).unwrap();
/// duel.prepare(&pool).unwrap();
/// assert_eq!(duel.phase(), DuelPhase::Round);
/// assert_eq!(duel.round_number(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DuelEngine {
    phase: DuelPhase,
    player: Option<Hand>,
    opponent: Option<Hand>,
    /// Current round, 1-based. Meaningful only in the `Round` phase.
    round: u8,
    score: MatchScore,
    history: Vector<RoundResult>,
    result: Option<MatchResult>,
    rng: DuelRng,
}

impl DuelEngine {
    /// Create a new duel seeded for deterministic opponent behavior.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(DuelRng::new(seed))
    }

    /// Create a new duel with a caller-supplied RNG.
    #[must_use]
    pub fn with_rng(rng: DuelRng) -> Self {
        Self {
            phase: DuelPhase::Selection,
            player: None,
            opponent: None,
            round: 0,
            score: MatchScore::default(),
            history: Vector::new(),
            result: None,
            rng,
        }
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DuelPhase {
        self.phase
    }

    /// Current round number (1-based). Zero before the first round.
    #[must_use]
    pub fn round_number(&self) -> u8 {
        self.round
    }

    /// Round-win counters.
    #[must_use]
    pub fn score(&self) -> MatchScore {
        self.score
    }

    /// The player's hand, once staged.
    #[must_use]
    pub fn player_hand(&self) -> Option<&Hand> {
        self.player.as_ref()
    }

    /// How many cards the hidden opponent hand has left unplayed.
    ///
    /// The opponent's unplayed cards are never exposed beyond this
    /// count; played cards surface through round results.
    #[must_use]
    pub fn opponent_remaining(&self) -> usize {
        self.opponent
            .as_ref()
            .map_or(0, |h| HAND_SIZE - h.played_count())
    }

    /// The most recently resolved round, if any.
    #[must_use]
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.history.back()
    }

    /// All resolved rounds in order.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundResult> {
        &self.history
    }

    /// The frozen match outcome, once the duel reaches `Result`.
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    // === Transitions ===

    /// Stage the player's hand: exactly five owned cards.
    ///
    /// Transitions `Selection -> Prepare`. Any other card count leaves
    /// the duel in `Selection`.
    pub fn begin(&mut self, cards: Vec<Card>) -> Result<(), DuelError> {
        self.expect_phase(DuelPhase::Selection)?;

        let got = cards.len();
        let hand = Hand::new(cards).ok_or(DuelError::SelectionSize { got })?;
        self.player = Some(hand);
        self.phase = DuelPhase::Prepare;
        debug!(phase = ?self.phase, "player hand staged");
        Ok(())
    }

    /// Draw the opponent's hand from the catalog pool and start round 1.
    ///
    /// Draws five distinct cards without replacement. A pool smaller
    /// than five fails fast; the duel stays in `Prepare`.
    pub fn prepare(&mut self, pool: &[Card]) -> Result<(), DuelError> {
        self.expect_phase(DuelPhase::Prepare)?;

        let indices = self
            .rng
            .draw_distinct(pool.len(), HAND_SIZE)
            .ok_or(DuelError::PoolTooSmall {
                available: pool.len(),
            })?;
        let drawn: Vec<Card> = indices.into_iter().map(|i| pool[i].clone()).collect();

        // draw_distinct returned exactly HAND_SIZE indices
        self.opponent = Hand::new(drawn);
        self.phase = DuelPhase::Round;
        self.round = 1;
        self.auto_select_opponent();
        debug!(round = self.round, "opponent hand drawn, first round started");
        Ok(())
    }

    /// Select one of the player's unplayed cards for this round.
    ///
    /// Selecting an already-played index is a silent no-op leaving the
    /// current selection unchanged. An out-of-range index is an error.
    pub fn select_card(&mut self, index: usize) -> Result<(), DuelError> {
        self.expect_phase(DuelPhase::Round)?;
        if index >= HAND_SIZE {
            return Err(DuelError::IndexOutOfRange { index });
        }
        if let Some(hand) = self.player.as_mut() {
            hand.select(index);
        }
        Ok(())
    }

    /// Confirm the player's selection and resolve the round.
    ///
    /// Requires a selected player card. Both played cards join their
    /// hands' played sets and both selections reset. Returns the round
    /// result; check [`DuelEngine::phase`] afterwards to see whether the
    /// match ended.
    pub fn resolve_round(&mut self) -> Result<RoundResult, DuelError> {
        self.expect_phase(DuelPhase::Round)?;

        let (player, opponent) = match (self.player.as_mut(), self.opponent.as_mut()) {
            (Some(p), Some(o)) => (p, o),
            // Hands exist in any reachable Round phase.
            _ => return Err(DuelError::NoCardSelected),
        };

        if player.selected().is_none() {
            return Err(DuelError::NoCardSelected);
        }

        let player_idx = player.commit_selection().ok_or(DuelError::NoCardSelected)?;
        let opponent_idx = opponent
            .commit_selection()
            .ok_or(DuelError::NoCardSelected)?;

        let player_card = player.card(player_idx).cloned();
        let opponent_card = opponent.card(opponent_idx).cloned();
        let (player_card, opponent_card) = match (player_card, opponent_card) {
            (Some(p), Some(o)) => (p, o),
            _ => return Err(DuelError::NoCardSelected),
        };

        let result = resolve(&player_card, &opponent_card);
        match result.winner {
            RoundWinner::Player => self.score.player += 1,
            RoundWinner::Opponent => self.score.opponent += 1,
            RoundWinner::Draw => {}
        }
        debug!(
            round = self.round,
            winner = ?result.winner,
            reason = %result.reason,
            "round resolved"
        );
        self.history.push_back(result.clone());

        if let Some(winner) = self.terminal_winner() {
            self.result = Some(MatchResult {
                winner,
                score: self.score,
            });
            self.phase = DuelPhase::Result;
            debug!(winner = ?winner, "match finished");
        } else {
            self.round += 1;
            self.auto_select_opponent();
        }

        Ok(result)
    }

    /// Reset everything back to `Selection` for a new duel.
    ///
    /// Scores, hands, round counter, selections, and history are all
    /// cleared. The RNG stream continues, so consecutive duels differ.
    pub fn reset(&mut self) {
        self.phase = DuelPhase::Selection;
        self.player = None;
        self.opponent = None;
        self.round = 0;
        self.score = MatchScore::default();
        self.history = Vector::new();
        self.result = None;
        debug!("duel reset");
    }

    // === Internals ===

    fn expect_phase(&self, expected: DuelPhase) -> Result<(), DuelError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DuelError::Phase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Pick an unplayed opponent card uniformly at random for the
    /// round that just started.
    fn auto_select_opponent(&mut self) {
        if let Some(hand) = self.opponent.as_mut() {
            let unplayed = hand.unplayed_indices();
            if let Some(&index) = self.rng.choose(&unplayed) {
                hand.select(index);
            }
        }
    }

    /// Decide whether the match is over after the round just resolved.
    fn terminal_winner(&self) -> Option<MatchWinner> {
        if self.score.player >= WINS_TO_TAKE_MATCH {
            return Some(MatchWinner::Player);
        }
        if self.score.opponent >= WINS_TO_TAKE_MATCH {
            return Some(MatchWinner::Opponent);
        }
        if self.round >= MAX_ROUNDS {
            return Some(match self.score.player.cmp(&self.score.opponent) {
                std::cmp::Ordering::Greater => MatchWinner::Player,
                std::cmp::Ordering::Less => MatchWinner::Opponent,
                std::cmp::Ordering::Equal => MatchWinner::Draw,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;

    fn monsters(base_attack: u32, count: u32) -> Vec<Card> {
        (0..count)
            .map(|i| {
                Card::monster(
                    CardId::new(1000 + i),
                    format!("M{i}"),
                    base_attack + i * 10,
                    800,
                )
            })
            .collect()
    }

    fn started_duel(seed: u64) -> DuelEngine {
        let mut duel = DuelEngine::new(seed);
        duel.begin(monsters(2000, 5)).unwrap();
        duel.prepare(&monsters(1000, 8)).unwrap();
        duel
    }

    #[test]
    fn test_begin_requires_five_cards() {
        let mut duel = DuelEngine::new(42);

        let err = duel.begin(monsters(2000, 4)).unwrap_err();
        assert_eq!(err, DuelError::SelectionSize { got: 4 });
        assert_eq!(duel.phase(), DuelPhase::Selection);

        let err = duel.begin(monsters(2000, 6)).unwrap_err();
        assert_eq!(err, DuelError::SelectionSize { got: 6 });

        duel.begin(monsters(2000, 5)).unwrap();
        assert_eq!(duel.phase(), DuelPhase::Prepare);
    }

    #[test]
    fn test_prepare_fails_fast_on_small_pool() {
        let mut duel = DuelEngine::new(42);
        duel.begin(monsters(2000, 5)).unwrap();

        let err = duel.prepare(&monsters(1000, 4)).unwrap_err();
        assert_eq!(err, DuelError::PoolTooSmall { available: 4 });
        assert_eq!(duel.phase(), DuelPhase::Prepare);
    }

    #[test]
    fn test_prepare_starts_round_one() {
        let duel = started_duel(42);
        assert_eq!(duel.phase(), DuelPhase::Round);
        assert_eq!(duel.round_number(), 1);
        assert_eq!(duel.opponent_remaining(), 5);
    }

    #[test]
    fn test_phase_guards() {
        let mut duel = DuelEngine::new(42);

        assert!(matches!(
            duel.prepare(&monsters(1000, 8)),
            Err(DuelError::Phase { .. })
        ));
        assert!(matches!(duel.select_card(0), Err(DuelError::Phase { .. })));
        assert!(matches!(
            duel.resolve_round(),
            Err(DuelError::Phase { .. })
        ));
    }

    #[test]
    fn test_resolve_requires_selection() {
        let mut duel = started_duel(42);
        assert_eq!(duel.resolve_round().unwrap_err(), DuelError::NoCardSelected);

        duel.select_card(0).unwrap();
        assert!(duel.resolve_round().is_ok());
    }

    #[test]
    fn test_round_marks_both_cards_played() {
        let mut duel = started_duel(42);
        duel.select_card(2).unwrap();
        duel.resolve_round().unwrap();

        let hand = duel.player_hand().unwrap();
        assert!(hand.is_played(2));
        assert_eq!(hand.selected(), None);
        assert_eq!(duel.opponent_remaining(), 4);
        assert_eq!(duel.round_number(), 2);
    }

    #[test]
    fn test_player_sweep_ends_at_three() {
        // Player's weakest monster (2000) still beats the pool's
        // strongest (1070), so the player wins every round.
        let mut duel = started_duel(42);

        for i in 0..3 {
            duel.select_card(i).unwrap();
            duel.resolve_round().unwrap();
        }

        assert_eq!(duel.phase(), DuelPhase::Result);
        let result = duel.result().unwrap();
        assert_eq!(result.winner, MatchWinner::Player);
        assert_eq!(result.score.player, 3);
        assert_eq!(result.score.opponent, 0);
    }

    #[test]
    fn test_all_draws_goes_to_round_five() {
        // Identical attack on every card: all five rounds draw.
        let mut duel = DuelEngine::new(7);
        let flat: Vec<Card> = (0..5)
            .map(|i| Card::monster(CardId::new(i), format!("F{i}"), 1500, 900))
            .collect();
        let pool: Vec<Card> = (10..18)
            .map(|i| Card::monster(CardId::new(i), format!("P{i}"), 1500, 900))
            .collect();
        duel.begin(flat).unwrap();
        duel.prepare(&pool).unwrap();

        for i in 0..5 {
            assert_eq!(duel.phase(), DuelPhase::Round);
            duel.select_card(i).unwrap();
            duel.resolve_round().unwrap();
        }

        assert_eq!(duel.phase(), DuelPhase::Result);
        let result = duel.result().unwrap();
        assert_eq!(result.winner, MatchWinner::Draw);
        assert_eq!(result.score, MatchScore::default());
        assert_eq!(duel.history().len(), 5);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut duel = started_duel(42);
        duel.select_card(0).unwrap();
        duel.resolve_round().unwrap();

        duel.reset();

        assert_eq!(duel.phase(), DuelPhase::Selection);
        assert_eq!(duel.round_number(), 0);
        assert_eq!(duel.score(), MatchScore::default());
        assert!(duel.player_hand().is_none());
        assert!(duel.history().is_empty());
        assert!(duel.result().is_none());
    }

    #[test]
    fn test_same_seed_same_opponent_draw() {
        let mut d1 = started_duel(42);
        let mut d2 = started_duel(42);

        d1.select_card(0).unwrap();
        d2.select_card(0).unwrap();
        let r1 = d1.resolve_round().unwrap();
        let r2 = d2.resolve_round().unwrap();

        assert_eq!(r1.opponent_card, r2.opponent_card);
    }
}
