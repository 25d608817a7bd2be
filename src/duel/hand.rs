//! Participant hands: five cards plus per-round selection state.
//!
//! A `Hand` holds exactly [`HAND_SIZE`] cards for the whole duel. The
//! played set grows by one index per resolved round and never shrinks;
//! the selected index resets to `None` after every resolution.
//!
//! Invariant: an index can be selected only if it is not already in the
//! played set, and each side selects exactly one card per round before
//! resolution.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::Card;

/// Number of cards in a duel hand.
pub const HAND_SIZE: usize = 5;

/// One participant's cards and per-round selection state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hand {
    /// The five cards, fixed for the duel.
    cards: SmallVec<[Card; HAND_SIZE]>,

    /// Index selected for the current round, if any.
    selected: Option<usize>,

    /// Indices already played in earlier rounds. Grows monotonically.
    played: ImHashSet<usize>,
}

impl Hand {
    /// Build a hand from exactly [`HAND_SIZE`] cards.
    ///
    /// Returns `None` on any other count.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Option<Self> {
        if cards.len() != HAND_SIZE {
            return None;
        }
        Some(Self {
            cards: SmallVec::from_vec(cards),
            selected: None,
            played: ImHashSet::new(),
        })
    }

    /// The cards in this hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at an index.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Currently selected index, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether an index has been played in an earlier round.
    #[must_use]
    pub fn is_played(&self, index: usize) -> bool {
        self.played.contains(&index)
    }

    /// Number of cards played so far.
    #[must_use]
    pub fn played_count(&self) -> usize {
        self.played.len()
    }

    /// Indices not yet played, in hand order.
    #[must_use]
    pub fn unplayed_indices(&self) -> Vec<usize> {
        (0..self.cards.len())
            .filter(|i| !self.played.contains(i))
            .collect()
    }

    /// Select a card for this round.
    ///
    /// Selecting an already-played index is a silent no-op: the current
    /// selection is left unchanged. An out-of-range index is rejected.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.cards.len() || self.played.contains(&index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Clear the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Commit the current selection: mark it played and reset it.
    ///
    /// Returns the committed index, or `None` if nothing was selected.
    pub fn commit_selection(&mut self) -> Option<usize> {
        let index = self.selected.take()?;
        self.played.insert(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardId;

    fn five_cards() -> Vec<Card> {
        (0..5)
            .map(|i| Card::monster(CardId::new(i), format!("M{i}"), 1000 + i * 100, 800))
            .collect()
    }

    #[test]
    fn test_new_requires_exactly_five() {
        assert!(Hand::new(five_cards()).is_some());
        assert!(Hand::new(five_cards()[..4].to_vec()).is_none());
        assert!(Hand::new([five_cards(), five_cards()].concat()).is_none());
    }

    #[test]
    fn test_select_and_commit() {
        let mut hand = Hand::new(five_cards()).unwrap();

        assert!(hand.select(2));
        assert_eq!(hand.selected(), Some(2));

        assert_eq!(hand.commit_selection(), Some(2));
        assert_eq!(hand.selected(), None);
        assert!(hand.is_played(2));
        assert_eq!(hand.played_count(), 1);
    }

    #[test]
    fn test_select_played_is_noop() {
        let mut hand = Hand::new(five_cards()).unwrap();
        hand.select(2);
        hand.commit_selection();

        hand.select(4);
        assert!(!hand.select(2), "played index must be ignored");
        assert_eq!(hand.selected(), Some(4), "selection must be unchanged");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut hand = Hand::new(five_cards()).unwrap();
        assert!(!hand.select(5));
        assert_eq!(hand.selected(), None);
    }

    #[test]
    fn test_clear_selection() {
        let mut hand = Hand::new(five_cards()).unwrap();
        hand.select(1);
        hand.clear_selection();
        assert_eq!(hand.selected(), None);
    }

    #[test]
    fn test_commit_without_selection() {
        let mut hand = Hand::new(five_cards()).unwrap();
        assert_eq!(hand.commit_selection(), None);
        assert_eq!(hand.played_count(), 0);
    }

    #[test]
    fn test_unplayed_indices() {
        let mut hand = Hand::new(five_cards()).unwrap();
        hand.select(0);
        hand.commit_selection();
        hand.select(3);
        hand.commit_selection();

        assert_eq!(hand.unplayed_indices(), vec![1, 2, 4]);
    }

    #[test]
    fn test_played_set_is_monotonic() {
        let mut hand = Hand::new(five_cards()).unwrap();
        for i in 0..5 {
            hand.select(i);
            hand.commit_selection();
        }
        assert_eq!(hand.played_count(), 5);
        assert!(hand.unplayed_indices().is_empty());
    }
}
