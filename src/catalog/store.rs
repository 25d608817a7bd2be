//! Catalog store - the single owner of fetched catalog data.
//!
//! The store holds the card and pack lists received from the backend
//! and hands out references through accessor methods. Nothing else in
//! the crate keeps its own copy of the catalog; a fetch replaces the
//! lists wholesale.

use rustc_hash::FxHashMap;

use super::card::{Card, CardId};
use super::product::{Pack, PackId};

/// Owned catalog state with lookup by ID.
///
/// ## Example
///
/// ```
/// use cardmart::catalog::{Card, CardId, CatalogStore};
///
/// let mut store = CatalogStore::new();
/// store.replace_cards(vec![
///     Card::monster(CardId::new(1), "Azure Dragon", 2500, 2100),
/// ]);
///
/// assert_eq!(store.card_count(), 1);
/// assert_eq!(store.card(CardId::new(1)).unwrap().name, "Azure Dragon");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    cards: Vec<Card>,
    packs: Vec<Pack>,
    card_index: FxHashMap<CardId, usize>,
    pack_index: FxHashMap<PackId, usize>,
}

impl CatalogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the card list wholesale with a fresh fetch.
    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.card_index = cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.id, i))
            .collect();
        self.cards = cards;
    }

    /// Replace the pack list wholesale with a fresh fetch.
    pub fn replace_packs(&mut self, packs: Vec<Pack>) {
        self.pack_index = packs
            .iter()
            .enumerate()
            .map(|(i, pack)| (pack.id, i))
            .collect();
        self.packs = packs;
    }

    /// Get a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.card_index.get(&id).map(|&i| &self.cards[i])
    }

    /// Get a pack by ID.
    #[must_use]
    pub fn pack(&self, id: PackId) -> Option<&Pack> {
        self.pack_index.get(&id).map(|&i| &self.packs[i])
    }

    /// All cards, in fetch order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// All packs, in fetch order.
    #[must_use]
    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Number of cards currently held.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of packs currently held.
    #[must_use]
    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }

    /// Check whether any catalog data has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.packs.is_empty()
    }

    /// Find cards matching a predicate.
    pub fn find_cards<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cards() -> Vec<Card> {
        vec![
            Card::monster(CardId::new(1), "Azure Dragon", 2500, 2100).with_price(120),
            Card::spell(CardId::new(2), "Mirror Rift").with_price(45),
            Card::trap(CardId::new(3), "Pit of Chains").with_price(30),
        ]
    }

    #[test]
    fn test_replace_and_lookup() {
        let mut store = CatalogStore::new();
        store.replace_cards(sample_cards());

        assert_eq!(store.card_count(), 3);
        assert_eq!(store.card(CardId::new(2)).unwrap().name, "Mirror Rift");
        assert!(store.card(CardId::new(99)).is_none());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = CatalogStore::new();
        store.replace_cards(sample_cards());
        store.replace_cards(vec![Card::spell(CardId::new(9), "Solitary")]);

        assert_eq!(store.card_count(), 1);
        assert!(store.card(CardId::new(1)).is_none());
        assert!(store.card(CardId::new(9)).is_some());
    }

    #[test]
    fn test_packs() {
        let mut store = CatalogStore::new();
        store.replace_packs(vec![
            Pack::new(PackId::new(1), "Starter", 300, 5),
            Pack::new(PackId::new(2), "Booster", 150, 3),
        ]);

        assert_eq!(store.pack_count(), 2);
        assert_eq!(store.pack(PackId::new(2)).unwrap().name, "Booster");
    }

    #[test]
    fn test_find_cards() {
        let mut store = CatalogStore::new();
        store.replace_cards(sample_cards());

        let cheap: Vec<_> = store.find_cards(|c| c.price <= 45).collect();
        assert_eq!(cheap.len(), 2);
    }

    #[test]
    fn test_empty() {
        let store = CatalogStore::new();
        assert!(store.is_empty());
        assert_eq!(store.card_count(), 0);
    }
}
