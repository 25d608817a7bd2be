//! Card model - static storefront card data.
//!
//! A `Card` is immutable once fetched from the backend. Stock is only
//! ever changed by purchase operations on the remote side; the client
//! never edits it locally.
//!
//! Combat stats live inside `CardKind::Monster` - spells and traps have
//! no attack or defense, and the type system enforces that instead of a
//! nullable field.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The comparison-rule view of a card: what it counts as in a duel round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Monster,
    Spell,
    Trap,
}

impl CardCategory {
    /// Lowercase name used in round reason strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardCategory::Monster => "monster",
            CardCategory::Spell => "spell",
            CardCategory::Trap => "trap",
        }
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of card this is, with the data only that kind carries.
///
/// Only monsters have combat stats. Matching on this is always
/// exhaustive; there is no "unknown" variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum CardKind {
    Monster { attack: u32, defense: u32 },
    Spell,
    Trap,
}

impl CardKind {
    /// The category this kind resolves as in a round.
    #[must_use]
    pub const fn category(&self) -> CardCategory {
        match self {
            CardKind::Monster { .. } => CardCategory::Monster,
            CardKind::Spell => CardCategory::Spell,
            CardKind::Trap => CardCategory::Trap,
        }
    }

    /// Attack value, if this is a monster.
    #[must_use]
    pub const fn attack(&self) -> Option<u32> {
        match self {
            CardKind::Monster { attack, .. } => Some(*attack),
            CardKind::Spell | CardKind::Trap => None,
        }
    }

    /// Defense value, if this is a monster.
    #[must_use]
    pub const fn defense(&self) -> Option<u32> {
        match self {
            CardKind::Monster { defense, .. } => Some(*defense),
            CardKind::Spell | CardKind::Trap => None,
        }
    }
}

/// A storefront card.
///
/// ## Example
///
/// ```
/// use cardmart::catalog::{Card, CardId, CardCategory};
///
/// let dragon = Card::monster(CardId::new(1), "Azure Dragon", 2500, 2100)
///     .with_price(120)
///     .with_stock(3);
///
/// assert_eq!(dragon.kind.category(), CardCategory::Monster);
/// assert_eq!(dragon.kind.attack(), Some(2500));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique catalog identifier.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Kind and kind-specific data.
    #[serde(flatten)]
    pub kind: CardKind,

    /// Unit price in currency units.
    pub price: u64,

    /// Remaining stock on the remote side as of the last fetch.
    pub stock: u32,

    /// Image reference (URL or asset key).
    pub image: String,
}

impl Card {
    /// Create a monster card with the given combat stats.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, attack: u32, defense: u32) -> Self {
        Self::new(id, name, CardKind::Monster { attack, defense })
    }

    /// Create a spell card.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, CardKind::Spell)
    }

    /// Create a trap card.
    #[must_use]
    pub fn trap(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, CardKind::Trap)
    }

    /// Create a card of an arbitrary kind.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            price: 0,
            stock: 0,
            image: String::new(),
        }
    }

    /// Set the price (builder pattern).
    #[must_use]
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = price;
        self
    }

    /// Set the stock count (builder pattern).
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// The category this card resolves as in a round.
    #[must_use]
    pub const fn category(&self) -> CardCategory {
        self.kind.category()
    }
}
