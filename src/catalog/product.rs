//! Products - the card/pack union sold by the storefront.
//!
//! The backend sells two shapes of product: single cards and sealed
//! packs. `Product` is an explicit tagged union so every consumption
//! site matches exhaustively; there is no string-tag sniffing.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};

/// Unique identifier for a pack in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackId(pub u32);

impl PackId {
    /// Create a new pack ID.
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

impl std::fmt::Display for PackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pack({})", self.0)
    }
}

/// A sealed pack of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// Unique catalog identifier.
    pub id: PackId,

    /// Display name.
    pub name: String,

    /// Unit price in currency units.
    pub price: u64,

    /// Number of cards inside.
    pub cards_per_pack: u32,

    /// Image reference (URL or asset key).
    pub image: String,
}

impl Pack {
    /// Create a new pack.
    #[must_use]
    pub fn new(id: PackId, name: impl Into<String>, price: u64, cards_per_pack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            cards_per_pack,
            image: String::new(),
        }
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Which side of the product union a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Card,
    Pack,
}

impl ProductKind {
    /// Lowercase tag as the backend spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductKind::Card => "card",
            ProductKind::Pack => "pack",
        }
    }
}

/// Anything the storefront sells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Product {
    Card(Card),
    Pack(Pack),
}

impl Product {
    /// The union tag.
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        match self {
            Product::Card(_) => ProductKind::Card,
            Product::Pack(_) => ProductKind::Pack,
        }
    }

    /// Raw product identifier (card and pack IDs share a namespace on
    /// the backend).
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Product::Card(card) => card.id.raw(),
            Product::Pack(pack) => pack.id.raw(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Product::Card(card) => &card.name,
            Product::Pack(pack) => &pack.name,
        }
    }

    /// Unit price in currency units.
    #[must_use]
    pub const fn price(&self) -> u64 {
        match self {
            Product::Card(card) => card.price,
            Product::Pack(pack) => pack.price,
        }
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        match self {
            Product::Card(card) => &card.image,
            Product::Pack(pack) => &pack.image,
        }
    }

    /// The card inside, if this is a card product.
    #[must_use]
    pub const fn as_card(&self) -> Option<&Card> {
        match self {
            Product::Card(card) => Some(card),
            Product::Pack(_) => None,
        }
    }

    /// The pack inside, if this is a pack product.
    #[must_use]
    pub const fn as_pack(&self) -> Option<&Pack> {
        match self {
            Product::Card(_) => None,
            Product::Pack(pack) => Some(pack),
        }
    }
}

impl From<Card> for Product {
    fn from(card: Card) -> Self {
        Product::Card(card)
    }
}

impl From<Pack> for Product {
    fn from(pack: Pack) -> Self {
        Product::Pack(pack)
    }
}
