//! Cart line items - rows of the client-side cart projection.
//!
//! A line item is a denormalized view of one product in the cart. The
//! cart is never the source of truth; every row is provisional until
//! the next refresh from the backend.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductKind};

/// Unique identifier of a cart line on the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl LineId {
    /// Create a new line ID.
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

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

/// One entry in the cart: a product plus quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Backend identifier of this line.
    pub id: LineId,

    /// The product this line refers to.
    pub product_id: u32,

    /// Card or pack.
    pub kind: ProductKind,

    /// Unit price in currency units.
    pub unit_price: u64,

    /// Quantity, at least 1. Decrements clamp here rather than delete.
    pub quantity: u32,

    /// Denormalized display name.
    pub name: String,

    /// Denormalized image reference.
    pub image: String,
}

impl LineItem {
    /// Build a single-quantity line from a product.
    #[must_use]
    pub fn from_product(id: LineId, product: &Product) -> Self {
        // Exhaustive on the union: both arms spelled out.
        let kind = match product {
            Product::Card(_) => ProductKind::Card,
            Product::Pack(_) => ProductKind::Pack,
        };
        Self {
            id,
            product_id: product.id(),
            kind,
            unit_price: product.price(),
            quantity: 1,
            name: product.name().to_string(),
            image: product.image().to_string(),
        }
    }

    /// Adjust the quantity by a signed delta, clamping at 1.
    ///
    /// Removal is a separate operation; decrementing never deletes the
    /// line.
    pub fn adjust_quantity(&mut self, delta: i32) {
        let next = i64::from(self.quantity) + i64::from(delta);
        self.quantity = next.clamp(1, i64::from(u32::MAX)) as u32;
    }

    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Card, CardId, Pack, PackId};

    fn card_line() -> LineItem {
        let product = Product::from(
            Card::monster(CardId::new(1), "Azure Dragon", 2500, 2100).with_price(120),
        );
        LineItem::from_product(LineId::new(10), &product)
    }

    #[test]
    fn test_from_card_product() {
        let line = card_line();
        assert_eq!(line.kind, ProductKind::Card);
        assert_eq!(line.product_id, 1);
        assert_eq!(line.unit_price, 120);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.name, "Azure Dragon");
    }

    #[test]
    fn test_from_pack_product() {
        let product = Product::from(Pack::new(PackId::new(5), "Starter", 300, 5));
        let line = LineItem::from_product(LineId::new(11), &product);
        assert_eq!(line.kind, ProductKind::Pack);
        assert_eq!(line.unit_price, 300);
    }

    #[test]
    fn test_adjust_quantity_clamps_at_one() {
        let mut line = card_line();
        line.adjust_quantity(3);
        assert_eq!(line.quantity, 4);

        line.adjust_quantity(-2);
        assert_eq!(line.quantity, 2);

        line.adjust_quantity(-10);
        assert_eq!(line.quantity, 1, "decrement clamps at 1, never deletes");
    }

    #[test]
    fn test_subtotal() {
        let mut line = card_line();
        line.adjust_quantity(2);
        assert_eq!(line.subtotal(), 360);
    }

    #[test]
    fn test_wire_shape() {
        let line = card_line();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["unitPrice"], 120);
        assert_eq!(json["kind"], "card");
    }
}
