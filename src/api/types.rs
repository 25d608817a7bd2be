//! Wire types for the storefront backend.
//!
//! Field names follow the backend's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::catalog::CardKind;

/// Login/signup request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Auth response carrying the bearer token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Profile returned by `GET /user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub balance: i64,
}

/// Body for `PATCH /user/funds`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: i64,
}

/// One page of a paginated listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total_pages: u32,
}

/// Body for `POST /cart`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartRequest {
    pub card_id: u32,
}

/// Body for `POST /cards/` (admin create).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    #[serde(flatten)]
    pub kind: CardKind,
    pub price: u64,
    pub stock: u32,
    pub image: String,
}

/// Query for `GET /inventory`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub page: u32,
    pub items_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_attribute: Option<String>,
}

impl InventoryQuery {
    /// First page with the given page size, no filters.
    #[must_use]
    pub fn page(page: u32, items_per_page: u32) -> Self {
        Self {
            page,
            items_per_page,
            ..Self::default()
        }
    }

    /// Filter by (partial) card name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }

    /// Filter by card attribute (category or elemental kind).
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.card_attribute = Some(attribute.into());
        self
    }
}

/// Error body the backend attaches to non-success statuses.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Card;

    #[test]
    fn test_add_cart_request_is_camel_case() {
        let body = AddCartRequest { card_id: 7 };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["cardId"], 7);
    }

    #[test]
    fn test_page_decodes() {
        let json = serde_json::json!({
            "results": [
                { "id": 1, "name": "Azure Dragon", "category": "monster",
                  "attack": 2500, "defense": 2100, "price": 120, "stock": 3,
                  "image": "cards/azure.png" }
            ],
            "totalPages": 4
        });

        let page: Page<Card> = serde_json::from_value(json).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].kind.attack(), Some(2500));
    }

    #[test]
    fn test_inventory_query_skips_empty_filters() {
        let query = InventoryQuery::page(1, 20);
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("itemName").is_none());
        assert!(json.get("cardAttribute").is_none());

        let query = InventoryQuery::page(1, 20).with_name("dragon");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["itemName"], "dragon");
    }
}
