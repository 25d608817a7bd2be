//! Cart reconciler - local cart state kept consistent with the backend.
//!
//! The local cart is a projection, never the source of truth. Every
//! mutating operation calls the backend first and then re-fetches the
//! authoritative cart; nothing is inserted speculatively.
//!
//! ## Ordering
//!
//! A single `tokio::sync::Mutex` is held for the entire span of each
//! operation, trailing refresh included. Two concurrent `add` calls on
//! the same reconciler therefore produce two fully-ordered
//! mutate-then-refresh sequences, and the final state reflects the last
//! refresh in call order rather than whichever response happened to
//! land last.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::line_item::{LineId, LineItem};
use crate::api::error::Result as ApiResult;
use crate::api::ApiError;
use crate::catalog::CardId;

/// The remote side of the reconciler.
///
/// Implemented by `ApiClient` against the real backend and by
/// in-memory fakes in tests.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Fetch the authoritative cart contents.
    async fn fetch_cart(&self) -> ApiResult<Vec<LineItem>>;

    /// Add a card to the cart.
    async fn add_card(&self, card_id: CardId) -> ApiResult<()>;

    /// Remove one line from the cart.
    async fn remove_line(&self, line_id: LineId) -> ApiResult<()>;

    /// Empty the cart. Safe on an already-empty cart.
    async fn clear_cart(&self) -> ApiResult<()>;

    /// Check out the cart.
    async fn checkout(&self) -> ApiResult<()>;

    /// Fetch the user's current balance.
    async fn fetch_balance(&self) -> ApiResult<i64>;
}

#[async_trait]
impl<'a, B: CartBackend + ?Sized> CartBackend for &'a B {
    async fn fetch_cart(&self) -> ApiResult<Vec<LineItem>> {
        (**self).fetch_cart().await
    }

    async fn add_card(&self, card_id: CardId) -> ApiResult<()> {
        (**self).add_card(card_id).await
    }

    async fn remove_line(&self, line_id: LineId) -> ApiResult<()> {
        (**self).remove_line(line_id).await
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        (**self).clear_cart().await
    }

    async fn checkout(&self) -> ApiResult<()> {
        (**self).checkout().await
    }

    async fn fetch_balance(&self) -> ApiResult<i64> {
        (**self).fetch_balance().await
    }
}

#[async_trait]
impl<B: CartBackend + ?Sized> CartBackend for std::sync::Arc<B> {
    async fn fetch_cart(&self) -> ApiResult<Vec<LineItem>> {
        (**self).fetch_cart().await
    }

    async fn add_card(&self, card_id: CardId) -> ApiResult<()> {
        (**self).add_card(card_id).await
    }

    async fn remove_line(&self, line_id: LineId) -> ApiResult<()> {
        (**self).remove_line(line_id).await
    }

    async fn clear_cart(&self) -> ApiResult<()> {
        (**self).clear_cart().await
    }

    async fn checkout(&self) -> ApiResult<()> {
        (**self).checkout().await
    }

    async fn fetch_balance(&self) -> ApiResult<i64> {
        (**self).fetch_balance().await
    }
}

/// Checkout failures, classified for user-facing text.
///
/// Known backend message substrings map to distinct variants; anything
/// unrecognized falls through to `Backend`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("cart line {line} has an invalid price or quantity")]
    InvalidLine { line: LineId },

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("insufficient stock")]
    InsufficientStock,

    #[error("checkout failed: {0}")]
    Backend(String),
}

impl CheckoutError {
    /// Classify a backend failure by its message substrings.
    #[must_use]
    pub fn classify(error: &ApiError) -> Self {
        let message = error
            .server_message()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if message.contains("empty") {
            CheckoutError::EmptyCart
        } else if message.contains("balance") || message.contains("funds") {
            CheckoutError::InsufficientBalance
        } else if message.contains("stock") {
            CheckoutError::InsufficientStock
        } else {
            CheckoutError::Backend(error.to_string())
        }
    }
}

/// The client-visible cart state.
#[derive(Clone, Debug, Default)]
pub struct CartState {
    /// Current line items, replaced wholesale by each refresh.
    pub items: Vec<LineItem>,

    /// Last surfaced error message, cleared by a successful refresh.
    pub error: Option<String>,

    /// Whether the cart UI is open.
    pub open: bool,

    /// Last known balance, refreshed after checkout.
    pub balance: Option<i64>,
}

impl CartState {
    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

/// Keeps the local cart projection consistent with a remote backend.
pub struct CartReconciler<B> {
    backend: B,
    state: Mutex<CartState>,
}

impl<B: CartBackend> CartReconciler<B> {
    /// Create a reconciler over a backend, starting empty and closed.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(CartState::default()),
        }
    }

    /// A clone of the current cart state.
    pub async fn snapshot(&self) -> CartState {
        self.state.lock().await.clone()
    }

    /// Open or close the cart UI.
    pub async fn set_open(&self, open: bool) {
        self.state.lock().await.open = open;
    }

    /// Re-fetch the authoritative cart and replace local state.
    ///
    /// On failure the local items become empty and the error message is
    /// set; stale items are never retained.
    pub async fn refresh(&self) {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state).await;
    }

    async fn refresh_locked(&self, state: &mut CartState) {
        match self.backend.fetch_cart().await {
            Ok(items) => {
                debug!(lines = items.len(), "cart refreshed");
                state.items = items;
                state.error = None;
            }
            Err(error) => {
                warn!(%error, "cart refresh failed, dropping local items");
                state.items = Vec::new();
                state.error = Some(error.to_string());
            }
        }
    }

    /// Add a card to the cart, then refresh.
    ///
    /// On failure the error is surfaced and local items stay untouched
    /// (stale) until the next refresh.
    pub async fn add(&self, card_id: CardId) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        if let Err(error) = self.backend.add_card(card_id).await {
            state.error = Some(error.to_string());
            return Err(error);
        }
        self.refresh_locked(&mut state).await;
        Ok(())
    }

    /// Remove one line from the cart, then refresh.
    pub async fn remove(&self, line_id: LineId) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        if let Err(error) = self.backend.remove_line(line_id).await {
            state.error = Some(error.to_string());
            return Err(error);
        }
        self.refresh_locked(&mut state).await;
        Ok(())
    }

    /// Empty the cart, then refresh. Safe to call on an empty cart.
    pub async fn clear(&self) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        if let Err(error) = self.backend.clear_cart().await {
            state.error = Some(error.to_string());
            return Err(error);
        }
        self.refresh_locked(&mut state).await;
        Ok(())
    }

    /// Adjust a line's quantity in the local projection only.
    ///
    /// No backend call is made: the adjustment is cosmetic and the next
    /// refresh discards it. Checkout totals are computed server-side.
    /// Quantity clamps at 1; removal is a separate operation.
    ///
    /// Returns whether the line was found.
    pub async fn update_quantity(&self, line_id: LineId, delta: i32) -> bool {
        let mut state = self.state.lock().await;
        match state.items.iter_mut().find(|line| line.id == line_id) {
            Some(line) => {
                line.adjust_quantity(delta);
                true
            }
            None => false,
        }
    }

    /// Check out the cart.
    ///
    /// Client-side preconditions run before any remote call: the cart
    /// must be non-empty and every line must have a strictly positive
    /// price and quantity. On success the local cart is cleared, the
    /// cart UI closes, the balance is re-fetched, and the cart is
    /// refreshed to catch any server-side partial application. No
    /// automatic retry on failure.
    pub async fn checkout(&self) -> Result<(), CheckoutError> {
        let mut state = self.state.lock().await;

        if state.items.is_empty() {
            let error = CheckoutError::EmptyCart;
            state.error = Some(error.to_string());
            return Err(error);
        }
        let invalid = state
            .items
            .iter()
            .find(|line| line.unit_price == 0 || line.quantity == 0)
            .map(|line| line.id);
        if let Some(line) = invalid {
            let error = CheckoutError::InvalidLine { line };
            state.error = Some(error.to_string());
            return Err(error);
        }

        if let Err(api_error) = self.backend.checkout().await {
            let error = CheckoutError::classify(&api_error);
            warn!(%api_error, classified = %error, "checkout failed");
            state.error = Some(error.to_string());
            return Err(error);
        }

        state.items.clear();
        state.open = false;
        state.error = None;
        debug!("checkout succeeded");

        // Balance staleness is tolerable; the cart contents are not.
        match self.backend.fetch_balance().await {
            Ok(balance) => state.balance = Some(balance),
            Err(error) => warn!(%error, "balance refresh after checkout failed"),
        }
        self.refresh_locked(&mut state).await;
        Ok(())
    }
}
