//! # cardmart
//!
//! Client core for a trading-card storefront: catalog browsing, a cart
//! kept consistent with a remote backend, and a best-of-five duel
//! against a scripted opponent.
//!
//! ## Design Principles
//!
//! 1. **Projection, Not Truth**: the cart and catalog are client-side
//!    projections of backend state, replaced wholesale on refresh.
//!    Nothing is inserted speculatively.
//!
//! 2. **Tagged Unions Everywhere**: cards vs. packs, monsters vs.
//!    spells vs. traps - explicit variants, matched exhaustively.
//!    No string-tag sniffing.
//!
//! 3. **Deterministic Duels**: opponent draws and auto-selection run on
//!    a seedable ChaCha8 stream, so a duel replays identically from the
//!    same seed.
//!
//! ## Modules
//!
//! - `catalog`: cards, packs, the product union, the owning store
//! - `duel`: hands, round rules, the match state machine
//! - `cart`: line items and the backend reconciler
//! - `api`: REST client and normalized errors
//! - `session`: token + snapshot persistence

pub mod api;
pub mod cart;
pub mod catalog;
pub mod duel;
pub mod session;

// Re-export commonly used types
pub use crate::catalog::{
    Card, CardCategory, CardId, CardKind, CatalogStore, Pack, PackId, Product, ProductKind,
};

pub use crate::duel::{
    DuelEngine, DuelError, DuelPhase, DuelRng, DuelRngState, Hand, MatchResult, MatchScore,
    MatchWinner, RoundResult, RoundWinner, HAND_SIZE, MAX_ROUNDS, WINS_TO_TAKE_MATCH,
};

pub use crate::cart::{CartBackend, CartReconciler, CartState, CheckoutError, LineId, LineItem};

pub use crate::api::{
    ApiClient, ApiError, Credentials, InventoryQuery, NewCard, Page, UserProfile,
};

pub use crate::session::{SessionSnapshot, SessionStore};
