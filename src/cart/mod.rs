//! Cart: line items and the reconciler keeping them consistent with
//! the backend.
//!
//! ## Key Types
//!
//! - `LineId` / `LineItem`: rows of the cart projection
//! - `CartBackend`: the remote seam (real client or test fake)
//! - `CartReconciler` / `CartState`: the reconciliation operations
//! - `CheckoutError`: classified checkout failures

pub mod line_item;
pub mod reconciler;

pub use line_item::{LineId, LineItem};
pub use reconciler::{CartBackend, CartReconciler, CartState, CheckoutError};
