//! Backend REST surface: client, wire types, normalized errors.
//!
//! ## Key Types
//!
//! - `ApiClient`: one method per backend endpoint
//! - `ApiError`: the uniform failure shape (message + optional status)
//! - `Credentials` / `UserProfile` / `Page<T>` / `InventoryQuery`: wire
//!   types matching the backend's camelCase JSON

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AddCartRequest, AuthResponse, Credentials, DepositRequest, InventoryQuery, NewCard, Page,
    UserProfile,
};
