//! REST client for the storefront backend.
//!
//! One method per endpoint, JSON over HTTP, bearer-token authenticated
//! where the backend requires it. Non-success statuses are parsed into
//! `ApiError::Server` with the backend's message when the body carries
//! one; connection failures surface as `ApiError::Network`.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{ApiError, Result};
use super::types::{
    AddCartRequest, AuthResponse, Credentials, DepositRequest, ErrorBody, InventoryQuery,
    NewCard, Page, UserProfile,
};
use crate::cart::{CartBackend, LineId, LineItem};
use crate::catalog::{Card, CardId};

/// Storefront backend client.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client against the given base URL, unauthenticated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token (builder pattern).
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a bearer token is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token, failing pre-flight without one.
    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        Ok(builder.bearer_auth(token))
    }

    /// Turn a response into `T`, normalizing non-success statuses.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| status.to_string());
            Err(ApiError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Like `decode` but for endpoints whose success body is ignored.
    async fn expect_success(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    // === Auth ===

    /// `POST /user/login` - returns the bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .http
            .post(self.url("/user/login"))
            .json(credentials)
            .send()
            .await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.token)
    }

    /// `POST /user/signup` - returns the bearer token.
    pub async fn signup(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .http
            .post(self.url("/user/signup"))
            .json(credentials)
            .send()
            .await?;
        let auth: AuthResponse = Self::decode(response).await?;
        Ok(auth.token)
    }

    // === User ===

    /// `GET /user` - profile (name, balance).
    pub async fn fetch_user(&self) -> Result<UserProfile> {
        let request = self.authed(self.http.get(self.url("/user")))?;
        Self::decode(request.send().await?).await
    }

    /// `PATCH /user/funds` - deposit, returns the updated profile.
    pub async fn deposit_funds(&self, amount: i64) -> Result<UserProfile> {
        let request = self
            .authed(self.http.patch(self.url("/user/funds")))?
            .json(&DepositRequest { amount });
        Self::decode(request.send().await?).await
    }

    // === Catalog ===

    /// `GET /cards?page&itemsPerPage` - paginated catalog fetch.
    pub async fn fetch_cards(&self, page: u32, items_per_page: u32) -> Result<Page<Card>> {
        let request = self.authed(self.http.get(self.url("/cards")))?.query(&[
            ("page", page),
            ("itemsPerPage", items_per_page),
        ]);
        Self::decode(request.send().await?).await
    }

    /// `POST /cards/` - create a card (admin).
    pub async fn create_card(&self, new_card: &NewCard) -> Result<Card> {
        let request = self
            .authed(self.http.post(self.url("/cards/")))?
            .json(new_card);
        Self::decode(request.send().await?).await
    }

    /// `GET /inventory?page&itemsPerPage&itemName&cardAttribute` -
    /// owned-cards fetch with optional filters.
    pub async fn fetch_inventory(&self, query: &InventoryQuery) -> Result<Page<Card>> {
        let request = self
            .authed(self.http.get(self.url("/inventory")))?
            .query(query);
        Self::decode(request.send().await?).await
    }

    // === Cart ===

    /// `GET /cart` - the authoritative cart contents.
    pub async fn get_cart(&self) -> Result<Vec<LineItem>> {
        let request = self.authed(self.http.get(self.url("/cart")))?;
        Self::decode(request.send().await?).await
    }

    /// `POST /cart` with body `{cardId}` - add a card.
    pub async fn add_to_cart(&self, card_id: CardId) -> Result<()> {
        debug!(%card_id, "adding to cart");
        let request = self
            .authed(self.http.post(self.url("/cart")))?
            .json(&AddCartRequest {
                card_id: card_id.raw(),
            });
        Self::expect_success(request.send().await?).await
    }

    /// `DELETE /cart/card/:id` - remove one line.
    pub async fn remove_from_cart(&self, line_id: LineId) -> Result<()> {
        let path = format!("/cart/card/{}", line_id.raw());
        let request = self.authed(self.http.delete(self.url(&path)))?;
        Self::expect_success(request.send().await?).await
    }

    /// `DELETE /cart` - empty the cart.
    pub async fn delete_cart(&self) -> Result<()> {
        let request = self.authed(self.http.delete(self.url("/cart")))?;
        Self::expect_success(request.send().await?).await
    }

    /// `PUT /cart` - check out the cart.
    pub async fn put_checkout(&self) -> Result<()> {
        debug!("checking out cart");
        let request = self.authed(self.http.put(self.url("/cart")))?;
        Self::expect_success(request.send().await?).await
    }
}

#[async_trait::async_trait]
impl CartBackend for ApiClient {
    async fn fetch_cart(&self) -> Result<Vec<LineItem>> {
        self.get_cart().await
    }

    async fn add_card(&self, card_id: CardId) -> Result<()> {
        self.add_to_cart(card_id).await
    }

    async fn remove_line(&self, line_id: LineId) -> Result<()> {
        self.remove_from_cart(line_id).await
    }

    async fn clear_cart(&self) -> Result<()> {
        self.delete_cart().await
    }

    async fn checkout(&self) -> Result<()> {
        self.put_checkout().await
    }

    async fn fetch_balance(&self) -> Result<i64> {
        Ok(self.fetch_user().await?.balance)
    }
}
