//! Backend REST API.
//!
//! | Call                | Method | Path                       |
//! |---------------------|--------|----------------------------|
//! | login               | POST   | /api/auth/login            |
//! | register            | POST   | /api/auth/register         |
//! | list products       | GET    | /api/products              |
//! | create product      | POST   | /api/products              |
//! | update product      | PATCH  | /api/products/{id}         |
//! | delete product      | DELETE | /api/products/{id}         |
//! | list orders         | GET    | /api/orders                |
//! | create order        | POST   | /api/orders                |
//! | update order status | PATCH  | /api/orders/{id}/status    |
//! | dashboard stats     | GET    | /api/dashboard/stats       |
//!
//! Every call except login/register needs a bearer token. Without one the
//! call fails with [`ClientError::NotAuthenticated`] and no request is sent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use rom_config::{ClientSettings, DEFAULT_BASE_URL};
use rom_menu::ProductStore;
use rom_orders::OrderStore;
use rom_schemas::{
    error_message, AuthResponse, CreatedOrder, Credentials, DashboardStats, NewOrder, NewProduct,
    Order, OrderList, OrderStatus, Product, ProductId, ProductPatch, StatusUpdate,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        match settings.timeout {
            None => Ok(Self::new_with_base_url(settings.base_url.clone())),
            Some(timeout) => Self::with_timeout(settings.base_url.clone(), timeout),
        }
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    pub async fn login(&self, creds: &Credentials) -> Result<AuthResponse, ClientError> {
        self.auth_call("/api/auth/login", creds, "login failed").await
    }

    pub async fn register(&self, creds: &Credentials) -> Result<AuthResponse, ClientError> {
        self.auth_call("/api/auth/register", creds, "registration failed")
            .await
    }

    /// Login and register report 401 as a normal API error so the backend's
    /// message (e.g. wrong password) reaches the user.
    async fn auth_call(
        &self,
        path: &str,
        creds: &Credentials,
        fallback: &str,
    ) -> Result<AuthResponse, ClientError> {
        debug!(path, username = %creds.username, "auth request");
        let resp = self.request(Method::POST, path).json(creds).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status, resp, fallback).await);
        }
        decode_json(resp).await
    }

    /// Bearer-token view of this client. `token = None` makes every call
    /// fail with `NotAuthenticated` before anything is sent.
    pub fn authed(&self, token: Option<String>) -> AuthedClient {
        AuthedClient {
            api: self.clone(),
            token,
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct AuthedClient {
    api: ApiClient,
    token: Option<String>,
}

impl std::fmt::Debug for AuthedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthedClient")
            .field("base_url", &self.api.base_url)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl AuthedClient {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.api.request(method, path).bearer_auth(token))
    }

    async fn send(&self, req: RequestBuilder, fallback: &str) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::NotAuthenticated);
        }
        if !status.is_success() {
            return Err(api_error(status, resp, fallback).await);
        }
        Ok(resp)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let req = self.request(Method::GET, "/api/products")?;
        let resp = self.send(req, "failed to fetch products").await?;
        // The backend may answer `null` for an empty menu.
        let products: Option<Vec<Product>> = decode_json(resp).await?;
        Ok(products.unwrap_or_default())
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let req = self.request(Method::POST, "/api/products")?.json(product);
        let resp = self.send(req, "failed to create product").await?;
        decode_json(resp).await
    }

    /// The updated record in the response body is not relied on.
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<(), ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/api/products/{id}"))?
            .json(patch);
        self.send(req, "failed to update product").await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/api/products/{id}"))?;
        self.send(req, "failed to delete product").await?;
        Ok(())
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let req = self.request(Method::GET, "/api/orders")?;
        let resp = self.send(req, "failed to fetch orders").await?;
        let list: OrderList = decode_json(resp).await?;
        Ok(list.orders)
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, ClientError> {
        let req = self.request(Method::POST, "/api/orders")?.json(order);
        let resp = self.send(req, "failed to create order").await?;
        decode_json(resp).await
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: &OrderStatus,
    ) -> Result<(), ClientError> {
        let body = StatusUpdate {
            status: status.clone(),
        };
        let req = self
            .request(Method::PATCH, &format!("/api/orders/{order_id}/status"))?
            .json(&body);
        self.send(req, "failed to update order status").await?;
        Ok(())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let req = self.request(Method::GET, "/api/dashboard/stats")?;
        let resp = self.send(req, "failed to fetch dashboard stats").await?;
        decode_json(resp).await
    }
}

async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn api_error(status: StatusCode, resp: Response, fallback: &str) -> ClientError {
    let message = resp
        .bytes()
        .await
        .ok()
        .and_then(|b| serde_json::from_slice::<serde_json::Value>(&b).ok())
        .and_then(|body| error_message(&body))
        .unwrap_or_else(|| fallback.to_string());
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Store impls
// ---------------------------------------------------------------------------

#[async_trait]
impl OrderStore for AuthedClient {
    type Error = ClientError;

    async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        AuthedClient::list_orders(self).await
    }

    async fn update_status(&self, order_id: i64, status: &OrderStatus) -> Result<(), ClientError> {
        self.update_order_status(order_id, status).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, ClientError> {
        AuthedClient::create_order(self, order).await
    }
}

#[async_trait]
impl ProductStore for AuthedClient {
    type Error = ClientError;

    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        AuthedClient::list_products(self).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        AuthedClient::create_product(self, product).await
    }

    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<(), ClientError> {
        AuthedClient::update_product(self, id, patch).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        AuthedClient::delete_product(self, id).await
    }
}
