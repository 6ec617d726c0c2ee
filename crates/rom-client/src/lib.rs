//! rom-client
//!
//! HTTP side of the restaurant client:
//! - `api`: reqwest client for the backend REST API, plus [`AuthedClient`],
//!   the bearer-token view that implements the order and product stores
//! - `session`: explicit login session persisted to a JSON file
//! - `credentials`: login/register form checks run before any request
//! - `degraded`: opt-in placeholder data for read calls when the backend fails
//!
//! Nothing here retries. Every failure is returned to the caller as a
//! [`ClientError`].

mod api;
mod credentials;
mod degraded;
mod error;
mod session;

pub use api::{ApiClient, AuthedClient};
pub use credentials::{sanitize_username, validate_credentials};
pub use degraded::{
    fetch_dashboard_stats, fetch_orders, fetch_products, placeholder_orders,
    placeholder_products, placeholder_stats, Fetched, Origin,
};
pub use error::ClientError;
pub use session::{PersistedSession, Session, SessionStore};

pub use rom_config::DegradedMode;
