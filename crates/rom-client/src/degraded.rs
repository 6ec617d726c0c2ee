//! Degraded mode for read calls.
//!
//! Under [`DegradedMode::Placeholder`], a remote failure while listing
//! products, listing orders or fetching dashboard stats is replaced by a
//! fixed sample set. The result is always tagged [`Origin::Placeholder`] and
//! a warning is logged. `NotAuthenticated` and validation errors are never
//! masked.

use chrono::Utc;
use rom_config::DegradedMode;
use rom_money::Money;
use rom_schemas::{DashboardStats, Order, OrderStatus, Product, ProductId};
use tracing::warn;

use crate::api::AuthedClient;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Live,
    Placeholder { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Fetched<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            origin: Origin::Live,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.origin, Origin::Placeholder { .. })
    }
}

fn degrade<T>(
    mode: DegradedMode,
    what: &'static str,
    result: Result<T, ClientError>,
    placeholder: impl FnOnce() -> T,
) -> Result<Fetched<T>, ClientError> {
    match result {
        Ok(value) => Ok(Fetched::live(value)),
        Err(e) if mode == DegradedMode::Placeholder && e.is_remote_failure() => {
            warn!(what, error = %e, "backend unavailable, serving placeholder data");
            Ok(Fetched {
                value: placeholder(),
                origin: Origin::Placeholder {
                    reason: e.to_string(),
                },
            })
        }
        Err(e) => Err(e),
    }
}

pub async fn fetch_products(
    client: &AuthedClient,
    mode: DegradedMode,
) -> Result<Fetched<Vec<Product>>, ClientError> {
    degrade(mode, "products", client.list_products().await, placeholder_products)
}

pub async fn fetch_orders(
    client: &AuthedClient,
    mode: DegradedMode,
) -> Result<Fetched<Vec<Order>>, ClientError> {
    degrade(mode, "orders", client.list_orders().await, placeholder_orders)
}

pub async fn fetch_dashboard_stats(
    client: &AuthedClient,
    mode: DegradedMode,
) -> Result<Fetched<DashboardStats>, ClientError> {
    degrade(mode, "dashboard stats", client.dashboard_stats().await, placeholder_stats)
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

const SAMPLE_MENU: [(&str, &str, i64); 6] = [
    ("1", "Hambúrguer Clássico", 2_590),
    ("2", "Pizza Margherita", 3_500),
    ("3", "Batata Frita", 1_250),
    ("4", "Refrigerante", 800),
    ("5", "Salada Caesar", 1_890),
    ("6", "Sanduíche Natural", 1_500),
];

pub fn placeholder_products() -> Vec<Product> {
    SAMPLE_MENU
        .iter()
        .map(|(id, name, cents)| Product {
            id: ProductId::Text((*id).to_string()),
            name: (*name).to_string(),
            price: Money::from_cents(*cents),
            created_at: None,
            updated_at: None,
        })
        .collect()
}

/// Two orders stamped with the current time.
pub fn placeholder_orders() -> Vec<Order> {
    let now = Utc::now();
    [
        (1, 4_590, OrderStatus::Pending),
        (2, 6_750, OrderStatus::Confirmed),
    ]
    .into_iter()
    .map(|(id, cents, status)| Order {
        id,
        total_amount: Money::from_cents(cents),
        status,
        created_at: now,
        updated_at: now,
        items: None,
    })
    .collect()
}

pub fn placeholder_stats() -> DashboardStats {
    DashboardStats {
        today_sales: Money::from_cents(284_750),
        sales_change: 12.5,
        total_sales: Money::from_cents(4_532_080),
        today_orders: 127,
        orders_change: 8.2,
        average_ticket: Money::from_cents(2_242),
        ticket_change: -2.1,
        total_orders: 2048,
        cancelled_orders: 23,
    }
}
