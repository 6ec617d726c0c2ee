//! Wire types for the restaurant backend REST API.
//!
//! Every request and response body the client exchanges with the backend is
//! defined here. Field names follow the backend's JSON exactly (snake_case
//! for records, camelCase for dashboard stats).

use chrono::{DateTime, Utc};
use rom_money::Money;
use serde::{Deserialize, Serialize};

mod error_body;
mod status;

pub use error_body::error_message;
pub use status::OrderStatus;

// ---------------------------------------------------------------------------
// Records owned by the backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Product identifiers arrive as numbers from some endpoints and strings
/// from others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Num(i64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Num(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => ProductId::Num(n),
            Err(_) => ProductId::Text(s.trim().to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A line item stored on a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/login` and `POST /api/auth/register`.
#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
}

/// Partial product update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub total_amount: Money,
    /// Omitted from the body when no user is logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<REDACTED>")
            .field("user", &self.user)
            .finish()
    }
}

/// Body of `GET /api/orders`. A missing `orders` field reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Body of `POST /api/orders`; only the assigned id is relied on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
}

/// Body of `GET /api/dashboard/stats`.
///
/// `*_change` fields are percentages relative to the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_sales: Money,
    pub sales_change: f64,
    pub total_sales: Money,
    pub today_orders: i64,
    pub orders_change: f64,
    pub average_ticket: Money,
    pub ticket_change: f64,
    pub total_orders: i64,
    pub cancelled_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_id_accepts_number_or_string() {
        let a: Product =
            serde_json::from_value(json!({"id": 3, "name": "Batata Frita", "price": 12.5}))
                .unwrap();
        let b: Product =
            serde_json::from_value(json!({"id": "3", "name": "Batata Frita", "price": "12.50"}))
                .unwrap();
        assert_eq!(a.id, ProductId::Num(3));
        assert_eq!(b.id, ProductId::Text("3".to_string()));
        assert_eq!(a.price, b.price);
        assert_eq!(a.id.to_string(), b.id.to_string());
    }

    #[test]
    fn product_patch_skips_absent_fields() {
        let patch = ProductPatch {
            name: Some("Pizza".to_string()),
            price: None,
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"name": "Pizza"}));
    }

    #[test]
    fn new_order_omits_absent_user_id() {
        let order = NewOrder {
            items: vec![],
            total_amount: Money::from_cents(800),
            user_id: None,
        };
        let body = serde_json::to_value(&order).unwrap();
        assert!(body.get("user_id").is_none());
        assert_eq!(body, json!({"items": [], "total_amount": 8.0}));

        let with_user = NewOrder {
            user_id: Some(3),
            ..order
        };
        assert_eq!(serde_json::to_value(&with_user).unwrap()["user_id"], json!(3));
    }

    #[test]
    fn order_list_without_orders_field_is_empty() {
        let list: OrderList = serde_json::from_value(json!({})).unwrap();
        assert!(list.orders.is_empty());
    }

    #[test]
    fn order_decodes_with_unknown_status() {
        let order: Order = serde_json::from_value(json!({
            "id": 9,
            "total_amount": 45.9,
            "status": "on_hold",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Unrecognized("on_hold".to_string()));
        assert!(order.items.is_none());
    }

    #[test]
    fn dashboard_stats_use_camel_case() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "todaySales": 2847.5,
            "salesChange": 12.5,
            "totalSales": 45320.8,
            "todayOrders": 127,
            "ordersChange": 8.2,
            "averageTicket": 22.42,
            "ticketChange": -2.1,
            "totalOrders": 2048,
            "cancelledOrders": 23
        }))
        .unwrap();
        assert_eq!(stats.today_orders, 127);
        assert_eq!(stats.average_ticket, Money::from_cents(2_242));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let c = Credentials {
            username: "chef".to_string(),
            password: "hunter22".to_string(),
        };
        let dbg = format!("{c:?}");
        assert!(dbg.contains("chef"));
        assert!(!dbg.contains("hunter22"));
    }
}
