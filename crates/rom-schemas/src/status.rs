use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of an order, as stored by the backend.
///
/// Unknown wire values decode to [`OrderStatus::Unrecognized`] instead of
/// failing, so one odd record never breaks a whole order listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    /// **Terminal.**
    Delivered,
    /// **Terminal.**
    Cancelled,
    Unrecognized(String),
}

impl OrderStatus {
    /// All known statuses in lifecycle order.
    pub const KNOWN: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Returns `true` if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unrecognized(raw) => raw,
        }
    }

    /// Exact wire match. `"Delivered"` is not `delivered`; it stays
    /// unrecognized and is treated like `pending`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => OrderStatus::Pending,
            "confirmed" => OrderStatus::Confirmed,
            "preparing" => OrderStatus::Preparing,
            "ready" => OrderStatus::Ready,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Unrecognized(raw.to_string()),
        }
    }

    /// Display label shown to staff.
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::Confirmed => "Confirmado",
            OrderStatus::Preparing => "Preparando",
            OrderStatus::Ready => "Pronto",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::parse(&raw))
    }
}
