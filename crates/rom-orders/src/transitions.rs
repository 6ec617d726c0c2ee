//! Status transition table.
//!
//! ```text
//!   pending ──► confirmed ──► preparing ──► ready ──► delivered (term.)
//!      │            │             │           │
//!      └────────────┴─────────────┴───────────┴────► cancelled (term.)
//! ```
//!
//! Each live status offers exactly two actions: advance one step, or cancel.
//! A status the table does not recognise gets the `pending` actions.

use rom_schemas::OrderStatus;

/// One permitted move out of a status, with the action label shown to staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: OrderStatus,
    pub label: &'static str,
}

const fn to(status: OrderStatus, label: &'static str) -> Transition {
    Transition { status, label }
}

static FROM_PENDING: [Transition; 2] = [
    to(OrderStatus::Confirmed, "Confirmar"),
    to(OrderStatus::Cancelled, "Cancelar"),
];

static FROM_CONFIRMED: [Transition; 2] = [
    to(OrderStatus::Preparing, "Preparando"),
    to(OrderStatus::Cancelled, "Cancelar"),
];

static FROM_PREPARING: [Transition; 2] = [
    to(OrderStatus::Ready, "Pronto"),
    to(OrderStatus::Cancelled, "Cancelar"),
];

static FROM_READY: [Transition; 2] = [
    to(OrderStatus::Delivered, "Entregue"),
    to(OrderStatus::Cancelled, "Cancelar"),
];

/// Ordered set of valid next statuses for `current`.
///
/// Terminal statuses return an empty slice.
pub fn next_statuses(current: &OrderStatus) -> &'static [Transition] {
    match current {
        OrderStatus::Pending | OrderStatus::Unrecognized(_) => &FROM_PENDING,
        OrderStatus::Confirmed => &FROM_CONFIRMED,
        OrderStatus::Preparing => &FROM_PREPARING,
        OrderStatus::Ready => &FROM_READY,
        OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
}

/// `true` if `to` is in the table row for `from`.
pub fn is_permitted(from: &OrderStatus, to: &OrderStatus) -> bool {
    next_statuses(from).iter().any(|t| &t.status == to)
}
