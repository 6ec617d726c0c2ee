//! rom-orders
//!
//! Order lifecycle for the restaurant client:
//! - `transitions`: static table of permitted next statuses per status
//! - `draft`: client-side draft order and its line-item aggregation
//! - `controller`: status controller owning the cached order list and
//!   applying transitions through an [`OrderStore`]
//!
//! The store is the only side-effecting collaborator; everything else here
//! is pure and deterministic.

mod controller;
mod draft;
mod error;
mod transitions;

pub use controller::{OrderStatusController, OrderStore, TransitionChoices};
pub use draft::{line_total, order_total, DraftLine, DraftOrder, LineKey};
pub use error::{DraftError, LifecycleError};
pub use transitions::{is_permitted, next_statuses, Transition};

pub use rom_schemas::{CreatedOrder, NewOrder, Order, OrderStatus};
