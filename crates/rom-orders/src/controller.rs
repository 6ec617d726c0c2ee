//! Order status controller.
//!
//! # Design
//!
//! The controller owns the client's cached copy of the order list and is the
//! only code that mutates it. Every transition goes through one guard,
//! [`OrderStatusController::guard`]:
//!
//! 1. **Terminal orders are frozen.** `delivered`/`cancelled` orders return
//!    [`LifecycleError::Terminal`] and nothing is sent.
//! 2. **Table moves only.** A target outside the row for the cached status
//!    returns [`LifecycleError::IllegalTransition`].
//!
//! The cache is patched only after the store confirms the update, and only
//! the `status` and `updated_at` fields change (no re-fetch). A failed store
//! call leaves the cache as it was; retrying is the caller's decision.
//!
//! Calls take `&mut self`, so two updates to the same order cannot overlap
//! through one controller; whichever call completes last is what the cache
//! shows.

use async_trait::async_trait;
use chrono::Utc;
use rom_schemas::{CreatedOrder, NewOrder, Order, OrderStatus};
use tracing::{info, warn};

use crate::draft::DraftOrder;
use crate::error::LifecycleError;
use crate::transitions::{next_statuses, Transition};

/// Remote order store (the backend's `/api/orders` endpoints).
#[async_trait]
pub trait OrderStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_orders(&self) -> Result<Vec<Order>, Self::Error>;

    async fn update_status(&self, order_id: i64, status: &OrderStatus)
        -> Result<(), Self::Error>;

    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder, Self::Error>;
}

/// The actions offered for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionChoices {
    pub order_id: i64,
    pub current: OrderStatus,
    pub options: &'static [Transition],
}

pub struct OrderStatusController<S> {
    store: S,
    orders: Vec<Order>,
}

impl<S: OrderStore> OrderStatusController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            orders: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Replace the cache with orders obtained elsewhere.
    pub fn seed(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// Replace the cache with the store's current list.
    pub async fn refresh(&mut self) -> Result<usize, LifecycleError<S::Error>> {
        let orders = self.store.list_orders().await.map_err(LifecycleError::Store)?;
        info!(count = orders.len(), "order cache refreshed");
        self.orders = orders;
        Ok(self.orders.len())
    }

    /// Offer the valid next statuses for an order in `current` status.
    ///
    /// Terminal statuses produce the non-actionable notice
    /// ([`LifecycleError::Terminal`]). Never mutates anything.
    pub fn request_transition(
        &self,
        order_id: i64,
        current: &OrderStatus,
    ) -> Result<TransitionChoices, LifecycleError<S::Error>> {
        Self::guard(order_id, current, None)?;
        Ok(TransitionChoices {
            order_id,
            current: current.clone(),
            options: next_statuses(current),
        })
    }

    /// Send `new_status` to the store and patch the cached order on success.
    pub async fn apply_transition(
        &mut self,
        order_id: i64,
        new_status: OrderStatus,
    ) -> Result<&Order, LifecycleError<S::Error>> {
        let current = self
            .order(order_id)
            .map(|o| o.status.clone())
            .ok_or(LifecycleError::UnknownOrder(order_id))?;

        if let Err(e) = Self::guard(order_id, &current, Some(&new_status)) {
            warn!(order_id, from = %current, to = %new_status, "transition refused");
            return Err(e);
        }

        if let Err(e) = self.store.update_status(order_id, &new_status).await {
            warn!(order_id, to = %new_status, error = %e, "status update failed; cache unchanged");
            return Err(LifecycleError::Store(e));
        }

        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(LifecycleError::UnknownOrder(order_id))?;
        order.status = new_status;
        order.updated_at = Utc::now();
        info!(order_id, from = %current, to = %order.status, "order status updated");
        Ok(order)
    }

    /// Cancel in one step, without offering choices first.
    pub async fn cancel(&mut self, order_id: i64) -> Result<&Order, LifecycleError<S::Error>> {
        self.apply_transition(order_id, OrderStatus::Cancelled).await
    }

    /// Submit a draft as a new order.
    pub async fn submit(
        &self,
        draft: &DraftOrder,
        user_id: Option<i64>,
    ) -> Result<CreatedOrder, LifecycleError<S::Error>> {
        let request = draft.to_request(user_id)?;
        let created = self
            .store
            .create_order(&request)
            .await
            .map_err(LifecycleError::Store)?;
        info!(
            order_id = created.id,
            lines = request.items.len(),
            total = %request.total_amount,
            "order created"
        );
        Ok(created)
    }

    // The single terminal/table guard shared by every transition path.
    fn guard(
        order_id: i64,
        current: &OrderStatus,
        target: Option<&OrderStatus>,
    ) -> Result<(), LifecycleError<S::Error>> {
        if current.is_terminal() {
            return Err(LifecycleError::Terminal {
                order_id,
                status: current.clone(),
            });
        }
        if let Some(to) = target {
            if !next_statuses(current).iter().any(|t| &t.status == to) {
                return Err(LifecycleError::IllegalTransition {
                    order_id,
                    from: current.clone(),
                    to: to.clone(),
                });
            }
        }
        Ok(())
    }
}
