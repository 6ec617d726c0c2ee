use rom_schemas::OrderStatus;

/// Errors raised while composing a draft order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Submission attempted with no line items.
    Empty,
    /// No line with this id exists in the draft.
    UnknownLine(String),
    /// `quantity × unit price` does not fit the money representation.
    LineOverflow { product_name: String, quantity: u32 },
    /// A line's quantity would exceed `u32::MAX`.
    QuantityOverflow { product_name: String },
    /// The sum of line totals does not fit the money representation.
    TotalOverflow,
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::Empty => write!(f, "add at least one item to the order"),
            DraftError::UnknownLine(id) => write!(f, "no line item with id {id} in the draft"),
            DraftError::LineOverflow {
                product_name,
                quantity,
            } => write!(
                f,
                "line total overflow for {quantity} x {product_name}"
            ),
            DraftError::QuantityOverflow { product_name } => {
                write!(f, "quantity limit reached for {product_name}")
            }
            DraftError::TotalOverflow => write!(f, "order total overflow"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Errors returned by the order status controller.
///
/// `E` is the store's own error type; the controller never inspects it.
#[derive(Debug)]
pub enum LifecycleError<E> {
    /// The order is `delivered` or `cancelled`; nothing was changed.
    Terminal { order_id: i64, status: OrderStatus },
    /// The target status is not in the table row for the current status.
    IllegalTransition {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// The order is not in the local cache, so the guard cannot be evaluated.
    UnknownOrder(i64),
    Draft(DraftError),
    /// The remote store failed; the cache is unchanged and the call may be retried.
    Store(E),
}

impl<E> LifecycleError<E> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleError::Terminal { .. })
    }
}

impl<E: std::fmt::Display> std::fmt::Display for LifecycleError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::Terminal { order_id, status } => write!(
                f,
                "order #{order_id} is already in a final status ({status})"
            ),
            LifecycleError::IllegalTransition { order_id, from, to } => write!(
                f,
                "order #{order_id} cannot move from {from} to {to}"
            ),
            LifecycleError::UnknownOrder(id) => write!(f, "order #{id} is not loaded"),
            LifecycleError::Draft(e) => write!(f, "{e}"),
            LifecycleError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl<E> std::error::Error for LifecycleError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifecycleError::Store(e) => Some(e),
            LifecycleError::Draft(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<DraftError> for LifecycleError<E> {
    fn from(e: DraftError) -> Self {
        LifecycleError::Draft(e)
    }
}
