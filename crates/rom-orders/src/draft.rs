//! Draft order: the not-yet-submitted set of line items a user assembles
//! before creating an order.
//!
//! Invariants held after every mutation:
//! - every line has `quantity >= 1`
//! - every line's `total == quantity × unit_price`
//! - at most one line per [`LineKey`] match
//! - the order total fits in [`Money`]; an edit that would overflow it is
//!   rejected and leaves the draft unchanged

use rom_money::Money;
use rom_schemas::{NewOrder, NewOrderItem, Product, ProductId};
use uuid::Uuid;

use crate::error::DraftError;

/// `quantity × unit_price`.
pub fn line_total(quantity: u32, unit_price: Money) -> Option<Money> {
    unit_price.checked_mul_qty(quantity)
}

/// Sum of line totals; zero for an empty slice, `None` on overflow.
pub fn order_total(lines: &[DraftLine]) -> Option<Money> {
    lines
        .iter()
        .try_fold(Money::ZERO, |acc, l| acc.checked_add(l.total))
}

/// How an added product is matched against existing lines.
///
/// `ProductName` is the default, so two distinct products sharing a name
/// merge into one line. Use `ProductId` when names are not unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineKey {
    #[default]
    ProductName,
    ProductId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    /// Locally generated; never sent to the backend.
    pub id: String,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total: Money,
}

impl DraftLine {
    fn matches(&self, key: LineKey, product: &Product) -> bool {
        match key {
            LineKey::ProductName => self.product_name == product.name,
            LineKey::ProductId => self.product_id.as_ref() == Some(&product.id),
        }
    }

    fn total_at(&self, quantity: u32) -> Result<Money, DraftError> {
        line_total(quantity, self.unit_price).ok_or_else(|| DraftError::LineOverflow {
            product_name: self.product_name.clone(),
            quantity,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DraftOrder {
    key: LineKey,
    lines: Vec<DraftLine>,
    // Running sum of line totals, kept in step with `lines`.
    total: Money,
}

impl DraftOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_key(key: LineKey) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    pub fn line_key(&self) -> LineKey {
        self.key
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn line(&self, line_id: &str) -> Option<&DraftLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Add one unit of `product`.
    ///
    /// A matching line has its quantity incremented and total recomputed;
    /// otherwise a new line with quantity 1 is appended. Returns the line id.
    pub fn add_product(&mut self, product: &Product) -> Result<String, DraftError> {
        let key = self.key;
        if let Some(idx) = self.lines.iter().position(|l| l.matches(key, product)) {
            let next = self.lines[idx].quantity.checked_add(1).ok_or_else(|| {
                DraftError::QuantityOverflow {
                    product_name: self.lines[idx].product_name.clone(),
                }
            })?;
            self.update_line(idx, next)?;
            return Ok(self.lines[idx].id.clone());
        }

        self.total = self.retotal(Money::ZERO, product.price)?;
        let line = DraftLine {
            id: Uuid::new_v4().to_string(),
            product_id: Some(product.id.clone()),
            product_name: product.name.clone(),
            quantity: 1,
            unit_price: product.price,
            total: product.price,
        };
        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Set a line's quantity. Zero or below removes the line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> Result<(), DraftError> {
        if quantity <= 0 {
            return self.remove(line_id);
        }
        let idx = self.position(line_id)?;
        let quantity = u32::try_from(quantity).map_err(|_| DraftError::QuantityOverflow {
            product_name: self.lines[idx].product_name.clone(),
        })?;
        self.update_line(idx, quantity)
    }

    /// Change a line's quantity by `delta` (the +/- buttons).
    pub fn adjust_quantity(&mut self, line_id: &str, delta: i64) -> Result<(), DraftError> {
        let current = self
            .line(line_id)
            .map(|l| i64::from(l.quantity))
            .ok_or_else(|| DraftError::UnknownLine(line_id.to_string()))?;
        self.set_quantity(line_id, current.saturating_add(delta))
    }

    pub fn remove(&mut self, line_id: &str) -> Result<(), DraftError> {
        let idx = self.position(line_id)?;
        self.total = self.retotal(self.lines[idx].total, Money::ZERO)?;
        self.lines.remove(idx);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Money::ZERO;
    }

    fn position(&self, line_id: &str) -> Result<usize, DraftError> {
        self.lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| DraftError::UnknownLine(line_id.to_string()))
    }

    /// Order total after replacing a line total of `old` with `new`.
    fn retotal(&self, old: Money, new: Money) -> Result<Money, DraftError> {
        self.total
            .checked_sub(old)
            .and_then(|t| t.checked_add(new))
            .ok_or(DraftError::TotalOverflow)
    }

    // Both totals are checked before anything is written.
    fn update_line(&mut self, idx: usize, quantity: u32) -> Result<(), DraftError> {
        let line = &self.lines[idx];
        let new_line_total = line.total_at(quantity)?;
        let total = self.retotal(line.total, new_line_total)?;
        let line = &mut self.lines[idx];
        line.quantity = quantity;
        line.total = new_line_total;
        self.total = total;
        Ok(())
    }

    /// Build the `POST /api/orders` body. After submission the backend's
    /// total is authoritative.
    pub fn to_request(&self, user_id: Option<i64>) -> Result<NewOrder, DraftError> {
        if self.lines.is_empty() {
            return Err(DraftError::Empty);
        }
        let items = self
            .lines
            .iter()
            .map(|l| NewOrderItem {
                product_name: l.product_name.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                total_price: l.total,
            })
            .collect();
        Ok(NewOrder {
            items,
            total_amount: self.total(),
            user_id,
        })
    }
}
