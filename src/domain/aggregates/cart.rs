//! Cart Aggregate

use crate::domain::events::{Direction, Signal};
use crate::domain::value_objects::Money;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Hard per-line quantity cap. Mutations clamp here instead of failing.
pub const QUANTITY_CAP: u32 = 99;

/// Default upper bound for the add-to-cart picker widget. Adapter-side only;
/// never enforced on stored quantities.
pub const PICKER_CAP: u32 = 10;

/// One product-and-quantity line. Serialized field names match the stored
/// cart format (`id`, `name`, `price`, `image`, `quantity`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Defensive check against corrupted persisted state: a line is orderable
    /// when it has a name, a positive price and at least one unit.
    pub(crate) fn is_orderable(&self) -> bool {
        !self.name.trim().is_empty() && self.price.is_positive() && self.quantity > 0
    }
}

/// Ordered sequence of line items, at most one per product id. Insertion
/// order is display order. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (the nav-badge count).
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Owned copy of the current lines, for display or order construction.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Add units of a product. An existing line with the same id absorbs the
    /// quantity; otherwise a new line is appended. Both paths clamp at
    /// [`QUANTITY_CAP`] and report `CapReached` when clamping occurs.
    ///
    /// Callers supply `quantity >= 1`; zero is lifted to one.
    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        quantity: u32,
    ) -> Signal {
        let id = id.into();
        let quantity = quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            let summed = existing.quantity.saturating_add(quantity);
            if summed > QUANTITY_CAP {
                existing.quantity = QUANTITY_CAP;
                return Signal::CapReached;
            }
            existing.quantity = summed;
            return Signal::ItemAdded(existing.name.clone());
        }

        let name = name.into();
        let clamped = quantity.min(QUANTITY_CAP);
        self.items.push(LineItem {
            id,
            name: name.clone(),
            price,
            image: image.into(),
            quantity: clamped,
        });
        if clamped < quantity {
            Signal::CapReached
        } else {
            Signal::ItemAdded(name)
        }
    }

    /// Apply a quantity delta to the line at `index`. A result of zero or
    /// less removes the line; above the cap clamps.
    pub fn change_quantity(&mut self, index: usize, delta: i32) -> Result<Signal> {
        let item = self.items.get_mut(index).ok_or(CoreError::NotFound)?;
        let next = i64::from(item.quantity) + i64::from(delta);

        if next <= 0 {
            let name = item.name.clone();
            self.items.remove(index);
            return Ok(Signal::ItemRemoved(name));
        }
        if next > i64::from(QUANTITY_CAP) {
            item.quantity = QUANTITY_CAP;
            return Ok(Signal::CapReached);
        }
        item.quantity = next as u32;
        Ok(Signal::QuantityUpdated(if delta > 0 {
            Direction::Increased
        } else {
            Direction::Decreased
        }))
    }

    /// Remove the line at `index` unconditionally. Any confirmation dialog
    /// happens before this call, on the adapter side.
    pub fn remove_item(&mut self, index: usize) -> Result<Signal> {
        if index >= self.items.len() {
            return Err(CoreError::NotFound);
        }
        let removed = self.items.remove(index);
        Ok(Signal::ItemRemoved(removed.name))
    }

    /// Empty the cart. On an already-empty cart this is a signal, not an error.
    pub fn clear(&mut self) -> Signal {
        if self.items.is_empty() {
            return Signal::AlreadyEmpty;
        }
        self.items.clear();
        Signal::CartCleared
    }

    pub(crate) fn reset(&mut self) {
        self.items.clear();
    }
}
