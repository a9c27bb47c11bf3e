//! Storage-backed cart store.
//!
//! One [`CartStore`] per session, built around an injected [`Storage`]. Every
//! mutation runs the aggregate operation, rewrites the whole serialized cart,
//! and hands the resulting [`Signal`] back to the adapter. Totals are always
//! recomputed from the live items, never cached.

use crate::domain::aggregates::cart::{Cart, LineItem};
use crate::domain::aggregates::order::Order;
use crate::domain::events::Signal;
use crate::domain::pricing::{compute_totals, Totals};
use crate::domain::value_objects::Money;
use crate::storage::{read_json, write_json, Storage, CART_KEY, ORDERS_KEY};
use crate::Result;

#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    cart: Cart,
}

impl<S: Storage> CartStore<S> {
    /// Load the persisted cart, treating an absent key as an empty cart.
    pub fn open(storage: S) -> Result<Self> {
        let cart = read_json(&storage, CART_KEY)?.unwrap_or_default();
        Ok(Self { storage, cart })
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total units across all lines, for the nav badge.
    pub fn unit_count(&self) -> u32 {
        self.cart.unit_count()
    }

    /// Fresh copy of the current lines. Adapters derive display indices from
    /// this, never from state held across mutations.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.cart.snapshot()
    }

    /// Totals for the current cart contents, recomputed on every call.
    pub fn totals(&self) -> Totals {
        compute_totals(self.cart.items())
    }

    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<Signal> {
        let signal = self.cart.add_item(id, name, price, image, quantity);
        self.persist()?;
        tracing::debug!(lines = self.cart.len(), units = self.cart.unit_count(), "cart add");
        Ok(signal)
    }

    /// Apply a quantity delta to the line at `index`. Persists on every
    /// successful call, whichever branch the quantity lands in.
    pub fn change_quantity(&mut self, index: usize, delta: i32) -> Result<Signal> {
        let signal = self.cart.change_quantity(index, delta)?;
        self.persist()?;
        tracing::debug!(index, delta, "cart quantity change");
        Ok(signal)
    }

    pub fn remove_item(&mut self, index: usize) -> Result<Signal> {
        let signal = self.cart.remove_item(index)?;
        self.persist()?;
        tracing::debug!(index, "cart remove");
        Ok(signal)
    }

    /// Empty the cart. `AlreadyEmpty` leaves the persisted value untouched.
    pub fn clear(&mut self) -> Result<Signal> {
        let signal = self.cart.clear();
        if signal == Signal::CartCleared {
            self.persist()?;
            tracing::debug!("cart cleared");
        }
        Ok(signal)
    }

    /// The append-only order log. Absent key reads as an empty log.
    pub fn orders(&self) -> Result<Vec<Order>> {
        Ok(read_json(&self.storage, ORDERS_KEY)?.unwrap_or_default())
    }

    /// Append `order` to the log, then clear and persist the cart.
    ///
    /// The log write comes first: if it fails the cart is left intact and the
    /// caller can retry, so a half-submitted order never costs the customer
    /// their cart.
    pub(crate) fn commit_order(&mut self, order: &Order) -> Result<()> {
        let mut log = self.orders()?;
        log.push(order.clone());
        write_json(&mut self.storage, ORDERS_KEY, &log)?;
        self.cart.reset();
        self.persist()?;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        write_json(&mut self.storage, CART_KEY, &self.cart)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use crate::CoreError;

    fn price(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn store_with_items() -> CartStore<MemoryStore> {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store
            .add_item("burger", "Flame Burger", price(1000), "burger.png", 2)
            .unwrap();
        store
            .add_item("fries", "Fries", price(500), "fries.png", 1)
            .unwrap();
        store
    }

    #[test]
    fn test_open_treats_absent_key_as_empty() {
        let store = CartStore::open(MemoryStore::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.totals(), compute_totals(&[]));
    }

    #[test]
    fn test_mutations_persist_to_storage() {
        let mut store = store_with_items();
        store.change_quantity(0, 1).unwrap();

        let raw = store.storage.get(CART_KEY).unwrap().unwrap();
        let persisted: Cart = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.items()[0].quantity, 3);
    }

    #[test]
    fn test_totals_track_every_mutation() {
        let mut store = store_with_items();
        assert_eq!(store.totals().subtotal, price(2500));
        store.remove_item(1).unwrap();
        assert_eq!(store.totals().subtotal, price(2000));
    }

    #[test]
    fn test_reopen_restores_cart() {
        let mut backing = MemoryStore::new();
        {
            let mut store = CartStore::open(&mut backing).unwrap();
            store
                .add_item("taco", "Taco", price(350), "", 4)
                .unwrap();
        }
        let store = CartStore::open(&mut backing).unwrap();
        assert_eq!(store.unit_count(), 4);
        assert_eq!(store.items()[0].name, "Taco");
    }

    #[test]
    fn test_clear_on_empty_does_not_touch_storage() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        assert_eq!(store.clear().unwrap(), Signal::AlreadyEmpty);
        assert!(store.storage.get(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_cart_value_surfaces_as_storage_error() {
        let mut backing = MemoryStore::new();
        backing.set(CART_KEY, "{oops").unwrap();
        let err = CartStore::open(backing).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::Corrupt { ref key, .. }) if key == CART_KEY
        ));
    }
}
