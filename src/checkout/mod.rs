//! Checkout: form validation and order construction.
//!
//! [`submit`] is the whole flow: precondition ladder, totals, order id,
//! order-log append, cart clear. Validation failures leave the cart exactly
//! as it was.

pub mod validate;

use crate::domain::aggregates::cart::LineItem;
use crate::domain::aggregates::order::{CustomerInfo, Order};
use crate::domain::pricing::compute_totals;
use crate::storage::Storage;
use crate::store::CartStore;
use crate::{CoreError, Result};

/// Lines above this many units trigger the caller-owned "are you sure"
/// confirmation before an order goes through.
pub const HIGH_QUANTITY_THRESHOLD: u32 = 50;

#[derive(Clone, Copy, Debug, Default)]
pub struct SubmitOptions {
    /// Set after the adapter's high-quantity dialog was affirmed; without it,
    /// carts containing lines over [`HIGH_QUANTITY_THRESHOLD`] are refused
    /// with [`CoreError::NeedsConfirmation`].
    pub high_quantity_confirmed: bool,
}

/// Build and persist an order from the current cart and the checkout form.
///
/// Preconditions are checked in order and the first failure short-circuits:
/// non-empty cart, orderable lines, valid form (all field errors aggregated),
/// high-quantity affirmation. On success the order is appended to the log
/// first and only then is the cart cleared, so a failed write never loses
/// both.
pub fn submit<S: Storage>(
    store: &mut CartStore<S>,
    customer: &CustomerInfo,
    opts: SubmitOptions,
) -> Result<Order> {
    if store.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    if let Some(bad) = store.items().iter().find(|i| !i.is_orderable()) {
        tracing::warn!(id = %bad.id, "unorderable line in persisted cart");
        return Err(CoreError::InvalidCartItem(bad.id.clone()));
    }

    let errors = validate::validate_customer(customer);
    if !errors.is_empty() {
        return Err(CoreError::FormInvalid(errors));
    }

    let heavy: Vec<String> = store
        .items()
        .iter()
        .filter(|i| i.quantity > HIGH_QUANTITY_THRESHOLD)
        .map(|i| i.name.clone())
        .collect();
    if !heavy.is_empty() && !opts.high_quantity_confirmed {
        return Err(CoreError::NeedsConfirmation(heavy));
    }

    let items: Vec<LineItem> = store.snapshot();
    let totals = compute_totals(&items);
    let order = Order::place(items, customer.clone(), totals);

    store
        .commit_order(&order)
        .map_err(|e| CoreError::Submission(e.to_string()))?;

    tracing::info!(order_id = %order.id(), total = %order.totals().total, "order confirmed");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::order::DeliveryTime;
    use crate::domain::value_objects::Money;
    use crate::storage::{MemoryStore, Storage, StorageError, ORDERS_KEY};
    use crate::Field;

    fn valid_customer() -> CustomerInfo {
        CustomerInfo {
            full_name: "Dana O'Neil".into(),
            phone: "(555) 123-4567".into(),
            email: "dana@example.com".into(),
            address: "12 Ember Street, Apt 4".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62704".into(),
            special_instructions: String::new(),
            delivery_time: DeliveryTime::Asap,
            payment_method: "card".into(),
        }
    }

    fn store_with_cart() -> CartStore<MemoryStore> {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store
            .add_item("burger", "Flame Burger", Money::from_cents(1000), "b.png", 2)
            .unwrap();
        store
            .add_item("fries", "Fries", Money::from_cents(500), "f.png", 1)
            .unwrap();
        store
    }

    #[test]
    fn test_empty_cart_never_writes_an_order() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        let err = submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_phone_fails_and_cart_survives() {
        let mut store = store_with_cart();
        let before = store.snapshot();
        let customer = CustomerInfo {
            phone: "123".into(),
            ..valid_customer()
        };
        let err = submit(&mut store, &customer, SubmitOptions::default()).unwrap_err();
        match err {
            CoreError::FormInvalid(errors) => {
                assert!(errors.iter().any(|e| e.field == Field::Phone));
            }
            other => panic!("expected FormInvalid, got {other:?}"),
        }
        assert_eq!(store.snapshot(), before);
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn test_successful_submit_clears_cart_and_appends_order() {
        let mut store = store_with_cart();
        let snapshot = store.snapshot();
        let order = submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap();

        assert!(store.is_empty());
        let log = store.orders().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].items(), snapshot.as_slice());
        assert_eq!(log[0].id(), order.id());
        // 25.00 subtotal + 2.00 tax + 2.99 delivery
        assert_eq!(order.totals().total, Money::from_cents(2999));
    }

    #[test]
    fn test_orders_accumulate_append_only() {
        let mut store = store_with_cart();
        submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap();
        store
            .add_item("taco", "Taco", Money::from_cents(350), "t.png", 1)
            .unwrap();
        submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap();
        assert_eq!(store.orders().unwrap().len(), 2);
    }

    #[test]
    fn test_high_quantity_needs_affirmation() {
        let mut store = CartStore::open(MemoryStore::new()).unwrap();
        store
            .add_item("wings", "Wings", Money::from_cents(899), "w.png", 60)
            .unwrap();

        let err = submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::NeedsConfirmation(ref names) if names == &["Wings"]));
        assert!(!store.is_empty());

        let order = submit(
            &mut store,
            &valid_customer(),
            SubmitOptions {
                high_quantity_confirmed: true,
            },
        )
        .unwrap();
        assert_eq!(order.items()[0].quantity, 60);
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupted_line_is_refused() {
        let mut backing = MemoryStore::new();
        backing
            .set(
                "cart",
                r#"[{"id":"x","name":"","price":"1.00","image":"","quantity":1}]"#,
            )
            .unwrap();
        let mut store = CartStore::open(backing).unwrap();
        let err = submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCartItem(ref id) if id == "x"));
    }

    /// Storage that accepts the cart key but refuses the order log, to pin
    /// down the write ordering.
    struct NoOrderLog(MemoryStore);

    impl Storage for NoOrderLog {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.0.get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if key == ORDERS_KEY {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.0.set(key, value)
        }
        fn remove(&mut self, key: &str) -> std::result::Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_failed_log_write_leaves_cart_intact() {
        let mut store = CartStore::open(NoOrderLog(MemoryStore::new())).unwrap();
        store
            .add_item("burger", "Flame Burger", Money::from_cents(1000), "b.png", 2)
            .unwrap();
        let err = submit(&mut store, &valid_customer(), SubmitOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::Submission(_)));
        assert_eq!(store.unit_count(), 2);
    }
}
