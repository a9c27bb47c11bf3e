//! Derived order totals.
//!
//! [`compute_totals`] is a pure function of the line items: no caching, no
//! side effects. Callers recompute after every cart mutation so the figures
//! can never go stale.

use crate::domain::aggregates::cart::LineItem;
use crate::domain::value_objects::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 8% sales tax.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Flat $2.99 delivery fee, waived on an empty cart.
fn delivery_fee() -> Money {
    Money::from_cents(299)
}

/// Monetary breakdown derived from a cart or order snapshot. Never persisted
/// on its own, only as part of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

/// Subtotal, tax and delivery fee for the given lines. An empty slice yields
/// all-zero totals, including a waived delivery fee.
pub fn compute_totals(items: &[LineItem]) -> Totals {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let delivery_fee = if subtotal.is_positive() {
        delivery_fee()
    } else {
        Money::ZERO
    };
    let tax = Money::new(subtotal.amount() * tax_rate());
    let total = subtotal + tax + delivery_fee;
    Totals {
        subtotal,
        tax,
        delivery_fee,
        total,
    }
}
