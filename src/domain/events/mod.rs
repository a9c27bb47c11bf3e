//! Signals the core raises for the presentation adapter.
//!
//! Cart operations return their signal directly; [`checkout_signals`] flattens
//! a submit outcome into the signals an adapter would render. Confirmation
//! dialogs and view routing stay on the adapter side.

use crate::checkout::validate::Field;
use crate::domain::aggregates::order::Order;
use crate::{CoreError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increased,
    Decreased,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Item added to the cart (or merged into an existing line).
    ItemAdded(String),
    /// Item left the cart, either explicitly or by its quantity reaching zero.
    ItemRemoved(String),
    QuantityUpdated(Direction),
    /// Quantity was clamped at the per-line cap. Clamped success, not a failure.
    CapReached,
    CartCleared,
    /// `clear` on an empty cart. Signal only, nothing changed.
    AlreadyEmpty,
    OrderConfirmed(Box<Order>),
    ValidationError { field: Field, message: String },
    SubmissionError(String),
}

/// Signals an adapter renders for a checkout attempt: one `ValidationError`
/// per failed field, or a single confirmation/submission signal.
pub fn checkout_signals(outcome: &Result<Order>) -> Vec<Signal> {
    match outcome {
        Ok(order) => vec![Signal::OrderConfirmed(Box::new(order.clone()))],
        Err(CoreError::FormInvalid(errors)) => errors
            .iter()
            .map(|e| Signal::ValidationError {
                field: e.field,
                message: e.message.clone(),
            })
            .collect(),
        Err(other) => vec![Signal::SubmissionError(other.to_string())],
    }
}
