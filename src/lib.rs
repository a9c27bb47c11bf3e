//! FoodHouse Storefront Core
//!
//! Cart, checkout and order logic for the FoodHouse food-ordering site.
//!
//! ## Features
//! - Cart state machine (merge-by-id, quantity caps, index addressing)
//! - Derived totals (subtotal, tax, delivery fee) with exact decimal arithmetic
//! - Checkout form validation and format-as-you-type normalizers
//! - Immutable order construction with an append-only order log
//! - Pluggable key-value persistence (in-memory or file-backed)
//!
//! Rendering, confirmation dialogs and navigation belong to a presentation
//! adapter; the core reports typed [`Signal`]s and errors and never touches
//! any UI surface.

pub mod checkout;
pub mod domain;
pub mod storage;
pub mod store;

pub use crate::checkout::validate::{Field, FieldError};
pub use crate::domain::aggregates::cart::{Cart, LineItem, QUANTITY_CAP};
pub use crate::domain::aggregates::order::{CustomerInfo, DeliveryTime, Order, OrderStatus};
pub use crate::domain::events::{Direction, Signal};
pub use crate::domain::pricing::{compute_totals, Totals};
pub use crate::domain::value_objects::{Money, OrderId};
pub use crate::storage::{JsonFileStore, MemoryStore, Storage, StorageError};
pub use crate::store::CartStore;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Everything that can go wrong in the core. All variants are recoverable;
/// the adapter renders them and the session continues.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("item not found in cart")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid cart item: {0}")]
    InvalidCartItem(String),

    #[error("checkout form has {} invalid field(s)", .0.len())]
    FormInvalid(Vec<FieldError>),

    #[error("high-quantity items need confirmation: {}", .0.join(", "))]
    NeedsConfirmation(Vec<String>),

    #[error("order submission failed: {0}")]
    Submission(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
