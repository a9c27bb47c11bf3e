//! Domain layer: aggregates, value objects, pricing and adapter signals.

pub mod aggregates;
pub mod events;
pub mod pricing;
pub mod value_objects;
