//! Order Aggregate

use crate::domain::aggregates::cart::LineItem;
use crate::domain::pricing::Totals;
use crate::domain::value_objects::OrderId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Customer delivery details captured by the checkout form. Field names in
/// storage match the form field names (camelCase).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub special_instructions: String,
    pub delivery_time: DeliveryTime,
    pub payment_method: String,
}

/// Requested delivery window, as submitted by the form's select control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryTime {
    #[default]
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "30min")]
    HalfHour,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "2hour")]
    TwoHour,
}

impl DeliveryTime {
    /// Parse a form value; anything unrecognized falls back to ASAP.
    pub fn parse(value: &str) -> Self {
        match value {
            "30min" => Self::HalfHour,
            "1hour" => Self::OneHour,
            "2hour" => Self::TwoHour,
            _ => Self::Asap,
        }
    }

    /// Offset from submission time to the estimated delivery.
    pub fn offset(self) -> Duration {
        match self {
            Self::Asap => Duration::minutes(45),
            Self::HalfHour => Duration::minutes(30),
            Self::OneHour => Duration::minutes(60),
            Self::TwoHour => Duration::minutes(120),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
}

/// Immutable record of a successful checkout: the cart snapshot, the customer
/// details and the totals as they were at submission time. Fields are private;
/// nothing mutates an order after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    items: Vec<LineItem>,
    customer: CustomerInfo,
    totals: Totals,
    created_at: DateTime<Utc>,
    estimated_delivery: DateTime<Utc>,
    status: OrderStatus,
}

impl Order {
    pub(crate) fn place(items: Vec<LineItem>, customer: CustomerInfo, totals: Totals) -> Self {
        let created_at = Utc::now();
        let estimated_delivery = created_at + customer.delivery_time.offset();
        Self {
            id: OrderId::generate(),
            items,
            customer,
            totals,
            created_at,
            estimated_delivery,
            status: OrderStatus::Pending,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn estimated_delivery(&self) -> DateTime<Utc> {
        self.estimated_delivery
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::compute_totals;
    use crate::domain::value_objects::Money;

    fn customer(window: DeliveryTime) -> CustomerInfo {
        CustomerInfo {
            full_name: "Dana O'Neil".into(),
            phone: "(555) 123-4567".into(),
            address: "12 Ember Street, Apt 4".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62704".into(),
            delivery_time: window,
            payment_method: "card".into(),
            ..CustomerInfo::default()
        }
    }

    fn one_line() -> Vec<LineItem> {
        vec![LineItem {
            id: "burger".into(),
            name: "Flame Burger".into(),
            price: Money::from_cents(1099),
            image: "burger.png".into(),
            quantity: 2,
        }]
    }

    #[test]
    fn test_estimated_delivery_offsets() {
        for (window, minutes) in [
            (DeliveryTime::Asap, 45),
            (DeliveryTime::HalfHour, 30),
            (DeliveryTime::OneHour, 60),
            (DeliveryTime::TwoHour, 120),
        ] {
            let items = one_line();
            let totals = compute_totals(&items);
            let order = Order::place(items, customer(window), totals);
            assert_eq!(
                order.estimated_delivery() - order.created_at(),
                Duration::minutes(minutes)
            );
        }
    }

    #[test]
    fn test_unknown_delivery_window_defaults_to_asap() {
        assert_eq!(DeliveryTime::parse("tomorrow"), DeliveryTime::Asap);
        assert_eq!(DeliveryTime::parse("30min"), DeliveryTime::HalfHour);
    }

    #[test]
    fn test_order_snapshot_is_independent_of_source() {
        let items = one_line();
        let totals = compute_totals(&items);
        let order = Order::place(items.clone(), customer(DeliveryTime::Asap), totals);
        assert_eq!(order.items(), items.as_slice());
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.totals().subtotal, Money::from_cents(2198));
    }

    #[test]
    fn test_order_round_trips_through_json() {
        let items = one_line();
        let totals = compute_totals(&items);
        let order = Order::place(items, customer(DeliveryTime::OneHour), totals);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"deliveryTime\":\"1hour\""));
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
