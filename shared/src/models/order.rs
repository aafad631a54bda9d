//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// Stored order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: u64,
    pub quantity: u32,
}

/// Order entity (an entry of the `orders` ledger)
///
/// `items` and `total` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Sum of price × quantity, rounded to 2 decimal places
    pub total: Decimal,
    /// Free-form shipping address
    #[serde(default = "empty_object")]
    pub address: serde_json::Value,
    /// Unix seconds
    #[serde(default)]
    pub created_at: i64,
}

pub(crate) fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Requested order line
///
/// `product_id` and `quantity` accept numbers or numeric strings.
/// A missing `quantity` means one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(deserialize_with = "serde_helpers::lenient_u64")]
    pub product_id: u64,
    #[serde(default, deserialize_with = "serde_helpers::lenient_opt_u32")]
    pub quantity: Option<u32>,
}

impl OrderItemInput {
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub address: Option<serde_json::Value>,
}

/// Update order payload
///
/// Only the status and the address of an order may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub address: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_input_coercion() {
        let items: Vec<OrderItemInput> =
            serde_json::from_str(r#"[{"product_id":"4","quantity":"2"},{"product_id":5}]"#).unwrap();
        assert_eq!(items[0].product_id, 4);
        assert_eq!(items[0].quantity(), 2);
        assert_eq!(items[1].quantity, None);
        assert_eq!(items[1].quantity(), 1);
    }

    #[test]
    fn test_order_defaults() {
        let json = r#"{"id":1,"user_id":2,"items":[{"product_id":3,"quantity":1}],"total":9.99}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.address, serde_json::json!({}));

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["total"].as_f64(), Some(9.99));
    }

    #[test]
    fn test_update_ignores_immutable_fields() {
        let upd: OrderUpdate =
            serde_json::from_str(r#"{"status":"shipped","total":0,"items":[]}"#).unwrap();
        assert_eq!(upd.status, Some(OrderStatus::Shipped));
        assert!(upd.address.is_none());
    }
}
