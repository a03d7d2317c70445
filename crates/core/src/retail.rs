//! Retail domain rows: customers, purchases, orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Customer contact and payment details as captured during a purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCustomer {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phonenumber: String,
    pub shippingaddress: String,
    pub creditcardnumber: String,
}

/// A stored customer row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub customerid: i32,
    #[serde(flatten)]
    pub details: NewCustomer,
}

/// Everything needed to place one order for a new customer.
///
/// Field names match the `buy_product` tool arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Purchase {
    #[serde(flatten)]
    pub customer: NewCustomer,
    pub productid: i32,
    pub quantity: i32,
}

/// Status fields of one order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStatus {
    pub orderdate: NaiveDateTime,
    pub orderstatus: String,
}

/// Initial status of a freshly placed order.
pub const ORDER_STATUS_PENDING: &str = "pending";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_deserializes_flat_tool_arguments() {
        let purchase: Purchase = serde_json::from_value(serde_json::json!({
            "firstname": "Ada",
            "lastname": "Lovelace",
            "email": "ada@example.com",
            "phonenumber": "555-0100",
            "shippingaddress": "1 Analytical St",
            "creditcardnumber": "4111111111111111",
            "productid": 3,
            "quantity": 2
        }))
        .unwrap();
        assert_eq!(purchase.customer.firstname, "Ada");
        assert_eq!(purchase.productid, 3);
        assert_eq!(purchase.quantity, 2);
    }

    #[test]
    fn test_order_status_serializes_iso_date() {
        let status = OrderStatus {
            orderdate: NaiveDateTime::parse_from_str("2024-05-01 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            orderstatus: "shipped".to_owned(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["orderdate"], "2024-05-01T10:30:00");
        assert_eq!(json["orderstatus"], "shipped");
    }
}
