// models.rs - Order fixture record types
//
// Field names and JSON layout follow the order service that consumes these
// fixtures. The `validate` attributes mirror that service's schema so a
// generated fixture can be checked before it is shipped.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{
    validate_alphanum, validate_e164, validate_iso4217, validate_locale, validate_numeric,
    validate_timestamp,
};

/// One synthetic order: the unit of output.
///
/// Invariants for every generated order (valid or invalidated):
/// - `payment.transaction == order_uid`
/// - every `items[i].track_number == track_number`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Order {
    #[validate(length(min = 1), custom(function = "validate_alphanum"))]
    pub order_uid: String,
    #[validate(length(min = 1), custom(function = "validate_alphanum"))]
    pub track_number: String,
    #[validate(length(min = 1))]
    pub entry: String,
    #[validate(nested)]
    pub delivery: Delivery,
    #[validate(nested)]
    pub payment: Payment,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<Item>,
    #[validate(custom(function = "validate_locale"))]
    pub locale: String,
    pub internal_signature: String,
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[validate(length(min = 1))]
    pub delivery_service: String,
    #[validate(custom(function = "validate_numeric"))]
    pub shardkey: String,
    #[validate(range(min = 1))]
    pub sm_id: i64,
    #[validate(custom(function = "validate_timestamp"))]
    pub date_created: String,
    #[validate(custom(function = "validate_numeric"))]
    pub oof_shard: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Delivery {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_e164"))]
    pub phone: String,
    #[validate(custom(function = "validate_numeric"))]
    pub zip: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub region: String,
    #[validate(email)]
    pub email: String,
}

/// Payment block. Amounts are plain integers in minor units; they are signed
/// so that a negative amount can be represented in a malformed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Payment {
    #[validate(length(min = 1), custom(function = "validate_alphanum"))]
    pub transaction: String,
    pub request_id: String,
    #[validate(custom(function = "validate_iso4217"))]
    pub currency: String,
    #[validate(length(min = 1))]
    pub provider: String,
    #[validate(range(min = 0))]
    pub amount: i64,
    #[validate(range(min = 1))]
    pub payment_dt: i64,
    #[validate(length(min = 1))]
    pub bank: String,
    #[validate(range(min = 0))]
    pub delivery_cost: i64,
    #[validate(range(min = 1))]
    pub goods_total: i64,
    #[validate(range(min = 0))]
    pub custom_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(range(min = 1))]
    pub chrt_id: u64,
    #[validate(length(min = 1), custom(function = "validate_alphanum"))]
    pub track_number: String,
    pub price: u32,
    #[validate(length(min = 1), custom(function = "validate_alphanum"))]
    pub rid: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(max = 100))]
    pub sale: u32,
    #[validate(length(min = 1))]
    pub size: String,
    pub total_price: u32,
    #[validate(range(min = 1))]
    pub nm_id: u64,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(range(min = 1))]
    pub status: u32,
}

impl Order {
    /// Number of line items
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Hand-built order that passes every schema rule.
    pub(crate) fn sample_order() -> Order {
        let track_number = "TRKAB12CD34EF".to_string();
        Order {
            order_uid: "b563feb7b2b84b6t".to_string(),
            track_number: track_number.clone(),
            entry: "WBIL".to_string(),
            delivery: Delivery {
                name: "Saul Goodman".to_string(),
                phone: "+4915112345678".to_string(),
                zip: "263900".to_string(),
                city: "Berlin".to_string(),
                address: "12 Broadway".to_string(),
                region: "Berlin".to_string(),
                email: "saul.goodman@example.com".to_string(),
            },
            payment: Payment {
                transaction: "b563feb7b2b84b6t".to_string(),
                request_id: String::new(),
                currency: "EUR".to_string(),
                provider: "wbpay".to_string(),
                amount: 1817,
                payment_dt: 1_637_907_727,
                bank: "alpha".to_string(),
                delivery_cost: 1500,
                goods_total: 317,
                custom_fee: 0,
            },
            items: vec![Item {
                chrt_id: 9_934_930,
                track_number,
                price: 453,
                rid: "ab4219087a764ae0".to_string(),
                name: "Mascaras".to_string(),
                sale: 30,
                size: "0".to_string(),
                total_price: 317,
                nm_id: 238_964,
                brand: "Vivienne Sabo".to_string(),
                status: 202,
            }],
            locale: "en".to_string(),
            internal_signature: String::new(),
            customer_id: "test".to_string(),
            delivery_service: "meest".to_string(),
            shardkey: "9".to_string(),
            sm_id: 99,
            date_created: "2021-11-26T06:22:19Z".to_string(),
            oof_shard: "1".to_string(),
        }
    }

    #[test]
    fn test_sample_order_passes_schema() {
        assert!(sample_order().validate().is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(value["order_uid"], "b563feb7b2b84b6t");
        assert_eq!(value["payment"]["transaction"], "b563feb7b2b84b6t");
        assert_eq!(value["delivery"]["zip"], "263900");
        assert_eq!(value["items"][0]["chrt_id"], 9_934_930);
        assert_eq!(value["shardkey"], "9");
    }

    #[test]
    fn test_schema_rejects_bad_nested_fields() {
        let mut order = sample_order();
        order.items[0].sale = 150;
        assert!(order.validate().is_err());

        let mut order = sample_order();
        order.payment.payment_dt = 0;
        assert!(order.validate().is_err());

        let mut order = sample_order();
        order.date_created = "yesterday".to_string();
        assert!(order.validate().is_err());
    }
}
