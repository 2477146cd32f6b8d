//! Invalid-data injection
//!
//! Each [`Corruption`] overwrites exactly one field of an [`Order`] with a
//! value that breaks one named rule. Referential fields (`order_uid`,
//! `payment.transaction`, track numbers) are never touched.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corruption {
    /// `delivery.phone = "12345abc"`: not E.164
    Phone,
    /// `delivery.email = "not-an-email"`: no `@`
    Email,
    /// `payment.amount = -100`: breaks amount >= 0
    Amount,
    /// `locale = "xx_123"`: not a BCP-47 tag, not in the locale table
    Locale,
    /// `items = []`: breaks "at least one item"
    Items,
    /// `shardkey = "abc"`: not numeric
    #[serde(rename = "shardkey")]
    ShardKey,
    /// `sm_id = 0`: breaks sm_id > 0
    SmId,
    /// `payment.goods_total = 0`: breaks goods_total > 0
    GoodsTotal,
    /// `payment.currency = "NOT"`: not ISO-4217
    Currency,
}

impl Corruption {
    pub const ALL: [Corruption; 9] = [
        Corruption::Phone,
        Corruption::Email,
        Corruption::Amount,
        Corruption::Locale,
        Corruption::Items,
        Corruption::ShardKey,
        Corruption::SmId,
        Corruption::GoodsTotal,
        Corruption::Currency,
    ];

    /// Pick one category uniformly at random
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// JSON path of the overwritten field
    pub fn field(self) -> &'static str {
        match self {
            Corruption::Phone => "delivery.phone",
            Corruption::Email => "delivery.email",
            Corruption::Amount => "payment.amount",
            Corruption::Locale => "locale",
            Corruption::Items => "items",
            Corruption::ShardKey => "shardkey",
            Corruption::SmId => "sm_id",
            Corruption::GoodsTotal => "payment.goods_total",
            Corruption::Currency => "payment.currency",
        }
    }

    /// The validation rule the new value breaks
    pub fn rule(self) -> &'static str {
        match self {
            Corruption::Phone => "phone must be E.164",
            Corruption::Email => "email must contain exactly one '@'",
            Corruption::Amount => "amount must be >= 0",
            Corruption::Locale => "locale must be a known BCP-47 language tag",
            Corruption::Items => "order must have at least one item",
            Corruption::ShardKey => "shardkey must be numeric",
            Corruption::SmId => "sm_id must be > 0",
            Corruption::GoodsTotal => "goods_total must be > 0",
            Corruption::Currency => "currency must be an ISO-4217 code",
        }
    }

    /// Overwrite the targeted field. Nothing else changes.
    pub fn apply(self, mut order: Order) -> Order {
        match self {
            Corruption::Phone => order.delivery.phone = "12345abc".to_string(),
            Corruption::Email => order.delivery.email = "not-an-email".to_string(),
            Corruption::Amount => order.payment.amount = -100,
            Corruption::Locale => order.locale = "xx_123".to_string(),
            Corruption::Items => order.items.clear(),
            Corruption::ShardKey => order.shardkey = "abc".to_string(),
            Corruption::SmId => order.sm_id = 0,
            Corruption::GoodsTotal => order.payment.goods_total = 0,
            Corruption::Currency => order.payment.currency = "NOT".to_string(),
        }
        order
    }
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field(), self.rule())
    }
}

/// Invalidate one uniformly chosen field of `order`.
///
/// Returns the mutated order together with the category that was applied.
pub fn inject_invalid_data<R: Rng + ?Sized>(rng: &mut R, order: Order) -> (Order, Corruption) {
    let corruption = Corruption::choose(rng);
    (corruption.apply(order), corruption)
}
