//! Order Fixture Generator
//!
//! Builds complete, valid orders from a [`Domains`] table set and an explicit
//! random source, then invalidates a configurable share of them.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ generate_    │───▶│ gen_bool(    │───▶│ Vec<Order>   │
//! │ order()      │    │ invalid_rate)│    │ (in order)   │
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │ true
//!                            ▼
//!                     inject_invalid_data()
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::corruption::{Corruption, inject_invalid_data};
use crate::domains::Domains;
use crate::error::GeneratorError;
use crate::models::{Delivery, Item, Order, Payment};

// ============================================================
// Field domains that are ranges rather than tables
// ============================================================

pub const TRACK_NUMBER_PREFIX: &str = "TRK";
const TRACK_NUMBER_SUFFIX_LEN: usize = 10;
const CUSTOMER_ID_LEN: usize = 8;
const LOWER_ALPHANUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// National number digits after the country code (country code <= 3 digits,
/// so the total never exceeds 14)
const NATIONAL_NUMBER_DIGITS: std::ops::RangeInclusive<usize> = 7..=11;

/// date_created window: [2020-01-01T00:00:00Z, 2025-01-01T00:00:00Z]
const DATE_CREATED_FROM: i64 = 1_577_836_800;
const DATE_CREATED_TO: i64 = 1_735_689_600;
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================
// Parameters
// ============================================================

/// Validated batch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateParams {
    pub count: usize,
    pub min_items: usize,
    pub max_items: usize,
    pub invalid_rate: f64,
}

impl GenerateParams {
    /// Check raw (CLI-level) values.
    ///
    /// # Errors
    /// - `MinItemsTooSmall` if `min_items < 1`
    /// - `InvalidItemBounds` if `min_items > max_items`
    /// - `InvalidRate` if `invalid_rate` is NaN or outside `[0, 1]`
    pub fn new(
        count: usize,
        min_items: i64,
        max_items: i64,
        invalid_rate: f64,
    ) -> Result<Self, GeneratorError> {
        if min_items < 1 {
            return Err(GeneratorError::MinItemsTooSmall(min_items));
        }
        if min_items > max_items {
            return Err(GeneratorError::InvalidItemBounds {
                min: min_items,
                max: max_items,
            });
        }
        if !(0.0..=1.0).contains(&invalid_rate) {
            return Err(GeneratorError::InvalidRate(invalid_rate));
        }
        Ok(Self {
            count,
            min_items: min_items as usize,
            max_items: max_items as usize,
            invalid_rate,
        })
    }
}

fn check_item_bounds(min_items: usize, max_items: usize) -> Result<(), GeneratorError> {
    if min_items == 0 {
        return Err(GeneratorError::MinItemsTooSmall(0));
    }
    if min_items > max_items {
        return Err(GeneratorError::InvalidItemBounds {
            min: min_items as i64,
            max: max_items as i64,
        });
    }
    Ok(())
}

// ============================================================
// Generator
// ============================================================

/// A batch of generated orders plus the corruption applied to each.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub orders: Vec<Order>,
    /// Parallel to `orders`; `None` for orders left valid
    pub corruptions: Vec<Option<Corruption>>,
}

impl Batch {
    pub fn invalid_count(&self) -> usize {
        self.corruptions.iter().filter(|c| c.is_some()).count()
    }
}

pub struct OrderGenerator {
    domains: Domains,
}

impl OrderGenerator {
    /// Create a generator over checked lookup tables.
    pub fn new(domains: Domains) -> Result<Self, GeneratorError> {
        domains.check()?;
        Ok(Self { domains })
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Build one syntactically complete, valid order.
    ///
    /// Item count is drawn uniformly from `[min_items, max_items]`.
    pub fn generate_order<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_items: usize,
        max_items: usize,
    ) -> Result<Order, GeneratorError> {
        check_item_bounds(min_items, max_items)?;

        let d = &self.domains;
        let order_uid = random_hex_id(rng);
        let track_number = format!(
            "{}{}",
            TRACK_NUMBER_PREFIX,
            random_string(rng, TRACK_NUMBER_SUFFIX_LEN).to_ascii_uppercase()
        );

        let name = pick(rng, &d.names).to_string();
        let email = format!(
            "{}@{}",
            name.replace(' ', ".").to_lowercase(),
            pick(rng, &d.email_domains)
        );

        let delivery = Delivery {
            phone: self.random_phone(rng),
            zip: rng.gen_range(100_000..=999_999).to_string(),
            city: pick(rng, &d.cities).to_string(),
            address: format!("{} {}", rng.gen_range(1..=100), pick(rng, &d.streets)),
            region: pick(rng, &d.regions).to_string(),
            email,
            name,
        };

        let payment = Payment {
            transaction: order_uid.clone(),
            request_id: String::new(),
            currency: pick(rng, &d.currencies).to_string(),
            provider: pick(rng, &d.providers).to_string(),
            amount: rng.gen_range(100..=5000),
            payment_dt: Utc::now().timestamp(),
            bank: pick(rng, &d.banks).to_string(),
            delivery_cost: rng.gen_range(100..=2000),
            goods_total: rng.gen_range(50..=2000),
            custom_fee: rng.gen_range(0..=100),
        };

        let item_count = rng.gen_range(min_items..=max_items);
        let items = (0..item_count)
            .map(|_| self.generate_item(rng, &track_number))
            .collect();

        Ok(Order {
            order_uid,
            entry: pick(rng, &d.entries).to_string(),
            delivery,
            payment,
            items,
            locale: pick(rng, &d.locales).to_string(),
            internal_signature: String::new(),
            customer_id: random_string(rng, CUSTOMER_ID_LEN),
            delivery_service: pick(rng, &d.delivery_services).to_string(),
            shardkey: rng.gen_range(1..=10).to_string(),
            sm_id: rng.gen_range(1..=200),
            date_created: random_date_created(rng),
            oof_shard: rng.gen_range(1..=5).to_string(),
            track_number,
        })
    }

    fn generate_item<R: Rng + ?Sized>(&self, rng: &mut R, track_number: &str) -> Item {
        let d = &self.domains;
        Item {
            chrt_id: rng.gen_range(1_000_000..=9_999_999),
            track_number: track_number.to_string(),
            price: rng.gen_range(50..=1000),
            rid: random_hex_id(rng),
            name: pick(rng, &d.item_names).to_string(),
            sale: rng.gen_range(0..=70),
            size: pick(rng, &d.item_sizes).to_string(),
            total_price: rng.gen_range(50..=2000),
            nm_id: rng.gen_range(100_000..=999_999),
            brand: pick(rng, &d.brands).to_string(),
            status: rng.gen_range(100..=300),
        }
    }

    /// `+<country code><7..=11 digits>`
    fn random_phone<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let code = self.domains.phone_country_codes
            [rng.gen_range(0..self.domains.phone_country_codes.len())];
        let digits = rng.gen_range(NATIONAL_NUMBER_DIGITS);
        let mut phone = format!("+{}", code);
        for _ in 0..digits {
            phone.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        phone
    }

    /// Generate `params.count` orders, invalidating each with probability
    /// `params.invalid_rate`. Order of the result is generation order.
    ///
    /// `order_uid`s are unique within the batch.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        params: &GenerateParams,
    ) -> Result<Batch, GeneratorError> {
        // Fields are public; gen_bool panics outside [0, 1]
        if !(0.0..=1.0).contains(&params.invalid_rate) {
            return Err(GeneratorError::InvalidRate(params.invalid_rate));
        }
        check_item_bounds(params.min_items, params.max_items)?;

        let mut batch = Batch {
            orders: Vec::with_capacity(params.count),
            corruptions: Vec::with_capacity(params.count),
        };
        let mut seen_uids: FxHashSet<String> = FxHashSet::default();

        while batch.orders.len() < params.count {
            let order = self.generate_order(rng, params.min_items, params.max_items)?;
            if !seen_uids.insert(order.order_uid.clone()) {
                tracing::debug!(order_uid = %order.order_uid, "order_uid collision, regenerating");
                continue;
            }

            if rng.gen_bool(params.invalid_rate) {
                let (order, corruption) = inject_invalid_data(rng, order);
                tracing::trace!(order_uid = %order.order_uid, %corruption, "invalidated order");
                batch.orders.push(order);
                batch.corruptions.push(Some(corruption));
            } else {
                batch.orders.push(order);
                batch.corruptions.push(None);
            }
        }

        Ok(batch)
    }
}

// ============================================================
// Helpers
// ============================================================

/// Tables are non-empty once `Domains::check` has passed.
fn pick<'a, R: Rng + ?Sized>(rng: &mut R, table: &'a [String]) -> &'a str {
    &table[rng.gen_range(0..table.len())]
}

/// 16 lowercase hex chars (64 random bits)
fn random_hex_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 8];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(LOWER_ALPHANUM[rng.gen_range(0..LOWER_ALPHANUM.len())]))
        .collect()
}

fn random_date_created<R: Rng + ?Sized>(rng: &mut R) -> String {
    let secs = rng.gen_range(DATE_CREATED_FROM..=DATE_CREATED_TO);
    (DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(secs))
        .format(DATE_FORMAT)
        .to_string()
}
