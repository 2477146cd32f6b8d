//! Fixture self-check
//!
//! Two layers:
//! - field validators plugged into the `validator` derive on [`crate::models`],
//!   mirroring the consuming service's schema
//! - [`violations`] / [`check_references`], the targeted predicates the
//!   generator promises to keep (or break, one at a time)

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::corruption::Corruption;
use crate::domains::Domains;
use crate::models::Order;

// ============================================================================
// Field validators
// ============================================================================

/// ASCII digits only; `\d` would also admit other Unicode digits.
static E164: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{6,14}$").expect("static regex"));

/// Primary language subtag plus optional subtags, hyphen separated.
static BCP47: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("static regex"));

/// Active ISO-4217 alphabetic codes accepted by the consumer.
pub const ISO_4217_CODES: &[&str] = &[
    "AED", "ARS", "AUD", "BRL", "BYN", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "GEL",
    "HKD", "HUF", "IDR", "ILS", "INR", "JPY", "KGS", "KRW", "KZT", "MXN", "NOK", "NZD", "PLN",
    "RUB", "SAR", "SEK", "SGD", "THB", "TRY", "UAH", "USD", "UZS", "ZAR",
];

pub fn is_e164(phone: &str) -> bool {
    E164.is_match(phone)
}

pub fn is_language_tag(tag: &str) -> bool {
    BCP47.is_match(tag)
}

pub fn is_iso4217(code: &str) -> bool {
    ISO_4217_CODES.contains(&code)
}

pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn validate_e164(phone: &str) -> Result<(), ValidationError> {
    if is_e164(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("e164"))
    }
}

pub(crate) fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if is_language_tag(locale) {
        Ok(())
    } else {
        Err(ValidationError::new("bcp47_language_tag"))
    }
}

pub(crate) fn validate_iso4217(code: &str) -> Result<(), ValidationError> {
    if is_iso4217(code) {
        Ok(())
    } else {
        Err(ValidationError::new("iso4217"))
    }
}

pub(crate) fn validate_numeric(s: &str) -> Result<(), ValidationError> {
    if is_numeric(s) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric"))
    }
}

pub(crate) fn validate_alphanum(s: &str) -> Result<(), ValidationError> {
    if s.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanum"))
    }
}

pub(crate) fn validate_timestamp(s: &str) -> Result<(), ValidationError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|_| ())
        .map_err(|_| ValidationError::new("rfc3339"))
}

// ============================================================================
// Targeted rules
// ============================================================================

/// Referential invariants that hold for every emitted order
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ReferenceError {
    #[error("payment.transaction '{transaction}' does not match order_uid '{order_uid}'")]
    TransactionMismatch {
        order_uid: String,
        transaction: String,
    },

    #[error("items[{index}].track_number '{got}' does not match order track_number '{expected}'")]
    ItemTrackMismatch {
        index: usize,
        expected: String,
        got: String,
    },
}

pub fn check_references(order: &Order) -> Result<(), ReferenceError> {
    if order.payment.transaction != order.order_uid {
        return Err(ReferenceError::TransactionMismatch {
            order_uid: order.order_uid.clone(),
            transaction: order.payment.transaction.clone(),
        });
    }

    if let Some((index, item)) = order
        .items
        .iter()
        .enumerate()
        .find(|(_, item)| item.track_number != order.track_number)
    {
        return Err(ReferenceError::ItemTrackMismatch {
            index,
            expected: order.track_number.clone(),
            got: item.track_number.clone(),
        });
    }

    Ok(())
}

/// Whether `order` breaks the rule targeted by `corruption`.
///
/// Locale and currency are judged against the lookup tables the order was
/// generated from. The shardkey rule only asks for an integer, so `"+5"` and
/// `"-3"` pass here while the stricter digits-only schema check in
/// `validate_numeric` rejects them.
pub fn violates(order: &Order, corruption: Corruption, domains: &Domains) -> bool {
    match corruption {
        Corruption::Phone => !is_e164(&order.delivery.phone),
        Corruption::Email => {
            let mut parts = order.delivery.email.split('@');
            !matches!(
                (parts.next(), parts.next(), parts.next()),
                (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
            )
        }
        Corruption::Amount => order.payment.amount < 0,
        Corruption::Locale => !domains.locales.iter().any(|l| *l == order.locale),
        Corruption::Items => order.items.is_empty(),
        Corruption::ShardKey => order.shardkey.parse::<i64>().is_err(),
        Corruption::SmId => order.sm_id <= 0,
        Corruption::GoodsTotal => order.payment.goods_total <= 0,
        Corruption::Currency => !domains.currencies.iter().any(|c| *c == order.payment.currency),
    }
}

/// Every targeted rule the order currently breaks, in [`Corruption::ALL`] order.
pub fn violations(order: &Order, domains: &Domains) -> Vec<Corruption> {
    Corruption::ALL
        .into_iter()
        .filter(|&c| violates(order, c, domains))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_order;

    #[test]
    fn test_e164_shapes() {
        assert!(is_e164("+12345678"));
        assert!(is_e164("+79991234567"));
        assert!(is_e164("+123456789012345")); // 15 digits
        assert!(!is_e164("+1234567890123456")); // 16 digits
        assert!(!is_e164("12345abc"));
        assert!(!is_e164("+0123456789"));
        assert!(!is_e164("+123456"));
        assert!(!is_e164("+1\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}\u{0669}"));
        assert!(!is_e164("+\u{0661}2345678"));
    }

    #[test]
    fn test_language_tags() {
        assert!(is_language_tag("en"));
        assert!(is_language_tag("ru"));
        assert!(is_language_tag("en-US"));
        assert!(!is_language_tag("xx_123"));
        assert!(!is_language_tag(""));
    }

    #[test]
    fn test_iso4217_and_numeric() {
        assert!(is_iso4217("USD"));
        assert!(!is_iso4217("NOT"));
        assert!(!is_iso4217("usd"));
        assert!(is_numeric("10"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("-1"));
    }

    #[test]
    fn test_signed_shardkey_passes_rule_but_not_schema() {
        use validator::Validate;

        let domains = Domains::default();
        let mut order = sample_order();
        for signed in ["+5", "-3"] {
            order.shardkey = signed.to_string();
            assert!(violations(&order, &domains).is_empty(), "{signed}");
            assert!(order.validate().is_err(), "{signed}");
        }
        order.shardkey = "abc".to_string();
        assert_eq!(violations(&order, &domains), vec![Corruption::ShardKey]);
    }

    #[test]
    fn test_sample_order_has_no_violations() {
        let order = sample_order();
        assert!(violations(&order, &Domains::default()).is_empty());
        assert_eq!(check_references(&order), Ok(()));
    }

    #[test]
    fn test_email_needs_exactly_one_at() {
        let domains = Domains::default();
        let mut order = sample_order();
        for bad in ["not-an-email", "a@b@c", "@example.com", "saul@"] {
            order.delivery.email = bad.to_string();
            assert_eq!(violations(&order, &domains), vec![Corruption::Email], "{bad}");
        }
    }

    #[test]
    fn test_locale_and_currency_follow_tables() {
        let mut domains = Domains::default();
        let order = sample_order();
        domains.locales = vec!["de".to_string()];
        domains.currencies = vec!["USD".to_string()];
        assert_eq!(
            violations(&order, &domains),
            vec![Corruption::Locale, Corruption::Currency]
        );
    }

    #[test]
    fn test_reference_mismatches() {
        let mut order = sample_order();
        order.payment.transaction = "other".to_string();
        assert!(matches!(
            check_references(&order),
            Err(ReferenceError::TransactionMismatch { .. })
        ));

        let mut order = sample_order();
        order.items[0].track_number = "TRKZZZZZZZZZZ".to_string();
        assert_eq!(
            check_references(&order),
            Err(ReferenceError::ItemTrackMismatch {
                index: 0,
                expected: "TRKAB12CD34EF".to_string(),
                got: "TRKZZZZZZZZZZ".to_string(),
            })
        );
    }
}
