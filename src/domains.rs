//! Lookup tables for categorical fields
//!
//! The generator never hard-codes field values; it draws from a [`Domains`]
//! instance handed to it at construction. `Domains::default()` carries the
//! stock tables, a YAML file may override any subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::validation::{is_iso4217, is_language_tag};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Categorical value tables.
///
/// Missing keys in a YAML override fall back to the built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domains {
    pub names: Vec<String>,
    pub cities: Vec<String>,
    pub regions: Vec<String>,
    pub streets: Vec<String>,
    pub email_domains: Vec<String>,
    /// Country calling codes, 1..=999
    pub phone_country_codes: Vec<u16>,
    pub currencies: Vec<String>,
    pub providers: Vec<String>,
    pub banks: Vec<String>,
    pub delivery_services: Vec<String>,
    pub entries: Vec<String>,
    pub locales: Vec<String>,
    pub item_names: Vec<String>,
    pub item_sizes: Vec<String>,
    pub brands: Vec<String>,
}

impl Default for Domains {
    fn default() -> Self {
        Self {
            names: strings(&[
                "Walter White",
                "Jessie Pinkman",
                "Gus Fring",
                "Saul Goodman",
                "Skylar White",
                "Tuco Salamanca",
                "Ignacio Varga",
            ]),
            cities: strings(&[
                "New York",
                "Los Angeles",
                "London",
                "Berlin",
                "Tokyo",
                "Albuqerque",
                "Moscow",
            ]),
            regions: strings(&[
                "California",
                "Berlin",
                "Tokyo Prefecture",
                "Moscow Region",
                "New Mexico",
            ]),
            streets: strings(&["Main St", "High St", "Ploshad Mira", "Broadway"]),
            email_domains: strings(&["gmail.com", "yahoo.com", "example.com", "mail.ru"]),
            phone_country_codes: vec![1, 44, 49, 81, 7],
            currencies: strings(&["USD", "EUR", "GBP", "JPY", "RUB", "CNY"]),
            providers: strings(&["wbpay", "paypal", "stripe", "banktransfer", "MIR"]),
            banks: strings(&["alpha", "beta", "gamma"]),
            delivery_services: strings(&["meest", "fedex", "dhl", "ups", "Russian Post"]),
            entries: strings(&["WBIL", "ENTR", "GATE"]),
            locales: strings(&["en", "ru", "de", "fr"]),
            item_names: strings(&["T-shirt", "Shoes", "Jacket", "Bag", "Mascaras"]),
            item_sizes: strings(&["S", "M", "L", "XL", "0"]),
            brands: strings(&[
                "Vivienne Sabo",
                "Maybelline",
                "L'Oreal",
                "MAC",
                "NYX",
                "Converse",
                "Vans",
                "Nike",
            ]),
        }
    }
}

impl Domains {
    /// Load tables from a YAML file, keeping built-in tables for absent keys.
    pub fn from_yaml_file(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|source| GeneratorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let domains: Domains = serde_yaml::from_str(&content)?;
        domains.check()?;
        Ok(domains)
    }

    /// Reject tables that cannot produce a valid order.
    ///
    /// # Errors
    /// - `EmptyDomain` if any table is empty
    /// - `InvalidDomainValue` for values that would make a "valid" order fail
    ///   its own rules (bad currency, locale, country code or email parts)
    pub fn check(&self) -> Result<(), GeneratorError> {
        let tables: [(&'static str, &[String]); 14] = [
            ("names", self.names.as_slice()),
            ("cities", self.cities.as_slice()),
            ("regions", self.regions.as_slice()),
            ("streets", self.streets.as_slice()),
            ("email_domains", self.email_domains.as_slice()),
            ("currencies", self.currencies.as_slice()),
            ("providers", self.providers.as_slice()),
            ("banks", self.banks.as_slice()),
            ("delivery_services", self.delivery_services.as_slice()),
            ("entries", self.entries.as_slice()),
            ("locales", self.locales.as_slice()),
            ("item_names", self.item_names.as_slice()),
            ("item_sizes", self.item_sizes.as_slice()),
            ("brands", self.brands.as_slice()),
        ];
        for (table, values) in tables {
            if values.is_empty() {
                return Err(GeneratorError::EmptyDomain(table));
            }
            if let Some(blank) = values.iter().find(|v| v.trim().is_empty()) {
                return Err(GeneratorError::InvalidDomainValue {
                    table,
                    value: blank.clone(),
                    reason: "blank value",
                });
            }
        }
        if self.phone_country_codes.is_empty() {
            return Err(GeneratorError::EmptyDomain("phone_country_codes"));
        }

        if let Some(code) = self
            .phone_country_codes
            .iter()
            .find(|&&c| !(1..=999).contains(&c))
        {
            return Err(GeneratorError::InvalidDomainValue {
                table: "phone_country_codes",
                value: code.to_string(),
                reason: "country code must be 1..=999",
            });
        }

        if let Some(c) = self.currencies.iter().find(|c| !is_iso4217(c)) {
            return Err(GeneratorError::InvalidDomainValue {
                table: "currencies",
                value: c.clone(),
                reason: "not an ISO-4217 code",
            });
        }

        if let Some(l) = self.locales.iter().find(|l| !is_language_tag(l)) {
            return Err(GeneratorError::InvalidDomainValue {
                table: "locales",
                value: l.clone(),
                reason: "not a BCP-47 language tag",
            });
        }

        // Emails are derived as "<name>@<domain>"
        if let Some(n) = self.names.iter().find(|n| n.contains('@')) {
            return Err(GeneratorError::InvalidDomainValue {
                table: "names",
                value: n.clone(),
                reason: "names must not contain '@'",
            });
        }
        if let Some(d) = self
            .email_domains
            .iter()
            .find(|d| d.contains('@') || !d.contains('.') || d.contains(' '))
        {
            return Err(GeneratorError::InvalidDomainValue {
                table: "email_domains",
                value: d.clone(),
                reason: "expected a dotted host name",
            });
        }

        Ok(())
    }
}
