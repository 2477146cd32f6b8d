//! order-fixtures - synthetic e-commerce order records
//!
//! Generates valid and deliberately malformed order JSON for service tests
//! and load runs.
//!
//! # Modules
//!
//! - [`models`] - Order, Delivery, Payment and Item records
//! - [`domains`] - Lookup tables for categorical fields
//! - [`generator`] - Order construction and batch driver
//! - [`corruption`] - Single-field invalid-data injection
//! - [`validation`] - Fixture self-check (schema and targeted rules)
//! - [`fixture_io`] - JSON fixture file loading/saving
//! - [`config`] - YAML application config
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod corruption;
pub mod domains;
pub mod error;
pub mod fixture_io;
pub mod generator;
pub mod logging;
pub mod models;
pub mod validation;

// Convenient re-exports at crate root
pub use corruption::{Corruption, inject_invalid_data};
pub use domains::Domains;
pub use error::GeneratorError;
pub use fixture_io::{load_orders, order_uids, write_orders};
pub use generator::{Batch, GenerateParams, OrderGenerator};
pub use models::{Delivery, Item, Order, Payment};
