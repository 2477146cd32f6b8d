//! Fixture I/O - write and read order fixture files
//!
//! Fixture files are a single UTF-8 JSON array of orders, pretty-printed with
//! a 3-space indent and written in one pass.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::GeneratorError;
use crate::models::Order;

pub const DEFAULT_OUTPUT: &str = "mock_orders.json";
const INDENT: &[u8] = b"   ";

/// Serialize `orders` into `path`, replacing any existing file.
///
/// The file handle is dropped (closed) before returning, after an explicit
/// flush so buffered write errors are reported.
pub fn write_orders(path: &Path, orders: &[Order]) -> Result<(), GeneratorError> {
    let write_err = |source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    {
        let mut ser =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        orders.serialize(&mut ser).map_err(|e| {
            if e.is_io() {
                write_err(std::io::Error::other(e))
            } else {
                GeneratorError::Json(e)
            }
        })?;
    }
    writer.flush().map_err(write_err)?;

    tracing::debug!(path = %path.display(), count = orders.len(), "fixture file written");
    Ok(())
}

/// Read a fixture file back into typed orders.
pub fn load_orders(path: &Path) -> Result<Vec<Order>, GeneratorError> {
    let file = File::open(path).map_err(|source| GeneratorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let orders: Vec<Order> = serde_json::from_reader(BufReader::new(file))?;
    Ok(orders)
}

/// Identifiers a load-test client replays as `GET /orders/{order_uid}`.
pub fn order_uids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(|o| o.order_uid.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_order;

    #[test]
    fn test_write_uses_three_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        write_orders(&path, &[sample_order()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n   {\n      \"order_uid\": \"b563feb7b2b84b6t\""));
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_empty_batch_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_orders(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(load_orders(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("orders.json");
        let err = write_orders(&path, &[sample_order()]).unwrap_err();
        assert!(matches!(err, GeneratorError::Write { .. }));
        assert!(!err.is_config());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"order_uid": "invalid-1", "items": [}"#).unwrap();
        assert!(matches!(
            load_orders(&path),
            Err(GeneratorError::Json(_))
        ));
    }

    #[test]
    fn test_order_uids() {
        let mut second = sample_order();
        second.order_uid = "0123456789abcdef".to_string();
        let orders = vec![sample_order(), second];
        assert_eq!(
            order_uids(&orders),
            vec!["b563feb7b2b84b6t", "0123456789abcdef"]
        );
    }
}
