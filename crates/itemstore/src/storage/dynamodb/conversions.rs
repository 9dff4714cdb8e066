//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between JSON payloads and DynamoDB
//! `AttributeValue` maps. Testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use itemstore_core::item::ItemData;
use itemstore_core::keys::ItemKey;
use itemstore_core::storage::{ItemError, Result};

// ============================================================================
// Attribute names
// ============================================================================

pub const PK_ATTRIBUTE: &str = "pk";
pub const ITEM_ID_ATTRIBUTE: &str = "item_id";
pub const DATA_ATTRIBUTE: &str = "data";

// ============================================================================
// Records
// ============================================================================

/// Convert a payload into the persisted record: `pk`, `item_id`, and `data`.
pub fn record_to_item(key: &ItemKey, item_id: &str, data: &ItemData) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        PK_ATTRIBUTE.to_string(),
        AttributeValue::S(key.primary.clone()),
    );
    item.insert(
        ITEM_ID_ATTRIBUTE.to_string(),
        AttributeValue::S(item_id.to_string()),
    );
    item.insert(DATA_ATTRIBUTE.to_string(), map_to_attribute(data));

    item
}

/// Extract the payload from a persisted record.
///
/// A record without a `data` attribute (or a projection that matched no
/// fields) yields an empty payload.
pub fn item_to_data(item: &HashMap<String, AttributeValue>) -> Result<ItemData> {
    match item.get(DATA_ATTRIBUTE) {
        Some(AttributeValue::M(map)) => attribute_map_to_data(map),
        Some(_) => Err(ItemError::Backend(format!(
            "Attribute '{DATA_ATTRIBUTE}' is not a map"
        ))),
        None => Ok(ItemData::new()),
    }
}

// ============================================================================
// JSON -> AttributeValue
// ============================================================================

/// Convert a JSON value to an attribute value.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => map_to_attribute(map),
    }
}

fn map_to_attribute(map: &ItemData) -> AttributeValue {
    AttributeValue::M(
        map.iter()
            .map(|(k, v)| (k.clone(), value_to_attribute(v)))
            .collect(),
    )
}

// ============================================================================
// AttributeValue -> JSON
// ============================================================================

/// Convert an attribute value back to JSON.
///
/// String and number sets become arrays. Binary attributes are never written
/// by this service and are rejected.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::M(map) => attribute_map_to_data(map).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(Value::Number))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Err(ItemError::Backend(format!(
            "Unsupported attribute type: {other:?}"
        ))),
    }
}

fn attribute_map_to_data(map: &HashMap<String, AttributeValue>) -> Result<ItemData> {
    map.iter()
        .map(|(k, v)| attribute_to_value(v).map(|value| (k.clone(), value)))
        .collect()
}

fn parse_number(raw: &str) -> Result<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ItemError::Backend(format!("Invalid number attribute: {raw}")))
}
