//! Expression builders for projections and partial updates.
//!
//! Payload field names are arbitrary user input, so every path segment is
//! bound through an expression attribute name placeholder.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use itemstore_core::item::{ItemData, MODIFICATION_INFO_FIELD};

use super::conversions::{value_to_attribute, DATA_ATTRIBUTE, ITEM_ID_ATTRIBUTE, PK_ATTRIBUTE};

const DATA_PLACEHOLDER: &str = "#data";
const PK_PLACEHOLDER: &str = "#pk";

/// A projection expression with its attribute name bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub expression: String,
    pub names: HashMap<String, String>,
}

/// Builds a projection over `data.<field>` for each requested field.
///
/// Pattern: `#pk, #data.#f0, #data.#f1, ...`
///
/// `pk` is always projected so an existing record that has none of the fields
/// still comes back as an item.
pub fn projection_expression(fields: &[String]) -> Projection {
    let mut names = HashMap::new();
    names.insert(PK_PLACEHOLDER.to_string(), PK_ATTRIBUTE.to_string());
    names.insert(DATA_PLACEHOLDER.to_string(), DATA_ATTRIBUTE.to_string());

    let mut paths = vec![PK_PLACEHOLDER.to_string()];
    for (index, field) in fields.iter().enumerate() {
        let placeholder = format!("#f{index}");
        names.insert(placeholder.clone(), field.clone());
        paths.push(format!("{DATA_PLACEHOLDER}.{placeholder}"));
    }

    Projection {
        expression: paths.join(", "),
        names,
    }
}

/// A `SET` update expression with its name and value bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Builds the update expression merging `changes` into the stored payload.
///
/// Top-level fields are assigned at `data.<field>`. An object under
/// `modification_info` is assigned key by key so creation metadata is kept.
/// `item_id` is always re-set to its current value, which keeps the
/// expression non-empty for an empty payload. The `#data` name is bound only
/// when some `data.*` path is assigned.
pub fn update_expression(item_id: &str, changes: &ItemData) -> Update {
    let mut builder = UpdateBuilder::default();
    builder
        .names
        .insert(DATA_PLACEHOLDER.to_string(), DATA_ATTRIBUTE.to_string());

    let item_id_value = builder.bind_value(&Value::String(item_id.to_string()));
    let item_id_name = builder.bind_name(ITEM_ID_ATTRIBUTE);
    builder
        .assignments
        .push(format!("{item_id_name} = {item_id_value}"));

    for (field, value) in changes {
        if field == MODIFICATION_INFO_FIELD
            && value.as_object().is_some_and(|inner| inner.is_empty())
        {
            continue;
        }

        let field_name = builder.bind_name(field);
        match value {
            Value::Object(inner) if field == MODIFICATION_INFO_FIELD => {
                for (key, inner_value) in inner {
                    let key_name = builder.bind_name(key);
                    let placeholder = builder.bind_value(inner_value);
                    builder.assignments.push(format!(
                        "{DATA_PLACEHOLDER}.{field_name}.{key_name} = {placeholder}"
                    ));
                }
            }
            _ => {
                let placeholder = builder.bind_value(value);
                builder
                    .assignments
                    .push(format!("{DATA_PLACEHOLDER}.{field_name} = {placeholder}"));
            }
        }
    }

    // Only the item_id assignment: DynamoDB rejects unused attribute names.
    if builder.assignments.len() == 1 {
        builder.names.remove(DATA_PLACEHOLDER);
    }

    Update {
        expression: format!("SET {}", builder.assignments.join(", ")),
        names: builder.names,
        values: builder.values,
    }
}

#[derive(Default)]
struct UpdateBuilder {
    assignments: Vec<String>,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl UpdateBuilder {
    fn bind_name(&mut self, name: &str) -> String {
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), name.to_string());
        placeholder
    }

    fn bind_value(&mut self, value: &Value) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values
            .insert(placeholder.clone(), value_to_attribute(value));
        placeholder
    }
}
