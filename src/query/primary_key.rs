// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boolean expressions matching records by primary key, and the composite
//! identifier encoding shared with the calling framework.
//!
//! Resources with two or more primary-key columns have no single scalar
//! identifier, so their records travel under a JSON-encoded object mapping
//! each column to its value. [`encode_composite_id`] and
//! [`decode_composite_id`] are the only places aware of that representation.

use serde_json::{json, Map, Value};

use crate::constants;
use crate::errors::AdapterError;

/// Encodes composite primary-key components into the stable identifier
/// string handed to the calling framework.
///
/// Inverse of [`decode_composite_id`]; the pair must round-trip.
pub fn encode_composite_id(components: &Map<String, Value>) -> String {
    Value::Object(components.clone()).to_string()
}

/// Decodes a composite identifier string into its components, validated and
/// ordered by the declared primary-key columns.
pub fn decode_composite_id(
    id: &str,
    primary_keys: &[String],
) -> Result<Map<String, Value>, AdapterError> {
    let decoded: Value = serde_json::from_str(id)
        .map_err(|_| AdapterError::MalformedIdentifier(id.to_string()))?;
    let object = decoded
        .as_object()
        .ok_or_else(|| AdapterError::MalformedIdentifier(id.to_string()))?;

    let mut components = Map::new();
    for key in primary_keys {
        let value = object
            .get(key)
            .ok_or_else(|| AdapterError::IncompleteIdentifier {
                value: id.to_string(),
                column: key.clone(),
            })?;
        components.insert(key.clone(), value.clone());
    }

    Ok(components)
}

/// Builds one boolean expression per identifier value.
///
/// With zero or one declared primary-key columns this is a single
/// equality or membership test on the key column (`id` when none is
/// declared). With composite keys every identifier must be a JSON-encoded
/// component object and maps to one equality conjunction.
///
/// Callers collapse the result with [`any_of`].
pub fn identifier_expressions(
    ids: &[Value],
    primary_keys: &[String],
) -> Result<Vec<Value>, AdapterError> {
    if primary_keys.len() <= 1 {
        let key = primary_keys
            .first()
            .map(String::as_str)
            .unwrap_or(constants::DEFAULT_PRIMARY_KEY);
        let test = match ids {
            [id] => json!({ (constants::EQ_OPERATOR): id }),
            _ => json!({ (constants::IN_OPERATOR): ids }),
        };

        return Ok(vec![json!({ key: test })]);
    }

    ids.iter()
        .map(|id| {
            let encoded = id
                .as_str()
                .ok_or_else(|| AdapterError::MalformedIdentifier(id.to_string()))?;
            let components = decode_composite_id(encoded, primary_keys)?;

            Ok(equality_conjunction(&components))
        })
        .collect()
}

/// Builds the boolean expression matching the given records by their
/// primary-key values.
///
/// Used by callers holding whole rows instead of opaque identifiers.
pub fn record_key_expression(
    records: &[Map<String, Value>],
    primary_keys: &[String],
) -> Result<Value, AdapterError> {
    if records.is_empty() {
        return Err(AdapterError::EmptyInput);
    }

    if primary_keys.len() <= 1 {
        let key = primary_keys
            .first()
            .map(String::as_str)
            .unwrap_or(constants::DEFAULT_PRIMARY_KEY);
        let values: Vec<Value> = records
            .iter()
            .map(|record| record.get(key).cloned().unwrap_or(Value::Null))
            .collect();
        let test = match values.as_slice() {
            [value] => json!({ (constants::EQ_OPERATOR): value }),
            _ => json!({ (constants::IN_OPERATOR): values }),
        };

        return Ok(json!({ key: test }));
    }

    let conjunctions: Vec<Value> = records
        .iter()
        .map(|record| {
            let components: Map<String, Value> = primary_keys
                .iter()
                .map(|key| {
                    (
                        key.clone(),
                        record.get(key).cloned().unwrap_or(Value::Null),
                    )
                })
                .collect();

            equality_conjunction(&components)
        })
        .collect();

    Ok(json!({ (constants::AND_OPERATOR): conjunctions }))
}

/// Collapses per-identifier expressions into a single boolean expression,
/// `_or`-joined when there are several.
pub(crate) fn any_of(mut expressions: Vec<Value>) -> Value {
    match expressions.len() {
        1 => expressions.remove(0),
        _ => json!({ (constants::OR_OPERATOR): expressions }),
    }
}

fn equality_conjunction(components: &Map<String, Value>) -> Value {
    let conjunction: Map<String, Value> = components
        .iter()
        .map(|(key, value)| (key.clone(), json!({ (constants::EQ_OPERATOR): value })))
        .collect();

    Value::Object(conjunction)
}
