// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordering parameters and their translation into `order_by` maps.

use serde_json::{json, Map, Value};

use crate::constants;

use super::filter::nested_path;

/// Sort direction of an ordering parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,

    /// Largest first.
    Descending,
}

impl SortOrder {
    /// Wire form of the direction, lower-cased as the ordering dialect
    /// expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Parses the conventional `ASC`/`DESC` names, any casing.
    pub fn parse(value: &str) -> Option<SortOrder> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

/// Ordering parameter of a list-like action.
#[derive(Debug, Clone)]
pub struct Sort {
    /// Record field to order by. Dotted paths reach into relations.
    pub field: String,

    /// Direction to order in.
    pub order: SortOrder,
}

/// Builds the `order_by` value for a sort parameter.
///
/// Sorting by `id` on a resource with declared primary keys fans out into
/// one entry per key column, in declaration order.
pub(crate) fn order_by(sort: &Sort, primary_keys: &[String]) -> Value {
    let direction = json!(sort.order.as_str());

    if sort.field == constants::DEFAULT_PRIMARY_KEY && !primary_keys.is_empty() {
        let entries: Map<String, Value> = primary_keys
            .iter()
            .map(|key| (key.clone(), direction.clone()))
            .collect();

        return Value::Object(entries);
    }

    nested_path(&sort.field, direction)
}
