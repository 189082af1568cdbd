// SPDX-License-Identifier: AGPL-3.0-or-later

//! Translation of named filter maps into the backend's boolean-expression
//! dialect.

use serde_json::{json, Map, Value};

use crate::constants;
use crate::errors::AdapterError;
use crate::options::FilterExpressions;

use super::primary_key::{any_of, identifier_expressions};

/// Translates a filter map into the top-level conjuncts of a `where`
/// expression.
///
/// Keys are handled in insertion order, each by the first matching rule:
/// a custom expression registered for the key, the reserved `ids` key
/// (expanded via the primary-key builder), a dotted path, or the default
/// translation of [`leaf_expression`]. Custom expressions and `ids` apply at
/// this level only; nested maps recurse with the remaining rules.
pub(crate) fn filter_conjuncts(
    filter: &Map<String, Value>,
    primary_keys: &[String],
    custom: Option<&FilterExpressions>,
) -> Result<Vec<Value>, AdapterError> {
    let mut conjuncts = Vec::with_capacity(filter.len());

    for (key, value) in filter {
        if let Some(expression) = custom.and_then(|expressions| expressions.for_field(key)) {
            conjuncts.push(expression(value));
            continue;
        }

        if key == constants::IDS_FILTER_KEY {
            let ids = match value {
                Value::Array(ids) => ids.as_slice(),
                single => std::slice::from_ref(single),
            };
            conjuncts.push(any_of(identifier_expressions(ids, primary_keys)?));
            continue;
        }

        conjuncts.push(key_conjunct(key, value)?);
    }

    Ok(conjuncts)
}

/// Conjunct for one non-reserved filter key.
fn key_conjunct(key: &str, value: &Value) -> Result<Value, AdapterError> {
    let leaf = leaf_expression(value)?;

    if key.contains('.') {
        return Ok(nested_path(key, leaf));
    }

    Ok(json!({ key: leaf }))
}

/// Expression tested against the value reached by a filter key.
///
/// Arrays become membership tests, nested maps recurse into a conjunction
/// and anything else is an equality test.
fn leaf_expression(value: &Value) -> Result<Value, AdapterError> {
    match value {
        Value::Array(_) => Ok(json!({ (constants::IN_OPERATOR): value })),
        Value::Object(nested) => {
            let conjuncts: Vec<Value> = nested
                .iter()
                .map(|(key, value)| key_conjunct(key, value))
                .collect::<Result<_, _>>()?;

            Ok(json!({ (constants::AND_OPERATOR): conjuncts }))
        }
        scalar => Ok(json!({ (constants::EQ_OPERATOR): scalar })),
    }
}

/// Expands a dotted path into nested single-key objects around a leaf value.
pub(crate) fn nested_path(path: &str, leaf: Value) -> Value {
    path.rsplit('.')
        .fold(leaf, |inner, segment| json!({ segment: inner }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::{json, Map, Value};

    use super::{filter_conjuncts, nested_path};
    use crate::options::{FieldExpression, FilterExpressions};

    fn filter(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn translates_filter_keys_in_insertion_order() {
        let filter = filter(json!({
            "ids": ["foo1", "foo2"],
            "tags": { "id": ["tag1", "tag2"] },
            "author.id": "author1",
            "views": 100
        }));

        let conjuncts = filter_conjuncts(&filter, &[], None).unwrap();

        assert_eq!(
            Value::Array(conjuncts),
            json!([
                { "id": { "_in": ["foo1", "foo2"] } },
                { "tags": { "_and": [{ "id": { "_in": ["tag1", "tag2"] } }] } },
                { "author": { "id": { "_eq": "author1" } } },
                { "views": { "_eq": 100 } }
            ])
        );
    }

    #[test]
    fn ids_respect_declared_primary_keys() {
        let filter = filter(json!({ "ids": ["foo1", "foo2"] }));
        let primary_keys = vec!["article_id".to_string()];

        let conjuncts = filter_conjuncts(&filter, &primary_keys, None).unwrap();

        assert_eq!(
            Value::Array(conjuncts),
            json!([{ "article_id": { "_in": ["foo1", "foo2"] } }])
        );
    }

    #[test]
    fn custom_expressions_override_the_default_translation() {
        let mut fields: HashMap<String, FieldExpression> = HashMap::new();
        fields.insert(
            "views".to_string(),
            Arc::new(|value: &Value| json!({ "views": { "_gte": value } })),
        );
        let custom = FilterExpressions::Fields(fields);

        let filter = filter(json!({ "views": 100, "title": "Foo" }));
        let conjuncts = filter_conjuncts(&filter, &[], Some(&custom)).unwrap();

        assert_eq!(
            Value::Array(conjuncts),
            json!([
                { "views": { "_gte": 100 } },
                { "title": { "_eq": "Foo" } }
            ])
        );
    }

    #[rstest]
    #[case::single_segment("name", json!({ "name": { "_eq": 1 } }))]
    #[case::two_segments("author.id", json!({ "author": { "id": { "_eq": 1 } } }))]
    #[case::three_segments(
        "author.team.id",
        json!({ "author": { "team": { "id": { "_eq": 1 } } } })
    )]
    fn expands_dotted_paths(#[case] path: &str, #[case] expected: Value) {
        assert_eq!(nested_path(path, json!({ "_eq": 1 })), expected);
    }

    #[test]
    fn empty_filters_produce_no_conjuncts() {
        let conjuncts = filter_conjuncts(&Map::new(), &[], None).unwrap();
        assert!(conjuncts.is_empty());
    }
}
