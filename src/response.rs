// SPDX-License-Identifier: AGPL-3.0-or-later

//! Normalization of raw GraphQL responses into flat, framework-facing
//! records.
//!
//! The parser undoes the envelope shapes compiled by the document builder,
//! synthesizes a stable `id` for resources with non-default or composite
//! primary keys and sanitizes every record: internal and null fields are
//! dropped, nested records gain sibling id fields so flat record consumers
//! can follow relations without traversing objects.

use serde_json::{Map, Value};

use crate::action::Action;
use crate::constants;
use crate::errors::AdapterError;
use crate::query::encode_composite_id;

/// Parsed, framework-facing form of one GraphQL response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Sanitized record, record list or id list, depending on the action.
    pub data: Value,

    /// Total row count of paginated reads.
    pub total: Option<u64>,
}

/// Normalizer for responses of one compiled operation.
///
/// Returned by the adapter alongside the document and variables and applied
/// to the transport's response later. It holds no references into the schema
/// snapshot and performs no I/O, so it can cross thread and task boundaries
/// freely.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    action: Action,
    resource: String,
    primary_keys: Vec<String>,
}

impl ResponseParser {
    /// Parser for the given action on a resource.
    pub fn new(action: Action, resource: &str, primary_keys: &[String]) -> Self {
        Self {
            action,
            resource: resource.to_string(),
            primary_keys: primary_keys.to_vec(),
        }
    }

    /// Normalizes a raw response into the record shape of this parser's
    /// action.
    pub fn parse(&self, response: &Value) -> Result<ParsedResponse, AdapterError> {
        let body = self.field(response, constants::RESPONSE_DATA_FIELD)?;

        match self.action {
            Action::GetList
            | Action::GetManyReference
            | Action::WatchList
            | Action::WatchManyReference => {
                let records = self.records(self.array(body, constants::ITEMS_ALIAS)?)?;

                Ok(ParsedResponse {
                    data: Value::Array(records),
                    total: Some(self.count(body)?),
                })
            }
            Action::GetMany | Action::WatchMany => {
                let records = self.records(self.array(body, constants::ITEMS_ALIAS)?)?;

                Ok(ParsedResponse {
                    data: Value::Array(records),
                    total: None,
                })
            }
            Action::GetOne | Action::WatchOne => {
                let returning = self.array(body, constants::RETURNING_FIELD)?;
                let record = self.single(returning)?;

                Ok(ParsedResponse {
                    data: Value::Object(self.normalize(record)?),
                    total: None,
                })
            }
            Action::Create | Action::Update | Action::Delete => {
                let result = self.field(body, constants::MUTATION_DATA_ALIAS)?;
                let returning = self.array(result, constants::RETURNING_FIELD)?;
                let record = self.single(returning)?;

                Ok(ParsedResponse {
                    data: Value::Object(self.normalize(record)?),
                    total: None,
                })
            }
            Action::UpdateMany | Action::DeleteMany => {
                let result = self.field(body, constants::MUTATION_DATA_ALIAS)?;
                let returning = self.array(result, constants::RETURNING_FIELD)?;

                let ids = returning
                    .iter()
                    .map(|record| {
                        let record = self.serialize_item_id(self.record(record)?)?;

                        Ok(record
                            .get(constants::DEFAULT_PRIMARY_KEY)
                            .cloned()
                            .unwrap_or(Value::Null))
                    })
                    .collect::<Result<Vec<Value>, AdapterError>>()?;

                Ok(ParsedResponse {
                    data: Value::Array(ids),
                    total: None,
                })
            }
        }
    }

    fn records(&self, items: &[Value]) -> Result<Vec<Value>, AdapterError> {
        items
            .iter()
            .map(|record| Ok(Value::Object(self.normalize(record)?)))
            .collect()
    }

    fn normalize(&self, record: &Value) -> Result<Map<String, Value>, AdapterError> {
        let record = self.serialize_item_id(self.record(record)?)?;

        Ok(sanitize_resource(&record))
    }

    /// Synthesizes the stable `id` of a record from its declared primary-key
    /// columns.
    ///
    /// Without declared primary keys the record is trusted to carry its own
    /// `id`, and an already present `id` always wins. A single declared
    /// column is copied; multiple columns are encoded into the composite
    /// identifier string the expression builder decodes on the way in.
    fn serialize_item_id(
        &self,
        record: &Map<String, Value>,
    ) -> Result<Map<String, Value>, AdapterError> {
        let has_id = record
            .get(constants::DEFAULT_PRIMARY_KEY)
            .map_or(false, |id| !id.is_null());
        if self.primary_keys.is_empty() || has_id {
            return Ok(record.clone());
        }

        let mut record = record.clone();
        let id = if let [key] = self.primary_keys.as_slice() {
            self.key_value(&record, key)?
        } else {
            let mut components = Map::new();
            for key in &self.primary_keys {
                components.insert(key.clone(), self.key_value(&record, key)?);
            }

            Value::String(encode_composite_id(&components))
        };
        record.insert(constants::DEFAULT_PRIMARY_KEY.to_string(), id);

        Ok(record)
    }

    fn key_value(&self, record: &Map<String, Value>, key: &str) -> Result<Value, AdapterError> {
        match record.get(key) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(AdapterError::MissingPrimaryKeyValue {
                resource: self.resource.clone(),
                column: key.to_string(),
            }),
        }
    }

    fn count(&self, body: &Value) -> Result<u64, AdapterError> {
        self.field(body, constants::TOTAL_ALIAS)?
            .get(constants::AGGREGATE_FIELD)
            .and_then(|aggregate| aggregate.get(constants::COUNT_FIELD))
            .and_then(Value::as_u64)
            .ok_or_else(|| self.unexpected(constants::TOTAL_ALIAS))
    }

    fn field<'a>(&self, value: &'a Value, field: &str) -> Result<&'a Value, AdapterError> {
        value.get(field).ok_or_else(|| self.unexpected(field))
    }

    fn array<'a>(&self, value: &'a Value, field: &str) -> Result<&'a [Value], AdapterError> {
        self.field(value, field)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.unexpected(field))
    }

    fn record<'a>(&self, value: &'a Value) -> Result<&'a Map<String, Value>, AdapterError> {
        value
            .as_object()
            .ok_or_else(|| self.unexpected(constants::RETURNING_FIELD))
    }

    fn single<'a>(&self, returning: &'a [Value]) -> Result<&'a Value, AdapterError> {
        returning
            .first()
            .ok_or_else(|| self.unexpected(constants::RETURNING_FIELD))
    }

    fn unexpected(&self, field: &str) -> AdapterError {
        AdapterError::UnexpectedResponse {
            action: self.action.to_string(),
            field: field.to_string(),
        }
    }
}

/// Recursively strips internal and null fields and synthesizes linked-id
/// siblings.
///
/// An array of records carrying ids additionally yields a sibling
/// `<field>Ids` list; a single nested record carrying an id yields a sibling
/// `<field>.id` scalar. Already sanitized records pass through unchanged.
pub(crate) fn sanitize_resource(record: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();

    for (key, value) in record {
        if key.starts_with(constants::INTERNAL_PREFIX) {
            continue;
        }

        match value {
            Value::Null => continue,
            Value::Array(elements) => {
                if let Some(Value::Object(first)) = elements.first() {
                    let sanitized = elements
                        .iter()
                        .map(|element| match element {
                            Value::Object(nested) => Value::Object(sanitize_resource(nested)),
                            other => other.clone(),
                        })
                        .collect();

                    let linked = first
                        .get(constants::DEFAULT_PRIMARY_KEY)
                        .map_or(false, |id| !id.is_null());
                    result.insert(key.clone(), Value::Array(sanitized));
                    if linked {
                        let ids = elements
                            .iter()
                            .map(|element| {
                                element
                                    .get(constants::DEFAULT_PRIMARY_KEY)
                                    .cloned()
                                    .unwrap_or(Value::Null)
                            })
                            .collect();
                        result.insert(
                            format!("{}{}", key, constants::LINKED_IDS_SUFFIX),
                            Value::Array(ids),
                        );
                    }
                } else {
                    result.insert(key.clone(), value.clone());
                }
            }
            Value::Object(nested) => {
                if let Some(id) = nested
                    .get(constants::DEFAULT_PRIMARY_KEY)
                    .filter(|id| !id.is_null())
                {
                    result.insert(
                        format!("{}.{}", key, constants::DEFAULT_PRIMARY_KEY),
                        id.clone(),
                    );
                }
                result.insert(key.clone(), Value::Object(sanitize_resource(nested)));
            }
            _ => {
                result.insert(key.clone(), value.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    use super::{sanitize_resource, ParsedResponse, ResponseParser};
    use crate::action::Action;
    use crate::query::decode_composite_id;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn post(id: &str, tag_ids: &[&str]) -> Value {
        json!({
            "_typeName": "Post",
            "id": id,
            "title": format!("title of {}", id),
            "author": { "id": "author1", "firstName": "Toto" },
            "coauthor": null,
            "tags": tag_ids
                .iter()
                .map(|tag| json!({ "id": tag, "name": format!("{} name", tag) }))
                .collect::<Vec<Value>>(),
            "embeddedJson": { "foo": "bar" }
        })
    }

    fn sanitized_post(id: &str, tag_ids: &[&str]) -> Value {
        json!({
            "id": id,
            "title": format!("title of {}", id),
            "author.id": "author1",
            "author": { "id": "author1", "firstName": "Toto" },
            "tags": tag_ids
                .iter()
                .map(|tag| json!({ "id": tag, "name": format!("{} name", tag) }))
                .collect::<Vec<Value>>(),
            "tagsIds": tag_ids,
            "embeddedJson": { "foo": "bar" }
        })
    }

    #[rstest]
    #[case::get_list(Action::GetList)]
    #[case::get_many_reference(Action::GetManyReference)]
    #[case::watch_list(Action::WatchList)]
    #[case::watch_many_reference(Action::WatchManyReference)]
    fn list_responses_flatten_items_and_total(#[case] action: Action) {
        let parser = ResponseParser::new(action, "Post", &[]);
        let response = json!({
            "data": {
                "items": [post("post1", &["tag1", "tag2"]), post("post2", &["tag1", "tag3"])],
                "total": { "aggregate": { "count": 100 } }
            }
        });

        assert_eq!(
            parser.parse(&response).unwrap(),
            ParsedResponse {
                data: json!([
                    sanitized_post("post1", &["tag1", "tag2"]),
                    sanitized_post("post2", &["tag1", "tag3"])
                ]),
                total: Some(100),
            }
        );
    }

    #[rstest]
    #[case::get_many(Action::GetMany)]
    #[case::watch_many(Action::WatchMany)]
    fn batch_read_responses_carry_no_total(#[case] action: Action) {
        let parser = ResponseParser::new(action, "Post", &[]);
        let response = json!({
            "data": { "items": [post("post1", &["tag1", "tag2"])] }
        });

        assert_eq!(
            parser.parse(&response).unwrap(),
            ParsedResponse {
                data: json!([sanitized_post("post1", &["tag1", "tag2"])]),
                total: None,
            }
        );
    }

    #[rstest]
    #[case::get_one(Action::GetOne)]
    #[case::watch_one(Action::WatchOne)]
    fn single_read_responses_unwrap_the_first_record(#[case] action: Action) {
        let parser = ResponseParser::new(action, "Post", &[]);
        let response = json!({
            "data": { "returning": [post("post1", &["tag1", "tag2"])] }
        });

        assert_eq!(
            parser.parse(&response).unwrap(),
            ParsedResponse {
                data: sanitized_post("post1", &["tag1", "tag2"]),
                total: None,
            }
        );
    }

    #[rstest]
    #[case::create(Action::Create)]
    #[case::update(Action::Update)]
    #[case::delete(Action::Delete)]
    fn mutation_responses_unwrap_the_nested_returning_record(#[case] action: Action) {
        let parser = ResponseParser::new(action, "Post", &[]);
        let response = json!({
            "data": { "data": { "returning": [post("post1", &["tag1", "tag2"])] } }
        });

        assert_eq!(
            parser.parse(&response).unwrap(),
            ParsedResponse {
                data: sanitized_post("post1", &["tag1", "tag2"]),
                total: None,
            }
        );
    }

    #[rstest]
    #[case::update_many(Action::UpdateMany)]
    #[case::delete_many(Action::DeleteMany)]
    fn batch_mutation_responses_reduce_to_identifiers(#[case] action: Action) {
        let parser = ResponseParser::new(action, "Post", &[]);
        let response = json!({
            "data": {
                "data": {
                    "returning": [{ "id": "post1", "title": "x" }, { "id": "post2", "title": "y" }]
                }
            }
        });

        assert_eq!(
            parser.parse(&response).unwrap(),
            ParsedResponse {
                data: json!(["post1", "post2"]),
                total: None,
            }
        );
    }

    #[test]
    fn single_primary_key_is_copied_into_id() {
        let parser = ResponseParser::new(Action::GetOne, "teams", &["team_id".to_string()]);
        let response = json!({
            "data": { "returning": [{ "team_id": 7, "name": "blue" }] }
        });

        assert_eq!(
            parser.parse(&response).unwrap().data,
            json!({ "team_id": 7, "name": "blue", "id": 7 })
        );
    }

    #[test]
    fn composite_primary_keys_become_a_decodable_identifier() {
        let primary_keys = vec!["article_id".to_string(), "category_id".to_string()];
        let parser = ResponseParser::new(Action::GetOne, "articles", &primary_keys);
        let response = json!({
            "data": { "returning": [{ "article_id": "foo1", "category_id": 1 }] }
        });

        let data = parser.parse(&response).unwrap().data;
        let id = data["id"].as_str().unwrap();

        let components = decode_composite_id(id, &primary_keys).unwrap();
        assert_eq!(
            Value::Object(components),
            json!({ "article_id": "foo1", "category_id": 1 })
        );
    }

    #[test]
    fn present_id_is_never_overwritten() {
        let parser = ResponseParser::new(Action::GetOne, "teams", &["team_id".to_string()]);
        let response = json!({
            "data": { "returning": [{ "id": "keep", "team_id": 7 }] }
        });

        assert_eq!(parser.parse(&response).unwrap().data["id"], json!("keep"));
    }

    #[test]
    fn missing_primary_key_value_is_an_error() {
        let parser = ResponseParser::new(Action::GetOne, "teams", &["team_id".to_string()]);
        let response = json!({
            "data": { "returning": [{ "team_id": null, "name": "blue" }] }
        });

        assert_eq!(
            parser.parse(&response).unwrap_err().to_string(),
            "primary key value is null or undefined; resource teams; column: team_id"
        );
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let once = sanitize_resource(&object(post("post1", &["tag1"])));
        let twice = sanitize_resource(&once);

        assert_eq!(Value::Object(twice), Value::Object(once));
    }

    #[test]
    fn scalar_arrays_and_plain_objects_pass_through() {
        let sanitized = sanitize_resource(&object(json!({
            "labels": ["a", "b"],
            "empty": [],
            "meta": { "nested": { "deep": true } }
        })));

        assert_eq!(
            Value::Object(sanitized),
            json!({
                "labels": ["a", "b"],
                "empty": [],
                "meta": { "nested": { "deep": true } }
            })
        );
    }

    #[test]
    fn arrays_of_records_without_ids_get_no_sibling_list() {
        let sanitized = sanitize_resource(&object(json!({
            "points": [{ "x": 1, "y": 2 }, { "x": 3, "y": 4 }]
        })));

        assert_eq!(
            Value::Object(sanitized),
            json!({ "points": [{ "x": 1, "y": 2 }, { "x": 3, "y": 4 }] })
        );
    }

    #[rstest]
    #[case::missing_data(json!({}), "data")]
    #[case::missing_items(json!({ "data": {} }), "items")]
    #[case::missing_total(json!({ "data": { "items": [] } }), "total")]
    fn envelope_mismatches_are_reported_with_the_missing_field(
        #[case] response: Value,
        #[case] field: &str,
    ) {
        let parser = ResponseParser::new(Action::GetList, "Post", &[]);

        assert_eq!(
            parser.parse(&response).unwrap_err().to_string(),
            format!(
                "Unexpected response shape for fetch type GET_LIST: missing field '{}'",
                field
            )
        );
    }

    #[test]
    fn empty_returning_lists_are_reported() {
        let parser = ResponseParser::new(Action::GetOne, "Post", &[]);
        let response = json!({ "data": { "returning": [] } });

        assert_eq!(
            parser.parse(&response).unwrap_err().to_string(),
            "Unexpected response shape for fetch type GET_ONE: missing field 'returning'"
        );
    }
}
