// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared fixtures for compilation tests.

use serde_json::{json, Value};

use crate::introspection::{IntrospectedSchema, IntrospectionResponse};

/// Wire form of a named type reference.
pub fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

/// Wire form of a `NON_NULL` wrapper.
pub fn non_null(of_type: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": of_type })
}

/// Wire form of a `LIST` wrapper.
pub fn list(of_type: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": of_type })
}

/// Wire form of a declared argument.
pub fn arg(name: &str, type_ref: Value) -> Value {
    json!({ "name": name, "type": type_ref })
}

/// Wire form of an object field.
pub fn field(name: &str, args: Value, type_ref: Value) -> Value {
    json!({ "name": name, "args": args, "type": type_ref })
}

/// Arguments Hasura declares on every collection query.
fn collection_args(type_name: &str) -> Value {
    json!([
        arg("where", named("INPUT_OBJECT", &format!("{}_bool_exp", type_name))),
        arg("limit", named("SCALAR", "Int")),
        arg("offset", named("SCALAR", "Int")),
        arg(
            "order_by",
            list(non_null(named("INPUT_OBJECT", &format!("{}_order_by", type_name))))
        ),
        arg(
            "distinct_on",
            list(non_null(named("ENUM", &format!("{}_select_column", type_name))))
        ),
    ])
}

/// Introspection response of a small blog schema: full CRUD for `articles`,
/// read-only `users`, and a `tags` type without operations of its own.
pub fn blog_introspection() -> IntrospectionResponse {
    let collection = |type_name: &str| non_null(list(non_null(named("OBJECT", type_name))));

    let response = json!({
        "__schema": {
            "queryType": { "name": "query_root" },
            "mutationType": { "name": "mutation_root" },
            "subscriptionType": { "name": "subscription_root" },
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "query_root",
                    "fields": [
                        field("articles", collection_args("articles"), collection("articles")),
                        field(
                            "articles_aggregate",
                            collection_args("articles"),
                            non_null(named("OBJECT", "articles_aggregate"))
                        ),
                        field("users", collection_args("users"), collection("users")),
                        field(
                            "users_aggregate",
                            collection_args("users"),
                            non_null(named("OBJECT", "users_aggregate"))
                        ),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "mutation_root",
                    "fields": [
                        field(
                            "insert_articles",
                            json!([
                                arg(
                                    "objects",
                                    non_null(list(non_null(named(
                                        "INPUT_OBJECT",
                                        "articles_insert_input"
                                    ))))
                                ),
                                arg("on_conflict", named("INPUT_OBJECT", "articles_on_conflict")),
                            ]),
                            named("OBJECT", "articles_mutation_response")
                        ),
                        field(
                            "update_articles",
                            json!([
                                arg("_set", named("INPUT_OBJECT", "articles_set_input")),
                                arg("where", non_null(named("INPUT_OBJECT", "articles_bool_exp"))),
                            ]),
                            named("OBJECT", "articles_mutation_response")
                        ),
                        field(
                            "delete_articles",
                            json!([
                                arg("where", non_null(named("INPUT_OBJECT", "articles_bool_exp"))),
                            ]),
                            named("OBJECT", "articles_mutation_response")
                        ),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "articles",
                    "fields": [
                        field("id", json!([]), non_null(named("SCALAR", "uuid"))),
                        field("title", json!([]), non_null(named("SCALAR", "String"))),
                        field("views", json!([]), named("SCALAR", "Int")),
                        field("author", json!([]), named("OBJECT", "users")),
                        field("tags", json!([]), non_null(list(non_null(named("OBJECT", "tags"))))),
                        field("_state", json!([]), named("SCALAR", "String")),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "users",
                    "fields": [
                        field("id", json!([]), non_null(named("SCALAR", "uuid"))),
                        field("name", json!([]), non_null(named("SCALAR", "String"))),
                        field("email", json!([]), named("SCALAR", "String")),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "tags",
                    "fields": [
                        field("id", json!([]), non_null(named("SCALAR", "uuid"))),
                        field("name", json!([]), named("SCALAR", "String")),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "articles_aggregate",
                    "fields": [
                        field("aggregate", json!([]), named("OBJECT", "articles_aggregate_fields")),
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "articles_mutation_response",
                    "fields": [
                        field("affected_rows", json!([]), non_null(named("SCALAR", "Int"))),
                        field(
                            "returning",
                            json!([]),
                            non_null(list(non_null(named("OBJECT", "articles"))))
                        ),
                    ]
                },
                { "kind": "SCALAR", "name": "uuid" },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "SCALAR", "name": "Int" },
                { "kind": "INPUT_OBJECT", "name": "articles_bool_exp" },
                { "kind": "INPUT_OBJECT", "name": "articles_order_by" },
                { "kind": "ENUM", "name": "articles_select_column" }
            ]
        }
    });

    serde_json::from_value(response).unwrap()
}

/// Snapshot derived from [`blog_introspection`] with default options.
pub fn blog_schema() -> IntrospectedSchema {
    IntrospectedSchema::from_response(blog_introspection(), &Default::default())
}
