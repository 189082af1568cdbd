// SPDX-License-Identifier: AGPL-3.0-or-later

//! # hasura-adapter
//!
//! Compiles CRUD-style actions into executable Hasura GraphQL operations.
//! Given an introspected schema snapshot, an action kind and its parameters,
//! the adapter produces the operation document, the variables object to send
//! with it and a parser normalizing the eventual response into flat records.
//!
//! The whole pipeline is pure and synchronous: executing operations,
//! delivering subscription events and fetching the introspection result stay
//! with the caller.
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

mod action;
mod adapter;
mod constants;
mod document;
mod errors;
mod introspection;
mod options;
mod query;
mod response;

#[cfg(test)]
mod test_helpers;

pub use crate::action::Action;
pub use crate::adapter::{Adapter, CompiledQuery, QueryPlan};
pub use crate::document::{
    build_document, Argument, Document, Field, OperationKind, VariableDefinition, VariableType,
};
pub use crate::errors::AdapterError;
pub use crate::introspection::{
    FieldDescription, FullType, InputValue, IntrospectedResource, IntrospectedSchema,
    IntrospectionResponse, RootTypeName, SchemaDescription, TypeKind, TypeRef,
};
pub use crate::options::{
    AdapterOptions, CustomAction, FieldExpression, FilterExpressions, IntrospectionOptions,
    OperationName, ParamsExpression, ResourceOptions, ResourceOptionsMap, TypeFilter,
};
pub use crate::query::{
    build_variables, decode_composite_id, encode_composite_id, identifier_expressions,
    record_key_expression, ActionParams, Pagination, Sort, SortOrder,
};
pub use crate::response::{ParsedResponse, ResponseParser};
