// SPDX-License-Identifier: AGPL-3.0-or-later

//! Entry point tying the three compilation stages together.

use log::debug;
use serde_json::{Map, Value};

use crate::action::Action;
use crate::document::{build_document, Document};
use crate::errors::AdapterError;
use crate::introspection::IntrospectedSchema;
use crate::options::{AdapterOptions, CustomAction, ResourceOptions};
use crate::query::{build_variables, ActionParams};
use crate::response::ResponseParser;

/// Compiles CRUD-style actions against one introspected schema.
///
/// Holds the immutable schema snapshot and the caller's per-resource options.
/// Compilation is pure and synchronous; the adapter can be shared across
/// threads freely.
#[derive(Debug)]
pub struct Adapter {
    schema: IntrospectedSchema,
    options: AdapterOptions,
}

/// One compiled operation: the executable document, its variables and the
/// parser for the eventual response.
#[derive(Debug)]
pub struct QueryPlan {
    /// Executable GraphQL document.
    pub query: Document,

    /// Variables to send alongside the document.
    pub variables: Map<String, Value>,

    /// Normalizer to apply to the transport's response.
    pub parse_response: ResponseParser,
}

/// Outcome of compiling one action.
#[derive(Debug)]
pub enum CompiledQuery {
    /// Operation compiled through the pipeline.
    Plan(QueryPlan),

    /// Caller-registered override for this action; compilation is skipped
    /// and the caller executes the implementation itself.
    Custom(CustomAction),
}

impl CompiledQuery {
    /// The compiled plan, unless a custom action intercepted the build.
    pub fn plan(self) -> Option<QueryPlan> {
        match self {
            CompiledQuery::Plan(plan) => Some(plan),
            CompiledQuery::Custom(_) => None,
        }
    }
}

impl Adapter {
    /// Adapter over an already derived schema snapshot.
    pub fn new(schema: IntrospectedSchema, options: AdapterOptions) -> Self {
        Self { schema, options }
    }

    /// The schema snapshot the adapter compiles against.
    pub fn schema(&self) -> &IntrospectedSchema {
        &self.schema
    }

    /// Compiles an action on a resource into a document, variables and a
    /// response parser.
    ///
    /// The resource is resolved by its configured alias or its logical name;
    /// the operation field is resolved from the action kind. Failures name
    /// the known resources or the database permission which is likely
    /// missing.
    pub fn build_query(
        &self,
        action: Action,
        resource: &str,
        params: &ActionParams,
    ) -> Result<CompiledQuery, AdapterError> {
        let default_options = ResourceOptions::default();
        let resource_options = self
            .options
            .resource_options
            .get(resource)
            .unwrap_or(&default_options);

        if let Some(custom) = resource_options.custom_action(action) {
            debug!("Dispatching {} on {} to a custom action", action, resource);
            return Ok(CompiledQuery::Custom(custom.clone()));
        }

        let alias = resource_options.alias.as_deref();
        let type_name = alias.unwrap_or(resource);
        let introspected =
            self.schema
                .resource(type_name)
                .ok_or_else(|| AdapterError::UnknownResource {
                    resource: resource.to_string(),
                    alias: alias.map(ToString::to_string),
                    known: self.schema.resource_names(),
                })?;

        let operation =
            introspected
                .operation(action)
                .ok_or_else(|| AdapterError::UnsupportedOperation {
                    resource: introspected.type_name().to_string(),
                    permission: action.permission(),
                })?;

        debug!(
            "Compiling {} on {} into operation {}",
            action, resource, operation.name
        );

        let variables = build_variables(introspected, action, params, resource_options)?;
        let query = build_document(introspected.ty(), action, operation, &variables);
        let parse_response =
            ResponseParser::new(action, resource, &resource_options.primary_keys);

        Ok(CompiledQuery::Plan(QueryPlan {
            query,
            variables,
            parse_response,
        }))
    }
}
