// SPDX-License-Identifier: AGPL-3.0-or-later

//! Build-once snapshot of an introspected schema with its CRUD resources
//! derived.

use std::collections::HashMap;

use log::debug;

use crate::action::Action;
use crate::constants;
use crate::introspection::{FieldDescription, FullType, IntrospectionResponse, SchemaDescription};
use crate::options::IntrospectionOptions;

/// Actions an operation field is resolved for during the introspection pass.
///
/// Watch actions are absent: they resolve through their base read action.
const BASE_ACTIONS: [Action; 9] = [
    Action::GetList,
    Action::GetOne,
    Action::GetMany,
    Action::GetManyReference,
    Action::Create,
    Action::Update,
    Action::UpdateMany,
    Action::Delete,
    Action::DeleteMany,
];

/// Immutable snapshot derived from one introspection result.
///
/// Built once per adapter lifetime and shared read-only afterwards; concurrent
/// lookups need no locking.
#[derive(Debug, Clone)]
pub struct IntrospectedSchema {
    types: Vec<FullType>,
    queries: Vec<FieldDescription>,
    resources: Vec<IntrospectedResource>,
    schema: SchemaDescription,
}

impl IntrospectedSchema {
    /// Derives the snapshot from a raw introspection response.
    pub fn from_response(response: IntrospectionResponse, options: &IntrospectionOptions) -> Self {
        Self::from_schema(response.schema, options)
    }

    /// Derives the snapshot from an already unwrapped `__schema` object.
    pub fn from_schema(schema: SchemaDescription, options: &IntrospectionOptions) -> Self {
        let root_names: Vec<&str> = Some(schema.query_type.name.as_str())
            .into_iter()
            .chain(schema.mutation_type.as_ref().map(|root| root.name.as_str()))
            .collect();
        let is_root = |full_type: &FullType| root_names.contains(&full_type.name.as_str());

        // All operation fields of the query and mutation roots.
        let queries: Vec<FieldDescription> = schema
            .types
            .iter()
            .filter(|full_type| is_root(full_type))
            .flat_map(|full_type| full_type.fields().iter().cloned())
            .collect();

        // All named types except the roots themselves.
        let types: Vec<FullType> = schema
            .types
            .iter()
            .filter(|full_type| !is_root(full_type))
            .cloned()
            .collect();

        let resources: Vec<IntrospectedResource> = types
            .iter()
            .filter(|full_type| is_resource(full_type, &queries, options))
            .filter(|full_type| options.retains(full_type))
            .map(|full_type| IntrospectedResource::derive(full_type.clone(), &queries, options))
            .collect();

        debug!(
            "Introspection derived {} resources from {} schema types",
            resources.len(),
            types.len()
        );

        Self {
            types,
            queries,
            resources,
            schema,
        }
    }

    /// All named types of the schema, minus the operation roots.
    pub fn types(&self) -> &[FullType] {
        &self.types
    }

    /// All operation fields of the query and mutation roots.
    pub fn queries(&self) -> &[FieldDescription] {
        &self.queries
    }

    /// Types recognized as CRUD resources, in introspection order.
    pub fn resources(&self) -> &[IntrospectedResource] {
        &self.resources
    }

    /// The raw schema description the snapshot was derived from.
    pub fn schema(&self) -> &SchemaDescription {
        &self.schema
    }

    /// Looks up a resource by schema type name.
    pub fn resource(&self, type_name: &str) -> Option<&IntrospectedResource> {
        self.resources
            .iter()
            .find(|resource| resource.type_name() == type_name)
    }

    /// Type names of all resources, in introspection order.
    pub fn resource_names(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|resource| resource.type_name().to_string())
            .collect()
    }
}

/// One schema type recognized as a CRUD resource, with the operation field
/// resolved for every action the schema supports.
#[derive(Debug, Clone)]
pub struct IntrospectedResource {
    ty: FullType,
    operations: HashMap<Action, FieldDescription>,
}

impl IntrospectedResource {
    fn derive(
        ty: FullType,
        queries: &[FieldDescription],
        options: &IntrospectionOptions,
    ) -> Self {
        let operations = BASE_ACTIONS
            .iter()
            .filter_map(|action| {
                let name = operation_name(*action, &ty, options);
                queries
                    .iter()
                    .find(|query| query.name == name)
                    .map(|query| (*action, query.clone()))
            })
            .collect();

        Self { ty, operations }
    }

    /// The resource's schema type, with its field list.
    pub fn ty(&self) -> &FullType {
        &self.ty
    }

    /// Schema type name of the resource.
    pub fn type_name(&self) -> &str {
        &self.ty.name
    }

    /// Operation field resolved for the given action, if the schema has one.
    ///
    /// Watch actions look up through their base read action.
    pub fn operation(&self, action: Action) -> Option<&FieldDescription> {
        self.operations.get(&action.read_equivalent())
    }
}

/// Does the schema expose both a list and a get-one operation for this type?
fn is_resource(
    full_type: &FullType,
    queries: &[FieldDescription],
    options: &IntrospectionOptions,
) -> bool {
    [Action::GetList, Action::GetOne].iter().all(|action| {
        let name = operation_name(*action, full_type, options);
        queries.iter().any(|query| query.name == name)
    })
}

/// Operation name for an action: the caller's override when configured,
/// otherwise the built-in Hasura convention.
fn operation_name(action: Action, full_type: &FullType, options: &IntrospectionOptions) -> String {
    if let Some(override_fn) = options.operation_names.get(&action) {
        return override_fn(full_type);
    }

    match action {
        Action::GetList | Action::GetOne | Action::GetMany | Action::GetManyReference => {
            full_type.name.clone()
        }
        Action::Create => format!("{}{}", constants::INSERT_PREFIX, full_type.name),
        Action::Update | Action::UpdateMany => {
            format!("{}{}", constants::UPDATE_PREFIX, full_type.name)
        }
        Action::Delete | Action::DeleteMany => {
            format!("{}{}", constants::DELETE_PREFIX, full_type.name)
        }
        watch => operation_name(watch.read_equivalent(), full_type, options),
    }
}
