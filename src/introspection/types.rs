// SPDX-License-Identifier: AGPL-3.0-or-later

//! Serde model of the standard GraphQL introspection result.
//!
//! Only the parts of the wire format the compilation pipeline consumes are
//! modelled; unknown keys in the JSON are ignored.

use serde::{Deserialize, Serialize};

use crate::introspection::{TypeKind, TypeRef};

/// Top-level introspection query result, as returned under the `data` key of
/// a standard introspection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    /// The introspected schema.
    #[serde(rename = "__schema")]
    pub schema: SchemaDescription,
}

/// The `__schema` object: root operation types and all named types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    /// Name of the query root type.
    pub query_type: RootTypeName,

    /// Name of the mutation root type, when the schema has mutations.
    #[serde(default)]
    pub mutation_type: Option<RootTypeName>,

    /// Name of the subscription root type, when the schema has
    /// subscriptions.
    #[serde(default)]
    pub subscription_type: Option<RootTypeName>,

    /// Every named type of the schema, roots included.
    pub types: Vec<FullType>,
}

/// Reference to a root operation type by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootTypeName {
    /// The type name.
    pub name: String,
}

/// One named type of the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    /// Kind of the type.
    pub kind: TypeKind,

    /// Type name.
    pub name: String,

    /// Optional schema-supplied description.
    #[serde(default)]
    pub description: Option<String>,

    /// Fields of object and interface types; absent on other kinds.
    #[serde(default)]
    pub fields: Option<Vec<FieldDescription>>,
}

impl FullType {
    /// Fields of this type, empty for kinds without fields.
    pub fn fields(&self) -> &[FieldDescription] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescription> {
        self.fields().iter().find(|field| field.name == name)
    }
}

/// One field of an object type, including root operation fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    /// Field name.
    pub name: String,

    /// Optional schema-supplied description.
    #[serde(default)]
    pub description: Option<String>,

    /// Declared arguments.
    #[serde(default)]
    pub args: Vec<InputValue>,

    /// Type of the field value.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl FieldDescription {
    /// Looks up a declared argument by name.
    pub fn arg(&self, name: &str) -> Option<&InputValue> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

/// One declared argument of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    /// Argument name.
    pub name: String,

    /// Type of the argument value.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}
