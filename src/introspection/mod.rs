// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed model of a GraphQL introspection result and the resource snapshot
//! derived from it, which drives all query compilation.

mod resources;
mod type_ref;
mod types;

pub use resources::{IntrospectedResource, IntrospectedSchema};
pub use type_ref::{TypeKind, TypeRef};
pub use types::{
    FieldDescription, FullType, InputValue, IntrospectionResponse, RootTypeName,
    SchemaDescription,
};
