// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recursive type-reference chains and the reflection helpers unwrapping
//! them.

use serde::{Deserialize, Serialize};

/// Kind discriminator of an introspected type or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// Leaf scalar type.
    Scalar,

    /// Object type with fields.
    Object,

    /// Interface type.
    Interface,

    /// Union type.
    Union,

    /// Enum type.
    Enum,

    /// Input object type.
    InputObject,

    /// List wrapper around another type reference.
    List,

    /// Non-null wrapper around another type reference.
    NonNull,
}

/// One layer of an introspected type-reference chain.
///
/// Named types terminate the chain (`name` set, `of_type` absent); `LIST` and
/// `NON_NULL` wrappers carry the wrapped reference in `of_type`. Wrapper
/// nesting is finite, so all reflection helpers terminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Kind of this layer.
    pub kind: TypeKind,

    /// Type name; present on named layers only.
    #[serde(default)]
    pub name: Option<String>,

    /// Wrapped reference; present on `LIST`/`NON_NULL` layers only.
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Named type reference terminating a chain.
    pub fn named(kind: TypeKind, name: &str) -> Self {
        Self {
            kind,
            name: Some(name.to_string()),
            of_type: None,
        }
    }

    /// `NON_NULL` wrapper around the given reference.
    pub fn non_null(of_type: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    /// `LIST` wrapper around the given reference.
    pub fn list(of_type: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(of_type)),
        }
    }

    /// Does this reference describe a required (non-nullable) argument or
    /// field?
    ///
    /// Recurses through `LIST` wrappers, so a list of non-nullable elements
    /// reports required. This matches how the backend itself declares its
    /// argument types (`[t_order_by!]!` and friends) and keeps compiled
    /// variable definitions assignable to them.
    pub fn is_required(&self) -> bool {
        match self.kind {
            TypeKind::NonNull => true,
            TypeKind::List => self
                .of_type
                .as_ref()
                .map_or(false, |inner| inner.is_required()),
            _ => false,
        }
    }

    /// Does this reference describe a list?
    ///
    /// Recurses through `NON_NULL` wrappers.
    pub fn is_list(&self) -> bool {
        match self.kind {
            TypeKind::List => true,
            TypeKind::NonNull => self.of_type.as_ref().map_or(false, |inner| inner.is_list()),
            _ => false,
        }
    }

    /// Innermost named type reference of this chain.
    ///
    /// Idempotent: applying it to its own result returns the same reference.
    pub fn final_type(&self) -> &TypeRef {
        match self.kind {
            TypeKind::List | TypeKind::NonNull => self
                .of_type
                .as_deref()
                .map_or(self, |inner| inner.final_type()),
            _ => self,
        }
    }

    /// Name of the innermost named type, or an empty string on a malformed
    /// chain.
    pub fn final_type_name(&self) -> &str {
        self.final_type().name.as_deref().unwrap_or_default()
    }
}
