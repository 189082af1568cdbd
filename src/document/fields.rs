// SPDX-License-Identifier: AGPL-3.0-or-later

//! Flat selection of a resource type's own fields.

use crate::constants;
use crate::introspection::{FullType, TypeKind};

use super::ast::Field;

/// Leaf selection over every directly selectable field of the type.
///
/// Internal fields and types (leading `_`) are skipped, and so are relation
/// fields: nested objects and interfaces need their own selection sets, which
/// flat record shapes have no place for.
pub(crate) fn selection_fields(ty: &FullType) -> Vec<Field> {
    ty.fields()
        .iter()
        .filter(|field| {
            let final_type = field.type_ref.final_type();
            let internal = field.name.starts_with(constants::INTERNAL_PREFIX)
                || final_type
                    .name
                    .as_deref()
                    .unwrap_or_default()
                    .starts_with(constants::INTERNAL_PREFIX);

            !internal
                && final_type.kind != TypeKind::Object
                && final_type.kind != TypeKind::Interface
        })
        .map(|field| Field::leaf(&field.name))
        .collect()
}
