// SPDX-License-Identifier: AGPL-3.0-or-later

//! Argument lists and variable definitions derived from the declared
//! arguments of a resolved operation field.
//!
//! Only declared arguments with a same-named key in the variables object are
//! emitted, in declaration order, so unused optional arguments never appear
//! in the compiled document.

use serde_json::{Map, Value};

use crate::constants;
use crate::introspection::{FieldDescription, TypeRef};

use super::ast::{Argument, VariableDefinition, VariableType};

/// Arguments of the primary selection.
pub(crate) fn operation_arguments(
    operation: &FieldDescription,
    variables: &Map<String, Value>,
) -> Vec<Argument> {
    operation
        .args
        .iter()
        .filter(|arg| is_bound(variables, &arg.name))
        .map(|arg| Argument {
            name: arg.name.clone(),
        })
        .collect()
}

/// Arguments of the aggregate-count sibling selection.
///
/// `limit` and `offset` are always excluded: the count must cover all
/// matching rows, not the requested page.
pub(crate) fn aggregate_arguments(
    operation: &FieldDescription,
    variables: &Map<String, Value>,
) -> Vec<Argument> {
    operation
        .args
        .iter()
        .filter(|arg| {
            is_bound(variables, &arg.name)
                && arg.name != constants::LIMIT_ARG
                && arg.name != constants::OFFSET_ARG
        })
        .map(|arg| Argument {
            name: arg.name.clone(),
        })
        .collect()
}

/// Typed variable declarations of the operation.
pub(crate) fn variable_definitions(
    operation: &FieldDescription,
    variables: &Map<String, Value>,
) -> Vec<VariableDefinition> {
    operation
        .args
        .iter()
        .filter(|arg| is_bound(variables, &arg.name))
        .map(|arg| VariableDefinition {
            name: arg.name.clone(),
            ty: variable_type(&arg.type_ref),
        })
        .collect()
}

/// The GraphQL type a variable must declare to be assignable to an argument
/// of the given introspected type.
fn variable_type(type_ref: &TypeRef) -> VariableType {
    let named = VariableType::Named(type_ref.final_type_name().to_string());

    match (type_ref.is_required(), type_ref.is_list()) {
        (true, true) => VariableType::NonNull(Box::new(VariableType::List(Box::new(
            VariableType::NonNull(Box::new(named)),
        )))),
        (true, false) => VariableType::NonNull(Box::new(named)),
        (false, true) => VariableType::List(Box::new(named)),
        (false, false) => named,
    }
}

/// Is the argument name bound by the variables object?
///
/// The sort directives travel inside the variables of some callers but are
/// consumed by the variable builder, never declared by the schema.
fn is_bound(variables: &Map<String, Value>, name: &str) -> bool {
    variables.contains_key(name)
        && name != constants::SORT_FIELD_PARAM
        && name != constants::SORT_ORDER_PARAM
}
