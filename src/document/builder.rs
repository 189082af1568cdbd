// SPDX-License-Identifier: AGPL-3.0-or-later

//! Assembly of the per-action document shapes.

use serde_json::{Map, Value};

use crate::action::Action;
use crate::constants;
use crate::introspection::{FieldDescription, FullType};

use super::arguments::{aggregate_arguments, operation_arguments, variable_definitions};
use super::ast::{Document, Field, OperationKind};
use super::fields::selection_fields;

/// Compiles the document for an action against a resolved operation field.
///
/// Reads select the resource records under an `items` or `returning` alias,
/// list reads other than get-many add the aggregate-count sibling, and
/// mutations select the mutation result under `data` with the records nested
/// in `returning`. Watch actions compile the shape of their base read action
/// as a subscription.
pub fn build_document(
    resource_type: &FullType,
    action: Action,
    operation: &FieldDescription,
    variables: &Map<String, Value>,
) -> Document {
    let fields = selection_fields(resource_type);
    let arguments = operation_arguments(operation, variables);
    let definitions = variable_definitions(operation, variables);

    let kind = if action.is_mutation() {
        OperationKind::Mutation
    } else if action.is_watch() {
        OperationKind::Subscription
    } else {
        OperationKind::Query
    };

    let selection = match action {
        Action::GetList
        | Action::GetManyReference
        | Action::WatchList
        | Action::WatchManyReference => vec![
            Field::aliased(constants::ITEMS_ALIAS, &operation.name, arguments, fields),
            aggregate_selection(operation, variables),
        ],
        Action::GetMany | Action::WatchMany => vec![Field::aliased(
            constants::ITEMS_ALIAS,
            &operation.name,
            arguments,
            fields,
        )],
        Action::GetOne | Action::WatchOne => vec![Field::aliased(
            constants::RETURNING_FIELD,
            &operation.name,
            arguments,
            fields,
        )],
        Action::Create
        | Action::Update
        | Action::UpdateMany
        | Action::Delete
        | Action::DeleteMany => vec![Field::aliased(
            constants::MUTATION_DATA_ALIAS,
            &operation.name,
            arguments,
            vec![Field::with_selection(constants::RETURNING_FIELD, fields)],
        )],
    };

    Document {
        kind,
        name: operation.name.clone(),
        variable_definitions: definitions,
        selection,
    }
}

/// The `total: <operation>_aggregate { aggregate { count } }` sibling of
/// list selections.
fn aggregate_selection(operation: &FieldDescription, variables: &Map<String, Value>) -> Field {
    Field::aliased(
        constants::TOTAL_ALIAS,
        &format!("{}{}", operation.name, constants::AGGREGATE_SUFFIX),
        aggregate_arguments(operation, variables),
        vec![Field::with_selection(
            constants::AGGREGATE_FIELD,
            vec![Field::leaf(constants::COUNT_FIELD)],
        )],
    )
}
