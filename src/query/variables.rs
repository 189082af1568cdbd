// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-action translation of action parameters into the variables object the
//! compiled operation is executed with.

use log::debug;
use serde_json::{json, Map, Value};

use crate::action::Action;
use crate::constants;
use crate::errors::AdapterError;
use crate::introspection::IntrospectedResource;
use crate::options::{FilterExpressions, ResourceOptions};

use super::filter::{filter_conjuncts, nested_path};
use super::order::{order_by, Sort};
use super::pagination::Pagination;
use super::primary_key::{any_of, identifier_expressions};

/// Parameters of one action call, owned by the calling framework.
///
/// Every action kind reads the subset it needs and ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct ActionParams {
    /// Named filter of list-like actions.
    pub filter: Map<String, Value>,

    /// Pre-built boolean-expression conjuncts, placed before the conjuncts
    /// derived from `filter`.
    pub custom_filters: Vec<Value>,

    /// Page selection. Absent means no `limit`/`offset` are emitted.
    pub pagination: Option<Pagination>,

    /// Ordering. Absent means no `order_by` is emitted.
    pub sort: Option<Sort>,

    /// Identifier of single-record actions, and the referenced identifier of
    /// many-reference actions.
    pub id: Option<Value>,

    /// Identifiers of batch actions.
    pub ids: Vec<Value>,

    /// Payload of create and update actions.
    pub data: Map<String, Value>,

    /// Previous record values of update actions, when the caller knows them.
    pub previous_data: Option<Map<String, Value>>,

    /// Foreign-key field targeted by many-reference actions. Dotted paths
    /// reach into relations.
    pub target: Option<String>,
}

/// Builds the variables object for an action on a resource.
pub fn build_variables(
    resource: &IntrospectedResource,
    action: Action,
    params: &ActionParams,
    options: &ResourceOptions,
) -> Result<Map<String, Value>, AdapterError> {
    debug!(
        "Building {} variables for resource {}",
        action,
        resource.type_name()
    );

    match action {
        Action::GetList | Action::WatchList => list_variables(params, options, None),
        Action::GetManyReference | Action::WatchManyReference => {
            list_variables(params, options, params.target.as_deref())
        }
        Action::GetMany | Action::WatchMany => {
            let mut variables = Map::new();
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&params.ids, options)?,
            );

            Ok(variables)
        }
        Action::GetOne | Action::WatchOne => {
            let id = required_id(params)?.clone();
            let mut variables = Map::new();
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&[id], options)?,
            );
            variables.insert(constants::LIMIT_ARG.to_string(), json!(1));

            Ok(variables)
        }
        Action::Create => {
            let mut variables = Map::new();
            variables.insert(
                constants::OBJECTS_ARG.to_string(),
                Value::Object(params.data.clone()),
            );

            Ok(variables)
        }
        Action::Update => {
            let id = required_id(params)?.clone();
            let mut variables = Map::new();
            variables.insert(
                constants::SET_ARG.to_string(),
                Value::Object(update_set(resource, params)),
            );
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&[id], options)?,
            );

            Ok(variables)
        }
        Action::UpdateMany => {
            let mut variables = Map::new();
            variables.insert(
                constants::SET_ARG.to_string(),
                Value::Object(update_set(resource, params)),
            );
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&params.ids, options)?,
            );

            Ok(variables)
        }
        Action::Delete => {
            let id = required_id(params)?.clone();
            let mut variables = Map::new();
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&[id], options)?,
            );

            Ok(variables)
        }
        Action::DeleteMany => {
            let mut variables = Map::new();
            variables.insert(
                constants::WHERE_ARG.to_string(),
                identifier_filter(&params.ids, options)?,
            );

            Ok(variables)
        }
    }
}

/// `where`, `limit`/`offset` and `order_by` of a list-like action.
///
/// `target`, when given, appends the many-reference equality conjunct after
/// all filter-derived conjuncts.
fn list_variables(
    params: &ActionParams,
    options: &ResourceOptions,
    target: Option<&str>,
) -> Result<Map<String, Value>, AdapterError> {
    let mut conjuncts = params.custom_filters.clone();

    match &options.filter_exps {
        Some(FilterExpressions::Params(expression)) => conjuncts.push(expression(&params.filter)),
        custom => conjuncts.extend(filter_conjuncts(
            &params.filter,
            &options.primary_keys,
            custom.as_ref(),
        )?),
    }

    if let Some(target) = target {
        match &params.id {
            Some(id) => {
                conjuncts.push(nested_path(target, json!({ (constants::EQ_OPERATOR): id })))
            }
            None => debug!("Many-reference action without a referenced id, skipping target"),
        }
    }

    let mut variables = Map::new();
    variables.insert(
        constants::WHERE_ARG.to_string(),
        json!({ (constants::AND_OPERATOR): conjuncts }),
    );

    if let Some(pagination) = &params.pagination {
        variables.insert(constants::LIMIT_ARG.to_string(), json!(pagination.limit()));
        variables.insert(
            constants::OFFSET_ARG.to_string(),
            json!(pagination.offset()),
        );
    }

    if let Some(sort) = &params.sort {
        variables.insert(
            constants::ORDER_BY_ARG.to_string(),
            order_by(sort, &options.primary_keys),
        );
    }

    Ok(variables)
}

/// Update payload: every `data` field that names a schema field and differs
/// from its previous value.
///
/// Unchanged and unknown fields are dropped so read-modify-write flows do
/// not push back columns the role may not update.
fn update_set(resource: &IntrospectedResource, params: &ActionParams) -> Map<String, Value> {
    params
        .data
        .iter()
        .filter(|(key, value)| {
            if let Some(previous) = &params.previous_data {
                if previous.get(key.as_str()) == Some(*value) {
                    return false;
                }
            }

            resource.ty().field(key).is_some()
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn identifier_filter(ids: &[Value], options: &ResourceOptions) -> Result<Value, AdapterError> {
    Ok(any_of(identifier_expressions(ids, &options.primary_keys)?))
}

fn required_id(params: &ActionParams) -> Result<&Value, AdapterError> {
    params.id.as_ref().ok_or(AdapterError::EmptyInput)
}
