// SPDX-License-Identifier: AGPL-3.0-or-later

//! Closed enumeration of the CRUD and subscription action kinds the adapter
//! compiles, together with the category predicates the pipeline stages
//! dispatch on.

use std::convert::TryFrom;
use std::fmt;

use crate::errors::AdapterError;

/// Action kinds accepted at the adapter boundary.
///
/// The `Watch*` variants are subscription counterparts of the corresponding
/// read actions: same variables, same selection shape, same response
/// envelope, but compiled as a `subscription` operation resolved through the
/// base read action's schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Paginated, filtered, ordered record listing.
    GetList,

    /// Single record by identifier.
    GetOne,

    /// Batch of records by identifier list.
    GetMany,

    /// Records referencing a target record through a foreign-key field.
    GetManyReference,

    /// Insert new records.
    Create,

    /// Update a single record by identifier.
    Update,

    /// Update a batch of records by identifier list.
    UpdateMany,

    /// Delete a single record by identifier.
    Delete,

    /// Delete a batch of records by identifier list.
    DeleteMany,

    /// Subscription variant of [`Action::GetList`].
    WatchList,

    /// Subscription variant of [`Action::GetOne`].
    WatchOne,

    /// Subscription variant of [`Action::GetMany`].
    WatchMany,

    /// Subscription variant of [`Action::GetManyReference`].
    WatchManyReference,
}

impl Action {
    /// Returns true for actions whose variables carry filter, sort and
    /// pagination parameters.
    pub fn is_list_like(&self) -> bool {
        matches!(
            self,
            Action::GetList
                | Action::GetManyReference
                | Action::WatchList
                | Action::WatchManyReference
        )
    }

    /// Returns true for the batch-read variants, which select records without
    /// an aggregate-count sibling.
    pub fn is_many(&self) -> bool {
        matches!(self, Action::GetMany | Action::WatchMany)
    }

    /// Returns true for actions compiled as mutations.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::Create
                | Action::Update
                | Action::UpdateMany
                | Action::Delete
                | Action::DeleteMany
        )
    }

    /// Returns true for actions compiled as subscriptions.
    pub fn is_watch(&self) -> bool {
        matches!(
            self,
            Action::WatchList | Action::WatchOne | Action::WatchMany | Action::WatchManyReference
        )
    }

    /// Read action a subscription action resolves its schema field through.
    ///
    /// Non-watch actions map to themselves.
    pub fn read_equivalent(&self) -> Action {
        match self {
            Action::WatchList => Action::GetList,
            Action::WatchOne => Action::GetOne,
            Action::WatchMany => Action::GetMany,
            Action::WatchManyReference => Action::GetManyReference,
            action => *action,
        }
    }

    /// Database permission whose absence most likely explains a missing
    /// operation for this action. Used in diagnostics only.
    pub(crate) fn permission(&self) -> &'static str {
        match self {
            Action::GetList
            | Action::GetOne
            | Action::GetMany
            | Action::GetManyReference
            | Action::WatchList
            | Action::WatchOne
            | Action::WatchMany
            | Action::WatchManyReference => "SELECT",
            Action::Create => "INSERT",
            Action::Update | Action::UpdateMany => "UPDATE",
            Action::Delete | Action::DeleteMany => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Action::GetList => "GET_LIST",
            Action::GetOne => "GET_ONE",
            Action::GetMany => "GET_MANY",
            Action::GetManyReference => "GET_MANY_REFERENCE",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::UpdateMany => "UPDATE_MANY",
            Action::Delete => "DELETE",
            Action::DeleteMany => "DELETE_MANY",
            Action::WatchList => "WATCH_LIST",
            Action::WatchOne => "WATCH_ONE",
            Action::WatchMany => "WATCH_MANY",
            Action::WatchManyReference => "WATCH_MANY_REFERENCE",
        };

        write!(f, "{}", name)
    }
}

impl TryFrom<&str> for Action {
    type Error = AdapterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "GET_LIST" => Ok(Action::GetList),
            "GET_ONE" => Ok(Action::GetOne),
            "GET_MANY" => Ok(Action::GetMany),
            "GET_MANY_REFERENCE" => Ok(Action::GetManyReference),
            "CREATE" => Ok(Action::Create),
            "UPDATE" => Ok(Action::Update),
            "UPDATE_MANY" => Ok(Action::UpdateMany),
            "DELETE" => Ok(Action::Delete),
            "DELETE_MANY" => Ok(Action::DeleteMany),
            "WATCH_LIST" => Ok(Action::WatchList),
            "WATCH_ONE" => Ok(Action::WatchOne),
            "WATCH_MANY" => Ok(Action::WatchMany),
            "WATCH_MANY_REFERENCE" => Ok(Action::WatchManyReference),
            unknown => Err(AdapterError::UnimplementedAction(unknown.to_string())),
        }
    }
}
