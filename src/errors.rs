// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for query compilation and response parsing.

use thiserror::Error;

/// Errors raised while compiling an action into a GraphQL operation or while
/// normalizing a response.
///
/// All variants are raised synchronously at the point of detection and carry
/// a diagnostic message sufficient to identify a schema mismatch, permission
/// gap or malformed identifier without inspecting internals.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Requested resource name (or its alias) is not among the introspected
    /// resources. Lists all known resources so the caller can spot schema or
    /// permission misconfiguration.
    #[error("{}", unknown_resource_message(.resource, .alias, .known))]
    UnknownResource {
        /// Logical resource name the caller asked for.
        resource: String,

        /// Schema type name the lookup actually used, when an alias was
        /// configured.
        alias: Option<String>,

        /// Type names of all introspected resources, in introspection order.
        known: Vec<String>,
    },

    /// Resource exists but the schema exposes no operation for the requested
    /// action kind, typically a missing database permission.
    #[error(
        "No query matching fetch type could be found for resource {resource}. \
         Maybe the current user doesn't have {permission} permission"
    )]
    UnsupportedOperation {
        /// Schema type name of the resolved resource.
        resource: String,

        /// Database operation the missing permission would grant.
        permission: &'static str,
    },

    /// A composite-key identifier string could not be decoded into a JSON
    /// object.
    #[error("Malformed composite identifier '{0}'. Expected a JSON object keyed by the primary key columns")]
    MalformedIdentifier(String),

    /// A composite-key identifier decoded fine but lacks one of the declared
    /// primary-key columns.
    #[error("Malformed composite identifier '{value}'. Missing primary key column: {column}")]
    IncompleteIdentifier {
        /// Identifier string as received.
        value: String,

        /// Declared primary-key column absent from the decoded object.
        column: String,
    },

    /// A response record has no value for a declared primary-key column, so
    /// no stable `id` can be synthesized for it.
    #[error("primary key value is null or undefined; resource {resource}; column: {column}")]
    MissingPrimaryKeyValue {
        /// Logical resource name the parser was built for.
        resource: String,

        /// Primary-key column with the missing value.
        column: String,
    },

    /// An action requiring at least one identifier or record received none.
    #[error("Input data is empty. Cannot build primary key expression")]
    EmptyInput,

    /// An action-kind string does not name any known action.
    #[error("Unimplemented action type: {0}")]
    UnimplementedAction(String),

    /// A raw response does not match the envelope shape compiled for the
    /// action kind.
    #[error("Unexpected response shape for fetch type {action}: missing field '{field}'")]
    UnexpectedResponse {
        /// Action kind the parser was built for.
        action: String,

        /// Envelope field that was absent or of the wrong type.
        field: String,
    },
}

fn unknown_resource_message(
    resource: &str,
    alias: &Option<String>,
    known: &[String],
) -> String {
    let prefix = match alias {
        Some(alias) => format!("Unknown resource '{}', alias of '{}'. ", resource, alias),
        None => format!("Unknown resource '{}'. ", resource),
    };

    if known.is_empty() {
        format!(
            "{}No resources were found. Make sure it has been declared on your server side \
             schema, or the user has resource permission.",
            prefix
        )
    } else {
        format!(
            "{}Make sure it has been declared on your server side schema, or the user has \
             resource permission. Known resources are {}",
            prefix,
            known.join(", ")
        )
    }
}
