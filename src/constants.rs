// SPDX-License-Identifier: AGPL-3.0-or-later

//! Constants naming every wire-visible convention of the Hasura GraphQL
//! surface: operation prefixes, argument names, filter operators and the
//! aliases used in compiled documents.

/// Alias for the record collection selected by list queries.
pub const ITEMS_ALIAS: &str = "items";

/// Alias for the aggregate-count sibling selected by list queries.
pub const TOTAL_ALIAS: &str = "total";

/// Alias for single-record queries and name of the record list nested in
/// mutation results.
pub const RETURNING_FIELD: &str = "returning";

/// Top-level key of every GraphQL response envelope.
pub const RESPONSE_DATA_FIELD: &str = "data";

/// Alias for the mutation root selection.
pub const MUTATION_DATA_ALIAS: &str = "data";

/// Field holding the count inside an aggregate selection.
pub const AGGREGATE_FIELD: &str = "aggregate";

/// Count field inside `aggregate`.
pub const COUNT_FIELD: &str = "count";

/// Suffix of the count operation paired with every list operation.
pub const AGGREGATE_SUFFIX: &str = "_aggregate";

/// Prefix of insert mutations.
pub const INSERT_PREFIX: &str = "insert_";

/// Prefix of update mutations.
pub const UPDATE_PREFIX: &str = "update_";

/// Prefix of delete mutations.
pub const DELETE_PREFIX: &str = "delete_";

/// Name of the boolean-expression argument.
pub const WHERE_ARG: &str = "where";

/// Name of the page-size argument.
pub const LIMIT_ARG: &str = "limit";

/// Name of the page-start argument.
pub const OFFSET_ARG: &str = "offset";

/// Name of the ordering argument.
pub const ORDER_BY_ARG: &str = "order_by";

/// Name of the insert-payload argument.
pub const OBJECTS_ARG: &str = "objects";

/// Name of the update-payload argument.
pub const SET_ARG: &str = "_set";

/// Conjunction operator of the boolean-expression dialect.
pub const AND_OPERATOR: &str = "_and";

/// Alternation operator of the boolean-expression dialect.
pub const OR_OPERATOR: &str = "_or";

/// Equality operator of the boolean-expression dialect.
pub const EQ_OPERATOR: &str = "_eq";

/// Membership operator of the boolean-expression dialect.
pub const IN_OPERATOR: &str = "_in";

/// Reserved filter key which expands into a primary-key expression.
pub const IDS_FILTER_KEY: &str = "ids";

/// Primary-key field assumed when a resource declares none.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Marker prefix of internal fields and types, skipped during field selection
/// and dropped from parsed records.
pub const INTERNAL_PREFIX: &str = "_";

/// Suffix of the sibling id-list field synthesized next to nested record
/// arrays in parsed responses.
pub const LINKED_IDS_SUFFIX: &str = "Ids";

/// Sort directive consumed by the variable builder, never a GraphQL argument.
pub const SORT_FIELD_PARAM: &str = "sortField";

/// Sort-direction directive consumed by the variable builder, never a GraphQL
/// argument.
pub const SORT_ORDER_PARAM: &str = "sortOrder";
