// SPDX-License-Identifier: AGPL-3.0-or-later

//! Translation of action parameters into the variables object a compiled
//! operation is executed with: boolean-expression filters, ordering,
//! pagination and primary-key handling.

mod filter;
mod order;
mod pagination;
mod primary_key;
mod variables;

pub use order::{Sort, SortOrder};
pub use pagination::Pagination;
pub use primary_key::{
    decode_composite_id, encode_composite_id, identifier_expressions, record_key_expression,
};
pub use variables::{build_variables, ActionParams};

pub(crate) use primary_key::any_of;
