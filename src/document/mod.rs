// SPDX-License-Identifier: AGPL-3.0-or-later

//! Compilation of executable GraphQL documents.
//!
//! The builder takes the resolved operation field, the resource type and the
//! already-computed variables, selects the resource's flat fields, derives
//! argument lists and typed variable definitions from the operation's
//! declared arguments, and wraps everything in the shape the action calls
//! for. Documents print in the reference format and carry the operation name
//! for request tracing.

mod arguments;
mod ast;
mod builder;
mod fields;

pub use ast::{Argument, Document, Field, OperationKind, VariableDefinition, VariableType};
pub use builder::build_document;
