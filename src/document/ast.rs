// SPDX-License-Identifier: AGPL-3.0-or-later

//! Minimal GraphQL document model and its printer.
//!
//! Compiled documents only ever contain one operation whose arguments all
//! reference same-named variables, so the model covers exactly that subset of
//! the language. Printing follows the reference formatting: two-space
//! indentation, comma-separated argument lists and a trailing newline.

use std::fmt;
use std::fmt::Display;

/// Operation kind of a compiled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Read operation.
    Query,

    /// Write operation.
    Mutation,

    /// Live-stream operation.
    Subscription,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

/// GraphQL type of a variable definition, for example `[ID!]!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableType {
    /// Named type.
    Named(String),

    /// List wrapper.
    List(Box<VariableType>),

    /// Non-null wrapper.
    NonNull(Box<VariableType>),
}

impl Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VariableType::Named(name) => write!(f, "{}", name),
            VariableType::List(inner) => write!(f, "[{}]", inner),
            VariableType::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// One typed variable declaration of the operation, `$name: Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Variable name, without the `$` sigil.
    pub name: String,

    /// Declared type.
    pub ty: VariableType,
}

impl Display for VariableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${}: {}", self.name, self.ty)
    }
}

/// One field argument bound to the same-named variable, `name: $name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument and variable name.
    pub name: String,
}

impl Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: ${}", self.name, self.name)
    }
}

/// One field of a selection set. Leaves carry an empty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Response alias, when the field is selected under a different name.
    pub alias: Option<String>,

    /// Field name.
    pub name: String,

    /// Arguments, in declaration order.
    pub arguments: Vec<Argument>,

    /// Nested selection set, empty for leaf fields.
    pub selection: Vec<Field>,
}

impl Field {
    /// Leaf field without alias or arguments.
    pub fn leaf(name: &str) -> Self {
        Self {
            alias: None,
            name: name.to_string(),
            arguments: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Container field selecting nested fields.
    pub fn with_selection(name: &str, selection: Vec<Field>) -> Self {
        Self {
            alias: None,
            name: name.to_string(),
            arguments: Vec::new(),
            selection,
        }
    }

    /// Aliased field with arguments and a nested selection.
    pub fn aliased(
        alias: &str,
        name: &str,
        arguments: Vec<Argument>,
        selection: Vec<Field>,
    ) -> Self {
        Self {
            alias: Some(alias.to_string()),
            name: name.to_string(),
            arguments,
            selection,
        }
    }

    fn write(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }

        if let Some(alias) = &self.alias {
            write!(f, "{}: ", alias)?;
        }
        write!(f, "{}", self.name)?;
        write_arguments(f, &self.arguments)?;

        if self.selection.is_empty() {
            return writeln!(f);
        }

        writeln!(f, " {{")?;
        for field in &self.selection {
            field.write(f, depth + 1)?;
        }
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(f, "}}")
    }
}

/// A complete single-operation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Operation kind.
    pub kind: OperationKind,

    /// Operation name, used for request tracing.
    pub name: String,

    /// Typed variable declarations.
    pub variable_definitions: Vec<VariableDefinition>,

    /// Root selection set.
    pub selection: Vec<Field>,
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;

        if !self.variable_definitions.is_empty() {
            write!(f, "(")?;
            for (index, definition) in self.variable_definitions.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", definition)?;
            }
            write!(f, ")")?;
        }

        writeln!(f, " {{")?;
        for field in &self.selection {
            field.write(f, 1)?;
        }
        writeln!(f, "}}")
    }
}

fn write_arguments(f: &mut fmt::Formatter, arguments: &[Argument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }

    write!(f, "(")?;
    for (index, argument) in arguments.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", argument)?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Argument, Document, Field, OperationKind, VariableDefinition, VariableType};

    fn named(name: &str) -> VariableType {
        VariableType::Named(name.to_string())
    }

    #[rstest]
    #[case::bare(named("foo"), "foo")]
    #[case::non_null(VariableType::NonNull(Box::new(named("ID"))), "ID!")]
    #[case::list(VariableType::List(Box::new(named("ID"))), "[ID]")]
    #[case::non_null_list(
        VariableType::NonNull(Box::new(VariableType::List(Box::new(VariableType::NonNull(
            Box::new(named("ID"))
        ))))),
        "[ID!]!"
    )]
    fn variable_types_print_with_wrappers(#[case] ty: VariableType, #[case] expected: &str) {
        assert_eq!(ty.to_string(), expected);
    }

    #[test]
    fn documents_print_in_reference_format() {
        let document = Document {
            kind: OperationKind::Query,
            name: "articles".to_string(),
            variable_definitions: vec![
                VariableDefinition {
                    name: "where".to_string(),
                    ty: named("articles_bool_exp"),
                },
                VariableDefinition {
                    name: "limit".to_string(),
                    ty: named("Int"),
                },
            ],
            selection: vec![Field::aliased(
                "items",
                "articles",
                vec![
                    Argument {
                        name: "where".to_string(),
                    },
                    Argument {
                        name: "limit".to_string(),
                    },
                ],
                vec![Field::leaf("id"), Field::leaf("title")],
            )],
        };

        assert_eq!(
            document.to_string(),
            "query articles($where: articles_bool_exp, $limit: Int) {\n\
             \x20 items: articles(where: $where, limit: $limit) {\n\
             \x20   id\n\
             \x20   title\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn operations_without_variables_omit_the_parentheses() {
        let document = Document {
            kind: OperationKind::Subscription,
            name: "articles".to_string(),
            variable_definitions: Vec::new(),
            selection: vec![Field::with_selection("articles", vec![Field::leaf("id")])],
        };

        assert_eq!(
            document.to_string(),
            "subscription articles {\n  articles {\n    id\n  }\n}\n"
        );
    }
}
