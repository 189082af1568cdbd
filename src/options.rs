// SPDX-License-Identifier: AGPL-3.0-or-later

//! Caller-supplied configuration: per-resource compilation options and
//! introspection tuning.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::action::Action;
use crate::introspection::FullType;

/// Derives a boolean expression from the value of one filter key.
pub type FieldExpression = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Derives a boolean expression from the whole filter object.
pub type ParamsExpression = Arc<dyn Fn(&Map<String, Value>) -> Value + Send + Sync>;

/// Derives a schema operation name from an introspected type.
pub type OperationName = Arc<dyn Fn(&FullType) -> String + Send + Sync>;

/// Custom filter translations for one resource.
#[derive(Clone)]
pub enum FilterExpressions {
    /// Overrides the default translation for individual filter keys; keys
    /// without an entry keep the default behaviour.
    Fields(HashMap<String, FieldExpression>),

    /// Replaces the translation of the entire filter object with a single
    /// boolean expression.
    Params(ParamsExpression),
}

impl FilterExpressions {
    /// Override registered for the given filter key, if any.
    pub(crate) fn for_field(&self, key: &str) -> Option<&FieldExpression> {
        match self {
            FilterExpressions::Fields(map) => map.get(key),
            FilterExpressions::Params(_) => None,
        }
    }
}

impl fmt::Debug for FilterExpressions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterExpressions::Fields(map) => f
                .debug_tuple("Fields")
                .field(&map.keys().collect::<Vec<_>>())
                .finish(),
            FilterExpressions::Params(_) => f.debug_tuple("Params").finish(),
        }
    }
}

/// Caller-supplied implementation of one action, bypassing compilation
/// entirely.
///
/// The adapter never invokes the payload; `build_query` surfaces it so the
/// caller can downcast to its own implementation type and execute it with
/// transport access of its choosing.
#[derive(Clone)]
pub struct CustomAction(Arc<dyn Any + Send + Sync>);

impl CustomAction {
    /// Wraps a caller-defined implementation value.
    pub fn new<T: Any + Send + Sync>(implementation: T) -> Self {
        Self(Arc::new(implementation))
    }

    /// Borrows the implementation as its concrete type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for CustomAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CustomAction").finish()
    }
}

/// Compilation options for one resource.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    /// Schema type name to resolve instead of the logical resource name.
    pub alias: Option<String>,

    /// Ordered primary-key field names. Empty means the conventional `id`
    /// column.
    pub primary_keys: Vec<String>,

    /// Custom filter translations.
    pub filter_exps: Option<FilterExpressions>,

    /// Per-action escape hatches.
    pub custom_actions: HashMap<Action, CustomAction>,
}

impl ResourceOptions {
    /// Custom implementation registered for the given action, if any.
    pub fn custom_action(&self, action: Action) -> Option<&CustomAction> {
        self.custom_actions.get(&action)
    }
}

/// Per-resource options keyed by logical resource name.
pub type ResourceOptionsMap = HashMap<String, ResourceOptions>;

/// Top-level adapter configuration.
#[derive(Debug, Default)]
pub struct AdapterOptions {
    /// Options applied per resource.
    pub resource_options: ResourceOptionsMap,
}

/// Selects introspected types by name list or predicate.
#[derive(Clone)]
pub enum TypeFilter {
    /// Matches exactly the listed type names.
    Names(Vec<String>),

    /// Matches types the predicate accepts.
    Predicate(Arc<dyn Fn(&FullType) -> bool + Send + Sync>),
}

impl TypeFilter {
    pub(crate) fn matches(&self, full_type: &FullType) -> bool {
        match self {
            TypeFilter::Names(names) => names.iter().any(|name| name == &full_type.name),
            TypeFilter::Predicate(predicate) => predicate(full_type),
        }
    }
}

impl fmt::Debug for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeFilter::Names(names) => f.debug_tuple("Names").field(names).finish(),
            TypeFilter::Predicate(_) => f.debug_tuple("Predicate").finish(),
        }
    }
}

/// Options applied while deriving resources from an introspection result.
#[derive(Clone, Default)]
pub struct IntrospectionOptions {
    /// When present, only matching types become resources.
    pub include: Option<TypeFilter>,

    /// Types to reject as resources. Ignored when `include` is present.
    pub exclude: Option<TypeFilter>,

    /// Operation-name conventions overriding the built-in ones, per action.
    pub operation_names: HashMap<Action, OperationName>,
}

impl IntrospectionOptions {
    /// Should the given type be considered as a resource candidate?
    pub(crate) fn retains(&self, full_type: &FullType) -> bool {
        if let Some(include) = &self.include {
            return include.matches(full_type);
        }

        if let Some(exclude) = &self.exclude {
            return !exclude.matches(full_type);
        }

        true
    }
}

impl fmt::Debug for IntrospectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IntrospectionOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field(
                "operation_names",
                &self.operation_names.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
