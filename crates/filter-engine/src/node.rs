use crate::registry::Method;
use model::{Operator, Value};
use std::sync::Arc;

/// A member path relative to the current scope. Empty means the scope itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyAccess {
    pub path: Vec<String>,
}

impl PropertyAccess {
    pub fn subject() -> Self {
        Self::default()
    }

    pub fn new(path: Vec<String>) -> Self {
        PropertyAccess { path }
    }

    pub fn is_subject(&self) -> bool {
        self.path.is_empty()
    }
}

/// Left-hand side of a comparison.
#[derive(Clone)]
pub enum Operand {
    Property(PropertyAccess),
    Method { name: String, method: Arc<dyn Method> },
}

impl std::fmt::Debug for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Property(access) => f.debug_tuple("Property").field(access).finish(),
            Operand::Method { name, .. } => f.debug_struct("Method").field("name", name).finish(),
        }
    }
}

/// What a collection node computes from its matching elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    All,
    Any,
    Count { operator: Operator, constant: Value },
}

/// The compiled form of a filter. Every lookup (tokens, methods, schema
/// members) has already been resolved; evaluation only reads the entity.
#[derive(Debug, Clone)]
pub enum CompiledNode {
    And(Vec<CompiledNode>),
    Or(Vec<CompiledNode>),
    Compare {
        operand: Operand,
        operator: Operator,
        constant: Value,
    },
    Collection {
        property: PropertyAccess,
        /// Name of the element parameter, `f1`, `f2`, ... in compile order.
        parameter: String,
        predicate: Box<CompiledNode>,
        aggregate: Aggregate,
    },
    Contains {
        property: PropertyAccess,
        set: Vec<Value>,
    },
    StringContains {
        property: PropertyAccess,
        needle: String,
    },
}
