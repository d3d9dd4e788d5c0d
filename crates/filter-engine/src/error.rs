use model::{ConversionError, DataType, ValueType};
use thiserror::Error;

/// A compile failure, tagged with the location of the offending node
/// (e.g. `$.expressions[1].expression.data.expressions[0]`).
#[derive(Debug, Error)]
#[error("{kind} (at {node})")]
pub struct CompileError {
    pub node: String,
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub fn new(node: impl Into<String>, kind: CompileErrorKind) -> Self {
        CompileError {
            node: node.into(),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileErrorKind {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Must specify a constant value or a token but not both")]
    AmbiguousOperand,

    #[error("Constant value or token is missing for non-nullable {0}")]
    MissingOperand(ValueType),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Unknown property '{property}' on {owner}")]
    UnknownProperty { property: String, owner: String },

    #[error("Cannot coerce constant: {0}")]
    Coercion(#[from] ConversionError),

    #[error("Action {action} is not supported for {property_type} properties")]
    UnsupportedAction {
        action: String,
        property_type: String,
    },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Operator {operator} is not supported for {data_type}")]
    UnsupportedOperator {
        operator: String,
        data_type: DataType,
    },

    #[error("Filter nesting exceeds the maximum depth of {0}")]
    DepthExceeded(usize),
}

/// Failure to register a token or method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Token '{0}' is already registered")]
    DuplicateToken(String),

    #[error("Method '{0}' is already registered")]
    DuplicateMethod(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{var}' with value '{value}' as {expected_type}")]
    EnvParseError {
        var: String,
        value: String,
        expected_type: String,
    },
}

pub type Result<T> = std::result::Result<T, CompileError>;
