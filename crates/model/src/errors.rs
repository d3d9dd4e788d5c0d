use crate::core::data_type::DataType;
use thiserror::Error;

/// Raised when a value cannot be represented as the requested data kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("cannot convert {value} to {target}")]
    Unsupported { value: String, target: DataType },

    #[error("'{input}' is not a valid {target}: {reason}")]
    Parse {
        input: String,
        target: DataType,
        reason: String,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: DataType },

    #[error("{value} is not a member of enum {enum_name}")]
    UnknownEnumMember { value: String, enum_name: String },
}

/// Raised while building a `Record` from a JSON document.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("expected a JSON object for entity {0}")]
    NotAnObject(String),

    #[error("expected a JSON array for field '{0}'")]
    NotAList(String),

    #[error("expected a scalar value for field '{0}'")]
    NotAScalar(String),

    #[error("field '{0}' is not nullable")]
    NullNotAllowed(String),

    #[error("field '{field}': {source}")]
    Conversion {
        field: String,
        #[source]
        source: ConversionError,
    },
}
