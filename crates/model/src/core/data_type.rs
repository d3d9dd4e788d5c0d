use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kind used to interpret the operands of a leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Integer,
    String,
    Decimal,
    Double,
    Boolean,
    DateTime,
    Guid,
    Enum,
    /// Marks a value that is itself a sub-expression. Never a valid operand kind.
    Expression,
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::String => "string",
            DataType::Decimal => "decimal",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::DateTime => "dateTime",
            DataType::Guid => "guid",
            DataType::Enum => "enum",
            DataType::Expression => "expression",
        }
    }

    /// Whether `Gt`/`Gte`/`Lt`/`Lte` are meaningful for values of this kind.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            DataType::Integer
                | DataType::String
                | DataType::Decimal
                | DataType::Double
                | DataType::DateTime
                | DataType::Enum
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Decimal | DataType::Double
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
