pub mod core;
pub mod errors;
pub mod filter;
pub mod records;

pub use crate::core::{
    data_type::DataType,
    schema::{EntityType, EnumMember, EnumType, FieldDef, ValueType},
    value::Value,
};
pub use errors::{ConversionError, RecordError};
pub use filter::{
    Action, Filter, FilterNode, LeafExpression, LogicalOperator, Operator, PropertyType,
};
pub use records::{
    row::{FieldValue, Record, RecordValue},
    view::{Entity, EntityView, Field},
};
