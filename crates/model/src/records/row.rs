use crate::{
    core::{
        data_type::DataType,
        schema::{EntityType, ValueType},
        value::Value,
    },
    errors::RecordError,
    records::view::{EntityView, Field},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordValue {
    Scalar(Value),
    Record(Record),
    List(Vec<RecordValue>),
}

impl RecordValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RecordValue::Scalar(v) => v.to_json(),
            RecordValue::Record(r) => r.to_json(),
            RecordValue::List(items) => {
                serde_json::Value::Array(items.iter().map(RecordValue::to_json).collect())
            }
        }
    }

    fn as_field(&self) -> Field<'_> {
        match self {
            RecordValue::Scalar(v) => Field::borrowed(v),
            RecordValue::Record(r) => Field::Entity(r),
            RecordValue::List(items) => {
                Field::List(items.iter().map(RecordValue::as_field).collect())
            }
        }
    }
}

impl From<Value> for RecordValue {
    fn from(value: Value) -> Self {
        RecordValue::Scalar(value)
    }
}

impl From<Record> for RecordValue {
    fn from(record: Record) -> Self {
        RecordValue::Record(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: RecordValue,
}

/// Dynamic entity instance: a named bag of values shaped by an [`EntityType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl Record {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        Record {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<RecordValue>) -> Self {
        self.field_values.push(FieldValue {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn get(&self, field: &str) -> Option<&RecordValue> {
        self.field_values
            .iter()
            .find(|f| f.name == field)
            .map(|f| &f.value)
    }

    pub fn get_value(&self, field: &str) -> Value {
        match self.get(field) {
            Some(RecordValue::Scalar(v)) => v.clone(),
            _ => Value::Null,
        }
    }

    /// Builds a record from a JSON object, converting each declared member to
    /// its schema type. Absent members become null; undeclared keys are ignored.
    pub fn from_json(
        entity_type: &EntityType,
        json: &serde_json::Value,
    ) -> Result<Self, RecordError> {
        let object = json
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(entity_type.name.clone()))?;

        let mut field_values = Vec::with_capacity(entity_type.fields.len());
        for def in &entity_type.fields {
            let raw = object.get(&def.name).unwrap_or(&serde_json::Value::Null);
            field_values.push(FieldValue {
                name: def.name.clone(),
                value: value_from_json(&def.name, &def.value_type, raw)?,
            });
        }

        Ok(Record::new(&entity_type.name, field_values))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .field_values
            .iter()
            .map(|f| (f.name.clone(), f.value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

fn value_from_json(
    name: &str,
    value_type: &ValueType,
    json: &serde_json::Value,
) -> Result<RecordValue, RecordError> {
    if json.is_null() {
        let allowed = value_type.is_nullable()
            || value_type.data_type() == Some(DataType::String);
        return if allowed {
            Ok(RecordValue::Scalar(Value::Null))
        } else {
            Err(RecordError::NullNotAllowed(name.to_string()))
        };
    }

    match value_type {
        ValueType::Scalar { data_type, .. } => {
            let value = scalar(name, json)?;
            value
                .convert(*data_type)
                .map(RecordValue::Scalar)
                .map_err(|source| RecordError::Conversion {
                    field: name.to_string(),
                    source,
                })
        }
        ValueType::Enum { enum_type, .. } => {
            let value = scalar(name, json)?;
            value
                .convert_enum(enum_type)
                .map(RecordValue::Scalar)
                .map_err(|source| RecordError::Conversion {
                    field: name.to_string(),
                    source,
                })
        }
        ValueType::Entity(entity_type) => {
            Record::from_json(entity_type, json).map(RecordValue::Record)
        }
        ValueType::List { element } => {
            let items = json
                .as_array()
                .ok_or_else(|| RecordError::NotAList(name.to_string()))?;
            items
                .iter()
                .map(|item| value_from_json(name, element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(RecordValue::List)
        }
    }
}

fn scalar(name: &str, json: &serde_json::Value) -> Result<Value, RecordError> {
    Value::from_json(json).ok_or_else(|| RecordError::NotAScalar(name.to_string()))
}

impl EntityView for Record {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.get(name).map(RecordValue::as_field)
    }
}
