use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of an entity member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ValueType {
    Scalar {
        data_type: DataType,
        #[serde(default)]
        nullable: bool,
    },
    Enum {
        enum_type: EnumType,
        #[serde(default)]
        nullable: bool,
    },
    Entity(EntityType),
    List {
        element: Box<ValueType>,
    },
}

impl ValueType {
    pub fn scalar(data_type: DataType) -> Self {
        ValueType::Scalar {
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(data_type: DataType) -> Self {
        ValueType::Scalar {
            data_type,
            nullable: true,
        }
    }

    pub fn enumeration(enum_type: EnumType) -> Self {
        ValueType::Enum {
            enum_type,
            nullable: false,
        }
    }

    pub fn nullable_enumeration(enum_type: EnumType) -> Self {
        ValueType::Enum {
            enum_type,
            nullable: true,
        }
    }

    pub fn entity(entity_type: EntityType) -> Self {
        ValueType::Entity(entity_type)
    }

    pub fn list(element: ValueType) -> Self {
        ValueType::List {
            element: Box::new(element),
        }
    }

    /// Whether a member of this type may hold no value. Nested entities and
    /// lists are references and always may.
    pub fn is_nullable(&self) -> bool {
        match self {
            ValueType::Scalar { nullable, .. } | ValueType::Enum { nullable, .. } => *nullable,
            ValueType::Entity(_) | ValueType::List { .. } => true,
        }
    }

    /// Scalar kind of this type, `None` for entities and lists.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            ValueType::Scalar { data_type, .. } => Some(*data_type),
            ValueType::Enum { .. } => Some(DataType::Enum),
            ValueType::Entity(_) | ValueType::List { .. } => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityType> {
        match self {
            ValueType::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&ValueType> {
        match self {
            ValueType::List { element } => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar {
                data_type,
                nullable,
            } => write!(f, "{data_type}{}", if *nullable { "?" } else { "" }),
            ValueType::Enum {
                enum_type,
                nullable,
            } => write!(f, "{}{}", enum_type.name, if *nullable { "?" } else { "" }),
            ValueType::Entity(entity) => write!(f, "{}", entity.name),
            ValueType::List { element } => write!(f, "list<{element}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl FieldDef {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        FieldDef {
            name: name.to_string(),
            value_type,
        }
    }
}

/// Declarative shape of an entity: its name and typed members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl EntityType {
    pub fn new(name: &str) -> Self {
        EntityType {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value_type: ValueType) -> Self {
        self.fields.push(FieldDef::new(name, value_type));
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Exact match first, then the first field equal ignoring ASCII case.
    pub fn field_ignore_case(&self, name: &str) -> Option<&FieldDef> {
        self.field(name).or_else(|| {
            self.fields
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(name: &str, value: i64) -> Self {
        EnumMember {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(name: &str, members: Vec<EnumMember>) -> Self {
        EnumType {
            name: name.to_string(),
            members,
        }
    }

    pub fn member_named(&self, name: &str) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn member_valued(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.member_valued(value).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_json() {
        let schema: EntityType = serde_json::from_value(serde_json::json!({
            "name": "Person",
            "fields": [
                { "name": "age", "type": { "kind": "scalar", "dataType": "integer" } },
                { "name": "email", "type": {
                    "kind": "scalar", "dataType": "string", "nullable": true
                } },
                { "name": "tags", "type": {
                    "kind": "list", "element": { "kind": "scalar", "dataType": "string" }
                } },
                { "name": "status", "type": { "kind": "enum", "enumType": {
                    "name": "Status",
                    "members": [ { "name": "Active", "value": 1 } ]
                } } },
                { "name": "address", "type": { "kind": "entity", "name": "Address", "fields": [
                    { "name": "city", "type": { "kind": "scalar", "dataType": "string" } }
                ] } }
            ]
        }))
        .unwrap();

        assert_eq!(
            schema.field("age").unwrap().value_type,
            ValueType::scalar(DataType::Integer)
        );
        assert!(schema.field("email").unwrap().value_type.is_nullable());
        assert_eq!(
            schema.field("tags").unwrap().value_type.element(),
            Some(&ValueType::scalar(DataType::String))
        );
        assert_eq!(
            schema.field("status").unwrap().value_type.data_type(),
            Some(DataType::Enum)
        );
        let address = schema.field("address").unwrap().value_type.as_entity().unwrap();
        assert_eq!(address.name, "Address");
        assert!(address.field("city").is_some());
    }

    #[test]
    fn test_field_lookup_case() {
        let schema =
            EntityType::new("Person").with_field("Age", ValueType::scalar(DataType::Integer));
        assert!(schema.field("age").is_none());
        assert_eq!(schema.field_ignore_case("age").unwrap().name, "Age");
    }

    #[test]
    fn test_display() {
        let ty = ValueType::list(ValueType::nullable(DataType::Integer));
        assert_eq!(ty.to_string(), "list<integer?>");
    }
}
