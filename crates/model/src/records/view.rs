use crate::core::{schema::EntityType, value::Value};
use std::borrow::Cow;

/// Read access to the named members of one entity instance.
///
/// Implementations return `None` for names they do not know; the filter
/// engine treats that the same as a null member.
pub trait EntityView {
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

/// An entity whose shape is known statically.
pub trait Entity: EntityView {
    fn entity_type() -> EntityType;
}

/// A member value borrowed from an [`EntityView`].
pub enum Field<'a> {
    Scalar(Cow<'a, Value>),
    Entity(&'a dyn EntityView),
    List(Vec<Field<'a>>),
}

impl<'a> Field<'a> {
    pub fn null() -> Self {
        Field::Scalar(Cow::Owned(Value::Null))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Field::Scalar(Cow::Owned(value.into()))
    }

    pub fn borrowed(value: &'a Value) -> Self {
        Field::Scalar(Cow::Borrowed(value))
    }

    pub fn entity(entity: &'a dyn EntityView) -> Self {
        Field::Entity(entity)
    }

    /// A nested entity that may be absent.
    pub fn optional_entity<E: EntityView>(entity: Option<&'a E>) -> Self {
        match entity {
            Some(e) => Field::Entity(e),
            None => Field::null(),
        }
    }

    pub fn scalars<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Field::List(items.into_iter().map(Field::value).collect())
    }

    pub fn entities<E: EntityView>(items: &'a [E]) -> Self {
        Field::List(items.iter().map(|e| Field::Entity(e as &dyn EntityView)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Scalar(v) if v.is_null())
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Scalar(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Field::Scalar(v) => Some(v.into_owned()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Scalar(v) => write!(f, "Scalar({v:?})"),
            Field::Entity(_) => write!(f, "Entity(..)"),
            Field::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i64,
        label: Option<String>,
    }

    impl EntityView for Point {
        fn field(&self, name: &str) -> Option<Field<'_>> {
            match name {
                "x" => Some(Field::value(self.x)),
                "label" => Some(Field::value(self.label.clone())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_field_helpers() {
        let p = Point { x: 3, label: None };
        assert_eq!(p.field("x").and_then(Field::into_value), Some(Value::Int(3)));
        assert!(p.field("label").unwrap().is_null());
        assert!(p.field("y").is_none());

        let points = vec![Point { x: 1, label: Some("a".into()) }];
        match Field::entities(&points) {
            Field::List(items) => assert_eq!(items.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
