pub(crate) mod binary;
pub(crate) mod display;

use crate::node::{Aggregate, CompiledNode, Operand, PropertyAccess};
use binary::{ComparisonEvaluator, values_equal};
use model::{Field, Value};
use std::ops::Deref;
use tracing::warn;

/// Trait for evaluating compiled filters against one scope value: the root
/// entity, or an element while inside a collection quantifier.
pub trait Evaluator {
    fn evaluate(&self, scope: &Field<'_>) -> bool;
}

impl Evaluator for CompiledNode {
    fn evaluate(&self, scope: &Field<'_>) -> bool {
        match self {
            CompiledNode::And(children) => children
                .iter()
                .fold(true, |acc, c| acc && c.evaluate(scope)),
            CompiledNode::Or(children) => children
                .iter()
                .fold(false, |acc, c| acc || c.evaluate(scope)),

            CompiledNode::Compare {
                operand,
                operator,
                constant,
            } => match operand_value(operand, scope) {
                Some(value) => ComparisonEvaluator::new(&value, *operator, constant).evaluate(),
                None => false,
            },

            CompiledNode::Collection {
                property,
                predicate,
                aggregate,
                ..
            } => {
                let target = resolve(property, scope);
                let elements: &[Field<'_>] = match &*target {
                    Field::List(items) => items,
                    // A null collection has no elements.
                    field if field.is_null() => &[],
                    other => {
                        warn!("Expected a collection at {:?}, found {:?}", property.path, other);
                        &[]
                    }
                };

                match aggregate {
                    Aggregate::All => elements.iter().all(|e| predicate.evaluate(e)),
                    Aggregate::Any => elements.iter().any(|e| predicate.evaluate(e)),
                    Aggregate::Count { operator, constant } => {
                        let count = elements.iter().filter(|e| predicate.evaluate(e)).count();
                        let count = Value::Int(i64::try_from(count).unwrap_or(i64::MAX));
                        ComparisonEvaluator::new(&count, *operator, constant).evaluate()
                    }
                }
            }

            CompiledNode::Contains { property, set } => match resolve(property, scope).as_value() {
                Some(value) => set.iter().any(|candidate| values_equal(value, candidate)),
                None => false,
            },

            CompiledNode::StringContains { property, needle } => {
                match resolve(property, scope).as_value() {
                    Some(Value::String(s)) => s.contains(needle.as_str()),
                    Some(Value::Null) => false,
                    other => {
                        warn!("Expected a string at {:?}, found {:?}", property.path, other);
                        false
                    }
                }
            }
        }
    }
}

fn operand_value(operand: &Operand, scope: &Field<'_>) -> Option<Value> {
    match operand {
        Operand::Property(access) => {
            let target = resolve(access, scope);
            match target.as_value() {
                Some(value) => Some(value.clone()),
                None => {
                    warn!("Expected a scalar at {:?}, found {:?}", access.path, &*target);
                    None
                }
            }
        }
        Operand::Method { name, method } => match scope {
            Field::Entity(entity) => Some(method.evaluate(*entity)),
            other => {
                warn!("Method {} needs an entity scope, found {:?}", name, other);
                None
            }
        },
    }
}

/// Either the scope itself or a member reached from it.
enum Resolved<'s, 'a> {
    Scope(&'s Field<'a>),
    Member(Field<'a>),
}

impl<'a> Deref for Resolved<'_, 'a> {
    type Target = Field<'a>;

    fn deref(&self) -> &Field<'a> {
        match self {
            Resolved::Scope(field) => field,
            Resolved::Member(field) => field,
        }
    }
}

/// Walks `access` from `scope`. Missing members and null intermediate
/// entities resolve to null.
fn resolve<'s, 'a>(access: &PropertyAccess, scope: &'s Field<'a>) -> Resolved<'s, 'a> {
    let Some((first, rest)) = access.path.split_first() else {
        return Resolved::Scope(scope);
    };

    let mut current = member(scope, first);
    for segment in rest {
        current = member(&current, segment);
    }
    Resolved::Member(current)
}

fn member<'a>(field: &Field<'a>, name: &str) -> Field<'a> {
    match field {
        Field::Entity(entity) => {
            let entity = *entity;
            entity.field(name).unwrap_or_else(Field::null)
        }
        _ => Field::null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Operator, Record, RecordValue};
    use tracing_test::traced_test;

    fn person() -> Record {
        Record::new("Person", vec![])
            .with("age", Value::Int(25))
            .with("nickname", Value::Null)
            .with(
                "tags",
                RecordValue::List(vec![Value::from("a").into(), Value::from("b").into()]),
            )
            .with("address", Record::new("Address", vec![]).with("city", Value::from("Oslo")))
            .with("manager", Value::Null)
    }

    fn compare(path: &[&str], operator: Operator, constant: Value) -> CompiledNode {
        CompiledNode::Compare {
            operand: Operand::Property(PropertyAccess::new(
                path.iter().map(|s| s.to_string()).collect(),
            )),
            operator,
            constant,
        }
    }

    fn any_tag_equals(tag: &str) -> CompiledNode {
        CompiledNode::Collection {
            property: PropertyAccess::new(vec!["tags".to_string()]),
            parameter: "f1".to_string(),
            predicate: Box::new(compare(&[], Operator::Eq, Value::from(tag))),
            aggregate: Aggregate::Any,
        }
    }

    #[test]
    fn test_nested_and_missing_members() {
        let record = person();
        let root = Field::Entity(&record);

        assert!(compare(&["address", "city"], Operator::Eq, Value::from("Oslo")).evaluate(&root));
        assert!(compare(&["manager", "name"], Operator::Eq, Value::Null).evaluate(&root));
        assert!(compare(&["missing"], Operator::Eq, Value::Null).evaluate(&root));
        assert!(!compare(&["age", "x"], Operator::Eq, Value::Int(25)).evaluate(&root));
    }

    #[test]
    fn test_logical_fold() {
        let record = person();
        let root = Field::Entity(&record);

        let adult = compare(&["age"], Operator::Gte, Value::Int(18));
        let senior = compare(&["age"], Operator::Gte, Value::Int(65));

        assert!(CompiledNode::And(vec![adult.clone(), any_tag_equals("a")]).evaluate(&root));
        assert!(!CompiledNode::And(vec![adult.clone(), senior.clone()]).evaluate(&root));
        assert!(CompiledNode::Or(vec![senior.clone(), adult]).evaluate(&root));
        assert!(!CompiledNode::Or(vec![senior, any_tag_equals("z")]).evaluate(&root));
    }

    #[test]
    fn test_collection_aggregates() {
        let record = person();
        let root = Field::Entity(&record);

        let count = |operator, n| CompiledNode::Collection {
            property: PropertyAccess::new(vec!["tags".to_string()]),
            parameter: "f1".to_string(),
            predicate: Box::new(compare(&[], Operator::Neq, Value::from("z"))),
            aggregate: Aggregate::Count {
                operator,
                constant: Value::Int(n),
            },
        };
        assert!(count(Operator::Eq, 2).evaluate(&root));
        assert!(!count(Operator::Gt, 2).evaluate(&root));

        let all_on_null = CompiledNode::Collection {
            property: PropertyAccess::new(vec!["manager".to_string()]),
            parameter: "f1".to_string(),
            predicate: Box::new(compare(&[], Operator::Eq, Value::Int(0))),
            aggregate: Aggregate::All,
        };
        assert!(all_on_null.evaluate(&root));
    }

    #[traced_test]
    #[test]
    fn test_host_type_mismatch_is_false() {
        let record = person();
        let root = Field::Entity(&record);

        let age_contains = CompiledNode::StringContains {
            property: PropertyAccess::new(vec!["age".to_string()]),
            needle: "2".to_string(),
        };
        assert!(!age_contains.evaluate(&root));
        assert!(logs_contain("Expected a string"));

        let any_on_age = CompiledNode::Collection {
            property: PropertyAccess::new(vec!["age".to_string()]),
            parameter: "f1".to_string(),
            predicate: Box::new(compare(&[], Operator::Eq, Value::Int(25))),
            aggregate: Aggregate::Any,
        };
        assert!(!any_on_age.evaluate(&root));
        assert!(logs_contain("Expected a collection"));
    }

    #[test]
    fn test_contains_and_string_contains() {
        let record = person();
        let root = Field::Entity(&record);

        let contains = CompiledNode::Contains {
            property: PropertyAccess::new(vec!["age".to_string()]),
            set: vec![Value::Int(24), Value::Int(25)],
        };
        assert!(contains.evaluate(&root));

        let city = CompiledNode::StringContains {
            property: PropertyAccess::new(vec!["address".to_string(), "city".to_string()]),
            needle: "sl".to_string(),
        };
        assert!(city.evaluate(&root));

        let nickname = CompiledNode::StringContains {
            property: PropertyAccess::new(vec!["nickname".to_string()]),
            needle: String::new(),
        };
        assert!(!nickname.evaluate(&root));
    }
}
