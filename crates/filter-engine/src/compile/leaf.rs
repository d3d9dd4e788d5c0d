use crate::{
    compile::{
        coerce::{check_kind, coerce_constant, coerce_value, scalar_literal},
        property::resolve_property,
        tree::compile_filter,
    },
    context::CompileContext,
    error::{CompileError, CompileErrorKind, Result},
    node::{Aggregate, CompiledNode, Operand},
};
use model::{Action, DataType, Filter, LeafExpression, PropertyType, Value, ValueType};
use tracing::{debug, trace};

/// Compiles one leaf condition against the scope type.
pub(crate) fn compile_leaf(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    trace!(
        "Compiling {:?}/{:?} leaf '{}' at {}",
        leaf.property_type,
        leaf.action,
        leaf.property_id,
        ctx.location()
    );

    match leaf.property_type {
        PropertyType::Value => {
            ignore_action(ctx, leaf);
            compile_compare(ctx, leaf, scope)
        }
        PropertyType::Key => match leaf.action {
            Action::Compare => compile_compare(ctx, leaf, scope),
            Action::Contains => compile_contains(ctx, leaf, scope),
            _ => Err(unsupported_action(ctx, leaf)),
        },
        PropertyType::Collection | PropertyType::BasicCollection => match leaf.action {
            Action::All | Action::Any | Action::Count => compile_collection(ctx, leaf, scope),
            _ => Err(unsupported_action(ctx, leaf)),
        },
        PropertyType::Method => {
            ignore_action(ctx, leaf);
            compile_method(ctx, leaf, scope)
        }
        PropertyType::StringContains => {
            ignore_action(ctx, leaf);
            compile_string_contains(ctx, leaf, scope)
        }
    }
}

fn compile_compare(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    let data_type = required_data_type(ctx, leaf)?;
    let (access, member) =
        resolve_property(scope, &leaf.property_id, ctx.options.ignore_property_case)
            .map_err(|kind| ctx.error(kind))?;

    let constant = typed_constant(ctx, leaf, data_type, member)?;

    Ok(CompiledNode::Compare {
        operand: Operand::Property(access),
        operator: leaf.operator,
        constant,
    })
}

fn compile_method(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    let name = leaf.property_id.trim();
    let method = ctx
        .methods
        .get(name)
        .cloned()
        .ok_or_else(|| ctx.error(CompileErrorKind::UnknownMethod(name.to_string())))?;

    if scope.as_entity().is_none() {
        return Err(ctx.error(CompileErrorKind::TypeMismatch {
            expected: format!("an entity scope for method {name}"),
            actual: scope.to_string(),
        }));
    }

    let data_type = required_data_type(ctx, leaf)?;
    let returns = method.returns();
    let constant = typed_constant(ctx, leaf, data_type, &returns)?;

    Ok(CompiledNode::Compare {
        operand: Operand::Method {
            name: name.to_string(),
            method,
        },
        operator: leaf.operator,
        constant,
    })
}

fn compile_collection(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    let (property, collection) =
        resolve_property(scope, &leaf.property_id, ctx.options.ignore_property_case)
            .map_err(|kind| ctx.error(kind))?;

    let Some(element) = collection.element() else {
        return Err(ctx.error(CompileErrorKind::TypeMismatch {
            expected: "a collection".to_string(),
            actual: collection.to_string(),
        }));
    };

    let data = leaf.data.as_ref().filter(|d| !d.is_null()).ok_or_else(|| {
        ctx.error(CompileErrorKind::InvalidFilter(format!(
            "{:?} on '{}' requires an element filter in data",
            leaf.action, leaf.property_id
        )))
    })?;
    let element_filter = Filter::from_value(data).map_err(|e| {
        ctx.error(CompileErrorKind::InvalidFilter(format!(
            "malformed element filter: {e}"
        )))
    })?;

    let aggregate = match leaf.action {
        Action::All | Action::Any => {
            if leaf.literal().is_some() || leaf.token_name().is_some() {
                debug!(
                    "Ignoring constant operand of {:?} on '{}'",
                    leaf.action, leaf.property_id
                );
            }
            if leaf.action == Action::All {
                Aggregate::All
            } else {
                Aggregate::Any
            }
        }
        _ => {
            let data_type = leaf.data_type.unwrap_or(DataType::Integer);
            let count_type = ValueType::scalar(DataType::Integer);
            if data_type != DataType::Integer {
                return Err(ctx.error(CompileErrorKind::TypeMismatch {
                    expected: count_type.to_string(),
                    actual: data_type.to_string(),
                }));
            }
            let constant = typed_constant(ctx, leaf, data_type, &count_type)?;
            Aggregate::Count {
                operator: leaf.operator,
                constant,
            }
        }
    };

    let parameter = ctx.fresh_parameter();
    let predicate = ctx.within("data", |ctx| compile_filter(ctx, &element_filter, element))?;

    Ok(CompiledNode::Collection {
        property,
        parameter,
        predicate: Box::new(predicate),
        aggregate,
    })
}

fn compile_contains(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    let data_type = required_data_type(ctx, leaf)?;
    let (property, member) =
        resolve_property(scope, &leaf.property_id, ctx.options.ignore_property_case)
            .map_err(|kind| ctx.error(kind))?;
    check_kind(data_type, member).map_err(|kind| ctx.error(kind))?;

    let Some(items) = leaf.data.as_ref().and_then(|d| d.as_array()) else {
        return Err(ctx.error(CompileErrorKind::InvalidFilter(format!(
            "contains on '{}' requires an array in data",
            leaf.property_id
        ))));
    };

    let set = items
        .iter()
        .map(|item| {
            let raw = scalar_literal(item, data_type)?;
            coerce_value(raw, data_type, member)
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|kind| ctx.error(kind))?;

    Ok(CompiledNode::Contains { property, set })
}

fn compile_string_contains(
    ctx: &mut CompileContext<'_>,
    leaf: &LeafExpression,
    scope: &ValueType,
) -> Result<CompiledNode> {
    let (property, member) =
        resolve_property(scope, &leaf.property_id, ctx.options.ignore_property_case)
            .map_err(|kind| ctx.error(kind))?;

    let data_type = leaf.data_type.unwrap_or(DataType::String);
    if data_type != DataType::String || member.data_type() != Some(DataType::String) {
        return Err(ctx.error(CompileErrorKind::TypeMismatch {
            expected: DataType::String.to_string(),
            actual: member.to_string(),
        }));
    }

    let needle = match leaf.data.as_ref() {
        Some(serde_json::Value::String(needle)) => needle.clone(),
        _ => {
            return Err(ctx.error(CompileErrorKind::InvalidFilter(format!(
                "stringContains on '{}' requires a string in data",
                leaf.property_id
            ))));
        }
    };

    Ok(CompiledNode::StringContains { property, needle })
}

/// Validates the leaf's kind against `member` and coerces its constant.
fn typed_constant(
    ctx: &CompileContext<'_>,
    leaf: &LeafExpression,
    data_type: DataType,
    member: &ValueType,
) -> Result<Value> {
    check_kind(data_type, member).map_err(|kind| ctx.error(kind))?;

    if leaf.operator.is_ordering() && !data_type.is_ordered() {
        return Err(ctx.error(CompileErrorKind::UnsupportedOperator {
            operator: leaf.operator.to_string(),
            data_type,
        }));
    }

    coerce_constant(ctx.tokens, leaf, data_type, member).map_err(|kind| ctx.error(kind))
}

fn required_data_type(ctx: &CompileContext<'_>, leaf: &LeafExpression) -> Result<DataType> {
    match leaf.data_type {
        Some(DataType::Expression) => Err(ctx.error(CompileErrorKind::InvalidFilter(
            "expression is not a valid operand type".to_string(),
        ))),
        Some(data_type) => Ok(data_type),
        None => Err(ctx.error(CompileErrorKind::InvalidFilter(format!(
            "missing dataType for '{}'",
            leaf.property_id
        )))),
    }
}

fn ignore_action(ctx: &CompileContext<'_>, leaf: &LeafExpression) {
    if leaf.action != Action::Compare {
        debug!(
            "Ignoring action {:?} on {:?} leaf at {}",
            leaf.action,
            leaf.property_type,
            ctx.location()
        );
    }
}

fn unsupported_action(ctx: &CompileContext<'_>, leaf: &LeafExpression) -> CompileError {
    ctx.error(CompileErrorKind::UnsupportedAction {
        action: format!("{:?}", leaf.action),
        property_type: format!("{:?}", leaf.property_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::CompilerOptions,
        registry::{MethodRegistry, TokenRegistry},
    };
    use model::{EntityType, Operator};
    use serde_json::json;

    fn person() -> ValueType {
        ValueType::entity(
            EntityType::new("Person")
                .with_field("age", ValueType::scalar(DataType::Integer))
                .with_field("name", ValueType::scalar(DataType::String))
                .with_field("active", ValueType::scalar(DataType::Boolean))
                .with_field("tags", ValueType::list(ValueType::scalar(DataType::String))),
        )
    }

    fn compile(leaf: &LeafExpression) -> Result<CompiledNode> {
        let tokens = TokenRegistry::new();
        let methods = MethodRegistry::new();
        let options = CompilerOptions::default();
        let mut ctx = CompileContext::new(&tokens, &methods, &options);
        compile_leaf(&mut ctx, leaf, &person())
    }

    #[test]
    fn test_value_compare() {
        let adult =
            LeafExpression::compare("age", Operator::Gt, DataType::Integer).with_right("17");
        let node = compile(&adult).unwrap();
        match node {
            CompiledNode::Compare {
                operator, constant, ..
            } => {
                assert_eq!(operator, Operator::Gt);
                assert_eq!(constant, Value::Int(17));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_operator_and_mismatch() {
        let flag =
            LeafExpression::compare("active", Operator::Gt, DataType::Boolean).with_right(true);
        let err = compile(&flag).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnsupportedOperator { .. }));

        let name = LeafExpression::compare("name", Operator::Eq, DataType::Integer).with_right(1);
        let err = compile(&name).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::TypeMismatch { .. }));

        let untyped = LeafExpression::new(PropertyType::Value, "age").with_right(1);
        let err = compile(&untyped).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::InvalidFilter(_)));
    }

    #[test]
    fn test_fractional_bound_on_integer_member() {
        let err = compile(
            &LeafExpression::compare("age", Operator::Lte, DataType::Double).with_right(17.5),
        )
        .unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::Coercion(_)));

        let node = compile(
            &LeafExpression::compare("age", Operator::Lte, DataType::Double).with_right(18.0),
        )
        .unwrap();
        assert!(matches!(
            node,
            CompiledNode::Compare { constant: Value::Int(18), .. }
        ));
    }

    #[test]
    fn test_key_actions() {
        let ids = LeafExpression::contains("age", DataType::Integer, json!([1, "2", 3]));
        let node = compile(&ids).unwrap();
        match node {
            CompiledNode::Contains { set, .. } => {
                assert_eq!(set, vec![Value::Int(1), Value::Int(2), Value::Int(3)])
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = compile(
            &LeafExpression::new(PropertyType::Key, "age")
                .with_action(Action::Any)
                .with_data_type(DataType::Integer),
        )
        .unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnsupportedAction { .. }));

        let scalar = LeafExpression::contains("age", DataType::Integer, json!(5));
        let err = compile(&scalar).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::InvalidFilter(_)));
    }

    #[test]
    fn test_collection_requires_list_and_filter() {
        let is_a = LeafExpression::compare("", Operator::Eq, DataType::String).with_right("a");
        let element = Filter::and([is_a]);

        assert!(compile(&LeafExpression::any("tags", &element)).is_ok());

        let err = compile(&LeafExpression::any("name", &element)).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::TypeMismatch { .. }));

        let mut no_data = LeafExpression::any("tags", &element);
        no_data.data = None;
        let err = compile(&no_data).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::InvalidFilter(_)));

        let err = compile(
            &LeafExpression::new(PropertyType::BasicCollection, "tags")
                .with_action(Action::Contains),
        )
        .unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnsupportedAction { .. }));
    }

    #[test]
    fn test_string_contains() {
        assert!(compile(&LeafExpression::string_contains("name", "ab")).is_ok());

        let err = compile(&LeafExpression::string_contains("age", "1")).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::TypeMismatch { .. }));

        let err = compile(&LeafExpression::new(PropertyType::StringContains, "name")).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::InvalidFilter(_)));
    }

    #[test]
    fn test_unknown_method() {
        let score = LeafExpression::method("score", Operator::Gt, DataType::Integer).with_right(1);
        let err = compile(&score).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::UnknownMethod(name) if name == "score"));
    }
}
