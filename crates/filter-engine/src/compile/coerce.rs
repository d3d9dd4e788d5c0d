use crate::{error::CompileErrorKind, registry::TokenRegistry};
use model::{ConversionError, DataType, LeafExpression, Value, ValueType};

/// Checks that a leaf declared as `data_type` can be compared with a member
/// of type `target`. Numeric kinds are interchangeable.
pub(crate) fn check_kind(data_type: DataType, target: &ValueType) -> Result<(), CompileErrorKind> {
    let Some(member) = target.data_type() else {
        return Err(CompileErrorKind::TypeMismatch {
            expected: format!("a scalar member for {data_type}"),
            actual: target.to_string(),
        });
    };

    if member == data_type || (member.is_numeric() && data_type.is_numeric()) {
        Ok(())
    } else {
        Err(CompileErrorKind::TypeMismatch {
            expected: target.to_string(),
            actual: data_type.to_string(),
        })
    }
}

/// Produces the constant operand of a comparison leaf from either its
/// literal or its token, typed as `target`.
pub(crate) fn coerce_constant(
    tokens: &TokenRegistry,
    leaf: &LeafExpression,
    data_type: DataType,
    target: &ValueType,
) -> Result<Value, CompileErrorKind> {
    let raw = match (leaf.literal(), leaf.token_name()) {
        (None, None) => {
            return if accepts_null(data_type, target) {
                Ok(Value::Null)
            } else {
                Err(CompileErrorKind::MissingOperand(target.clone()))
            };
        }
        (Some(_), Some(_)) => return Err(CompileErrorKind::AmbiguousOperand),
        (None, Some(name)) => tokens
            .get(name)
            .map(|token| token.value())
            .ok_or_else(|| CompileErrorKind::UnknownToken(name.to_string()))?,
        (Some(literal), None) => scalar_literal(literal, data_type)?,
    };

    coerce_value(raw, data_type, target)
}

/// Converts `raw` to `data_type`, then to the member type `target`.
pub(crate) fn coerce_value(
    raw: Value,
    data_type: DataType,
    target: &ValueType,
) -> Result<Value, CompileErrorKind> {
    if data_type == DataType::Expression {
        return Err(CompileErrorKind::InvalidFilter(
            "expression is not a valid operand type".to_string(),
        ));
    }

    if raw.is_null() {
        return if accepts_null(data_type, target) {
            Ok(Value::Null)
        } else {
            Err(CompileErrorKind::MissingOperand(target.clone()))
        };
    }

    match target {
        ValueType::Enum { enum_type, .. } => Ok(raw.convert_enum(enum_type)?),
        ValueType::Scalar {
            data_type: member, ..
        } => {
            let declared = raw.convert(data_type)?;
            if *member == DataType::Integer && declared_fraction(&declared)? {
                return Err(CompileErrorKind::Coercion(ConversionError::Parse {
                    input: declared.to_string(),
                    target: DataType::Integer,
                    reason: "fractional part would be lost".to_string(),
                }));
            }
            Ok(declared.convert(*member)?)
        }
        other => Err(CompileErrorKind::TypeMismatch {
            expected: format!("a scalar member for {data_type}"),
            actual: other.to_string(),
        }),
    }
}

pub(crate) fn scalar_literal(
    literal: &serde_json::Value,
    data_type: DataType,
) -> Result<Value, CompileErrorKind> {
    Value::from_json(literal).ok_or_else(|| {
        CompileErrorKind::Coercion(ConversionError::Unsupported {
            value: literal.to_string(),
            target: data_type,
        })
    })
}

/// Whether a Double or Decimal constant has a fractional part. Integer
/// leaves keep their rounding conversion.
fn declared_fraction(declared: &Value) -> Result<bool, CompileErrorKind> {
    match declared {
        Value::Double(_) | Value::Decimal(_) => {
            Ok(!declared.convert(DataType::Integer)?.equal(declared))
        }
        _ => Ok(false),
    }
}

fn accepts_null(data_type: DataType, target: &ValueType) -> bool {
    target.is_nullable() || data_type == DataType::String
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{EnumMember, EnumType, Operator};
    use serde_json::json;

    fn leaf(data_type: DataType) -> LeafExpression {
        LeafExpression::compare("x", Operator::Eq, data_type)
    }

    fn coerce(
        tokens: &TokenRegistry,
        leaf: &LeafExpression,
        target: &ValueType,
    ) -> Result<Value, CompileErrorKind> {
        let data_type = leaf.data_type.unwrap_or(DataType::String);
        coerce_constant(tokens, leaf, data_type, target)
    }

    fn status() -> ValueType {
        ValueType::enumeration(EnumType::new(
            "Status",
            vec![EnumMember::new("Active", 1), EnumMember::new("Closed", 2)],
        ))
    }

    #[test]
    fn test_operand_presence() {
        let tokens = TokenRegistry::new();
        let int = ValueType::scalar(DataType::Integer);

        assert!(matches!(
            coerce(&tokens, &leaf(DataType::Integer), &int),
            Err(CompileErrorKind::MissingOperand(_))
        ));
        assert_eq!(
            coerce(
                &tokens,
                &leaf(DataType::Integer),
                &ValueType::nullable(DataType::Integer)
            )
            .unwrap(),
            Value::Null
        );
        assert_eq!(
            coerce(
                &tokens,
                &leaf(DataType::String),
                &ValueType::scalar(DataType::String)
            )
            .unwrap(),
            Value::Null
        );

        let both = leaf(DataType::Integer).with_right(1).with_token("minAge");
        assert!(matches!(
            coerce(&tokens, &both, &int),
            Err(CompileErrorKind::AmbiguousOperand)
        ));

        let unknown = leaf(DataType::Integer).with_token("minAge");
        assert!(matches!(
            coerce(&tokens, &unknown, &int),
            Err(CompileErrorKind::UnknownToken(name)) if name == "minAge"
        ));
    }

    #[test]
    fn test_token_value_is_coerced() {
        let mut tokens = TokenRegistry::new();
        tokens.register_value("minAge", "18").unwrap();
        tokens.register_value("nothing", Value::Null).unwrap();
        let int = ValueType::scalar(DataType::Integer);

        let padded = leaf(DataType::Integer).with_token(" minAge ");
        assert_eq!(coerce(&tokens, &padded, &int).unwrap(), Value::Int(18));

        let nothing = leaf(DataType::Integer).with_token("nothing");
        assert!(matches!(
            coerce(&tokens, &nothing, &int),
            Err(CompileErrorKind::MissingOperand(_))
        ));
    }

    #[test]
    fn test_literal_coercion() {
        let tokens = TokenRegistry::new();

        assert_eq!(
            coerce(
                &tokens,
                &leaf(DataType::Integer).with_right(2.5),
                &ValueType::scalar(DataType::Double)
            )
            .unwrap(),
            Value::Double(2.0)
        );
        assert!(matches!(
            coerce(
                &tokens,
                &leaf(DataType::Guid).with_right("not-a-guid"),
                &ValueType::scalar(DataType::Guid)
            ),
            Err(CompileErrorKind::Coercion(_))
        ));
        assert!(matches!(
            coerce(
                &tokens,
                &leaf(DataType::Integer).with_right(json!([1])),
                &ValueType::scalar(DataType::Integer)
            ),
            Err(CompileErrorKind::Coercion(_))
        ));
        assert!(matches!(
            coerce(
                &tokens,
                &leaf(DataType::Expression).with_right(1),
                &ValueType::scalar(DataType::Integer)
            ),
            Err(CompileErrorKind::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_enum_coercion() {
        let tokens = TokenRegistry::new();

        let closed = leaf(DataType::Enum).with_right("closed");
        assert_eq!(coerce(&tokens, &closed, &status()).unwrap(), Value::Enum(2));

        let undeclared = leaf(DataType::Enum).with_right(7);
        assert!(matches!(
            coerce(&tokens, &undeclared, &status()),
            Err(CompileErrorKind::Coercion(ConversionError::UnknownEnumMember { .. }))
        ));

        let nullable = ValueType::nullable_enumeration(EnumType::new(
            "Status",
            vec![EnumMember::new("Active", 1)],
        ));
        assert_eq!(
            coerce(&tokens, &leaf(DataType::Enum), &nullable).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_fractional_constant_for_integer_member() {
        let tokens = TokenRegistry::new();
        let int = ValueType::scalar(DataType::Integer);

        let double = leaf(DataType::Double).with_right(17.5);
        assert!(matches!(
            coerce(&tokens, &double, &int),
            Err(CompileErrorKind::Coercion(ConversionError::Parse { .. }))
        ));

        let decimal = leaf(DataType::Decimal).with_right("2.25");
        assert!(matches!(
            coerce(&tokens, &decimal, &int),
            Err(CompileErrorKind::Coercion(ConversionError::Parse { .. }))
        ));

        let whole = leaf(DataType::Double).with_right(18.0);
        assert_eq!(coerce(&tokens, &whole, &int).unwrap(), Value::Int(18));

        // Integer leaves round half to even.
        let rounded = leaf(DataType::Integer).with_right(17.5);
        assert_eq!(coerce(&tokens, &rounded, &int).unwrap(), Value::Int(18));
    }

    #[test]
    fn test_check_kind() {
        assert!(check_kind(DataType::Integer, &ValueType::scalar(DataType::Decimal)).is_ok());
        assert!(check_kind(DataType::Enum, &status()).is_ok());
        assert!(matches!(
            check_kind(DataType::Integer, &ValueType::scalar(DataType::String)),
            Err(CompileErrorKind::TypeMismatch { .. })
        ));
        assert!(matches!(
            check_kind(
                DataType::String,
                &ValueType::list(ValueType::scalar(DataType::String))
            ),
            Err(CompileErrorKind::TypeMismatch { .. })
        ));
    }
}
