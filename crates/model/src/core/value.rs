use crate::{
    core::{data_type::DataType, schema::EnumType},
    errors::ConversionError,
};
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive, Zero};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    String(String),
    Decimal(BigDecimal),
    Double(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Guid(Uuid),
    /// Underlying integer of an enum member.
    Enum(i64),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Int(_) => Some(DataType::Integer),
            Value::String(_) => Some(DataType::String),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::Double(_) => Some(DataType::Double),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::DateTime(_) => Some(DataType::DateTime),
            Value::Guid(_) => Some(DataType::Guid),
            Value::Enum(_) => Some(DataType::Enum),
            Value::Null => None,
        }
    }

    /// Converts a JSON scalar. Arrays and objects have no scalar form.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::Decimal(BigDecimal::from(u)))
                } else {
                    n.as_f64().map(Value::Double)
                }
            }
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Plain JSON form, used when records are written back out.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) | Value::Enum(v) => serde_json::Value::from(*v),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Decimal(d) => serde_json::Value::String(d.to_string()),
            Value::Double(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::DateTime(t) => {
                serde_json::Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Guid(g) => serde_json::Value::String(g.to_string()),
            Value::Null => serde_json::Value::Null,
        }
    }

    /// Converts this value to the given kind.
    ///
    /// `Null` converts to `Null` for every kind; whether a null is acceptable
    /// is the caller's decision. Converting to `Enum` only yields the raw
    /// underlying integer, use [`Value::convert_enum`] to validate membership.
    pub fn convert(&self, target: DataType) -> Result<Value, ConversionError> {
        if self.is_null() {
            return Ok(Value::Null);
        }

        match target {
            DataType::Integer => self.to_integer().map(Value::Int),
            DataType::Enum => self.to_integer().map(Value::Enum),
            DataType::String => Ok(Value::String(self.to_text())),
            DataType::Decimal => self.to_decimal().map(Value::Decimal),
            DataType::Double => self.to_double().map(Value::Double),
            DataType::Boolean => self.to_boolean().map(Value::Boolean),
            DataType::DateTime => self.to_date_time().map(Value::DateTime),
            DataType::Guid => self.to_guid().map(Value::Guid),
            DataType::Expression => Err(self.unsupported(target)),
        }
    }

    /// Converts this value to a member of `enum_type`, accepting either a
    /// member name (ASCII case-insensitive) or its underlying integer.
    pub fn convert_enum(&self, enum_type: &EnumType) -> Result<Value, ConversionError> {
        let raw = match self {
            Value::Null => return Ok(Value::Null),
            Value::String(s) => match enum_type.member_named(s.trim()) {
                Some(member) => member.value,
                None => s.trim().parse::<i64>().map_err(|_| {
                    ConversionError::UnknownEnumMember {
                        value: format!("'{s}'"),
                        enum_name: enum_type.name.clone(),
                    }
                })?,
            },
            Value::Int(v) | Value::Enum(v) => *v,
            Value::Double(v) if v.fract() == 0.0 => self.to_integer()?,
            Value::Decimal(d) if d.is_integer() => self.to_integer()?,
            _ => return Err(self.unsupported(DataType::Enum)),
        };

        if enum_type.contains(raw) {
            Ok(Value::Enum(raw))
        } else {
            Err(ConversionError::UnknownEnumMember {
                value: raw.to_string(),
                enum_name: enum_type.name.clone(),
            })
        }
    }

    /// Natural order between two values of compatible kinds.
    ///
    /// Numeric kinds compare by magnitude across representations and enum
    /// members compare by their underlying integer. Returns `None` for
    /// incompatible kinds and for `Null`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) | (Enum(a), Enum(b)) | (Int(a), Enum(b)) | (Enum(a), Int(b)) => {
                Some(a.cmp(b))
            }
            (Double(a), Double(b)) => a.partial_cmp(b),
            (Int(a), Double(b)) => (*a as f64).partial_cmp(b),
            (Double(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (Decimal(a), Int(b)) => Some(a.cmp(&BigDecimal::from(*b))),
            (Int(a), Decimal(b)) => Some(BigDecimal::from(*a).cmp(b)),
            (Decimal(a), Double(b)) => BigDecimal::from_f64(*b).map(|b| a.cmp(&b)),
            (Double(a), Decimal(b)) => BigDecimal::from_f64(*a).map(|a| a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Guid(a), Guid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    fn to_integer(&self) -> Result<i64, ConversionError> {
        match self {
            Value::Int(v) | Value::Enum(v) => Ok(*v),
            Value::Boolean(b) => Ok(i64::from(*b)),
            Value::Double(v) => {
                let rounded = v.round_ties_even();
                if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64
                {
                    Ok(rounded as i64)
                } else {
                    Err(ConversionError::OutOfRange {
                        value: v.to_string(),
                        target: DataType::Integer,
                    })
                }
            }
            Value::Decimal(d) => d.round(0).to_i64().ok_or_else(|| ConversionError::OutOfRange {
                value: d.to_string(),
                target: DataType::Integer,
            }),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| parse_error(s, DataType::Integer, e)),
            _ => Err(self.unsupported(DataType::Integer)),
        }
    }

    fn to_decimal(&self) -> Result<BigDecimal, ConversionError> {
        match self {
            Value::Int(v) | Value::Enum(v) => Ok(BigDecimal::from(*v)),
            Value::Boolean(b) => Ok(BigDecimal::from(i64::from(*b))),
            Value::Decimal(d) => Ok(d.clone()),
            Value::Double(v) => {
                BigDecimal::from_f64(*v).ok_or_else(|| ConversionError::OutOfRange {
                    value: v.to_string(),
                    target: DataType::Decimal,
                })
            }
            Value::String(s) => BigDecimal::from_str(s.trim())
                .map_err(|e| parse_error(s, DataType::Decimal, e)),
            _ => Err(self.unsupported(DataType::Decimal)),
        }
    }

    fn to_double(&self) -> Result<f64, ConversionError> {
        match self {
            Value::Int(v) | Value::Enum(v) => Ok(*v as f64),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Double(v) => Ok(*v),
            Value::Decimal(d) => d.to_f64().ok_or_else(|| ConversionError::OutOfRange {
                value: d.to_string(),
                target: DataType::Double,
            }),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| parse_error(s, DataType::Double, e)),
            _ => Err(self.unsupported(DataType::Double)),
        }
    }

    fn to_boolean(&self) -> Result<bool, ConversionError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            Value::Int(v) => Ok(*v != 0),
            Value::Double(v) => Ok(*v != 0.0),
            Value::Decimal(d) => Ok(!d.is_zero()),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(parse_error(s, DataType::Boolean, "expected 'true' or 'false'"))
                }
            }
            _ => Err(self.unsupported(DataType::Boolean)),
        }
    }

    fn to_date_time(&self) -> Result<DateTime<Utc>, ConversionError> {
        match self {
            Value::DateTime(t) => Ok(*t),
            Value::String(s) => parse_date_time(s).ok_or_else(|| {
                parse_error(s, DataType::DateTime, "unrecognized date/time format")
            }),
            _ => Err(self.unsupported(DataType::DateTime)),
        }
    }

    fn to_guid(&self) -> Result<Uuid, ConversionError> {
        match self {
            Value::Guid(g) => Ok(*g),
            Value::String(s) => {
                Uuid::parse_str(s.trim()).map_err(|e| parse_error(s, DataType::Guid, e))
            }
            _ => Err(self.unsupported(DataType::Guid)),
        }
    }

    fn to_text(&self) -> String {
        match self {
            Value::Int(v) | Value::Enum(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::Decimal(d) => d.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::DateTime(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Guid(g) => g.to_string(),
            Value::Null => String::new(),
        }
    }

    fn unsupported(&self, target: DataType) -> ConversionError {
        ConversionError::Unsupported {
            value: self.to_string(),
            target,
        }
    }
}

fn parse_error(input: &str, target: DataType, reason: impl fmt::Display) -> ConversionError {
    ConversionError::Parse {
        input: input.to_string(),
        target,
        reason: reason.to_string(),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD[T| ]HH:MM:SS[.fff]` (taken as UTC) and bare dates.
fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Decimal(v) => write!(f, "{v}m"),
            Value::Double(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(
                f,
                "\"{}\"",
                v.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            ),
            Value::Guid(v) => write!(f, "\"{v}\""),
            Value::Enum(v) => write!(f, "enum({v})"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::EnumMember;
    use chrono::TimeZone;

    fn status_enum() -> EnumType {
        EnumType::new(
            "Status",
            vec![
                EnumMember::new("Pending", 0),
                EnumMember::new("Active", 1),
                EnumMember::new("Closed", 2),
            ],
        )
    }

    #[test]
    fn test_convert_integer() {
        assert_eq!(Value::from("42").convert(DataType::Integer), Ok(Value::Int(42)));
        assert_eq!(Value::Double(2.5).convert(DataType::Integer), Ok(Value::Int(2)));
        assert_eq!(Value::Double(3.5).convert(DataType::Integer), Ok(Value::Int(4)));
        assert_eq!(Value::Boolean(true).convert(DataType::Integer), Ok(Value::Int(1)));
        assert!(matches!(
            Value::from("4.2").convert(DataType::Integer),
            Err(ConversionError::Parse { .. })
        ));
        assert!(matches!(
            Value::Double(f64::INFINITY).convert(DataType::Integer),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_convert_decimal_and_double() {
        assert_eq!(
            Value::from("10.25").convert(DataType::Decimal),
            Ok(Value::Decimal(BigDecimal::from_str("10.25").unwrap()))
        );
        assert_eq!(Value::Int(3).convert(DataType::Double), Ok(Value::Double(3.0)));
        assert!(Value::from("abc").convert(DataType::Double).is_err());
    }

    #[test]
    fn test_convert_boolean() {
        assert_eq!(Value::from("TRUE").convert(DataType::Boolean), Ok(Value::Boolean(true)));
        assert_eq!(Value::Int(0).convert(DataType::Boolean), Ok(Value::Boolean(false)));
        assert!(Value::from("yes").convert(DataType::Boolean).is_err());
    }

    #[test]
    fn test_convert_date_time_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        for input in [
            "2024-03-01T12:30:00Z",
            "2024-03-01T14:30:00+02:00",
            "2024-03-01 12:30:00",
            "2024-03-01T12:30:00",
        ] {
            assert_eq!(
                Value::from(input).convert(DataType::DateTime),
                Ok(Value::DateTime(expected)),
                "{input}"
            );
        }

        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Value::from("2024-03-01").convert(DataType::DateTime),
            Ok(Value::DateTime(midnight))
        );
        assert!(Value::Int(5).convert(DataType::DateTime).is_err());
    }

    #[test]
    fn test_convert_guid() {
        let id = Uuid::new_v4();
        assert_eq!(
            Value::String(id.to_string()).convert(DataType::Guid),
            Ok(Value::Guid(id))
        );
        assert!(matches!(
            Value::from("not-a-guid").convert(DataType::Guid),
            Err(ConversionError::Parse { .. })
        ));
    }

    #[test]
    fn test_convert_string_and_null() {
        assert_eq!(Value::Int(7).convert(DataType::String), Ok(Value::from("7")));
        assert_eq!(Value::Null.convert(DataType::Integer), Ok(Value::Null));
        assert!(Value::Int(1).convert(DataType::Expression).is_err());
    }

    #[test]
    fn test_convert_enum() {
        let status = status_enum();
        assert_eq!(Value::from("active").convert_enum(&status), Ok(Value::Enum(1)));
        assert_eq!(Value::Int(2).convert_enum(&status), Ok(Value::Enum(2)));
        assert_eq!(Value::from("0").convert_enum(&status), Ok(Value::Enum(0)));
        assert!(matches!(
            Value::Int(9).convert_enum(&status),
            Err(ConversionError::UnknownEnumMember { .. })
        ));
        assert!(matches!(
            Value::from("Archived").convert_enum(&status),
            Err(ConversionError::UnknownEnumMember { .. })
        ));
    }

    #[test]
    fn test_compare_across_numeric_kinds() {
        assert_eq!(Value::Int(2).compare(&Value::Double(2.0)), Some(Ordering::Equal));
        assert_eq!(
            Value::Decimal(BigDecimal::from_str("1.50").unwrap())
                .compare(&Value::Decimal(BigDecimal::from_str("1.5").unwrap())),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::Enum(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(Value::from("a").compare(&Value::Int(1)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from_json(&serde_json::json!(5)), Some(Value::Int(5)));
        assert_eq!(Value::from_json(&serde_json::json!(1.5)), Some(Value::Double(1.5)));
        assert_eq!(Value::from_json(&serde_json::json!(null)), Some(Value::Null));
        assert_eq!(Value::from_json(&serde_json::json!([1])), None);
    }
}
