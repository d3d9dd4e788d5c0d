use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod builder;

/// How the children of a [`Filter`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[default]
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Neq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    pub fn is_ordering(&self) -> bool {
        !matches!(self, Operator::Eq | Operator::Neq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a leaf's `propertyId` designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Value,
    Collection,
    BasicCollection,
    Key,
    Method,
    StringContains,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    #[default]
    Compare,
    All,
    Any,
    Count,
    Contains,
}

/// A single condition of a filter document.
///
/// `right` and `data` keep their JSON form: `right` is a scalar literal, while
/// `data` is a nested filter document for collection actions, an array for
/// `Contains` and a string for `StringContains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafExpression {
    pub property_type: PropertyType,
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LeafExpression {
    /// The literal operand, if one is present and not JSON `null`.
    pub fn literal(&self) -> Option<&serde_json::Value> {
        self.right.as_ref().filter(|v| !v.is_null())
    }

    /// The token name, if one is present and not blank.
    pub fn token_name(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterNode {
    Condition {
        filter: Filter,
    },
    #[serde(rename = "expression")]
    Leaf {
        expression: LeafExpression,
    },
}

/// A logical combination of conditions and nested filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub operator: LogicalOperator,
    #[serde(default)]
    pub expressions: Vec<FilterNode>,
}

impl Filter {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_value(value: &serde_json::Value) -> serde_json::Result<Self> {
        Filter::deserialize(value)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
