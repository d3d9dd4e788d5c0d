use super::{Action, Filter, FilterNode, LeafExpression, LogicalOperator, Operator, PropertyType};
use crate::core::data_type::DataType;

impl Filter {
    pub fn new(operator: LogicalOperator, expressions: Vec<FilterNode>) -> Self {
        Filter {
            operator,
            expressions,
        }
    }

    pub fn and<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<FilterNode>,
    {
        Filter::new(LogicalOperator::And, nodes.into_iter().map(Into::into).collect())
    }

    pub fn or<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<FilterNode>,
    {
        Filter::new(LogicalOperator::Or, nodes.into_iter().map(Into::into).collect())
    }
}

impl From<Filter> for FilterNode {
    fn from(filter: Filter) -> Self {
        FilterNode::Condition { filter }
    }
}

impl From<LeafExpression> for FilterNode {
    fn from(expression: LeafExpression) -> Self {
        FilterNode::Leaf { expression }
    }
}

impl LeafExpression {
    pub fn new(property_type: PropertyType, property_id: &str) -> Self {
        LeafExpression {
            property_type,
            action: Action::Compare,
            property_id: property_id.to_string(),
            operator: Operator::Eq,
            data_type: None,
            right: None,
            data: None,
            token: None,
        }
    }

    /// `property <operator> constant` against a scalar member.
    pub fn compare(property_id: &str, operator: Operator, data_type: DataType) -> Self {
        LeafExpression::new(PropertyType::Value, property_id)
            .with_operator(operator)
            .with_data_type(data_type)
    }

    /// `method(entity) <operator> constant`.
    pub fn method(name: &str, operator: Operator, data_type: DataType) -> Self {
        LeafExpression::new(PropertyType::Method, name)
            .with_operator(operator)
            .with_data_type(data_type)
    }

    pub fn any(property_id: &str, element_filter: &Filter) -> Self {
        LeafExpression::quantified(Action::Any, property_id, element_filter)
    }

    pub fn all(property_id: &str, element_filter: &Filter) -> Self {
        LeafExpression::quantified(Action::All, property_id, element_filter)
    }

    /// `count(elements matching element_filter) <operator> constant`.
    pub fn count(property_id: &str, element_filter: &Filter, operator: Operator) -> Self {
        LeafExpression::quantified(Action::Count, property_id, element_filter)
            .with_operator(operator)
            .with_data_type(DataType::Integer)
    }

    /// Membership of a key member in a literal set.
    pub fn contains(property_id: &str, data_type: DataType, values: serde_json::Value) -> Self {
        LeafExpression::new(PropertyType::Key, property_id)
            .with_action(Action::Contains)
            .with_data_type(data_type)
            .with_data(values)
    }

    pub fn string_contains(property_id: &str, needle: &str) -> Self {
        LeafExpression::new(PropertyType::StringContains, property_id)
            .with_data_type(DataType::String)
            .with_data(serde_json::Value::String(needle.to_string()))
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_right(mut self, right: impl Into<serde_json::Value>) -> Self {
        self.right = Some(right.into());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    fn quantified(action: Action, property_id: &str, element_filter: &Filter) -> Self {
        let mut leaf =
            LeafExpression::new(PropertyType::Collection, property_id).with_action(action);
        // Filter serialization cannot fail: every key is a string.
        leaf.data = element_filter.to_value().ok();
        leaf
    }
}
