use model::{Operator, Value};
use std::cmp::Ordering;
use tracing::warn;

/// Applies a comparison operator to a member value and a constant.
///
/// Two nulls are equal and a null never equals a non-null. Ordering
/// operators are false whenever either side is null.
pub(crate) struct ComparisonEvaluator<'a> {
    left: &'a Value,
    right: &'a Value,
    operator: Operator,
}

impl<'a> ComparisonEvaluator<'a> {
    pub fn new(left: &'a Value, operator: Operator, right: &'a Value) -> Self {
        Self {
            left,
            right,
            operator,
        }
    }

    pub fn evaluate(&self) -> bool {
        match (self.left, self.right) {
            (Value::Null, Value::Null) => self.operator == Operator::Eq,
            (Value::Null, _) | (_, Value::Null) => self.operator == Operator::Neq,
            (left, right) => match left.compare(right) {
                Some(ordering) => self.apply(ordering),
                None => {
                    warn!(
                        "Cannot compare {:?} with {:?} using {}",
                        left, right, self.operator
                    );
                    self.operator == Operator::Neq
                }
            },
        }
    }

    fn apply(&self, ordering: Ordering) -> bool {
        match self.operator {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Neq => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Equality with null == null, as used by set membership.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    ComparisonEvaluator::new(left, Operator::Eq, right).evaluate()
}
