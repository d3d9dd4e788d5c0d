use crate::{
    compile::leaf::compile_leaf,
    context::CompileContext,
    error::{CompileErrorKind, Result},
    node::CompiledNode,
};
use model::{Filter, FilterNode, LogicalOperator, ValueType};

/// Compiles every child of `filter` against `scope` and joins them with the
/// filter's operator, left to right.
pub(crate) fn compile_filter(
    ctx: &mut CompileContext<'_>,
    filter: &Filter,
    scope: &ValueType,
) -> Result<CompiledNode> {
    ctx.descend(|ctx| {
        if filter.expressions.is_empty() {
            return Err(ctx.error(CompileErrorKind::InvalidFilter(
                "filter has no expressions".to_string(),
            )));
        }

        let mut children = Vec::with_capacity(filter.expressions.len());
        for (i, node) in filter.expressions.iter().enumerate() {
            let child = ctx.within(format!("expressions[{i}]"), |ctx| match node {
                FilterNode::Condition { filter } => {
                    ctx.within("filter", |ctx| compile_filter(ctx, filter, scope))
                }
                FilterNode::Leaf { expression } => {
                    ctx.within("expression", |ctx| compile_leaf(ctx, expression, scope))
                }
            })?;
            children.push(child);
        }

        Ok(match filter.operator {
            LogicalOperator::And => CompiledNode::And(children),
            LogicalOperator::Or => CompiledNode::Or(children),
        })
    })
}
