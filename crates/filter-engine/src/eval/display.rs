use crate::node::{Aggregate, CompiledNode, Operand, PropertyAccess};
use std::fmt::{self, Write};

/// Renders `node` in lambda form, with `parameter` naming the current scope.
pub(crate) fn render(node: &CompiledNode, parameter: &str, out: &mut impl Write) -> fmt::Result {
    match node {
        CompiledNode::And(children) => render_logical(children, "&&", parameter, out),
        CompiledNode::Or(children) => render_logical(children, "||", parameter, out),

        CompiledNode::Compare {
            operand,
            operator,
            constant,
        } => {
            match operand {
                Operand::Property(access) => render_access(access, parameter, out)?,
                Operand::Method { name, .. } => write!(out, "{name}({parameter})")?,
            }
            write!(out, " {operator} {constant}")
        }

        CompiledNode::Collection {
            property,
            parameter: element,
            predicate,
            aggregate,
        } => {
            render_access(property, parameter, out)?;
            let name = match aggregate {
                Aggregate::All => "all",
                Aggregate::Any => "any",
                Aggregate::Count { .. } => "count",
            };
            write!(out, ".{name}({element} => ")?;
            render(predicate, element, out)?;
            out.write_char(')')?;
            if let Aggregate::Count { operator, constant } = aggregate {
                write!(out, " {operator} {constant}")?;
            }
            Ok(())
        }

        CompiledNode::Contains { property, set } => {
            out.write_char('[')?;
            for (i, value) in set.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write!(out, "{value}")?;
            }
            out.write_str("].contains(")?;
            render_access(property, parameter, out)?;
            out.write_char(')')
        }

        CompiledNode::StringContains { property, needle } => {
            render_access(property, parameter, out)?;
            write!(out, ".contains({needle:?})")
        }
    }
}

fn render_logical(
    children: &[CompiledNode],
    symbol: &str,
    parameter: &str,
    out: &mut impl Write,
) -> fmt::Result {
    if let [only] = children {
        return render(only, parameter, out);
    }

    out.write_char('(')?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(out, " {symbol} ")?;
        }
        render(child, parameter, out)?;
    }
    out.write_char(')')
}

fn render_access(access: &PropertyAccess, parameter: &str, out: &mut impl Write) -> fmt::Result {
    out.write_str(parameter)?;
    for segment in &access.path {
        write!(out, ".{segment}")?;
    }
    Ok(())
}
