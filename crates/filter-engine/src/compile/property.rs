use crate::{error::CompileErrorKind, node::PropertyAccess};
use model::ValueType;

/// Resolves a dotted `property_id` against the scope type.
///
/// A blank id designates the scope itself. Each segment must name a field of
/// the entity reached so far; the returned access carries the schema's
/// spelling of each segment.
pub(crate) fn resolve_property<'t>(
    scope: &'t ValueType,
    property_id: &str,
    ignore_case: bool,
) -> Result<(PropertyAccess, &'t ValueType), CompileErrorKind> {
    if property_id.trim().is_empty() {
        return Ok((PropertyAccess::subject(), scope));
    }

    let mut path = Vec::new();
    let mut current = scope;
    for segment in property_id.split('.') {
        let Some(entity) = current.as_entity() else {
            return Err(CompileErrorKind::UnknownProperty {
                property: property_id.to_string(),
                owner: current.to_string(),
            });
        };

        let field = if ignore_case {
            entity.field_ignore_case(segment)
        } else {
            entity.field(segment)
        };
        let field = field.ok_or_else(|| CompileErrorKind::UnknownProperty {
            property: property_id.to_string(),
            owner: entity.name.clone(),
        })?;

        path.push(field.name.clone());
        current = &field.value_type;
    }

    Ok((PropertyAccess::new(path), current))
}
