//! Type and multiplicity resolution.

use super::CppContext;
use umlcpp_model::{AssociationEnd, Attribute, ElementId, Model, TypeRef};

/// Multiplicities rendered as a sequence container.
const SEQUENCE_MULTIPLICITIES: [&str; 3] = ["0..*", "1..*", "*"];

/// Resolves the C++ type of an attribute, multiplicity applied.
#[must_use]
pub fn attribute_type(ctx: &CppContext<'_>, attribute: &Attribute) -> String {
    // Ordered and unordered attributes share one wrapper.
    apply_multiplicity(
        base_type(ctx.model, &attribute.type_ref),
        &attribute.multiplicity,
        ctx.options.container_name(),
    )
}

/// Resolves the C++ type of a synthesized association member.
#[must_use]
pub fn association_end_type(ctx: &CppContext<'_>, end: &AssociationEnd) -> String {
    apply_multiplicity(
        element_name(ctx.model, end.reference),
        &end.multiplicity,
        ctx.options.container_name(),
    )
}

/// Resolves a declared type without multiplicity.
///
/// Model references resolve to the referenced name, raw strings are used
/// verbatim, and anything empty or unresolved becomes `void`.
#[must_use]
pub fn base_type(model: &Model, type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Element(id) => element_name(model, *id),
        TypeRef::Named(name) if !name.is_empty() => name.clone(),
        _ => "void".to_string(),
    }
}

fn element_name(model: &Model, id: ElementId) -> String {
    match model.name_of(id) {
        "" => "void".to_string(),
        name => name.to_string(),
    }
}

/// Wraps `base` according to a multiplicity string.
///
/// - `0..*`, `1..*`, `*` produce `Container<base>`
/// - a bare integer `N` produces `base[N]`
/// - anything else leaves `base` unchanged
#[must_use]
pub fn apply_multiplicity(base: String, multiplicity: &str, container: &str) -> String {
    let multiplicity = multiplicity.trim();
    if SEQUENCE_MULTIPLICITIES.contains(&multiplicity) {
        format!("{container}<{base}>")
    } else if !multiplicity.is_empty() && multiplicity.bytes().all(|b| b.is_ascii_digit()) {
        format!("{base}[{multiplicity}]")
    } else {
        base
    }
}
