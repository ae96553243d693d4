//! Single-declaration formatters: member variables, methods, modifiers and
//! documentation blocks.

use super::CppContext;
use super::members::Member;
use super::types::{association_end_type, attribute_type, base_type};
use umlcpp_model::{AssociationEnd, Attribute, Operation};

/// Renders a documentation block, or nothing for blank text.
///
/// The result ends with a newline so it can prefix a declaration.
#[must_use]
pub fn documentation(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let mut docs = String::from("/**\n");
    for line in text.lines() {
        docs.push_str(" * ");
        docs.push_str(line);
        docs.push('\n');
    }
    docs.push_str(" */\n");
    docs
}

/// Field modifiers in fixed order: `static`, `const`, `virtual`.
#[must_use]
pub fn modifiers(is_static: bool, is_read_only: bool, is_abstract: bool) -> Vec<&'static str> {
    let mut out = Vec::new();
    if is_static {
        out.push("static");
    }
    if is_read_only {
        out.push("const");
    }
    if is_abstract {
        out.push("virtual");
    }
    out
}

/// Renders any member; `None` if it has no name.
#[must_use]
pub fn member(ctx: &CppContext<'_>, member: &Member<'_>) -> Option<String> {
    match member {
        Member::Attribute(a) => attribute_variable(ctx, a),
        Member::AssociationEnd(e) => association_variable(ctx, e),
        Member::Operation(o) => method(ctx, o),
    }
}

/// Renders `<doc><modifiers> <type> <name>[ = <default>];`.
#[must_use]
pub fn attribute_variable(ctx: &CppContext<'_>, attribute: &Attribute) -> Option<String> {
    if attribute.name.is_empty() {
        return None;
    }
    let mods = modifiers(
        attribute.is_static,
        attribute.is_read_only,
        attribute.is_abstract,
    );
    Some(variable(
        &attribute.documentation,
        &mods,
        &attribute_type(ctx, attribute),
        &attribute.name,
        &attribute.default_value,
    ))
}

/// Renders the member synthesized from a navigable association end.
#[must_use]
pub fn association_variable(ctx: &CppContext<'_>, end: &AssociationEnd) -> Option<String> {
    if end.name.is_empty() {
        return None;
    }
    let mods = modifiers(end.is_static, end.is_read_only, false);
    Some(variable(
        &end.documentation,
        &mods,
        &association_end_type(ctx, end),
        &end.name,
        "",
    ))
}

fn variable(doc: &str, mods: &[&str], ty: &str, name: &str, default_value: &str) -> String {
    let mut terms: Vec<&str> = Vec::with_capacity(mods.len() + 4);
    terms.extend_from_slice(mods);
    terms.push(ty);
    terms.push(name);
    if !default_value.is_empty() {
        terms.push("=");
        terms.push(default_value);
    }
    format!("{}{};", documentation(doc), terms.join(" "))
}

/// Renders a method declaration; `None` if the operation has no name.
///
/// `static` wins over `virtual` when both flags are set. `final` wins over
/// the pure-virtual `= 0` suffix.
#[must_use]
pub fn method(ctx: &CppContext<'_>, operation: &Operation) -> Option<String> {
    if operation.name.is_empty() {
        return None;
    }

    let leading = if operation.is_static {
        "static "
    } else if operation.is_abstract {
        "virtual "
    } else {
        ""
    };

    let return_type = operation
        .return_parameter()
        .map_or_else(|| "void".to_string(), |p| base_type(ctx.model, &p.type_ref));

    let params = operation
        .input_parameters()
        .map(|p| format!("{} {}", base_type(ctx.model, &p.type_ref), p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let trailing = if operation.is_leaf {
        " final"
    } else if operation.is_abstract {
        " = 0"
    } else {
        ""
    };

    Some(format!(
        "{}{}{} {}({}){};",
        documentation(&operation.documentation),
        leading,
        return_type,
        operation.name,
        params,
        trailing
    ))
}
