//! Enumeration generation.

use super::CppContext;
use super::declarations::{documentation, modifiers};
use crate::writer::CodeWriter;
use umlcpp_model::{Classifier, ElementId};

/// Generator for `enum` declarations.
pub struct EnumGenerator<'a> {
    ctx: CppContext<'a>,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(ctx: CppContext<'a>) -> Self {
        Self { ctx }
    }

    /// Writes the enumeration `id` as a single declaration line.
    pub fn write_enumeration(&self, writer: &mut CodeWriter, id: ElementId, body: &Classifier) {
        let docs = documentation(&body.documentation);
        if !docs.is_empty() {
            writer.write_line(docs.trim_end_matches('\n'));
        }
        writer.write_line(&enum_declaration(self.ctx.model.name_of(id), body));
    }
}

/// Renders `[<modifiers> ]enum Name { A, B, C };`.
#[must_use]
pub fn enum_declaration(name: &str, body: &Classifier) -> String {
    let mut line = modifiers(false, false, body.is_abstract).join(" ");
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str("enum ");
    line.push_str(name);
    if body.literals.is_empty() {
        line.push_str(" {};");
    } else {
        line.push_str(&format!(" {{ {} }};", body.literals.join(", ")));
    }
    line
}
