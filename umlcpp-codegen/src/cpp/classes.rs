//! Class and interface body generation.

use super::CppContext;
use super::declarations::{documentation, member};
use super::members::{classify, members_of};
use crate::writer::CodeWriter;
use umlcpp_model::{Classifier, ElementId, Inheritance, Operation, Visibility};

/// Generator for `class` declarations.
///
/// Interfaces go through the same path with every operation forced abstract.
pub struct ClassGenerator<'a> {
    ctx: CppContext<'a>,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(ctx: CppContext<'a>) -> Self {
        Self { ctx }
    }

    /// Writes the declaration of `id` into `writer`.
    pub fn write_class(&self, writer: &mut CodeWriter, id: ElementId, body: &Classifier) {
        self.write_body(writer, id, body);
    }

    /// Writes an interface as a class of pure-virtual operations.
    pub fn write_interface(&self, writer: &mut CodeWriter, id: ElementId, body: &Classifier) {
        let abstract_body = Classifier {
            operations: body
                .operations
                .iter()
                .map(|op| Operation {
                    is_abstract: true,
                    ..op.clone()
                })
                .collect(),
            ..body.clone()
        };
        self.write_body(writer, id, &abstract_body);
    }

    fn write_body(&self, writer: &mut CodeWriter, id: ElementId, body: &Classifier) {
        let model = self.ctx.model;
        let docs = documentation(&body.documentation);
        if !docs.is_empty() {
            writer.write_line(docs.trim_end_matches('\n'));
        }

        let mut line = format!("class {}", model.name_of(id));
        if body.is_final() {
            line.push_str(" final");
        }
        line.push_str(&inheritance_clause(&self.ctx, id));
        line.push_str(" {");
        writer.write_line(&line);

        let members = members_of(model, id, body);
        let groups = classify(members);
        for (label, section) in groups.sections() {
            let rendered: Vec<String> = section
                .iter()
                .filter_map(|m| member(&self.ctx, m))
                .collect();
            if rendered.is_empty() {
                continue;
            }
            writer.write_line(&format!("{label}:"));
            writer.indent();
            for text in rendered {
                writer.write_line(&text);
            }
            writer.outdent();
        }

        writer.write_line("};");
    }
}

/// Returns the generalization and realization edges leaving `id`, in
/// declaration order.
#[must_use]
pub fn superclasses_of<'a>(ctx: &CppContext<'a>, id: ElementId) -> Vec<&'a Inheritance> {
    ctx.model
        .inheritance_of(id)
        .filter(|edge| edge.source == id)
        .collect()
}

/// Renders ` : public Base, protected Other`, or nothing without bases.
#[must_use]
pub fn inheritance_clause(ctx: &CppContext<'_>, id: ElementId) -> String {
    let bases: Vec<String> = superclasses_of(ctx, id)
        .into_iter()
        .map(|edge| {
            format!(
                "{} {}",
                access_specifier(edge.visibility),
                ctx.model.name_of(edge.target)
            )
        })
        .collect();
    if bases.is_empty() {
        String::new()
    } else {
        format!(" : {}", bases.join(", "))
    }
}

fn access_specifier(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
        Visibility::Protected | Visibility::Package => "protected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{GeneratorOptions, Indent};
    use umlcpp_model::{Attribute, Model, Parameter};

    fn render(model: &Model, id: ElementId, options: &GeneratorOptions) -> String {
        let ctx = CppContext::new(model, options);
        let element = model.get(id).unwrap();
        let body = element.classifier().unwrap();
        let mut writer = CodeWriter::new(options.indent_unit());
        let generator = ClassGenerator::new(ctx);
        match element.kind {
            umlcpp_model::ElementKind::Interface(_) => {
                generator.write_interface(&mut writer, id, body)
            }
            _ => generator.write_class(&mut writer, id, body),
        }
        writer.into_string()
    }

    #[test]
    fn test_class_without_bases_has_no_colon() {
        let mut model = Model::new("Model");
        let id = model
            .add_class(model.root(), "Plain", Classifier::default())
            .unwrap();
        let text = render(&model, id, &GeneratorOptions::default());
        assert_eq!(text, "class Plain {\n};\n");
        assert!(!text.contains(':'));
    }

    #[test]
    fn test_sections_and_members() {
        let mut model = Model::new("Model");
        let body = Classifier {
            attributes: vec![
                Attribute {
                    visibility: Visibility::Public,
                    ..Attribute::new("radius", "double")
                },
                Attribute::new("cache", "int"),
                Attribute {
                    visibility: Visibility::Private,
                    ..Attribute::new("id", "long")
                },
            ],
            operations: vec![Operation {
                visibility: Visibility::Public,
                parameters: vec![Parameter::returning("double")],
                ..Operation::new("area")
            }],
            ..Classifier::default()
        };
        let id = model.add_class(model.root(), "Circle", body).unwrap();
        let options = GeneratorOptions::new().indent(Indent::Spaces(2));
        assert_eq!(
            render(&model, id, &options),
            "class Circle {\n\
             public:\n  double radius;\n  double area();\n\
             protected:\n  int cache;\n\
             private:\n  long id;\n\
             };\n"
        );
    }

    #[test]
    fn test_unnamed_members_leave_no_empty_section() {
        let mut model = Model::new("Model");
        let body = Classifier {
            attributes: vec![Attribute {
                visibility: Visibility::Public,
                ..Attribute::new("", "int")
            }],
            ..Classifier::default()
        };
        let id = model.add_class(model.root(), "Ghost", body).unwrap();
        let text = render(&model, id, &GeneratorOptions::default());
        assert!(!text.contains("public:"));
    }

    #[test]
    fn test_inheritance_clause_order_and_specifiers() {
        let mut model = Model::new("Model");
        let root = model.root();
        let shape = model.add_class(root, "Shape", Classifier::default()).unwrap();
        let drawable = model
            .add_interface(root, "Drawable", Classifier::default())
            .unwrap();
        let node = model.add_class(root, "Node", Classifier::default()).unwrap();
        let square = model.add_class(root, "Square", Classifier::default()).unwrap();
        model
            .add_generalization(square, shape, Visibility::Public)
            .unwrap();
        model
            .add_realization(square, drawable, Visibility::Package)
            .unwrap();
        model
            .add_generalization(square, node, Visibility::Private)
            .unwrap();
        // Incoming edges are not bases of Square.
        model
            .add_generalization(node, square, Visibility::Public)
            .unwrap();

        let options = GeneratorOptions::default();
        let ctx = CppContext::new(&model, &options);
        assert_eq!(
            inheritance_clause(&ctx, square),
            " : public Shape, protected Drawable, private Node"
        );
        assert_eq!(inheritance_clause(&ctx, shape), "");
    }

    #[test]
    fn test_final_class_with_documentation() {
        let mut model = Model::new("Model");
        let root = model.root();
        let base = model.add_class(root, "Base", Classifier::default()).unwrap();
        let body = Classifier {
            is_final_specification: true,
            documentation: "Leaf type.".to_string(),
            ..Classifier::default()
        };
        let id = model.add_class(root, "Sealed", body).unwrap();
        model.add_generalization(id, base, Visibility::Public).unwrap();
        let text = render(&model, id, &GeneratorOptions::default());
        assert_eq!(
            text,
            "/**\n * Leaf type.\n */\nclass Sealed final : public Base {\n};\n"
        );
    }

    #[test]
    fn test_interface_operations_are_pure_virtual() {
        let mut model = Model::new("Model");
        let body = Classifier {
            operations: vec![
                Operation {
                    visibility: Visibility::Public,
                    ..Operation::new("draw")
                },
                Operation {
                    visibility: Visibility::Public,
                    is_leaf: true,
                    ..Operation::new("id")
                },
            ],
            ..Classifier::default()
        };
        let id = model.add_interface(model.root(), "Drawable", body).unwrap();
        let text = render(&model, id, &GeneratorOptions::new().indent(Indent::Tab));
        assert_eq!(
            text,
            "class Drawable {\npublic:\n\tvirtual void draw() = 0;\n\t\
             virtual void id() final;\n};\n"
        );
    }
}
