//! Header file assembly.

use super::CppContext;
use super::includes::include_block;
use crate::writer::CodeWriter;
use umlcpp_model::{ElementId, TemplateParameter};

/// Returns the include guard symbol for a type name.
#[must_use]
pub fn guard_symbol(name: &str) -> String {
    format!("_{}_H", name.to_uppercase())
}

/// Renders `template<Type Name[ = Default], ...>`, or `None` without
/// parameters.
#[must_use]
pub fn template_preamble(parameters: &[TemplateParameter]) -> Option<String> {
    if parameters.is_empty() {
        return None;
    }
    let params: Vec<String> = parameters
        .iter()
        .map(|p| match &p.default_value {
            Some(default) => format!("{} {} = {}", p.parameter_type, p.name, default),
            None => format!("{} {}", p.parameter_type, p.name),
        })
        .collect();
    Some(format!("template<{}>", params.join(", ")))
}

/// Wraps the declaration written by `body` in a complete header.
///
/// Layout: notice, guard, includes, template preamble, body, guard trailer.
pub fn assemble_header<F>(ctx: &CppContext<'_>, id: ElementId, body: F) -> String
where
    F: FnOnce(&mut CodeWriter, &CppContext<'_>, ElementId),
{
    let model = ctx.model;
    let guard = guard_symbol(model.name_of(id));
    let mut writer = CodeWriter::new(ctx.options.indent_unit());

    writer.write_line(ctx.options.notice_text());
    writer.blank_line();
    writer.write_line(&format!("#ifndef {guard}"));
    writer.write_line(&format!("#define {guard}"));
    writer.blank_line();

    let includes = include_block(ctx, id);
    if !includes.is_empty() {
        for line in &includes {
            writer.write_line(line);
        }
        writer.blank_line();
    }

    let templates = model
        .get(id)
        .and_then(|e| e.classifier())
        .and_then(|c| template_preamble(&c.template_parameters));
    if let Some(preamble) = templates {
        writer.write_line(&preamble);
    }

    body(&mut writer, ctx, id);

    writer.blank_line();
    writer.write_line(&format!("#endif // {guard}"));
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GeneratorOptions;
    use umlcpp_model::{Classifier, Model, Visibility};

    #[test]
    fn test_guard_symbol() {
        assert_eq!(guard_symbol("Circle"), "_CIRCLE_H");
        assert_eq!(guard_symbol("httpClient"), "_HTTPCLIENT_H");
    }

    #[test]
    fn test_template_preamble() {
        assert_eq!(template_preamble(&[]), None);
        let params = vec![
            TemplateParameter::new("T", "typename"),
            TemplateParameter {
                default_value: Some("16".into()),
                ..TemplateParameter::new("N", "int")
            },
        ];
        assert_eq!(
            template_preamble(&params).as_deref(),
            Some("template<typename T, int N = 16>")
        );
    }

    #[test]
    fn test_layout() {
        let mut model = Model::new("Model");
        let body = Classifier {
            template_parameters: vec![TemplateParameter::new("T", "class")],
            ..Classifier::default()
        };
        let id = model.add_class(model.root(), "Box", body).unwrap();
        let options = GeneratorOptions::new().notice("// MIT");
        let ctx = CppContext::new(&model, &options);

        let text = assemble_header(&ctx, id, |writer, ctx, id| {
            writer.write_line(&format!("class {} {{", ctx.model.name_of(id)));
            writer.write_line("};");
        });
        assert_eq!(
            text,
            "// MIT\n\n#ifndef _BOX_H\n#define _BOX_H\n\n\
             template<class T>\nclass Box {\n};\n\n#endif // _BOX_H\n"
        );
    }

    #[test]
    fn test_include_block_placement() {
        let mut model = Model::new("Model");
        let root = model.root();
        let base = model.add_class(root, "Base", Classifier::default()).unwrap();
        let id = model.add_class(root, "Derived", Classifier::default()).unwrap();
        model.add_generalization(id, base, Visibility::Public).unwrap();
        let options = GeneratorOptions::new().notice("// N");
        let ctx = CppContext::new(&model, &options);

        let text = assemble_header(&ctx, id, |writer, _, _| writer.write_line("X"));
        assert_eq!(
            text,
            "// N\n\n#ifndef _DERIVED_H\n#define _DERIVED_H\n\n\
             #include \"Base.h\"\n\nX\n\n#endif // _DERIVED_H\n"
        );
    }
}
