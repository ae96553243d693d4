//! Relative include path resolution.

use super::CppContext;
use super::classes::superclasses_of;
use umlcpp_model::{ElementId, Model};

/// Returns the package names enclosing `id`, outermost first, without the
/// root package.
fn package_path(model: &Model, id: ElementId) -> Vec<&str> {
    let mut names: Vec<&str> = model
        .ancestors(id)
        .filter(|&ancestor| model.parent(ancestor).is_some())
        .map(|ancestor| model.name_of(ancestor))
        .collect();
    names.reverse();
    names
}

/// Computes the path of the header for `to`, relative to the directory of
/// `from`'s header.
///
/// ```
/// use umlcpp_codegen::cpp::includes::relative_path;
/// use umlcpp_model::{Classifier, Model};
///
/// let mut model = Model::new("Model");
/// let a = model.add_package(model.root(), "A").unwrap();
/// let b = model.add_package(a, "B").unwrap();
/// let d = model.add_package(a, "D").unwrap();
/// let c = model.add_class(b, "C", Classifier::default()).unwrap();
/// let e = model.add_class(d, "E", Classifier::default()).unwrap();
/// assert_eq!(relative_path(&model, c, e), "../D/E.h");
/// ```
#[must_use]
pub fn relative_path(model: &Model, from: ElementId, to: ElementId) -> String {
    let source = package_path(model, from);
    let target = package_path(model, to);
    let common = source
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut path = "../".repeat(source.len() - common);
    for segment in &target[common..] {
        path.push_str(segment);
        path.push('/');
    }
    path.push_str(model.name_of(to));
    path.push_str(".h");
    path
}

/// Returns the include paths needed by `id`: inheritance targets first, then
/// association member types. Self references are skipped; duplicates are kept.
#[must_use]
pub fn include_paths(ctx: &CppContext<'_>, id: ElementId) -> Vec<String> {
    let model = ctx.model;
    let bases = superclasses_of(ctx, id)
        .into_iter()
        .map(|edge| edge.target)
        .filter(|&target| target != id);
    let associated = model
        .associations_of(id)
        .filter_map(|assoc| assoc.member_end_for(id))
        .map(|end| end.reference)
        .filter(|&target| target != id);
    bases
        .chain(associated)
        .map(|target| relative_path(model, id, target))
        .collect()
}

/// Renders one `#include "path"` line per include path.
#[must_use]
pub fn include_block(ctx: &CppContext<'_>, id: ElementId) -> Vec<String> {
    include_paths(ctx, id)
        .into_iter()
        .map(|path| format!("#include \"{path}\""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GeneratorOptions;
    use umlcpp_model::{AssociationEnd, Classifier, Visibility};

    struct Fixture {
        model: Model,
        c: ElementId,
        e: ElementId,
        f: ElementId,
        top: ElementId,
    }

    // Model/A/B/C, Model/A/D/E, Model/A/B/F, Model/Top
    fn fixture() -> Fixture {
        let mut model = Model::new("Model");
        let root = model.root();
        let a = model.add_package(root, "A").unwrap();
        let b = model.add_package(a, "B").unwrap();
        let d = model.add_package(a, "D").unwrap();
        let c = model.add_class(b, "C", Classifier::default()).unwrap();
        let e = model.add_class(d, "E", Classifier::default()).unwrap();
        let f = model.add_class(b, "F", Classifier::default()).unwrap();
        let top = model.add_class(root, "Top", Classifier::default()).unwrap();
        Fixture { model, c, e, f, top }
    }

    #[test]
    fn test_sibling_branch() {
        let fx = fixture();
        assert_eq!(relative_path(&fx.model, fx.c, fx.e), "../D/E.h");
    }

    #[test]
    fn test_same_package() {
        let fx = fixture();
        assert_eq!(relative_path(&fx.model, fx.c, fx.f), "F.h");
    }

    #[test]
    fn test_up_to_root_and_down() {
        let fx = fixture();
        assert_eq!(relative_path(&fx.model, fx.c, fx.top), "../../Top.h");
        assert_eq!(relative_path(&fx.model, fx.top, fx.e), "A/D/E.h");
    }

    #[test]
    fn test_include_order_and_duplicates() {
        let mut fx = fixture();
        let (c, e, f) = (fx.c, fx.e, fx.f);
        fx.model
            .add_association(AssociationEnd::new(c), AssociationEnd::navigable(e, "target"))
            .unwrap();
        fx.model
            .add_generalization(c, e, Visibility::Public)
            .unwrap();
        fx.model
            .add_realization(c, f, Visibility::Public)
            .unwrap();
        // Not navigable from C: no include.
        fx.model
            .add_association(AssociationEnd::new(c), AssociationEnd::new(f))
            .unwrap();
        // Self association.
        fx.model
            .add_association(AssociationEnd::new(c), AssociationEnd::navigable(c, "next"))
            .unwrap();

        let options = GeneratorOptions::default();
        let ctx = CppContext::new(&fx.model, &options);
        assert_eq!(
            include_block(&ctx, c),
            vec![
                "#include \"../D/E.h\"",
                "#include \"F.h\"",
                "#include \"../D/E.h\"",
            ]
        );
    }

    #[test]
    fn test_no_relationships_no_includes() {
        let fx = fixture();
        let options = GeneratorOptions::default();
        let ctx = CppContext::new(&fx.model, &options);
        assert!(include_block(&ctx, fx.top).is_empty());
    }
}
