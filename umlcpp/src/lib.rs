//! # umlcpp
//!
//! Generate C++ headers from UML class-diagram models.
//!
//! Packages become directories and every class, interface and enumeration
//! becomes one `<Name>.h` header with an include guard, relative includes
//! for its bases and associated types, and members grouped by access
//! specifier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use umlcpp::prelude::*;
//!
//! # async fn run() -> Result<(), CodegenError> {
//! let mut model = Model::new("Model");
//! let shapes = model.add_package(model.root(), "Shapes")?;
//! let mut circle = Classifier::default();
//! circle.attributes.push(Attribute {
//!     visibility: Visibility::Public,
//!     ..Attribute::new("radius", "double")
//! });
//! model.add_class(shapes, "Circle", circle)?;
//!
//! let report = generate_model(&model, "include", &GeneratorOptions::default()).await?;
//! assert_eq!(report.headers_written, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Model graph, builder API and XML loader
//! - [`codegen`] - Header emission engine and output sinks

pub mod prelude;

/// Model graph and XML loader.
pub mod model {
    pub use umlcpp_model::*;
}

/// C++ header generation.
pub mod codegen {
    pub use umlcpp_codegen::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[tokio::test]
    async fn test_prelude_round_trip() {
        let mut model = Model::new("Model");
        let shapes = model.add_package(model.root(), "Shapes").unwrap();
        model
            .add_enumeration(
                shapes,
                "Color",
                Classifier {
                    literals: vec!["Red".into(), "Green".into(), "Blue".into()],
                    ..Classifier::default()
                },
            )
            .unwrap();

        let sink = MemorySink::new();
        let options = GeneratorOptions::default();
        let report = Generator::new(&model, &options, &sink)
            .generate(shapes, "out")
            .await
            .unwrap();

        assert_eq!(report.headers_written, 1);
        let text = sink.file("out/Shapes/Color.h").unwrap();
        assert!(text.contains("enum Color { Red, Green, Blue };"));
    }
}
