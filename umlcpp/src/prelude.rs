//! Prelude module for convenient imports.
//!
//! ```
//! use umlcpp::prelude::*;
//! ```

// Model types
pub use umlcpp_model::{
    Association, AssociationEnd, Attribute, Classifier, Direction, Element, ElementId,
    ElementKind, Inheritance, Model, ModelError, Operation, Parameter, ParseError, Relationship,
    TemplateParameter, TypeRef, Visibility, parse_model, parse_model_file,
};

// Generation
pub use umlcpp_codegen::{
    CodegenError, FsSink, GenerationReport, Generator, GeneratorOptions, Indent, MemorySink,
    OutputSink, generate_from_file, generate_from_xml, generate_model,
};
