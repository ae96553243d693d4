//! # umlcpp Model
//!
//! Read-only class-diagram model graph.
//!
//! This crate provides:
//! - An element arena of packages, classes, interfaces and enumerations
//! - Associations, generalizations and interface realizations
//! - Relationship queries by touching element
//! - An XML interchange loader

pub mod error;
pub mod model;
pub mod parser;
pub mod relations;

pub use error::{ModelError, ParseError};
pub use model::{
    Attribute, Classifier, Direction, Element, ElementId, ElementKind, Model, Operation, Package,
    Parameter, TemplateParameter, TypeRef, Visibility,
};
pub use parser::{parse_model, parse_model_file};
pub use relations::{Association, AssociationEnd, Inheritance, Relationship};
