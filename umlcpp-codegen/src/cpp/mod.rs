//! C++ header generation modules.

pub mod classes;
pub mod declarations;
pub mod enums;
pub mod header;
pub mod includes;
pub mod members;
pub mod types;

pub use classes::ClassGenerator;
pub use enums::EnumGenerator;
pub use header::assemble_header;
pub use members::{Member, VisibilityGroups, classify, members_of};

use crate::options::GeneratorOptions;
use umlcpp_model::Model;

/// Read-only state shared by every formatter during one generation run.
#[derive(Debug, Clone, Copy)]
pub struct CppContext<'a> {
    /// Model being rendered.
    pub model: &'a Model,
    /// Rendering options.
    pub options: &'a GeneratorOptions,
}

impl<'a> CppContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(model: &'a Model, options: &'a GeneratorOptions) -> Self {
        Self { model, options }
    }
}
