//! Generator configuration.

/// Notice written at the top of every header unless overridden.
pub const DEFAULT_NOTICE: &str = "/*\n * Generated by umlcpp. Do not edit by hand.\n */";

/// Sequence wrapper used for multi-valued members unless overridden.
pub const DEFAULT_CONTAINER: &str = "Vector";

/// Indentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// One tab per level.
    Tab,
    /// The given number of spaces per level.
    Spaces(usize),
}

impl Indent {
    /// Returns the text of one indentation level.
    #[must_use]
    pub fn unit(&self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(*n),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

/// Options consumed by the header assembler and formatters.
///
/// ```
/// use umlcpp_codegen::{GeneratorOptions, Indent};
///
/// let options = GeneratorOptions::new()
///     .indent(Indent::Tab)
///     .container("std::vector");
/// assert_eq!(options.indent_unit(), "\t");
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    indent: Indent,
    notice: String,
    container: String,
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent: Indent::default(),
            notice: DEFAULT_NOTICE.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
        }
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the notice (license header) text.
    #[must_use]
    pub fn notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = notice.into();
        self
    }

    /// Sets the sequence container template name.
    #[must_use]
    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    /// Returns the text of one indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        self.indent.unit()
    }

    /// Returns the notice text.
    #[must_use]
    pub fn notice_text(&self) -> &str {
        &self.notice
    }

    /// Returns the container template name.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}
