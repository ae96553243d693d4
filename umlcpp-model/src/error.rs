//! Error types for model construction and loading.

use crate::model::ElementId;
use thiserror::Error;

/// Error type for model loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Relationship endpoint naming an id that is not declared.
    #[error("unknown element id '{id}' referenced by {context}")]
    UnknownReference {
        /// Referenced id.
        id: String,
        /// Referencing context.
        context: String,
    },

    /// Two elements declared with the same id.
    #[error("duplicate element id '{id}'")]
    DuplicateId {
        /// The duplicated id.
        id: String,
    },

    /// Invalid document structure.
    #[error("invalid model structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// Model construction error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown reference error.
    pub fn unknown_ref(id: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownReference {
            id: id.into(),
            context: context.into(),
        }
    }
}

/// Error type for model graph operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Element id outside the arena.
    #[error("element {id} not found")]
    ElementNotFound {
        /// Missing id.
        id: ElementId,
    },

    /// Element is expected to be a package but is not.
    #[error("element '{name}' ({id}) is not a package")]
    NotAPackage {
        /// Element id.
        id: ElementId,
        /// Element name.
        name: String,
    },
}
