//! Model graph definitions.
//!
//! This module contains the element arena and the data structures representing
//! class-diagram elements: packages, classes, interfaces, enumerations and
//! their members.

use crate::error::ModelError;
use crate::relations::{Association, AssociationEnd, Inheritance, Relationship};
use std::fmt;

/// Index of an element inside a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Complete class-diagram model.
///
/// Package containment is the only ownership relation. Every other link
/// (parents, type references, relationship endpoints) is an [`ElementId`].
#[derive(Debug, Clone)]
pub struct Model {
    elements: Vec<Element>,
    relationships: Vec<Relationship>,
}

impl Model {
    /// Creates a model containing only a root package.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            elements: vec![Element {
                name: root_name.into(),
                parent: None,
                kind: ElementKind::Package(Package::default()),
            }],
            relationships: Vec::new(),
        }
    }

    /// Returns the id of the root package.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Looks up an element by id, failing if it does not exist.
    ///
    /// # Errors
    /// Returns `ModelError::ElementNotFound` for ids outside the arena.
    pub fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.get(id).ok_or(ModelError::ElementNotFound { id })
    }

    /// Returns the number of elements, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the model holds nothing besides its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    /// Returns the name of an element, or an empty string for unknown ids.
    #[must_use]
    pub fn name_of(&self, id: ElementId) -> &str {
        self.get(id).map_or("", |e| e.name.as_str())
    }

    /// Returns the owning package of an element.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Iterates over the ancestors of an element, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Returns the owned elements of a package in declaration order.
    ///
    /// Non-package elements have no children.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.get(id).map(|e| &e.kind) {
            Some(ElementKind::Package(pkg)) => &pkg.owned,
            _ => &[],
        }
    }

    /// Returns every relationship in declaration order.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Iterates over every relationship touching `id`, in declaration order.
    pub fn relationships_of(&self, id: ElementId) -> impl Iterator<Item = &Relationship> + '_ {
        self.relationships.iter().filter(move |rel| rel.touches(id))
    }

    /// Iterates over the associations touching `id`.
    pub fn associations_of(&self, id: ElementId) -> impl Iterator<Item = &Association> + '_ {
        self.relationships_of(id).filter_map(Relationship::as_association)
    }

    /// Iterates over the generalizations and realizations touching `id`.
    pub fn inheritance_of(&self, id: ElementId) -> impl Iterator<Item = &Inheritance> + '_ {
        self.relationships_of(id).filter_map(Relationship::as_inheritance)
    }

    /// Adds a package under `parent`.
    ///
    /// # Errors
    /// Returns `ModelError` if `parent` is unknown or not a package.
    pub fn add_package(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
    ) -> Result<ElementId, ModelError> {
        self.add_element(parent, name.into(), ElementKind::Package(Package::default()))
    }

    /// Adds a class under `parent`.
    ///
    /// # Errors
    /// Returns `ModelError` if `parent` is unknown or not a package.
    pub fn add_class(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        classifier: Classifier,
    ) -> Result<ElementId, ModelError> {
        self.add_element(parent, name.into(), ElementKind::Class(classifier))
    }

    /// Adds an interface under `parent`.
    ///
    /// # Errors
    /// Returns `ModelError` if `parent` is unknown or not a package.
    pub fn add_interface(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        classifier: Classifier,
    ) -> Result<ElementId, ModelError> {
        self.add_element(parent, name.into(), ElementKind::Interface(classifier))
    }

    /// Adds an enumeration under `parent`.
    ///
    /// # Errors
    /// Returns `ModelError` if `parent` is unknown or not a package.
    pub fn add_enumeration(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        classifier: Classifier,
    ) -> Result<ElementId, ModelError> {
        self.add_element(parent, name.into(), ElementKind::Enumeration(classifier))
    }

    /// Adds an element of a kind the generator does not understand.
    ///
    /// # Errors
    /// Returns `ModelError` if `parent` is unknown or not a package.
    pub fn add_other(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<ElementId, ModelError> {
        self.add_element(parent, name.into(), ElementKind::Other(kind.into()))
    }

    /// Gives mutable access to a class, interface or enumeration body.
    ///
    /// Used while loading, when members reference types declared later.
    pub fn classifier_mut(&mut self, id: ElementId) -> Option<&mut Classifier> {
        self.elements.get_mut(id.0).and_then(|e| match &mut e.kind {
            ElementKind::Class(c) | ElementKind::Interface(c) | ElementKind::Enumeration(c) => {
                Some(c)
            }
            _ => None,
        })
    }

    /// Records a generalization from `source` to `target`.
    ///
    /// # Errors
    /// Returns `ModelError::ElementNotFound` if either end is unknown.
    pub fn add_generalization(
        &mut self,
        source: ElementId,
        target: ElementId,
        visibility: Visibility,
    ) -> Result<(), ModelError> {
        self.check_ids(&[source, target])?;
        self.relationships
            .push(Relationship::Generalization(Inheritance {
                source,
                target,
                visibility,
            }));
        Ok(())
    }

    /// Records an interface realization from `source` to `target`.
    ///
    /// # Errors
    /// Returns `ModelError::ElementNotFound` if either end is unknown.
    pub fn add_realization(
        &mut self,
        source: ElementId,
        target: ElementId,
        visibility: Visibility,
    ) -> Result<(), ModelError> {
        self.check_ids(&[source, target])?;
        self.relationships.push(Relationship::Realization(Inheritance {
            source,
            target,
            visibility,
        }));
        Ok(())
    }

    /// Records an association between two ends.
    ///
    /// # Errors
    /// Returns `ModelError::ElementNotFound` if either end references an unknown element.
    pub fn add_association(
        &mut self,
        end1: AssociationEnd,
        end2: AssociationEnd,
    ) -> Result<(), ModelError> {
        self.check_ids(&[end1.reference, end2.reference])?;
        self.relationships
            .push(Relationship::Association(Association { end1, end2 }));
        Ok(())
    }

    fn add_element(
        &mut self,
        parent: ElementId,
        name: String,
        kind: ElementKind,
    ) -> Result<ElementId, ModelError> {
        let id = ElementId(self.elements.len());
        match self.elements.get_mut(parent.0) {
            Some(Element {
                kind: ElementKind::Package(pkg),
                ..
            }) => pkg.owned.push(id),
            Some(other) => {
                return Err(ModelError::NotAPackage {
                    id: parent,
                    name: other.name.clone(),
                });
            }
            None => return Err(ModelError::ElementNotFound { id: parent }),
        }
        self.elements.push(Element {
            name,
            parent: Some(parent),
            kind,
        });
        Ok(id)
    }

    fn check_ids(&self, ids: &[ElementId]) -> Result<(), ModelError> {
        match ids.iter().find(|id| id.0 >= self.elements.len()) {
            Some(&id) => Err(ModelError::ElementNotFound { id }),
            None => Ok(()),
        }
    }
}

/// A node of the model graph.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Owning package; `None` only for the root.
    pub parent: Option<ElementId>,
    /// Kind-specific payload.
    pub kind: ElementKind,
}

impl Element {
    /// Returns the classifier body for classes, interfaces and enumerations.
    #[must_use]
    pub fn classifier(&self) -> Option<&Classifier> {
        match &self.kind {
            ElementKind::Class(c) | ElementKind::Interface(c) | ElementKind::Enumeration(c) => {
                Some(c)
            }
            _ => None,
        }
    }
}

/// Element kind variants.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Package (maps to a directory).
    Package(Package),
    /// Class.
    Class(Classifier),
    /// Interface.
    Interface(Classifier),
    /// Enumeration.
    Enumeration(Classifier),
    /// Anything else (notes, actors, ...), identified by its kind name.
    Other(String),
}

impl ElementKind {
    /// Returns a short label for the kind.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Package(_) => "package",
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Enumeration(_) => "enumeration",
            Self::Other(kind) => kind,
        }
    }
}

/// Package payload.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Owned elements in declaration order.
    pub owned: Vec<ElementId>,
}

/// Shared body of classes, interfaces and enumerations.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
    /// Template parameters.
    pub template_parameters: Vec<TemplateParameter>,
    /// Enumeration literals (enumerations only).
    pub literals: Vec<String>,
    /// Leaf flag.
    pub is_leaf: bool,
    /// Final specification flag.
    pub is_final_specification: bool,
    /// Abstract flag.
    pub is_abstract: bool,
    /// Documentation text.
    pub documentation: String,
}

impl Classifier {
    /// Returns true if the classifier may not be derived from.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.is_leaf || self.is_final_specification
    }
}

/// Member or edge visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Public.
    Public,
    /// Protected.
    Protected,
    /// Private.
    Private,
    /// Package (or unset).
    #[default]
    Package,
}

impl Visibility {
    /// Parses a visibility keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            "package" => Some(Self::Package),
            _ => None,
        }
    }

    /// Returns the keyword for this visibility.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }
}

/// Declared type of an attribute or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeRef {
    /// Reference to a model type.
    Element(ElementId),
    /// Raw type string.
    Named(String),
    /// No type given.
    #[default]
    None,
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::None
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl From<ElementId> for TypeRef {
    fn from(value: ElementId) -> Self {
        Self::Element(value)
    }
}

/// Attribute of a classifier.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Declared type.
    pub type_ref: TypeRef,
    /// Multiplicity string (`"1"`, `"0..*"`, ...).
    pub multiplicity: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Static flag.
    pub is_static: bool,
    /// Read-only flag.
    pub is_read_only: bool,
    /// Abstract flag.
    pub is_abstract: bool,
    /// Default value expression.
    pub default_value: String,
    /// Documentation text.
    pub documentation: String,
    /// Ordering flag for multi-valued attributes.
    pub is_ordered: bool,
}

impl Attribute {
    /// Creates a new attribute with package visibility.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            ..Self::default()
        }
    }
}

/// Operation of a classifier.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    /// Operation name.
    pub name: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Static flag.
    pub is_static: bool,
    /// Abstract flag.
    pub is_abstract: bool,
    /// Leaf flag.
    pub is_leaf: bool,
    /// Parameters in declaration order, return parameter included.
    pub parameters: Vec<Parameter>,
    /// Documentation text.
    pub documentation: String,
}

impl Operation {
    /// Creates a new operation with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the first parameter with `return` direction.
    #[must_use]
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == Direction::Return)
    }

    /// Iterates over the `in` parameters in declaration order.
    pub fn input_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction == Direction::In)
    }
}

/// Parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Input.
    #[default]
    In,
    /// Input and output.
    InOut,
    /// Output.
    Out,
    /// Return value.
    Return,
}

impl Direction {
    /// Parses a direction keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in" => Some(Self::In),
            "inout" => Some(Self::InOut),
            "out" => Some(Self::Out),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

/// Operation parameter.
#[derive(Debug, Clone, Default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub type_ref: TypeRef,
    /// Direction.
    pub direction: Direction,
    /// Default value expression (not rendered).
    pub default_value: String,
}

impl Parameter {
    /// Creates an input parameter.
    #[must_use]
    pub fn input(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            ..Self::default()
        }
    }

    /// Creates a return parameter.
    #[must_use]
    pub fn returning(type_ref: impl Into<TypeRef>) -> Self {
        Self {
            type_ref: type_ref.into(),
            direction: Direction::Return,
            ..Self::default()
        }
    }
}

/// Template parameter of a classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter kind or type (`typename`, `int`, ...).
    pub parameter_type: String,
    /// Default value.
    pub default_value: Option<String>,
}

impl TemplateParameter {
    /// Creates a template parameter without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
            default_value: None,
        }
    }
}
