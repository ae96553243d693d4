//! Relationship definitions.
//!
//! Relationships are stored in declaration order on the [`Model`](crate::Model)
//! and are never owned by the elements they connect.

use crate::model::{ElementId, Visibility};

/// Relationship variants.
#[derive(Debug, Clone)]
pub enum Relationship {
    /// Undirected association with per-end navigability.
    Association(Association),
    /// Generalization (class inheritance).
    Generalization(Inheritance),
    /// Interface realization.
    Realization(Inheritance),
}

impl Relationship {
    /// Returns true if either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: ElementId) -> bool {
        match self {
            Self::Association(a) => a.end1.reference == id || a.end2.reference == id,
            Self::Generalization(i) | Self::Realization(i) => i.source == id || i.target == id,
        }
    }

    /// Returns the association payload, if any.
    #[must_use]
    pub fn as_association(&self) -> Option<&Association> {
        match self {
            Self::Association(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the inheritance payload for generalizations and realizations.
    #[must_use]
    pub fn as_inheritance(&self) -> Option<&Inheritance> {
        match self {
            Self::Generalization(i) | Self::Realization(i) => Some(i),
            Self::Association(_) => None,
        }
    }
}

/// Directed inheritance edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inheritance {
    /// Deriving element.
    pub source: ElementId,
    /// Base element.
    pub target: ElementId,
    /// Access specifier used for the base clause.
    pub visibility: Visibility,
}

/// Association between two ends.
#[derive(Debug, Clone)]
pub struct Association {
    /// First end.
    pub end1: AssociationEnd,
    /// Second end.
    pub end2: AssociationEnd,
}

impl Association {
    /// Returns the end that becomes a member of `owner`.
    ///
    /// That is the opposite end, when it is navigable and named. When both
    /// ends reference `owner` the second end is checked first.
    #[must_use]
    pub fn member_end_for(&self, owner: ElementId) -> Option<&AssociationEnd> {
        if self.end1.reference == owner && self.end2.is_member() {
            Some(&self.end2)
        } else if self.end2.reference == owner && self.end1.is_member() {
            Some(&self.end1)
        } else {
            None
        }
    }
}

/// One endpoint of an association.
#[derive(Debug, Clone, Default)]
pub struct AssociationEnd {
    /// Type at this end.
    pub reference: ElementId,
    /// Role name.
    pub name: String,
    /// Whether the end is reachable from the opposite end's owner.
    pub navigable: bool,
    /// Multiplicity string.
    pub multiplicity: String,
    /// Visibility of the synthesized member.
    pub visibility: Visibility,
    /// Static flag.
    pub is_static: bool,
    /// Read-only flag.
    pub is_read_only: bool,
    /// Documentation text.
    pub documentation: String,
}

impl AssociationEnd {
    /// Creates an unnamed, non-navigable end.
    #[must_use]
    pub fn new(reference: ElementId) -> Self {
        Self {
            reference,
            ..Self::default()
        }
    }

    /// Creates a named, navigable end.
    #[must_use]
    pub fn navigable(reference: ElementId, name: impl Into<String>) -> Self {
        Self {
            reference,
            name: name.into(),
            navigable: true,
            ..Self::default()
        }
    }

    /// Returns true if this end synthesizes a member on the opposite owner.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.navigable && !self.name.is_empty()
    }
}
