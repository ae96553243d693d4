//! Member collection and visibility classification.

use umlcpp_model::{AssociationEnd, Attribute, Classifier, ElementId, Model, Operation, Visibility};

/// One declaration inside a class body.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    /// Attribute owned by the classifier.
    Attribute(&'a Attribute),
    /// Navigable association end synthesized as a member variable.
    AssociationEnd(&'a AssociationEnd),
    /// Operation owned by the classifier.
    Operation(&'a Operation),
}

impl Member<'_> {
    /// Returns the declared visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Attribute(a) => a.visibility,
            Self::AssociationEnd(e) => e.visibility,
            Self::Operation(o) => o.visibility,
        }
    }

    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Attribute(a) => &a.name,
            Self::AssociationEnd(e) => &e.name,
            Self::Operation(o) => &o.name,
        }
    }
}

/// Members of one classifier split by access specifier.
#[derive(Debug, Default)]
pub struct VisibilityGroups<'a> {
    /// `public:` members.
    pub public: Vec<Member<'a>>,
    /// `protected:` members, including package and unset visibility.
    pub protected: Vec<Member<'a>>,
    /// `private:` members.
    pub private: Vec<Member<'a>>,
}

impl<'a> VisibilityGroups<'a> {
    /// Returns the non-empty groups with their labels, in output order.
    #[must_use]
    pub fn sections(&self) -> Vec<(&'static str, &[Member<'a>])> {
        [
            ("public", self.public.as_slice()),
            ("protected", self.protected.as_slice()),
            ("private", self.private.as_slice()),
        ]
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .collect()
    }
}

/// Collects the members of `id`: attributes, then navigable association ends,
/// then operations.
#[must_use]
pub fn members_of<'a>(model: &'a Model, id: ElementId, body: &'a Classifier) -> Vec<Member<'a>> {
    let attributes = body.attributes.iter().map(Member::Attribute);
    let ends = model
        .associations_of(id)
        .filter_map(move |assoc| assoc.member_end_for(id))
        .map(Member::AssociationEnd);
    let operations = body.operations.iter().map(Member::Operation);
    attributes.chain(ends).chain(operations).collect()
}

/// Partitions members by visibility, preserving their relative order.
///
/// Anything not explicitly public or private is protected.
#[must_use]
pub fn classify<'a>(members: impl IntoIterator<Item = Member<'a>>) -> VisibilityGroups<'a> {
    let mut groups = VisibilityGroups::default();
    for member in members {
        match member.visibility() {
            Visibility::Public => groups.public.push(member),
            Visibility::Private => groups.private.push(member),
            Visibility::Protected | Visibility::Package => groups.protected.push(member),
        }
    }
    groups
}
