//! XML model loader.
//!
//! Reads a small interchange dialect into a [`Model`]:
//!
//! ```xml
//! <model name="Project">
//!   <package name="Shapes">
//!     <class id="circle" name="Circle">
//!       <attribute name="radius" type="double" visibility="public"/>
//!       <operation name="area" visibility="public">
//!         <parameter type="double" direction="return"/>
//!       </operation>
//!     </class>
//!   </package>
//!   <generalization source="circle" target="shape" visibility="public"/>
//! </model>
//! ```
//!
//! Element ids are resolved once the whole document has been read, so
//! references may point forward.

use crate::error::ParseError;
use crate::model::{
    Attribute, Classifier, Direction, ElementId, Model, Operation, Parameter, TemplateParameter,
    TypeRef, Visibility,
};
use crate::relations::AssociationEnd;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

/// Parses a model from an XML string.
///
/// # Arguments
/// * `xml` - XML model content
///
/// # Returns
/// Parsed model or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, an attribute value is invalid,
/// or a relationship references an undeclared id.
pub fn parse_model(xml: &str) -> Result<Model, ParseError> {
    let document = read_document(xml)?;
    if document.name != "model" {
        return Err(ParseError::InvalidStructure {
            message: format!("expected <model> root element, found <{}>", document.name),
        });
    }

    let mut loader = Loader::new(document.attr("name").unwrap_or("Model"));
    let root = loader.model.root();
    if let Some(id) = document.attr("id") {
        loader.register(id, root)?;
    }
    loader.load_package_body(&document, root)?;
    loader.finish()
}

/// Parses a model from an XML file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_model_file(path: &Path) -> Result<Model, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_model(&xml)
}

/// Minimal owned XML tree.
#[derive(Debug, Default)]
struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let mut attrs = Vec::new();
        for attr in e.attributes().flatten() {
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?;
            attrs.push((key.to_string(), value.into_owned()));
        }
        Ok(Self {
            name,
            attrs,
            ..Self::default()
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required(&self, key: &str) -> Result<&str, ParseError> {
        self.attr(key)
            .ok_or_else(|| ParseError::missing_attr(&self.name, key))
    }

    fn string(&self, key: &str) -> String {
        self.attr(key).unwrap_or_default().to_string()
    }

    fn flag(&self, key: &str) -> Result<bool, ParseError> {
        match self.attr(key) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(ParseError::invalid_attr(&self.name, key, other)),
        }
    }

    fn visibility(&self, default: Visibility) -> Result<Visibility, ParseError> {
        match self.attr("visibility") {
            None => Ok(default),
            Some(value) => Visibility::parse(value)
                .ok_or_else(|| ParseError::invalid_attr(&self.name, "visibility", value)),
        }
    }

    /// Returns the text of the `<documentation>` child, if any.
    fn documentation(&self) -> String {
        self.children
            .iter()
            .find(|c| c.name == "documentation")
            .map(|c| c.text.trim().to_string())
            .unwrap_or_default()
    }
}

/// Reads the whole document into an [`XmlNode`] tree.
fn read_document(xml: &str) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(XmlNode::from_start(e)?),
            Ok(Event::Empty(ref e)) => {
                let node = XmlNode::from_start(e)?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(std::str::from_utf8(t)?);
                }
            }
            Ok(Event::CData(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(std::str::from_utf8(t)?);
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(top) = stack.last_mut() {
                    resolve_reference(r, &mut top.text)?;
                }
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::InvalidStructure {
            message: format!("unclosed element <{}>", stack[stack.len() - 1].name),
        });
    }

    root.ok_or_else(|| ParseError::InvalidStructure {
        message: "No model element found".to_string(),
    })
}

/// Appends the character or predefined entity named by `r` to `text`.
fn resolve_reference(r: &BytesRef<'_>, text: &mut String) -> Result<(), ParseError> {
    if let Some(ch) = r.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = r.decode().map_err(quick_xml::Error::from)?;
    match resolve_predefined_entity(&name) {
        Some(value) => {
            text.push_str(value);
            Ok(())
        }
        None => Err(ParseError::InvalidStructure {
            message: format!("unknown entity reference &{name};"),
        }),
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {}
    }
}

/// Slot holding a type reference that is resolved after loading.
#[derive(Debug)]
enum RefSlot {
    Attribute(usize),
    Parameter { operation: usize, parameter: usize },
}

#[derive(Debug)]
struct PendingRef {
    owner: ElementId,
    slot: RefSlot,
    id: String,
}

struct Loader<'a> {
    model: Model,
    ids: HashMap<String, ElementId>,
    pending: Vec<PendingRef>,
    relationships: Vec<&'a XmlNode>,
}

impl<'a> Loader<'a> {
    fn new(root_name: &str) -> Self {
        Self {
            model: Model::new(root_name),
            ids: HashMap::new(),
            pending: Vec::new(),
            relationships: Vec::new(),
        }
    }

    fn register(&mut self, id: &str, element: ElementId) -> Result<(), ParseError> {
        if self.ids.insert(id.to_string(), element).is_some() {
            return Err(ParseError::DuplicateId { id: id.to_string() });
        }
        Ok(())
    }

    fn load_package_body(
        &mut self,
        node: &'a XmlNode,
        package: ElementId,
    ) -> Result<(), ParseError> {
        for child in &node.children {
            let created = match child.name.as_str() {
                "package" => {
                    let id = self.model.add_package(package, child.string("name"))?;
                    self.load_package_body(child, id)?;
                    Some(id)
                }
                "class" => {
                    let body = parse_classifier(child)?;
                    let id = self.model.add_class(package, child.string("name"), body)?;
                    self.queue_refs(child, id);
                    Some(id)
                }
                "interface" => {
                    let body = parse_classifier(child)?;
                    let id = self
                        .model
                        .add_interface(package, child.string("name"), body)?;
                    self.queue_refs(child, id);
                    Some(id)
                }
                "enumeration" => {
                    let body = parse_classifier(child)?;
                    let id = self
                        .model
                        .add_enumeration(package, child.string("name"), body)?;
                    self.queue_refs(child, id);
                    Some(id)
                }
                "generalization" | "realization" | "association" => {
                    self.relationships.push(child);
                    None
                }
                "documentation" => None,
                other => Some(
                    self.model
                        .add_other(package, child.string("name"), other)?,
                ),
            };
            if let (Some(element), Some(id)) = (created, child.attr("id")) {
                self.register(id, element)?;
            }
        }
        Ok(())
    }

    /// Records `typeRef` attributes of members for resolution in [`Self::finish`].
    fn queue_refs(&mut self, node: &XmlNode, owner: ElementId) {
        let attributes = node.children.iter().filter(|c| c.name == "attribute");
        for (index, attr) in attributes.enumerate() {
            if let Some(id) = attr.attr("typeRef") {
                self.pending.push(PendingRef {
                    owner,
                    slot: RefSlot::Attribute(index),
                    id: id.to_string(),
                });
            }
        }

        let operations = node.children.iter().filter(|c| c.name == "operation");
        for (operation, op) in operations.enumerate() {
            let parameters = op.children.iter().filter(|c| c.name == "parameter");
            for (parameter, param) in parameters.enumerate() {
                if let Some(id) = param.attr("typeRef") {
                    self.pending.push(PendingRef {
                        owner,
                        slot: RefSlot::Parameter {
                            operation,
                            parameter,
                        },
                        id: id.to_string(),
                    });
                }
            }
        }
    }

    fn finish(mut self) -> Result<Model, ParseError> {
        for pending in std::mem::take(&mut self.pending) {
            let resolved = match self.ids.get(&pending.id) {
                Some(&id) => TypeRef::Element(id),
                None => {
                    tracing::warn!(
                        "Unresolved type reference '{}' on {}",
                        pending.id,
                        self.model.name_of(pending.owner)
                    );
                    TypeRef::None
                }
            };
            let Some(body) = self.model.classifier_mut(pending.owner) else {
                continue;
            };
            let slot = match pending.slot {
                RefSlot::Attribute(index) => {
                    body.attributes.get_mut(index).map(|a| &mut a.type_ref)
                }
                RefSlot::Parameter {
                    operation,
                    parameter,
                } => body
                    .operations
                    .get_mut(operation)
                    .and_then(|op| op.parameters.get_mut(parameter))
                    .map(|p| &mut p.type_ref),
            };
            if let Some(slot) = slot {
                *slot = resolved;
            }
        }

        for node in std::mem::take(&mut self.relationships) {
            match node.name.as_str() {
                "generalization" => {
                    let (source, target) = self.endpoints(node)?;
                    let visibility = node.visibility(Visibility::Public)?;
                    self.model.add_generalization(source, target, visibility)?;
                }
                "realization" => {
                    let (source, target) = self.endpoints(node)?;
                    let visibility = node.visibility(Visibility::Public)?;
                    self.model.add_realization(source, target, visibility)?;
                }
                _ => {
                    let ends: Vec<&XmlNode> =
                        node.children.iter().filter(|c| c.name == "end").collect();
                    let [end1, end2] = ends.as_slice() else {
                        return Err(ParseError::InvalidStructure {
                            message: format!(
                                "association must have exactly two ends, found {}",
                                ends.len()
                            ),
                        });
                    };
                    let end1 = self.association_end(end1)?;
                    let end2 = self.association_end(end2)?;
                    self.model.add_association(end1, end2)?;
                }
            }
        }

        Ok(self.model)
    }

    fn lookup(&self, node: &XmlNode, key: &str) -> Result<ElementId, ParseError> {
        let id = node.required(key)?;
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| ParseError::unknown_ref(id, format!("{}.{}", node.name, key)))
    }

    fn endpoints(&self, node: &XmlNode) -> Result<(ElementId, ElementId), ParseError> {
        Ok((self.lookup(node, "source")?, self.lookup(node, "target")?))
    }

    fn association_end(&self, node: &XmlNode) -> Result<AssociationEnd, ParseError> {
        Ok(AssociationEnd {
            reference: self.lookup(node, "reference")?,
            name: node.string("name"),
            navigable: node.flag("navigable")?,
            multiplicity: node.string("multiplicity"),
            visibility: node.visibility(Visibility::Package)?,
            is_static: node.flag("static")?,
            is_read_only: node.flag("readOnly")?,
            documentation: node.documentation(),
        })
    }
}

/// Parses the body shared by classes, interfaces and enumerations.
fn parse_classifier(node: &XmlNode) -> Result<Classifier, ParseError> {
    let mut body = Classifier {
        is_leaf: node.flag("leaf")?,
        is_final_specification: node.flag("finalSpecification")?,
        is_abstract: node.flag("abstract")?,
        documentation: node.documentation(),
        ..Classifier::default()
    };

    for child in &node.children {
        match child.name.as_str() {
            "attribute" => body.attributes.push(parse_attribute(child)?),
            "operation" => body.operations.push(parse_operation(child)?),
            "template" => body.template_parameters.push(TemplateParameter {
                name: child.required("name")?.to_string(),
                parameter_type: child.string("type"),
                default_value: child
                    .attr("default")
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
            }),
            "literal" => body.literals.push(child.required("name")?.to_string()),
            _ => {}
        }
    }

    Ok(body)
}

/// Parses an attribute element. `typeRef` is resolved later.
fn parse_attribute(node: &XmlNode) -> Result<Attribute, ParseError> {
    Ok(Attribute {
        name: node.string("name"),
        type_ref: TypeRef::from(node.attr("type").unwrap_or_default()),
        multiplicity: node.string("multiplicity"),
        visibility: node.visibility(Visibility::Package)?,
        is_static: node.flag("static")?,
        is_read_only: node.flag("readOnly")?,
        is_abstract: node.flag("abstract")?,
        default_value: node.string("default"),
        documentation: node.documentation(),
        is_ordered: node.flag("ordered")?,
    })
}

/// Parses an operation element with its parameters.
fn parse_operation(node: &XmlNode) -> Result<Operation, ParseError> {
    let mut operation = Operation {
        name: node.string("name"),
        visibility: node.visibility(Visibility::Package)?,
        is_static: node.flag("static")?,
        is_abstract: node.flag("abstract")?,
        is_leaf: node.flag("leaf")?,
        documentation: node.documentation(),
        ..Operation::default()
    };

    for child in node.children.iter().filter(|c| c.name == "parameter") {
        let direction = match child.attr("direction") {
            None => Direction::In,
            Some(value) => Direction::parse(value)
                .ok_or_else(|| ParseError::invalid_attr("parameter", "direction", value))?,
        };
        operation.parameters.push(Parameter {
            name: child.string("name"),
            type_ref: TypeRef::from(child.attr("type").unwrap_or_default()),
            direction,
            default_value: child.string("default"),
        });
    }

    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    const SHAPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model name="Project">
    <package name="Shapes">
        <class id="shape" name="Shape" abstract="true">
            <documentation>Base of all shapes.</documentation>
            <operation name="area" visibility="public" abstract="true">
                <parameter type="double" direction="return"/>
            </operation>
        </class>
        <class id="circle" name="Circle" leaf="true">
            <attribute name="radius" type="double" visibility="public"/>
            <attribute name="center" typeRef="point" visibility="private"/>
            <attribute name="tag" typeRef="nowhere"/>
            <operation name="scale" visibility="public">
                <parameter name="factor" type="double"/>
                <parameter name="origin" typeRef="point"/>
            </operation>
        </class>
        <enumeration id="color" name="Color">
            <literal name="Red"/>
            <literal name="Green"/>
            <literal name="Blue"/>
        </enumeration>
        <note name="Remember"/>
        <package name="Geometry">
            <class id="point" name="Point">
                <template name="T" type="typename" default="double"/>
            </class>
        </package>
    </package>
    <generalization source="circle" target="shape"/>
    <association>
        <end reference="circle"/>
        <end reference="color" name="fill" navigable="true" multiplicity="1"/>
    </association>
</model>"#;

    fn find(model: &Model, name: &str) -> ElementId {
        (0..model.len())
            .map(ElementId)
            .find(|&id| model.name_of(id) == name)
            .expect("element not found")
    }

    #[test]
    fn test_parse_containment() {
        let model = parse_model(SHAPES).expect("Failed to parse");
        assert_eq!(model.name_of(model.root()), "Project");

        let shapes = model.children(model.root())[0];
        assert_eq!(model.name_of(shapes), "Shapes");
        let names: Vec<_> = model
            .children(shapes)
            .iter()
            .map(|&id| model.name_of(id))
            .collect();
        assert_eq!(names, vec!["Shape", "Circle", "Color", "Remember", "Geometry"]);

        let note = find(&model, "Remember");
        assert!(matches!(
            model.get(note).map(|e| &e.kind),
            Some(ElementKind::Other(kind)) if kind == "note"
        ));
    }

    #[test]
    fn test_parse_members_and_forward_refs() {
        let model = parse_model(SHAPES).expect("Failed to parse");
        let circle = find(&model, "Circle");
        let point = find(&model, "Point");
        let body = model.get(circle).and_then(|e| e.classifier()).unwrap();

        assert!(body.is_leaf);
        assert_eq!(body.attributes[0].type_ref, TypeRef::Named("double".into()));
        assert_eq!(body.attributes[0].visibility, Visibility::Public);
        assert_eq!(body.attributes[1].type_ref, TypeRef::Element(point));
        assert_eq!(body.attributes[2].type_ref, TypeRef::None);
        assert_eq!(body.attributes[2].visibility, Visibility::Package);

        let scale = &body.operations[0];
        assert_eq!(scale.parameters[1].type_ref, TypeRef::Element(point));
    }

    #[test]
    fn test_parse_documentation_literals_templates() {
        let model = parse_model(SHAPES).expect("Failed to parse");
        let shape = model.get(find(&model, "Shape")).and_then(|e| e.classifier()).unwrap();
        assert_eq!(shape.documentation, "Base of all shapes.");
        assert!(shape.is_abstract);

        let color = model.get(find(&model, "Color")).and_then(|e| e.classifier()).unwrap();
        assert_eq!(color.literals, vec!["Red", "Green", "Blue"]);

        let point = model.get(find(&model, "Point")).and_then(|e| e.classifier()).unwrap();
        assert_eq!(
            point.template_parameters,
            vec![TemplateParameter {
                name: "T".into(),
                parameter_type: "typename".into(),
                default_value: Some("double".into()),
            }]
        );
    }

    #[test]
    fn test_parse_relationships() {
        let model = parse_model(SHAPES).expect("Failed to parse");
        let circle = find(&model, "Circle");
        let shape = find(&model, "Shape");

        let bases: Vec<_> = model.inheritance_of(circle).collect();
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].target, shape);
        assert_eq!(bases[0].visibility, Visibility::Public);

        let assoc = model.associations_of(circle).next().unwrap();
        let end = assoc.member_end_for(circle).unwrap();
        assert_eq!(end.name, "fill");
        assert_eq!(end.multiplicity, "1");
    }

    #[test]
    fn test_unknown_relationship_endpoint() {
        let xml = r#"<model><package name="P"><class id="a" name="A"/></package>
            <generalization source="a" target="b"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::UnknownReference { ref id, .. } if id == "b"));
    }

    #[test]
    fn test_duplicate_id() {
        let xml = r#"<model><class id="a" name="A"/><class id="a" name="B"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateId { ref id } if id == "a"));
    }

    #[test]
    fn test_invalid_flag() {
        let xml = r#"<model><class name="A" leaf="yes"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidAttribute { ref attribute, .. } if attribute == "leaf")
        );
    }

    #[test]
    fn test_association_needs_two_ends() {
        let xml = r#"<model><class id="a" name="A"/>
            <association><end reference="a"/></association></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_escaped_type_and_documentation() {
        let xml = r#"<model><class name="Cache">
            <documentation>
                Holds a &lt; b &amp; c&#33;
            </documentation>
            <attribute name="entries" type="std::map&lt;int, int&gt;"/>
            <operation name="find">
                <parameter name="key" type="const std::string&amp;"/>
            </operation>
        </class></model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let cache = model
            .get(find(&model, "Cache"))
            .and_then(|e| e.classifier())
            .unwrap();

        assert_eq!(cache.documentation, "Holds a < b & c!");
        assert_eq!(
            cache.attributes[0].type_ref,
            TypeRef::Named("std::map<int, int>".into())
        );
        assert_eq!(
            cache.operations[0].parameters[0].type_ref,
            TypeRef::Named("const std::string&".into())
        );
    }

    #[test]
    fn test_unknown_entity_rejected() {
        let xml = "<model><class name=\"A\"><documentation>&nbsp;</documentation></class></model>";
        assert!(parse_model(xml).is_err());
    }

    #[test]
    fn test_wrong_root() {
        let err = parse_model("<schema/>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.xml");
        std::fs::write(&path, SHAPES).unwrap();

        let model = parse_model_file(&path).expect("Failed to parse");
        assert_eq!(model.name_of(model.root()), "Project");
    }
}
