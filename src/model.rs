//! Typed object model for the `GeneralSceneDescription` document.
//!
//! Every node type follows the same contract: `from_xml` constructs the node
//! from a parsed [`XmlElement`](crate::xml::XmlElement) with per-field
//! leniency (missing or malformed optional content falls back to the field
//! default, unknown content is ignored), and `to_xml` builds the element
//! back in the fixed serialization order the format's consumers expect.

mod child;
mod collections;
mod leaf;
mod scene;

pub use child::{
    ChildNode, Fixture, FocusPoint, Geometries, Geometry3D, GroupObject, MappingDefinition,
    Projector, SceneObject, Support, Symbol, Symdef, Truss, VideoScreen,
};
pub use collections::{
    Addresses, Alignments, Connections, CustomCommands, Layers, Mappings, Overwrites, Projections,
    Protocols, Sources,
};
pub use leaf::{
    Address, Alignment, Class, Connection, CustomCommand, Data, Gobo, Mapping, Network, Position,
    Projection, Protocol, ScaleHandeling, Source,
};
pub use scene::{AuxData, ChildList, Layer, Scene, UserData};

use crate::xml::XmlElement;

/// Freshly generated node identity.
pub(crate) fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn parse_bool(text: &str) -> bool {
    matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on")
}

pub(crate) fn child_string(node: &XmlElement, tag: &str) -> Option<String> {
    node.child_text(tag).map(str::to_string)
}

pub(crate) fn child_i64(node: &XmlElement, tag: &str) -> Option<i64> {
    node.child_text(tag).and_then(|t| t.trim().parse().ok())
}

pub(crate) fn child_f64(node: &XmlElement, tag: &str) -> Option<f64> {
    node.child_text(tag).and_then(|t| t.trim().parse().ok())
}

pub(crate) fn child_bool(node: &XmlElement, tag: &str) -> Option<bool> {
    node.child_text(tag).map(parse_bool)
}

/// Build a `<Matrix>` child element in the vendor textual form.
pub(crate) fn matrix_element(matrix: &crate::values::Matrix) -> XmlElement {
    let mut element = XmlElement::new("Matrix");
    element.text = Some(matrix.str_repr());
    element
}
