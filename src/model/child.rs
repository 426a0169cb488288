//! Composite child node types: entities combining identity, geometry,
//! network patch and nested structure.
//!
//! The common attribute/element set shared by all composite kinds lives in
//! [`ChildNode`]; each concrete type embeds it and adds its own extension
//! fields. Sub-element serialization order is fixed and must match the
//! schema ordering consuming applications expect.

use crate::encoding::{decode_legacy_text, normalize_gdtf_spec};
use crate::values::{ColorCie, Matrix};
use crate::xml::XmlElement;

use super::collections::{
    Addresses, Alignments, Connections, CustomCommands, Mappings, Overwrites, Projections,
    Protocols, Sources,
};
use super::leaf::{Gobo, ScaleHandeling, Source};
use super::scene::ChildList;
use super::{child_bool, child_f64, child_i64, child_string, matrix_element, new_uuid};

/// The shared field set of every composite child node.
///
/// Concrete node types embed this record and serialize it through
/// [`ChildNode::populate_element`], which emits the common sub-elements in
/// the fixed order: Matrix, Classing, GDTFSpec, GDTFMode, CastShadow, the
/// sub-collections, the fixture-id fields, then the nested ChildList.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildNode {
    /// Display name (`name` attribute)
    pub name: String,
    /// Node identity; never empty, generated when the source omits it
    pub uuid: String,
    /// File name of the external GDTF fixture-type definition
    pub gdtf_spec: Option<String>,
    /// DMX mode name within the GDTF definition
    pub gdtf_mode: Option<String>,
    pub matrix: Matrix,
    /// Reference to an AUXData class (`<Classing>` element)
    pub classing: Option<String>,
    pub fixture_id: Option<String>,
    pub fixture_id_numeric: Option<i64>,
    pub unit_number: Option<i64>,
    pub custom_id: Option<i64>,
    pub custom_id_type: Option<i64>,
    pub cast_shadow: bool,
    pub addresses: Addresses,
    pub alignments: Alignments,
    pub custom_commands: CustomCommands,
    pub overwrites: Overwrites,
    pub connections: Connections,
    pub child_list: Option<ChildList>,
    /// Multipatch parent reference (`multipatch` attribute)
    pub multipatch: Option<String>,
}

impl Default for ChildNode {
    fn default() -> Self {
        ChildNode {
            name: String::new(),
            uuid: new_uuid(),
            gdtf_spec: None,
            gdtf_mode: None,
            matrix: Matrix::default(),
            classing: None,
            fixture_id: None,
            fixture_id_numeric: None,
            unit_number: None,
            custom_id: None,
            custom_id_type: None,
            cast_shadow: false,
            addresses: Addresses::new(),
            alignments: Alignments::new(),
            custom_commands: CustomCommands::new(),
            overwrites: Overwrites::new(),
            connections: Connections::new(),
            child_list: None,
            multipatch: None,
        }
    }
}

impl ChildNode {
    pub fn new(name: impl Into<String>) -> Self {
        ChildNode {
            name: name.into(),
            ..ChildNode::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut child = ChildNode::default();
        child.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            child.uuid = uuid.to_string();
        }
        child.multipatch = node.attr("multipatch").map(String::from);

        child.gdtf_spec = node
            .child_text("GDTFSpec")
            .map(|spec| normalize_gdtf_spec(spec));
        child.gdtf_mode = child_string(node, "GDTFMode");
        if let Some(matrix) = node.child_text("Matrix") {
            child.matrix = Matrix::from_str_repr(matrix);
        }
        child.classing = child_string(node, "Classing");

        // present-but-empty <FixtureID> reads as an empty string
        child.fixture_id = node
            .find("FixtureID")
            .map(|el| el.text.clone().unwrap_or_default());
        child.fixture_id_numeric = child_i64(node, "FixtureIDNumeric");
        child.unit_number = child_i64(node, "UnitNumber");
        child.custom_id = child_i64(node, "CustomId");
        child.custom_id_type = child_i64(node, "CustomIdType");
        child.cast_shadow = child_bool(node, "CastShadow").unwrap_or(false);

        if let Some(el) = node.find("Addresses") {
            child.addresses = Addresses::from_xml(el);
        }
        if let Some(el) = node.find("Alignments") {
            child.alignments = Alignments::from_xml(el);
        }
        if let Some(el) = node.find("Connections") {
            child.connections = Connections::from_xml(el);
        }
        if let Some(el) = node.find("CustomCommands") {
            child.custom_commands = CustomCommands::from_xml(el);
        }
        if let Some(el) = node.find("Overwrites") {
            child.overwrites = Overwrites::from_xml(el);
        }
        child.child_list = node.find("ChildList").map(ChildList::from_xml);
        child
    }

    /// Write the identity attributes and the common sub-elements into a
    /// concrete node's element, in the fixed schema order.
    pub(crate) fn populate_element(&self, element: &mut XmlElement) {
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        if let Some(multipatch) = &self.multipatch {
            element.set_attr("multipatch", multipatch);
        }

        element.add_child(matrix_element(&self.matrix));
        if let Some(classing) = &self.classing {
            element.add_text_child("Classing", classing);
        }
        if let Some(spec) = &self.gdtf_spec {
            element.add_text_child("GDTFSpec", spec);
        }
        if let Some(mode) = &self.gdtf_mode {
            element.add_text_child("GDTFMode", mode);
        }
        if self.cast_shadow {
            element.add_text_child("CastShadow", "true");
        }

        if !self.addresses.is_empty() {
            element.add_child(self.addresses.to_xml());
        }
        if !self.alignments.is_empty() {
            element.add_child(self.alignments.to_xml());
        }
        if !self.custom_commands.is_empty() {
            element.add_child(self.custom_commands.to_xml());
        }
        if !self.overwrites.is_empty() {
            element.add_child(self.overwrites.to_xml());
        }
        if !self.connections.is_empty() {
            element.add_child(self.connections.to_xml());
        }

        if let Some(fixture_id) = &self.fixture_id {
            element.add_text_child("FixtureID", fixture_id);
        }
        if let Some(n) = self.fixture_id_numeric {
            element.add_text_child("FixtureIDNumeric", n.to_string());
        }
        if let Some(n) = self.unit_number {
            element.add_text_child("UnitNumber", n.to_string());
        }
        if let Some(n) = self.custom_id_type {
            element.add_text_child("CustomIdType", n.to_string());
        }
        if let Some(n) = self.custom_id {
            element.add_text_child("CustomId", n.to_string());
        }

        if let Some(child_list) = &self.child_list {
            element.add_child(child_list.to_xml());
        }
    }
}

fn read_geometries(node: &XmlElement) -> Option<Geometries> {
    node.find("Geometries").map(Geometries::from_xml)
}

/// A lighting fixture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    pub node: ChildNode,
    /// UUID of the focus point this fixture aims at
    pub focus: Option<String>,
    /// Beam color; stays unset when the source carries no `<Color>`
    pub color: Option<ColorCie>,
    pub dmx_invert_pan: bool,
    pub dmx_invert_tilt: bool,
    /// UUID of an AUXData position definition
    pub position: Option<String>,
    pub function: Option<String>,
    pub child_position: Option<String>,
    pub protocols: Protocols,
    pub mappings: Mappings,
    pub gobo: Option<Gobo>,
}

impl Fixture {
    pub fn new(name: impl Into<String>) -> Self {
        Fixture {
            node: ChildNode::new(name),
            ..Fixture::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Fixture {
            node: ChildNode::from_xml(node),
            focus: child_string(node, "Focus"),
            color: node.child_text("Color").map(ColorCie::from_str_repr),
            dmx_invert_pan: child_bool(node, "DMXInvertPan").unwrap_or(false),
            dmx_invert_tilt: child_bool(node, "DMXInvertTilt").unwrap_or(false),
            position: child_string(node, "Position"),
            function: child_string(node, "Function"),
            child_position: child_string(node, "ChildPosition"),
            protocols: node
                .find("Protocols")
                .map(Protocols::from_xml)
                .unwrap_or_default(),
            mappings: node
                .find("Mappings")
                .map(Mappings::from_xml)
                .unwrap_or_default(),
            gobo: node.find("Gobo").map(Gobo::from_xml),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Fixture");
        self.node.populate_element(&mut element);

        if let Some(focus) = &self.focus {
            element.add_text_child("Focus", focus);
        }
        if self.dmx_invert_pan {
            element.add_text_child("DMXInvertPan", "true");
        }
        if self.dmx_invert_tilt {
            element.add_text_child("DMXInvertTilt", "true");
        }
        if let Some(position) = &self.position {
            element.add_text_child("Position", position);
        }
        if let Some(function) = &self.function {
            element.add_text_child("Function", function);
        }
        if let Some(child_position) = &self.child_position {
            element.add_text_child("ChildPosition", child_position);
        }
        if !self.protocols.is_empty() {
            element.add_child(self.protocols.to_xml());
        }
        if let Some(color) = &self.color {
            element.add_text_child("Color", color.to_string());
        }
        if !self.mappings.is_empty() {
            element.add_child(self.mappings.to_xml());
        }
        if let Some(gobo) = &self.gobo {
            element.add_child(gobo.to_xml());
        }
        element
    }
}

/// Named group of child nodes, forming the recursive scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupObject {
    pub name: String,
    pub uuid: String,
    pub classing: Option<String>,
    pub matrix: Matrix,
    pub child_list: Option<ChildList>,
}

impl Default for GroupObject {
    fn default() -> Self {
        GroupObject {
            name: String::new(),
            uuid: new_uuid(),
            classing: None,
            matrix: Matrix::default(),
            child_list: None,
        }
    }
}

impl GroupObject {
    pub fn new(name: impl Into<String>) -> Self {
        GroupObject {
            name: name.into(),
            ..GroupObject::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut group = GroupObject::default();
        group.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            group.uuid = uuid.to_string();
        }
        group.classing = child_string(node, "Classing");
        if let Some(matrix) = node.child_text("Matrix") {
            group.matrix = Matrix::from_str_repr(matrix);
        }
        group.child_list = node.find("ChildList").map(ChildList::from_xml);
        group
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("GroupObject");
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        element.add_child(matrix_element(&self.matrix));
        if let Some(classing) = &self.classing {
            element.add_text_child("Classing", classing);
        }
        if let Some(child_list) = &self.child_list {
            element.add_child(child_list.to_xml());
        }
        element
    }
}

/// Generic scene object with optional own geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneObject {
    pub node: ChildNode,
    pub geometries: Option<Geometries>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        SceneObject {
            node: ChildNode::new(name),
            geometries: None,
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        SceneObject {
            node: ChildNode::from_xml(node),
            geometries: read_geometries(node),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("SceneObject");
        self.node.populate_element(&mut element);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml());
        }
        element
    }
}

/// A truss element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Truss {
    pub node: ChildNode,
    pub geometries: Option<Geometries>,
    pub position: Option<String>,
    pub function: Option<String>,
    pub child_position: Option<String>,
}

impl Truss {
    pub fn new(name: impl Into<String>) -> Self {
        Truss {
            node: ChildNode::new(name),
            ..Truss::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Truss {
            node: ChildNode::from_xml(node),
            geometries: read_geometries(node),
            position: child_string(node, "Position"),
            function: child_string(node, "Function"),
            child_position: child_string(node, "ChildPosition"),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Truss");
        self.node.populate_element(&mut element);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml());
        }
        if let Some(position) = &self.position {
            element.add_text_child("Position", position);
        }
        if let Some(function) = &self.function {
            element.add_text_child("Function", function);
        }
        if let Some(child_position) = &self.child_position {
            element.add_text_child("ChildPosition", child_position);
        }
        element
    }
}

/// A hoist or other support carrying rigged objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Support {
    pub node: ChildNode,
    pub geometries: Option<Geometries>,
    /// Chain length in millimeters; always serialized
    pub chain_length: f64,
    pub position: Option<String>,
    pub function: Option<String>,
}

impl Support {
    pub fn new(name: impl Into<String>) -> Self {
        Support {
            node: ChildNode::new(name),
            ..Support::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Support {
            node: ChildNode::from_xml(node),
            geometries: read_geometries(node),
            chain_length: child_f64(node, "ChainLength").unwrap_or(0.0),
            position: child_string(node, "Position"),
            function: child_string(node, "Function"),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Support");
        self.node.populate_element(&mut element);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml());
        }
        if let Some(position) = &self.position {
            element.add_text_child("Position", position);
        }
        if let Some(function) = &self.function {
            element.add_text_child("Function", function);
        }
        element.add_text_child("ChainLength", self.chain_length.to_string());
        element
    }
}

/// A video display surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoScreen {
    pub node: ChildNode,
    pub geometries: Option<Geometries>,
    pub sources: Option<Sources>,
    pub function: Option<String>,
}

impl VideoScreen {
    pub fn new(name: impl Into<String>) -> Self {
        VideoScreen {
            node: ChildNode::new(name),
            ..VideoScreen::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        VideoScreen {
            node: ChildNode::from_xml(node),
            geometries: read_geometries(node),
            sources: node.find("Sources").map(Sources::from_xml),
            function: child_string(node, "Function"),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("VideoScreen");
        self.node.populate_element(&mut element);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml());
        }
        if let Some(sources) = &self.sources {
            element.add_child(sources.to_xml());
        }
        if let Some(function) = &self.function {
            element.add_text_child("Function", function);
        }
        element
    }
}

/// A video projector with one or more projection surfaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projector {
    pub node: ChildNode,
    pub geometries: Option<Geometries>,
    pub projections: Option<Projections>,
}

impl Projector {
    pub fn new(name: impl Into<String>) -> Self {
        Projector {
            node: ChildNode::new(name),
            ..Projector::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Projector {
            node: ChildNode::from_xml(node),
            geometries: read_geometries(node),
            projections: node.find("Projections").map(Projections::from_xml),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Projector");
        self.node.populate_element(&mut element);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml());
        }
        if let Some(projections) = &self.projections {
            element.add_child(projections.to_xml());
        }
        element
    }
}

/// A point fixtures can be focused at.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPoint {
    pub name: String,
    pub uuid: String,
    pub matrix: Matrix,
    pub classing: Option<String>,
    /// Own geometry; always serialized, even when empty
    pub geometries: Geometries,
}

impl Default for FocusPoint {
    fn default() -> Self {
        FocusPoint {
            name: String::new(),
            uuid: new_uuid(),
            matrix: Matrix::default(),
            classing: None,
            geometries: Geometries::default(),
        }
    }
}

impl FocusPoint {
    pub fn new(name: impl Into<String>) -> Self {
        FocusPoint {
            name: name.into(),
            ..FocusPoint::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut point = FocusPoint::default();
        point.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            point.uuid = uuid.to_string();
        }
        if let Some(matrix) = node.child_text("Matrix") {
            point.matrix = Matrix::from_str_repr(matrix);
        }
        point.classing = child_string(node, "Classing");
        if let Some(geometries) = read_geometries(node) {
            point.geometries = geometries;
        }
        point
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("FocusPoint");
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        element.add_child(matrix_element(&self.matrix));
        if let Some(classing) = &self.classing {
            element.add_text_child("Classing", classing);
        }
        element.add_child(self.geometries.to_xml());
        element
    }
}

/// Reference to a 3D model file bundled in the archive.
///
/// `fileName` values go through the legacy CP437 shim on read; equality is
/// keyed on (file name, matrix), which drives duplicate elimination inside
/// symbol definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry3D {
    pub file_name: String,
    pub matrix: Matrix,
}

impl Geometry3D {
    pub fn new(file_name: impl Into<String>) -> Self {
        Geometry3D {
            file_name: file_name.into(),
            matrix: Matrix::default(),
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Geometry3D {
            file_name: decode_legacy_text(node.attr("fileName").unwrap_or_default()),
            matrix: node
                .child_text("Matrix")
                .map(Matrix::from_str_repr)
                .unwrap_or_default(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Geometry3D");
        element.set_attr("fileName", &self.file_name);
        element.add_child(matrix_element(&self.matrix));
        element
    }
}

/// Instance of a symbol definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub uuid: String,
    /// UUID of the referenced [`Symdef`]
    pub symdef: Option<String>,
    pub matrix: Matrix,
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol {
            uuid: new_uuid(),
            symdef: None,
            matrix: Matrix::default(),
        }
    }
}

impl Symbol {
    pub fn from_xml(node: &XmlElement) -> Self {
        let mut symbol = Symbol::default();
        if let Some(uuid) = node.attr("uuid") {
            symbol.uuid = uuid.to_string();
        }
        symbol.symdef = node.attr("symdef").map(String::from);
        if let Some(matrix) = node.child_text("Matrix") {
            symbol.matrix = Matrix::from_str_repr(matrix);
        }
        symbol
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Symbol");
        element.set_attr("uuid", &self.uuid);
        if let Some(symdef) = &self.symdef {
            element.set_attr("symdef", symdef);
        }
        element.add_child(matrix_element(&self.matrix));
        element
    }
}

/// Geometry container: 3D file references plus symbol instances.
///
/// Serialized under `<Geometries>` for scene objects and under `<ChildList>`
/// inside symbol definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometries {
    pub geometry3d: Vec<Geometry3D>,
    pub symbols: Vec<Symbol>,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Geometries {
            geometry3d: node.find_all("Geometry3D").map(Geometry3D::from_xml).collect(),
            symbols: node.find_all("Symbol").map(Symbol::from_xml).collect(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        self.to_xml_as("Geometries")
    }

    pub(crate) fn to_xml_as(&self, tag: &str) -> XmlElement {
        let mut element = XmlElement::new(tag);
        for geometry in &self.geometry3d {
            element.add_child(geometry.to_xml());
        }
        for symbol in &self.symbols {
            element.add_child(symbol.to_xml());
        }
        element
    }

    pub fn is_empty(&self) -> bool {
        self.geometry3d.is_empty() && self.symbols.is_empty()
    }

    /// Drop later duplicates keyed on (file name, matrix) equality.
    pub fn dedup_geometry3d(&mut self) {
        let mut seen: Vec<Geometry3D> = Vec::new();
        self.geometry3d.retain(|geometry| {
            if seen.contains(geometry) {
                false
            } else {
                seen.push(geometry.clone());
                true
            }
        });
    }
}

/// Reusable named symbol definition referenced by [`Symbol`] instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Symdef {
    pub name: String,
    pub uuid: String,
    /// Geometry of the definition, serialized under `<ChildList>`
    pub geometries: Option<Geometries>,
}

impl Default for Symdef {
    fn default() -> Self {
        Symdef {
            name: String::new(),
            uuid: new_uuid(),
            geometries: None,
        }
    }
}

impl Symdef {
    pub fn new(name: impl Into<String>) -> Self {
        Symdef {
            name: name.into(),
            ..Symdef::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut symdef = Symdef::default();
        symdef.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            symdef.uuid = uuid.to_string();
        }
        symdef.geometries = node.find("ChildList").map(|el| {
            let mut geometries = Geometries::from_xml(el);
            geometries.dedup_geometry3d();
            geometries
        });
        symdef
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Symdef");
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        if let Some(geometries) = &self.geometries {
            element.add_child(geometries.to_xml_as("ChildList"));
        }
        element
    }
}

/// Pixel-mapping definition referenced from fixture mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDefinition {
    pub name: String,
    pub uuid: String,
    pub size_x: i64,
    pub size_y: i64,
    pub source: Option<Source>,
    pub scale_handling: ScaleHandeling,
}

impl Default for MappingDefinition {
    fn default() -> Self {
        MappingDefinition {
            name: String::new(),
            uuid: new_uuid(),
            size_x: 0,
            size_y: 0,
            source: None,
            scale_handling: ScaleHandeling::default(),
        }
    }
}

impl MappingDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        MappingDefinition {
            name: name.into(),
            ..MappingDefinition::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut definition = MappingDefinition::default();
        definition.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            definition.uuid = uuid.to_string();
        }
        definition.size_x = child_i64(node, "SizeX").unwrap_or(0);
        definition.size_y = child_i64(node, "SizeY").unwrap_or(0);
        definition.source = node.find("Source").map(Source::from_xml);
        definition.scale_handling = node
            .find("ScaleHandeling")
            .map(ScaleHandeling::from_xml)
            .unwrap_or_default();
        definition
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("MappingDefinition");
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        element.add_text_child("SizeX", self.size_x.to_string());
        element.add_text_child("SizeY", self.size_y.to_string());
        if let Some(source) = &self.source {
            element.add_child(source.to_xml());
        }
        element.add_child(self.scale_handling.to_xml());
        element
    }
}
