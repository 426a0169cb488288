//! Leaf node types: simple entities carrying only attributes, text content
//! or a couple of child elements.

use crate::xml::XmlElement;

use super::{child_f64, child_i64, new_uuid, parse_bool};

/// DMX patch identity: break number plus a 1-based (universe, address) pair.
///
/// The element text is either an absolute universe-relative offset
/// (`(universe-1)*512 + address`) or the dotted `universe.address` form.
/// Universe and address are always at least 1 after parsing, even when the
/// source recorded 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    /// DMX break the address belongs to (`break` attribute)
    pub dmx_break: i32,
    /// 1-based universe
    pub universe: i32,
    /// 1-based address within the universe
    pub address: i32,
}

impl Default for Address {
    fn default() -> Self {
        Address {
            dmx_break: 0,
            universe: 1,
            address: 1,
        }
    }
}

impl Address {
    pub fn new(dmx_break: i32, universe: i32, address: i32) -> Self {
        Address {
            dmx_break,
            universe,
            address,
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let dmx_break = node
            .attr("break")
            .and_then(|b| b.trim().parse().ok())
            .unwrap_or(0);

        let raw = node.text.as_deref().unwrap_or("1").trim();
        // "0" is a legacy way of writing the first address
        let raw = if raw == "0" { "1" } else { raw };

        let (universe, address) = match raw.split_once('.') {
            Some((universe, address)) => (
                parse_positive(universe).unwrap_or(1),
                parse_positive(address).unwrap_or(1),
            ),
            None => {
                let absolute = parse_positive(raw).unwrap_or(1);
                ((absolute - 1) / 512 + 1, (absolute - 1) % 512 + 1)
            }
        };

        Address {
            dmx_break,
            universe: universe as i32,
            address: address as i32,
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        // universes are always from 1 in MVR
        let universe = i64::from(self.universe.max(1));
        let absolute = (universe - 1) * 512 + i64::from(self.address);
        let mut element = XmlElement::new("Address");
        element.set_attr("break", self.dmx_break.to_string());
        element.text = Some(absolute.to_string());
        element
    }
}

fn parse_positive(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

/// Network interface patch entry carried next to DMX addresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub geometry: String,
    pub ipv4: Option<String>,
    pub subnetmask: Option<String>,
    pub ipv6: Option<String>,
    pub dhcp: bool,
    pub hostname: Option<String>,
}

impl Network {
    pub fn from_xml(node: &XmlElement) -> Self {
        Network {
            geometry: node.attr("geometry").unwrap_or_default().to_string(),
            ipv4: node.attr("ipv4").map(String::from),
            subnetmask: node.attr("subnetmask").map(String::from),
            ipv6: node.attr("ipv6").map(String::from),
            dhcp: node.attr("dhcp").map(parse_bool).unwrap_or(false),
            hostname: node.attr("hostname").map(String::from),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Network");
        element.set_attr("geometry", &self.geometry);
        if let Some(ipv4) = &self.ipv4 {
            element.set_attr("ipv4", ipv4);
        }
        if let Some(subnetmask) = &self.subnetmask {
            element.set_attr("subnetmask", subnetmask);
        }
        if let Some(ipv6) = &self.ipv6 {
            element.set_attr("ipv6", ipv6);
        }
        if self.dhcp {
            element.set_attr("dhcp", "true");
        }
        if let Some(hostname) = &self.hostname {
            element.set_attr("hostname", hostname);
        }
        element
    }
}

/// DMX transport protocol spoken by a fixture geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    pub geometry: Option<String>,
    pub name: String,
    pub protocol_type: Option<String>,
    pub version: Option<String>,
    pub transmission: Option<String>,
}

impl Default for Protocol {
    fn default() -> Self {
        Protocol {
            geometry: Some("NetworkInOut_1".to_string()),
            name: String::new(),
            protocol_type: None,
            version: None,
            transmission: None,
        }
    }
}

impl Protocol {
    pub fn from_xml(node: &XmlElement) -> Self {
        Protocol {
            geometry: node.attr("geometry").map(String::from),
            name: node.attr("name").unwrap_or_default().to_string(),
            protocol_type: node.attr("type").map(String::from),
            version: node.attr("version").map(String::from),
            transmission: node.attr("transmission").map(String::from),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Protocol");
        if let Some(geometry) = &self.geometry {
            element.set_attr("geometry", geometry);
        }
        if !self.name.is_empty() {
            element.set_attr("name", &self.name);
        }
        if let Some(protocol_type) = &self.protocol_type {
            element.set_attr("type", protocol_type);
        }
        if let Some(version) = &self.version {
            element.set_attr("version", version);
        }
        if let Some(transmission) = &self.transmission {
            element.set_attr("transmission", transmission);
        }
        element
    }
}

/// Beam alignment override for a fixture geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub geometry: Option<String>,
    pub up: String,
    pub direction: String,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment {
            geometry: Some("Beam".to_string()),
            up: "0,0,1".to_string(),
            direction: "0,0,-1".to_string(),
        }
    }
}

impl Alignment {
    pub fn from_xml(node: &XmlElement) -> Self {
        Alignment {
            geometry: node.attr("geometry").map(String::from),
            up: node.attr("up").unwrap_or("0,0,1").to_string(),
            direction: node.attr("direction").unwrap_or("0,0,-1").to_string(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Alignment");
        if let Some(geometry) = &self.geometry {
            element.set_attr("geometry", geometry);
        }
        if !self.up.is_empty() {
            element.set_attr("up", &self.up);
        }
        if !self.direction.is_empty() {
            element.set_attr("direction", &self.direction);
        }
        element
    }
}

/// Fixture-type property overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overwrite {
    pub universal: String,
    pub target: Option<String>,
}

impl Overwrite {
    pub fn from_xml(node: &XmlElement) -> Self {
        Overwrite {
            universal: node.attr("universal").unwrap_or_default().to_string(),
            target: node.attr("target").map(String::from),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Overwrite");
        element.set_attr("universal", &self.universal);
        if let Some(target) = &self.target {
            element.set_attr("target", target);
        }
        element
    }
}

/// Rigging connection between two scene objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    pub own: Option<String>,
    pub other: Option<String>,
    pub to_object: Option<String>,
}

impl Connection {
    pub fn from_xml(node: &XmlElement) -> Self {
        Connection {
            own: node.attr("own").map(String::from),
            other: node.attr("other").map(String::from),
            to_object: node.attr("toObject").map(String::from),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Connection");
        if let Some(own) = &self.own {
            element.set_attr("own", own);
        }
        if let Some(other) = &self.other {
            element.set_attr("other", other);
        }
        if let Some(to_object) = &self.to_object {
            element.set_attr("toObject", to_object);
        }
        element
    }
}

/// Placement of a fixture surface inside a pixel-mapping definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    pub link_def: Option<String>,
    pub ux: Option<i64>,
    pub uy: Option<i64>,
    pub ox: Option<i64>,
    pub oy: Option<i64>,
    pub rz: Option<f64>,
}

impl Mapping {
    pub fn from_xml(node: &XmlElement) -> Self {
        Mapping {
            link_def: node.attr("linkedDef").map(String::from),
            ux: child_i64(node, "ux"),
            uy: child_i64(node, "uy"),
            ox: child_i64(node, "ox"),
            oy: child_i64(node, "oy"),
            rz: child_f64(node, "rz"),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Mapping");
        if let Some(link_def) = &self.link_def {
            element.set_attr("linkedDef", link_def);
        }
        if let Some(ux) = self.ux {
            element.add_text_child("ux", ux.to_string());
        }
        if let Some(uy) = self.uy {
            element.add_text_child("uy", uy.to_string());
        }
        if let Some(ox) = self.ox {
            element.add_text_child("ox", ox.to_string());
        }
        if let Some(oy) = self.oy {
            element.add_text_child("oy", oy.to_string());
        }
        if let Some(rz) = self.rz {
            element.add_text_child("rz", rz.to_string());
        }
        element
    }
}

/// Static gobo loaded into a fixture, referenced by media file name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gobo {
    pub rotation: f64,
    pub file_name: Option<String>,
}

impl Gobo {
    pub fn from_xml(node: &XmlElement) -> Self {
        Gobo {
            rotation: node
                .attr("rotation")
                .and_then(|r| r.trim().parse().ok())
                .unwrap_or(0.0),
            file_name: node.text.clone(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Gobo");
        element.set_attr("rotation", self.rotation.to_string());
        element.text = self.file_name.clone();
        element
    }
}

/// Free-form console command sent to the fixture at scene start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomCommand {
    pub command: Option<String>,
}

impl CustomCommand {
    pub fn from_xml(node: &XmlElement) -> Self {
        CustomCommand {
            command: node.text.clone(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("CustomCommand");
        element.text = self.command.clone();
        element
    }
}

/// Content source for video screens, projections and mapping definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub linked_geometry: Option<String>,
    pub source_type: Option<String>,
    pub value: Option<String>,
}

impl Source {
    pub fn from_xml(node: &XmlElement) -> Self {
        Source {
            linked_geometry: node.attr("linkedGeometry").map(String::from),
            source_type: node.attr("type").map(String::from),
            value: node.text.clone(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Source");
        if let Some(linked_geometry) = &self.linked_geometry {
            element.set_attr("linkedGeometry", linked_geometry);
        }
        if let Some(source_type) = &self.source_type {
            element.set_attr("type", source_type);
        }
        element.text = self.value.clone();
        element
    }
}

/// How mapped content is scaled onto its target surface.
///
/// The element tag keeps the format's historical spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleHandeling {
    #[default]
    ScaleKeepRatio,
    ScaleIgnoreRatio,
    KeepSizeCenter,
}

impl ScaleHandeling {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleHandeling::ScaleKeepRatio => "ScaleKeepRatio",
            ScaleHandeling::ScaleIgnoreRatio => "ScaleIgnoreRatio",
            ScaleHandeling::KeepSizeCenter => "KeepSizeCenter",
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        match node.text.as_deref() {
            Some("ScaleKeepRatio") => ScaleHandeling::ScaleKeepRatio,
            Some("ScaleIgnoreRatio") => ScaleHandeling::ScaleIgnoreRatio,
            Some("KeepSizeCenter") => ScaleHandeling::KeepSizeCenter,
            _ => ScaleHandeling::default(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("ScaleHandeling");
        element.text = Some(self.as_str().to_string());
        element
    }
}

/// One projection surface of a projector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub source: Option<Source>,
    pub scale_handling: ScaleHandeling,
}

impl Projection {
    pub fn from_xml(node: &XmlElement) -> Self {
        Projection {
            source: node.find("Source").map(Source::from_xml),
            scale_handling: node
                .find("ScaleHandeling")
                .map(ScaleHandeling::from_xml)
                .unwrap_or_default(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Projection");
        if let Some(source) = &self.source {
            element.add_child(source.to_xml());
        }
        element.add_child(self.scale_handling.to_xml());
        element
    }
}

/// Provider-scoped blob of application data under `<UserData>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub provider: String,
    pub ver: String,
}

impl Default for Data {
    fn default() -> Self {
        Data {
            provider: String::new(),
            ver: "1".to_string(),
        }
    }
}

impl Data {
    pub fn new(provider: impl Into<String>) -> Self {
        Data {
            provider: provider.into(),
            ..Data::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut data = Data::default();
        if let Some(provider) = node.attr("provider") {
            data.provider = provider.to_string();
        }
        if let Some(ver) = node.attr("ver") {
            data.ver = ver.to_string();
        }
        data
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Data");
        element.set_attr("provider", &self.provider);
        element.set_attr("ver", &self.ver);
        element
    }
}

/// AUXData class definition grouping scene objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: String,
    pub uuid: String,
}

impl Default for Class {
    fn default() -> Self {
        Class {
            name: String::new(),
            uuid: new_uuid(),
        }
    }
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            name: name.into(),
            uuid: new_uuid(),
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        named_from_xml(node, |name, uuid| Class { name, uuid })
    }

    pub fn to_xml(&self) -> XmlElement {
        named_to_xml("Class", &self.name, &self.uuid)
    }
}

/// AUXData position definition referenced by trusses and fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub name: String,
    pub uuid: String,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            name: String::new(),
            uuid: new_uuid(),
        }
    }
}

impl Position {
    pub fn new(name: impl Into<String>) -> Self {
        Position {
            name: name.into(),
            uuid: new_uuid(),
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        named_from_xml(node, |name, uuid| Position { name, uuid })
    }

    pub fn to_xml(&self) -> XmlElement {
        named_to_xml("Position", &self.name, &self.uuid)
    }
}

fn named_from_xml<T>(node: &XmlElement, build: impl FnOnce(String, String) -> T) -> T {
    let name = node.attr("name").unwrap_or_default().to_string();
    let uuid = node
        .attr("uuid")
        .map(String::from)
        .unwrap_or_else(new_uuid);
    build(name, uuid)
}

fn named_to_xml(tag: &str, name: &str, uuid: &str) -> XmlElement {
    let mut element = XmlElement::new(tag);
    element.set_attr("name", name);
    element.set_attr("uuid", uuid);
    element
}
