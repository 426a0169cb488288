//! Scene-level structure: the scene root, layers, the recursive child list
//! and the auxiliary data block.

use crate::values::Matrix;
use crate::xml::XmlElement;

use super::child::{
    Fixture, FocusPoint, GroupObject, MappingDefinition, Projector, SceneObject, Support, Symdef,
    Truss, VideoScreen,
};
use super::collections::Layers;
use super::leaf::{Class, Data, Position};
use super::new_uuid;

/// The children of a layer or group, grouped by node kind.
///
/// Reading collects each kind from the container's direct children; writing
/// emits the kinds in a fixed order. Mixed-order input therefore normalizes
/// to kind-grouped output while preserving order within each kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildList {
    pub fixtures: Vec<Fixture>,
    pub focus_points: Vec<FocusPoint>,
    pub group_objects: Vec<GroupObject>,
    pub scene_objects: Vec<SceneObject>,
    pub supports: Vec<Support>,
    pub trusses: Vec<Truss>,
    pub video_screens: Vec<VideoScreen>,
    pub projectors: Vec<Projector>,
}

impl ChildList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        ChildList {
            fixtures: node.find_all("Fixture").map(Fixture::from_xml).collect(),
            focus_points: node.find_all("FocusPoint").map(FocusPoint::from_xml).collect(),
            group_objects: node.find_all("GroupObject").map(GroupObject::from_xml).collect(),
            scene_objects: node.find_all("SceneObject").map(SceneObject::from_xml).collect(),
            supports: node.find_all("Support").map(Support::from_xml).collect(),
            trusses: node.find_all("Truss").map(Truss::from_xml).collect(),
            video_screens: node.find_all("VideoScreen").map(VideoScreen::from_xml).collect(),
            projectors: node.find_all("Projector").map(Projector::from_xml).collect(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("ChildList");
        for fixture in &self.fixtures {
            element.add_child(fixture.to_xml());
        }
        for focus_point in &self.focus_points {
            element.add_child(focus_point.to_xml());
        }
        for group in &self.group_objects {
            element.add_child(group.to_xml());
        }
        for object in &self.scene_objects {
            element.add_child(object.to_xml());
        }
        for support in &self.supports {
            element.add_child(support.to_xml());
        }
        for truss in &self.trusses {
            element.add_child(truss.to_xml());
        }
        for screen in &self.video_screens {
            element.add_child(screen.to_xml());
        }
        for projector in &self.projectors {
            element.add_child(projector.to_xml());
        }
        element
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
            && self.focus_points.is_empty()
            && self.group_objects.is_empty()
            && self.scene_objects.is_empty()
            && self.supports.is_empty()
            && self.trusses.is_empty()
            && self.video_screens.is_empty()
            && self.projectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
            + self.focus_points.len()
            + self.group_objects.len()
            + self.scene_objects.len()
            + self.supports.len()
            + self.trusses.len()
            + self.video_screens.len()
            + self.projectors.len()
    }
}

/// A top-level layer of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub uuid: String,
    pub matrix: Matrix,
    pub child_list: Option<ChildList>,
}

impl Default for Layer {
    fn default() -> Self {
        Layer {
            name: String::new(),
            uuid: new_uuid(),
            matrix: Matrix::default(),
            child_list: None,
        }
    }
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            ..Layer::default()
        }
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        let mut layer = Layer::default();
        layer.name = node.attr("name").unwrap_or_default().to_string();
        if let Some(uuid) = node.attr("uuid") {
            layer.uuid = uuid.to_string();
        }
        if let Some(matrix) = node.child_text("Matrix") {
            layer.matrix = Matrix::from_str_repr(matrix);
        }
        layer.child_list = node.find("ChildList").map(ChildList::from_xml);
        layer
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Layer");
        element.set_attr("name", &self.name);
        element.set_attr("uuid", &self.uuid);
        element.add_child(super::matrix_element(&self.matrix));
        if let Some(child_list) = &self.child_list {
            element.add_child(child_list.to_xml());
        }
        element
    }
}

/// Shared definitions referenced from elsewhere in the scene, serialized
/// under the historically-cased `<AUXData>` tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxData {
    pub classes: Vec<Class>,
    pub symdefs: Vec<Symdef>,
    pub positions: Vec<Position>,
    pub mapping_definitions: Vec<MappingDefinition>,
}

impl AuxData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        AuxData {
            classes: node.find_all("Class").map(Class::from_xml).collect(),
            symdefs: node.find_all("Symdef").map(Symdef::from_xml).collect(),
            positions: node.find_all("Position").map(Position::from_xml).collect(),
            mapping_definitions: node
                .find_all("MappingDefinition")
                .map(MappingDefinition::from_xml)
                .collect(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("AUXData");
        for class in &self.classes {
            element.add_child(class.to_xml());
        }
        for symdef in &self.symdefs {
            element.add_child(symdef.to_xml());
        }
        for position in &self.positions {
            element.add_child(position.to_xml());
        }
        for definition in &self.mapping_definitions {
            element.add_child(definition.to_xml());
        }
        element
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.symdefs.is_empty()
            && self.positions.is_empty()
            && self.mapping_definitions.is_empty()
    }
}

/// The scene body: layers plus optional auxiliary data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub layers: Layers,
    pub aux_data: Option<AuxData>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        Scene {
            layers: node.find("Layers").map(Layers::from_xml).unwrap_or_default(),
            aux_data: node.find("AUXData").map(AuxData::from_xml),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Scene");
        // Layers is always present, even when the scene holds none
        element.add_child(self.layers.to_xml());
        if let Some(aux_data) = &self.aux_data {
            element.add_child(aux_data.to_xml());
        }
        element
    }
}

/// Provider-scoped application data attached next to the scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    pub data: Vec<Data>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_xml(node: &XmlElement) -> Self {
        UserData {
            data: node.find_all("Data").map(Data::from_xml).collect(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("UserData");
        for data in &self.data {
            element.add_child(data.to_xml());
        }
        element
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_list_normalizes_mixed_input_to_kind_groups() {
        let node = XmlElement::parse(
            r#"<ChildList>
                <SceneObject name="stage" uuid="s-1"/>
                <Fixture name="spot-a" uuid="f-1"/>
                <GroupObject name="rig" uuid="g-1"/>
                <Fixture name="spot-b" uuid="f-2"/>
            </ChildList>"#,
        )
        .unwrap();
        let list = ChildList::from_xml(&node);
        assert_eq!(list.len(), 4);

        let tags: Vec<String> = list
            .to_xml()
            .children
            .iter()
            .map(|c| c.tag.clone())
            .collect();
        assert_eq!(tags, ["Fixture", "Fixture", "GroupObject", "SceneObject"]);
        assert_eq!(list.fixtures[0].node.name, "spot-a");
        assert_eq!(list.fixtures[1].node.name, "spot-b");
    }

    #[test]
    fn nested_group_objects_round_trip() {
        let mut inner = GroupObject::new("inner");
        let mut inner_children = ChildList::new();
        inner_children.fixtures.push(Fixture::new("spot"));
        inner.child_list = Some(inner_children);

        let mut outer = GroupObject::new("outer");
        let mut outer_children = ChildList::new();
        outer_children.group_objects.push(inner);
        outer.child_list = Some(outer_children);

        let reparsed = GroupObject::from_xml(&outer.to_xml());
        assert_eq!(reparsed, outer);
        let inner = &reparsed.child_list.unwrap().group_objects[0];
        assert_eq!(
            inner.child_list.as_ref().unwrap().fixtures[0].node.name,
            "spot"
        );
    }

    #[test]
    fn layer_always_carries_matrix_element() {
        let layer = Layer::new("Main");
        let element = layer.to_xml();
        assert_eq!(element.children[0].tag, "Matrix");
        assert_eq!(element.children.len(), 1);
    }

    #[test]
    fn scene_always_serializes_layers() {
        let scene = Scene::new();
        let element = scene.to_xml();
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].tag, "Layers");
    }

    #[test]
    fn scene_writes_layers_before_aux_data() {
        let mut scene = Scene::new();
        scene.layers.push(Layer::new("Main"));
        let mut aux = AuxData::new();
        aux.classes.push(Class::new("Trusses"));
        scene.aux_data = Some(aux);

        let tags: Vec<String> = scene
            .to_xml()
            .children
            .iter()
            .map(|c| c.tag.clone())
            .collect();
        assert_eq!(tags, ["Layers", "AUXData"]);
    }

    #[test]
    fn aux_data_serializes_in_fixed_order() {
        let mut aux = AuxData::new();
        aux.positions.push(Position::new("FOH"));
        aux.classes.push(Class::new("Trusses"));
        aux.symdefs.push(Symdef::new("pipe"));
        let tags: Vec<String> = aux
            .to_xml()
            .children
            .iter()
            .map(|c| c.tag.clone())
            .collect();
        assert_eq!(tags, ["Class", "Symdef", "Position"]);
    }

    #[test]
    fn user_data_round_trips() {
        let mut user_data = UserData::new();
        user_data.data.push(Data::new("gMA3"));
        let reparsed = UserData::from_xml(&user_data.to_xml());
        assert_eq!(reparsed, user_data);
    }
}
