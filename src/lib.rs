//! # mvr - My Virtual Rig Scene Description
//!
//! `mvr` reads and writes MVR files, the interchange format entertainment
//! lighting applications use to share scene descriptions: fixtures and their
//! DMX patch, trusses, supports, video screens, projectors and the 3D
//! geometry tying them together.
//!
//! An MVR file is a ZIP archive. Its root entry
//! `GeneralSceneDescription.xml` holds the scene; the remaining entries are
//! the asset files (3D models, GDTF fixture types, media) the scene
//! references by file name.
//!
//! ## Reading
//!
//! ```rust,no_run
//! use mvr::GeneralSceneDescription;
//!
//! let description = GeneralSceneDescription::open("show.mvr")?;
//! if let Some(scene) = &description.scene {
//!     for layer in &scene.layers {
//!         let fixtures = layer.child_list.as_ref().map_or(0, |c| c.fixtures.len());
//!         println!("{}: {} fixtures", layer.name, fixtures);
//!     }
//! }
//! # Ok::<(), mvr::MvrError>(())
//! ```
//!
//! ## Writing
//!
//! ```rust,no_run
//! use mvr::{Fixture, GeneralSceneDescriptionWriter, Layer, Scene};
//! use mvr::model::{Address, ChildList};
//!
//! let mut fixture = Fixture::new("Robin 600");
//! fixture.node.gdtf_spec = Some("Robe@Robin600.gdtf".to_string());
//! fixture.node.addresses.address.push(Address::new(1, 1, 1));
//!
//! let mut layer = Layer::new("Main");
//! let mut children = ChildList::new();
//! children.fixtures.push(fixture);
//! layer.child_list = Some(children);
//!
//! let mut scene = Scene::new();
//! scene.layers.push(layer);
//!
//! let mut writer = GeneralSceneDescriptionWriter::new();
//! writer.push_scene(&scene);
//! writer.write("show.mvr")?;
//! # Ok::<(), mvr::MvrError>(())
//! ```
//!
//! ## Leniency
//!
//! Reading is lenient at the field level: a malformed matrix, address or
//! numeric value falls back to its documented default instead of failing the
//! whole file. Only a missing or undecodable scene entry is an error.

pub mod error;
pub mod model;
pub mod reader;
pub mod values;
pub mod writer;
pub mod xml;

mod encoding;

pub use error::MvrError;
pub use model::{
    AuxData, ChildNode, Class, Fixture, FocusPoint, GroupObject, Layer, MappingDefinition,
    Position, Projector, Scene, SceneObject, Support, Symdef, Truss, UserData, VideoScreen,
};
pub use reader::GeneralSceneDescription;
pub use values::{ColorCie, Matrix};
pub use writer::GeneralSceneDescriptionWriter;
