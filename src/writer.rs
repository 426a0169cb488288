//! Writing MVR archives.
//!
//! [`GeneralSceneDescriptionWriter`] builds the root XML document and packs
//! it into a ZIP archive together with any referenced asset files (3D
//! geometry, GDTF fixture types, media).

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::MvrError;
use crate::model::{Scene, UserData};
use crate::reader::SCENE_ENTRY;
use crate::xml::XmlElement;

/// Builder for a `GeneralSceneDescription` archive.
///
/// The scene and user data are pushed as XML into the root document; asset
/// files are queued by path and copied into the archive on [`write`]. The
/// format version defaults to the current one, the provider identity to
/// this library.
///
/// [`write`]: GeneralSceneDescriptionWriter::write
#[derive(Debug)]
pub struct GeneralSceneDescriptionWriter {
    xml_root: XmlElement,
    /// Asset files to pack: (source path on disk, name inside the archive)
    pub files: Vec<(PathBuf, String)>,
}

impl Default for GeneralSceneDescriptionWriter {
    fn default() -> Self {
        let mut xml_root = XmlElement::new("GeneralSceneDescription");
        xml_root.set_attr("verMajor", "1");
        xml_root.set_attr("verMinor", "6");
        xml_root.set_attr("provider", "mvr");
        xml_root.set_attr("providerVersion", env!("CARGO_PKG_VERSION"));
        GeneralSceneDescriptionWriter {
            xml_root,
            files: Vec::new(),
        }
    }
}

impl GeneralSceneDescriptionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the provider identity attributes.
    pub fn set_provider(&mut self, provider: &str, version: &str) {
        self.xml_root.set_attr("provider", provider);
        self.xml_root.set_attr("providerVersion", version);
    }

    /// Append the scene to the root document.
    pub fn push_scene(&mut self, scene: &Scene) {
        self.xml_root.add_child(scene.to_xml());
    }

    /// Append the user data block to the root document.
    pub fn push_user_data(&mut self, user_data: &UserData) {
        self.xml_root.add_child(user_data.to_xml());
    }

    /// Queue an asset file for packing under the given archive name.
    pub fn add_file(&mut self, source: impl Into<PathBuf>, name: impl Into<String>) {
        self.files.push((source.into(), name.into()));
    }

    /// Serialize the document and pack the archive at `path`.
    ///
    /// Queued asset files that no longer exist on disk are skipped with a
    /// warning rather than failing the whole archive.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), MvrError> {
        let path = path.as_ref();
        debug!("writing MVR archive {}", path.display());

        let document = self.xml_root.to_document_bytes()?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut archive = ZipWriter::new(File::create(path)?);
        archive.start_file(SCENE_ENTRY, options)?;
        archive.write_all(&document)?;

        for (source, name) in &self.files {
            let mut file = match File::open(source) {
                Ok(file) => file,
                Err(err) => {
                    warn!("skipping missing asset {}: {err}", source.display());
                    continue;
                }
            };
            archive.start_file(name.as_str(), options)?;
            io::copy(&mut file, &mut archive)?;
        }

        archive.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;
    use crate::reader::GeneralSceneDescription;

    #[test]
    fn written_archive_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.mvr");

        let mut scene = Scene::new();
        scene.layers.push(Layer::new("Main"));

        let mut writer = GeneralSceneDescriptionWriter::new();
        writer.push_scene(&scene);
        writer.write(&path).unwrap();

        let description = GeneralSceneDescription::open(&path).unwrap();
        assert_eq!(description.version_major.as_deref(), Some("1"));
        assert_eq!(description.version_minor.as_deref(), Some("6"));
        assert_eq!(description.provider.as_deref(), Some("mvr"));
        assert_eq!(
            description.provider_version.as_deref(),
            Some(env!("CARGO_PKG_VERSION"))
        );
        assert_eq!(description.scene.unwrap().layers[0].name, "Main");
    }

    #[test]
    fn missing_asset_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.mvr");

        let asset = dir.path().join("model.glb");
        std::fs::write(&asset, b"glTF").unwrap();

        let mut writer = GeneralSceneDescriptionWriter::new();
        writer.push_scene(&Scene::new());
        writer.add_file(&asset, "models/model.glb");
        writer.add_file(dir.path().join("gone.3ds"), "models/gone.3ds");
        writer.write(&path).unwrap();

        let file = File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert!(archive.by_name("models/model.glb").is_ok());
        assert!(matches!(
            archive.by_name("models/gone.3ds"),
            Err(zip::result::ZipError::FileNotFound)
        ));
    }

    #[test]
    fn provider_identity_can_be_overridden() {
        let mut writer = GeneralSceneDescriptionWriter::new();
        writer.set_provider("ConsoleApp", "5.2");
        assert_eq!(writer.xml_root.attr("provider"), Some("ConsoleApp"));
        assert_eq!(writer.xml_root.attr("providerVersion"), Some("5.2"));
    }
}
