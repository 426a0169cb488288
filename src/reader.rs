//! Reading MVR archives.
//!
//! An MVR file is a ZIP archive whose root entry
//! `GeneralSceneDescription.xml` carries the scene. [`GeneralSceneDescription`]
//! opens the archive, decodes that entry and constructs the typed model;
//! other entries (geometry files, GDTF fixture types, media) stay in the
//! archive and are addressed by the file names the scene references.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::MvrError;
use crate::model::{Scene, UserData};
use crate::xml::XmlElement;

/// Name of the scene entry inside the archive.
pub(crate) const SCENE_ENTRY: &str = "GeneralSceneDescription.xml";

/// A parsed `GeneralSceneDescription` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralSceneDescription {
    /// Major format version (`verMajor` attribute)
    pub version_major: Option<String>,
    /// Minor format version (`verMinor` attribute)
    pub version_minor: Option<String>,
    /// Application that produced the file (`provider` attribute)
    pub provider: Option<String>,
    /// Version of the producing application (`providerVersion` attribute)
    pub provider_version: Option<String>,
    pub scene: Option<Scene>,
    pub user_data: Option<UserData>,
}

impl GeneralSceneDescription {
    /// Open an MVR archive and parse its scene description.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MvrError> {
        let path = path.as_ref();
        debug!("opening MVR archive {}", path.display());

        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let mut entry = match archive.by_name(SCENE_ENTRY) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(MvrError::MissingEntry {
                    archive: PathBuf::from(path),
                    entry: SCENE_ENTRY.to_string(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;

        let xml = std::str::from_utf8(&bytes)
            .map_err(|err| MvrError::InvalidDocument(format!("scene entry is not UTF-8: {err}")))?;

        // some producers pad the entry with trailing NUL bytes
        let trimmed = xml.trim_end_matches('\0');
        if trimmed.len() != xml.len() {
            warn!(
                "{}: stripped {} trailing NUL bytes from scene entry",
                path.display(),
                xml.len() - trimmed.len()
            );
        }

        Self::from_xml_str(trimmed)
    }

    /// Parse a scene description from its XML text.
    pub fn from_xml_str(xml: &str) -> Result<Self, MvrError> {
        let root = XmlElement::parse(xml)?;
        if root.tag != "GeneralSceneDescription" {
            return Err(MvrError::InvalidDocument(format!(
                "unexpected root element <{}>",
                root.tag
            )));
        }
        Ok(Self::from_xml(&root))
    }

    fn from_xml(root: &XmlElement) -> Self {
        GeneralSceneDescription {
            version_major: root.attr("verMajor").map(String::from),
            version_minor: root.attr("verMinor").map(String::from),
            provider: root.attr("provider").map(String::from),
            provider_version: root.attr("providerVersion").map(String::from),
            scene: root.find("Scene").map(Scene::from_xml),
            user_data: root.find("UserData").map(UserData::from_xml),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_version_attributes_and_scene() {
        let description = GeneralSceneDescription::from_xml_str(
            r#"<GeneralSceneDescription verMajor="1" verMinor="6" provider="mvr" providerVersion="0.1.0">
                <Scene>
                    <Layers>
                        <Layer name="Main" uuid="u-1"/>
                    </Layers>
                </Scene>
            </GeneralSceneDescription>"#,
        )
        .unwrap();

        assert_eq!(description.version_major.as_deref(), Some("1"));
        assert_eq!(description.version_minor.as_deref(), Some("6"));
        assert_eq!(description.provider.as_deref(), Some("mvr"));
        let scene = description.scene.unwrap();
        assert_eq!(scene.layers.len(), 1);
        assert_eq!(scene.layers[0].name, "Main");
    }

    #[test]
    fn rejects_wrong_root_element() {
        let err = GeneralSceneDescription::from_xml_str("<Scene/>").unwrap_err();
        assert!(matches!(err, MvrError::InvalidDocument(_)));
    }

    #[test]
    fn missing_version_attributes_read_as_none() {
        let description =
            GeneralSceneDescription::from_xml_str("<GeneralSceneDescription/>").unwrap();
        assert_eq!(description.version_major, None);
        assert_eq!(description.scene, None);
        assert_eq!(description.user_data, None);
    }

    #[test]
    fn open_rejects_archive_without_scene_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mvr");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("other.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"not a scene").unwrap();
        writer.finish().unwrap();

        let err = GeneralSceneDescription::open(&path).unwrap_err();
        assert!(matches!(err, MvrError::MissingEntry { entry, .. } if entry == SCENE_ENTRY));
    }
}
