//! Reading documents produced by older applications: version 1.5 scenes,
//! legacy address spellings and bare GDTF file names.

use std::fs::File;
use std::io::Write;

use anyhow::Result;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use mvr::model::Address;
use mvr::GeneralSceneDescription;

const SCENE_V1_5: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GeneralSceneDescription verMajor="1" verMinor="5" provider="OldConsole" providerVersion="3.1">
    <Scene>
        <AUXData>
            <Class name="Moving Lights" uuid="B1DD23B6-0156-4E8A-8E11-000000000C01"/>
            <Position name="FOH" uuid="B1DD23B6-0156-4E8A-8E11-000000000P01"/>
        </AUXData>
        <Layers>
            <Layer name="Rig" uuid="B1DD23B6-0156-4E8A-8E11-000000000L01">
                <ChildList>
                    <GroupObject name="Truss 1" uuid="B1DD23B6-0156-4E8A-8E11-000000000G01">
                        <ChildList>
                            <GroupObject name="Cell A" uuid="B1DD23B6-0156-4E8A-8E11-000000000G02">
                                <ChildList>
                                    <Fixture name="Spot 1" uuid="B1DD23B6-0156-4E8A-8E11-000000000F01">
                                        <GDTFSpec>Martin MAC700</GDTFSpec>
                                        <Classing>B1DD23B6-0156-4E8A-8E11-000000000C01</Classing>
                                        <Addresses>
                                            <Address break="1">0</Address>
                                        </Addresses>
                                    </Fixture>
                                    <Fixture name="Spot 2" uuid="B1DD23B6-0156-4E8A-8E11-000000000F02">
                                        <GDTFSpec>Martin MAC700.gdtf</GDTFSpec>
                                        <Addresses>
                                            <Address break="1">2.5</Address>
                                            <Address break="1">513</Address>
                                        </Addresses>
                                    </Fixture>
                                </ChildList>
                            </GroupObject>
                        </ChildList>
                    </GroupObject>
                </ChildList>
            </Layer>
        </Layers>
    </Scene>
</GeneralSceneDescription>"#;

fn pack_scene(xml: &str) -> Result<tempfile::TempDir> {
    let dir = tempdir()?;
    let file = File::create(dir.path().join("legacy.mvr"))?;
    let mut writer = ZipWriter::new(file);
    writer.start_file("GeneralSceneDescription.xml", SimpleFileOptions::default())?;
    writer.write_all(xml.as_bytes())?;
    writer.finish()?;
    Ok(dir)
}

#[test]
fn v1_5_scene_with_nested_groups_parses() -> Result<()> {
    let dir = pack_scene(SCENE_V1_5)?;
    let description = GeneralSceneDescription::open(dir.path().join("legacy.mvr"))?;

    assert_eq!(description.version_minor.as_deref(), Some("5"));
    assert_eq!(description.provider.as_deref(), Some("OldConsole"));

    let scene = description.scene.expect("scene present");
    let aux = scene.aux_data.as_ref().expect("aux data present");
    assert_eq!(aux.classes[0].name, "Moving Lights");
    assert_eq!(aux.classes[0].uuid, "B1DD23B6-0156-4E8A-8E11-000000000C01");
    assert_eq!(aux.positions[0].name, "FOH");

    let layer = &scene.layers[0];
    let outer = &layer.child_list.as_ref().expect("layer children").group_objects[0];
    assert_eq!(outer.name, "Truss 1");
    let inner = &outer.child_list.as_ref().expect("group children").group_objects[0];
    let fixtures = &inner.child_list.as_ref().expect("cell children").fixtures;
    assert_eq!(fixtures.len(), 2);
    assert_eq!(
        fixtures[0].node.classing.as_deref(),
        Some("B1DD23B6-0156-4E8A-8E11-000000000C01")
    );
    Ok(())
}

#[test]
fn legacy_address_spellings_normalize() -> Result<()> {
    let dir = pack_scene(SCENE_V1_5)?;
    let description = GeneralSceneDescription::open(dir.path().join("legacy.mvr"))?;
    let scene = description.scene.expect("scene present");

    let fixtures = scene.layers[0]
        .child_list
        .as_ref()
        .and_then(|c| c.group_objects[0].child_list.as_ref())
        .and_then(|c| c.group_objects[0].child_list.as_ref())
        .map(|c| &c.fixtures)
        .expect("fixtures reachable");

    // "0" means the first address
    assert_eq!(fixtures[0].node.addresses.address[0], Address::new(1, 1, 1));
    // dotted universe.address and the absolute offset forms agree
    assert_eq!(fixtures[1].node.addresses.address[0], Address::new(1, 2, 5));
    assert_eq!(fixtures[1].node.addresses.address[1], Address::new(1, 2, 1));
    Ok(())
}

#[test]
fn bare_gdtf_names_gain_the_suffix() -> Result<()> {
    let dir = pack_scene(SCENE_V1_5)?;
    let description = GeneralSceneDescription::open(dir.path().join("legacy.mvr"))?;
    let scene = description.scene.expect("scene present");

    let fixtures = scene.layers[0]
        .child_list
        .as_ref()
        .and_then(|c| c.group_objects[0].child_list.as_ref())
        .and_then(|c| c.group_objects[0].child_list.as_ref())
        .map(|c| &c.fixtures)
        .expect("fixtures reachable");

    assert_eq!(
        fixtures[0].node.gdtf_spec.as_deref(),
        Some("Martin MAC700.gdtf")
    );
    // already-suffixed names are untouched
    assert_eq!(
        fixtures[1].node.gdtf_spec.as_deref(),
        Some("Martin MAC700.gdtf")
    );
    Ok(())
}
