use anyhow::Result;
use camlog_host::{Host, HostError, SceneHost};
use std::fs;

fn write_scene(dir: &std::path::Path, json: &str) -> Result<std::path::PathBuf> {
    let path = dir.join("scene.json");
    fs::write(&path, json)?;
    Ok(path)
}

#[test]
fn selection_and_bounding_box_come_from_the_snapshot() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let scene = write_scene(
        dir.path(),
        r#"{
            "units": "millimeter",
            "objects": [
                {
                    "name": "side_panel",
                    "selected": true,
                    "bbox": {
                        "min": { "x": 0.0, "y": 0.0, "z": 0.0 },
                        "max": { "x": 100.0, "y": 50.0, "z": 18.0 }
                    }
                },
                { "name": "offcut", "selected": false }
            ]
        }"#,
    )?;

    let host = SceneHost::load(&scene)?;
    let selection = host.selection();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].name.as_deref(), Some("side_panel"));

    let bbox = host.bounding_box(&selection)?;
    assert_eq!(bbox.extents(), (100.0, 50.0, 18.0));
    Ok(())
}

#[test]
fn export_copies_the_part_file_to_the_destination() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("parts"))?;
    fs::write(dir.path().join("parts/side_panel.stp"), "ISO-10303-21;")?;
    let scene = write_scene(
        dir.path(),
        r#"{
            "objects": [
                {
                    "name": "side_panel",
                    "selected": true,
                    "part_file": "parts/side_panel.stp"
                }
            ]
        }"#,
    )?;

    let host = SceneHost::load(&scene)?;
    let destination = dir.path().join("out/DM-GDN03-220001_side_panel.stp");
    host.export_geometry(&host.selection(), &destination)?;
    assert_eq!(fs::read_to_string(&destination)?, "ISO-10303-21;");
    Ok(())
}

#[test]
fn export_rejects_selections_spanning_part_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let scene = write_scene(
        dir.path(),
        r#"{
            "objects": [
                { "name": "a", "selected": true, "part_file": "a.stp" },
                { "name": "b", "selected": true, "part_file": "b.stp" }
            ]
        }"#,
    )?;

    let host = SceneHost::load(&scene)?;
    let err = host
        .export_geometry(&host.selection(), &dir.path().join("out.stp"))
        .unwrap_err();
    assert!(matches!(err, HostError::MixedGeometrySources(2)));
    Ok(())
}

#[test]
fn bounding_box_requires_a_box_per_object() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let scene = write_scene(
        dir.path(),
        r#"{ "objects": [ { "name": "wire", "selected": true } ] }"#,
    )?;

    let host = SceneHost::load(&scene)?;
    let err = host.bounding_box(&host.selection()).unwrap_err();
    assert!(matches!(err, HostError::MissingBoundingBox(_)));
    Ok(())
}
