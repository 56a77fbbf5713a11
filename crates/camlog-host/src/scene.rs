use crate::{Host, HostError, HostResult, ObjectRef};
use anyhow::{Context, Result};
use camlog_base::{BoundingBox, Guid, LengthUnit};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Headless host backed by a JSON scene snapshot.
///
/// The snapshot is written by the upstream CAD system: each object carries its
/// name, selection flag, world bounding box, and the path of the STEP part
/// file the CAD system already exported for it. `part_file` paths are resolved
/// relative to the snapshot file.
#[derive(Debug)]
pub struct SceneHost {
    doc: SceneDoc,
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    units: LengthUnit,
    objects: Vec<SceneObject>,
}

#[derive(Debug, Deserialize)]
struct SceneObject {
    #[serde(default)]
    guid: Guid,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    selected: bool,
    #[serde(default)]
    bbox: Option<BoundingBox>,
    #[serde(default)]
    part_file: Option<PathBuf>,
}

impl SceneHost {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene snapshot {}", path.display()))?;
        let doc: SceneDoc = serde_json::from_str(&text)
            .with_context(|| format!("parse scene snapshot {}", path.display()))?;
        let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        Ok(Self { doc, root })
    }

    fn object(&self, guid: Guid) -> HostResult<&SceneObject> {
        self.doc
            .objects
            .iter()
            .find(|object| object.guid == guid)
            .ok_or(HostError::UnknownObject(guid))
    }
}

impl Host for SceneHost {
    fn units(&self) -> LengthUnit {
        self.doc.units
    }

    fn selection(&self) -> Vec<ObjectRef> {
        self.doc
            .objects
            .iter()
            .filter(|object| object.selected)
            .map(|object| ObjectRef {
                guid: object.guid,
                name: object.name.clone(),
            })
            .collect()
    }

    fn bounding_box(&self, selection: &[ObjectRef]) -> HostResult<BoundingBox> {
        let mut merged: Option<BoundingBox> = None;
        for item in selection {
            let object = self.object(item.guid)?;
            let bbox = object
                .bbox
                .ok_or(HostError::MissingBoundingBox(item.guid))?;
            merged = Some(match merged {
                Some(current) => current.union(&bbox),
                None => bbox,
            });
        }
        merged.ok_or(HostError::EmptySelection)
    }

    fn export_geometry(&self, selection: &[ObjectRef], destination: &Path) -> HostResult<()> {
        let mut sources = BTreeSet::new();
        for item in selection {
            let object = self.object(item.guid)?;
            let part_file = object
                .part_file
                .as_ref()
                .ok_or(HostError::MissingGeometry(item.guid))?;
            sources.insert(self.root.join(part_file));
        }
        if sources.len() > 1 {
            return Err(HostError::MixedGeometrySources(sources.len()));
        }
        let source = sources.pop_first().ok_or(HostError::EmptySelection)?;
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&source, destination)?;
        Ok(())
    }
}
