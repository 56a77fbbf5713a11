pub mod scene;

pub use scene::SceneHost;

use camlog_base::{BoundingBox, Guid, LengthUnit};
use std::path::Path;
use thiserror::Error;

/// Transient reference to a host-owned object, valid for one command run.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRef {
    pub guid: Guid,
    pub name: Option<String>,
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("selection is empty")]
    EmptySelection,
    #[error("object {0} is not part of the current document")]
    UnknownObject(Guid),
    #[error("object {0} has no bounding box")]
    MissingBoundingBox(Guid),
    #[error("object {0} has no geometry source to export")]
    MissingGeometry(Guid),
    #[error("selection spans {0} geometry sources, export needs exactly one")]
    MixedGeometrySources(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Capabilities the CAD host exposes to commands.
///
/// The host owns the scene graph, the selection, and the actual geometry
/// export; commands only hold [`ObjectRef`]s for the duration of one run.
pub trait Host {
    fn units(&self) -> LengthUnit;

    /// Currently selected objects in pick order.
    fn selection(&self) -> Vec<ObjectRef>;

    /// World-aligned bounding box of the whole selection.
    fn bounding_box(&self, selection: &[ObjectRef]) -> HostResult<BoundingBox>;

    /// Write the selection's geometry as a STEP file at `destination`.
    fn export_geometry(&self, selection: &[ObjectRef], destination: &Path) -> HostResult<()>;
}
