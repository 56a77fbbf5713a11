use crate::{CommandError, CommandResult};
use camlog_host::Host;
use std::io::Write;
use tracing::debug;

/// `GetBoundingBoxDimensions`: print the selection's world-aligned bounding
/// box extents as `"x _ y _ z"` in document units.
pub struct BoundingBoxDimensions;

impl BoundingBoxDimensions {
    pub const NAME: &'static str = "GetBoundingBoxDimensions";

    /// Writes the dimension line to `out` and returns it.
    pub fn run(&self, host: &dyn Host, out: &mut dyn Write) -> CommandResult<String> {
        let selection = host.selection();
        if selection.is_empty() {
            return Err(CommandError::EmptySelection);
        }

        let bbox = host.bounding_box(&selection)?;
        let (x, y, z) = bbox.extents();
        let line = format!("{x:.2} _ {y:.2} _ {z:.2}");

        debug!(units = %host.units(), objects = selection.len(), "measured selection");
        writeln!(out, "{line}")?;
        Ok(line)
    }
}
