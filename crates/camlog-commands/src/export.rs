use crate::directive::Directive;
use crate::{CommandError, CommandResult};
use camlog_host::Host;
use camlog_store::{CsvStore, DEFAULT_CSV_NAME, ExportRecord, UpsertOutcome};
use chrono::Utc;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// `ExportToCNC`: export the selection to a STEP file named after the save
/// location's project id and the first selected object, then record the
/// export in the CSV log next to the exported file.
pub struct ExportToCnc {
    save_location: PathBuf,
    csv_name: String,
}

pub struct ExportSummary {
    pub filename: String,
    pub destination: PathBuf,
    pub outcome: UpsertOutcome,
}

impl ExportToCnc {
    pub const NAME: &'static str = "ExportToCNC";

    pub fn new(save_location: impl Into<PathBuf>) -> Self {
        Self {
            save_location: save_location.into(),
            csv_name: DEFAULT_CSV_NAME.to_string(),
        }
    }

    pub fn with_csv_name(mut self, csv_name: impl Into<String>) -> Self {
        self.csv_name = csv_name.into();
        self
    }

    pub fn run(&self, host: &dyn Host, out: &mut dyn Write) -> CommandResult<ExportSummary> {
        let selection = host.selection();
        if selection.is_empty() {
            return Err(CommandError::EmptySelection);
        }

        let directive = Directive::from_save_location(&self.save_location)?;
        let filename = directive.filename_for(&selection[0])?;
        let destination = self.save_location.join(&filename);

        host.export_geometry(&selection, &destination)
            .map_err(CommandError::Export)?;

        let store = CsvStore::new(self.save_location.join(&self.csv_name));
        let outcome = store.upsert(&ExportRecord {
            filename: filename.clone(),
            directory: self.save_location.clone(),
            timestamp: Utc::now(),
        })?;

        info!(
            path = %destination.display(),
            project = directive.project_id(),
            ?outcome,
            "STEP export complete"
        );
        writeln!(
            out,
            "Exported {} objects to {}",
            selection.len(),
            destination.display()
        )?;

        Ok(ExportSummary {
            filename,
            destination,
            outcome,
        })
    }
}
