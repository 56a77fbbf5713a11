pub mod bbox;
pub mod directive;
pub mod export;

pub use bbox::BoundingBoxDimensions;
pub use directive::{Directive, DirectiveError};
pub use export::{ExportSummary, ExportToCnc};

use camlog_host::HostError;
use camlog_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("nothing is selected")]
    EmptySelection,
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    #[error("export failed: {0}")]
    Export(#[source] HostError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("export log update failed: {0}")]
    Store(#[from] StoreError),
    #[error("cannot write command output: {0}")]
    Output(#[from] std::io::Error),
}

pub type CommandResult<T> = std::result::Result<T, CommandError>;
