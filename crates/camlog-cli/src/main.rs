use anyhow::{Context, Result};
use camlog_commands::{BoundingBoxDimensions, ExportToCnc};
use camlog_host::SceneHost;
use camlog_store::DEFAULT_CSV_NAME;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "camlog")]
#[command(about = "CNC hand-off commands for CAD scene snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the scene selection to a STEP file and record it in the job log
    Export(ExportArgs),
    /// Print the selection's bounding box dimensions
    Dimensions(DimensionsArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Scene snapshot written by the CAD system
    #[arg(long)]
    scene: PathBuf,
    /// Job folder; its path must carry the DM-XXX00-000000 project id
    #[arg(long)]
    save_location: PathBuf,
    /// Name of the CSV log inside the job folder
    #[arg(long, default_value = DEFAULT_CSV_NAME)]
    csv_name: String,
}

#[derive(Args)]
struct DimensionsArgs {
    /// Scene snapshot written by the CAD system
    #[arg(long)]
    scene: PathBuf,
    /// Also copy the dimension line to the system clipboard
    #[arg(long)]
    copy: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Export(args) => run_export(args),
        Command::Dimensions(args) => run_dimensions(args),
    }
}

fn run_export(args: ExportArgs) -> Result<()> {
    let host = SceneHost::load(&args.scene)?;
    let command = ExportToCnc::new(&args.save_location).with_csv_name(args.csv_name);

    let mut stdout = std::io::stdout();
    let summary = command
        .run(&host, &mut stdout)
        .with_context(|| format!("{} failed", ExportToCnc::NAME))?;
    info!(file = %summary.filename, "export recorded");
    Ok(())
}

fn run_dimensions(args: DimensionsArgs) -> Result<()> {
    let host = SceneHost::load(&args.scene)?;

    let mut stdout = std::io::stdout();
    let line = BoundingBoxDimensions
        .run(&host, &mut stdout)
        .with_context(|| format!("{} failed", BoundingBoxDimensions::NAME))?;

    if args.copy {
        copy_to_clipboard(&line)?;
        println!("Copied to clipboard: {line}");
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard is unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("cannot write to clipboard")?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
