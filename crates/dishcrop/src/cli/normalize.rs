//! The `dishcrop normalize` command.

use clap::{Args, ValueEnum};
use dishcrop_core::{Config, NormalizeRecord, OutputFormat, OutputWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the `normalize` command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Photo to normalize
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Output format for the normalize command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Base64 payload only
    Raw,
    /// Crop report plus payload
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Raw => OutputFormat::Raw,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Execute the normalize command.
pub async fn execute(args: NormalizeArgs, config: &Config) -> anyhow::Result<()> {
    let (image, report) = super::normalize_file(&args.input, config).await?;
    tracing::info!(
        "Normalized {} ({}x{}, crop {}+{}+{}) in {}ms",
        report.source,
        report.source_width,
        report.source_height,
        report.crop.size,
        report.crop.x,
        report.crop.y,
        report.elapsed_ms
    );
    let record = NormalizeRecord { report, image };

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = OutputWriter::new(sink, args.format.into(), args.pretty);
    writer.write_record(&record)?;
    writer.flush()?;

    if let Some(path) = &args.output {
        tracing::info!("Payload written to {}", path.display());
    }
    Ok(())
}
