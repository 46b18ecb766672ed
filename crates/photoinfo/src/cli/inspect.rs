//! The `photoinfo inspect` command.

use clap::{Args, ValueEnum};
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use photoinfo_core::config::ProcessingConfig;
use photoinfo_core::output::OutputFormat as CoreOutputFormat;
use photoinfo_core::{
    ComprehensivePhotoInfo, Config, DiscoveredFile, ExifTagSource, ExtractOptions, FileDiscovery,
    GroupedExifData, JsonTagSource, MappedExifData, OutputWriter, PhotoInfo, PhotoInfoProcessor,
    PhotoReport, TagSource,
};

/// Arguments for the `inspect` command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Photo files or directories to inspect
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Which view of the metadata to emit
    #[arg(long, value_enum, default_value = "info")]
    pub view: View,

    /// Attach the raw tags to each record (info view)
    #[arg(long)]
    pub include_tags: bool,

    /// Log raw tags and derived records
    #[arg(long)]
    pub debug: bool,

    /// Treat inputs as pre-extracted JSON tag dumps instead of photos
    #[arg(long)]
    pub tags_json: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of photos inspected concurrently (defaults to the configured value)
    #[arg(short, long)]
    pub parallel: Option<usize>,
}

/// Metadata views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Derived record: field of view, GPS, orientation
    Info,
    /// Every mapped tag with display name and formatted value
    Mapped,
    /// Display-ready tags grouped by category
    Grouped,
    /// All three views together
    Comprehensive,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// One photo's data in the requested view.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ViewData {
    Info(Box<PhotoInfo>),
    Mapped(MappedExifData),
    Grouped(GroupedExifData),
    Comprehensive(Box<ComprehensivePhotoInfo>),
}

type Processor = PhotoInfoProcessor<Box<dyn TagSource>>;

/// Execute the inspect command.
pub async fn execute(args: InspectArgs, config: Config) -> anyhow::Result<()> {
    let parallel = args.parallel.unwrap_or(config.processing.parallel_workers);
    if parallel == 0 {
        anyhow::bail!("--parallel must be > 0");
    }
    let format = args
        .format
        .map(CoreOutputFormat::from)
        .unwrap_or_else(|| config.output_format());

    let mut options = config.extract_options();
    options.include_original_tags |= args.include_tags;
    options.debug |= args.debug;

    let discovery = FileDiscovery::new(discovery_config(&config, args.tags_json));
    let inputs: Vec<PathBuf> = args.inputs.iter().map(|p| expand_path(p)).collect();
    let files = discovery.discover_all(&inputs);
    if files.is_empty() {
        anyhow::bail!("No supported files found in {:?}", inputs);
    }
    tracing::info!(
        "Inspecting {} files ({:.1} MB)",
        files.len(),
        FileDiscovery::total_size(&files) as f64 / 1_000_000.0
    );

    let source: Box<dyn TagSource> = if args.tags_json {
        Box::new(JsonTagSource::new())
    } else {
        Box::new(ExifTagSource::new())
    };
    let processor = PhotoInfoProcessor::new(source);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(expand_path(path))?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = OutputWriter::new(sink, format, config.output.pretty);

    let progress = create_progress_bar(files.len() as u64)?;
    let start = Instant::now();

    let mut reports = stream::iter(files.iter())
        .map(|file| inspect_file(&processor, args.view, &options, file))
        .buffered(parallel);

    // JSON needs every record for the array wrapper; JSONL streams.
    let single = files.len() == 1;
    let mut collected = Vec::new();
    while let Some(report) = reports.next().await {
        match format {
            CoreOutputFormat::JsonLines => writer.write(&report)?,
            CoreOutputFormat::Json if single => writer.write(&report)?,
            CoreOutputFormat::Json => collected.push(report),
        }
        progress.inc(1);
    }
    if !collected.is_empty() {
        writer.write_all(&collected)?;
    }
    writer.flush()?;
    progress.finish_and_clear();

    tracing::info!(
        "Inspected {} files in {:.2?}",
        files.len(),
        start.elapsed()
    );
    if let Some(path) = &args.output {
        tracing::info!("Output written to {:?}", path);
    }
    Ok(())
}

async fn inspect_file(
    processor: &Processor,
    view: View,
    options: &ExtractOptions,
    file: &DiscoveredFile,
) -> PhotoReport<ViewData> {
    let path = file.path.as_path();
    let data = match view {
        View::Info => ViewData::Info(Box::new(processor.photo_info(path, options).await)),
        View::Mapped => ViewData::Mapped(processor.mapped_photo_info(path).await),
        View::Grouped => ViewData::Grouped(processor.grouped_photo_info(path).await),
        View::Comprehensive => ViewData::Comprehensive(Box::new(
            processor.comprehensive_photo_info(path, options).await,
        )),
    };
    PhotoReport {
        file_path: file.path.clone(),
        file_size: file.size,
        data,
    }
}

/// Tag dumps are discovered by their `.json` extension.
fn discovery_config(config: &Config, tags_json: bool) -> ProcessingConfig {
    if tags_json {
        ProcessingConfig {
            supported_formats: vec!["json".to_string()],
            ..config.processing.clone()
        }
    } else {
        config.processing.clone()
    }
}

/// Expand a leading `~` in a path.
fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

/// Progress bar on stderr; hidden for a single file.
fn create_progress_bar(total: u64) -> anyhow::Result<indicatif::ProgressBar> {
    use indicatif::{ProgressBar, ProgressStyle};

    if total <= 1 {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )?
            .progress_chars("##-"),
    );
    pb.set_message("inspecting...");
    Ok(pb)
}
