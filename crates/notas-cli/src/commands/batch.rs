//! Batch command - convert many NFe/CTe documents into one table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use notas_core::{
    BatchResult, Column, DocumentFailure, Engine, KindSelection, NotasConfig, OutputRecord,
    TableFormat,
};

use super::sources::{expand_inputs, load_sources};
use super::{load_config, KindArg, ModeArg, PolicyArg};

/// Documents handed to the engine per progress step.
const CHUNK_SIZE: usize = 64;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files, directories, glob patterns or ZIP archives
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: <KIND>_Resultado_<YYYYMMDD>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<TableArg>,

    /// Output granularity
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Document family
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// How sibling ICMS sub-structures of one item combine
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// CSV delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Omit the CSV header row
    #[arg(long)]
    no_header: bool,

    /// Process documents one at a time
    #[arg(long)]
    sequential: bool,

    /// Also write the list of skipped documents to this CSV file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Exit with an error when any document was skipped
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TableArg {
    /// Delimited text for spreadsheets
    Csv,
    /// JSON array of labelled records
    Json,
}

impl From<TableArg> for TableFormat {
    fn from(format: TableArg) -> Self {
        match format {
            TableArg::Csv => TableFormat::Csv,
            TableArg::Json => TableFormat::Json,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);

    let paths = expand_inputs(&args.inputs)?;
    if paths.is_empty() {
        anyhow::bail!("No XML or ZIP files found for: {}", args.inputs.join(", "));
    }

    let sources = load_sources(&paths)?;
    if sources.is_empty() {
        anyhow::bail!("No XML documents found in {} input file(s)", paths.len());
    }

    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        sources.len()
    );

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let engine = Engine::new(&config.extraction);
    let mut result = BatchResult::default();
    for chunk in sources.chunks(CHUNK_SIZE) {
        result.extend(engine.process_batch(chunk));
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("Complete");

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(config.extraction.kind, config.output.format));

    let file = File::create(&output_path)?;
    let mut writer = BufWriter::new(file);
    match config.output.format {
        TableFormat::Csv => write_csv(
            &mut writer,
            &result.records,
            config.output.delimiter_byte()?,
            config.output.include_header,
        )?,
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &result.records)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    debug!("Wrote {} records to {}", result.records.len(), output_path.display());

    if let Some(report_path) = &args.report {
        write_report(report_path, &result.failures)?;
        println!(
            "{} Skipped documents written to {}",
            style("✓").green(),
            report_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        result.documents,
        start.elapsed()
    );
    println!(
        "   {} converted, {} skipped, {} rows written to {}",
        style(result.processed()).green(),
        style(result.failures.len()).red(),
        result.records.len(),
        output_path.display()
    );

    if !result.is_complete() {
        println!();
        println!("{}", style("Skipped documents:").red());
        for failure in &result.failures {
            println!("  - {}: {}", failure.name, failure.error);
        }
    }

    if args.strict && !result.is_complete() {
        anyhow::bail!("{} document(s) could not be processed", result.failures.len());
    }

    Ok(())
}

fn apply_overrides(config: &mut NotasConfig, args: &BatchArgs) {
    let extraction = &mut config.extraction;
    if let Some(mode) = args.mode {
        extraction.mode = mode.into();
    }
    if let Some(kind) = args.kind {
        extraction.kind = kind.into();
    }
    if let Some(policy) = args.policy {
        extraction.icms_policy = policy.into();
    }
    if args.sequential {
        extraction.parallel = false;
    }

    let output = &mut config.output;
    if let Some(format) = args.format {
        output.format = format.into();
    }
    if let Some(delimiter) = args.delimiter {
        output.delimiter = delimiter;
    }
    if args.no_header {
        output.include_header = false;
    }
}

/// `<KIND>_Resultado_<YYYYMMDD>.<ext>` in the working directory.
pub fn default_output_name(kind: KindSelection, format: TableFormat) -> PathBuf {
    let prefix = match kind {
        KindSelection::Nfe => "NFe",
        KindSelection::Cte => "CTe",
        KindSelection::Auto => "Documentos",
    };
    let extension = match format {
        TableFormat::Csv => "csv",
        TableFormat::Json => "json",
    };
    PathBuf::from(format!(
        "{}_Resultado_{}.{}",
        prefix,
        Local::now().format("%Y%m%d"),
        extension
    ))
}

/// Write records as delimited text, optionally preceded by the label row.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[OutputRecord],
    delimiter: u8,
    include_header: bool,
) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    if include_header {
        wtr.write_record(Column::labels())?;
    }
    for record in records {
        wtr.write_record(record.values())?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_report(path: &Path, failures: &[DocumentFailure]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["document", "reason"])?;
    for failure in failures {
        wtr.write_record([failure.name.as_str(), failure.error.to_string().as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
