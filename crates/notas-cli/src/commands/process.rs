//! Process command - show what is extracted from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use notas_core::{format_decimal, Column, Document, Engine, OutputRecord};

use super::batch::write_csv;
use super::{load_config, KindArg, ModeArg, PolicyArg};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input XML file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output granularity
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Document family
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// How sibling ICMS sub-structures of one item combine
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Document header and records as JSON
    Json,
    /// Records as delimited text
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct ProcessOutput<'a> {
    document: &'a Document,
    records: &'a [OutputRecord],
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(mode) = args.mode {
        config.extraction.mode = mode.into();
    }
    if let Some(kind) = args.kind {
        config.extraction.kind = kind.into();
    }
    if let Some(policy) = args.policy {
        config.extraction.icms_policy = policy.into();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let bytes = fs::read(&args.input)?;
    let engine = Engine::new(&config.extraction);
    let extracted = engine
        .extract(&bytes)
        .map_err(|e| anyhow::anyhow!("{}: {}", args.input.display(), e))?;
    let records = engine.assemble(&extracted);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&ProcessOutput {
            document: &extracted.document,
            records: &records,
        })?,
        OutputFormat::Csv => {
            let mut buffer = Vec::new();
            write_csv(
                &mut buffer,
                &records,
                config.output.delimiter_byte()?,
                config.output.include_header,
            )?;
            String::from_utf8(buffer)?
        }
        OutputFormat::Text => format_text(&extracted.document, &records),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_text(document: &Document, records: &[OutputRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {} serie {}\n", document.kind, document.number, document.series));
    output.push_str(&format!("Chave: {}\n", document.access_key));
    output.push_str(&format!("Data: {}\n", document.issue_date));
    if !document.status.is_empty() {
        output.push_str(&format!("Protocolo: {}\n", document.status));
    }
    output.push('\n');

    output.push_str("Emitente:\n");
    output.push_str(&format!("  {} ({})\n", document.issuer.name, document.issuer.tax_id));
    if !document.recipient.tax_id.is_empty() || !document.recipient.name.is_empty() {
        output.push_str("Destinatário:\n");
        output.push_str(&format!("  {} ({})\n", document.recipient.name, document.recipient.tax_id));
    }
    if !document.sender.is_empty() {
        output.push_str("Remetente:\n");
        let sender = &document.sender;
        output.push_str(&format!("  {} ({}) {}\n", sender.name, sender.tax_id, sender.state));
    }
    if !document.ipi_total.is_zero() {
        output.push_str(&format!("IPI: {}\n", format_decimal(document.ipi_total)));
    }
    output.push('\n');

    for record in records {
        output.push_str(&format!(
            "CFOP {:<6} {:<40} total {:>14}  ICMS {:>12}\n",
            record.get(Column::Cfop),
            record.get(Column::Description),
            record.get(Column::LineTotal),
            record.get(Column::IcmsValue)
        ));
    }

    output
}
