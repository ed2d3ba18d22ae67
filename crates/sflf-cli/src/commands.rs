use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use sflf_cli::config::Config;
use sflf_cli::pipeline::{Overrides, PipelineOptions, load_stage, match_stage, process_files};
use sflf_cli::types::RunResult;
use sflf_ingest::SourceFormat;
use sflf_map::Matcher;
use sflf_model::{AuditLog, SFLF_COLUMNS, SFLF_STATUSES, UploadMetadata, Vocabulary};
use sflf_report::{PreviewSummary, build_preview};

use crate::cli::{FormatArg, NormalizeArgs, PreviewArgs};
use crate::summary::{apply_table_style, header_cell};

fn matcher(config: &Config, force_remote: bool) -> Result<Matcher> {
    let dictionary = config.load_dictionary()?;
    config.build_matcher(Arc::new(dictionary), force_remote)
}

fn source_format(format: Option<FormatArg>) -> Option<SourceFormat> {
    format.map(|format| match format {
        FormatArg::Csv => SourceFormat::Csv,
        FormatArg::Spreadsheet => SourceFormat::Spreadsheet,
    })
}

pub fn run_normalize(args: &NormalizeArgs, config: &Config) -> Result<RunResult> {
    let span = info_span!("normalize", files = args.files.len());
    let _guard = span.enter();

    let overrides = Overrides {
        columns: args.map_column.clone(),
        status_column: args.status_column.clone(),
        statuses: args.map_status.clone(),
    };
    overrides.validate()?;
    let matcher = matcher(config, args.remote)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let options = PipelineOptions {
        format: source_format(args.format),
        output_dir: output_dir.clone(),
        metadata: UploadMetadata {
            source: args.source.clone(),
            agency: args.agency.clone(),
            time_period_start: args.period_start,
            time_period_end: args.period_end,
        },
        overrides,
        dry_run: args.dry_run,
    };

    let files = process_files(&args.files, &matcher, &options);
    Ok(RunResult {
        output_dir,
        dry_run: args.dry_run,
        files,
    })
}

pub fn run_preview(args: &PreviewArgs, config: &Config) -> Result<PreviewSummary> {
    let span = info_span!("preview", path = %args.file.display());
    let _guard = span.enter();

    let matcher = matcher(config, args.remote)?;
    let mut audit = AuditLog::new();
    let (table, recovery) = load_stage(&args.file, source_format(args.format), &mut audit)
        .with_context(|| format!("load {}", args.file.display()))?;
    let columns = match_stage(&matcher, &table, &mut audit);
    Ok(build_preview(&table, &recovery, &columns, args.rows))
}

pub fn run_vocabulary() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    for (index, column) in SFLF_COLUMNS.iter().enumerate() {
        table.add_row(vec![(index + 1).to_string(), (*column).to_string()]);
    }
    println!("{table}");

    let mut statuses = Table::new();
    statuses.set_header(vec![header_cell("Status")]);
    apply_table_style(&mut statuses);
    for &status in SFLF_STATUSES {
        let shown = if status.is_empty() { "(empty)" } else { status };
        statuses.add_row(vec![shown]);
    }
    println!("{statuses}");
    Ok(())
}

pub fn run_synonyms(config: &Config) -> Result<()> {
    let dictionary = config.load_dictionary()?;
    for vocabulary in [Vocabulary::Column, Vocabulary::Status] {
        let synonyms = dictionary.table(vocabulary);
        let mut table = Table::new();
        table.set_header(vec![
            header_cell(&format!("Canonical {}", vocabulary.as_str())),
            header_cell("Synonyms"),
        ]);
        apply_table_style(&mut table);
        for (canonical, count) in synonyms.counts() {
            let shown = if canonical.is_empty() { "(empty)" } else { canonical };
            table.add_row(vec![shown.to_string(), count.to_string()]);
        }
        println!("{table}");
        println!("{} {} synonyms loaded", synonyms.len(), vocabulary.as_str());
    }
    Ok(())
}
