use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sflf_model::MatchMethod;
use sflf_report::{PreviewSummary, SkipReason};

use sflf_cli::types::{FileOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Mapped"),
        header_cell("Output"),
        header_cell("Statuses"),
        header_cell("Warnings"),
        header_cell("Result"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);

    let mut total_rows = 0usize;
    for report in &result.files {
        let name = report
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.input.display().to_string());
        match &report.outcome {
            Ok(outcome) => {
                total_rows += outcome.rows;
                table.add_row(outcome_row(name, outcome));
            }
            Err(_) => {
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new("FAILED")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                ]);
            }
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(result.failed(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if result.has_errors() {
        eprintln!("Errors:");
        for report in &result.files {
            if let Err(error) = &report.outcome {
                eprintln!("- {}: {error}", report.input.display());
            }
        }
    }
}

fn outcome_row(name: String, outcome: &FileOutcome) -> Vec<Cell> {
    vec![
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
        Cell::new(outcome.rows),
        Cell::new(outcome.source_columns),
        Cell::new(outcome.mapped_columns),
        Cell::new(outcome.output_columns),
        Cell::new(format!(
            "{}/{}",
            outcome.mapped_statuses, outcome.status_values
        )),
        count_cell(outcome.warnings, Color::Yellow),
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
    ]
}

pub fn print_preview(preview: &PreviewSummary) {
    let stats = &preview.statistics;
    println!(
        "{} rows, {} columns ({} mapped, {} unmapped), {} empty rows",
        stats.total_rows,
        stats.total_columns,
        stats.mapped_columns,
        stats.unmapped_columns,
        stats.empty_rows
    );
    if !preview.recovery.is_empty() {
        println!("Recovery:");
        for action in &preview.recovery {
            let marker = if action.is_warning() { "!" } else { "-" };
            println!("  {marker} {action}");
        }
        if stats.guess_conflicts > 0 {
            eprintln!(
                "Warning: {} column(s) matched more than one purpose; check the inferred labels",
                stats.guess_conflicts
            );
        }
    }

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Maps to"),
        header_cell("Confidence"),
        header_cell("Method"),
        header_cell("Values"),
        header_cell("Samples"),
        header_cell("Decision"),
    ]);
    apply_table_style(&mut columns);
    align_column(&mut columns, 2, CellAlignment::Right);
    align_column(&mut columns, 4, CellAlignment::Right);
    for column in &preview.columns {
        columns.add_row(vec![
            Cell::new(&column.original).add_attribute(Attribute::Bold),
            match &column.mapped {
                Some(name) => Cell::new(name).fg(Color::Blue),
                None => dim_cell("-"),
            },
            confidence_cell(column.confidence, column.method),
            Cell::new(column.method),
            Cell::new(column.non_missing),
            Cell::new(column.samples.join(" | ")),
            decision_cell(column.skip_reason.as_ref()),
        ]);
    }
    println!("{columns}");

    if preview.rows.is_empty() {
        return;
    }
    let mut rows = Table::new();
    let mut header = vec![header_cell("#")];
    if let Some(first) = preview.rows.first() {
        header.extend(first.cells.iter().map(|cell| {
            let label = match &cell.mapped {
                Some(mapped) => format!("{}\n→ {mapped}", cell.column),
                None => cell.column.clone(),
            };
            header_cell(&label)
        }));
    }
    rows.set_header(header);
    apply_table_style(&mut rows);
    for row in &preview.rows {
        let mut cells = vec![dim_cell(row.index + 1)];
        cells.extend(row.cells.iter().map(|cell| Cell::new(&cell.value)));
        rows.add_row(cells);
    }
    println!("{rows}");
}

fn confidence_cell(confidence: f32, method: MatchMethod) -> Cell {
    if method == MatchMethod::Unmapped {
        return dim_cell("-");
    }
    let color = if confidence >= 0.9 {
        Color::Green
    } else if confidence >= 0.7 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{confidence:.2}")).fg(color)
}

fn decision_cell(reason: Option<&SkipReason>) -> Cell {
    match reason {
        None => Cell::new("include").fg(Color::Green),
        Some(reason) => Cell::new(format!("skip: {reason}")).fg(Color::DarkGrey),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
