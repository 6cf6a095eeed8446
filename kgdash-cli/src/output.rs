use crate::error::{CliError, CliResult};
use comfy_table::{ContentArrangement, Table};
use kgdash_panel::{Cell, Record, TableView};

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatKind {
    Json,
    Table,
    Csv,
}

/// Parse a `--format` value.
pub fn parse_format(s: &str) -> CliResult<OutputFormatKind> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormatKind::Json),
        "table" => Ok(OutputFormatKind::Table),
        "csv" => Ok(OutputFormatKind::Csv),
        other => Err(CliError::Usage(format!(
            "unknown output format '{other}'; valid formats: json, table, csv"
        ))),
    }
}

/// Format a result set for display.
pub fn format_result(
    rows: &[Record],
    view: &TableView,
    format: OutputFormatKind,
) -> CliResult<String> {
    match format {
        OutputFormatKind::Json => {
            serde_json::to_string_pretty(rows).map_err(|e| CliError::Input(e.to_string()))
        }
        OutputFormatKind::Table => Ok(format_as_table(view)),
        OutputFormatKind::Csv => Ok(format_as_csv(view)),
    }
}

fn format_as_table(view: &TableView) -> String {
    if view.is_empty() {
        return "(empty result set)".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(&view.columns);

    for row in &view.rows {
        let cells: Vec<String> = row.iter().map(render_cell).collect();
        table.add_row(cells);
    }

    table.to_string()
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        // Terminal link: OSC 8 makes the URL clickable in terminals that
        // support it and degrades to the plain URL everywhere else.
        Cell::Link(url) => hyperlink(url),
        Cell::Text(s) => s.clone(),
    }
}

/// Wrap a URL in an OSC 8 hyperlink escape when color output is enabled.
pub fn hyperlink(url: &str) -> String {
    if colored::control::SHOULD_COLORIZE.should_colorize() {
        format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
    } else {
        url.to_string()
    }
}

fn format_as_csv(view: &TableView) -> String {
    if view.columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::new();
    lines.push(
        view.columns
            .iter()
            .map(|c| csv_escape(c))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in &view.rows {
        lines.push(
            row.iter()
                .map(|cell| csv_escape(cell.text()))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

/// Escape a value for CSV output.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Resolve a server-relative file reference into a full URL.
pub fn absolute_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http") {
        reference.to_string()
    } else {
        format!("{base_url}{reference}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgdash_panel::project_table;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_output_covers_missing_cells() {
        let rows = records(serde_json::json!([
            {"db": "X", "score": 0.9},
            {"db": "Y"}
        ]));
        let view = project_table(&rows);
        let csv = format_as_csv(&view);
        assert_eq!(csv, "db,score\nX,0.9\nY,");
    }

    #[test]
    fn empty_table_has_placeholder() {
        let view = project_table(&[]);
        assert_eq!(format_as_table(&view), "(empty result set)");
    }

    #[test]
    fn unknown_format_is_a_usage_error() {
        assert!(matches!(parse_format("xml"), Err(CliError::Usage(_))));
    }

    #[test]
    fn absolute_url_passthrough_and_join() {
        assert_eq!(
            absolute_url("http://h:5000", "/files/output.ttl"),
            "http://h:5000/files/output.ttl"
        );
        assert_eq!(
            absolute_url("http://h:5000", "http://other/file"),
            "http://other/file"
        );
    }
}
