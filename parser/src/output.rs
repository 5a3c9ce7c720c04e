//! Output formatting for parse results.

use netscreen_core::{ParseOutput, Record, ResultTree};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a parse result in the requested output format.
pub fn format_output(output: &ParseOutput, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(output)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(output).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(output_to_markdown(output)),
        OutputFormat::Table => Ok(output_to_table(output)),
    }
}

/// Column names across `records`, in first-seen order.
fn columns<'a>(records: &[&'a Record]) -> Vec<&'a str> {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys().map(String::as_str) {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }
    columns
}

fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

fn output_to_markdown(output: &ParseOutput) -> String {
    match output {
        ParseOutput::Tree(tree) => tree_to_markdown(tree),
        ParseOutput::Slots(slots) => {
            let mut out = String::new();
            for (idx, slot) in slots.iter().enumerate() {
                out.push_str(&format!("## Slot {idx}\n\n"));
                out.push_str(&tree_to_markdown(slot));
                out.push('\n');
            }
            out
        }
        ParseOutput::Tokens(lines) => {
            let mut out = String::new();
            for line in lines {
                let tokens: Vec<String> = line.iter().map(|t| format!("`{t}`")).collect();
                out.push_str(&format!("- {}\n", tokens.join(" ")));
            }
            out
        }
    }
}

fn tree_to_markdown(tree: &ResultTree) -> String {
    let records = tree.records();
    let columns = columns(&records);
    if columns.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        columns.iter().map(|c| format!("{}|", "-".repeat(c.len() + 2))).collect::<String>()
    ));
    for record in &records {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| cell(record, column).replace('|', "\\|"))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn output_to_table(output: &ParseOutput) -> String {
    match output {
        ParseOutput::Tree(tree) => tree_to_table(tree),
        ParseOutput::Slots(slots) => {
            let mut out = String::new();
            for (idx, slot) in slots.iter().enumerate() {
                if idx > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("Slot {idx}:\n"));
                out.push_str(&tree_to_table(slot));
            }
            out
        }
        ParseOutput::Tokens(lines) => {
            let mut out = String::new();
            for line in lines {
                out.push_str(&line.join(" "));
                out.push('\n');
            }
            out
        }
    }
}

fn tree_to_table(tree: &ResultTree) -> String {
    let records = tree.records();
    let columns = columns(&records);
    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            records
                .iter()
                .map(|record| cell(record, column).len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: Vec<&str>| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = String::new();
    if columns.is_empty() {
        return out;
    }
    out.push_str(&render(columns.clone()));
    for record in &records {
        out.push_str(&render(
            columns.iter().map(|column| cell(record, column)).collect(),
        ));
    }
    out
}
