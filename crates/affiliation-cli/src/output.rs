use std::io::Write;

use affiliation_parsing::AffiliationRecord;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// How records are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON document per line.
    Json,
    /// Indented JSON.
    PrettyJson,
    /// Labelled fields for reading in a terminal.
    Human(ColorMode),
}

/// Write one parsed record.
pub fn print_record(
    w: &mut dyn Write,
    record: &AffiliationRecord,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *w, record)?;
            writeln!(w)?;
        }
        OutputFormat::PrettyJson => {
            serde_json::to_writer_pretty(&mut *w, record)?;
            writeln!(w)?;
        }
        OutputFormat::Human(color) => print_human(w, record, color)?,
    }
    Ok(())
}

/// Write the records split out of one multi-affiliation line. JSON formats
/// emit a single array so line-oriented consumers stay aligned with input.
pub fn print_records(
    w: &mut dyn Write,
    records: &[AffiliationRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *w, records)?;
            writeln!(w)?;
        }
        OutputFormat::PrettyJson => {
            serde_json::to_writer_pretty(&mut *w, records)?;
            writeln!(w)?;
        }
        OutputFormat::Human(color) => {
            for (i, record) in records.iter().enumerate() {
                if color.enabled() {
                    writeln!(w, "{}", format!("[{}]", i + 1).dimmed())?;
                } else {
                    writeln!(w, "[{}]", i + 1)?;
                }
                print_human(w, record, color)?;
            }
        }
    }
    Ok(())
}

fn print_human(w: &mut dyn Write, record: &AffiliationRecord, color: ColorMode) -> std::io::Result<()> {
    let list = |items: &[String]| items.join("; ");
    let fields = [
        ("Institutions", list(&record.institutions)),
        ("Departments", list(&record.departments)),
        ("Location", record.location.clone()),
        ("City", record.us_city.clone()),
        ("State", record.us_state.clone()),
        ("Country", record.country.clone()),
        ("Zip code", record.zipcode.clone()),
        ("Email", record.email.clone()),
    ];

    for (label, value) in &fields {
        let label = format!("{label}:");
        if color.enabled() {
            if value.is_empty() {
                writeln!(w, "  {:<14}{}", label.bold(), "-".dimmed())?;
            } else {
                writeln!(w, "  {:<14}{}", label.bold(), value.green())?;
            }
        } else {
            let value = if value.is_empty() { "-" } else { value.as_str() };
            writeln!(w, "  {label:<14}{value}")?;
        }
    }
    writeln!(w)?;
    Ok(())
}
