use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use tracing::warn;

use crate::model::Project;

/// Byte-order mark prefixed to exports so spreadsheet applications
/// detect UTF-8 correctly.
pub const BOM: char = '\u{feff}';

/// Filename prefix shared by all report downloads.
pub const EXPORT_FILE_PREFIX: &str = "nasida";

const HEADERS: [&str; 19] = [
    "Project ID",
    "Project Name",
    "Description",
    "Progress (%)",
    "Lifecycle Stage",
    "Sector",
    "LGA Location",
    "Sub-Location",
    "Investment Type",
    "Investment Worth ($)",
    "Jobs to be Created",
    "Requires Follow-Up",
    "Focal Person Name",
    "Focal Person Email",
    "Focal Person Phone",
    "Created By",
    "Created Date",
    "Last Modified By",
    "Last Modified Date",
];

/// Embedded line breaks would split a record across lines; flatten them
/// to spaces before quoting.
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Render a worth value the way it was entered: integral amounts without
/// a trailing fraction.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn format_audit_date(dt: DateTime<Utc>) -> String {
    dt.format("%m/%d/%Y %H:%M").to_string()
}

fn write_csv(projects: &[Project], buf: &mut Vec<u8>) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(buf);

    writer.write_record(HEADERS)?;

    let mut total_worth = 0.0;
    let mut total_jobs = 0u64;
    for p in projects {
        total_worth += p.investment_worth;
        total_jobs += u64::from(p.jobs_to_be_created);
        writer.write_record([
            p.id.to_string(),
            flatten(&p.project_name),
            flatten(&p.project_description),
            p.project_stage.progress_percent().to_string(),
            p.project_stage.label().to_string(),
            flatten(&p.project_sector),
            p.project_location.label().to_string(),
            flatten(&p.project_sub_location),
            p.investment_type.label().to_string(),
            format_number(p.investment_worth),
            p.jobs_to_be_created.to_string(),
            if p.requires_follow_up { "YES" } else { "NO" }.to_string(),
            flatten(&p.focal_person_name),
            flatten(&p.focal_person_email),
            flatten(&p.focal_person_phone),
            flatten(&p.created_by),
            format_audit_date(p.created_at),
            flatten(&p.last_modified_by),
            format_audit_date(p.updated_at),
        ])?;
    }

    // Summary footer: label, row count, then the aggregate worth and
    // jobs figures in their own columns.
    let mut total_row = vec![String::new(); HEADERS.len()];
    total_row[0] = "TOTAL".to_string();
    total_row[1] = projects.len().to_string();
    total_row[9] = format_number(total_worth);
    total_row[10] = total_jobs.to_string();
    writer.write_record(&total_row)?;

    writer.flush()?;
    Ok(())
}

/// Serialize projects to the fixed-schema CSV document. Text fields are
/// quoted with internal quotes doubled; numeric fields stay unquoted.
pub fn to_csv(projects: &[Project]) -> String {
    let mut buf = Vec::new();
    if let Err(e) = write_csv(projects, &mut buf) {
        warn!(error = %e, "CSV serialization failed");
    }
    format!("{BOM}{}", String::from_utf8_lossy(&buf))
}

/// Download filename: `{prefix}_{suffix}_report_{ISO-date}.csv`.
pub fn csv_filename(prefix: &str, suffix: &str) -> String {
    format!("{prefix}_{suffix}_report_{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Lowercase a project name and collapse whitespace runs to underscores
/// for use as a filename suffix.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    out
}
