use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::model::{InvestmentType, Project, ProjectLocation, ProjectStage};

/// Result of parsing an uploaded CSV batch. Rows either become accepted
/// projects or contribute one aggregated error line; a batch is never
/// rejected wholesale once it has data rows.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub accepted: Vec<Project>,
    pub errors: Vec<String>,
    pub total_rows: usize,
}

const EMPTY_FILE_ERROR: &str = "The file is empty or missing data rows.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Description,
    Stage,
    Sector,
    Location,
    SubLocation,
    Worth,
    Jobs,
    Type,
    FocalName,
    FocalPhone,
    FocalEmail,
    FollowUp,
}

/// Fuzzy header matching on lowercased substrings. Rules are checked in
/// this exact order and the first match wins, so a header like
/// "Investment Type" lands on the worth column; exports pair it with an
/// explicit worth column, which keeps round-trips intact.
fn classify_header(raw: &str) -> Option<Column> {
    let h = raw.trim().to_lowercase();
    if h.contains("name") && h.contains("project") {
        Some(Column::Name)
    } else if h.contains("description") {
        Some(Column::Description)
    } else if h.contains("stage") {
        Some(Column::Stage)
    } else if h.contains("sector") {
        Some(Column::Sector)
    } else if h.contains("location") && !h.contains("sub") {
        Some(Column::Location)
    } else if h.contains("sub-location") || h.contains("sublocation") {
        Some(Column::SubLocation)
    } else if h.contains("worth") || h.contains("investment") {
        Some(Column::Worth)
    } else if h.contains("jobs") {
        Some(Column::Jobs)
    } else if h.contains("type") {
        Some(Column::Type)
    } else if h.contains("focal") && h.contains("name") {
        Some(Column::FocalName)
    } else if h.contains("focal") && h.contains("phone") {
        Some(Column::FocalPhone)
    } else if h.contains("focal") && h.contains("email") {
        Some(Column::FocalEmail)
    } else if h.contains("follow") || h.contains("up") {
        Some(Column::FollowUp)
    } else {
        None
    }
}

/// Parse the leading numeric prefix of a string: "50 jobs" reads as 50,
/// a string with no leading digits as nothing.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    s[..end].parse().ok()
}

fn is_truthy(s: &str) -> bool {
    let v = s.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes"
}

/// Raw per-row field accumulator. Values arrive column by column; an
/// empty cell never overwrites one already captured from an earlier
/// column mapped to the same target.
#[derive(Debug, Default)]
struct RowFields {
    name: Option<String>,
    description: Option<String>,
    stage: Option<String>,
    sector: Option<String>,
    location: Option<String>,
    sub_location: Option<String>,
    worth: Option<f64>,
    jobs: Option<i64>,
    investment_type: Option<String>,
    focal_name: Option<String>,
    focal_phone: Option<String>,
    focal_email: Option<String>,
    follow_up: Option<bool>,
}

impl RowFields {
    fn assign(&mut self, column: Column, value: &str) {
        match column {
            Column::Name => self.name = Some(value.to_string()),
            Column::Description => self.description = Some(value.to_string()),
            Column::Stage => self.stage = Some(value.to_string()),
            Column::Sector => self.sector = Some(value.to_string()),
            Column::Location => self.location = Some(value.to_string()),
            Column::SubLocation => self.sub_location = Some(value.to_string()),
            // Unparsable numerics read as zero rather than failing the row.
            Column::Worth => self.worth = Some(parse_float_prefix(value).unwrap_or(0.0)),
            Column::Jobs => self.jobs = Some(parse_int_prefix(value).unwrap_or(0)),
            Column::Type => self.investment_type = Some(value.to_string()),
            Column::FocalName => self.focal_name = Some(value.to_string()),
            Column::FocalPhone => self.focal_phone = Some(value.to_string()),
            Column::FocalEmail => self.focal_email = Some(value.to_string()),
            Column::FollowUp => self.follow_up = Some(is_truthy(value)),
        }
    }
}

/// Parse an uploaded CSV into new projects attributed to `actor`.
///
/// Validation is per-row: a row missing its name, sector or focal person,
/// or duplicating a name already in `existing` or accepted earlier in the
/// batch, is reported and skipped without affecting its neighbors.
/// Unrecognized stage, location and type values fall back to defaults so
/// loosely prepared spreadsheets still import.
pub fn parse_csv(text: &str, existing: &[Project], actor: &str) -> ImportOutcome {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return ImportOutcome {
            accepted: Vec::new(),
            errors: vec![EMPTY_FILE_ERROR.to_string()],
            total_rows: 0,
        };
    }

    let content = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns: Vec<Option<Column>> = match reader.headers() {
        Ok(headers) => headers.iter().map(classify_header).collect(),
        Err(_) => Vec::new(),
    };

    let now = Utc::now();
    let mut accepted: Vec<Project> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (i, result) in reader.records().enumerate() {
        // Header is line 1, so the first data row reports as row 2.
        let row_number = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Row {row_number}: {e}"));
                continue;
            }
        };

        let mut fields = RowFields::default();
        for (col_idx, value) in record.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            if let Some(Some(column)) = columns.get(col_idx) {
                fields.assign(*column, value);
            }
        }

        let mut row_errors: Vec<String> = Vec::new();
        if fields.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            row_errors.push("Missing Project Name".to_string());
        }
        if fields.sector.as_deref().map_or(true, |s| s.trim().is_empty()) {
            row_errors.push("Missing Project Sector".to_string());
        }
        if fields
            .focal_name
            .as_deref()
            .map_or(true, |f| f.trim().is_empty())
        {
            row_errors.push("Missing Focal Person Name".to_string());
        }

        if let Some(name) = &fields.name {
            let needle = name.trim().to_lowercase();
            let duplicate = existing
                .iter()
                .any(|p| p.project_name.trim().to_lowercase() == needle)
                || accepted
                    .iter()
                    .any(|p| p.project_name.trim().to_lowercase() == needle);
            if duplicate {
                row_errors.push(format!("Duplicate Name: \"{name}\""));
            }
        }

        if !row_errors.is_empty() {
            errors.push(format!("Row {row_number}: {}", row_errors.join(", ")));
            continue;
        }

        let stage = fields
            .stage
            .as_deref()
            .and_then(ProjectStage::from_label)
            .unwrap_or(ProjectStage::Initiation);
        let location = fields
            .location
            .as_deref()
            .and_then(ProjectLocation::from_label)
            .unwrap_or(ProjectLocation::Lafia);
        let investment_type = fields
            .investment_type
            .as_deref()
            .and_then(InvestmentType::from_label)
            .unwrap_or(InvestmentType::Ddi);

        accepted.push(Project {
            id: Uuid::new_v4(),
            project_name: fields.name.unwrap_or_default().trim().to_string(),
            project_description: fields.description.unwrap_or_default(),
            focal_person_name: fields.focal_name.unwrap_or_default().trim().to_string(),
            focal_person_phone: fields.focal_phone.unwrap_or_default(),
            focal_person_email: fields.focal_email.unwrap_or_default(),
            project_stage: stage,
            project_location: location,
            project_sub_location: fields.sub_location.unwrap_or_default(),
            project_sector: fields.sector.unwrap_or_default(),
            jobs_to_be_created: fields.jobs.unwrap_or(0).max(0) as u32,
            investment_worth: fields.worth.unwrap_or(0.0).max(0.0),
            investment_type,
            requires_follow_up: fields.follow_up.unwrap_or(false),
            created_by: actor.to_string(),
            last_modified_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        });
    }

    let total_rows = lines.len() - 1;
    debug!(
        accepted = accepted.len(),
        rejected = errors.len(),
        total_rows,
        "parsed CSV batch"
    );

    ImportOutcome {
        accepted,
        errors,
        total_rows,
    }
}
