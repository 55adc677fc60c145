//! Adapter feeding the tabular report renderer. The renderer itself is
//! an external collaborator; this module only shapes the column headers
//! and pre-formatted row strings it consumes.

use chrono::Utc;

use crate::model::Project;
use crate::stats::format_currency;

/// Title printed above the report table.
pub const REPORT_TITLE: &str = "NASIDA Projects Report";

/// Fixed summary columns of the tabular report.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Project Name",
    "Stage",
    "Location",
    "Investment Worth ($)",
    "Jobs Created",
    "Modified By",
];

/// One pre-formatted row per project, column order matching
/// [`REPORT_COLUMNS`].
pub fn report_rows(projects: &[Project]) -> Vec<Vec<String>> {
    projects
        .iter()
        .map(|p| {
            vec![
                p.project_name.clone(),
                p.project_stage.label().to_string(),
                p.project_location.label().to_string(),
                format_currency(p.investment_worth),
                p.jobs_to_be_created.to_string(),
                p.last_modified_by.clone(),
            ]
        })
        .collect()
}

/// Download filename: `{prefix}_report_{epoch-ms}.pdf`.
pub fn pdf_filename(prefix: &str) -> String {
    format!("{prefix}_report_{}.pdf", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_projects;

    #[test]
    fn rows_match_column_count_and_formatting() {
        let rows = report_rows(&seed_projects());
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.len(), REPORT_COLUMNS.len());
        }
        assert_eq!(rows[0][0], "Solar Farm Alpha");
        assert_eq!(rows[0][3], "$50,000,000");
        assert_eq!(rows[1][1], "MoU Signed");
        assert_eq!(rows[2][4], "300");
    }

    #[test]
    fn pdf_filename_embeds_epoch_millis() {
        let name = pdf_filename("nasida");
        assert!(name.starts_with("nasida_report_"));
        assert!(name.ends_with(".pdf"));
        let stamp = name
            .trim_start_matches("nasida_report_")
            .trim_end_matches(".pdf");
        assert!(stamp.parse::<i64>().is_ok());
    }
}
