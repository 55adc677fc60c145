//! Aggregation over the project collection: headline totals, per-stage
//! and per-type breakdowns, sector rankings and the featured rotation.
//!
//! Everything here is computed fresh from a project slice. Callers decide
//! whether to pass the full collection or a filtered view.

use crate::model::{InvestmentType, Project, ProjectStage};

/// Aggregated worth and count for a single sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorTotal {
    pub name: String,
    pub count: usize,
    pub total_worth: f64,
}

/// Snapshot of the collection-wide aggregates.
#[derive(Debug, Clone)]
pub struct Stats {
    pub count: usize,
    pub total_worth: f64,
    pub total_jobs: u64,
    /// One entry per lifecycle stage, in lifecycle order, zero-filled.
    pub stage_counts: Vec<(ProjectStage, usize)>,
    /// Descending by total worth; ties keep first-seen order.
    pub sector_totals: Vec<SectorTotal>,
    /// One entry per investment type, zero-filled.
    pub investment_type_totals: Vec<(InvestmentType, f64)>,
}

impl Stats {
    pub fn stage_count(&self, stage: ProjectStage) -> usize {
        self.stage_counts
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn type_total(&self, investment_type: InvestmentType) -> f64 {
        self.investment_type_totals
            .iter()
            .find(|(t, _)| *t == investment_type)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Fraction of projects in `stage`, 0.0 for an empty collection.
    pub fn stage_share(&self, stage: ProjectStage) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.stage_count(stage) as f64 / self.count as f64
        }
    }

    pub fn top_sectors(&self, n: usize) -> &[SectorTotal] {
        &self.sector_totals[..self.sector_totals.len().min(n)]
    }
}

/// Label used for projects whose sector field is blank.
const UNSPECIFIED_SECTOR: &str = "Unspecified";

/// Compute the full aggregate snapshot for a project slice.
pub fn summarize(projects: &[Project]) -> Stats {
    let mut stage_counts: Vec<(ProjectStage, usize)> =
        ProjectStage::ALL.iter().map(|s| (*s, 0)).collect();
    let mut investment_type_totals: Vec<(InvestmentType, f64)> =
        InvestmentType::ALL.iter().map(|t| (*t, 0.0)).collect();
    let mut sector_totals: Vec<SectorTotal> = Vec::new();

    let mut total_worth = 0.0;
    let mut total_jobs = 0u64;

    for p in projects {
        total_worth += p.investment_worth;
        total_jobs += u64::from(p.jobs_to_be_created);

        if let Some(entry) = stage_counts.iter_mut().find(|(s, _)| *s == p.project_stage) {
            entry.1 += 1;
        }
        if let Some(entry) = investment_type_totals
            .iter_mut()
            .find(|(t, _)| *t == p.investment_type)
        {
            entry.1 += p.investment_worth;
        }

        // Sector totals key on the stored string verbatim; only a blank
        // sector is bucketed under the placeholder.
        let name = if p.project_sector.is_empty() {
            UNSPECIFIED_SECTOR
        } else {
            p.project_sector.as_str()
        };
        match sector_totals.iter_mut().find(|s| s.name == name) {
            Some(entry) => {
                entry.count += 1;
                entry.total_worth += p.investment_worth;
            }
            None => sector_totals.push(SectorTotal {
                name: name.to_string(),
                count: 1,
                total_worth: p.investment_worth,
            }),
        }
    }

    sector_totals.sort_by(|a, b| {
        b.total_worth
            .partial_cmp(&a.total_worth)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Stats {
        count: projects.len(),
        total_worth,
        total_jobs,
        stage_counts,
        sector_totals,
        investment_type_totals,
    }
}

/// The `n` most recently modified projects, for rotating showcase panels.
pub fn featured(projects: &[Project], n: usize) -> Vec<&Project> {
    let mut ordered: Vec<&Project> = projects.iter().collect();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    ordered.truncate(n);
    ordered
}

/// Group an amount with thousands separators, no decimals: `$50,000,000`.
pub fn format_currency(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}")
}

/// Abbreviated form for tiles and slides: `$50M`, `$1.5B`, `$750K`.
pub fn format_currency_compact(amount: f64) -> String {
    let amount = amount.max(0.0);
    let (value, suffix) = if amount >= 1_000_000_000.0 {
        (amount / 1_000_000_000.0, "B")
    } else if amount >= 1_000_000.0 {
        (amount / 1_000_000.0, "M")
    } else if amount >= 1_000.0 {
        (amount / 1_000.0, "K")
    } else {
        return format!("${}", amount.round() as u64);
    };
    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("${}{suffix}", rounded.trunc() as u64)
    } else {
        format!("${rounded:.1}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_projects;
    use chrono::Duration;

    #[test]
    fn empty_collection_is_zero_filled() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_worth, 0.0);
        assert_eq!(stats.total_jobs, 0);
        assert_eq!(stats.stage_counts.len(), 4);
        assert!(stats.stage_counts.iter().all(|(_, n)| *n == 0));
        assert_eq!(stats.investment_type_totals.len(), 3);
        assert!(stats.sector_totals.is_empty());
        assert_eq!(stats.stage_share(ProjectStage::Completed), 0.0);
    }

    #[test]
    fn seed_collection_aggregates() {
        let stats = summarize(&seed_projects());
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_worth, 150_000_000.0);
        assert_eq!(stats.total_jobs, 650);
        assert_eq!(stats.stage_count(ProjectStage::Initiation), 1);
        assert_eq!(stats.stage_count(ProjectStage::MouSigned), 1);
        assert_eq!(stats.stage_count(ProjectStage::MovedToSite), 1);
        assert_eq!(stats.stage_count(ProjectStage::Completed), 0);
        assert_eq!(stats.type_total(InvestmentType::Fdi), 50_000_000.0);
        assert_eq!(stats.type_total(InvestmentType::Mixed), 75_000_000.0);
        assert_eq!(stats.type_total(InvestmentType::Ddi), 25_000_000.0);
    }

    #[test]
    fn sector_totals_rank_by_worth() {
        let stats = summarize(&seed_projects());
        assert_eq!(stats.sector_totals.len(), 2);
        assert_eq!(stats.sector_totals[0].name, "Energy");
        assert_eq!(stats.sector_totals[0].count, 2);
        assert_eq!(stats.sector_totals[0].total_worth, 125_000_000.0);
        assert_eq!(stats.sector_totals[1].name, "Agriculture");
        assert_eq!(stats.top_sectors(1).len(), 1);
        assert_eq!(stats.top_sectors(10).len(), 2);
    }

    #[test]
    fn blank_sector_buckets_as_unspecified() {
        let mut projects = seed_projects();
        projects[0].project_sector = String::new();
        let stats = summarize(&projects);
        assert!(stats.sector_totals.iter().any(|s| s.name == "Unspecified"));
    }

    #[test]
    fn stage_counts_stay_in_lifecycle_order() {
        let stats = summarize(&seed_projects());
        let order: Vec<ProjectStage> = stats.stage_counts.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, ProjectStage::ALL.to_vec());
    }

    #[test]
    fn featured_orders_by_most_recent_update() {
        let mut projects = seed_projects();
        projects[0].updated_at += Duration::hours(2);
        projects[2].updated_at += Duration::hours(1);
        let top = featured(&projects, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].project_name, "Solar Farm Alpha");
        assert_eq!(top[1].project_name, "Agri-Processing Hub Gamma");
        assert_eq!(featured(&projects, 10).len(), 3);
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(50_000_000.0), "$50,000,000");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    }

    #[test]
    fn compact_currency_tiers() {
        assert_eq!(format_currency_compact(500.0), "$500");
        assert_eq!(format_currency_compact(750_000.0), "$750K");
        assert_eq!(format_currency_compact(50_000_000.0), "$50M");
        assert_eq!(format_currency_compact(1_500_000_000.0), "$1.5B");
        assert_eq!(format_currency_compact(25_500_000.0), "$25.5M");
    }
}
