//! Filter, search and sort pipeline producing the visible project subset.
//!
//! Pure and deterministic: the same collection and criteria always yield
//! the same ordered result. Filters compare exact stored values while
//! free-text search lowercases its haystacks; the asymmetry is
//! intentional, as dropdown values come from already-canonical lists.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::model::{Project, ProjectStage};

/// Sortable columns of the project table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ProjectName,
    ProjectStage,
    InvestmentWorth,
    JobsToBeCreated,
    ProjectLocation,
    ProjectSector,
    UpdatedAt,
    CreatedAt,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Tri-state sort configuration. Repeated toggles on one key cycle
/// ascending, descending, then back to unsorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortConfig {
    pub active: Option<(SortKey, SortOrder)>,
}

impl SortConfig {
    pub fn toggle(&mut self, key: SortKey) {
        self.active = match self.active {
            Some((k, SortOrder::Ascending)) if k == key => Some((key, SortOrder::Descending)),
            Some((k, SortOrder::Descending)) if k == key => None,
            _ => Some((key, SortOrder::Ascending)),
        };
    }
}

/// Criteria driving the view pipeline. `None` filters are the ALL
/// sentinel: no filtering on that dimension.
#[derive(Debug, Clone, Default)]
pub struct ViewCriteria {
    pub stage_filter: Option<ProjectStage>,
    pub sector_filter: Option<String>,
    pub search_term: String,
    pub sort: SortConfig,
}

fn matches_search(project: &Project, needle: &str) -> bool {
    project.project_name.to_lowercase().contains(needle)
        || project.project_description.to_lowercase().contains(needle)
        || project.project_sector.to_lowercase().contains(needle)
        || project.project_location.label().to_lowercase().contains(needle)
        || project.id.to_string().to_lowercase().contains(needle)
}

fn compare(a: &Project, b: &Project, key: SortKey) -> Ordering {
    match key {
        SortKey::ProjectName => a.project_name.cmp(&b.project_name),
        // Lifecycle order, not lexical order.
        SortKey::ProjectStage => a.project_stage.cmp(&b.project_stage),
        SortKey::InvestmentWorth => a
            .investment_worth
            .partial_cmp(&b.investment_worth)
            .unwrap_or(Ordering::Equal),
        SortKey::JobsToBeCreated => a.jobs_to_be_created.cmp(&b.jobs_to_be_created),
        SortKey::ProjectLocation => a.project_location.label().cmp(b.project_location.label()),
        SortKey::ProjectSector => a.project_sector.cmp(&b.project_sector),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Id => a.id.to_string().cmp(&b.id.to_string()),
    }
}

/// Apply stage filter, sector filter, free-text search and sort, in that
/// fixed order. Non-mutating; returns a fresh ordered subset.
pub fn view(projects: &[Project], criteria: &ViewCriteria) -> Vec<Project> {
    let mut result: Vec<Project> = projects
        .iter()
        .filter(|p| {
            criteria
                .stage_filter
                .map_or(true, |stage| p.project_stage == stage)
        })
        .filter(|p| {
            criteria
                .sector_filter
                .as_deref()
                .map_or(true, |sector| p.project_sector == sector)
        })
        .cloned()
        .collect();

    let needle = criteria.search_term.trim().to_lowercase();
    if !needle.is_empty() {
        result.retain(|p| matches_search(p, &needle));
    }

    if let Some((key, order)) = criteria.sort.active {
        result.sort_by(|a, b| {
            let ordering = compare(a, b, key);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    result
}

/// Multi-select state. Downstream bulk operations act on these ids; the
/// set is reconciled against each recomputed view so a hidden project can
/// never stay selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<Uuid>,
}

impl Selection {
    pub fn toggle(&mut self, id: Uuid) {
        if let Some(pos) = self.ids.iter().position(|i| *i == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Add every visible id without disturbing prior selections.
    pub fn select_all(&mut self, visible: &[Project]) {
        for p in visible {
            if !self.ids.contains(&p.id) {
                self.ids.push(p.id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop any selected id no longer present in the visible set.
    pub fn retain_visible(&mut self, visible: &[Project]) {
        self.ids.retain(|id| visible.iter().any(|p| p.id == *id));
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
