use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::Project;

/// Maximum number of recently-viewed entries retained.
pub const HISTORY_CAPACITY: usize = 6;

/// A reference to a recently-viewed project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewedProject {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Most-recently-viewed ring buffer: most-recent-first, de-duplicated,
/// capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHistory(Vec<ViewedProject>);

impl ViewHistory {
    pub fn new(entries: Vec<ViewedProject>) -> Self {
        let mut history = Self(entries);
        history.0.truncate(HISTORY_CAPACITY);
        history
    }

    /// Record a view. An already-present project moves to the front
    /// instead of duplicating; the oldest entry is evicted past capacity.
    pub fn record(&mut self, id: Uuid) {
        self.0.retain(|e| e.id != id);
        self.0.insert(0, ViewedProject { id, timestamp: Utc::now() });
        self.0.truncate(HISTORY_CAPACITY);
    }

    /// Eager cleanup when a project is deleted.
    pub fn purge(&mut self, id: Uuid) {
        self.0.retain(|e| e.id != id);
    }

    pub fn purge_many(&mut self, ids: &[Uuid]) {
        self.0.retain(|e| !ids.contains(&e.id));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn entries(&self) -> &[ViewedProject] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve entries against the live collection, lazily dropping any
    /// that reference a project no longer present.
    pub fn resolve<'a>(&self, projects: &'a [Project]) -> Vec<(&'a Project, DateTime<Utc>)> {
        self.0
            .iter()
            .filter_map(|entry| {
                projects
                    .iter()
                    .find(|p| p.id == entry.id)
                    .map(|p| (p, entry.timestamp))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventh_view_evicts_oldest() {
        let ids: Vec<Uuid> = (0..7).map(|_| Uuid::new_v4()).collect();
        let mut history = ViewHistory::default();
        for id in &ids {
            history.record(*id);
        }
        let kept: Vec<Uuid> = history.entries().iter().map(|e| e.id).collect();
        // Most-recent-first, first view evicted.
        let expected: Vec<Uuid> = ids.iter().rev().take(6).copied().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn repeat_view_moves_to_front_without_duplicating() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut history = ViewHistory::default();
        history.record(a);
        history.record(b);
        history.record(a);
        let kept: Vec<Uuid> = history.entries().iter().map(|e| e.id).collect();
        assert_eq!(kept, vec![a, b]);
    }

    #[test]
    fn purge_removes_matching_entries() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut history = ViewHistory::default();
        history.record(a);
        history.record(b);
        history.purge(a);
        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.entries()[0].id, b);
    }
}
