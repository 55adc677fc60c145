//! Central dashboard state: the three collections, the active view
//! criteria and selection, and every mutation operation.
//!
//! Mutations are write-through: the affected collection is saved to the
//! injected store immediately after the in-memory update, so a reload
//! never observes newer in-memory state than what was persisted. A
//! failed save is logged and the session continues on memory.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{self, FieldError};
use crate::io::csv_export::{csv_filename, slug, to_csv, EXPORT_FILE_PREFIX};
use crate::io::csv_import::{parse_csv, ImportOutcome};
use crate::model::{
    Project, ProjectForm, ProjectPatch, User, UserRole, ViewHistory,
};
use crate::stats::{self, Stats};
use crate::store::{self, KeyValueStore};
use crate::view::{view, Selection, ViewCriteria};

/// A rendered CSV download: the suggested filename plus file content.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

pub struct Dashboard<S: KeyValueStore> {
    store: S,
    projects: Vec<Project>,
    users: Vec<User>,
    history: ViewHistory,
    pub criteria: ViewCriteria,
    pub selection: Selection,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Load all three collections from the store, seeding defaults where
    /// nothing usable is persisted.
    pub fn new(store: S) -> Self {
        let projects = store::load_projects(&store);
        let users = store::load_users(&store);
        let history = store::load_history(&store);
        info!(
            projects = projects.len(),
            users = users.len(),
            "dashboard loaded"
        );
        Self {
            store,
            projects,
            users,
            history,
            criteria: ViewCriteria::default(),
            selection: Selection::default(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The filtered, searched and sorted subset under the current
    /// criteria. The selection is reconciled against it so bulk actions
    /// can only ever touch visible rows.
    pub fn visible(&mut self) -> Vec<Project> {
        let visible = view(&self.projects, &self.criteria);
        self.selection.retain_visible(&visible);
        visible
    }

    pub fn summarize(&self) -> Stats {
        stats::summarize(&self.projects)
    }

    pub fn featured(&self, n: usize) -> Vec<&Project> {
        stats::featured(&self.projects, n)
    }

    pub fn sector_suggestions(&self) -> Vec<String> {
        crate::model::sector_suggestions(&self.projects)
    }

    fn persist_projects(&mut self) {
        if let Err(e) = store::save_projects(&mut self.store, &self.projects) {
            warn!(error = %e, "project save failed, continuing in memory");
        }
    }

    fn persist_users(&mut self) {
        if let Err(e) = store::save_users(&mut self.store, &self.users) {
            warn!(error = %e, "user save failed, continuing in memory");
        }
    }

    fn persist_history(&mut self) {
        if let Err(e) = store::save_history(&mut self.store, &self.history) {
            warn!(error = %e, "history save failed, continuing in memory");
        }
    }

    /// Validate and add a project, newest-first. Returns the stored
    /// record, or the per-field errors that blocked it.
    pub fn add_project(
        &mut self,
        form: ProjectForm,
        actor: &str,
    ) -> Result<Project, Vec<FieldError>> {
        let errors = auth::validate_project_form(&form, &self.projects, None);
        if !errors.is_empty() {
            return Err(errors);
        }
        let project = Project::from_form(form, actor);
        self.projects.insert(0, project.clone());
        self.persist_projects();
        Ok(project)
    }

    /// Prepend a batch of already-stamped projects, preserving batch
    /// order. Used by CSV import.
    pub fn bulk_add_projects(&mut self, batch: Vec<Project>) {
        if batch.is_empty() {
            return;
        }
        self.projects.splice(0..0, batch);
        self.persist_projects();
    }

    /// Merge a partial update into the matching record and restamp its
    /// audit trail. A vanished id is a silent no-op.
    pub fn update_project(&mut self, id: Uuid, patch: &ProjectPatch, actor: &str) {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return;
        };
        patch.apply(project);
        project.last_modified_by = actor.to_string();
        project.updated_at = Utc::now();
        self.persist_projects();
    }

    /// Apply one partial update to every matching id, then clear the
    /// selection.
    pub fn bulk_update(&mut self, ids: &[Uuid], patch: &ProjectPatch, actor: &str) {
        let now = Utc::now();
        let mut touched = 0usize;
        for project in self.projects.iter_mut().filter(|p| ids.contains(&p.id)) {
            patch.apply(project);
            project.last_modified_by = actor.to_string();
            project.updated_at = now;
            touched += 1;
        }
        self.selection.clear();
        if touched > 0 {
            self.persist_projects();
        }
    }

    /// Remove a project and purge it from the view history.
    pub fn delete_project(&mut self, id: Uuid) {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return;
        }
        self.history.purge(id);
        self.persist_projects();
        self.persist_history();
    }

    /// Set-based removal; clears the selection afterward.
    pub fn bulk_delete(&mut self, ids: &[Uuid]) {
        let before = self.projects.len();
        self.projects.retain(|p| !ids.contains(&p.id));
        self.selection.clear();
        if self.projects.len() == before {
            return;
        }
        self.history.purge_many(ids);
        self.persist_projects();
        self.persist_history();
    }

    /// Parse an uploaded CSV and absorb its accepted rows. The outcome
    /// carries everything the caller needs to report "accepted of total".
    pub fn import_csv(&mut self, text: &str, actor: &str) -> ImportOutcome {
        let outcome = parse_csv(text, &self.projects, actor);
        if !outcome.accepted.is_empty() {
            self.bulk_add_projects(outcome.accepted.clone());
        }
        outcome
    }

    /// Note that a project was opened. Unknown ids are ignored so stale
    /// links cannot pollute the history.
    pub fn record_view(&mut self, id: Uuid) {
        if !self.projects.iter().any(|p| p.id == id) {
            return;
        }
        self.history.record(id);
        self.persist_history();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    /// Recently viewed projects, most recent first, skipping entries
    /// whose project has since been deleted.
    pub fn recently_viewed(&self) -> Vec<(&Project, DateTime<Utc>)> {
        self.history.resolve(&self.projects)
    }

    pub fn login(&self, username: &str, password: &str) -> Option<&User> {
        auth::login(&self.users, username, password)
    }

    /// Create an account. Username comparison for duplicates ignores
    /// case; both fields are trimmed before storage.
    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, String> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err("Both username and password are required.".to_string());
        }
        let needle = username.trim().to_lowercase();
        if self.users.iter().any(|u| u.username.to_lowercase() == needle) {
            return Err("Username already exists.".to_string());
        }
        let user = User::new(username, password, role);
        self.users.push(user.clone());
        self.persist_users();
        Ok(user)
    }

    /// Delete an account. The seed admin is protected and the call
    /// no-ops for it.
    pub fn delete_user(&mut self, id: Uuid) {
        let Some(user) = self.users.iter().find(|u| u.id == id) else {
            return;
        };
        if user.is_seed_admin() {
            warn!("refusing to delete the seed admin account");
            return;
        }
        self.users.retain(|u| u.id != id);
        self.persist_users();
    }

    pub fn update_user_role(&mut self, id: Uuid, role: UserRole) {
        let Some(user) = self.users.iter_mut().find(|u| u.id == id) else {
            return;
        };
        user.role = role;
        self.persist_users();
    }

    /// Export every project in the system.
    pub fn export_all(&self) -> Option<CsvExport> {
        Self::export(&self.projects, "all_system")
    }

    /// Export the currently selected projects.
    pub fn export_selection(&self) -> Option<CsvExport> {
        let selected: Vec<Project> = self
            .projects
            .iter()
            .filter(|p| self.selection.contains(p.id))
            .cloned()
            .collect();
        Self::export(&selected, "bulk_selected")
    }

    /// Export the current filtered view. A single-row export is named
    /// after the project; anything else uses the generic suffix.
    pub fn export_filtered(&self) -> Option<CsvExport> {
        let visible = view(&self.projects, &self.criteria);
        let suffix = if visible.len() == 1 {
            slug(&visible[0].project_name)
        } else {
            "filtered".to_string()
        };
        Self::export(&visible, &suffix)
    }

    fn export(projects: &[Project], suffix: &str) -> Option<CsvExport> {
        if projects.is_empty() {
            return None;
        }
        Some(CsvExport {
            filename: csv_filename(EXPORT_FILE_PREFIX, suffix),
            content: to_csv(projects),
        })
    }
}
