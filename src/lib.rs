//! Data core of an investment-project tracking dashboard.
//!
//! Holds the project, user and recently-viewed collections, persists
//! them through a pluggable key-value store, and provides the derived
//! views a front end renders: filtering/sorting/searching, aggregate
//! statistics, CSV import/export and the public-display slideshow.

pub mod app;
pub mod auth;
pub mod io;
pub mod model;
pub mod slideshow;
pub mod stats;
pub mod store;
pub mod view;

pub use app::{CsvExport, Dashboard};
pub use auth::{login, validate_project_form, FieldError, FormField};
pub use io::csv_export::to_csv;
pub use io::csv_import::{parse_csv, ImportOutcome};
pub use model::{
    InvestmentType, Project, ProjectForm, ProjectPatch, ProjectStage, User, UserRole,
};
pub use slideshow::Slideshow;
pub use stats::{format_currency, format_currency_compact, summarize, Stats};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use view::{SortConfig, SortKey, SortOrder, ViewCriteria};
