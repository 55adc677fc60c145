pub mod history;
pub mod project;
pub mod user;

pub use history::{ViewHistory, ViewedProject, HISTORY_CAPACITY};
pub use project::{
    sector_suggestions, seed_projects, InvestmentType, Project, ProjectForm, ProjectLocation,
    ProjectPatch, ProjectStage, PREDEFINED_SECTORS,
};
pub use user::{seed_users, User, UserRole, SEED_ADMIN_USERNAME};
