use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle stage of an investment project. The variant order is the
/// lifecycle order, so deriving `Ord` gives the pipeline ordering used
/// when sorting by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectStage {
    Initiation,
    #[serde(rename = "MoU Signed")]
    MouSigned,
    #[serde(rename = "Moved to Site")]
    MovedToSite,
    Completed,
}

impl ProjectStage {
    pub const ALL: [ProjectStage; 4] = [
        ProjectStage::Initiation,
        ProjectStage::MouSigned,
        ProjectStage::MovedToSite,
        ProjectStage::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStage::Initiation => "Initiation",
            ProjectStage::MouSigned => "MoU Signed",
            ProjectStage::MovedToSite => "Moved to Site",
            ProjectStage::Completed => "Completed",
        }
    }

    /// Exact label match; anything else is rejected so callers can fall
    /// back to their own default.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.label() == s)
    }

    /// Fixed completion percentage for progress bars and the CSV export.
    /// A static lookup, not computed from data.
    pub fn progress_percent(&self) -> u8 {
        match self {
            ProjectStage::Initiation => 25,
            ProjectStage::MouSigned => 50,
            ProjectStage::MovedToSite => 75,
            ProjectStage::Completed => 100,
        }
    }
}

/// Administrative sub-region (LGA) hosting a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectLocation {
    Keffi,
    Karu,
    Lafia,
    Doma,
    Akwanga,
    Awe,
    Kokona,
    Keana,
    Obi,
    Wamba,
    Nasarawa,
    #[serde(rename = "Nasarawa Eggon")]
    NasarawaEggon,
    Toto,
}

impl ProjectLocation {
    pub const ALL: [ProjectLocation; 13] = [
        ProjectLocation::Keffi,
        ProjectLocation::Karu,
        ProjectLocation::Lafia,
        ProjectLocation::Doma,
        ProjectLocation::Akwanga,
        ProjectLocation::Awe,
        ProjectLocation::Kokona,
        ProjectLocation::Keana,
        ProjectLocation::Obi,
        ProjectLocation::Wamba,
        ProjectLocation::Nasarawa,
        ProjectLocation::NasarawaEggon,
        ProjectLocation::Toto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectLocation::Keffi => "Keffi",
            ProjectLocation::Karu => "Karu",
            ProjectLocation::Lafia => "Lafia",
            ProjectLocation::Doma => "Doma",
            ProjectLocation::Akwanga => "Akwanga",
            ProjectLocation::Awe => "Awe",
            ProjectLocation::Kokona => "Kokona",
            ProjectLocation::Keana => "Keana",
            ProjectLocation::Obi => "Obi",
            ProjectLocation::Wamba => "Wamba",
            ProjectLocation::Nasarawa => "Nasarawa",
            ProjectLocation::NasarawaEggon => "Nasarawa Eggon",
            ProjectLocation::Toto => "Toto",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|loc| loc.label() == s)
    }
}

/// Investment classification: domestic, foreign or mixed capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    #[serde(rename = "DDI")]
    Ddi,
    #[serde(rename = "FDI")]
    Fdi,
    Mixed,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 3] =
        [InvestmentType::Ddi, InvestmentType::Fdi, InvestmentType::Mixed];

    pub fn label(&self) -> &'static str {
        match self {
            InvestmentType::Ddi => "DDI",
            InvestmentType::Fdi => "FDI",
            InvestmentType::Mixed => "Mixed",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == s)
    }
}

/// Sector suggestions offered for autocomplete; the sector field itself is
/// free text and user-extensible.
pub const PREDEFINED_SECTORS: [&str; 13] = [
    "Agriculture",
    "Mining",
    "Energy",
    "ICT & Innovation",
    "Tourism",
    "Commerce & Retail",
    "Real Estate",
    "Healthcare",
    "Education",
    "Manufacturing",
    "Solid Minerals",
    "Transportation",
    "Water Resources",
];

/// A tracked investment project. Field names follow the persisted JSON
/// shape (camelCase) so stored collections stay readable across versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub project_description: String,
    pub focal_person_name: String,
    pub focal_person_phone: String,
    pub focal_person_email: String,
    pub project_stage: ProjectStage,
    pub project_location: ProjectLocation,
    pub project_sub_location: String,
    pub project_sector: String,
    pub jobs_to_be_created: u32,
    pub investment_worth: f64,
    pub investment_type: InvestmentType,
    pub requires_follow_up: bool,
    pub created_by: String,
    pub last_modified_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable subset of a project, as captured by the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub project_name: String,
    pub project_description: String,
    pub focal_person_name: String,
    pub focal_person_phone: String,
    pub focal_person_email: String,
    pub project_stage: ProjectStage,
    pub project_location: ProjectLocation,
    pub project_sub_location: String,
    pub project_sector: String,
    pub jobs_to_be_created: u32,
    pub investment_worth: f64,
    pub investment_type: InvestmentType,
    pub requires_follow_up: bool,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_description: String::new(),
            focal_person_name: String::new(),
            focal_person_phone: String::new(),
            focal_person_email: String::new(),
            project_stage: ProjectStage::Initiation,
            project_location: ProjectLocation::Keffi,
            project_sub_location: String::new(),
            project_sector: String::new(),
            jobs_to_be_created: 0,
            investment_worth: 0.0,
            investment_type: InvestmentType::Ddi,
            requires_follow_up: false,
        }
    }
}

impl Project {
    /// Build a project from form data, stamping a fresh id and the audit
    /// trail for `actor`.
    pub fn from_form(form: ProjectForm, actor: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_name: form.project_name,
            project_description: form.project_description,
            focal_person_name: form.focal_person_name,
            focal_person_phone: form.focal_person_phone,
            focal_person_email: form.focal_person_email,
            project_stage: form.project_stage,
            project_location: form.project_location,
            project_sub_location: form.project_sub_location,
            project_sector: form.project_sector,
            jobs_to_be_created: form.jobs_to_be_created,
            investment_worth: form.investment_worth.max(0.0),
            investment_type: form.investment_type,
            requires_follow_up: form.requires_follow_up,
            created_by: actor.to_string(),
            last_modified_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update merged into an existing project; `None` fields are
/// left untouched. Audit restamping happens at the mutation layer.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub focal_person_name: Option<String>,
    pub focal_person_phone: Option<String>,
    pub focal_person_email: Option<String>,
    pub project_stage: Option<ProjectStage>,
    pub project_location: Option<ProjectLocation>,
    pub project_sub_location: Option<String>,
    pub project_sector: Option<String>,
    pub jobs_to_be_created: Option<u32>,
    pub investment_worth: Option<f64>,
    pub investment_type: Option<InvestmentType>,
    pub requires_follow_up: Option<bool>,
}

impl ProjectPatch {
    pub fn apply(&self, project: &mut Project) {
        if let Some(v) = &self.project_name {
            project.project_name = v.clone();
        }
        if let Some(v) = &self.project_description {
            project.project_description = v.clone();
        }
        if let Some(v) = &self.focal_person_name {
            project.focal_person_name = v.clone();
        }
        if let Some(v) = &self.focal_person_phone {
            project.focal_person_phone = v.clone();
        }
        if let Some(v) = &self.focal_person_email {
            project.focal_person_email = v.clone();
        }
        if let Some(v) = self.project_stage {
            project.project_stage = v;
        }
        if let Some(v) = self.project_location {
            project.project_location = v;
        }
        if let Some(v) = &self.project_sub_location {
            project.project_sub_location = v.clone();
        }
        if let Some(v) = &self.project_sector {
            project.project_sector = v.clone();
        }
        if let Some(v) = self.jobs_to_be_created {
            project.jobs_to_be_created = v;
        }
        if let Some(v) = self.investment_worth {
            project.investment_worth = v.max(0.0);
        }
        if let Some(v) = self.investment_type {
            project.investment_type = v;
        }
        if let Some(v) = self.requires_follow_up {
            project.requires_follow_up = v;
        }
    }
}

/// Merge the predefined sector list with every sector already in use,
/// de-duplicated and sorted, for autocomplete suggestions.
pub fn sector_suggestions(projects: &[Project]) -> Vec<String> {
    let mut merged: Vec<String> = PREDEFINED_SECTORS.iter().map(|s| s.to_string()).collect();
    for p in projects {
        let sector = p.project_sector.trim();
        if !sector.is_empty() && !merged.iter().any(|s| s == &p.project_sector) {
            merged.push(p.project_sector.clone());
        }
    }
    merged.sort();
    merged
}

/// Reference projects seeded when the store holds no project collection.
pub fn seed_projects() -> Vec<Project> {
    let now = Utc::now();
    let seed = |name: &str,
                description: &str,
                focal: (&str, &str, &str),
                stage: ProjectStage,
                location: ProjectLocation,
                sub_location: &str,
                sector: &str,
                jobs: u32,
                worth: f64,
                investment_type: InvestmentType,
                follow_up: bool| Project {
        id: Uuid::new_v4(),
        project_name: name.to_string(),
        project_description: description.to_string(),
        focal_person_name: focal.0.to_string(),
        focal_person_phone: focal.1.to_string(),
        focal_person_email: focal.2.to_string(),
        project_stage: stage,
        project_location: location,
        project_sub_location: sub_location.to_string(),
        project_sector: sector.to_string(),
        jobs_to_be_created: jobs,
        investment_worth: worth,
        investment_type,
        requires_follow_up: follow_up,
        created_by: "system".to_string(),
        last_modified_by: "system".to_string(),
        created_at: now,
        updated_at: now,
    };

    vec![
        seed(
            "Solar Farm Alpha",
            "100MW solar farm development providing clean energy to Keffi and surrounding areas.",
            ("Alice Wonderland", "555-123-4567", "alice@example.com"),
            ProjectStage::Initiation,
            ProjectLocation::Keffi,
            "Keffi GRA Extension",
            "Energy",
            150,
            50_000_000.0,
            InvestmentType::Fdi,
            true,
        ),
        seed(
            "Wind Turbine Project Beta",
            "Regional wind turbine installation focused on renewable power generation in Karu.",
            ("Bob The Builder", "555-987-6543", "bob@example.com"),
            ProjectStage::MouSigned,
            ProjectLocation::Karu,
            "Mararaba Hills",
            "Energy",
            200,
            75_000_000.0,
            InvestmentType::Mixed,
            false,
        ),
        seed(
            "Agri-Processing Hub Gamma",
            "Large scale cassava processing and starch production facility.",
            ("Carol Danvers", "555-111-2222", "carol@example.com"),
            ProjectStage::MovedToSite,
            ProjectLocation::Lafia,
            "Shabu Industrial Area",
            "Agriculture",
            300,
            25_000_000.0,
            InvestmentType::Ddi,
            true,
        ),
    ]
}
