//! Credential checks and project-form validation.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::model::{Project, ProjectForm, User};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static pattern")
    })
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^(\+?\d{1,4}[\s-]?)?(\(?\d{1,5}\)?[\s-]?)?[\d\s-]{5,16}$")
            .expect("static pattern")
    })
}

/// Match the supplied credentials against the user collection. Username
/// comparison ignores case and surrounding whitespace; the password must
/// match exactly.
pub fn login<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    let needle = username.trim().to_lowercase();
    users
        .iter()
        .find(|u| u.username.trim().to_lowercase() == needle && u.password == password)
}

/// Fields of the project entry form that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProjectName,
    ProjectSector,
    FocalPersonName,
    FocalPersonEmail,
    FocalPersonPhone,
}

/// A per-field validation failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Validate a project form against the required-field, format and
/// duplicate-name rules. When editing, `editing_id` exempts the record
/// being edited from the duplicate check. An empty result means the form
/// may be submitted.
pub fn validate_project_form(
    form: &ProjectForm,
    existing: &[Project],
    editing_id: Option<Uuid>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name = form.project_name.trim();
    if name.is_empty() {
        errors.push(FieldError::new(
            FormField::ProjectName,
            "Project Name is required.",
        ));
    } else if form.project_name.len() < 3 {
        errors.push(FieldError::new(
            FormField::ProjectName,
            "Project Name must be at least 3 characters.",
        ));
    } else {
        let needle = name.to_lowercase();
        let duplicate = existing.iter().any(|p| {
            Some(p.id) != editing_id && p.project_name.trim().to_lowercase() == needle
        });
        if duplicate {
            errors.push(FieldError::new(
                FormField::ProjectName,
                "A project with this name already exists.",
            ));
        }
    }

    if form.project_sector.trim().is_empty() {
        errors.push(FieldError::new(
            FormField::ProjectSector,
            "Project Sector is required.",
        ));
    }

    if form.focal_person_name.trim().is_empty() {
        errors.push(FieldError::new(
            FormField::FocalPersonName,
            "Focal Person Name is required.",
        ));
    }

    // Email and phone are optional; only a non-empty value is checked
    // against its format.
    if !form.focal_person_email.is_empty() && !email_re().is_match(&form.focal_person_email) {
        errors.push(FieldError::new(
            FormField::FocalPersonEmail,
            "Please enter a valid email address.",
        ));
    }

    if !form.focal_person_phone.is_empty() && !phone_re().is_match(&form.focal_person_phone) {
        errors.push(FieldError::new(
            FormField::FocalPersonPhone,
            "Invalid phone format.",
        ));
    }

    errors
}
