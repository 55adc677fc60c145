//! Field-level reconciliation of persisted records.
//!
//! Stored collections may predate the current schema or carry partial or
//! mistyped fields. Each record is rebuilt field-by-field with named
//! defaults so every loaded entity satisfies the data-model invariants,
//! whatever was persisted.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::model::{
    InvestmentType, Project, ProjectLocation, ProjectStage, User, UserRole, ViewedProject,
};

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn id_field(value: &Value) -> Uuid {
    value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn timestamp_field(value: &Value, key: &str) -> DateTime<Utc> {
    value
        .get(key)
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now)
}

/// Timestamps are stored as ISO-8601 strings; older history entries used
/// epoch milliseconds, so both are accepted.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

pub fn project(value: &Value) -> Project {
    let stage = value
        .get("projectStage")
        .and_then(Value::as_str)
        .and_then(ProjectStage::from_label)
        .unwrap_or(ProjectStage::Initiation);
    let location = value
        .get("projectLocation")
        .and_then(Value::as_str)
        .and_then(ProjectLocation::from_label)
        .unwrap_or(ProjectLocation::Keffi);
    let investment_type = value
        .get("investmentType")
        .and_then(Value::as_str)
        .and_then(InvestmentType::from_label)
        .unwrap_or(InvestmentType::Ddi);
    let jobs = value
        .get("jobsToBeCreated")
        .and_then(Value::as_f64)
        .map(|n| n.max(0.0) as u32)
        .unwrap_or(0);
    let worth = value
        .get("investmentWorth")
        .and_then(Value::as_f64)
        .map(|n| n.max(0.0))
        .unwrap_or(0.0);

    Project {
        id: id_field(value),
        project_name: string_field(value, "projectName", ""),
        project_description: string_field(value, "projectDescription", ""),
        focal_person_name: string_field(value, "focalPersonName", ""),
        focal_person_phone: string_field(value, "focalPersonPhone", ""),
        focal_person_email: string_field(value, "focalPersonEmail", ""),
        project_stage: stage,
        project_location: location,
        project_sub_location: string_field(value, "projectSubLocation", ""),
        project_sector: string_field(value, "projectSector", ""),
        jobs_to_be_created: jobs,
        investment_worth: worth,
        investment_type,
        requires_follow_up: value
            .get("requiresFollowUp")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        created_by: string_field(value, "createdBy", "system"),
        last_modified_by: string_field(value, "lastModifiedBy", "system"),
        created_at: timestamp_field(value, "createdAt"),
        updated_at: timestamp_field(value, "updatedAt"),
    }
}

pub fn user(value: &Value) -> User {
    let role = match value.get("role").and_then(Value::as_str) {
        Some("admin") => UserRole::Admin,
        Some("editor") => UserRole::Editor,
        _ => UserRole::Viewer,
    };
    User {
        id: id_field(value),
        username: string_field(value, "username", ""),
        password: string_field(value, "password", ""),
        role,
        created_at: timestamp_field(value, "createdAt"),
    }
}

/// History entries without a parsable project id carry no information
/// worth keeping.
pub fn history_entry(value: &Value) -> Option<ViewedProject> {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())?;
    let timestamp = value
        .get("timestamp")
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);
    Some(ViewedProject { id, timestamp })
}
