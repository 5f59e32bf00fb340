use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One education entry, as submitted by the caller or produced by the AI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub years: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub years: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub content: String,
}

/// Caller-submitted resume data. Lives only for one pipeline invocation.
/// Every field is defaulted so missing optional sections never fail
/// deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, rename = "customSections", alias = "custom_sections")]
    pub custom_sections: Vec<CustomSection>,
}

/// The structured resume decoded from the AI response. Keys the model omits
/// (summary, customSections) default to empty/absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedResume {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, rename = "customSections", alias = "custom_sections")]
    pub custom_sections: Vec<CustomSection>,
}

/// A persisted resume. `id` and `created_at` are assigned by the store at
/// insert; `user_id`, once set, is never changed by updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub summary: Option<String>,
    pub education: Json<Vec<EducationEntry>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub skills: Json<Vec<String>>,
    #[serde(rename = "customSections")]
    pub custom_sections: Json<Vec<CustomSection>>,
    pub template_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for the persistence gateway.
#[derive(Debug, Clone, Default)]
pub struct NewResume {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub summary: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub custom_sections: Vec<CustomSection>,
    pub template_ref: Option<String>,
}

/// Partial update; absent fields are left untouched. `user_id` is deliberately
/// not patchable — ownership never changes after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub summary: Option<String>,
    pub education: Option<Vec<EducationEntry>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "customSections", alias = "custom_sections")]
    pub custom_sections: Option<Vec<CustomSection>>,
    pub template_ref: Option<String>,
}
