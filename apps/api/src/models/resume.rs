use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Cosmetic template selection. Affects colours only, never which sections render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimal,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Modern => "modern",
            TemplateType::Classic => "classic",
            TemplateType::Creative => "creative",
            TemplateType::Minimal => "minimal",
        }
    }

    /// Parses the stored lowercase name. Unknown values fall back to `Modern`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "classic" => TemplateType::Classic,
            "creative" => TemplateType::Creative,
            "minimal" => TemplateType::Minimal,
            _ => TemplateType::Modern,
        }
    }
}

/// A user-authored resume. Every content field is optional; absence is data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    /// Comma-separated skill labels, split at render time.
    pub skills: Option<String>,
    #[serde(default)]
    pub template_type: TemplateType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    /// Creates an empty record with fresh timestamps.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            full_name: None,
            email: None,
            phone: None,
            linkedin: None,
            address: None,
            summary: None,
            education: None,
            experience: None,
            projects: None,
            skills: None,
            template_type: TemplateType::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field the input supplies. Fields left as `None` are untouched.
    pub fn apply(&mut self, input: ResumeInput) {
        let ResumeInput {
            full_name,
            email,
            phone,
            linkedin,
            address,
            summary,
            education,
            experience,
            projects,
            skills,
            template_type,
        } = input;

        let assign = |slot: &mut Option<String>, value: Option<String>| {
            if let Some(v) = value {
                *slot = Some(v);
            }
        };
        assign(&mut self.full_name, full_name);
        assign(&mut self.email, email);
        assign(&mut self.phone, phone);
        assign(&mut self.linkedin, linkedin);
        assign(&mut self.address, address);
        assign(&mut self.summary, summary);
        assign(&mut self.education, education);
        assign(&mut self.experience, experience);
        assign(&mut self.projects, projects);
        assign(&mut self.skills, skills);
        if let Some(t) = template_type {
            self.template_type = t;
        }
    }
}

// Upper bounds on free-text fields, in characters.
const MAX_FULL_NAME: usize = 100;
const MAX_PHONE: usize = 20;
const MAX_ADDRESS: usize = 200;
const MAX_SUMMARY: usize = 1000;

/// Create / update payload. Used as a partial patch on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub skills: Option<String>,
    pub template_type: Option<TemplateType>,
}

impl ResumeInput {
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("full_name", self.full_name.as_deref(), MAX_FULL_NAME)?;
        check_len("phone", self.phone.as_deref(), MAX_PHONE)?;
        check_len("address", self.address.as_deref(), MAX_ADDRESS)?;
        check_len("summary", self.summary.as_deref(), MAX_SUMMARY)?;
        Ok(())
    }
}

fn check_len(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// Row shape of the `resumes` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub address: Option<String>,
    pub summary: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub skills: Option<String>,
    pub template_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        ResumeRecord {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            linkedin: row.linkedin,
            address: row.address,
            summary: row.summary,
            education: row.education,
            experience: row.experience,
            projects: row.projects,
            skills: row.skills,
            template_type: TemplateType::from_db(&row.template_type),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
