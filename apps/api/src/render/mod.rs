//! Template rendering: resolve a named template and substitute the fixed
//! placeholder set with resume fields.

pub mod template_store;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::resume::{EducationEntry, ExperienceEntry, GeneratedResume};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    NotFound(String),

    #[error("template store unreachable: {0}")]
    Upstream(String),
}

/// Resolves a template identifier to raw HTML text.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, TemplateError>;
}

/// Replaces each placeholder token once, left to right. Tokens absent from
/// the template are no-ops; absent fields substitute as empty strings.
/// Caller- and AI-supplied values are HTML-escaped; the `<br>` separators the
/// renderer itself emits are not.
pub fn fill_template(template: &str, resume: &GeneratedResume) -> String {
    let skills = resume
        .skills
        .iter()
        .map(|skill| escape_html(skill))
        .collect::<Vec<_>>()
        .join(", ");

    let education = resume
        .education
        .iter()
        .map(format_education_entry)
        .collect::<Vec<_>>()
        .join("<br>");

    // Double break between experience entries for visual separation.
    let experience = resume
        .experience
        .iter()
        .map(format_experience_entry)
        .collect::<Vec<_>>()
        .join("<br><br>");

    template
        .replacen("{{name}}", &escape_html(&resume.name), 1)
        .replacen("{{email}}", &escape_html(&resume.email), 1)
        .replacen("{{skills}}", &skills, 1)
        .replacen("{{education}}", &education, 1)
        .replacen("{{experience}}", &experience, 1)
}

fn format_education_entry(entry: &EducationEntry) -> String {
    format!(
        "{} at {} ({})",
        escape_html(&entry.degree),
        escape_html(&entry.university),
        escape_html(&entry.years)
    )
}

fn format_experience_entry(entry: &ExperienceEntry) -> String {
    format!(
        "{} at {} ({}): {}",
        escape_html(&entry.title),
        escape_html(&entry.company),
        escape_html(&entry.years),
        escape_html(&entry.description)
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
