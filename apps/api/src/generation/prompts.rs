//! Prompt construction for the resume generation call.

use crate::models::resume::{CustomSection, EducationEntry, ExperienceEntry, ResumeInput};

/// Instructs the model to answer with a JSON object using the fixed resume
/// schema. Slots are replaced by `build_resume_prompt`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an AI resume builder. Generate a professional resume in JSON format with:
- name, email, summary
- education (array with degree, university, years)
- experience (array with title, company, years, description)
- skills (array)
- customSections (array of { heading, content })

User Input:
Name: {name}
Email: {email}
Education:
{education}
Experience:
{experience}
Skills: {skills}
Custom Sections:
{custom_sections}"#;

/// Builds the generation prompt. List fields render as labelled,
/// human-readable lines; empty lists become empty segments rather than
/// failing. Name and email appear verbatim.
pub fn build_resume_prompt(input: &ResumeInput) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{name}", &input.name)
        .replace("{email}", &input.email)
        .replace("{education}", &format_education(&input.education))
        .replace("{experience}", &format_experience(&input.experience))
        .replace("{skills}", &input.skills.join(", "))
        .replace(
            "{custom_sections}",
            &format_custom_sections(&input.custom_sections),
        )
}

fn format_education(entries: &[EducationEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            join_labelled(&[
                ("degree", entry.degree.as_str()),
                ("university", entry.university.as_str()),
                ("years", entry.years.as_str()),
            ])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_experience(entries: &[ExperienceEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            join_labelled(&[
                ("title", entry.title.as_str()),
                ("company", entry.company.as_str()),
                ("years", entry.years.as_str()),
                ("description", entry.description.as_str()),
            ])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_custom_sections(sections: &[CustomSection]) -> String {
    sections
        .iter()
        .map(|section| format!("Heading: {}\nContent: {}", section.heading, section.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// "label: value" pairs joined by ", ", skipping empty values.
fn join_labelled(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_name_and_email_verbatim() {
        let input = ResumeInput {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            ..Default::default()
        };

        let prompt = build_resume_prompt(&input);
        assert!(prompt.contains("Jane Doe"));
        assert!(prompt.contains("jane@x.com"));
    }

    #[test]
    fn lists_render_as_labelled_lines() {
        let input = ResumeInput {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            skills: vec!["Go".to_string(), "SQL".to_string()],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                university: "MIT".to_string(),
                years: "2018-2022".to_string(),
            }],
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                years: "2022-2024".to_string(),
                description: "Built things".to_string(),
            }],
            custom_sections: vec![CustomSection {
                heading: "Awards".to_string(),
                content: "Dean's list".to_string(),
            }],
        };

        let prompt = build_resume_prompt(&input);
        assert!(prompt.contains("degree: BSc, university: MIT, years: 2018-2022"));
        assert!(prompt.contains("title: Engineer, company: Acme, years: 2022-2024, description: Built things"));
        assert!(prompt.contains("Skills: Go, SQL"));
        assert!(prompt.contains("Heading: Awards\nContent: Dean's list"));
    }

    #[test]
    fn missing_optional_fields_render_as_empty_segments() {
        let prompt = build_resume_prompt(&ResumeInput::default());
        assert!(!prompt.contains("{education}"));
        assert!(!prompt.contains("{skills}"));
        assert!(prompt.contains("Skills: \n"));
    }

    #[test]
    fn empty_entry_fields_are_skipped() {
        let input = ResumeInput {
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                university: String::new(),
                years: String::new(),
            }],
            ..Default::default()
        };

        let prompt = build_resume_prompt(&input);
        assert!(prompt.contains("degree: BSc\n"));
        assert!(!prompt.contains("university:"));
    }
}
