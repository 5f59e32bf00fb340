//! Resume generation — orchestrates the full pipeline.
//!
//! Flow: build prompt → AI call → parse/validate → best-effort persist →
//! fetch template → fill placeholders.
//!
//! Generation succeeding is the primary contract; saving the result is a
//! convenience. A persistence failure is logged and the pipeline still
//! completes, while generation-stage failures fail the request.

use tracing::{info, warn};
use uuid::Uuid;

use crate::ai_client::{Generation, TextGenerator};
use crate::errors::AppError;
use crate::generation::parser::parse_generated_resume;
use crate::generation::prompts::build_resume_prompt;
use crate::models::resume::{NewResume, ResumeInput};
use crate::render::{fill_template, TemplateSource};
use crate::store::ResumeStore;

/// Terminal pipeline outcomes that map to a 200 response.
#[derive(Debug)]
pub enum PipelineOutcome {
    Completed {
        /// Raw AI text, returned alongside the rendered HTML.
        content: String,
        template_html: String,
    },
    /// The AI answered but produced nothing usable (soft failure: the caller
    /// gets a 200 with `success: false`).
    EmptyGeneration,
}

pub async fn generate_resume(
    store: &dyn ResumeStore,
    ai: &dyn TextGenerator,
    templates: &dyn TemplateSource,
    input: &ResumeInput,
    template: &str,
    owner: Option<Uuid>,
) -> Result<PipelineOutcome, AppError> {
    let prompt = build_resume_prompt(input);

    let content = match ai.generate(&prompt).await? {
        Generation::Text(text) => text,
        Generation::Empty => {
            warn!("AI returned an empty generation");
            return Ok(PipelineOutcome::EmptyGeneration);
        }
    };

    let resume = parse_generated_resume(&content)?;

    // Best-effort save, attempted only when the caller supplied an owner.
    if let Some(owner_id) = owner {
        let record = NewResume {
            user_id: Some(owner_id),
            name: resume.name.clone(),
            email: resume.email.clone(),
            summary: resume.summary.clone(),
            education: resume.education.clone(),
            experience: resume.experience.clone(),
            skills: resume.skills.clone(),
            custom_sections: resume.custom_sections.clone(),
            template_ref: Some(template.to_string()),
        };

        match store.create(record).await {
            Ok(saved) => info!("Resume {} saved for owner {owner_id}", saved.id),
            Err(err) => warn!("Could not save resume for owner {owner_id}: {err}"),
        }
    }

    let template_text = templates.fetch(template).await?;
    let template_html = fill_template(&template_text, &resume);

    Ok(PipelineOutcome::Completed {
        content,
        template_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::ai_client::AiError;
    use crate::render::TemplateError;
    use crate::store::memory::MemoryStore;

    enum FakeAi {
        Text(&'static str),
        Empty,
        Unreachable,
    }

    #[async_trait]
    impl TextGenerator for FakeAi {
        async fn generate(&self, _prompt: &str) -> Result<Generation, AiError> {
            match self {
                FakeAi::Text(text) => Ok(Generation::Text(text.to_string())),
                FakeAi::Empty => Ok(Generation::Empty),
                FakeAi::Unreachable => Err(AiError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
            }
        }
    }

    struct FakeTemplates(HashMap<String, String>);

    impl FakeTemplates {
        fn with(name: &str, html: &str) -> Self {
            let mut templates = HashMap::new();
            templates.insert(name.to_string(), html.to_string());
            Self(templates)
        }

        fn empty() -> Self {
            Self(HashMap::new())
        }
    }

    #[async_trait]
    impl TemplateSource for FakeTemplates {
        async fn fetch(&self, name: &str) -> Result<String, TemplateError> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| TemplateError::NotFound(name.to_string()))
        }
    }

    const GENERATED_JSON: &str = r#"```json
{"name": "Jane Doe", "email": "jane@x.com", "summary": "Engineer.", "skills": ["Go", "SQL"]}
```"#;

    fn input() -> ResumeInput {
        ResumeInput {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn completes_and_renders_without_owner() {
        let store = MemoryStore::default();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p><ul>{{skills}}</ul>");

        let outcome = generate_resume(
            &store,
            &FakeAi::Text(GENERATED_JSON),
            &templates,
            &input(),
            "template1.html",
            None,
        )
        .await
        .unwrap();

        match outcome {
            PipelineOutcome::Completed {
                content,
                template_html,
            } => {
                assert!(content.contains("Jane Doe"));
                assert_eq!(template_html, "<p>Jane Doe</p><ul>Go, SQL</ul>");
            }
            other => panic!("expected Completed, got {other:?}"),
        }

        // No owner supplied, so no persistence call was made.
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn saves_generated_fields_for_owner() {
        let store = MemoryStore::default();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p>");
        let owner = Uuid::new_v4();

        generate_resume(
            &store,
            &FakeAi::Text(GENERATED_JSON),
            &templates,
            &input(),
            "template1.html",
            Some(owner),
        )
        .await
        .unwrap();

        assert_eq!(store.row_count(), 1);
        let saved = store.rows().pop().unwrap();
        assert_eq!(saved.user_id, Some(owner));
        assert_eq!(saved.name, "Jane Doe");
        assert_eq!(saved.summary.as_deref(), Some("Engineer."));
        assert_eq!(saved.template_ref.as_deref(), Some("template1.html"));
    }

    #[tokio::test]
    async fn save_failure_still_completes() {
        let store = MemoryStore::failing();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p>");

        let outcome = generate_resume(
            &store,
            &FakeAi::Text(GENERATED_JSON),
            &templates,
            &input(),
            "template1.html",
            Some(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn empty_generation_is_a_soft_failure() {
        let store = MemoryStore::default();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p>");

        let outcome = generate_resume(
            &store,
            &FakeAi::Empty,
            &templates,
            &input(),
            "template1.html",
            Some(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert!(matches!(outcome, PipelineOutcome::EmptyGeneration));
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_ai_is_upstream_unavailable() {
        let store = MemoryStore::default();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p>");

        let err = generate_resume(
            &store,
            &FakeAi::Unreachable,
            &templates,
            &input(),
            "template1.html",
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn prose_output_is_malformed_generation() {
        let store = MemoryStore::default();
        let templates = FakeTemplates::with("template1.html", "<p>{{name}}</p>");

        let err = generate_resume(
            &store,
            &FakeAi::Text("Sure! Here is a resume for Jane."),
            &templates,
            &input(),
            "template1.html",
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedGeneration(_)));
    }

    #[tokio::test]
    async fn unresolvable_template_is_a_hard_failure() {
        let store = MemoryStore::default();

        let err = generate_resume(
            &store,
            &FakeAi::Text(GENERATED_JSON),
            &FakeTemplates::empty(),
            &input(),
            "missing.html",
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::TemplateNotFound(name) if name == "missing.html"));
    }
}
