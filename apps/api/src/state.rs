use std::sync::Arc;

use crate::ai_client::TextGenerator;
use crate::auth::IdentityProvider;
use crate::render::TemplateSource;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// External collaborators are trait objects so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub ai: Arc<dyn TextGenerator>,
    pub templates: Arc<dyn TemplateSource>,
    pub identity: Arc<dyn IdentityProvider>,
}
