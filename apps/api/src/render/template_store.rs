use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::render::{TemplateError, TemplateSource};

/// Fetches raw template HTML from the template store by name:
/// `GET {base_url}/{name}`. A 404 means the identifier is unresolvable;
/// anything else that fails is an upstream problem.
pub struct HttpTemplateStore {
    client: Client,
    base_url: String,
}

impl HttpTemplateStore {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateStore {
    async fn fetch(&self, name: &str) -> Result<String, TemplateError> {
        let response = self
            .client
            .get(self.url_for(name))
            .send()
            .await
            .map_err(|err| TemplateError::Upstream(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(TemplateError::Upstream(format!(
                "template store returned {status} for '{name}'"
            )));
        }

        response
            .text()
            .await
            .map_err(|err| TemplateError::Upstream(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_name() {
        let store = HttpTemplateStore::new("https://static.example.com/templates/".to_string());
        assert_eq!(
            store.url_for("template1.html"),
            "https://static.example.com/templates/template1.html"
        );

        let no_slash = HttpTemplateStore::new("https://static.example.com/templates".to_string());
        assert_eq!(
            no_slash.url_for("template1.html"),
            "https://static.example.com/templates/template1.html"
        );
    }
}
