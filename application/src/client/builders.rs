//! Call builders
//!
//! Each builder turns a task into a system/user message pair and sends it
//! through [`ApiClient::call_api`] with the configured model.

use super::api_client::ApiClient;
use crate::ports::llm_gateway::{ApiError, LlmGateway};
use relay_domain::{Language, Message, PromptTemplate};

impl<G: LlmGateway + 'static> ApiClient<G> {
    /// Free-form question. `system` replaces the default assistant prompt.
    pub async fn ask(&self, prompt: &str, system: Option<&str>) -> Result<String, ApiError> {
        let system = system.unwrap_or(PromptTemplate::assistant_system());
        self.call_api(vec![Message::system(system), Message::user(prompt)], None)
            .await
    }

    /// Migration script that upgrades `old_schema` to `new_schema`
    pub async fn generate_migration(
        &self,
        old_schema: &str,
        new_schema: &str,
        dialect: &str,
    ) -> Result<String, ApiError> {
        let messages = vec![
            Message::system(PromptTemplate::migration_system(dialect)),
            Message::user(PromptTemplate::migration_prompt(old_schema, new_schema)),
        ];
        self.call_api(messages, None).await
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
        style: &str,
    ) -> Result<String, ApiError> {
        let messages = vec![
            Message::system(PromptTemplate::translation_system(style)),
            Message::user(PromptTemplate::translation_prompt(text, source, target)),
        ];
        self.call_api(messages, None).await
    }

    /// Mermaid diagram of `kind` (flowchart, sequence, ...) for `description`
    pub async fn generate_diagram(
        &self,
        description: &str,
        kind: &str,
    ) -> Result<String, ApiError> {
        let messages = vec![
            Message::system(PromptTemplate::diagram_system(kind)),
            Message::user(PromptTemplate::diagram_prompt(description)),
        ];
        self.call_api(messages, None).await
    }
}
