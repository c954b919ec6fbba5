//! Prompt templates for each call-builder

use crate::fanout::language::Language;

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for free-form questions
    pub fn assistant_system() -> &'static str {
        r#"You are a helpful assistant for software engineers.
Answer precisely and concisely. Use code blocks for code."#
    }

    /// System prompt for schema migration generation
    pub fn migration_system(dialect: &str) -> String {
        format!(
            r#"You are a senior database engineer specialised in {dialect}.
Your task is to write a migration script that transforms the old schema into the new schema.
Preserve existing data wherever possible. Output only the SQL script, with short comments
explaining destructive steps. Do not wrap the answer in prose."#
        )
    }

    /// User prompt for schema migration generation
    pub fn migration_prompt(old_schema: &str, new_schema: &str) -> String {
        format!(
            r#"Old schema:
```sql
{old_schema}
```

New schema:
```sql
{new_schema}
```

Write the migration script that upgrades the old schema to the new schema."#
        )
    }

    /// System prompt for translation
    pub fn translation_system(style: &str) -> String {
        format!(
            r#"You are a professional translator.
Translate faithfully, keeping the meaning, formatting and placeholders of the original text.
Use a {style} tone. Reply with the translation only."#
        )
    }

    /// User prompt for translation
    pub fn translation_prompt(text: &str, source: &Language, target: &Language) -> String {
        format!(
            r#"Translate the following text from {} to {}:

{}"#,
            source.name, target.name, text
        )
    }

    /// System prompt for diagram generation
    pub fn diagram_system(kind: &str) -> String {
        format!(
            r#"You are an expert at producing Mermaid diagrams.
Produce a valid Mermaid {kind} diagram for the user's description.
Reply with a single ```mermaid code block and nothing else."#
        )
    }

    /// User prompt for diagram generation
    pub fn diagram_prompt(description: &str) -> String {
        format!(
            r#"Describe the following as a diagram:

{description}"#
        )
    }
}
