//! Console output formatter for command results

use colored::Colorize;
use relay_application::ApiError;
use relay_domain::{FanOutResult, Language, Model};
use serde_json::json;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything formatted afterwards
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// Format a fan-out, one section per target in input order
    pub fn format_fan_out(results: &[FanOutResult]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Translations"));
        output.push('\n');

        for result in results {
            let label = Self::target_label(result);
            match (result.content(), result.error()) {
                (Some(content), _) => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        format!("── {} ──", label).yellow().bold(),
                        content
                    ));
                }
                (None, error) => {
                    output.push_str(&format!(
                        "\n{}\n{} {}\n",
                        format!("── {} ──", label).red().bold(),
                        "Error:".red(),
                        error.unwrap_or("Unknown")
                    ));
                }
            }
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        output.push_str(&format!(
            "\n{} {}/{} succeeded\n",
            "Summary:".cyan().bold(),
            succeeded,
            results.len()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format a fan-out as a JSON array
    pub fn format_fan_out_json(results: &[FanOutResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn format_models(models: &[Model]) -> String {
        if models.is_empty() {
            return format!("{}\n", "No chat-capable models found.".yellow());
        }

        let mut output = format!(
            "{} ({})\n",
            "Available models".cyan().bold(),
            models.len()
        );
        for model in models {
            output.push_str(&format!("  * {}\n", model));
        }
        output
    }

    pub fn format_models_json(models: &[Model]) -> String {
        serde_json::to_string_pretty(models).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn format_model_test(model: &Model, ok: bool) -> String {
        if ok {
            format!("{} {}", "OK".green().bold(), model)
        } else {
            format!("{} {}", "FAILED".red().bold(), model)
        }
    }

    pub fn format_model_test_json(model: &Model, ok: bool) -> String {
        json!({ "model": model, "ok": ok }).to_string()
    }

    /// Single generated answer; the text is printed as-is
    pub fn format_reply(content: &str) -> String {
        content.trim_end().to_string()
    }

    pub fn format_reply_json(model: &Model, content: &str) -> String {
        serde_json::to_string_pretty(&json!({ "model": model, "content": content }))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Error line with a hint for errors the user can fix
    pub fn format_api_error(error: &ApiError) -> String {
        let mut output = format!("{} {}", "Error:".red().bold(), error);
        match error {
            ApiError::Configuration(_) => {
                output.push_str(&format!(
                    "\n{}",
                    "Hint: run with --show-config to see which files were loaded.".dimmed()
                ));
            }
            ApiError::Transport { status: 401, .. } => {
                output.push_str(&format!("\n{}", "Hint: check the API key.".dimmed()));
            }
            ApiError::Transport { status: 429, .. } => {
                output.push_str(&format!(
                    "\n{}",
                    "Hint: raise queue.delay_ms to space requests further apart.".dimmed()
                ));
            }
            _ => {}
        }
        output
    }

    fn target_label(result: &FanOutResult) -> String {
        match Language::from_code(result.target.as_str()) {
            Some(language) => language.to_string(),
            None => result.target.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
