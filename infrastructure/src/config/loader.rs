//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides; nested keys are split on `__`
pub const ENV_PREFIX: &str = "PROMPT_RELAY_";

const PROJECT_FILES: [&str; 2] = ["prompt-relay.toml", ".prompt-relay.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `PROMPT_RELAY_QUEUE__DELAY_MS=250` sets `queue.delay_ms`
    /// 3. Project root: `./prompt-relay.toml` or `./.prompt-relay.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/prompt-relay/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        Self::figment(
            config_path.map(PathBuf::as_path),
            Path::new("."),
            global.as_deref(),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(explicit: Option<&Path>, project_dir: &Path, global: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::find_project_file(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn find_project_file(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/prompt-relay/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("prompt-relay").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::find_project_file(Path::new("."))
    }

    /// Effective configuration as TOML, with the inline key masked
    pub fn render(config: &FileConfig) -> Result<String, toml::ser::Error> {
        let mut shown = config.clone();
        if let Some(key) = shown.api.api_key.as_mut()
            && !key.is_empty()
        {
            *key = "********".to_string();
        }
        toml::to_string_pretty(&shown)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:^7}] Explicit: {}", path.display());
        }

        let env_keys: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_keys.is_empty() {
            println!("  [       ] Env:      {}*", ENV_PREFIX);
        } else {
            println!("  [ FOUND ] Env:      {}", env_keys.join(", "));
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [ FOUND ] Project:  {}", path.display());
        } else {
            println!("  [       ] Project:  ./prompt-relay.toml or ./.prompt-relay.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [ FOUND ] Global:   {}", path.display());
            } else {
                println!("  [       ] Global:   {}", path.display());
            }
        }

        println!("  [       ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extract(explicit: Option<&Path>, project_dir: &Path, global: Option<&Path>) -> FileConfig {
        ConfigLoader::figment(explicit, project_dir, global)
            .extract()
            .unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.queue.enabled);
        assert_eq!(config.queue.delay_ms, 500);
        assert_eq!(config.api.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("prompt-relay"));
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "[queue]\ndelay_ms = 100\nenabled = false\n").unwrap();
        fs::write(dir.path().join("prompt-relay.toml"), "[queue]\ndelay_ms = 200\n").unwrap();

        let config = extract(None, dir.path(), Some(&global));
        assert_eq!(config.queue.delay_ms, 200);
        assert!(!config.queue.enabled);
    }

    #[test]
    fn test_hidden_project_file_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".prompt-relay.toml"),
            "[api]\nmodel = \"claude-3-haiku\"\n",
        )
        .unwrap();

        let config = extract(None, dir.path(), None);
        assert_eq!(config.api.model.as_str(), "claude-3-haiku");
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("prompt-relay.toml"), "[output]\nformat = \"json\"\n").unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[output]\nformat = \"text\"\ncolor = false\n").unwrap();

        let config = extract(Some(&explicit), dir.path(), None);
        assert_eq!(config.output.format, relay_domain::OutputFormat::Text);
        assert!(!config.output.color);
    }

    #[test]
    fn test_missing_global_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(None, dir.path(), Some(&dir.path().join("nope.toml")));
        assert_eq!(config.api, ConfigLoader::load_defaults().api);
    }

    #[test]
    fn test_render_masks_inline_key() {
        let mut config = FileConfig::default();
        config.api.api_key = Some("sk-secret".to_string());

        let rendered = ConfigLoader::render(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[queue]"));
        assert!(rendered.contains("delay_ms = 500"));
    }
}
