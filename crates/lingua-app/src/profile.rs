use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lingua_config::Config;
use lingua_config::genai::GOOGLE_AI_PROVIDER;
use lingua_core::language::find_language;

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Resolve the active configuration.
///
/// An explicit path must exist. Otherwise the default profile is used when
/// present, falling back to built-in defaults. Environment variables are
/// applied last in every case.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            read_profile(path)?
        }
        None => {
            let path = Config::default_profile_path();
            if path.exists() {
                tracing::info!("Loading config from {}", path.display());
                read_profile(&path)?
            } else {
                tracing::debug!("No profile at {}, using defaults", path.display());
                Config::new()
            }
        }
    };

    Ok(config.with_env_overrides())
}

/// Reject settings that would otherwise be silently ignored
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    if !config.genai.provider.eq_ignore_ascii_case(GOOGLE_AI_PROVIDER) {
        anyhow::bail!(
            "Unsupported provider \"{}\", only \"{GOOGLE_AI_PROVIDER}\" is available",
            config.genai.provider
        );
    }

    let language = config.ui.target_language.trim();
    if find_language(language).is_none() {
        anyhow::bail!(
            "Unsupported Language: \"{language}\" is not one of the available languages."
        );
    }

    Ok(())
}

/// Write a default profile, refusing to overwrite an existing one
pub fn init_profile(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_profile_path);

    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Never write a key picked up from the environment to disk
    let mut config = Config::new();
    config.genai.api_key.clear();

    fs::write(&path, serde_json::to_string_pretty(&config)?)?;
    tracing::info!("Created profile {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_profile_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ui": { "target_language": "German" } }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.command_queue, 64);
        if std::env::var("LINGUA_TARGET_LANGUAGE").is_err() {
            assert_eq!(config.ui.target_language, "German");
        }
    }

    #[test]
    fn missing_explicit_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.json"))).is_err());
    }

    #[test]
    fn language_and_provider_match_loosely() {
        let mut config = Config::default();
        config.ui.target_language = " mandarin chinese ".to_string();
        config.genai.provider = "GoogleAI".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_target_language_is_rejected() {
        let mut config = Config::default();
        config.ui.target_language = "Klingon".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().starts_with("Unsupported Language"));
        assert!(err.to_string().contains("Klingon"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut config = Config::default();
        config.genai.provider = "openai".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("openai"));
    }

    #[test]
    fn init_writes_once_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        init_profile(Some(&path)).unwrap();
        let written: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.genai.api_key.is_empty());

        assert!(init_profile(Some(&path)).is_err());
    }
}
