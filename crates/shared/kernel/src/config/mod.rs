use chairside_domain::config::ClientConfig;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "chairside";

/// Prefix of environment overrides (`CHAIRSIDE__API__BASE_URL` -> `api.base_url`).
pub const ENV_PREFIX: &str = "CHAIRSIDE";

/// Custom error type for config loading.
#[chairside_derive::chairside_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file with environment overrides layered on top.
///
/// 1. **Base File**: `path`, or [`DEFAULT_CONFIG`] when `None`. The extension may be omitted;
///    any format the `config` crate understands (TOML, JSON, YAML, ...) is accepted.
/// 2. **Environment Overrides**: variables prefixed with `CHAIRSIDE__`, nested with `__`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, an override is malformed, or the
/// merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use chairside_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

/// `CHAIRSIDE__` overrides; numbers and booleans are parsed so typed fields accept them.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").try_parsing(true)
}

fn load_layered<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// Loads the [`ClientConfig`] from `path`, or returns defaults when no path is given.
///
/// # Errors
/// See [`load_config`].
pub fn load_client_config(path: Option<impl AsRef<Path>>) -> Result<ClientConfig, ConfigError> {
    match path {
        Some(path) => load_config(Some(path)),
        None => Ok(ClientConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_missing_file_is_an_error() {
        let err = load_config::<ClientConfig>(Some("/definitely/not/here/chairside.toml"));
        assert!(matches!(err, Err(ConfigError::Config { context: Some(_), .. })));
    }

    #[test]
    #[serial]
    fn test_file_values_are_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("client.toml");
        fs::write(&path, "[api]\nbase_url = \"https://clinic.example/api\"\n")?;

        let cfg = load_client_config(Some(&path))?;
        assert_eq!(cfg.api.base_url, "https://clinic.example/api");
        assert_eq!(cfg.api.timeout_seconds, 30);
        assert_eq!(cfg.logging.level, "info");
        Ok(())
    }

    fn overrides(vars: &[(&str, &str)]) -> Environment {
        environment().source(Some(
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        ))
    }

    #[test]
    #[serial]
    fn test_env_overrides_typed_fields() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("client.toml");
        fs::write(&path, "[api]\nbase_url = \"https://clinic.example/api\"\n")?;

        let cfg: ClientConfig = load_layered(
            Some(&path),
            overrides(&[
                ("CHAIRSIDE__API__BASE_URL", "https://env.example/api"),
                ("CHAIRSIDE__API__TIMEOUT_SECONDS", "60"),
                ("CHAIRSIDE__LOGGING__LEVEL", "debug"),
                ("CHAIRSIDE__LOGGING__JSON", "true"),
                ("CHAIRSIDE__LOGGING__MAX_FILES", "3"),
            ]),
        )?;

        assert_eq!(cfg.api.base_url, "https://env.example/api");
        assert_eq!(cfg.api.timeout_seconds, 60);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.max_files, 3);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_unrelated_env_vars_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("client.toml");
        fs::write(&path, "[logging]\nmax_files = 5\n")?;

        let cfg: ClientConfig =
            load_layered(Some(&path), overrides(&[("OTHER__API__TIMEOUT_SECONDS", "1")]))?;
        assert_eq!(cfg.api.timeout_seconds, 30);
        assert_eq!(cfg.logging.max_files, 5);
        Ok(())
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let cfg = load_client_config(None::<&Path>).expect("defaults");
        assert_eq!(cfg.api.base_url, "http://localhost:8080/api");
    }
}
