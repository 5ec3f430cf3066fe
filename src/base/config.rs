//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Configuration for the mention responder.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack signing secret (`SLACK_SIGNING_SECRET`).
    pub slack_signing_secret: String,
}

impl Config {
    /// Load from the process environment, over an optional TOML file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        Self::load_from(explicit_path, config::Environment::default())
    }

    /// Load with an explicit environment source.
    pub fn load_from(explicit_path: Option<&std::path::Path>, environment: config::Environment) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        // The Lambda environment wins over any file.
        cfg = cfg.add_source(environment);

        let result = Config::from(cfg.build()?.try_deserialize::<ConfigInner>()?);
        result.validate()?;

        Ok(result)
    }

    pub fn validate(&self) -> Res<()> {
        if self.slack_bot_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack bot token must not be empty."));
        }

        if self.slack_signing_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("Slack signing secret must not be empty."));
        }

        Ok(())
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bot_token: &str, signing_secret: &str) -> Config {
        Config::from(ConfigInner {
            slack_bot_token: bot_token.to_string(),
            slack_signing_secret: signing_secret.to_string(),
        })
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<config::Map<_, _>>();
        config::Environment::default().source(Some(vars))
    }

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mention-responder-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn accepts_complete_config() {
        assert!(config("xoxb-test", "secret").validate().is_ok());
    }

    #[test]
    fn rejects_missing_secrets() {
        assert!(config("", "secret").validate().is_err());
        assert!(config("xoxb-test", "  ").validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let path = temp_config("file", "slack_bot_token = \"xoxb-file\"\nslack_signing_secret = \"file-secret\"\n");

        let config = Config::load_from(Some(&path), environment(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.slack_bot_token, "xoxb-file");
        assert_eq!(config.slack_signing_secret, "file-secret");
    }

    #[test]
    fn loads_unprefixed_environment_variables() {
        let env = environment(&[("SLACK_BOT_TOKEN", "xoxb-env"), ("SLACK_SIGNING_SECRET", "env-secret"), ("PATH", "/usr/bin")]);

        let config = Config::load_from(None, env).unwrap();

        assert_eq!(config.slack_bot_token, "xoxb-env");
        assert_eq!(config.slack_signing_secret, "env-secret");
    }

    #[test]
    fn environment_overrides_file() {
        let path = temp_config("override", "slack_bot_token = \"xoxb-file\"\nslack_signing_secret = \"file-secret\"\n");

        let config = Config::load_from(Some(&path), environment(&[("SLACK_SIGNING_SECRET", "env-secret")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.slack_bot_token, "xoxb-file");
        assert_eq!(config.slack_signing_secret, "env-secret");
    }

    #[test]
    fn missing_environment_is_an_error() {
        assert!(Config::load_from(None, environment(&[("SLACK_BOT_TOKEN", "xoxb-env")])).is_err());
    }
}
