use std::{
    fs,
    path::PathBuf,
    sync::{LazyLock, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Statement builder configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Compile after every builder call so bindings can be inspected before
    /// execution. Compiled statements are logged at debug level.
    /// Default: false
    pub debug: Option<bool>,

    /// Target is AWS Keyspaces, which rejects prepared DDL statements.
    /// Default: false
    pub aws_keyspace: Option<bool>,

    /// Whether statements are prepared by the driver unless the caller says
    /// otherwise.
    /// Default: true
    pub prepare: Option<bool>,

    /// Keyspace used by new sessions when none is given explicitly.
    pub keyspace: Option<String>,

    /// Log filter level for the `cqlkit` target.
    /// Default: info
    pub log_level: Option<String>,

    /// Emit logs as JSON instead of the compact human format.
    /// Default: false
    pub log_json: Option<bool>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("CQLKIT_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("cqlkit").join("config.toml"),
    })
});

fn xdg_config_home() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".config"),
        Err(_) => PathBuf::from(".config"),
    }
}

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    let mut config_guard = CONFIG.write().unwrap_or_else(PoisonError::into_inner);
    config_guard.get_or_insert_with(Config::default_config).clone()
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            debug: Some(false),
            aws_keyspace: Some(false),
            prepare: Some(true),
            keyspace: None,
            log_level: Some("info".to_string()),
            log_json: Some(false),
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_path_buf();

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "No configuration at {}, using defaults",
                    config_path.display()
                );
                Self::default_config()
            }
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.resolve()?;
        Ok(config)
    }

    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("CQLKIT_DEBUG") {
            self.debug = Some(matches!(value.as_str(), "1" | "true" | "yes"));
        }
        if let Ok(keyspace) = std::env::var("CQLKIT_KEYSPACE") {
            self.keyspace = Some(keyspace);
        }

        self.debug.get_or_insert(false);
        self.aws_keyspace.get_or_insert(false);
        self.prepare.get_or_insert(true);
        self.log_json.get_or_insert(false);

        let level = self
            .log_level
            .get_or_insert_with(|| "info".to_string())
            .to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(level));
        }
        self.log_level = Some(level);

        if self.keyspace.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyKeyspace);
        }

        Ok(())
    }

    pub fn is_debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn is_aws_keyspace(&self) -> bool {
        self.aws_keyspace.unwrap_or(false)
    }

    pub fn prepare(&self) -> bool {
        self.prepare.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn log_json(&self) -> bool {
        self.log_json.unwrap_or(false)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = CONFIG_PATH
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_path_buf();
        let serialized = toml::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, serialized)?;
        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}
