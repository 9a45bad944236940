use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(cqlkit_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(cqlkit_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Invalid log level: {0}")]
    #[diagnostic(
        code(cqlkit_config::invalid_log_level),
        help("Use one of: trace, debug, info, warn, error")
    )]
    InvalidLogLevel(String),

    #[error("Keyspace name cannot be empty")]
    #[diagnostic(
        code(cqlkit_config::empty_keyspace),
        help("Remove the `keyspace` field or set it to an existing keyspace")
    )]
    EmptyKeyspace,

    #[error("IO error: {0}")]
    #[diagnostic(code(cqlkit_config::io))]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
