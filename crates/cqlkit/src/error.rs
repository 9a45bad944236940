//! Error types for cqlkit.

use cqlkit_config::error::ConfigError;
use miette::Diagnostic;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(cqlkit::invalid_argument),
        help("Check the arguments passed to the builder method")
    )]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    #[diagnostic(
        code(cqlkit::invalid_state),
        help("Start the chain with a statement method such as select, insert or createKeyspace")
    )]
    InvalidState(String),

    #[error("Cassandra client is not initialized")]
    #[diagnostic(
        code(cqlkit::not_connected),
        help("Connect the driver before executing statements")
    )]
    NotConnected,

    #[error("Driver error: {0}")]
    #[diagnostic(code(cqlkit::driver))]
    Driver(String),

    #[error("Failed to install log subscriber: {0}")]
    #[diagnostic(
        code(cqlkit::logging),
        help("Another global tracing subscriber is already installed")
    )]
    Logging(#[from] SetGlobalDefaultError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
