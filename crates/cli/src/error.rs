use filter_engine::{CompileError, ConfigError, RegistryError};
use model::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Filter compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Token registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Invalid compiler options: {0}")]
    Options(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
