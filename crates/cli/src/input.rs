use crate::{env::EnvTokens, error::CliError};
use filter_engine::TokenRegistry;
use model::{EntityType, Filter, Record, Value};
use std::fs;
use tracing::debug;

pub fn read_filter(path: &str) -> Result<Filter, CliError> {
    let source = fs::read_to_string(path)?;
    Ok(Filter::from_json(&source)?)
}

pub fn read_schema(path: &str) -> Result<EntityType, CliError> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Builds the token registry from an optional JSON tokens file and an
/// optional env file. A name defined in both is rejected.
pub fn read_tokens(
    tokens: Option<&str>,
    env_file: Option<&str>,
) -> Result<TokenRegistry, CliError> {
    let mut registry = TokenRegistry::new();

    if let Some(path) = tokens {
        let source = fs::read_to_string(path)?;
        register_json_tokens(&mut registry, &serde_json::from_str(&source)?)?;
    }

    if let Some(path) = env_file {
        EnvTokens::load_from_file(path)?.register(&mut registry)?;
    }

    debug!("Token registry: {:?}", registry.names());
    Ok(registry)
}

pub fn read_records(path: &str, entity_type: &EntityType) -> Result<Vec<Record>, CliError> {
    let source = fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&source)?;
    let rows = json
        .as_array()
        .ok_or_else(|| CliError::Input(format!("{path} must contain a JSON array of records")))?;

    rows.iter()
        .map(|row| Record::from_json(entity_type, row).map_err(CliError::from))
        .collect()
}

fn register_json_tokens(
    registry: &mut TokenRegistry,
    json: &serde_json::Value,
) -> Result<(), CliError> {
    let entries = json
        .as_object()
        .ok_or_else(|| CliError::Input("tokens file must contain a JSON object".to_string()))?;

    for (name, raw) in entries {
        let value = Value::from_json(raw)
            .ok_or_else(|| CliError::Input(format!("token '{name}' must be a scalar, got {raw}")))?;
        registry.register_value(name, value)?;
    }
    Ok(())
}
