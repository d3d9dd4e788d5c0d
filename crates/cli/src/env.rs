use crate::error::CliError;
use filter_engine::TokenRegistry;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

/// Token definitions read from a `.env`-style file.
///
/// Every `KEY=VALUE` entry becomes a string token named `KEY`. The compiler
/// converts the string to the type a leaf declares, so `MIN_AGE=18` can feed
/// an integer comparison.
#[derive(Debug, Clone, Default)]
pub struct EnvTokens {
    vars: BTreeMap<String, String>,
}

impl EnvTokens {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        let mut tokens = EnvTokens::default();
        tokens.parse_env_content(&content)?;
        debug!("Loaded {} tokens from {}", tokens.vars.len(), path.display());
        Ok(tokens)
    }

    pub fn register(&self, registry: &mut TokenRegistry) -> Result<(), CliError> {
        for (name, value) in &self.vars {
            registry.register_value(name, value.as_str())?;
        }
        Ok(())
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars.insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}
