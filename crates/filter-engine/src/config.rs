use crate::error::ConfigError;

/// Function type for reading environment variables
pub type EnvGetter = fn(&str) -> Option<String>;

pub const MAX_DEPTH_VAR: &str = "FILTER_MAX_DEPTH";
pub const IGNORE_PROPERTY_CASE_VAR: &str = "FILTER_IGNORE_PROPERTY_CASE";

/// Configuration for filter compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Maximum nesting of conditions and collection sub-filters
    pub max_depth: usize,

    /// Match property path segments against schema fields ignoring ASCII case
    pub ignore_property_case: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            ignore_property_case: false,
        }
    }
}

impl CompilerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_ignore_property_case(mut self, ignore: bool) -> Self {
        self.ignore_property_case = ignore;
        self
    }

    /// Defaults overridden by `FILTER_MAX_DEPTH` and `FILTER_IGNORE_PROPERTY_CASE`.
    pub fn from_env(env_getter: EnvGetter) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Some(raw) = env_getter(MAX_DEPTH_VAR) {
            options.max_depth = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|depth| *depth > 0)
                .ok_or_else(|| parse_error(MAX_DEPTH_VAR, &raw, "positive integer"))?;
        }

        if let Some(raw) = env_getter(IGNORE_PROPERTY_CASE_VAR) {
            options.ignore_property_case = raw
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map_err(|_| parse_error(IGNORE_PROPERTY_CASE_VAR, &raw, "boolean"))?;
        }

        Ok(options)
    }
}

fn parse_error(var: &str, value: &str, expected_type: &str) -> ConfigError {
    ConfigError::EnvParseError {
        var: var.to_string(),
        value: value.to_string(),
        expected_type: expected_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_env(_key: &str) -> Option<String> {
        None
    }

    fn configured_env(key: &str) -> Option<String> {
        match key {
            MAX_DEPTH_VAR => Some("8".to_string()),
            IGNORE_PROPERTY_CASE_VAR => Some("TRUE".to_string()),
            _ => None,
        }
    }

    fn broken_env(key: &str) -> Option<String> {
        match key {
            MAX_DEPTH_VAR => Some("deep".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::from_env(empty_env).unwrap();
        assert_eq!(options, CompilerOptions::default());
        assert_eq!(options.max_depth, 64);
        assert!(!options.ignore_property_case);
    }

    #[test]
    fn test_from_env() {
        let options = CompilerOptions::from_env(configured_env).unwrap();
        assert_eq!(options.max_depth, 8);
        assert!(options.ignore_property_case);
    }

    #[test]
    fn test_from_env_invalid() {
        let err = CompilerOptions::from_env(broken_env).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { var, .. } if var == MAX_DEPTH_VAR));
    }

    #[test]
    fn test_builders() {
        let options = CompilerOptions::default()
            .with_max_depth(3)
            .with_ignore_property_case(true);
        assert_eq!(options.max_depth, 3);
        assert!(options.ignore_property_case);
    }
}
