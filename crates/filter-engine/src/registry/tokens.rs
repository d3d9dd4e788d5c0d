use crate::error::RegistryError;
use model::Value;
use std::{collections::HashMap, sync::Arc};

/// A named scalar resolved once, when a filter referencing it is compiled.
pub trait Token: Send + Sync {
    fn value(&self) -> Value;
}

impl Token for Value {
    fn value(&self) -> Value {
        self.clone()
    }
}

/// Adapts a closure into a [`Token`].
pub struct FnToken<F>(pub F);

impl<F> Token for FnToken<F>
where
    F: Fn() -> Value + Send + Sync,
{
    fn value(&self) -> Value {
        (self.0)()
    }
}

/// Supplies a set of tokens, e.g. per tenant or per request.
pub trait TokenModule {
    fn load(&self, registry: &mut TokenRegistry) -> Result<(), RegistryError>;
}

#[derive(Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, Arc<dyn Token>>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_module(module: &dyn TokenModule) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        module.load(&mut registry)?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        token: impl Token + 'static,
    ) -> Result<(), RegistryError> {
        if self.tokens.contains_key(name) {
            return Err(RegistryError::DuplicateToken(name.to_string()));
        }
        self.tokens.insert(name.to_string(), Arc::new(token));
        Ok(())
    }

    pub fn register_value(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<(), RegistryError> {
        self.register(name, value.into())
    }

    pub fn register_fn<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.register(name, FnToken(f))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Token>> {
        self.tokens.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tokens.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("tokens", &self.names())
            .finish()
    }
}
