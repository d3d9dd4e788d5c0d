use crate::error::RegistryError;
use model::{EntityView, Value, ValueType};
use std::{collections::HashMap, sync::Arc};

/// A named computation over one entity, usable as the left operand of a
/// comparison. `returns` declares the type of the produced value, which
/// drives constant coercion at compile time.
pub trait Method: Send + Sync {
    fn returns(&self) -> ValueType;

    fn evaluate(&self, entity: &dyn EntityView) -> Value;
}

pub struct FnMethod<F> {
    returns: ValueType,
    f: F,
}

impl<F> FnMethod<F>
where
    F: Fn(&dyn EntityView) -> Value + Send + Sync,
{
    pub fn new(returns: ValueType, f: F) -> Self {
        FnMethod { returns, f }
    }
}

impl<F> Method for FnMethod<F>
where
    F: Fn(&dyn EntityView) -> Value + Send + Sync,
{
    fn returns(&self) -> ValueType {
        self.returns.clone()
    }

    fn evaluate(&self, entity: &dyn EntityView) -> Value {
        (self.f)(entity)
    }
}

pub trait MethodModule {
    fn load(&self, registry: &mut MethodRegistry) -> Result<(), RegistryError>;
}

#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn Method>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_module(module: &dyn MethodModule) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        module.load(&mut registry)?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        method: impl Method + 'static,
    ) -> Result<(), RegistryError> {
        if self.methods.contains_key(name) {
            return Err(RegistryError::DuplicateMethod(name.to_string()));
        }
        self.methods.insert(name.to_string(), Arc::new(method));
        Ok(())
    }

    pub fn register_fn<F>(
        &mut self,
        name: &str,
        returns: ValueType,
        f: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&dyn EntityView) -> Value + Send + Sync + 'static,
    {
        self.register(name, FnMethod::new(returns, f))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Method>> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.names())
            .finish()
    }
}
