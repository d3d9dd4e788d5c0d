pub(crate) mod coerce;
pub(crate) mod leaf;
pub(crate) mod property;
pub(crate) mod tree;

use crate::{
    config::CompilerOptions,
    context::CompileContext,
    error::{CompileError, CompileErrorKind, Result},
    predicate::Predicate,
    registry::{MethodRegistry, TokenRegistry},
};
use model::{Entity, EntityType, EntityView, Filter, ValueType};
use std::sync::Arc;
use tracing::debug;

/// Turns filter documents into reusable predicates.
///
/// The compiler holds only options; all per-compilation state lives in a
/// [`CompileContext`], so one compiler may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    options: CompilerOptions,
}

impl FilterCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        FilterCompiler { options }
    }

    /// Compiles `filter` for a statically typed entity.
    pub fn compile<E: Entity>(
        &self,
        filter: &Filter,
        tokens: &TokenRegistry,
        methods: &MethodRegistry,
    ) -> Result<Predicate<E>> {
        self.compile_for(filter, &E::entity_type(), tokens, methods)
    }

    /// Compiles `filter` against an entity schema known only at runtime.
    pub fn compile_for<E: EntityView + ?Sized>(
        &self,
        filter: &Filter,
        entity_type: &EntityType,
        tokens: &TokenRegistry,
        methods: &MethodRegistry,
    ) -> Result<Predicate<E>> {
        debug!(
            "Compiling filter for entity '{}' ({} tokens, {} methods)",
            entity_type.name,
            tokens.len(),
            methods.len()
        );

        let scope = ValueType::entity(entity_type.clone());
        let mut ctx = CompileContext::new(tokens, methods, &self.options);
        let root = tree::compile_filter(&mut ctx, filter, &scope)?;

        let predicate = Predicate::new(Arc::new(root));
        debug!("Compiled predicate: {}", predicate);
        Ok(predicate)
    }

    /// Parses a JSON filter document and compiles it.
    pub fn compile_json<E: EntityView + ?Sized>(
        &self,
        json: &str,
        entity_type: &EntityType,
        tokens: &TokenRegistry,
        methods: &MethodRegistry,
    ) -> Result<Predicate<E>> {
        let filter = Filter::from_json(json).map_err(|e| {
            CompileError::new("$", CompileErrorKind::InvalidFilter(e.to_string()))
        })?;
        self.compile_for(&filter, entity_type, tokens, methods)
    }
}

/// Compiles `filter` for `E` with default options.
pub fn compile<E: Entity>(
    filter: &Filter,
    tokens: &TokenRegistry,
    methods: &MethodRegistry,
) -> Result<Predicate<E>> {
    FilterCompiler::default().compile(filter, tokens, methods)
}
