use crate::{
    eval::{Evaluator, display::render},
    node::CompiledNode,
};
use model::{EntityView, Field};
use std::{fmt, marker::PhantomData, sync::Arc};

/// A compiled filter over entities of type `E`.
///
/// Cloning is cheap and the predicate may be evaluated from many threads at
/// once. Use `Predicate<dyn EntityView>` when the entity type is dynamic.
pub struct Predicate<E: ?Sized> {
    root: Arc<CompiledNode>,
    _entity: PhantomData<fn(&E) -> bool>,
}

impl<E: ?Sized> Predicate<E> {
    pub(crate) fn new(root: Arc<CompiledNode>) -> Self {
        Predicate {
            root,
            _entity: PhantomData,
        }
    }

    /// Evaluates against any entity view, regardless of `E`.
    pub fn evaluate_view(&self, entity: &dyn EntityView) -> bool {
        self.root.evaluate(&Field::Entity(entity))
    }
}

impl<E: EntityView> Predicate<E> {
    pub fn evaluate(&self, entity: &E) -> bool {
        self.evaluate_view(entity)
    }

    /// The predicate as a plain closure, e.g. for `Iterator::filter`.
    pub fn into_fn(self) -> impl Fn(&E) -> bool + Send + Sync + Clone {
        move |entity: &E| self.evaluate(entity)
    }
}

impl<E: ?Sized> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Predicate::new(Arc::clone(&self.root))
    }
}

impl<E: ?Sized> fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("f => ")?;
        render(&self.root, "f", f)
    }
}

impl<E: ?Sized> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.to_string()).finish()
    }
}
