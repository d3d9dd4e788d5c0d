use crate::{
    config::CompilerOptions,
    error::{CompileError, CompileErrorKind, Result},
    registry::{MethodRegistry, TokenRegistry},
};

/// State threaded through one compilation: the frozen registries, the
/// location of the node being compiled and the element parameter counter.
pub struct CompileContext<'a> {
    pub tokens: &'a TokenRegistry,
    pub methods: &'a MethodRegistry,
    pub options: &'a CompilerOptions,
    next_parameter: usize,
    location: Vec<String>,
    depth: usize,
}

impl<'a> CompileContext<'a> {
    pub fn new(
        tokens: &'a TokenRegistry,
        methods: &'a MethodRegistry,
        options: &'a CompilerOptions,
    ) -> Self {
        CompileContext {
            tokens,
            methods,
            options,
            next_parameter: 1,
            location: Vec::new(),
            depth: 0,
        }
    }

    /// Next element parameter name: `f1`, `f2`, ...
    pub fn fresh_parameter(&mut self) -> String {
        let name = format!("f{}", self.next_parameter);
        self.next_parameter += 1;
        name
    }

    /// Current node location, e.g. `$.expressions[0].filter`.
    pub fn location(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.location {
            if !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }

    pub fn error(&self, kind: CompileErrorKind) -> CompileError {
        CompileError::new(self.location(), kind)
    }

    /// Runs `f` with `segment` appended to the current location.
    pub fn within<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.location.push(segment.into());
        let result = f(self);
        self.location.pop();
        result
    }

    /// Runs `f` one nesting level deeper, failing once `max_depth` is exceeded.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(CompileErrorKind::DepthExceeded(self.options.max_depth)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
