pub mod compile;
pub mod config;
pub mod context;
pub mod error;
pub mod eval;
pub mod node;
pub mod predicate;
pub mod registry;

pub use compile::{FilterCompiler, compile};
pub use config::{CompilerOptions, EnvGetter};
pub use context::CompileContext;
pub use error::{CompileError, CompileErrorKind, ConfigError, RegistryError, Result};
pub use eval::Evaluator;
pub use node::{Aggregate, CompiledNode, Operand, PropertyAccess};
pub use predicate::Predicate;
pub use registry::{
    FnMethod, FnToken, Method, MethodModule, MethodRegistry, Token, TokenModule, TokenRegistry,
};
