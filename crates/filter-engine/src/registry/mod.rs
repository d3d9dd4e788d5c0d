pub mod methods;
pub mod tokens;

pub use methods::{FnMethod, Method, MethodModule, MethodRegistry};
pub use tokens::{FnToken, Token, TokenModule, TokenRegistry};
