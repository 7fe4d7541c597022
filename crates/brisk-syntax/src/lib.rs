//! Brisk language syntax definitions: tokens, AST nodes, and the shared
//! error type. Every other crate in the workspace depends on these types.

pub mod ast;
pub mod error;
pub mod token;

pub use ast::*;
pub use error::*;
pub use token::*;
