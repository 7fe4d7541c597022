//! Brisk interpreter: evaluates AST nodes with a tree-walking evaluator.
//!
//! This crate provides the runtime for the brisk language: the dynamic
//! [`Value`] model, the [`Environment`] scope chain, and the
//! [`Interpreter`] that walks the parsed program.

pub mod env;
pub mod flow;
pub mod interpreter;
pub mod value;

pub use env::{EnvRef, Environment};
pub use interpreter::Interpreter;
pub use value::Value;
