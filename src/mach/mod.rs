/*!
## Rust Machine Module

This Rust module is the interpreter for classified commands: values and
variables, expression evaluation, control flow and the runtime that
drives a stored program.

*/

mod basic;
mod builtin;
mod config;
mod eval;
mod files;
mod flow;
mod function;
mod logo;
mod operation;
mod pilot;
mod program;
mod runtime;
pub mod sink;
mod stack;
mod turtle;
mod val;
mod var;

pub use config::Config;
pub use eval::{eval_str, evaluate, index_path};
pub use files::{Files, Mode};
pub use flow::{Directive, Flow, ForFrame};
pub use function::Function;
pub use operation::Operation;
pub use program::Program;
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use turtle::Turtle;
pub use val::{Array, Val};
pub use var::{Var, RESULT};

#[cfg(test)]
mod tests;
