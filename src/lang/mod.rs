/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of expressions
and the classification of source lines into commands.

*/

#[macro_use]
mod error;
pub mod ast;
mod command;
mod lex;
mod line;
mod parse;
pub mod split;
mod token;

pub use command::{Builtin, Command, Conditioner, Pilot, PilotOp, Rhs, Target, Turtle};
pub use error::{Error, ErrorCode, ErrorKind};
pub use lex::lex;
pub use line::Line;
pub use parse::parse;
pub use token::{Literal, Operator, Token};

/// `None` is a direct statement, `Some` a stored program line.
pub type LineNumber = Option<u32>;

#[cfg(test)]
mod tests;
