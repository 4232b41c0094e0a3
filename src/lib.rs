//! # unibasic
//!
//! One interpreter for three teaching languages: line-numbered BASIC,
//! PILOT dialogue commands and Logo turtle graphics. They share a single
//! variable store and a single program, so a lesson can mix them freely.
//!
//! ```text
//! 10 A:NAME$
//! 20 T:Hello, $NAME$!
//! 30 FOR I = 1 TO 4
//! 40 FD 50
//! 50 RT 90
//! 60 NEXT I
//! RUN
//! ```
//!
//! Run the executable without arguments for the line editor, or pass a
//! program file with `--run` to execute it and exit.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/commands.rs"]
#[allow(non_snake_case)]
pub mod __Commands;

pub mod lang;
pub mod mach;
pub mod term;
