//! # SIMPLESEM
//!
//! An interpreter and debugger for SIMPLESEM, the toy machine language
//! used to describe the semantics of programming languages.
//!
//! A program is a list of lines. Memory `D` holds integers and every
//! line is one instruction.
//! ```text
//! set 0, read
//! set 1, 1
//! jumpt 7, D[0] <= 1
//! set 1, D[1] * D[0]
//! set 0, D[0] - 1
//! jump 3
//! set writeln, D[1]
//! halt
//! ```
//!
//! Run it with `sem factorial.sem`, or step through it with
//! `sem --debug factorial.sem` and type `help` at the `sem>` prompt.

pub mod lang;
pub mod mach;
pub mod term;
