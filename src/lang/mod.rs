/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of SIMPLESEM.

A SIMPLESEM program has one statement per physical line and the line's
position in the file is its number:

```text
set D[0], read          # 1
set write, D[0] * 2     # 2
jumpt 1, D[0] != 0      # 3
halt                    # 4
```

*/

#[macro_use]
mod error;
mod escape;
mod lex;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use escape::{quote, unquote};
pub use lex::lex;
pub use parse::parse;

pub mod ast;
pub mod token;

/// 1-based source line, `None` when an error has no line context.
pub type LineNumber = Option<usize>;
pub type Column = std::ops::Range<usize>;

#[cfg(test)]
mod tests;
