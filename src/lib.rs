//! Completion-context resolution for truncated PHP buffers.
//!
//! The input is all source text from the start of a file through the
//! cursor: the user is mid-keystroke, typically inside a string literal in
//! some call's argument list, and nothing after the cursor exists. From
//! that truncated buffer, [`parse`] works out which call encloses the
//! cursor, what its receiver resolves to through the buffer's `use`
//! imports and variable bindings, which argument is being typed, and the
//! array key/value position inside that argument.
//!
//! ```
//! let context = phpinpoint::parse(concat!(
//!     "<?php\n",
//!     "use App\\Models\\User as UserModel;\n",
//!     "UserModel::where('",
//! ))
//! .unwrap();
//!
//! assert_eq!(context.function, "where");
//! assert_eq!(context.fqn.as_deref(), Some("App\\Models\\User"));
//! assert_eq!(context.param.index, 0);
//! ```
//!
//! Resolution is pure and synchronous: one scan, one bracket-tracking
//! pass, and one symbol walk per invocation, with no shared state, no I/O,
//! and no recursion over input nesting. Malformed input never fails; the
//! only "error" is [`None`], meaning "do not offer completions here".

mod arguments;
mod brackets;
mod lexer;
mod receiver;
mod resolver;
mod symbols;
mod types;
mod util;

pub use resolver::parse;
pub use types::{CompletionContext, ParamContext};
