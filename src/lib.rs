/// Module for managing source code: tokenizing, alias expansion and list compilation.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;
