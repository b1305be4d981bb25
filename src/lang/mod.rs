/// Module for managing the original source code.
pub mod source_buffer;

/// Module for turning source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for the `[ ... ] name` alias definitions, expanded before a source text is run.
pub mod aliasing;

/// Module defining the control words and list markers of the Kriek language.
pub mod code;

/// Module for compiling words between list markers into list values.  Compiling happens while the
/// program runs, words outside of any list are executed as they are found.
pub mod compilation;
