/// All of the core data structures used by the Kriek interpreter.
pub mod data_structures;

/// Module for defining the built-in control words and native messages of the primitive types.
pub mod built_ins;

/// Command line and environment settings.
pub mod config;

/// Module for defining the error reporting of the Kriek interpreter.
pub mod error;

/// Module for defining the core functionality of the Kriek interpreter.  This includes the
/// message dispatcher and tools for managing and examining the interpreter's state.
pub mod interpreter;
