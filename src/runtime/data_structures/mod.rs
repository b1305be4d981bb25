/// Module contains the Value enumeration and its implementation.  Every word entering the
/// interpreter is classified into a Value once.
pub mod value;

/// The dictionary arena holding the global dictionary, the primitive type tables and every word's
/// local dictionary.
pub mod dictionary;
