use crate::{
    lang::{code::ControlWord, source_buffer::SourceLocation},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, MessageHandler, ScopeId, ScopeStack},
            value::{PrimitiveType, Value},
        },
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod kriek_interpreter;

/// A record of one message dispatch in progress: the receiver, the message, and the location of the
/// top level word that led to it.
#[derive(Clone)]
pub struct CallItem {
    location: SourceLocation,
    receiver: String,
    message: String,
}

impl CallItem {
    pub fn new(receiver: String, message: String, location: SourceLocation) -> CallItem {
        CallItem {
            location,
            receiver,
            message,
        }
    }

    pub fn receiver(&self) -> &String {
        &self.receiver
    }

    pub fn message(&self) -> &String {
        &self.message
    }
}

impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {} {}", self.location, self.receiver, self.message)
    }
}

/// The dispatches currently in progress, outermost first.
pub type CallStack = Vec<CallItem>;

/// The operand stack.
pub type ValueStack = Vec<Value>;

/// Default limit on how deeply list evaluation may re-enter itself.
pub const DEFAULT_MAX_EVALUATION_DEPTH: usize = 512;

/// Trait for managing the operand stack.  Every pop fails with a script error on an empty stack.
pub trait InterpreterStack {
    fn stack(&self) -> &ValueStack;

    fn push(&mut self, value: Value);

    /// Pop the top value as is.  Bare words stay bare words.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop the top value and resolve it: literals are returned verbatim, bare words are replaced by
    /// their value in the current scope.  Unbound words are an error.
    fn pop_resolved(&mut self) -> error::Result<Value>;

    /// Pop and resolve, expecting an INTEGER.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Pop and resolve, expecting a BOOLEAN.
    fn pop_as_bool(&mut self) -> error::Result<bool>;

    /// Pop and resolve, expecting a LIST.
    fn pop_as_list(&mut self) -> error::Result<Vec<Value>>;

    /// Copy the value `depth` positions below the top, 0 being the top.
    fn peek_at(&self, depth: usize) -> error::Result<Value>;

    /// Remove the value `depth` positions below the top, 0 being the top.
    fn pick(&mut self, depth: usize) -> error::Result<Value>;
}

/// Trait for managing dictionaries and the scope stack.
pub trait ScopeManagement {
    /// The arena of all word dictionaries.
    fn dictionary(&self) -> &Dictionary;

    fn scopes(&self) -> &ScopeStack;

    /// The message table of a primitive type.
    fn type_table(&self, primitive: PrimitiveType) -> ScopeId;

    /// Bind `word` to `value` in the current scope, giving it a fresh empty local dictionary.
    fn bind(&mut self, word: &Value, value: Value) -> error::Result<()>;

    /// Make the local dictionary of `word` the current scope.  Only the current scope is searched.
    fn enter(&mut self, word: &Value) -> error::Result<()>;

    /// Return to the enclosing scope.  Leaving the global dictionary is an error.
    fn leave(&mut self) -> error::Result<()>;

    /// Literals resolve to themselves, bare words to their value in the current scope.
    fn resolve_value(&self, value: &Value) -> Option<Value>;

    /// The innermost active scope holding an entry, with a local dictionary, for `name`.
    fn find_ancestor_scope(&self, name: &str) -> Option<ScopeId>;

    /// Register a native message in a primitive type's table.
    fn add_native_message(
        &mut self,
        primitive: PrimitiveType,
        name: String,
        handler: Rc<MessageHandler>,
        description: String,
        signature: String,
    );
}

/// Trait for sending messages to receivers.
pub trait MessageDispatch {
    /// Resolve `message` against `receiver` and invoke it.
    ///
    /// The receiver's own local dictionary is tried first, then the message table of the primitive
    /// type of the receiver's value, then the same two steps using the innermost enclosing scope
    /// that defines the receiver.  Nothing matching is an error.
    fn send(&mut self, receiver: Value, message: Value) -> error::Result<()>;

    /// The receiver of the innermost dispatch in progress.
    fn current_receiver(&self) -> Option<&Value>;

    /// How many dispatches are in progress.
    fn receiver_depth(&self) -> usize;

    fn call_stack(&self) -> &CallStack;

    /// The location of the top level word being processed, if any.
    fn current_location(&self) -> &Option<SourceLocation>;
}

/// Trait for running words and source texts.
pub trait CodeManagement {
    /// Feed one word to the list compiler and, if no list is open, run it.
    fn process_value(&mut self, value: Value) -> error::Result<()>;

    /// Run a control word.
    fn execute_control(&mut self, control: ControlWord) -> error::Result<()>;

    /// Run a sequence of words.  This is how list values are invoked, and it re-enters itself for
    /// nested lists.  The operand stack is shared with the caller.
    fn evaluate(&mut self, words: &[Value]) -> error::Result<()>;

    /// Current evaluation re-entry depth.
    fn evaluation_depth(&self) -> usize;

    /// Tokenize, expand aliases, and run a complete source text.  A list still open at the end is
    /// an error.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Find, read and run a source file.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;
}

/// Register a native message with a primitive type's message table.
///
/// Parameters are the interpreter, the primitive type, the message name, the handler, a short
/// description, and the stack signature.
#[macro_export]
macro_rules! add_native_message {
    (
        $interpreter:expr ,
        $primitive:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_native_message(
            $primitive,
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Core interpreter trait, bringing together the stack, scopes, dispatch and code handling.
pub trait Interpreter:
    InterpreterStack + ScopeManagement + MessageDispatch + CodeManagement
{
    /// Add a directory to the search path list.  The directory must exist.
    fn add_search_path(&mut self, path: &str) -> error::Result<()>;

    /// Find a file either as given or in one of the search paths, newest first.
    fn find_file(&self, path: &str) -> error::Result<String>;

    fn max_evaluation_depth(&self) -> usize;

    fn set_max_evaluation_depth(&mut self, depth: usize);
}
