use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The classes of failure a Kriek run can end with.  Every one of them is fatal, the kind only
/// tells them apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind
{
    /// Popping an empty operand stack.
    StackUnderflow,

    /// Leaving the global dictionary.
    ScopeUnderflow,

    /// The receiver was found but nothing answers the message.
    UnknownMessage,

    /// A bare word with no binding where a value was needed.
    UnboundWord,

    /// A value of the wrong primitive type reached an operation, a non-numeric argument to an
    /// arithmetic message for example.
    TypeMismatch,

    /// A logical operator or a WHILE condition got something other than YES or NO.
    NotBoolean,

    /// A stack depth index that is out of range or not an INTEGER.
    BadIndex,

    /// Overflow or division by zero.
    Arithmetic,

    /// A string, comment, alias or list still open at the end of the source.
    Unterminated,

    /// A closing marker with nothing to close, or a nested alias definition.
    Malformed,

    /// A self reference with no message being run.
    NoReceiver,

    /// An attempt to rebind one of the primitive type names.
    ProtectedWord,

    /// List evaluation nested deeper than the configured limit.
    DepthExceeded,

    /// Reading a source file or resolving a path failed.
    Io,

    /// A bad command line or environment setting.
    Configuration
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        let text = match self
            {
                ErrorKind::StackUnderflow => "stack underflow",
                ErrorKind::ScopeUnderflow => "scope underflow",
                ErrorKind::UnknownMessage => "unknown message",
                ErrorKind::UnboundWord    => "unbound word",
                ErrorKind::TypeMismatch   => "type mismatch",
                ErrorKind::NotBoolean     => "not a boolean",
                ErrorKind::BadIndex       => "bad stack index",
                ErrorKind::Arithmetic     => "arithmetic error",
                ErrorKind::Unterminated   => "unterminated input",
                ErrorKind::Malformed      => "malformed input",
                ErrorKind::NoReceiver     => "no receiver",
                ErrorKind::ProtectedWord  => "protected word",
                ErrorKind::DepthExceeded  => "evaluation too deep",
                ErrorKind::Io             => "i/o error",
                ErrorKind::Configuration  => "configuration error"
            };

        write!(f, "{}", text)
    }
}



/// The error that ends a Kriek run.  There is no recovery, the first error aborts the program.
#[derive(Clone)]
pub struct ScriptError
{
    kind: ErrorKind,

    /// Where in the Kriek source the error was found, if it came from a source text.
    location: Option<SourceLocation>,

    /// Names the operator and the offending word.
    error: String,

    /// The message dispatches that were in progress, outermost first.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// Prints `location: kind: message`, followed by the dispatches in progress innermost first.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        if let Some(location) = &self.location
        {
            write!(f, "{}: ", location)?;
        }

        write!(f, "{}: {}", self.kind, self.error)?;

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nSent while running\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


/// `main` returns `Result<(), ScriptError>`, and the runtime reports a failed run with `Debug`.
impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError { kind, location, error, call_stack }
    }

    /// An error found before or outside of any source text, a bad setting for example.
    pub fn detached<T>(kind: ErrorKind, error: String) -> Result<T>
    {
        Err(ScriptError::new(kind, None, error, None))
    }

    /// An error found by the lexer at `location`, before anything runs.
    pub fn at<T>(kind: ErrorKind, location: &SourceLocation, error: String) -> Result<T>
    {
        Err(ScriptError::new(kind, Some(location.clone()), error, None))
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    pub fn error(&self) -> &String
    {
        &self.error
    }

    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, error.to_string(), None)
    }
}



/// Fail with an error tagged with the interpreter's current location and the dispatches in
/// progress.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    Err(ScriptError::new(kind, location, message, Some(call_stack)))
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
