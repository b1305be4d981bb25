use core::str::Chars;
use std::fmt::{self, Display, Formatter};



/// Where in a Kriek source text a word was found.  Used by the lexer to report unterminated
/// strings, comments and aliases, and by the interpreter to tag runtime errors with the top level
/// word that was executing.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourceLocation
{
    /// The path of the source file, or a tag such as "<test>" for in memory sources.
    path: String,

    /// 1 based line number.
    line: usize,

    /// 1 based column number.
    column: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    pub fn path(&self) -> &String
    {
        &self.path
    }

    pub fn line(&self) -> usize
    {
        self.line
    }

    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// Location of the macro invocation in the Rust sources.  Used when natives need to report a
/// location but no Kriek source is being processed.
#[macro_export]
macro_rules! location_here
{
    () =>
    {
        $crate::lang::source_buffer::SourceLocation::new_from_info(file!(),
                                                                   line!() as usize,
                                                                   column!() as usize)
    };
}



/// Forward only cursor over a source text that keeps track of the line and column of the next
/// character.  The text is borrowed, never copied.
pub struct SourceBuffer<'a>
{
    chars: Chars<'a>,

    /// Location of the character returned by the next call to `next_char`.
    location: SourceLocation,

    /// One character of look-ahead.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Look at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Consume and return the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
