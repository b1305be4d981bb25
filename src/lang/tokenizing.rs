use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};

/// Opens and closes a string literal.  The quotes stay part of the word.
pub const STRING_QUOTE: char = '\'';

/// Opens and closes a comment.  Everything in between is dropped.
pub const COMMENT_QUOTE: char = '"';

/// A single word of Kriek source along with where it started in the original text.
///
/// Unlike the typed values the interpreter works with, a token is still raw text.  Classification
/// into integers, floats and friends happens after alias expansion.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Token {
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Same word, new location.  Used when an alias expansion is spliced in at a use site.
    pub fn relocated(&self, location: &SourceLocation) -> Token {
        Token::new(location.clone(), self.text.clone())
    }
}

/// Check if the given character separates words.
fn is_whitespace(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

/// Accumulates the characters of the word currently being scanned.
struct PendingWord {
    location: Option<SourceLocation>,
    text: String,
}

impl PendingWord {
    fn new() -> PendingWord {
        PendingWord {
            location: None,
            text: String::new(),
        }
    }

    fn push(&mut self, location: &SourceLocation, next: char) {
        if self.location.is_none() {
            self.location = Some(location.clone());
        }

        self.text.push(next);
    }

    /// Hand the finished word over to the token list, if there is one.
    fn flush(&mut self, token_list: &mut TokenList) {
        if let Some(location) = self.location.take() {
            token_list.push(Token::new(location, std::mem::take(&mut self.text)));
        }
    }
}

/// Consume a string literal, quotes included, into the pending word.  Whitespace inside the quotes
/// does not end the word.
fn process_string(buffer: &mut SourceBuffer, word: &mut PendingWord) -> error::Result<()> {
    let start = buffer.location().clone();

    if let Some(quote) = buffer.next_char() {
        word.push(&start, quote);
    }

    loop {
        let location = buffer.location().clone();

        match buffer.next_char() {
            Some(STRING_QUOTE) => {
                word.push(&location, STRING_QUOTE);
                return Ok(());
            }

            Some(next) => word.push(&location, next),

            None => {
                return ScriptError::at(
                    ErrorKind::Unterminated,
                    &start,
                    "Unexpected end of file in string literal.".to_string(),
                );
            }
        }
    }
}

/// Skip over a comment, including both of its delimiters.
fn skip_comment(buffer: &mut SourceBuffer) -> error::Result<()> {
    let start = buffer.location().clone();
    let _ = buffer.next_char();

    loop {
        match buffer.next_char() {
            Some(COMMENT_QUOTE) => return Ok(()),
            Some(_) => continue,
            None => {
                return ScriptError::at(
                    ErrorKind::Unterminated,
                    &start,
                    "Unexpected end of file in comment.".to_string(),
                );
            }
        }
    }
}

/// Split Kriek source text into words.
///
/// Words are separated by whitespace.  A string quote switches to string mode until the matching
/// quote, keeping any whitespace in between as part of the word.  A comment quote drops everything
/// up to and including the matching quote without ending the current word.  Hitting the end of the
/// text inside either is an error.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();
    let mut word = PendingWord::new();

    while let Some(next) = buffer.peek_next() {
        match next {
            STRING_QUOTE => process_string(&mut buffer, &mut word)?,

            COMMENT_QUOTE => skip_comment(&mut buffer)?,

            _ if is_whitespace(&next) => {
                word.flush(&mut token_list);
                let _ = buffer.next_char();
            }

            _ => {
                let location = buffer.location().clone();
                let _ = buffer.next_char();
                word.push(&location, next);
            }
        }
    }

    // The end of the text also ends the last word.
    word.flush(&mut token_list);

    Ok(token_list)
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<TokenList> {
    match read_to_string(path) {
        Ok(source) => tokenize_from_source(path, &source),
        Err(error) => {
            ScriptError::detached(ErrorKind::Io, format!("Could not read file {}: {}", path, error))
        }
    }
}
