use crate::{
    lang::code::{LIST_CLOSE, LIST_OPEN},
    runtime::{data_structures::value::Value, error::ErrorKind},
};
use std::fmt::{self, Display, Formatter};

/// What the interpreter should do with a word after the list compiler has seen it.
#[derive(Clone, PartialEq, Debug)]
pub enum Compiled {
    /// The word became part of the list being compiled.
    Collected,

    /// The outermost open list was closed, push the finished list.
    Finished(Value),

    /// No list is open, the word is to be run.
    Run(Value),
}

/// Unbalanced list literal markers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CompileError {
    /// A close marker with no open list.
    UnmatchedClose,

    /// The program ended with this many lists still open.
    Unterminated(usize),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CompileError::UnmatchedClose => {
                write!(f, "Found {} without a matching {}.", LIST_CLOSE, LIST_OPEN)
            }
            CompileError::Unterminated(level) => {
                write!(f, "Unexpected end of program with {} unclosed list(s).", level)
            }
        }
    }
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::UnmatchedClose => ErrorKind::Malformed,
            CompileError::Unterminated(_) => ErrorKind::Unterminated,
        }
    }
}

/// Builds list values out of the words found between list markers.
///
/// Only the outermost list is assembled.  Markers of inner lists are recorded as plain words, so an
/// inner list is compiled again each time the outer list is run.
#[derive(Default)]
pub struct ListCompiler {
    level: usize,
    accumulator: Vec<Value>,
}

impl ListCompiler {
    pub fn new() -> ListCompiler {
        ListCompiler {
            level: 0,
            accumulator: Vec::new(),
        }
    }

    /// How many lists are currently open.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_compiling(&self) -> bool {
        self.level > 0
    }

    /// Feed the next word to the compiler.
    pub fn process(&mut self, value: Value) -> Result<Compiled, CompileError> {
        let is_open = value.as_word() == Some(LIST_OPEN);
        let is_close = value.as_word() == Some(LIST_CLOSE);

        if is_open {
            if self.level > 0 {
                self.accumulator.push(value);
            }

            self.level += 1;
            Ok(Compiled::Collected)
        } else if is_close {
            if self.level == 0 {
                return Err(CompileError::UnmatchedClose);
            }

            self.level -= 1;

            if self.level > 0 {
                self.accumulator.push(value);
                Ok(Compiled::Collected)
            } else {
                Ok(Compiled::Finished(Value::List(std::mem::take(
                    &mut self.accumulator,
                ))))
            }
        } else if self.level > 0 {
            self.accumulator.push(value);
            Ok(Compiled::Collected)
        } else {
            Ok(Compiled::Run(value))
        }
    }

    /// Check that every list opened has been closed.  The compiler is reset either way.
    pub fn finish(&mut self) -> Result<(), CompileError> {
        let level = self.level;

        self.level = 0;
        self.accumulator.clear();

        if level > 0 {
            Err(CompileError::Unterminated(level))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(compiler: &mut ListCompiler, words: &str) -> Vec<Compiled> {
        words
            .split_whitespace()
            .map(|word| compiler.process(Value::classify(word)).unwrap())
            .collect()
    }

    #[test]
    fn words_outside_lists_are_run() {
        let mut compiler = ListCompiler::new();

        assert_eq!(
            feed(&mut compiler, "10 X"),
            vec![
                Compiled::Run(Value::Integer(10)),
                Compiled::Run(Value::Word("X".to_string()))
            ]
        );
    }

    #[test]
    fn closing_the_outer_list_finishes_it() {
        let mut compiler = ListCompiler::new();
        let results = feed(&mut compiler, "( 1 YES )");

        assert_eq!(
            results.last().unwrap(),
            &Compiled::Finished(Value::List(vec![Value::Integer(1), Value::Boolean(true)]))
        );
        assert!(!compiler.is_compiling());
    }

    #[test]
    fn inner_markers_are_kept_as_words() {
        let mut compiler = ListCompiler::new();
        let results = feed(&mut compiler, "( a ( b ) c )");

        assert_eq!(
            results.last().unwrap(),
            &Compiled::Finished(Value::List(vec![
                Value::Word("a".to_string()),
                Value::Word("(".to_string()),
                Value::Word("b".to_string()),
                Value::Word(")".to_string()),
                Value::Word("c".to_string()),
            ]))
        );
    }

    #[test]
    fn empty_list() {
        let mut compiler = ListCompiler::new();
        let results = feed(&mut compiler, "( )");

        assert_eq!(results[1], Compiled::Finished(Value::List(vec![])));
    }

    #[test]
    fn unmatched_close_is_an_error() {
        let mut compiler = ListCompiler::new();

        assert_eq!(
            compiler.process(Value::classify(")")),
            Err(CompileError::UnmatchedClose)
        );
    }

    #[test]
    fn open_lists_at_the_end_are_an_error() {
        let mut compiler = ListCompiler::new();
        let _ = feed(&mut compiler, "( ( 1 )");

        assert_eq!(compiler.finish(), Err(CompileError::Unterminated(1)));
        assert_eq!(compiler.level(), 0);
    }
}
