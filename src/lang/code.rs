use std::fmt::{self, Display, Formatter};

/// Opens a list literal.  While at least one list is open words are collected instead of run.
pub const LIST_OPEN: &str = "(";

/// Closes the innermost open list literal.
pub const LIST_CLOSE: &str = ")";

/// The words the interpreter handles itself, before any dictionary lookup.  None of them can be
/// shadowed by a binding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ControlWord {
    /// `!` Pop a message and a receiver and dispatch the message to the receiver.
    Send,

    /// `@` Pop a word, then a value, and bind the word to the value in the current scope.
    Bind,

    /// `:` Pop a word and make its local dictionary the current scope.
    EnterScope,

    /// `~` Return to the scope that was current before the last enter.
    LeaveScope,

    /// `.` Push the receiver of the message currently being dispatched.
    SelfReference,

    /// `,` Pop a word and push the value it is bound to.
    Dereference,

    /// `\d` Duplicate the top of the stack.
    Duplicate,

    /// `\s` Swap the top two values.
    Swap,

    /// `\r` Discard the top value.
    Remove,

    /// `\c` Pop a depth and push a copy of the value at that depth.
    CopyAt,

    /// `\e` Pop a depth and move the value at that depth to the top.
    ExtractAt,
}

impl ControlWord {
    /// Every control word, in the order they are documented.
    pub const ALL: [ControlWord; 11] = [
        ControlWord::Send,
        ControlWord::Bind,
        ControlWord::EnterScope,
        ControlWord::LeaveScope,
        ControlWord::SelfReference,
        ControlWord::Dereference,
        ControlWord::Duplicate,
        ControlWord::Swap,
        ControlWord::Remove,
        ControlWord::CopyAt,
        ControlWord::ExtractAt,
    ];

    /// The source spelling of the control word.
    pub fn word(&self) -> &'static str {
        match self {
            ControlWord::Send => "!",
            ControlWord::Bind => "@",
            ControlWord::EnterScope => ":",
            ControlWord::LeaveScope => "~",
            ControlWord::SelfReference => ".",
            ControlWord::Dereference => ",",
            ControlWord::Duplicate => "\\d",
            ControlWord::Swap => "\\s",
            ControlWord::Remove => "\\r",
            ControlWord::CopyAt => "\\c",
            ControlWord::ExtractAt => "\\e",
        }
    }

    /// Look up the control word spelled by `word`, if any.
    pub fn from_word(word: &str) -> Option<ControlWord> {
        ControlWord::ALL
            .iter()
            .find(|control| control.word() == word)
            .copied()
    }
}

impl Display for ControlWord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_control_word_is_found_by_its_spelling() {
        for control in ControlWord::ALL {
            assert_eq!(ControlWord::from_word(&control.to_string()), Some(control));
        }
    }

    #[test]
    fn other_words_are_not_control_words() {
        assert_eq!(ControlWord::from_word("\\x"), None);
        assert_eq!(ControlWord::from_word("!!"), None);
        assert_eq!(ControlWord::from_word(LIST_OPEN), None);
    }
}
