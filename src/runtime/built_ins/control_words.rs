use crate::{
    lang::code::ControlWord,
    runtime::{
        built_ins::stack_words::{
            word_copy_at, word_duplicate, word_extract_at, word_remove, word_swap,
        },
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Pop a message and its receiver and dispatch the message.
///
/// Signature: `receiver message -- <message result>`
fn word_send(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let message = interpreter.pop()?;
    let receiver = interpreter.pop()?;

    interpreter.send(receiver, message)
}

/// Bind a word to a value in the current scope.  The value is resolved first, so binding one word
/// to another copies the other word's value.
///
/// Signature: `value word -- `
fn word_bind(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let word = interpreter.pop()?;
    let value = interpreter.pop_resolved()?;

    interpreter.bind(&word, value)
}

/// Make the word's local dictionary the current scope.
///
/// Signature: `word -- `
fn word_enter_scope(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let word = interpreter.pop()?;
    interpreter.enter(&word)
}

/// Return to the enclosing scope.
///
/// Signature: ` -- `
fn word_leave_scope(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.leave()
}

/// Push the receiver of the message being run.
///
/// Signature: ` -- receiver`
fn word_self_reference(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let receiver = interpreter.current_receiver().cloned();

    match receiver {
        Some(receiver) => {
            interpreter.push(receiver);
            Ok(())
        }

        None => script_error_str(
            interpreter,
            ErrorKind::NoReceiver,
            "Self reference used outside of a message.",
        ),
    }
}

/// Replace a word with its value in the current scope.
///
/// Signature: `word -- value`
fn word_dereference(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop_resolved()?;

    interpreter.push(value);
    Ok(())
}

/// Run one of the control words.
pub fn execute_control_word(
    interpreter: &mut dyn Interpreter,
    control: ControlWord,
) -> error::Result<()> {
    match control {
        ControlWord::Send => word_send(interpreter),
        ControlWord::Bind => word_bind(interpreter),
        ControlWord::EnterScope => word_enter_scope(interpreter),
        ControlWord::LeaveScope => word_leave_scope(interpreter),
        ControlWord::SelfReference => word_self_reference(interpreter),
        ControlWord::Dereference => word_dereference(interpreter),
        ControlWord::Duplicate => word_duplicate(interpreter),
        ControlWord::Swap => word_swap(interpreter),
        ControlWord::Remove => word_remove(interpreter),
        ControlWord::CopyAt => word_copy_at(interpreter),
        ControlWord::ExtractAt => word_extract_at(interpreter),
    }
}
