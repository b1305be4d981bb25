/// The control words run directly by the interpreter: send, bind, scopes and dereferencing.
pub mod control_words;

/// Control words that manipulate the operand stack.
pub mod stack_words;

/// The INTEGER message table.
mod integer_messages;

/// The FLOAT message table.
mod float_messages;

/// The BOOLEAN message table, conditionals and logic.
mod boolean_messages;

/// The LIST message table, size and iteration.
mod list_messages;

/// The STRING message table.
mod string_messages;

use crate::runtime::{
    built_ins::{
        boolean_messages::register_boolean_messages, float_messages::register_float_messages,
        integer_messages::register_integer_messages, list_messages::register_list_messages,
        string_messages::register_string_messages,
    },
    interpreter::Interpreter,
};

/// Called to fill the message tables of all five primitive types with their native messages.
pub fn register_primitive_messages(interpreter: &mut dyn Interpreter) {
    register_integer_messages(interpreter);
    register_float_messages(interpreter);
    register_string_messages(interpreter);
    register_boolean_messages(interpreter);
    register_list_messages(interpreter);
}
