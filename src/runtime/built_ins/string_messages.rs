use crate::{
    add_native_message,
    runtime::{
        data_structures::value::{PrimitiveType, Value},
        error,
        interpreter::Interpreter,
    },
};

/// Push the number of characters in the receiver.
///
/// Signature: ` -- size`
fn string_size(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let size = receiver.as_string(interpreter)?.chars().count();

    interpreter.push(size.into());
    Ok(())
}

/// Compare the receiver with a STRING argument.
///
/// Signature: `argument -- bool`
fn string_equal(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let argument = interpreter.pop_resolved()?;
    let equal = argument.as_string(interpreter)? == receiver.as_string(interpreter)?;

    interpreter.push(equal.into());
    Ok(())
}

pub fn register_string_messages(interpreter: &mut dyn Interpreter) {
    add_native_message!(
        interpreter,
        PrimitiveType::String,
        "SIZE",
        string_size,
        "Number of characters in the receiver.",
        " -- size"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::String,
        "=",
        string_equal,
        "Is the receiver equal to the argument?",
        "argument -- bool"
    );
}
