use crate::{
    add_native_message,
    runtime::{
        data_structures::value::{PrimitiveType, Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Push the number of elements of the receiver.
///
/// Signature: ` -- size`
fn list_size(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let size = receiver.as_list(interpreter)?.len();

    interpreter.push(size.into());
    Ok(())
}

/// The receiver is the loop body.  The condition block is run before every pass and must leave a
/// BOOLEAN, the loop ends at the first NO.
///
/// Signature: `condition-block -- <final state>`
fn list_while(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let body = receiver.as_list(interpreter)?;
    let condition = interpreter.pop_as_list()?;

    loop {
        interpreter.evaluate(&condition)?;

        match interpreter.pop_resolved()? {
            Value::Boolean(true) => interpreter.evaluate(body)?,
            Value::Boolean(false) => break,
            other => {
                return script_error(
                    interpreter,
                    ErrorKind::NotBoolean,
                    format!("WHILE condition must leave a BOOLEAN, found {}.", other),
                );
            }
        }
    }

    Ok(())
}

/// Run the receiver.
///
/// Signature: ` -- <list result>`
fn list_do(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let body = receiver.as_list(interpreter)?;
    interpreter.evaluate(body)
}

pub fn register_list_messages(interpreter: &mut dyn Interpreter) {
    add_native_message!(
        interpreter,
        PrimitiveType::List,
        "SIZE",
        list_size,
        "Number of elements in the receiver.",
        " -- size"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::List,
        "WHILE",
        list_while,
        "Run the receiver as long as the condition block leaves YES.",
        "condition-block -- "
    );

    add_native_message!(
        interpreter,
        PrimitiveType::List,
        "DO",
        list_do,
        "Run the receiver as code.",
        " -- "
    );
}
