use crate::{
    add_native_message,
    runtime::{
        data_structures::value::{PrimitiveType, Value},
        error,
        interpreter::Interpreter,
    },
};

/// Run the block only if the receiver is YES.
///
/// Signature: `block -- <block result>`
fn boolean_if(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let condition = *receiver.as_boolean(interpreter)?;
    let block = interpreter.pop_as_list()?;

    if condition {
        interpreter.evaluate(&block)?;
    }

    Ok(())
}

/// Run exactly one of the two blocks, the first for YES.
///
/// Signature: `yes-block no-block -- <block result>`
fn boolean_if_else(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let condition = *receiver.as_boolean(interpreter)?;
    let no_block = interpreter.pop_as_list()?;
    let yes_block = interpreter.pop_as_list()?;

    if condition {
        interpreter.evaluate(&yes_block)
    } else {
        interpreter.evaluate(&no_block)
    }
}

fn boolean_and(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_boolean(interpreter)?;
    let b = interpreter.pop_as_bool()?;

    interpreter.push((a && b).into());
    Ok(())
}

fn boolean_or(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_boolean(interpreter)?;
    let b = interpreter.pop_as_bool()?;

    interpreter.push((a || b).into());
    Ok(())
}

fn boolean_not(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_boolean(interpreter)?;

    interpreter.push((!a).into());
    Ok(())
}

fn boolean_equal(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_boolean(interpreter)?;
    let b = interpreter.pop_as_bool()?;

    interpreter.push((a == b).into());
    Ok(())
}

pub fn register_boolean_messages(interpreter: &mut dyn Interpreter) {
    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "IF",
        boolean_if,
        "Run the block if the receiver is YES.",
        "block -- "
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "IF-ELSE",
        boolean_if_else,
        "Run the first block if the receiver is YES, otherwise the second.",
        "yes-block no-block -- "
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "AND",
        boolean_and,
        "Logical and of the receiver and the argument.",
        "argument -- bool"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "OR",
        boolean_or,
        "Logical or of the receiver and the argument.",
        "argument -- bool"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "NOT",
        boolean_not,
        "Logical negation of the receiver.",
        " -- bool"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Boolean,
        "=",
        boolean_equal,
        "Is the receiver equal to the argument?",
        "argument -- bool"
    );
}
