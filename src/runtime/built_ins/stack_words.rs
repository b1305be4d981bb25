use crate::runtime::{
    data_structures::value::Value,
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// Duplicate the top value on the operand stack.
///
/// Signature: `value -- value value`
pub fn word_duplicate(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.clone());
    interpreter.push(value);

    Ok(())
}

/// Swap the top 2 values on the operand stack.
///
/// Signature: `a b -- b a`
pub fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;
    let b = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Drop the top value on the operand stack.
///
/// Signature: `value -- `
pub fn word_remove(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Pop a depth index and check it against what is left of the stack.  The index must resolve to an
/// INTEGER.
fn pop_depth(interpreter: &mut dyn Interpreter) -> error::Result<usize> {
    let index = match interpreter.pop_resolved()? {
        Value::Integer(index) => index,
        other => {
            return script_error(
                interpreter,
                ErrorKind::BadIndex,
                format!("Stack index must be an INTEGER, found {}.", other),
            );
        }
    };
    let count = interpreter.stack().len() as i64;

    if index < 0 || index >= count {
        script_error(
            interpreter,
            ErrorKind::BadIndex,
            format!("Index {} out of range of stack size {}.", index, count),
        )?;
    }

    Ok(index as usize)
}

/// Copy the value at the given depth to the top of the stack, 0 being the top.
///
/// Signature: `index -- copied-value`
pub fn word_copy_at(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let depth = pop_depth(interpreter)?;
    let value = interpreter.peek_at(depth)?;

    interpreter.push(value);
    Ok(())
}

/// Move the value at the given depth to the top of the stack, 0 being the top.
///
/// Signature: `index -- extracted-value`
pub fn word_extract_at(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let depth = pop_depth(interpreter)?;
    let value = interpreter.pick(depth)?;

    interpreter.push(value);
    Ok(())
}
