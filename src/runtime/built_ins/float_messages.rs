use crate::{
    add_native_message,
    runtime::{
        data_structures::value::{PrimitiveType, Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Read the receiver and pop the argument.  INTEGER arguments are widened.
fn operands(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<(f64, f64)> {
    let a = *receiver.as_float(interpreter)?;
    let argument = interpreter.pop_resolved()?;
    let b = argument.as_number(interpreter)?;

    Ok((a, b))
}

fn float_add(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    interpreter.push(Value::Float(a + b));
    Ok(())
}

fn float_subtract(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    interpreter.push(Value::Float(a - b));
    Ok(())
}

fn float_multiply(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    interpreter.push(Value::Float(a * b));
    Ok(())
}

fn float_divide(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    if b == 0.0 {
        return script_error(
            interpreter,
            ErrorKind::Arithmetic,
            format!("Division by zero in {} / {}.", Value::Float(a), Value::Float(b)),
        );
    }

    interpreter.push(Value::Float(a / b));
    Ok(())
}

fn float_greater(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    interpreter.push((a > b).into());
    Ok(())
}

fn float_equal(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let (a, b) = operands(interpreter, receiver)?;

    interpreter.push((a == b).into());
    Ok(())
}

pub fn register_float_messages(interpreter: &mut dyn Interpreter) {
    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        "+",
        float_add,
        "Add the argument to the receiver.",
        "argument -- sum"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        "-",
        float_subtract,
        "Subtract the argument from the receiver.",
        "argument -- difference"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        "*",
        float_multiply,
        "Multiply the receiver by the argument.",
        "argument -- product"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        "/",
        float_divide,
        "Divide the receiver by the argument.",
        "argument -- quotient"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        ">",
        float_greater,
        "Is the receiver greater than the argument?",
        "argument -- bool"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Float,
        "=",
        float_equal,
        "Is the receiver equal to the argument?",
        "argument -- bool"
    );
}
