use crate::{
    add_native_message,
    runtime::{
        data_structures::value::{PrimitiveType, Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Division rounding towards negative infinity.  `None` on overflow.
fn floored_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;

    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Remainder taking the sign of the divisor.
fn floored_mod(a: i64, b: i64) -> Option<i64> {
    if b == -1 {
        return Some(0);
    }

    let remainder = a.checked_rem(b)?;

    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Some(remainder + b)
    } else {
        Some(remainder)
    }
}

/// Push `a op b`, failing on overflow.
fn push_checked(
    interpreter: &mut dyn Interpreter,
    a: i64,
    name: &str,
    b: i64,
    operation: fn(i64, i64) -> Option<i64>,
) -> error::Result<()> {
    match operation(a, b) {
        Some(result) => {
            interpreter.push(Value::Integer(result));
            Ok(())
        }

        None => script_error(
            interpreter,
            ErrorKind::Arithmetic,
            format!("Integer overflow in {} {} {}.", a, name, b),
        ),
    }
}

/// Pop the argument and apply a checked operation as `receiver op argument`.
fn checked_operation(
    interpreter: &mut dyn Interpreter,
    receiver: &Value,
    name: &str,
    operation: fn(i64, i64) -> Option<i64>,
) -> error::Result<()> {
    let a = *receiver.as_integer(interpreter)?;
    let b = interpreter.pop_as_int()?;

    push_checked(interpreter, a, name, b, operation)
}

/// As `checked_operation`, but a zero argument is an error.
fn checked_division(
    interpreter: &mut dyn Interpreter,
    receiver: &Value,
    name: &str,
    operation: fn(i64, i64) -> Option<i64>,
) -> error::Result<()> {
    let a = *receiver.as_integer(interpreter)?;
    let b = interpreter.pop_as_int()?;

    if b == 0 {
        return script_error(
            interpreter,
            ErrorKind::Arithmetic,
            format!("Division by zero in {} {} {}.", a, name, b),
        );
    }

    push_checked(interpreter, a, name, b, operation)
}

fn integer_add(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    checked_operation(interpreter, receiver, "+", i64::checked_add)
}

fn integer_subtract(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    checked_operation(interpreter, receiver, "-", i64::checked_sub)
}

fn integer_multiply(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    checked_operation(interpreter, receiver, "*", i64::checked_mul)
}

fn integer_divide(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    checked_division(interpreter, receiver, "/", floored_div)
}

fn integer_modulo(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    checked_division(interpreter, receiver, "%", floored_mod)
}

fn integer_greater(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_integer(interpreter)?;
    let b = interpreter.pop_as_int()?;

    interpreter.push((a > b).into());
    Ok(())
}

fn integer_equal(interpreter: &mut dyn Interpreter, receiver: &Value) -> error::Result<()> {
    let a = *receiver.as_integer(interpreter)?;
    let b = interpreter.pop_as_int()?;

    interpreter.push((a == b).into());
    Ok(())
}

pub fn register_integer_messages(interpreter: &mut dyn Interpreter) {
    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "+",
        integer_add,
        "Add the argument to the receiver.",
        "argument -- sum"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "-",
        integer_subtract,
        "Subtract the argument from the receiver.",
        "argument -- difference"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "*",
        integer_multiply,
        "Multiply the receiver by the argument.",
        "argument -- product"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "/",
        integer_divide,
        "Divide the receiver by the argument, rounding down.",
        "argument -- quotient"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "%",
        integer_modulo,
        "Remainder of the floored division of the receiver by the argument.",
        "argument -- remainder"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        ">",
        integer_greater,
        "Is the receiver greater than the argument?",
        "argument -- bool"
    );

    add_native_message!(
        interpreter,
        PrimitiveType::Integer,
        "=",
        integer_equal,
        "Is the receiver equal to the argument?",
        "argument -- bool"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floored_division_rounds_down() {
        assert_eq!(floored_div(7, 2), Some(3));
        assert_eq!(floored_div(-7, 2), Some(-4));
        assert_eq!(floored_div(7, -2), Some(-4));
        assert_eq!(floored_div(-7, -2), Some(3));
        assert_eq!(floored_div(i64::MIN, -1), None);
    }

    #[test]
    fn floored_modulo_follows_divisor_sign() {
        assert_eq!(floored_mod(7, 3), Some(1));
        assert_eq!(floored_mod(-7, 3), Some(2));
        assert_eq!(floored_mod(7, -3), Some(-2));
        assert_eq!(floored_mod(i64::MIN, -1), Some(0));
    }
}
