use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::object::{Builtin, BuiltinFn, Value};

pub type BuiltinRegistry = HashMap<&'static str, Builtin>;

lazy_static! {
    /// Every native function, by the name it is bound to. Built once, never mutated.
    pub static ref BUILTINS: BuiltinRegistry = {
        let functions: [(&'static str, BuiltinFn); 6] = [
            ("len", len),
            ("first", first),
            ("last", last),
            ("rest", rest),
            ("push", push),
            ("puts", puts),
        ];

        functions.into_iter().map(|(name, func)| (name, Builtin { name, func })).collect()
    };
}

fn expect_arg_count(args: &[Value], want: usize) -> Result<(), RuntimeError> {
    if args.len() != want {
        return Err(RuntimeError::WrongArgumentCount { got: args.len(), want });
    }

    Ok(())
}

fn expect_array<'a>(builtin: &'static str, value: &'a Value) -> Result<&'a [Value], RuntimeError> {
    match value {
        Value::Array(elements) => Ok(elements.as_slice()),
        other => Err(RuntimeError::UnexpectedArgument { builtin, expected: "ARRAY", got: other.type_name() }),
    }
}

fn len(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arg_count(args, 1)?;

    match &args[0] {
        Value::String(value) => Ok(Value::Integer(value.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(RuntimeError::UnsupportedArgument { builtin: "len", got: other.type_name() }),
    }
}

fn first(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arg_count(args, 1)?;
    let elements = expect_array("first", &args[0])?;

    Ok(elements.first().cloned().unwrap_or(Value::Null))
}

fn last(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arg_count(args, 1)?;
    let elements = expect_array("last", &args[0])?;

    Ok(elements.last().cloned().unwrap_or(Value::Null))
}

fn rest(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arg_count(args, 1)?;
    let elements = expect_array("rest", &args[0])?;

    Ok(match elements.split_first() {
        Some((_, tail)) => Value::array(tail.to_vec()),
        None => Value::Null,
    })
}

fn push(args: &[Value]) -> Result<Value, RuntimeError> {
    expect_arg_count(args, 2)?;
    let elements = expect_array("push", &args[0])?;

    let mut pushed = Vec::with_capacity(elements.len() + 1);
    pushed.extend_from_slice(elements);
    pushed.push(args[1].clone());

    Ok(Value::array(pushed))
}

fn puts(args: &[Value]) -> Result<Value, RuntimeError> {
    for arg in args {
        println!("{}", arg);
    }

    Ok(Value::Integer(args.len() as i64))
}
