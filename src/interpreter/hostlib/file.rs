use std::fs;

use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::{Value, atom};

/// `File.open(path)` — `{:ok, contents}` or `{:error, reason}`.
pub fn open(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("open() takes exactly 1 argument"));
    }
    let Value::Str(path) = &args[0] else {
        return Err(ctx.error("open() requires a string"));
    };

    match fs::read_to_string(path.as_ref()) {
        Ok(contents) => Ok(Value::tagged(atom::OK, Value::string(contents))),
        Err(err) => Ok(Value::tagged(atom::ERROR, Value::string(err.to_string()))),
    }
}

/// `File.open!(path)` — the contents, or a runtime error on failure.
pub fn open_bang(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("open!() takes exactly 1 argument"));
    }
    let Value::Str(path) = &args[0] else {
        return Err(ctx.error("open!() requires a string"));
    };

    match fs::read_to_string(path.as_ref()) {
        Ok(contents) => Ok(Value::string(contents)),
        Err(err) => Err(ctx.error(err.to_string())),
    }
}

/// `File.write(contents, path)` — `{:ok, nil}` or `{:error, reason}`.
pub fn write(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("write() takes exactly 2 arguments"));
    }
    let (Value::Str(contents), Value::Str(path)) = (&args[0], &args[1]) else {
        return Err(ctx.error("write() requires strings"));
    };

    match fs::write(path.as_ref(), contents.as_bytes()) {
        Ok(()) => Ok(Value::tagged(atom::OK, Value::nil())),
        Err(err) => Ok(Value::tagged(atom::ERROR, Value::string(err.to_string()))),
    }
}

/// `File.write!(contents, path)` — `:ok`, or a runtime error on failure.
pub fn write_bang(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("write!() takes exactly 2 arguments"));
    }
    let (Value::Str(contents), Value::Str(path)) = (&args[0], &args[1]) else {
        return Err(ctx.error("write!() requires strings"));
    };

    match fs::write(path.as_ref(), contents.as_bytes()) {
        Ok(()) => Ok(Value::ok()),
        Err(err) => Err(ctx.error(err.to_string())),
    }
}
