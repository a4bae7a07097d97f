use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::Value;

/// `Array.reverse(array)` — a reversed copy; the input is untouched.
pub fn reverse(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("reverse() takes exactly 1 argument"));
    }
    let Value::Array(elements) = &args[0] else {
        return Err(ctx.error("reverse() requires an array"));
    };

    let mut reversed = elements.as_slice().to_vec();
    reversed.reverse();
    Ok(Value::array(reversed))
}

/// `Array.range(stop)` / `Array.range(start, stop)` — the integers of
/// `[start, stop)`; an inverted range is empty.
pub fn range(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let (start, stop) = match args {
        [Value::Integer(stop)] => (0, *stop),
        [Value::Integer(start), Value::Integer(stop)] => (*start, *stop),
        [_] | [_, _] => return Err(ctx.error("range() requires integer arguments")),
        _ => return Err(ctx.error("range() takes 1 or 2 arguments")),
    };

    if start >= stop {
        return Ok(Value::array(Vec::new()));
    }
    Ok(Value::array((start..stop).map(Value::Integer).collect()))
}
