use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::{MapKey, Value, atom};

/// `Map.get(map, key)` / `Map.get(map, key, default)` — the value, or the
/// default (`nil` when none is given) on a miss.
pub fn get(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 && args.len() != 3 {
        return Err(ctx.error("get() takes 2 or 3 arguments"));
    }
    let Value::Map(map) = &args[0] else {
        return Err(ctx.error("get() requires a map"));
    };

    if let Some(value) = map.get_value(&args[1]) {
        return Ok(value.clone());
    }
    Ok(args.get(2).cloned().unwrap_or_else(Value::nil))
}

/// `Map.try_get(map, key)` — `{:ok, value}` or `{:error, :not_found}`.
pub fn try_get(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("try_get() takes exactly 2 arguments"));
    }
    let Value::Map(map) = &args[0] else {
        return Err(ctx.error("try_get() requires a map"));
    };

    match map.get_value(&args[1]) {
        Some(value) => Ok(Value::tagged(atom::OK, value.clone())),
        None => Ok(Value::tagged(atom::ERROR, Value::atom("not_found"))),
    }
}

/// `Map.has_key?(map, key)`
pub fn has_key(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("has_key?() takes exactly 2 arguments"));
    }
    let Value::Map(map) = &args[0] else {
        return Err(ctx.error("has_key?() requires a map"));
    };

    Ok(Value::Bool(map.contains_value(&args[1])))
}

/// `Map.keys(map)` — the keys as an array, in insertion order.
pub fn keys(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("keys() takes exactly 1 argument"));
    }
    let Value::Map(map) = &args[0] else {
        return Err(ctx.error("keys() requires a map"));
    };

    Ok(Value::array(map.keys().map(MapKey::to_value).collect()))
}

/// `Map.length(map)`
pub fn length(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("length() takes exactly 1 argument"));
    }
    let Value::Map(map) = &args[0] else {
        return Err(ctx.error("length() requires a map"));
    };

    Ok(Value::Integer(map.len() as i64))
}
