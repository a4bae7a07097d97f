use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::Value;

fn number(ctx: &EvalContext, value: &Value, name: &str) -> EvalResult<f64> {
    match value {
        Value::Integer(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        _ => Err(ctx.error(format!("{name}() requires a number"))),
    }
}

/// `Math.abs(x)` — preserves the numeric kind.
pub fn abs(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("abs() takes exactly 1 argument"));
    }
    match &args[0] {
        Value::Integer(n) => Ok(Value::Integer(n.abs())),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        _ => Err(ctx.error("abs() requires a number")),
    }
}

pub fn ceiling(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("ceiling() takes exactly 1 argument"));
    }
    Ok(Value::Float(number(ctx, &args[0], "ceiling")?.ceil()))
}

pub fn floor(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("floor() takes exactly 1 argument"));
    }
    Ok(Value::Float(number(ctx, &args[0], "floor")?.floor()))
}

/// `Math.round(x)` / `Math.round(x, precision)` — nearest integer, or
/// rounded to `precision` decimal places.
pub fn round(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.is_empty() || args.len() > 2 {
        return Err(ctx.error("round() takes 1 or 2 arguments"));
    }
    let x = number(ctx, &args[0], "round")?;

    match args.get(1) {
        None => Ok(Value::Float(x.round())),
        Some(Value::Integer(precision)) => {
            let factor = 10f64.powi(*precision as i32);
            Ok(Value::Float((x * factor).round() / factor))
        },
        Some(_) => Err(ctx.error("precision must be an integer")),
    }
}

/// `Math.max(a, b)` — integer when both are integers, float otherwise.
pub fn max(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("max() requires exactly 2 arguments"));
    }
    if let (Value::Integer(a), Value::Integer(b)) = (&args[0], &args[1]) {
        return Ok(Value::Integer(*a.max(b)));
    }
    let a = number(ctx, &args[0], "max")?;
    let b = number(ctx, &args[1], "max")?;
    Ok(Value::Float(a.max(b)))
}

/// `Math.min(a, b)` — integer when both are integers, float otherwise.
pub fn min(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("min() requires exactly 2 arguments"));
    }
    if let (Value::Integer(a), Value::Integer(b)) = (&args[0], &args[1]) {
        return Ok(Value::Integer(*a.min(b)));
    }
    let a = number(ctx, &args[0], "min")?;
    let b = number(ctx, &args[1], "min")?;
    Ok(Value::Float(a.min(b)))
}

pub fn pi(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if !args.is_empty() {
        return Err(ctx.error("pi() takes no arguments"));
    }
    Ok(Value::Float(std::f64::consts::PI))
}

/// `Math.sqrt(x)` — errors on a negative argument rather than producing a
/// NaN.
pub fn sqrt(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("sqrt() takes exactly 1 argument"));
    }
    let x = number(ctx, &args[0], "sqrt")?;
    if x < 0.0 {
        return Err(ctx.error("sqrt() requires a non-negative number"));
    }
    Ok(Value::Float(x.sqrt()))
}

pub fn sin(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("sin() takes exactly 1 argument"));
    }
    Ok(Value::Float(number(ctx, &args[0], "sin")?.sin()))
}

pub fn cos(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("cos() takes exactly 1 argument"));
    }
    Ok(Value::Float(number(ctx, &args[0], "cos")?.cos()))
}

pub fn tan(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("tan() takes exactly 1 argument"));
    }
    Ok(Value::Float(number(ctx, &args[0], "tan")?.tan()))
}
