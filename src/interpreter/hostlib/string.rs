use regex::Regex;

use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::{Value, atom};

fn str_arg<'a>(ctx: &EvalContext, value: &'a Value, name: &str) -> EvalResult<&'a str> {
    match value {
        Value::Str(s) => Ok(s),
        _ => Err(ctx.error(format!("{name}() requires a string"))),
    }
}

pub fn concat(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("concat() takes exactly 2 arguments"));
    }
    let left = str_arg(ctx, &args[0], "concat")?;
    let right = str_arg(ctx, &args[1], "concat")?;
    Ok(Value::string(format!("{left}{right}")))
}

pub fn contains(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("contains?() takes exactly 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "contains?")?;
    let needle = str_arg(ctx, &args[1], "contains?")?;
    Ok(Value::Bool(s.contains(needle)))
}

pub fn starts_with(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("starts_with?() takes exactly 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "starts_with?")?;
    let prefix = str_arg(ctx, &args[1], "starts_with?")?;
    Ok(Value::Bool(s.starts_with(prefix)))
}

pub fn ends_with(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("ends_with?() takes exactly 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "ends_with?")?;
    let suffix = str_arg(ctx, &args[1], "ends_with?")?;
    Ok(Value::Bool(s.ends_with(suffix)))
}

/// `String.index_of(s, sub)` — byte offset of the first occurrence, `-1`
/// when absent.
pub fn index_of(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("index_of() takes exactly 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "index_of")?;
    let needle = str_arg(ctx, &args[1], "index_of")?;
    let index = s.find(needle).map_or(-1, |i| i as i64);
    Ok(Value::Integer(index))
}

/// `String.length(s)` — the length in bytes, consistent with `@` indexing.
pub fn length(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("length() takes exactly 1 argument"));
    }
    let s = str_arg(ctx, &args[0], "length")?;
    Ok(Value::Integer(s.len() as i64))
}

pub fn lower(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("lower() takes exactly 1 argument"));
    }
    Ok(Value::string(str_arg(ctx, &args[0], "lower")?.to_lowercase()))
}

pub fn upper(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("upper() takes exactly 1 argument"));
    }
    Ok(Value::string(str_arg(ctx, &args[0], "upper")?.to_uppercase()))
}

/// `String.match?(s, pattern)` — whether the regular expression matches.
pub fn matches(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error("match?() takes exactly 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "match?")?;
    let pattern = str_arg(ctx, &args[1], "match?")?;

    let re = Regex::new(pattern).map_err(|err| ctx.error(err.to_string()))?;
    Ok(Value::Bool(re.is_match(s)))
}

/// `String.pad_left(s, count)` / `(s, count, pad)` — prepends `pad`
/// repeated `count` times (a space by default).
pub fn pad_left(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let (s, count, pad) = pad_arguments(ctx, args, "pad_left")?;
    Ok(Value::string(format!("{}{s}", pad.repeat(count))))
}

/// `String.pad_right(s, count)` / `(s, count, pad)` — appends `pad`
/// repeated `count` times (a space by default).
pub fn pad_right(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let (s, count, pad) = pad_arguments(ctx, args, "pad_right")?;
    Ok(Value::string(format!("{s}{}", pad.repeat(count))))
}

fn pad_arguments<'a>(ctx: &EvalContext,
                     args: &'a [Value],
                     name: &str)
                     -> EvalResult<(&'a str, usize, &'a str)> {
    if args.len() < 2 || args.len() > 3 {
        return Err(ctx.error(format!("{name}() takes 2 or 3 arguments")));
    }
    let s = str_arg(ctx, &args[0], name)?;
    let Value::Integer(count) = &args[1] else {
        return Err(ctx.error(format!("{name}() requires an integer")));
    };
    let pad = match args.get(2) {
        Some(value) => str_arg(ctx, value, name)?,
        None => " ",
    };
    Ok((s, (*count).max(0) as usize, pad))
}

/// `String.parse_num(s)` — an integer when the text has no fraction,
/// otherwise a float; malformed input is a runtime error.
pub fn parse_num(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("parse_num() takes exactly 1 argument"));
    }
    let s = str_arg(ctx, &args[0], "parse_num")?;

    parse_number(s).ok_or_else(|| ctx.error(format!("could not parse {s:?} as a number")))
}

/// `String.try_parse_num(s)` — `{:ok, number}` or `{:error, reason}`.
pub fn try_parse_num(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("try_parse_num() takes exactly 1 argument"));
    }
    let s = str_arg(ctx, &args[0], "try_parse_num")?;

    match parse_number(s) {
        Some(value) => Ok(Value::tagged(atom::OK, value)),
        None => Ok(Value::tagged(atom::ERROR,
                                 Value::string(format!("could not parse {s:?} as a number")))),
    }
}

fn parse_number(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::Integer(n));
    }
    trimmed.parse::<f64>().ok().map(Value::Float)
}

/// `String.replace(s, old, new)` — replaces the first occurrence only.
pub fn replace(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 3 {
        return Err(ctx.error("replace() takes exactly 3 arguments"));
    }
    let s = str_arg(ctx, &args[0], "replace")?;
    let old = str_arg(ctx, &args[1], "replace")?;
    let new = str_arg(ctx, &args[2], "replace")?;
    Ok(Value::string(s.replacen(old, new, 1)))
}

pub fn replace_all(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 3 {
        return Err(ctx.error("replace_all() takes exactly 3 arguments"));
    }
    let s = str_arg(ctx, &args[0], "replace_all")?;
    let old = str_arg(ctx, &args[1], "replace_all")?;
    let new = str_arg(ctx, &args[2], "replace_all")?;
    Ok(Value::string(s.replace(old, new)))
}

/// `String.split(s)` / `String.split(s, sep)` — with no (or an empty)
/// separator the string splits into single characters.
pub fn split(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.is_empty() || args.len() > 2 {
        return Err(ctx.error("split() takes 1 or 2 arguments"));
    }
    let s = str_arg(ctx, &args[0], "split")?;
    let sep = match args.get(1) {
        Some(value) => str_arg(ctx, value, "split")?,
        None => "",
    };

    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|ch| Value::string(ch.to_string())).collect()
    } else {
        s.split(sep).map(Value::string).collect()
    };
    Ok(Value::array(parts))
}

pub fn trim(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("trim() takes exactly 1 argument"));
    }
    Ok(Value::string(str_arg(ctx, &args[0], "trim")?.trim()))
}

pub fn trim_start(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("trim_start() takes exactly 1 argument"));
    }
    Ok(Value::string(str_arg(ctx, &args[0], "trim_start")?.trim_start()))
}

pub fn trim_end(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error("trim_end() takes exactly 1 argument"));
    }
    Ok(Value::string(str_arg(ctx, &args[0], "trim_end")?.trim_end()))
}
