use std::rc::Rc;

use crate::ast::Expr;
use crate::interpreter::evaluator::core::{EvalContext, EvalResult, eval_expression};
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;

/// Builds a slice value from `a :: b`.
///
/// A `_` on either side takes the default: start 0, end "whole length"
/// (a sentinel the array path clamps down).
pub fn eval_slice_literal(left: &Expr,
                          right: &Expr,
                          env: &Rc<Scope>,
                          ctx: &mut EvalContext)
                          -> EvalResult<Value> {
    let start = eval_slice_bound(left, 0, env, ctx)?;
    let end = eval_slice_bound(right, i64::MAX, env, ctx)?;
    Ok(Value::Slice(start, end))
}

fn eval_slice_bound(bound: &Expr, default: i64, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<i64> {
    if matches!(bound, Expr::Identifier { name, .. } if name == "_") {
        return Ok(default);
    }
    match eval_expression(bound, env, ctx)? {
        Value::Integer(n) => Ok(n),
        _ => Err(ctx.error("slice bounds must be integers")),
    }
}

/// The `@` index operator, dispatched on the operand kinds.
pub fn eval_index(left: &Value, index: &Value, ctx: &mut EvalContext) -> EvalResult<Value> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => Ok(array_index(elements, *i)),
        (Value::Array(elements), Value::Slice(start, end)) => {
            Ok(array_slice(elements, *start, *end))
        },
        (Value::Array(elements), Value::Array(mask)) => array_mask(elements, mask, ctx),
        (Value::Str(s), Value::Integer(i)) => Ok(string_index(s, *i)),
        (Value::Tuple(elements), Value::Integer(i)) => Ok(tuple_index(elements, *i)),
        (Value::Map(map), key) => Ok(map.get_value(key).cloned().unwrap_or_else(Value::nil)),
        _ => Err(ctx.error(format!("index operator not supported: {}", left.type_name()))),
    }
}

/// Bounded access; negative indices count from the end, anything out of
/// range is `nil` rather than an error.
fn array_index(elements: &[Value], index: i64) -> Value {
    let len = elements.len() as i64;
    let index = if index < 0 { len + index } else { index };
    if index < 0 || index >= len {
        return Value::nil();
    }
    elements[index as usize].clone()
}

/// `[start, end)` with negatives taken relative to the length and both
/// bounds clamped into `[0, len]`; an inverted range is empty.
fn array_slice(elements: &[Value], start: i64, end: i64) -> Value {
    let len = elements.len() as i64;
    let start = (if start < 0 { len + start } else { start }).clamp(0, len);
    let end = (if end < 0 { len + end } else { end }).clamp(0, len);
    if start >= end {
        return Value::array(Vec::new());
    }
    Value::array(elements[start as usize..end as usize].to_vec())
}

/// Array-indexed-by-array: a boolean mask filters, an integer array
/// gathers, and an array or slice in head position indexes multiple
/// dimensions — the head picks rows, the tail recurses into each row.
fn array_mask(elements: &[Value], mask: &[Value], ctx: &mut EvalContext) -> EvalResult<Value> {
    let Some(head) = mask.first() else {
        return Err(ctx.error("mask array is empty"));
    };

    match head {
        Value::Bool(_) => {
            if elements.len() != mask.len() {
                return Err(ctx.error(format!("array length mismatch: {} != {}",
                                             elements.len(),
                                             mask.len())));
            }
            let selected = elements.iter()
                                   .zip(mask)
                                   .filter(|(_, keep)| matches!(keep, Value::Bool(true)))
                                   .map(|(element, _)| element.clone())
                                   .collect();
            Ok(Value::Array(Rc::new(selected)))
        },
        Value::Integer(_) => {
            let mut selected = Vec::with_capacity(mask.len());
            for index in mask {
                let Value::Integer(i) = index else {
                    return Err(ctx.error(format!("invalid mask element type: {}", index.type_name())));
                };
                if *i < 0 || *i >= elements.len() as i64 {
                    return Err(ctx.error(format!("index out of bounds: {i}")));
                }
                selected.push(elements[*i as usize].clone());
            }
            Ok(Value::array(selected))
        },
        Value::Array(_) | Value::Slice(..) => {
            let rows = eval_index(&Value::array(elements.to_vec()), head, ctx)?;
            let tail = &mask[1..];
            if tail.is_empty() {
                return Ok(rows);
            }

            let Value::Array(rows) = rows else {
                return Err(ctx.error(format!("invalid mask element type: {}", rows.type_name())));
            };
            // A single remaining element applies directly to each row, so
            // `m @ [0::2, 1]` picks column 1; a longer tail stays a mask
            // and keeps peeling dimensions.
            let tail_mask = if tail.len() == 1 { tail[0].clone() } else { Value::array(tail.to_vec()) };
            let mut selected = Vec::with_capacity(rows.len());
            for row in rows.iter() {
                selected.push(eval_index(row, &tail_mask, ctx)?);
            }
            Ok(Value::array(selected))
        },
        other => Err(ctx.error(format!("invalid mask element type: {}", other.type_name()))),
    }
}

/// Single-byte string access; positions are byte offsets and misses are
/// `nil`.
fn string_index(s: &str, index: i64) -> Value {
    let bytes = s.as_bytes();
    if index < 0 || index >= bytes.len() as i64 {
        return Value::nil();
    }
    Value::string((bytes[index as usize] as char).to_string())
}

/// Positional tuple access; no negative indexing, misses are `nil`.
fn tuple_index(elements: &[Value], index: i64) -> Value {
    if index < 0 || index >= elements.len() as i64 {
        return Value::nil();
    }
    elements[index as usize].clone()
}
