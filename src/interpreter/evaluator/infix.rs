use crate::ast::{InfixOp, PrefixOp};
use crate::interpreter::evaluator::core::{EvalContext, EvalResult};
use crate::interpreter::value::Value;

/// Infix operator dispatch by the pair of operand kinds.
///
/// Numeric pairs widen to float when mixed; strings support concatenation
/// and lexicographic comparison; arrays get elementwise math against arrays
/// of the same length or broadcast against a scalar. `==`/`!=` between
/// unrelated kinds degenerate to identity, which with interned atoms means
/// "the same atom" and is `false` for everything else.
pub fn eval_infix(op: InfixOp, left: &Value, right: &Value, ctx: &EvalContext) -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r, ctx),
        (Value::Float(l), Value::Float(r)) => eval_float_infix(op, *l, *r, ctx),
        (Value::Float(l), Value::Integer(r)) => eval_float_infix(op, *l, *r as f64, ctx),
        (Value::Integer(l), Value::Float(r)) => eval_float_infix(op, *l as f64, *r, ctx),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(op, l, r, ctx),
        (Value::Array(l), Value::Array(r)) => eval_array_infix(op, l, r, ctx),
        (Value::Array(l), Value::Integer(_) | Value::Float(_)) => {
            eval_array_scalar_infix(op, l, right, ctx)
        },
        _ => match op {
            InfixOp::Eq => Ok(Value::Bool(identity_equal(left, right))),
            InfixOp::Neq => Ok(Value::Bool(!identity_equal(left, right))),
            _ if left.type_name() != right.type_name() => {
                Err(ctx.error(format!("type mismatch: {} {op} {}",
                                      left.type_name(),
                                      right.type_name())))
            },
            _ => Err(ctx.error(format!("unknown operator: {} {op} {}",
                                       left.type_name(),
                                       right.type_name()))),
        },
    }
}

/// The `==` fallback across kinds: atoms are interned, so equal spellings
/// are the same atom; booleans have two canonical instances. Every other
/// pairing is a different reference.
fn identity_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Atom(l), Value::Atom(r)) => l == r,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        _ => false,
    }
}

fn eval_integer_infix(op: InfixOp, left: i64, right: i64, ctx: &EvalContext) -> EvalResult<Value> {
    let value = match op {
        InfixOp::Add => Value::Integer(left.wrapping_add(right)),
        InfixOp::Sub => Value::Integer(left.wrapping_sub(right)),
        InfixOp::Mul => Value::Integer(left.wrapping_mul(right)),
        InfixOp::Div => {
            if right == 0 {
                return Err(ctx.error("division by zero"));
            }
            Value::Integer(left.wrapping_div(right))
        },
        InfixOp::Mod => {
            if right == 0 {
                return Err(ctx.error("division by zero"));
            }
            Value::Integer(left.wrapping_rem(right))
        },
        InfixOp::Pow => Value::Integer((left as f64).powf(right as f64) as i64),
        InfixOp::Lt => Value::Bool(left < right),
        InfixOp::Gt => Value::Bool(left > right),
        InfixOp::Lte => Value::Bool(left <= right),
        InfixOp::Gte => Value::Bool(left >= right),
        InfixOp::Eq => Value::Bool(left == right),
        InfixOp::Neq => Value::Bool(left != right),
        _ => {
            return Err(ctx.error(format!("unknown operator: INTEGER {op} INTEGER")));
        },
    };
    Ok(value)
}

fn eval_float_infix(op: InfixOp, left: f64, right: f64, ctx: &EvalContext) -> EvalResult<Value> {
    let value = match op {
        InfixOp::Add => Value::Float(left + right),
        InfixOp::Sub => Value::Float(left - right),
        InfixOp::Mul => Value::Float(left * right),
        // IEEE-754: division by zero yields an infinity or NaN.
        InfixOp::Div => Value::Float(left / right),
        InfixOp::Mod => Value::Float(left % right),
        InfixOp::Pow => Value::Float(left.powf(right)),
        InfixOp::Lt => Value::Bool(left < right),
        InfixOp::Gt => Value::Bool(left > right),
        InfixOp::Lte => Value::Bool(left <= right),
        InfixOp::Gte => Value::Bool(left >= right),
        InfixOp::Eq => Value::Bool(left == right),
        InfixOp::Neq => Value::Bool(left != right),
        _ => {
            return Err(ctx.error(format!("unknown operator: FLOAT {op} FLOAT")));
        },
    };
    Ok(value)
}

fn eval_string_infix(op: InfixOp, left: &str, right: &str, ctx: &EvalContext) -> EvalResult<Value> {
    let value = match op {
        InfixOp::Add => Value::string(format!("{left}{right}")),
        InfixOp::Eq => Value::Bool(left == right),
        InfixOp::Neq => Value::Bool(left != right),
        InfixOp::Lt => Value::Bool(left < right),
        InfixOp::Gt => Value::Bool(left > right),
        InfixOp::Lte => Value::Bool(left <= right),
        InfixOp::Gte => Value::Bool(left >= right),
        _ => {
            return Err(ctx.error(format!("unknown operator: STRING {op} STRING")));
        },
    };
    Ok(value)
}

/// `array ⊗ array`: elementwise for the arithmetic and comparison
/// operators, concatenation for `++`, and the deep equality pair
/// `===`/`!==` collapsing to a single boolean.
fn eval_array_infix(op: InfixOp, left: &[Value], right: &[Value], ctx: &EvalContext) -> EvalResult<Value> {
    match op {
        InfixOp::Add
        | InfixOp::Sub
        | InfixOp::Mul
        | InfixOp::Div
        | InfixOp::Mod
        | InfixOp::Pow
        | InfixOp::Lt
        | InfixOp::Gt
        | InfixOp::Lte
        | InfixOp::Gte
        | InfixOp::Eq
        | InfixOp::Neq => {
            if left.len() != right.len() {
                return Err(ctx.error(format!("vector length mismatch: {} != {}",
                                             left.len(),
                                             right.len())));
            }
            let mut elements = Vec::with_capacity(left.len());
            for (l, r) in left.iter().zip(right) {
                elements.push(eval_infix(op, l, r, ctx)?);
            }
            Ok(Value::array(elements))
        },
        InfixOp::Concat => {
            let mut elements = Vec::with_capacity(left.len() + right.len());
            elements.extend_from_slice(left);
            elements.extend_from_slice(right);
            Ok(Value::array(elements))
        },
        InfixOp::DeepEq => Ok(Value::Bool(deep_equal(left, right))),
        InfixOp::DeepNeq => Ok(Value::Bool(!deep_equal(left, right))),
        _ => Err(ctx.error(format!("unknown operator: ARRAY {op} ARRAY"))),
    }
}

fn deep_equal(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l == r)
}

/// `array ⊗ scalar` broadcasts the scalar across every element, preserving
/// index order; nested arrays recurse through the array/array path.
fn eval_array_scalar_infix(op: InfixOp, left: &[Value], scalar: &Value, ctx: &EvalContext) -> EvalResult<Value> {
    match op {
        InfixOp::Add
        | InfixOp::Sub
        | InfixOp::Mul
        | InfixOp::Div
        | InfixOp::Mod
        | InfixOp::Pow
        | InfixOp::Lt
        | InfixOp::Gt
        | InfixOp::Lte
        | InfixOp::Gte
        | InfixOp::Eq
        | InfixOp::Neq => {
            let mut elements = Vec::with_capacity(left.len());
            for l in left {
                elements.push(eval_infix(op, l, scalar, ctx)?);
            }
            Ok(Value::array(elements))
        },
        _ => Err(ctx.error(format!("unknown operator: ARRAY {op} {}", scalar.type_name()))),
    }
}

/// Prefix operators: `!` toggles truthiness; `-` negates numerics and the
/// start bound of a slice (which is how `-1 :: x` comes out of the parser).
pub fn eval_prefix(op: PrefixOp, right: &Value, ctx: &EvalContext) -> EvalResult<Value> {
    match op {
        PrefixOp::Not => Ok(Value::Bool(!right.is_truthy())),
        PrefixOp::Neg => match right {
            Value::Integer(n) => Ok(Value::Integer(-n)),
            Value::Float(x) => Ok(Value::Float(-x)),
            Value::Slice(start, end) => Ok(Value::Slice(-start, *end)),
            other => Err(ctx.error(format!("unknown operator: -{}", other.type_name()))),
        },
    }
}
