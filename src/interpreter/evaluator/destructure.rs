use std::rc::Rc;

use crate::ast::Expr;
use crate::interpreter::evaluator::core::{EvalContext, EvalResult, eval_expression};
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;

/// Binds a `let`/`case` pattern against a value.
///
/// Patterns nest: a tuple pattern may hold identifiers, further tuple/array
/// patterns, or arbitrary expressions that must compare structurally equal
/// to the matching component. The first mismatch short-circuits; bindings
/// already made into `env` stay (a failed `case` arm throws the whole child
/// scope away, so partial binds are never observable).
pub fn bind_pattern(pattern: &Expr, value: Value, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    match pattern {
        Expr::Identifier { name, .. } => {
            if name != "_" {
                check_binding_name(name, ctx)?;
                env.set(name, value.clone());
            }
            Ok(value)
        },
        Expr::TupleLiteral { elements, .. } => {
            destructure_tuple(elements, &value, env, ctx)?;
            Ok(Value::ok())
        },
        Expr::ArrayLiteral { elements, .. } => {
            destructure_array(elements, &value, env, ctx)?;
            Ok(Value::ok())
        },
        Expr::MapLiteral { pairs, .. } => {
            destructure_map(pairs, &value, env, ctx)?;
            Ok(value)
        },
        _ => Err(ctx.error("invalid left-hand side of assignment")),
    }
}

/// Local bindings shall not look like module references.
fn check_binding_name(name: &str, ctx: &EvalContext) -> EvalResult<()> {
    if name.chars().next().is_some_and(char::is_uppercase) {
        return Err(ctx.error("local variables can not start with an uppercase letter"));
    }
    Ok(())
}

fn destructure_tuple(elements: &[Expr], value: &Value, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<()> {
    let Value::Tuple(items) = value else {
        return Err(ctx.error("right-hand side of assignment is not a tuple"));
    };
    if elements.len() != items.len() {
        return Err(ctx.error("cannot destructure tuple: size mismatch"));
    }

    for (element, item) in elements.iter().zip(items.iter()) {
        destructure_element(element, item, env, ctx, "tuple")?;
    }
    Ok(())
}

fn destructure_array(elements: &[Expr], value: &Value, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<()> {
    let Value::Array(items) = value else {
        return Err(ctx.error("right-hand side of assignment is not an array"));
    };
    if elements.len() != items.len() {
        return Err(ctx.error("cannot destructure array: size mismatch"));
    }

    for (element, item) in elements.iter().zip(items.iter()) {
        destructure_element(element, item, env, ctx, "array")?;
    }
    Ok(())
}

/// One component of a tuple/array pattern: an identifier binds, a nested
/// tuple/array/map pattern recurses, anything else is evaluated and must
/// equal the component value.
fn destructure_element(element: &Expr,
                       item: &Value,
                       env: &Rc<Scope>,
                       ctx: &mut EvalContext,
                       shape: &str)
                       -> EvalResult<()> {
    match element {
        Expr::Identifier { name, .. } => {
            if name != "_" {
                check_binding_name(name, ctx)?;
                env.set(name, item.clone());
            }
            Ok(())
        },
        Expr::TupleLiteral { elements, .. } => destructure_tuple(elements, item, env, ctx),
        Expr::ArrayLiteral { elements, .. } => destructure_array(elements, item, env, ctx),
        Expr::MapLiteral { pairs, .. } => destructure_map(pairs, item, env, ctx),
        literal => {
            let candidate = eval_expression(literal, env, ctx)?;
            if candidate == *item {
                Ok(())
            } else {
                Err(ctx.error(format!("cannot destructure {shape}: value mismatch")))
            }
        },
    }
}

/// `let {k1: p1, k2: p2} = m` — each key is looked up and its value bound or
/// matched against the inner pattern. A missing key is a mismatch.
fn destructure_map(pairs: &[(Expr, Expr)], value: &Value, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<()> {
    let Value::Map(map) = value else {
        return Err(ctx.error(format!("expected map, got {}", value.type_name())));
    };

    for (key_expr, pattern) in pairs {
        let key = eval_expression(key_expr, env, ctx)?;
        let Some(item) = map.get_value(&key).cloned() else {
            return Err(ctx.error(format!("key not found: {}", key.inspect())));
        };

        match pattern {
            Expr::Identifier { name, .. } => {
                if name != "_" {
                    check_binding_name(name, ctx)?;
                    env.set(name, item);
                }
            },
            Expr::MapLiteral { pairs, .. } => destructure_map(pairs, &item, env, ctx)?,
            Expr::TupleLiteral { elements, .. } => destructure_tuple(elements, &item, env, ctx)?,
            Expr::ArrayLiteral { elements, .. } => destructure_array(elements, &item, env, ctx)?,
            literal => {
                let candidate = eval_expression(literal, env, ctx)?;
                if candidate != item {
                    return Err(ctx.error("cannot destructure map: value mismatch"));
                }
            },
        }
    }
    Ok(())
}
