use crate::interpreter::evaluator::core::{EvalContext, EvalResult, apply_function};
use crate::interpreter::value::{Builtin, Value, atom};

/// Resolves a name in the process-wide builtin table.
///
/// Identifier resolution falls back here once a name is unbound in every
/// enclosing scope, so user bindings shadow builtins.
#[must_use]
pub fn lookup(name: &str) -> Option<Builtin> {
    let builtin = match name {
        "len" => Builtin { name: "len", func: len },
        "print" => Builtin { name: "print", func: print },
        "type" => Builtin { name: "type", func: type_of },
        "inspect" => Builtin { name: "inspect", func: inspect },
        "os_args" => Builtin { name: "os_args", func: os_args },
        "loop" => Builtin { name: "loop", func: looping },
        _ => return None,
    };
    Some(builtin)
}

/// Builtins attached to the `Array` module after its stdlib source loads.
pub const ARRAY_ITER: Builtin = Builtin { name: "iter", func: iter };
pub const ARRAY_REDUCE: Builtin = Builtin { name: "reduce", func: reduce };
pub const ARRAY_REDUCE_WHILE: Builtin = Builtin { name: "reduce_while", func: reduce_while };

fn len(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error(format!("wrong number of arguments. got={}, want=1", args.len())));
    }

    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) | Value::Tuple(elements) => Ok(Value::Integer(elements.len() as i64)),
        Value::Map(map) => Ok(Value::Integer(map.len() as i64)),
        other => Err(ctx.error(format!("argument to `len` not supported, got {}", other.type_name()))),
    }
}

fn print(_ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let rendered = args.iter().map(Value::inspect).collect::<Vec<_>>().join(" ");
    println!("{rendered}");
    Ok(Value::nil())
}

fn type_of(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error(format!("wrong number of arguments. got={}, want=1", args.len())));
    }
    Ok(Value::string(args[0].type_name()))
}

fn inspect(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 1 {
        return Err(ctx.error(format!("wrong number of arguments. got={}, want=1", args.len())));
    }
    Ok(Value::string(args[0].inspect()))
}

fn os_args(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if !args.is_empty() {
        return Err(ctx.error(format!("wrong number of arguments. got={}, want=0", args.len())));
    }
    let values = ctx.args.iter().map(Value::string).collect();
    Ok(Value::array(values))
}

/// `loop(acc, f)`: applies `f(acc)` repeatedly, expecting `{:cont, acc}` to
/// keep going or `{:halt, acc}` to stop with the final accumulator.
fn looping(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error(format!("loop() takes exactly 2 arguments, got {}", args.len())));
    }

    let mut acc = args[0].clone();
    loop {
        match step(&args[1], &[acc], ctx)? {
            Step::Cont(next) => acc = next,
            Step::Halt(result) => return Ok(result),
        }
    }
}

/// `reduce(array, [init,] f)`: plain left fold; `f(acc, element)` returns
/// the next accumulator. Without an initial value the first element seeds
/// the fold, and an empty array is an error.
fn reduce(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let (elements, mut acc, f) = fold_arguments("reduce", ctx, args)?;

    for element in elements {
        acc = apply_function(f, &[acc, element.clone()], ctx)?;
    }
    Ok(acc)
}

/// `reduce_while(array, [init,] f)`: fold with the `loop` state-machine
/// contract — `f(acc, element)` returns `{:cont, acc}` to continue or
/// `{:halt, acc}` to stop early.
fn reduce_while(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    let (elements, mut acc, f) = fold_arguments("reduce_while", ctx, args)?;

    for element in elements {
        match step(f, &[acc, element.clone()], ctx)? {
            Step::Cont(next) => acc = next,
            Step::Halt(result) => return Ok(result),
        }
    }
    Ok(acc)
}

/// `iter(array, f)`: applies `f` to each element for its effects.
fn iter(ctx: &mut EvalContext, args: &[Value]) -> EvalResult<Value> {
    if args.len() != 2 {
        return Err(ctx.error(format!("iter() takes exactly 2 arguments, got {}", args.len())));
    }
    let Value::Array(elements) = &args[0] else {
        return Err(ctx.error("iter() requires an array"));
    };

    for element in elements.iter() {
        apply_function(&args[1], &[element.clone()], ctx)?;
    }
    Ok(Value::ok())
}

/// Splits the `(array, [init,] f)` argument shapes shared by the folds,
/// yielding the elements still to visit, the seed accumulator and the
/// folding function.
fn fold_arguments<'a>(name: &str,
                      ctx: &EvalContext,
                      args: &'a [Value])
                      -> EvalResult<(&'a [Value], Value, &'a Value)> {
    match args {
        [Value::Array(elements), f] => {
            let Some((first, rest)) = elements.split_first() else {
                return Err(ctx.error(format!("{name}() of an empty array with no initial value")));
            };
            Ok((rest, first.clone(), f))
        },
        [Value::Array(elements), init, f] => Ok((elements.as_slice(), init.clone(), f)),
        [other, ..] if !matches!(other, Value::Array(_)) => {
            Err(ctx.error(format!("{name}() requires an array")))
        },
        _ => Err(ctx.error(format!("{name}() takes 2 or 3 arguments, got {}", args.len()))),
    }
}

enum Step {
    Cont(Value),
    Halt(Value),
}

/// Applies a fold function and decodes its `{:cont | :halt, acc}` answer.
fn step(f: &Value, args: &[Value], ctx: &mut EvalContext) -> EvalResult<Step> {
    let result = apply_function(f, args, ctx)?;

    if let Value::Tuple(pair) = &result
       && pair.len() == 2
    {
        if pair[0].is_atom_named(atom::CONT) {
            return Ok(Step::Cont(pair[1].clone()));
        }
        if pair[0].is_atom_named(atom::HALT) {
            return Ok(Step::Halt(pair[1].clone()));
        }
    }

    Err(ctx.error(format!("expected a (:cont, value) or (:halt, value) tuple, got {}",
                          result.inspect())))
}
