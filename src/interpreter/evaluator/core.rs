use std::rc::Rc;

use crate::ast::{Arm, Block, Expr, InfixOp, Program, Statement};
use crate::error::RuntimeError;
use crate::interpreter::lexer::Token;
use crate::interpreter::scope::Scope;
use crate::interpreter::value::{FunctionValue, ModuleValue, Value};
use crate::interpreter::evaluator::{builtins, destructure, index, infix, modules};

/// Result type used by the evaluator.
///
/// Every evaluation either produces a [`Value`] or short-circuits with a
/// [`RuntimeError`]; the `?` operator at each recursion site is what gives
/// errors their bubble-to-the-top behavior.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Carries the state that travels alongside evaluation: the source position
/// currently being evaluated (updated on every node visit, so errors point
/// at the failing node) and process-wide metadata such as the command-line
/// arguments exposed through `os_args()`.
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub file:   Rc<str>,
    pub line:   usize,
    pub column: usize,
    pub args:   Vec<String>,
}

impl EvalContext {
    #[must_use]
    pub fn new(file: &str) -> Self {
        Self { file:   Rc::from(file),
               line:   1,
               column: 1,
               args:   Vec::new(), }
    }

    #[must_use]
    pub fn with_args(file: &str, args: Vec<String>) -> Self {
        Self { args, ..Self::new(file) }
    }

    pub(crate) fn visit(&mut self, token: &Token) {
        self.file = Rc::clone(&token.file);
        self.line = token.line;
        self.column = token.column;
    }

    /// A runtime error positioned at whatever node was last visited.
    pub fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::new(message, &self.file, self.line, self.column)
    }
}

/// Evaluates a program's statements in order against `env`.
///
/// A `return` at the top level stops evaluation with its value; an error
/// stops it with the error. The result is the last statement's value.
pub fn eval_program(program: &Program, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    let mut result = Value::nil();
    for statement in &program.statements {
        result = eval_statement(statement, env, ctx)?;
        if let Value::Return(value) = result {
            return Ok(*value);
        }
    }
    Ok(result)
}

/// Evaluates a program and then, if the root scope ended up with a `main`
/// binding, invokes it with no arguments; `main`'s value becomes the program
/// result. This is the script entry point — module loading and the REPL use
/// [`eval_program`] directly.
pub fn run_program(program: &Program, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    let result = eval_program(program, env, ctx)?;
    if let Some(main) = env.get("main") {
        return apply_function(&main, &[], ctx);
    }
    Ok(result)
}

pub fn eval_statement(statement: &Statement, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    ctx.visit(statement.token());

    match statement {
        Statement::Expression { expression, .. } => eval_expression(expression, env, ctx),

        Statement::Let { token, pattern, value } => {
            let value = eval_expression(value, env, ctx)?;
            ctx.visit(token);
            destructure::bind_pattern(pattern, value, env, ctx)
        },

        Statement::Return { value, .. } => {
            let value = eval_expression(value, env, ctx)?;
            Ok(Value::Return(Box::new(value)))
        },

        Statement::Function { name, parameters, body, .. } => {
            let function = FunctionValue { parameters: Rc::clone(parameters),
                                           body:       Rc::clone(body),
                                           env:        Rc::clone(env), };
            env.set(&name.name, Value::Function(Rc::new(function)));
            Ok(Value::nil())
        },

        Statement::Module { name, body, .. } => {
            let module_env = Scope::enclosed(env);
            for statement in body {
                eval_statement(statement, &module_env, ctx)?;
            }
            let module = Rc::new(ModuleValue { name: name.name.clone(),
                                               env:  module_env, });
            env.set_module(&name.name, Rc::clone(&module));
            Ok(Value::Module(module))
        },
    }
}

pub fn eval_expression(expr: &Expr, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    ctx.visit(expr.token());

    match expr {
        Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
        Expr::FloatLiteral { value, .. } => Ok(Value::Float(*value)),
        Expr::StringLiteral { value, .. } => Ok(Value::string(value)),
        Expr::BooleanLiteral { value, .. } => Ok(Value::Bool(*value)),
        Expr::AtomLiteral { value, .. } => Ok(Value::atom(value)),

        Expr::InterpolatedString { segments, .. } => {
            let mut out = String::new();
            for segment in segments {
                let evaluated = eval_expression(segment, env, ctx)?;
                match evaluated {
                    Value::Str(s) => out.push_str(&s),
                    other => out.push_str(&other.inspect()),
                }
            }
            Ok(Value::string(out))
        },

        Expr::ArrayLiteral { elements, .. } => {
            let elements = eval_expressions(elements, env, ctx)?;
            Ok(Value::array(elements))
        },

        Expr::TupleLiteral { elements, .. } => {
            let elements = eval_expressions(elements, env, ctx)?;
            Ok(Value::tuple(elements))
        },

        Expr::MapLiteral { pairs, .. } => eval_map_literal(pairs, env, ctx),
        Expr::MapUpdate { base, pairs, .. } => eval_map_update(base, pairs, env, ctx),

        Expr::Identifier { name, token } => eval_identifier(name, token, env, ctx),

        Expr::Prefix { token, operator, right } => {
            let right = eval_expression(right, env, ctx)?;
            ctx.visit(token);
            infix::eval_prefix(*operator, &right, ctx)
        },

        Expr::Infix { token, operator, left, right } => {
            eval_infix_expression(token, *operator, left, right, env, ctx)
        },

        Expr::If { condition, consequence, alternative, .. } => {
            let condition = eval_expression(condition, env, ctx)?;
            if condition.is_truthy() {
                eval_block(consequence, env, ctx)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env, ctx)
            } else {
                Ok(Value::nil())
            }
        },

        Expr::Cond { arms, .. } => eval_cond(arms, env, ctx),
        Expr::Case { token, subject, arms } => eval_case(token, subject, arms, env, ctx),

        Expr::FunctionLiteral { parameters, body, .. } => {
            let function = FunctionValue { parameters: Rc::clone(parameters),
                                           body:       Rc::clone(body),
                                           env:        Rc::clone(env), };
            Ok(Value::Function(Rc::new(function)))
        },

        Expr::Index { token, left, index: idx } => {
            let left = eval_expression(left, env, ctx)?;
            let index = eval_expression(idx, env, ctx)?;
            ctx.visit(token);
            index::eval_index(&left, &index, ctx)
        },

        Expr::PropertyAccess { token, left, right } => {
            let left = eval_expression(left, env, ctx)?;
            ctx.visit(token);
            eval_property_access(&left, right, env, ctx)
        },

        Expr::Call { function, arguments, .. } => {
            let function = eval_expression(function, env, ctx)?;
            let arguments = eval_expressions(arguments, env, ctx)?;
            apply_function(&function, &arguments, ctx)
        },
    }
}

/// Evaluates a block, stopping early on a `return` wrapper (which propagates
/// outward untouched until the function boundary unwraps it).
pub fn eval_block(block: &Block, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    let mut result = Value::nil();
    for statement in &block.statements {
        result = eval_statement(statement, env, ctx)?;
        if matches!(result, Value::Return(_)) {
            return Ok(result);
        }
    }
    Ok(result)
}

/// Left-to-right evaluation of an expression list; the first error aborts
/// the whole list.
pub fn eval_expressions(exprs: &[Expr], env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Vec<Value>> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        values.push(eval_expression(expr, env, ctx)?);
    }
    Ok(values)
}

/// Calls a function or builtin value with already-evaluated arguments.
///
/// User functions get a fresh child of their captured scope (lexical
/// closure), positional parameter binding, and their `return` unwrapped at
/// this boundary.
pub fn apply_function(function: &Value, args: &[Value], ctx: &mut EvalContext) -> EvalResult<Value> {
    match function {
        Value::Function(function) => {
            if args.len() != function.parameters.len() {
                return Err(ctx.error(format!("wrong number of arguments. got={}, want={}",
                                             args.len(),
                                             function.parameters.len())));
            }
            let env = Scope::enclosed(&function.env);
            for (parameter, arg) in function.parameters.iter().zip(args) {
                env.set(&parameter.name, arg.clone());
            }
            let result = eval_block(&function.body, &env, ctx)?;
            Ok(unwrap_return(result))
        },
        Value::Builtin(builtin) => (builtin.func)(ctx, args),
        other => Err(ctx.error(format!("not a function: {}", other.type_name()))),
    }
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => *inner,
        other => other,
    }
}

/// Identifier resolution.
///
/// Uppercase names are module references (consulting the registry, then the
/// loader); `_` evaluates to `nil`; everything else walks the scope chain
/// and finally the global builtin table.
fn eval_identifier(name: &str, token: &Token, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    if name.chars().next().is_some_and(char::is_uppercase) {
        if let Some(module) = env.get_module(name) {
            return Ok(Value::Module(module));
        }
        return modules::load_module(name, env, ctx);
    }

    if name == "_" {
        return Ok(Value::nil());
    }
    if let Some(value) = env.get(name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Ok(Value::Builtin(builtin));
    }

    ctx.visit(token);
    Err(ctx.error(format!("identifier not found: {name}")))
}

fn eval_infix_expression(token: &Token,
                         operator: InfixOp,
                         left: &Expr,
                         right: &Expr,
                         env: &Rc<Scope>,
                         ctx: &mut EvalContext)
                         -> EvalResult<Value> {
    match operator {
        InfixOp::Slice => return index::eval_slice_literal(left, right, env, ctx),
        InfixOp::Pipe => return eval_pipe(token, left, right, env, ctx),
        _ => {},
    }

    let left = eval_expression(left, env, ctx)?;

    // `and`/`or` short-circuit and hand back the decisive operand as-is.
    if operator == InfixOp::And && !left.is_truthy() {
        return Ok(left);
    }
    if operator == InfixOp::Or && left.is_truthy() {
        return Ok(left);
    }

    let right = eval_expression(right, env, ctx)?;
    if matches!(operator, InfixOp::And | InfixOp::Or) {
        return Ok(right);
    }

    ctx.visit(token);
    infix::eval_infix(operator, &left, &right, ctx)
}

/// `x |> f(…)` — prepends `x` to the call's arguments.
///
/// The rewrite builds a fresh call expression around clones of the parsed
/// nodes; the AST itself is never mutated, so re-evaluating the same subtree
/// (REPL, loops) always sees the original shape.
fn eval_pipe(token: &Token,
             left: &Expr,
             right: &Expr,
             env: &Rc<Scope>,
             ctx: &mut EvalContext)
             -> EvalResult<Value> {
    match right {
        Expr::Call { token: call_token, function, arguments } => {
            let mut piped = Vec::with_capacity(arguments.len() + 1);
            piped.push(left.clone());
            piped.extend(arguments.iter().cloned());
            let call = Expr::Call { token:     call_token.clone(),
                                    function:  function.clone(),
                                    arguments: piped, };
            eval_expression(&call, env, ctx)
        },
        Expr::PropertyAccess { token: access_token, left: object, right: property } => {
            let Expr::Call { token: call_token, function, arguments } = property.as_ref() else {
                ctx.visit(token);
                return Err(ctx.error("pipe operator must be followed by a function call"));
            };
            let mut piped = Vec::with_capacity(arguments.len() + 1);
            piped.push(left.clone());
            piped.extend(arguments.iter().cloned());
            let call = Expr::Call { token:     call_token.clone(),
                                    function:  function.clone(),
                                    arguments: piped, };
            let access = Expr::PropertyAccess { token: access_token.clone(),
                                                left:  object.clone(),
                                                right: Box::new(call), };
            eval_expression(&access, env, ctx)
        },
        Expr::FunctionLiteral { parameters, .. } => {
            if parameters.len() != 1 {
                ctx.visit(token);
                return Err(ctx.error("function literal must take exactly one argument"));
            }
            let call = Expr::Call { token:     token.clone(),
                                    function:  Box::new(right.clone()),
                                    arguments: vec![left.clone()], };
            eval_expression(&call, env, ctx)
        },
        _ => {
            ctx.visit(token);
            Err(ctx.error("pipe operator must be followed by a function call"))
        },
    }
}

fn eval_cond(arms: &[Arm], env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    for arm in arms {
        let condition = eval_expression(&arm.condition, env, ctx)?;
        if condition.is_truthy() {
            return eval_block(&arm.body, env, ctx);
        }
    }
    Ok(Value::nil())
}

/// `case` pattern matching.
///
/// The subject evaluates once. Identifier patterns bind unconditionally;
/// tuple/array patterns destructure into a fresh child scope, discarding it
/// and moving on when the shape does not fit; any other pattern expression
/// is evaluated and matched by structural equality.
fn eval_case(token: &Token,
             subject: &Expr,
             arms: &[Arm],
             env: &Rc<Scope>,
             ctx: &mut EvalContext)
             -> EvalResult<Value> {
    let subject = eval_expression(subject, env, ctx)?;

    for arm in arms {
        match &arm.condition {
            Expr::Identifier { name, .. } => {
                let branch_env = Scope::enclosed(env);
                if name != "_" {
                    branch_env.set(name, subject.clone());
                }
                return eval_block(&arm.body, &branch_env, ctx);
            },
            pattern @ (Expr::TupleLiteral { .. } | Expr::ArrayLiteral { .. }) => {
                ctx.visit(token);
                let branch_env = Scope::enclosed(env);
                if destructure::bind_pattern(pattern, subject.clone(), &branch_env, ctx).is_ok() {
                    return eval_block(&arm.body, &branch_env, ctx);
                }
            },
            pattern => {
                let candidate = eval_expression(pattern, env, ctx)?;
                if candidate == subject {
                    let branch_env = Scope::enclosed(env);
                    return eval_block(&arm.body, &branch_env, ctx);
                }
            },
        }
    }

    ctx.visit(token);
    Err(ctx.error("no matching case"))
}

fn eval_map_literal(pairs: &[(Expr, Expr)], env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    let mut map = crate::interpreter::value::ValueMap::with_capacity(pairs.len());

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env, ctx)?;
        let Some(key) = crate::interpreter::value::MapKey::from_value(&key) else {
            ctx.visit(key_expr.token());
            return Err(ctx.error(format!("unusable as map key: {}", key.type_name())));
        };
        let value = eval_expression(value_expr, env, ctx)?;
        map.insert(key, value);
    }

    Ok(Value::Map(Rc::new(map)))
}

/// `{ base with k = v … }` copies the base map and overlays the new pairs;
/// the base is left untouched.
fn eval_map_update(base: &Expr,
                   pairs: &[(Expr, Expr)],
                   env: &Rc<Scope>,
                   ctx: &mut EvalContext)
                   -> EvalResult<Value> {
    let base_value = eval_expression(base, env, ctx)?;
    let Value::Map(base_map) = &base_value else {
        ctx.visit(base.token());
        return Err(ctx.error(format!("not a map: {}", base_value.type_name())));
    };

    let mut map = (**base_map).clone();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env, ctx)?;
        let Some(key) = crate::interpreter::value::MapKey::from_value(&key) else {
            ctx.visit(key_expr.token());
            return Err(ctx.error(format!("unusable as map key: {}", key.type_name())));
        };
        let value = eval_expression(value_expr, env, ctx)?;
        map.insert(key, value);
    }

    Ok(Value::Map(Rc::new(map)))
}

/// `left.right` — module member access/invocation, or atom-keyed map access.
fn eval_property_access(left: &Value,
                        right: &Expr,
                        env: &Rc<Scope>,
                        ctx: &mut EvalContext)
                        -> EvalResult<Value> {
    match left {
        Value::Module(module) => match right {
            Expr::Identifier { name, .. } => {
                let Some(member) = module.env.get(name) else {
                    return Err(ctx.error(format!("property {name} not found")));
                };
                match member {
                    Value::Function(_) | Value::Builtin(_) => Ok(member),
                    _ => Err(ctx.error(format!("property {name} is not a function"))),
                }
            },
            Expr::Call { function, arguments, .. } => {
                let Expr::Identifier { name, .. } = function.as_ref() else {
                    return Err(ctx.error(format!("invalid function call: {function}")));
                };
                let Some(member) = module.env.get(name) else {
                    return Err(ctx.error(format!("function {name} not found")));
                };
                match member {
                    Value::Function(_) | Value::Builtin(_) => {
                        let arguments = eval_expressions(arguments, env, ctx)?;
                        apply_function(&member, &arguments, ctx)
                    },
                    _ => Err(ctx.error(format!("property {name} is not a function"))),
                }
            },
            other => Err(ctx.error(format!("invalid property access: {other}"))),
        },
        Value::Map(map) => {
            let Expr::Identifier { name, .. } = right else {
                return Err(ctx.error(format!("invalid property access: {right}")));
            };
            let key = Value::atom(name);
            Ok(map.get_value(&key).cloned().unwrap_or_else(Value::nil))
        },
        other => Err(ctx.error(format!("property access not supported: {}", other.type_name()))),
    }
}
