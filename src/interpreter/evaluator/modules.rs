use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::interpreter::evaluator::builtins;
use crate::interpreter::evaluator::core::{EvalContext, EvalResult, eval_program};
use crate::interpreter::hostlib;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::Parser;
use crate::interpreter::scope::Scope;
use crate::interpreter::stdlib;
use crate::interpreter::value::{Builtin, ModuleValue, Value, core::BuiltinFn};

/// Where a module's source came from; embedded modules additionally get
/// their host builtins attached after registration.
enum Origin {
    Embedded,
    Disk,
}

/// A resolved module source: the text, the path it answers to, and its
/// origin.
struct ResolvedSource {
    source: String,
    path:   String,
    origin: Origin,
}

/// Loads the module behind an unresolved uppercase identifier.
///
/// The winning source is lexed, parsed and evaluated against the root
/// scope; its `module` statement is what actually registers the module.
pub fn load_module(name: &str, env: &Rc<Scope>, ctx: &mut EvalContext) -> EvalResult<Value> {
    let Some(resolved) = resolve(name) else {
        return Err(ctx.error(format!("module not found: {name}")));
    };
    load_from_source(&resolved, name, env, ctx)
}

/// Maps a dotted module name to its source.
///
/// Each segment goes from CamelCase to snake_case, then the candidates are
/// tried in order:
///
/// 1. the embedded standard library (`a/b/c.rnl`),
/// 2. the enclosing project (`src/b/c.rnl` — the first segment is the
///    project's own module root and is elided),
/// 3. resolved dependencies (`.deps/<first>/src/b/c.rnl`).
///
/// The embedded table comes first, so the standard library resolves without
/// any filesystem at all.
fn resolve(name: &str) -> Option<ResolvedSource> {
    let parts: Vec<String> = name.split('.').map(to_snake_case).collect();

    let stdlib_path = format!("{}.rnl", parts.join("/"));
    if let Some(source) = stdlib::lookup(&stdlib_path) {
        return Some(ResolvedSource { source: source.to_string(),
                                     path:   stdlib_path,
                                     origin: Origin::Embedded, });
    }

    let mut local_path = PathBuf::from("src");
    for part in &parts[1..] {
        local_path.push(part);
    }
    if let Some(resolved) = read_candidate(&local_path.with_extension("rnl")) {
        return Some(resolved);
    }

    let mut deps_path = PathBuf::from(".deps");
    deps_path.push(&parts[0]);
    deps_path.push("src");
    for part in &parts[1..] {
        deps_path.push(part);
    }
    read_candidate(&deps_path.with_extension("rnl"))
}

fn read_candidate(path: &Path) -> Option<ResolvedSource> {
    if !path.is_file() {
        return None;
    }
    let source = std::fs::read_to_string(path).ok()?;
    Some(ResolvedSource { source,
                          path: path.display().to_string(),
                          origin: Origin::Disk })
}

fn load_from_source(resolved: &ResolvedSource,
                    name: &str,
                    env: &Rc<Scope>,
                    ctx: &mut EvalContext)
                    -> EvalResult<Value> {
    let source = &resolved.source;
    let path = &resolved.path;
    let mut parser = Parser::new(Lexer::new(source, path));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        let listing = parser.errors()
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ");
        return Err(ctx.error(format!("parse errors in module {name}: {listing}")));
    }

    let root = env.root_scope();
    let mut module_ctx = EvalContext::with_args(path, ctx.args.clone());
    eval_program(&program, &root, &mut module_ctx)?;

    let Some(module) = env.get_module(name) else {
        return Err(ctx.error(format!("module not found: {name}")));
    };
    if matches!(resolved.origin, Origin::Embedded) {
        attach_host_builtins(&module);
    }
    Ok(Value::Module(module))
}

/// CamelCase to snake_case, acronym-aware: `ModuleName` → `module_name`,
/// `HTTPServer` → `http_server`.
fn to_snake_case(part: &str) -> String {
    let chars: Vec<char> = part.chars().collect();
    let mut out = String::with_capacity(part.len() + 2);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_lowercase();
            let before_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            if i > 0 && (after_lower || before_lower) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Attaches the host builtins belonging to a just-loaded stdlib module.
///
/// The table is fixed per module name; the `.rnl` sources build their
/// higher-level helpers out of these primitives.
fn attach_host_builtins(module: &ModuleValue) {
    match module.name.as_str() {
        "Array" => {
            attach_builtin(module, builtins::ARRAY_ITER);
            attach_builtin(module, builtins::ARRAY_REDUCE);
            attach_builtin(module, builtins::ARRAY_REDUCE_WHILE);
            attach(module, "range", hostlib::array::range);
            attach(module, "reverse", hostlib::array::reverse);
        },
        "File" => {
            attach(module, "open", hostlib::file::open);
            attach(module, "open!", hostlib::file::open_bang);
            attach(module, "write", hostlib::file::write);
            attach(module, "write!", hostlib::file::write_bang);
        },
        "Map" => {
            attach(module, "get", hostlib::map::get);
            attach(module, "has_key?", hostlib::map::has_key);
            attach(module, "keys", hostlib::map::keys);
            attach(module, "length", hostlib::map::length);
            attach(module, "try_get", hostlib::map::try_get);
        },
        "Math" => {
            attach(module, "abs", hostlib::math::abs);
            attach(module, "ceiling", hostlib::math::ceiling);
            attach(module, "cos", hostlib::math::cos);
            attach(module, "floor", hostlib::math::floor);
            attach(module, "max", hostlib::math::max);
            attach(module, "min", hostlib::math::min);
            attach(module, "pi", hostlib::math::pi);
            attach(module, "round", hostlib::math::round);
            attach(module, "sin", hostlib::math::sin);
            attach(module, "sqrt", hostlib::math::sqrt);
            attach(module, "tan", hostlib::math::tan);
        },
        "String" => {
            attach(module, "concat", hostlib::string::concat);
            attach(module, "contains?", hostlib::string::contains);
            attach(module, "ends_with?", hostlib::string::ends_with);
            attach(module, "index_of", hostlib::string::index_of);
            attach(module, "length", hostlib::string::length);
            attach(module, "lower", hostlib::string::lower);
            attach(module, "match?", hostlib::string::matches);
            attach(module, "pad_left", hostlib::string::pad_left);
            attach(module, "pad_right", hostlib::string::pad_right);
            attach(module, "parse_num", hostlib::string::parse_num);
            attach(module, "replace", hostlib::string::replace);
            attach(module, "replace_all", hostlib::string::replace_all);
            attach(module, "split", hostlib::string::split);
            attach(module, "starts_with?", hostlib::string::starts_with);
            attach(module, "trim", hostlib::string::trim);
            attach(module, "trim_end", hostlib::string::trim_end);
            attach(module, "trim_start", hostlib::string::trim_start);
            attach(module, "try_parse_num", hostlib::string::try_parse_num);
            attach(module, "upper", hostlib::string::upper);
        },
        _ => {},
    }
}

fn attach(module: &ModuleValue, name: &'static str, func: BuiltinFn) {
    module.env.set(name, Value::Builtin(Builtin { name, func }));
}

fn attach_builtin(module: &ModuleValue, builtin: Builtin) {
    module.env.set(builtin.name, Value::Builtin(builtin));
}
