/// The evaluator walks the AST against a scope chain and computes values.
///
/// The evaluator is the core execution engine: it resolves identifiers,
/// constructs values, dispatches operators, applies functions and builtins,
/// pattern-matches `case` arms, and loads modules on demand.
///
/// # Responsibilities
/// - Evaluates statements and expressions with left-to-right ordering.
/// - Implements closures, destructuring, the pipe rewrite and indexing.
/// - Short-circuits on the first runtime error, carrying its position.
pub mod evaluator;
/// Host-provided builtins grouped by the stdlib module they attach to.
///
/// Each function follows the builtin contract: it receives the evaluation
/// context (for error positions) and the evaluated arguments, and returns a
/// value or a runtime error.
pub mod hostlib;
/// The lexer turns source text into a token stream.
///
/// Hand-written over a byte cursor, because token identity here depends on
/// adjacency: `ident(` is a call head, `ident:` is an atom, `$"` opens an
/// interpolated string. Commas are whitespace. Every token carries the
/// 1-based line/column of its first character.
pub mod lexer;
/// The parser builds the AST from the token stream.
///
/// A Pratt parser with a three-token window and an accumulated error list;
/// see [`parser::core::Parser`].
pub mod parser;
/// Lexically nested scopes and the root module registry.
pub mod scope;
/// The embedded standard library sources.
pub mod stdlib;
/// Runtime values: the `Value` enum, the atom interner and the
/// insertion-ordered map.
pub mod value;
