/// The parser state machine: token window, precedence table, Pratt
/// dispatch and error accumulation.
pub mod core;
/// Expression parse rules: identifiers, operators, control-flow expressions,
/// calls, indexing and property access.
pub mod expression;
/// Literal parse rules: numbers, strings and interpolation, atoms, arrays,
/// tuples, maps and function literals.
pub mod literal;
/// Statement parse rules: `let`, `return`, `fn`, `module`, blocks and
/// expression statements.
pub mod statement;

pub use self::core::Parser;
