/// The atom interner.
///
/// Atoms are compared by identity; interning guarantees that equal spellings
/// share one canonical allocation. The well-known atoms (`nil`, `ok`,
/// `error`, `cont`, `halt`, `some`, `none`) are seeded at startup.
pub mod atom;
/// The `Value` enum and everything that operates directly on runtime values:
/// type names, truthiness, structural equality and the inspect form.
pub mod core;
/// The insertion-ordered hash map backing the `Map` value, keyed by the
/// hashable subset of values.
pub mod map;

pub use self::core::{Builtin, FunctionValue, ModuleValue, Value};
pub use self::map::{MapKey, ValueMap};
