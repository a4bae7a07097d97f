use std::fmt;
use std::rc::Rc;

use crate::ast::{Block, Ident};
use crate::error::RuntimeError;
use crate::interpreter::evaluator::core::EvalContext;
use crate::interpreter::scope::Scope;
use crate::interpreter::value::map::ValueMap;

/// Represents a runtime value in the interpreter.
///
/// This enum models every type a program can produce. Compound values are
/// immutable and shared via `Rc`; update operations build new instances.
/// `Return` is the transient wrapper produced by a `return` statement; it is
/// unwrapped at the boundary of the function that produced it and never
/// escapes further.
#[derive(Debug, Clone)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// An IEEE-754 double.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// `true` or `false`.
    Bool(bool),
    /// An interned symbol, written `:name` in source. Equal spellings share
    /// one allocation (see [`super::atom`]).
    Atom(Rc<str>),
    /// An ordered sequence.
    Array(Rc<Vec<Value>>),
    /// A fixed-arity ordered sequence with positional access.
    Tuple(Rc<Vec<Value>>),
    /// An insertion-ordered map with hashable keys.
    Map(Rc<ValueMap>),
    /// A half-open integer range produced by `a :: b`.
    Slice(i64, i64),
    /// A user function closed over its defining scope.
    Function(Rc<FunctionValue>),
    /// A host-provided function.
    Builtin(Builtin),
    /// A named scope of top-level bindings.
    Module(Rc<ModuleValue>),
    /// Transient `return` wrapper, unwrapped at the function boundary.
    Return(Box<Value>),
}

/// A user-defined function value: parameters, body and the captured scope.
#[derive(Debug)]
pub struct FunctionValue {
    pub parameters: Rc<Vec<Ident>>,
    pub body:       Rc<Block>,
    pub env:        Rc<Scope>,
}

/// A module: its name plus the scope its top-level bindings live in.
#[derive(Debug)]
pub struct ModuleValue {
    pub name: String,
    pub env:  Rc<Scope>,
}

/// The signature of a host builtin: evaluation context plus positional
/// arguments, returning a value or a runtime error.
pub type BuiltinFn = fn(&mut EvalContext, &[Value]) -> Result<Value, RuntimeError>;

/// A host-provided function exposed under a name.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl Value {
    /// Shorthand for the interned `nil` atom.
    #[must_use]
    pub fn nil() -> Self {
        Self::Atom(super::atom::intern(super::atom::NIL))
    }

    /// Shorthand for the interned `ok` atom.
    #[must_use]
    pub fn ok() -> Self {
        Self::Atom(super::atom::intern(super::atom::OK))
    }

    /// Shorthand for an interned atom by name.
    #[must_use]
    pub fn atom(name: &str) -> Self {
        Self::Atom(super::atom::intern(name))
    }

    #[must_use]
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::Str(Rc::from(value.as_ref()))
    }

    #[must_use]
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array(Rc::new(elements))
    }

    #[must_use]
    pub fn tuple(elements: Vec<Self>) -> Self {
        Self::Tuple(Rc::new(elements))
    }

    /// The `{:tag, value}` tuple convention used by fallible builtins.
    #[must_use]
    pub fn tagged(tag: &str, value: Self) -> Self {
        Self::tuple(vec![Self::atom(tag), value])
    }

    /// The uppercase kind name used in error messages and by `type()`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Str(_) => "STRING",
            Self::Bool(_) => "BOOLEAN",
            Self::Atom(_) => "ATOM",
            Self::Array(_) => "ARRAY",
            Self::Tuple(_) => "TUPLE",
            Self::Map(_) => "MAP",
            Self::Slice(..) => "SLICE",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
            Self::Module(_) => "MODULE",
            Self::Return(_) => "RETURN",
        }
    }

    /// Everything is truthy except `nil` and `false`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Atom(a) => a.as_ref() != super::atom::NIL,
            _ => true,
        }
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Atom(a) if a.as_ref() == super::atom::NIL)
    }

    #[must_use]
    pub fn is_atom_named(&self, name: &str) -> bool {
        matches!(self, Self::Atom(a) if a.as_ref() == name)
    }

    /// The canonical textual form: strings verbatim, numbers in display
    /// form, atoms as `:name`, compounds rendered recursively (with strings
    /// quoted inside them).
    #[must_use]
    pub fn inspect(&self) -> String {
        match self {
            Self::Str(s) => s.to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Atom(a) => write!(f, ":{a}"),
            Self::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            },
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {value}", key.to_value())?;
                }
                write!(f, "}}")
            },
            Self::Slice(start, end) => write!(f, "{start}::{end}"),
            Self::Function(function) => {
                let params = function.parameters
                                     .iter()
                                     .map(ToString::to_string)
                                     .collect::<Vec<_>>();
                write!(f, "\\{} => …", params.join(" "))
            },
            Self::Builtin(builtin) => write!(f, "builtin {}", builtin.name),
            Self::Module(module) => write!(f, "module {}", module.name),
            Self::Return(value) => write!(f, "{value}"),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality.
    ///
    /// This is the relation used by `case` literal patterns, destructuring
    /// sub-patterns and the deep operators `===`/`!==`: numerics compare
    /// per-variant, compounds recurse, map equality is insertion-order
    /// independent. Functions and modules compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::Array(a), Self::Array(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Slice(a0, a1), Self::Slice(b0, b1)) => a0 == b0 && a1 == b1,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Module(a), Self::Module(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            (Self::Return(a), Self::Return(b)) => a == b,
            _ => false,
        }
    }
}
