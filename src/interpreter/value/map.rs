use std::collections::HashMap;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::interpreter::value::core::Value;

/// The hashable subset of values, usable as map keys.
///
/// The variant tag takes part in the hash, so `1`, `1.0`, `"1"` and `:"1"`
/// never collide with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Integer(i64),
    Float(OrderedFloat<f64>),
    Str(Rc<str>),
    Bool(bool),
    Atom(Rc<str>),
}

impl MapKey {
    /// Converts a value into a key, or `None` when the value's kind is not
    /// hashable (functions, compounds, modules).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Self::Integer(*n)),
            Value::Float(x) => Some(Self::Float(OrderedFloat(*x))),
            Value::Str(s) => Some(Self::Str(Rc::clone(s))),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Atom(a) => Some(Self::Atom(Rc::clone(a))),
            _ => None,
        }
    }

    /// The key back in value form, for `keys()` and iteration.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Integer(n) => Value::Integer(*n),
            Self::Float(x) => Value::Float(x.0),
            Self::Str(s) => Value::Str(Rc::clone(s)),
            Self::Bool(b) => Value::Bool(*b),
            Self::Atom(a) => Value::Atom(Rc::clone(a)),
        }
    }
}

/// An insertion-ordered hash map.
///
/// Lookups go through a hash table; iteration follows a parallel vector of
/// keys in first-insertion order. Overwriting an existing key keeps its
/// original position. Equality ignores order entirely.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    entries: HashMap<MapKey, Value>,
    order:   Vec<MapKey>,
}

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: HashMap::with_capacity(capacity),
               order:   Vec::with_capacity(capacity), }
    }

    pub fn insert(&mut self, key: MapKey, value: Value) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Looks a value-form key up; non-hashable kinds simply miss.
    #[must_use]
    pub fn get_value(&self, key: &Value) -> Option<&Value> {
        MapKey::from_value(key).and_then(|key| self.entries.get(&key))
    }

    #[must_use]
    pub fn contains_value(&self, key: &Value) -> bool {
        self.get_value(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &MapKey> {
        self.order.iter()
    }

    /// `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.order.iter().map(|key| (key, &self.entries[key]))
    }
}

impl PartialEq for ValueMap {
    /// Order-independent: two maps are equal when they hold the same
    /// key/value pairs, regardless of insertion history.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
