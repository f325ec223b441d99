use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use crate::interpreter::ast::FunctionLiteral;
use crate::interpreter::environment::Env;
use crate::interpreter::error::RuntimeError;
use crate::util::join;

pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// A native function from the builtin registry.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A closure: a function literal plus the scope it was defined in.
pub struct Function {
    pub literal: Rc<FunctionLiteral>,
    pub env: Env,
}

// The captured scope is left out; it usually contains this very function.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function").field("literal", &self.literal).finish_non_exhaustive()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.literal, &other.literal) && Rc::ptr_eq(&self.env, &other.env)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
}

impl Display for HashKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HashKey::Integer(value) => write!(f, "{}", value),
            HashKey::Boolean(value) => write!(f, "{}", value),
            HashKey::String(value) => f.write_str(value),
        }
    }
}

/// A runtime value. Arrays and hashes are never edited in place; operations
/// that "change" one build a new container.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<BTreeMap<HashKey, Value>>),
    Function(Rc<Function>),
    Builtin(Builtin),
    Error(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Error(_) => "ERROR",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(value) => Some(HashKey::Integer(*value)),
            Value::Boolean(value) => Some(HashKey::Boolean(*value)),
            Value::String(value) => Some(HashKey::String(Rc::clone(value))),
            _ => None,
        }
    }

    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(elements))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::String(value) => f.write_str(value),
            Value::Null => f.write_str("null"),
            Value::Array(elements) => write!(f, "[{}]", join(elements.as_slice(), ", ")),
            Value::Hash(pairs) => write!(f, "{{{}}}", pairs.iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<String>>().join(", ")),
            Value::Function(_) => f.write_str("fn(...) {...}"),
            Value::Builtin(builtin) => write!(f, "builtin {}", builtin.name),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}
