//! Runtime values for the brisk interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value
    Int(i64),
    /// An IEEE-754 double value
    Float(f64),
    /// An immutable string value
    Str(String),
    /// A boolean value (true or false)
    Bool(bool),
    /// A growable list. The backing store is shared between all clones
    /// of the same list, so mutation through one alias is visible
    /// through every other.
    List(Rc<RefCell<Vec<Value>>>),
    /// The absent value
    Null,
}

impl Value {
    /// A list over the given elements.
    pub fn list_from(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// The type tag name reported by `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    /// Truthiness: Bool is itself, Int is non-zero, Null is false, and
    /// everything else is true (including empty strings and lists).
    pub fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Null => false,
            _ => true,
        }
    }

    /// Loose coercion to integer. Floats truncate toward zero; strings
    /// parse as a double first; anything unparseable reads as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) => *f as i64,
            Value::Bool(b) => i64::from(*b),
            Value::Str(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
            _ => 0,
        }
    }

    /// Loose coercion to float; anything unparseable reads as 0.0.
    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(f) => *f,
            Value::Int(n) => *n as f64,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Str(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Deep copy: lists are copied recursively, everything else clones.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::List(items) => {
                let copied = items.borrow().iter().map(Value::deep_copy).collect();
                Value::list_from(copied)
            }
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => {
                // integral floats keep a decimal point so 1.0 never prints as 1
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, it) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", it)?;
                }
                write!(f, "]")
            }
            Value::Null => write!(f, "null"),
        }
    }
}
