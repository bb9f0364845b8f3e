// ABOUTME: Value types shared between the parser's AST and the evaluator's runtime

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use std::io::Write;
use std::rc::Rc;

/// Native procedure: receives already-evaluated arguments.
pub type PrimitiveFn =
    fn(&[Value], &Rc<Environment>, &mut Evaluator, &mut dyn Write) -> Result<Value, EvalError>;

/// Special form: receives the unevaluated argument expressions and may
/// legitimately produce no value (a conditional with no matching branch).
pub type SpecialFn = fn(
    &[Value],
    &Rc<Environment>,
    &mut Evaluator,
    &mut dyn Write,
) -> Result<Option<Value>, EvalError>;

/// An S-expression datum. The parser produces these and the evaluator
/// consumes and returns them; AST and runtime share the representation.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Real(f64),
    Str(Rc<str>),
    Symbol(String),
    Bool(bool),
    /// The empty list, doubling as boolean false. `#f` lexes to this.
    Nil,
    /// Result of `define`, `clean-environment` and `(verbose …)`; the REPL
    /// prints nothing for it. Distinct from "no value at all".
    Void,
    Pair(Rc<Pair>),
    /// Reader-level `'x`; prints and evaluates exactly like `(quote x)`.
    Quoted(Rc<Value>),
    Callable(Rc<Callable>),
}

#[derive(Debug)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

#[derive(Debug)]
pub enum Callable {
    Primitive(Primitive),
    Special(Special),
    Closure(Closure),
    /// Built-in names that print as `#<procedure …>` but are intercepted by
    /// the evaluator instead of being applied (`lambda`, `verbose`, …).
    Dummy(&'static str),
}

#[derive(Debug)]
pub struct Primitive {
    pub name: &'static str,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub args: ArgSpec,
    pub func: PrimitiveFn,
}

#[derive(Debug)]
pub struct Special {
    pub name: &'static str,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub func: SpecialFn,
}

#[derive(Debug)]
pub struct Closure {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
}

/// Per-argument type requirement checked before a primitive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    Any,
    Pairs,
    Numbers,
    Strings,
}

impl ArgSpec {
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            ArgSpec::Any => true,
            ArgSpec::Pairs => matches!(value, Value::Pair(_)),
            ArgSpec::Numbers => matches!(value, Value::Int(_) | Value::Real(_)),
            ArgSpec::Strings => matches!(value, Value::Str(_)),
        }
    }
}

impl Value {
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(Pair { car, cdr }))
    }

    /// Builds a right-nested cons chain from `elements` ending in `tail`.
    pub fn list_from(elements: Vec<Value>, tail: Value) -> Value {
        let mut result = tail;
        for element in elements.into_iter().rev() {
            result = Value::cons(element, result);
        }
        result
    }

    pub fn from_bool(truth: bool) -> Value {
        if truth {
            Value::Bool(true)
        } else {
            Value::Nil
        }
    }

    pub fn primitive(
        name: &'static str,
        min: Option<usize>,
        max: Option<usize>,
        args: ArgSpec,
        func: PrimitiveFn,
    ) -> Value {
        Value::Callable(Rc::new(Callable::Primitive(Primitive {
            name,
            min,
            max,
            args,
            func,
        })))
    }

    pub fn special(
        name: &'static str,
        min: Option<usize>,
        max: Option<usize>,
        func: SpecialFn,
    ) -> Value {
        Value::Callable(Rc::new(Callable::Special(Special {
            name,
            min,
            max,
            func,
        })))
    }

    pub fn dummy(name: &'static str) -> Value {
        Value::Callable(Rc::new(Callable::Dummy(name)))
    }

    /// `nil` is the unique false value; everything else is true.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Value::Symbol(s) if s == name)
    }

    /// Walks the cdr chain and collects the elements of a proper list.
    /// Returns `None` when the chain ends in anything other than `Nil`.
    pub fn list_elements(&self) -> Option<Vec<Value>> {
        let mut elements = Vec::new();
        let mut current = self;
        while let Value::Pair(pair) = current {
            elements.push(pair.car.clone());
            current = &pair.cdr;
        }
        if current.is_nil() {
            Some(elements)
        } else {
            None
        }
    }
}

/// Structural equality, as observed by `equal?`: atoms compare by type and
/// value (an integer never equals a real), pairs and quoted values recurse,
/// procedures compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) | (Value::Void, Value::Void) => true,
            (Value::Bool(false), Value::Nil) | (Value::Nil, Value::Bool(false)) => true,
            (Value::Pair(a), Value::Pair(b)) => a.car == b.car && a.cdr == b.cdr,
            (Value::Quoted(a), Value::Quoted(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Callable {
    pub fn name(&self) -> &str {
        match self {
            Callable::Primitive(p) => p.name,
            Callable::Special(s) => s.name,
            Callable::Closure(c) => &c.name,
            Callable::Dummy(name) => name,
        }
    }

    pub fn check_arity(&self, count: usize) -> Result<(), EvalError> {
        let (min, max) = match self {
            Callable::Primitive(p) => (p.min, p.max),
            Callable::Special(s) => (s.min, s.max),
            Callable::Closure(c) => (Some(c.params.len()), Some(c.params.len())),
            Callable::Dummy(_) => (None, None),
        };
        if min.is_some_and(|m| count < m) || max.is_some_and(|m| count > m) {
            return Err(EvalError::IncorrectArgumentCount(self.name().to_string()));
        }
        Ok(())
    }
}

impl Primitive {
    pub fn check_arg_types(&self, args: &[Value]) -> Result<(), EvalError> {
        for arg in args {
            if !self.args.admits(arg) {
                return Err(EvalError::IncorrectArgumentType {
                    op: self.name.to_string(),
                    arg: arg.clone(),
                });
            }
        }
        Ok(())
    }
}
