//! Type predicates: atom?, pair?, list?, null?, integer?, real?, number?,
//! string?, boolean?, symbol? — plus boolean negation.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, PrimitiveFn, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// An atom is anything that is not a pair; quoted values count as neither.
pub fn is_atom(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(!matches!(
        &args[0],
        Value::Pair(_) | Value::Quoted(_)
    )))
}

pub fn is_pair(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Pair(_))))
}

/// True when the cdr chain terminates in nil. Assumes finite structure.
pub fn is_list(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    let mut current = &args[0];
    while let Value::Pair(pair) = current {
        current = &pair.cdr;
    }
    Ok(Value::from_bool(current.is_nil()))
}

pub fn is_null(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args[0].is_nil()))
}

pub fn is_integer(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Int(_))))
}

pub fn is_real(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(
        &args[0],
        Value::Int(_) | Value::Real(_)
    )))
}

pub fn is_number(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    is_real(args, env, evaluator, out)
}

pub fn is_string(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Str(_))))
}

/// nil is a boolean: it doubles as false.
pub fn is_boolean(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(
        &args[0],
        Value::Bool(_) | Value::Nil
    )))
}

pub fn is_symbol(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(matches!(&args[0], Value::Symbol(_))))
}

pub fn not(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args[0].is_nil()))
}

pub fn register(table: &mut HashMap<String, Value>) {
    let one = |name: &'static str, func: PrimitiveFn| {
        Value::primitive(name, Some(1), Some(1), ArgSpec::Any, func)
    };
    table.insert("atom?".to_string(), one("atom?", is_atom));
    table.insert("pair?".to_string(), one("pair?", is_pair));
    table.insert("list?".to_string(), one("list?", is_list));
    table.insert("null?".to_string(), one("null?", is_null));
    table.insert("integer?".to_string(), one("integer?", is_integer));
    table.insert("real?".to_string(), one("real?", is_real));
    table.insert("number?".to_string(), one("number?", is_number));
    table.insert("string?".to_string(), one("string?", is_string));
    table.insert("boolean?".to_string(), one("boolean?", is_boolean));
    table.insert("symbol?".to_string(), one("symbol?", is_symbol));
    table.insert("not".to_string(), one("not", not));
}
