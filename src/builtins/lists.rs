//! Constructors and accessors: cons, list, car, cdr

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn cons(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

pub fn list(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::list_from(args.to_vec(), Value::Nil))
}

pub fn car(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Pair(pair) => Ok(pair.car.clone()),
        other => Err(EvalError::IncorrectArgumentType {
            op: "car".to_string(),
            arg: other.clone(),
        }),
    }
}

pub fn cdr(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Pair(pair) => Ok(pair.cdr.clone()),
        other => Err(EvalError::IncorrectArgumentType {
            op: "cdr".to_string(),
            arg: other.clone(),
        }),
    }
}

pub fn register(table: &mut HashMap<String, Value>) {
    table.insert(
        "cons".to_string(),
        Value::primitive("cons", Some(2), Some(2), ArgSpec::Any, cons),
    );
    table.insert(
        "list".to_string(),
        Value::primitive("list", None, None, ArgSpec::Any, list),
    );
    table.insert(
        "car".to_string(),
        Value::primitive("car", Some(1), Some(1), ArgSpec::Pairs, car),
    );
    table.insert(
        "cdr".to_string(),
        Value::primitive("cdr", Some(1), Some(1), ArgSpec::Pairs, cdr),
    );
}
