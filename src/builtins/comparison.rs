//! Numeric comparison: >, >=, <, <=, =
//!
//! Chained over at least two numeric arguments: `(< a b c)` holds when the
//! whole sequence is strictly increasing. Mixed integer/real pairs compare
//! numerically.

use super::arithmetic::as_f64;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, PrimitiveFn, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

fn holds(a: &Value, b: &Value, accept: fn(Ordering) -> bool) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => accept(x.cmp(y)),
        _ => match as_f64(a).partial_cmp(&as_f64(b)) {
            Some(ordering) => accept(ordering),
            // An unordered operand fails every relation, including equality.
            None => false,
        },
    }
}

fn chain(args: &[Value], accept: fn(Ordering) -> bool) -> Value {
    for window in args.windows(2) {
        if !holds(&window[0], &window[1], accept) {
            return Value::Nil;
        }
    }
    Value::Bool(true)
}

pub fn greater(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |o| o == Ordering::Greater))
}

pub fn greater_equal(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |o| o != Ordering::Less))
}

pub fn less(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |o| o == Ordering::Less))
}

pub fn less_equal(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |o| o != Ordering::Greater))
}

pub fn equal(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |o| o == Ordering::Equal))
}

pub fn register(table: &mut HashMap<String, Value>) {
    let op = |name: &'static str, func: PrimitiveFn| {
        Value::primitive(name, Some(2), None, ArgSpec::Numbers, func)
    };
    table.insert(">".to_string(), op(">", greater));
    table.insert(">=".to_string(), op(">=", greater_equal));
    table.insert("<".to_string(), op("<", less));
    table.insert("<=".to_string(), op("<=", less_equal));
    table.insert("=".to_string(), op("=", equal));
}
