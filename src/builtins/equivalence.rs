//! Equivalence testers: eqv?, equal?

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Immutable non-string atoms compare by value; pairs, strings, quoted
/// values and procedures compare by heap identity.
pub fn eqv(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    let same = match (&args[0], &args[1]) {
        (Value::Pair(a), Value::Pair(b)) => Rc::ptr_eq(a, b),
        (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
        (Value::Quoted(a), Value::Quoted(b)) => Rc::ptr_eq(a, b),
        (Value::Callable(a), Value::Callable(b)) => Rc::ptr_eq(a, b),
        (a, b) => a == b,
    };
    Ok(Value::from_bool(same))
}

/// Structural recursive equality; procedures still compare by identity.
pub fn equal(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(Value::from_bool(args[0] == args[1]))
}

pub fn register(table: &mut HashMap<String, Value>) {
    table.insert(
        "eqv?".to_string(),
        Value::primitive("eqv?", Some(2), Some(2), ArgSpec::Any, eqv),
    );
    table.insert(
        "equal?".to_string(),
        Value::primitive("equal?", Some(2), Some(2), ArgSpec::Any, equal),
    );
}
