//! String operations: string-append, string>?, string<?, string=?

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, PrimitiveFn, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

fn as_str(value: &Value) -> &str {
    match value {
        Value::Str(s) => s,
        _ => "",
    }
}

pub fn append(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    let mut joined = String::new();
    for arg in args {
        joined.push_str(as_str(arg));
    }
    Ok(Value::Str(Rc::from(joined)))
}

fn chain(args: &[Value], holds: fn(&str, &str) -> bool) -> Value {
    for window in args.windows(2) {
        if !holds(as_str(&window[0]), as_str(&window[1])) {
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
    Ok(chain(args, |a, b| a > b))
}

pub fn less(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |a, b| a < b))
}

pub fn equal(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Ok(chain(args, |a, b| a == b))
}

pub fn register(table: &mut HashMap<String, Value>) {
    let op = |name: &'static str, func: PrimitiveFn| {
        Value::primitive(name, Some(2), None, ArgSpec::Strings, func)
    };
    table.insert("string-append".to_string(), op("string-append", append));
    table.insert("string>?".to_string(), op("string>?", greater));
    table.insert("string<?".to_string(), op("string<?", less));
    table.insert("string=?".to_string(), op("string=?", equal));
}
