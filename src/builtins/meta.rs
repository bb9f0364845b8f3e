//! Environment and interpreter meta-operations: clean-environment, exit,
//! and the dummy entries for the names the evaluator intercepts.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Top-level only; the level gate guarantees `env` is the root frame here.
pub fn clean_environment(
    _args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    env.clear_user();
    if evaluator.verbose {
        let _ = writeln!(out, "environment cleaned");
    }
    Ok(Value::Void)
}

/// The normal termination unwind; the REPL catches it and says goodbye.
pub fn exit(
    _args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    Err(EvalError::Exit)
}

pub fn register(table: &mut HashMap<String, Value>) {
    table.insert(
        "clean-environment".to_string(),
        Value::primitive(
            "clean-environment",
            Some(0),
            Some(0),
            ArgSpec::Any,
            clean_environment,
        ),
    );
    table.insert(
        "exit".to_string(),
        Value::primitive("exit", Some(0), Some(0), ArgSpec::Any, exit),
    );

    // Present only so the symbols resolve and print as procedures; the
    // evaluator intercepts their application.
    table.insert("lambda".to_string(), Value::dummy("lambda"));
    table.insert("verbose".to_string(), Value::dummy("verbose"));
    table.insert("verbose?".to_string(), Value::dummy("verbose?"));
}
