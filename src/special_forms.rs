// ABOUTME: The built-in special forms: quote, define, and/or, begin, if, cond, let, lambda

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{is_false, EvalOutcome, Evaluator, Level};
use crate::value::{Callable, Closure, Pair, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

pub fn register(table: &mut HashMap<String, Value>) {
    table.insert(
        "quote".to_string(),
        Value::special("quote", Some(1), Some(1), quote),
    );
    table.insert("define".to_string(), Value::special("define", None, None, define));
    table.insert("and".to_string(), Value::special("and", Some(2), None, and));
    table.insert("or".to_string(), Value::special("or", Some(2), None, or));
    table.insert(
        "begin".to_string(),
        Value::special("begin", Some(1), None, begin),
    );
    table.insert(
        "if".to_string(),
        Value::special("if", Some(2), Some(3), if_form),
    );
    table.insert("cond".to_string(), Value::special("cond", None, None, cond));
    table.insert("let".to_string(), Value::special("let", None, None, let_form));
}

fn quote(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> EvalOutcome {
    Ok(Some(args[0].clone()))
}

/// `(define sym expr)` or the procedure sugar `(define (f p …) body …)`.
/// Top-level only; the level gate runs before this is reached.
fn define(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    if args.len() < 2 {
        return Err(EvalError::DefineFormat);
    }

    match &args[0] {
        Value::Symbol(name) => {
            if args.len() != 2 {
                return Err(EvalError::DefineFormat);
            }
            let value = match evaluator.evaluate(&args[1], env, Level::Inner, out)? {
                Some(value) => value,
                None => return Err(EvalError::UnboundParameter(args[1].clone())),
            };
            env.define(name, value)?;
            if evaluator.verbose {
                let _ = writeln!(out, "{name} defined");
            }
            Ok(Some(Value::Void))
        }
        Value::Pair(_) => {
            let signature = symbol_names(&args[0]).ok_or(EvalError::DefineFormat)?;
            let Some((name, params)) = signature.split_first() else {
                return Err(EvalError::DefineFormat);
            };
            if has_duplicates(params) {
                return Err(EvalError::DefineFormat);
            }
            let closure = Value::Callable(Rc::new(Callable::Closure(Closure {
                name: name.clone(),
                params: params.to_vec(),
                body: args[1..].to_vec(),
                env: Rc::clone(env),
            })));
            env.define(name, closure)?;
            if evaluator.verbose {
                let _ = writeln!(out, "{name} defined");
            }
            Ok(Some(Value::Void))
        }
        _ => Err(EvalError::DefineFormat),
    }
}

/// Short-circuits on the first `nil`; otherwise yields the last operand.
fn and(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    let mut last = None;
    for arg in args {
        last = evaluator.evaluate(arg, env, Level::Inner, out)?;
        if is_false(&last) {
            return Ok(Some(Value::Nil));
        }
    }
    Ok(last)
}

/// Yields the first non-`nil` operand, or `nil` when none is.
fn or(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    for arg in args {
        let result = evaluator.evaluate(arg, env, Level::Inner, out)?;
        if !is_false(&result) {
            return Ok(result);
        }
    }
    Ok(Some(Value::Nil))
}

fn begin(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    let mut result = None;
    for expr in args {
        result = evaluator.evaluate(expr, env, Level::Inner, out)?;
    }
    Ok(result)
}

fn if_form(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    let test = evaluator.evaluate(&args[0], env, Level::Inner, out)?;
    if !is_false(&test) {
        evaluator.evaluate(&args[1], env, Level::Inner, out)
    } else if args.len() > 2 {
        evaluator.evaluate(&args[2], env, Level::Inner, out)
    } else {
        Ok(None)
    }
}

/// Every clause is validated before any test runs; a malformed later clause
/// poisons the whole form even when an earlier test would fire.
fn cond(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    if args.is_empty() {
        return Err(EvalError::CondFormat);
    }

    let mut clauses = Vec::with_capacity(args.len());
    for clause in args {
        if !matches!(clause, Value::Pair(_)) {
            return Err(EvalError::CondFormat);
        }
        let parts = clause.list_elements().ok_or(EvalError::CondFormat)?;
        if parts.len() < 2 {
            return Err(EvalError::CondFormat);
        }
        clauses.push(parts);
    }

    let last_index = clauses.len() - 1;
    for (index, clause) in clauses.iter().enumerate() {
        let test = &clause[0];
        // The literal symbol `else` is only special in the last clause.
        let fires = if index == last_index && test.is_symbol("else") {
            true
        } else {
            !is_false(&evaluator.evaluate(test, env, Level::Inner, out)?)
        };
        if fires {
            let mut result = None;
            for expr in &clause[1..] {
                result = evaluator.evaluate(expr, env, Level::Inner, out)?;
            }
            return Ok(result);
        }
    }
    Ok(None)
}

/// `(let ((s₁ e₁) …) body …)`. Binding values are evaluated in the
/// enclosing environment, then the body runs in the fresh frame.
fn let_form(
    args: &[Value],
    env: &Rc<Environment>,
    evaluator: &mut Evaluator,
    out: &mut dyn Write,
) -> EvalOutcome {
    if args.len() < 2 {
        return Err(EvalError::LetFormat);
    }

    let frame = Environment::with_parent(Rc::clone(env));
    match &args[0] {
        binding_list @ Value::Pair(_) => {
            let bindings = binding_list.list_elements().ok_or(EvalError::LetFormat)?;
            for binding in &bindings {
                if !matches!(binding, Value::Pair(_)) {
                    return Err(EvalError::LetFormat);
                }
                let parts = binding.list_elements().ok_or(EvalError::LetFormat)?;
                let [Value::Symbol(name), expr] = parts.as_slice() else {
                    return Err(EvalError::LetFormat);
                };
                let value = match evaluator.evaluate(expr, env, Level::Inner, out)? {
                    Some(value) => value,
                    None => return Err(EvalError::UnboundParameter(expr.clone())),
                };
                frame.define(name, value)?;
            }
        }
        empty if empty.is_nil() => {}
        _ => return Err(EvalError::LetFormat),
    }

    let mut result = None;
    for expr in &args[1..] {
        result = evaluator.evaluate(expr, &frame, Level::Inner, out)?;
    }
    Ok(result)
}

/// Materializes `(lambda (p …) body …)` into a closure over `env`. The
/// params must be a proper list of distinct symbols; the body non-empty.
pub fn make_lambda(form: &Pair, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let params = match &form.car {
        empty if empty.is_nil() => Vec::new(),
        list @ Value::Pair(_) => {
            let elements = list.list_elements().ok_or(EvalError::LambdaFormat)?;
            let mut params = Vec::with_capacity(elements.len());
            for element in elements {
                match element {
                    Value::Symbol(name) => params.push(name),
                    _ => return Err(EvalError::LambdaFormat),
                }
            }
            params
        }
        _ => return Err(EvalError::LambdaFormat),
    };
    if has_duplicates(&params) {
        return Err(EvalError::LambdaFormat);
    }

    let body = form.cdr.list_elements().ok_or(EvalError::LambdaFormat)?;
    if body.is_empty() {
        return Err(EvalError::LambdaFormat);
    }

    Ok(Value::Callable(Rc::new(Callable::Closure(Closure {
        name: "lambda".to_string(),
        params,
        body,
        env: Rc::clone(env),
    }))))
}

/// Collects a proper list of symbols, e.g. a define-sugar signature.
fn symbol_names(list: &Value) -> Option<Vec<String>> {
    let elements = list.list_elements()?;
    let mut names = Vec::with_capacity(elements.len());
    for element in elements {
        match element {
            Value::Symbol(name) => names.push(name),
            _ => return None,
        }
    }
    Some(names)
}

fn has_duplicates(names: &[String]) -> bool {
    names
        .iter()
        .enumerate()
        .any(|(i, name)| names[..i].contains(name))
}
