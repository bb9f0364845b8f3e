// ABOUTME: Tree-walking evaluator reducing expressions to values under an environment

use crate::env::Environment;
use crate::error::EvalError;
use crate::special_forms;
use crate::value::{Callable, Value};
use std::io::Write;
use std::rc::Rc;

/// Whether the expression being evaluated is a top-level form read by the
/// REPL or nested inside another expression. `define`, `clean-environment`
/// and `exit` are only legal at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Top,
    Inner,
}

/// `Ok(None)` means the form legitimately produced no value (a conditional
/// with no matching branch); the REPL and argument materialization turn
/// that into the appropriate diagnostic.
pub type EvalOutcome = Result<Option<Value>, EvalError>;

/// A no-value result still counts as true in tests; only `nil` is false.
pub(crate) fn is_false(outcome: &Option<Value>) -> bool {
    matches!(outcome, Some(value) if value.is_nil())
}

pub struct Evaluator {
    pub verbose: bool,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator { verbose: true }
    }

    pub fn evaluate(
        &mut self,
        expr: &Value,
        env: &Rc<Environment>,
        level: Level,
        out: &mut dyn Write,
    ) -> EvalOutcome {
        match expr {
            Value::Symbol(name) => env.lookup(name).map(Some),
            Value::Quoted(inner) => Ok(Some((**inner).clone())),
            Value::Pair(_) => self.apply_form(expr, env, level, out),
            _ => Ok(Some(expr.clone())),
        }
    }

    /// Evaluates argument expressions left to right for a procedure call.
    /// An argument that produces no value is an unbound parameter.
    pub fn eval_arguments(
        &mut self,
        args: &[Value],
        env: &Rc<Environment>,
        out: &mut dyn Write,
    ) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match self.evaluate(arg, env, Level::Inner, out)? {
                Some(value) => values.push(value),
                None => return Err(EvalError::UnboundParameter(arg.clone())),
            }
        }
        Ok(values)
    }

    fn apply_form(
        &mut self,
        expr: &Value,
        env: &Rc<Environment>,
        level: Level,
        out: &mut dyn Write,
    ) -> EvalOutcome {
        let Value::Pair(pair) = expr else {
            return Ok(Some(expr.clone()));
        };
        let head = &pair.car;

        // The evaluator intercepts these before generic dispatch; their
        // built-in entries are dummies that exist only for printing.
        if head.is_symbol("verbose") {
            return self.set_verbose(expr, &pair.cdr, env, out);
        }
        if head.is_symbol("verbose?") {
            return self.query_verbose(expr, &pair.cdr);
        }
        if head.is_symbol("lambda") {
            let Value::Pair(form) = &pair.cdr else {
                return Err(EvalError::LambdaFormat);
            };
            return special_forms::make_lambda(form, env).map(Some);
        }

        let callee = match self.evaluate(head, env, Level::Inner, out)? {
            Some(value) => value,
            None => return Err(EvalError::UnboundParameter(head.clone())),
        };

        let args = pair
            .cdr
            .list_elements()
            .ok_or_else(|| EvalError::NonList(expr.clone()))?;

        let callable = match &callee {
            Value::Callable(callable) => Rc::clone(callable),
            _ => return Err(EvalError::NotCallable(callee.clone())),
        };

        if level != Level::Top {
            match &*callable {
                Callable::Special(s) if s.name == "define" => {
                    return Err(EvalError::LevelOfDefine)
                }
                Callable::Primitive(p) if p.name == "clean-environment" => {
                    return Err(EvalError::LevelOfCleanEnvironment)
                }
                Callable::Primitive(p) if p.name == "exit" => return Err(EvalError::LevelOfExit),
                _ => {}
            }
        }

        callable.check_arity(args.len())?;

        match &*callable {
            Callable::Special(special) => (special.func)(&args, env, self, out),
            Callable::Primitive(primitive) => {
                let values = self.eval_arguments(&args, env, out)?;
                primitive.check_arg_types(&values)?;
                (primitive.func)(&values, env, self, out).map(Some)
            }
            Callable::Closure(closure) => {
                let values = self.eval_arguments(&args, env, out)?;
                let frame = Environment::with_parent(Rc::clone(&closure.env));
                for (param, value) in closure.params.iter().zip(values) {
                    frame.define(param, value)?;
                }
                let mut result = None;
                for body_expr in &closure.body {
                    result = self.evaluate(body_expr, &frame, Level::Inner, out)?;
                }
                Ok(result)
            }
            Callable::Dummy(_) => Err(EvalError::NotCallable(callee)),
        }
    }

    /// `(verbose expr)` sets the flag, echoes the new state, returns void.
    fn set_verbose(
        &mut self,
        expr: &Value,
        rest: &Value,
        env: &Rc<Environment>,
        out: &mut dyn Write,
    ) -> EvalOutcome {
        let args = rest
            .list_elements()
            .ok_or_else(|| EvalError::NonList(expr.clone()))?;
        if args.len() != 1 {
            return Err(EvalError::IncorrectArgumentCount("verbose".to_string()));
        }
        let value = self.evaluate(&args[0], env, Level::Inner, out)?;
        self.verbose = !is_false(&value);
        let _ = writeln!(out, "{}", if self.verbose { "#t" } else { "nil" });
        Ok(Some(Value::Void))
    }

    fn query_verbose(&mut self, expr: &Value, rest: &Value) -> EvalOutcome {
        let args = rest
            .list_elements()
            .ok_or_else(|| EvalError::NonList(expr.clone()))?;
        if !args.is_empty() {
            return Err(EvalError::IncorrectArgumentCount("verbose?".to_string()));
        }
        Ok(Some(Value::from_bool(self.verbose)))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}
