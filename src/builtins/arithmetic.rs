//! Arithmetic: +, -, *, /
//!
//! Each takes at least two numeric arguments. The result is an integer
//! exactly when every operand is an integer; one real operand promotes the
//! whole computation. All-integer division truncates toward zero, so
//! `(/ 7 2)` is 3. Any zero divisor raises the division-by-zero error.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::value::{ArgSpec, PrimitiveFn, Value};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/// Arguments reach these functions only after the dispatcher's numeric
/// type check; the fallback arms are unreachable.
pub(crate) fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Real(r) => *r,
        _ => 0.0,
    }
}

fn as_i64(value: &Value) -> i64 {
    match value {
        Value::Int(n) => *n,
        _ => 0,
    }
}

fn any_real(args: &[Value]) -> bool {
    args.iter().any(|a| matches!(a, Value::Real(_)))
}

pub fn add(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if any_real(args) {
        Ok(Value::Real(args.iter().map(as_f64).sum()))
    } else {
        let mut total: i64 = 0;
        for arg in args {
            total = total.wrapping_add(as_i64(arg));
        }
        Ok(Value::Int(total))
    }
}

pub fn sub(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if any_real(args) {
        let mut total = as_f64(&args[0]);
        for arg in &args[1..] {
            total -= as_f64(arg);
        }
        Ok(Value::Real(total))
    } else {
        let mut total = as_i64(&args[0]);
        for arg in &args[1..] {
            total = total.wrapping_sub(as_i64(arg));
        }
        Ok(Value::Int(total))
    }
}

pub fn mul(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if any_real(args) {
        Ok(Value::Real(args.iter().map(as_f64).product()))
    } else {
        let mut total: i64 = 1;
        for arg in args {
            total = total.wrapping_mul(as_i64(arg));
        }
        Ok(Value::Int(total))
    }
}

pub fn div(
    args: &[Value],
    _env: &Rc<Environment>,
    _evaluator: &mut Evaluator,
    _out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if any_real(args) {
        let mut total = as_f64(&args[0]);
        for arg in &args[1..] {
            let divisor = as_f64(arg);
            if divisor == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            total /= divisor;
        }
        Ok(Value::Real(total))
    } else {
        let mut total = as_i64(&args[0]);
        for arg in &args[1..] {
            let divisor = as_i64(arg);
            if divisor == 0 {
                return Err(EvalError::DivisionByZero);
            }
            total = total.wrapping_div(divisor);
        }
        Ok(Value::Int(total))
    }
}

pub fn register(table: &mut HashMap<String, Value>) {
    let op = |name: &'static str, func: PrimitiveFn| {
        Value::primitive(name, Some(2), None, ArgSpec::Numbers, func)
    };
    table.insert("+".to_string(), op("+", add));
    table.insert("-".to_string(), op("-", sub));
    table.insert("*".to_string(), op("*", mul));
    table.insert("/".to_string(), op("/", div));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(
        func: crate::value::PrimitiveFn,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        let env = Environment::global();
        let mut evaluator = Evaluator::new();
        let mut out = Vec::new();
        func(args, &env, &mut evaluator, &mut out)
    }

    #[test]
    fn test_integer_results_stay_integers() {
        assert_eq!(
            call(add, &[Value::Int(1), Value::Int(2), Value::Int(3)]),
            Ok(Value::Int(6))
        );
        assert_eq!(call(sub, &[Value::Int(10), Value::Int(3)]), Ok(Value::Int(7)));
        assert_eq!(call(mul, &[Value::Int(2), Value::Int(3)]), Ok(Value::Int(6)));
    }

    #[test]
    fn test_one_real_promotes() {
        assert_eq!(
            call(add, &[Value::Int(1), Value::Real(2.5)]),
            Ok(Value::Real(3.5))
        );
        assert_eq!(
            call(mul, &[Value::Real(2.0), Value::Int(3)]),
            Ok(Value::Real(6.0))
        );
    }

    #[test]
    fn test_integer_division_truncates_toward_zero() {
        assert_eq!(call(div, &[Value::Int(6), Value::Int(2)]), Ok(Value::Int(3)));
        assert_eq!(call(div, &[Value::Int(7), Value::Int(2)]), Ok(Value::Int(3)));
        assert_eq!(call(div, &[Value::Int(-7), Value::Int(2)]), Ok(Value::Int(-3)));
        assert_eq!(
            call(div, &[Value::Int(100), Value::Int(2), Value::Int(5)]),
            Ok(Value::Int(10))
        );
    }

    #[test]
    fn test_real_division_promotes() {
        assert_eq!(
            call(div, &[Value::Real(7.0), Value::Int(2)]),
            Ok(Value::Real(3.5))
        );
    }

    #[test]
    fn test_zero_divisor_raises() {
        assert!(matches!(
            call(div, &[Value::Int(1), Value::Int(0)]),
            Err(EvalError::DivisionByZero)
        ));
        assert!(matches!(
            call(div, &[Value::Real(1.0), Value::Real(0.0)]),
            Err(EvalError::DivisionByZero)
        ));
    }

    #[test]
    fn test_integer_overflow_wraps() {
        assert_eq!(
            call(add, &[Value::Int(i64::MAX), Value::Int(1)]),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            call(div, &[Value::Int(i64::MIN), Value::Int(-1)]),
            Ok(Value::Int(i64::MIN))
        );
    }
}
