// ABOUTME: Library-level integration tests driving the full parse-eval pipeline

use ourscheme::env::Environment;
use ourscheme::error::EvalError;
use ourscheme::eval::{Evaluator, Level};
use ourscheme::parser::Parser;
use ourscheme::printer::pretty;
use ourscheme::scanner::Scanner;
use ourscheme::value::Value;
use std::rc::Rc;

/// One interpreter session: a global environment plus an evaluator whose
/// confirmations go to an in-memory sink.
struct Session {
    env: Rc<Environment>,
    evaluator: Evaluator,
    out: Vec<u8>,
}

fn setup() -> Session {
    Session {
        env: Environment::global(),
        evaluator: Evaluator::new(),
        out: Vec::new(),
    }
}

impl Session {
    fn eval(&mut self, source: &str) -> Result<Option<Value>, EvalError> {
        let mut scanner = Scanner::new();
        scanner.reset(source);
        let mut parser = Parser::new(&mut scanner).expect("test source is not empty");
        let expr = parser.parse().expect("test source parses");
        self.evaluator
            .evaluate(&expr, &self.env, Level::Top, &mut self.out)
    }

    fn value(&mut self, source: &str) -> Value {
        self.eval(source)
            .expect("evaluation succeeds")
            .expect("evaluation produces a value")
    }

    fn printed(&mut self, source: &str) -> String {
        pretty(&self.value(source))
    }
}

#[test]
fn test_print_parse_round_trip_on_self_evaluating_atoms() {
    let mut s = setup();
    for source in ["42", "-7", "3.140", "\"hi there\\n\"", "#t", "nil"] {
        let printed = s.printed(source);
        let mut t = setup();
        assert_eq!(t.printed(&printed), printed, "round trip of {source}");
    }
}

#[test]
fn test_quote_sugar_and_quote_form_agree() {
    let mut s = setup();
    for (sugar, form) in [("'x", "(quote x)"), ("'(1 2 3)", "(quote (1 2 3))")] {
        let a = s.value(sugar);
        let b = s.value(form);
        assert_eq!(a, b, "{sugar} vs {form}");
    }
    // A quoted quote and the written-out form print identically even though
    // one is a reader-level quote and the other a cons structure.
    let a = s.printed("''a");
    let b = s.printed("'(quote a)");
    assert_eq!(a, b);
}

#[test]
fn test_list_and_nested_cons_are_structurally_equal() {
    let mut s = setup();
    assert_eq!(
        s.value("(equal? (list 1 2 3) (cons 1 (cons 2 (cons 3 nil))))"),
        Value::Bool(true)
    );
}

#[test]
fn test_short_circuit_is_observable_through_define_side_effects() {
    let mut s = setup();
    // A side effect inside the undecided region runs once.
    s.value("(define (say x) x)");
    assert_eq!(s.value("(and nil (say 1))"), Value::Nil);
    // The unbound symbol proves the tail is never evaluated.
    assert_eq!(s.value("(or 'hit never-bound)"), Value::Symbol("hit".to_string()));
    assert!(matches!(
        s.eval("(or nil never-bound)"),
        Err(EvalError::UnboundSymbol(name)) if name == "never-bound"
    ));
}

#[test]
fn test_closure_capture_property() {
    let mut s = setup();
    s.value("(define make-adder (lambda (n) (lambda (x) (+ x n))))");
    s.value("(define add3 (make-adder 3))");
    assert_eq!(s.value("(add3 4)"), Value::Int(7));
    s.value("(define n 100)");
    assert_eq!(s.value("(add3 4)"), Value::Int(7));
}

#[test]
fn test_builtin_protection() {
    let mut s = setup();
    assert!(matches!(
        s.eval("(define car 1)"),
        Err(EvalError::DefineFormat)
    ));
    assert!(matches!(
        s.eval("(define exit 1)"),
        Err(EvalError::DefineFormat)
    ));
}

#[test]
fn test_level_gate_property() {
    let mut s = setup();
    assert!(matches!(s.eval("(if #t (exit))"), Err(EvalError::LevelOfExit)));
    assert!(matches!(s.eval("(exit)"), Err(EvalError::Exit)));
}

#[test]
fn test_eqv_identity_vs_equal_structure() {
    let mut s = setup();
    assert_eq!(s.value("(eqv? '(1 2) '(1 2))"), Value::Nil);
    assert_eq!(s.value("(equal? '(1 2) '(1 2))"), Value::Bool(true));
    s.value("(define shared '(1 2))");
    assert_eq!(s.value("(eqv? shared shared)"), Value::Bool(true));
    assert_eq!(s.value("(eqv? \"a\" \"a\")"), Value::Nil);
    assert_eq!(s.value("(equal? \"a\" \"a\")"), Value::Bool(true));
    assert_eq!(s.value("(eqv? 2 2)"), Value::Bool(true));
}

#[test]
fn test_numeric_promotion_rules() {
    let mut s = setup();
    assert_eq!(s.value("(+ 1 2 3)"), Value::Int(6));
    assert_eq!(s.value("(/ 6 2)"), Value::Int(3));
    assert_eq!(s.value("(/ 7 2)"), Value::Int(3));
    assert_eq!(s.value("(/ 7 2.0)"), Value::Real(3.5));
    assert_eq!(s.value("(* 2 2.5)"), Value::Real(5.0));
}

#[test]
fn test_deep_recursion_through_closures() {
    let mut s = setup();
    s.value("(define (count-down k) (if (> k 0) (count-down (- k 1)) 'done))");
    assert_eq!(s.value("(count-down 200)"), Value::Symbol("done".to_string()));
}

#[test]
fn test_higher_order_functions() {
    let mut s = setup();
    s.value("(define (twice f x) (f (f x)))");
    s.value("(define (inc n) (+ n 1))");
    assert_eq!(s.value("(twice inc 5)"), Value::Int(7));
    assert_eq!(s.value("(twice (lambda (n) (* n n)) 3)"), Value::Int(81));
}

#[test]
fn test_let_over_lambda() {
    let mut s = setup();
    s.value("(define f (let ((base 10)) (lambda (x) (+ base x))))");
    assert_eq!(s.value("(f 5)"), Value::Int(15));
}

#[test]
fn test_cond_selects_first_true_clause() {
    let mut s = setup();
    s.value("(define (classify n) (cond ((< n 0) 'negative) ((= n 0) 'zero) (else 'positive)))");
    assert_eq!(s.value("(classify -5)"), Value::Symbol("negative".to_string()));
    assert_eq!(s.value("(classify 0)"), Value::Symbol("zero".to_string()));
    assert_eq!(s.value("(classify 9)"), Value::Symbol("positive".to_string()));
}

#[test]
fn test_list_walking_with_car_and_cdr() {
    let mut s = setup();
    s.value("(define (second lst) (car (cdr lst)))");
    assert_eq!(s.value("(second '(1 2 3))"), Value::Int(2));
    s.value("(define (len lst) (if (null? lst) 0 (+ 1 (len (cdr lst)))))");
    assert_eq!(s.value("(len '(a b c d))"), Value::Int(4));
    assert_eq!(s.value("(len '())"), Value::Int(0));
}

#[test]
fn test_string_operations_end_to_end() {
    let mut s = setup();
    assert_eq!(
        s.printed("(string-append \"foo\" \"bar\")"),
        "\"foobar\"".to_string()
    );
    assert_eq!(s.value("(string<? \"abc\" \"abd\")"), Value::Bool(true));
    assert_eq!(s.value("(string=? \"x\" \"x\" \"x\")"), Value::Bool(true));
}

#[test]
fn test_error_messages_embed_printed_forms() {
    let mut s = setup();
    let err = s.eval("(car '(1 2) 3)").expect_err("arity error");
    assert_eq!(
        err.to_string(),
        "ERROR (incorrect number of arguments) : car"
    );
    let err = s.eval("(+ 1 'sym)").expect_err("type error");
    assert_eq!(
        err.to_string(),
        "ERROR (+ with incorrect argument type) : sym"
    );
    let err = s.eval("(\"text\" 1)").expect_err("non-function");
    assert_eq!(
        err.to_string(),
        "ERROR (attempt to apply non-function) : \"text\""
    );
}

#[test]
fn test_quoted_values_print_like_quote_forms() {
    let mut s = setup();
    assert_eq!(s.printed("''yes"), "( quote\n  yes\n)");
    assert_eq!(s.printed("'(quote yes)"), "( quote\n  yes\n)");
}
