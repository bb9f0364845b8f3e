// ABOUTME: Byte-exact full-session transcripts through the public REPL driver

use ourscheme::repl::Repl;
use std::io::BufRead;

/// Runs a whole session over `input` (whose first line is the throwaway
/// handshake) and returns everything written to the output stream.
fn transcript(input: &str) -> String {
    let mut repl = Repl::new();
    let mut lines = input.as_bytes().lines();
    let mut out = Vec::new();
    repl.run(&mut lines, &mut out).expect("session completes");
    String::from_utf8(out).expect("utf8 output")
}

// Follows a writeln-terminated line: its newline plus the final prompt.
const EOF_TAIL: &str =
    "\n\n> ERROR (no more input) : END-OF-FILE encountered\nThanks for using OurScheme!";

#[test]
fn test_banner_prompt_and_eof_framing() {
    assert_eq!(
        transcript("1\n"),
        format!("Welcome to OurScheme!{EOF_TAIL}")
    );
}

#[test]
fn test_exit_farewell_has_no_trailing_newline() {
    let output = transcript("1\n(exit)\n");
    assert_eq!(
        output,
        "Welcome to OurScheme!\n\n> \nThanks for using OurScheme!"
    );
    assert!(!output.ends_with('\n'));
}

#[test]
fn test_session_mixing_definitions_calls_and_errors() {
    let input = "1\n\
                 (define (fact n) (if (<= n 1) 1 (* n (fact (- n 1)))))\n\
                 (fact 5)\n\
                 (fact 'five)\n\
                 (fact 5 5)\n\
                 (exit)\n";
    let expected = "Welcome to OurScheme!\n\
                    \n> fact defined\n\
                    \n> 120\n\
                    \n> ERROR (<= with incorrect argument type) : five\n\
                    \n> ERROR (incorrect number of arguments) : fact\n\
                    \n> \nThanks for using OurScheme!";
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_incomplete_form_spans_many_lines_without_extra_prompts() {
    let input = "1\n(define\n  (add a b)\n  (+ a\n     b))\n(add 20 22)\n";
    let expected =
        format!("Welcome to OurScheme!\n\n> add defined\n\n> 42{EOF_TAIL}");
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_leftover_text_on_a_completed_line_starts_the_next_form() {
    // "(+ 3 4" completes on the second line; the trailing "(+ 5" carries
    // over and finishes on the third.
    let input = "1\n(+ 3\n4) (+ 5\n6)\n";
    let expected = format!("Welcome to OurScheme!\n\n> 7\n\n> 11{EOF_TAIL}");
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_quote_output_shapes() {
    let input = "1\n'(1 (2 3))\n''x\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ( 1\n  ( 2\n    3\n  )\n)\n\n> ( quote\n  x\n){EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_no_closing_quote_clears_the_buffer() {
    let input = "1\n(cons \"abc\n(+ 1 1)\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ERROR (no closing quote) : END-OF-LINE encountered at Line 1 Column 11\n\n> 2{EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_string_escapes_round_trip_through_output() {
    let input = "1\n\"tab\\there\\nand \\\"quotes\\\"\"\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> \"tab\\there\\nand \\\"quotes\\\"\"{EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_non_list_diagnostic_prints_the_application() {
    let input = "1\n(+ 1 . 2)\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ERROR (non-list) : ( +\n  1\n  .\n  2\n){EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_cond_and_let_format_diagnostics_quote_the_form() {
    let input = "1\n(cond #t)\n(let x 1)\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ERROR (COND format) : ( cond\n  #t\n)\n\n> ERROR (LET format) : ( let\n  x\n  1\n){EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_unbound_parameter_diagnostic() {
    let input = "1\n(cons (if nil 1) 2)\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ERROR (unbound parameter) : ( if\n  nil\n  1\n){EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_division_by_zero_diagnostic() {
    let input = "1\n(/ 10 (- 5 5))\n";
    let expected =
        format!("Welcome to OurScheme!\n\n> ERROR (division by zero) : /{EOF_TAIL}");
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_verbose_controls_clean_environment_confirmation() {
    let input = "1\n(verbose nil)\n(clean-environment)\n(verbose #t)\n(clean-environment)\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> nil\n\n> \n> #t\n\n> environment cleaned{EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_lambda_format_diagnostic_quotes_the_form() {
    let input = "1\n(lambda (x))\n";
    let expected = format!(
        "Welcome to OurScheme!\n\n> ERROR (lambda format) : ( lambda\n  ( x\n  )\n){EOF_TAIL}"
    );
    assert_eq!(transcript(input), expected);
}

#[test]
fn test_exit_mid_line_skips_the_rest() {
    let input = "1\n(+ 1 1) (exit) (+ 2 2)\n";
    assert_eq!(
        transcript(input),
        "Welcome to OurScheme!\n\n> 2\n\n> \nThanks for using OurScheme!"
    );
}
