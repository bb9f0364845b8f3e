// ABOUTME: Syntax highlighter for interactive sessions via rustyline's Helper traits
// Display-only: piped input never goes through here, so the byte protocol
// of the REPL stays exact.

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line, &special_forms(), &builtins());
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn is_lexeme_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '"' | ';' | '\'')
}

fn highlight_line(
    line: &str,
    special_forms: &HashSet<&'static str>,
    builtins: &HashSet<&'static str>,
) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ';' => {
                // Comment runs to the end of the line.
                result.push_str(COLOR_COMMENT);
                while i < chars.len() {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        result.push(chars[i]);
                        result.push(chars[i + 1]);
                        i += 2;
                    } else if chars[i] == '"' {
                        result.push('"');
                        i += 1;
                        break;
                    } else {
                        result.push(chars[i]);
                        i += 1;
                    }
                }
                result.push_str(COLOR_RESET);
            }

            '(' | ')' => {
                result.push_str(COLOR_PARENS);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }

            '\'' => {
                result.push_str(COLOR_QUOTE);
                result.push('\'');
                i += 1;
                result.push_str(COLOR_RESET);
            }

            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }

            _ => {
                let start = i;
                while i < chars.len() && is_lexeme_char(chars[i]) {
                    i += 1;
                }
                let lexeme: String = chars[start..i].iter().collect();

                if looks_numeric(&lexeme) {
                    result.push_str(COLOR_NUMBER);
                    result.push_str(&lexeme);
                    result.push_str(COLOR_RESET);
                } else if matches!(lexeme.as_str(), "#t" | "#f" | "t" | "nil") {
                    result.push_str(COLOR_NUMBER);
                    result.push_str(&lexeme);
                    result.push_str(COLOR_RESET);
                } else if special_forms.contains(lexeme.as_str()) {
                    result.push_str(COLOR_SPECIAL_FORM);
                    result.push_str(&lexeme);
                    result.push_str(COLOR_RESET);
                } else if builtins.contains(lexeme.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                    result.push_str(&lexeme);
                    result.push_str(COLOR_RESET);
                } else {
                    result.push_str(&lexeme);
                }
            }
        }
    }

    result
}

fn looks_numeric(lexeme: &str) -> bool {
    lexeme.parse::<i64>().is_ok()
        || (lexeme.contains(['.', 'e', 'E']) && lexeme.parse::<f64>().is_ok())
}

fn special_forms() -> HashSet<&'static str> {
    [
        "quote", "define", "lambda", "and", "or", "begin", "if", "cond", "let", "verbose",
        "verbose?",
    ]
    .iter()
    .copied()
    .collect()
}

fn builtins() -> HashSet<&'static str> {
    [
        "cons",
        "list",
        "car",
        "cdr",
        "atom?",
        "pair?",
        "list?",
        "null?",
        "integer?",
        "real?",
        "number?",
        "string?",
        "boolean?",
        "symbol?",
        "+",
        "-",
        "*",
        "/",
        "not",
        ">",
        ">=",
        "<",
        "<=",
        "=",
        "string-append",
        "string>?",
        "string<?",
        "string=?",
        "eqv?",
        "equal?",
        "clean-environment",
        "exit",
    ]
    .iter()
    .copied()
    .collect()
}
