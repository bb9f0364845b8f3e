// ABOUTME: REPL driver: multi-line accumulation, parse-eval-print cycles, diagnostics

use crate::config;
use crate::env::Environment;
use crate::error::{EvalError, ParseError};
use crate::eval::{Evaluator, Level};
use crate::parser::Parser;
use crate::printer;
use crate::scanner::Scanner;
use crate::value::Value;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// The one blocking operation the core needs from its surroundings.
/// `None` means end of input.
pub trait LineReader {
    fn read_line(&mut self) -> Option<String>;
}

/// Any buffered reader's line iterator works as a source; I/O errors end
/// the session like EOF.
impl<B: BufRead> LineReader for io::Lines<B> {
    fn read_line(&mut self) -> Option<String> {
        self.next()?.ok()
    }
}

/// Coordinates scanner, parser and evaluator over a session. Holds the
/// partial-input buffer, the resume offset for the scanner, and the global
/// environment; there are no process-wide singletons.
pub struct Repl {
    scanner: Scanner,
    env: Rc<Environment>,
    evaluator: Evaluator,
    partial_input: String,
    next_start: usize,
    suppress_prompt: bool,
}

impl Repl {
    pub fn new() -> Self {
        Repl {
            scanner: Scanner::new(),
            env: Environment::global(),
            evaluator: Evaluator::new(),
            partial_input: String::new(),
            next_start: 0,
            suppress_prompt: false,
        }
    }

    /// Runs the whole session protocol: handshake line, banner, prompt /
    /// read / parse / eval / print cycles, farewell. Returns when `(exit)`
    /// is evaluated at top level or the input runs out.
    pub fn run(&mut self, input: &mut dyn LineReader, out: &mut dyn Write) -> io::Result<()> {
        // Historical handshake: the first line is read and discarded.
        let _ = input.read_line();
        writeln!(out, "{}", config::WELCOME_MESSAGE)?;

        'session: loop {
            if !self.suppress_prompt {
                write!(out, "{}", config::PROMPT)?;
                out.flush()?;
            }

            let Some(line) = input.read_line() else {
                write!(out, "{}", config::EOF_MESSAGE)?;
                break 'session;
            };

            self.partial_input.push_str(&line);
            self.partial_input.push('\n');
            let source = self.partial_input.trim_end_matches('\n').to_string();
            self.scanner.reset(&source);
            self.scanner.set_position(self.next_start);

            let mut parser = match Parser::new(&mut self.scanner) {
                Ok(parser) => parser,
                Err(_) => {
                    // Whitespace or comments only; silently read on.
                    self.suppress_prompt = true;
                    continue 'session;
                }
            };

            let mut first = true;
            while !parser.current().is_eof() {
                // Each further S-expression on the same line gets its own
                // prompt, written before it is parsed.
                if !first {
                    write!(out, "{}", config::PROMPT)?;
                    out.flush()?;
                }

                match parser.parse() {
                    Ok(expr) => {
                        first = false;
                        self.next_start = parser.last_expr_end();
                        match self.evaluator.evaluate(&expr, &self.env, Level::Top, out) {
                            Ok(Some(Value::Void)) => {}
                            Ok(Some(value)) => writeln!(out, "{}", printer::pretty(&value))?,
                            Ok(None) => writeln!(
                                out,
                                "{} : {}",
                                EvalError::NoReturnValue,
                                printer::pretty(&expr)
                            )?,
                            Err(EvalError::Exit) => break 'session,
                            Err(err) if err.quotes_input() => {
                                writeln!(out, "{err} : {}", printer::pretty(&expr))?
                            }
                            Err(err) => writeln!(out, "{err}")?,
                        }
                    }
                    Err(ParseError::NotFinish) => {
                        // Keep the buffer and wait for the rest of the form.
                        self.suppress_prompt = true;
                        continue 'session;
                    }
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        self.discard_pending_input();
                        continue 'session;
                    }
                }
            }

            self.discard_pending_input();
        }

        write!(out, "\n{}", config::FAREWELL_MESSAGE)?;
        out.flush()?;
        Ok(())
    }

    fn discard_pending_input(&mut self) {
        self.partial_input.clear();
        self.next_start = 0;
        self.suppress_prompt = false;
    }
}

impl Default for Repl {
    fn default() -> Self {
        Repl::new()
    }
}
