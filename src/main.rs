// ABOUTME: Binary entry point: CLI flags and stdin/stdout wiring for the REPL

use clap::Parser;
use ourscheme::config;
use ourscheme::highlighter::LispHelper;
use ourscheme::repl::{LineReader, Repl};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const HISTORY_FILE: &str = ".ourscheme_history";

/// Interactive interpreter for a Scheme-like S-expression language
#[derive(Parser, Debug)]
#[command(name = "ourscheme")]
#[command(version = config::VERSION)]
#[command(about = "An interactive interpreter for a Scheme-like S-expression language")]
struct CliArgs {
    /// Script file to run through the interpreter (reads stdin when omitted).
    /// Its first line is the usual throwaway handshake.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let mut repl = Repl::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if let Some(path) = &args.script {
        match std::fs::File::open(path) {
            Ok(file) => {
                let mut lines = io::BufReader::new(file).lines();
                repl.run(&mut lines, &mut out)
            }
            Err(err) => {
                eprintln!("ourscheme: cannot open {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    } else if io::stdin().is_terminal() {
        // Interactive terminal: line editing, history, highlighting.
        match ReadlineSource::new() {
            Ok(mut source) => repl.run(&mut source, &mut out),
            Err(err) => {
                eprintln!("ourscheme: failed to initialize line editor: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        // Piped input: plain line reads keep the output byte-exact.
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        repl.run(&mut lines, &mut out)
    };

    let _ = out.flush();
    if let Err(err) = result {
        eprintln!("ourscheme: I/O error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Line source backed by a rustyline editor. The REPL writes its own
/// prompts as part of the output protocol, so the editor prompt is empty.
struct ReadlineSource {
    editor: Editor<LispHelper, DefaultHistory>,
}

impl ReadlineSource {
    fn new() -> rustyline::Result<Self> {
        let editor_config = Config::builder().auto_add_history(true).build();
        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(LispHelper::new()));
        let _ = editor.load_history(HISTORY_FILE);
        Ok(ReadlineSource { editor })
    }
}

impl LineReader for ReadlineSource {
    fn read_line(&mut self) -> Option<String> {
        loop {
            match self.editor.readline("") {
                Ok(line) => return Some(line),
                Err(ReadlineError::Interrupted) => continue,
                Err(_) => return None,
            }
        }
    }
}

impl Drop for ReadlineSource {
    fn drop(&mut self) {
        let _ = self.editor.save_history(HISTORY_FILE);
    }
}
