// ABOUTME: Canonical pretty-printer; its output is part of the language contract

use crate::value::Value;
use std::fmt;

/// Renders a value in the canonical multi-line form used for both REPL
/// output and error-message interpolation.
pub fn pretty(value: &Value) -> String {
    let mut out = String::new();
    render(value, 0, &mut out);
    out
}

fn render(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Pair(_) => render_chain(value, indent, out),
        Value::Quoted(inner) => {
            out.push_str("( quote\n");
            push_indent(indent + 1, out);
            render(inner, indent + 1, out);
            out.push('\n');
            push_indent(indent, out);
            out.push(')');
        }
        atom => out.push_str(&atom_text(atom)),
    }
}

/// Lists print one element per line, two spaces per nesting level, with the
/// first element on the opening-paren line. An improper tail puts the dot on
/// its own line before the tail value.
fn render_chain(value: &Value, indent: usize, out: &mut String) {
    let mut elements = Vec::new();
    let mut current = value;
    while let Value::Pair(pair) = current {
        elements.push(&pair.car);
        current = &pair.cdr;
    }

    out.push_str("( ");
    render(elements[0], indent + 1, out);
    for element in &elements[1..] {
        out.push('\n');
        push_indent(indent + 1, out);
        render(element, indent + 1, out);
    }

    if !current.is_nil() {
        out.push('\n');
        push_indent(indent + 1, out);
        out.push('.');
        out.push('\n');
        push_indent(indent + 1, out);
        render(current, indent + 1, out);
    }

    out.push('\n');
    push_indent(indent, out);
    out.push(')');
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn atom_text(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Real(r) => format!("{r:.3}"),
        Value::Str(s) => escape_string(s),
        Value::Symbol(s) => s.clone(),
        Value::Bool(true) => "#t".to_string(),
        Value::Bool(false) | Value::Nil => "nil".to_string(),
        Value::Void => String::new(),
        Value::Callable(c) => format!("#<procedure {}>", c.name()),
        Value::Pair(_) | Value::Quoted(_) => String::new(),
    }
}

fn escape_string(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    out.push('"');
    for c in content.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty(self))
    }
}
