// ABOUTME: Recursive-descent parser assembling tokens into cons-structured expressions

use crate::error::{Expected, ParseError};
use crate::scanner::{Scanner, Token, TokenKind};
use crate::value::Value;
use std::rc::Rc;

/// LL(1) parser over a scanner. Construction consumes the first token and
/// signals `EmptyInput` when the buffer is already exhausted — the REPL
/// treats that differently from a real parse error.
///
/// Diagnostic positions are relative to the start of the current top-level
/// S-expression: the base is the byte right after the previous expression's
/// last token, and it advances after every successful `parse()`.
pub struct Parser<'a> {
    scanner: &'a mut Scanner,
    current: Token,
    expr_start: usize,
    last_end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(scanner: &'a mut Scanner) -> Result<Self, ParseError> {
        let expr_start = scanner.position();
        let current = scanner.next_token();
        if current.is_eof() {
            return Err(ParseError::EmptyInput);
        }
        Ok(Parser {
            scanner,
            current,
            expr_start,
            last_end: expr_start,
        })
    }

    /// The lookahead token. The REPL loops while this is not EOF.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Byte offset just past the most recently completed S-expression; the
    /// REPL resumes scanning there on the next line.
    pub fn last_expr_end(&self) -> usize {
        self.last_end
    }

    /// Parses the next complete S-expression and advances the position base
    /// for the one after it.
    pub fn parse(&mut self) -> Result<Value, ParseError> {
        let expr = self.parse_s_exp()?;
        self.expr_start = self.last_end;
        Ok(expr)
    }

    fn consume(&mut self) -> Result<Token, ParseError> {
        if matches!(self.current.kind, TokenKind::UnclosedString) {
            return Err(self.no_closing_quote());
        }
        let next = self.scanner.next_token();
        let token = std::mem::replace(&mut self.current, next);
        self.last_end = token.end;
        Ok(token)
    }

    fn parse_s_exp(&mut self) -> Result<Value, ParseError> {
        let token = self.consume()?;
        match token.kind {
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::Float(r) => Ok(Value::Real(r)),
            TokenKind::Str(s) => Ok(Value::Str(Rc::from(s))),
            TokenKind::Symbol(s) => Ok(Value::Symbol(s)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::Nil => Ok(Value::Nil),
            TokenKind::Quote => {
                if self.current.is_eof() {
                    return Err(ParseError::NotFinish);
                }
                let inner = self.parse_s_exp()?;
                Ok(Value::Quoted(Rc::new(inner)))
            }
            TokenKind::LeftParen => {
                if matches!(self.current.kind, TokenKind::RightParen) {
                    self.consume()?;
                    return Ok(Value::Nil);
                }
                self.parse_list()
            }
            TokenKind::Dot | TokenKind::RightParen => {
                Err(self.unexpected(Expected::AtomOrLeftParen, &token))
            }
            TokenKind::Eof => Err(ParseError::NotFinish),
            TokenKind::UnclosedString => Err(self.no_closing_quote()),
        }
    }

    /// The opening paren is consumed and the list is known to be non-empty.
    fn parse_list(&mut self) -> Result<Value, ParseError> {
        let mut elements = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::RightParen => {
                    self.consume()?;
                    return Ok(Value::list_from(elements, Value::Nil));
                }
                TokenKind::Eof => return Err(ParseError::NotFinish),
                TokenKind::Dot => {
                    if elements.is_empty() {
                        let token = self.current.clone();
                        return Err(self.unexpected(Expected::AtomOrLeftParen, &token));
                    }
                    self.consume()?; // the dot

                    match self.current.kind {
                        TokenKind::RightParen => {
                            // A dotted pair must have a cdr value.
                            let token = self.current.clone();
                            return Err(self.unexpected(Expected::AtomOrLeftParen, &token));
                        }
                        TokenKind::Eof => return Err(ParseError::NotFinish),
                        _ => {}
                    }

                    let tail = self.parse_s_exp()?;
                    let closer = self.consume()?;
                    return match closer.kind {
                        TokenKind::RightParen => Ok(Value::list_from(elements, tail)),
                        TokenKind::Eof => Err(ParseError::NotFinish),
                        _ => Err(self.unexpected(Expected::RightParen, &closer)),
                    };
                }
                _ => elements.push(self.parse_s_exp()?),
            }
        }
    }

    fn unexpected(&self, expect: Expected, token: &Token) -> ParseError {
        let (line, column) = self.relative_position(token.start);
        ParseError::UnexpectedToken {
            expect,
            line,
            column,
            lexeme: token.text.clone(),
        }
    }

    fn no_closing_quote(&self) -> ParseError {
        let (line, column) = self.relative_position(self.scanner.position());
        ParseError::NoClosingQuote { line, column }
    }

    /// Line/column of `offset` counted from the current expression base,
    /// starting at Line 1 Column 1.
    fn relative_position(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for b in &self.scanner.source().as_bytes()[self.expr_start..offset] {
            if *b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}
