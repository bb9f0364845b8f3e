// ABOUTME: Streaming scanner turning a growing character buffer into spanned tokens

/// Token classification. `Int`/`Float`/`Str`/`Symbol` carry the cooked
/// payload; `text` on the token keeps the raw lexeme for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Quote,
    Dot,
    Int(i64),
    Float(f64),
    /// Cooked contents: escapes resolved, surrounding quotes stripped.
    Str(String),
    Symbol(String),
    True,
    Nil,
    Eof,
    /// A string ran into a bare newline or the end of the buffer. The
    /// scanner never fails; the parser turns this into the diagnostic.
    UnclosedString,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw lexeme as it appeared in the source (strings keep their quotes).
    pub text: String,
    /// 1-based line within the scanner's buffer.
    pub line: usize,
    /// 1-based column of the first character within its line.
    pub start_col: usize,
    /// 1-based column of the last character (inclusive).
    pub end_col: usize,
    /// Absolute byte offset of the first character.
    pub start: usize,
    /// Absolute byte offset just past the last character.
    pub end: usize,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Character-classifier-driven scanner over a single growing string. The
/// REPL appends lines to its buffer, calls `reset`, and resumes scanning
/// with `set_position` after each completed top-level S-expression.
#[derive(Debug)]
pub struct Scanner {
    source: String,
    position: usize,
    line: usize,
    column: usize,
}

/// The characters a number or symbol lexeme may contain.
fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'*'
                | b'+'
                | b','
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b'<'
                | b'='
                | b'>'
                | b'?'
                | b'@'
                | b'['
                | b'\\'
                | b']'
                | b'^'
                | b'_'
                | b'`'
                | b'{'
                | b'|'
                | b'~'
        )
}

impl Scanner {
    pub fn new() -> Self {
        Scanner {
            source: String::new(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Replaces the buffer and rewinds all counters.
    pub fn reset(&mut self, source: &str) {
        self.source = source.to_string();
        self.position = 0;
        self.line = 1;
        self.column = 1;
    }

    /// Rebases scanning at `position` without touching the buffer. Used to
    /// resume after a completed top-level S-expression.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn peek_token(&mut self) -> Token {
        let saved = (self.position, self.line, self.column);
        let token = self.next_token();
        (self.position, self.line, self.column) = saved;
        token
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let Some(b) = self.current_byte() else {
            return Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line: self.line,
                start_col: self.column,
                end_col: self.column,
                start: self.position,
                end: self.position,
            };
        };

        match b {
            b'(' => self.read_single(TokenKind::LeftParen),
            b')' => self.read_single(TokenKind::RightParen),
            b'\'' => self.read_single(TokenKind::Quote),
            b'"' => self.read_string(),
            b'.' => {
                // A dot only terminates as DOT when nothing token-like follows.
                if self.peek_byte().is_some_and(is_symbol_byte) {
                    self.read_number_or_symbol()
                } else {
                    self.read_single(TokenKind::Dot)
                }
            }
            _ if b.is_ascii_digit() => self.read_number_or_symbol(),
            b'+' | b'-'
                if self
                    .peek_byte()
                    .is_some_and(|p| p.is_ascii_digit() || p == b'.') =>
            {
                self.read_number_or_symbol()
            }
            _ => self.read_symbol(),
        }
    }

    fn current_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
        self.column += 1;
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(b) = self.current_byte() {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
                self.position += 1;
            } else if b.is_ascii_whitespace() {
                self.column += 1;
                self.position += 1;
            } else if b == b';' {
                while self.current_byte().is_some_and(|c| c != b'\n') {
                    self.position += 1;
                }
            } else {
                break;
            }
        }
    }

    fn read_single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        let start_col = self.column;
        let line = self.line;
        self.advance();
        Token {
            kind,
            text: self.source[start..self.position].to_string(),
            line,
            start_col,
            end_col: start_col,
            start,
            end: self.position,
        }
    }

    /// Maximal run of symbol-class characters, resolved to a symbol or one
    /// of the boolean literals. The first byte is consumed unconditionally,
    /// so bytes outside every class degrade to one-character symbols
    /// instead of wedging the scanner.
    fn read_symbol(&mut self) -> Token {
        let (start, start_col, line) = (self.position, self.column, self.line);
        self.advance();
        self.consume_symbol_run();
        let end_col = self.column - 1;
        let text = self.source[start..self.position].to_string();
        let kind = match text.as_str() {
            "t" | "#t" => TokenKind::True,
            "nil" | "#f" => TokenKind::Nil,
            _ => TokenKind::Symbol(text.clone()),
        };
        Token {
            kind,
            text,
            line,
            start_col,
            end_col,
            start,
            end: self.position,
        }
    }

    /// Same run as a symbol, but the collected lexeme is classified as an
    /// integer, a real, or (failing both) a symbol.
    fn read_number_or_symbol(&mut self) -> Token {
        let (start, start_col, line) = (self.position, self.column, self.line);
        self.advance();
        self.consume_symbol_run();
        let end_col = self.column - 1;
        let text = self.source[start..self.position].to_string();
        let kind = classify_lexeme(&text);
        Token {
            kind,
            text,
            line,
            start_col,
            end_col,
            start,
            end: self.position,
        }
    }

    fn consume_symbol_run(&mut self) {
        while let Some(b) = self.current_byte() {
            if is_symbol_byte(b) || !b.is_ascii() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_string(&mut self) -> Token {
        let (start, start_col, line) = (self.position, self.column, self.line);
        self.advance(); // opening quote
        let mut cooked: Vec<u8> = Vec::new();
        loop {
            let Some(b) = self.current_byte() else {
                return self.unclosed_string(start, start_col, line);
            };
            match b {
                b'"' => {
                    let end_col = self.column;
                    self.advance();
                    return Token {
                        kind: TokenKind::Str(String::from_utf8_lossy(&cooked).into_owned()),
                        text: self.source[start..self.position].to_string(),
                        line,
                        start_col,
                        end_col,
                        start,
                        end: self.position,
                    };
                }
                b'\n' => return self.unclosed_string(start, start_col, line),
                b'\\' => {
                    self.advance();
                    let Some(escaped) = self.current_byte() else {
                        return self.unclosed_string(start, start_col, line);
                    };
                    match escaped {
                        b'n' => cooked.push(b'\n'),
                        b't' => cooked.push(b'\t'),
                        b'"' => cooked.push(b'"'),
                        b'\\' => cooked.push(b'\\'),
                        other => {
                            // Unknown escapes keep the backslash literally.
                            cooked.push(b'\\');
                            cooked.push(other);
                        }
                    }
                    self.advance();
                }
                other => {
                    cooked.push(other);
                    self.advance();
                }
            }
        }
    }

    /// The scanner stays positioned at the offending point (newline or end
    /// of buffer) so the parser can compute the diagnostic column.
    fn unclosed_string(&self, start: usize, start_col: usize, line: usize) -> Token {
        Token {
            kind: TokenKind::UnclosedString,
            text: self.source[start..self.position].to_string(),
            line,
            start_col,
            end_col: self.column,
            start,
            end: self.position,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new()
    }
}

fn classify_lexeme(lexeme: &str) -> TokenKind {
    if lexeme.contains('_') {
        return TokenKind::Symbol(lexeme.to_string());
    }
    if let Ok(n) = lexeme.parse::<i64>() {
        return TokenKind::Int(n);
    }
    if let Ok(r) = lexeme.parse::<f64>() {
        if r.is_finite() {
            if lexeme.contains(['.', 'e', 'E']) {
                return TokenKind::Float(r);
            }
            // All-digit lexeme too large for i64; the cast saturates.
            return TokenKind::Int(r as i64);
        }
    }
    TokenKind::Symbol(lexeme.to_string())
}
