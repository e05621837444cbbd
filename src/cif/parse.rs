//! CIF/STAR text parser.
//!
//! Parses a CIF or STAR file into an untyped [`Document`] tree. Handles all
//! value forms: unquoted, single/double-quoted, and semicolon text fields.
//! Case conventions are preserved in tag names. Errors report the 1-based
//! line where the offending token starts.

use std::path::Path;

use super::dom::{Block, Document, Loop, Value};

/// Errors that can occur while reading or parsing CIF/STAR text.
#[derive(Debug, thiserror::Error)]
pub enum CifParseError {
    #[error("unterminated quoted string on line {line}")]
    UnterminatedQuote { line: usize },
    #[error("unterminated semicolon text field starting on line {line}")]
    UnterminatedTextField { line: usize },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a CIF/STAR text string into a [`Document`].
pub fn parse(input: &str) -> Result<Document, CifParseError> {
    Parser::new(input).parse_document()
}

/// Read and parse a CIF/STAR file.
pub fn read_file(path: &Path) -> Result<Document, CifParseError> {
    let input = std::fs::read_to_string(path).map_err(|source| CifParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&input)
}

// ---------------------------------------------------------------------------
// Internal tokenizer / parser
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Token {
    DataBlock(String),
    LoopStart,
    SaveStart(String),
    SaveEnd,
    /// `global_` and `stop_`: reserved STAR words carrying no mmCIF data.
    Reserved,
    Tag(String),
    Val(Value),
    Eof,
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    at_line_start: bool,
    pending: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
            at_line_start: true,
            pending: None,
        }
    }

    fn next(&mut self) -> Result<Token, CifParseError> {
        if let Some(t) = self.pending.take() {
            return Ok(t);
        }
        self.scan_token()
    }

    fn push_back(&mut self, token: Token) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(token);
    }

    // --- Tokenizer ---

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.at_line_start = true;
                }
                b'#' => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, CifParseError> {
        self.skip_whitespace_and_comments();
        if self.pos >= self.bytes.len() {
            return Ok(Token::Eof);
        }

        let b = self.bytes[self.pos];

        // Semicolon text field (only valid at line start)
        if b == b';' && self.at_line_start {
            return self.scan_semicolon_text();
        }

        self.at_line_start = false;

        if b == b'\'' || b == b'"' {
            return self.scan_quoted(b);
        }

        let start = self.pos;
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            if c.is_ascii_whitespace() || c == b'#' {
                break;
            }
            self.pos += 1;
        }
        Ok(classify_unquoted(&self.input[start..self.pos]))
    }

    /// A quoted value ends at the first matching quote that is followed by
    /// whitespace or end of input, and never spans a line break.
    fn scan_quoted(&mut self, quote: u8) -> Result<Token, CifParseError> {
        let start = self.pos;
        self.pos += 1; // skip opening quote
        loop {
            if self.pos >= self.bytes.len() || self.bytes[self.pos] == b'\n' {
                return Err(CifParseError::UnterminatedQuote { line: self.line });
            }
            if self.bytes[self.pos] == quote
                && (self.pos + 1 >= self.bytes.len()
                    || self.bytes[self.pos + 1].is_ascii_whitespace())
            {
                let val = self.input[start + 1..self.pos].to_string();
                self.pos += 1; // skip closing quote
                return Ok(Token::Val(Value::Str(val)));
            }
            self.pos += 1;
        }
    }

    fn scan_semicolon_text(&mut self) -> Result<Token, CifParseError> {
        let first_line = self.line;
        self.pos += 1; // skip opening ;
        self.at_line_start = false;
        let content_start = self.pos;

        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return Err(CifParseError::UnterminatedTextField { line: first_line });
            }
            self.pos += 1; // skip \n
            self.line += 1;

            if self.pos < self.bytes.len() && self.bytes[self.pos] == b';' {
                // Content excludes the trailing \n (and \r) before the closing ;
                let content_end = self.pos - 1;
                let text = self.input[content_start..content_end].trim_end_matches('\r');
                self.pos += 1; // skip closing ;
                return Ok(Token::Val(Value::Str(text.to_string())));
            }
        }
    }

    // --- Structure parsing ---

    fn parse_document(&mut self) -> Result<Document, CifParseError> {
        let mut blocks = Vec::new();
        loop {
            match self.next()? {
                Token::Eof => break,
                Token::DataBlock(name) => blocks.push(self.parse_block(name)?),
                _ => {} // skip tokens before first data block
            }
        }
        Ok(Document { blocks })
    }

    fn parse_block(&mut self, name: String) -> Result<Block, CifParseError> {
        let mut pairs = Vec::new();
        let mut loops = Vec::new();
        let mut frames = Vec::new();

        loop {
            let token = self.next()?;
            match token {
                Token::Eof | Token::DataBlock(_) => {
                    self.push_back(token);
                    break;
                }
                Token::LoopStart => loops.push(self.parse_loop()?),
                Token::SaveStart(frame_name) => frames.push(self.parse_block(frame_name)?),
                Token::SaveEnd => break,
                Token::Tag(tag) => match self.next()? {
                    Token::Val(v) => pairs.push((tag, v)),
                    other => self.push_back(other), // tag without value
                },
                Token::Reserved | Token::Val(_) => {} // stray token, skip
            }
        }

        Ok(Block {
            name,
            pairs,
            loops,
            frames,
        })
    }

    fn parse_loop(&mut self) -> Result<Loop, CifParseError> {
        let mut tags = Vec::new();
        let mut values = Vec::new();

        loop {
            match self.next()? {
                Token::Tag(t) => tags.push(t),
                other => {
                    self.push_back(other);
                    break;
                }
            }
        }

        loop {
            match self.next()? {
                Token::Val(v) => values.push(v),
                other => {
                    self.push_back(other);
                    break;
                }
            }
        }

        // A truncated final row would shift every later column; drop it.
        if !tags.is_empty() {
            let whole = values.len() - values.len() % tags.len();
            if whole != values.len() {
                log::warn!(
                    "loop starting with {} has {} trailing values, ignoring them",
                    tags[0],
                    values.len() - whole
                );
                values.truncate(whole);
            }
        }

        Ok(Loop { tags, values })
    }
}

fn classify_unquoted(s: &str) -> Token {
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("data_") {
        Token::DataBlock(s[5..].to_string())
    } else if lower == "loop_" {
        Token::LoopStart
    } else if lower == "global_" || lower == "stop_" {
        Token::Reserved
    } else if lower.starts_with("save_") {
        if s.len() == 5 {
            Token::SaveEnd
        } else {
            Token::SaveStart(s[5..].to_string())
        }
    } else if s.starts_with('_') {
        Token::Tag(s.to_string())
    } else if s == "." {
        Token::Val(Value::Inapplicable)
    } else if s == "?" {
        Token::Val(Value::Unknown)
    } else {
        Token::Val(Value::Str(s.to_string()))
    }
}
