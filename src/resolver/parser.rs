//! Literal-only parser for the narrow configuration grammar.
//!
//! The accepted shape is a `return array( ... );` document: quoted keys,
//! scalar values (strings, numbers, booleans, `NULL`) and nested `array(`
//! literals (keyed or positional), one entry per line by convention. This
//! is deliberately *not* a general expression parser; anything that would
//! require evaluation (a
//! constant reference, a function call, arithmetic) is rejected, which is
//! why symbolic references must be substituted away before parsing.

use indexmap::IndexMap;

use super::value::ConfigValue;
use crate::error::ExtractError;

/// A parsed literal: a scalar or a nested key/value array.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    Scalar(ConfigValue),
    Array(IndexMap<String, Literal>),
}

/// Parse a whole substituted source document.
///
/// A leading `<?php` marker and a trailing `?>` are tolerated; everything
/// else outside the `return ...;` statement is an error.
pub(crate) fn parse_document(src: &str) -> Result<Literal, ExtractError> {
    let mut cur = Cursor::new(src);
    cur.skip_trivia();
    cur.eat("<?php");
    cur.skip_trivia();
    let keyword = cur.parse_ident();
    if !keyword.eq_ignore_ascii_case("return") {
        return Err(cur.error("expected `return`"));
    }
    cur.skip_trivia();
    let value = cur.parse_value()?;
    cur.skip_trivia();
    cur.expect(";")?;
    cur.skip_trivia();
    cur.eat("?>");
    cur.skip_trivia();
    if !cur.at_end() {
        return Err(cur.error("unexpected content after the return statement"));
    }
    Ok(value)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.src.as_bytes()[self.pos..].starts_with(s.as_bytes())
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            for _ in 0..s.len() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn expect(&mut self, s: &str) -> Result<(), ExtractError> {
        if self.eat(s) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", s)))
        }
    }

    fn error(&self, message: impl Into<String>) -> ExtractError {
        ExtractError::Evaluation(format!("line {}: {}", self.line, message.into()))
    }

    /// Skip whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.starts_with("//") => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some(b'/') if self.starts_with("/*") => {
                    self.bump();
                    self.bump();
                    while !self.at_end() && !self.starts_with("*/") {
                        self.bump();
                    }
                    self.eat("*/");
                }
                _ => break,
            }
        }
    }

    /// Consume an identifier-like token, including namespace separators and
    /// `::`, so unsubstituted constant references report as one token.
    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'\\' || b == b':' {
                self.bump();
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    fn parse_value(&mut self) -> Result<Literal, ExtractError> {
        match self.peek() {
            Some(b'\'') | Some(b'"') => {
                Ok(Literal::Scalar(ConfigValue::Str(self.parse_string()?)))
            }
            Some(b) if b == b'-' || b == b'+' || b.is_ascii_digit() => self.parse_number(),
            Some(b) if b.is_ascii_alphabetic() || b == b'\\' => {
                let ident = self.parse_ident();
                if ident.eq_ignore_ascii_case("array") {
                    self.skip_trivia();
                    self.parse_array()
                } else if ident.eq_ignore_ascii_case("true") {
                    Ok(Literal::Scalar(ConfigValue::Bool(true)))
                } else if ident.eq_ignore_ascii_case("false") {
                    Ok(Literal::Scalar(ConfigValue::Bool(false)))
                } else if ident.eq_ignore_ascii_case("null") {
                    // NULL stringifies to the empty string in the source host
                    Ok(Literal::Scalar(ConfigValue::Str(String::new())))
                } else {
                    Err(self.error(format!("unresolved symbolic reference `{}`", ident)))
                }
            }
            _ => Err(self.error("expected a value")),
        }
    }

    fn parse_string(&mut self) -> Result<String, ExtractError> {
        let quote = self.bump().ok_or_else(|| self.error("expected a string"))?;
        let mut buf: Vec<u8> = Vec::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(b) if b == quote => break,
                Some(b'\\') => match self.bump() {
                    None => return Err(self.error("unterminated string")),
                    Some(b) if b == quote || b == b'\\' => buf.push(b),
                    // other escapes are kept verbatim, as single-quoted
                    // source literals do
                    Some(b) => {
                        buf.push(b'\\');
                        buf.push(b);
                    }
                },
                Some(b) => buf.push(b),
            }
        }
        String::from_utf8(buf).map_err(|_| self.error("string is not valid UTF-8"))
    }

    fn parse_number(&mut self) -> Result<Literal, ExtractError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-') | Some(b'+')) {
            self.bump();
        }
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.bump();
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.src[start..self.pos];
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Literal::Scalar(ConfigValue::Int(n)));
            }
        }
        text.parse::<f64>()
            .map(|n| Literal::Scalar(ConfigValue::Float(n)))
            .map_err(|_| self.error(format!("malformed number `{}`", text)))
    }

    fn parse_array(&mut self) -> Result<Literal, ExtractError> {
        self.expect("(")?;
        let mut entries = IndexMap::new();
        let mut next_index = 0usize;
        loop {
            self.skip_trivia();
            if self.eat(")") {
                break;
            }
            let first = self.parse_value()?;
            self.skip_trivia();
            let (key, value) = if self.eat("=>") {
                let Literal::Scalar(ConfigValue::Str(key)) = first else {
                    return Err(self.error("expected a quoted key"));
                };
                self.skip_trivia();
                (key, self.parse_value()?)
            } else {
                // positional entry in a list literal; only ever seen below
                // the second level, where the whole array collapses anyway
                let key = next_index.to_string();
                next_index += 1;
                (key, first)
            };
            // duplicate keys: last assignment wins, first position kept
            entries.insert(key, value);
            self.skip_trivia();
            if self.eat(",") {
                continue;
            }
            self.expect(")")?;
            break;
        }
        Ok(Literal::Array(entries))
    }
}
