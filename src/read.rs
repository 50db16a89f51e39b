// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Pull tokenizer for RS274/NGC text.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use log::trace;
use strum_macros::Display;

use crate::code::Code;
use crate::error::ReadError;
use crate::num::Decimal;

/// Settings for a [`Reader`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReaderSettings {
    /// Scan and discard comments instead of yielding them as tokens.
    pub ignore_comments: bool,
    /// Skip lines marked with the `/` block-delete character entirely.
    pub ignore_block_delete: bool,
}

/// The kind of token a [`Reader`] is positioned on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum TokenKind {
    /// Nothing read yet.
    None,
    FileStart,
    FileEnd,
    LineStart,
    LineEnd,
    CommentOrMessage,
    WordStart,
    WordEnd,
    Value,
}

/// A structured reader that turns RS274/NGC text into a token stream.
///
/// `read` advances by exactly one token; the accessors expose the data
/// carried by the current token.  The reader owns its byte source; to
/// keep a source open after the reader is done, pass it by mutable
/// reference.
pub struct Reader<R: BufRead> {
    inner: R,
    settings: ReaderSettings,
    token: TokenKind,
    value: Decimal,
    integer: bool,
    block_delete: bool,
    line_number: i32,
    code: Option<Code>,
    comment: String,
}

impl Reader<BufReader<File>> {
    /// Creates a reader over the file at `path` with default settings.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Reader<BufReader<File>>> {
        Ok(Reader::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader over `inner` with default settings.
    pub fn new(inner: R) -> Reader<R> {
        Reader::with_settings(inner, ReaderSettings::default())
    }

    /// Creates a reader over `inner` with the given settings.
    pub fn with_settings(inner: R, settings: ReaderSettings) -> Reader<R> {
        Reader {
            inner,
            settings,
            token: TokenKind::None,
            value: Decimal::default(),
            integer: false,
            block_delete: false,
            line_number: -1,
            code: None,
            comment: String::new(),
        }
    }

    /// The settings this reader was created with.
    pub fn settings(&self) -> ReaderSettings {
        self.settings
    }

    /// The kind of the current token.
    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// The numeric value of the current `Value` token.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Whether the current `Value` token was written as an integer.
    pub fn value_is_integer(&self) -> bool {
        self.integer
    }

    /// The code of the current `WordStart` token.
    pub fn code(&self) -> Option<Code> {
        self.code
    }

    /// The text of the current `CommentOrMessage` token.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The line number of the span started by the last `LineStart`
    /// token, or -1 if the line carries none.
    pub fn line_number(&self) -> i32 {
        self.line_number
    }

    /// Whether the span started by the last `LineStart` token is marked
    /// for block delete.
    pub fn is_block_delete_line(&self) -> bool {
        self.block_delete
    }

    /// Releases the reader and hands back the byte source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Advances to the next token.
    ///
    /// Returns `Ok(true)` if a token was produced, `Ok(false)` on
    /// exhausted input.  All malformed-input conditions are fatal: after
    /// an `Err` the reader is not usable for further tokens.
    pub fn read(&mut self) -> Result<bool, ReadError> {
        let produced = match self.token {
            TokenKind::None | TokenKind::FileEnd => self.read_file_start()?,
            TokenKind::FileStart | TokenKind::LineEnd => self.read_line_start()?,
            TokenKind::LineStart | TokenKind::CommentOrMessage |
            TokenKind::WordEnd => self.read_segment()?,
            TokenKind::WordStart => self.read_value()?,
            TokenKind::Value => self.read_word_end()?,
        };
        if produced {
            trace!("read {} token", self.token);
        }
        Ok(produced)
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inner.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.inner.consume(1);
    }

    fn skip_blanks(&mut self) -> io::Result<()> {
        while let Some(b' ') | Some(b'\t') = self.peek()? {
            self.bump();
        }
        Ok(())
    }

    /// Consumes the rest of the physical line, terminator included.
    fn skip_physical_line(&mut self) -> io::Result<()> {
        let mut sink = Vec::new();
        self.inner.read_until(b'\n', &mut sink)?;
        Ok(())
    }

    /// Scans physical lines until one trims to exactly `%`.  An input
    /// without a file start marker has no content and is not an error.
    fn read_file_start(&mut self) -> Result<bool, ReadError> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.inner.read_until(b'\n', &mut line)? == 0 {
                return Ok(false);
            }
            let trimmed: &[u8] = strip_blanks(&line);
            if trimmed == b"%" {
                self.token = TokenKind::FileStart;
                return Ok(true);
            }
        }
    }

    /// Positions on the next line: `%` ends the file; otherwise the
    /// optional block-delete marker and line number are consumed.
    fn read_line_start(&mut self) -> Result<bool, ReadError> {
        loop {
            self.line_number = -1;
            self.block_delete = false;
            self.skip_blanks()?;
            match self.peek()? {
                Some(b'%') => {
                    self.bump();
                    self.read_percent_line_end()?;
                    self.token = TokenKind::FileEnd;
                    return Ok(true);
                }
                Some(b'/') => {
                    self.bump();
                    if self.settings.ignore_block_delete {
                        self.skip_physical_line()?;
                        continue;
                    }
                    self.block_delete = true;
                    self.skip_blanks()?;
                }
                _ => {}
            }
            if let Some(b'N') | Some(b'n') = self.peek()? {
                self.bump();
                self.line_number = self.read_line_number()?;
            }
            self.token = TokenKind::LineStart;
            return Ok(true);
        }
    }

    /// Consumes the remainder of a `%` line, which must be blank.
    fn read_percent_line_end(&mut self) -> Result<(), ReadError> {
        self.skip_blanks()?;
        match self.peek()? {
            None => Ok(()),
            Some(b'\n') | Some(b'\r') => self.read_line_terminator(),
            Some(ch) => Err(ReadError::UnexpectedChar(ch as char)),
        }
    }

    /// Classifies the next segment: line end, comment, or word start.
    fn read_segment(&mut self) -> Result<bool, ReadError> {
        loop {
            self.skip_blanks()?;
            let ch = match self.peek()? {
                None => return Ok(false),
                Some(ch) => ch,
            };
            match ch {
                b'\r' | b'\n' => {
                    self.read_line_terminator()?;
                    self.token = TokenKind::LineEnd;
                    return Ok(true);
                }
                b'(' => {
                    let text = self.read_paren_comment()?;
                    if self.settings.ignore_comments {
                        continue;
                    }
                    self.comment = text;
                    self.token = TokenKind::CommentOrMessage;
                    return Ok(true);
                }
                b';' => {
                    self.bump();
                    let text = self.read_line_comment()?;
                    if self.settings.ignore_comments {
                        continue;
                    }
                    self.comment = text;
                    self.token = TokenKind::CommentOrMessage;
                    return Ok(true);
                }
                ch if ch.is_ascii_alphabetic() => {
                    let letter = (ch as char).to_ascii_uppercase();
                    let code = Code::from_letter(letter)
                        .ok_or(ReadError::InvalidLetter(letter))?;
                    self.bump();
                    self.code = Some(code);
                    self.token = TokenKind::WordStart;
                    return Ok(true);
                }
                ch => return Err(ReadError::UnexpectedChar(ch as char)),
            }
        }
    }

    /// Consumes LF or CR LF; a bare CR is malformed.
    fn read_line_terminator(&mut self) -> Result<(), ReadError> {
        if let Some(b'\r') = self.peek()? {
            self.bump();
            match self.peek()? {
                Some(b'\n') => {}
                _ => return Err(ReadError::LoneCarriageReturn),
            }
        }
        self.bump();
        Ok(())
    }

    /// Accumulates a parenthesized comment.  Comments do not nest and
    /// must close on the same physical line.
    fn read_paren_comment(&mut self) -> Result<String, ReadError> {
        self.bump();
        let mut text = Vec::new();
        loop {
            match self.peek()? {
                None => return Err(ReadError::UnclosedComment),
                Some(b')') => {
                    self.bump();
                    break;
                }
                Some(b'\r') | Some(b'\n') => return Err(ReadError::MultilineComment),
                Some(ch) => {
                    text.push(ch);
                    self.bump();
                }
            }
        }
        String::from_utf8(text).map_err(|_| ReadError::InvalidUtf8)
    }

    /// Accumulates a `;` comment up to, but not including, the line
    /// terminator, so the line still yields its `LineEnd` token.
    fn read_line_comment(&mut self) -> Result<String, ReadError> {
        let mut text = Vec::new();
        while let Some(ch) = self.peek()? {
            if ch == b'\r' || ch == b'\n' {
                break;
            }
            text.push(ch);
            self.bump();
        }
        String::from_utf8(text).map_err(|_| ReadError::InvalidUtf8)
    }

    /// Parses the signed numeral of a word.
    fn read_value(&mut self) -> Result<bool, ReadError> {
        self.skip_blanks()?;
        let mut ch = match self.peek()? {
            None => return Ok(false),
            Some(ch) => ch,
        };
        let mut neg = false;
        if ch == b'+' || ch == b'-' {
            neg = ch == b'-';
            self.bump();
            ch = self.peek()?.ok_or(ReadError::ExpectedDigit)?;
        }

        let mut mantissa = 0i64;
        let mut scale = 0u8;
        let mut integer = true;
        let mut int_digits = false;
        if ch != b'.' {
            if !ch.is_ascii_digit() {
                return Err(ReadError::ExpectedDigit);
            }
            while let Some(ch @ b'0'..=b'9') = self.peek()? {
                mantissa = push_digit(mantissa, ch)?;
                int_digits = true;
                self.bump();
            }
        }
        if let Some(b'.') = self.peek()? {
            self.bump();
            match self.peek()? {
                Some(b'0'..=b'9') => {
                    integer = false;
                    while let Some(ch @ b'0'..=b'9') = self.peek()? {
                        if scale == Decimal::MAX_SCALE {
                            return Err(ReadError::NumberOverflow);
                        }
                        mantissa = push_digit(mantissa, ch)?;
                        scale += 1;
                        self.bump();
                    }
                }
                // a trailing point after at least one digit reads as an
                // integer, like "5." in "G5."
                _ if int_digits => {}
                _ => return Err(ReadError::ExpectedDigit),
            }
        }

        let value = Decimal::new(mantissa, scale);
        self.value = if neg { -value } else { value };
        self.integer = integer;
        self.token = TokenKind::Value;
        Ok(true)
    }

    fn read_word_end(&mut self) -> Result<bool, ReadError> {
        self.skip_blanks()?;
        self.token = TokenKind::WordEnd;
        Ok(true)
    }

    /// Parses the digits of an `N` line number.
    fn read_line_number(&mut self) -> Result<i32, ReadError> {
        self.skip_blanks()?;
        match self.peek()? {
            Some(ch @ b'0'..=b'9') => {
                let mut number = (ch - b'0') as i32;
                self.bump();
                while let Some(ch @ b'0'..=b'9') = self.peek()? {
                    number = number.checked_mul(10)
                        .and_then(|n| n.checked_add((ch - b'0') as i32))
                        .ok_or(ReadError::NumberOverflow)?;
                    self.bump();
                }
                Ok(number)
            }
            _ => Err(ReadError::ExpectedDigit),
        }
    }
}

fn push_digit(mantissa: i64, digit: u8) -> Result<i64, ReadError> {
    mantissa.checked_mul(10)
        .and_then(|m| m.checked_add((digit - b'0') as i64))
        .ok_or(ReadError::NumberOverflow)
}

fn strip_blanks(mut line: &[u8]) -> &[u8] {
    while let Some((first, rest)) = line.split_first() {
        match first {
            b' ' | b'\t' | b'\r' | b'\n' => line = rest,
            _ => break,
        }
    }
    while let Some((last, rest)) = line.split_last() {
        match last {
            b' ' | b'\t' | b'\r' | b'\n' => line = rest,
            _ => break,
        }
    }
    line
}
