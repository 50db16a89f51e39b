// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Structured writer for RS274/NGC text.

use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::Path;
use strum_macros::Display;

use crate::code::Code;
use crate::error::WriteError;
use crate::num::Number;

/// Settings for a [`Writer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterSettings {
    /// The largest line number that may be passed to `start_line`.
    pub max_line_number: i32,
}

impl WriterSettings {
    /// The ceiling the RS274/NGC standard puts on line numbers.
    pub const DEFAULT_MAX_LINE_NUMBER: i32 = 99999;
}

impl Default for WriterSettings {
    fn default() -> WriterSettings {
        WriterSettings { max_line_number: WriterSettings::DEFAULT_MAX_LINE_NUMBER }
    }
}

/// The nesting state a [`Writer`] can be in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
#[strum(serialize_all = "lowercase")]
pub enum State {
    /// No output started.
    None,
    File,
    Line,
    Word,
}

// File nests in nothing, Line in File, Word in Line.
const MAX_DEPTH: usize = 3;

fn can_push(current: State, next: State) -> bool {
    matches!((current, next),
             (State::None, State::File) |
             (State::File, State::Line) |
             (State::Line, State::Word))
}

/// A structured writer that renders valid RS274/NGC text from ordered
/// calls.
///
/// The writer enforces legal call nesting with an explicit state stack,
/// so the output can never contain, say, a word outside a line.  Illegal
/// calls fail without emitting anything.  The writer owns its sink; to
/// keep a sink open after the writer is done, pass it by mutable
/// reference.
pub struct Writer<W: io::Write> {
    inner: W,
    settings: WriterSettings,
    stack: [State; MAX_DEPTH],
    depth: usize,
    pending_space: bool,
    closed: bool,
}

impl Writer<BufWriter<File>> {
    /// Creates a writer to the file at `path` with default settings.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Writer<BufWriter<File>>> {
        Ok(Writer::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: io::Write> Writer<W> {
    /// Creates a writer to `inner` with default settings.
    pub fn new(inner: W) -> Writer<W> {
        Writer::with_settings(inner, WriterSettings::default())
    }

    /// Creates a writer to `inner` with the given settings.
    pub fn with_settings(inner: W, settings: WriterSettings) -> Writer<W> {
        Writer {
            inner,
            settings,
            stack: [State::None; MAX_DEPTH],
            depth: 0,
            pending_space: false,
            closed: false,
        }
    }

    /// The settings this writer was created with.
    pub fn settings(&self) -> WriterSettings {
        self.settings
    }

    /// The current nesting state.
    pub fn state(&self) -> State {
        if self.depth == 0 { State::None } else { self.stack[self.depth - 1] }
    }

    fn push(&mut self, next: State) -> Result<(), WriteError> {
        let current = self.state();
        if !can_push(current, next) {
            return Err(WriteError::InvalidStart { from: current, to: next });
        }
        self.stack[self.depth] = next;
        self.depth += 1;
        Ok(())
    }

    fn pop(&mut self, expected: State) -> Result<(), WriteError> {
        let found = self.state();
        if found != expected {
            return Err(WriteError::MismatchedEnd { expected, found });
        }
        self.depth -= 1;
        Ok(())
    }

    fn flush_separator(&mut self) -> io::Result<()> {
        if self.pending_space {
            self.pending_space = false;
            self.inner.write_all(b" ")?;
        }
        Ok(())
    }

    /// Opens the file with a `%` line.
    pub fn start_file(&mut self) -> Result<(), WriteError> {
        self.push(State::File)?;
        self.inner.write_all(b"%\n")?;
        Ok(())
    }

    /// Closes the file with a `%` line.
    pub fn end_file(&mut self) -> Result<(), WriteError> {
        self.pop(State::File)?;
        self.inner.write_all(b"%\n")?;
        Ok(())
    }

    /// Starts a line, with an optional line number (-1 for none) and
    /// block-delete marker.
    ///
    /// Fails before emitting anything if `line_number` exceeds the
    /// configured maximum.
    pub fn start_line(&mut self, line_number: i32, block_delete: bool)
                      -> Result<(), WriteError> {
        if line_number > self.settings.max_line_number {
            return Err(WriteError::LineNumberRange {
                number: line_number,
                max: self.settings.max_line_number,
            });
        }
        self.push(State::Line)?;
        self.pending_space = false;
        if block_delete {
            self.inner.write_all(b"/ ")?;
        }
        if line_number >= 0 {
            write!(self.inner, "N{} ", line_number)?;
        }
        Ok(())
    }

    /// Terminates the current line, optionally with a `;` comment tail.
    pub fn end_line(&mut self, end_comment: Option<&str>) -> Result<(), WriteError> {
        self.pop(State::Line)?;
        if let Some(comment) = end_comment {
            self.flush_separator()?;
            write!(self.inner, "; {}", comment)?;
        }
        self.pending_space = false;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Starts a word with the given code letter.
    pub fn start_word(&mut self, code: Code) -> Result<(), WriteError> {
        self.push(State::Word)?;
        self.flush_separator()?;
        write!(self.inner, "{}", code)?;
        Ok(())
    }

    /// Ends the current word.  The following segment, if any, is
    /// separated by a single space.
    pub fn end_word(&mut self) -> Result<(), WriteError> {
        self.pop(State::Word)?;
        self.pending_space = true;
        Ok(())
    }

    /// Writes the numeral of the current word.
    pub fn write_value(&mut self, value: impl Into<Number>) -> Result<(), WriteError> {
        if self.state() != State::Word {
            return Err(WriteError::ValueOutsideWord);
        }
        let number = value.into();
        if !number.is_finite() {
            return Err(match number {
                Number::Single(v) => WriteError::NotFinite(v as f64),
                Number::Double(v) => WriteError::NotFinite(v),
                _ => unreachable!(),
            });
        }
        write!(self.inner, "{}", number)?;
        Ok(())
    }

    /// Writes a complete word.
    pub fn write_word(&mut self, code: Code, value: impl Into<Number>)
                      -> Result<(), WriteError> {
        self.start_word(code)?;
        self.write_value(value)?;
        self.end_word()
    }

    /// Writes a parenthesized comment on the current line.
    ///
    /// Parens, CR and LF in the text are replaced by literal escapes to
    /// keep the comment on one line and non-nesting.
    pub fn write_comment(&mut self, text: &str) -> Result<(), WriteError> {
        if self.state() != State::Line {
            return Err(WriteError::CommentOutsideLine);
        }
        self.flush_separator()?;
        write!(self.inner, "({})", escape_comment(text))?;
        self.pending_space = true;
        Ok(())
    }

    /// Writes a comment marked as an operator message.
    pub fn write_message(&mut self, text: &str) -> Result<(), WriteError> {
        self.write_comment(&format!("MSG, {}", text))
    }

    /// Placeholder for parameter-setting syntax, which is not yet
    /// part of the writer's grammar.
    pub fn start_parameter_setting(&mut self) {}

    /// Placeholder for parameter-setting syntax.
    pub fn end_parameter_setting(&mut self) {}

    /// Placeholder for expression syntax, which is not yet part of the
    /// writer's grammar.
    pub fn start_expression(&mut self) {}

    /// Placeholder for expression syntax.
    pub fn end_expression(&mut self) {}

    /// Flushes the sink.  Calling `close` again is a no-op.
    pub fn close(&mut self) -> Result<(), WriteError> {
        if !self.closed {
            self.closed = true;
            self.inner.flush()?;
        }
        Ok(())
    }

    /// Releases the writer and hands back the sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

fn escape_comment(text: &str) -> String {
    text.replace('(', "\\x28")
        .replace(')', "\\x29")
        .replace('\r', "\\x0d")
        .replace('\n', "\\x0a")
}
