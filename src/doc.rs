// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Low-level document object model of an RS274/NGC file.
//!
//! A [`Document`] owns an ordered list of [`Line`]s, each owning its
//! [`Segment`]s.  Documents are built either by loading them through a
//! [`Reader`](crate::read::Reader) or programmatically, and serialize
//! themselves through a [`Writer`](crate::write::Writer).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use log::debug;

use crate::code::{Code, CommandCode};
use crate::error::{LoadError, ReadError, SaveError, WriteError};
use crate::num::{Decimal, Number};
use crate::read::{Reader, TokenKind};
use crate::write::Writer;

/// An in-memory RS274/NGC document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub lines: Vec<Line>,
}

/// One line of a document.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// The optional line number; -1 means the line carries none.
    pub line_number: i32,
    /// Whether the line is marked with the `/` block-delete character.
    pub block_delete: bool,
    pub segments: Vec<Segment>,
}

/// One constituent of a line: a comment/message or a word.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Comment {
        text: String,
        /// Messages are comments displayed to the machine operator;
        /// they render with the `MSG, ` prefix.
        message: bool,
    },
    Word {
        code: Code,
        /// The word's value.  A word must be given a value before the
        /// segment can be written.
        value: Option<Value>,
    },
}

/// The value of a word.
///
/// Only numeric values exist today; the variant set is where expression
/// and parameter-reference values would slot in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Numeric(Numeric),
}

/// A numeric word value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Numeric {
    pub value: Decimal,
    /// Whether the value renders as a plain integer numeral.
    pub integer: bool,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Parses a document from a string.
    pub fn parse(text: &str) -> Result<Document, LoadError> {
        Document::read_from(&mut Reader::new(text.as_bytes()))
    }

    /// Loads a document from a byte source.
    pub fn load(input: impl BufRead) -> Result<Document, LoadError> {
        Document::read_from(&mut Reader::new(input))
    }

    /// Loads a document from the file at `path`.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Document, LoadError> {
        let file = File::open(path).map_err(ReadError::from)?;
        Document::load(BufReader::new(file))
    }

    /// Assembles a document from an open reader.
    ///
    /// The reader must be positioned before the file start token.
    pub fn read_from<R: BufRead>(reader: &mut Reader<R>) -> Result<Document, LoadError> {
        if !reader.read()? || reader.token() != TokenKind::FileStart {
            return Err(LoadError::MissingFileStart);
        }
        let mut doc = Document::new();
        while reader.read()? {
            match reader.token() {
                TokenKind::FileEnd => break,
                TokenKind::LineStart => doc.lines.push(read_line(reader)?),
                found => return Err(LoadError::UnexpectedToken {
                    found, expected: "line start",
                }),
            }
        }
        debug!("loaded document with {} lines", doc.lines.len());
        Ok(doc)
    }

    /// Saves the document to a byte sink.
    pub fn save(&self, output: impl Write) -> Result<(), SaveError> {
        let mut writer = Writer::new(output);
        self.write_to(&mut writer)?;
        writer.close()?;
        Ok(())
    }

    /// Saves the document to the file at `path`.
    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let file = File::create(path).map_err(WriteError::from)?;
        self.save(BufWriter::new(file))
    }

    /// Renders the document to a string.
    pub fn to_text(&self) -> Result<String, SaveError> {
        let mut buf = Vec::new();
        self.save(&mut buf)?;
        Ok(String::from_utf8(buf).expect("writer output is UTF-8"))
    }

    /// Writes the document through an open writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), SaveError> {
        writer.start_file()?;
        for line in &self.lines {
            line.write_to(writer)?;
        }
        writer.end_file()?;
        debug!("saved document with {} lines", self.lines.len());
        Ok(())
    }
}

impl Default for Line {
    fn default() -> Line {
        Line { line_number: -1, block_delete: false, segments: vec![] }
    }
}

impl Line {
    pub fn new() -> Line {
        Line::default()
    }

    /// Writes the line and its segments through an open writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), SaveError> {
        writer.start_line(self.line_number, self.block_delete)?;
        for segment in &self.segments {
            segment.write_to(writer)?;
        }
        writer.end_line(None)?;
        Ok(())
    }
}

impl Segment {
    /// A comment segment.
    pub fn comment(text: impl Into<String>) -> Segment {
        Segment::Comment { text: text.into(), message: false }
    }

    /// An operator message segment.
    pub fn message(text: impl Into<String>) -> Segment {
        Segment::Comment { text: text.into(), message: true }
    }

    /// A word segment with a value.
    pub fn word(code: Code, value: impl Into<Value>) -> Segment {
        Segment::Word { code, value: Some(value.into()) }
    }

    /// The word segment for a canonical command, e.g. G90.
    pub fn command(command: CommandCode) -> Segment {
        Segment::word(command.code, command.number)
    }

    /// Writes the segment through an open writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), SaveError> {
        match self {
            Segment::Comment { text, message } => {
                if *message {
                    writer.write_message(text)?;
                } else {
                    writer.write_comment(text)?;
                }
            }
            Segment::Word { code, value } => {
                let value = value.as_ref().ok_or(SaveError::EmptyWord(*code))?;
                writer.start_word(*code)?;
                value.write_to(writer)?;
                writer.end_word()?;
            }
        }
        Ok(())
    }
}

impl Value {
    /// Writes the value's numeral through an open writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), SaveError> {
        match self {
            Value::Numeric(numeric) => numeric.write_to(writer),
        }
    }
}

impl Numeric {
    /// An integer-rendered value.
    pub fn int(value: i32) -> Numeric {
        Numeric { value: value.into(), integer: true }
    }

    /// An exact-decimal-rendered value.
    pub fn decimal(value: Decimal) -> Numeric {
        Numeric { value, integer: false }
    }

    /// Writes the numeral through an open writer.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), SaveError> {
        if self.integer {
            writer.write_value(Number::Int(self.value.trunc()))?;
        } else {
            writer.write_value(self.value)?;
        }
        Ok(())
    }
}

impl From<Numeric> for Value {
    fn from(numeric: Numeric) -> Value {
        Value::Numeric(numeric)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Numeric(Numeric::int(value))
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Value {
        Value::Numeric(Numeric::decimal(value))
    }
}

fn read_line<R: BufRead>(reader: &mut Reader<R>) -> Result<Line, LoadError> {
    let mut line = Line::new();
    line.line_number = reader.line_number();
    line.block_delete = reader.is_block_delete_line();
    while reader.read()? && reader.token() != TokenKind::LineEnd {
        line.segments.push(read_segment(reader)?);
    }
    Ok(line)
}

fn read_segment<R: BufRead>(reader: &mut Reader<R>) -> Result<Segment, LoadError> {
    match reader.token() {
        TokenKind::CommentOrMessage => Ok(read_comment(reader)),
        TokenKind::WordStart => read_word(reader),
        found => Err(LoadError::UnexpectedToken {
            found, expected: "comment or word start",
        }),
    }
}

fn read_comment<R: BufRead>(reader: &mut Reader<R>) -> Segment {
    // Written messages carry the "MSG, " prefix; strip it back off so
    // that text round-trips through write_message.
    match reader.comment().trim_start().strip_prefix("MSG,") {
        Some(rest) => Segment::message(rest.strip_prefix(' ').unwrap_or(rest)),
        None => Segment::comment(reader.comment()),
    }
}

fn read_word<R: BufRead>(reader: &mut Reader<R>) -> Result<Segment, LoadError> {
    let code = reader.code().expect("word start token exposes a code");
    if !reader.read()? {
        return Err(LoadError::UnexpectedEof);
    }
    if reader.token() != TokenKind::Value {
        return Err(LoadError::UnexpectedToken {
            found: reader.token(), expected: "value",
        });
    }
    let value = Numeric { value: reader.value(), integer: reader.value_is_integer() };
    if !reader.read()? {
        return Err(LoadError::UnexpectedEof);
    }
    if reader.token() != TokenKind::WordEnd {
        return Err(LoadError::UnexpectedToken {
            found: reader.token(), expected: "word end",
        });
    }
    Ok(Segment::word(code, value))
}
