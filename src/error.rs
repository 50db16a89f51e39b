// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Error types for reading, writing and assembling documents.

use std::io;
use thiserror::Error;

use crate::code::Code;
use crate::read::TokenKind;
use crate::write::State;

/// Errors raised by the tokenizer on malformed input.
///
/// All of these are fatal to the parse in progress; a caller may catch
/// one to abort or to skip a file in a batch, but the reader cannot
/// resume past it.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error reading input")]
    Io(#[from] io::Error),
    #[error("comment not closed before end of file")]
    UnclosedComment,
    #[error("comment not closed before end of line")]
    MultilineComment,
    #[error("comment text is not valid UTF-8")]
    InvalidUtf8,
    #[error("unexpected character {0:?} in input")]
    UnexpectedChar(char),
    #[error("letter {0:?} is not part of the word alphabet")]
    InvalidLetter(char),
    #[error("expected digit")]
    ExpectedDigit,
    #[error("expected newline after carriage return")]
    LoneCarriageReturn,
    #[error("number has too many digits")]
    NumberOverflow,
}

/// Errors raised by the writer on illegal call sequences.
///
/// These indicate misuse of the writer, not bad data; they are never
/// retried, and the failing call emits nothing.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error writing output")]
    Io(#[from] io::Error),
    #[error("cannot start a {to} while in {from} state")]
    InvalidStart { from: State, to: State },
    #[error("end of {expected} not matched with start of {expected}")]
    MismatchedEnd { expected: State, found: State },
    #[error("line number {number} is out of range (0 to {max})")]
    LineNumberRange { number: i32, max: i32 },
    #[error("comments are only valid inside lines")]
    CommentOutsideLine,
    #[error("values are only valid inside words")]
    ValueOutsideWord,
    #[error("value {0} has no numeral representation")]
    NotFinite(f64),
}

/// Errors raised while assembling a document from a token stream.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("expected file start")]
    MissingFileStart,
    #[error("unexpected {found} token, expected {expected}")]
    UnexpectedToken { found: TokenKind, expected: &'static str },
    #[error("unexpected end of input inside a word")]
    UnexpectedEof,
}

/// Errors raised while writing a document out.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("word {0} has no value")]
    EmptyWord(Code),
}
