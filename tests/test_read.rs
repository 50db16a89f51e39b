// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use rs274::error::ReadError;
use rs274::read::{Reader, ReaderSettings, TokenKind};

/// Walks the whole token stream, rendering each token compactly.
fn trace(input: &str, settings: ReaderSettings) -> Result<Vec<String>, ReadError> {
    let mut reader = Reader::with_settings(input.as_bytes(), settings);
    let mut tokens = vec![];
    while reader.read()? {
        tokens.push(match reader.token() {
            TokenKind::None => unreachable!(),
            TokenKind::FileStart => "file".into(),
            TokenKind::FileEnd => "endfile".into(),
            TokenKind::LineStart => {
                let delete = if reader.is_block_delete_line() { " del" } else { "" };
                format!("line N{}{}", reader.line_number(), delete)
            }
            TokenKind::LineEnd => "endline".into(),
            TokenKind::CommentOrMessage => format!("comment[{}]", reader.comment()),
            TokenKind::WordStart => format!("word {}", reader.code().unwrap()),
            TokenKind::WordEnd => "endword".into(),
            TokenKind::Value => {
                let kind = if reader.value_is_integer() { "int" } else { "dec" };
                format!("{} {}", kind, reader.value())
            }
        });
    }
    Ok(tokens)
}

fn default_trace(input: &str) -> Result<Vec<String>, ReadError> {
    trace(input, ReaderSettings::default())
}

#[test]
fn test_empty_input() {
    assert_eq!(default_trace("").unwrap(), Vec::<String>::new());
    // no file start marker means no content at all
    assert_eq!(default_trace("G1 X2\n").unwrap(), Vec::<String>::new());
}

#[test]
fn test_empty_file_block() {
    assert_eq!(default_trace("%\n%").unwrap(), ["file", "endfile"]);
    assert_eq!(default_trace("%\n%\n").unwrap(), ["file", "endfile"]);
}

#[test]
fn test_simple_line() {
    assert_eq!(default_trace("%\nG00 X0 Y0 Z0\n%").unwrap(), [
        "file",
        "line N-1",
        "word G", "int 0", "endword",
        "word X", "int 0", "endword",
        "word Y", "int 0", "endword",
        "word Z", "int 0", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_preamble_skipped() {
    // anything before the % marker is not part of the file
    assert_eq!(default_trace("Generated by demo\n\n%\nG1 X2\n%").unwrap(), [
        "file",
        "line N-1",
        "word G", "int 1", "endword",
        "word X", "int 2", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_line_numbers_and_block_delete() {
    assert_eq!(default_trace("%\n/ N10 G1 X2\nN0 Y-3.5\nn7 Z1\n%").unwrap(), [
        "file",
        "line N10 del",
        "word G", "int 1", "endword",
        "word X", "int 2", "endword",
        "endline",
        "line N0",
        "word Y", "dec -3.5", "endword",
        "endline",
        "line N7",
        "word Z", "int 1", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_comments() {
    assert_eq!(default_trace("%\nG1 (feed move) X2 ;to the right\n(full line)\n%").unwrap(), [
        "file",
        "line N-1",
        "word G", "int 1", "endword",
        "comment[feed move]",
        "word X", "int 2", "endword",
        "comment[to the right]",
        "endline",
        "line N-1",
        "comment[full line]",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_number_formats() {
    assert_eq!(default_trace("%\nX5. Y.5 Z+1.5 A-0.25 B007 C1.50\n%").unwrap(), [
        "file",
        "line N-1",
        "word X", "int 5", "endword",
        "word Y", "dec 0.5", "endword",
        "word Z", "dec 1.5", "endword",
        "word A", "dec -0.25", "endword",
        "word B", "int 7", "endword",
        "word C", "dec 1.50", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_blank_lines() {
    assert_eq!(default_trace("%\n\nG1 X1\n%").unwrap(), [
        "file",
        "line N-1", "endline",
        "line N-1",
        "word G", "int 1", "endword",
        "word X", "int 1", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_crlf_input() {
    assert_eq!(default_trace("%\r\nG1 X5 ;ok\r\n%\r\n").unwrap(), [
        "file",
        "line N-1",
        "word G", "int 1", "endword",
        "word X", "int 5", "endword",
        "comment[ok]",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_multiple_file_blocks() {
    // a second % section in the same input is a second file
    assert_eq!(default_trace("%\nG1 X1\n%\nskipped\n%\nG2 X2\n%").unwrap(), [
        "file",
        "line N-1", "word G", "int 1", "endword", "word X", "int 1", "endword", "endline",
        "endfile",
        "file",
        "line N-1", "word G", "int 2", "endword", "word X", "int 2", "endword", "endline",
        "endfile",
    ]);
}

#[test]
fn test_input_ends_mid_word() {
    // exhausted input inside a word is the end of the stream, not an error
    assert_eq!(default_trace("%\nG").unwrap(),
               ["file", "line N-1", "word G"]);
    assert_eq!(default_trace("%\nG1").unwrap(),
               ["file", "line N-1", "word G", "int 1", "endword"]);
}

#[test]
fn test_ignore_comments() {
    let settings = ReaderSettings { ignore_comments: true, ..Default::default() };
    assert_eq!(trace("%\nG1 (feed) X2 ;trail\n%", settings).unwrap(), [
        "file",
        "line N-1",
        "word G", "int 1", "endword",
        "word X", "int 2", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_ignore_block_delete() {
    let settings = ReaderSettings { ignore_block_delete: true, ..Default::default() };
    assert_eq!(trace("%\n/G1 X1\nG2 X2\n/ N10 Z3\n%", settings).unwrap(), [
        "file",
        "line N-1",
        "word G", "int 2", "endword",
        "word X", "int 2", "endword",
        "endline",
        "endfile",
    ]);
}

#[test]
fn test_invalid() {
    for snippet in &[
        "%\nG1 $\n%",       // invalid characters
        "%\nGG\n%",         // missing values
        "%\nG+\n%",         // sign without digits
        "%\nG.\n%",         // decimal point without digits
        "%\nE5\n%",         // E is not in the word alphabet
        "%\n(\n%",          // comments spanning lines
        "%\n(",             // unclosed comments
        "%\nN G1\n%",       // N without a number
        "%\nG1 X2\rY3\n%",  // bare carriage return
        "%\nG99999999999999999999\n%",  // too many digits
    ] {
        assert!(default_trace(snippet).is_err(), "accepted: {:?}", snippet);
    }
}

#[test]
fn test_error_variants() {
    assert!(matches!(default_trace("%\nG1 $\n%"),
                     Err(ReadError::UnexpectedChar('$'))));
    assert!(matches!(default_trace("%\nE5\n%"),
                     Err(ReadError::InvalidLetter('E'))));
    assert!(matches!(default_trace("%\nGG\n%"),
                     Err(ReadError::ExpectedDigit)));
    assert!(matches!(default_trace("%\n(never closed"),
                     Err(ReadError::UnclosedComment)));
    assert!(matches!(default_trace("%\n(a\nb)\n%"),
                     Err(ReadError::MultilineComment)));
    assert!(matches!(default_trace("%\nG1\rX2\n%"),
                     Err(ReadError::LoneCarriageReturn)));
    assert!(matches!(default_trace("%\nX12345678901234567890\n%"),
                     Err(ReadError::NumberOverflow)));
}
