// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A structured reader and writer for G-code files in the [RS274/NGC]
//! dialect.
//!
//! The crate is built as a codec triad: `rs274::read` tokenizes raw text
//! into a stream of typed tokens, `rs274::write` renders valid text from
//! structured calls while rejecting illegal call sequences, and
//! `rs274::doc` builds and walks an in-memory line/segment document tree
//! on top of both.  Word values are kept in exact base-10 form
//! (`rs274::num`), so coordinates like `-4.5` round-trip without binary
//! floating-point drift.
//!
//! [RS274/NGC]: https://www.nist.gov/publications/nist-rs274ngc-interpreter-version-3
//!
//! ## Basic usage
//!
//! The following code (the same as the "rs274-fmt" demo binary) takes a
//! file as an argument, loads it into a document and writes it back out
//! in a consistent format.
//!
//! ```rust,no_run
//! use std::{env, io};
//! use rs274::doc::Document;
//!
//! fn main() {
//!     let filename = env::args().nth(1).unwrap();
//!
//!     match Document::load_path(&filename) {
//!         Err(e) => eprintln!("Load error: {}", e),
//!         Ok(doc) => doc.save(io::stdout().lock()).unwrap(),
//!     }
//! }
//! ```
//!
//! Documents can also be built programmatically from lines, segments and
//! values, and handed to `Document::save`; or the `read` and `write`
//! modules can be driven directly for token-level work.
//!
//! ## Unsupported features
//!
//! The grammar is deliberately left open for expressions and parameter
//! references, but neither is implemented; the writer carries no-op
//! placeholders for them.

pub mod code;
pub mod doc;
pub mod error;
pub mod num;
pub mod read;
pub mod write;
