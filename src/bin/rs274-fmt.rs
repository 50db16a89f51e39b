// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::{env, io, process};
use rs274::doc::Document;

fn main() {
    env_logger::init();
    let filename = env::args().nth(1).expect("file name required");

    let doc = match Document::load_path(&filename) {
        Err(e) => {
            eprintln!("Load error: {}", e);
            process::exit(1);
        }
        Ok(doc) => doc,
    };
    if let Err(e) = doc.save(io::stdout().lock()) {
        eprintln!("Write error: {}", e);
        process::exit(1);
    }
}
