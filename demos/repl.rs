// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use clap::Parser as ClapParser;
use ednish::lex::{lex, TokenWithPos};
use ednish::read::{read, read_file, write_all};
use ednish::settings::{Modes, Settings, VERBATIM_FORMAT};
use std::io::{stdin, stdout, BufRead, BufWriter, Write};
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Dump the token sequence instead of reading trees (only with an
    /// input file)
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Keep comments when dumping tokens
    #[clap(short, long, value_parser)]
    comments: bool,
    /// Path to an input file; without one, run an interactive loop on
    /// stdin
    #[clap(value_parser)]
    input_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.input_path {
        if args.tokens {
            let input = std::fs::read_to_string(path)?;
            let settings = Settings {
                format: &VERBATIM_FORMAT,
                modes: &Modes {
                    retain_comments: args.comments,
                },
            };
            for TokenWithPos(token, pos) in lex(&input, &settings) {
                println!("{pos}\t{token}");
            }
        } else {
            let vals = read_file(path)?;
            write_all(BufWriter::new(stdout()), &vals)?;
        }
        return Ok(());
    }

    // One form per line; a reader error is reported and the loop
    // keeps going.
    let mut line = String::new();
    loop {
        print!("edn> ");
        stdout().flush()?;
        line.clear();
        if stdin().lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let input = line.trim_end_matches(&['\n', '\r'][..]);
        if input.is_empty() {
            println!();
            continue;
        }
        match read(input) {
            Ok(node) => println!("{node}"),
            Err(e) => println!("read error: {e}"),
        }
    }
}
