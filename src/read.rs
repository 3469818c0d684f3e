// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building a tree of [Node](crate::value::Node)s from the token
//! sequence produced by [lex](crate::lex::lex), plus file and output
//! helpers.

use crate::lex::{lex, Token, TokenWithPos};
use crate::pos::Pos;
use crate::settings::Settings;
use crate::value::{symbol, Node, NodeKind, Parenkind};
use kstring::KString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("no parsable tokens found in input")]
    EmptyInput,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(KString),
    #[error("invalid tag name '{0}'")]
    InvalidTagName(KString),
    #[error("expecting a map after '#' to build a set")]
    SetRequiresMap,
    #[error("nesting too deep")]
    NestingTooDeep,
}

#[derive(Error, Debug)]
#[error("{err} at {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos,
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReadFileError {
    #[error("{path:?}: {err}")]
    IO {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("{err} in {path:?}")]
    Read {
        path: PathBuf,
        err: ReadErrorWithPos,
    },
}

/// Non-destructive cursor over the token buffer. Comment tokens are
/// skipped here so the reader never sees them.
struct Cursor<'t> {
    tokens: &'t [TokenWithPos],
    index: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [TokenWithPos]) -> Self {
        Cursor { tokens, index: 0 }
    }

    fn next(&mut self) -> Option<&'t TokenWithPos> {
        while let Some(t) = self.tokens.get(self.index) {
            self.index += 1;
            if !matches!(t.0, Token::Comment(_)) {
                return Some(t);
            }
        }
        None
    }
}

const SYMBOL_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.*+!-_?$%&=:#/";

pub fn is_valid_symbol(text: &str) -> bool {
    text.chars()
        .all(|c| SYMBOL_CHARS.contains(c.to_ascii_uppercase()))
}

/// A backslash followed by exactly one character.
fn is_char_text(text: &str) -> bool {
    let mut cs = text.chars();
    cs.next() == Some('\\') && cs.next().is_some() && cs.next().is_none()
}

// Numeric literals are an extension point; the symbol character set
// already covers digit-only tokens, so these hold their precedence
// slot without matching anything yet.
fn is_int_text(_text: &str) -> bool {
    false
}
fn is_float_text(_text: &str) -> bool {
    false
}

/// First matching rule wins. `nil` outranks everything, even string
/// tokens; booleans are recognized before the symbol rule (the symbol
/// character set contains all letters); anything unclassifiable falls
/// back to a symbol.
fn classify(text: &str, was_string: bool) -> NodeKind {
    if text == "nil" {
        NodeKind::Nil
    } else if was_string {
        NodeKind::String
    } else if text == "true" || text == "false" {
        NodeKind::Bool
    } else if is_valid_symbol(text) {
        if text.starts_with(':') {
            NodeKind::Keyword
        } else {
            NodeKind::Symbol
        }
    } else if is_char_text(text) {
        NodeKind::Char
    } else if is_int_text(text) {
        NodeKind::Int
    } else if is_float_text(text) {
        NodeKind::Float
    } else {
        NodeKind::Symbol
    }
}

fn closer_text(pk: Parenkind) -> KString {
    KString::from_ref(&pk.closing().to_string())
}

/// Tag dispatch for an atom starting with `#`: `#{` arrives here as
/// the bare atom `#` with the already-read map as value.
fn handle_tagged(token_text: &KString, pos: Pos, value: Node)
                 -> Result<Node, ReadErrorWithPos> {
    let tag = &token_text[1..];
    if tag.is_empty() {
        if value.kind != NodeKind::Map {
            return Err(ReadError::SetRequiresMap.at(pos));
        }
        return Ok(Node::collection(NodeKind::Set, pos, value.children));
    }
    if !is_valid_symbol(tag) {
        return Err(ReadError::InvalidTagName(KString::from_ref(tag)).at(pos));
    }
    let kind = if tag == "_" {
        NodeKind::Discard
    } else {
        NodeKind::Tagged
    };
    Ok(Node::collection(kind, pos, vec![symbol(tag, pos), value]))
}

// The limit with default stack settings on Linux is far higher, but
// adversarial nesting must not get near it.
const DEPTH_FUEL: u32 = 500;

fn read_ahead(
    t: &TokenWithPos,
    cursor: &mut Cursor,
    depth_fuel: u32,
) -> Result<Node, ReadErrorWithPos> {
    let TokenWithPos(token, pos) = t;
    let pos = *pos;
    match token {
        Token::Open(pk) => {
            if depth_fuel == 0 {
                return Err(ReadError::NestingTooDeep.at(pos));
            }
            let mut children = Vec::new();
            loop {
                let nt = match cursor.next() {
                    None => {
                        return Err(ReadError::UnexpectedEndOfInput.at(pos))
                    }
                    Some(nt) => nt,
                };
                if let Token::Close(ck) = &nt.0 {
                    if ck == pk {
                        return Ok(Node::collection(
                            pk.node_kind(), pos, children));
                    }
                    // a mismatched closer like `(]` is reported at
                    // the closer rather than accepted
                    return Err(ReadError::UnexpectedToken(closer_text(*ck))
                               .at(nt.1));
                }
                children.push(read_ahead(nt, cursor, depth_fuel - 1)?);
            }
        }
        Token::Close(pk) => {
            Err(ReadError::UnexpectedToken(closer_text(*pk)).at(pos))
        }
        Token::Atom(s) if s.starts_with('#') => {
            if depth_fuel == 0 {
                return Err(ReadError::NestingTooDeep.at(pos));
            }
            let vt = match cursor.next() {
                None => return Err(ReadError::UnexpectedEndOfInput.at(pos)),
                Some(vt) => vt,
            };
            let value = read_ahead(vt, cursor, depth_fuel - 1)?;
            handle_tagged(s, pos, value)
        }
        Token::Atom(s) => {
            Ok(Node::scalar(classify(s, false), pos, s.clone()))
        }
        Token::Str(s) => {
            Ok(Node::scalar(classify(s, true), pos, s.clone()))
        }
        // Cursor::next never yields comments; kept total anyway
        Token::Comment(s) => {
            Err(ReadError::UnexpectedToken(s.clone()).at(pos))
        }
    }
}

/// Read the first form in `input` with default settings. Tokens after
/// the first form are left unconsumed; use [read_all](read_all) to
/// get every top-level form.
pub fn read(input: &str) -> Result<Node, ReadErrorWithPos> {
    read_with(input, &Settings::default())
}

pub fn read_with(input: &str, settings: &Settings)
                 -> Result<Node, ReadErrorWithPos> {
    let tokens = lex(input, settings);
    let mut cursor = Cursor::new(&tokens);
    let t = match cursor.next() {
        None => return Err(ReadError::EmptyInput.at(Pos::start())),
        Some(t) => t,
    };
    read_ahead(t, &mut cursor, DEPTH_FUEL)
}

/// Read every top-level form in `input`. Empty input yields an empty
/// vector rather than an error.
pub fn read_all(input: &str) -> Result<Vec<Node>, ReadErrorWithPos> {
    read_all_with(input, &Settings::default())
}

pub fn read_all_with(input: &str, settings: &Settings)
                     -> Result<Vec<Node>, ReadErrorWithPos> {
    let tokens = lex(input, settings);
    let mut cursor = Cursor::new(&tokens);
    let mut v = Vec::new();
    while let Some(t) = cursor.next() {
        v.push(read_ahead(t, &mut cursor, DEPTH_FUEL)?);
    }
    Ok(v)
}

pub fn read_file(path: &Path) -> Result<Vec<Node>, ReadFileError> {
    let input = fs::read_to_string(path).map_err(|err| ReadFileError::IO {
        path: path.to_path_buf(),
        err,
    })?;
    read_all(&input).map_err(|err| ReadFileError::Read {
        path: path.to_path_buf(),
        err,
    })
}

pub fn write_all<'t>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t Node>,
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    let mut seen_item = false;
    for v in vals.into_iter() {
        write!(out, "{}{}\n", if seen_item { "\n" } else { "" }, v)?;
        seen_item = true;
    }
    Ok(())
}

pub fn write_file<'t>(path: &Path, vals: impl IntoIterator<Item = &'t Node>)
                      -> Result<(), std::io::Error> {
    write_all(File::create(path)?, vals)
}
