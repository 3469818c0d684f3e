// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating input text to a token sequence. Atoms are left as
//! undelimited runs of characters here; classifying them (nil,
//! boolean, symbol, keyword, character) is the reader's job. The only
//! tokens that denote nesting are `Token::Open` and `Token::Close`.
//! See [read](../read/index.html) if interested in trees rather than
//! tokens.

use crate::pos::Pos;
use crate::settings::Settings;
use crate::value::Parenkind;
use kstring::KString;
use std::fmt::Write;

pub fn maybe_open_close(c: char) -> Option<Token> {
    match c {
        '(' => Some(Token::Open(Parenkind::Round)),
        '[' => Some(Token::Open(Parenkind::Square)),
        '{' => Some(Token::Open(Parenkind::Curly)),
        ')' => Some(Token::Close(Parenkind::Round)),
        ']' => Some(Token::Close(Parenkind::Square)),
        '}' => Some(Token::Close(Parenkind::Curly)),
        _ => None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Undelimited run of non-separator characters, still carrying
    /// any backslashes; classified by the reader.
    Atom(KString),
    /// Contents of a `"`-delimited string, escapes already handled
    /// per [Format](crate::settings::Format).
    Str(KString),
    Open(Parenkind),
    Close(Parenkind),
    /// Only emitted with `retain_comments`; text excludes the leading
    /// `;` and the terminating line feed.
    Comment(KString),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Atom(s) => f.write_str(s),
            Token::Str(s) => f.write_fmt(format_args!("\"{}\"", s)),
            Token::Open(k) => f.write_char(k.opening()),
            Token::Close(k) => f.write_char(k.closing()),
            Token::Comment(s) => f.write_fmt(format_args!(";{}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos(pub Token, pub Pos);

fn flush_atom(tokens: &mut Vec<TokenWithPos>, acc: &mut String, start: Pos) {
    if !acc.is_empty() {
        tokens.push(TokenWithPos(Token::Atom(KString::from_ref(acc)), start));
        acc.clear();
    }
}

/// Single left-to-right scan over `input`. Infallible: malformed
/// input surfaces later, as reader errors. An unterminated string's
/// accumulated content is dropped at EOF; a pending atom is flushed.
pub fn lex(input: &str, settings: &Settings) -> Vec<TokenWithPos> {
    let mut tokens: Vec<TokenWithPos> = Vec::new();
    let mut acc = String::new();
    let mut acc_start = Pos::start();
    let mut string_acc = String::new();
    let mut string_start = Pos::start();
    let mut comment_acc = String::new();
    let mut comment_start = Pos::start();
    let mut in_string = false;
    let mut in_comment = false;
    let mut escaping = false;
    let mut pos = Pos::start();

    let mut cs = input.chars().peekable();
    while let Some(c) = cs.next() {
        let at = pos;
        if c == '\n' || (c == '\r' && cs.peek() != Some(&'\n')) {
            pos = Pos { line: pos.line + 1, col: 0 };
        } else {
            pos.col += 1;
        }

        if in_comment {
            if c == '\n' {
                in_comment = false;
                if settings.modes.retain_comments {
                    tokens.push(TokenWithPos(
                        Token::Comment(KString::from_ref(&comment_acc)),
                        comment_start));
                }
                comment_acc.clear();
            } else if settings.modes.retain_comments {
                comment_acc.push(c);
            }
            continue;
        }

        if in_string {
            if escaping {
                escaping = false;
                match c {
                    't' | 'n' | 'f' | 'r' => {
                        if settings.format.control_escapes_verbatim {
                            string_acc.push('\\');
                            string_acc.push(c);
                        } else {
                            string_acc.push(match c {
                                't' => '\t',
                                'n' => '\n',
                                'f' => '\x0C',
                                _ => '\r',
                            });
                        }
                    }
                    // covers `\\` and `\"` too
                    _ => string_acc.push(c),
                }
            } else if c == '\\' {
                escaping = true;
            } else if c == '"' {
                tokens.push(TokenWithPos(
                    Token::Str(KString::from_ref(&string_acc)),
                    string_start));
                string_acc.clear();
                in_string = false;
            } else {
                string_acc.push(c);
            }
            continue;
        }

        // Outside strings a backslash escapes exactly the next
        // character, which keeps `\"` and `\;` lexing as char atoms;
        // brackets and whitespace terminate atoms regardless.
        let was_escaping = escaping;
        escaping = false;

        if c == ';' && !was_escaping {
            flush_atom(&mut tokens, &mut acc, acc_start);
            in_comment = true;
            comment_start = at;
        } else if c == '"' && !was_escaping {
            flush_atom(&mut tokens, &mut acc, acc_start);
            in_string = true;
            string_start = at;
        } else if matches!(c, ' ' | '\t' | '\n' | '\r') {
            flush_atom(&mut tokens, &mut acc, acc_start);
        } else if let Some(t) = maybe_open_close(c) {
            flush_atom(&mut tokens, &mut acc, acc_start);
            tokens.push(TokenWithPos(t, at));
        } else {
            if c == '\\' && !was_escaping {
                escaping = true;
            }
            if acc.is_empty() {
                acc_start = at;
            }
            acc.push(c);
            if acc == "#_" {
                // flush immediately so `#_value` splits into `#_`
                // followed by `value`
                flush_atom(&mut tokens, &mut acc, acc_start);
            }
        }
    }
    flush_atom(&mut tokens, &mut acc, acc_start);
    if in_comment && settings.modes.retain_comments {
        tokens.push(TokenWithPos(
            Token::Comment(KString::from_ref(&comment_acc)),
            comment_start));
    }
    tokens
}
