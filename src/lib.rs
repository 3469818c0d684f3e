// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is a reader and printer for EDN (extensible data notation),
//! with the following goals:
//!
//! * Offering direct access to the token sequence via
//!   [lex::lex](lex::lex), but also [read::read](read::read) to build
//!   an in-memory tree easily.
//!
//! * Good error reporting: every error is a typed value carrying the
//!   source position, so callers branch on the kind instead of
//!   matching message strings, and a hosting application (e.g. a
//!   REPL) can report a diagnostic without terminating.
//!
//! * Canonical printing: any tree the reader produces renders back to
//!   text through `Display`, with children joined by single spaces
//!   and sets written as `#{ ... }`.
//!
//! * Runtime settings for the string escape style (keep `\t`-like
//!   sequences verbatim, or interpret them as control characters) and
//!   for retaining comments as tokens, see [settings](settings).
//!
//! Numeric literals (integers, floats, ratios, big decimals) are an
//! explicit extension point: the symbol character set covers the
//! digits, so digit-only tokens currently read as symbols. See
//! [value::NodeKind](value::NodeKind).

pub mod lex;
pub mod pos;
pub mod read;
pub mod settings;
pub mod value;
