// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing a parsed EDN tree.

//! A [Node](Node) carries its kind, the literal token text for scalar
//! kinds, the children for collection kinds, and the source position
//! it came from. Printing a node via `Display` yields the canonical
//! single-space-joined rendering.

use crate::pos::Pos;
use kstring::KString;
use std::fmt::{Display, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenkind {
    Round,
    Square,
    Curly,
}

impl Parenkind {
    pub fn opening(self) -> char {
        match self {
            Parenkind::Round => '(',
            Parenkind::Square => '[',
            Parenkind::Curly => '{',
        }
    }
    pub fn closing(self) -> char {
        match self {
            Parenkind::Round => ')',
            Parenkind::Square => ']',
            Parenkind::Curly => '}',
        }
    }
    pub fn node_kind(self) -> NodeKind {
        match self {
            Parenkind::Round => NodeKind::List,
            Parenkind::Square => NodeKind::Vector,
            Parenkind::Curly => NodeKind::Map,
        }
    }
}

/// The kind tag of a [Node](Node). `Int` and `Float` are reserved:
/// the symbol character set includes the digits, so digit-only tokens
/// classify as symbols until a numeric grammar narrows that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Nil,
    Symbol,
    Keyword,
    Bool,
    Int,
    Float,
    String,
    Char,
    List,
    Vector,
    Map,
    Set,
    Discard,
    Tagged,
}

impl NodeKind {
    /// Kinds that carry children rather than literal text. `Discard`
    /// and `Tagged` count: their payload is the `[tag, value]` child
    /// pair.
    pub fn is_collection(self) -> bool {
        matches!(self,
                 NodeKind::List | NodeKind::Vector | NodeKind::Map
                 | NodeKind::Set | NodeKind::Discard | NodeKind::Tagged)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Pos,
    /// Literal token text; empty for collection kinds.
    pub text: KString,
    /// Children in source order; empty for scalar kinds.
    pub children: Vec<Node>,
}

impl Node {
    pub fn scalar(kind: NodeKind, pos: Pos, text: KString) -> Node {
        Node { kind, pos, text, children: Vec::new() }
    }

    pub fn collection(kind: NodeKind, pos: Pos, children: Vec<Node>) -> Node {
        Node { kind, pos, text: KString::new(), children }
    }
}

/// Easily create a symbol
pub fn symbol(s: &str, pos: Pos) -> Node {
    Node::scalar(NodeKind::Symbol, pos, KString::from_ref(s))
}

fn fmt_children(f: &mut std::fmt::Formatter<'_>, children: &[Node])
                -> Result<(), std::fmt::Error> {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        child.fmt(f)?;
    }
    Ok(())
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self.kind {
            NodeKind::List => {
                f.write_char('(')?;
                fmt_children(f, &self.children)?;
                f.write_char(')')
            }
            NodeKind::Vector => {
                f.write_char('[')?;
                fmt_children(f, &self.children)?;
                f.write_char(']')
            }
            NodeKind::Map => {
                f.write_char('{')?;
                fmt_children(f, &self.children)?;
                f.write_char('}')
            }
            NodeKind::Set => {
                f.write_str("#{")?;
                fmt_children(f, &self.children)?;
                f.write_char('}')
            }
            // Both print as `#` + tag + ` ` + value; the discard tag
            // is the `_` symbol, giving `#_ value`.
            NodeKind::Tagged | NodeKind::Discard => {
                f.write_char('#')?;
                fmt_children(f, &self.children)
            }
            NodeKind::String => {
                // raw stored value, no re-escaping
                f.write_fmt(format_args!("\"{}\"", self.text))
            }
            NodeKind::Nil | NodeKind::Symbol | NodeKind::Keyword
            | NodeKind::Bool | NodeKind::Int | NodeKind::Float
            | NodeKind::Char => f.write_str(&self.text),
        }
    }
}
