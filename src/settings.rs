// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for both reading (parsing) and printing data.

#[derive(Debug)]
pub struct Format {
    /// Keep `\t`, `\n`, `\f` and `\r` in string literals as the
    /// literal two-character sequences instead of the control
    /// characters they name. Any other escaped character stands for
    /// itself, with the backslash removed, in either mode.
    pub control_escapes_verbatim: bool,
}

/// Strings carry their escape sequences through unchanged; since the
/// printer does not re-escape, printing reproduces the input text.
pub const VERBATIM_FORMAT: Format = Format {
    control_escapes_verbatim: true,
};

/// `\t`, `\n`, `\f` and `\r` become the control characters they name.
pub const INTERPRETED_FORMAT: Format = Format {
    control_escapes_verbatim: false,
};

#[derive(Debug)]
pub struct Modes {
    /// Emit comments as tokens instead of dropping them in the
    /// lexer. The reader skips them either way.
    pub retain_comments: bool,
}

pub const DEFAULT_MODES: Modes = Modes {
    retain_comments: false,
};

#[derive(Debug)]
pub struct Settings<'t> {
    pub format: &'t Format,
    pub modes: &'t Modes,
}

impl Default for Settings<'static> {
    fn default() -> Self {
        Settings {
            format: &VERBATIM_FORMAT,
            modes: &DEFAULT_MODES,
        }
    }
}
