// This file is part of scan, a lexical scanning toolkit.
// Copyright 2024 Jeffrey Sharp
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// scan is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// scan is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with scan.  If not, see <http://www.gnu.org/licenses/>.

//! Tokens.

use std::fmt::{self, Display, Formatter};
use colored::Colorize;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use crate::message::Diagnostic;
use crate::pos::Pos;

// ----------------------------------------------------------------------------

/// Reserved token type labels.
///
/// Token types are open strings.  A token whose type is never set by a rule
/// takes its value as its type, so keywords and operators surface as
/// distinct types.  The labels here are those used by the rules in this
/// crate.
pub mod types {
    /// End of text.
    pub const END:     &str = "end";
    /// Failure reading the byte source.
    pub const ERROR:   &str = "error";
    /// Malformed or unexpected input.
    pub const ILLEGAL: &str = "illegal";

    pub const BIN:     &str = "bin";
    pub const COMMENT: &str = "comment";
    pub const HEX:     &str = "hex";
    pub const IDENT:   &str = "ident";
    pub const INT:     &str = "int";
    pub const OCT:     &str = "oct";
    pub const REAL:    &str = "real";
    pub const STR:     &str = "str";
    pub const WORD:    &str = "word";
}

// ----------------------------------------------------------------------------

/// A lexical token.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Token {
    /// Kept code points.
    pub value: String,

    /// All consumed code points, including those skipped from the value.
    pub literal: String,

    /// Type label.
    pub ty: String,

    /// Position of the first consumed code point.
    pub pos: Pos,

    /// Problems found in the token.
    pub diags: Vec<Diagnostic>,
}

impl Token {
    /// Returns whether the token has neither value nor type.
    ///
    /// Empty tokens are produced when input is consumed without being kept,
    /// and are dropped by [`RuleSet::next`](crate::RuleSet::next).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.ty.is_empty()
    }

    /// Returns whether the token marks the end of text.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.ty == types::END
    }

    /// Returns whether the token carries any diagnostics.
    #[inline]
    pub fn is_illegal(&self) -> bool {
        !self.diags.is_empty()
    }
}

// Display is used in logs and test failure output.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.pos.line != 0 || self.pos.column != 0 {
            write!(f, "{}:{} ", self.pos.line, self.pos.column)?;
        }
        write!(f, "{} {}", self.ty, show_newlines(&self.value))?;
        if self.literal != self.value {
            write!(f, " [lit] {}", show_newlines(&self.literal))?;
        }
        for d in &self.diags {
            write!(f, "\n{}", d)?;
        }
        Ok(())
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let has_literal = self.literal != self.value;
        let has_diags   = !self.diags.is_empty();

        let len = 3 + has_literal as usize + has_diags as usize;
        let mut t = s.serialize_struct("Token", len)?;

        t.serialize_field("value", &self.value)?;
        if has_literal {
            t.serialize_field("literal", &self.literal)?;
        } else {
            t.skip_field("literal")?;
        }
        t.serialize_field("type",     &self.ty )?;
        t.serialize_field("position", &self.pos)?;
        if has_diags {
            let diags: Vec<_> = self.diags.iter().map(DiagnosticRepr::from).collect();
            t.serialize_field("diagnostics", &diags)?;
        } else {
            t.skip_field("diagnostics")?;
        }
        t.end()
    }
}

#[derive(serde::Serialize)]
struct DiagnosticRepr<'a> {
    position: &'a Pos,
    message:  &'a str,
}

impl<'a> From<&'a Diagnostic> for DiagnosticRepr<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self { position: &d.pos, message: &d.message }
    }
}

fn show_newlines(s: &str) -> String {
    s.replace('\n', "\u{21B5}")
}

// ----------------------------------------------------------------------------

/// Aligned, human-readable table of tokens.
///
/// Columns are position, type, quoted value, and quoted literal.  Each
/// diagnostic appears on its own line beneath its token.
#[derive(Clone, Copy, Debug)]
pub struct TokenTable<'a> {
    tokens: &'a [Token],
    color:  bool,
}

impl<'a> TokenTable<'a> {
    /// Creates a table of the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, color: false }
    }

    /// Returns a copy of the table that renders diagnostics in color.
    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }
}

impl Display for TokenTable<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let rows: Vec<[String; 4]> = self.tokens.iter().map(|t| [
            t.pos.to_string(),
            t.ty.clone(),
            format!("{:?}", t.value),
            format!("{:?}", t.literal),
        ]).collect();

        let mut widths = ["Pos".len(), "Type".len(), "Value".len(), "Literal".len()];
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |f: &mut Formatter, cells: [&str; 4]| -> fmt::Result {
            let text = format!("{:<w0$}  {:<w1$}  {:<w2$}  {}",
                cells[0], cells[1], cells[2], cells[3],
                w0 = widths[0], w1 = widths[1], w2 = widths[2],
            );
            writeln!(f, "{}", text.trim_end())
        };

        line(f, ["Pos", "Type", "Value", "Literal"])?;

        for (row, token) in rows.iter().zip(self.tokens) {
            line(f, [&row[0], &row[1], &row[2], &row[3]])?;
            for d in &token.diags {
                if self.color {
                    writeln!(f, "{}", d.to_string().red())?;
                } else {
                    writeln!(f, "{}", d)?;
                }
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
