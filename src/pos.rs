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

//! Source positions.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use serde::Serialize;

// ----------------------------------------------------------------------------

/// A position within a named text stream.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Pos {
    /// Name of the stream, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Arc<str>>,

    /// The 1-based line number, or `0` to indicate an unknown line.
    pub line: u32,

    /// The 1-based column number, or `0` to indicate an unknown column.
    pub column: u32,
}

impl Pos {
    /// Creates a position at the beginning of the named stream.  An empty
    /// `name` is treated as no name.
    pub fn start(name: &str) -> Self {
        let name = (!name.is_empty()).then(|| name.into());
        Self { name, line: 1, column: 1 }
    }

    /// Creates an unnamed position at the given line and column.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { name: None, line, column }
    }

    /// Returns the name of the stream, or `""` if the stream is unnamed.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Advances the position past the given code point.
    #[inline]
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line  += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}:", name)?;
        }
        match (self.line, self.column) {
            (0, 0) => Ok(()),
            (l, 0) => write!(f, "{}",    l   ),
            (l, c) => write!(f, "{}:{}", l, c),
        }
    }
}

// ----------------------------------------------------------------------------
