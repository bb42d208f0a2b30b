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

//! Diagnostics and configuration errors.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;
use thiserror::Error;
use crate::pos::Pos;

// -----------------------------------------------------------------------------

/// A problem found in the scanned text.
///
/// Diagnostics are attached to the [`Token`](crate::Token) in which the
/// problem was found.  They are data, not Rust errors: the scan continues
/// after a diagnostic is raised.
#[derive(Clone)]
pub struct Diagnostic {
    /// Textual position related to the diagnostic.
    pub pos: Pos,

    /// Message content.
    pub message: String,

    /// Underlying error that caused the diagnostic, if any.
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl Diagnostic {
    /// Creates a `Diagnostic` at the given position with the given message.
    #[inline]
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self { pos, message: message.into(), cause: None }
    }

    /// Returns a copy of the diagnostic with the given underlying cause.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static
    {
        self.cause = Some(Arc::new(cause));
        self
    }
}

// Display is used when a Diagnostic is printed as output.
impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: error: {}", self.pos, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("pos",     &self.pos)
            .field("message", &self.message)
            .field("cause",   &self.cause.as_ref().map(|c| c.to_string()))
            .finish()
    }
}

// Causes are compared by neither identity nor content.
impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.message == other.message
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

// -----------------------------------------------------------------------------

/// An invalid rule configuration.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ConfigError {
    /// A hexadecimal escape was configured with an unsupported digit count.
    #[error("invalid hex escape width: {0} (expected 2, 4, or 8)")]
    HexWidth(usize),

    /// A raw-byte escape was configured to read more than two digits.
    #[error("raw-byte escape requires 2 hex digits, not {0}")]
    ByteWidth(usize),

    /// Nesting was requested for a string whose delimiters are identical.
    #[error("nested strings require distinct delimiters, not {0:?} and {0:?}")]
    NestingDelimiters(char),

    /// A literal rule was given an empty literal.
    #[error("empty literal")]
    EmptyLiteral,
}

// -----------------------------------------------------------------------------
