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

//! Identifier rule.

use std::collections::HashSet;
use std::sync::Arc;
use crate::class::{Class, LETTER_DIGIT_UNDER, LETTER_UNDER};
use crate::scanner::Scanner;
use crate::token::types;
use super::Rule;

// ----------------------------------------------------------------------------

/// Rule that matches an identifier: a code point in a *head* class followed
/// by any number of code points in a *tail* class.
///
/// An identifier found in the keyword set takes its value as its type, so
/// that each keyword surfaces as a distinct type.  Other identifiers have
/// type `ident`.
#[derive(Clone, Debug)]
pub struct IdentRule {
    head:     Class,
    tail:     Class,
    keywords: Arc<HashSet<String>>,
    ty:       String,
}

impl IdentRule {
    /// Creates an identifier rule with the given head and tail classes.
    pub fn new(head: Class, tail: Class) -> Self {
        Self {
            head,
            tail,
            keywords: Default::default(),
            ty:       types::IDENT.into(),
        }
    }

    /// Creates an identifier rule with a letter-or-underscore head and a
    /// letter-digit-or-underscore tail.
    pub fn standard() -> Self {
        Self::new(LETTER_UNDER, LETTER_DIGIT_UNDER)
    }

    /// Returns a copy of the rule with the given keywords, replacing any
    /// keywords previously set.
    pub fn with_keywords<I, S>(&self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords.into_iter().map(Into::into).collect();
        Self { keywords: Arc::new(keywords), ..self.clone() }
    }

    /// Returns a copy of the rule that sets the given type for identifiers
    /// that are not keywords.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), ..self.clone() }
    }
}

impl Rule for IdentRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if !s.is(&self.head) {
            return false;
        }

        s.keep();
        s.while_is(&self.tail, Scanner::keep);

        let is_keyword = self.keywords.contains(&*s.value());
        if !is_keyword {
            s.set_type(self.ty.as_str());
        }
        true
    }
}

// ----------------------------------------------------------------------------
