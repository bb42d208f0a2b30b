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

//! Rules: units of matching logic.
//!
//! A [`Rule`] attempts to consume input from a [`Scanner`] at its current
//! position.  A rule that matches leaves the consumed input in the scanner's
//! buffers and returns `true`; the caller then emits the token.  A rule that
//! does not match returns `false` and leaves the scanner as it found it,
//! calling [`Scanner::undo`] if it consumed anything speculatively.

mod class;
mod comment;
mod esc;
mod ident;
mod literal;
mod num;
mod quoted;

pub use self::class::*;
pub use self::comment::*;
pub use self::esc::*;
pub use self::ident::*;
pub use self::literal::*;
pub use self::num::*;
pub use self::quoted::*;

use crate::scanner::Scanner;

// ----------------------------------------------------------------------------

/// Trait for rules.
///
/// Rules are immutable once built and may be shared among scanners on
/// different threads.  Any `Fn(&mut Scanner) -> bool` is a rule.
pub trait Rule: Send + Sync {
    /// Attempts to consume matching input; returns whether it matched.
    fn eval(&self, s: &mut Scanner) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&mut Scanner) -> bool + Send + Sync
{
    #[inline]
    fn eval(&self, s: &mut Scanner) -> bool {
        self(s)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use crate::rule_set::RuleSet;
    use crate::runner::Runner;
    use crate::scanner::Scanner;
    use crate::token::Token;

    /// Scans all of `src` with `rules`, excluding the end token.
    pub fn scan_all(rules: &RuleSet, src: &str) -> Vec<Token> {
        Runner::new(Scanner::for_str("", src), rules).all()
    }

    /// Returns the `(type, value)` pair of each token.
    pub fn pairs(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.ty.as_str(), t.value.as_str())).collect()
    }

    /// Returns the rendered diagnostics of all tokens, in order.
    pub fn errors(tokens: &[Token]) -> Vec<String> {
        tokens.iter().flat_map(|t| &t.diags).map(|d| d.to_string()).collect()
    }

    /// Scans `src` with `rules` and returns `(type, value)` pairs.
    pub fn lex(rules: &RuleSet, src: &str) -> Vec<(String, String)> {
        scan_all(rules, src).into_iter().map(|t| (t.ty, t.value)).collect()
    }

    /// Shorthand for building expected `(type, value)` pairs.
    pub fn tok(ty: &str, value: &str) -> (String, String) {
        (ty.into(), value.into())
    }

    #[test]
    fn rule_closure() {
        let rules = RuleSet::new().with(|s: &mut Scanner| {
            if s.this() == Some('!') {
                s.keep();
                s.set_type("bang");
                true
            } else {
                false
            }
        });

        assert_eq!( lex(&rules, "!!"), vec![tok("bang", "!"), tok("bang", "!")] );
    }
}
