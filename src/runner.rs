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

//! Runners: token streams with lookahead.

use std::mem::replace;

use crate::rule_set::RuleSet;
use crate::scanner::Scanner;
use crate::token::Token;

// ----------------------------------------------------------------------------

/// Stream of tokens from a [`Scanner`] and a [`RuleSet`], with one token of
/// lookahead.
///
/// The runner holds the *current* token, which
/// [`next_token`](Self::next_token) returns next, and the token after it.
/// Once the current token is the end of text, the runner has nothing more to
/// return.  The [`Iterator`] impl yields the same tokens, stopping before the
/// end of text.
pub struct Runner<'a> {
    rules:   RuleSet,
    scanner: Scanner<'a>,
    this:    Token,
    next:    Token,
}

impl<'a> Runner<'a> {
    /// Creates a runner and scans its first two tokens.
    pub fn new(mut scanner: Scanner<'a>, rules: &RuleSet) -> Self {
        let this = rules.next(&mut scanner);
        let next = if this.is_end() {
            this.clone()
        } else {
            rules.next(&mut scanner)
        };

        Self { rules: rules.clone(), scanner, this, next }
    }

    /// Returns whether a token other than the end of text remains.
    #[inline]
    pub fn has_more(&self) -> bool {
        !self.this.is_end()
    }

    /// Returns the current token and advances.  At the end of text, returns
    /// the end token again.
    pub fn next_token(&mut self) -> Token {
        let after = if self.next.is_end() {
            self.next.clone()
        } else {
            self.rules.next(&mut self.scanner)
        };

        let next = replace(&mut self.next, after);
        replace(&mut self.this, next)
    }

    /// Returns the current token without advancing.
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.this
    }

    /// Returns the token after the current one without advancing.
    #[inline]
    pub fn peek_next(&self) -> &Token {
        &self.next
    }

    /// Returns all remaining tokens, excluding the end of text.
    pub fn all(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Returns the underlying scanner.
    #[inline]
    pub fn scanner(&self) -> &Scanner<'a> {
        &self.scanner
    }
}

impl Iterator for Runner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.has_more() {
            Some(self.next_token())
        } else {
            None
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::class::WHITESPACE;
    use crate::input::tests::Failing;
    use crate::rules::IdentRule;
    use crate::token::types;
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new()
            .with_discards(WHITESPACE)
            .with(IdentRule::standard())
    }

    #[test]
    fn runner_lookahead() {
        let rules  = rules();
        let mut r  = Runner::new(Scanner::for_str("", "a b c"), &rules);

        assert_eq!( r.has_more(),        true );
        assert_eq!( r.peek().value,      "a"  );
        assert_eq!( r.peek_next().value, "b"  );

        assert_eq!( r.next_token().value, "a"  );
        assert_eq!( r.peek().value,      "b"  );
        assert_eq!( r.peek_next().value, "c"  );

        assert_eq!( r.next_token().value, "b"  );
        assert_eq!( r.peek_next().ty,    types::END );

        assert_eq!( r.next_token().value, "c"  );
        assert_eq!( r.has_more(),        false );
        assert_eq!( r.next_token().ty,    types::END );
        assert_eq!( r.next_token().ty,    types::END );
    }

    #[test]
    fn runner_empty() {
        let rules = rules();
        let mut r = Runner::new(Scanner::for_str("", "  "), &rules);

        assert_eq!( r.has_more(),     false      );
        assert_eq!( r.peek().ty,      types::END );
        assert_eq!( r.peek_next().ty, types::END );
        assert_eq!( r.all(),          vec![]     );
    }

    #[test]
    fn runner_all() {
        let rules  = rules();
        let tokens = Runner::new(Scanner::for_str("", "a bc"), &rules).all();

        let values = tokens.iter().map(|t| t.value.as_str()).collect::<Vec<_>>();

        assert_eq!( values,                  vec!["a", "bc"] );
        assert_eq!( tokens[1].pos.to_string(), "1:3"         );
    }

    #[test]
    fn runner_read_error() {
        let rules  = rules();
        let mut r  = Runner::new(Scanner::new("f", Failing(b"ab")), &rules);
        let tokens = r.all();

        assert_eq!( tokens.len(),     2            );
        assert_eq!( tokens[0].value,  "ab"         );
        assert_eq!( tokens[1].ty,     types::ERROR );
        assert_eq!( tokens[1].pos.to_string(),  "f:1:3"                );
        assert_eq!( tokens[1].diags[0].message, "error reading stream" );
        assert_eq!( r.next_token().ty,      types::END   );
    }
}
