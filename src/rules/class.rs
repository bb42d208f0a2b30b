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

//! Class-span rule.

use crate::class::Class;
use crate::scanner::Scanner;
use super::Rule;

// ----------------------------------------------------------------------------

/// Rule that matches a run of code points in a [`Class`].
///
/// By default the run is kept.  With [`with_discard`](Self::with_discard),
/// the run is consumed without being kept, producing an empty token that
/// [`RuleSet::next`](crate::RuleSet::next) drops.
#[derive(Clone, Debug)]
pub struct ClassRule {
    class:   Class,
    ty:      Option<String>,
    discard: bool,
}

impl ClassRule {
    /// Creates a rule matching a run of code points in `class`.  The token
    /// type defaults to the value.
    pub fn new(class: Class) -> Self {
        Self { class, ty: None, discard: false }
    }

    /// Creates a rule that consumes and drops a run of code points in
    /// `class`, such as white space.
    pub fn space(class: Class) -> Self {
        Self::new(class).with_discard(true)
    }

    /// Returns a copy of the rule that sets the given token type.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: Some(ty.into()), ..self.clone() }
    }

    /// Returns a copy of the rule that discards (`true`) or keeps (`false`)
    /// the run.
    pub fn with_discard(&self, discard: bool) -> Self {
        Self { discard, ..self.clone() }
    }
}

impl Rule for ClassRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if !s.is(&self.class) {
            return false;
        }

        if self.discard {
            s.while_is(&self.class, Scanner::skip);
            return true;
        }

        s.while_is(&self.class, Scanner::keep);

        if let Some(ty) = &self.ty {
            s.set_type(ty.as_str());
        }
        true
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::class::{one_of, LETTER, WHITESPACE};
    use crate::rule_set::RuleSet;
    use crate::rules::tests::*;
    use crate::token::types;
    use super::*;

    #[test]
    fn class_rule() {
        let rules = RuleSet::new()
            .with(ClassRule::new('-'.into()))
            .with(ClassRule::new('+'.into()).with_type("plus"));

        assert_eq!( lex(&rules, "-"),   vec![tok("-",    "-")]   );
        assert_eq!( lex(&rules, "+"),   vec![tok("plus", "+")]   );
        assert_eq!( lex(&rules, "--+"), vec![tok("--",   "--"), tok("plus", "+")] );
    }

    #[test]
    fn class_rule_word() {
        let rules = RuleSet::new()
            .with(ClassRule::space(WHITESPACE))
            .with(ClassRule::new(LETTER).with_type(types::WORD));

        let tokens = scan_all(&rules, "ab \t cd");

        assert_eq!( pairs(&tokens), vec![("word", "ab"), ("word", "cd")] );
        assert_eq!( tokens[1].pos.column, 6 );
    }

    #[test]
    fn class_rule_space_is_dropped() {
        let rules = RuleSet::new()
            .with(ClassRule::space(one_of(&[' ', '\t'])))
            .with(ClassRule::new(LETTER));

        assert_eq!( lex(&rules, "  a "), vec![tok("a", "a")] );
    }
}
