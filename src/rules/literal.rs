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

//! Literal trie rule.

use std::sync::Arc;
use crate::message::ConfigError;
use crate::scanner::Scanner;
use super::Rule;

// ----------------------------------------------------------------------------

/// Rule that matches the longest of a set of fixed strings.
///
/// The strings are held in a prefix tree built once when the rule is
/// created.  Matching walks the tree along the upcoming code points and
/// consumes exactly the longest string found, and nothing beyond it.
///
#[derive(Clone, Debug)]
pub struct LiteralRule {
    trie: Arc<Trie>,
    skip: bool,
    ty:   Option<String>,
}

/// Arena of trie nodes; the root is at index 0.
#[derive(Debug)]
struct Trie {
    nodes: Vec<Node>,
}

#[derive(Default, Debug)]
struct Node {
    children: Vec<(char, usize)>,
    leaf:     bool,
}

impl Trie {
    fn new() -> Self {
        Self { nodes: vec![Node::default()] }
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes[node].children
            .iter()
            .find(|&&(c, _)| c == ch)
            .map(|&(_, i)| i)
    }

    fn insert(&mut self, lit: &str) {
        let mut node = 0;

        for ch in lit.chars() {
            node = match self.child(node, ch) {
                Some(i) => i,
                None    => {
                    let i = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.push((ch, i));
                    i
                },
            };
        }

        self.nodes[node].leaf = true;
    }
}

impl LiteralRule {
    /// Creates a rule matching any of the given literals.
    ///
    /// # Panics
    ///
    /// Panics if any literal is empty.
    pub fn new<I, S>(lits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match Self::try_new(lits) {
            Ok(rule) => rule,
            Err(e)   => panic!("invalid literal rule: {}", e),
        }
    }

    /// Creates a rule matching any of the given literals, or returns an
    /// error if any literal is empty.
    pub fn try_new<I, S>(lits: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new();

        for lit in lits {
            let lit = lit.as_ref();
            if lit.is_empty() {
                return Err(ConfigError::EmptyLiteral);
            }
            trie.insert(lit);
        }

        Ok(Self { trie: Arc::new(trie), skip: false, ty: None })
    }

    /// Returns a copy of the rule that skips (`true`) or keeps (`false`) the
    /// matched literal.
    pub fn with_skip(&self, skip: bool) -> Self {
        Self { skip, ..self.clone() }
    }

    /// Returns a copy of the rule that sets the given token type.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: Some(ty.into()), ..self.clone() }
    }

    /// Returns the length, in code points, of the longest literal at the
    /// current position of `s`, or `0` if none matches.  Does not consume
    /// input.
    pub fn longest_match(&self, s: &mut Scanner) -> usize {
        let mut node = 0;
        let mut good = 0;
        let mut i    = 0;

        while let Some(ch) = s.peek(i as isize) {
            node = match self.trie.child(node, ch) {
                Some(n) => n,
                None    => break,
            };
            i += 1;
            if self.trie.nodes[node].leaf {
                good = i;
            }
        }

        good
    }
}

impl Rule for LiteralRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        let n = self.longest_match(s);
        if n == 0 {
            return false;
        }

        if self.skip {
            s.repeat(n, Scanner::skip);
        } else {
            s.repeat(n, Scanner::keep);
        }

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
    use crate::rule_set::RuleSet;
    use crate::rules::tests::*;
    use crate::scanner::Scanner;
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new().with(LiteralRule::new(["=", "===", "+", "+=", "/"]))
    }

    #[test]
    fn literal() {
        assert_eq!( lex(&rules(), "="),   vec![tok("=", "=")]                  );
        assert_eq!( lex(&rules(), "==="), vec![tok("===", "===")]              );
        assert_eq!( lex(&rules(), "=="),  vec![tok("=", "="), tok("=", "=")]   );
        assert_eq!( lex(&rules(), "+=/"), vec![tok("+=", "+="), tok("/", "/")] );
    }

    #[test]
    fn literal_no_overrun() {
        let rule = LiteralRule::new(["abc"]);
        let mut s = Scanner::for_str("", "abx");

        assert_eq!( rule.eval(&mut s), false     );
        assert_eq!( s.this(),          Some('a') );
        assert_eq!( s.literal(),       ""        );
    }

    #[test]
    fn literal_skip() {
        let rule = LiteralRule::new(["0x", "0X"]).with_skip(true);
        let mut s = Scanner::for_str("", "0Xff");

        assert_eq!( rule.eval(&mut s), true      );
        assert_eq!( s.value(),         ""        );
        assert_eq!( s.literal(),       "0X"      );
        assert_eq!( s.this(),          Some('f') );
    }

    #[test]
    fn literal_with_type() {
        let rules = RuleSet::new().with(LiteralRule::new(["true", "false"]).with_type("bool"));

        assert_eq!( lex(&rules, "false"), vec![tok("bool", "false")] );
    }

    #[test]
    fn literal_empty() {
        assert_eq!( LiteralRule::try_new(["a", ""]).err(), Some(ConfigError::EmptyLiteral) );
    }

    #[test]
    fn literal_newline() {
        let rules = RuleSet::new().with(LiteralRule::new(["\n", "a"]));
        let tokens = scan_all(&rules, "a\na");

        assert_eq!( pairs(&tokens), vec![("a", "a"), ("\n", "\n"), ("a", "a")] );
        assert_eq!( tokens[2].pos.line, 2 );
    }
}
