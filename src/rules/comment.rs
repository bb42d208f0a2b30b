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

//! Comment rule.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::scanner::Scanner;
use crate::token::types;
use super::{LiteralRule, Rule};

// ----------------------------------------------------------------------------

/// Rule that matches a comment from a begin literal through an end literal.
///
/// A comment is dropped unless the rule holds a *keep* flag that is set when
/// the comment is scanned.  The flag is shared with the caller, who may
/// toggle it at any time.  A kept comment yields a token whose value is the
/// text between the delimiters.
///
#[derive(Clone, Debug)]
pub struct CommentRule {
    begin:       LiteralRule,
    end:         LiteralRule,
    consume_end: bool,
    ty:          String,
    keep:        Option<Arc<AtomicBool>>,
}

impl CommentRule {
    /// Creates a rule for comments from `begin` through `end`.  Reaching the
    /// end of text before `end` is an error.
    pub fn new(begin: LiteralRule, end: LiteralRule) -> Self {
        Self {
            begin:       begin.with_skip(true),
            end:         end.with_skip(true),
            consume_end: true,
            ty:          types::COMMENT.into(),
            keep:        None,
        }
    }

    /// Creates a rule for comments from `begin` through `end`.
    pub fn block(begin: &str, end: &str) -> Self {
        Self::new(LiteralRule::new([begin]), LiteralRule::new([end]))
    }

    /// Creates a rule for comments from `begin` to the end of the line.  The
    /// newline is not part of the comment.
    pub fn line(begin: &str) -> Self {
        Self {
            consume_end: false,
            ..Self::new(LiteralRule::new([begin]), LiteralRule::new(["\n"]))
        }
    }

    /// Returns a copy of the rule that sets the given token type for kept
    /// comments.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), ..self.clone() }
    }

    /// Returns a copy of the rule that keeps comments while `keep` is set.
    pub fn with_keep(&self, keep: Arc<AtomicBool>) -> Self {
        Self { keep: Some(keep), ..self.clone() }
    }

    fn keeps(&self) -> bool {
        self.keep.as_ref().map_or(false, |k| k.load(Ordering::Relaxed))
    }
}

impl Rule for CommentRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if !self.begin.eval(s) {
            return false;
        }

        let keep = self.keeps();

        loop {
            if !s.has_more() {
                if self.consume_end {
                    s.illegal(format_args!("unterminated comment"));
                }
                break;
            }

            let n = self.end.longest_match(s);
            if n > 0 {
                if self.consume_end {
                    s.repeat(n, Scanner::skip);
                }
                break;
            }

            if keep { s.keep() } else { s.skip() }
        }

        if keep && s.ty().is_empty() {
            s.set_type(self.ty.as_str());
        }
        true
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::class::{LETTER, WHITESPACE};
    use crate::rule_set::RuleSet;
    use crate::rules::ClassRule;
    use crate::rules::tests::*;
    use super::*;

    fn rules(keep: &Arc<AtomicBool>) -> RuleSet {
        RuleSet::new()
            .with_discards(WHITESPACE)
            .with(CommentRule::block("/*", "*/").with_keep(keep.clone()))
            .with(CommentRule::line("//").with_keep(keep.clone()))
            .with(ClassRule::new(LETTER).with_type(types::WORD))
    }

    #[test]
    fn comment_dropped() {
        let keep  = Arc::new(AtomicBool::new(false));
        let rules = rules(&keep);

        let tokens = scan_all(&rules, "abc // cde \n fgh");
        assert_eq!( pairs(&tokens), vec![("word", "abc"), ("word", "fgh")] );

        let tokens = scan_all(&rules, "abc /* cde \n fgh */ ijk");
        assert_eq!( pairs(&tokens),  vec![("word", "abc"), ("word", "ijk")] );
        assert_eq!( tokens[1].pos.to_string(), "2:9" );
    }

    #[test]
    fn comment_kept() {
        let keep  = Arc::new(AtomicBool::new(true));
        let rules = rules(&keep);

        let tokens = scan_all(&rules, "abc // cde \n fgh");
        assert_eq!(
            pairs(&tokens),
            vec![("word", "abc"), ("comment", " cde "), ("word", "fgh")]
        );
        assert_eq!( tokens[1].pos.to_string(), "1:5" );

        let tokens = scan_all(&rules, "abc /* cde \n fgh */ ijk");
        assert_eq!(
            pairs(&tokens),
            vec![("word", "abc"), ("comment", " cde \n fgh "), ("word", "ijk")]
        );
    }

    #[test]
    fn comment_toggle() {
        let keep  = Arc::new(AtomicBool::new(false));
        let rules = rules(&keep);

        assert_eq!( scan_all(&rules, "// x").len(), 0 );

        keep.store(true, Ordering::Relaxed);

        assert_eq!( lex(&rules, "// x"), vec![tok("comment", " x")] );
    }

    #[test]
    fn comment_line_at_end() {
        let keep = Arc::new(AtomicBool::new(false));

        assert_eq!( lex(&rules(&keep), "a // b"), vec![tok("word", "a")] );
    }

    #[test]
    fn comment_unterminated() {
        let keep   = Arc::new(AtomicBool::new(false));
        let tokens = scan_all(&rules(&keep), "/* abc");

        assert_eq!( pairs(&tokens),  vec![("illegal", "")]                     );
        assert_eq!( errors(&tokens), vec!["1:1: error: unterminated comment"] );
    }
}
