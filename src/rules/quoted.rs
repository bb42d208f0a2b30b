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

//! Quoted string rule.

use crate::message::ConfigError;
use crate::rule_set::RuleSet;
use crate::scanner::Scanner;
use crate::token::types;
use super::Rule;

// ----------------------------------------------------------------------------

/// Rule that matches a string between a begin and an end delimiter.
///
/// The delimiters are skipped: they appear in the token literal but not in
/// its value.  After an escape flag, an escaped end delimiter or flag is
/// kept as-is, and anything else is handed to the escape rules.
///
/// Malformed content does not stop the scan.  An invalid escape sequence or
/// a string that exceeds the maximum length raises a diagnostic, and the
/// rule then resynchronizes by consuming input through the next end
/// delimiter.  The result is a single `illegal` token.
///
#[derive(Clone)]
pub struct StrRule {
    ty:        String,
    begin:     char,
    end:       char,
    escape:    Option<char>,
    escapes:   RuleSet,
    multiline: bool,
    max_len:   Option<usize>,
    nested:    bool,
}

impl StrRule {
    /// Creates a rule for strings between `begin` and `end`, without escapes.
    pub fn new(begin: char, end: char) -> Self {
        Self {
            ty:        types::STR.into(),
            begin,
            end,
            escape:    None,
            escapes:   RuleSet::new(),
            multiline: false,
            max_len:   None,
            nested:    false,
        }
    }

    /// Creates a rule for `"`-delimited strings with `\` as escape flag.
    pub fn double_quote() -> Self {
        Self::new('"', '"').with_escape('\\')
    }

    /// Creates a rule for `'`-delimited strings with `\` as escape flag.
    pub fn single_quote() -> Self {
        Self::new('\'', '\'').with_escape('\\')
    }

    /// Returns a copy of the rule that sets the given token type.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), ..self.clone() }
    }

    /// Returns a copy of the rule that uses `flag` to introduce escapes.
    pub fn with_escape(&self, flag: char) -> Self {
        Self { escape: Some(flag), ..self.clone() }
    }

    /// Returns a copy of the rule that decodes escapes with the given rules.
    pub fn with_escape_rules(&self, escapes: RuleSet) -> Self {
        Self { escapes, ..self.clone() }
    }

    /// Returns a copy of the rule that allows (`true`) or forbids (`false`)
    /// newlines in the string.
    pub fn with_multiline(&self, multiline: bool) -> Self {
        Self { multiline, ..self.clone() }
    }

    /// Returns a copy of the rule that limits the string to `n` decoded
    /// characters.
    pub fn with_max_len(&self, n: usize) -> Self {
        Self { max_len: Some(n), ..self.clone() }
    }

    /// Returns a copy of the rule that pairs inner begin and end delimiters.
    ///
    /// # Panics
    ///
    /// Panics if `nested` is `true` and the delimiters are identical.
    pub fn with_nesting(&self, nested: bool) -> Self {
        match self.try_with_nesting(nested) {
            Ok(rule) => rule,
            Err(e)   => panic!("invalid string rule: {}", e),
        }
    }

    /// Like [`with_nesting`](Self::with_nesting), but returns an error
    /// instead of panicking.
    pub fn try_with_nesting(&self, nested: bool) -> Result<Self, ConfigError> {
        if nested && self.begin == self.end {
            return Err(ConfigError::NestingDelimiters(self.begin));
        }
        Ok(Self { nested, ..self.clone() })
    }

    fn is_escape(&self, ch: Option<char>) -> bool {
        ch.is_some() && ch == self.escape
    }

    fn unterminated(s: &mut Scanner) {
        s.illegal(format_args!("unterminated string"));
    }

    /// Consumes input with `action` through the next end delimiter, which is
    /// skipped.  Stops early at the end of the line or text.  An escaped
    /// newline still ends the line.
    fn recover<'a>(&self, s: &mut Scanner<'a>, action: fn(&mut Scanner<'a>)) {
        loop {
            match s.this() {
                None => {
                    return Self::unterminated(s);
                },
                Some('\n') if !self.multiline => {
                    return Self::unterminated(s);
                },
                Some(ch) if ch == self.end => {
                    return s.skip();
                },
                ch if self.is_escape(ch) => {
                    action(s);
                    if self.multiline || s.this() != Some('\n') {
                        action(s);
                    }
                },
                Some(_) => {
                    action(s);
                },
            }
        }
    }
}

impl Rule for StrRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if s.this() != Some(self.begin) {
            return false;
        }
        s.skip();
        s.set_type(self.ty.as_str());

        let mut depth = 0usize;
        let mut len   = 0usize;

        loop {
            let ch = match s.this() {
                Some(ch) => ch,
                None     => { Self::unterminated(s); return true },
            };

            if ch == self.end && depth == 0 {
                s.skip();
                return true;
            }

            if ch == '\n' && !self.multiline {
                Self::unterminated(s);
                return true;
            }

            if self.max_len == Some(len) {
                s.illegal(format_args!("too many characters ({})", len + 1));
                self.recover(s, Scanner::skip);
                return true;
            }

            if self.is_escape(Some(ch)) {
                let diags = s.diagnostic_count();
                s.skip();

                let next = s.this();
                if next == Some(self.end) || self.is_escape(next) {
                    s.keep();
                } else if !self.escapes.eval(s) {
                    let seq: String = [Some(ch), next].iter().flatten().collect();
                    s.illegal(format_args!("invalid escape sequence: {:?}", seq));
                }

                if s.diagnostic_count() > diags {
                    self.recover(s, Scanner::keep);
                    return true;
                }
            } else {
                if self.nested {
                    if ch == self.begin {
                        depth += 1;
                    } else if ch == self.end {
                        depth -= 1;
                    }
                }
                s.keep();
            }

            len += 1;
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::class::WHITESPACE;
    use crate::rule_set::RuleSet;
    use crate::rules::tests::*;
    use super::*;

    fn rules(rule: StrRule) -> RuleSet {
        RuleSet::new().with_discards(WHITESPACE).with(rule)
    }

    #[test]
    fn str_double_quote() {
        let rules = rules(StrRule::double_quote());

        assert_eq!( lex(&rules, r#""abc""#),    vec![tok("str", "abc")] );
        assert_eq!( lex(&rules, r#""a\"b""#),   vec![tok("str", "a\"b")] );
        assert_eq!( lex(&rules, r#""a\\b""#),   vec![tok("str", "a\\b")] );
        assert_eq!( lex(&rules, r#""""#),       vec![tok("str", "")]    );
        assert_eq!( lex(&rules, r#""日本語""#), vec![tok("str", "日本語")] );
    }

    #[test]
    fn str_literal() {
        let tokens = scan_all(&rules(StrRule::double_quote()), r#""a\"b""#);

        assert_eq!( tokens[0].literal, r#""a\"b""# );
    }

    #[test]
    fn str_single_quote() {
        let rules = rules(StrRule::single_quote());

        assert_eq!( lex(&rules, r"'abc'"), vec![tok("str", "abc")] );
        assert_eq!( lex(&rules, r"'\''"),  vec![tok("str", "'")]   );
    }

    #[test]
    fn str_unterminated() {
        let tokens = scan_all(&rules(StrRule::double_quote()), r#""abc"#);

        assert_eq!( pairs(&tokens),  vec![("illegal", "abc")]                  );
        assert_eq!( errors(&tokens), vec!["1:1: error: unterminated string"]   );
    }

    #[test]
    fn str_unterminated_at_newline() {
        let tokens = scan_all(&rules(StrRule::double_quote()), "\"abc\n\"x\"");

        assert_eq!( pairs(&tokens), vec![("illegal", "abc"), ("str", "x")] );
        assert_eq!( tokens[1].pos.line, 2 );
    }

    #[test]
    fn str_multiline() {
        let rules = rules(StrRule::new('`', '`').with_multiline(true));

        assert_eq!( lex(&rules, "`a\nb`"),    vec![tok("str", "a\nb")]    );
        assert_eq!( lex(&rules, "`\\n\n\\n`"), vec![tok("str", "\\n\n\\n")] );
    }

    #[test]
    fn str_invalid_escape_recovers() {
        let tokens = scan_all(&rules(StrRule::double_quote()), r#""a\kbc" "d""#);

        assert_eq!( pairs(&tokens),  vec![("illegal", "akbc"), ("str", "d")]           );
        assert_eq!( errors(&tokens), vec![r#"1:1: error: invalid escape sequence: "\\k""#] );
    }

    #[test]
    fn str_recovery_stops_at_escaped_newline() {
        let tokens = scan_all(&rules(StrRule::double_quote()), "\"a\\k\\\nb\" c\"");

        assert_eq!(
            pairs(&tokens),
            vec![("illegal", "ak\\"), ("illegal", "b"), ("str", " c")]
        );
        assert_eq!(
            errors(&tokens),
            vec![
                r#"1:1: error: invalid escape sequence: "\\k""#,
                r#"1:1: error: unterminated string"#,
                r#"2:1: error: unexpected "b""#,
            ]
        );
        assert_eq!( tokens[2].pos.line, 2 );
    }

    #[test]
    fn str_max_len() {
        let rules = rules(StrRule::single_quote().with_max_len(1).with_type("rune"));
        let tokens = scan_all(&rules, "'a' 'aa' 'b'");

        assert_eq!( pairs(&tokens),  vec![("rune", "a"), ("illegal", "a"), ("rune", "b")] );
        assert_eq!( errors(&tokens), vec!["1:5: error: too many characters (2)"]          );
        assert_eq!( tokens[1].literal, "'aa'" );
    }

    #[test]
    fn str_nested() {
        let rules = rules(StrRule::new('(', ')').with_nesting(true));

        assert_eq!( lex(&rules, "(a(b)c)"), vec![tok("str", "a(b)c")] );
        assert_eq!( lex(&rules, "(a(b)c"),  vec![tok("illegal", "a(b)c")] );
    }

    #[test]
    fn str_nesting_requires_distinct_delimiters() {
        assert_eq!(
            StrRule::double_quote().try_with_nesting(true).err(),
            Some(ConfigError::NestingDelimiters('"'))
        );
    }

    #[test]
    #[should_panic(expected = "nested strings require distinct delimiters")]
    fn str_nesting_panic() {
        StrRule::single_quote().with_nesting(true);
    }

    #[test]
    fn str_no_match() {
        let rule = StrRule::double_quote();
        let mut s = crate::Scanner::for_str("", "abc");

        assert_eq!( rule.eval(&mut s), false     );
        assert_eq!( s.this(),          Some('a') );
    }
}
