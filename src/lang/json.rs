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

//! JSON lexer configuration.

use crate::class::one_of;
use crate::rule_set::RuleSet;
use crate::rules::*;

/// JSON punctuation and literal names.
pub const PUNCT: &[&str] = &["{", "}", "[", "]", ":", ",", "true", "false", "null"];

// ----------------------------------------------------------------------------

/// JSON lexer configuration.
pub struct Context {
    /// Rules for JSON text.
    pub rules: RuleSet,
}

impl Context {
    pub fn new() -> Self {
        let escapes = RuleSet::new()
            .with(CharEscapeRule::new([
                CharEnc::BACKSPACE,
                CharEnc::FORM_FEED,
                CharEnc::LINE_FEED,
                CharEnc::CARRIAGE_RETURN,
                CharEnc::HORIZONTAL_TAB,
                CharEnc::new('/', '/'),
            ]))
            .with(HexEscapeRule::hex4());

        let number = NumRule::real_exp()
            .with_sign('-'.into())
            .with_leading_zero_allowed(false)
            .with_empty_parts_allowed(false);

        let rules = RuleSet::new()
            .with_discards(one_of(&[' ', '\n', '\r', '\t']))
            .with(StrRule::double_quote().with_escape_rules(escapes))
            .with(number)
            .with(LiteralRule::new(PUNCT.iter().copied()));

        Self { rules }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::rules::tests::*;
    use super::*;

    #[test]
    fn literal_names() {
        let rules = Context::new().rules;

        assert_eq!( lex(&rules, "true"),  vec![tok("true",  "true")]  );
        assert_eq!( lex(&rules, "false"), vec![tok("false", "false")] );
        assert_eq!( lex(&rules, "null"),  vec![tok("null",  "null")]  );
    }

    #[test]
    fn punct() {
        let rules = Context::new().rules;

        assert_eq!(
            lex(&rules, "{ } [ ] : ,"),
            vec![
                tok("{", "{"), tok("}", "}"), tok("[", "["),
                tok("]", "]"), tok(":", ":"), tok(",", ","),
            ]
        );
    }

    #[test]
    fn strings() {
        let rules = Context::new().rules;

        assert_eq!( lex(&rules, r#""foo""#),    vec![tok("str", "foo")]      );
        assert_eq!( lex(&rules, r#""\n""#),     vec![tok("str", "\n")]       );
        assert_eq!( lex(&rules, r#""\\""#),     vec![tok("str", "\\")]       );
        assert_eq!( lex(&rules, r#""\/""#),     vec![tok("str", "/")]        );
        assert_eq!( lex(&rules, r#""\u12e4""#), vec![tok("str", "\u{12E4}")] );

        let tokens = scan_all(&rules, r#""foo"#);
        assert_eq!( pairs(&tokens),  vec![("illegal", "foo")]                );
        assert_eq!( errors(&tokens), vec!["1:1: error: unterminated string"] );

        let tokens = scan_all(&rules, r#""\a""#);
        assert_eq!( pairs(&tokens),  vec![("illegal", "a")]                                 );
        assert_eq!( errors(&tokens), vec![r#"1:1: error: invalid escape sequence: "\\a""#] );
    }

    #[test]
    fn numbers() {
        let rules = Context::new().rules;

        assert_eq!( lex(&rules, "0"),          vec![tok("int",  "0")]          );
        assert_eq!( lex(&rules, "42"),         vec![tok("int",  "42")]         );
        assert_eq!( lex(&rules, "72.40"),      vec![tok("real", "72.40")]      );
        assert_eq!( lex(&rules, "-72.40"),     vec![tok("real", "-72.40")]     );
        assert_eq!( lex(&rules, "-72.40e+10"), vec![tok("real", "-72.40e+10")] );
        assert_eq!( lex(&rules, "042"),        vec![tok("int",  "0"), tok("int", "42")] );
    }

    #[test]
    fn numbers_illegal() {
        let rules = Context::new().rules;

        let tokens = scan_all(&rules, "42.");
        assert_eq!( pairs(&tokens),  vec![("int", "42"), ("illegal", ".")] );
        assert_eq!( errors(&tokens), vec![r#"1:3: error: unexpected ".""#] );

        let tokens = scan_all(&rules, "+72.40");
        assert_eq!( pairs(&tokens),  vec![("illegal", "+"), ("real", "72.40")] );
        assert_eq!( errors(&tokens), vec![r#"1:1: error: unexpected "+""#]     );

        let tokens = scan_all(&rules, "-72.40e");
        assert_eq!( pairs(&tokens),  vec![("real", "-72.40"), ("illegal", "e")] );
        assert_eq!( errors(&tokens), vec![r#"1:7: error: unexpected "e""#]      );

        let tokens = scan_all(&rules, "-e");
        assert_eq!( pairs(&tokens), vec![("illegal", "-"), ("illegal", "e")] );
        assert_eq!(
            errors(&tokens),
            vec![r#"1:1: error: unexpected "-""#, r#"1:2: error: unexpected "e""#]
        );
    }

    #[test]
    fn document() {
        let rules  = Context::new().rules;
        let tokens = scan_all(&rules, "{\n  \"a\": [1, -2.5e3, true]\n}");

        assert_eq!(
            pairs(&tokens),
            vec![
                ("{", "{"), ("str", "a"), (":", ":"), ("[", "["),
                ("int", "1"), (",", ","), ("real", "-2.5e3"), (",", ","),
                ("true", "true"), ("]", "]"), ("}", "}"),
            ]
        );
        assert_eq!( tokens[1].pos.to_string(),  "2:3" );
        assert_eq!( tokens[10].pos.to_string(), "3:1" );
    }
}
