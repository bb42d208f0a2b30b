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

//! Go lexer configuration.
//!
//! Newlines are significant: a newline after a token that may end a
//! statement becomes a `;` token, and any other newline is dropped.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::class::{one_of, Class, DIGIT_0F, SIGN};
use crate::rule_set::RuleSet;
use crate::rules::*;
use crate::scanner::Scanner;
use crate::token::Token;

/// Token types specific to Go.
pub mod types {
    pub use crate::token::types::{COMMENT, IDENT, ILLEGAL, INT};

    pub const FLOAT:  &str = "float";
    pub const IMAG:   &str = "imag";
    pub const RUNE:   &str = "rune";
    pub const STRING: &str = "string";
}

/// Go keywords.  Each scans as a token whose type is the keyword itself.
pub const KEYWORDS: &[&str] = &[
    "break",       "case",        "chan",        "const",       "continue",
    "default",     "defer",       "else",        "fallthrough", "for",
    "func",        "go",          "goto",        "if",          "import",
    "interface",   "map",         "package",     "range",       "return",
    "select",      "struct",      "switch",      "type",        "var",
];

/// Go operators and punctuation, plus the newline.
pub const OPS_PUNCT: &[&str] = &[
    "+",  "&",  "+=",  "&=",  "&&", "==", "!=", "(", ")",
    "-",  "|",  "-=",  "|=",  "||", "<",  "<=", "[", "]",
    "*",  "^",  "*=",  "^=",  "<-", ">",  ">=", "{", "}",
    "/",  "<<", "/=",  "<<=", "++", "=",  ":=", ",", ";",
    "%",  ">>", "%=",  ">>=", "--", "!",  "...", ".", ":",
    "&^", "&^=", "~",
    "\n",
];

/// Token types after which a newline inserts a semicolon.
const SEMICOLON_AFTER: &[&str] = &[
    types::IDENT, types::INT, types::FLOAT, types::IMAG, types::RUNE, types::STRING,
    "break", "continue", "fallthrough", "return",
    "++", "--", ")", "]", "}",
];

// ----------------------------------------------------------------------------

/// Go lexer configuration.
pub struct Context {
    /// Whether comments are returned as tokens.  May be toggled between
    /// tokens.
    pub keep_comments: Arc<AtomicBool>,

    /// Rules for Go source text.
    pub rules: RuleSet,
}

impl Context {
    /// Creates a configuration that drops comments.
    pub fn new() -> Self {
        let keep_comments = Arc::new(AtomicBool::new(false));

        let rules = RuleSet::new()
            .with_discards(one_of(&[' ', '\t', '\r']))
            .with(CommentRule::block("/*", "*/").with_keep(keep_comments.clone()))
            .with(CommentRule::line("//")      .with_keep(keep_comments.clone()))
            .with(rune())
            .with(hex())
            .with(NumRule::oct_0o().with_int_type(types::INT).with_digit_sep('_'.into())
                .with_leading_digit_sep_allowed(true).with_suffix(imag))
            .with(NumRule::bin_0b().with_int_type(types::INT).with_digit_sep('_'.into())
                .with_leading_digit_sep_allowed(true).with_suffix(imag))
            .with(dec())
            .with(string())
            .with(StrRule::new('`', '`').with_type(types::STRING).with_multiline(true))
            .with(IdentRule::standard().with_keywords(KEYWORDS.iter().copied()))
            .with(LiteralRule::new(OPS_PUNCT.iter().copied()))
            .with_post_token_fn(insert_semicolon);

        Self { keep_comments, rules }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes in rune and string literals.  In strings, `\x` and octal escapes
/// denote raw bytes.
fn escapes(as_byte: bool) -> RuleSet {
    RuleSet::new()
        .with(CharEscapeRule::c_style())
        .with(HexEscapeRule::hex2().with_byte(as_byte))
        .with(HexEscapeRule::hex4())
        .with(HexEscapeRule::hex8())
        .with(OctEscapeRule::oct3().with_byte(as_byte))
}

fn rune() -> StrRule {
    StrRule::new('\'', '\'')
        .with_type(types::RUNE)
        .with_max_len(1)
        .with_escape('\\')
        .with_escape_rules(escapes(false))
}

fn string() -> StrRule {
    StrRule::double_quote()
        .with_type(types::STRING)
        .with_escape_rules(escapes(true))
}

/// Hexadecimal integers and floats, such as `0x1F` and `0x1.8p-3`.
fn hex() -> NumRule {
    NumRule::new(DIGIT_0F)
        .with_prefix(LiteralRule::new(["0x", "0X"]))
        .with_int_type(types::INT)
        .with_real_type(types::FLOAT)
        .with_dec_sep('.'.into())
        .with_exp(one_of(&['p', 'P']))
        .with_exp_sign(SIGN)
        .with_digit_sep(Class::from('_'))
        .with_leading_digit_sep_allowed(true)
        .with_suffix(imag)
}

/// Decimal integers and floats, such as `42`, `1_000`, and `6.67e-11`.
fn dec() -> NumRule {
    NumRule::real_exp()
        .with_int_type(types::INT)
        .with_real_type(types::FLOAT)
        .with_digit_sep(Class::from('_'))
        .with_suffix(imag)
}

/// Imaginary suffix `i`.
fn imag(s: &mut Scanner) -> bool {
    if s.this() != Some('i') {
        return false;
    }
    s.keep();
    s.set_type(types::IMAG);
    true
}

fn insert_semicolon(s: &mut Scanner, mut token: Token) -> Token {
    if token.ty != "\n" {
        return token;
    }

    let prev = s.prev_type();
    if !SEMICOLON_AFTER.iter().any(|&ty| ty == prev) {
        return Token::default();
    }

    token.ty    = ";".into();
    token.value = ";".into();
    token
}

// ----------------------------------------------------------------------------
