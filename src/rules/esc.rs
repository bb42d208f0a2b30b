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

//! Escape-decoding rules.
//!
//! These rules run after a string rule has skipped the escape flag (usually
//! `\`).  Each decodes one kind of escape sequence into the token value.
//!
//! ### Character Escapes
//!
//! Constant                      | Sequence | Decodes to
//! ------------------------------|----------|:-----------
//! [`CharEnc::ALERT`]            | `\a`     | `U+0007` bell, alert
//! [`CharEnc::BACKSPACE`]        | `\b`     | `U+0008` backspace
//! [`CharEnc::HORIZONTAL_TAB`]   | `\t`     | `U+0009` horizontal tab
//! [`CharEnc::LINE_FEED`]        | `\n`     | `U+000A` line feed, newline
//! [`CharEnc::VERTICAL_TAB`]     | `\v`     | `U+000B` vertical tab
//! [`CharEnc::FORM_FEED`]        | `\f`     | `U+000C` form feed
//! [`CharEnc::CARRIAGE_RETURN`]  | `\r`     | `U+000D` carriage return
//!
//! ### Numeric Escapes
//!
//! Rule                        | Sequence     | Decodes to
//! ----------------------------|--------------|:-----------
//! [`HexEscapeRule::hex2()`]   | `\xHH`       | code point, or raw byte
//! [`HexEscapeRule::hex4()`]   | `\uHHHH`     | code point
//! [`HexEscapeRule::hex8()`]   | `\UHHHHHHHH` | code point
//! [`OctEscapeRule::oct3()`]   | `\OOO`       | code point, or raw byte

use std::collections::HashMap;
use std::sync::Arc;
use crate::class::DIGIT_07;
use crate::message::ConfigError;
use crate::scanner::Scanner;
use super::Rule;

// ----------------------------------------------------------------------------

/// Mapping of an escape code point to the code point it stands for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CharEnc {
    pub from: char,
    pub to:   char,
}

impl CharEnc {
    pub const ALERT:           Self = Self::new('a', '\x07');
    pub const BACKSPACE:       Self = Self::new('b', '\x08');
    pub const FORM_FEED:       Self = Self::new('f', '\x0C');
    pub const LINE_FEED:       Self = Self::new('n', '\n'  );
    pub const CARRIAGE_RETURN: Self = Self::new('r', '\r'  );
    pub const HORIZONTAL_TAB:  Self = Self::new('t', '\t'  );
    pub const VERTICAL_TAB:    Self = Self::new('v', '\x0B');

    /// Creates a mapping of `from` to `to`.
    #[inline]
    pub const fn new(from: char, to: char) -> Self {
        Self { from, to }
    }
}

/// Rule that decodes single-character escapes through a fixed table.
#[derive(Clone, Debug)]
pub struct CharEscapeRule {
    map: Arc<HashMap<char, char>>,
}

impl CharEscapeRule {
    /// Creates a rule from the given mappings.
    pub fn new<I>(encs: I) -> Self
    where
        I: IntoIterator<Item = CharEnc>
    {
        let map = encs.into_iter().map(|e| (e.from, e.to)).collect();
        Self { map: Arc::new(map) }
    }

    /// Creates a rule for the seven escapes common to C-like languages.
    pub fn c_style() -> Self {
        Self::new([
            CharEnc::ALERT,
            CharEnc::BACKSPACE,
            CharEnc::FORM_FEED,
            CharEnc::LINE_FEED,
            CharEnc::CARRIAGE_RETURN,
            CharEnc::HORIZONTAL_TAB,
            CharEnc::VERTICAL_TAB,
        ])
    }
}

impl Rule for CharEscapeRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        let to = match s.this().and_then(|ch| self.map.get(&ch)) {
            Some(&to) => to,
            None      => return false,
        };

        s.push_value(to);
        s.skip();
        true
    }
}

// ----------------------------------------------------------------------------

/// Rule that decodes a flag code point followed by a fixed count of
/// hexadecimal digits.
///
/// The decoded value must be a valid code point, or, in raw-byte mode, a
/// byte.  Malformed digits raise an `invalid encoding` diagnostic and are
/// left unconsumed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HexEscapeRule {
    flag:    char,
    digits:  usize,
    as_byte: bool,
}

impl HexEscapeRule {
    /// Creates a rule for `flag` followed by exactly `digits` hex digits.
    ///
    /// # Panics
    ///
    /// Panics if `digits` is not 2, 4, or 8.
    pub fn new(flag: char, digits: usize) -> Self {
        match Self::try_new(flag, digits) {
            Ok(rule) => rule,
            Err(e)   => panic!("invalid hex escape rule: {}", e),
        }
    }

    /// Creates a rule for `flag` followed by exactly `digits` hex digits, or
    /// returns an error if `digits` is not 2, 4, or 8.
    pub fn try_new(flag: char, digits: usize) -> Result<Self, ConfigError> {
        match digits {
            2 | 4 | 8 => Ok(Self { flag, digits, as_byte: false }),
            _         => Err(ConfigError::HexWidth(digits)),
        }
    }

    /// `\xHH`
    pub fn hex2() -> Self {
        Self { flag: 'x', digits: 2, as_byte: false }
    }

    /// `\uHHHH`
    pub fn hex4() -> Self {
        Self { flag: 'u', digits: 4, as_byte: false }
    }

    /// `\UHHHHHHHH`
    pub fn hex8() -> Self {
        Self { flag: 'U', digits: 8, as_byte: false }
    }

    /// Returns a copy of the rule that writes the decoded value to the token
    /// value as a raw byte (`true`) or as a code point (`false`).
    ///
    /// # Panics
    ///
    /// Panics if `as_byte` is `true` and the rule reads more than 2 digits.
    pub fn with_byte(self, as_byte: bool) -> Self {
        match self.try_with_byte(as_byte) {
            Ok(rule) => rule,
            Err(e)   => panic!("invalid hex escape rule: {}", e),
        }
    }

    /// Like [`with_byte`](Self::with_byte), but returns an error instead of
    /// panicking.
    pub fn try_with_byte(self, as_byte: bool) -> Result<Self, ConfigError> {
        if as_byte && self.digits != 2 {
            return Err(ConfigError::ByteWidth(self.digits));
        }
        Ok(Self { as_byte, ..self })
    }
}

impl Rule for HexEscapeRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if s.this() != Some(self.flag) {
            return false;
        }
        s.skip();

        let digits = peek_digits(s, self.digits, 16);

        let n = match u32::from_str_radix(&digits, 16) {
            Ok(n) if digits.len() == self.digits => n,
            _ => {
                s.illegal(format_args!("invalid encoding: {:?}", digits));
                return true;
            },
        };

        if self.as_byte {
            s.repeat(self.digits, Scanner::skip);
            s.push_value_byte(n as u8);
            return true;
        }

        match char::from_u32(n) {
            Some(ch) => {
                s.repeat(self.digits, Scanner::skip);
                s.push_value(ch);
            },
            None => {
                s.illegal(format_args!("invalid encoding: {:?}", digits));
            },
        }
        true
    }
}

// ----------------------------------------------------------------------------

/// Rule that decodes exactly three octal digits with a value up to `0o377`.
///
/// Malformed or out-of-range digits raise an `invalid encoding` diagnostic
/// and are left unconsumed.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct OctEscapeRule {
    as_byte: bool,
}

impl OctEscapeRule {
    /// `\OOO`
    pub fn oct3() -> Self {
        Self::default()
    }

    /// Returns a copy of the rule that writes the decoded value to the token
    /// value as a raw byte (`true`) or as a code point (`false`).
    pub fn with_byte(self, as_byte: bool) -> Self {
        Self { as_byte }
    }
}

impl Rule for OctEscapeRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if !s.is(&DIGIT_07) {
            return false;
        }

        let digits = peek_digits(s, 3, 8);

        let n = match u8::from_str_radix(&digits, 8) {
            Ok(n) if digits.len() == 3 => n,
            _ => {
                s.illegal(format_args!("invalid encoding: {:?}", digits));
                return true;
            },
        };

        s.repeat(3, Scanner::skip);
        if self.as_byte {
            s.push_value_byte(n);
        } else {
            s.push_value(n as char);
        }
        true
    }
}

/// Returns up to `n` upcoming digits of the given radix, without consuming
/// them.
fn peek_digits(s: &mut Scanner, n: usize, radix: u32) -> String {
    (0..n as isize)
        .map_while(|i| s.peek(i).filter(|c| c.is_digit(radix)))
        .collect()
}

// ----------------------------------------------------------------------------
