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

//! Numeric literal rule.
//!
//! ### Number format:
//!
//! ```text
//! [sign] [prefix] digits [dec-sep digits] [exp [exp-sign] digits] [suffix]
//! ─┬──── ─┬────── ─┬──── ─┬───────────── ─┬─────────────────── ─┬──────
//!  ├─ +   ├─ 0x    ├─ 1   ├─ .5           ├─ e10                └─ i
//!  └─ -   ├─ 0o    └─ 1,234               ├─ e+10
//!         └─ 0b                           └─ E-10
//! ```
//!
//! Each part is optional except the digits, and each is configured by a
//! [`Class`] or a [`Rule`].  A digit separator is consumed only between two
//! digits; it is skipped, so it appears in the token literal but not in its
//! value.

use std::sync::Arc;
use crate::class::{one_of, Class, DIGIT_01, DIGIT_07, DIGIT_09, DIGIT_0F, NONE, SIGN};
use crate::scanner::Scanner;
use crate::token::types;
use super::{LiteralRule, Rule};

// ----------------------------------------------------------------------------

/// Rule that matches a numeric literal.
///
/// The token type is `int`, or `real` if a decimal separator or an exponent
/// was consumed.  Both labels are configurable, and a fixed type set by
/// [`with_type`](Self::with_type) overrides either.  A suffix rule may set
/// the type again.
#[derive(Clone)]
pub struct NumRule {
    digit:             Class,
    sign:              Class,
    prefix:            Option<Arc<dyn Rule>>,
    digit_sep:         Class,
    dec_sep:           Class,
    exp:               Class,
    exp_sign:          Class,
    ty:                Option<String>,
    int_type:          String,
    real_type:         String,
    leading_digit_sep: bool,
    leading_zero:      bool,
    empty_parts:       bool,
    suffixes:          Vec<Arc<dyn Rule>>,
}

impl NumRule {
    /// Creates a rule for runs of digits in the given class.
    pub fn new(digit: Class) -> Self {
        Self {
            digit,
            sign:              NONE,
            prefix:            None,
            digit_sep:         NONE,
            dec_sep:           NONE,
            exp:               NONE,
            exp_sign:          NONE,
            ty:                None,
            int_type:          types::INT .into(),
            real_type:         types::REAL.into(),
            leading_digit_sep: false,
            leading_zero:      true,
            empty_parts:       true,
            suffixes:          Vec::new(),
        }
    }

    /// Binary digits; type `bin`.
    pub fn bin() -> Self {
        Self::new(DIGIT_01).with_type(types::BIN)
    }

    /// Binary digits after `0b` or `0B`; type `bin`.
    pub fn bin_0b() -> Self {
        Self::bin().with_prefix(LiteralRule::new(["0b", "0B"]))
    }

    /// Hexadecimal digits; type `hex`.
    pub fn hex() -> Self {
        Self::new(DIGIT_0F).with_type(types::HEX)
    }

    /// Hexadecimal digits after `0x` or `0X`; type `hex`.
    pub fn hex_0x() -> Self {
        Self::hex().with_prefix(LiteralRule::new(["0x", "0X"]))
    }

    /// Octal digits; type `oct`.
    pub fn oct() -> Self {
        Self::new(DIGIT_07).with_type(types::OCT)
    }

    /// Octal digits after `0o` or `0O`; type `oct`.
    pub fn oct_0o() -> Self {
        Self::oct().with_prefix(LiteralRule::new(["0o", "0O"]))
    }

    /// Decimal digits.
    pub fn int() -> Self {
        Self::new(DIGIT_09)
    }

    /// Decimal digits with an optional `.` fraction.
    pub fn real() -> Self {
        Self::int().with_dec_sep('.'.into())
    }

    /// Decimal digits with an optional `.` fraction and optional exponent.
    pub fn real_exp() -> Self {
        Self::real().with_exp(one_of(&['e', 'E'])).with_exp_sign(SIGN)
    }

    /// Like [`int`](Self::int), with an optional sign.
    pub fn signed_int() -> Self {
        Self::int().with_sign(SIGN)
    }

    /// Like [`real`](Self::real), with an optional sign.
    pub fn signed_real() -> Self {
        Self::real().with_sign(SIGN)
    }

    /// Like [`real_exp`](Self::real_exp), with an optional sign.
    pub fn signed_real_exp() -> Self {
        Self::real_exp().with_sign(SIGN)
    }

    /// Returns a copy of the rule that sets the given type regardless of
    /// which parts were consumed.
    pub fn with_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: Some(ty.into()), ..self.clone() }
    }

    /// Returns a copy of the rule that sets the given type for integers.
    pub fn with_int_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: None, int_type: ty.into(), ..self.clone() }
    }

    /// Returns a copy of the rule that sets the given type for numbers with
    /// a fraction or exponent.
    pub fn with_real_type(&self, ty: impl Into<String>) -> Self {
        Self { ty: None, real_type: ty.into(), ..self.clone() }
    }

    /// Returns a copy of the rule that accepts a leading sign in `sign`.
    pub fn with_sign(&self, sign: Class) -> Self {
        Self { sign, ..self.clone() }
    }

    /// Returns a copy of the rule that requires a prefix matched by `rule`.
    pub fn with_prefix(&self, rule: impl Rule + 'static) -> Self {
        Self { prefix: Some(Arc::new(rule)), ..self.clone() }
    }

    /// Returns a copy of the rule that accepts digit separators in `sep`.
    pub fn with_digit_sep(&self, sep: Class) -> Self {
        Self { digit_sep: sep, ..self.clone() }
    }

    /// Returns a copy of the rule that accepts decimal separators in `sep`.
    pub fn with_dec_sep(&self, sep: Class) -> Self {
        Self { dec_sep: sep, ..self.clone() }
    }

    /// Returns a copy of the rule that accepts exponent markers in `exp`.
    pub fn with_exp(&self, exp: Class) -> Self {
        Self { exp, ..self.clone() }
    }

    /// Returns a copy of the rule that accepts exponent signs in `sign`.
    pub fn with_exp_sign(&self, sign: Class) -> Self {
        Self { exp_sign: sign, ..self.clone() }
    }

    /// Returns a copy of the rule that allows (`true`) or forbids (`false`)
    /// a digit separator before the first digit.
    pub fn with_leading_digit_sep_allowed(&self, allowed: bool) -> Self {
        Self { leading_digit_sep: allowed, ..self.clone() }
    }

    /// Returns a copy of the rule that allows (`true`) or forbids (`false`)
    /// digits after a leading `0`.  When forbidden, a `0` not followed by a
    /// decimal separator or exponent is a complete number.
    pub fn with_leading_zero_allowed(&self, allowed: bool) -> Self {
        Self { leading_zero: allowed, ..self.clone() }
    }

    /// Returns a copy of the rule that allows (`true`) or forbids (`false`)
    /// a decimal separator without digits on both sides.
    pub fn with_empty_parts_allowed(&self, allowed: bool) -> Self {
        Self { empty_parts: allowed, ..self.clone() }
    }

    /// Returns a copy of the rule with an additional suffix rule.  Suffixes
    /// are tried in order after the number; the first that matches wins.
    pub fn with_suffix(&self, rule: impl Rule + 'static) -> Self {
        let mut r = self.clone();
        r.suffixes.push(Arc::new(rule));
        r
    }

    /// Scans digits and the separators between them.  Returns whether any
    /// digit was consumed.
    fn scan_digits(&self, s: &mut Scanner) -> bool {
        let mut seen = false;

        loop {
            if s.is(&self.digit) {
                seen = true;
                s.keep();
            } else if s.is(&self.digit_sep)
                && s.next_is(&self.digit)
                && self.digit.matches(s.peek(-1))
            {
                s.skip();
            } else {
                return seen;
            }
        }
    }

    fn finish(&self, s: &mut Scanner) {
        if let Some(ty) = &self.ty {
            s.set_type(ty.as_str());
        }
        for suffix in &self.suffixes {
            if suffix.eval(s) {
                break;
            }
        }
    }
}

impl Rule for NumRule {
    fn eval(&self, s: &mut Scanner) -> bool {
        if s.is(&self.sign) {
            s.keep();
        }

        if let Some(prefix) = &self.prefix {
            if !prefix.eval(s) {
                s.undo();
                return false;
            }
        }

        s.set_type(self.int_type.as_str());

        if self.leading_digit_sep && s.is(&self.digit_sep) && s.next_is(&self.digit) {
            s.skip();
        }

        if !self.leading_zero
            && s.this() == Some('0')
            && !s.next_is(&self.dec_sep)
            && !s.next_is(&self.exp)
        {
            s.keep();
            self.finish(s);
            return true;
        }

        let mut seen = self.scan_digits(s);

        if s.is(&self.dec_sep) && (self.empty_parts || (seen && s.next_is(&self.digit))) {
            s.set_type(self.real_type.as_str());
            s.keep();
            seen |= self.scan_digits(s);
        }

        if !seen {
            s.undo();
            return false;
        }

        if s.is(&self.exp) {
            let digit_follows = s.next_is(&self.digit)
                || (s.next_is(&self.exp_sign) && self.digit.matches(s.peek(2)));

            if digit_follows {
                s.set_type(self.real_type.as_str());
                s.keep();
                if s.is(&self.exp_sign) {
                    s.keep();
                }
                self.scan_digits(s);
            }
        }

        self.finish(s);
        true
    }
}

// ----------------------------------------------------------------------------
