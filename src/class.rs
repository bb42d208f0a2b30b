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

//! Character classes.
//!
//! A [`Class`] is a predicate over a single code point.  Classes are
//! immutable; the combinators [`not`], [`or`], [`range`], and [`one_of`]
//! (and the `!` and `|` operators) build new classes from existing ones.
//!
//! ### Catalog
//!
//! Constant             | Members
//! ---------------------|:-------
//! [`ANY`]              | any code point
//! [`CURRENCY`]         | Unicode currency symbols (`Sc`)
//! [`DIGIT`]            | Unicode decimal digits (`Nd`)
//! [`DIGIT_01`]         | `0-1`
//! [`DIGIT_07`]         | `0-7`
//! [`DIGIT_09`]         | `0-9`
//! [`DIGIT_0F`]         | `0-9 A-F a-f`
//! [`LETTER`]           | Unicode letters (`L`)
//! [`LETTER_AZ`]        | `A-Z a-z`
//! [`LETTER_UNDER`]     | [`LETTER`] and `_`
//! [`LETTER_DIGIT_UNDER`] | [`LETTER`], [`DIGIT`], and `_`
//! [`NONE`]             | nothing
//! [`PRINTABLE`]        | Unicode graphic characters (`L M N P S`) and the ASCII space
//! [`RUNE8`]            | `U+0000-U+00FF`
//! [`RUNE16`]           | `U+0000-U+FFFF`
//! [`SIGN`]             | `+ -`
//! [`WHITESPACE`]       | Unicode white space

use std::fmt::{self, Debug, Formatter};
use std::ops::{BitOr, Not};
use std::sync::Arc;

use unicode_general_category::{get_general_category, GeneralCategory};

// ----------------------------------------------------------------------------

/// A predicate over a single code point.
///
/// Cloning a `Class` is cheap: composite classes share their members.
#[derive(Clone)]
pub struct Class(Repr);

#[derive(Clone)]
enum Repr {
    Never,
    Fn(fn(char) -> bool),
    One(char),
    Set(Arc<[char]>),
    Range(char, char),
    Not(Arc<Class>),
    Or(Arc<[Class]>),
    Closure(Arc<dyn Fn(char) -> bool + Send + Sync>),
}

impl Class {
    /// Creates a class from a function pointer.
    #[inline]
    pub const fn from_fn(f: fn(char) -> bool) -> Self {
        Self(Repr::Fn(f))
    }

    /// Creates a class from an arbitrary predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static
    {
        Self(Repr::Closure(Arc::new(f)))
    }

    /// Returns whether `ch` is a member of the class.
    pub fn contains(&self, ch: char) -> bool {
        match &self.0 {
            Repr::Never          => false,
            Repr::Fn(f)          => f(ch),
            Repr::One(c)         => ch == *c,
            Repr::Set(cs)        => cs.contains(&ch),
            Repr::Range(lo, hi)  => *lo <= ch && ch <= *hi,
            Repr::Not(c)         => !c.contains(ch),
            Repr::Or(cs)         => cs.iter().any(|c| c.contains(ch)),
            Repr::Closure(f)     => f(ch),
        }
    }

    /// Returns whether `ch` is a member of the class.  The end of text
    /// (`None`) is a member of no class.
    #[inline]
    pub fn matches(&self, ch: Option<char>) -> bool {
        ch.map_or(false, |ch| self.contains(ch))
    }
}

impl Default for Class {
    #[inline]
    fn default() -> Self {
        NONE
    }
}

impl From<char> for Class {
    #[inline]
    fn from(ch: char) -> Self {
        Self(Repr::One(ch))
    }
}

impl Not for Class {
    type Output = Class;

    #[inline]
    fn not(self) -> Class {
        not(self)
    }
}

impl BitOr for Class {
    type Output = Class;

    #[inline]
    fn bitor(self, rhs: Class) -> Class {
        or([self, rhs])
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.0 {
            Repr::Never         => f.write_str("Class::NONE"),
            Repr::Fn(_)         => f.write_str("Class(fn)"),
            Repr::One(c)        => write!(f, "Class({:?})", c),
            Repr::Set(cs)       => write!(f, "Class({:?})", cs),
            Repr::Range(lo, hi) => write!(f, "Class({:?}..={:?})", lo, hi),
            Repr::Not(c)        => write!(f, "!{:?}", c),
            Repr::Or(cs)        => f.debug_tuple("Or").field(cs).finish(),
            Repr::Closure(_)    => f.write_str("Class(closure)"),
        }
    }
}

// ----------------------------------------------------------------------------

/// Returns a class that matches code points *not* in `c`.
pub fn not(c: Class) -> Class {
    match c.0 {
        Repr::Not(inner) => (*inner).clone(),
        _                => Class(Repr::Not(Arc::new(c))),
    }
}

/// Returns a class that matches code points in any of the classes `cs`.
/// Members are tested in order; the first match wins.
pub fn or<I>(cs: I) -> Class
where
    I: IntoIterator<Item = Class>
{
    let cs: Vec<Class> = cs.into_iter().collect();
    match cs.len() {
        0 => NONE,
        1 => cs.into_iter().next().unwrap_or_default(),
        _ => Class(Repr::Or(cs.into())),
    }
}

/// Returns a class that matches code points between `lo` and `hi`, inclusive.
#[inline]
pub const fn range(lo: char, hi: char) -> Class {
    Class(Repr::Range(lo, hi))
}

/// Returns a class that matches exactly the given code points.
pub fn one_of(chars: &[char]) -> Class {
    match *chars {
        []   => NONE,
        [ch] => Class(Repr::One(ch)),
        _    => Class(Repr::Set(chars.into())),
    }
}

// ----------------------------------------------------------------------------

/// Matches any code point.
pub const ANY: Class = Class::from_fn(|_| true);

/// Matches Unicode currency symbols (general category `Sc`).
pub const CURRENCY: Class = Class::from_fn(is_currency);

/// Matches Unicode decimal digits (general category `Nd`).
pub const DIGIT: Class = Class::from_fn(is_digit);

/// Matches binary digits.
pub const DIGIT_01: Class = range('0', '1');

/// Matches octal digits.
pub const DIGIT_07: Class = range('0', '7');

/// Matches decimal digits.
pub const DIGIT_09: Class = range('0', '9');

/// Matches hexadecimal digits of either case.
pub const DIGIT_0F: Class = Class::from_fn(|c| c.is_ascii_hexdigit());

/// Matches Unicode letters (general category `L`).
pub const LETTER: Class = Class::from_fn(is_letter);

/// Matches the letters of the Latin alphabet.
pub const LETTER_AZ: Class = Class::from_fn(|c| c.is_ascii_alphabetic());

/// Matches Unicode letters and the underscore.
pub const LETTER_UNDER: Class = Class::from_fn(|c| c == '_' || is_letter(c));

/// Matches Unicode letters, decimal digits, and the underscore.
pub const LETTER_DIGIT_UNDER: Class = Class::from_fn(|c| {
    c == '_' || is_letter(c) || is_digit(c)
});

/// Matches nothing.
pub const NONE: Class = Class(Repr::Never);

/// Matches graphic characters (general categories `L`, `M`, `N`, `P`, and
/// `S`) and the ASCII space.
pub const PRINTABLE: Class = Class::from_fn(is_printable);

/// Matches code points representable in 8 bits.
pub const RUNE8: Class = range('\0', '\u{FF}');

/// Matches code points representable in 16 bits.
pub const RUNE16: Class = range('\0', '\u{FFFF}');

/// Matches the numeric sign symbols `+` and `-`.
pub const SIGN: Class = Class::from_fn(|c| c == '+' || c == '-');

/// Matches Unicode white space.
pub const WHITESPACE: Class = Class::from_fn(char::is_whitespace);

fn is_currency(c: char) -> bool {
    get_general_category(c) == GeneralCategory::CurrencySymbol
}

fn is_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    get_general_category(c) == GeneralCategory::DecimalNumber
}

fn is_letter(c: char) -> bool {
    use GeneralCategory::*;

    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    matches!(
        get_general_category(c),
        UppercaseLetter | LowercaseLetter | TitlecaseLetter | ModifierLetter | OtherLetter
    )
}

fn is_printable(c: char) -> bool {
    use GeneralCategory::*;

    if c.is_ascii() {
        return c == ' ' || c.is_ascii_graphic();
    }
    !matches!(
        get_general_category(c),
        SpaceSeparator | LineSeparator | ParagraphSeparator |
        Control | Format | Surrogate | PrivateUse | Unassigned
    )
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn class_any() {
        assert_eq!( ANY.contains('a'),      true  );
        assert_eq!( ANY.contains('4'),      true  );
        assert_eq!( ANY.matches(None),      false );
    }

    #[test]
    fn class_currency() {
        assert_eq!( CURRENCY.contains('$'), true  );
        assert_eq!( CURRENCY.contains('€'), true  );
        assert_eq!( CURRENCY.contains('!'), false );
    }

    #[test]
    fn class_digit() {
        assert_eq!( DIGIT.contains('1'),    true  );
        assert_eq!( DIGIT.contains('६'),    true  );
        assert_eq!( DIGIT.contains('V'),    false );
    }

    #[test]
    fn class_digit_decimal_only() {
        assert_eq!( DIGIT.contains('7'),    true  );
        assert_eq!( DIGIT.contains('٣'),    true  );
        assert_eq!( DIGIT.contains('²'),    false );
        assert_eq!( DIGIT.contains('½'),    false );
        assert_eq!( DIGIT.contains('Ⅻ'),    false );

        assert_eq!( LETTER_DIGIT_UNDER.contains('٣'), true  );
        assert_eq!( LETTER_DIGIT_UNDER.contains('²'), false );
    }

    #[test]
    fn class_digit_bases() {
        assert_eq!( DIGIT_01.contains('1'), true  );
        assert_eq!( DIGIT_01.contains('2'), false );
        assert_eq!( DIGIT_07.contains('7'), true  );
        assert_eq!( DIGIT_07.contains('8'), false );
        assert_eq!( DIGIT_09.contains('9'), true  );
        assert_eq!( DIGIT_09.contains('a'), false );
        assert_eq!( DIGIT_0F.contains('a'), true  );
        assert_eq!( DIGIT_0F.contains('A'), true  );
        assert_eq!( DIGIT_0F.contains('g'), false );
    }

    #[test]
    fn class_letters() {
        assert_eq!( LETTER.contains('á'),              true  );
        assert_eq!( LETTER.contains('%'),              false );
        assert_eq!( LETTER_AZ.contains('F'),           true  );
        assert_eq!( LETTER_AZ.contains('á'),           false );
        assert_eq!( LETTER_UNDER.contains('_'),        true  );
        assert_eq!( LETTER_UNDER.contains('4'),        false );
        assert_eq!( LETTER_DIGIT_UNDER.contains('4'),  true  );
        assert_eq!( LETTER.contains('\u{0903}'),       false );
        assert_eq!( LETTER.contains('Ⅻ'),              false );
    }

    #[test]
    fn class_none() {
        assert_eq!( NONE.contains('f'),     false );
        assert_eq!( NONE.contains('\0'),    false );
    }

    #[test]
    fn class_misc() {
        assert_eq!( PRINTABLE.contains(' '),    true  );
        assert_eq!( PRINTABLE.contains('\t'),   false );
        assert_eq!( PRINTABLE.contains('é'),    true  );
        assert_eq!( PRINTABLE.contains('\u{0301}'), true  );
        assert_eq!( PRINTABLE.contains('\u{00A0}'), false );
        assert_eq!( PRINTABLE.contains('\u{E000}'), false );
        assert_eq!( PRINTABLE.contains('\u{200B}'), false );
        assert_eq!( PRINTABLE.contains('\u{0378}'), false );
        assert_eq!( RUNE8.contains('\u{FF}'),   true  );
        assert_eq!( RUNE8.contains('\u{100}'),  false );
        assert_eq!( RUNE16.contains('\u{FFFF}'), true );
        assert_eq!( SIGN.contains('-'),         true  );
        assert_eq!( SIGN.contains('*'),         false );
        assert_eq!( WHITESPACE.contains(' '),   true  );
        assert_eq!( WHITESPACE.contains('n'),   false );
    }

    #[test]
    fn class_not() {
        let is_not_a = not('a'.into());

        assert_eq!( is_not_a.contains('a'), false );
        assert_eq!( is_not_a.contains('b'), true  );
    }

    #[test]
    fn class_or() {
        let letter_az = or([range('a', 'z'), range('A', 'Z')]);

        assert_eq!( letter_az.contains('f'), true  );
        assert_eq!( letter_az.contains('F'), true  );
        assert_eq!( letter_az.contains('4'), false );
    }

    #[test]
    fn class_operators() {
        let c = !DIGIT_09 | 'a'.into();

        assert_eq!( c.contains('a'), true  );
        assert_eq!( c.contains('x'), true  );
        assert_eq!( c.contains('5'), false );
    }

    #[test]
    fn class_range() {
        let digit = range('0', '9');

        assert_eq!( digit.contains('0'), true  );
        assert_eq!( digit.contains('9'), true  );
        assert_eq!( digit.contains('a'), false );
    }

    #[test]
    fn class_one_of() {
        let ab = one_of(&['a', 'b']);

        assert_eq!( ab.contains('a'), true  );
        assert_eq!( ab.contains('b'), true  );
        assert_eq!( ab.contains('c'), false );

        assert_eq!( one_of(&[]).contains('a'),    false );
        assert_eq!( one_of(&['a']).contains('a'), true  );
    }

    fn catalog() -> Vec<Class> {
        vec![
            ANY, CURRENCY, DIGIT, DIGIT_01, DIGIT_07, DIGIT_09, DIGIT_0F,
            LETTER, LETTER_AZ, LETTER_UNDER, LETTER_DIGIT_UNDER, NONE,
            PRINTABLE, RUNE8, RUNE16, SIGN, WHITESPACE,
            one_of(&['x', 'y', 'z']),
        ]
    }

    proptest! {
        #[test]
        fn class_not_not(ch in any::<char>(), i in 0usize..18) {
            let c = catalog().swap_remove(i);
            prop_assert_eq!(not(not(c.clone())).contains(ch), c.contains(ch));
            prop_assert_eq!(not(c.clone()).contains(ch), !c.contains(ch));
        }

        #[test]
        fn class_or_self(ch in any::<char>(), i in 0usize..18) {
            let c = catalog().swap_remove(i);
            prop_assert_eq!(or([c.clone()]).contains(ch),            c.contains(ch));
            prop_assert_eq!(or([c.clone(), c.clone()]).contains(ch), c.contains(ch));
        }
    }
}
