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

//! Scanner: the mutable state of one scan.

use std::borrow::Cow;
use std::fmt::Arguments;
use std::io::{BufRead, BufReader, Read};
use std::mem::take;
use tracing::{trace, warn};

use crate::class::Class;
use crate::input::Cursor;
use crate::message::Diagnostic;
use crate::pos::Pos;
use crate::token::{types, Token};

/// Count of consecutive empty, zero-progress emits after which a scan is
/// considered stuck.
const MAX_STALLS: usize = 16;

// ----------------------------------------------------------------------------

/// Mutable state of a scan over one input.
///
/// A `Scanner` exposes the current code point ([`this`](Self::this)) and one
/// code point of lookahead ([`lookahead`](Self::lookahead)), and accumulates
/// the in-progress token in two buffers:
///
/// - the *value*, which receives [kept](Self::keep) code points and decoded
///   escapes, and
/// - the *literal*, which receives every consumed code point, whether
///   [kept](Self::keep) or [skipped](Self::skip).
///
/// [`emit`](Self::emit) turns the buffers into a [`Token`] and resets them.
/// [`undo`](Self::undo) returns everything consumed since the last emit to
/// the input.
///
pub struct Scanner<'a> {
    this:      Option<char>,
    next:      Option<char>,
    value:     Vec<u8>,
    literal:   String,
    ty:        String,
    diags:     Vec<Diagnostic>,
    src:       Cursor<Box<dyn BufRead + 'a>>,
    src_err:   Option<Diagnostic>,
    this_pos:  Pos,
    tok_pos:   Pos,
    prev_type: String,
    stalls:    usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the given byte source.  The `name` appears in
    /// token positions; it may be empty.
    pub fn new<R: Read + 'a>(name: &str, src: R) -> Self {
        let src: Box<dyn BufRead + 'a> = Box::new(BufReader::new(src));

        let mut s = Self {
            this:      None,
            next:      None,
            value:     Vec::new(),
            literal:   String::new(),
            ty:        String::new(),
            diags:     Vec::new(),
            src:       Cursor::new(src),
            src_err:   None,
            this_pos:  Pos::start(name),
            tok_pos:   Pos::start(name),
            prev_type: String::new(),
            stalls:    0,
        };

        s.this = s.read_src();
        if s.this.is_some() {
            s.next = s.read_src();
        }
        s
    }

    /// Creates a scanner over the given string.
    #[inline]
    pub fn for_str(name: &str, src: &'a str) -> Self {
        Self::new(name, src.as_bytes())
    }

    /// Creates a scanner over the given bytes.
    #[inline]
    pub fn for_bytes(name: &str, src: &'a [u8]) -> Self {
        Self::new(name, src)
    }

    // ---- Queries -----------------------------------------------------------

    /// Returns whether any input remains to be consumed.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.this.is_some()
    }

    /// Returns the current code point, or `None` at the end of text.
    #[inline]
    pub fn this(&self) -> Option<char> {
        self.this
    }

    /// Returns the code point after the current one, or `None`.
    #[inline]
    pub fn lookahead(&self) -> Option<char> {
        self.next
    }

    /// Returns whether the current code point is in the given class.
    #[inline]
    pub fn is(&self, class: &Class) -> bool {
        class.matches(self.this)
    }

    /// Returns whether the code point after the current one is in the given
    /// class.
    #[inline]
    pub fn next_is(&self, class: &Class) -> bool {
        class.matches(self.next)
    }

    /// Returns a code point relative to the current one.
    ///
    /// - `peek(0)` is the current code point.
    /// - `peek(1)` is the lookahead.
    /// - `peek(i)` for `i > 1` looks further ahead without consuming.
    /// - `peek(-1)` is the code point most recently consumed into the
    ///   literal of the in-progress token; `peek(-2)` the one before, etc.
    ///
    /// Returns `None` for positions beyond either end.
    pub fn peek(&mut self, i: isize) -> Option<char> {
        match i {
            0            => self.this,
            1            => self.next,
            i if i > 1   => self.src.peek_at(i as usize - 2),
            i            => self.literal.chars().rev().nth((-i - 1) as usize),
        }
    }

    /// Returns the value accumulated so far for the in-progress token.
    /// Bytes that do not form valid UTF-8 appear as U+FFFD.
    #[inline]
    pub fn value(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Returns the raw bytes of the value accumulated so far.
    #[inline]
    pub fn value_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns the literal accumulated so far for the in-progress token.
    #[inline]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the type of the in-progress token, or `""` if unset.
    #[inline]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Sets the type of the in-progress token.
    #[inline]
    pub fn set_type(&mut self, ty: impl Into<String>) {
        self.ty = ty.into();
    }

    /// Returns the count of diagnostics raised for the in-progress token.
    #[inline]
    pub fn diagnostic_count(&self) -> usize {
        self.diags.len()
    }

    /// Returns the position of the current code point.
    #[inline]
    pub fn pos(&self) -> &Pos {
        &self.this_pos
    }

    /// Returns the start position of the in-progress token.
    #[inline]
    pub fn token_pos(&self) -> &Pos {
        &self.tok_pos
    }

    /// Returns the type of the token most recently returned by
    /// [`RuleSet::next`](crate::RuleSet::next), or `""` if none.  Comment
    /// tokens are not counted.
    #[inline]
    pub fn prev_type(&self) -> &str {
        &self.prev_type
    }

    /// Records the type of the most recently returned token.
    #[inline]
    pub fn set_prev_type(&mut self, ty: impl Into<String>) {
        self.prev_type = ty.into();
    }

    // ---- Consumption -------------------------------------------------------

    /// Appends the current code point to both value and literal, then
    /// advances.  Does nothing at the end of text.
    pub fn keep(&mut self) {
        if let Some(ch) = self.this {
            self.push_value(ch);
            self.literal.push(ch);
            self.advance();
        }
    }

    /// Appends the current code point to the literal only, then advances.
    /// Does nothing at the end of text.
    pub fn skip(&mut self) {
        if let Some(ch) = self.this {
            self.literal.push(ch);
            self.advance();
        }
    }

    /// Advances past the current code point without recording it anywhere,
    /// then starts a new token at the new position.  Anything accumulated for
    /// the in-progress token is dropped, including diagnostics.
    pub fn discard(&mut self) {
        if self.has_more() {
            self.advance();
        }
        self.reset();
    }

    /// Appends a code point to the value without consuming input.
    #[inline]
    pub fn push_value(&mut self, ch: char) {
        let mut buf = [0; 4];
        self.value.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
    }

    /// Appends a raw byte to the value without consuming input.
    #[inline]
    pub fn push_value_byte(&mut self, b: u8) {
        self.value.push(b);
    }

    /// Returns everything consumed since the last emit to the input and
    /// resets the in-progress token.
    ///
    /// After `undo`, the scanner is in the same state as immediately after
    /// the last [`emit`](Self::emit): same position, same current and
    /// upcoming code points.
    pub fn undo(&mut self) {
        let chs: Vec<char> = self.literal.chars().rev().collect();

        for ch in chs {
            if let Some(next) = self.next {
                self.src.unread(next);
            }
            if self.this.is_some() {
                self.next = self.this;
            }
            self.this = Some(ch);
        }

        self.this_pos = self.tok_pos.clone();
        self.value  .clear();
        self.literal.clear();
        self.ty     .clear();
        self.diags  .clear();
    }

    /// Marks the in-progress token as illegal and raises a diagnostic at its
    /// start position.  Does not consume input.
    pub fn illegal(&mut self, args: Arguments) {
        self.ty = types::ILLEGAL.into();
        self.diags.push(Diagnostic::new(self.tok_pos.clone(), args.to_string()));
    }

    /// Returns the in-progress token and starts a new one at the current
    /// position.
    ///
    /// If nothing was consumed, the token reports a pending failure of the
    /// byte source (type `error`) if there is one, or else the end of text
    /// (type `end`) if no input remains.  A token whose type was never set
    /// takes its value as its type.
    ///
    /// # Panics
    ///
    /// Panics if too many consecutive tokens are emitted without consuming
    /// input.  This indicates a rule that matches without advancing.
    pub fn emit(&mut self) -> Token {
        if self.literal.is_empty() {
            if let Some(err) = self.src_err.take() {
                let mut diags = take(&mut self.diags);
                diags.push(err);
                let token = Token {
                    value:   String::new(),
                    literal: String::new(),
                    ty:      types::ERROR.into(),
                    pos:     self.tok_pos.clone(),
                    diags,
                };
                self.reset();
                trace!(%token, "emit");
                return token;
            }
            if self.this.is_none() {
                self.ty = types::END.into();
            }
        }

        let value = match String::from_utf8(take(&mut self.value)) {
            Ok(value) => value,
            Err(e)    => {
                let value = String::from_utf8_lossy(e.as_bytes()).into_owned();
                self.illegal(format_args!("invalid UTF-8 in value {:?}", value));
                value
            },
        };

        let mut ty = take(&mut self.ty);
        if ty.is_empty() {
            ty = value.clone();
        }

        self.check_stall(&ty);

        let token = Token {
            value,
            literal: take(&mut self.literal),
            ty,
            pos:     self.tok_pos.clone(),
            diags:   take(&mut self.diags),
        };

        self.tok_pos = self.this_pos.clone();
        trace!(%token, "emit");
        token
    }

    // ---- Helpers -----------------------------------------------------------

    /// Invokes `action` while the current code point is in `class`.
    pub fn while_is<F>(&mut self, class: &Class, mut action: F)
    where
        F: FnMut(&mut Self)
    {
        while self.is(class) {
            action(self);
        }
    }

    /// Invokes `action` until the current code point is in `class` or the
    /// end of text is reached.
    pub fn until<F>(&mut self, class: &Class, mut action: F)
    where
        F: FnMut(&mut Self)
    {
        while self.has_more() && !self.is(class) {
            action(self);
        }
    }

    /// Invokes `action` `n` times.
    pub fn repeat<F>(&mut self, n: usize, mut action: F)
    where
        F: FnMut(&mut Self)
    {
        for _ in 0..n {
            action(self);
        }
    }

    // ---- Internals ---------------------------------------------------------

    fn advance(&mut self) {
        let ch = match self.this {
            Some(ch) => ch,
            None     => return,
        };

        self.this_pos.advance(ch);
        self.this = self.next;
        self.next = match self.this {
            Some(_) => self.read_src(),
            None    => None,
        };
    }

    fn read_src(&mut self) -> Option<char> {
        match self.src.read() {
            Ok(ch) => ch,
            Err(e) => {
                warn!(pos = %self.this_pos, error = %e, "error reading stream");
                self.src_err = Some(
                    Diagnostic::new(self.this_pos.clone(), "error reading stream").with_cause(e)
                );
                None
            },
        }
    }

    fn reset(&mut self) {
        self.value  .clear();
        self.literal.clear();
        self.ty     .clear();
        self.diags  .clear();
        self.tok_pos = self.this_pos.clone();
    }

    fn check_stall(&mut self, ty: &str) {
        if !self.literal.is_empty() || ty == types::END {
            self.stalls = 0;
            return;
        }
        self.stalls += 1;
        if self.stalls > MAX_STALLS {
            panic!(
                "scanner stalled at {}: {} tokens emitted without consuming input",
                self.this_pos, self.stalls
            );
        }
    }
}

// ----------------------------------------------------------------------------
