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

//! Input cursor.

use std::collections::VecDeque;
use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, BufRead};
use thiserror::Error;

// ----------------------------------------------------------------------------

/// A failure reading the byte source underlying a [`Cursor`].
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

// ----------------------------------------------------------------------------

/// Peekable input cursor specialized for lexical analysis.
///
/// A `Cursor` takes a buffered byte source as input and provides a cursor
/// over the sequence of code points decoded from it as UTF-8.  Malformed
/// sequences decode as U+FFFD.  Code points looked at ahead of time are held
/// in a pending buffer and delivered from there; the byte source is never
/// read twice.
///
pub struct Cursor<R: BufRead> {
    src:   R,
    ahead: VecDeque<char>,
    err:   Option<ReadError>,
    done:  bool,
}

impl<R: BufRead> Cursor<R> {
    /// Creates a new [`Cursor`] over the given byte source.
    #[inline]
    pub fn new(src: R) -> Self {
        Self { src, ahead: VecDeque::new(), err: None, done: false }
    }

    /// Consumes and returns the next code point.
    ///
    /// Returns `Ok(None)` at the end of input.  If the byte source fails, the
    /// error is returned once, after any code points decoded before the
    /// failure, and the cursor then behaves as if at the end of input.
    pub fn read(&mut self) -> Result<Option<char>, ReadError> {
        if let Some(ch) = self.ahead.pop_front() {
            return Ok(Some(ch));
        }
        if let Some(e) = self.err.take() {
            self.done = true;
            return Err(e);
        }
        if self.done {
            return Ok(None);
        }
        match self.decode() {
            Ok(None) => { self.done = true; Ok(None) },
            Ok(ch)   => Ok(ch),
            Err(e)   => { self.done = true; Err(e) },
        }
    }

    /// Returns the code point `n` positions ahead without consuming it, or
    /// `None` if the input ends (or fails) before then.  `peek_at(0)` returns
    /// the code point that the next [`read`](Self::read) will return.
    pub fn peek_at(&mut self, n: usize) -> Option<char> {
        self.fill(n + 1);
        self.ahead.get(n).copied()
    }

    /// Returns up to `n` upcoming code points without consuming them.  The
    /// result is shorter than `n` if the input ends (or fails) before then.
    pub fn peek_to(&mut self, n: usize) -> String {
        self.fill(n);
        self.ahead.iter().take(n).collect()
    }

    /// Pushes a code point back onto the front of the cursor.
    #[inline]
    pub fn unread(&mut self, ch: char) {
        self.ahead.push_front(ch);
    }

    /// Pushes code points back onto the front of the cursor.  After the call,
    /// the cursor yields `chs` in order, followed by what it would have yielded
    /// before the call.
    pub fn unread_all(&mut self, chs: &[char]) {
        for &ch in chs.iter().rev() {
            self.ahead.push_front(ch);
        }
    }

    fn fill(&mut self, n: usize) {
        while self.ahead.len() < n && !self.done && self.err.is_none() {
            match self.decode() {
                Ok(Some(ch)) => self.ahead.push_back(ch),
                Ok(None)     => self.done = true,
                Err(e)       => self.err  = Some(e),
            }
        }
    }

    fn decode(&mut self) -> Result<Option<char>, ReadError> {
        let b0 = match self.next_byte()? {
            Some(b) => b,
            None    => return Ok(None),
        };

        let len = match b0 {
            0x00..=0x7F => return Ok(Some(b0 as char)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _           => return Ok(Some(REPLACEMENT_CHARACTER)),
        };

        let mut buf = [b0, 0, 0, 0];

        for b in &mut buf[1..len] {
            match self.peek_byte()? {
                Some(x) if x & 0xC0 == 0x80 => { *b = x; self.src.consume(1); },
                _                           => return Ok(Some(REPLACEMENT_CHARACTER)),
            }
        }

        let ch = std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(REPLACEMENT_CHARACTER);

        Ok(Some(ch))
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ReadError> {
        loop {
            match self.src.fill_buf() {
                Ok(buf)                                         => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)                                          => return Err(e.into()),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ReadError> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.src.consume(1);
        }
        Ok(b)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
pub mod tests {
    use std::io::{BufReader, Read};
    use super::*;

    /// Byte source that yields some bytes and then fails.
    pub struct Failing(pub &'static [u8]);

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "boom"));
            }
            let n = buf.len().min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    fn read_ok<R: BufRead>(c: &mut Cursor<R>) -> Option<char> {
        c.read().unwrap()
    }

    #[test]
    fn cursor_read() {
        let mut c = Cursor::new("Hi\u{ED}!".as_bytes());

        assert_eq!( read_ok(&mut c), Some('H')      );
        assert_eq!( read_ok(&mut c), Some('i')      );
        assert_eq!( read_ok(&mut c), Some('\u{ED}') );
        assert_eq!( read_ok(&mut c), Some('!')      );
        assert_eq!( read_ok(&mut c), None           );
        assert_eq!( read_ok(&mut c), None           );
    }

    #[test]
    fn cursor_read_malformed() {
        let mut c = Cursor::new(&b"a\xFFb\xE2\x82"[..]);

        assert_eq!( read_ok(&mut c), Some('a')                  );
        assert_eq!( read_ok(&mut c), Some(REPLACEMENT_CHARACTER) );
        assert_eq!( read_ok(&mut c), Some('b')                  );
        assert_eq!( read_ok(&mut c), Some(REPLACEMENT_CHARACTER) );
        assert_eq!( read_ok(&mut c), None                       );
    }

    #[test]
    fn cursor_read_astral() {
        let mut c = Cursor::new("💰€".as_bytes());

        assert_eq!( read_ok(&mut c), Some('💰') );
        assert_eq!( read_ok(&mut c), Some('€')  );
        assert_eq!( read_ok(&mut c), None       );
    }

    #[test]
    fn cursor_peek() {
        let mut c = Cursor::new("abc".as_bytes());

        assert_eq!( c.peek_at(0), Some('a') );
        assert_eq!( c.peek_at(2), Some('c') );
        assert_eq!( c.peek_at(3), None      );
        assert_eq!( c.peek_to(2), "ab"      );
        assert_eq!( c.peek_to(9), "abc"     );

        assert_eq!( read_ok(&mut c), Some('a') );
        assert_eq!( c.peek_at(0),    Some('b') );
        assert_eq!( read_ok(&mut c), Some('b') );
        assert_eq!( read_ok(&mut c), Some('c') );
        assert_eq!( read_ok(&mut c), None      );
    }

    #[test]
    fn cursor_unread() {
        let mut c = Cursor::new("c".as_bytes());

        c.unread('b');
        c.unread_all(&['x', 'a']);

        assert_eq!( c.peek_to(4), "xabc" );

        assert_eq!( read_ok(&mut c), Some('x') );
        assert_eq!( read_ok(&mut c), Some('a') );
        assert_eq!( read_ok(&mut c), Some('b') );
        assert_eq!( read_ok(&mut c), Some('c') );
        assert_eq!( read_ok(&mut c), None      );

        c.unread('z');

        assert_eq!( read_ok(&mut c), Some('z') );
        assert_eq!( read_ok(&mut c), None      );
    }

    #[test]
    fn cursor_error_once() {
        let mut c = Cursor::new(BufReader::new(Failing(b"ab")));

        assert_eq!( c.peek_to(5),    "ab"      );
        assert_eq!( read_ok(&mut c), Some('a') );
        assert_eq!( read_ok(&mut c), Some('b') );

        assert!( matches!(c.read(), Err(ReadError::Io(_))) );

        assert_eq!( read_ok(&mut c), None );
        assert_eq!( read_ok(&mut c), None );
    }
}
