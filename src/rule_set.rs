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

//! Rule sets: one lexer configuration.

use std::sync::Arc;
use tracing::debug;

use crate::class::Class;
use crate::rules::Rule;
use crate::scanner::Scanner;
use crate::token::{types, Token};

type PreTokenFn  = dyn Fn(&mut Scanner)                 + Send + Sync;
type PostTokenFn = dyn Fn(&mut Scanner, Token) -> Token + Send + Sync;
type NoMatchFn   = dyn Fn(&mut Scanner)                 + Send + Sync;

// ----------------------------------------------------------------------------

/// Ordered list of rules plus the hooks that drive them.
///
/// A `RuleSet` is immutable once built: each `with_*` method returns a new
/// value.  Rules are tried in the order added; the first that matches wins.
///
/// | Hook        | Runs                                  | May                       |
/// |:------------|:--------------------------------------|:--------------------------|
/// | discards    | before each token                     | drop separators           |
/// | pre-token   | after discards, before the rules      | consume or adjust input   |
/// | no-match    | when no rule matches                  | consume an illegal span   |
/// | post-token  | after each emitted token              | rewrite or drop the token |
///
/// A dropped token is one with neither value nor type; `next` continues
/// scanning rather than returning it.
#[derive(Clone, Default)]
pub struct RuleSet {
    rules:        Vec<Arc<dyn Rule>>,
    discards:     Class,
    discard_rule: Option<Arc<dyn Rule>>,
    pre_token:    Option<Arc<PreTokenFn>>,
    post_token:   Option<Arc<PostTokenFn>>,
    no_match:     Option<Arc<NoMatchFn>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the rule set with `rule` added after the existing
    /// rules.
    pub fn with(&self, rule: impl Rule + 'static) -> Self {
        let mut r = self.clone();
        r.rules.push(Arc::new(rule));
        r
    }

    /// Returns a copy of the rule set that discards code points in `class`
    /// between tokens.
    pub fn with_discards(&self, class: Class) -> Self {
        Self { discards: class, ..self.clone() }
    }

    /// Returns a copy of the rule set that runs `rule` between tokens and
    /// drops what it matches.  A match that yields a token with a type, such
    /// as a kept comment or an illegal span, is returned instead.
    pub fn with_discard_rule(&self, rule: impl Rule + 'static) -> Self {
        Self { discard_rule: Some(Arc::new(rule)), ..self.clone() }
    }

    /// Returns a copy of the rule set that invokes `f` before trying the
    /// rules for each token.
    pub fn with_pre_token_fn<F>(&self, f: F) -> Self
    where
        F: Fn(&mut Scanner) + Send + Sync + 'static
    {
        Self { pre_token: Some(Arc::new(f)), ..self.clone() }
    }

    /// Returns a copy of the rule set that passes each emitted token through
    /// `f`.  Returning an empty token drops it.
    pub fn with_post_token_fn<F>(&self, f: F) -> Self
    where
        F: Fn(&mut Scanner, Token) -> Token + Send + Sync + 'static
    {
        Self { post_token: Some(Arc::new(f)), ..self.clone() }
    }

    /// Returns a copy of the rule set that invokes `f` when no rule matches.
    /// `f` must consume input.  Without a no-match hook, the current code
    /// point becomes an illegal token.
    pub fn with_no_match_fn<F>(&self, f: F) -> Self
    where
        F: Fn(&mut Scanner) + Send + Sync + 'static
    {
        Self { no_match: Some(Arc::new(f)), ..self.clone() }
    }

    /// Scans the next token.
    ///
    /// At the end of text, returns a token of type
    /// [`END`](crate::token::types::END), or of type
    /// [`ERROR`](crate::token::types::ERROR) if the byte source failed.
    ///
    /// # Panics
    ///
    /// Panics if a full pass over the rules and hooks drops its token without
    /// consuming input.
    pub fn next(&self, s: &mut Scanner) -> Token {
        loop {
            if let Some(token) = self.skip_discards(s) {
                return self.accept(s, token);
            }

            if !s.has_more() {
                return s.emit();
            }

            let start = s.pos().clone();

            if let Some(f) = &self.pre_token {
                f(s);
            }

            if !self.eval(s) && s.has_more() {
                debug!(pos = %start, ch = ?s.this(), "no rule matched");
                match &self.no_match {
                    Some(f) => f(s),
                    None    => unexpected(s),
                }
            }

            let mut token = s.emit();

            if let Some(f) = &self.post_token {
                let was_empty = token.is_empty();
                token = f(s, token);
                if token.is_empty() && !was_empty {
                    debug!(pos = %start, "token dropped");
                }
            }

            if !token.is_empty() {
                return self.accept(s, token);
            }

            if *s.pos() == start {
                panic!("rule set made no progress at {}", start);
            }
        }
    }

    fn accept(&self, s: &mut Scanner, token: Token) -> Token {
        if token.ty != types::COMMENT {
            s.set_prev_type(token.ty.as_str());
        }
        token
    }

    fn skip_discards(&self, s: &mut Scanner) -> Option<Token> {
        loop {
            s.while_is(&self.discards, Scanner::discard);

            let rule = self.discard_rule.as_ref()?;
            let start = s.pos().clone();

            if !rule.eval(s) {
                return None;
            }

            let token = s.emit();
            if !token.is_empty() {
                return Some(token);
            }

            if *s.pos() == start {
                panic!("discard rule made no progress at {}", start);
            }
        }
    }
}

impl Rule for RuleSet {
    fn eval(&self, s: &mut Scanner) -> bool {
        self.rules.iter().any(|r| r.eval(s))
    }
}

/// Consumes the current code point as an illegal token.
fn unexpected(s: &mut Scanner) {
    let ch = s.this().map(String::from).unwrap_or_default();
    s.illegal(format_args!("unexpected {:?}", ch));
    s.keep();
}

// ----------------------------------------------------------------------------
