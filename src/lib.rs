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

//! A lexical scanning toolkit.
//!
//! Lexers are assembled from small [`Rule`](rules::Rule) values.  A
//! [`RuleSet`] holds an ordered list of rules and some optional hooks; a
//! [`Runner`] drives a rule set over a live [`Scanner`] bound to one input
//! and yields [`Token`]s with one token of lookahead.
//!
//! ```
//! use scan::{RuleSet, Runner, Scanner};
//! use scan::class::WHITESPACE;
//! use scan::rules::{IdentRule, NumRule};
//!
//! let rules = RuleSet::new()
//!     .with_discards(WHITESPACE)
//!     .with(IdentRule::standard())
//!     .with(NumRule::int());
//!
//! let scanner = Scanner::for_str("", "abc 123");
//! let tokens: Vec<_> = Runner::new(scanner, &rules).collect();
//!
//! assert_eq!(tokens[0].value, "abc");
//! assert_eq!(tokens[1].ty,    "int");
//! ```

pub mod class;
pub mod input;
pub mod lang;
pub mod message;
pub mod pos;
pub mod rule_set;
pub mod rules;
pub mod runner;
pub mod scanner;
pub mod token;

pub use class::Class;
pub use message::{ConfigError, Diagnostic};
pub use pos::Pos;
pub use rule_set::RuleSet;
pub use runner::Runner;
pub use scanner::Scanner;
pub use token::Token;

/// Name of this program.
pub const PROGRAM_NAME: &str = "scan";
