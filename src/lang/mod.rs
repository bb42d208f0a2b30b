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

//! Prebuilt language configurations.
//!
//! Each language module provides a `Context` holding a ready-made
//! [`RuleSet`](crate::RuleSet) and any runtime switches the rules consult.
//!
//! Module          | Language
//! :---------------|:----------------------------------------------------
//! [`go`]          | Go: comments, runes, strings, numbers, semicolons
//! [`json`]        | JSON

pub mod go;
pub mod json;
