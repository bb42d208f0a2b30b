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

//! Program entry point.

use std::fs::File;
use std::io::{self, stdin, Read};
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scan::{lang, RuleSet, Runner, Scanner, PROGRAM_NAME};
use scan::token::TokenTable;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SCAN_LOG";

/// Scans a source file and prints its tokens.
#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME, version)]
struct Cli {
    /// Input file, or `-` for standard input.
    #[arg(value_name = "PATH")]
    path: String,

    /// Language of the input.
    #[arg(long, value_enum, default_value_t = Lang::Go)]
    lang: Lang,

    /// Print tokens as a JSON array.
    #[arg(long)]
    json: bool,

    /// Return comments as tokens.
    #[arg(long)]
    keep_comments: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Lang {
    Go,
    Json,
}

#[derive(Debug, Error)]
enum Error {
    #[error("{path}: error: {source}")]
    Open { path: String, source: io::Error },

    #[error("error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(true)  => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e)    => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Scans the input and prints its tokens.  Returns whether the input was
/// free of diagnostics.
fn run(cli: &Cli) -> Result<bool, Error> {
    let (name, src): (&str, Box<dyn Read>) = if cli.path == "-" {
        ("stdin", Box::new(stdin()))
    } else {
        let file = File::open(&cli.path)
            .map_err(|source| Error::Open { path: cli.path.clone(), source })?;
        (cli.path.as_str(), Box::new(file))
    };

    let rules   = rules(cli);
    let scanner = Scanner::new(name, src);
    let tokens  = Runner::new(scanner, &rules).all();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print!("{}", TokenTable::new(&tokens).with_color(!cli.no_color));
    }

    Ok(tokens.iter().all(|t| t.diags.is_empty()))
}

fn rules(cli: &Cli) -> RuleSet {
    match cli.lang {
        Lang::Go => {
            let ctx = lang::go::Context::new();
            ctx.keep_comments.store(cli.keep_comments, Ordering::Relaxed);
            ctx.rules
        },
        Lang::Json => lang::json::Context::new().rules,
    }
}
