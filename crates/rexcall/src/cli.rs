// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CONFIG_ENV;

/// Compile, match and introspect patterns the way a host would
#[derive(Parser)]
#[command(name = "rexcall")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a pattern against a subject and print the match vector
    Match(MatchArgs),
    /// Report pattern properties
    Info(InfoArgs),
    /// List named capture groups
    Names(PatternArgs),
    /// Report engine configuration values
    Config(ConfigArgs),
    /// Print adapter and engine version
    Version,
}

/// Pattern and the options it is compiled with.
#[derive(clap::Args)]
pub struct PatternArgs {
    /// Regular expression
    pub pattern: String,

    /// Compile options, `|`-delimited (e.g. "CASELESS|MULTILINE")
    #[arg(short, long, default_value = "", value_name = "NAMES")]
    pub options: String,

    /// Character tables locale ("ENV" for the environment's)
    #[arg(long, default_value = "")]
    pub locale: String,

    /// Match limit (0 keeps the engine default)
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub match_limit: u64,

    /// Recursion limit (0 keeps the engine default)
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub recursion_limit: u64,
}

#[derive(clap::Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Subject text
    pub subject: String,

    /// Exec options, `|`-delimited (e.g. "NOTBOL|NOTEMPTY")
    #[arg(short = 'e', long, default_value = "", value_name = "NAMES")]
    pub exec_options: String,

    /// Byte offset to start matching at
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub start: i32,

    /// Bytes of the subject to consider (default: all)
    #[arg(long, value_name = "N")]
    pub length: Option<i32>,
}

#[derive(clap::Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub pattern: PatternArgs,

    /// Selectors to report (e.g. CAPTURECOUNT OPTIONS)
    #[arg(required = true, value_name = "SELECTOR")]
    pub selectors: Vec<String>,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Selectors to report (default: all)
    #[arg(value_name = "SELECTOR")]
    pub selectors: Vec<String>,
}
