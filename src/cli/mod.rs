// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the blogsift command-line interface.
//!
//! Three subcommands, all driving the same controller the search page uses:
//! `search` runs one query through the length gate and prints what the
//! results list would show, `inspect` summarizes an index, and `interactive`
//! treats each stdin line as the current value of the search box.
//!
//! Search options and logging come from the site config (`hugo.toml` or
//! `--config-file`), then `BLOGSIFT_*` environment variables, then the flags
//! here.

pub mod commands;
pub mod display;
pub mod telemetry;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use blogsift::LogFormat;

#[derive(Parser)]
#[command(
    name = "blogsift",
    about = "Fuzzy search for a static blog's index.json",
    version
)]
pub struct Cli {
    /// Site config to read search options from (defaults to ./hugo.* or ./config.*)
    #[arg(long = "config-file", env = "BLOGSIFT_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_enum, value_name = "FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Give up on an HTTP index fetch after this many seconds (default 10)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one query against an index and show the ranked results
    Search {
        /// Path or http(s) URL of index.json
        index: String,

        /// Search query, as typed into the search box
        query: String,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print hits as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Print the results list markup the page would show
        #[arg(long)]
        html: bool,
    },

    /// Summarize an index: records, missing fields, tags
    Inspect {
        /// Path or http(s) URL of index.json (defaults to the site config)
        index: Option<String>,
    },

    /// Read queries from stdin, one per line, as if typed into the search box
    Interactive {
        /// Path or http(s) URL of index.json (defaults to the site config)
        index: Option<String>,
    },
}
