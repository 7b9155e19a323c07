// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use blogsift::{
    config::{parse_level, parse_timeout},
    SiteSettings,
};

mod cli;
use cli::{commands, display, telemetry, Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "{} {:#}",
                display::themed(display::RED, &[display::BOLD], "error:"),
                err
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = SiteSettings::load(cli.config_file.as_deref())
        .context("failed to load configuration")?;
    if let Some(level) = cli.log_level.as_deref() {
        settings.logging.level = parse_level(level)?;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    if let Some(secs) = cli.timeout {
        settings.fetch_timeout = parse_timeout(secs)?;
    }
    telemetry::init(&settings.logging)?;

    match cli.command {
        Commands::Search {
            index,
            query,
            limit,
            json,
            html,
        } => commands::search(&settings, &index, &query, limit, json, html).await,
        Commands::Inspect { index } => {
            let location = index.unwrap_or_else(|| settings.index.clone());
            commands::inspect(&settings, &location).await
        }
        Commands::Interactive { index } => {
            let location = index.unwrap_or_else(|| settings.index.clone());
            commands::interactive(&settings, &location).await
        }
    }
}
