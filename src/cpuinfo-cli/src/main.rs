// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cpuinfo_engine::{DialectModel, build_from_reader};

mod cli;
mod source;

use cli::{Cli, Format};
use source::Source;

const FACT_PREFIX: &str = "cpu";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;

    io::stdout()
        .write_all(output.as_bytes())
        .context("writing report")?;
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let source = source::resolve(cli.path.as_deref(), cli.prefix.as_deref());
    tracing::debug!(?source, arch = %cli.arch, "reading descriptor");

    let model = match source {
        Source::Stdin => build_from_reader(&cli.arch, &mut io::stdin().lock()),
        Source::File(ref path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            build_from_reader(&cli.arch, &mut BufReader::new(file))
        }
    }
    .with_context(|| format!("parsing {source:?} as {}", cli.arch))?;

    tracing::info!(units = model.unit_count(), "parsed descriptor");

    render(&model, cli.format)
}

fn render(model: &DialectModel, format: Format) -> Result<String> {
    let output = match format {
        Format::Text => model.to_string(),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(model)?;
            json.push('\n');
            json
        }
        Format::Facts => {
            let mut out = String::new();
            for (k, v) in model.to_facts(FACT_PREFIX) {
                writeln!(out, "{k}={v}")?;
            }
            out
        }
    };
    Ok(output)
}
