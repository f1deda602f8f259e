// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::source::host_architecture;

#[derive(Parser, Debug)]
#[command(name = "cpuinfo")]
#[command(author, version, about = "Summarize a processor descriptor file")]
pub struct Cli {
    /// Architecture whose dialect to parse with (x86_64, aarch64, ppc64, ppc64le)
    #[arg(long, env = "CPUINFO_ARCH", default_value = host_architecture())]
    pub arch: String,

    /// Root directory that /proc/cpuinfo is resolved under
    #[arg(long, env = "CPUINFO_PREFIX")]
    pub prefix: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Descriptor file to read instead of /proc/cpuinfo ('-' for stdin)
    pub path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable summary
    Text,
    /// The full model as JSON
    Json,
    /// Flattened `cpu.*` facts, one `key=value` per line
    Facts,
}
