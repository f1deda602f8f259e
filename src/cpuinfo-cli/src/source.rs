// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::path::{Path, PathBuf};

pub const PROC_CPUINFO_PATH: &str = "/proc/cpuinfo";

/// The running host's architecture as `uname -m` names it.
pub fn host_architecture() -> &'static str {
    uname_machine(std::env::consts::ARCH, cfg!(target_endian = "little"))
}

/// Map a Rust `target_arch` to its `uname -m` spelling.  Rust names both
/// POWER variants `powerpc64`; only endianness tells them apart.
fn uname_machine(target_arch: &'static str, little_endian: bool) -> &'static str {
    match target_arch {
        "powerpc64" if little_endian => "ppc64le",
        "powerpc64" => "ppc64",
        other => other,
    }
}

/// Where to read the descriptor text from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

/// Resolve the descriptor location.
///
/// An explicit path wins (`-` meaning stdin).  Otherwise `/proc/cpuinfo` is
/// used, re-rooted under `prefix` when one is given.
pub fn resolve(path: Option<&Path>, prefix: Option<&Path>) -> Source {
    if let Some(path) = path {
        if path == Path::new("-") {
            return Source::Stdin;
        }
        return Source::File(path.to_path_buf());
    }

    match prefix {
        Some(prefix) => {
            let relative = PROC_CPUINFO_PATH.trim_start_matches('/');
            Source::File(prefix.join(relative))
        }
        None => Source::File(PathBuf::from(PROC_CPUINFO_PATH)),
    }
}
