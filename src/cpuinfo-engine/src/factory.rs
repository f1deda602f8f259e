// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::io::BufRead;

use crate::common::Result;
use crate::dialect::Architecture;
use crate::model::DialectModel;
use crate::source_err;

/// Parse `text` with the dialect registered for `architecture`.
pub fn parse(architecture: Architecture, text: &str) -> DialectModel {
    architecture.dialect().parse(architecture, text)
}

/// Parse `raw_text` with the dialect registered for `architecture_id`.
///
/// Fails with `UnsupportedArchitecture` for identifiers without a dialect.
pub fn build(architecture_id: &str, raw_text: &str) -> Result<DialectModel> {
    let architecture: Architecture = architecture_id.parse()?;
    Ok(parse(architecture, raw_text))
}

/// Read the full text from `reader` and parse it.
///
/// The architecture is checked before anything is read.  A failed read maps to
/// `SourceUnavailable` and non-UTF-8 content to `InvalidUtf8`; neither yields a
/// partial model.
pub fn build_from_reader(
    architecture_id: &str,
    reader: &mut dyn BufRead,
) -> Result<DialectModel> {
    let architecture: Architecture = architecture_id.parse()?;

    let mut contents_buf: Vec<u8> = vec![];
    reader
        .read_to_end(&mut contents_buf)
        .map_err(|err| source_err!(SourceUnavailable, err.to_string()))?;
    let contents = String::from_utf8(contents_buf)
        .map_err(|err| source_err!(InvalidUtf8, err.to_string()))?;

    Ok(parse(architecture, &contents))
}
