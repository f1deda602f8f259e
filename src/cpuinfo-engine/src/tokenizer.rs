// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Line-oriented `key : value` tokenizer.
//!
//! Each line is split on its FIRST colon only, since values routinely contain
//! colons of their own (`flags`, timestamps, paths).  Lines without a colon, or
//! whose key is empty after trimming, are dropped without error: descriptor
//! files are full of blank separator lines and the odd garbled entry.

use crate::common::{CanonicalKey, canonicalize};

/// One recognized `key : value` line, borrowed from the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawPair<'input> {
    pub key: &'input str,
    pub value: &'input str,
}

impl<'input> RawPair<'input> {
    pub fn canonical_key(&self) -> CanonicalKey {
        canonicalize(self.key)
    }
}

/// Lazy iterator over the pairs of a text snapshot.
///
/// Cheap to clone: cloning an unstarted iterator (or calling [`tokenize`]
/// again) restarts the sequence from the first line.
#[derive(Clone, Debug)]
pub struct Pairs<'input> {
    remaining: &'input str,
}

/// Tokenize `text` into an ordered sequence of pairs.
pub fn tokenize(text: &str) -> Pairs<'_> {
    Pairs { remaining: text }
}

/// Split a single line into a pair, or `None` if it isn't one.
pub fn split_line(line: &str) -> Option<RawPair<'_>> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some(RawPair {
        key,
        value: value.trim(),
    })
}

impl<'input> Iterator for Pairs<'input> {
    type Item = RawPair<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = next_line(&mut self.remaining)?;
            if let Some(pair) = split_line(line) {
                return Some(pair);
            }
        }
    }
}

/// Pop the next line off `remaining`, handling `\n`, `\r\n` and bare `\r`.
fn next_line<'input>(remaining: &mut &'input str) -> Option<&'input str> {
    if remaining.is_empty() {
        return None;
    }

    let end = remaining.find(['\n', '\r']).unwrap_or(remaining.len());
    let line = &remaining[..end];

    let mut rest = &remaining[end..];
    if rest.starts_with("\r\n") {
        rest = &rest[2..];
    } else if rest.starts_with('\n') || rest.starts_with('\r') {
        rest = &rest[1..];
    }
    *remaining = rest;

    Some(line)
}
