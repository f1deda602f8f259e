// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::borrow::Borrow;
use std::fmt;
use std::{error, result};

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnsupportedArchitecture,
    SourceUnavailable,
    InvalidUtf8,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            UnsupportedArchitecture => "unsupported_architecture",
            SourceUnavailable => "source_unavailable",
            InvalidUtf8 => "invalid_utf8",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No dialect is registered for the requested architecture.
    Dialect,
    /// The caller-supplied text could not be obtained.
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Dialect => "DialectError",
            ErrorKind::Source => "SourceError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! dialect_err(
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(
            ErrorKind::Dialect,
            ErrorCode::$code,
            Some($str),
        ))
    }}
);

#[macro_export]
macro_rules! source_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Error::new(ErrorKind::Source, ErrorCode::$code, Some($str))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Error::new(ErrorKind::Source, ErrorCode::$code, None)
    }};
}

/// A field name in canonical form, usable as a stable attribute key.
///
/// Canonical form means:
/// - Lowercase
/// - No leading or trailing whitespace
/// - Each internal whitespace run replaced with a single `_`
/// - Each `.` replaced with `_`
///
/// Two raw labels differing only in case, surrounding whitespace, internal
/// whitespace width, or `.` vs ` ` produce the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Wrap a string already known to be canonical (e.g. a dialect constant).
    pub(crate) fn from_canonical_unchecked(s: &str) -> Self {
        CanonicalKey(s.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Map a raw field label to its canonical attribute name.
///
/// Total and idempotent: `canonicalize(canonicalize(k).as_str()) == canonicalize(k)`.
pub fn canonicalize(key: &str) -> CanonicalKey {
    let key = key.trim();

    let mut canonical = String::with_capacity(key.len());
    let mut in_whitespace = false;
    for c in key.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                canonical.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if c == '.' {
            canonical.push('_');
        } else {
            canonical.extend(c.to_lowercase());
        }
    }

    CanonicalKey(canonical)
}
