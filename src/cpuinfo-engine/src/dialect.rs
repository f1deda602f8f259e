// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Per-architecture rule sets.
//!
//! Field names, stanza boundaries and layout differ between architectures:
//!
//! - x86_64 repeats a full stanza per processor, each opened by `processor`.
//! - aarch64 lists a bare `processor : N` line per CPU followed by a single
//!   block of fields that apply to all of them, plus a capitalized
//!   `Processor` line carrying the model name and a trailing `Hardware` line.
//! - ppc64 has per-processor stanzas, then a machine-wide block that begins at
//!   the `timebase` line.
//!
//! Each architecture maps to one static [`Dialect`], and parsing matches
//! exhaustively on its [`Layout`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::aggregate::{CommonAttributes, aggregate};
use crate::common::{CanonicalKey, Error, canonicalize};
use crate::dialect_err;
use crate::model::DialectModel;
use crate::record::UnitRecord;
use crate::splitter::split_by_delimiter;
use crate::tokenizer::tokenize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Architecture {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "aarch64")]
    Aarch64,
    #[serde(rename = "ppc64")]
    Ppc64,
    #[serde(rename = "ppc64le")]
    Ppc64le,
}

impl Architecture {
    pub const ALL: [Architecture; 4] = [
        Architecture::X86_64,
        Architecture::Aarch64,
        Architecture::Ppc64,
        Architecture::Ppc64le,
    ];

    /// The identifier as reported by `uname -m`.
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86_64 => "x86_64",
            Architecture::Aarch64 => "aarch64",
            Architecture::Ppc64 => "ppc64",
            Architecture::Ppc64le => "ppc64le",
        }
    }

    pub fn dialect(self) -> &'static Dialect {
        match self {
            Architecture::X86_64 => &X86_64,
            Architecture::Aarch64 => &AARCH64,
            Architecture::Ppc64 | Architecture::Ppc64le => &PPC64,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match Architecture::ALL.into_iter().find(|arch| arch.as_str() == id) {
            Some(arch) => Ok(arch),
            None => dialect_err!(UnsupportedArchitecture, id.to_owned()),
        }
    }
}

/// How integer identification fields are written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    /// With or without a leading `0x`.
    Hexadecimal,
}

impl Radix {
    /// Unsigned digits only; a leading sign is rejected.
    pub fn parse(self, value: &str) -> Option<u64> {
        let value = value.trim();
        let (digits, radix) = match self {
            Radix::Decimal => (value, 10),
            Radix::Hexadecimal => (
                value
                    .strip_prefix("0x")
                    .or_else(|| value.strip_prefix("0X"))
                    .unwrap_or(value),
                16,
            ),
        };
        if digits.starts_with(['+', '-']) {
            return None;
        }
        u64::from_str_radix(digits, radix).ok()
    }
}

/// How the pair sequence is carved into units, common attributes and other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Split on the delimiter, then hoist fields all units agree on.
    Divergent,
    /// Fields appear once but apply to every unit; each delimiter occurrence
    /// only contributes that unit's own delimiter value.  Pairs keyed by
    /// `annotation` are machine annotations and go to `other`.
    Replicated { annotation: &'static str },
    /// Units end at the first `sentinel` pair.  The sentinel is consumed, and
    /// everything after it is machine-wide and goes straight to common.
    SentinelTerminated { sentinel: &'static str },
}

/// Which canonical keys carry the processor model and model name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldRoles {
    pub model: &'static str,
    pub model_name: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    /// Canonical key opening each unit stanza.
    pub delimiter: &'static str,
    /// Exact, case-sensitive raw key renames applied before canonicalization.
    pub renames: &'static [(&'static str, &'static str)],
    pub layout: Layout,
    pub fields: FieldRoles,
    /// Canonical keys whose values are hexadecimal.
    pub hex_fields: &'static [&'static str],
}

pub static X86_64: Dialect = Dialect {
    delimiter: "processor",
    renames: &[],
    layout: Layout::Divergent,
    fields: FieldRoles {
        model: "model",
        model_name: "model_name",
    },
    hex_fields: &["microcode"],
};

pub static AARCH64: Dialect = Dialect {
    delimiter: "processor",
    // 'Processor' and 'processor' canonicalize identically; the capitalized
    // one is the closest thing aarch64 has to a model name.
    renames: &[("Processor", "model name")],
    layout: Layout::Replicated {
        annotation: "hardware",
    },
    fields: FieldRoles {
        model: "cpu_part",
        model_name: "model_name",
    },
    hex_fields: &["cpu_implementer", "cpu_variant", "cpu_part"],
};

pub static PPC64: Dialect = Dialect {
    delimiter: "processor",
    renames: &[],
    layout: Layout::SentinelTerminated {
        sentinel: "timebase",
    },
    fields: FieldRoles {
        model: "model",
        model_name: "machine",
    },
    hex_fields: &[],
};

impl Dialect {
    pub fn radix(&self, key: &str) -> Radix {
        if self.hex_fields.iter().any(|field| *field == key) {
            Radix::Hexadecimal
        } else {
            Radix::Decimal
        }
    }

    fn rename<'a>(&self, raw_key: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|(from, _)| *from == raw_key)
            .map_or(raw_key, |(_, to)| *to)
    }

    /// Tokenize `text`, apply renames, and canonicalize keys.
    pub fn canonical_pairs<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (CanonicalKey, String)> + 'a {
        tokenize(text).map(move |pair| {
            (
                canonicalize(self.rename(pair.key)),
                pair.value.to_owned(),
            )
        })
    }

    /// Only reachable through [`crate::parse`], which pairs each architecture
    /// with its own dialect.
    pub(crate) fn parse(&self, architecture: Architecture, text: &str) -> DialectModel {
        let parts = match self.layout {
            Layout::Divergent => self.parse_divergent(text),
            Layout::Replicated { annotation } => self.parse_replicated(text, annotation),
            Layout::SentinelTerminated { sentinel } => {
                self.parse_sentinel_terminated(text, sentinel)
            }
        };

        DialectModel::new(architecture, parts.units, parts.common, parts.other)
    }

    fn parse_divergent(&self, text: &str) -> Parts {
        let split = split_by_delimiter(self.canonical_pairs(text), self.delimiter);
        let common = aggregate(&split.units);

        Parts {
            units: split.units,
            common,
            other: split.other,
        }
    }

    fn parse_replicated(&self, text: &str, annotation: &str) -> Parts {
        let mut delimiter_values = Vec::new();
        let mut shared = UnitRecord::new();
        let mut other = Vec::new();

        for (key, value) in self.canonical_pairs(text) {
            if key == self.delimiter {
                delimiter_values.push((key, value));
            } else if key == annotation {
                other.push((key, value));
            } else {
                shared.insert(key, value);
            }
        }

        let units = delimiter_values
            .into_iter()
            .map(|(key, value)| {
                let mut unit = UnitRecord::new();
                unit.insert(key, value);
                for (k, v) in shared.iter() {
                    unit.insert(k.clone(), v.to_owned());
                }
                unit
            })
            .collect();

        let common = shared
            .iter()
            .map(|(k, v)| (k.clone(), v.to_owned()))
            .collect();

        Parts {
            units,
            common,
            other,
        }
    }

    fn parse_sentinel_terminated(&self, text: &str, sentinel: &str) -> Parts {
        let mut pairs = self.canonical_pairs(text);

        // take_while consumes the sentinel pair itself
        let region: Vec<_> = pairs
            .by_ref()
            .take_while(|(k, _)| *k != sentinel)
            .collect();
        let split = split_by_delimiter(region, self.delimiter);

        let common: BTreeMap<CanonicalKey, String> = pairs.collect();

        Parts {
            units: split.units,
            common,
            other: split.other,
        }
    }
}

struct Parts {
    units: Vec<UnitRecord>,
    common: CommonAttributes,
    other: Vec<(CanonicalKey, String)>,
}
