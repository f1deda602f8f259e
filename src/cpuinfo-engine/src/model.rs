// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::aggregate::CommonAttributes;
use crate::common::CanonicalKey;
use crate::dialect::{Architecture, Dialect};
use crate::record::UnitRecord;

/// The normalized contents of one descriptor text.
///
/// Built once per parse and read-only afterwards.  Equality is structural
/// over the units and the common attributes.
#[derive(Clone, Debug)]
pub struct DialectModel {
    architecture: Architecture,
    units: Vec<UnitRecord>,
    common: CommonAttributes,
    // prologues or annotations not associated with any unit
    other: Vec<(CanonicalKey, String)>,
}

impl DialectModel {
    pub(crate) fn new(
        architecture: Architecture,
        units: Vec<UnitRecord>,
        common: CommonAttributes,
        other: Vec<(CanonicalKey, String)>,
    ) -> Self {
        DialectModel {
            architecture,
            units,
            common,
            other,
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.architecture.dialect()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn units(&self) -> &[UnitRecord] {
        &self.units
    }

    pub fn common(&self) -> &CommonAttributes {
        &self.common
    }

    pub fn other(&self) -> &[(CanonicalKey, String)] {
        &self.other
    }

    pub fn model_name(&self) -> Option<&str> {
        self.common_value(self.dialect().fields.model_name)
    }

    /// The vendor-assigned model identifier ("45" for a Xeon E5-2630,
    /// `cpu_part` on aarch64).
    pub fn model(&self) -> Option<&str> {
        self.common_value(self.dialect().fields.model)
    }

    fn common_value(&self, key: &str) -> Option<&str> {
        self.common.get(key).map(|v| v.as_str())
    }

    /// Parse a common attribute as an integer using this dialect's radix for `key`.
    pub fn numeric(&self, key: &str) -> Option<u64> {
        self.common_value(key)
            .and_then(|v| self.dialect().radix(key).parse(v))
    }

    /// Flatten into dotted fact names rooted at `prefix`.
    ///
    /// `<prefix>.count`, `<prefix>.common.<key>`, `<prefix>.unit.<n>.<key>` and
    /// `<prefix>.other.<key>`.  Repeated `other` keys keep the last value.
    pub fn to_facts(&self, prefix: &str) -> BTreeMap<String, String> {
        let mut facts = BTreeMap::new();
        facts.insert(format!("{prefix}.count"), self.unit_count().to_string());

        for (k, v) in self.common.iter() {
            facts.insert(format!("{prefix}.common.{k}"), v.clone());
        }
        for (i, unit) in self.units.iter().enumerate() {
            for (k, v) in unit {
                facts.insert(format!("{prefix}.unit.{i}.{k}"), v.to_owned());
            }
        }
        for (k, v) in self.other.iter() {
            facts.insert(format!("{prefix}.other.{k}"), v.clone());
        }

        facts
    }
}

impl PartialEq for DialectModel {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units && self.common == other.common
    }
}

impl Eq for DialectModel {}

impl fmt::Display for DialectModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Processor count: {}", self.unit_count())?;
        writeln!(f, "model_name: {}", self.model_name().unwrap_or("None"))?;
        writeln!(f)?;
        for (k, v) in self.common.iter() {
            writeln!(f, "{k}: {v}")?;
        }
        writeln!(f)?;
        for (k, v) in self.other.iter() {
            writeln!(f, "{k}: {v}")?;
        }
        writeln!(f)
    }
}

impl Serialize for DialectModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DialectModel", 5)?;
        state.serialize_field("architecture", &self.architecture)?;
        state.serialize_field("count", &self.unit_count())?;
        state.serialize_field("common", &self.common)?;
        state.serialize_field("units", &self.units)?;
        state.serialize_field("other", &self.other)?;
        state.end()
    }
}
