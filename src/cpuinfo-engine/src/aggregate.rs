// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::{BTreeMap, BTreeSet};

use crate::common::CanonicalKey;
use crate::record::UnitRecord;

/// Fields whose value is the same for every unit.
pub type CommonAttributes = BTreeMap<CanonicalKey, String>;

/// Compute the attributes shared by all `units`.
///
/// A key is common when it is present in every unit and takes exactly one
/// distinct value across them.  A key missing from some unit contributes no
/// value for that unit (it is not treated as an empty string) and is excluded.
/// The result doesn't depend on unit order.
pub fn aggregate(units: &[UnitRecord]) -> CommonAttributes {
    // key -> (distinct values, number of units carrying the key)
    let mut seen: BTreeMap<&CanonicalKey, (BTreeSet<&str>, usize)> = BTreeMap::new();
    for unit in units {
        for (key, value) in unit {
            let (values, present) = seen.entry(key).or_default();
            values.insert(value);
            *present += 1;
        }
    }

    seen.into_iter()
        .filter(|(_, (values, present))| values.len() == 1 && *present == units.len())
        .filter_map(|(key, (values, _))| {
            values
                .into_iter()
                .next_back()
                .map(|v| (key.clone(), v.to_owned()))
        })
        .collect()
}
