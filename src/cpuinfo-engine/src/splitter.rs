// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Partition an ordered pair sequence into per-unit records.

use crate::common::CanonicalKey;
use crate::record::UnitRecord;

/// Result of splitting: the unit records in input order, plus the pairs that
/// preceded the first delimiter and so belong to no unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Split {
    pub units: Vec<UnitRecord>,
    pub other: Vec<(CanonicalKey, String)>,
}

enum State {
    NoOpenRecord,
    OpenRecord(UnitRecord),
}

/// Split `pairs` into records, each starting at an occurrence of `delimiter`.
///
/// The number of records equals the number of delimiter occurrences.  Two
/// delimiters in a row yield a record holding only the first delimiter pair.
pub fn split_by_delimiter<I>(pairs: I, delimiter: &str) -> Split
where
    I: IntoIterator<Item = (CanonicalKey, String)>,
{
    let mut split = Split::default();
    let mut state = State::NoOpenRecord;

    for (key, value) in pairs {
        if key == delimiter {
            if let State::OpenRecord(record) = state {
                split.units.push(record);
            }
            let mut record = UnitRecord::new();
            record.insert(key, value);
            state = State::OpenRecord(record);
            continue;
        }

        match state {
            State::OpenRecord(ref mut record) => {
                record.insert(key, value);
            }
            State::NoOpenRecord => split.other.push((key, value)),
        }
    }

    if let State::OpenRecord(record) = state {
        split.units.push(record);
    }

    split
}
