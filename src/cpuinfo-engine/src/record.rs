// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::slice;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::common::CanonicalKey;
use crate::dialect::Radix;

/// The fields describing one processing unit, in first-seen order.
///
/// Inserting a key that is already present overwrites its value in place
/// (last write wins), so a stanza that repeats a field keeps the final value
/// at the position where the field first appeared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitRecord {
    fields: Vec<(CanonicalKey, String)>,
}

impl UnitRecord {
    pub fn new() -> Self {
        Default::default()
    }

    /// Insert `key`, returning the value it replaced if it was already set.
    pub fn insert(&mut self, key: CanonicalKey, value: String) -> Option<String> {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &CanonicalKey> {
        self.fields.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.fields.iter(),
        }
    }

    /// Parse the value at `key` as an integer written in `radix`.
    pub fn numeric(&self, key: &str, radix: Radix) -> Option<u64> {
        self.get(key).and_then(|v| radix.parse(v))
    }
}

pub struct Iter<'a> {
    inner: slice::Iter<'a, (CanonicalKey, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a CanonicalKey, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a UnitRecord {
    type Item = (&'a CanonicalKey, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(CanonicalKey, String)> for UnitRecord {
    fn from_iter<T: IntoIterator<Item = (CanonicalKey, String)>>(iter: T) -> Self {
        let mut record = UnitRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for UnitRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in self.fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
