// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Parse loosely structured, repeating `key : value` descriptor text (the
//! canonical example being `/proc/cpuinfo`) into a normalized model: one record
//! per processing unit, the attributes every unit shares, and any annotations
//! that belong to no unit.
//!
//! The engine is a pure transform from text to [`DialectModel`]; callers own
//! reading the text.

#![forbid(unsafe_code)]

mod aggregate;
pub mod common;
pub mod dialect;
mod factory;
mod model;
mod record;
mod splitter;
mod tokenizer;

pub use aggregate::{CommonAttributes, aggregate};
pub use common::{CanonicalKey, Error, ErrorCode, ErrorKind, Result, canonicalize};
pub use dialect::{Architecture, Dialect, FieldRoles, Layout, Radix};
pub use factory::{build, build_from_reader, parse};
pub use model::DialectModel;
pub use record::{Iter as UnitRecordIter, UnitRecord};
pub use splitter::{Split, split_by_delimiter};
pub use tokenizer::{Pairs, RawPair, split_line, tokenize};
