// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! FAA NASR record decoding.
//!
//! The FAA publishes its National Airspace System Resources (NASR) every 28
//! days as fixed-width text files, each described by a layout-definition
//! text, and as CSV files with a header row. This crate interprets the
//! [layouts] at runtime and decodes single records into typed [values]:
//!
//! - A [`LayoutFamily`] holds one [`RecordTable`] per record type.
//! - A [`FixedWidthTransformer`] binds a record parser's field specs to a
//!   table and decodes lines by byte offset.
//! - A [`CsvTransformer`] binds columns to a CSV header and decodes rows by
//!   column name.
//!
//! # Examples
//!
//! Decode the base record of an ARTCC:
//!
//! ```
//! use nasr_format::{field, FixedWidthTransformer, LayoutFamily, Selector, Transform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = LayoutFamily::parse(
//!     "'AFF1' RECORD TYPE
//!      L AN 0004 00001 NONE RECORD TYPE INDICATOR
//!      L AN 0004 00005 DLID ARTCC IDENTIFIER
//!      L AN 0014 00009 AFF6 SITE LATITUDE",
//! )?;
//!
//! let table = layout.table("AFF1").expect("AFF1 should be defined");
//! let aff1 = FixedWidthTransformer::bind(
//!     table,
//!     &[
//!         field("id", Selector::Dlid(0), Transform::string().not_null()),
//!         field("latitude", Selector::Tag("AFF6"), Transform::geodesic()),
//!     ],
//! )?;
//!
//! let mut row = aff1.decode(b"AFF1ZNY 40-25-30.000N")?;
//! let id: String = row.take("id")?;
//! let latitude: f64 = row.take("latitude")?;
//!
//! assert_eq!(id, "ZNY");
//! assert_eq!(latitude, 145530.0); // arc-seconds
//! # Ok(())
//! # }
//! ```
//!
//! [layouts]: crate::layout
//! [values]: crate::Value

mod error;
mod field;
mod fixed;
mod header;
mod row;
mod transform;
mod value;

pub mod layout;

pub use error::{BindError, Cause, DecodeError, LayoutError, Position};
pub use field::{field, FieldDescriptor, FieldSpec, Selector};
pub use fixed::{latin1, FixedWidthTransformer};
pub use header::{column, BoundCsv, CsvColumn, CsvHeader, CsvTransformer};
pub use layout::{Identifier, Justification, LayoutFamily, RecordTable};
pub use row::{Entry, Row};
pub use transform::{
    parse_frequency, parse_geodesic, parse_geodesic_seconds, GenericFn, Kind, Nullability,
    Transform,
};
pub use value::{DateComponents, FromValue, Value};
