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

use std::error;
use std::fmt;

/// An error in a layout-definition text.
///
/// Layout errors are structural: a family whose layout fails to parse can't be
/// decoded at all.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum LayoutError {
    /// The text contains no record type table.
    Empty,
    /// A record type banner is not followed by any field.
    EmptyTable { indicator: String },
    /// A field row appears before the first record type banner.
    FieldOutsideTable { line: usize },
    /// The field starts before the end of the previous field.
    FieldBeforeGroup {
        indicator: String,
        line: usize,
        start: usize,
        previous_end: usize,
    },
    /// The field leaves bytes between itself and the previous field uncovered.
    Gap {
        indicator: String,
        line: usize,
        start: usize,
        previous_end: usize,
    },
    /// The field is zero bytes long or starts at column zero.
    InvalidField { indicator: String, line: usize },
    /// The fields don't add up to the declared record length.
    LengthMismatch {
        indicator: String,
        declared: usize,
        actual: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout contains no record type"),
            Self::EmptyTable { indicator } => {
                write!(f, "record type '{indicator}' has no fields")
            }
            Self::FieldOutsideTable { line } => {
                write!(f, "field on line {line} is defined outside a record type")
            }
            Self::FieldBeforeGroup {
                indicator,
                line,
                start,
                previous_end,
            } => write!(
                f,
                "field on line {line} of '{indicator}' starts at {start} before the previous \
                 field ends at {previous_end} (field defined before group)"
            ),
            Self::Gap {
                indicator,
                line,
                start,
                previous_end,
            } => write!(
                f,
                "field on line {line} of '{indicator}' starts at {start} but the previous \
                 field ends at {previous_end}"
            ),
            Self::InvalidField { indicator, line } => {
                write!(f, "field on line {line} of '{indicator}' has an invalid start or length")
            }
            Self::LengthMismatch {
                indicator,
                declared,
                actual,
            } => write!(
                f,
                "record type '{indicator}' should be {declared} byte long but its fields \
                 cover {actual}"
            ),
        }
    }
}

impl error::Error for LayoutError {}

/// Where a decoded field was read from.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Position {
    /// Byte offset into a fixed-width record.
    Offset(usize),
    /// Zero-based column of a CSV row.
    Column(usize),
    /// The field isn't available in this source.
    Unavailable,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(offset) => write!(f, "byte {offset}"),
            Self::Column(column) => write!(f, "column {column}"),
            Self::Unavailable => write!(f, "unavailable column"),
        }
    }
}

/// Why a field failed to decode.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Cause {
    /// A non-null field is blank.
    Required,
    NotAnInteger,
    NotAFloat,
    InvalidDate { format: &'static str },
    InvalidFrequency,
    InvalidGeodesic,
    MissingHemisphere,
    /// The value has a variant the record doesn't expect.
    InvalidVariant { expected: &'static str },
    /// The decoded value has a different type than requested.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The record has no field with this name.
    UnknownField,
    /// A generic transformer rejected the value.
    Other(String),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "value is required"),
            Self::NotAnInteger => write!(f, "should be an integer"),
            Self::NotAFloat => write!(f, "should be a decimal number"),
            Self::InvalidDate { format } => write!(f, "should be a date formatted {format}"),
            Self::InvalidFrequency => write!(f, "should be a frequency formatted MHz.kHz"),
            Self::InvalidGeodesic => write!(f, "should be a coordinate formatted DD-MM-SS.SSSH"),
            Self::MissingHemisphere => write!(f, "coordinate has no hemisphere"),
            Self::InvalidVariant { expected } => write!(f, "should be {expected}"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "should be {expected} but is {found}")
            }
            Self::UnknownField => write!(f, "no such field"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

/// A field of a single record that couldn't be decoded.
///
/// The error is scoped to one record, so callers may log it and continue with
/// the next one.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct DecodeError {
    pub field: &'static str,
    pub position: Position,
    pub raw: String,
    pub cause: Cause,
}

impl DecodeError {
    pub fn new(field: &'static str, position: Position, raw: &str, cause: Cause) -> Self {
        Self {
            field,
            position,
            raw: raw.to_owned(),
            cause,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} is \"{}\" but {}",
            self.field, self.position, self.raw, self.cause
        )
    }
}

impl error::Error for DecodeError {}

/// A schema that doesn't fit the layout or CSV header it's bound to.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BindError {
    /// The layout has no table for the record type.
    MissingRecordType { indicator: String },
    /// The record type has no field matching the selector.
    MissingField {
        indicator: String,
        field: &'static str,
        selector: String,
    },
    /// The CSV header lacks a required column.
    MissingColumn { column: &'static str },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRecordType { indicator } => {
                write!(f, "layout has no record type '{indicator}'")
            }
            Self::MissingField {
                indicator,
                field,
                selector,
            } => write!(
                f,
                "record type '{indicator}' has no field {selector} for {field}"
            ),
            Self::MissingColumn { column } => write!(f, "missing required column {column}"),
        }
    }
}

impl error::Error for BindError {}
