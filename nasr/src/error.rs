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
use std::io;

use nasr_format::{BindError, DecodeError, LayoutError};

use crate::Family;

/// An error while reading a NASR distribution.
///
/// Layout, bind and I/O errors fail the whole family. Decode errors, unknown
/// record types and orphaned records are scoped to a single record and are
/// passed to the [error handler] first, which decides whether the parse
/// continues.
///
/// [error handler]: crate::ErrorHandler
#[derive(Debug)]
pub enum Error {
    /// The distribution has no such file.
    NoSuchFile(String),
    Io(io::Error),
    /// The layout definition of the family is malformed.
    Layout { family: Family, error: LayoutError },
    /// A record parser doesn't fit the family's layout or CSV header.
    Bind { family: Family, error: BindError },
    /// A field of a record couldn't be decoded.
    Decode {
        family: Family,
        line: u64,
        error: DecodeError,
    },
    /// A record starts with an indicator the layout doesn't define.
    UnknownRecordType {
        family: Family,
        indicator: String,
        line: u64,
    },
    /// Sub-records whose base record never appeared.
    Orphaned { family: Family, key: String },
    /// A CSV file is malformed.
    Csv { family: Family, error: String },
    /// The task parsing the family was cancelled or panicked.
    Aborted { family: Family },
}

impl Error {
    /// Returns the family the error occurred in.
    pub fn family(&self) -> Option<Family> {
        match self {
            Self::NoSuchFile(_) | Self::Io(_) => None,
            Self::Layout { family, .. }
            | Self::Bind { family, .. }
            | Self::Decode { family, .. }
            | Self::UnknownRecordType { family, .. }
            | Self::Orphaned { family, .. }
            | Self::Csv { family, .. }
            | Self::Aborted { family } => Some(*family),
        }
    }

    /// Returns `true` if the error is scoped to a single record.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::UnknownRecordType { .. } | Self::Orphaned { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchFile(path) => write!(f, "no such file: {path}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Layout { family, error } => write!(f, "{family} layout: {error}"),
            Self::Bind { family, error } => write!(f, "{family}: {error}"),
            Self::Decode {
                family,
                line,
                error,
            } => write!(f, "{family} line {line}: {error}"),
            Self::UnknownRecordType {
                family,
                indicator,
                line,
            } => write!(f, "{family} line {line}: unknown record type '{indicator}'"),
            Self::Orphaned { family, key } => {
                write!(f, "{family}: sub-records of {key} have no base record")
            }
            Self::Csv { family, error } => write!(f, "{family} CSV: {error}"),
            Self::Aborted { family } => write!(f, "parsing {family} was aborted"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Layout { error, .. } => Some(error),
            Self::Bind { error, .. } => Some(error),
            Self::Decode { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A code that doesn't name any variant of an enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown code {}", self.0)
    }
}

impl error::Error for UnknownCode {}
