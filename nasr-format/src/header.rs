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

//! CSV decoding by column name.
//!
//! CSV files of a distribution are addressed by header name instead of byte
//! position. The FAA adds and drops optional columns between cycles, so a
//! column that isn't in a file's header decodes as absent while a missing
//! required column rejects the whole file.

use std::collections::HashMap;

use ::csv::ByteRecord;
use log::debug;

use crate::error::{DecodeError, Position};
use crate::fixed::latin1;
use crate::row::{Entry, Row};
use crate::transform::Transform;
use crate::value::Value;
use crate::BindError;

/// Maps column names of a header row to their zero-based index.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CsvHeader {
    indices: HashMap<String, usize>,
    width: usize,
}

impl CsvHeader {
    /// Creates the header from the column names.
    ///
    /// If a name appears more than once, the last column wins.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut indices = HashMap::new();
        let mut width = 0;

        for (i, name) in names.into_iter().enumerate() {
            indices.insert(name.as_ref().trim().to_owned(), i);
            width = i + 1;
        }

        Self { indices, width }
    }

    /// Creates the header from a raw header record.
    pub fn from_record(record: &ByteRecord) -> Self {
        Self::new(record.iter().map(latin1))
    }

    /// Returns the index of the column or `None` if it isn't available.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// A column a record parser wants to read.
#[derive(Clone, Debug)]
pub struct CsvColumn {
    pub name: &'static str,
    pub column: &'static str,
    pub transform: Transform,
    pub required: bool,
}

/// Shorthand to create an optional [`CsvColumn`].
pub fn column(name: &'static str, column: &'static str, transform: Transform) -> CsvColumn {
    CsvColumn {
        name,
        column,
        transform,
        required: false,
    }
}

impl CsvColumn {
    /// Marks the column as required in the header.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Decodes the rows of one CSV file.
#[derive(Clone, Debug)]
pub struct CsvTransformer {
    columns: Vec<CsvColumn>,
}

impl CsvTransformer {
    pub fn new(columns: Vec<CsvColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[CsvColumn] {
        &self.columns
    }

    /// Resolves the columns against a file's header.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn bind(&self, header: &CsvHeader) -> Result<BoundCsv<'_>, BindError> {
        let mut indices = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            let index = header.index(column.column);

            if index.is_none() {
                if column.required {
                    return Err(BindError::MissingColumn {
                        column: column.column,
                    });
                }
                debug!("column {} is not available", column.column);
            }

            indices.push(index);
        }

        Ok(BoundCsv {
            columns: &self.columns,
            indices,
            width: header.width(),
        })
    }
}

/// Columns resolved against the header of one file.
#[derive(Clone, Debug)]
pub struct BoundCsv<'a> {
    columns: &'a [CsvColumn],
    indices: Vec<Option<usize>>,
    width: usize,
}

impl BoundCsv<'_> {
    /// Decodes one data row.
    ///
    /// Returns `None` if the row is shorter than the header; such rows are
    /// truncated or trailing and skipped rather than padded.
    ///
    /// # Errors
    ///
    /// Returns the first column that fails to decode.
    pub fn decode(&self, record: &ByteRecord) -> Result<Option<Row>, DecodeError> {
        self.decode_fields(record.len(), |i| record.get(i).map(latin1))
    }

    /// Decodes one data row of already decoded strings.
    ///
    /// # Errors
    ///
    /// Returns the first column that fails to decode.
    pub fn decode_strings<S: AsRef<str>>(&self, row: &[S]) -> Result<Option<Row>, DecodeError> {
        self.decode_fields(row.len(), |i| row.get(i).map(|s| s.as_ref().to_owned()))
    }

    fn decode_fields<F>(&self, len: usize, get: F) -> Result<Option<Row>, DecodeError>
    where
        F: Fn(usize) -> Option<String>,
    {
        if len < self.width {
            return Ok(None);
        }

        let mut entries = Vec::with_capacity(self.columns.len());

        for (column, index) in self.columns.iter().zip(&self.indices) {
            let (position, raw) = match index {
                Some(i) => (Position::Column(*i), get(*i).unwrap_or_default()),
                None => {
                    entries.push(Entry {
                        name: column.name,
                        position: Position::Unavailable,
                        value: Value::Absent,
                    });
                    continue;
                }
            };

            let value = column
                .transform
                .apply(&raw)
                .map_err(|cause| DecodeError::new(column.name, position, &raw, cause))?;

            entries.push(Entry {
                name: column.name,
                position,
                value,
            });
        }

        Ok(Some(Row::new(entries)))
    }
}
