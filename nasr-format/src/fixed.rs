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

//! Fixed-width record decoding.

use crate::error::{DecodeError, Position};
use crate::field::{FieldDescriptor, FieldSpec};
use crate::layout::RecordTable;
use crate::row::{Entry, Row};
use crate::BindError;

/// Decodes ISO-Latin-1 bytes, which map one-to-one onto the first 256 code
/// points.
pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Decodes the records of one record type.
#[derive(Clone, Debug)]
pub struct FixedWidthTransformer {
    indicator: String,
    length: usize,
    fields: Vec<FieldDescriptor>,
}

impl FixedWidthTransformer {
    /// Binds the field specs to the record table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lacks a field a spec selects.
    pub fn bind(table: &RecordTable, specs: &[FieldSpec]) -> Result<Self, BindError> {
        let fields = specs
            .iter()
            .map(|spec| FieldDescriptor::bind(table, spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            indicator: table.indicator().to_owned(),
            length: table.len(),
            fields,
        })
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// The declared length of the record.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Decodes one record.
    ///
    /// Fields beyond the end of a short record are clipped and read as blank.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails to decode.
    pub fn decode(&self, record: &[u8]) -> Result<Row, DecodeError> {
        let mut entries = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let start = field.range.start.min(record.len());
            let end = field.range.end.min(record.len());
            let raw = latin1(&record[start..end]);

            let value = field
                .transform
                .apply(&raw)
                .map_err(|cause| {
                    DecodeError::new(field.name, Position::Offset(start), &raw, cause)
                })?;

            entries.push(Entry {
                name: field.name,
                position: Position::Offset(field.range.start),
                value,
            });
        }

        Ok(Row::new(entries))
    }
}
