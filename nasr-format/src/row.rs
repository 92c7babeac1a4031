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

use std::str::FromStr;

use crate::error::{Cause, DecodeError, Position};
use crate::value::{FromValue, Value};

/// A decoded field.
#[derive(Clone, PartialEq, Debug)]
pub struct Entry {
    pub name: &'static str,
    pub position: Position,
    pub value: Value,
}

/// The decoded fields of one record in schema order.
///
/// Values are taken out by name and converted into the type the record
/// expects. Taking a field twice yields an absent value the second time.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Row {
    entries: Vec<Entry>,
}

impl Row {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value of the field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    /// Takes the value of the field and converts it.
    ///
    /// # Errors
    ///
    /// Returns an error if there's no such field or if it has a different type.
    pub fn take<T: FromValue>(&mut self, name: &'static str) -> Result<T, DecodeError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| DecodeError::new(name, Position::Unavailable, "", Cause::UnknownField))?;

        let value = std::mem::replace(&mut entry.value, Value::Absent);
        let found = value.kind();
        let raw = format!("{value:?}");

        T::from_value(value).map_err(|expected| {
            DecodeError::new(
                name,
                entry.position,
                &raw,
                Cause::TypeMismatch { expected, found },
            )
        })
    }

    /// Takes a string field and parses it into `T`.
    ///
    /// Absent values are `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value isn't one of `T`'s variants.
    pub fn take_parsed<T: FromStr>(
        &mut self,
        name: &'static str,
        expected: &'static str,
    ) -> Result<Option<T>, DecodeError> {
        let position = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .map_or(Position::Unavailable, |e| e.position);

        self.take::<Option<String>>(name)?
            .map(|s| {
                s.parse().map_err(|_| {
                    DecodeError::new(name, position, &s, Cause::InvalidVariant { expected })
                })
            })
            .transpose()
    }
}
