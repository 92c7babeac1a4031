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

use std::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A partial calendar date, e.g. `04/2019` for an activation month.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateComponents {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl fmt::Display for DateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        Ok(())
    }
}

/// A decoded field value.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateComponents(DateComponents),
    /// Latitude or longitude in arc-seconds, negative for south or west.
    ArcSeconds(f64),
    /// A radio frequency in kHz.
    Frequency(u32),
    List(Vec<Value>),
    /// The field is blank, a placeholder, or not available in the source.
    Absent,
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// A name of the variant used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Integer(_) => "an integer",
            Self::Unsigned(_) => "an unsigned integer",
            Self::Float(_) => "a float",
            Self::Boolean(_) => "a boolean",
            Self::Date(_) => "a date",
            Self::DateComponents(_) => "date components",
            Self::ArcSeconds(_) => "arc-seconds",
            Self::Frequency(_) => "a frequency",
            Self::List(_) => "a list",
            Self::Absent => "absent",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Conversion of a decoded [`Value`] into a Rust type.
///
/// The error is the expected kind of value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, &'static str>;
}

macro_rules! from_value {
    ($t:ty, $expected:literal, $($pat:pat => $e:expr),+) => {
        impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self, &'static str> {
                match value {
                    $($pat => $e,)+
                    _ => Err($expected),
                }
            }
        }
    };
}

from_value!(String, "a string", Value::String(s) => Ok(s));
from_value!(bool, "a boolean", Value::Boolean(b) => Ok(b));
from_value!(NaiveDate, "a date", Value::Date(d) => Ok(d));
from_value!(DateComponents, "date components", Value::DateComponents(c) => Ok(c));
from_value!(i64, "an integer", Value::Integer(i) => Ok(i));
from_value!(u64, "an unsigned integer", Value::Unsigned(u) => Ok(u));
from_value!(
    u32,
    "an unsigned integer or frequency",
    Value::Unsigned(u) => u32::try_from(u).map_err(|_| "an unsigned 32 bit integer"),
    Value::Frequency(khz) => Ok(khz)
);
from_value!(
    f64,
    "a float or arc-seconds",
    Value::Float(f) => Ok(f),
    Value::ArcSeconds(s) => Ok(s)
);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Absent => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Absent => Ok(Vec::new()),
            Value::List(values) => values.into_iter().map(T::from_value).collect(),
            _ => Err("a list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_absent_to_none() {
        assert_eq!(Option::<String>::from_value(Value::Absent), Ok(None));
        assert_eq!(Vec::<u32>::from_value(Value::Absent), Ok(Vec::new()));
        assert_eq!(String::from_value(Value::Absent), Err("a string"));
    }

    #[test]
    fn converts_frequency_and_arc_seconds() {
        assert_eq!(u32::from_value(Value::Frequency(118100)), Ok(118100));
        assert_eq!(f64::from_value(Value::ArcSeconds(-1.5)), Ok(-1.5));
        assert_eq!(
            Vec::<u32>::from_value(Value::List(vec![
                Value::Frequency(122200),
                Value::Frequency(255400)
            ])),
            Ok(vec![122200, 255400])
        );
    }

    #[test]
    fn formats_date_components() {
        let c = DateComponents {
            year: 2019,
            month: Some(4),
            day: None,
        };
        assert_eq!(c.to_string(), "2019-04");
    }
}
