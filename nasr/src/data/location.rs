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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic position.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Latitude in arc-seconds, negative south of the equator.
    pub latitude: f64,
    /// Longitude in arc-seconds, negative west of Greenwich.
    pub longitude: f64,
    /// Elevation in feet above mean sea level.
    pub elevation: Option<f64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Creates a location from coordinates in decimal degrees.
    pub fn from_degrees(latitude: f64, longitude: f64, elevation: Option<f64>) -> Self {
        Self::new(latitude * 3600.0, longitude * 3600.0, elevation)
    }

    /// Latitude in decimal degrees.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude / 3600.0
    }

    /// Longitude in decimal degrees.
    pub fn longitude_deg(&self) -> f64 {
        self.longitude / 3600.0
    }
}

/// A free-text remark on a record.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Remark {
    /// The element the remark refers to, if any.
    pub element: Option<String>,
    pub text: String,
}
