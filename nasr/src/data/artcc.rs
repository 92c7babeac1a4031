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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Location, Remark};

string_enum! {
    /// The kind of facility at an ARTCC site.
    pub enum ARTCCFacilityType {
        ARTCC => "ARTCC",
        CERAP => "CERAP",
        /// Remote Communications Air/Ground.
        RCAG => "RCAG",
        SECRA => "SECRA",
        /// Air Route Surveillance Radar.
        ARSR => "ARSR",
    }
}

string_enum! {
    /// The altitude structure a frequency is used in.
    pub enum FrequencyAltitude {
        Low => "LOW",
        High => "HIGH",
        UltraHigh => "ULTRA HIGH",
    }
}

/// The unique key of an ARTCC facility.
///
/// A center operates many sites, so the identifier alone isn't unique.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ARTCCKey {
    /// The center's identifier, e.g. `ZNY`.
    pub id: String,
    /// The name of the site's location.
    pub location: String,
    pub facility_type: ARTCCFacilityType,
}

impl fmt::Display for ARTCCKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.location, self.facility_type)
    }
}

/// A site of an Air Route Traffic Control Center.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ARTCC {
    pub key: ARTCCKey,
    pub name: String,
    pub alternate_name: Option<String>,
    pub icao_id: Option<String>,
    pub state_code: Option<String>,
    pub location: Option<Location>,
    pub frequencies: Vec<CommFrequency>,
    pub remarks: Vec<Remark>,
}

impl ARTCC {
    pub fn id(&self) -> &str {
        &self.key.id
    }
}

/// A communication frequency of an ARTCC site.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommFrequency {
    /// The frequency in kHz.
    pub frequency: u32,
    pub altitudes: Vec<FrequencyAltitude>,
    pub special_usage: Option<String>,
    /// Whether the frequency is charted.
    pub charted: bool,
    /// The location identifier of the airport the frequency serves.
    pub associated_airport_id: Option<String>,
    pub remarks: Vec<Remark>,
}
