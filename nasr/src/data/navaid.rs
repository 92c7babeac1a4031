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
use nasr_format::DateComponents;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Location, Remark};

string_enum! {
    pub enum NavaidType {
        VOR => "VOR",
        VORTAC => "VORTAC",
        VORDME => "VOR/DME",
        TACAN => "TACAN",
        DME => "DME",
        NDB => "NDB",
        NDBDME => "NDB/DME",
        FanMarker => "FAN MARKER",
        MarineNDB => "MARINE NDB",
        /// VOR test facility.
        VOT => "VOT",
    }
}

/// The unique key of a navaid.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavaidKey {
    pub id: String,
    pub navaid_type: NavaidType,
    /// The city the navaid is associated with.
    pub city: String,
}

impl fmt::Display for NavaidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.navaid_type, self.city)
    }
}

/// A navigation aid.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Navaid {
    pub key: NavaidKey,
    pub name: String,
    pub effective_date: NaiveDate,
    pub state_code: Option<String>,
    pub status: Option<String>,
    pub location: Location,
    /// The frequency in kHz.
    pub frequency: Option<u32>,
    pub high_altitude_artcc_id: Option<String>,
    pub low_altitude_artcc_id: Option<String>,
    pub tie_in_fss_id: Option<String>,
    pub commissioned: Option<DateComponents>,
    pub public_use: bool,
    pub remarks: Vec<Remark>,
}

impl Navaid {
    pub fn id(&self) -> &str {
        &self.key.id
    }
}
