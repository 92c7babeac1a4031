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

use super::Location;

/// A Flight Service Station.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FSS {
    pub id: String,
    pub name: String,
    pub radio_identifier: Option<String>,
    pub facility_type: Option<String>,
    pub hours: Option<String>,
    pub status: Option<String>,
    /// The location identifier of the airport the station is on.
    pub airport_id: Option<String>,
    pub location: Option<Location>,
    pub alternate_fss_id: Option<String>,
    /// Frequencies in kHz.
    pub frequencies: Vec<u32>,
    pub comm_facilities: Vec<String>,
    pub weather_radar: bool,
}
