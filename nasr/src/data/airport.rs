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

use chrono::NaiveDate;
use nasr_format::DateComponents;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Location, Remark};

string_enum! {
    /// The kind of landing facility.
    pub enum FacilityType {
        Airport => "AIRPORT" | "A",
        Balloonport => "BALLOONPORT" | "B",
        SeaplaneBase => "SEAPLANE BASE" | "C",
        Gliderport => "GLIDERPORT" | "G",
        Heliport => "HELIPORT" | "H",
        Ultralight => "ULTRALIGHT" | "U",
    }
}

string_enum! {
    pub enum Ownership {
        Public => "PU",
        Private => "PR",
        AirForce => "MA",
        Navy => "MN",
        Army => "MR",
        CoastGuard => "CG",
    }
}

string_enum! {
    pub enum AirportStatus {
        Operational => "O",
        ClosedIndefinitely => "CI",
        ClosedPermanently => "CP",
    }
}

/// A landing facility.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    /// The FAA site number, which is unique across all landing facilities.
    pub site_number: String,
    pub facility_type: FacilityType,
    /// The location identifier, e.g. `JFK`.
    pub lid: String,
    pub effective_date: NaiveDate,
    /// Postal code of the state the airport is associated with.
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub name: String,
    pub ownership: Option<Ownership>,
    pub public_use: bool,
    pub location: Location,
    /// Magnetic variation in degrees, negative if west.
    pub magnetic_variation: Option<f64>,
    pub boundary_artcc_id: Option<String>,
    pub responsible_artcc_id: Option<String>,
    pub tie_in_fss_id: Option<String>,
    pub alternate_fss_id: Option<String>,
    pub notam_id: Option<String>,
    pub activation_date: Option<DateComponents>,
    pub status: Option<AirportStatus>,
    pub fuel_types: Vec<String>,
    pub customs_entry: bool,
    pub runways: Vec<Runway>,
    pub attendance: Vec<Attendance>,
    pub remarks: Vec<Remark>,
}

/// A runway of an airport.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Runway {
    /// The runway's designator, e.g. `04L/22R`.
    pub identification: String,
    /// Length in feet.
    pub length: Option<u64>,
    /// Width in feet.
    pub width: Option<u64>,
    pub surface: Option<String>,
    pub edge_lights: Option<String>,
    pub base_end: Option<RunwayEnd>,
    pub reciprocal_end: Option<RunwayEnd>,
}

/// One end of a runway.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunwayEnd {
    pub identifier: String,
    pub location: Option<Location>,
}

/// An attendance schedule of an airport.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attendance {
    pub sequence: u64,
    pub schedule: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_of_both_formats() {
        assert_eq!("AIRPORT".parse(), Ok(FacilityType::Airport));
        assert_eq!("A".parse(), Ok(FacilityType::Airport));
        assert_eq!("SEAPLANE BASE".parse(), Ok(FacilityType::SeaplaneBase));
        assert!("X".parse::<FacilityType>().is_err());
        assert_eq!(FacilityType::Heliport.to_string(), "HELIPORT");
        assert_eq!(Ownership::CoastGuard.to_string(), "CG");
    }
}
