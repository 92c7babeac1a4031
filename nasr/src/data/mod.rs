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

//! The parsed NASR data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod airport;
mod artcc;
mod fss;
mod index;
mod location;
mod navaid;
mod resolve;
mod state;

pub use airport::{Airport, AirportStatus, Attendance, FacilityType, Ownership, Runway, RunwayEnd};
pub use artcc::{ARTCCFacilityType, ARTCCKey, CommFrequency, FrequencyAltitude, ARTCC};
pub use fss::FSS;
pub use location::{Location, Remark};
pub use navaid::{Navaid, NavaidKey, NavaidType};
pub use resolve::Resolved;
pub use state::State;

use index::Index;

use crate::Family;

/// A finished collection of one family, ready to be published.
#[derive(Clone, PartialEq, Debug)]
pub enum Collection {
    States(Vec<State>),
    Airports(Vec<Airport>),
    ARTCCs(Vec<ARTCC>),
    FSSs(Vec<FSS>),
    Navaids(Vec<Navaid>),
}

impl Collection {
    pub fn family(&self) -> Family {
        match self {
            Self::States(_) => Family::States,
            Self::Airports(_) => Family::Airports,
            Self::ARTCCs(_) => Family::ARTCCs,
            Self::FSSs(_) => Family::FSSs,
            Self::Navaids(_) => Family::Navaids,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::States(v) => v.len(),
            Self::Airports(v) => v.len(),
            Self::ARTCCs(v) => v.len(),
            Self::FSSs(v) => v.len(),
            Self::Navaids(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The records of one NASR distribution.
///
/// A collection is `None` if its family wasn't parsed. Records refer to each
/// other by identifier only; the [`Resolved`] views look the referenced
/// records up on access, so the data serializes without its references and
/// resolves the same way after it's deserialized.
///
/// # Examples
///
/// ```
/// # use nasr::NASRData;
/// # fn print(data: &NASRData) {
/// if let Some(jfk) = data.airport("JFK") {
///     let state = jfk.state().map(|s| s.name.as_str());
///     println!("{} is in {}", jfk.name, state.unwrap_or("an unknown state"));
/// }
/// # }
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NASRData {
    states: Option<Vec<State>>,
    airports: Option<Vec<Airport>>,
    artccs: Option<Vec<ARTCC>>,
    fsss: Option<Vec<FSS>>,
    navaids: Option<Vec<Navaid>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: Index,
}

impl NASRData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection of the family.
    pub fn publish(&mut self, collection: Collection) {
        match collection {
            Collection::States(states) => {
                self.states = Some(states);
                self.index.reset_states();
            }
            Collection::Airports(airports) => {
                self.airports = Some(airports);
                self.index.reset_airports();
            }
            Collection::ARTCCs(artccs) => {
                self.artccs = Some(artccs);
                self.index.reset_artccs();
            }
            Collection::FSSs(fsss) => {
                self.fsss = Some(fsss);
                self.index.reset_fsss();
            }
            Collection::Navaids(navaids) => {
                self.navaids = Some(navaids);
                self.index.reset_navaids();
            }
        }
    }

    pub fn all_states(&self) -> Option<&[State]> {
        self.states.as_deref()
    }

    pub fn all_airports(&self) -> Option<&[Airport]> {
        self.airports.as_deref()
    }

    pub fn all_artccs(&self) -> Option<&[ARTCC]> {
        self.artccs.as_deref()
    }

    pub fn all_fsss(&self) -> Option<&[FSS]> {
        self.fsss.as_deref()
    }

    pub fn all_navaids(&self) -> Option<&[Navaid]> {
        self.navaids.as_deref()
    }

    /// Pairs the record with this data to resolve its references.
    pub fn resolve<'a, T>(&'a self, record: &'a T) -> Resolved<'a, T> {
        Resolved::new(self, record)
    }

    /// Returns the state with the postal code.
    pub fn state(&self, postal_code: &str) -> Option<&State> {
        let states = self.all_states()?;
        first(states, self.index.states(states).get(postal_code))
    }

    /// Returns the airport with the location identifier.
    pub fn airport(&self, lid: &str) -> Option<Resolved<'_, Airport>> {
        let airports = self.all_airports()?;
        first(airports, self.index.airports(airports).get(lid)).map(|a| self.resolve(a))
    }

    /// Returns all sites of the ARTCC in key order.
    pub fn artccs(&self, id: &str) -> Vec<Resolved<'_, ARTCC>> {
        let Some(artccs) = self.all_artccs() else {
            return Vec::new();
        };

        all(artccs, self.index.artccs(artccs).get(id))
            .map(|a| self.resolve(a))
            .collect()
    }

    /// Returns the ARTCC site with the key.
    pub fn artcc(&self, key: &ARTCCKey) -> Option<Resolved<'_, ARTCC>> {
        let artccs = self.all_artccs()?;
        first(artccs, self.index.artcc_keys(artccs).get(key)).map(|a| self.resolve(a))
    }

    /// Returns the FSS with the identifier.
    pub fn fss(&self, id: &str) -> Option<Resolved<'_, FSS>> {
        let fsss = self.all_fsss()?;
        first(fsss, self.index.fsss(fsss).get(id)).map(|f| self.resolve(f))
    }

    /// Returns the first navaid with the identifier.
    ///
    /// Navaids of different types may share an identifier, e.g. a VOR and an
    /// NDB. Use [`navaids_with_id`](Self::navaids_with_id) to get all of them.
    pub fn navaid(&self, id: &str) -> Option<Resolved<'_, Navaid>> {
        let navaids = self.all_navaids()?;
        first(navaids, self.index.navaids(navaids).get(id)).map(|n| self.resolve(n))
    }

    /// Returns all navaids with the identifier.
    pub fn navaids_with_id(&self, id: &str) -> Vec<Resolved<'_, Navaid>> {
        let Some(navaids) = self.all_navaids() else {
            return Vec::new();
        };

        all(navaids, self.index.navaids(navaids).get(id))
            .map(|n| self.resolve(n))
            .collect()
    }
}

impl PartialEq for NASRData {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.airports == other.airports
            && self.artccs == other.artccs
            && self.fsss == other.fsss
            && self.navaids == other.navaids
    }
}

fn first<'a, T>(items: &'a [T], positions: Option<&Vec<usize>>) -> Option<&'a T> {
    positions
        .and_then(|p| p.first())
        .and_then(|&i| items.get(i))
}

fn all<'a, T>(
    items: &'a [T],
    positions: Option<&'a Vec<usize>>,
) -> impl Iterator<Item = &'a T> + 'a {
    positions
        .into_iter()
        .flatten()
        .filter_map(|&i| items.get(i))
}
