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
use std::ops::Deref;

use super::{Airport, CommFrequency, NASRData, Navaid, State, ARTCC, FSS};

/// A record together with the data it belongs to.
///
/// The view dereferences to the record and adds accessors that resolve the
/// record's references by identifier. A reference whose record doesn't exist
/// resolves to `None` or an empty list.
pub struct Resolved<'a, T> {
    data: &'a NASRData,
    record: &'a T,
}

impl<'a, T> Resolved<'a, T> {
    pub(crate) fn new(data: &'a NASRData, record: &'a T) -> Self {
        Self { data, record }
    }

    /// Returns the record with the lifetime of the data.
    pub fn record(&self) -> &'a T {
        self.record
    }

    pub fn data(&self) -> &'a NASRData {
        self.data
    }
}

impl<T> Clone for Resolved<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolved<'_, T> {}

impl<T> Deref for Resolved<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.record
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolved<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Resolved<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl<'a> Resolved<'a, Airport> {
    /// Returns the state the airport is associated with.
    pub fn state(&self) -> Option<&'a State> {
        self.data.state(self.record.state_code.as_deref()?)
    }

    /// Returns the sites of the ARTCC whose boundary contains the airport.
    pub fn boundary_artccs(&self) -> Vec<Resolved<'a, ARTCC>> {
        artccs(self.data, self.record.boundary_artcc_id.as_deref())
    }

    /// Returns the sites of the ARTCC responsible for the airport.
    pub fn responsible_artccs(&self) -> Vec<Resolved<'a, ARTCC>> {
        artccs(self.data, self.record.responsible_artcc_id.as_deref())
    }

    pub fn tie_in_fss(&self) -> Option<Resolved<'a, FSS>> {
        self.data.fss(self.record.tie_in_fss_id.as_deref()?)
    }

    pub fn alternate_fss(&self) -> Option<Resolved<'a, FSS>> {
        self.data.fss(self.record.alternate_fss_id.as_deref()?)
    }
}

impl<'a> Resolved<'a, ARTCC> {
    pub fn state(&self) -> Option<&'a State> {
        self.data.state(self.record.state_code.as_deref()?)
    }

    /// Returns the site's frequencies, each resolvable to its airport.
    pub fn frequencies(&self) -> impl Iterator<Item = Resolved<'a, CommFrequency>> + 'a {
        let data = self.data;
        self.record
            .frequencies
            .iter()
            .map(move |frequency| Resolved::new(data, frequency))
    }
}

impl<'a> Resolved<'a, CommFrequency> {
    /// Returns the airport the frequency serves.
    pub fn associated_airport(&self) -> Option<Resolved<'a, Airport>> {
        self.data
            .airport(self.record.associated_airport_id.as_deref()?)
    }
}

impl<'a> Resolved<'a, FSS> {
    /// Returns the airport the station is on.
    pub fn airport(&self) -> Option<Resolved<'a, Airport>> {
        self.data.airport(self.record.airport_id.as_deref()?)
    }

    pub fn alternate_fss(&self) -> Option<Resolved<'a, FSS>> {
        self.data.fss(self.record.alternate_fss_id.as_deref()?)
    }
}

impl<'a> Resolved<'a, Navaid> {
    pub fn state(&self) -> Option<&'a State> {
        self.data.state(self.record.state_code.as_deref()?)
    }

    pub fn high_altitude_artccs(&self) -> Vec<Resolved<'a, ARTCC>> {
        artccs(self.data, self.record.high_altitude_artcc_id.as_deref())
    }

    pub fn low_altitude_artccs(&self) -> Vec<Resolved<'a, ARTCC>> {
        artccs(self.data, self.record.low_altitude_artcc_id.as_deref())
    }

    pub fn tie_in_fss(&self) -> Option<Resolved<'a, FSS>> {
        self.data.fss(self.record.tie_in_fss_id.as_deref()?)
    }
}

fn artccs<'a>(data: &'a NASRData, id: Option<&str>) -> Vec<Resolved<'a, ARTCC>> {
    id.map(|id| data.artccs(id)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::data;
    use crate::data::Collection;

    #[test]
    fn resolves_airport_references() {
        let data = data();
        let jfk = data.airport("JFK").expect("JFK should exist");

        assert_eq!(jfk.state().map(|s| s.postal_code.as_str()), Some("NY"));
        assert_eq!(jfk.boundary_artccs().len(), 2);
        assert_eq!(
            jfk.responsible_artccs()
                .first()
                .map(|a| a.key.location.as_str()),
            Some("NASHUA")
        );
        assert_eq!(jfk.tie_in_fss().map(|f| f.id.clone()), Some("ISP".into()));
        // there is no BDR station
        assert!(jfk.alternate_fss().is_none());
    }

    #[test]
    fn resolves_station_airport() {
        let data = data();
        let isp = data.fss("ISP").expect("ISP should exist");

        let airport = isp.airport().expect("ISP should be on an airport");
        assert_eq!(airport.site_number, "15544.*A");
        assert_eq!(airport.tie_in_fss().map(|f| f.record()), Some(isp.record()));
    }

    #[test]
    fn missing_references_are_empty() {
        let mut data = data();
        data.publish(Collection::States(Vec::new()));

        let jfk = data.airport("JFK").expect("JFK should exist");
        assert!(jfk.state().is_none());

        let mut unassigned = jfk.record().clone();
        unassigned.boundary_artcc_id = None;
        assert!(data.resolve(&unassigned).boundary_artccs().is_empty());
    }

    #[test]
    fn resolves_artcc_state() {
        let data = data();
        let sites = data.artccs("ZBW");
        // NH isn't in the states
        assert!(sites.first().and_then(|zbw| zbw.state()).is_none());

        let sites = data.artccs("ZNY");
        assert_eq!(
            sites.first().and_then(|zny| zny.state()).map(|s| s.name.as_str()),
            Some("NEW YORK")
        );
    }
}
