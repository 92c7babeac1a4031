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

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use nasr_format::{field, DecodeError, FieldSpec, Row, Selector, Transform};

use super::{
    each_record, take_variant, take_variants, Accumulator, Builder, ErrorHandler, RecordParser,
    Source,
};
use crate::config::ParserConfig;
use crate::data::{ARTCCKey, Collection, CommFrequency, Location, Remark, ARTCC};
use crate::distribution::Distribution;
use crate::error::Error;
use crate::store::Store;
use crate::Family;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Record {
    Base,
    Remark,
    Frequency,
    FrequencyRemark,
}

fn key_fields() -> Vec<FieldSpec> {
    vec![
        field("id", Selector::Dlid(0), Transform::string().not_null()),
        field("location", Selector::Dlid(1), Transform::string().not_null()),
        field("facility_type", Selector::Dlid(2), Transform::string().not_null()),
    ]
}

fn schema() -> Vec<(&'static str, Record, Vec<FieldSpec>)> {
    let with_key = |fields: Vec<FieldSpec>| -> Vec<FieldSpec> {
        key_fields().into_iter().chain(fields).collect()
    };

    vec![
        (
            "AFF1",
            Record::Base,
            with_key(vec![
                field("name", Selector::Tag("AFF1"), Transform::string().compact().not_null()),
                field("alternate_name", Selector::Tag("AFF3"), Transform::string().compact()),
                field("state_code", Selector::Tag("AFF6"), Transform::string()),
                field("latitude", Selector::Tag("AFF7"), Transform::geodesic()),
                field("longitude", Selector::Tag("AFF8"), Transform::geodesic()),
                field("icao_id", Selector::Tag("AFF9"), Transform::string()),
            ]),
        ),
        (
            "AFF2",
            Record::Remark,
            with_key(vec![
                field("element", Selector::Tag("AFF10"), Transform::string()),
                field("text", Selector::Tag("AFF11"), Transform::string().compact().not_null()),
            ]),
        ),
        (
            "AFF3",
            Record::Frequency,
            with_key(vec![
                field("frequency", Selector::Tag("AFF12"), Transform::frequency().not_null()),
                field(
                    "altitudes",
                    Selector::Tag("AFF13"),
                    Transform::delimited_array("/", Transform::string()),
                ),
                field("special_usage", Selector::Tag("AFF14"), Transform::string()),
                field("charted", Selector::Tag("AFF15"), Transform::boolean("Y")),
                field("airport_id", Selector::Tag("AFF16"), Transform::string()),
            ]),
        ),
        (
            "AFF4",
            Record::FrequencyRemark,
            with_key(vec![
                field("frequency", Selector::Tag("AFF12"), Transform::frequency().not_null()),
                field("element", Selector::Tag("AFF17"), Transform::string()),
                field("text", Selector::Tag("AFF18"), Transform::string().compact().not_null()),
            ]),
        ),
    ]
}

#[derive(Default)]
struct ARTCCBuilder {
    artcc: Option<ARTCC>,
    remarks: Vec<Remark>,
    frequencies: Vec<CommFrequency>,
    // remarks on frequencies in kHz, attached when the site is built
    frequency_remarks: Vec<(u32, Remark)>,
}

impl Builder for ARTCCBuilder {
    type Output = ARTCC;

    fn orphans(&self) -> Vec<String> {
        self.frequency_remarks
            .iter()
            .filter(|(khz, _)| !self.frequencies.iter().any(|f| f.frequency == *khz))
            .map(|(khz, _)| format!("remark on {khz} kHz"))
            .collect()
    }

    fn build(self) -> Option<ARTCC> {
        let mut artcc = self.artcc?;
        let mut frequencies = self.frequencies;

        for (khz, remark) in self.frequency_remarks {
            if let Some(frequency) = frequencies.iter_mut().find(|f| f.frequency == khz) {
                frequency.remarks.push(remark);
            }
        }

        artcc.remarks = self.remarks;
        artcc.frequencies = frequencies;
        Some(artcc)
    }
}

type ARTCCs = Accumulator<ARTCCKey, ARTCCBuilder>;

fn fold(artccs: &mut ARTCCs, record: Record, mut row: Row) -> Result<(), DecodeError> {
    let key = ARTCCKey {
        id: row.take("id")?,
        location: row.take("location")?,
        facility_type: take_variant(&mut row, "facility_type", "an ARTCC facility type")?,
    };

    match record {
        Record::Base => {
            let artcc = artcc(key.clone(), &mut row)?;
            artccs.entry(key).artcc = Some(artcc);
        }
        Record::Remark => {
            let remark = remark(&mut row)?;
            artccs.entry(key).remarks.push(remark);
        }
        Record::Frequency => {
            let frequency = CommFrequency {
                frequency: row.take("frequency")?,
                altitudes: take_variants(&mut row, "altitudes", "LOW, HIGH or ULTRA HIGH")?,
                special_usage: row.take("special_usage")?,
                charted: row.take::<Option<bool>>("charted")?.unwrap_or_default(),
                associated_airport_id: row.take("airport_id")?,
                remarks: Vec::new(),
            };
            artccs.entry(key).frequencies.push(frequency);
        }
        Record::FrequencyRemark => {
            let khz = row.take("frequency")?;
            let remark = remark(&mut row)?;
            artccs.entry(key).frequency_remarks.push((khz, remark));
        }
    }

    Ok(())
}

fn artcc(key: ARTCCKey, row: &mut Row) -> Result<ARTCC, DecodeError> {
    let latitude: Option<f64> = row.take("latitude")?;
    let longitude: Option<f64> = row.take("longitude")?;

    Ok(ARTCC {
        key,
        name: row.take("name")?,
        alternate_name: row.take("alternate_name")?,
        icao_id: row.take("icao_id")?,
        state_code: row.take("state_code")?,
        location: latitude
            .zip(longitude)
            .map(|(latitude, longitude)| Location::new(latitude, longitude, None)),
        frequencies: Vec::new(),
        remarks: Vec::new(),
    })
}

fn remark(row: &mut Row) -> Result<Remark, DecodeError> {
    Ok(Remark {
        element: row.take("element")?,
        text: row.take("text")?,
    })
}

/// Parses the sites of the air route traffic control centers with their
/// remarks and frequencies.
///
/// A center has many sites, each keyed by the center's identifier, the
/// site's location and its facility type.
pub struct ARTCCParser {
    source: Source,
}

impl ARTCCParser {
    pub fn new(distribution: Arc<dyn Distribution>, config: ParserConfig, store: Store) -> Self {
        Self {
            source: Source::new(Family::ARTCCs, distribution, config, store),
        }
    }
}

#[async_trait]
impl RecordParser for ARTCCParser {
    fn family(&self) -> Family {
        self.source.family()
    }

    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error> {
        let file = self.source.fixed_width_file()?;
        info!("parsing ARTCCs from {file}");

        let dispatch = self.source.dispatch(schema()).await?;
        let mut lines = self.source.lines(file).await?;
        let mut pacer = self.source.pacer();
        let mut artccs = ARTCCs::new();

        each_record(&mut lines, &dispatch, &mut pacer, handler, |record, row| {
            fold(&mut artccs, record, row)
        })
        .await?;
        debug!("read {} records of {} ARTCC sites", pacer.rows(), artccs.len());

        let artccs = artccs.finish(Family::ARTCCs, handler)?;
        info!("parsed {} ARTCC sites", artccs.len());
        self.source.publish(Collection::ARTCCs(artccs)).await;

        Ok(())
    }
}
