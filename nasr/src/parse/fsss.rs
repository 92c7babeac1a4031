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
use log::info;
use nasr_format::{field, DecodeError, FieldSpec, Row, Selector, Transform};

use super::{each_record, ErrorHandler, RecordParser, Source};
use crate::config::ParserConfig;
use crate::data::{Collection, Location, FSS};
use crate::distribution::Distribution;
use crate::error::Error;
use crate::store::Store;
use crate::Family;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Base;

fn schema() -> Vec<(&'static str, Base, Vec<FieldSpec>)> {
    vec![(
        "FSS",
        Base,
        vec![
            field("id", Selector::Dlid(0), Transform::string().not_null()),
            field("name", Selector::Tag("F1"), Transform::string().compact().not_null()),
            field("radio_identifier", Selector::Tag("F2"), Transform::string().compact()),
            field("facility_type", Selector::Tag("F3"), Transform::string()),
            field("hours", Selector::Tag("F4"), Transform::string().compact()),
            field("status", Selector::Tag("F5"), Transform::string()),
            field("airport_id", Selector::Tag("F6"), Transform::string()),
            field("latitude", Selector::Tag("F7"), Transform::geodesic()),
            field("longitude", Selector::Tag("F8"), Transform::geodesic()),
            field("alternate_fss", Selector::Tag("F9"), Transform::string()),
            field(
                "frequencies",
                Selector::Tag("F10"),
                Transform::fixed_width_array(9, Transform::frequency()),
            ),
            field(
                "comm_facilities",
                Selector::Tag("F11"),
                Transform::delimited_array(",", Transform::string()),
            ),
            field("weather_radar", Selector::Tag("F12"), Transform::boolean("Y")),
        ],
    )]
}

fn fss(mut row: Row) -> Result<FSS, DecodeError> {
    let latitude: Option<f64> = row.take("latitude")?;
    let longitude: Option<f64> = row.take("longitude")?;

    Ok(FSS {
        id: row.take("id")?,
        name: row.take("name")?,
        radio_identifier: row.take("radio_identifier")?,
        facility_type: row.take("facility_type")?,
        hours: row.take("hours")?,
        status: row.take("status")?,
        airport_id: row.take("airport_id")?,
        location: latitude
            .zip(longitude)
            .map(|(latitude, longitude)| Location::new(latitude, longitude, None)),
        alternate_fss_id: row.take("alternate_fss")?,
        frequencies: row.take("frequencies")?,
        comm_facilities: row.take("comm_facilities")?,
        weather_radar: row.take::<Option<bool>>("weather_radar")?.unwrap_or_default(),
    })
}

/// Parses the flight service stations.
///
/// Stations are ordered by identifier.
pub struct FSSParser {
    source: Source,
}

impl FSSParser {
    pub fn new(distribution: Arc<dyn Distribution>, config: ParserConfig, store: Store) -> Self {
        Self {
            source: Source::new(Family::FSSs, distribution, config, store),
        }
    }
}

#[async_trait]
impl RecordParser for FSSParser {
    fn family(&self) -> Family {
        self.source.family()
    }

    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error> {
        let file = self.source.fixed_width_file()?;
        info!("parsing FSSs from {file}");

        let dispatch = self.source.dispatch(schema()).await?;
        let mut lines = self.source.lines(file).await?;
        let mut pacer = self.source.pacer();
        let mut stations = Vec::new();

        each_record(&mut lines, &dispatch, &mut pacer, handler, |Base, row| {
            stations.push(fss(row)?);
            Ok(())
        })
        .await?;

        stations.sort_by(|a: &FSS, b: &FSS| a.id.cmp(&b.id));
        info!("parsed {} FSSs", stations.len());
        self.source.publish(Collection::FSSs(stations)).await;

        Ok(())
    }
}
