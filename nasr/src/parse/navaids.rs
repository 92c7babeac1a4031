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

use super::{each_record, take_variant, Accumulator, Builder, ErrorHandler, RecordParser, Source};
use crate::config::ParserConfig;
use crate::data::{Collection, Location, Navaid, NavaidKey, Remark};
use crate::distribution::Distribution;
use crate::error::Error;
use crate::store::Store;
use crate::Family;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Record {
    Base,
    Remark,
}

fn schema() -> Vec<(&'static str, Record, Vec<FieldSpec>)> {
    let key = || {
        vec![
            field("id", Selector::Dlid(0), Transform::string().not_null()),
            field("type", Selector::Dlid(1), Transform::string().not_null()),
            field("city", Selector::Dlid(2), Transform::string().compact().not_null()),
        ]
    };

    let mut base = key();
    base.extend([
        field("effective_date", Selector::Tag("N2"), Transform::date("%m/%d/%Y").not_null()),
        field("name", Selector::Tag("N3"), Transform::string().compact().not_null()),
        field("state_code", Selector::Tag("N6"), Transform::string()),
        field("commissioned", Selector::Tag("N7"), Transform::date_components("YYYY")),
        field("status", Selector::Tag("N8"), Transform::string().compact()),
        field("public_use", Selector::Tag("N9"), Transform::boolean("Y")),
        field("latitude", Selector::Tag("N10"), Transform::geodesic().not_null()),
        field("longitude", Selector::Tag("N11"), Transform::geodesic().not_null()),
        field("elevation", Selector::Tag("N12"), Transform::float()),
        field("frequency", Selector::Tag("N13"), Transform::frequency()),
        field("high_artcc", Selector::Tag("N14"), Transform::string()),
        field("low_artcc", Selector::Tag("N15"), Transform::string()),
        field("tie_in_fss", Selector::Tag("N16"), Transform::string()),
    ]);

    let mut remark = key();
    remark.push(field("text", Selector::Tag("N17"), Transform::string().compact().not_null()));

    vec![("NAV1", Record::Base, base), ("NAV2", Record::Remark, remark)]
}

#[derive(Default)]
struct NavaidBuilder {
    navaid: Option<Navaid>,
    remarks: Vec<Remark>,
}

impl Builder for NavaidBuilder {
    type Output = Navaid;

    fn build(self) -> Option<Navaid> {
        let mut navaid = self.navaid?;
        navaid.remarks = self.remarks;
        Some(navaid)
    }
}

type Navaids = Accumulator<NavaidKey, NavaidBuilder>;

fn fold(navaids: &mut Navaids, record: Record, mut row: Row) -> Result<(), DecodeError> {
    let key = NavaidKey {
        id: row.take("id")?,
        navaid_type: take_variant(&mut row, "type", "a navaid type")?,
        city: row.take("city")?,
    };

    match record {
        Record::Base => {
            let navaid = navaid(key.clone(), &mut row)?;
            navaids.entry(key).navaid = Some(navaid);
        }
        Record::Remark => {
            let remark = Remark {
                element: None,
                text: row.take("text")?,
            };
            navaids.entry(key).remarks.push(remark);
        }
    }

    Ok(())
}

fn navaid(key: NavaidKey, row: &mut Row) -> Result<Navaid, DecodeError> {
    let latitude = row.take("latitude")?;
    let longitude = row.take("longitude")?;
    let elevation = row.take("elevation")?;

    Ok(Navaid {
        key,
        name: row.take("name")?,
        effective_date: row.take("effective_date")?,
        state_code: row.take("state_code")?,
        status: row.take("status")?,
        location: Location::new(latitude, longitude, elevation),
        frequency: row.take("frequency")?,
        high_altitude_artcc_id: row.take("high_artcc")?,
        low_altitude_artcc_id: row.take("low_artcc")?,
        tie_in_fss_id: row.take("tie_in_fss")?,
        commissioned: row.take("commissioned")?,
        public_use: row.take::<Option<bool>>("public_use")?.unwrap_or_default(),
        remarks: Vec::new(),
    })
}

/// Parses the navigational aids with their remarks.
///
/// A navaid is keyed by its identifier, type and city; identifiers alone
/// aren't unique.
pub struct NavaidParser {
    source: Source,
}

impl NavaidParser {
    pub fn new(distribution: Arc<dyn Distribution>, config: ParserConfig, store: Store) -> Self {
        Self {
            source: Source::new(Family::Navaids, distribution, config, store),
        }
    }
}

#[async_trait]
impl RecordParser for NavaidParser {
    fn family(&self) -> Family {
        self.source.family()
    }

    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error> {
        let file = self.source.fixed_width_file()?;
        info!("parsing navaids from {file}");

        let dispatch = self.source.dispatch(schema()).await?;
        let mut lines = self.source.lines(file).await?;
        let mut pacer = self.source.pacer();
        let mut navaids = Navaids::new();

        each_record(&mut lines, &dispatch, &mut pacer, handler, |record, row| {
            fold(&mut navaids, record, row)
        })
        .await?;
        debug!("read {} records of {} navaids", pacer.rows(), navaids.len());

        let navaids = navaids.finish(Family::Navaids, handler)?;
        info!("parsed {} navaids", navaids.len());
        self.source.publish(Collection::Navaids(navaids)).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use nasr_format::DateComponents;

    use super::*;
    use crate::data::NavaidType;
    use crate::parse::{AbortOnError, ErrorAction};
    use crate::testing::{self, record, NAV_LAYOUT};

    fn nav1(id: &str, navaid_type: &str, frequency: &str) -> String {
        let layout = testing::layout(NAV_LAYOUT);
        record(
            &layout,
            "NAV1",
            &[
                (Selector::Dlid(0), id),
                (Selector::Dlid(1), navaid_type),
                (Selector::Dlid(2), "KENNEDY"),
                (Selector::Tag("N2"), "04/18/2019"),
                (Selector::Tag("N3"), "KENNEDY"),
                (Selector::Tag("N6"), "NY"),
                (Selector::Tag("N7"), "1965"),
                (Selector::Tag("N8"), "OPERATIONAL IFR"),
                (Selector::Tag("N9"), "Y"),
                (Selector::Tag("N10"), "40-37-58.400N"),
                (Selector::Tag("N11"), "073-46-17.000W"),
                (Selector::Tag("N12"), "12.3"),
                (Selector::Tag("N13"), frequency),
                (Selector::Tag("N14"), "ZNY"),
                (Selector::Tag("N16"), "ISP"),
            ],
        )
    }

    fn nav2(id: &str, text: &str) -> String {
        let layout = testing::layout(NAV_LAYOUT);
        record(
            &layout,
            "NAV2",
            &[
                (Selector::Dlid(0), id),
                (Selector::Dlid(1), "VOR/DME"),
                (Selector::Dlid(2), "KENNEDY"),
                (Selector::Tag("N17"), text),
            ],
        )
    }

    fn navaid_parser(text: String) -> (NavaidParser, Store) {
        let distribution = testing::distribution().with_file("NAV.txt", text);
        let store = Store::new();
        let parser = NavaidParser::new(
            Arc::new(distribution),
            ParserConfig::default(),
            store.clone(),
        );
        (parser, store)
    }

    #[tokio::test]
    async fn parses_navaids_with_remarks() {
        let text = [
            nav1("JFK", "VOR/DME", "115.9"),
            nav2("JFK", "DME UNUSABLE 080-100"),
            nav2("JFK", "VOR  PORTION  UNMONITORED"),
            nav1("JFK", "NDB", "365"),
        ]
        .join("\n");

        let (parser, store) = navaid_parser(text);
        parser.parse(&AbortOnError).await.expect("navaids should parse");

        let data = store.snapshot().await;
        let navaids = data.navaids_with_id("JFK");
        assert_eq!(
            navaids.iter().map(|n| n.key.navaid_type).collect::<Vec<_>>(),
            vec![NavaidType::VORDME, NavaidType::NDB]
        );

        let vor = navaids[0];
        assert_eq!(vor.effective_date, NaiveDate::from_ymd_opt(2019, 4, 18).unwrap());
        assert_eq!(vor.frequency, Some(115900));
        assert_eq!(
            vor.commissioned,
            Some(DateComponents {
                year: 1965,
                month: None,
                day: None
            })
        );
        assert!(vor.public_use);
        assert_eq!(vor.location.elevation, Some(12.3));
        assert_eq!(
            vor.remarks.iter().map(|r| r.text.as_str()).collect::<Vec<_>>(),
            vec!["DME UNUSABLE 080-100", "VOR PORTION UNMONITORED"]
        );
        assert_eq!(navaids[1].frequency, Some(365000));
        assert!(navaids[1].remarks.is_empty());
        assert_eq!(data.navaid("JFK"), Some(vor));
    }

    #[tokio::test]
    async fn continues_past_unknown_record_types() {
        let text = [
            nav1("JFK", "VOR/DME", "115.9"),
            format!("NAV9{}", " ".repeat(246)),
            nav1("CRI", "VOR/DME", "bad"),
            nav1("DPK", "VOR/DME", "117.7"),
        ]
        .join("\n");

        let errors = std::sync::Mutex::new(Vec::new());
        let handler = |e: &Error| {
            errors.lock().unwrap().push(e.to_string());
            ErrorAction::Continue
        };

        let (parser, store) = navaid_parser(text);
        parser.parse(&handler).await.expect("bad records should be skipped");

        let data = store.snapshot().await;
        assert_eq!(data.all_navaids().map(<[_]>::len), Some(2));
        assert!(data.navaid("CRI").is_none());

        let errors = errors.into_inner().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("line 2") && errors[0].contains("NAV9"));
        assert!(errors[1].contains("line 3"));
    }
}
