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

//! Airports with their attendance schedules, runways and remarks.
//!
//! The fixed-width file `APT.txt` holds all record types of an airport keyed
//! by its site number:
//!
//! | type  | record                          |
//! |-------|---------------------------------|
//! | `APT` | the airport                     |
//! | `ATT` | an attendance schedule          |
//! | `RWY` | a runway with both of its ends  |
//! | `RMK` | a remark on one of its elements |
//!
//! The CSV distribution splits airports and runways into `APT_BASE.csv` and
//! `APT_RWY.csv`, which carry no runway ends, attendance or remarks.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use nasr_format::{
    column, field, CsvTransformer, DecodeError, FieldSpec, Row, Selector, Transform, Value,
};

use super::{
    each_csv_row, each_record, take_variant, Accumulator, Builder, ErrorHandler, RecordParser,
    Source,
};
use crate::config::{Format, ParserConfig};
use crate::data::{
    Airport, AirportStatus, Attendance, Collection, FacilityType, Location, Ownership, Remark,
    Runway, RunwayEnd,
};
use crate::distribution::Distribution;
use crate::error::Error;
use crate::store::Store;
use crate::Family;

pub const APT_BASE_CSV: &str = "APT_BASE.csv";
pub const APT_RWY_CSV: &str = "APT_RWY.csv";

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Record {
    Base,
    Attendance,
    Runway,
    Remark,
}

fn schema() -> Vec<(&'static str, Record, Vec<FieldSpec>)> {
    let site = || field("site_number", Selector::Dlid(0), Transform::string().not_null());

    vec![
        (
            "APT",
            Record::Base,
            vec![
                site(),
                field("facility_type", Selector::Tag("E7"), Transform::string().not_null()),
                field("lid", Selector::Tag("E2"), Transform::string().not_null()),
                field(
                    "effective_date",
                    Selector::Tag("E3"),
                    Transform::date("%m/%d/%Y").not_null(),
                ),
                field("state_code", Selector::Tag("A4"), Transform::string()),
                field("state_name", Selector::Tag("A4A"), Transform::string()),
                field("county", Selector::Tag("A5"), Transform::string()),
                field("city", Selector::Tag("A1"), Transform::string()),
                field("name", Selector::Tag("A2"), Transform::string().compact().not_null()),
                field("ownership", Selector::Tag("A10"), Transform::string()),
                field("public_use", Selector::Tag("A18"), Transform::boolean("PU")),
                field("latitude", Selector::Tag("A19"), Transform::geodesic().not_null()),
                field("longitude", Selector::Tag("A20"), Transform::geodesic().not_null()),
                field("elevation", Selector::Tag("A22"), Transform::float()),
                field(
                    "magnetic_variation",
                    Selector::Tag("E28"),
                    Transform::generic(magnetic_variation),
                ),
                field("boundary_artcc", Selector::Tag("E146"), Transform::string()),
                field("responsible_artcc", Selector::Tag("E156"), Transform::string()),
                field("tie_in_fss", Selector::Tag("E6"), Transform::string()),
                field("alternate_fss", Selector::Tag("A86"), Transform::string()),
                field("notam_id", Selector::Tag("E2B"), Transform::string()),
                field(
                    "activation_date",
                    Selector::Tag("E157"),
                    Transform::date_components("MM/YYYY"),
                ),
                field("status", Selector::Tag("A21"), Transform::string()),
                field(
                    "fuel_types",
                    Selector::Tag("A70"),
                    Transform::fixed_width_array(5, Transform::string()),
                ),
                field("customs_entry", Selector::Tag("E79"), Transform::boolean("Y")),
            ],
        ),
        (
            "ATT",
            Record::Attendance,
            vec![
                site(),
                field("sequence", Selector::Tag("A17A"), Transform::unsigned().not_null()),
                field("schedule", Selector::Tag("A17"), Transform::string().compact().not_null()),
            ],
        ),
        (
            "RWY",
            Record::Runway,
            vec![
                site(),
                field("runway_id", Selector::Tag("A30"), Transform::string().not_null()),
                field("length", Selector::Tag("A31"), Transform::unsigned()),
                field("width", Selector::Tag("A32"), Transform::unsigned()),
                field("surface", Selector::Tag("A33"), Transform::string()),
                field("edge_lights", Selector::Tag("A40"), Transform::string()),
                field("base_id", Selector::Tag("A36"), Transform::string()),
                field("base_latitude", Selector::Tag("A38"), Transform::geodesic()),
                field("base_longitude", Selector::Tag("A39"), Transform::geodesic()),
                field("base_elevation", Selector::Tag("A41"), Transform::float()),
                field("reciprocal_id", Selector::Tag("A52"), Transform::string()),
                field("reciprocal_latitude", Selector::Tag("A54"), Transform::geodesic()),
                field("reciprocal_longitude", Selector::Tag("A55"), Transform::geodesic()),
                field("reciprocal_elevation", Selector::Tag("A57"), Transform::float()),
            ],
        ),
        (
            "RMK",
            Record::Remark,
            vec![
                site(),
                field("element", Selector::Tag("E111"), Transform::string()),
                field("text", Selector::Tag("E112"), Transform::string().compact().not_null()),
            ],
        ),
    ]
}

fn base_transformer() -> CsvTransformer {
    CsvTransformer::new(vec![
        column("effective_date", "EFF_DATE", Transform::date("%Y/%m/%d").not_null()).required(),
        column("site_number", "SITE_NO", Transform::string().not_null()).required(),
        column("facility_type", "SITE_TYPE_CODE", Transform::string().not_null()).required(),
        column("lid", "ARPT_ID", Transform::string().not_null()).required(),
        column("state_code", "STATE_CODE", Transform::string()),
        column("state_name", "STATE_NAME", Transform::string()),
        column("county", "COUNTY_NAME", Transform::string()),
        column("city", "CITY", Transform::string()),
        column("name", "ARPT_NAME", Transform::string().compact().not_null()).required(),
        column("ownership", "OWNERSHIP_TYPE_CODE", Transform::string()),
        column("public_use", "FACILITY_USE_CODE", Transform::boolean("PU")),
        column("latitude", "LAT_DECIMAL", Transform::generic(decimal_degrees).not_null())
            .required(),
        column("longitude", "LONG_DECIMAL", Transform::generic(decimal_degrees).not_null())
            .required(),
        column("elevation", "ELEV", Transform::float()),
        column("magnetic_variation", "MAG_VARN", Transform::float()),
        column("magnetic_hemisphere", "MAG_HEMIS", Transform::string()),
        column("boundary_artcc", "BOUNDARY_ARTCC_ID", Transform::string()),
        column("responsible_artcc", "RESP_ARTCC_ID", Transform::string()),
        column("tie_in_fss", "TIE_IN_FSS_ID", Transform::string()),
        column("alternate_fss", "ALT_FSS_ID", Transform::string()),
        column("notam_id", "NOTAM_ID", Transform::string()),
        column("activation_date", "ACTIVATION_DATE", Transform::date_components("YYYY/MM")),
        column("status", "ARPT_STATUS", Transform::string()),
        column(
            "fuel_types",
            "FUEL_TYPES",
            Transform::delimited_array(",", Transform::string()),
        ),
        column("customs_entry", "CUST_FLAG", Transform::boolean("Y")),
    ])
}

fn runway_transformer() -> CsvTransformer {
    CsvTransformer::new(vec![
        column("site_number", "SITE_NO", Transform::string().not_null()).required(),
        column("runway_id", "RWY_ID", Transform::string().not_null()).required(),
        column("length", "RWY_LEN", Transform::unsigned()),
        column("width", "RWY_WIDTH", Transform::unsigned()),
        column("surface", "SURFACE_TYPE_CODE", Transform::string()),
        column("edge_lights", "RWY_LGT_CODE", Transform::string()),
    ])
}

/// Parses a magnetic variation like `13W` into signed degrees, west being
/// negative.
fn magnetic_variation(text: &str) -> Result<Value, String> {
    let (degrees, sign) = match text.strip_suffix('W') {
        Some(degrees) => (degrees, -1.0),
        None => (text.strip_suffix('E').unwrap_or(text), 1.0),
    };

    degrees
        .trim()
        .parse::<f64>()
        .map(|d| Value::Float(sign * d))
        .map_err(|_| format!("{text} is not a magnetic variation"))
}

/// Parses decimal degrees into arc-seconds.
fn decimal_degrees(text: &str) -> Result<Value, String> {
    text.parse::<f64>()
        .map(|degrees| Value::ArcSeconds(degrees * 3600.0))
        .map_err(|_| format!("{text} is not a decimal degree"))
}

#[derive(Default)]
struct AirportBuilder {
    airport: Option<Airport>,
    attendance: Vec<Attendance>,
    runways: Vec<Runway>,
    remarks: Vec<Remark>,
}

impl Builder for AirportBuilder {
    type Output = Airport;

    fn build(self) -> Option<Airport> {
        let mut airport = self.airport?;
        airport.attendance = self.attendance;
        airport.runways = self.runways;
        airport.remarks = self.remarks;
        Some(airport)
    }
}

type Airports = Accumulator<String, AirportBuilder>;

fn fold(airports: &mut Airports, record: Record, mut row: Row) -> Result<(), DecodeError> {
    let site_number: String = row.take("site_number")?;

    match record {
        Record::Base => {
            let airport = airport(site_number.clone(), &mut row)?;
            airports.entry(site_number).airport = Some(airport);
        }
        Record::Attendance => {
            let attendance = Attendance {
                sequence: row.take("sequence")?,
                schedule: row.take("schedule")?,
            };
            airports.entry(site_number).attendance.push(attendance);
        }
        Record::Runway => {
            let runway = runway(&mut row)?;
            airports.entry(site_number).runways.push(runway);
        }
        Record::Remark => {
            let remark = Remark {
                element: row.take("element")?,
                text: row.take("text")?,
            };
            airports.entry(site_number).remarks.push(remark);
        }
    }

    Ok(())
}

fn airport(site_number: String, row: &mut Row) -> Result<Airport, DecodeError> {
    let latitude = row.take("latitude")?;
    let longitude = row.take("longitude")?;
    let elevation = row.take("elevation")?;

    Ok(Airport {
        site_number,
        facility_type: take_variant::<FacilityType>(row, "facility_type", "a facility type")?,
        lid: row.take("lid")?,
        effective_date: row.take("effective_date")?,
        state_code: row.take("state_code")?,
        state_name: row.take("state_name")?,
        county: row.take("county")?,
        city: row.take("city")?,
        name: row.take("name")?,
        ownership: row.take_parsed::<Ownership>("ownership", "an ownership type")?,
        public_use: row.take::<Option<bool>>("public_use")?.unwrap_or_default(),
        location: Location::new(latitude, longitude, elevation),
        magnetic_variation: signed_variation(row)?,
        boundary_artcc_id: row.take("boundary_artcc")?,
        responsible_artcc_id: row.take("responsible_artcc")?,
        tie_in_fss_id: row.take("tie_in_fss")?,
        alternate_fss_id: row.take("alternate_fss")?,
        notam_id: row.take("notam_id")?,
        activation_date: row.take("activation_date")?,
        status: row.take_parsed::<AirportStatus>("status", "an airport status")?,
        fuel_types: row.take("fuel_types")?,
        customs_entry: row.take::<Option<bool>>("customs_entry")?.unwrap_or_default(),
        runways: Vec::new(),
        attendance: Vec::new(),
        remarks: Vec::new(),
    })
}

/// Fixed-width records sign the variation; CSV rows carry the hemisphere in
/// a column of its own.
fn signed_variation(row: &mut Row) -> Result<Option<f64>, DecodeError> {
    let degrees: Option<f64> = row.take("magnetic_variation")?;

    if row.get("magnetic_hemisphere").is_none() {
        return Ok(degrees);
    }

    let hemisphere: Option<String> = row.take("magnetic_hemisphere")?;
    Ok(degrees.map(|d| match hemisphere.as_deref() {
        Some("W") => -d,
        _ => d,
    }))
}

fn runway(row: &mut Row) -> Result<Runway, DecodeError> {
    let mut runway = Runway {
        identification: row.take("runway_id")?,
        length: row.take("length")?,
        width: row.take("width")?,
        surface: row.take("surface")?,
        edge_lights: row.take("edge_lights")?,
        base_end: None,
        reciprocal_end: None,
    };

    if row.get("base_id").is_some() {
        runway.base_end = runway_end(
            row,
            ["base_id", "base_latitude", "base_longitude", "base_elevation"],
        )?;
        runway.reciprocal_end = runway_end(
            row,
            [
                "reciprocal_id",
                "reciprocal_latitude",
                "reciprocal_longitude",
                "reciprocal_elevation",
            ],
        )?;
    }

    Ok(runway)
}

fn runway_end(
    row: &mut Row,
    [id, latitude, longitude, elevation]: [&'static str; 4],
) -> Result<Option<RunwayEnd>, DecodeError> {
    let Some(identifier) = row.take::<Option<String>>(id)? else {
        return Ok(None);
    };

    let latitude: Option<f64> = row.take(latitude)?;
    let longitude: Option<f64> = row.take(longitude)?;
    let elevation: Option<f64> = row.take(elevation)?;

    Ok(Some(RunwayEnd {
        identifier,
        location: latitude
            .zip(longitude)
            .map(|(latitude, longitude)| Location::new(latitude, longitude, elevation)),
    }))
}

/// Parses the airports with their runways, attendance and remarks.
///
/// Airports are ordered by site number.
pub struct AirportParser {
    source: Source,
}

impl AirportParser {
    pub fn new(distribution: Arc<dyn Distribution>, config: ParserConfig, store: Store) -> Self {
        Self {
            source: Source::new(Family::Airports, distribution, config, store),
        }
    }

    async fn parse_fixed_width(&self, handler: &dyn ErrorHandler) -> Result<Airports, Error> {
        let file = self.source.fixed_width_file()?;
        info!("parsing airports from {file}");

        let dispatch = self.source.dispatch(schema()).await?;
        let mut lines = self.source.lines(file).await?;
        let mut pacer = self.source.pacer();
        let mut airports = Airports::new();

        each_record(&mut lines, &dispatch, &mut pacer, handler, |record, row| {
            fold(&mut airports, record, row)
        })
        .await?;

        debug!("read {} records of {} airports", pacer.rows(), airports.len());
        Ok(airports)
    }

    async fn parse_csv(&self, handler: &dyn ErrorHandler) -> Result<Airports, Error> {
        info!("parsing airports from {APT_BASE_CSV}");

        let mut pacer = self.source.pacer();
        let mut airports = Airports::new();

        let mut file = self.source.csv(APT_BASE_CSV).await?;
        each_csv_row(&mut file, &base_transformer(), &mut pacer, handler, |row| {
            fold(&mut airports, Record::Base, row)
        })
        .await?;

        if self.source.exists(APT_RWY_CSV).await {
            let mut file = self.source.csv(APT_RWY_CSV).await?;
            each_csv_row(&mut file, &runway_transformer(), &mut pacer, handler, |row| {
                fold(&mut airports, Record::Runway, row)
            })
            .await?;
        } else {
            debug!("{APT_RWY_CSV} is missing, airports have no runways");
        }

        debug!("read {} rows of {} airports", pacer.rows(), airports.len());
        Ok(airports)
    }
}

#[async_trait]
impl RecordParser for AirportParser {
    fn family(&self) -> Family {
        self.source.family()
    }

    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error> {
        let airports = match self.source.config().format {
            Format::FixedWidth => self.parse_fixed_width(handler).await?,
            Format::Csv => self.parse_csv(handler).await?,
        };

        let airports = airports.finish(Family::Airports, handler)?;
        info!("parsed {} airports", airports.len());
        self.source.publish(Collection::Airports(airports)).await;

        Ok(())
    }
}
