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

//! Cross-referenced FAA NASR data.
//!
//! The National Airspace System Resources (NASR) describe the airports,
//! navigational aids, air route traffic control centers (ARTCC) and flight
//! service stations (FSS) of the United States. This crate reads them from a
//! [`Distribution`] into [`NASRData`]:
//!
//! 1. A [`RecordParser`] per [`Family`] reads the family's fixed-width or CSV
//!    files, decoding each record with [`nasr_format`].
//! 2. Sub-records like runways or remarks are folded into their base record.
//! 3. The finished records are published into a shared [`Store`].
//!
//! Records refer to each other by identifier. A [`Resolved`] record looks its
//! references up in the data it belongs to:
//!
//! ```
//! use nasr::{AbortOnError, Family, Loader, MemoryDistribution, ParserConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), nasr::Error> {
//! let distribution = MemoryDistribution::new().with_file(
//!     "STATE.csv",
//!     "STATE_CODE,STATE_NAME,REGION_CODE\nNY,NEW YORK,AEA\n",
//! );
//!
//! let loader = Loader::new(distribution, ParserConfig::default());
//! let data = loader.load(&[Family::States], AbortOnError).await?;
//!
//! assert_eq!(data.state("NY").map(|s| s.name.as_str()), Some("NEW YORK"));
//! # Ok(())
//! # }
//! ```
//!
//! Records that fail to decode are passed to an [`ErrorHandler`], which
//! decides whether to skip them or to abort the family.

#[macro_use]
mod macros;

mod config;
pub mod data;
mod distribution;
mod error;
mod family;
mod loader;
mod parse;
mod store;

#[cfg(test)]
mod testing;

pub use config::{Format, ParserConfig, ProgressFn};
pub use data::{
    ARTCCFacilityType, ARTCCKey, Airport, AirportStatus, Attendance, Collection, CommFrequency,
    FacilityType, FrequencyAltitude, Location, NASRData, Navaid, NavaidKey, NavaidType, Ownership,
    Remark, Resolved, Runway, RunwayEnd, State, ARTCC, FSS,
};
pub use distribution::{DirectoryDistribution, Distribution, FileReader, MemoryDistribution};
pub use error::{Error, UnknownCode};
pub use family::Family;
pub use loader::Loader;
pub use parse::{
    parser, AbortOnError, ARTCCParser, AirportParser, ErrorAction, ErrorHandler, FSSParser,
    NavaidParser, RecordParser, SkipInvalid, StateParser,
};
pub use store::Store;
