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
use nasr_format::{column, CsvTransformer, Transform};

use super::{each_csv_row, ErrorHandler, RecordParser, Source};
use crate::config::ParserConfig;
use crate::data::{Collection, State};
use crate::distribution::Distribution;
use crate::error::Error;
use crate::store::Store;
use crate::Family;

/// States are only distributed as CSV, whatever the configured format.
pub const STATE_CSV: &str = "STATE.csv";

fn transformer() -> CsvTransformer {
    CsvTransformer::new(vec![
        column("postal_code", "STATE_CODE", Transform::string().not_null()).required(),
        column("name", "STATE_NAME", Transform::string().not_null()).required(),
        column("region", "REGION_CODE", Transform::string()),
    ])
}

/// Parses the states and their FAA regions.
pub struct StateParser {
    source: Source,
}

impl StateParser {
    pub fn new(distribution: Arc<dyn Distribution>, config: ParserConfig, store: Store) -> Self {
        Self {
            source: Source::new(Family::States, distribution, config, store),
        }
    }
}

#[async_trait]
impl RecordParser for StateParser {
    fn family(&self) -> Family {
        self.source.family()
    }

    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error> {
        info!("parsing states from {STATE_CSV}");

        let transformer = transformer();
        let mut file = self.source.csv(STATE_CSV).await?;
        let mut pacer = self.source.pacer();
        let mut states = Vec::new();

        each_csv_row(&mut file, &transformer, &mut pacer, handler, |mut row| {
            states.push(State {
                postal_code: row.take("postal_code")?,
                name: row.take("name")?,
                region: row.take("region")?,
            });
            Ok(())
        })
        .await?;

        info!("parsed {} states of {} rows", states.len(), pacer.rows());
        self.source.publish(Collection::States(states)).await;

        Ok(())
    }
}
