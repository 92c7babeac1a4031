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

use std::collections::HashMap;
use std::sync::Arc;

use log::{error, info};
use tokio::task::JoinSet;

use crate::config::ParserConfig;
use crate::data::NASRData;
use crate::distribution::Distribution;
use crate::error::Error;
use crate::parse::{self, ErrorHandler, RecordParser};
use crate::store::Store;
use crate::Family;

/// Loads the families of a distribution concurrently into one store.
///
/// Each family is parsed on a task of its own. Families publish into the
/// store as they finish, so a family never observes another one partially.
///
/// # Examples
///
/// ```no_run
/// use nasr::{AbortOnError, DirectoryDistribution, Family, Loader, ParserConfig};
///
/// # async fn run() -> Result<(), nasr::Error> {
/// let loader = Loader::new(
///     DirectoryDistribution::new("28DaySubscription_Effective_2019-04-25"),
///     ParserConfig::default(),
/// );
///
/// let data = loader.load(&Family::ALL, AbortOnError).await?;
/// let jfk = data.airport("JFK");
/// # Ok(())
/// # }
/// ```
pub struct Loader {
    distribution: Arc<dyn Distribution>,
    config: ParserConfig,
    store: Store,
}

impl Loader {
    pub fn new<D: Distribution + 'static>(distribution: D, config: ParserConfig) -> Self {
        Self {
            distribution: Arc::new(distribution),
            config,
            store: Store::new(),
        }
    }

    /// Publishes into the store instead of a new one.
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the parser of the family, publishing into the loader's store.
    pub fn parser(&self, family: Family) -> Box<dyn RecordParser> {
        parse::parser(
            family,
            Arc::clone(&self.distribution),
            self.config.clone(),
            self.store.clone(),
        )
    }

    /// Parses the families concurrently and returns the data of the store.
    ///
    /// # Errors
    ///
    /// Returns the first error a family fails with. The other families are
    /// cancelled; families that finished before remain published in the
    /// store.
    pub async fn load<H>(&self, families: &[Family], handler: H) -> Result<NASRData, Error>
    where
        H: ErrorHandler + 'static,
    {
        let handler = Arc::new(handler);
        let mut families = families.to_vec();
        families.sort();
        families.dedup();

        info!("loading {} families", families.len());

        let mut tasks = JoinSet::new();
        let mut running = HashMap::with_capacity(families.len());

        for family in families {
            let parser = self.parser(family);
            let handler = Arc::clone(&handler);

            let task = tasks.spawn(async move { parser.parse(handler.as_ref()).await });
            running.insert(task.id(), family);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            let result = match joined {
                Ok((id, result)) => {
                    running.remove(&id);
                    result
                }
                Err(e) => match running.remove(&e.id()) {
                    Some(family) => {
                        error!("parsing {family} failed: {e}");
                        Err(Error::Aborted { family })
                    }
                    None => Err(Error::Io(e.into())),
                },
            };

            if let Err(e) = result {
                tasks.abort_all();
                return Err(e);
            }
        }

        Ok(self.store.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::MemoryDistribution;
    use crate::parse::AbortOnError;

    #[tokio::test]
    async fn fails_with_first_error() {
        let distribution = MemoryDistribution::new()
            .with_file("STATE.csv", "STATE_CODE,STATE_NAME\nNY,NEW YORK\n");
        let loader = Loader::new(distribution, ParserConfig::default());

        // there's no airport layout
        let result = loader.load(&[Family::States, Family::Airports], AbortOnError).await;
        assert!(matches!(result, Err(Error::NoSuchFile(path)) if path.ends_with("apt_rf.txt")));
    }

    #[tokio::test]
    async fn loads_nothing() {
        let loader = Loader::new(MemoryDistribution::new(), ParserConfig::default());
        let data = loader.load(&[], AbortOnError).await.expect("nothing should load");
        assert_eq!(data, NASRData::new());
    }
}
