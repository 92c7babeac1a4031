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

use log::info;
use tokio::sync::Mutex;

use crate::data::{Collection, NASRData};

/// The shared data the record parsers publish into.
///
/// Each parser publishes its family once with a single exclusive write, so
/// concurrent parsers never leave a family partially published.
#[derive(Clone, Debug, Default)]
pub struct Store {
    data: Arc<Mutex<NASRData>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the family's collection.
    pub async fn publish(&self, collection: Collection) {
        let family = collection.family();
        let len = collection.len();

        self.data.lock().await.publish(collection);
        info!("published {len} {family}");
    }

    /// Returns a copy of the data published so far.
    pub async fn snapshot(&self) -> NASRData {
        self.data.lock().await.clone()
    }

    /// Calls `f` with the data published so far.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&NASRData) -> R,
    {
        let data = self.data.lock().await;
        f(&data)
    }
}

impl From<NASRData> for Store {
    fn from(data: NASRData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::State;

    #[tokio::test]
    async fn publishes_collections() {
        let store = Store::new();
        let handle = store.clone();

        handle
            .publish(Collection::States(vec![State {
                postal_code: "NY".into(),
                name: "NEW YORK".into(),
                region: Some("AEA".into()),
            }]))
            .await;

        let name = store
            .read(|data| data.state("NY").map(|s| s.name.clone()))
            .await;
        assert_eq!(name, Some("NEW YORK".into()));
        assert!(store.snapshot().await.all_airports().is_none());
    }
}
