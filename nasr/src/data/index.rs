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

//! Identifier indexes over the collections of [`NASRData`].
//!
//! The indexes map an identifier to the position of its records within a
//! collection. They are built on first use and dropped whenever the
//! collection is replaced.
//!
//! [`NASRData`]: super::NASRData

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

use super::{ARTCCKey, Airport, FSS, Navaid, State, ARTCC};

type Positions<K> = HashMap<K, Vec<usize>>;

/// Groups the positions of the items by key, preserving the items' order.
fn positions<'a, T, K, F>(items: &'a [T], key: F) -> Positions<K>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut index: Positions<K> = HashMap::new();

    for (i, item) in items.iter().enumerate() {
        index.entry(key(item)).or_default().push(i);
    }

    index
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Index {
    states: OnceLock<Positions<String>>,
    airports: OnceLock<Positions<String>>,
    artccs: OnceLock<Positions<String>>,
    artcc_keys: OnceLock<Positions<ARTCCKey>>,
    fsss: OnceLock<Positions<String>>,
    navaids: OnceLock<Positions<String>>,
}

impl Index {
    pub(crate) fn states(&self, states: &[State]) -> &Positions<String> {
        self.states
            .get_or_init(|| positions(states, |s| s.postal_code.clone()))
    }

    pub(crate) fn airports(&self, airports: &[Airport]) -> &Positions<String> {
        self.airports
            .get_or_init(|| positions(airports, |a| a.lid.clone()))
    }

    pub(crate) fn artccs(&self, artccs: &[ARTCC]) -> &Positions<String> {
        self.artccs
            .get_or_init(|| positions(artccs, |a| a.key.id.clone()))
    }

    pub(crate) fn artcc_keys(&self, artccs: &[ARTCC]) -> &Positions<ARTCCKey> {
        self.artcc_keys
            .get_or_init(|| positions(artccs, |a| a.key.clone()))
    }

    pub(crate) fn fsss(&self, fsss: &[FSS]) -> &Positions<String> {
        self.fsss.get_or_init(|| positions(fsss, |f| f.id.clone()))
    }

    pub(crate) fn navaids(&self, navaids: &[Navaid]) -> &Positions<String> {
        self.navaids
            .get_or_init(|| positions(navaids, |n| n.key.id.clone()))
    }

    pub(crate) fn reset_states(&mut self) {
        self.states.take();
    }

    pub(crate) fn reset_airports(&mut self) {
        self.airports.take();
    }

    pub(crate) fn reset_artccs(&mut self) {
        self.artccs.take();
        self.artcc_keys.take();
    }

    pub(crate) fn reset_fsss(&mut self) {
        self.fsss.take();
    }

    pub(crate) fn reset_navaids(&mut self) {
        self.navaids.take();
    }
}
