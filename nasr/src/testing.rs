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

//! Fixed-width records rendered from the layouts under `tests/fixtures`.

use nasr_format::{field, FieldDescriptor, Justification, LayoutFamily, Selector, Transform};

use crate::distribution::MemoryDistribution;

pub(crate) const APT_LAYOUT: &str = include_str!("../tests/fixtures/Layout_Data/apt_rf.txt");
pub(crate) const AFF_LAYOUT: &str = include_str!("../tests/fixtures/Layout_Data/aff_rf.txt");
pub(crate) const FSS_LAYOUT: &str = include_str!("../tests/fixtures/Layout_Data/fss_rf.txt");
pub(crate) const NAV_LAYOUT: &str = include_str!("../tests/fixtures/Layout_Data/nav_rf.txt");

pub(crate) fn layout(text: &str) -> LayoutFamily {
    LayoutFamily::parse(text).expect("fixture layout should parse")
}

/// A distribution with the layouts of all families.
pub(crate) fn distribution() -> MemoryDistribution {
    MemoryDistribution::new()
        .with_file("Layout_Data/apt_rf.txt", APT_LAYOUT)
        .with_file("Layout_Data/aff_rf.txt", AFF_LAYOUT)
        .with_file("Layout_Data/fss_rf.txt", FSS_LAYOUT)
        .with_file("Layout_Data/nav_rf.txt", NAV_LAYOUT)
}

/// Renders a record of the record type, padded with blanks to its length.
pub(crate) fn record(
    layout: &LayoutFamily,
    indicator: &str,
    values: &[(Selector, &str)],
) -> String {
    let table = layout.table(indicator).expect("record type should exist");
    let mut bytes = vec![b' '; table.len()];
    bytes[..indicator.len()].copy_from_slice(indicator.as_bytes());

    for (selector, value) in values {
        let spec = field("value", *selector, Transform::string());
        let descriptor = FieldDescriptor::bind(table, &spec).expect("selector should bind");
        let range = descriptor.range;
        assert!(value.len() <= range.len(), "{value} doesn't fit {selector}");

        let start = match descriptor.justification {
            Justification::Left => range.start,
            Justification::Right => range.end - value.len(),
        };
        bytes[start..start + value.len()].copy_from_slice(value.as_bytes());
    }

    String::from_utf8(bytes).expect("values should be ASCII")
}
