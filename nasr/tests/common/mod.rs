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

//! A small NASR distribution around JFK.

#![allow(dead_code)]

use nasr::MemoryDistribution;
use nasr_format::{field, FieldDescriptor, Justification, LayoutFamily, Selector, Transform};

pub const APT_LAYOUT: &str = include_str!("../fixtures/Layout_Data/apt_rf.txt");
pub const AFF_LAYOUT: &str = include_str!("../fixtures/Layout_Data/aff_rf.txt");
pub const FSS_LAYOUT: &str = include_str!("../fixtures/Layout_Data/fss_rf.txt");
pub const NAV_LAYOUT: &str = include_str!("../fixtures/Layout_Data/nav_rf.txt");

pub const STATE_CSV: &str = "STATE_CODE,STATE_NAME,REGION_CODE\n\
                             NY,NEW YORK,AEA\n\
                             CT,CONNECTICUT,ANE\n";

/// Renders a fixed-width record, padded with blanks to its length.
pub fn record(layout: &str, indicator: &str, values: &[(Selector, &str)]) -> String {
    let layout = LayoutFamily::parse(layout).expect("fixture layout should parse");
    let table = layout.table(indicator).expect("record type should exist");
    let mut bytes = vec![b' '; table.len()];
    bytes[..indicator.len()].copy_from_slice(indicator.as_bytes());

    for (selector, value) in values {
        let spec = field("value", *selector, Transform::string());
        let descriptor = FieldDescriptor::bind(table, &spec).expect("selector should bind");
        let range = descriptor.range;
        let start = match descriptor.justification {
            Justification::Left => range.start,
            Justification::Right => range.end - value.len(),
        };
        bytes[start..start + value.len()].copy_from_slice(value.as_bytes());
    }

    String::from_utf8(bytes).expect("values should be ASCII")
}

pub fn airport(site: &str, lid: &str, name: &str) -> String {
    record(
        APT_LAYOUT,
        "APT",
        &[
            (Selector::Dlid(0), site),
            (Selector::Tag("E7"), "AIRPORT"),
            (Selector::Tag("E2"), lid),
            (Selector::Tag("E3"), "04/18/2019"),
            (Selector::Tag("A4"), "NY"),
            (Selector::Tag("A1"), "NEW YORK"),
            (Selector::Tag("A2"), name),
            (Selector::Tag("A10"), "PU"),
            (Selector::Tag("A18"), "PU"),
            (Selector::Tag("A19"), "40-38-23.7400N"),
            (Selector::Tag("A20"), "073-46-43.2930W"),
            (Selector::Tag("A22"), "13.2"),
            (Selector::Tag("E28"), "13W"),
            (Selector::Tag("E146"), "ZNY"),
            (Selector::Tag("E156"), "ZNY"),
            (Selector::Tag("E6"), "ISP"),
            (Selector::Tag("A86"), "BDR"),
            (Selector::Tag("A21"), "O"),
        ],
    )
}

pub fn runway(site: &str, id: &str, base: &str, reciprocal: &str) -> String {
    record(
        APT_LAYOUT,
        "RWY",
        &[
            (Selector::Dlid(0), site),
            (Selector::Tag("A30"), id),
            (Selector::Tag("A31"), "12079"),
            (Selector::Tag("A32"), "200"),
            (Selector::Tag("A33"), "ASPH"),
            (Selector::Tag("A36"), base),
            (Selector::Tag("A38"), "40-37-19.2700N"),
            (Selector::Tag("A39"), "073-47-08.5000W"),
            (Selector::Tag("A52"), reciprocal),
            (Selector::Tag("A54"), "40-39-07.5300N"),
            (Selector::Tag("A55"), "073-45-48.1500W"),
        ],
    )
}

pub fn artcc(location: &str) -> String {
    record(
        AFF_LAYOUT,
        "AFF1",
        &[
            (Selector::Dlid(0), "ZNY"),
            (Selector::Dlid(1), location),
            (Selector::Dlid(2), "ARTCC"),
            (Selector::Tag("AFF1"), "NEW YORK"),
            (Selector::Tag("AFF6"), "NY"),
            (Selector::Tag("AFF9"), "KZNY"),
        ],
    )
}

pub fn artcc_frequency(location: &str, frequency: &str, airport: &str) -> String {
    record(
        AFF_LAYOUT,
        "AFF3",
        &[
            (Selector::Dlid(0), "ZNY"),
            (Selector::Dlid(1), location),
            (Selector::Dlid(2), "ARTCC"),
            (Selector::Tag("AFF12"), frequency),
            (Selector::Tag("AFF13"), "LOW"),
            (Selector::Tag("AFF16"), airport),
        ],
    )
}

pub fn fss(id: &str, name: &str, airport: &str) -> String {
    record(
        FSS_LAYOUT,
        "FSS",
        &[
            (Selector::Dlid(0), id),
            (Selector::Tag("F1"), name),
            (Selector::Tag("F6"), airport),
            (Selector::Tag("F10"), "122.2"),
        ],
    )
}

pub fn navaid(id: &str, navaid_type: &str, frequency: &str) -> String {
    record(
        NAV_LAYOUT,
        "NAV1",
        &[
            (Selector::Dlid(0), id),
            (Selector::Dlid(1), navaid_type),
            (Selector::Dlid(2), "KENNEDY"),
            (Selector::Tag("N2"), "04/18/2019"),
            (Selector::Tag("N3"), "KENNEDY"),
            (Selector::Tag("N6"), "NY"),
            (Selector::Tag("N10"), "40-37-58.400N"),
            (Selector::Tag("N11"), "073-46-17.000W"),
            (Selector::Tag("N13"), frequency),
            (Selector::Tag("N14"), "ZNY"),
            (Selector::Tag("N15"), "ZNY"),
            (Selector::Tag("N16"), "ISP"),
        ],
    )
}

/// A distribution with the layouts of all fixed-width families.
pub fn layouts() -> MemoryDistribution {
    MemoryDistribution::new()
        .with_file("Layout_Data/apt_rf.txt", APT_LAYOUT)
        .with_file("Layout_Data/aff_rf.txt", AFF_LAYOUT)
        .with_file("Layout_Data/fss_rf.txt", FSS_LAYOUT)
        .with_file("Layout_Data/nav_rf.txt", NAV_LAYOUT)
}

/// A distribution with a record or two of every family.
pub fn distribution() -> MemoryDistribution {
    layouts()
        .with_file("STATE.csv", STATE_CSV)
        .with_file(
            "APT.txt",
            [
                airport("04508.*A", "JFK", "JOHN F KENNEDY INTL"),
                runway("04508.*A", "04L/22R", "04L", "22R"),
                runway("04508.*A", "13R/31L", "13R", "31L"),
            ]
            .join("\n"),
        )
        .with_file(
            "AFF.txt",
            [
                artcc("RONKONKOMA"),
                artcc_frequency("RONKONKOMA", "132.175", "JFK"),
                artcc("CALVERTON"),
            ]
            .join("\n"),
        )
        .with_file(
            "FSS.txt",
            [fss("ISP", "ISLIP", "ISP"), fss("BDR", "BRIDGEPORT", "BDR")].join("\n"),
        )
        .with_file(
            "NAV.txt",
            [navaid("JFK", "VOR/DME", "115.9"), navaid("JFK", "NDB", "365")].join("\n"),
        )
}
