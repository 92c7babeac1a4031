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

//! Layout-definition interpreter.
//!
//! The FAA describes each fixed-width file of a distribution in a layout text.
//! Every record type starts with a banner like `'AFF1' RECORD TYPE` followed by
//! one row per field:
//!
//! ```text
//! L AN 0004 00005  DLID    ARTCC IDENTIFIER
//! ^ ^  ^    ^      ^       ^
//! | |  |    |      |       description
//! | |  |    |      identifier
//! | |  |    1-indexed start
//! | |  length
//! | type
//! justification
//! ```
//!
//! Text right below a field row continues that field's description. After a
//! blank line, everything up to the next field row or banner (page headings,
//! commentary) is skipped.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LayoutError;

static BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*'([A-Z0-9]+)'\s+RECORD\s+TYPE\b").expect("banner regex"));

static FIELD_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([LR])\s+([A-Z]{1,2})\s+(\d{4,5})\s+(\d{5})\s+(\S+)(?:\s+(.*))?$")
        .expect("field row regex")
});

static RECORD_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RECORD\s+LENGTH\D*(\d+)").expect("record length regex"));

/// How a value is aligned within its field.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Justification {
    Left,
    Right,
}

/// The identifier of a field.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Identifier {
    /// The field isn't referenced (`NONE`).
    None,
    /// The field is part of the entity's unique key (`DLID`).
    DatabaseLocatorId,
    /// A numbered tag, e.g. `E7`, referenced by the field descriptions.
    Tag(String),
}

impl From<&str> for Identifier {
    fn from(token: &str) -> Self {
        match token {
            "NONE" => Self::None,
            "DLID" => Self::DatabaseLocatorId,
            tag => Self::Tag(tag.to_owned()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::DatabaseLocatorId => write!(f, "DLID"),
            Self::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// A field row of the layout.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LayoutField {
    pub identifier: Identifier,
    /// Half-open byte range within the record.
    pub range: Range<usize>,
    pub justification: Justification,
    /// The FAA type code, e.g. `AN` or `N`.
    pub type_code: String,
    pub description: String,
}

/// The fields of one record type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RecordTable {
    indicator: String,
    fields: Vec<LayoutField>,
    declared_length: Option<usize>,
}

impl RecordTable {
    /// The record-type indicator, e.g. `AFF1`.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    /// Returns the record length in bytes.
    pub fn len(&self) -> usize {
        self.declared_length
            .or_else(|| self.fields.last().map(|field| field.range.end))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at the position within the table.
    pub fn get(&self, index: usize) -> Option<&LayoutField> {
        self.fields.get(index)
    }

    /// Returns the first field with the identifier.
    pub fn field(&self, identifier: &Identifier) -> Option<&LayoutField> {
        self.fields.iter().find(|f| &f.identifier == identifier)
    }

    /// Returns the field tagged `tag`.
    pub fn by_tag(&self, tag: &str) -> Option<&LayoutField> {
        self.fields
            .iter()
            .find(|f| matches!(&f.identifier, Identifier::Tag(t) if t == tag))
    }

    /// Returns the n-th (zero-based) key field of the record.
    pub fn dlid(&self, n: usize) -> Option<&LayoutField> {
        self.fields
            .iter()
            .filter(|f| f.identifier == Identifier::DatabaseLocatorId)
            .nth(n)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.fields.is_empty() {
            return Err(LayoutError::EmptyTable {
                indicator: self.indicator.clone(),
            });
        }

        if let Some(declared) = self.declared_length {
            let actual = self.fields.last().map_or(0, |f| f.range.end);
            if actual != declared {
                return Err(LayoutError::LengthMismatch {
                    indicator: self.indicator.clone(),
                    declared,
                    actual,
                });
            }
        }

        Ok(())
    }
}

/// All record tables of one layout-definition text.
///
/// A family is parsed once and is read-only afterwards, so it can be shared
/// between concurrent readers.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LayoutFamily {
    tables: BTreeMap<String, RecordTable>,
    // indicators sorted from longest to shortest for prefix matching
    indicators: Vec<String>,
}

impl LayoutFamily {
    /// Parses the layout-definition text.
    ///
    /// # Errors
    ///
    /// Returns an error if any record table is malformed. No partial layout is
    /// returned.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut interpreter = Interpreter::default();

        for (n, line) in text.lines().enumerate() {
            interpreter.feed(n + 1, line)?;
        }

        interpreter.finish()
    }

    /// Returns the table of the record type.
    pub fn table(&self, indicator: &str) -> Option<&RecordTable> {
        self.tables.get(indicator)
    }

    pub fn tables(&self) -> impl Iterator<Item = &RecordTable> {
        self.tables.values()
    }

    pub fn indicators(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Returns the indicator with which the record starts.
    ///
    /// The longest matching indicator wins.
    pub fn indicator_of(&self, record: &[u8]) -> Option<&str> {
        self.indicators
            .iter()
            .find(|indicator| record.starts_with(indicator.as_bytes()))
            .map(String::as_str)
    }

    /// The length of the longest indicator.
    pub fn indicator_len(&self) -> usize {
        self.indicators.first().map_or(0, String::len)
    }
}

impl FromStr for LayoutFamily {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Where the interpreter is within the layout text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
enum State {
    /// Before the first banner. Field rows are an error here.
    #[default]
    SeekingTable,
    /// Right after a banner or a field row. Indented text continues the
    /// description of the last field.
    ReadingFields,
    /// After a blank line within a table, e.g. column headings or page
    /// footers. Text is ignored until the next field row or banner.
    SkippingProse,
}

#[derive(Default)]
struct Interpreter {
    state: State,
    tables: BTreeMap<String, RecordTable>,
    current: Option<String>,
    default_length: Option<usize>,
}

impl Interpreter {
    fn feed(&mut self, n: usize, line: &str) -> Result<(), LayoutError> {
        // a field row's description may mention other record types
        if let Some(captures) = FIELD_ROW.captures(line) {
            return self.field(n, &captures);
        }

        if let Some(captures) = BANNER.captures(line) {
            self.banner(captures[1].to_owned());
            return Ok(());
        }

        if let Some(captures) = RECORD_LENGTH.captures(line) {
            let length = captures[1].parse().ok();
            if self.state == State::SeekingTable {
                self.default_length = length;
            } else if let Some(table) = self.current_table() {
                table.declared_length = length;
            }
            return Ok(());
        }

        let text = line.trim();
        match self.state {
            State::SeekingTable | State::SkippingProse => {}
            State::ReadingFields if text.is_empty() => self.state = State::SkippingProse,
            State::ReadingFields => {
                if let Some(field) = self.current_table().and_then(|t| t.fields.last_mut()) {
                    if !field.description.is_empty() {
                        field.description.push(' ');
                    }
                    field.description.push_str(text);
                }
            }
        }

        Ok(())
    }

    fn current_table(&mut self) -> Option<&mut RecordTable> {
        let indicator = self.current.as_ref()?;
        self.tables.get_mut(indicator)
    }

    fn banner(&mut self, indicator: String) {
        let declared_length = self.default_length;
        // a repeated banner continues the table on the next page
        self.tables
            .entry(indicator.clone())
            .or_insert_with(|| RecordTable {
                indicator: indicator.clone(),
                fields: Vec::new(),
                declared_length,
            });
        self.current = Some(indicator);
        self.state = State::ReadingFields;
    }

    fn field(&mut self, n: usize, captures: &regex::Captures<'_>) -> Result<(), LayoutError> {
        if self.state == State::SeekingTable {
            return Err(LayoutError::FieldOutsideTable { line: n });
        }
        let Some(table) = self.current_table() else {
            return Err(LayoutError::FieldOutsideTable { line: n });
        };
        let indicator = &table.indicator;

        // the regex guarantees digits of at most five places
        let length: usize = captures[3].parse().unwrap_or_default();
        let start: usize = captures[4].parse().unwrap_or_default();

        if length == 0 || start == 0 {
            return Err(LayoutError::InvalidField {
                indicator: indicator.clone(),
                line: n,
            });
        }

        let previous_end = table.fields.last().map_or(0, |f| f.range.end);
        let offset = start - 1;

        if offset < previous_end {
            return Err(LayoutError::FieldBeforeGroup {
                indicator: indicator.clone(),
                line: n,
                start,
                previous_end,
            });
        } else if offset > previous_end {
            return Err(LayoutError::Gap {
                indicator: indicator.clone(),
                line: n,
                start,
                previous_end,
            });
        }

        table.fields.push(LayoutField {
            identifier: Identifier::from(&captures[5]),
            range: offset..offset + length,
            justification: if &captures[1] == "R" {
                Justification::Right
            } else {
                Justification::Left
            },
            type_code: captures[2].to_owned(),
            description: captures
                .get(6)
                .map_or(String::new(), |m| m.as_str().trim().to_owned()),
        });

        self.state = State::ReadingFields;
        Ok(())
    }

    fn finish(self) -> Result<LayoutFamily, LayoutError> {
        if self.tables.is_empty() {
            return Err(LayoutError::Empty);
        }

        for table in self.tables.values() {
            table.validate()?;
            debug!(
                "record type '{}' has {} fields over {} bytes",
                table.indicator,
                table.fields.len(),
                table.len()
            );
        }

        let mut indicators: Vec<String> = self.tables.keys().cloned().collect();
        indicators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Ok(LayoutFamily {
            tables: self.tables,
            indicators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "
                 AIR ROUTE TRAFFIC CONTROL CENTER LAYOUT
    RECORD LENGTH: 40

                    'AFF1' RECORD TYPE

    J  T  L    S      E
    U  Y  E    T      L
    L AN 0004 00001  NONE    RECORD TYPE INDICATOR.
    L AN 0004 00005  DLID    ARTCC IDENTIFIER.
    L AN 0020 00009  AFF1    ARTCC NAME.
                             THE NAME MAY BE ABBREVIATED.
    R N  0012 00029  AFF2    SEQUENCE.

                    'AFF2' RECORD TYPE

    L AN 0004 00001  NONE    RECORD TYPE INDICATOR.
    L AN 0004 00005  DLID    ARTCC IDENTIFIER.
    L AN 0032 00009  AFF10   REMARK TEXT.
";

    #[test]
    fn parses_tables() {
        let layout = LayoutFamily::parse(LAYOUT).expect("layout should parse");

        let aff1 = layout.table("AFF1").expect("AFF1 should exist");
        assert_eq!(aff1.fields().len(), 4);
        assert_eq!(aff1.len(), 40);
        assert_eq!(aff1.get(0).map(|f| f.range.clone()), Some(0..4));
        assert_eq!(aff1.dlid(0).map(|f| f.range.clone()), Some(4..8));
        assert_eq!(aff1.by_tag("AFF1").map(|f| f.range.clone()), Some(8..28));
        assert_eq!(
            aff1.by_tag("AFF2").map(|f| f.justification),
            Some(Justification::Right)
        );
        assert_eq!(
            aff1.get(2).map(|f| f.description.as_str()),
            Some("ARTCC NAME. THE NAME MAY BE ABBREVIATED.")
        );
        assert_eq!(aff1.get(3).map(|f| f.description.as_str()), Some("SEQUENCE."));

        let aff2 = layout.table("AFF2").expect("AFF2 should exist");
        assert_eq!(aff2.field(&Identifier::Tag("AFF10".into())).map(|f| f.range.end), Some(40));
    }

    #[test]
    fn ranges_are_contiguous() {
        let layout = LayoutFamily::parse(LAYOUT).expect("layout should parse");

        for table in layout.tables() {
            let mut end = 0;
            for field in table.fields() {
                assert_eq!(field.range.start, end);
                end = field.range.end;
            }
            assert_eq!(end, table.len());
        }
    }

    #[test]
    fn matches_longest_indicator() {
        let layout = LayoutFamily::parse(
            "'NAV' RECORD TYPE
             L AN 0003 00001 NONE TYPE
             'NAV1' RECORD TYPE
             L AN 0004 00001 NONE TYPE",
        )
        .expect("layout should parse");

        assert_eq!(layout.indicator_of(b"NAV1ABC"), Some("NAV1"));
        assert_eq!(layout.indicator_of(b"NAV ABC"), Some("NAV"));
        assert_eq!(layout.indicator_of(b"FSS ABC"), None);
        assert_eq!(layout.indicator_len(), 4);
    }

    #[test]
    fn continues_table_after_page_break() {
        let layout = LayoutFamily::parse(
            "'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE
             PAGE 2
             'APT' RECORD TYPE
             L AN 0004 00004 E7 IDENT",
        )
        .expect("layout should parse");

        assert_eq!(layout.table("APT").map(RecordTable::len), Some(7));
    }

    #[test]
    fn reads_banners_in_descriptions_as_fields() {
        let layout = LayoutFamily::parse(
            "'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE
             L AN 0004 00004 E7   IDENT. SEE 'RMK' RECORD TYPE FOR REMARKS.
             'RMK' RECORD TYPE
             L AN 0003 00001 NONE TYPE",
        )
        .expect("layout should parse");

        let apt = layout.table("APT").expect("APT should exist");
        assert_eq!(apt.len(), 7);
        assert_eq!(
            apt.by_tag("E7").map(|f| f.description.as_str()),
            Some("IDENT. SEE 'RMK' RECORD TYPE FOR REMARKS.")
        );
        assert_eq!(layout.table("RMK").map(RecordTable::len), Some(3));
    }

    #[test]
    fn ignores_prose_after_blank_line() {
        let layout = LayoutFamily::parse(
            "'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE

             FAA FORM 5010-1
             L AN 0004 00004 E7 IDENT",
        )
        .expect("layout should parse");

        let apt = layout.table("APT").expect("APT should exist");
        assert_eq!(apt.get(0).map(|f| f.description.as_str()), Some("TYPE"));
        assert_eq!(apt.len(), 7);
    }

    #[test]
    fn rejects_field_before_group() {
        let result = LayoutFamily::parse(
            "'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE
             L AN 0004 00003 E7 IDENT",
        );

        assert!(matches!(
            result,
            Err(LayoutError::FieldBeforeGroup {
                start: 3,
                previous_end: 3,
                ..
            })
        ));
    }

    #[test]
    fn rejects_gap() {
        let result = LayoutFamily::parse(
            "'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE
             L AN 0004 00010 E7 IDENT",
        );

        assert!(matches!(result, Err(LayoutError::Gap { start: 10, .. })));
    }

    #[test]
    fn rejects_length_mismatch() {
        let result = LayoutFamily::parse(
            "RECORD LENGTH 10
             'APT' RECORD TYPE
             L AN 0003 00001 NONE TYPE",
        );

        assert_eq!(
            result,
            Err(LayoutError::LengthMismatch {
                indicator: "APT".into(),
                declared: 10,
                actual: 3
            })
        );
    }

    #[test]
    fn rejects_orphaned_field() {
        let result = LayoutFamily::parse("L AN 0003 00001 NONE TYPE");
        assert_eq!(result, Err(LayoutError::FieldOutsideTable { line: 1 }));
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(LayoutFamily::parse("just prose"), Err(LayoutError::Empty));
    }

    #[test]
    fn classifies_identifiers() {
        assert_eq!(Identifier::from("NONE"), Identifier::None);
        assert_eq!(Identifier::from("DLID"), Identifier::DatabaseLocatorId);
        assert_eq!(Identifier::from("E7"), Identifier::Tag("E7".into()));
    }
}
