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

use std::fmt;
use std::ops::Range;

use crate::layout::{Identifier, Justification, RecordTable};
use crate::transform::Transform;
use crate::BindError;

/// Selects a field of a record table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Selector {
    /// The field with the numbered tag, e.g. `E7`.
    Tag(&'static str),
    /// The n-th (zero-based) `DLID` field.
    Dlid(usize),
    /// The field at the position within the table.
    Index(usize),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "tagged {tag}"),
            Self::Dlid(n) => write!(f, "DLID #{n}"),
            Self::Index(i) => write!(f, "at index {i}"),
        }
    }
}

/// A field a record parser wants to read, before it's bound to a layout.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub selector: Selector,
    pub transform: Transform,
}

/// Shorthand to create a [`FieldSpec`].
pub fn field(name: &'static str, selector: Selector, transform: Transform) -> FieldSpec {
    FieldSpec {
        name,
        selector,
        transform,
    }
}

/// A field bound to its location within a record.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub identifier: Identifier,
    /// Half-open byte range within the record.
    pub range: Range<usize>,
    pub justification: Justification,
    pub transform: Transform,
}

impl FieldDescriptor {
    /// Binds the spec to the field it selects in the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has no such field.
    pub fn bind(table: &RecordTable, spec: &FieldSpec) -> Result<Self, BindError> {
        let field = match spec.selector {
            Selector::Tag(tag) => table.by_tag(tag),
            Selector::Dlid(n) => table.dlid(n),
            Selector::Index(i) => table.get(i),
        }
        .ok_or_else(|| BindError::MissingField {
            indicator: table.indicator().to_owned(),
            field: spec.name,
            selector: spec.selector.to_string(),
        })?;

        Ok(Self {
            name: spec.name,
            identifier: field.identifier.clone(),
            range: field.range.clone(),
            justification: field.justification,
            transform: spec.transform.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutFamily;

    #[test]
    fn binds_selectors() {
        let layout = LayoutFamily::parse(
            "'NAV1' RECORD TYPE
             L AN 0004 00001 NONE TYPE
             L AN 0004 00005 DLID IDENT
             L AN 0020 00009 DLID FACILITY TYPE
             R N  0007 00029 N7   ELEVATION",
        )
        .expect("layout should parse");
        let table = layout.table("NAV1").expect("NAV1 should exist");

        let d = FieldDescriptor::bind(table, &field("type", Selector::Dlid(1), Transform::string()))
            .expect("DLID #1 should bind");
        assert_eq!(d.range, 8..28);
        assert_eq!(d.identifier, Identifier::DatabaseLocatorId);

        let spec = field("elev", Selector::Tag("N7"), Transform::float());
        let d = FieldDescriptor::bind(table, &spec).expect("N7 should bind");
        assert_eq!(d.range, 28..35);
        assert_eq!(d.justification, Justification::Right);

        let d = FieldDescriptor::bind(table, &field("rt", Selector::Index(0), Transform::string()))
            .expect("index 0 should bind");
        assert_eq!(d.range, 0..4);

        assert_eq!(
            FieldDescriptor::bind(table, &field("x", Selector::Tag("N99"), Transform::string()))
                .map(|d| d.range),
            Err(BindError::MissingField {
                indicator: "NAV1".into(),
                field: "x",
                selector: "tagged N99".into()
            })
        );
    }
}
