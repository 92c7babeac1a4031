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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A group of records the FAA publishes together.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Family {
    States,
    Airports,
    ARTCCs,
    FSSs,
    Navaids,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Self::States,
        Self::Airports,
        Self::ARTCCs,
        Self::FSSs,
        Self::Navaids,
    ];

    /// The layout-definition file of the family's fixed-width file.
    ///
    /// States are only distributed as CSV and have no layout.
    pub fn layout_file(&self) -> Option<&'static str> {
        match self {
            Self::States => None,
            Self::Airports => Some("apt_rf.txt"),
            Self::ARTCCs => Some("aff_rf.txt"),
            Self::FSSs => Some("fss_rf.txt"),
            Self::Navaids => Some("nav_rf.txt"),
        }
    }

    /// The fixed-width data file.
    pub fn fixed_width_file(&self) -> Option<&'static str> {
        match self {
            Self::States => None,
            Self::Airports => Some("APT.txt"),
            Self::ARTCCs => Some("AFF.txt"),
            Self::FSSs => Some("FSS.txt"),
            Self::Navaids => Some("NAV.txt"),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::States => write!(f, "states"),
            Self::Airports => write!(f, "airports"),
            Self::ARTCCs => write!(f, "ARTCCs"),
            Self::FSSs => write!(f, "FSSs"),
            Self::Navaids => write!(f, "navaids"),
        }
    }
}
