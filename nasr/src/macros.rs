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

/// Declares a fieldless enum that is parsed from the FAA's codes.
///
/// Each variant lists the codes it's spelled as in the distribution. The
/// fixed-width files and the CSV files don't always agree on the spelling, so
/// a variant may have more than one code. The first code is used when the
/// variant is displayed.
///
/// ```ignore
/// string_enum! {
///     pub enum Ownership {
///         Public => "PU",
///         Private => "PR",
///     }
/// }
/// ```
macro_rules! string_enum {
    (@first $first:literal $(| $rest:literal)*) => {
        $first
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $($code:literal)|+ ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $($code)|+ => Ok(Self::$variant), )+
                    _ => Err($crate::error::UnknownCode(s.to_owned())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, "{}", string_enum!(@first $($code)|+)), )+
                }
            }
        }
    };
}
