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
use std::sync::Arc;

use crate::Family;

/// The encoding of the distribution's record files.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum Format {
    /// Fixed-width text files described by layout definitions.
    #[default]
    FixedWidth,
    /// CSV files with a header row.
    Csv,
}

/// Called with the family and the number of bytes read from its files so far.
pub type ProgressFn = Arc<dyn Fn(Family, u64) + Send + Sync>;

/// Configures how the record parsers read a distribution.
///
/// # Examples
///
/// ```
/// use nasr::{Format, ParserConfig};
///
/// let config = ParserConfig::default()
///     .with_format(Format::Csv)
///     .with_yield_every(500)
///     .with_progress(|family, bytes| println!("{family}: {bytes} bytes"));
///
/// assert_eq!(config.format, Format::Csv);
/// ```
#[derive(Clone)]
pub struct ParserConfig {
    pub format: Format,
    /// Rows after which a parser yields to the scheduler. Zero never yields.
    pub yield_every: usize,
    /// Directory of the layout definitions within the distribution.
    pub layout_dir: String,
    progress: Option<ProgressFn>,
}

impl ParserConfig {
    pub const DEFAULT_YIELD_EVERY: usize = 1000;
    pub const DEFAULT_LAYOUT_DIR: &'static str = "Layout_Data";

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_yield_every(mut self, rows: usize) -> Self {
        self.yield_every = rows;
        self
    }

    pub fn with_layout_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.layout_dir = dir.into();
        self
    }

    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(Family, u64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(f));
        self
    }

    /// Returns the path of the layout definition within the distribution.
    pub fn layout_path(&self, file: &str) -> String {
        if self.layout_dir.is_empty() {
            file.to_owned()
        } else {
            format!("{}/{file}", self.layout_dir.trim_end_matches('/'))
        }
    }

    pub(crate) fn report(&self, family: Family, bytes: u64) {
        if let Some(progress) = &self.progress {
            progress(family, bytes);
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            yield_every: Self::DEFAULT_YIELD_EVERY,
            layout_dir: Self::DEFAULT_LAYOUT_DIR.to_owned(),
            progress: None,
        }
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("format", &self.format)
            .field("yield_every", &self.yield_every)
            .field("layout_dir", &self.layout_dir)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_layout_path() {
        let config = ParserConfig::default();
        assert_eq!(config.layout_path("apt_rf.txt"), "Layout_Data/apt_rf.txt");

        let config = config.with_layout_dir("layouts/");
        assert_eq!(config.layout_path("apt_rf.txt"), "layouts/apt_rf.txt");

        let config = config.with_layout_dir("");
        assert_eq!(config.layout_path("apt_rf.txt"), "apt_rf.txt");
    }
}
