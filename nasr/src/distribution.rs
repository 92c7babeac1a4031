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

//! Access to the files of a NASR distribution.
//!
//! A distribution is the set of files the FAA publishes per cycle. How it's
//! stored (an archive, an extracted directory or bytes already in memory) is
//! up to the caller, who implements [`Distribution`] for it.

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncReadExt, BufReader};

use crate::error::Error;

/// A reader of one distribution file.
pub type FileReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// The files of a NASR distribution.
///
/// Concurrent reads of distinct paths must be safe. Every call to
/// [`open`](Self::open) returns an independent reader, so reads of the same
/// path never interleave.
#[async_trait]
pub trait Distribution: Send + Sync {
    /// Opens the file at the path, relative to the distribution's root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchFile`] if there is no such file.
    async fn open(&self, path: &str) -> Result<FileReader, Error>;

    /// Returns `true` if the file exists.
    async fn exists(&self, path: &str) -> bool;

    /// Reads the whole file.
    async fn read(&self, path: &str) -> Result<Vec<u8>, Error> {
        let mut reader = self.open(path).await?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}

/// A distribution held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDistribution {
    files: HashMap<String, Arc<[u8]>>,
}

impl MemoryDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the file at the path.
    pub fn insert<P, B>(&mut self, path: P, bytes: B)
    where
        P: Into<String>,
        B: Into<Vec<u8>>,
    {
        let bytes: Vec<u8> = bytes.into();
        self.files.insert(path.into(), Arc::from(bytes));
    }

    /// Adds or replaces the file at the path.
    pub fn with_file<P, B>(mut self, path: P, bytes: B) -> Self
    where
        P: Into<String>,
        B: Into<Vec<u8>>,
    {
        self.insert(path, bytes);
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

#[async_trait]
impl Distribution for MemoryDistribution {
    async fn open(&self, path: &str) -> Result<FileReader, Error> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| Error::NoSuchFile(path.to_owned()))?;

        Ok(Box::new(Cursor::new(Arc::clone(bytes))))
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// A distribution extracted into a directory.
#[derive(Clone, Debug)]
pub struct DirectoryDistribution {
    root: PathBuf,
}

impl DirectoryDistribution {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Distribution for DirectoryDistribution {
    async fn open(&self, path: &str) -> Result<FileReader, Error> {
        let resolved = self.resolve(path);
        debug!("opening {}", resolved.display());

        match File::open(&resolved).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::NoSuchFile(path.to_owned()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }
}
