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

//! Record parsers of the NASR families.
//!
//! Every family has its own parser. A parser reads the family's files from
//! the [`Distribution`], dispatches each record by its record type, folds
//! sub-records (runways, remarks, frequencies) into their base record and
//! finally publishes the finished records into the [`Store`] at once.
//!
//! Errors that concern a single record are passed to an [`ErrorHandler`],
//! which decides whether the parser skips the record or aborts.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use csv::ByteRecord;
use log::{debug, warn};
use nasr_format::{
    latin1, BindError, BoundCsv, Cause, CsvHeader, CsvTransformer, DecodeError, FieldSpec,
    FixedWidthTransformer, LayoutFamily, Position, Row,
};
use tokio::io::AsyncBufReadExt;
use tokio::sync::OnceCell;

use crate::config::ParserConfig;
use crate::data::Collection;
use crate::distribution::{Distribution, FileReader};
use crate::error::Error;
use crate::store::Store;
use crate::Family;

mod airports;
mod artccs;
mod fsss;
mod navaids;
mod states;

pub use airports::AirportParser;
pub use artccs::ARTCCParser;
pub use fsss::FSSParser;
pub use navaids::NavaidParser;
pub use states::StateParser;

/// What a parser does after a record failed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorAction {
    /// Skip the record and continue with the next one.
    Continue,
    /// Stop parsing the family and fail with the error.
    Abort,
}

/// Decides how a parser handles a record that failed.
///
/// Any `Fn(&Error) -> ErrorAction` is a handler:
///
/// ```
/// use nasr::{Error, ErrorAction};
///
/// let handler = |e: &Error| match e {
///     Error::Decode { .. } => ErrorAction::Continue,
///     _ => ErrorAction::Abort,
/// };
/// # fn assert_handler<H: nasr::ErrorHandler>(_: &H) {}
/// # assert_handler(&handler);
/// ```
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, error: &Error) -> ErrorAction;
}

impl<F> ErrorHandler for F
where
    F: Fn(&Error) -> ErrorAction + Send + Sync,
{
    fn handle(&self, error: &Error) -> ErrorAction {
        self(error)
    }
}

/// Aborts the parse on the first failed record.
#[derive(Copy, Clone, Debug, Default)]
pub struct AbortOnError;

impl ErrorHandler for AbortOnError {
    fn handle(&self, _: &Error) -> ErrorAction {
        ErrorAction::Abort
    }
}

/// Skips every failed record.
#[derive(Copy, Clone, Debug, Default)]
pub struct SkipInvalid;

impl ErrorHandler for SkipInvalid {
    fn handle(&self, _: &Error) -> ErrorAction {
        ErrorAction::Continue
    }
}

/// The parser of one family.
#[async_trait]
pub trait RecordParser: Send + Sync {
    fn family(&self) -> Family;

    /// Parses the family and publishes its records.
    ///
    /// Nothing is published if the parse fails or the returned future is
    /// dropped before it completes.
    ///
    /// # Errors
    ///
    /// Returns layout, bind and I/O errors, and record errors the handler
    /// decided to abort on.
    async fn parse(&self, handler: &dyn ErrorHandler) -> Result<(), Error>;
}

/// Creates the parser of the family.
pub fn parser(
    family: Family,
    distribution: Arc<dyn Distribution>,
    config: ParserConfig,
    store: Store,
) -> Box<dyn RecordParser> {
    match family {
        Family::States => Box::new(StateParser::new(distribution, config, store)),
        Family::Airports => Box::new(AirportParser::new(distribution, config, store)),
        Family::ARTCCs => Box::new(ARTCCParser::new(distribution, config, store)),
        Family::FSSs => Box::new(FSSParser::new(distribution, config, store)),
        Family::Navaids => Box::new(NavaidParser::new(distribution, config, store)),
    }
}

/// Passes the error to the handler.
///
/// Returns the error if the handler aborts.
pub(crate) fn recover(handler: &dyn ErrorHandler, error: Error) -> Result<(), Error> {
    match handler.handle(&error) {
        ErrorAction::Continue => {
            warn!("skipping record: {error}");
            Ok(())
        }
        ErrorAction::Abort => Err(error),
    }
}

/// Everything a parser reads from and writes to.
pub(crate) struct Source {
    family: Family,
    distribution: Arc<dyn Distribution>,
    config: ParserConfig,
    store: Store,
    layout: OnceCell<Arc<LayoutFamily>>,
}

impl Source {
    pub(crate) fn new(
        family: Family,
        distribution: Arc<dyn Distribution>,
        config: ParserConfig,
        store: Store,
    ) -> Self {
        Self {
            family,
            distribution,
            config,
            store,
            layout: OnceCell::new(),
        }
    }

    pub(crate) fn family(&self) -> Family {
        self.family
    }

    pub(crate) fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the family's layout, which is loaded on first use.
    pub(crate) async fn layout(&self) -> Result<Arc<LayoutFamily>, Error> {
        let file = self
            .family
            .layout_file()
            .ok_or_else(|| Error::NoSuchFile(format!("layout of {}", self.family)))?;

        let layout = self
            .layout
            .get_or_try_init(|| async {
                let path = self.config.layout_path(file);
                let bytes = self.distribution.read(&path).await?;
                let layout = LayoutFamily::parse(&latin1(&bytes)).map_err(|error| Error::Layout {
                    family: self.family,
                    error,
                })?;

                debug!(
                    "loaded {} record types of {} from {path}",
                    layout.tables().count(),
                    self.family
                );

                Ok::<_, Error>(Arc::new(layout))
            })
            .await?;

        Ok(Arc::clone(layout))
    }

    pub(crate) fn fixed_width_file(&self) -> Result<&'static str, Error> {
        self.family
            .fixed_width_file()
            .ok_or_else(|| Error::NoSuchFile(format!("fixed-width file of {}", self.family)))
    }

    /// Binds the record types of the schema to the family's layout.
    pub(crate) async fn dispatch<K: Copy>(
        &self,
        schema: Vec<(&'static str, K, Vec<FieldSpec>)>,
    ) -> Result<Dispatch<K>, Error> {
        Dispatch::bind(self.family, self.layout().await?, schema)
    }

    pub(crate) async fn lines(&self, path: &str) -> Result<Lines, Error> {
        Ok(Lines::new(self.distribution.open(path).await?))
    }

    pub(crate) async fn csv(&self, path: &str) -> Result<CsvFile, Error> {
        CsvFile::open(self.family, self.distribution.open(path).await?).await
    }

    pub(crate) async fn exists(&self, path: &str) -> bool {
        self.distribution.exists(path).await
    }

    pub(crate) fn pacer(&self) -> Pacer<'_> {
        Pacer {
            family: self.family,
            config: &self.config,
            bytes: 0,
            rows: 0,
        }
    }

    pub(crate) async fn publish(&self, collection: Collection) {
        self.store.publish(collection).await;
    }
}

/// Counts the rows and bytes a parser read and yields to the scheduler every
/// so many rows.
pub(crate) struct Pacer<'a> {
    family: Family,
    config: &'a ParserConfig,
    bytes: u64,
    rows: usize,
}

impl Pacer<'_> {
    pub(crate) async fn tick(&mut self, bytes: u64) {
        self.bytes += bytes;
        self.rows += 1;
        self.config.report(self.family, self.bytes);

        if self.config.yield_every > 0 && self.rows % self.config.yield_every == 0 {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }
}

/// A non-blank line of a fixed-width file.
pub(crate) struct Line<'a> {
    /// One-based line number.
    pub number: u64,
    /// Bytes consumed since the previous line, including skipped lines.
    pub bytes: u64,
    /// The record without line terminator.
    pub text: &'a [u8],
}

/// Reads the lines of a fixed-width file.
pub(crate) struct Lines {
    reader: FileReader,
    buf: Vec<u8>,
    number: u64,
}

impl Lines {
    pub(crate) fn new(reader: FileReader) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    /// Returns the next non-blank line.
    pub(crate) async fn next_line(&mut self) -> Result<Option<Line<'_>>, Error> {
        let mut bytes = 0;

        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf).await?;
            if n == 0 {
                return Ok(None);
            }

            bytes += n as u64;
            self.number += 1;

            let mut end = self.buf.len();
            while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
                end -= 1;
            }

            if self.buf[..end].iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Ok(Some(Line {
                number: self.number,
                bytes,
                text: &self.buf[..end],
            }));
        }
    }
}

/// Record types of a fixed-width file, bound to their transformers.
pub(crate) struct Dispatch<K> {
    family: Family,
    layout: Arc<LayoutFamily>,
    records: HashMap<String, (K, FixedWidthTransformer)>,
}

impl<K: Copy> Dispatch<K> {
    /// Binds every record type of the schema.
    ///
    /// # Errors
    ///
    /// Fails if the layout lacks a record type or field of the schema.
    pub(crate) fn bind(
        family: Family,
        layout: Arc<LayoutFamily>,
        schema: Vec<(&'static str, K, Vec<FieldSpec>)>,
    ) -> Result<Self, Error> {
        let mut records = HashMap::with_capacity(schema.len());

        for (indicator, kind, specs) in schema {
            let table = layout.table(indicator).ok_or_else(|| Error::Bind {
                family,
                error: BindError::MissingRecordType {
                    indicator: indicator.to_owned(),
                },
            })?;

            let transformer = FixedWidthTransformer::bind(table, &specs)
                .map_err(|error| Error::Bind { family, error })?;

            records.insert(indicator.to_owned(), (kind, transformer));
        }

        Ok(Self {
            family,
            layout,
            records,
        })
    }

    /// Decodes the line by its record type.
    ///
    /// Returns `None` for record types the layout defines but the parser
    /// doesn't read.
    pub(crate) fn decode(&self, line: &Line<'_>) -> Result<Option<(K, Row)>, Error> {
        let Some(indicator) = self.layout.indicator_of(line.text) else {
            let len = self.layout.indicator_len().min(line.text.len());
            return Err(Error::UnknownRecordType {
                family: self.family,
                indicator: latin1(&line.text[..len]).trim().to_owned(),
                line: line.number,
            });
        };

        let Some((kind, transformer)) = self.records.get(indicator) else {
            return Ok(None);
        };

        let row = transformer.decode(line.text).map_err(|error| Error::Decode {
            family: self.family,
            line: line.number,
            error,
        })?;

        Ok(Some((*kind, row)))
    }

    pub(crate) fn decode_error(&self, line: &Line<'_>, error: DecodeError) -> Error {
        Error::Decode {
            family: self.family,
            line: line.number,
            error,
        }
    }
}

/// Decodes every line of a fixed-width file and passes the records to `f`.
///
/// Errors of `f` and of decoding a line are passed to the handler.
pub(crate) async fn each_record<K, F>(
    lines: &mut Lines,
    dispatch: &Dispatch<K>,
    pacer: &mut Pacer<'_>,
    handler: &dyn ErrorHandler,
    mut f: F,
) -> Result<(), Error>
where
    K: Copy,
    F: FnMut(K, Row) -> Result<(), DecodeError>,
{
    while let Some(line) = lines.next_line().await? {
        pacer.tick(line.bytes).await;

        let result = match dispatch.decode(&line) {
            Ok(Some((kind, row))) => f(kind, row).map_err(|e| dispatch.decode_error(&line, e)),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            recover(handler, e)?;
        }
    }

    Ok(())
}

/// Takes a required field and parses it into one of `T`'s variants.
pub(crate) fn take_variant<T: FromStr>(
    row: &mut Row,
    name: &'static str,
    expected: &'static str,
) -> Result<T, DecodeError> {
    row.take_parsed(name, expected)?
        .ok_or_else(|| DecodeError::new(name, Position::Unavailable, "", Cause::Required))
}

/// Takes a list field and parses each element into one of `T`'s variants.
pub(crate) fn take_variants<T: FromStr>(
    row: &mut Row,
    name: &'static str,
    expected: &'static str,
) -> Result<Vec<T>, DecodeError> {
    let position = row
        .entries()
        .iter()
        .find(|e| e.name == name)
        .map_or(Position::Unavailable, |e| e.position);

    row.take::<Vec<String>>(name)?
        .into_iter()
        .map(|s| {
            s.parse().map_err(|_| {
                DecodeError::new(name, position, &s, Cause::InvalidVariant { expected })
            })
        })
        .collect()
}

/// A record under construction from its base record and sub-records.
pub(crate) trait Builder: Default {
    type Output;

    /// Describes the sub-records that belong to no other sub-record of the
    /// record, e.g. a remark on a frequency the record doesn't have.
    fn orphans(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns the finished record or `None` if the base record is missing.
    fn build(self) -> Option<Self::Output>;
}

/// Folds sub-records into their base record by key.
pub(crate) struct Accumulator<K, B> {
    builders: BTreeMap<K, B>,
}

impl<K: Ord + Display, B: Builder> Accumulator<K, B> {
    pub(crate) fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// Returns the builder of the key, creating it if needed.
    pub(crate) fn entry(&mut self, key: K) -> &mut B {
        self.builders.entry(key).or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.builders.len()
    }

    /// Builds the records in key order.
    ///
    /// Sub-records without a base record are reported to the handler.
    pub(crate) fn finish(
        self,
        family: Family,
        handler: &dyn ErrorHandler,
    ) -> Result<Vec<B::Output>, Error> {
        let mut records = Vec::with_capacity(self.builders.len());

        for (key, builder) in self.builders {
            for orphan in builder.orphans() {
                recover(
                    handler,
                    Error::Orphaned {
                        family,
                        key: format!("{key} {orphan}"),
                    },
                )?;
            }

            match builder.build() {
                Some(record) => records.push(record),
                None => recover(
                    handler,
                    Error::Orphaned {
                        family,
                        key: key.to_string(),
                    },
                )?,
            }
        }

        Ok(records)
    }
}

/// A CSV file of the distribution, read one record at a time.
pub(crate) struct CsvFile {
    family: Family,
    reader: FileReader,
    buf: Vec<u8>,
    number: u64,
    header: CsvHeader,
}

impl CsvFile {
    async fn open(family: Family, reader: FileReader) -> Result<Self, Error> {
        let mut file = Self {
            family,
            reader,
            buf: Vec::new(),
            number: 0,
            header: CsvHeader::default(),
        };

        let mut record = ByteRecord::new();
        if file.next_record(&mut record).await?.is_some() {
            file.header = CsvHeader::from_record(&record);
        }

        Ok(file)
    }

    /// Resolves the transformer's columns against the header.
    ///
    /// # Errors
    ///
    /// Fails before any row is read if a required column is missing.
    pub(crate) fn bind<'t>(&self, transformer: &'t CsvTransformer) -> Result<BoundCsv<'t>, Error> {
        transformer.bind(&self.header).map_err(|error| Error::Bind {
            family: self.family,
            error,
        })
    }

    /// Reads the next row into the record.
    ///
    /// Returns the row's line number and the bytes read since the previous
    /// row. A quoted field may span several lines, blank lines between rows
    /// are skipped.
    pub(crate) async fn next_record(
        &mut self,
        record: &mut ByteRecord,
    ) -> Result<Option<(u64, u64)>, Error> {
        let mut bytes = 0;

        loop {
            self.buf.clear();
            let mut line = self.number + 1;

            // an odd number of quotes leaves a field open
            loop {
                let start = self.buf.len();
                let n = self.reader.read_until(b'\n', &mut self.buf).await?;
                if n == 0 {
                    break;
                }

                bytes += n as u64;
                self.number += 1;

                if self.number == 1 && self.buf.starts_with(b"\xEF\xBB\xBF") {
                    self.buf.drain(..3);
                }

                if start == 0 && self.buf.iter().all(u8::is_ascii_whitespace) {
                    self.buf.clear();
                    line = self.number + 1;
                    continue;
                }

                if self.buf.iter().filter(|&&b| b == b'"').count() % 2 == 0 {
                    break;
                }
            }

            if self.buf.is_empty() {
                return Ok(None);
            }

            let read = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(self.buf.as_slice())
                .read_byte_record(record)
                .map_err(|e| csv_error(self.family, e))?;

            if read {
                return Ok(Some((line, bytes)));
            }
        }
    }

    pub(crate) fn decode_error(&self, line: u64, error: DecodeError) -> Error {
        Error::Decode {
            family: self.family,
            line,
            error,
        }
    }
}

fn csv_error(family: Family, e: csv::Error) -> Error {
    Error::Csv {
        family,
        error: e.to_string(),
    }
}

/// Decodes the rows of a CSV file and passes them to `f`.
///
/// Rows shorter than the header are skipped. Errors of `f` and of decoding
/// a row are passed to the handler.
pub(crate) async fn each_csv_row<F>(
    file: &mut CsvFile,
    transformer: &CsvTransformer,
    pacer: &mut Pacer<'_>,
    handler: &dyn ErrorHandler,
    mut f: F,
) -> Result<(), Error>
where
    F: FnMut(Row) -> Result<(), DecodeError>,
{
    let bound = file.bind(transformer)?;
    let mut record = ByteRecord::new();

    while let Some((line, bytes)) = file.next_record(&mut record).await? {
        pacer.tick(bytes).await;

        let result = match bound.decode(&record) {
            Ok(Some(row)) => f(row),
            Ok(None) => {
                debug!("skipping short row on line {line}");
                Ok(())
            }
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            recover(handler, file.decode_error(line, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use nasr_format::{field, Selector, Transform};

    use super::*;
    use crate::distribution::MemoryDistribution;

    const LAYOUT: &str = "
        RECORD LENGTH 12
        'NAV1' RECORD TYPE
        L AN 0004 00001 NONE TYPE
        L AN 0004 00005 DLID IDENT
        L AN 0004 00009 N1   NAME
        'NAV2' RECORD TYPE
        L AN 0004 00001 NONE TYPE
        L AN 0004 00005 DLID IDENT
        L AN 0004 00009 N2   REMARK
        'NAV9' RECORD TYPE
        L AN 0004 00001 NONE TYPE
        L AN 0008 00005 NONE UNUSED
    ";

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    enum Kind {
        Base,
        Remark,
    }

    fn schema() -> Vec<(&'static str, Kind, Vec<FieldSpec>)> {
        vec![
            (
                "NAV1",
                Kind::Base,
                vec![
                    field("id", Selector::Dlid(0), Transform::string().not_null()),
                    field("name", Selector::Tag("N1"), Transform::string()),
                ],
            ),
            (
                "NAV2",
                Kind::Remark,
                vec![
                    field("id", Selector::Dlid(0), Transform::string().not_null()),
                    field("text", Selector::Tag("N2"), Transform::string()),
                ],
            ),
        ]
    }

    fn source(files: MemoryDistribution, config: ParserConfig) -> Source {
        Source::new(Family::Navaids, Arc::new(files), config, Store::new())
    }

    fn files(data: &str) -> MemoryDistribution {
        MemoryDistribution::new()
            .with_file("Layout_Data/nav_rf.txt", LAYOUT)
            .with_file("NAV.txt", data)
    }

    #[tokio::test]
    async fn dispatches_by_record_type() {
        let source = source(
            files("NAV1ABC NAME\r\n\r\nNAV2ABC RMK \nNAV9ABC     \nNAVXABC\n"),
            ParserConfig::default(),
        );
        let dispatch = source.dispatch(schema()).await.expect("schema should bind");
        let mut lines = source.lines("NAV.txt").await.expect("file should open");

        let line = lines.next_line().await.unwrap().expect("line 1");
        let (kind, mut row) = dispatch.decode(&line).unwrap().expect("NAV1 is read");
        assert_eq!(kind, Kind::Base);
        assert_eq!(row.take::<String>("name"), Ok("NAME".to_owned()));

        // the blank line is skipped
        let line = lines.next_line().await.unwrap().expect("line 3");
        assert_eq!(line.number, 3);
        let (kind, _) = dispatch.decode(&line).unwrap().expect("NAV2 is read");
        assert_eq!(kind, Kind::Remark);

        let line = lines.next_line().await.unwrap().expect("line 4");
        assert!(dispatch.decode(&line).unwrap().is_none());

        let line = lines.next_line().await.unwrap().expect("line 5");
        assert!(matches!(
            dispatch.decode(&line),
            Err(Error::UnknownRecordType { indicator, line: 5, .. }) if indicator == "NAVX"
        ));

        assert!(lines.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fails_on_missing_record_type() {
        let source = source(files(""), ParserConfig::default());
        let mut schema = schema();
        schema.push(("NAV3", Kind::Remark, Vec::new()));

        assert!(matches!(
            source.dispatch(schema).await,
            Err(Error::Bind {
                error: BindError::MissingRecordType { .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn fails_on_malformed_layout() {
        let distribution =
            MemoryDistribution::new().with_file("Layout_Data/nav_rf.txt", "no tables");
        let source = source(distribution, ParserConfig::default());

        assert!(matches!(
            source.layout().await,
            Err(Error::Layout {
                family: Family::Navaids,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn caches_layout() {
        let source = source(files(""), ParserConfig::default());
        let a = source.layout().await.expect("layout should load");
        let b = source.layout().await.expect("layout should load");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn reports_progress() {
        let bytes = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&bytes);
        let config = ParserConfig::default()
            .with_yield_every(1)
            .with_progress(move |_, n| counter.store(n, Ordering::SeqCst));

        let source = source(files("NAV1ABC NAME\nNAV2ABC RMK \n"), config);
        let mut lines = source.lines("NAV.txt").await.expect("file should open");
        let mut pacer = source.pacer();

        while let Some(line) = lines.next_line().await.unwrap() {
            let n = line.bytes;
            pacer.tick(n).await;
        }

        assert_eq!(pacer.rows(), 2);
        assert_eq!(bytes.load(Ordering::SeqCst), 26);
    }

    /// Serves files only through `open`.
    struct Unbuffered(MemoryDistribution);

    #[async_trait]
    impl Distribution for Unbuffered {
        async fn open(&self, path: &str) -> Result<FileReader, Error> {
            self.0.open(path).await
        }

        async fn exists(&self, path: &str) -> bool {
            self.0.exists(path).await
        }

        async fn read(&self, path: &str) -> Result<Vec<u8>, Error> {
            Err(Error::NoSuchFile(format!("{path} read as a whole")))
        }
    }

    fn csv_source(csv: &str, config: ParserConfig) -> Source {
        let distribution = Unbuffered(MemoryDistribution::new().with_file("NAV.csv", csv));
        Source::new(Family::Navaids, Arc::new(distribution), config, Store::new())
    }

    #[tokio::test]
    async fn streams_csv_rows() {
        let csv = "\u{feff}ID,NAME\r\n\
                   ABC,\"FIRST\r\nSECOND\"\r\n\
                   \r\n\
                   DEF,\"SAY \"\"HI\"\"\"\r\n";
        let bytes = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&bytes);
        let config = ParserConfig::default().with_progress(move |_, n| {
            counter.store(n, Ordering::SeqCst);
        });

        let source = csv_source(csv, config);
        let mut file = source.csv("NAV.csv").await.expect("file should open");
        let transformer = CsvTransformer::new(vec![
            nasr_format::column("id", "ID", Transform::string()).required(),
            nasr_format::column("name", "NAME", Transform::string()),
        ]);
        let mut pacer = source.pacer();
        let mut rows = Vec::new();

        each_csv_row(&mut file, &transformer, &mut pacer, &AbortOnError, |mut row| {
            rows.push((row.take::<String>("id")?, row.take::<String>("name")?));
            Ok(())
        })
        .await
        .expect("rows should decode");

        assert_eq!(
            rows,
            vec![
                ("ABC".to_owned(), "FIRST\r\nSECOND".to_owned()),
                ("DEF".to_owned(), "SAY \"HI\"".to_owned()),
            ]
        );
        // every byte after the header is counted
        let header = "\u{feff}ID,NAME\r\n".len() as u64;
        assert_eq!(bytes.load(Ordering::SeqCst), csv.len() as u64 - header);
    }

    #[tokio::test]
    async fn numbers_csv_rows_by_first_line() {
        let source = csv_source(
            "ID,NAME\nABC,\"TWO\nLINES\"\n\n,BLANK ID\n",
            ParserConfig::default(),
        );
        let mut file = source.csv("NAV.csv").await.expect("file should open");
        let transformer = CsvTransformer::new(vec![nasr_format::column(
            "id",
            "ID",
            Transform::string().not_null(),
        )]);
        let mut pacer = source.pacer();

        let result =
            each_csv_row(&mut file, &transformer, &mut pacer, &AbortOnError, |_| Ok(())).await;
        assert!(matches!(result, Err(Error::Decode { line: 5, .. })));
    }

    #[derive(Default)]
    struct Pair {
        base: Option<String>,
        remarks: Vec<String>,
    }

    impl Builder for Pair {
        type Output = (String, Vec<String>);

        fn build(self) -> Option<Self::Output> {
            Some((self.base?, self.remarks))
        }
    }

    #[test]
    fn accumulates_in_key_order() {
        let mut acc: Accumulator<String, Pair> = Accumulator::new();
        acc.entry("B".into()).base = Some("b".into());
        acc.entry("A".into()).remarks.push("1".into());
        acc.entry("A".into()).base = Some("a".into());
        acc.entry("A".into()).remarks.push("2".into());
        assert_eq!(acc.len(), 2);

        let records = acc
            .finish(Family::Navaids, &AbortOnError)
            .expect("all records have a base");
        assert_eq!(
            records,
            vec![
                ("a".to_owned(), vec!["1".to_owned(), "2".to_owned()]),
                ("b".to_owned(), Vec::new())
            ]
        );
    }

    #[test]
    fn reports_orphans() {
        let mut acc: Accumulator<String, Pair> = Accumulator::new();
        acc.entry("A".into()).remarks.push("1".into());
        acc.entry("B".into()).base = Some("b".into());

        assert!(matches!(
            acc.finish(Family::Navaids, &AbortOnError),
            Err(Error::Orphaned { key, .. }) if key == "A"
        ));

        let mut acc: Accumulator<String, Pair> = Accumulator::new();
        acc.entry("A".into()).remarks.push("1".into());
        acc.entry("B".into()).base = Some("b".into());

        let records = acc
            .finish(Family::Navaids, &SkipInvalid)
            .expect("orphans should be skipped");
        assert_eq!(records.len(), 1);
    }
}
