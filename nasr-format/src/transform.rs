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

//! Typed field transformers shared by the fixed-width and CSV decoders.

use chrono::NaiveDate;

use crate::error::Cause;
use crate::value::{DateComponents, Value};

/// A caller supplied conversion.
pub type GenericFn = fn(&str) -> Result<Value, String>;

/// The semantic type of a field.
#[derive(Clone, Debug)]
pub enum Kind {
    String,
    /// A signed base-10 integer.
    Integer,
    /// An unsigned base-10 integer without sign.
    Unsigned,
    Float,
    /// `true` if the value equals the token, `false` otherwise.
    Boolean { truthy: &'static str },
    /// A calendar date in a strict chrono format, e.g. `%m/%d/%Y`.
    Date { format: &'static str },
    /// A partial date in a pattern of `YYYY`, `MM` and `DD`, e.g. `MM/YYYY`.
    DateComponents { format: &'static str },
    /// A frequency formatted `MHz.kHz`, decoded to kHz.
    Frequency,
    /// A coordinate formatted `DD-MM-SS.SSSH`, decoded to arc-seconds.
    Geodesic,
    /// A coordinate formatted `SSSSSS.SSSSH` in arc-seconds.
    GeodesicSeconds,
    /// Equal-width chunks, each converted by the element transformer.
    FixedWidthArray {
        width: usize,
        element: Box<Transform>,
    },
    /// Chunks split on a literal delimiter, each converted by the element
    /// transformer.
    DelimitedArray {
        delimiter: &'static str,
        element: Box<Transform>,
    },
    Generic(GenericFn),
}

/// How blank and placeholder values are treated.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub enum Nullability {
    /// A blank value is an error.
    NotNull,
    /// A blank value is absent.
    #[default]
    Blank,
    /// A blank value is absent and runs of inner whitespace collapse into one
    /// space.
    Compact,
    /// A blank value or any of the placeholders is absent.
    Sentinel(&'static [&'static str]),
}

/// A field transformer: nullability check followed by a typed conversion.
#[derive(Clone, Debug)]
pub struct Transform {
    pub kind: Kind,
    pub nullability: Nullability,
    pub trim: bool,
}

macro_rules! constructors {
    ($($name:ident => $kind:expr),+ $(,)?) => {
        $(
            #[inline]
            pub fn $name() -> Self {
                Self::new($kind)
            }
        )+
    };
}

impl Transform {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            nullability: Nullability::default(),
            trim: true,
        }
    }

    constructors! {
        string => Kind::String,
        integer => Kind::Integer,
        unsigned => Kind::Unsigned,
        float => Kind::Float,
        frequency => Kind::Frequency,
        geodesic => Kind::Geodesic,
        geodesic_seconds => Kind::GeodesicSeconds,
    }

    pub fn boolean(truthy: &'static str) -> Self {
        Self::new(Kind::Boolean { truthy })
    }

    pub fn date(format: &'static str) -> Self {
        Self::new(Kind::Date { format })
    }

    pub fn date_components(format: &'static str) -> Self {
        Self::new(Kind::DateComponents { format })
    }

    pub fn fixed_width_array(width: usize, element: Transform) -> Self {
        Self::new(Kind::FixedWidthArray {
            width,
            element: Box::new(element),
        })
    }

    pub fn delimited_array(delimiter: &'static str, element: Transform) -> Self {
        Self::new(Kind::DelimitedArray {
            delimiter,
            element: Box::new(element),
        })
    }

    pub fn generic(f: GenericFn) -> Self {
        Self::new(Kind::Generic(f))
    }

    pub fn not_null(mut self) -> Self {
        self.nullability = Nullability::NotNull;
        self
    }

    pub fn compact(mut self) -> Self {
        self.nullability = Nullability::Compact;
        self
    }

    pub fn sentinel(mut self, placeholders: &'static [&'static str]) -> Self {
        self.nullability = Nullability::Sentinel(placeholders);
        self
    }

    /// Keeps surrounding whitespace of non-blank values.
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    /// Applies the transformer to the raw text of a field.
    ///
    /// # Errors
    ///
    /// Returns the cause if a non-null field is blank or if the conversion
    /// fails.
    pub fn apply(&self, raw: &str) -> Result<Value, Cause> {
        let trimmed = raw.trim();

        match &self.nullability {
            Nullability::NotNull if trimmed.is_empty() => return Err(Cause::Required),
            Nullability::Blank | Nullability::Compact if trimmed.is_empty() => {
                return Ok(Value::Absent)
            }
            Nullability::Sentinel(placeholders)
                if trimmed.is_empty() || placeholders.contains(&trimmed) =>
            {
                return Ok(Value::Absent)
            }
            _ => {}
        }

        // slots are positional, only the chunks are trimmed
        if let Kind::FixedWidthArray { .. } = self.kind {
            return self.convert(raw);
        }

        let text = if self.trim { trimmed } else { raw };

        if self.nullability == Nullability::Compact {
            let compacted = text.split_whitespace().collect::<Vec<_>>().join(" ");
            return self.convert(&compacted);
        }

        self.convert(text)
    }

    fn convert(&self, text: &str) -> Result<Value, Cause> {
        match &self.kind {
            Kind::String => Ok(Value::String(text.to_owned())),
            Kind::Integer => parse_integer(text).map(Value::Integer),
            Kind::Unsigned => parse_unsigned(text).map(Value::Unsigned),
            Kind::Float => text
                .trim()
                .parse()
                .map(Value::Float)
                .map_err(|_| Cause::NotAFloat),
            Kind::Boolean { truthy } => Ok(Value::Boolean(text.trim() == *truthy)),
            Kind::Date { format } => NaiveDate::parse_from_str(text.trim(), format)
                .map(Value::Date)
                .map_err(|_| Cause::InvalidDate { format: *format }),
            Kind::DateComponents { format } => {
                parse_date_components(text.trim(), *format).map(Value::DateComponents)
            }
            Kind::Frequency => parse_frequency(text.trim()).map(Value::Frequency),
            Kind::Geodesic => parse_geodesic(text.trim()).map(Value::ArcSeconds),
            Kind::GeodesicSeconds => parse_geodesic_seconds(text.trim()).map(Value::ArcSeconds),
            Kind::FixedWidthArray { width, element } => {
                let chars: Vec<char> = text.chars().collect();
                let chunks = chars
                    .chunks((*width).max(1))
                    .map(|chunk| chunk.iter().collect::<String>());
                convert_elements(chunks, element)
            }
            Kind::DelimitedArray { delimiter, element } => {
                convert_elements(text.split(*delimiter).map(str::to_owned), element)
            }
            Kind::Generic(f) => f(text).map_err(Cause::Other),
        }
    }
}

fn convert_elements<I>(chunks: I, element: &Transform) -> Result<Value, Cause>
where
    I: Iterator<Item = String>,
{
    let mut values = Vec::new();

    for chunk in chunks {
        if chunk.trim().is_empty() {
            continue;
        }

        match element.apply(&chunk)? {
            Value::Absent => {}
            value => values.push(value),
        }
    }

    Ok(Value::List(values))
}

fn parse_integer(text: &str) -> Result<i64, Cause> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Cause::NotAnInteger);
    }
    text.parse().map_err(|_| Cause::NotAnInteger)
}

fn parse_unsigned(text: &str) -> Result<u64, Cause> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Cause::NotAnInteger);
    }
    text.parse().map_err(|_| Cause::NotAnInteger)
}

/// Parses `MHz.kHz` into kHz.
///
/// The kHz part is zero-padded or truncated to three digits, so `118.1` is
/// 118100 kHz and `365` is 365000 kHz.
pub fn parse_frequency(text: &str) -> Result<u32, Cause> {
    let (mhz, khz) = text.split_once('.').unwrap_or((text, ""));

    if mhz.is_empty()
        || !mhz.bytes().all(|b| b.is_ascii_digit())
        || !khz.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Cause::InvalidFrequency);
    }

    let mhz: u32 = mhz.parse().map_err(|_| Cause::InvalidFrequency)?;
    let khz: u32 = format!("{:0<3.3}", khz)
        .parse()
        .map_err(|_| Cause::InvalidFrequency)?;

    mhz.checked_mul(1000)
        .and_then(|hz| hz.checked_add(khz))
        .ok_or(Cause::InvalidFrequency)
}

fn hemisphere(text: &str) -> Result<(&str, f64), Cause> {
    match text.chars().last() {
        Some('N') | Some('E') => Ok((&text[..text.len() - 1], 1.0)),
        Some('S') | Some('W') => Ok((&text[..text.len() - 1], -1.0)),
        _ => Err(Cause::MissingHemisphere),
    }
}

/// Parses `DD-MM-SS.SSSH` into signed arc-seconds.
pub fn parse_geodesic(text: &str) -> Result<f64, Cause> {
    let (body, sign) = hemisphere(text)?;
    let mut parts = body.split('-');

    let (Some(deg), Some(min), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Cause::InvalidGeodesic);
    };

    let deg = parse_unsigned(deg).map_err(|_| Cause::InvalidGeodesic)? as f64;
    let min = parse_unsigned(min).map_err(|_| Cause::InvalidGeodesic)? as f64;
    let sec: f64 = parse_seconds(sec)?;

    Ok(sign * (deg * 3600.0 + min * 60.0 + sec))
}

/// Parses `SSSSSS.SSSSH` into signed arc-seconds.
pub fn parse_geodesic_seconds(text: &str) -> Result<f64, Cause> {
    let (body, sign) = hemisphere(text)?;
    Ok(sign * parse_seconds(body)?)
}

fn parse_seconds(text: &str) -> Result<f64, Cause> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(Cause::InvalidGeodesic);
    }
    text.parse().map_err(|_| Cause::InvalidGeodesic)
}

/// Parses a partial date in a pattern of `YYYY`, `MM`, `DD` and literals.
fn parse_date_components(text: &str, format: &'static str) -> Result<DateComponents, Cause> {
    let error = Cause::InvalidDate { format };
    let mut year = None;
    let mut month = None;
    let mut day = None;
    let mut rest = text;
    let mut pattern = format;

    while !pattern.is_empty() {
        let (width, slot) = if pattern.starts_with("YYYY") {
            (4, &mut year)
        } else if pattern.starts_with("MM") {
            (2, &mut month)
        } else if pattern.starts_with("DD") {
            (2, &mut day)
        } else {
            let literal = &pattern[..1];
            rest = rest.strip_prefix(literal).ok_or(error.clone())?;
            pattern = &pattern[1..];
            continue;
        };

        let digits = rest.get(..width).ok_or(error.clone())?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(error);
        }
        *slot = Some(digits.parse::<u32>().map_err(|_| error.clone())?);
        rest = &rest[width..];
        pattern = &pattern[width..];
    }

    if !rest.is_empty() {
        return Err(error);
    }

    let year = year.ok_or(error.clone())? as i32;

    if month.is_some_and(|m| !(1..=12).contains(&m)) || day.is_some_and(|d| !(1..=31).contains(&d))
    {
        return Err(error);
    }

    Ok(DateComponents { year, month, day })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frequencies() {
        assert_eq!(parse_frequency("118.125"), Ok(118125));
        assert_eq!(parse_frequency("118.1"), Ok(118100));
        assert_eq!(parse_frequency("365"), Ok(365000));
        assert_eq!(parse_frequency("121.5"), Ok(121500));
        assert_eq!(parse_frequency("118.12567"), Ok(118125));
        assert_eq!(parse_frequency("ABC"), Err(Cause::InvalidFrequency));
        assert_eq!(parse_frequency("118.X"), Err(Cause::InvalidFrequency));
    }

    #[test]
    fn parses_geodesic() {
        assert_eq!(parse_geodesic("40-25-30.000N"), Ok(145530.0));
        assert_eq!(parse_geodesic("122-30-45.500W"), Ok(-441045.5));
        assert_eq!(parse_geodesic("40-25-30.000"), Err(Cause::MissingHemisphere));
        assert_eq!(parse_geodesic("40-25N"), Err(Cause::InvalidGeodesic));
        assert_eq!(parse_geodesic_seconds("145530.000N"), Ok(145530.0));
    }

    #[test]
    fn blank_not_null_is_required() {
        let t = Transform::string().not_null();
        assert_eq!(t.apply("    "), Err(Cause::Required));
    }

    #[test]
    fn blank_is_absent() {
        assert_eq!(Transform::integer().apply("   "), Ok(Value::Absent));
        assert_eq!(Transform::frequency().compact().apply(""), Ok(Value::Absent));
    }

    #[test]
    fn sentinel_is_absent() {
        let t = Transform::unsigned().sentinel(&["N/A", "0000"]);
        assert_eq!(t.apply(" N/A "), Ok(Value::Absent));
        assert_eq!(t.apply("0000"), Ok(Value::Absent));
        assert_eq!(t.apply(""), Ok(Value::Absent));
        assert_eq!(t.apply("0042"), Ok(Value::Unsigned(42)));
    }

    #[test]
    fn compacts_whitespace() {
        let t = Transform::string().compact();
        assert_eq!(
            t.apply("  RWY  04L   CLSD "),
            Ok(Value::String("RWY 04L CLSD".into()))
        );
    }

    #[test]
    fn keeps_untrimmed_text() {
        let t = Transform::string().untrimmed();
        assert_eq!(t.apply(" A B "), Ok(Value::String(" A B ".into())));
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(Transform::integer().apply("-0028"), Ok(Value::Integer(-28)));
        assert_eq!(Transform::unsigned().apply("-1"), Err(Cause::NotAnInteger));
        assert_eq!(Transform::float().apply(" 13.4"), Ok(Value::Float(13.4)));
        assert_eq!(Transform::float().apply("1x"), Err(Cause::NotAFloat));
    }

    #[test]
    fn parses_booleans() {
        let t = Transform::boolean("Y");
        assert_eq!(t.apply("Y"), Ok(Value::Boolean(true)));
        assert_eq!(t.apply("N"), Ok(Value::Boolean(false)));
        assert_eq!(t.apply("X"), Ok(Value::Boolean(false)));
    }

    #[test]
    fn parses_dates() {
        let t = Transform::date("%m/%d/%Y");
        assert_eq!(
            t.apply("04/18/2019"),
            Ok(Value::Date(NaiveDate::from_ymd_opt(2019, 4, 18).unwrap()))
        );
        assert_eq!(
            t.apply("2019/04/18"),
            Err(Cause::InvalidDate { format: "%m/%d/%Y" })
        );

        let t = Transform::date_components("MM/YYYY");
        assert_eq!(
            t.apply("04/2019"),
            Ok(Value::DateComponents(DateComponents {
                year: 2019,
                month: Some(4),
                day: None
            }))
        );
        assert!(t.apply("4/2019").is_err());
        assert!(t.apply("13/2019").is_err());

        let t = Transform::date_components("YYYY/MM");
        assert_eq!(
            t.apply("2019/04"),
            Ok(Value::DateComponents(DateComponents {
                year: 2019,
                month: Some(4),
                day: None
            }))
        );
    }

    #[test]
    fn splits_fixed_width_arrays() {
        let t = Transform::fixed_width_array(5, Transform::string().sentinel(&["NONE"]));
        assert_eq!(
            t.apply("100LL     NONE A    "),
            Ok(Value::List(vec![
                Value::String("100LL".into()),
                Value::String("A".into())
            ]))
        );

        let t = Transform::fixed_width_array(8, Transform::frequency());
        assert_eq!(
            t.apply("122.2   255.4"),
            Ok(Value::List(vec![Value::Frequency(122200), Value::Frequency(255400)]))
        );
    }

    #[test]
    fn keeps_slot_boundaries_of_justified_arrays() {
        let t = Transform::fixed_width_array(9, Transform::frequency());
        assert_eq!(
            t.apply("    122.2  118.125"),
            Ok(Value::List(vec![Value::Frequency(122200), Value::Frequency(118125)]))
        );

        let t = Transform::fixed_width_array(4, Transform::string());
        assert_eq!(
            t.apply("  AB CD "),
            Ok(Value::List(vec![
                Value::String("AB".into()),
                Value::String("CD".into())
            ]))
        );
    }

    #[test]
    fn splits_delimited_arrays() {
        let t = Transform::delimited_array("/", Transform::string());
        assert_eq!(
            t.apply("LOW/HIGH/"),
            Ok(Value::List(vec![
                Value::String("LOW".into()),
                Value::String("HIGH".into())
            ]))
        );
        assert_eq!(t.apply(""), Ok(Value::Absent));

        let t = Transform::delimited_array(",", Transform::unsigned());
        assert_eq!(t.apply("1,x"), Err(Cause::NotAnInteger));
    }

    #[test]
    fn applies_generic_transform() {
        fn parse_code(text: &str) -> Result<Value, String> {
            match text {
                "PU" => Ok(Value::Boolean(true)),
                "PR" => Ok(Value::Boolean(false)),
                other => Err(format!("unknown use {other}")),
            }
        }

        let t = Transform::generic(parse_code);
        assert_eq!(t.apply("PU"), Ok(Value::Boolean(true)));
        assert_eq!(t.apply("XX"), Err(Cause::Other("unknown use XX".into())));
    }
}
