// Pixel values: the date and quantity of a single day's entry, plus the
// graph attributes accepted when a graph is created. Parsing happens here
// so that bad input is rejected before a request is ever built.

use crate::error::{Error, Result};
use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Format Pixela uses for dates, both in paths and in bodies.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// A calendar date rendered as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDate(NaiveDate);

impl PixelDate {
    pub fn today() -> Self {
        PixelDate(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for PixelDate {
    fn from(d: NaiveDate) -> Self {
        PixelDate(d)
    }
}

impl FromStr for PixelDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::validation(format!("date must be in YYYYMMDD format (e.g. 20251021), got '{}'", s));
        // chrono accepts short or signed years for %Y; Pixela does not.
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(PixelDate)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for PixelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A pixel quantity, kept as the decimal string Pixela expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(String);

impl Quantity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('-').unwrap_or(s);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if all_digits(int_part) && frac_part.map_or(true, all_digits) {
            Ok(Quantity(s.to_string()))
        } else {
            Err(Error::validation(format!("quantity must be a number (e.g. 5 or 1.5), got '{}'", s)))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric type of a graph's quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    #[default]
    Int,
    Float,
}

/// Display colour of a graph, named the way Pixela names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphColor {
    /// green
    Shibafu,
    /// red
    Momiji,
    /// blue
    #[default]
    Sora,
    /// yellow
    Ichou,
    /// purple
    Ajisai,
    /// black
    Kuro,
}
