//! Facility table parsing
//!
//! The directory is a CSV table with a header row. Columns are located by
//! name (case-insensitive, surrounding whitespace ignored), so column order
//! in the source does not matter:
//!
//! | Column      | Aliases        | Required |
//! |-------------|----------------|----------|
//! | `name`      |                | yes      |
//! | `address`   |                | yes      |
//! | `phone`     |                | yes      |
//! | `latitude`  | `lat`          | yes      |
//! | `longitude` | `lon`, `lng`   | yes      |
//!
//! A missing column means the source changed its schema and the whole table
//! is `Malformed`. Problems inside a single row only drop that row.

use crate::error::{RegistryError, RegistryResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared_types::{Coordinate, CoordinateError, FacilityRecord};
use std::fmt;

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RowIssue {
    MissingLatitude,
    MissingLongitude,
    InvalidNumber { column: &'static str, value: String },
    OutOfRange(CoordinateError),
    Unreadable(String),
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLatitude => f.write_str("missing latitude"),
            Self::MissingLongitude => f.write_str("missing longitude"),
            Self::InvalidNumber { column, value } => {
                write!(f, "{column} is not a number: {value:?}")
            }
            Self::OutOfRange(e) => write!(f, "{e}"),
            Self::Unreadable(e) => write!(f, "unreadable row: {e}"),
        }
    }
}

/// A dropped row and the reason it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    /// 1-based line number in the source (the header is line 1).
    pub line: u64,
    pub issue: RowIssue,
}

/// Output of a successful parse: accepted records plus per-row warnings.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub records: Vec<FacilityRecord>,
    pub warnings: Vec<RowWarning>,
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    name: usize,
    address: usize,
    phone: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> RegistryResult<Self> {
        let find = |aliases: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim_start_matches('\u{feff}').trim();
                aliases.iter().any(|alias| h.eq_ignore_ascii_case(alias))
            })
        };

        let mut missing = Vec::new();
        let mut require = |column: &'static str, aliases: &[&str]| {
            let found = find(aliases);
            if found.is_none() {
                missing.push(column);
            }
            found.unwrap_or(usize::MAX)
        };

        let map = Self {
            name: require("name", &["name"]),
            address: require("address", &["address"]),
            phone: require("phone", &["phone"]),
            latitude: require("latitude", &["latitude", "lat"]),
            longitude: require("longitude", &["longitude", "lon", "lng"]),
        };

        if missing.is_empty() {
            Ok(map)
        } else {
            Err(RegistryError::malformed(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// Parse a raw CSV payload into facility records.
///
/// # Errors
///
/// - `Malformed` if the header lacks a required column or the payload cannot
///   be read as CSV at all
/// - `Empty` if no row survives validation
pub fn parse_facility_table(payload: &[u8]) -> RegistryResult<ParsedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(payload);

    let headers = reader
        .headers()
        .map_err(|e| RegistryError::malformed(format!("unreadable header: {e}")))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut table = ParsedTable::default();
    for (index, row) in reader.records().enumerate() {
        // Header is line 1, first data row line 2
        let fallback_line = index as u64 + 2;
        let record = match row {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(RegistryError::malformed(format!("read failed: {e}")))
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                table.warnings.push(RowWarning {
                    line,
                    issue: RowIssue::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);
        if is_blank(&record) {
            continue;
        }

        match parse_row(&record, columns) {
            Ok(facility) => table.records.push(facility),
            Err(issue) => table.warnings.push(RowWarning { line, issue }),
        }
    }

    if table.records.is_empty() {
        return Err(RegistryError::Empty {
            dropped: table.warnings.len(),
        });
    }
    Ok(table)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("")
}

fn parse_degrees(raw: &str, column: &'static str) -> Result<f64, RowIssue> {
    raw.parse::<f64>().map_err(|_| RowIssue::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}

fn parse_row(record: &StringRecord, columns: ColumnMap) -> Result<FacilityRecord, RowIssue> {
    let raw_lat = field(record, columns.latitude);
    if raw_lat.is_empty() {
        return Err(RowIssue::MissingLatitude);
    }
    let raw_lon = field(record, columns.longitude);
    if raw_lon.is_empty() {
        return Err(RowIssue::MissingLongitude);
    }

    let latitude = parse_degrees(raw_lat, "latitude")?;
    let longitude = parse_degrees(raw_lon, "longitude")?;
    let location = Coordinate::new(latitude, longitude).map_err(RowIssue::OutOfRange)?;

    Ok(FacilityRecord::new(field(record, columns.name), location)
        .with_address(field(record, columns.address))
        .with_phone(field(record, columns.phone)))
}
