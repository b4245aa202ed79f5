use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, trace};

use crate::{LoadError, Region, RestaurantRecord, Result};

/// Number of positional columns in the source file.
pub const COLUMN_COUNT: usize = 11;

const COL_REGION: usize = 0;
const COL_DISTRICT: usize = 1;
const COL_NAME: usize = 2;
const COL_CUISINE: usize = 3;
const COL_VEG_TYPE: usize = 4;
const COL_ADDRESS: usize = 5;
// Holds "<lat>, <lon>". Column 7 is a placeholder overwritten by the split.
const COL_COORDINATES: usize = 6;
const COL_INFO_URL: usize = 8;
const COL_PHONE: usize = 9;
const COL_REMARKS: usize = 10;

const COORDINATE_SEPARATOR: &str = ", ";
const PHONE_LENGTH: usize = 8;
const PHONE_GROUP_LENGTH: usize = 4;

/// Reads a CSV source, discards its header row and normalizes every data row.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<RestaurantRecord>> {
    // Column counts are checked by hand so that a short row surfaces as a
    // schema error rather than a generic CSV one.
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.len() != COLUMN_COUNT {
        return Err(LoadError::Schema {
            line: 1,
            expected: COLUMN_COUNT,
            found: headers.len(),
        });
    }
    debug!("load_csv: header: {:?}", headers);

    let rows = rdr
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    normalize(&rows)
}

/// Turns positional raw rows into typed records. The first malformed row
/// aborts the whole load.
pub fn normalize(rows: &[StringRecord]) -> Result<Vec<RestaurantRecord>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| normalize_row(row, line_of(row, idx)))
        .collect()
}

// Rows built in memory have no position; count as if a header preceded them.
fn line_of(row: &StringRecord, idx: usize) -> u64 {
    row.position()
        .map_or(idx as u64 + 2, |position| position.line())
}

fn normalize_row(row: &StringRecord, line: u64) -> Result<RestaurantRecord> {
    if row.len() != COLUMN_COUNT {
        return Err(LoadError::Schema {
            line,
            expected: COLUMN_COUNT,
            found: row.len(),
        });
    }
    let cell = |col: usize| row.get(col).unwrap_or_default();

    let raw_region = cell(COL_REGION).trim();
    let region = Region::from_str(raw_region).map_err(|_| LoadError::UnknownRegion {
        line,
        value: raw_region.to_string(),
    })?;

    let raw_coordinates = cell(COL_COORDINATES);
    let (latitude, longitude) =
        parse_coordinates(raw_coordinates).ok_or_else(|| LoadError::CoordinateParse {
            line,
            value: raw_coordinates.to_string(),
        })?;

    trace!("normalize: line {}: {} / {}", line, region, cell(COL_NAME));

    Ok(RestaurantRecord {
        region,
        district: cell(COL_DISTRICT).to_string(),
        name: cell(COL_NAME).to_string(),
        cuisine: cell(COL_CUISINE).to_string(),
        veg_type: cell(COL_VEG_TYPE).to_string(),
        address: cell(COL_ADDRESS).to_string(),
        latitude,
        longitude,
        info_url: cell(COL_INFO_URL).to_string(),
        phone: normalize_phone(cell(COL_PHONE)),
        remarks: normalize_remarks(cell(COL_REMARKS)),
    })
}

/// Splits `"<lat>, <lon>"` on the literal `", "` separator. Returns `None`
/// unless there are exactly two parts and both are finite numbers.
#[must_use]
pub fn parse_coordinates(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = raw.split(COORDINATE_SEPARATOR).collect();
    let [lat, lon] = parts.as_slice() else {
        return None;
    };
    let latitude = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let longitude = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((latitude, longitude))
}

/// Truncates the raw value to its first 8 characters and splits it after the
/// fourth. The digit count is not validated, so a short value yields a short
/// second group.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    if is_missing(raw) {
        return None;
    }
    let truncated: String = raw.chars().take(PHONE_LENGTH).collect();
    let split_at = truncated
        .char_indices()
        .nth(PHONE_GROUP_LENGTH)
        .map_or(truncated.len(), |(idx, _)| idx);
    let (head, tail) = truncated.split_at(split_at);
    Some(format!("{head} {tail}"))
}

fn normalize_remarks(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// An empty cell, or the textual NaN a float column stringifies to.
fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan")
}
