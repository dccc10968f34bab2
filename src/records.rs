// Copyright (C) 2026 Brian Johnson
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Helpers shared by the fixed-layout record types.

use chrono::{DateTime, Utc};
use crate::error::{Error, Result};
use crate::protocol::FILL;

/// A coordinate in 1e-5 degrees, the device's fixed-point unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaledDegrees(pub i32);

impl ScaledDegrees {
    pub const SCALE: f64 = 1e5;

    /// Rounds half away from zero, so negative coordinates scale
    /// symmetrically to positive ones.
    fn from_degrees(kind: &'static str, degrees: f64, limit: f64) -> Result<Self> {
        if !degrees.is_finite() || degrees.abs() > limit {
            return Err(Error::malformed(kind, format!("{} degrees is out of range", degrees)));
        }
        Ok(ScaledDegrees((degrees * Self::SCALE).round() as i32))
    }

    pub fn latitude(degrees: f64) -> Result<Self> {
        Self::from_degrees("latitude", degrees, 90.0)
    }

    pub fn longitude(degrees: f64) -> Result<Self> {
        Self::from_degrees("longitude", degrees, 180.0)
    }

    pub fn degrees(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }
}

impl std::fmt::Display for ScaledDegrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}", self.degrees())
    }
}

/// Cuts a downloaded payload into `len`-byte records.
///
/// Records straddle block boundaries. The list ends at the first record
/// made only of fill bytes; a trailing partial record must be fill too.
pub fn split_records<'a>(kind: &'static str, blob: &'a [u8], len: usize) -> Result<Vec<&'a [u8]>> {
    let mut records = Vec::new();
    for record in blob.chunks(len) {
        if record.iter().all(|&b| b == FILL) {
            break;
        }
        if record.len() != len {
            return Err(Error::malformed(
                kind,
                format!("{} trailing bytes do not form a record", record.len()),
            ));
        }
        records.push(record);
    }
    Ok(records)
}

pub(crate) fn expect_len(kind: &'static str, bytes: &[u8], len: usize) -> Result<()> {
    if bytes.len() != len {
        return Err(Error::malformed(kind, format!("expected {} bytes, got {}", len, bytes.len())));
    }
    Ok(())
}

pub(crate) fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

pub(crate) fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

pub(crate) fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    le_u32(bytes, offset) as i32
}

/// `YYMMDD`, or `YYMMDD-YYMMDD` when the span crosses midnight (UTC).
pub fn date_prefix(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let first = start.format("%y%m%d").to_string();
    let last = end.format("%y%m%d").to_string();
    if first == last {
        first
    } else {
        format!("{}-{}", first, last)
    }
}

/// One line of space separated hex per record.
pub fn hex_dump<'a>(records: impl IntoIterator<Item = &'a [u8]>) -> String {
    let mut out = String::new();
    for record in records {
        let line: Vec<String> = record.iter().map(|b| format!("{:02x}", b)).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
