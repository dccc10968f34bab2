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

//! Points of interest.
//!
//! ```text
//! offset  size  field
//!      0     1  year - 1900
//!      1     5  month, day, hour, minute, second (UTC)
//!      6     1  symbol number
//!      7     1  flags, 0xA0 for points created on a computer
//!      8     4  i32 latitude, 1e-5 degrees
//!     12     4  i32 longitude, 1e-5 degrees
//! ```
//!
//! The device stores no name. A point is identified by the moment it was
//! created, which doubles as its name in GPX.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use crate::error::{Error, Result};
use crate::protocol::WAYPOINT_LEN;
use crate::records::{date_prefix, expect_len, le_i32, split_records, ScaledDegrees};

const KIND: &str = "waypoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub time: DateTime<Utc>,
    pub symbol: u8,
    pub flags: u8,
    pub latitude: ScaledDegrees,
    pub longitude: ScaledDegrees,
}

impl Waypoint {
    pub const DEFAULT_FLAGS: u8 = 0xA0;

    pub fn new(time: DateTime<Utc>, latitude: ScaledDegrees, longitude: ScaledDegrees, symbol: u8) -> Self {
        Waypoint {
            time,
            symbol,
            flags: Self::DEFAULT_FLAGS,
            latitude,
            longitude,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len(KIND, bytes, WAYPOINT_LEN)?;
        let time = NaiveDate::from_ymd_opt(1900 + bytes[0] as i32, bytes[1] as u32, bytes[2] as u32)
            .and_then(|d| d.and_hms_opt(bytes[3] as u32, bytes[4] as u32, bytes[5] as u32))
            .ok_or_else(|| Error::malformed(KIND, format!("invalid timestamp {:02X?}", &bytes[..6])))?
            .and_utc();

        Ok(Waypoint {
            time,
            symbol: bytes[6],
            flags: bytes[7],
            latitude: ScaledDegrees(le_i32(bytes, 8)),
            longitude: ScaledDegrees(le_i32(bytes, 12)),
        })
    }

    pub fn encode(&self) -> Result<[u8; WAYPOINT_LEN]> {
        let year = u8::try_from(self.time.year() - 1900)
            .map_err(|_| Error::malformed(KIND, format!("year {} cannot be stored", self.time.year())))?;

        let mut out = [0u8; WAYPOINT_LEN];
        out[0] = year;
        out[1] = self.time.month() as u8;
        out[2] = self.time.day() as u8;
        out[3] = self.time.hour() as u8;
        out[4] = self.time.minute() as u8;
        out[5] = self.time.second() as u8;
        out[6] = self.symbol;
        out[7] = self.flags;
        out[8..12].copy_from_slice(&self.latitude.0.to_le_bytes());
        out[12..16].copy_from_slice(&self.longitude.0.to_le_bytes());
        Ok(out)
    }

    pub fn name(&self) -> String {
        self.time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    pub fn symbol_name(&self) -> String {
        format!("POI{}", self.symbol)
    }

    /// `POI<n>` back to `n`.
    pub fn parse_symbol(name: &str) -> Option<u8> {
        name.strip_prefix("POI")?.parse().ok()
    }
}

pub fn decode_waypoints(blob: &[u8]) -> Result<Vec<Waypoint>> {
    split_records(KIND, blob, WAYPOINT_LEN)?
        .into_iter()
        .map(Waypoint::decode)
        .collect()
}

pub fn encode_waypoints(waypoints: &[Waypoint]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(waypoints.len() * WAYPOINT_LEN);
    for waypoint in waypoints {
        out.extend_from_slice(&waypoint.encode()?);
    }
    Ok(out)
}

/// Date span of a waypoint list, in list order.
pub fn waypoints_date_prefix(waypoints: &[Waypoint]) -> Option<String> {
    Some(date_prefix(waypoints.first()?.time, waypoints.last()?.time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FILL;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const SAMPLE: [u8; WAYPOINT_LEN] = [
        124, 3, 15, 9, 30, 5, 2, 0xA0,
        0x4A, 0xBA, 0x4D, 0x00, // 5_093_962
        0x7C, 0x9F, 0xFF, 0xFF, // -24_708
    ];

    #[test]
    fn test_decode_sample() {
        let wp = Waypoint::decode(&SAMPLE).unwrap();
        assert_eq!(wp.time, Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 5).unwrap());
        assert_eq!(wp.symbol, 2);
        assert_eq!(wp.flags, Waypoint::DEFAULT_FLAGS);
        assert_eq!(wp.latitude, ScaledDegrees(5_093_962));
        assert_eq!(wp.longitude, ScaledDegrees(-24_708));
        assert_eq!(wp.name(), "2024-03-15T09:30:05Z");
        assert_eq!(wp.symbol_name(), "POI2");
        assert_eq!(wp.encode().unwrap(), SAMPLE);
    }

    #[test]
    fn test_flags_preserved() {
        let mut bytes = SAMPLE;
        bytes[7] = 0x20;
        assert_eq!(Waypoint::decode(&bytes).unwrap().encode().unwrap(), bytes);
    }

    #[test]
    fn test_invalid_date() {
        let mut bytes = SAMPLE;
        bytes[1] = 13;
        assert!(matches!(Waypoint::decode(&bytes), Err(Error::RecordMalformed { .. })));
        assert!(Waypoint::decode(&SAMPLE[..15]).is_err());
    }

    #[test]
    fn test_year_out_of_range() {
        let wp = Waypoint::new(
            Utc.with_ymd_and_hms(2200, 1, 1, 0, 0, 0).unwrap(),
            ScaledDegrees(0),
            ScaledDegrees(0),
            0,
        );
        assert!(wp.encode().is_err());
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(Waypoint::parse_symbol("POI7"), Some(7));
        assert_eq!(Waypoint::parse_symbol("POIx"), None);
        assert_eq!(Waypoint::parse_symbol("Flag"), None);
    }

    #[test]
    fn test_list_round_trip() {
        let mut blob = SAMPLE.to_vec();
        blob.extend(SAMPLE);
        blob.resize(1024, FILL);

        let list = decode_waypoints(&blob).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(encode_waypoints(&list).unwrap(), blob[..32].to_vec());
        assert_eq!(waypoints_date_prefix(&list).unwrap(), "240315");
        assert!(waypoints_date_prefix(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_waypoint_byte_exact(
            year in any::<u8>(),
            month in 1u8..=12,
            day in 1u8..=28,
            hour in 0u8..24,
            minute in 0u8..60,
            second in 0u8..60,
            symbol in any::<u8>(),
            flags in any::<u8>(),
            lat in any::<i32>(),
            lon in any::<i32>()
        ) {
            let mut bytes = vec![year, month, day, hour, minute, second, symbol, flags];
            bytes.extend(lat.to_le_bytes());
            bytes.extend(lon.to_le_bytes());
            let wp = Waypoint::decode(&bytes).unwrap();
            prop_assert_eq!(wp.encode().unwrap().to_vec(), bytes);
        }
    }
}
