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

//! Recorded track points.
//!
//! The device keeps one stream of points for everything it ever recorded;
//! [`Track::split`] cuts it into tracks at long pauses.
//!
//! ```text
//! offset  size  field
//!      0     4  i32 seconds since 2014-01-14T14:36:50Z
//!      4     4  i32 ECEF x, metres
//!      8     4  i32 ECEF y, metres
//!     12     4  i32 ECEF z, metres
//!     16     4  reserved
//! ```

use chrono::{DateTime, Utc};
use crate::error::{Error, Result};
use crate::geodesy::{ecef_to_geodetic, geodetic_to_ecef, Ecef, Geodetic};
use crate::protocol::{TRACK_EPOCH, TRACK_POINT_LEN};
use crate::records::{date_prefix, expect_len, le_i32, split_records};

const KIND: &str = "track point";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackPoint {
    /// Seconds since [`TRACK_EPOCH`]
    pub time: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub reserved: [u8; 4],
}

fn metres(value: f64) -> Result<i32> {
    let rounded = value.round();
    if rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(Error::malformed(KIND, format!("coordinate {} m does not fit the record", rounded)));
    }
    Ok(rounded as i32)
}

impl TrackPoint {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len(KIND, bytes, TRACK_POINT_LEN)?;
        Ok(TrackPoint {
            time: le_i32(bytes, 0),
            x: le_i32(bytes, 4),
            y: le_i32(bytes, 8),
            z: le_i32(bytes, 12),
            reserved: [bytes[16], bytes[17], bytes[18], bytes[19]],
        })
    }

    pub fn encode(&self) -> [u8; TRACK_POINT_LEN] {
        let mut out = [0u8; TRACK_POINT_LEN];
        out[0..4].copy_from_slice(&self.time.to_le_bytes());
        out[4..8].copy_from_slice(&self.x.to_le_bytes());
        out[8..12].copy_from_slice(&self.y.to_le_bytes());
        out[12..16].copy_from_slice(&self.z.to_le_bytes());
        out[16..20].copy_from_slice(&self.reserved);
        out
    }

    /// Builds a point from a position, rounding to whole metres.
    pub fn from_position(timestamp: DateTime<Utc>, position: Geodetic) -> Result<Self> {
        let time = i32::try_from(timestamp.timestamp() - TRACK_EPOCH)
            .map_err(|_| Error::malformed(KIND, format!("{} is outside the device clock range", timestamp)))?;
        if !(-90.0..=90.0).contains(&position.latitude) || !(-180.0..=180.0).contains(&position.longitude) {
            return Err(Error::malformed(
                KIND,
                format!("position {:.5},{:.5} is out of range", position.latitude, position.longitude),
            ));
        }
        if !position.elevation.is_finite() {
            return Err(Error::malformed(KIND, "elevation is not a number"));
        }
        let ecef = geodetic_to_ecef(position);
        Ok(TrackPoint {
            time,
            x: metres(ecef.x)?,
            y: metres(ecef.y)?,
            z: metres(ecef.z)?,
            reserved: [0; 4],
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(TRACK_EPOCH + self.time as i64, 0).unwrap_or_default()
    }

    pub fn position(&self) -> Geodetic {
        ecef_to_geodetic(Ecef {
            x: self.x as f64,
            y: self.y as f64,
            z: self.z as f64,
        })
    }
}

impl std::fmt::Display for TrackPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.position();
        write!(
            f,
            "time={}, lon={:.5}, lat={:.5}, elevation={:.1}",
            self.timestamp().format("%Y-%m-%dT%H:%M:%SZ"),
            p.longitude,
            p.latitude,
            p.elevation
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub points: Vec<TrackPoint>,
}

impl Track {
    /// Pause in seconds that starts a new track
    pub const DEFAULT_GAP: i64 = 3600;

    pub fn new(points: Vec<TrackPoint>) -> Self {
        Track { points }
    }

    /// Decodes the device's point stream.
    pub fn decode(blob: &[u8]) -> Result<Self> {
        let points = split_records(KIND, blob, TRACK_POINT_LEN)?
            .into_iter()
            .map(TrackPoint::decode)
            .collect::<Result<Vec<_>>>()?;
        Ok(Track { points })
    }

    pub fn encode(&self) -> Vec<u8> {
        self.points.iter().flat_map(|p| p.encode()).collect()
    }

    /// Splits at every pause of at least `gap` seconds between consecutive
    /// points.
    pub fn split(&self, gap: i64) -> Vec<Track> {
        let mut tracks: Vec<Track> = Vec::new();
        let mut current: Vec<TrackPoint> = Vec::new();

        for point in &self.points {
            if let Some(last) = current.last() {
                if point.time as i64 - last.time as i64 >= gap {
                    tracks.push(Track::new(std::mem::take(&mut current)));
                }
            }
            current.push(*point);
        }
        if !current.is_empty() {
            tracks.push(Track::new(current));
        }
        tracks
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(TrackPoint::timestamp)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(TrackPoint::timestamp)
    }

    /// Tracks are named after their start time.
    pub fn name(&self) -> Option<String> {
        self.start().map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }

    pub fn date_prefix(&self) -> Option<String> {
        Some(date_prefix(self.start()?, self.end()?))
    }
}
