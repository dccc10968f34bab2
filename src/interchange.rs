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

//! GPX import and export.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Time};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geodesy::Geodetic;
use crate::protocol::ROUTE_NAME_LEN;
use crate::records::ScaledDegrees;
use crate::route::{Route, RoutePoint, TurnSymbol};
use crate::track::{Track, TrackPoint};
use crate::waypoint::Waypoint;

#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Track(Track),
    Route(Route),
    Waypoint(Waypoint),
}

fn from_gpx_time(kind: &'static str, time: Option<Time>) -> Result<DateTime<Utc>> {
    let time: OffsetDateTime = time.ok_or_else(|| Error::malformed(kind, "missing time"))?.into();
    DateTime::from_timestamp(time.unix_timestamp(), 0)
        .ok_or_else(|| Error::malformed(kind, format!("time {} is out of range", time)))
}

fn to_gpx_time(kind: &'static str, time: DateTime<Utc>) -> Result<Time> {
    OffsetDateTime::from_unix_timestamp(time.timestamp())
        .map(Time::from)
        .map_err(|e| Error::malformed(kind, format!("time {}: {}", time, e)))
}

fn scaled(point: &gpx::Waypoint) -> Result<(ScaledDegrees, ScaledDegrees)> {
    let p = point.point();
    Ok((ScaledDegrees::latitude(p.y())?, ScaledDegrees::longitude(p.x())?))
}

fn gpx_point(latitude: f64, longitude: f64) -> gpx::Waypoint {
    gpx::Waypoint::new(Point::new(longitude, latitude))
}

fn track_from_gpx(track: &gpx::Track) -> Result<Track> {
    let mut points = Vec::new();
    for point in track.segments.iter().flat_map(|s| &s.points) {
        let p = point.point();
        let position = Geodetic {
            latitude: p.y(),
            longitude: p.x(),
            elevation: point.elevation.unwrap_or(0.0),
        };
        points.push(TrackPoint::from_position(from_gpx_time("track point", point.time.clone())?, position)?);
    }
    Ok(Track::new(points))
}

fn route_from_gpx(route: &gpx::Route) -> Result<Route> {
    let mut points = Vec::with_capacity(route.points.len());
    for (index, point) in route.points.iter().enumerate() {
        let (latitude, longitude) = scaled(point)?;
        let name = point
            .name
            .clone()
            .unwrap_or_else(|| index.to_string())
            .chars()
            .take(ROUTE_NAME_LEN)
            .collect();
        let symbol = point.symbol.as_deref().map_or(TurnSymbol::NONE, TurnSymbol::from_name);
        points.push(RoutePoint {
            name,
            symbol,
            latitude,
            longitude,
        });
    }
    Ok(Route::new(points))
}

fn waypoint_from_gpx(point: &gpx::Waypoint) -> Result<Waypoint> {
    let (latitude, longitude) = scaled(point)?;
    let symbol = point.symbol.as_deref().and_then(Waypoint::parse_symbol).unwrap_or(0);
    Ok(Waypoint::new(from_gpx_time("waypoint", point.time.clone())?, latitude, longitude, symbol))
}

/// Extracts everything the device can store, waypoints first, then routes,
/// then tracks. Other GPX content is ignored.
pub fn from_interchange(document: &Gpx) -> Result<Vec<Feature>> {
    let mut features = Vec::new();
    for point in &document.waypoints {
        features.push(Feature::Waypoint(waypoint_from_gpx(point)?));
    }
    for route in &document.routes {
        features.push(Feature::Route(route_from_gpx(route)?));
    }
    for track in &document.tracks {
        features.push(Feature::Track(track_from_gpx(track)?));
    }
    debug!("Read {} features from GPX", features.len());
    Ok(features)
}

pub fn to_interchange(features: &[Feature]) -> Result<Gpx> {
    let mut document = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(env!("CARGO_PKG_NAME").to_string()),
        ..Default::default()
    };

    for feature in features {
        match feature {
            Feature::Track(track) => {
                let mut segment = gpx::TrackSegment::default();
                for point in &track.points {
                    let position = point.position();
                    let mut out = gpx_point(position.latitude, position.longitude);
                    out.elevation = Some(position.elevation);
                    out.time = Some(to_gpx_time("track point", point.timestamp())?);
                    segment.points.push(out);
                }
                let mut out = gpx::Track::default();
                out.name = track.name();
                out.segments.push(segment);
                document.tracks.push(out);
            }
            Feature::Route(route) => {
                let mut out = gpx::Route::default();
                for point in &route.points {
                    let mut p = gpx_point(point.latitude.degrees(), point.longitude.degrees());
                    p.name = Some(point.name.clone());
                    p.symbol = Some(point.symbol.to_string());
                    out.points.push(p);
                }
                document.routes.push(out);
            }
            Feature::Waypoint(waypoint) => {
                let mut out = gpx_point(waypoint.latitude.degrees(), waypoint.longitude.degrees());
                out.name = Some(waypoint.name());
                out.time = Some(to_gpx_time("waypoint", waypoint.time)?);
                out.symbol = Some(waypoint.symbol_name());
                document.waypoints.push(out);
            }
        }
    }
    Ok(document)
}

pub fn read_gpx(path: impl AsRef<Path>) -> Result<Gpx> {
    let file = File::open(path.as_ref())?;
    Ok(gpx::read(BufReader::new(file))?)
}

pub fn write_gpx(path: impl AsRef<Path>, document: &Gpx) -> Result<()> {
    let mut bytes = Vec::new();
    gpx::write(document, &mut bytes)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}
