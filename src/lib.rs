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

//! Serial protocol engine for O-Synce navi2move GPS receivers.

// Wire level
pub mod protocol;
pub mod frame;
pub mod serial;
mod receiver;
mod sender;
pub mod session;

// Records
pub mod records;
pub mod geodesy;
pub mod track;
pub mod waypoint;
mod font;
pub mod charset;
pub mod route;
pub mod device_config;

pub mod interchange;
pub mod device;
pub mod error;
pub mod settings;

pub use charset::{GlyphMap, Strictness};
pub use device::{DownloadedRoute, NaviDevice};
pub use device_config::{DeviceConfig, GeneralConfig, RecordingConfig};
pub use error::{Error, Result};
pub use interchange::{from_interchange, read_gpx, to_interchange, write_gpx, Feature};
pub use route::{Route, RoutePoint, TurnSymbol};
pub use session::{CancelToken, Download, Session};
pub use settings::Settings;
pub use track::{Track, TrackPoint};
pub use waypoint::Waypoint;
