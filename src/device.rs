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

use std::path::PathBuf;
use tracing::{info, warn};

use crate::charset::{GlyphMap, Strictness};
use crate::device_config::{DeviceConfig, GeneralConfig, RecordingConfig};
use crate::error::{Error, Result};
use crate::protocol::{Command, FILL, GLYPH_LEN, ROUTE_HEADER_LEN, ROUTE_POINT_LEN, TRACK_POINT_LEN, WAYPOINT_LEN};
use crate::records::hex_dump;
use crate::route::{Route, RouteImage};
use crate::serial::RealSerialPort;
use crate::session::{CancelToken, Download, Session};
use crate::settings::LinkSettings;
use crate::track::Track;
use crate::waypoint::{decode_waypoints, encode_waypoints, Waypoint};

/// A route read from the device.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedRoute {
    pub route: Route,
    /// Custom bitmaps the device stored with the route
    pub glyphs: GlyphMap,
    /// Name characters that could not be decoded
    pub substitutions: usize,
}

/// The operations a navi2move receiver supports.
pub struct NaviDevice {
    session: Session,
    raw_dump: Option<PathBuf>,
}

impl NaviDevice {
    pub fn new(session: Session) -> Self {
        NaviDevice { session, raw_dump: None }
    }

    /// Opens the port named in `link`.
    pub fn open(link: LinkSettings) -> Result<Self> {
        let name = link
            .port
            .clone()
            .ok_or_else(|| Error::Settings("no serial port configured".to_string()))?;
        let port = RealSerialPort::open(&name, link.baud_rate).map_err(std::io::Error::from)?;
        info!(port = %name, baud = link.baud_rate, "port opened");
        Ok(Self::new(Session::new(Box::new(port), link)))
    }

    /// Writes downloaded records as hex lines to `path`.
    pub fn set_raw_dump(&mut self, path: Option<PathBuf>) {
        self.raw_dump = path;
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.session.cancel_token()
    }

    fn dump<'a>(&self, records: impl IntoIterator<Item = &'a [u8]>) -> Result<()> {
        if let Some(path) = &self.raw_dump {
            info!(path = %path.display(), "writing raw data");
            std::fs::write(path, hex_dump(records))?;
        }
        Ok(())
    }

    /// Downloads a record list, keeping whole records of an interrupted
    /// transfer only.
    fn download_records(&mut self, command: Command, len: usize) -> Result<Download<Vec<u8>>> {
        let mut download = self.session.download(command)?;
        if !download.is_complete() {
            let whole = download.value.len() - download.value.len() % len;
            download.value.truncate(whole);
        }
        let used = download
            .value
            .chunks(len)
            .take_while(|r| !r.iter().all(|&b| b == FILL))
            .count();
        self.dump(download.value.chunks(len).take(used))?;
        Ok(download)
    }

    /// Downloads the recorded point stream, split into tracks at pauses of
    /// an hour or more.
    pub fn download_tracks(&mut self) -> Result<Download<Vec<Track>>> {
        let download = self.download_records(Command::DownloadTracks, TRACK_POINT_LEN)?;
        let tracks = download.try_map(|data| Ok(Track::decode(&data)?.split(Track::DEFAULT_GAP)))?;
        info!(tracks = tracks.value.len(), "tracks downloaded");
        Ok(tracks)
    }

    pub fn download_waypoints(&mut self) -> Result<Download<Vec<Waypoint>>> {
        let download = self.download_records(Command::DownloadWaypoints, WAYPOINT_LEN)?;
        let waypoints = download.try_map(|data| decode_waypoints(&data))?;
        info!(waypoints = waypoints.value.len(), "waypoints downloaded");
        Ok(waypoints)
    }

    /// Replaces the waypoints stored on the device.
    pub fn upload_waypoints(&mut self, waypoints: &[Waypoint]) -> Result<()> {
        let data = encode_waypoints(waypoints)?;
        self.session.upload(Command::UploadWaypoints, &data)
    }

    /// Downloads the route. A partial route cannot be decoded, so any
    /// interruption is an error.
    pub fn download_route(&mut self, strictness: Strictness) -> Result<DownloadedRoute> {
        let data = self.session.download(Command::DownloadRoute)?.into_result()?;
        if data.iter().take(ROUTE_HEADER_LEN).all(|&b| b == FILL) {
            info!("no route stored");
            self.dump(std::iter::empty::<&[u8]>())?;
            return Ok(DownloadedRoute {
                route: Route::default(),
                glyphs: GlyphMap::new(),
                substitutions: 0,
            });
        }

        let image = RouteImage::decode(&data)?;
        if self.raw_dump.is_some() {
            let table_offset = ROUTE_HEADER_LEN + image.points.len() * ROUTE_POINT_LEN;
            let bitmap_offset = table_offset + image.table.len() * 2;
            let end_offset = bitmap_offset + image.bitmaps.len() * GLYPH_LEN;
            let sections = std::iter::once(&data[..ROUTE_HEADER_LEN])
                .chain(data[ROUTE_HEADER_LEN..table_offset].chunks(ROUTE_POINT_LEN))
                .chain(std::iter::once(&data[table_offset..bitmap_offset]))
                .chain(data[bitmap_offset..end_offset].chunks(GLYPH_LEN));
            self.dump(sections)?;
        }

        let (route, substitutions) = image.to_route(strictness)?;
        if substitutions > 0 {
            warn!(substitutions, "route names contain unknown characters");
        }
        info!(points = route.points.len(), "route downloaded");
        Ok(DownloadedRoute {
            route,
            glyphs: image.harvest_glyphs(),
            substitutions,
        })
    }

    /// Replaces the route stored on the device. Every name character
    /// outside the stock font must have a bitmap in `glyphs`.
    pub fn upload_route(&mut self, route: &Route, glyphs: &GlyphMap) -> Result<()> {
        let image = route.to_image(glyphs)?;
        let custom = image.custom_glyphs();
        if !custom.is_empty() {
            info!(glyphs = ?custom, "sending custom glyphs");
        }
        self.session.upload(Command::UploadRoute, &image.encode()?)
    }

    pub fn read_config(&mut self) -> Result<DeviceConfig> {
        let reply = self.session.execute(Command::ReadDeviceConfig, &[])?;
        let general = GeneralConfig::from_reply(&reply)?;
        let reply = self.session.execute(Command::ReadRecordingConfig, &[])?;
        let (recording, disk_usage) = RecordingConfig::from_reply(&reply)?;
        Ok(DeviceConfig {
            general,
            recording,
            disk_usage,
        })
    }

    pub fn write_general_config(&mut self, config: &GeneralConfig) -> Result<()> {
        let args = config.to_args()?;
        self.session.execute(Command::WriteDeviceConfig, &args)?;
        Ok(())
    }

    pub fn write_recording_config(&mut self, config: &RecordingConfig) -> Result<()> {
        let args = config.to_args()?;
        self.session.execute(Command::WriteRecordingConfig, &args)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_block, nmea_checksum, BlockChecksum, Sentence};
    use crate::protocol::{ACK, BLOCK_HEADER_LEN, BLOCK_LEN, CONTINUE, EOT, NAK};
    use crate::records::ScaledDegrees;
    use crate::route::{RoutePoint, TurnSymbol};
    use crate::serial::{bytes, MockSerialPort};
    use crate::settings::Settings;
    use crate::track::TrackPoint;
    use chrono::{TimeZone, Utc};

    fn reply(body: &str) -> Vec<Option<u8>> {
        bytes(format!("${}*{:02X}\r\n", body, nmea_checksum(body.as_bytes())).as_bytes())
    }

    fn device(port: MockSerialPort, link: LinkSettings) -> NaviDevice {
        NaviDevice::new(Session::new(Box::new(port), link))
    }

    /// Device side of a download: ready reply, blocks, EOT.
    fn download_script(data: &[u8]) -> Vec<Option<u8>> {
        let mut script = reply("POEM200,12");
        for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
            let block = encode_block((i + 1) as u8, chunk, BlockChecksum::Crc16Xmodem).unwrap();
            script.extend(bytes(&block));
        }
        script.push(Some(EOT));
        script
    }

    fn waypoint(second: u32, symbol: u8) -> Waypoint {
        Waypoint::new(
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, second).unwrap(),
            ScaledDegrees(5_093_962),
            ScaledDegrees(695_830),
            symbol,
        )
    }

    #[test]
    fn test_download_tracks_splits_stream() {
        let points: Vec<TrackPoint> = [0, 5, 10, 4000, 4005]
            .iter()
            .map(|&time| TrackPoint {
                time,
                x: 3_997_480,
                y: 487_876,
                z: 4_929_479,
                reserved: [0; 4],
            })
            .collect();
        let port = MockSerialPort::scripted(download_script(&Track::new(points).encode()));
        let writes = port.write_log();

        let mut device = device(port, Settings::for_tests().link);
        let download = device.download_tracks().unwrap();
        assert!(download.is_complete());
        let lens: Vec<usize> = download.value.iter().map(|t| t.points.len()).collect();
        assert_eq!(lens, vec![3, 2]);

        let written = writes.lock().unwrap().clone();
        let request = Sentence::request(Command::DownloadTracks, &[]).encode().unwrap();
        assert_eq!(written[..request.len()], request[..]);
        assert_eq!(written[request.len()..], [CONTINUE, ACK]);
    }

    #[test]
    fn test_best_effort_tracks_keep_whole_records() {
        // 60 points fill one block and spill into a second that never arrives
        let points: Vec<TrackPoint> = (0..60)
            .map(|time| TrackPoint {
                time,
                x: 1,
                y: 2,
                z: 3,
                reserved: [0; 4],
            })
            .collect();
        let data = Track::new(points).encode();
        let mut script = reply("POEM200,12");
        script.extend(bytes(&encode_block(1, &data[..BLOCK_LEN], BlockChecksum::Crc16Xmodem).unwrap()));
        script.extend(vec![None; 4]);

        let mut link = Settings::for_tests().link;
        link.best_effort_downloads = true;
        let mut device = device(MockSerialPort::scripted(script), link);

        let download = device.download_tracks().unwrap();
        assert!(matches!(download.interruption, Some(Error::DeviceUnresponsive { .. })));
        assert_eq!(download.value.len(), 1);
        assert_eq!(download.value[0].points.len(), BLOCK_LEN / TRACK_POINT_LEN);
    }

    #[test]
    fn test_download_waypoints_with_dump() {
        let data = encode_waypoints(&[waypoint(0, 1), waypoint(1, 2)]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("pois.txt");

        let mut device = device(MockSerialPort::scripted(download_script(&data)), Settings::for_tests().link);
        device.set_raw_dump(Some(dump.clone()));
        let download = device.download_waypoints().unwrap();
        assert_eq!(download.value, vec![waypoint(0, 1), waypoint(1, 2)]);

        let text = std::fs::read_to_string(&dump).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("7c 03 0f 09 1e 00 01 a0"));
    }

    #[test]
    fn test_upload_waypoints() {
        let list = [waypoint(0, 1)];
        let mut script = reply("POEM200,12");
        script.extend([Some(NAK), Some(ACK), Some(ACK)]);
        let port = MockSerialPort::scripted(script);
        let writes = port.write_log();

        let mut device = device(port, Settings::for_tests().link);
        device.upload_waypoints(&list).unwrap();

        let written = writes.lock().unwrap().clone();
        let block = encode_block(1, &encode_waypoints(&list).unwrap(), BlockChecksum::Sum8).unwrap();
        let request = Sentence::request(Command::UploadWaypoints, &[]).encode().unwrap();
        let mut expected = request;
        expected.extend(block);
        expected.push(EOT);
        assert_eq!(written, expected);
    }

    #[test]
    fn test_route_upload_then_download() {
        let route = Route::new(vec![
            RoutePoint {
                name: "Müller".to_string(),
                symbol: TurnSymbol(4),
                latitude: ScaledDegrees(5_094_130),
                longitude: ScaledDegrees(695_830),
            },
            RoutePoint {
                name: "Ende".to_string(),
                symbol: TurnSymbol::NONE,
                latitude: ScaledDegrees(5_094_200),
                longitude: ScaledDegrees(696_000),
            },
        ]);
        let glyphs = GlyphMap::builtin();

        let mut script = reply("POEM200,12");
        script.extend([Some(NAK), Some(ACK), Some(ACK)]);
        let port = MockSerialPort::scripted(script);
        let writes = port.write_log();
        device(port, Settings::for_tests().link).upload_route(&route, &glyphs).unwrap();

        // recover the image from the single uploaded block
        let written = writes.lock().unwrap().clone();
        let request_len = Sentence::request(Command::UploadRoute, &[]).encode().unwrap().len();
        let payload = &written[request_len + BLOCK_HEADER_LEN..request_len + BLOCK_HEADER_LEN + BLOCK_LEN];

        let port = MockSerialPort::scripted(download_script(payload));
        let downloaded = device(port, Settings::for_tests().link)
            .download_route(Strictness::Strict)
            .unwrap();
        assert_eq!(downloaded.route, route);
        assert_eq!(downloaded.substitutions, 0);
        assert_eq!(downloaded.glyphs.len(), 1);
        assert_eq!(downloaded.glyphs.get('ü'), glyphs.get('ü'));
    }

    #[test]
    fn test_upload_route_unsupported_character_sends_nothing() {
        let route = Route::new(vec![RoutePoint {
            name: "Łeba".to_string(),
            symbol: TurnSymbol::NONE,
            latitude: ScaledDegrees(0),
            longitude: ScaledDegrees(0),
        }]);
        let mut device = device(MockSerialPort::new(Vec::new(), Vec::new()), Settings::for_tests().link);
        assert!(matches!(
            device.upload_route(&route, &GlyphMap::builtin()),
            Err(Error::UnsupportedCharacter('Ł'))
        ));
    }

    #[test]
    fn test_empty_route() {
        let port = MockSerialPort::scripted(download_script(&[FILL; 64]));
        let downloaded = device(port, Settings::for_tests().link)
            .download_route(Strictness::Lenient)
            .unwrap();
        assert!(downloaded.route.points.is_empty());
    }

    #[test]
    fn test_read_and_write_config() {
        let mut script = reply("POEM103,2,20,30,10,1,1,0");
        script.extend(reply("POEM101,5,0,10,0,2,0,0,42.00"));
        script.extend(reply("POEM200,14"));
        let port = MockSerialPort::scripted(script);
        let writes = port.write_log();

        let mut device = device(port, Settings::for_tests().link);
        let mut config = device.read_config().unwrap();
        assert_eq!(config.general.language, 2);
        assert_eq!(config.recording.distance_interval, 10);
        assert!((config.disk_usage - 42.0).abs() < 1e-9);

        config.general.units = 1;
        device.write_general_config(&config.general).unwrap();
        let written = String::from_utf8(writes.lock().unwrap().clone()).unwrap();
        assert!(written.contains("$POEM14,1,2,20,30,10,1,1,1*"));
    }

    #[test]
    fn test_invalid_config_is_never_sent() {
        let mut device = device(MockSerialPort::new(Vec::new(), Vec::new()), Settings::for_tests().link);
        let (mut recording, _) = RecordingConfig::from_reply(&Sentence::new(
            "POEM101",
            ["5", "0", "10", "0", "2", "0", "0", "1.0"].iter().map(|s| s.to_string()).collect(),
        ))
        .unwrap();
        recording.speed_interval = 100_000;
        assert!(matches!(
            device.write_recording_config(&recording),
            Err(Error::InvalidConfigValue { field: "speed interval", .. })
        ));
    }
}
