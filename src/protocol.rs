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

//! navi2move protocol constants and command table

/// Start of text - begins every bulk data block
pub const STX: u8 = 0x02;

/// End of transmission - ends a bulk transfer in either direction
pub const EOT: u8 = 0x04;

/// Acknowledge - block accepted, send the next one
pub const ACK: u8 = 0x06;

/// Negative acknowledge - block rejected, retransmit (also the device's upload ready signal)
pub const NAK: u8 = 0x15;

/// Continue - host is ready for the first download block
pub const CONTINUE: u8 = b'C';

/// Fill byte for unused space in a block
pub const FILL: u8 = 0xFF;

/// Payload bytes per bulk block
pub const BLOCK_LEN: usize = 1024;

/// STX + sequence + complement
pub const BLOCK_HEADER_LEN: usize = 3;

/// Sentence start marker
pub const SENTENCE_START: u8 = b'$';

/// Separates the sentence body from its checksum
pub const SENTENCE_CHECKSUM_MARK: u8 = b'*';

/// NMEA 0183 sentence length limit, including `$` and CRLF
pub const MAX_SENTENCE_LEN: usize = 82;

/// Command channel baud rate
pub const COMMAND_BAUD: u32 = 9600;

/// Bulk channel baud rate
pub const BULK_BAUD: u32 = 115_200;

/// Track point record size
pub const TRACK_POINT_LEN: usize = 20;

/// POI record size
pub const WAYPOINT_LEN: usize = 16;

/// Route point record size
pub const ROUTE_POINT_LEN: usize = 76;

/// Route image header size
pub const ROUTE_HEADER_LEN: usize = 20;

/// Characters per route point name
pub const ROUTE_NAME_LEN: usize = 32;

/// Glyph bitmap size (11x16 pixels)
pub const GLYPH_LEN: usize = 22;

/// Seconds since the Unix epoch at which track timestamps start counting
pub const TRACK_EPOCH: i64 = 1_389_710_210;

/// Direction of the bulk phase that follows a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bulk {
    None,
    Download,
    Upload,
}

/// Operations the device understands on its command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DownloadTracks,
    DownloadRoute,
    UploadRoute,
    DownloadWaypoints,
    UploadWaypoints,
    ReadDeviceConfig,
    WriteDeviceConfig,
    ReadRecordingConfig,
    WriteRecordingConfig,
}

/// Wire description of one command
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Sentence tag sent by the host
    pub tag: &'static str,
    /// Arguments that always follow the tag
    pub args: &'static [&'static str],
    /// Tag of the expected reply
    pub reply_tag: &'static str,
    /// Leading reply fields that must match
    pub reply_args: &'static [&'static str],
    /// The firmware sends a wrong checksum on some replies
    pub verify_reply: bool,
    pub bulk: Bulk,
}

const BULK_READY: &str = "POEM200";

impl Command {
    pub const fn spec(self) -> CommandSpec {
        match self {
            Command::DownloadTracks => CommandSpec {
                tag: "POEM12",
                args: &["14"],
                reply_tag: BULK_READY,
                reply_args: &["12"],
                verify_reply: true,
                bulk: Bulk::Download,
            },
            Command::DownloadRoute => CommandSpec {
                tag: "POEM12",
                args: &["12"],
                reply_tag: BULK_READY,
                reply_args: &["12"],
                verify_reply: true,
                bulk: Bulk::Download,
            },
            Command::UploadRoute => CommandSpec {
                tag: "POEM12",
                args: &["11"],
                reply_tag: BULK_READY,
                reply_args: &["12"],
                verify_reply: false,
                bulk: Bulk::Upload,
            },
            Command::DownloadWaypoints => CommandSpec {
                tag: "POEM12",
                args: &["2"],
                reply_tag: BULK_READY,
                reply_args: &["12"],
                verify_reply: true,
                bulk: Bulk::Download,
            },
            Command::UploadWaypoints => CommandSpec {
                tag: "POEM12",
                args: &["4"],
                reply_tag: BULK_READY,
                reply_args: &["12"],
                verify_reply: false,
                bulk: Bulk::Upload,
            },
            Command::ReadDeviceConfig => CommandSpec {
                tag: "POEM14",
                args: &["0"],
                reply_tag: "POEM103",
                reply_args: &[],
                verify_reply: true,
                bulk: Bulk::None,
            },
            Command::WriteDeviceConfig => CommandSpec {
                tag: "POEM14",
                args: &["1"],
                reply_tag: BULK_READY,
                reply_args: &["14"],
                verify_reply: true,
                bulk: Bulk::None,
            },
            Command::ReadRecordingConfig => CommandSpec {
                tag: "POEM06",
                args: &[],
                reply_tag: "POEM101",
                reply_args: &[],
                verify_reply: true,
                bulk: Bulk::None,
            },
            Command::WriteRecordingConfig => CommandSpec {
                tag: "POEM02",
                args: &[],
                reply_tag: "PMST200",
                reply_args: &["02"],
                verify_reply: true,
                bulk: Bulk::None,
            },
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let spec = self.spec();
        write!(f, "${}", spec.tag)?;
        for arg in spec.args {
            write!(f, ",{}", arg)?;
        }
        Ok(())
    }
}
