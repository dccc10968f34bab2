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

//! Error type shared by every layer of the protocol engine.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Checksum or sequence complement did not match.
    #[error("corrupt frame: {0}")]
    FrameCorrupt(String),

    /// Byte count differs from the length the frame declares.
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    FrameTruncated { expected: usize, actual: usize },

    /// Leading marker byte is not one the protocol knows.
    #[error("unrecognized frame starting with 0x{marker:02X}")]
    FrameUnrecognized { marker: u8 },

    #[error("payload of {size} bytes exceeds the {max} byte frame limit")]
    PayloadTooLarge { size: usize, max: usize },

    /// No reply within the link timeout.
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("device unresponsive after {attempts} attempts: {context}")]
    DeviceUnresponsive { attempts: u32, context: String },

    #[error("protocol error: {0}")]
    ProtocolError(String),

    #[error("sequence error: expected block {expected}, device sent {actual}")]
    SequenceError { expected: u8, actual: u8 },

    #[error("malformed {kind} record: {reason}")]
    RecordMalformed { kind: &'static str, reason: String },

    #[error("invalid value {value} for configuration field '{field}' (allowed: {allowed})")]
    InvalidConfigValue {
        field: &'static str,
        value: i64,
        allowed: String,
    },

    #[error("character {0:?} has no device code and no glyph")]
    UnsupportedCharacter(char),

    #[error("an upload in progress cannot be cancelled")]
    CancellationUnsupported,

    #[error("transfer cancelled")]
    Cancelled,

    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Frame-level failures the session retries before giving up.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::FrameCorrupt(_)
                | Error::FrameTruncated { .. }
                | Error::FrameUnrecognized { .. }
                | Error::Timeout(_)
        )
    }

    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Error::RecordMalformed {
            kind,
            reason: reason.into(),
        }
    }
}
