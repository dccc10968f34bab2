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

//! Wire frames.
//!
//! The command channel speaks NMEA-style sentences:
//!
//! ```text
//! $POEM12,14*hh\r\n      hh = XOR of every byte between '$' and '*'
//! ```
//!
//! The bulk channel moves fixed-size blocks:
//!
//! ```text
//! STX | seq | 0xFF-seq | 1024 payload bytes | checksum
//! ```
//!
//! Blocks from the device end in a big-endian CRC-16/XMODEM, blocks to the
//! device in a one byte additive sum. Both cover the payload only; the
//! sequence byte is protected by its complement.

use crc::{Crc, CRC_16_XMODEM};
use crate::error::{Error, Result};
use crate::protocol::*;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

// ============================================================================
// Sentences
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub tag: String,
    pub fields: Vec<String>,
}

pub fn nmea_checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc ^ b)
}

impl Sentence {
    pub fn new(tag: impl Into<String>, fields: Vec<String>) -> Self {
        Sentence { tag: tag.into(), fields }
    }

    /// The request sentence for `command`, followed by `extra` arguments.
    pub fn request(command: Command, extra: &[String]) -> Self {
        let spec = command.spec();
        let mut fields: Vec<String> = spec.args.iter().map(|a| a.to_string()).collect();
        fields.extend_from_slice(extra);
        Sentence::new(spec.tag, fields)
    }

    fn body(&self) -> String {
        let mut body = self.tag.clone();
        for field in &self.fields {
            body.push(',');
            body.push_str(field);
        }
        body
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let body = self.body();
        if let Some(bad) = body
            .bytes()
            .find(|b| !b.is_ascii() || b.is_ascii_control() || *b == SENTENCE_START || *b == SENTENCE_CHECKSUM_MARK)
        {
            return Err(Error::ProtocolError(format!(
                "byte 0x{:02X} cannot be carried in a sentence",
                bad
            )));
        }
        if self.tag.is_empty() || self.fields.iter().any(|f| f.contains(',')) {
            return Err(Error::ProtocolError(format!("malformed sentence '{}'", body)));
        }

        let mut out = Vec::with_capacity(body.len() + 6);
        out.push(SENTENCE_START);
        out.extend_from_slice(body.as_bytes());
        out.push(SENTENCE_CHECKSUM_MARK);
        out.extend_from_slice(format!("{:02X}", nmea_checksum(body.as_bytes())).as_bytes());
        out.extend_from_slice(b"\r\n");

        if out.len() > MAX_SENTENCE_LEN {
            return Err(Error::PayloadTooLarge {
                size: out.len(),
                max: MAX_SENTENCE_LEN,
            });
        }
        Ok(out)
    }

    pub fn decode(line: &[u8]) -> Result<Self> {
        Self::parse(line, true)
    }

    /// Decodes without checking the checksum, for replies the firmware is
    /// known to checksum incorrectly.
    pub fn decode_unverified(line: &[u8]) -> Result<Self> {
        Self::parse(line, false)
    }

    fn parse(line: &[u8], verify: bool) -> Result<Self> {
        let end = line
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |p| p + 1);
        let line = &line[..end];

        let Some(&marker) = line.first() else {
            return Err(Error::FrameTruncated { expected: 4, actual: 0 });
        };
        if marker != SENTENCE_START {
            return Err(Error::FrameUnrecognized { marker });
        }

        let star = match line.iter().rposition(|&b| b == SENTENCE_CHECKSUM_MARK) {
            Some(p) => p,
            None => {
                return Err(Error::FrameTruncated {
                    expected: line.len() + 3,
                    actual: line.len(),
                });
            }
        };
        if line.len() < star + 3 {
            return Err(Error::FrameTruncated {
                expected: star + 3,
                actual: line.len(),
            });
        }
        if line.len() > star + 3 {
            return Err(Error::FrameCorrupt(format!(
                "{} stray bytes after checksum",
                line.len() - star - 3
            )));
        }

        let body = &line[1..star];
        let body_str = std::str::from_utf8(body)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or_else(|| Error::FrameCorrupt("non-ASCII sentence body".into()))?;

        if verify {
            let digits = std::str::from_utf8(&line[star + 1..])
                .map_err(|_| Error::FrameCorrupt("non-ASCII checksum".into()))?;
            let received = u8::from_str_radix(digits, 16)
                .map_err(|_| Error::FrameCorrupt(format!("checksum '{}' is not hex", digits)))?;
            let expected = nmea_checksum(body);
            if received != expected {
                return Err(Error::FrameCorrupt(format!(
                    "sentence checksum 0x{:02X}, expected 0x{:02X}",
                    received, expected
                )));
            }
        }

        let mut parts = body_str.split(',');
        let tag = parts.next().unwrap_or_default().to_string();
        let fields = parts.map(str::to_string).collect();
        Ok(Sentence { tag, fields })
    }

    /// True if this is a `tag` sentence whose first fields equal `args`.
    pub fn matches(&self, tag: &str, args: &[&str]) -> bool {
        self.tag == tag
            && self.fields.len() >= args.len()
            && self.fields.iter().zip(args).all(|(f, a)| f == a)
    }
}

pub fn encode_sentence(tag: &str, fields: &[&str]) -> Result<Vec<u8>> {
    Sentence::new(tag, fields.iter().map(|f| f.to_string()).collect()).encode()
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.body())
    }
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockChecksum {
    /// Device to host
    Crc16Xmodem,
    /// Host to device
    Sum8,
}

impl BlockChecksum {
    pub const fn len(self) -> usize {
        match self {
            BlockChecksum::Crc16Xmodem => 2,
            BlockChecksum::Sum8 => 1,
        }
    }

    fn compute(self, payload: &[u8]) -> Vec<u8> {
        match self {
            BlockChecksum::Crc16Xmodem => XMODEM.checksum(payload).to_be_bytes().to_vec(),
            BlockChecksum::Sum8 => vec![payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))],
        }
    }

    /// Full on-wire length of a block carrying this checksum.
    pub const fn frame_len(self) -> usize {
        BLOCK_HEADER_LEN + BLOCK_LEN + self.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub sequence: u8,
    pub payload: Vec<u8>,
}

impl Block {
    /// Builds a block, padding short payloads with the fill byte.
    pub fn new(sequence: u8, payload: &[u8]) -> Result<Self> {
        if payload.len() > BLOCK_LEN {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: BLOCK_LEN,
            });
        }
        let mut padded = payload.to_vec();
        padded.resize(BLOCK_LEN, FILL);
        Ok(Block { sequence, payload: padded })
    }

    pub fn encode(&self, checksum: BlockChecksum) -> Vec<u8> {
        let mut out = Vec::with_capacity(checksum.frame_len());
        out.push(STX);
        out.push(self.sequence);
        out.push(0xFF - self.sequence);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&checksum.compute(&self.payload));
        out
    }

    pub fn decode(bytes: &[u8], checksum: BlockChecksum) -> Result<Self> {
        let expected = checksum.frame_len();
        let Some(&marker) = bytes.first() else {
            return Err(Error::FrameTruncated { expected, actual: 0 });
        };
        if marker != STX {
            return Err(Error::FrameUnrecognized { marker });
        }
        if bytes.len() != expected {
            return Err(Error::FrameTruncated {
                expected,
                actual: bytes.len(),
            });
        }

        let sequence = bytes[1];
        if bytes[2] != 0xFF - sequence {
            return Err(Error::FrameCorrupt(format!(
                "block {} carries complement 0x{:02X}",
                sequence, bytes[2]
            )));
        }

        let payload = &bytes[BLOCK_HEADER_LEN..BLOCK_HEADER_LEN + BLOCK_LEN];
        let trailer = &bytes[BLOCK_HEADER_LEN + BLOCK_LEN..];
        let computed = checksum.compute(payload);
        if trailer != computed.as_slice() {
            return Err(Error::FrameCorrupt(format!(
                "block {} checksum {:02X?}, expected {:02X?}",
                sequence, trailer, computed
            )));
        }

        Ok(Block {
            sequence,
            payload: payload.to_vec(),
        })
    }
}

/// Encodes `payload` as block `sequence` in one step.
pub fn encode_block(sequence: u8, payload: &[u8], checksum: BlockChecksum) -> Result<Vec<u8>> {
    Ok(Block::new(sequence, payload)?.encode(checksum))
}

// ============================================================================
// Tests
// ============================================================================
