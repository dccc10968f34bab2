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

//! Bulk download state machine.
//!
//! ```text
//! host                      device
//!  'C'   ------------------->
//!        <-------------------  STX 01 FE <1024> crc
//!  ACK   ------------------->
//!        <-------------------  STX 02 FD <1024> crc
//!  NAK   ------------------->  (bad block)
//!        <-------------------  STX 02 FD <1024> crc
//!  ACK   ------------------->
//!        <-------------------  EOT
//! ```

use std::marker::PhantomData;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::frame::{Block, BlockChecksum};
use crate::protocol::*;
use crate::serial::SerialPort;
use crate::session::{CancelToken, Transfer};
use crate::settings::LinkSettings;

const CHECKSUM: BlockChecksum = BlockChecksum::Crc16Xmodem;

// ============================================================================
// States
// ============================================================================

pub struct Start;
pub struct AwaitBlock;
pub struct ReceiveBlock;

// ============================================================================
// FSM Structure
// ============================================================================

pub struct ReceiverFsm<'a, State> {
    state: PhantomData<State>,
    port: &'a mut dyn SerialPort,
    link: &'a LinkSettings,
    cancel: &'a CancelToken,
    transfer: &'a mut Transfer,
}

// ============================================================================
// Trait
// ============================================================================

pub trait ReceiverState<'a>: Send {
    /// Advances one state; `None` once the device has sent EOT.
    fn step(self: Box<Self>) -> Result<Option<Box<dyn ReceiverState<'a> + 'a>>>;
}

type Next<'a> = Result<Option<Box<dyn ReceiverState<'a> + 'a>>>;

// ============================================================================
// Helper to transition states
// ============================================================================

impl<'a, S> ReceiverFsm<'a, S> {
    fn transition<T>(self) -> Box<ReceiverFsm<'a, T>> {
        Box::new(ReceiverFsm {
            state: PhantomData,
            port: self.port,
            link: self.link,
            cancel: self.cancel,
            transfer: self.transfer,
        })
    }

    fn io_error(&self, e: std::io::Error) -> Error {
        let type_name = std::any::type_name::<S>();
        let state_name = type_name.split("::").last().unwrap_or(type_name);
        Error::IOError(std::io::Error::new(
            e.kind(),
            format!("{} (in state: {})", e, state_name)
        ))
    }

    fn send(&mut self, byte: u8) -> Result<()> {
        self.port.write_all(&[byte]).map_err(|e| self.io_error(e))
    }

    /// NAKs the current block, or gives up once the retry budget is spent.
    fn reject(mut self, error: Error) -> Next<'a> {
        self.transfer.retries += 1;
        if self.transfer.retries > self.link.max_retries {
            return Err(Error::DeviceUnresponsive {
                attempts: self.transfer.retries,
                context: format!("block {} of {}: {}", self.transfer.sequence, self.transfer.command, error),
            });
        }

        warn!(
            block = self.transfer.sequence,
            retry = self.transfer.retries,
            error = %error,
            "rejecting block"
        );
        self.send(NAK)?;
        Ok(Some(self.transition::<AwaitBlock>()))
    }
}

// ============================================================================
// State Implementations
// ============================================================================

impl<'a> ReceiverState<'a> for ReceiverFsm<'a, Start> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        fsm.send(CONTINUE)?;
        debug!("Sent: 'C'");

        Ok(Some(fsm.transition::<AwaitBlock>()))
    }
}

impl<'a> ReceiverState<'a> for ReceiverFsm<'a, AwaitBlock> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        if fsm.cancel.is_cancelled() {
            debug!(blocks = fsm.transfer.blocks, "download cancelled");
            return Err(Error::Cancelled);
        }

        match fsm.port.read_byte(fsm.link.block_timeout()) {
            Ok(Some(STX)) => Ok(Some(fsm.transition::<ReceiveBlock>())),
            Ok(Some(EOT)) => {
                debug!(blocks = fsm.transfer.blocks, "Received: EOT");
                Ok(None)
            }
            Ok(Some(marker)) => {
                // Skip the rest of whatever this was before asking again.
                let skipped = fsm
                    .port
                    .read_up_to(CHECKSUM.frame_len(), fsm.link.command_timeout())
                    .map_err(|e| fsm.io_error(e))?;
                debug!(marker, skipped = skipped.len(), "discarding unrecognized data");
                fsm.reject(Error::FrameUnrecognized { marker })
            }
            Ok(None) => fsm.reject(Error::Timeout("data block")),
            Err(e) => Err(fsm.io_error(e)),
        }
    }
}

impl<'a> ReceiverState<'a> for ReceiverFsm<'a, ReceiveBlock> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        let rest = fsm
            .port
            .read_up_to(CHECKSUM.frame_len() - 1, fsm.link.block_timeout())
            .map_err(|e| fsm.io_error(e))?;
        let mut frame = Vec::with_capacity(CHECKSUM.frame_len());
        frame.push(STX);
        frame.extend_from_slice(&rest);

        let block = match Block::decode(&frame, CHECKSUM) {
            Ok(block) => block,
            Err(e) if e.is_transient() => return fsm.reject(e),
            Err(e) => return Err(e),
        };

        let expected = fsm.transfer.sequence;
        if block.sequence == expected {
            fsm.transfer.data.extend_from_slice(&block.payload);
            fsm.transfer.advance();
            fsm.send(ACK)?;
            debug!(block = block.sequence, "Received block, sent ACK");
        } else if fsm.transfer.blocks > 0 && block.sequence == expected.wrapping_sub(1) {
            // Our ACK got lost and the device sent the block again.
            fsm.send(ACK)?;
            debug!(block = block.sequence, "Received duplicate block, sent ACK");
        } else {
            return Err(Error::SequenceError {
                expected,
                actual: block.sequence,
            });
        }

        Ok(Some(fsm.transition::<AwaitBlock>()))
    }
}

// ============================================================================
// Constructor & Runner
// ============================================================================

impl<'a> ReceiverFsm<'a, Start> {
    pub fn new(
        port: &'a mut dyn SerialPort,
        link: &'a LinkSettings,
        cancel: &'a CancelToken,
        transfer: &'a mut Transfer,
    ) -> Box<dyn ReceiverState<'a> + 'a> {
        Box::new(ReceiverFsm {
            state: PhantomData::<Start>,
            port,
            link,
            cancel,
            transfer,
        })
    }

    /// Drives a download until EOT, collecting payloads into `transfer`.
    pub fn run(
        port: &'a mut dyn SerialPort,
        link: &'a LinkSettings,
        cancel: &'a CancelToken,
        transfer: &'a mut Transfer,
    ) -> Result<()> {
        let mut fsm = Self::new(port, link, cancel, transfer);
        while let Some(next) = fsm.step()? {
            fsm = next;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::encode_block;
    use crate::serial::{bytes, MockSerialPort};
    use crate::settings::Settings;

    fn device_block(sequence: u8, payload: &[u8]) -> Vec<Option<u8>> {
        bytes(&encode_block(sequence, payload, CHECKSUM).unwrap())
    }

    fn device_stream(data: &[u8]) -> Vec<Option<u8>> {
        let mut script = Vec::new();
        for (i, chunk) in data.chunks(BLOCK_LEN).enumerate() {
            script.extend(device_block(i as u8 + 1, chunk));
        }
        script
    }

    fn receive(port: &mut MockSerialPort) -> (Result<()>, Transfer) {
        let link = Settings::for_tests().link;
        let cancel = CancelToken::new();
        let mut transfer = Transfer::new(Command::DownloadTracks);
        let result = ReceiverFsm::run(port, &link, &cancel, &mut transfer);
        (result, transfer)
    }

    #[test]
    fn test_receiver_500_track_points() {
        let records: Vec<u8> = (0..500u32)
            .flat_map(|i| {
                let mut record = [0u8; TRACK_POINT_LEN];
                record[..4].copy_from_slice(&i.to_le_bytes());
                record
            })
            .collect();
        assert_eq!(records.len(), 10_000);

        let mut responses = device_stream(&records);
        responses.push(Some(EOT));

        let mut expected_writes = vec![CONTINUE];
        expected_writes.extend_from_slice(&[ACK; 10]);

        let mut port = MockSerialPort::new(responses, expected_writes);
        let (result, transfer) = receive(&mut port);
        result.unwrap();

        assert_eq!(transfer.blocks, 10);
        assert_eq!(transfer.sequence, 11);
        assert_eq!(&transfer.data[..10_000], &records[..]);
        assert!(transfer.data[10_000..].iter().all(|&b| b == FILL));

        for (i, record) in transfer.data[..10_000].chunks(TRACK_POINT_LEN).enumerate() {
            assert_eq!(u32::from_le_bytes(record[..4].try_into().unwrap()), i as u32);
        }
    }

    #[test]
    fn test_receiver_bad_checksum_retry() {
        let payload = [0x5Au8; BLOCK_LEN];
        let mut corrupt = encode_block(1, &payload, CHECKSUM).unwrap();
        corrupt[100] ^= 0x01;

        let mut responses = bytes(&corrupt);
        responses.extend(device_block(1, &payload));
        responses.push(Some(EOT));

        let mut port = MockSerialPort::new(responses, vec![CONTINUE, NAK, ACK]);
        let (result, transfer) = receive(&mut port);
        result.unwrap();
        assert_eq!(transfer.blocks, 1);
        assert_eq!(transfer.data, payload);
    }

    #[test]
    fn test_receiver_truncated_block_retry() {
        let payload = [0x33u8; BLOCK_LEN];
        let full = encode_block(1, &payload, CHECKSUM).unwrap();

        let mut responses = bytes(&full[..500]);
        responses.push(None);
        responses.extend(bytes(&full));
        responses.push(Some(EOT));

        let mut port = MockSerialPort::new(responses, vec![CONTINUE, NAK, ACK]);
        let (result, transfer) = receive(&mut port);
        result.unwrap();
        assert_eq!(transfer.data, payload);
    }

    #[test]
    fn test_receiver_duplicate_block() {
        let mut responses = device_block(1, b"first");
        responses.extend(device_block(1, b"first"));
        responses.extend(device_block(2, b"second"));
        responses.push(Some(EOT));

        let mut port = MockSerialPort::new(responses, vec![CONTINUE, ACK, ACK, ACK]);
        let (result, transfer) = receive(&mut port);
        result.unwrap();
        assert_eq!(transfer.blocks, 2);
        assert_eq!(transfer.data.len(), 2 * BLOCK_LEN);
        assert_eq!(&transfer.data[BLOCK_LEN..BLOCK_LEN + 6], b"second");
    }

    #[test]
    fn test_receiver_sequence_error() {
        let mut responses = device_block(1, b"one");
        responses.extend(device_block(3, b"three"));

        let mut port = MockSerialPort::new(responses, vec![CONTINUE, ACK]);
        let (result, transfer) = receive(&mut port);
        assert!(matches!(result, Err(Error::SequenceError { expected: 2, actual: 3 })));
        assert_eq!(transfer.blocks, 1);
    }

    #[test]
    fn test_receiver_gives_up_after_retries() {
        let mut port = MockSerialPort::new(vec![None; 4], vec![CONTINUE, NAK, NAK, NAK]);
        let (result, transfer) = receive(&mut port);
        match result {
            Err(Error::DeviceUnresponsive { attempts, .. }) => assert_eq!(attempts, 4),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(transfer.data.is_empty());
    }

    #[test]
    fn test_receiver_unrecognized_marker() {
        let mut responses = bytes(b"junk");
        responses.push(None);
        responses.extend(device_block(1, b"data"));
        responses.push(Some(EOT));

        let mut port = MockSerialPort::new(responses, vec![CONTINUE, NAK, ACK]);
        let (result, transfer) = receive(&mut port);
        result.unwrap();
        assert_eq!(&transfer.data[..4], b"data");
    }

    #[test]
    fn test_receiver_cancel_between_blocks() {
        let link = Settings::for_tests().link;
        let cancel = CancelToken::new();
        let mut transfer = Transfer::new(Command::DownloadWaypoints);
        let mut port = MockSerialPort::new(device_block(1, b"poi"), vec![CONTINUE, ACK]);

        {
            let mut fsm = ReceiverFsm::new(&mut port, &link, &cancel, &mut transfer);
            for _ in 0..3 {
                fsm = fsm.step().expect("Should succeed").expect("Should continue");
            }

            cancel.cancel().unwrap();
            assert!(matches!(fsm.step(), Err(Error::Cancelled)));
        }

        assert_eq!(transfer.blocks, 1);
        assert_eq!(&transfer.data[..3], b"poi");
    }
}
