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

//! Bulk upload state machine.
//!
//! The device signals readiness with a NAK (sometimes an ACK), then
//! acknowledges every block. A NAK or silence means "send that block
//! again". The transfer ends with EOT, which the device must ACK.

use std::marker::PhantomData;
use std::time::Instant;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::frame::{Block, BlockChecksum};
use crate::protocol::*;
use crate::serial::SerialPort;
use crate::session::Transfer;
use crate::settings::LinkSettings;

const CHECKSUM: BlockChecksum = BlockChecksum::Sum8;

// ============================================================================
// States
// ============================================================================

pub struct AwaitReady;
pub struct SendBlock;
pub struct AwaitAck;
pub struct SendEot;
pub struct AwaitEotAck;

// ============================================================================
// FSM Structure
// ============================================================================

pub struct SenderFsm<'a, State> {
    state: PhantomData<State>,
    port: &'a mut dyn SerialPort,
    link: &'a LinkSettings,
    chunks: Vec<&'a [u8]>,
    transfer: &'a mut Transfer,
}

// ============================================================================
// Trait
// ============================================================================

pub trait SenderState<'a>: Send {
    /// Advances one state; `None` once the device has acknowledged EOT.
    fn step(self: Box<Self>) -> Result<Option<Box<dyn SenderState<'a> + 'a>>>;
}

type Next<'a> = Result<Option<Box<dyn SenderState<'a> + 'a>>>;

// ============================================================================
// Helper to transition states
// ============================================================================

impl<'a, S> SenderFsm<'a, S> {
    fn transition<T>(self) -> Box<SenderFsm<'a, T>> {
        Box::new(SenderFsm {
            state: PhantomData,
            port: self.port,
            link: self.link,
            chunks: self.chunks,
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

    /// Waits for ACK or NAK, skipping anything else the device sends.
    fn await_handshake(&mut self) -> Result<Option<u8>> {
        let deadline = Instant::now() + self.link.ack_timeout();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            match self.port.read_byte(remaining).map_err(|e| self.io_error(e))? {
                Some(byte @ (ACK | NAK)) => return Ok(Some(byte)),
                Some(other) => debug!(byte = other, "ignoring byte while waiting for ACK/NAK"),
                None => return Ok(None),
            }
        }
    }
}

// ============================================================================
// State Implementations
// ============================================================================

impl<'a> SenderState<'a> for SenderFsm<'a, AwaitReady> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        match fsm.await_handshake()? {
            Some(byte) => {
                debug!(byte, "device ready for upload");
                let next = fsm.transition::<SendBlock>();
                Ok(Some(next as Box<dyn SenderState<'a> + 'a>))
            }
            None => Err(Error::DeviceUnresponsive {
                attempts: 1,
                context: format!("no ready signal after {}", fsm.transfer.command),
            }),
        }
    }
}

impl<'a> SenderState<'a> for SenderFsm<'a, SendBlock> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        let chunk = fsm.chunks[fsm.transfer.blocks];
        let frame = Block::new(fsm.transfer.sequence, chunk)?.encode(CHECKSUM);
        fsm.port.write_all(&frame).map_err(|e| fsm.io_error(e))?;
        debug!(
            block = fsm.transfer.sequence,
            of = fsm.chunks.len(),
            retry = fsm.transfer.retries,
            "Sent block"
        );

        let next = fsm.transition::<AwaitAck>();
        Ok(Some(next as Box<dyn SenderState<'a> + 'a>))
    }
}

impl<'a> SenderState<'a> for SenderFsm<'a, AwaitAck> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        let reply = fsm.await_handshake()?;
        if reply == Some(ACK) {
            fsm.transfer.advance();
            if fsm.transfer.blocks == fsm.chunks.len() {
                let next = fsm.transition::<SendEot>();
                return Ok(Some(next as Box<dyn SenderState<'a> + 'a>));
            }
            let next = fsm.transition::<SendBlock>();
            return Ok(Some(next as Box<dyn SenderState<'a> + 'a>));
        }

        let reason = match reply {
            Some(_) => "NAK",
            None => "timeout",
        };
        fsm.transfer.retries += 1;
        if fsm.transfer.retries > fsm.link.max_retries {
            return Err(Error::DeviceUnresponsive {
                attempts: fsm.transfer.retries,
                context: format!(
                    "block {} of {} not acknowledged ({})",
                    fsm.transfer.sequence,
                    fsm.transfer.command,
                    reason
                ),
            });
        }

        warn!(block = fsm.transfer.sequence, retry = fsm.transfer.retries, reason, "resending block");
        let next = fsm.transition::<SendBlock>();
        Ok(Some(next as Box<dyn SenderState<'a> + 'a>))
    }
}

impl<'a> SenderState<'a> for SenderFsm<'a, SendEot> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        fsm.port.write_all(&[EOT]).map_err(|e| fsm.io_error(e))?;
        debug!("Sent: EOT");

        let next = fsm.transition::<AwaitEotAck>();
        Ok(Some(next as Box<dyn SenderState<'a> + 'a>))
    }
}

impl<'a> SenderState<'a> for SenderFsm<'a, AwaitEotAck> {
    fn step(self: Box<Self>) -> Next<'a> {
        let mut fsm = *self;

        match fsm.await_handshake()? {
            Some(ACK) => {
                debug!("Received: ACK for EOT");
                Ok(None)
            }
            Some(_) => Err(Error::ProtocolError(format!(
                "device rejected the end of {}",
                fsm.transfer.command
            ))),
            None => Err(Error::DeviceUnresponsive {
                attempts: 1,
                context: format!("end of {} not acknowledged", fsm.transfer.command),
            }),
        }
    }
}

// ============================================================================
// Constructor & Runner
// ============================================================================

impl<'a> SenderFsm<'a, AwaitReady> {
    /// An empty `data` still sends one block of fill bytes, which clears
    /// the list on the device.
    pub fn new(
        port: &'a mut dyn SerialPort,
        link: &'a LinkSettings,
        data: &'a [u8],
        transfer: &'a mut Transfer,
    ) -> Box<dyn SenderState<'a> + 'a> {
        let chunks: Vec<&'a [u8]> = if data.is_empty() {
            vec![data]
        } else {
            data.chunks(BLOCK_LEN).collect()
        };
        transfer.expected_blocks = Some(chunks.len());

        Box::new(SenderFsm {
            state: PhantomData::<AwaitReady>,
            port,
            link,
            chunks,
            transfer,
        })
    }

    /// Drives an upload until the device acknowledges EOT.
    pub fn run(
        port: &'a mut dyn SerialPort,
        link: &'a LinkSettings,
        data: &'a [u8],
        transfer: &'a mut Transfer,
    ) -> Result<()> {
        let mut fsm = Self::new(port, link, data, transfer);
        while let Some(next) = fsm.step()? {
            fsm = next;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
