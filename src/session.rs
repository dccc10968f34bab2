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

//! Command/response sequencing over one serial link.
//!
//! A [`Session`] owns the transport. Every operation starts with one
//! request sentence; bulk commands then switch the link to the bulk baud
//! rate and hand it to the download ([`crate::receiver`]) or upload
//! ([`crate::sender`]) state machine. The command baud rate is restored
//! whatever the outcome.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::error::{Error, Result};
use crate::frame::Sentence;
use crate::protocol::*;
use crate::receiver::ReceiverFsm;
use crate::sender::SenderFsm;
use crate::serial::SerialPort;
use crate::settings::LinkSettings;

// ============================================================================
// Cancellation
// ============================================================================

const IDLE: u8 = 0;
const UPLOADING: u8 = 1;
const CANCELLED: u8 = 2;

/// Cross-thread cancellation request for bulk transfers.
///
/// Downloads stop at the next block boundary and commands before their
/// next attempt. The device has no abort command, so an upload in flight
/// cannot be cancelled. A cancellation is consumed by the operation it
/// stops.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicU8>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) -> Result<()> {
        match self.0.compare_exchange(IDLE, CANCELLED, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) | Err(CANCELLED) => Ok(()),
            Err(_) => Err(Error::CancellationUnsupported),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst) == CANCELLED
    }

    /// Clears a pending cancellation.
    pub fn reset(&self) {
        let _ = self.0.compare_exchange(CANCELLED, IDLE, Ordering::SeqCst, Ordering::SeqCst);
    }

    /// Fails with [`Error::Cancelled`] and clears the request if one is
    /// pending.
    fn take(&self) -> Result<()> {
        match self.0.compare_exchange(CANCELLED, IDLE, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => Err(Error::Cancelled),
            Err(_) => Ok(()),
        }
    }

    fn begin_upload(&self) -> Result<UploadGuard<'_>> {
        self.take()?;
        match self.0.compare_exchange(IDLE, UPLOADING, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => Ok(UploadGuard(self)),
            Err(_) => Err(Error::Cancelled),
        }
    }
}

struct UploadGuard<'a>(&'a CancelToken);

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.0.0.store(IDLE, Ordering::SeqCst);
    }
}

// ============================================================================
// Transfer bookkeeping
// ============================================================================

/// Progress of one bulk transfer.
#[derive(Debug)]
pub struct Transfer {
    pub command: Command,
    /// Next block expected from the device, or the block being sent
    pub sequence: u8,
    /// Blocks accepted so far
    pub blocks: usize,
    /// Total blocks of an upload
    pub expected_blocks: Option<usize>,
    /// Retries spent on the current block
    pub retries: u32,
    /// Payload received so far
    pub data: Vec<u8>,
}

impl Transfer {
    pub fn new(command: Command) -> Self {
        Transfer {
            command,
            sequence: 1,
            blocks: 0,
            expected_blocks: None,
            retries: 0,
            data: Vec::new(),
        }
    }

    /// Moves on to the next block after one was accepted.
    pub(crate) fn advance(&mut self) {
        self.blocks += 1;
        self.sequence = self.sequence.wrapping_add(1);
        self.retries = 0;
    }
}

/// Result of a download that may have been cut short.
#[derive(Debug)]
pub struct Download<T> {
    pub value: T,
    /// Why the transfer stopped early, if it did
    pub interruption: Option<Error>,
}

impl<T> Download<T> {
    pub fn complete(value: T) -> Self {
        Download {
            value,
            interruption: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.interruption.is_none()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Download<U> {
        Download {
            value: f(self.value),
            interruption: self.interruption,
        }
    }

    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Download<U>> {
        Ok(Download {
            value: f(self.value)?,
            interruption: self.interruption,
        })
    }

    /// The value, or the interruption if there was one.
    pub fn into_result(self) -> Result<T> {
        match self.interruption {
            None => Ok(self.value),
            Some(e) => Err(e),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

pub struct Session {
    port: Box<dyn SerialPort>,
    link: LinkSettings,
    cancel: CancelToken,
}

impl Session {
    pub fn new(port: Box<dyn SerialPort>, link: LinkSettings) -> Self {
        Session {
            port,
            link,
            cancel: CancelToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn link(&self) -> &LinkSettings {
        &self.link
    }

    /// Sends `command` and returns the device's reply.
    ///
    /// A missing or corrupt reply resends the identical sentence, up to
    /// `max_retries` times. A well-formed reply with the wrong tag is not
    /// retried.
    pub fn execute(&mut self, command: Command, args: &[String]) -> Result<Sentence> {
        let spec = command.spec();
        let request = Sentence::request(command, args);
        let bytes = request.encode()?;
        let attempts = self.link.max_retries + 1;
        let mut timeouts = 0;
        let mut last_error = None;

        for attempt in 1..=attempts {
            self.cancel.take()?;
            debug!(%request, attempt, "sending sentence");
            self.port.write_all(&bytes)?;
            if !self.link.command_delay().is_zero() {
                std::thread::sleep(self.link.command_delay());
            }

            match self.read_reply(spec.verify_reply) {
                Ok(reply) => {
                    debug!(%reply, "received sentence");
                    if !reply.matches(spec.reply_tag, spec.reply_args) {
                        return Err(Error::ProtocolError(format!(
                            "{} answered with {}",
                            command, reply
                        )));
                    }
                    return Ok(reply);
                }
                Err(e) if e.is_transient() => {
                    warn!(%request, attempt, error = %e, "no valid reply");
                    if matches!(e, Error::Timeout(_)) {
                        timeouts += 1;
                    }
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        if timeouts == attempts {
            Err(Error::DeviceUnresponsive {
                attempts,
                context: format!("no reply to {}", command),
            })
        } else {
            let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
            Err(Error::ProtocolError(format!(
                "no valid reply to {} after {} attempts: {}",
                command, attempts, reason
            )))
        }
    }

    fn read_reply(&mut self, verify: bool) -> Result<Sentence> {
        let line = self.port.read_line(MAX_SENTENCE_LEN, self.link.command_timeout())?;
        if line.is_empty() {
            return Err(Error::Timeout("reply sentence"));
        }
        if verify {
            Sentence::decode(&line)
        } else {
            Sentence::decode_unverified(&line)
        }
    }

    /// Runs a download command and collects the block payloads.
    ///
    /// An interrupted transfer returns the payload received so far together
    /// with the error when best-effort downloads are enabled, or when the
    /// transfer was cancelled, and at least one block arrived.
    pub fn download(&mut self, command: Command) -> Result<Download<Vec<u8>>> {
        if command.spec().bulk != Bulk::Download {
            return Err(Error::ProtocolError(format!("{} is not a download", command)));
        }
        self.cancel.take()?;
        self.execute(command, &[])?;

        let mut transfer = Transfer::new(command);
        let outcome = self.with_bulk_baud(|session| {
            ReceiverFsm::run(&mut *session.port, &session.link, &session.cancel, &mut transfer)
        });

        match outcome {
            Ok(()) => {
                info!(%command, blocks = transfer.blocks, bytes = transfer.data.len(), "download complete");
                Ok(Download::complete(transfer.data))
            }
            Err(e) => {
                if matches!(e, Error::Cancelled) {
                    self.cancel.reset();
                }
                let keep = transfer.blocks > 0
                    && (self.link.best_effort_downloads || matches!(e, Error::Cancelled));
                if keep {
                    warn!(%command, blocks = transfer.blocks, error = %e, "download interrupted, keeping partial data");
                    Ok(Download {
                        value: transfer.data,
                        interruption: Some(e),
                    })
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Runs an upload command and sends `data` in blocks.
    ///
    /// Fails with [`Error::Cancelled`] without touching the device if a
    /// cancellation is pending.
    pub fn upload(&mut self, command: Command, data: &[u8]) -> Result<()> {
        if command.spec().bulk != Bulk::Upload {
            return Err(Error::ProtocolError(format!("{} is not an upload", command)));
        }
        let cancel = self.cancel.clone();
        let _guard = cancel.begin_upload()?;
        self.execute(command, &[])?;

        let mut transfer = Transfer::new(command);
        self.with_bulk_baud(|session| {
            SenderFsm::run(&mut *session.port, &session.link, data, &mut transfer)
        })?;
        info!(%command, blocks = transfer.blocks, bytes = data.len(), "upload complete");
        Ok(())
    }

    fn with_bulk_baud<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.port.set_baud_rate(self.link.bulk_baud_rate)?;
        let result = f(self);
        let restored = self.port.set_baud_rate(self.link.baud_rate);
        match (result, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_block, nmea_checksum, BlockChecksum};
    use crate::serial::{bytes, MockSerialPort};
    use crate::settings::Settings;

    pub(crate) fn reply(body: &str) -> Vec<Option<u8>> {
        bytes(format!("${}*{:02X}\r\n", body, nmea_checksum(body.as_bytes())).as_bytes())
    }

    fn request(command: Command) -> Vec<u8> {
        Sentence::request(command, &[]).encode().unwrap()
    }

    fn session(port: MockSerialPort) -> Session {
        Session::new(Box::new(port), Settings::for_tests().link)
    }

    #[test]
    fn test_execute_returns_reply() {
        let port = MockSerialPort::new(reply("POEM101,1,0,20,0,0,0,0,12.5"), request(Command::ReadRecordingConfig));
        let mut session = session(port);
        let sentence = session.execute(Command::ReadRecordingConfig, &[]).unwrap();
        assert_eq!(sentence.tag, "POEM101");
        assert_eq!(sentence.fields.len(), 8);
    }

    #[test]
    fn test_execute_resends_after_corrupt_reply() {
        let mut script = bytes(b"$POEM103,2,10,30,10,1,1,0*00\r\n");
        script.extend(reply("POEM103,2,10,30,10,1,1,0"));

        let mut expected = request(Command::ReadDeviceConfig);
        expected.extend(request(Command::ReadDeviceConfig));

        let mut session = session(MockSerialPort::new(script, expected));
        let sentence = session.execute(Command::ReadDeviceConfig, &[]).unwrap();
        assert_eq!(sentence.fields[0], "2");
    }

    #[test]
    fn test_execute_all_timeouts_is_unresponsive() {
        let expected = request(Command::ReadDeviceConfig).repeat(4);
        let mut session = session(MockSerialPort::new(vec![None; 4], expected));
        match session.execute(Command::ReadDeviceConfig, &[]) {
            Err(Error::DeviceUnresponsive { attempts, .. }) => assert_eq!(attempts, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_execute_corrupt_exhaustion_is_protocol_error() {
        let mut script = Vec::new();
        for _ in 0..2 {
            script.push(None);
            script.extend(bytes(b"$POEM103,0*7F\r\n"));
        }
        let mut session = session(MockSerialPort::scripted(script));
        assert!(matches!(
            session.execute(Command::ReadDeviceConfig, &[]),
            Err(Error::ProtocolError(_))
        ));
    }

    #[test]
    fn test_execute_wrong_tag_is_not_retried() {
        let port = MockSerialPort::new(reply("POEM200,12"), request(Command::ReadDeviceConfig));
        let mut session = session(port);
        assert!(matches!(
            session.execute(Command::ReadDeviceConfig, &[]),
            Err(Error::ProtocolError(_))
        ));
    }

    #[test]
    fn test_execute_with_arguments() {
        let args: Vec<String> = ["0", "10", "30", "10", "1", "1", "0"].iter().map(|s| s.to_string()).collect();
        let expected = Sentence::request(Command::WriteDeviceConfig, &args).encode().unwrap();
        assert!(expected.starts_with(b"$POEM14,1,0,10,30,10,1,1,0*"));

        let mut session = session(MockSerialPort::new(reply("POEM200,14"), expected));
        session.execute(Command::WriteDeviceConfig, &args).unwrap();
    }

    #[test]
    fn test_upload_reply_checksum_is_ignored() {
        let mut script = bytes(b"$POEM200,12,004*00\r\n");
        script.push(Some(NAK));
        script.push(Some(ACK));
        script.push(Some(ACK));
        let port = MockSerialPort::scripted(script);
        let bauds = port.baud_log();
        let mut session = session(port);

        session.upload(Command::UploadWaypoints, &[0u8; 16]).unwrap();
        assert_eq!(*bauds.lock().unwrap(), vec![BULK_BAUD, COMMAND_BAUD]);
    }

    #[test]
    fn test_download_restores_baud_after_failure() {
        let mut script = reply("POEM200,12");
        script.extend(vec![None; 4]);
        let port = MockSerialPort::scripted(script);
        let bauds = port.baud_log();
        let mut session = session(port);

        assert!(matches!(
            session.download(Command::DownloadTracks),
            Err(Error::DeviceUnresponsive { .. })
        ));
        assert_eq!(*bauds.lock().unwrap(), vec![BULK_BAUD, COMMAND_BAUD]);
    }

    #[test]
    fn test_best_effort_download_keeps_received_blocks() {
        let mut script = reply("POEM200,12");
        script.extend(bytes(&encode_block(1, &[0x11; 40], BlockChecksum::Crc16Xmodem).unwrap()));
        script.extend(vec![None; 4]);

        let mut link = Settings::for_tests().link;
        link.best_effort_downloads = true;
        let mut session = Session::new(Box::new(MockSerialPort::scripted(script)), link);

        let download = session.download(Command::DownloadWaypoints).unwrap();
        assert!(!download.is_complete());
        assert_eq!(download.value.len(), BLOCK_LEN);
        assert_eq!(&download.value[..40], &[0x11; 40]);
        assert!(matches!(download.interruption, Some(Error::DeviceUnresponsive { .. })));
    }

    #[test]
    fn test_strict_download_discards_partial_data() {
        let mut script = reply("POEM200,12");
        script.extend(bytes(&encode_block(1, &[0x11; 40], BlockChecksum::Crc16Xmodem).unwrap()));
        script.extend(vec![None; 4]);
        let mut session = session(MockSerialPort::scripted(script));

        assert!(session.download(Command::DownloadWaypoints).is_err());
    }

    #[test]
    fn test_cancel_token_states() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());

        {
            let _guard = token.begin_upload().unwrap();
            assert!(matches!(token.cancel(), Err(Error::CancellationUnsupported)));
            assert!(!token.is_cancelled());
        }

        token.cancel().unwrap();
        token.cancel().unwrap();
        assert!(token.is_cancelled());
        assert!(matches!(token.begin_upload(), Err(Error::Cancelled)));

        token.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancelled_upload_never_touches_device() {
        let port = MockSerialPort::new(Vec::new(), Vec::new());
        let bauds = port.baud_log();
        let mut session = session(port);

        session.cancel_token().cancel().unwrap();
        assert!(matches!(
            session.upload(Command::UploadRoute, &[1, 2, 3]),
            Err(Error::Cancelled)
        ));
        assert!(bauds.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_stops_command_and_is_consumed() {
        let port = MockSerialPort::new(reply("POEM200,14"), request(Command::WriteDeviceConfig));
        let writes = port.write_log();
        let mut session = session(port);

        session.cancel_token().cancel().unwrap();
        assert!(matches!(session.execute(Command::WriteDeviceConfig, &[]), Err(Error::Cancelled)));
        assert!(writes.lock().unwrap().is_empty());
        assert!(!session.cancel_token().is_cancelled());

        session.execute(Command::WriteDeviceConfig, &[]).unwrap();
    }

    #[test]
    fn test_cancelled_download_clears_token() {
        let mut script = reply("POEM200,12");
        script.push(Some(EOT));
        let mut session = session(MockSerialPort::scripted(script));
        let token = session.cancel_token();

        token.cancel().unwrap();
        assert!(matches!(session.download(Command::DownloadWaypoints), Err(Error::Cancelled)));
        assert!(!token.is_cancelled());

        let download = session.download(Command::DownloadWaypoints).unwrap();
        assert!(download.is_complete());
        assert!(download.value.is_empty());
    }

    #[test]
    fn test_wrong_bulk_direction() {
        let mut session = session(MockSerialPort::new(Vec::new(), Vec::new()));
        assert!(matches!(session.download(Command::UploadRoute), Err(Error::ProtocolError(_))));
        assert!(matches!(session.upload(Command::DownloadRoute, &[]), Err(Error::ProtocolError(_))));
    }

    #[test]
    fn test_download_result_helpers() {
        let download = Download::complete(vec![1u8, 2, 3]).map(|v| v.len());
        assert!(download.is_complete());
        assert_eq!(download.into_result().unwrap(), 3);

        let interrupted = Download {
            value: 1,
            interruption: Some(Error::Cancelled),
        };
        assert!(matches!(interrupted.into_result(), Err(Error::Cancelled)));
    }
}
