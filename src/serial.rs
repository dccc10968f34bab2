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

use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort as SerialPortTrait, StopBits};

// ============================================================================
// SerialPort Trait
// ============================================================================

/// Trait for serial port operations needed by the navi2move protocol.
///
/// Reads never fail because of a timeout: they return whatever arrived in
/// time, possibly nothing.
pub trait SerialPort: Send {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Returns `Ok(0)` if nothing arrived within `timeout`.
    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> std::io::Result<usize>;

    /// Sends a line break and re-clocks the port.
    fn set_baud_rate(&mut self, baud_rate: u32) -> std::io::Result<()>;

    fn read_byte(&mut self, timeout: Duration) -> std::io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.read_timeout(&mut buf, timeout)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    /// Reads up to `len` bytes, stopping early when the deadline passes.
    fn read_up_to(&mut self, len: usize, timeout: Duration) -> std::io::Result<Vec<u8>> {
        let deadline = Instant::now() + timeout;
        let mut out = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let n = self.read_timeout(&mut out[filled..], remaining)?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        out.truncate(filled);
        Ok(out)
    }

    /// Reads one `\n` terminated line of at most `max` bytes.
    fn read_line(&mut self, max: usize, timeout: Duration) -> std::io::Result<Vec<u8>> {
        let deadline = Instant::now() + timeout;
        let mut line = Vec::new();

        while line.len() < max {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.read_byte(remaining)? {
                Some(byte) => {
                    line.push(byte);
                    if byte == b'\n' {
                        break;
                    }
                }
                None => break,
            }
        }

        Ok(line)
    }
}

// ============================================================================
// Real Serial Port Implementation
// ============================================================================

/// Real serial port implementation that wraps the serialport crate
pub struct RealSerialPort {
    port: Box<dyn SerialPortTrait>,
}

impl RealSerialPort {
    /// Opens the port 8N1 without flow control, as the device expects.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(port_name, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(100))
            .open()?;

        port.clear(ClearBuffer::All)?;

        Ok(RealSerialPort { port })
    }
}

impl SerialPort for RealSerialPort {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.port.write_all(buf)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> std::io::Result<usize> {
        self.port.set_timeout(timeout)?;
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> std::io::Result<()> {
        // The device only follows a rate change that is preceded by a break.
        self.port.set_break()?;
        std::thread::sleep(Duration::from_millis(10));
        self.port.clear_break()?;
        std::thread::sleep(Duration::from_millis(100));
        self.port.set_baud_rate(baud_rate)?;
        tracing::debug!(baud_rate, "serial port re-clocked");
        Ok(())
    }
}

// ============================================================================
// Mock Serial Port for Testing
// ============================================================================

#[cfg(test)]
pub use mock::MockSerialPort;

#[cfg(test)]
mod mock {
    use super::SerialPort;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    pub struct MockSerialPort {
        // Data to return on reads (None = timeout)
        read_buffer: Vec<Option<u8>>,
        read_pos: usize,
        // Track what was written
        write_log: Arc<Mutex<Vec<u8>>>,
        baud_log: Arc<Mutex<Vec<u32>>>,
        // Expected writes for verification
        expected_writes: Option<Vec<u8>>,
    }

    impl MockSerialPort {
        pub fn new(responses: Vec<Option<u8>>, expected_writes: Vec<u8>) -> Self {
            let mut port = Self::scripted(responses);
            port.expected_writes = Some(expected_writes);
            port
        }

        /// A mock that records writes without checking them on drop.
        pub fn scripted(responses: Vec<Option<u8>>) -> Self {
            MockSerialPort {
                read_buffer: responses,
                read_pos: 0,
                write_log: Arc::new(Mutex::new(Vec::new())),
                baud_log: Arc::new(Mutex::new(Vec::new())),
                expected_writes: None,
            }
        }

        pub fn write_log(&self) -> Arc<Mutex<Vec<u8>>> {
            Arc::clone(&self.write_log)
        }

        pub fn baud_log(&self) -> Arc<Mutex<Vec<u32>>> {
            Arc::clone(&self.baud_log)
        }
    }

    impl SerialPort for MockSerialPort {
        fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
            self.write_log.lock().unwrap().extend_from_slice(buf);
            Ok(())
        }

        fn read_timeout(&mut self, buf: &mut [u8], _timeout: Duration) -> std::io::Result<usize> {
            // Out of responses = timeout
            if self.read_pos >= self.read_buffer.len() {
                return Ok(0);
            }

            // If current response is None = timeout
            if self.read_buffer[self.read_pos].is_none() {
                self.read_pos += 1;
                return Ok(0);
            }

            let mut bytes_read = 0;
            while bytes_read < buf.len() && self.read_pos < self.read_buffer.len() {
                match self.read_buffer[self.read_pos] {
                    Some(byte) => {
                        buf[bytes_read] = byte;
                        bytes_read += 1;
                        self.read_pos += 1;
                    }
                    None => break, // Stop at timeout marker
                }
            }

            Ok(bytes_read)
        }

        fn set_baud_rate(&mut self, baud_rate: u32) -> std::io::Result<()> {
            self.baud_log.lock().unwrap().push(baud_rate);
            Ok(())
        }
    }

    impl Drop for MockSerialPort {
        fn drop(&mut self) {
            if std::thread::panicking() {
                return;
            }

            assert_eq!(
                self.read_pos,
                self.read_buffer.len(),
                "MockSerialPort dropped with {} unconsumed responses (read {} of {} bytes)",
                self.read_buffer.len() - self.read_pos,
                self.read_pos,
                self.read_buffer.len()
            );

            if let Some(expected) = &self.expected_writes {
                let written = self.write_log.lock().unwrap();
                assert_eq!(
                    &*written,
                    expected,
                    "MockSerialPort write log mismatch!\nExpected {} bytes:\n{:02X?}\nGot {} bytes:\n{:02X?}",
                    expected.len(),
                    expected,
                    written.len(),
                    written
                );
            }
        }
    }

    /// Script helper: bytes that arrive without pause.
    pub fn bytes(data: &[u8]) -> Vec<Option<u8>> {
        data.iter().copied().map(Some).collect()
    }
}

#[cfg(test)]
pub use mock::bytes;
