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

//! Link and logging settings, loaded from a TOML file.
//!
//! ```toml
//! [link]
//! port = "/dev/ttyUSB0"
//! max_retries = 5
//! best_effort_downloads = true
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::protocol::{BULK_BAUD, COMMAND_BAUD};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub link: LinkSettings,
    pub logging: LoggingSettings,
}

/// Serial link parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Serial device, may be overridden on the command line
    pub port: Option<String>,
    /// Command channel baud rate
    pub baud_rate: u32,
    /// Baud rate used while blocks are exchanged
    pub bulk_baud_rate: u32,
    /// How long to wait for a reply sentence
    pub command_timeout_ms: u64,
    /// How long to wait for a complete block
    pub block_timeout_ms: u64,
    /// How long to wait for ACK/NAK during uploads
    pub ack_timeout_ms: u64,
    /// Pause after each sentence, the device drops commands sent back to back
    pub command_delay_ms: u64,
    /// Resends of one sentence or block before giving up
    pub max_retries: u32,
    /// Return the records received so far when a download breaks off
    pub best_effort_downloads: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: COMMAND_BAUD,
            bulk_baud_rate: BULK_BAUD,
            command_timeout_ms: 1000,
            block_timeout_ms: 5000,
            ack_timeout_ms: 10_000,
            command_delay_ms: 200,
            max_retries: 3,
            best_effort_downloads: false,
        }
    }
}

impl LinkSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn block_timeout(&self) -> Duration {
        Duration::from_millis(self.block_timeout_ms)
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn command_delay(&self) -> Duration {
        Duration::from_millis(self.command_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).map_err(|e| Error::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let link = &self.link;
        if link.baud_rate == 0 || link.bulk_baud_rate == 0 {
            return Err(Error::Settings("baud rates must be non-zero".into()));
        }
        if link.command_timeout_ms == 0 || link.block_timeout_ms == 0 || link.ack_timeout_ms == 0 {
            return Err(Error::Settings("timeouts must be non-zero".into()));
        }
        Ok(())
    }

    /// Settings for scripted links: no pauses between sentences.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let mut settings = Settings::default();
        settings.link.command_delay_ms = 0;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_device() {
        let settings = Settings::default();
        assert_eq!(settings.link.baud_rate, 9600);
        assert_eq!(settings.link.bulk_baud_rate, 115_200);
        assert_eq!(settings.link.command_delay(), Duration::from_millis(200));
        assert_eq!(settings.link.max_retries, 3);
        assert!(!settings.link.best_effort_downloads);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [link]
            port = "/dev/ttyUSB1"
            max_retries = 5
            "#,
        )
        .unwrap();
        assert_eq!(settings.link.port.as_deref(), Some("/dev/ttyUSB1"));
        assert_eq!(settings.link.max_retries, 5);
        assert_eq!(settings.link.ack_timeout(), Duration::from_secs(10));
        assert_eq!(settings.logging, LoggingSettings::default());
    }

    #[test]
    fn test_rejects_bad_files() {
        assert!(matches!(Settings::from_toml("[link]\nmax_retries = \"x\""), Err(Error::Settings(_))));
        assert!(matches!(Settings::from_toml("[link]\nbaud_rate = 0"), Err(Error::Settings(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navilink.toml");

        let mut settings = Settings::default();
        settings.link.best_effort_downloads = true;
        settings.logging.level = "debug".into();
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load(&dir.path().join("absent.toml")),
            Err(Error::IOError(_))
        ));
    }
}
