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

//! Device settings exchanged as sentence fields.
//!
//! `$POEM103` carries the general settings, `$POEM101` the track recording
//! settings followed by the disk usage. Writes send the same fields in the
//! same order.

use std::fmt;
use crate::error::{Error, Result};
use crate::frame::Sentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowed {
    /// Enumerated values with their labels
    Choices(&'static [(i32, &'static str)]),
    Range { min: i32, max: i32, unit: &'static str },
}

/// Where a setting lives in its sentence and what it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Index among the fields following the tag
    pub position: usize,
    pub name: &'static str,
    pub allowed: Allowed,
}

impl FieldSpec {
    pub fn check(&self, value: i32) -> Result<()> {
        let ok = match self.allowed {
            Allowed::Choices(choices) => choices.iter().any(|(v, _)| *v == value),
            Allowed::Range { min, max, .. } => (min..=max).contains(&value),
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidConfigValue {
                field: self.name,
                value: value as i64,
                allowed: self.allowed_text(),
            })
        }
    }

    pub fn allowed_text(&self) -> String {
        match self.allowed {
            Allowed::Choices(choices) => choices
                .iter()
                .map(|(v, label)| format!("{} ({})", v, label))
                .collect::<Vec<_>>()
                .join(", "),
            Allowed::Range { min, max, unit } => format!("{}..={} {}", min, max, unit),
        }
    }

    /// Accepts a label (case-insensitive) or a number, then validates it.
    pub fn parse(&self, text: &str) -> Result<i32> {
        let text = text.trim();
        let label = match self.allowed {
            Allowed::Choices(choices) => choices
                .iter()
                .find(|(_, label)| label.eq_ignore_ascii_case(text))
                .map(|(v, _)| *v),
            Allowed::Range { .. } => None,
        };
        let value = match label {
            Some(value) => value,
            None => text.parse().map_err(|_| Error::InvalidConfigValue {
                field: self.name,
                value: 0,
                allowed: format!("{:?} is not one of {}", text, self.allowed_text()),
            })?,
        };
        self.check(value)?;
        Ok(value)
    }

    pub fn describe(&self, value: i32) -> String {
        match self.allowed {
            Allowed::Choices(choices) => choices
                .iter()
                .find(|(v, _)| *v == value)
                .map_or_else(|| format!("{} (unknown)", value), |(_, label)| label.to_string()),
            Allowed::Range { unit: "h", .. } => format!("{:+03}", value),
            Allowed::Range { unit, .. } => format!("{} {}", value, unit),
        }
    }
}

const TIME_ZONE: Allowed = Allowed::Range { min: -12, max: 12, unit: "h" };

pub const LANGUAGE: FieldSpec = FieldSpec {
    position: 0,
    name: "language",
    allowed: Allowed::Choices(&[(0, "en"), (1, "fr"), (2, "de"), (3, "nl"), (4, "it"), (5, "es")]),
};
pub const TURN_RADIUS: FieldSpec = FieldSpec {
    position: 1,
    name: "turn radius",
    allowed: Allowed::Choices(&[(5, "5 m"), (10, "10 m"), (20, "20 m"), (30, "30 m"), (50, "50 m")]),
};
pub const LIGHT_DURATION: FieldSpec = FieldSpec {
    position: 2,
    name: "light duration",
    allowed: Allowed::Choices(&[(0, "off"), (10, "10 s"), (30, "30 s"), (60, "60 s"), (255, "on")]),
};
pub const AUTO_OFF: FieldSpec = FieldSpec {
    position: 3,
    name: "auto off",
    allowed: Allowed::Choices(&[(0, "off"), (10, "10 min"), (30, "30 min"), (60, "60 min")]),
};
pub const HOME_TIME_ZONE: FieldSpec = FieldSpec { position: 4, name: "home time zone", allowed: TIME_ZONE };
pub const CURRENT_TIME_ZONE: FieldSpec = FieldSpec { position: 5, name: "current time zone", allowed: TIME_ZONE };
pub const UNITS: FieldSpec = FieldSpec {
    position: 6,
    name: "units",
    allowed: Allowed::Choices(&[(0, "km"), (1, "mile")]),
};

pub const GENERAL_FIELDS: [FieldSpec; 7] = [
    LANGUAGE,
    TURN_RADIUS,
    LIGHT_DURATION,
    AUTO_OFF,
    HOME_TIME_ZONE,
    CURRENT_TIME_ZONE,
    UNITS,
];

const INTERVAL_MAX: i32 = 99_999;

pub const TIME_INTERVAL: FieldSpec = FieldSpec {
    position: 0,
    name: "time interval",
    allowed: Allowed::Range { min: 0, max: INTERVAL_MAX, unit: "s" },
};
pub const DISTANCE_INTERVAL: FieldSpec = FieldSpec {
    position: 2,
    name: "distance interval",
    allowed: Allowed::Range { min: 0, max: INTERVAL_MAX, unit: "m" },
};
pub const SPEED_INTERVAL: FieldSpec = FieldSpec {
    position: 4,
    name: "speed interval",
    allowed: Allowed::Range { min: 0, max: INTERVAL_MAX, unit: "m/s" },
};

const fn opaque(position: usize, name: &'static str) -> FieldSpec {
    FieldSpec {
        position,
        name,
        allowed: Allowed::Range { min: 0, max: INTERVAL_MAX, unit: "" },
    }
}

pub const RECORDING_FIELDS: [FieldSpec; 7] = [
    TIME_INTERVAL,
    opaque(1, "unknown 1"),
    DISTANCE_INTERVAL,
    opaque(3, "unknown 2"),
    SPEED_INTERVAL,
    opaque(5, "unknown 3"),
    opaque(6, "unknown 4"),
];

fn parse_fields(reply: &Sentence, fields: &[FieldSpec; 7]) -> Result<[i32; 7]> {
    let mut values = [0; 7];
    for (value, field) in values.iter_mut().zip(fields) {
        let raw = reply.fields.get(field.position).ok_or_else(|| {
            Error::ProtocolError(format!("{} reply has no {} field: {}", reply.tag, field.name, reply))
        })?;
        *value = raw.trim().parse().map_err(|_| {
            Error::ProtocolError(format!("{} reply has a bad {} field {:?}", reply.tag, field.name, raw))
        })?;
    }
    Ok(values)
}

fn to_args(values: [i32; 7], fields: &[FieldSpec; 7]) -> Result<Vec<String>> {
    let mut args = vec![String::new(); fields.len()];
    for (value, field) in values.iter().zip(fields) {
        field.check(*value)?;
        args[field.position] = value.to_string();
    }
    Ok(args)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralConfig {
    pub language: i32,
    /// Metres
    pub turn_radius: i32,
    /// Seconds, 255 = always on
    pub light_duration: i32,
    /// Minutes
    pub auto_off: i32,
    /// Hours from UTC
    pub home_time_zone: i32,
    pub current_time_zone: i32,
    pub units: i32,
}

impl GeneralConfig {
    fn values(&self) -> [i32; 7] {
        [
            self.language,
            self.turn_radius,
            self.light_duration,
            self.auto_off,
            self.home_time_zone,
            self.current_time_zone,
            self.units,
        ]
    }

    /// Parses the fields of a `$POEM103` reply.
    pub fn from_reply(reply: &Sentence) -> Result<Self> {
        let [language, turn_radius, light_duration, auto_off, home_time_zone, current_time_zone, units] =
            parse_fields(reply, &GENERAL_FIELDS)?;
        Ok(GeneralConfig {
            language,
            turn_radius,
            light_duration,
            auto_off,
            home_time_zone,
            current_time_zone,
            units,
        })
    }

    /// Validates every field, then renders the write arguments.
    pub fn to_args(&self) -> Result<Vec<String>> {
        to_args(self.values(), &GENERAL_FIELDS)
    }
}

impl fmt::Display for GeneralConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in GENERAL_FIELDS.iter().zip(self.values()) {
            writeln!(f, "  {}: {}", field.name, field.describe(value))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingConfig {
    /// Longest pause between points in seconds, 0 disables
    pub time_interval: i32,
    /// Longest distance between points in metres, 0 disables
    pub distance_interval: i32,
    /// Largest speed change between points in m/s, 0 disables
    pub speed_interval: i32,
    /// Fields with unknown meaning, sent back as read
    pub opaque: [i32; 4],
}

impl RecordingConfig {
    fn values(&self) -> [i32; 7] {
        let [a, b, c, d] = self.opaque;
        [self.time_interval, a, self.distance_interval, b, self.speed_interval, c, d]
    }

    /// Parses the fields of a `$POEM101` reply, which end with the disk
    /// usage in percent.
    pub fn from_reply(reply: &Sentence) -> Result<(Self, f64)> {
        let [time_interval, a, distance_interval, b, speed_interval, c, d] =
            parse_fields(reply, &RECORDING_FIELDS)?;
        if reply.fields.len() <= RECORDING_FIELDS.len() {
            return Err(Error::ProtocolError(format!("{} reply has no disk usage: {}", reply.tag, reply)));
        }
        let disk_usage = reply
            .fields
            .last()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .ok_or_else(|| Error::ProtocolError(format!("{} reply has a bad disk usage: {}", reply.tag, reply)))?;

        let config = RecordingConfig {
            time_interval,
            distance_interval,
            speed_interval,
            opaque: [a, b, c, d],
        };
        Ok((config, disk_usage))
    }

    pub fn to_args(&self) -> Result<Vec<String>> {
        to_args(self.values(), &RECORDING_FIELDS)
    }
}

impl fmt::Display for RecordingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in [TIME_INTERVAL, DISTANCE_INTERVAL, SPEED_INTERVAL] {
            writeln!(f, "  {}: {}", field.name, field.describe(self.values()[field.position]))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceConfig {
    pub general: GeneralConfig,
    pub recording: RecordingConfig,
    /// Percent of the track memory in use
    pub disk_usage: f64,
}

impl fmt::Display for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device settings:")?;
        write!(f, "{}", self.general)?;
        writeln!(f, "Recording settings:")?;
        write!(f, "{}", self.recording)?;
        write!(f, "Disk usage: {:.2} %", self.disk_usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tag: &str, fields: &[&str]) -> Sentence {
        Sentence::new(tag, fields.iter().map(|s| s.to_string()).collect())
    }

    fn general() -> GeneralConfig {
        GeneralConfig::from_reply(&sentence("POEM103", &["2", "20", "30", "10", "1", "-5", "0"])).unwrap()
    }

    #[test]
    fn test_general_from_reply() {
        let config = general();
        assert_eq!(config.language, 2);
        assert_eq!(config.turn_radius, 20);
        assert_eq!(config.current_time_zone, -5);
        assert_eq!(config.to_args().unwrap(), vec!["2", "20", "30", "10", "1", "-5", "0"]);
    }

    #[test]
    fn test_general_bad_reply() {
        assert!(matches!(
            GeneralConfig::from_reply(&sentence("POEM103", &["2", "20"])),
            Err(Error::ProtocolError(_))
        ));
        assert!(matches!(
            GeneralConfig::from_reply(&sentence("POEM103", &["x", "20", "30", "10", "1", "-5", "0"])),
            Err(Error::ProtocolError(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = general();
        config.turn_radius = 15;
        match config.to_args() {
            Err(Error::InvalidConfigValue { field, value, .. }) => {
                assert_eq!(field, "turn radius");
                assert_eq!(value, 15);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut config = general();
        config.home_time_zone = 13;
        assert!(matches!(config.to_args(), Err(Error::InvalidConfigValue { field: "home time zone", .. })));
    }

    #[test]
    fn test_recording_from_reply() {
        let reply = sentence("POEM101", &["00005", "03600", "00010", "00000", "00002", "00000", "00000", "12.5"]);
        let (config, disk) = RecordingConfig::from_reply(&reply).unwrap();
        assert_eq!(config.time_interval, 5);
        assert_eq!(config.distance_interval, 10);
        assert_eq!(config.speed_interval, 2);
        assert_eq!(config.opaque, [3600, 0, 0, 0]);
        assert!((disk - 12.5).abs() < 1e-9);
        assert_eq!(config.to_args().unwrap(), vec!["5", "3600", "10", "0", "2", "0", "0"]);
    }

    #[test]
    fn test_recording_without_disk_usage() {
        let reply = sentence("POEM101", &["5", "0", "10", "0", "2", "0", "0"]);
        assert!(matches!(RecordingConfig::from_reply(&reply), Err(Error::ProtocolError(_))));
    }

    #[test]
    fn test_recording_range() {
        let (mut config, _) =
            RecordingConfig::from_reply(&sentence("POEM101", &["5", "0", "10", "0", "2", "0", "0", "1.0"])).unwrap();
        config.time_interval = -1;
        assert!(matches!(config.to_args(), Err(Error::InvalidConfigValue { field: "time interval", .. })));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(LANGUAGE.parse("DE").unwrap(), 2);
        assert_eq!(LIGHT_DURATION.parse("on").unwrap(), 255);
        assert_eq!(LIGHT_DURATION.parse("30").unwrap(), 30);
        assert_eq!(UNITS.parse("mile").unwrap(), 1);
        assert_eq!(HOME_TIME_ZONE.parse("-12").unwrap(), -12);
        assert!(LANGUAGE.parse("xx").is_err());
        assert!(AUTO_OFF.parse("45").is_err());
    }

    #[test]
    fn test_display() {
        let (recording, disk_usage) =
            RecordingConfig::from_reply(&sentence("POEM101", &["5", "0", "10", "0", "2", "0", "0", "3.14159"])).unwrap();
        let text = DeviceConfig {
            general: general(),
            recording,
            disk_usage,
        }
        .to_string();
        assert!(text.contains("language: de"));
        assert!(text.contains("light duration: 30 s"));
        assert!(text.contains("current time zone: -05"));
        assert!(text.contains("distance interval: 10 m"));
        assert!(text.ends_with("Disk usage: 3.14 %"));
    }
}
