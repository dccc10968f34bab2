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

//! Routes and the device's route image.
//!
//! ```text
//! header (20 bytes)
//!      0     2  route number, always 1
//!      2     2  point count
//!      4     4  character table offset
//!      8     4  bitmap offset
//!     12     4  end offset
//!     16     2  reserved, zero
//!     18     2  checksum, negated 16-bit sum of bytes 0..18
//! points, 76 bytes each
//!      0    64  32 u16 character table indices, 0 = unused
//!     64     4  symbol word, turn instruction in the low byte
//!     68     4  i32 latitude, 1e-5 degrees
//!     72     4  i32 longitude, 1e-5 degrees
//! character table, one UTF-16LE unit per entry, entry 0 is NUL
//! one 22-byte bitmap per table entry
//! ```

use tracing::debug;
use crate::charset::{CharTable, Glyph, GlyphMap, Strictness};
use crate::error::{Error, Result};
use crate::protocol::{GLYPH_LEN, ROUTE_HEADER_LEN, ROUTE_NAME_LEN, ROUTE_POINT_LEN};
use crate::records::{expect_len, le_i32, le_u16, le_u32, ScaledDegrees};

const KIND: &str = "route";
const POINT_KIND: &str = "route point";

/// Turn instruction shown when a route point is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSymbol(pub u8);

impl TurnSymbol {
    pub const NONE: TurnSymbol = TurnSymbol(0);

    const NAMES: [&'static str; 9] = [
        "none",
        "straight ahead",
        "keep left",
        "keep right",
        "left",
        "backward",
        "right",
        "left rearward",
        "right rearward",
    ];

    pub fn name(self) -> Option<&'static str> {
        Self::NAMES.get(self.0 as usize).copied()
    }

    /// Unknown names map to [`TurnSymbol::NONE`].
    pub fn from_name(name: &str) -> Self {
        Self::NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name.trim()))
            .map_or(Self::NONE, |i| TurnSymbol(i as u8))
    }
}

impl std::fmt::Display for TurnSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown symbol {}", self.0),
        }
    }
}

/// One route point as stored on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePointRecord {
    pub name: [u16; ROUTE_NAME_LEN],
    pub symbol: u32,
    pub latitude: ScaledDegrees,
    pub longitude: ScaledDegrees,
}

impl RoutePointRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        expect_len(POINT_KIND, bytes, ROUTE_POINT_LEN)?;
        let mut name = [0u16; ROUTE_NAME_LEN];
        for (i, code) in name.iter_mut().enumerate() {
            *code = le_u16(bytes, i * 2);
        }
        Ok(RoutePointRecord {
            name,
            symbol: le_u32(bytes, 64),
            latitude: ScaledDegrees(le_i32(bytes, 68)),
            longitude: ScaledDegrees(le_i32(bytes, 72)),
        })
    }

    pub fn encode(&self) -> [u8; ROUTE_POINT_LEN] {
        let mut out = [0u8; ROUTE_POINT_LEN];
        for (i, code) in self.name.iter().enumerate() {
            out[i * 2..i * 2 + 2].copy_from_slice(&code.to_le_bytes());
        }
        out[64..68].copy_from_slice(&self.symbol.to_le_bytes());
        out[68..72].copy_from_slice(&self.latitude.0.to_le_bytes());
        out[72..76].copy_from_slice(&self.longitude.0.to_le_bytes());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePoint {
    pub name: String,
    pub symbol: TurnSymbol,
    pub latitude: ScaledDegrees,
    pub longitude: ScaledDegrees,
}

impl RoutePoint {
    /// Decodes a record against the route's character table. Returns the
    /// point and the number of substituted name characters.
    pub fn decode(bytes: &[u8], table: &CharTable, strictness: Strictness) -> Result<(Self, usize)> {
        Self::from_record(&RoutePointRecord::decode(bytes)?, table, strictness)
    }

    /// Encodes the point, adding its name to `table`.
    pub fn encode(&self, table: &mut CharTable, glyphs: &GlyphMap) -> Result<[u8; ROUTE_POINT_LEN]> {
        Ok(self.to_record(table, glyphs)?.encode())
    }

    fn from_record(record: &RoutePointRecord, table: &CharTable, strictness: Strictness) -> Result<(Self, usize)> {
        let symbol = u8::try_from(record.symbol)
            .map_err(|_| Error::malformed(POINT_KIND, format!("symbol word 0x{:08X} has upper bits set", record.symbol)))?;
        let (name, substitutions) = table.decode_text(&record.name, strictness)?;
        let point = RoutePoint {
            name,
            symbol: TurnSymbol(symbol),
            latitude: record.latitude,
            longitude: record.longitude,
        };
        Ok((point, substitutions))
    }

    fn to_record(&self, table: &mut CharTable, glyphs: &GlyphMap) -> Result<RoutePointRecord> {
        let encoded = table.encode_text(&self.name, glyphs)?;
        if encoded.codes.len() > ROUTE_NAME_LEN {
            return Err(Error::malformed(
                POINT_KIND,
                format!("name {:?} is longer than {} characters", self.name, ROUTE_NAME_LEN),
            ));
        }
        let mut name = [0u16; ROUTE_NAME_LEN];
        name[..encoded.codes.len()].copy_from_slice(&encoded.codes);
        Ok(RoutePointRecord {
            name,
            symbol: self.symbol.0 as u32,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub points: Vec<RoutePoint>,
}

impl Route {
    pub fn new(points: Vec<RoutePoint>) -> Self {
        Route { points }
    }

    /// Builds the device image, drawing custom bitmaps from `glyphs`.
    pub fn to_image(&self, glyphs: &GlyphMap) -> Result<RouteImage> {
        let count = u16::try_from(self.points.len())
            .map_err(|_| Error::malformed(KIND, format!("{} points do not fit the header", self.points.len())))?;

        let mut table = CharTable::new();
        let mut points = Vec::with_capacity(count as usize);
        for point in &self.points {
            points.push(point.to_record(&mut table, glyphs)?);
        }
        let bitmaps = table.bitmaps(glyphs)?;

        Ok(RouteImage {
            number: 1,
            reserved: 0,
            points,
            table,
            bitmaps,
        })
    }
}

/// A route exactly as transferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteImage {
    pub number: u16,
    pub reserved: u16,
    pub points: Vec<RoutePointRecord>,
    pub table: CharTable,
    pub bitmaps: Vec<Glyph>,
}

fn header_checksum(header: &[u8]) -> u16 {
    header[..ROUTE_HEADER_LEN - 2]
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(b as u16))
        .wrapping_neg()
}

impl RouteImage {
    /// Parses an image. Bytes past the end offset are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ROUTE_HEADER_LEN {
            return Err(Error::malformed(KIND, format!("{} bytes is too short for a header", bytes.len())));
        }
        let checksum = le_u16(bytes, 18);
        let expected = header_checksum(bytes);
        if checksum != expected {
            return Err(Error::malformed(
                KIND,
                format!("header checksum {:#06x}, expected {:#06x}", checksum, expected),
            ));
        }

        let number = le_u16(bytes, 0);
        let count = le_u16(bytes, 2) as usize;
        let table_offset = le_u32(bytes, 4) as usize;
        let bitmap_offset = le_u32(bytes, 8) as usize;
        let end_offset = le_u32(bytes, 12) as usize;
        let reserved = le_u16(bytes, 16);
        debug!(
            "Route header: number={}, points={}, table={}, bitmaps={}, end={}",
            number, count, table_offset, bitmap_offset, end_offset
        );

        if table_offset != ROUTE_HEADER_LEN + count * ROUTE_POINT_LEN
            || bitmap_offset < table_offset
            || end_offset < bitmap_offset
            || end_offset > bytes.len()
        {
            return Err(Error::malformed(
                KIND,
                format!(
                    "inconsistent offsets {}/{}/{} for {} points in {} bytes",
                    table_offset,
                    bitmap_offset,
                    end_offset,
                    count,
                    bytes.len()
                ),
            ));
        }

        let points = bytes[ROUTE_HEADER_LEN..table_offset]
            .chunks(ROUTE_POINT_LEN)
            .map(RoutePointRecord::decode)
            .collect::<Result<Vec<_>>>()?;
        let table = CharTable::from_bytes(&bytes[table_offset..bitmap_offset])?;

        let bitmap_bytes = &bytes[bitmap_offset..end_offset];
        if bitmap_bytes.len() != table.len() * GLYPH_LEN {
            return Err(Error::malformed(
                KIND,
                format!("{} bitmap bytes for {} table entries", bitmap_bytes.len(), table.len()),
            ));
        }
        let bitmaps = bitmap_bytes
            .chunks(GLYPH_LEN)
            .map(Glyph::from_slice)
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteImage {
            number,
            reserved,
            points,
            table,
            bitmaps,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = u16::try_from(self.points.len())
            .map_err(|_| Error::malformed(KIND, format!("{} points do not fit the header", self.points.len())))?;
        let table = self.table.to_bytes();
        let table_offset = ROUTE_HEADER_LEN + self.points.len() * ROUTE_POINT_LEN;
        let bitmap_offset = table_offset + table.len();
        let end_offset = bitmap_offset + self.bitmaps.len() * GLYPH_LEN;
        let offset = |value: usize| {
            u32::try_from(value).map_err(|_| Error::malformed(KIND, format!("offset {} is too large", value)))
        };

        let mut out = Vec::with_capacity(end_offset);
        out.extend(self.number.to_le_bytes());
        out.extend(count.to_le_bytes());
        out.extend(offset(table_offset)?.to_le_bytes());
        out.extend(offset(bitmap_offset)?.to_le_bytes());
        out.extend(offset(end_offset)?.to_le_bytes());
        out.extend(self.reserved.to_le_bytes());
        let checksum = header_checksum(&out);
        out.extend(checksum.to_le_bytes());

        for point in &self.points {
            out.extend(point.encode());
        }
        out.extend(table);
        for glyph in &self.bitmaps {
            out.extend(glyph.0);
        }
        Ok(out)
    }

    /// Decodes the points' names. Returns the route and the number of
    /// substituted characters.
    pub fn to_route(&self, strictness: Strictness) -> Result<(Route, usize)> {
        let mut points = Vec::with_capacity(self.points.len());
        let mut substitutions = 0;
        for record in &self.points {
            let (point, n) = RoutePoint::from_record(record, &self.table, strictness)?;
            points.push(point);
            substitutions += n;
        }
        Ok((Route::new(points), substitutions))
    }

    /// Characters this image carries custom bitmaps for.
    pub fn custom_glyphs(&self) -> Vec<char> {
        self.table.custom_entries()
    }

    /// The custom bitmaps carried by this image.
    pub fn harvest_glyphs(&self) -> GlyphMap {
        self.table.harvest(&self.bitmaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FILL;
    use proptest::prelude::*;

    fn point(name: &str, symbol: u8) -> RoutePoint {
        RoutePoint {
            name: name.to_string(),
            symbol: TurnSymbol(symbol),
            latitude: ScaledDegrees(5_093_962),
            longitude: ScaledDegrees(695_830),
        }
    }

    #[test]
    fn test_turn_symbols() {
        assert_eq!(TurnSymbol::from_name("keep right"), TurnSymbol(3));
        assert_eq!(TurnSymbol::from_name("Right Rearward"), TurnSymbol(8));
        assert_eq!(TurnSymbol::from_name("Waypoint"), TurnSymbol::NONE);
        assert_eq!(TurnSymbol(4).to_string(), "left");
        assert_eq!(TurnSymbol(12).to_string(), "unknown symbol 12");
    }

    #[test]
    fn test_header_layout() {
        let route = Route::new(vec![point("AB", 1), point("BA", 6)]);
        let bytes = route.to_image(&GlyphMap::builtin()).unwrap().encode().unwrap();

        // 20 + 2 * 76 = 172, then 3 table entries, then 3 bitmaps
        assert_eq!(le_u16(&bytes, 0), 1);
        assert_eq!(le_u16(&bytes, 2), 2);
        assert_eq!(le_u32(&bytes, 4), 172);
        assert_eq!(le_u32(&bytes, 8), 178);
        assert_eq!(le_u32(&bytes, 12), 178 + 3 * 22);
        assert_eq!(bytes.len(), 244);

        let sum = bytes[..18].iter().fold(0u16, |s, &b| s.wrapping_add(b as u16));
        assert_eq!(sum.wrapping_add(le_u16(&bytes, 18)), 0);

        // first point: name "AB" as indices 1, 2, symbol 1
        assert_eq!(&bytes[20..24], &[1, 0, 2, 0]);
        assert_eq!(&bytes[84..88], &[1, 0, 0, 0]);
        // second point reuses the entries
        assert_eq!(&bytes[96..100], &[2, 0, 1, 0]);
        assert_eq!(&bytes[172..178], &[0, 0, b'A', 0, b'B', 0]);
    }

    #[test]
    fn test_muller_round_trip() {
        let glyphs = GlyphMap::builtin();
        let route = Route::new(vec![point("Müller", 4)]);
        let image = route.to_image(&glyphs).unwrap();
        assert_eq!(image.custom_glyphs(), vec!['ü']);
        assert_eq!(image.bitmaps.len(), 6);

        let mut bytes = image.encode().unwrap();
        bytes.resize(1024, FILL);
        let decoded = RouteImage::decode(&bytes).unwrap();
        assert_eq!(decoded, image);

        let (back, substitutions) = decoded.to_route(Strictness::Strict).unwrap();
        assert_eq!(back, route);
        assert_eq!(substitutions, 0);

        let harvested = decoded.harvest_glyphs();
        assert_eq!(harvested.len(), 1);
        assert_eq!(harvested.get('ü'), glyphs.get('ü'));
    }

    #[test]
    fn test_unsupported_name() {
        let route = Route::new(vec![point("Kraków", 0)]);
        assert!(matches!(route.to_image(&GlyphMap::builtin()), Err(Error::UnsupportedCharacter('ó'))));
    }

    #[test]
    fn test_name_too_long() {
        let route = Route::new(vec![point(&"x".repeat(33), 0)]);
        assert!(matches!(route.to_image(&GlyphMap::new()), Err(Error::RecordMalformed { .. })));
        let route = Route::new(vec![point(&"x".repeat(32), 0)]);
        assert!(route.to_image(&GlyphMap::new()).is_ok());
    }

    #[test]
    fn test_bad_checksum() {
        let mut bytes = Route::new(vec![point("A", 0)]).to_image(&GlyphMap::new()).unwrap().encode().unwrap();
        bytes[18] ^= 0x01;
        assert!(matches!(RouteImage::decode(&bytes), Err(Error::RecordMalformed { kind: "route", .. })));
    }

    #[test]
    fn test_truncated_image() {
        let bytes = Route::new(vec![point("A", 0)]).to_image(&GlyphMap::new()).unwrap().encode().unwrap();
        assert!(RouteImage::decode(&bytes[..bytes.len() - 1]).is_err());
        assert!(RouteImage::decode(&bytes[..10]).is_err());
    }

    #[test]
    fn test_point_record_decode() {
        let mut table = CharTable::new();
        let bytes = point("Ab", 7).encode(&mut table, &GlyphMap::new()).unwrap();
        let (back, _) = RoutePoint::decode(&bytes, &table, Strictness::Strict).unwrap();
        assert_eq!(back, point("Ab", 7));
        assert!(RoutePointRecord::decode(&bytes[..75]).is_err());
    }

    #[test]
    fn test_lenient_names() {
        let mut image = Route::new(vec![point("A", 0)]).to_image(&GlyphMap::new()).unwrap();
        image.points[0].name[1] = 40;
        assert!(image.to_route(Strictness::Strict).is_err());
        let (route, substitutions) = image.to_route(Strictness::Lenient).unwrap();
        assert_eq!(route.points[0].name, "A\u{FFFD}");
        assert_eq!(substitutions, 1);
    }

    #[test]
    fn test_symbol_upper_bits_rejected() {
        let mut image = Route::new(vec![point("A", 4)]).to_image(&GlyphMap::new()).unwrap();
        image.points[0].symbol = 0x0100_0004;
        assert!(matches!(
            image.to_route(Strictness::Lenient),
            Err(Error::RecordMalformed { kind: "route point", .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_point_record_byte_exact(bytes in prop::collection::vec(any::<u8>(), ROUTE_POINT_LEN)) {
            let record = RoutePointRecord::decode(&bytes).unwrap();
            prop_assert_eq!(record.encode().to_vec(), bytes);
        }

        #[test]
        fn prop_image_byte_exact(names in prop::collection::vec("[ -~äöüß]{0,32}", 0..20)) {
            let route = Route::new(names.iter().map(|n| point(n, 2)).collect());
            let bytes = route.to_image(&GlyphMap::builtin()).unwrap().encode().unwrap();
            let image = RouteImage::decode(&bytes).unwrap();
            prop_assert_eq!(image.encode().unwrap(), bytes);
            prop_assert_eq!(image.to_route(Strictness::Strict).unwrap().0, route);
        }
    }
}
