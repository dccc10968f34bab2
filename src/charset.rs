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

//! Route text encoding.
//!
//! Route point names are stored as indices into a per-route character
//! table, and every table entry carries the bitmap the device draws for it.
//! Characters outside the device's stock font can still be shown as long
//! as a bitmap for them is known.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};
use crate::error::{Error, Result};
use crate::font;
use crate::protocol::GLYPH_LEN;

/// Bytes per glyph file record: one UTF-16LE code unit, then the bitmap.
pub const GLYPH_RECORD_LEN: usize = 2 + GLYPH_LEN;

/// An 11x16 bitmap in two bands of 8 rows, one byte per column, least
/// significant bit on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub [u8; GLYPH_LEN]);

impl Glyph {
    pub const WIDTH: usize = 11;
    pub const HEIGHT: usize = 16;

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bitmap: [u8; GLYPH_LEN] = bytes
            .try_into()
            .map_err(|_| Error::malformed("glyph", format!("expected {} bytes, got {}", GLYPH_LEN, bytes.len())))?;
        Ok(Glyph(bitmap))
    }

    pub fn pixel(&self, column: usize, row: usize) -> bool {
        let band = row / 8;
        self.0[band * Self::WIDTH + column] & (1 << (row % 8)) != 0
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..Self::HEIGHT {
            let line: String = (0..Self::WIDTH)
                .map(|col| if self.pixel(col, row) { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn stock_glyph(c: char) -> Option<Glyph> {
    font::STOCK.iter().find(|(s, _)| *s == c).map(|(_, bitmap)| Glyph(*bitmap))
}

/// The bitmap drawn for `c`, from the stock font or else from `glyphs`.
pub fn resolve(c: char, glyphs: &GlyphMap) -> Option<Glyph> {
    stock_glyph(c).or_else(|| glyphs.get(c).copied())
}

/// True when the device can draw `c` without a custom bitmap.
pub fn is_stock(c: char) -> bool {
    font::STOCK.iter().any(|(s, _)| *s == c)
}

/// Bitmaps for characters outside the stock font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphMap {
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bitmaps that ship with this crate.
    pub fn builtin() -> Self {
        GlyphMap {
            glyphs: font::EXTENDED.iter().map(|(c, bitmap)| (*c, Glyph(*bitmap))).collect(),
        }
    }

    pub fn get(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    pub fn insert(&mut self, c: char, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(c, glyph)
    }

    /// Adds every glyph of `other`, replacing ours on conflict.
    pub fn extend(&mut self, other: GlyphMap) {
        self.glyphs.extend(other.glyphs);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs.iter().map(|(c, g)| (*c, g))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % GLYPH_RECORD_LEN != 0 {
            return Err(Error::malformed(
                "glyph file",
                format!("{} bytes is not a multiple of {}", bytes.len(), GLYPH_RECORD_LEN),
            ));
        }
        let mut map = GlyphMap::new();
        for record in bytes.chunks(GLYPH_RECORD_LEN) {
            let unit = u16::from_le_bytes([record[0], record[1]]);
            let c = char::from_u32(unit as u32)
                .ok_or_else(|| Error::malformed("glyph file", format!("{:#06x} is not a character", unit)))?;
            map.insert(c, Glyph::from_slice(&record[2..])?);
        }
        Ok(map)
    }

    /// Records sorted by character.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.glyphs.len() * GLYPH_RECORD_LEN);
        for (c, glyph) in &self.glyphs {
            let mut unit = [0u16; 2];
            c.encode_utf16(&mut unit);
            out.extend(unit[0].to_le_bytes());
            out.extend(glyph.0);
        }
        out
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let map = Self::from_bytes(&std::fs::read(path.as_ref())?)?;
        debug!("Loaded {} glyphs from {}", map.len(), path.as_ref().display());
        Ok(map)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Unknown indices are an error
    Strict,
    /// Unknown indices become U+FFFD
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub codes: Vec<u16>,
    /// Characters added to the table by this call that need a custom bitmap
    pub glyphs_needed: Vec<char>,
}

/// The character table of one route image. Entry 0 is always NUL and
/// marks unused name slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharTable {
    entries: Vec<char>,
}

impl Default for CharTable {
    fn default() -> Self {
        CharTable { entries: vec!['\0'] }
    }
}

impl CharTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[char] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Maps `text` to table indices, appending characters seen for the
    /// first time.
    pub fn encode_text(&mut self, text: &str, glyphs: &GlyphMap) -> Result<EncodedText> {
        let mut codes = Vec::with_capacity(text.len());
        let mut glyphs_needed = Vec::new();

        for c in text.chars() {
            let index = match self.entries.iter().position(|&e| e == c) {
                Some(index) if c != '\0' => index,
                _ => {
                    if c == '\0' || c.len_utf16() != 1 {
                        return Err(Error::UnsupportedCharacter(c));
                    }
                    if !is_stock(c) {
                        if glyphs.get(c).is_none() {
                            return Err(Error::UnsupportedCharacter(c));
                        }
                        glyphs_needed.push(c);
                    }
                    self.entries.push(c);
                    self.entries.len() - 1
                }
            };
            codes.push(u16::try_from(index).map_err(|_| Error::UnsupportedCharacter(c))?);
        }
        Ok(EncodedText { codes, glyphs_needed })
    }

    /// Maps indices back to text, skipping unused (zero) slots. Returns the
    /// text and the number of substituted characters.
    pub fn decode_text(&self, codes: &[u16], strictness: Strictness) -> Result<(String, usize)> {
        let mut text = String::with_capacity(codes.len());
        let mut substitutions = 0;

        for &code in codes.iter().filter(|&&code| code != 0) {
            match self.entries.get(code as usize) {
                Some(&c) => text.push(c),
                None if strictness == Strictness::Lenient => {
                    text.push(char::REPLACEMENT_CHARACTER);
                    substitutions += 1;
                }
                None => {
                    return Err(Error::malformed(
                        "route point name",
                        format!("index {} is outside the {}-entry character table", code, self.entries.len()),
                    ));
                }
            }
        }
        if substitutions > 0 {
            warn!("Replaced {} unknown characters in {:?}", substitutions, text);
        }
        Ok((text, substitutions))
    }

    /// One bitmap per entry, stock or custom.
    pub fn bitmaps(&self, glyphs: &GlyphMap) -> Result<Vec<Glyph>> {
        self.entries
            .iter()
            .map(|&c| resolve(c, glyphs).ok_or(Error::UnsupportedCharacter(c)))
            .collect()
    }

    /// Entries that need a custom bitmap.
    pub fn custom_entries(&self) -> Vec<char> {
        self.entries.iter().copied().filter(|&c| !is_stock(c)).collect()
    }

    /// Pairs each non-stock entry with the bitmap stored alongside it.
    pub fn harvest(&self, bitmaps: &[Glyph]) -> GlyphMap {
        let mut map = GlyphMap::new();
        for (&c, glyph) in self.entries.iter().zip(bitmaps) {
            if !is_stock(c) {
                map.insert(c, *glyph);
            }
        }
        map
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 || bytes.len() < 2 {
            return Err(Error::malformed("character table", format!("odd or empty length {}", bytes.len())));
        }
        let entries = bytes
            .chunks(2)
            .map(|unit| {
                let unit = u16::from_le_bytes([unit[0], unit[1]]);
                char::from_u32(unit as u32)
                    .ok_or_else(|| Error::malformed("character table", format!("{:#06x} is not a character", unit)))
            })
            .collect::<Result<Vec<char>>>()?;
        if entries[0] != '\0' {
            return Err(Error::malformed("character table", "first entry is not NUL"));
        }
        Ok(CharTable { entries })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * 2);
        for c in &self.entries {
            let mut unit = [0u16; 2];
            c.encode_utf16(&mut unit);
            out.extend(unit[0].to_le_bytes());
        }
        out
    }
}
