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

//! Glyph bitmaps, 11x16 pixels in two 8-row bands of 11 columns each,
//! least significant bit on top.
//!
//! `STOCK` mirrors the device's built-in font and is embedded with every
//! route so the table stays self-describing. `EXTENDED` covers the
//! characters the built-in font lacks.

use crate::protocol::GLYPH_LEN;

pub static STOCK: [(char, [u8; GLYPH_LEN]); 96] = [
    ('\0', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('!', [0x00, 0x7C, 0x7C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('"', [0x00, 0x80, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('#', [0x00, 0x80, 0xA0, 0xE0, 0xBC, 0xA0, 0xF0, 0xAC, 0x20, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('$', [0x00, 0x8C, 0x9E, 0x9A, 0xFF, 0xB2, 0xF2, 0x62, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('%', [0x00, 0x18, 0x24, 0x24, 0x18, 0xC0, 0x30, 0x88, 0x44, 0x40, 0x80, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x01, 0x02, 0x02, 0x01]),
    ('&', [0x00, 0xC0, 0xE8, 0x3C, 0x64, 0xC4, 0x84, 0xE0, 0x60, 0x00, 0x00, 0x00, 0x01, 0x01, 0x02, 0x02, 0x03, 0x01, 0x03, 0x00, 0x00, 0x00]),
    ('\'', [0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('(', [0x00, 0xE0, 0xF8, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x07, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (')', [0x00, 0x04, 0xF8, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('*', [0x00, 0x40, 0x80, 0xE0, 0x80, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('+', [0x00, 0x40, 0x40, 0x40, 0xF8, 0x40, 0x40, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (',', [0x00, 0x00, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('/', [0x00, 0x00, 0xC0, 0x1C, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('0', [0x00, 0xF0, 0xF8, 0x04, 0x04, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('1', [0x00, 0x04, 0x04, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x03, 0x03, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('2', [0x00, 0x04, 0x84, 0xC4, 0x64, 0x3C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('3', [0x00, 0x08, 0x24, 0x24, 0x24, 0xFC, 0xD8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('4', [0x00, 0xC0, 0xA0, 0x98, 0x84, 0xFC, 0xFC, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('5', [0x00, 0x3C, 0x3C, 0x24, 0x24, 0xE4, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('6', [0x00, 0xF0, 0xF8, 0x24, 0x24, 0xE4, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('7', [0x00, 0x04, 0x04, 0xC4, 0xF4, 0x3C, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('8', [0x00, 0xD8, 0xFC, 0x24, 0x24, 0xFC, 0xD8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('9', [0x00, 0x38, 0x7C, 0x44, 0x44, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (':', [0x00, 0x30, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (';', [0x00, 0x00, 0xCC, 0xCC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('<', [0x00, 0xC0, 0xC0, 0xC0, 0x20, 0x20, 0x20, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x02, 0x00, 0x00, 0x00]),
    ('=', [0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00]),
    ('>', [0x00, 0x10, 0x20, 0x20, 0x20, 0xC0, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('?', [0x00, 0x04, 0x64, 0x74, 0x3C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('@', [0x00, 0x78, 0x84, 0x32, 0x49, 0x85, 0x85, 0x49, 0xFE, 0x86, 0x38, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x02, 0x02, 0x01, 0x00, 0x00]),
    ('A', [0x00, 0x00, 0xC0, 0xF8, 0x9C, 0x9C, 0xF8, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x01, 0x00, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00]),
    ('B', [0x00, 0xFC, 0xFC, 0x24, 0x24, 0x24, 0xFC, 0xD8, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00]),
    ('C', [0x00, 0xF0, 0xF8, 0x0C, 0x04, 0x04, 0x04, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x02, 0x03, 0x00, 0x00, 0x00]),
    ('D', [0x00, 0xFC, 0xFC, 0x04, 0x04, 0x0C, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('E', [0x00, 0xFC, 0xFC, 0x24, 0x24, 0x24, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('F', [0x00, 0xFC, 0xFC, 0x24, 0x24, 0x24, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('G', [0x00, 0xF0, 0xF8, 0x0C, 0x04, 0x44, 0xC4, 0xCC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00]),
    ('H', [0x00, 0xFC, 0xFC, 0x20, 0x20, 0x20, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00]),
    ('I', [0x00, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('J', [0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('K', [0x00, 0xFC, 0xFC, 0x60, 0xF0, 0x98, 0x0C, 0x04, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00, 0x00]),
    ('L', [0x00, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('M', [0x00, 0xFC, 0xFC, 0x1C, 0x60, 0xC0, 0x70, 0x1C, 0xFC, 0xFC, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00]),
    ('N', [0x00, 0xFC, 0xFC, 0x18, 0x60, 0x80, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x01, 0x03, 0x03, 0x00, 0x00, 0x00]),
    ('O', [0x00, 0xF0, 0xF8, 0x0C, 0x04, 0x04, 0x0C, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00]),
    ('P', [0x00, 0xFC, 0xFC, 0x44, 0x44, 0x44, 0x7C, 0x38, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('Q', [0x00, 0xF0, 0xF8, 0x0C, 0x04, 0x04, 0x0C, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x0F, 0x09, 0x00, 0x00, 0x00]),
    ('R', [0x00, 0xFC, 0xFC, 0x44, 0x44, 0xFC, 0xB8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00, 0x00]),
    ('S', [0x00, 0x38, 0x3C, 0x64, 0x64, 0xC4, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x02, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('T', [0x00, 0x04, 0x04, 0x04, 0xFC, 0xFC, 0x04, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('U', [0x00, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x02, 0x02, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00]),
    ('V', [0x00, 0x04, 0x3C, 0xF0, 0x80, 0x80, 0xF0, 0x3C, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('W', [0x04, 0x7C, 0xE0, 0x80, 0x78, 0x1C, 0x78, 0x80, 0xE0, 0x7C, 0x04, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00]),
    ('X', [0x00, 0x04, 0x8C, 0xF8, 0x60, 0x60, 0xF8, 0x8C, 0x04, 0x00, 0x00, 0x00, 0x02, 0x03, 0x01, 0x00, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00]),
    ('Y', [0x00, 0x04, 0x0C, 0x38, 0xE0, 0xE0, 0x38, 0x0C, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('Z', [0x00, 0x04, 0x84, 0xC4, 0x64, 0x34, 0x1C, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00]),
    ('[', [0x00, 0xFC, 0xFC, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x0F, 0x08, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\\', [0x00, 0x02, 0x1C, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    (']', [0x00, 0x04, 0x04, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x08, 0x0F, 0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('^', [0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('_', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('`', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('a', [0x00, 0x80, 0xD0, 0x50, 0x50, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('b', [0x00, 0xFE, 0xFE, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('c', [0x00, 0xC0, 0xE0, 0x10, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('d', [0x00, 0xE0, 0xF0, 0x10, 0x10, 0xFE, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('e', [0x00, 0xC0, 0xE0, 0x50, 0x50, 0x70, 0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('f', [0x00, 0x10, 0xFC, 0xFE, 0x12, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('g', [0x00, 0xE0, 0xF0, 0x10, 0x10, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x0B, 0x0A, 0x0A, 0x0F, 0x07, 0x00, 0x00, 0x00, 0x00]),
    ('h', [0x00, 0xFE, 0xFE, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('i', [0x00, 0xF6, 0xF6, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('j', [0x00, 0x00, 0xF6, 0xF6, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x0F, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('k', [0x00, 0xFE, 0xFE, 0xC0, 0xE0, 0x30, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00, 0x00, 0x00]),
    ('l', [0x00, 0xFE, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('m', [0x00, 0xF0, 0xF0, 0x10, 0x10, 0xF0, 0xF0, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x03, 0x03, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x03, 0x03]),
    ('n', [0x00, 0xF0, 0xF0, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('o', [0x00, 0xE0, 0xF0, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('p', [0x00, 0xF0, 0xF0, 0x10, 0x10, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x0F, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('q', [0x00, 0xE0, 0xF0, 0x10, 0x10, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x0F, 0x0F, 0x00, 0x00, 0x00, 0x00]),
    ('r', [0x00, 0xF0, 0xF0, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('s', [0x00, 0x60, 0xF0, 0xD0, 0x90, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('t', [0x00, 0x10, 0xFC, 0xFC, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('u', [0x00, 0xF0, 0xF0, 0x00, 0x00, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('v', [0x00, 0x00, 0x10, 0xF0, 0xC0, 0x00, 0xC0, 0xF0, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('w', [0x00, 0x30, 0xF0, 0x80, 0xE0, 0x70, 0xE0, 0x80, 0xF0, 0x30, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x00]),
    ('x', [0x00, 0x00, 0x30, 0xE0, 0xC0, 0xE0, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('y', [0x00, 0x10, 0x70, 0xE0, 0x00, 0xC0, 0x70, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x0D, 0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('z', [0x00, 0x10, 0x90, 0xD0, 0x70, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('{', [0x00, 0x40, 0x40, 0xF8, 0xBC, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x0F, 0x08, 0x08, 0x00, 0x00, 0x00, 0x00]),
    ('|', [0x00, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('}', [0x00, 0x04, 0x04, 0xBC, 0xF8, 0x40, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x08, 0x0F, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('~', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x02, 0x02, 0x01, 0x00, 0x00, 0x00]),
];

pub static EXTENDED: [(char, [u8; GLYPH_LEN]); 14] = [
    ('\u{A7}', [0x00, 0x64, 0xFE, 0xDA, 0xF2, 0x70, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\u{B0}', [0x00, 0x80, 0x40, 0x40, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\u{B2}', [0x00, 0x60, 0x20, 0x20, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x03, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\u{B3}', [0x00, 0x20, 0x60, 0x60, 0xA0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x02, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\u{B4}', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('\u{B5}', [0x00, 0xF0, 0xF0, 0x00, 0x00, 0xF0, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x0F, 0x02, 0x02, 0x01, 0x03, 0x02, 0x00, 0x00, 0x00]),
    ('\u{C4}', [0x00, 0x00, 0xC0, 0xF9, 0x9C, 0x9C, 0xF9, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x01, 0x00, 0x00, 0x01, 0x03, 0x02, 0x00, 0x00]),
    ('\u{D6}', [0x00, 0xF0, 0xF8, 0x0D, 0x04, 0x04, 0x0D, 0xF8, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00]),
    ('\u{DC}', [0x00, 0xFC, 0xFC, 0x01, 0x00, 0x01, 0xFC, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x02, 0x02, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00]),
    ('\u{DF}', [0x00, 0xFC, 0xFE, 0x02, 0x72, 0xFE, 0xCC, 0x80, 0x00, 0x00, 0x00, 0x00, 0x03, 0x03, 0x00, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00]),
    ('\u{E4}', [0x00, 0x80, 0xD4, 0x50, 0x54, 0xF0, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('\u{F6}', [0x00, 0xE0, 0xF4, 0x10, 0x10, 0xF4, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00]),
    ('\u{FC}', [0x00, 0xF0, 0xF4, 0x00, 0x00, 0xF4, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x03, 0x03, 0x00, 0x00, 0x00, 0x00]),
    ('\u{20AC}', [0x00, 0xA0, 0xE0, 0xF8, 0xAC, 0xA4, 0x24, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00]),
];
