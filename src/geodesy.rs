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

//! WGS84 conversions between earth-centred cartesian coordinates, as
//! recorded in track points, and latitude/longitude/elevation.

const A: f64 = 6_378_137.0;
const F: f64 = 1.0 / 298.257_223_563;
const E2: f64 = F * (2.0 - F);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Degrees and metres above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

fn prime_vertical_radius(sin_lat: f64) -> f64 {
    A / (1.0 - E2 * sin_lat * sin_lat).sqrt()
}

pub fn ecef_to_geodetic(p: Ecef) -> Geodetic {
    let longitude = p.y.atan2(p.x);
    let r = p.x.hypot(p.y);

    let mut lat = p.z.atan2(r * (1.0 - E2));
    for _ in 0..10 {
        let n = prime_vertical_radius(lat.sin());
        let h = r * lat.cos() + p.z * lat.sin() - A * A / n;
        let next = p.z.atan2(r * (1.0 - E2 * n / (n + h)));
        let done = (next - lat).abs() < 1e-14;
        lat = next;
        if done {
            break;
        }
    }

    let n = prime_vertical_radius(lat.sin());
    let elevation = r * lat.cos() + p.z * lat.sin() - A * A / n;

    Geodetic {
        latitude: lat.to_degrees(),
        longitude: longitude.to_degrees(),
        elevation,
    }
}

pub fn geodetic_to_ecef(g: Geodetic) -> Ecef {
    let lat = g.latitude.to_radians();
    let lon = g.longitude.to_radians();
    let n = prime_vertical_radius(lat.sin());

    Ecef {
        x: (n + g.elevation) * lat.cos() * lon.cos(),
        y: (n + g.elevation) * lat.cos() * lon.sin(),
        z: (n * (1.0 - E2) + g.elevation) * lat.sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equator_and_pole() {
        let g = ecef_to_geodetic(Ecef { x: A, y: 0.0, z: 0.0 });
        assert!(g.latitude.abs() < 1e-9);
        assert!(g.longitude.abs() < 1e-9);
        assert!(g.elevation.abs() < 1e-6);

        let b = A * (1.0 - F);
        let g = ecef_to_geodetic(Ecef { x: 0.0, y: 0.0, z: b + 100.0 });
        assert!((g.latitude - 90.0).abs() < 1e-9);
        assert!((g.elevation - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_known_point() {
        // Cologne cathedral, roughly
        let p = geodetic_to_ecef(Geodetic {
            latitude: 50.9413,
            longitude: 6.9583,
            elevation: 60.0,
        });
        assert!((p.x - 4_000_000.0).abs() < 20_000.0);
        assert!((p.z - 4_933_000.0).abs() < 20_000.0);

        let g = ecef_to_geodetic(p);
        assert!((g.latitude - 50.9413).abs() < 1e-9);
        assert!((g.longitude - 6.9583).abs() < 1e-9);
        assert!((g.elevation - 60.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            latitude in -89.9f64..89.9,
            longitude in -179.9f64..179.9,
            elevation in -400.0f64..9000.0
        ) {
            let g = ecef_to_geodetic(geodetic_to_ecef(Geodetic { latitude, longitude, elevation }));
            prop_assert!((g.latitude - latitude).abs() < 1e-8);
            prop_assert!((g.longitude - longitude).abs() < 1e-8);
            prop_assert!((g.elevation - elevation).abs() < 1e-4);
        }
    }
}
