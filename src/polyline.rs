//! Route geometry as decoded coordinates.
//!
//! Directions providers ship geometry in the encoded-polyline format; it is
//! decoded once at the boundary and kept as plain (lat, lng) pairs inside the
//! crate.

use serde::{Deserialize, Serialize};

/// Precision used by OSRM's `polyline` geometry and Google's overview line.
pub const DEFAULT_PRECISION: u32 = 5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from (latitude, longitude) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Decode an encoded polyline string.
    ///
    /// Returns `None` on characters outside the encoding alphabet, a
    /// truncated final value, or coordinates outside +/-180 degrees.
    pub fn decode(encoded: &str, precision: u32) -> Option<Self> {
        let factor = 10_f64.powi(precision as i32);
        let limit = 10_i64.checked_pow(precision)?.checked_mul(180)?;
        let mut bytes = encoded.bytes();
        let mut points = Vec::new();
        let (mut lat, mut lng) = (0_i64, 0_i64);

        loop {
            let Some(dlat) = next_value(&mut bytes) else {
                break;
            };
            let dlat = dlat?;
            let dlng = next_value(&mut bytes)??;
            lat = lat.checked_add(dlat).filter(|v| (-limit..=limit).contains(v))?;
            lng = lng.checked_add(dlng).filter(|v| (-limit..=limit).contains(v))?;
            points.push((lat as f64 / factor, lng as f64 / factor));
        }

        Some(Self { points })
    }

    /// Encode the points back into the compact string form.
    pub fn encode(&self, precision: u32) -> String {
        let factor = 10_f64.powi(precision as i32);
        let mut out = String::new();
        let (mut prev_lat, mut prev_lng) = (0_i64, 0_i64);

        for &(lat, lng) in &self.points {
            let lat = (lat * factor).round() as i64;
            let lng = (lng * factor).round() as i64;
            push_value(&mut out, lat - prev_lat);
            push_value(&mut out, lng - prev_lng);
            prev_lat = lat;
            prev_lng = lng;
        }

        out
    }
}

/// Read one zig-zag varint. Outer `None` means clean end of input, inner
/// `None` means malformed input.
fn next_value(bytes: &mut impl Iterator<Item = u8>) -> Option<Option<i64>> {
    let mut result = 0_i64;
    let mut shift = 0;
    let mut first = true;

    loop {
        let Some(byte) = bytes.next() else {
            return if first { None } else { Some(None) };
        };
        first = false;

        if !(63..=126).contains(&byte) || shift > 60 {
            return Some(None);
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    let value = if result & 1 == 1 { !(result >> 1) } else { result >> 1 };
    Some(Some(value))
}

fn push_value(out: &mut String, value: i64) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}
