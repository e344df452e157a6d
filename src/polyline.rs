// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Scale factor of the polyline encoding: 5 decimal digits of precision,
/// as used by the openrouteservice optimization endpoint.
const PRECISION: f64 = 1e5;

/// Error conditions which may occur during [decode_polyline].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input contained a byte outside of the `?`..=`~` range
    /// used by the encoding.
    #[error("invalid polyline byte {0:#04x} at offset {1}")]
    InvalidByte(u8, usize),

    /// The input ended in the middle of a varint chunk sequence,
    /// or a latitude delta was not followed by a longitude delta.
    #[error("truncated polyline input")]
    Truncated,
}

/// Decodes a [polyline-encoded](https://developers.google.com/maps/documentation/utilities/polylinealgorithm)
/// string into `(latitude, longitude)` pairs.
///
/// The decoder follows the standard algorithm: signed deltas, zig-zag
/// encoded, packed into base-32 chunks offset by 63, at 5-decimal-digit
/// precision. An empty input decodes to an empty sequence; any non-empty
/// valid input yields at least one pair.
pub fn decode_polyline(data: &str) -> Result<Vec<(f64, f64)>, DecodeError> {
    let mut coordinates = Vec::new();
    let mut bytes = data.bytes().enumerate();
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    loop {
        let dlat = match next_delta(&mut bytes) {
            Some(d) => d?,
            None => break,
        };
        let dlon = next_delta(&mut bytes).ok_or(DecodeError::Truncated)??;

        lat += dlat;
        lon += dlon;
        coordinates.push((lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Ok(coordinates)
}

/// Encodes `(latitude, longitude)` pairs into a polyline string,
/// the exact inverse of [decode_polyline].
pub fn encode_polyline<I: IntoIterator<Item = (f64, f64)>>(coordinates: I) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for (lat, lon) in coordinates {
        let lat = (lat * PRECISION).round() as i64;
        let lon = (lon * PRECISION).round() as i64;
        push_delta(&mut out, lat - prev_lat);
        push_delta(&mut out, lon - prev_lon);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Reads one zig-zag-decoded delta from the byte stream.
/// Returns None on a clean end of input.
fn next_delta<I: Iterator<Item = (usize, u8)>>(
    bytes: &mut I,
) -> Option<Result<i64, DecodeError>> {
    let mut value: u64 = 0;
    let mut shift = 0;
    let mut any = false;

    loop {
        let (offset, byte) = match bytes.next() {
            Some(pair) => pair,
            None if any => return Some(Err(DecodeError::Truncated)),
            None => return None,
        };
        if !(b'?'..=b'~').contains(&byte) {
            return Some(Err(DecodeError::InvalidByte(byte, offset)));
        }
        any = true;

        let chunk = (byte - 63) as u64;
        value |= (chunk & 0x1F) << shift;
        shift += 5;

        if chunk & 0x20 == 0 {
            break;
        }
    }

    // Undo the zig-zag transform: the sign lives in the lowest bit
    let delta = if value & 1 != 0 {
        !((value >> 1) as i64)
    } else {
        (value >> 1) as i64
    };
    Some(Ok(delta))
}

/// Appends one delta as zig-zag base-32 chunks offset by 63.
fn push_delta(out: &mut String, delta: i64) {
    let mut value = if delta < 0 {
        !(delta << 1) as u64
    } else {
        (delta << 1) as u64
    };

    while value >= 0x20 {
        out.push((((value & 0x1F) as u8 | 0x20) + 63) as char);
        value >>= 5;
    }
    out.push((value as u8 + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-5),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    // Reference vector from the polyline algorithm documentation
    const ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
    const DECODED: [(f64, f64); 3] = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

    #[test]
    fn test_decode_reference_vector() {
        let got = decode_polyline(ENCODED).unwrap();
        assert_eq!(got.len(), DECODED.len());
        for ((got_lat, got_lon), (want_lat, want_lon)) in got.into_iter().zip(DECODED) {
            assert_almost_eq!(got_lat, want_lat);
            assert_almost_eq!(got_lon, want_lon);
        }
    }

    #[test]
    fn test_encode_reference_vector() {
        assert_eq!(encode_polyline(DECODED), ENCODED);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_polyline("").unwrap(), vec![]);
        assert_eq!(encode_polyline([]), "");
    }

    #[test]
    fn test_round_trip() {
        let original = [
            (48.85341, 2.34880),
            (48.85712, 2.35210),
            (48.86004, 2.34009),
            (-12.04318, -77.02824),
        ];
        let decoded = decode_polyline(&encode_polyline(original)).unwrap();
        assert_eq!(decoded.len(), original.len());
        for ((got_lat, got_lon), (want_lat, want_lon)) in decoded.into_iter().zip(original) {
            assert_almost_eq!(got_lat, want_lat);
            assert_almost_eq!(got_lon, want_lon);
        }
    }

    #[test]
    fn test_invalid_byte() {
        assert_eq!(
            decode_polyline("_p~iF~ps|U ").unwrap_err(),
            DecodeError::InvalidByte(b' ', 10),
        );
    }

    #[test]
    fn test_truncated_input() {
        // "_p~iF" is a lone latitude delta with no longitude following it
        assert_eq!(decode_polyline("_p~iF").unwrap_err(), DecodeError::Truncated);
    }
}
