//! IBM System/360 floating point, as stored in SAS transport files.

/// Convert an 8-byte IBM hexadecimal float to IEEE 754.
///
/// Layout: 1 sign bit, 7-bit base-16 exponent biased by 64, 56-bit fraction.
pub(crate) fn ibm_to_ieee(bytes: [u8; 8]) -> f64 {
    let mut mantissa = 0u64;
    for &byte in &bytes[1..] {
        mantissa = (mantissa << 8) | u64::from(byte);
    }
    if mantissa == 0 {
        return 0.0;
    }

    let sign = if bytes[0] & 0x80 == 0 { 1.0 } else { -1.0 };
    let exponent = i32::from(bytes[0] & 0x7f) - 64;
    sign * (mantissa as f64 / 2f64.powi(56)) * 16f64.powi(exponent)
}

/// Whether the bytes encode a SAS missing value (`.`, `._` or `.A`-`.Z`).
///
/// Missing values carry the marker in the first byte and zeros elsewhere.
pub(crate) fn is_missing(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((&first, rest)) => {
            matches!(first, b'.' | b'_' | b'A'..=b'Z') && rest.iter().all(|&b| b == 0)
        }
        None => true,
    }
}
