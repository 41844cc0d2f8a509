//! UTF-16 helpers shared by the decoder and the native backends.

/// Encodes `value` as a NUL-terminated UTF-16 string for wide Win32 calls.
pub fn str_to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Reinterprets little-endian byte pairs as UTF-16 code units.
///
/// Returns `None` when `bytes` does not hold a whole number of code units.
pub fn units_from_le_bytes(bytes: &[u8]) -> Option<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    )
}

/// Strict UTF-16LE decode: unpaired surrogates and odd lengths are rejected.
pub fn decode_utf16_le(bytes: &[u8]) -> Option<String> {
    let units = units_from_le_bytes(bytes)?;
    String::from_utf16(&units).ok()
}

/// Trims a wide buffer at its first NUL.
pub fn trim_at_nul(units: &[u16]) -> &[u16] {
    let nul = units.iter().position(|c| *c == 0).unwrap_or(units.len());
    &units[..nul]
}
