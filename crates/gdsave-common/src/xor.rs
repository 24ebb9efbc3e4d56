//! Single-byte XOR stream cipher.
//!
//! Classic save files XOR every byte of their base64 text with a fixed key.
//! The transform is its own inverse.

/// The key classic save files are XORed with.
pub const SAVE_KEY: u8 = 0x0B;

/// XOR every byte of `data` with `key` in place.
#[inline]
pub fn xor_in_place(data: &mut [u8], key: u8) {
    data.iter_mut().for_each(|b| *b ^= key);
}

/// XOR every byte of `data` with `key` into a new buffer.
pub fn xor(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|&b| b ^ key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_inverse() {
        let data: Vec<u8> = (0..=255u8).collect();
        for key in [0x00, SAVE_KEY, 0x80, 0xFF] {
            assert_eq!(xor(&xor(&data, key), key), data);
        }
    }

    #[test]
    fn test_gzip_magic_maps_to_marker() {
        // "H4sI" is the base64 of a gzip header; XORed it starts with 'C'.
        assert_eq!(xor(b"H4sIAAAA", SAVE_KEY), b"C?xBJJJJ");
    }

    #[test]
    fn test_in_place_matches_copy() {
        let mut data = b"save data".to_vec();
        let copy = xor(&data, SAVE_KEY);
        xor_in_place(&mut data, SAVE_KEY);
        assert_eq!(data, copy);
        assert!(xor(&[], SAVE_KEY).is_empty());
    }
}
