//! CRC32 hashing utilities.
//!
//! This is the reflected CRC32 (polynomial `0xEDB88320`) used in gzip member
//! trailers, not CRC32C.

/// Compute the CRC32 checksum of a byte slice.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
