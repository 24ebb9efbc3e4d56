//! Minimal gzip member construction around a raw DEFLATE stream.
//!
//! The game client expects a gzip member with a fixed header (no mtime, no
//! name, OS byte `0x0B`), so the member is assembled by hand instead of going
//! through a full gzip encoder. Decoding accepts any valid gzip member.

use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use flate2::read::GzDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use gdsave_common::crc;

use crate::error::Stage;
use crate::{Error, Result};

/// Fixed gzip member header: magic, CM=deflate, no flags, zero mtime,
/// no extra flags, OS=`0x0B`.
pub const GZIP_HEADER: [u8; 10] = [0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0B];

/// CRC32 followed by ISIZE, both little-endian.
pub const TRAILER_LEN: usize = 8;

/// Compress `plaintext` into a gzip member with the fixed header.
pub fn wrap(plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(GZIP_HEADER.len() + plaintext.len() / 4 + TRAILER_LEN);
    output.extend_from_slice(&GZIP_HEADER);

    let mut encoder = DeflateEncoder::new(output, Compression::default());
    encoder.write_all(plaintext)?;
    let mut output = encoder.finish()?;

    output.write_u32::<LittleEndian>(crc::hash_bytes(plaintext))?;
    // ISIZE is the input length modulo 2^32.
    output.write_u32::<LittleEndian>(plaintext.len() as u32)?;

    log::debug!(
        "wrapped {} bytes into {} byte gzip member",
        plaintext.len(),
        output.len()
    );

    Ok(output)
}

/// Decompress a gzip member.
///
/// The decoder verifies the member's CRC32 and length trailer.
pub fn unwrap(member: &[u8]) -> Result<Vec<u8>> {
    if let Some((checksum, size)) = read_trailer(member) {
        log::debug!("gzip trailer: crc32 {:#010x}, isize {}", checksum, size);
    }

    let mut decoder = GzDecoder::new(member);
    let mut output = Vec::new();
    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::corrupt(Stage::Gzip, e))?;

    Ok(output)
}

/// Read the `(crc32, isize)` trailer of a gzip member.
pub fn read_trailer(member: &[u8]) -> Option<(u32, u32)> {
    if member.len() < GZIP_HEADER.len() + TRAILER_LEN {
        return None;
    }

    let trailer = &member[member.len() - TRAILER_LEN..];
    Some((
        LittleEndian::read_u32(&trailer[..4]),
        LittleEndian::read_u32(&trailer[4..]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        let member = wrap(b"<?xml version=\"1.0\"?>").unwrap();
        assert_eq!(
            &member[..10],
            &[0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0B]
        );
    }

    #[test]
    fn test_trailer_matches_plaintext() {
        let plaintext = b"Hello, World! This is a test of the gzip envelope.";
        let member = wrap(plaintext).unwrap();

        let trailer = &member[member.len() - 8..];
        assert_eq!(&trailer[..4], &crc::hash_bytes(plaintext).to_le_bytes());
        assert_eq!(&trailer[4..], &(plaintext.len() as u32).to_le_bytes());
        assert_eq!(
            read_trailer(&member),
            Some((crc::hash_bytes(plaintext), plaintext.len() as u32))
        );
    }

    #[test]
    fn test_roundtrip() {
        let plaintext = "<k>valueKeeper</k><d><k>gv_0001</k><s>1</s></d>".repeat(50);
        let member = wrap(plaintext.as_bytes()).unwrap();
        assert_eq!(unwrap(&member).unwrap(), plaintext.as_bytes());
    }

    #[test]
    fn test_empty_roundtrip() {
        let member = wrap(b"").unwrap();
        assert_eq!(read_trailer(&member), Some((0, 0)));
        assert!(unwrap(&member).unwrap().is_empty());
    }

    #[test]
    fn test_standard_gzip_accepted() {
        use flate2::write::GzEncoder;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(b"standard member").unwrap();
        let member = encoder.finish().unwrap();

        assert_eq!(unwrap(&member).unwrap(), b"standard member");
    }

    #[test]
    fn test_corrupt_member() {
        let result = unwrap(b"definitely not gzip");
        assert!(matches!(
            result,
            Err(Error::Corrupt {
                stage: Stage::Gzip,
                ..
            })
        ));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let mut member = wrap(b"checksummed payload").unwrap();
        let crc_offset = member.len() - 8;
        member[crc_offset] ^= 0xFF;
        assert!(unwrap(&member).is_err());
    }
}
