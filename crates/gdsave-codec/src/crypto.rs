//! Save decryption using AES-256-ECB.
//!
//! The macOS client stores saves as raw AES-256-ECB ciphertext with PKCS#7
//! padding and a key compiled into the game binary. ECB with a static key is
//! weak, but the format is fixed by the client.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};

use crate::error::Stage;
use crate::{Error, Result};

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// The AES-256 key used for macOS save files.
///
/// This is hardcoded in the game client and is not a secret.
const SAVE_AES_KEY: &[u8; 32] = b"ipu9TUv54yv]isFMh5@;t.5w34E2Ry@{";

/// Encrypt plaintext with the save key, applying PKCS#7 padding.
pub fn encrypt(plaintext: &[u8]) -> Vec<u8> {
    encrypt_with_key(SAVE_AES_KEY, plaintext)
}

/// Decrypt ciphertext with the save key and strip PKCS#7 padding.
pub fn decrypt(data: &[u8]) -> Result<Vec<u8>> {
    decrypt_with_key(SAVE_AES_KEY, data)
}

fn encrypt_with_key(key: &[u8; 32], plaintext: &[u8]) -> Vec<u8> {
    let key = GenericArray::from_slice(key);
    Aes256EcbEnc::new(key).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

fn decrypt_with_key(key: &[u8; 32], data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(Error::corrupt(
            Stage::BlockCipher,
            format!(
                "ciphertext length {} is not a positive multiple of {}",
                data.len(),
                BLOCK_SIZE
            ),
        ));
    }

    let key = GenericArray::from_slice(key);
    Aes256EcbDec::new(key)
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| Error::corrupt(Stage::BlockCipher, "invalid PKCS#7 padding"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // NIST SP 800-38A F.1.5, ECB-AES256.Encrypt, block #1.
    const NIST_KEY: [u8; 32] = [
        0x60, 0x3D, 0xEB, 0x10, 0x15, 0xCA, 0x71, 0xBE, 0x2B, 0x73, 0xAE, 0xF0, 0x85, 0x7D, 0x77, 0x81,
        0x1F, 0x35, 0x2C, 0x07, 0x3B, 0x61, 0x08, 0xD7, 0x2D, 0x98, 0x10, 0xA3, 0x09, 0x14, 0xDF, 0xF4,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x6B, 0xC1, 0xBE, 0xE2, 0x2E, 0x40, 0x9F, 0x96, 0xE9, 0x3D, 0x7E, 0x11, 0x73, 0x93, 0x17, 0x2A,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0xF3, 0xEE, 0xD1, 0xBD, 0xB5, 0xD2, 0xA0, 0x3C, 0x06, 0x4B, 0x5A, 0x7E, 0x3D, 0xB1, 0x81, 0xF8,
    ];

    #[test]
    fn test_known_vector() {
        let ciphertext = encrypt_with_key(&NIST_KEY, &NIST_PLAIN);
        // A full block of PKCS#7 padding follows the aligned input.
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(&ciphertext[..16], &NIST_CIPHER);
        assert_eq!(decrypt_with_key(&NIST_KEY, &ciphertext).unwrap(), NIST_PLAIN);
    }

    #[test]
    fn test_roundtrip() {
        let plaintext = b"<?xml version='1.0' encoding='UTF-8' standalone='yes'?><plist/>";
        let ciphertext = encrypt(plaintext);
        assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
        assert_eq!(decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_decrypt_invalid_length() {
        assert!(decrypt(&[0u8; 15]).is_err());
        assert!(decrypt(&[]).is_err());
    }

    #[test]
    fn test_decrypt_bad_padding() {
        use aes::cipher::block_padding::NoPadding;

        // A zero final byte is never valid PKCS#7 padding.
        let key = GenericArray::from_slice(SAVE_AES_KEY);
        let ciphertext = Aes256EcbEnc::new(key).encrypt_padded_vec_mut::<NoPadding>(&[0u8; 16]);
        assert!(matches!(
            decrypt(&ciphertext),
            Err(Error::Corrupt {
                stage: Stage::BlockCipher,
                ..
            })
        ));
    }
}
