//! Encryption keyring for prepared filing packages.
//!
//! Prepared PDFs are stored AES-256-GCM encrypted; each row names the key
//! that decrypts it via `key_id`, so the keyring holds several keys and key
//! rotation never requires re-encrypting old rows. The keyring is injected
//! explicitly wherever decryption is needed.

use std::collections::HashMap;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};

use crate::AppError;

const NONCE_LEN: usize = 12;

/// Named AES-256-GCM keys. Output layout is nonce || ciphertext.
#[derive(Clone)]
pub struct Keyring {
    keys: HashMap<String, Aes256Gcm>,
}

impl Keyring {
    /// Build a keyring from raw 32-byte keys.
    pub fn from_key_bytes<I, S>(entries: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        let mut keys = HashMap::new();
        for (key_id, key_bytes) in entries {
            if key_bytes.len() != 32 {
                return Err(AppError::Internal(
                    "Encryption key must be 32 bytes (256 bits)".to_string(),
                ));
            }
            let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
            keys.insert(key_id.into(), Aes256Gcm::new(key));
        }
        if keys.is_empty() {
            return Err(AppError::Internal(
                "Encryption keyring must hold at least one key".to_string(),
            ));
        }
        Ok(Self { keys })
    }

    /// Parse a keyring spec of the form `keyId=base64Key[,keyId=base64Key...]`,
    /// each key base64-encoding 32 bytes.
    pub fn from_spec(spec: &str) -> Result<Self, AppError> {
        let mut entries = Vec::new();
        for part in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key_id, encoded) = part.split_once('=').ok_or_else(|| {
                AppError::Internal(format!(
                    "Invalid keyring entry (expected keyId=base64Key): {}",
                    part
                ))
            })?;
            let key_bytes = general_purpose::STANDARD.decode(encoded.trim()).map_err(|e| {
                AppError::Internal(format!("Failed to decode encryption key {}: {}", key_id, e))
            })?;
            entries.push((key_id.trim().to_string(), key_bytes));
        }
        Self::from_key_bytes(entries)
    }

    fn cipher(&self, key_id: &str) -> Result<&Aes256Gcm, AppError> {
        self.keys
            .get(key_id)
            .ok_or_else(|| AppError::Decryption(format!("Unknown encryption key: {}", key_id)))
    }

    /// Encrypt a binary payload under the named key.
    pub fn encrypt(&self, key_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, AppError> {
        let cipher = self.cipher(key_id)?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::Internal(format!("Encryption failed: {}", e)))?;

        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        Ok(combined)
    }

    /// Decrypt a nonce-prefixed payload under the named key.
    pub fn decrypt(&self, key_id: &str, data: &[u8]) -> Result<Vec<u8>, AppError> {
        let cipher = self.cipher(key_id)?;
        if data.len() < NONCE_LEN {
            return Err(AppError::Decryption("Encrypted data too short".to_string()));
        }

        let nonce = Nonce::from_slice(&data[..NONCE_LEN]);
        let ciphertext = &data[NONCE_LEN..];

        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| AppError::Decryption(format!("Decryption failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keyring() -> Keyring {
        let key = b"01234567890123456789012345678901".to_vec();
        Keyring::from_key_bytes(vec![("default", key)]).unwrap()
    }

    #[test]
    fn test_encryption_decryption_roundtrip() {
        let keyring = test_keyring();
        let plaintext = b"%PDF-1.7 protection order";

        let encrypted = keyring.encrypt("default", plaintext).unwrap();
        assert_ne!(&encrypted[NONCE_LEN..], plaintext.as_slice());

        let decrypted = keyring.decrypt("default", &encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_unknown_key_id() {
        let keyring = test_keyring();
        let encrypted = keyring.encrypt("default", b"data").unwrap();
        assert!(matches!(
            keyring.decrypt("rotated-2024", &encrypted),
            Err(AppError::Decryption(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let keyring = test_keyring();
        let mut encrypted = keyring.encrypt("default", b"data").unwrap();
        let last = encrypted.len() - 1;
        encrypted[last] ^= 0xff;
        assert!(matches!(
            keyring.decrypt("default", &encrypted),
            Err(AppError::Decryption(_))
        ));
    }

    #[test]
    fn test_from_spec() {
        let key = general_purpose::STANDARD.encode(b"01234567890123456789012345678901");
        let spec = format!("default={}, archive-2023={}", key, key);
        let keyring = Keyring::from_spec(&spec).unwrap();

        let encrypted = keyring.encrypt("archive-2023", b"data").unwrap();
        assert_eq!(keyring.decrypt("archive-2023", &encrypted).unwrap(), b"data");
    }

    #[test]
    fn test_from_spec_rejects_bad_entries() {
        assert!(Keyring::from_spec("no-equals-sign").is_err());
        assert!(Keyring::from_spec("default=not!base64!").is_err());
        // 16-byte key is too short for AES-256
        let short = general_purpose::STANDARD.encode(b"0123456789012345");
        assert!(Keyring::from_spec(&format!("default={}", short)).is_err());
    }
}
