//! Credential encryption for widget secrets.
//!
//! AES-256-GCM with a PBKDF2-SHA256 key derived from the instance master
//! key. The salt, nonce and ciphertext are packed into one base64 string so
//! a stored credential stays a single opaque config value.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use sha2::Sha256;

use homedeck_types::SecretKind;

use crate::forms::SecretCipher;

const PBKDF2_ITERATIONS: u32 = 600_000;
const SALT_LENGTH: usize = 16;
const NONCE_LENGTH: usize = 12;
const KEY_LENGTH: usize = 32; // AES-256

/// Cipher bound to one master key.
pub struct AesGcmCipher {
    master_key: String,
}

impl AesGcmCipher {
    pub fn new(master_key: impl Into<String>) -> Self {
        Self {
            master_key: master_key.into(),
        }
    }

    fn derive_key(&self, salt: &[u8]) -> [u8; KEY_LENGTH] {
        pbkdf2_hmac_array::<Sha256, KEY_LENGTH>(
            self.master_key.as_bytes(),
            salt,
            PBKDF2_ITERATIONS,
        )
    }

    /// Encrypt a plaintext credential into `base64(salt || nonce || ciphertext)`.
    pub fn encrypt_value(&self, plaintext: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LENGTH];
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::rng().fill_bytes(&mut salt);
        rand::rng().fill_bytes(&mut nonce_bytes);

        let key = self.derive_key(&salt);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| anyhow!("Failed to create cipher: {e}"))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| anyhow!("Encryption failed: {e}"))?;

        let mut packed = Vec::with_capacity(SALT_LENGTH + NONCE_LENGTH + ciphertext.len());
        packed.extend_from_slice(&salt);
        packed.extend_from_slice(&nonce_bytes);
        packed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(packed))
    }

    /// Decrypt a value produced by [`AesGcmCipher::encrypt_value`].
    pub fn decrypt_value(&self, packed_b64: &str) -> Result<String> {
        let packed = BASE64
            .decode(packed_b64)
            .map_err(|e| anyhow!("Invalid ciphertext: {e}"))?;
        if packed.len() < SALT_LENGTH + NONCE_LENGTH {
            bail!("Ciphertext too short");
        }
        let (salt, rest) = packed.split_at(SALT_LENGTH);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LENGTH);

        let key = self.derive_key(salt);
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| anyhow!("Failed to create cipher: {e}"))?;
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| anyhow!("Decryption failed: wrong key or corrupted data"))?;
        String::from_utf8(plaintext).map_err(|e| anyhow!("Decrypted data is not UTF-8: {e}"))
    }
}

impl SecretCipher for AesGcmCipher {
    fn encrypt(&self, kind: SecretKind, plaintext: &str) -> Result<String> {
        self.encrypt_value(plaintext)
            .with_context(|| format!("encrypting {}", kind.id()))
    }
}
