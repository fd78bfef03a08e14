use anyhow::{Context, bail};
use openssl::symm::{Cipher, decrypt_aead, encrypt_aead};

/// AES-256 key size in bytes.
const KEY_SIZE: usize = 32;
/// AES-256-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-256-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Handles encryption/decryption of user secret values using AES-256-GCM. Ciphertext layout is
/// `nonce || ciphertext || tag`, a fresh random nonce is used for every value.
#[derive(Clone)]
pub struct SecretsEncryption {
    key: [u8; KEY_SIZE],
}

impl SecretsEncryption {
    /// Creates a new instance from a hex-encoded 32-byte key.
    pub fn new(hex_key: &str) -> anyhow::Result<Self> {
        let key =
            hex::decode(hex_key).with_context(|| "Secrets encryption key is not valid hex.")?;
        let Ok(key) = <[u8; KEY_SIZE]>::try_from(key.as_slice()) else {
            bail!(
                "Secrets encryption key must be {KEY_SIZE} bytes (256 bits), got {} bytes.",
                key.len()
            );
        };

        Ok(Self { key })
    }

    /// Encrypts plaintext with a random nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_SIZE];
        openssl::rand::rand_bytes(&mut nonce)
            .with_context(|| "Failed to generate random nonce.")?;

        let mut tag = [0u8; TAG_SIZE];
        let ciphertext = encrypt_aead(
            Cipher::aes_256_gcm(),
            &self.key,
            Some(&nonce),
            &[],
            plaintext,
            &mut tag,
        )
        .with_context(|| "Failed to encrypt secret value.")?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);

        Ok(output)
    }

    /// Decrypts data previously produced by [`SecretsEncryption::encrypt`]. Fails if the data was
    /// tampered with or was encrypted with a different key.
    pub fn decrypt(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        if data.len() < NONCE_SIZE + TAG_SIZE {
            bail!("Encrypted data is too short to contain nonce and tag.");
        }

        let (nonce, rest) = data.split_at(NONCE_SIZE);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_SIZE);

        decrypt_aead(
            Cipher::aes_256_gcm(),
            &self.key,
            Some(nonce),
            &[],
            ciphertext,
            tag,
        )
        .with_context(|| "Encrypted data failed integrity check.")
    }
}
