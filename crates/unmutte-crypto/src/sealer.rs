use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::encrypt::{decrypt, encrypt};

const PLACEHOLDER_PREFIX: &str = "enc::";

/// Sealed message content as stored. `nonce` is only set by real ciphers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: String,
    pub nonce: Option<String>,
}

/// Transforms chat text before it reaches the store.
pub trait Sealer: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<Sealed>;

    fn open(&self, sealed: &Sealed) -> Result<String>;

    /// Short name for startup logs.
    fn kind(&self) -> &'static str;
}

/// `enc::` followed by the text reversed. Trivially reversible; it only keeps
/// plaintext from being stored verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReversePlaceholder;

impl Sealer for ReversePlaceholder {
    fn seal(&self, plaintext: &str) -> Result<Sealed> {
        let reversed: String = plaintext.chars().rev().collect();
        Ok(Sealed {
            ciphertext: format!("{PLACEHOLDER_PREFIX}{reversed}"),
            nonce: None,
        })
    }

    fn open(&self, sealed: &Sealed) -> Result<String> {
        let body = sealed
            .ciphertext
            .strip_prefix(PLACEHOLDER_PREFIX)
            .ok_or_else(|| anyhow!("Missing {} prefix", PLACEHOLDER_PREFIX))?;
        Ok(body.chars().rev().collect())
    }

    fn kind(&self) -> &'static str {
        "reverse-placeholder"
    }
}

/// AES-256-GCM with one server-held key. Ciphertext and nonce are base64.
pub struct AesGcmSealer {
    key: [u8; 32],
}

impl AesGcmSealer {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }
}

impl Sealer for AesGcmSealer {
    fn seal(&self, plaintext: &str) -> Result<Sealed> {
        let (ciphertext, nonce) = encrypt(&self.key, plaintext.as_bytes())?;
        Ok(Sealed {
            ciphertext: BASE64.encode(ciphertext),
            nonce: Some(BASE64.encode(nonce)),
        })
    }

    fn open(&self, sealed: &Sealed) -> Result<String> {
        let nonce = sealed
            .nonce
            .as_deref()
            .ok_or_else(|| anyhow!("Sealed message has no nonce"))?;
        let ciphertext = BASE64.decode(&sealed.ciphertext)?;
        let nonce = BASE64.decode(nonce)?;

        let plaintext = decrypt(&self.key, &ciphertext, &nonce)?;
        Ok(String::from_utf8(plaintext)?)
    }

    fn kind(&self) -> &'static str {
        "aes-256-gcm"
    }
}
