//! Webhook signature verification
//!
//! The platform signs every delivery with base64(HMAC-SHA256(channel secret,
//! raw body)) in the `X-Line-Signature` header.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use crate::utils::errors::{GroupGuardError, Result};

pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

fn mac_for(channel_secret: &str, body: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|_| GroupGuardError::InvalidSignature)?;
    mac.update(body);
    Ok(mac)
}

/// Signature the platform would send for this body
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String> {
    let mac = mac_for(channel_secret, body)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a delivery's signature header against the raw body
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> Result<()> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|_| GroupGuardError::InvalidSignature)?;

    mac_for(channel_secret, body)?
        .verify_slice(&expected)
        .map_err(|_| GroupGuardError::InvalidSignature)
}
