//! HMAC-SHA256 request signing

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a canonical message
///
/// Computes HMAC-SHA256 over the UTF-8 bytes of `message` keyed with
/// `secret`, and returns the digest as uppercase hexadecimal. The exchange
/// recomputes the same value server-side, so the output format is part of
/// the wire contract.
pub fn sign(secret: &[u8], message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}
