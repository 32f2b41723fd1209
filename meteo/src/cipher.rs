//! Symmetric envelope transform.
//!
//! The wire protocol encrypts every credential and payload with AES-128 under
//! a single process-wide key, base64-encodes the ciphertext and prepends a
//! fixed prefix. ECB with PKCS#7 padding and no IV is what the server speaks:
//! the same plaintext always produces the same envelope. That is a known-weak
//! scheme kept for wire compatibility; it is isolated behind this module so a
//! future keyed or IV-carrying scheme can replace it without touching callers.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::GatewayError;

/// Marker prepended to every envelope. Any string lacking it is never treated
/// as ciphertext.
pub const ENVELOPE_PREFIX: &str = "ENC_";

// Static 16-byte key shared with the server. Not rotated, not per-session.
const SECRET_KEY: &[u8; 16] = b"MeteoEventsSecrt";

type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;
type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;

/// Encrypt a UTF-8 string into a prefixed base64 envelope.
pub fn encrypt(plaintext: &str) -> Result<String, GatewayError> {
    let enc = Aes128EcbEnc::new_from_slice(SECRET_KEY)
        .map_err(|e| GatewayError::Cipher(format!("cipher init failed: {}", e)))?;
    let ciphertext = enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(format!("{}{}", ENVELOPE_PREFIX, BASE64.encode(ciphertext)))
}

/// Decrypt a prefixed base64 envelope back into the original string.
///
/// Prefix and alphabet violations are `Format` errors; anything that fails
/// inside the cipher (corrupted ciphertext, bad padding, non-UTF-8 plaintext)
/// is a `Cipher` error. Both are local and cost no network round trip.
pub fn decrypt(envelope: &str) -> Result<String, GatewayError> {
    let encoded = envelope.strip_prefix(ENVELOPE_PREFIX).ok_or_else(|| {
        GatewayError::Format(format!(
            "input does not start with the {} envelope prefix",
            ENVELOPE_PREFIX
        ))
    })?;

    // The server has been observed emitting stray diagnostics in place of an
    // envelope; reject anything outside the base64 alphabet before decoding.
    if !encoded
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
    {
        return Err(GatewayError::Format(
            "envelope payload contains characters outside the base64 alphabet".to_string(),
        ));
    }

    let ciphertext = BASE64
        .decode(encoded)
        .map_err(|e| GatewayError::Format(format!("invalid base64 payload: {}", e)))?;

    let dec = Aes128EcbDec::new_from_slice(SECRET_KEY)
        .map_err(|e| GatewayError::Cipher(format!("cipher init failed: {}", e)))?;
    let plaintext = dec
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| {
            GatewayError::Cipher("decryption failed: corrupted ciphertext or bad padding".to_string())
        })?;

    String::from_utf8(plaintext)
        .map_err(|_| GatewayError::Cipher("decrypted payload is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_strings() {
        for s in ["admin", "", "contrasenya|2024-12-31T10:00:00Z", "çàé ☔ 風", "{\"a\":1}"] {
            let envelope = encrypt(s).unwrap();
            assert!(envelope.starts_with(ENVELOPE_PREFIX));
            assert_eq!(decrypt(&envelope).unwrap(), s);
        }
    }

    #[test]
    fn encryption_is_deterministic() {
        assert_eq!(encrypt("admin").unwrap(), encrypt("admin").unwrap());
    }

    // Cross-checked against an independent AES-128-ECB/PKCS#7 implementation,
    // so an accidental change of mode, padding or alphabet fails loudly.
    #[test]
    fn matches_known_envelopes() {
        assert_eq!(encrypt("admin").unwrap(), "ENC_K8QoGZ4r1e5bNGqoVbivzg==");
        assert_eq!(encrypt("").unwrap(), "ENC_4R7i4mJiQusKRiBm0buTWA==");
        assert_eq!(encrypt("MeteoEvents").unwrap(), "ENC_kN9GZoIEpEvIDXGqcL/7PA==");
        assert_eq!(
            decrypt("ENC_g32+miVoz1WZAVkZbsXhBXwPibmWBP5V/pUN9nlXI5M=").unwrap(),
            "admin24|2024-12-31T10:00:00Z"
        );
    }

    #[test]
    fn rejects_missing_prefix() {
        for s in ["", "K8QoGZ4r1e5bNGqoVbivzg==", "enc_K8QoGZ4r1e5bNGqoVbivzg==", "plaintext"] {
            assert!(matches!(decrypt(s), Err(GatewayError::Format(_))), "{:?}", s);
        }
    }

    #[test]
    fn rejects_non_base64_remainder() {
        assert!(matches!(decrypt("ENC_not base64!"), Err(GatewayError::Format(_))));
        assert!(matches!(decrypt("ENC_%%%%"), Err(GatewayError::Format(_))));
    }

    #[test]
    fn rejects_corrupted_ciphertext() {
        // Valid base64, but not a block-aligned AES ciphertext.
        assert!(matches!(decrypt("ENC_QUJD"), Err(GatewayError::Cipher(_))));
        // Block-aligned garbage fails unpadding.
        let garbage = format!("ENC_{}", BASE64.encode([0u8; 16]));
        assert!(matches!(decrypt(&garbage), Err(GatewayError::Cipher(_))));
    }
}
