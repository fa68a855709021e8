//! Payload codec: raw upload bytes to the opaque stored text and back.
//!
//! Storage uses plain base64. Decoding also accepts data-URL style input
//! (`data:application/pdf;base64,...`) since older collections carried the
//! prefix through from the browser.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dossier_core::models::Payload;
use dossier_core::AppError;

pub fn encode(bytes: &[u8]) -> Payload {
    Payload::new(STANDARD.encode(bytes))
}

pub fn decode(payload: &Payload) -> Result<Vec<u8>, AppError> {
    if payload.is_empty() {
        return Err(AppError::Payload("Stored payload is empty".to_string()));
    }
    let encoded = payload.as_str();
    let encoded = match encoded.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    STANDARD
        .decode(encoded)
        .map_err(|e| AppError::Payload(format!("Failed to decode stored payload: {}", e)))
}

/// Size in kilobytes with two-decimal precision, as shown in listings.
pub fn size_kb(bytes: &[u8]) -> f64 {
    (bytes.len() as f64 / 1024.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let data = b"%PDF-1.4 minimal";
        let payload = encode(data);
        assert_eq!(decode(&payload).unwrap(), data);
    }

    #[test]
    fn test_decode_accepts_data_url_prefix() {
        let payload = Payload::new(format!(
            "data:application/pdf;base64,{}",
            STANDARD.encode(b"hello")
        ));
        assert_eq!(decode(&payload).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let payload = Payload::new("!!not-base64!!");
        assert!(matches!(decode(&payload), Err(AppError::Payload(_))));
    }

    #[test]
    fn test_decode_rejects_empty() {
        let payload = Payload::new("");
        assert!(matches!(decode(&payload), Err(AppError::Payload(_))));
    }

    #[test]
    fn test_size_kb_two_decimals() {
        assert_eq!(size_kb(&[0u8; 1024]), 1.0);
        assert_eq!(size_kb(&[0u8; 1536]), 1.5);
        assert_eq!(size_kb(&[0u8; 10]), 0.01);
    }
}
