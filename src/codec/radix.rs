// In: src/codec/radix.rs

//! This module contains the pure, stateless kernels for transporting byte
//! payloads through an arbitrary symbol alphabet.
//!
//! A payload is framed with a 4-byte big-endian length header, the frame is
//! read as one arbitrary-precision unsigned integer, and that integer is
//! rewritten in base R where R is the alphabet size. Base conversion of an
//! integer is lossless except for leading-zero digits; the length header is
//! what makes the byte mapping exact and self-describing.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::codec::alphabet::Alphabet;
use crate::error::BasepackError;

/// Width of the big-endian payload-length header prepended to every frame.
pub const LENGTH_HEADER_BYTES: usize = 4;

/// A stateless-per-call codec bound to one immutable alphabet.
#[derive(Debug, Clone)]
pub struct RadixCodec {
    alphabet: Alphabet,
}

impl RadixCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    //==============================================================================
    // 1. Encoding
    //==============================================================================

    /// Encodes `payload` into a string of alphabet symbols, most-significant
    /// symbol first, with no redundant leading zero symbols.
    ///
    /// Never fails: every byte sequence has a frame, and every non-negative
    /// integer has a base-R representation. The empty payload produces the
    /// all-zero frame, which encodes as exactly one zero symbol.
    pub fn encode(&self, payload: &[u8]) -> String {
        debug_assert!(
            payload.len() <= u32::MAX as usize,
            "payload length must fit the 4-byte header"
        );

        let mut frame = Vec::with_capacity(LENGTH_HEADER_BYTES + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(payload);

        let mut value = BigUint::from_bytes_be(&frame);
        if value.is_zero() {
            return self.alphabet.symbol_at(0).to_string();
        }

        let radix = self.alphabet.radix();
        let mut digits = Vec::new();
        while !value.is_zero() {
            // The remainder is < radix, so the u32 conversion cannot fail.
            let digit = (&value % radix).to_u32().unwrap_or(0);
            digits.push(self.alphabet.symbol_at(digit));
            value /= radix;
        }

        // Digits were produced least-significant first.
        digits.iter().rev().collect()
    }

    //==============================================================================
    // 2. Decoding
    //==============================================================================

    /// Decodes a symbol string back into the exact original payload bytes.
    ///
    /// Fails with `InvalidSymbol` for an empty input or any symbol outside
    /// the alphabet, `InvalidLengthPrefix` for a zero-length header with
    /// trailing content, and `TruncatedPayload` when the header declares more
    /// bytes than the frame carries.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, BasepackError> {
        if encoded.is_empty() {
            return Err(BasepackError::InvalidSymbol(
                "encoded input is empty".to_string(),
            ));
        }

        let radix = self.alphabet.radix();
        let mut value = BigUint::zero();
        for symbol in encoded.chars() {
            let digit = self.alphabet.index_of(symbol).ok_or_else(|| {
                BasepackError::InvalidSymbol(format!("symbol {:?} is not in the alphabet", symbol))
            })?;
            // Horner fold: reconstructs the integer exactly regardless of how
            // many leading zero symbols were present.
            value = value * radix + digit;
        }

        // Minimal big-endian byte extraction. Leading zero bytes of the frame
        // carry no integer information, so they are restored by left-padding
        // up to the fixed header width.
        let minimal = if value.is_zero() {
            Vec::new()
        } else {
            value.to_bytes_be()
        };
        let mut frame = minimal;
        if frame.len() < LENGTH_HEADER_BYTES {
            let mut padded = vec![0u8; LENGTH_HEADER_BYTES - frame.len()];
            padded.extend_from_slice(&frame);
            frame = padded;
        }

        let declared = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
        let candidate = &frame[LENGTH_HEADER_BYTES..];

        // A zero header is the degenerate empty-payload frame; anything
        // trailing it signals a corrupted stream.
        if declared == 0 && !candidate.is_empty() {
            return Err(BasepackError::InvalidLengthPrefix(format!(
                "zero-length header followed by {} payload bytes",
                candidate.len()
            )));
        }
        if candidate.len() < declared {
            return Err(BasepackError::TruncatedPayload {
                declared,
                available: candidate.len(),
            });
        }

        Ok(candidate[..declared].to_vec())
    }

    //==============================================================================
    // 3. Size Estimation
    //==============================================================================

    /// Non-binding upper-bound estimate of the encoded length for a payload of
    /// `payload_len` bytes. Used for planning only, never for correctness.
    pub fn estimate_encoded_len(&self, payload_len: usize) -> usize {
        let frame_bits = (payload_len + LENGTH_HEADER_BYTES) as f64 * 8.0;
        (frame_bits / (self.alphabet.radix() as f64).log2()).ceil() as usize
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn hex_codec() -> RadixCodec {
        RadixCodec::new(Alphabet::new("0123456789abcdef").unwrap())
    }

    fn assert_roundtrip(codec: &RadixCodec, payload: &[u8]) {
        let encoded = codec.encode(payload);
        let decoded = codec.decode(&encoded).unwrap();
        assert_eq!(
            decoded, payload,
            "roundtrip mismatch for {}-byte payload via radix {}",
            payload.len(),
            codec.alphabet().radix()
        );
    }

    #[test]
    fn test_hex_roundtrip_exact_bytes() {
        let codec = hex_codec();
        let payload = [0x00u8, 0x01, 0xFF];
        let encoded = codec.encode(&payload);
        assert_eq!(codec.decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let codec = hex_codec();
        let encoded = codec.encode(&[]);
        // The all-zero frame is exactly one zero symbol.
        assert_eq!(encoded, "0");
        assert_eq!(codec.decode(&encoded).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_across_radices() {
        let alphabets = [
            "01",
            "0123456789",
            "0123456789abcdef",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
            "αβγδεζηθ",
        ];
        let payloads: [&[u8]; 5] = [
            b"",
            b"a",
            b"Hello, World!",
            &[0xDE, 0xAD, 0xBE, 0xEF],
            &[0u8; 32],
        ];
        for symbols in alphabets {
            let codec = RadixCodec::new(Alphabet::new(symbols).unwrap());
            for payload in payloads {
                assert_roundtrip(&codec, payload);
            }
        }
    }

    #[test]
    fn test_roundtrip_random_payloads() {
        let codec = hex_codec();
        let base64ish = RadixCodec::new(
            Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_")
                .unwrap(),
        );
        let mut rng = rand::rng();
        for _ in 0..50 {
            let len = rng.random_range(0..512);
            let payload: Vec<u8> = (0..len).map(|_| rng.random()).collect();
            assert_roundtrip(&codec, &payload);
            assert_roundtrip(&base64ish, &payload);
        }
    }

    /// Payloads that start with zero bytes are the risky case for the
    /// padding-based header recovery: the run of leading zeros must be
    /// attributed to the header, never to the payload.
    #[test]
    fn test_zero_prefixed_payload_roundtrip() {
        let codec = hex_codec();
        for zeros in 1..40 {
            let all_zero = vec![0u8; zeros];
            assert_roundtrip(&codec, &all_zero);

            let mut zero_then_one = vec![0u8; zeros];
            zero_then_one.push(1);
            assert_roundtrip(&codec, &zero_then_one);
        }
    }

    /// A 256-byte payload puts a zero byte at the tail of the length header
    /// ([0, 0, 1, 0]), directly adjacent to any leading payload zeros.
    #[test]
    fn test_header_with_trailing_zero_byte() {
        let codec = hex_codec();
        let mut payload = vec![0u8; 256];
        payload[255] = 7;
        assert_roundtrip(&codec, &payload);
        assert_roundtrip(&codec, &vec![0u8; 256]);
    }

    #[test]
    fn test_encode_is_minimal() {
        let codec = hex_codec();
        let zero_symbol = codec.alphabet().symbol_at(0);
        let payloads: [&[u8]; 4] = [b"x", b"basepack", &[0x00, 0x00], &[0xFF; 16]];
        for payload in payloads {
            let encoded = codec.encode(payload);
            // The most-significant digit of a nonzero integer is never zero.
            assert_ne!(encoded.chars().next().unwrap(), zero_symbol);
        }
    }

    #[test]
    fn test_decode_rejects_foreign_symbol() {
        let codec = RadixCodec::new(Alphabet::new("0123456789").unwrap());
        let result = codec.decode("12x45");
        assert!(matches!(result, Err(BasepackError::InvalidSymbol(_))));
        if let Err(e) = result {
            assert!(e.to_string().contains("'x'"));
        }
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        let codec = hex_codec();
        assert!(matches!(
            codec.decode(""),
            Err(BasepackError::InvalidSymbol(_))
        ));
    }

    /// Builds the encoded form of an arbitrary (possibly malformed) frame so
    /// decode-side framing checks can be exercised directly.
    fn encode_raw_frame(codec: &RadixCodec, frame: &[u8]) -> String {
        let mut value = BigUint::from_bytes_be(frame);
        if value.is_zero() {
            return codec.alphabet().symbol_at(0).to_string();
        }
        let radix = codec.alphabet().radix();
        let mut digits = Vec::new();
        while !value.is_zero() {
            let digit = (&value % radix).to_u32().unwrap();
            digits.push(codec.alphabet().symbol_at(digit));
            value /= radix;
        }
        digits.iter().rev().collect()
    }

    #[test]
    fn test_decode_rejects_truncated_frame() {
        let codec = hex_codec();
        // Header declares 5 payload bytes, frame carries 2.
        let corrupt = encode_raw_frame(&codec, &[0, 0, 0, 5, 0xAA, 0xBB]);
        let result = codec.decode(&corrupt);
        assert!(matches!(
            result,
            Err(BasepackError::TruncatedPayload {
                declared: 5,
                available: 2
            })
        ));
    }

    #[test]
    fn test_decode_discards_trailing_bytes() {
        let codec = hex_codec();
        // Header declares 2 payload bytes, frame carries 4; the trailing two
        // are irrelevant and dropped.
        let frame = [0, 0, 0, 2, 0x11, 0x22, 0x33, 0x44];
        let encoded = encode_raw_frame(&codec, &frame);
        assert_eq!(codec.decode(&encoded).unwrap(), vec![0x11, 0x22]);
    }

    #[test]
    fn test_decode_tolerates_redundant_leading_zero_symbols() {
        let codec = hex_codec();
        let payload = b"leading zeros are digit-level, not byte-level";
        let encoded = codec.encode(payload);
        let padded = format!("000{}", encoded);
        assert_eq!(codec.decode(&padded).unwrap(), payload.to_vec());
    }

    #[test]
    fn test_estimate_is_upper_bound() {
        for symbols in ["01", "0123456789abcdef", "αβγδεζηθ"] {
            let codec = RadixCodec::new(Alphabet::new(symbols).unwrap());
            for len in [0usize, 1, 3, 17, 256, 1024] {
                let payload: Vec<u8> = (0..len).map(|i| (i % 255) as u8 ^ 0x5A).collect();
                let actual = codec.encode(&payload).chars().count();
                assert!(
                    actual <= codec.estimate_encoded_len(len),
                    "estimate must bound the real length (radix {}, payload {})",
                    codec.alphabet().radix(),
                    len
                );
            }
        }
    }
}
