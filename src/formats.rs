// In: src/formats.rs

//! Defines the static raster-format catalog and its byte signatures.
//! This is the single source of truth for which formats the search may
//! re-encode into and for the signature data the surrounding application's
//! sniffing routine consumes. The search itself treats format identifiers as
//! opaque tokens; only the `recompressible` flag is consulted, as a static
//! filter.

/// One catalog entry: a MIME-style identifier, an optional byte signature at
/// a fixed offset, and whether the format is structurally suited to lossy
/// re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub mime: &'static str,
    pub signature: Option<&'static [u8]>,
    pub signature_offset: usize,
    pub recompressible: bool,
}

/// The supported format catalog. GIF (animation container) and SVG (vector)
/// are flagged as unsuited to quality/scale re-encoding.
pub const CATALOG: &[FormatDescriptor] = &[
    FormatDescriptor {
        mime: "image/png",
        signature: Some(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        signature_offset: 0,
        recompressible: true,
    },
    FormatDescriptor {
        mime: "image/jpeg",
        signature: Some(&[0xFF, 0xD8, 0xFF]),
        signature_offset: 0,
        recompressible: true,
    },
    FormatDescriptor {
        mime: "image/webp",
        signature: Some(b"WEBP"),
        signature_offset: 8,
        recompressible: true,
    },
    FormatDescriptor {
        mime: "image/bmp",
        signature: Some(b"BM"),
        signature_offset: 0,
        recompressible: true,
    },
    FormatDescriptor {
        mime: "image/gif",
        signature: Some(b"GIF8"),
        signature_offset: 0,
        recompressible: false,
    },
    FormatDescriptor {
        mime: "image/svg+xml",
        signature: None,
        signature_offset: 0,
        recompressible: false,
    },
];

/// Looks up a catalog entry by its MIME identifier.
pub fn descriptor_for(mime: &str) -> Option<&'static FormatDescriptor> {
    CATALOG.iter().find(|d| d.mime == mime)
}

/// Whether a format may be offered to the re-encoding search. Formats the
/// catalog does not know are treated as recompressible; the catalog filters
/// known-unsuitable formats, it does not whitelist.
pub fn is_recompressible(mime: &str) -> bool {
    descriptor_for(mime).map_or(true, |d| d.recompressible)
}

/// Matches `bytes` against the catalog signatures. This is the lookup the
/// external format-sniffing routine consumes; it is a static table scan, not
/// a search.
pub fn match_signature(bytes: &[u8]) -> Option<&'static FormatDescriptor> {
    CATALOG.iter().find(|d| match d.signature {
        Some(signature) => bytes
            .get(d.signature_offset..d.signature_offset + signature.len())
            .map_or(false, |window| window == signature),
        None => false,
    })
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_match_png() {
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert_eq!(match_signature(&bytes).map(|d| d.mime), Some("image/png"));
    }

    #[test]
    fn test_signature_match_webp_at_offset() {
        let mut bytes = b"RIFF\x24\x00\x00\x00WEBPVP8 ".to_vec();
        bytes.extend_from_slice(&[0u8; 8]);
        assert_eq!(match_signature(&bytes).map(|d| d.mime), Some("image/webp"));
    }

    #[test]
    fn test_signature_no_match_for_unknown_bytes() {
        assert!(match_signature(b"plain text, not an image").is_none());
        assert!(match_signature(&[]).is_none());
    }

    #[test]
    fn test_recompressibility_filter() {
        assert!(is_recompressible("image/png"));
        assert!(is_recompressible("image/jpeg"));
        assert!(!is_recompressible("image/gif"));
        assert!(!is_recompressible("image/svg+xml"));
        // Unknown tokens pass through; the catalog only filters known-bad ones.
        assert!(is_recompressible("image/x-novel-format"));
    }

    #[test]
    fn test_descriptor_lookup() {
        assert!(descriptor_for("image/bmp").is_some());
        assert!(descriptor_for("application/pdf").is_none());
    }
}
