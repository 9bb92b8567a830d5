//! Byte Order Mark (BOM) detection for source modules.
//!
//! CNXML modules are read as UTF-8. A UTF-8 BOM is skipped; a UTF-16 or
//! UTF-32 BOM means the bytes cannot be parsed and is reported as an error.

use crate::common::{Error, Result};

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            BomKind::Utf8 => "UTF-8",
            BomKind::Utf16Le => "UTF-16LE",
            BomKind::Utf16Be => "UTF-16BE",
            BomKind::Utf32Le => "UTF-32LE",
            BomKind::Utf32Be => "UTF-32BE",
        }
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Detect a BOM at the start of `data`.
///
/// UTF-32 marks are checked first since the little-endian one shares its
/// prefix with UTF-16LE.
pub fn detect_bom(data: &[u8]) -> Option<BomKind> {
    [
        BomKind::Utf32Be,
        BomKind::Utf32Le,
        BomKind::Utf8,
        BomKind::Utf16Be,
        BomKind::Utf16Le,
    ]
    .into_iter()
    .find(|kind| data.starts_with(kind.as_bytes()))
}

/// Return `data` as UTF-8 text with any UTF-8 BOM removed.
pub fn decode_utf8(data: &[u8]) -> Result<&str> {
    let body = match detect_bom(data) {
        None => data,
        Some(BomKind::Utf8) => &data[UTF8_BOM.len()..],
        Some(other) => return Err(Error::UnsupportedEncoding(other.label().to_string())),
    };
    Ok(std::str::from_utf8(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bom_kinds() {
        assert_eq!(detect_bom(&[0xEF, 0xBB, 0xBF, b'<']), Some(BomKind::Utf8));
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x00, 0x00]), Some(BomKind::Utf32Le));
        assert_eq!(detect_bom(&[0xFF, 0xFE, b'<', 0x00]), Some(BomKind::Utf16Le));
        assert_eq!(detect_bom(b"<document/>"), None);
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let data = [0xEF, 0xBB, 0xBF, b'<', b'a', b'/', b'>'];
        assert_eq!(decode_utf8(&data).unwrap(), "<a/>");
    }

    #[test]
    fn test_decode_rejects_utf16() {
        let err = decode_utf8(&[0xFE, 0xFF, 0x00, b'<']).unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(ref e) if e == "UTF-16BE"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_utf8(&[b'<', 0xC3, 0x28]).unwrap_err().is_malformed_input());
    }
}
