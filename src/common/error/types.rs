//! Unified error types for the converter.
//!
//! Only malformed input and I/O failures surface as errors. Missing structure,
//! unknown vocabulary and degenerate math are absorbed by the converters
//! themselves and never reach this type.
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source markup is not well-formed XML
    #[error("XML error at byte {position}: {message}")]
    Xml { message: String, position: u64 },

    /// Well-formed markup that does not form a single usable tree
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Input uses a byte encoding the parser does not read
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A module named by a chapter could not be located
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// Book manifest could not be read
    #[error("Manifest error: {0}")]
    Manifest(String),
}

impl Error {
    /// Build an XML error without position information.
    pub(crate) fn xml(message: impl Into<String>) -> Self {
        Error::Xml {
            message: message.into(),
            position: 0,
        }
    }

    /// Whether this error came from unparseable source markup.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Xml { .. } | Error::MalformedDocument(_) | Error::UnsupportedEncoding(_)
        )
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_error_display() {
        let err = Error::Xml {
            message: "unexpected end".to_string(),
            position: 42,
        };
        assert_eq!(err.to_string(), "XML error at byte 42: unexpected end");
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_io_error_is_not_malformed_input() {
        let err = Error::from(std::io::Error::other("disk"));
        assert!(!err.is_malformed_input());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_every_variant_names_its_cause() {
        let cases = [
            (Error::MalformedDocument("no root".into()), "no root"),
            (Error::UnsupportedEncoding("UTF-16LE".into()), "UTF-16LE"),
            (Error::ModuleNotFound("m12345".into()), "m12345"),
            (Error::Manifest("bad key".into()), "bad key"),
        ];
        for (err, cause) in cases {
            let shown = err.to_string();
            assert!(shown.contains(cause), "{shown}");
            assert_ne!(shown, cause, "message lacks a category prefix");
        }
    }
}
