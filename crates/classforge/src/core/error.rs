//! Core error types for diagram conversion
//!
//! The analysis pipeline itself never fails; these errors cover the edges of
//! the system: reading diagram files, decoding XML and emitting sources.

use thiserror::Error;

/// Core error types for diagram conversion
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("XML error: {message} at byte {position}")]
    Xml { message: String, position: u64 },

    #[error("Load error: {message}")]
    Load { message: String },

    #[error("Emit error: {message}")]
    Emit { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Unsupported diagram format: {format}")]
    UnsupportedFormat { format: String },
}

impl ConvertError {
    /// Create a new XML error
    pub fn xml_error(message: impl Into<String>, position: u64) -> Self {
        Self::Xml {
            message: message.into(),
            position,
        }
    }

    /// Create a new load error
    pub fn load_error(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a new emit error
    pub fn emit_error(message: impl Into<String>) -> Self {
        Self::Emit {
            message: message.into(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_error() {
        let error = ConvertError::xml_error("unexpected end of file", 42);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("XML error"));
        assert!(error_msg.contains("unexpected end of file"));
        assert!(error_msg.contains("byte 42"));
    }

    #[test]
    fn test_load_error() {
        let error = ConvertError::load_error("no cells");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Load error"));
        assert!(error_msg.contains("no cells"));
    }

    #[test]
    fn test_emit_error() {
        let error = ConvertError::emit_error("empty class name");
        assert!(error.to_string().contains("Emit error: empty class name"));
    }

    #[test]
    fn test_unsupported_format() {
        let error = ConvertError::unsupported_format("plantuml");
        assert_eq!(error.to_string(), "Unsupported diagram format: plantuml");
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ConvertError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
