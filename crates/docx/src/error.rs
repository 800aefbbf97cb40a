use thiserror::Error;

/// Errors raised while reading a template package or serializing a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocxError {
    /// The bytes are not a readable zip container.
    #[error("invalid package container: {0}")]
    Zip(String),

    /// A required part is absent from the package.
    #[error("package is missing required part {0}")]
    MissingPart(String),

    /// A part is not well-formed XML, or lacks the structure we append into.
    #[error("invalid xml in {part}: {reason}")]
    Xml { part: String, reason: String },

    #[error("i/o failure while writing package: {0}")]
    Io(String),
}

impl From<zip::result::ZipError> for DocxError {
    fn from(err: zip::result::ZipError) -> Self {
        DocxError::Zip(err.to_string())
    }
}

impl From<std::io::Error> for DocxError {
    fn from(err: std::io::Error) -> Self {
        DocxError::Io(err.to_string())
    }
}
