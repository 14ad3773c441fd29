use fes_model::FilterError;
use thiserror::Error;

/// Errors raised while reading a filter document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document is not well-formed XML, or uses an undeclared prefix.
    #[error("malformed XML document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),

    /// The document is well-formed but does not follow the filter grammar:
    /// an unknown tag, a wrong operand count, or a missing attribute.
    #[error("invalid filter structure in <{element}>: {message}")]
    InvalidFilterStructure { element: String, message: String },

    /// The object model rejected a value the document carries.
    #[error(transparent)]
    Model(#[from] FilterError),
}

/// Errors raised while writing a filter document.
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("failed to write XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("serialized filter is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
