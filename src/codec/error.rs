//! Custom error types for the anycodec crate.

use thiserror::Error;

use super::registry::Operation;
use super::Format;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The format identifier has no entry in the registry.
    #[error("unknown format: {0}")]
    UnknownFormat(Format),

    /// The format is registered but does not implement the requested operation.
    #[error("{operation} is not supported for {format}")]
    Unsupported {
        format: Format,
        operation: Operation,
    },

    /// A dotted-path segment collided with an existing non-mapping value
    /// while unflattening.
    #[error("key collision while unflattening {key:?}: segment {segment:?} already holds a non-mapping value")]
    KeyCollision { key: String, segment: String },

    /// The input bytes are not valid UTF-8 (the XML and TOML decoders operate
    /// on text).
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// An error from the JSON codec.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error from the YAML codec.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error from the XML encoder.
    #[error("XML encode error: {0}")]
    XmlEncode(#[from] quick_xml::se::SeError),

    /// An error from the XML decoder.
    #[error("XML decode error: {0}")]
    XmlDecode(#[from] quick_xml::de::DeError),

    /// An error from the TOML encoder.
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// An error from the TOML decoder.
    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

/// A convenience `Result` type alias using the crate's `CodecError` type.
pub type Result<T> = std::result::Result<T, CodecError>;
