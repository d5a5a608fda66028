//! Core dispatch module
//!
//! Routes marshal/unmarshal calls to the codec registered for a [`Format`],
//! surfacing unknown formats and unsupported operations as typed errors.

mod codecs;
pub mod error;
mod registry;
pub mod unflatten;

use std::fmt;

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;

use codecs::{BaseCodec, JsonCodec, TomlCodec, XmlCodec, YamlCodec};
pub use error::{CodecError, Result};
pub use registry::Operation;

/// Logical serialization format identifier.
///
/// The flat variants accept dotted flattened keys on decode; their byte
/// syntax is that of the base format (JSON for [`Format::FlatJson`], YAML
/// for [`Format::FlatYaml`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Unknown,
    Json,
    Yaml,
    Xml,
    Toml,
    FlatJson,
    FlatYaml,
}

impl Format {
    /// All registered formats, in registration order.
    pub fn all() -> &'static [Format] {
        &[
            Format::Json,
            Format::Yaml,
            Format::Xml,
            Format::Toml,
            Format::FlatJson,
            Format::FlatYaml,
        ]
    }

    /// Identify a format from a filename or bare extension.
    ///
    /// Case-insensitive; the longest matching registered extension wins, so
    /// `data.flat.json` resolves to [`Format::FlatJson`], not
    /// [`Format::Json`]. Returns [`Format::Unknown`] when nothing matches.
    pub fn from_path(filename_or_extension: &str) -> Format {
        registry::detect(filename_or_extension)
    }

    /// The file extensions registered for this format, in priority order.
    ///
    /// Empty for [`Format::Unknown`].
    pub fn extensions(self) -> &'static [&'static str] {
        registry::lookup(self).map_or(&[], |r| r.extensions)
    }

    /// Whether this format implements `operation`.
    pub fn supports(self, operation: Operation) -> bool {
        registry::lookup(self).is_some_and(|r| r.supports(operation))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Unknown => "UNKNOWN",
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Xml => "XML",
            Format::Toml => "TOML",
            Format::FlatJson => "FLAT_JSON",
            Format::FlatYaml => "FLAT_YAML",
        })
    }
}

/// Registry gate shared by the dispatch entry points: unknown format first,
/// then missing capability. The match arms below only route.
fn check(format: Format, operation: Operation) -> Result<()> {
    let registration = registry::lookup(format).ok_or(CodecError::UnknownFormat(format))?;
    if !registration.supports(operation) {
        return Err(CodecError::Unsupported { format, operation });
    }
    Ok(())
}

/// Encode `value` as `format`.
///
/// # Errors
/// Returns [`CodecError::UnknownFormat`] for an unregistered format,
/// [`CodecError::Unsupported`] for a decode-only format, and propagates
/// codec failures otherwise.
pub fn marshal<T: Serialize + ?Sized>(format: Format, value: &T) -> Result<Vec<u8>> {
    check(format, Operation::Encode)?;
    trace!("encoding value as {format}");
    match format {
        Format::Json => JsonCodec::encode(value),
        Format::Yaml => YamlCodec::encode(value),
        Format::Xml => XmlCodec::encode(value),
        Format::Toml => TomlCodec::encode(value),
        _ => Err(CodecError::Unsupported {
            format,
            operation: Operation::Encode,
        }),
    }
}

/// Encode `value` as `format`, pretty-printed.
///
/// Every output line after the first starts with `prefix`, and each nesting
/// level is indented by one more copy of `indent`.
///
/// # Errors
/// As [`marshal`]; only JSON and XML implement indent encoding.
pub fn marshal_indent<T: Serialize + ?Sized>(
    format: Format,
    value: &T,
    prefix: &str,
    indent: &str,
) -> Result<Vec<u8>> {
    check(format, Operation::EncodeIndent)?;
    trace!("indent-encoding value as {format}");
    match format {
        Format::Json => codecs::json_encode_indent(value, prefix, indent),
        Format::Xml => codecs::xml_encode_indent(value, prefix, indent),
        _ => Err(CodecError::Unsupported {
            format,
            operation: Operation::EncodeIndent,
        }),
    }
}

/// Decode `data` as `format` into a `T`.
///
/// Flat formats go through their base codec twice: the bytes are decoded
/// into an untyped mapping, dotted keys are restructured, and the result is
/// re-encoded and decoded again into the caller's target type.
///
/// # Errors
/// Returns [`CodecError::UnknownFormat`] for an unregistered format and
/// propagates decode, [`CodecError::KeyCollision`], and re-encode failures;
/// any failing step aborts the whole call.
pub fn unmarshal<T: DeserializeOwned>(format: Format, data: &[u8]) -> Result<T> {
    check(format, Operation::Decode)?;
    trace!("decoding {} bytes as {format}", data.len());
    match format {
        Format::Json => JsonCodec::decode(data),
        Format::Yaml => YamlCodec::decode(data),
        Format::Xml => XmlCodec::decode(data),
        Format::Toml => TomlCodec::decode(data),
        Format::FlatJson => unmarshal_flat::<JsonCodec, T>(data),
        Format::FlatYaml => unmarshal_flat::<YamlCodec, T>(data),
        Format::Unknown => Err(CodecError::UnknownFormat(format)),
    }
}

/// Decode pipeline for the flattened formats.
///
/// The intermediate hop exists because the restructuring operates on an
/// untyped mapping while the final decode must populate an arbitrary
/// caller-defined target.
fn unmarshal_flat<C: BaseCodec, T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let mut value: serde_json::Value = C::decode(data)?;
    debug!("restructuring flattened {} mapping", C::DEBUG_NAME);
    unflatten::unflatten_value(&mut value)?;
    let restructured = C::encode(&value)?;
    C::decode(&restructured)
}
