//! Serde-backed bindings to the base codecs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::Result;

/// A base codec that turns values into bytes and back.
///
/// Flat formats reuse the base codec of their underlying format for every
/// stage of their decode pipeline, so encode and decode live behind one
/// trait with zero-cost marker implementations.
pub(crate) trait BaseCodec {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>>;
    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T>;
}

/// Zero-cost marker struct for the JSON codec.
pub(crate) struct JsonCodec;

impl BaseCodec for JsonCodec {
    const DEBUG_NAME: &'static str = "JSON";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Zero-cost marker struct for the YAML codec.
pub(crate) struct YamlCodec;

impl BaseCodec for YamlCodec {
    const DEBUG_NAME: &'static str = "YAML";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }

    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
        Ok(serde_yaml::from_slice(data)?)
    }
}

/// Zero-cost marker struct for the XML codec.
pub(crate) struct XmlCodec;

impl BaseCodec for XmlCodec {
    const DEBUG_NAME: &'static str = "XML";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Ok(quick_xml::se::to_string(value)?.into_bytes())
    }

    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
        Ok(quick_xml::de::from_str(std::str::from_utf8(data)?)?)
    }
}

/// Zero-cost marker struct for the TOML codec.
pub(crate) struct TomlCodec;

impl BaseCodec for TomlCodec {
    const DEBUG_NAME: &'static str = "TOML";

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Ok(toml::to_string(value)?.into_bytes())
    }

    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
        Ok(toml::from_str(std::str::from_utf8(data)?)?)
    }
}

/// Pretty-print JSON with the given line prefix and indent unit.
pub(crate) fn json_encode_indent<T: Serialize + ?Sized>(
    value: &T,
    prefix: &str,
    indent: &str,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(apply_line_prefix(buf, prefix))
}

/// Pretty-print XML with the given line prefix and indent unit.
///
/// `quick-xml` indents with a repeated character, so a mixed-character
/// indent unit falls back to spaces of the same width. The prefix is applied
/// per output line; multi-line text content receives it too.
pub(crate) fn xml_encode_indent<T: Serialize + ?Sized>(
    value: &T,
    prefix: &str,
    indent: &str,
) -> Result<Vec<u8>> {
    let mut out = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut out);
    if let Some((ch, count)) = uniform_indent(indent) {
        ser.indent(ch, count);
    }
    value.serialize(ser)?;
    Ok(apply_line_prefix(out.into_bytes(), prefix))
}

/// Collapse an indent unit into (char, repeat count), if indenting at all.
fn uniform_indent(indent: &str) -> Option<(char, usize)> {
    let mut chars = indent.chars();
    let first = chars.next()?;
    if chars.all(|c| c == first) {
        Some((first, indent.chars().count()))
    } else {
        Some((' ', indent.chars().count()))
    }
}

/// Insert `prefix` after every newline, so every line but the first starts
/// with it.
fn apply_line_prefix(encoded: Vec<u8>, prefix: &str) -> Vec<u8> {
    if prefix.is_empty() {
        return encoded;
    }
    let mut out = Vec::with_capacity(encoded.len());
    for byte in encoded {
        out.push(byte);
        if byte == b'\n' {
            out.extend_from_slice(prefix.as_bytes());
        }
    }
    out
}
