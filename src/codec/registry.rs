//! The process-wide format registry.
//!
//! A fixed table mapping each [`Format`] to its capability record: which
//! operations the format implements plus the file extensions that identify
//! it. The table is a `static`, never mutated, and safe for unsynchronized
//! concurrent reads.

use std::fmt;

use log::debug;

use super::Format;

/// An operation a format may or may not implement.
///
/// "Unsupported" is an explicit, checkable state here rather than a nullable
/// function field at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encode,
    EncodeIndent,
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Encode => "encode",
            Operation::EncodeIndent => "indent encode",
            Operation::Decode => "decode",
        })
    }
}

/// Capability record for one registered format.
pub(crate) struct Registration {
    pub(crate) format: Format,
    encode: bool,
    encode_indent: bool,
    decode: bool,
    pub(crate) extensions: &'static [&'static str],
}

impl Registration {
    pub(crate) fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::Encode => self.encode,
            Operation::EncodeIndent => self.encode_indent,
            Operation::Decode => self.decode,
        }
    }
}

static REGISTRY: &[Registration] = &[
    Registration {
        format: Format::Json,
        encode: true,
        encode_indent: true,
        decode: true,
        extensions: &["json"],
    },
    Registration {
        format: Format::Yaml,
        encode: true,
        encode_indent: false,
        decode: true,
        extensions: &["yaml", "yml"],
    },
    Registration {
        format: Format::Xml,
        encode: true,
        encode_indent: true,
        decode: true,
        extensions: &["xml"],
    },
    Registration {
        format: Format::Toml,
        encode: true,
        encode_indent: false,
        decode: true,
        extensions: &["toml"],
    },
    Registration {
        format: Format::FlatJson,
        encode: false,
        encode_indent: false,
        decode: true,
        extensions: &["flat.json"],
    },
    Registration {
        format: Format::FlatYaml,
        encode: false,
        encode_indent: false,
        decode: true,
        extensions: &["flat.yaml", "flat.yml"],
    },
];

pub(crate) fn lookup(format: Format) -> Option<&'static Registration> {
    REGISTRY.iter().find(|r| r.format == format)
}

/// Identify a format from a filename or bare extension.
///
/// Matching is case-insensitive: an extension matches when it equals the
/// whole name or is a `"." + extension` suffix of it. When several
/// registered extensions match, the longest one wins, so compound suffixes
/// like `flat.json` take precedence over `json`.
pub(crate) fn detect(filename_or_extension: &str) -> Format {
    let lower = filename_or_extension.to_ascii_lowercase();
    let mut best = Format::Unknown;
    let mut best_len = 0;

    for registration in REGISTRY {
        for ext in registration.extensions {
            let matches = lower == *ext
                || lower
                    .strip_suffix(ext)
                    .is_some_and(|stem| stem.ends_with('.'));
            if matches && ext.len() > best_len {
                best = registration.format;
                best_len = ext.len();
            }
        }
    }

    debug!("detected format {best} for {filename_or_extension:?}");
    best
}
