//! # anycodec
//!
//! A format-agnostic (de)serialization dispatcher for JSON, YAML, XML, TOML
//! and "flattened-key" variants of JSON/YAML.
//!
//! Callers pick a [`Format`] (directly, or by filename via
//! [`Format::from_path`]) and hand a serde value to [`marshal`] or bytes to
//! [`unmarshal`]; the dispatcher routes to the matching codec, or reports a
//! typed failure when the format is unknown or the operation unsupported.
//!
//! The flattened formats accept mappings whose keys are dot-separated paths
//! (`"a.b.c": 1`) and restructure them into proper nesting
//! (`{a: {b: {c: 1}}}`) before the final decode. See [`unflatten`] for the
//! transform itself.
pub mod codec;

// Re-export the main types for convenience
pub use codec::{
    marshal, marshal_indent, unflatten::unflatten, unmarshal, CodecError, Format, Operation,
    Result,
};
