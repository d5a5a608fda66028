use anycodec::{marshal, marshal_indent, unflatten, unmarshal, CodecError, Format, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Server {
    host: String,
    port: u16,
    secure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Settings {
    name: String,
    retries: u32,
    server: Server,
}

fn sample() -> Settings {
    Settings {
        name: "gateway".to_string(),
        retries: 3,
        server: Server {
            host: "localhost".to_string(),
            port: 8080,
            secure: true,
        },
    }
}

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a mapping, got {other:?}"),
    }
}

#[test]
fn roundtrip_all_encode_capable_formats() {
    let original = sample();
    for &format in Format::all() {
        if !format.supports(Operation::Encode) {
            continue;
        }
        let bytes = marshal(format, &original)
            .unwrap_or_else(|e| panic!("encoding as {format} failed: {e}"));
        let back: Settings = unmarshal(format, &bytes)
            .unwrap_or_else(|e| panic!("decoding {format} back failed: {e}"));
        assert_eq!(original, back, "round-trip mismatch for {format}");
    }
}

#[test]
fn indent_roundtrip_json_and_xml() {
    let original = sample();
    for format in [Format::Json, Format::Xml] {
        let bytes = marshal_indent(format, &original, "", "  ")
            .unwrap_or_else(|e| panic!("indent-encoding as {format} failed: {e}"));
        assert!(
            bytes.contains(&b'\n'),
            "expected multi-line output for {format}"
        );
        let back: Settings = unmarshal(format, &bytes).expect("decode indented output");
        assert_eq!(original, back, "indent round-trip mismatch for {format}");
    }
}

#[test]
fn indent_prefix_starts_every_line_but_the_first() {
    let bytes = marshal_indent(Format::Json, &sample(), "# ", "\t").expect("indent encode");
    let text = String::from_utf8(bytes).expect("utf-8 output");
    let mut lines = text.lines();
    let first = lines.next().expect("non-empty output");
    assert!(!first.starts_with("# "), "first line must not be prefixed");
    for line in lines {
        assert!(line.starts_with("# "), "unprefixed line: {line:?}");
    }
}

#[test]
fn unsupported_operations_are_reported() {
    let cases = [
        (Format::FlatJson, Operation::Encode),
        (Format::FlatYaml, Operation::Encode),
        (Format::Yaml, Operation::EncodeIndent),
        (Format::Toml, Operation::EncodeIndent),
        (Format::FlatJson, Operation::EncodeIndent),
    ];
    for (format, operation) in cases {
        let result = match operation {
            Operation::Encode => marshal(format, &sample()),
            Operation::EncodeIndent => marshal_indent(format, &sample(), "", "  "),
            Operation::Decode => unreachable!("every registered format decodes"),
        };
        match result {
            Err(CodecError::Unsupported {
                format: f,
                operation: o,
            }) => {
                assert_eq!(f, format);
                assert_eq!(o, operation);
            }
            other => panic!("expected Unsupported for {operation} on {format}, got {other:?}"),
        }
    }
}

#[test]
fn unknown_format_is_reported() {
    let err = marshal(Format::Unknown, &sample()).unwrap_err();
    assert!(matches!(err, CodecError::UnknownFormat(Format::Unknown)));

    let err = unmarshal::<Value>(Format::Unknown, b"{}").unwrap_err();
    assert!(matches!(err, CodecError::UnknownFormat(Format::Unknown)));
}

#[test]
fn capability_matrix() {
    let expected = [
        (Format::Json, true, true, true),
        (Format::Yaml, true, false, true),
        (Format::Xml, true, true, true),
        (Format::Toml, true, false, true),
        (Format::FlatJson, false, false, true),
        (Format::FlatYaml, false, false, true),
    ];
    assert_eq!(Format::all().len(), expected.len());
    for (format, encode, encode_indent, decode) in expected {
        assert_eq!(format.supports(Operation::Encode), encode, "{format}");
        assert_eq!(
            format.supports(Operation::EncodeIndent),
            encode_indent,
            "{format}"
        );
        assert_eq!(format.supports(Operation::Decode), decode, "{format}");
    }
    assert!(!Format::Unknown.supports(Operation::Decode));
}

#[test]
fn detection_is_case_insensitive() {
    assert_eq!(Format::from_path("DATA.YAML"), Format::Yaml);
    assert_eq!(Format::from_path("data.yaml"), Format::Yaml);
    assert_eq!(Format::from_path("data.YML"), Format::Yaml);
    assert_eq!(Format::from_path("Config.TOML"), Format::Toml);
}

#[test]
fn detection_accepts_bare_extensions() {
    assert_eq!(Format::from_path("json"), Format::Json);
    assert_eq!(Format::from_path("yml"), Format::Yaml);
    assert_eq!(Format::from_path("flat.json"), Format::FlatJson);
}

#[test]
fn detection_longest_extension_wins() {
    assert_eq!(Format::from_path("data.flat.json"), Format::FlatJson);
    assert_eq!(Format::from_path("data.flat.yaml"), Format::FlatYaml);
    assert_eq!(Format::from_path("conf/settings.flat.yml"), Format::FlatYaml);
    assert_eq!(Format::from_path("data.json"), Format::Json);
}

#[test]
fn detection_rejects_unregistered_names() {
    assert_eq!(Format::from_path("archive.tar.gz"), Format::Unknown);
    assert_eq!(Format::from_path("json.txt"), Format::Unknown);
    assert_eq!(Format::from_path("notes"), Format::Unknown);
}

#[test]
fn extensions_match_registration() {
    assert_eq!(Format::Json.extensions(), ["json"]);
    assert_eq!(Format::Yaml.extensions(), ["yaml", "yml"]);
    assert_eq!(Format::Xml.extensions(), ["xml"]);
    assert_eq!(Format::Toml.extensions(), ["toml"]);
    assert_eq!(Format::FlatJson.extensions(), ["flat.json"]);
    assert_eq!(Format::FlatYaml.extensions(), ["flat.yaml", "flat.yml"]);
    assert!(Format::Unknown.extensions().is_empty());
}

#[test]
fn unflatten_merges_sibling_dotted_keys() {
    let mut map = as_map(json!({"a.b": 1, "a.c": 2}));
    unflatten(&mut map).expect("unflatten");
    assert_eq!(Value::Object(map), json!({"a": {"b": 1, "c": 2}}));
}

#[test]
fn unflatten_splits_deep_paths() {
    let mut map = as_map(json!({"a.b.c": 1}));
    unflatten(&mut map).expect("unflatten");
    assert_eq!(Value::Object(map), json!({"a": {"b": {"c": 1}}}));
}

#[test]
fn unflatten_leaves_plain_keys_untouched() {
    let original = json!({
        "name": "demo",
        "nested": {"inner": [1, 2, 3]},
        "count": 7
    });
    let mut map = as_map(original.clone());
    unflatten(&mut map).expect("unflatten");
    assert_eq!(Value::Object(map), original);
}

#[test]
fn unflatten_recurses_under_plain_keys() {
    let mut map = as_map(json!({"variables": {"str.value": "hi"}}));
    unflatten(&mut map).expect("unflatten");
    assert_eq!(
        Value::Object(map),
        json!({"variables": {"str": {"value": "hi"}}})
    );
}

#[test]
fn unflatten_recurses_under_dotted_keys() {
    let mut map = as_map(json!({"a.b": {"c.d": 1}}));
    unflatten(&mut map).expect("unflatten");
    assert_eq!(Value::Object(map), json!({"a": {"b": {"c": {"d": 1}}}}));
}

#[test]
fn unflatten_is_idempotent() {
    let mut once = as_map(json!({"a.b": 1, "a.c": 2, "plain": true}));
    unflatten(&mut once).expect("first pass");
    let mut twice = once.clone();
    unflatten(&mut twice).expect("second pass");
    assert_eq!(once, twice);
}

#[test]
fn unflatten_does_not_look_into_sequences() {
    let original = json!({"list": [{"x.y": 1}]});
    let mut map = as_map(original.clone());
    unflatten(&mut map).expect("unflatten");
    assert_eq!(Value::Object(map), original);
}

#[test]
fn unflatten_reports_scalar_collisions() {
    let mut map = as_map(json!({"a": 1, "a.b": 2}));
    let err = unflatten(&mut map).unwrap_err();
    assert!(
        matches!(err, CodecError::KeyCollision { .. }),
        "expected KeyCollision, got {err:?}"
    );
}

#[derive(Debug, PartialEq, Deserialize)]
struct FlatTarget {
    variables: Variables,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Variables {
    #[serde(rename = "str")]
    str_group: StrGroup,
}

#[derive(Debug, PartialEq, Deserialize)]
struct StrGroup {
    value: String,
}

#[test]
fn flat_yaml_populates_nested_target() {
    let input = b"variables:\n  str.value: hi\n";
    let target: FlatTarget = unmarshal(Format::FlatYaml, input).expect("flat yaml decode");
    assert_eq!(target.variables.str_group.value, "hi");
}

#[test]
fn flat_json_restructures_dotted_keys() {
    let input = br#"{"a.b": 1, "a.c": 2, "top": true}"#;
    let value: Value = unmarshal(Format::FlatJson, input).expect("flat json decode");
    assert_eq!(value, json!({"a": {"b": 1, "c": 2}, "top": true}));
}

#[test]
fn flat_decode_propagates_base_codec_errors() {
    let err = unmarshal::<Value>(Format::FlatJson, b"{not json").unwrap_err();
    assert!(matches!(err, CodecError::Json(_)), "got {err:?}");
}

#[test]
fn flat_decode_propagates_key_collisions() {
    let input = br#"{"a": 1, "a.b": 2}"#;
    let err = unmarshal::<Value>(Format::FlatJson, input).unwrap_err();
    assert!(matches!(err, CodecError::KeyCollision { .. }), "got {err:?}");
}
