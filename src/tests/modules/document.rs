use std::{cell::RefCell, io};

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use crate::{
    doc,
    error::{ErrorKind, Result},
    extjson::{self, CanonicalV2Generator, Generator, WriteExtJson, MAX_NESTING_DEPTH},
    oid::ObjectId,
    spec::BinarySubtype,
    Bson,
    DateTime,
    Decimal128,
    Document,
    JavaScriptCodeWithScope,
    Timestamp,
};

#[test]
fn ordered_insert() {
    let mut doc = Document::new();
    doc.insert("first".to_owned(), Bson::Int32(1));
    doc.insert("second".to_owned(), Bson::String("foo".to_owned()));
    doc.insert("alphanumeric".to_owned(), Bson::String("bar".to_owned()));

    let expected_keys = vec![
        "first".to_owned(),
        "second".to_owned(),
        "alphanumeric".to_owned(),
    ];

    let keys: Vec<_> = doc.iter().map(|(key, _)| key.to_owned()).collect();
    assert_eq!(expected_keys, keys);
    assert_eq!(
        doc.to_canonical_extjson_string().unwrap(),
        r#"{"first":{"$numberInt":"1"},"second":"foo","alphanumeric":"bar"}"#
    );
}

#[test]
fn insert_replaces_in_place_and_remove_shifts() {
    let mut doc = doc! { "a": 1, "b": 2, "c": 3 };
    assert_eq!(doc.insert("a", "x"), Some(Bson::Int32(1)));
    assert_eq!(doc.remove("b"), Some(Bson::Int32(2)));
    assert_eq!(doc.remove("missing"), None);

    assert_eq!(
        doc.to_canonical_extjson_string().unwrap(),
        r#"{"a":"x","c":{"$numberInt":"3"}}"#
    );
}

#[test]
fn getters() {
    let mut doc = doc! { "i": 1, "s": "str", "n": null };
    assert!(doc.contains_key("i"));
    assert!(!doc.contains_key("x"));
    assert_eq!(doc.get("s"), Some(&Bson::String("str".to_owned())));
    assert_eq!(doc.get("n"), Some(&Bson::Null));
    assert_eq!(doc.len(), 3);

    if let Some(value) = doc.get_mut("i") {
        *value = Bson::Int64(2);
    }
    assert_eq!(doc.get("i").and_then(Bson::as_i64), Some(2));

    doc.clear();
    assert!(doc.is_empty());
}

#[test]
fn extend_and_collect_keep_order() {
    let mut doc: Document = vec![("z".to_owned(), Bson::Boolean(true))]
        .into_iter()
        .collect();
    doc.extend(vec![
        ("a".to_owned(), Bson::Null),
        ("m".to_owned(), Bson::MinKey),
    ]);
    assert_eq!(doc.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(
        doc.values().cloned().collect::<Vec<_>>(),
        [Bson::Boolean(true), Bson::Null, Bson::MinKey]
    );
}

#[test]
fn empty_containers() {
    assert_eq!(extjson::to_string(&Document::new()).unwrap(), "{}");
    assert_eq!(extjson::to_string_pretty(&Document::new()).unwrap(), "{}");

    let doc = doc! { "d": {}, "a": [] };
    assert_eq!(extjson::to_string(&doc).unwrap(), r#"{"d":{},"a":[]}"#);
    assert_eq!(
        extjson::to_string_pretty(&doc).unwrap(),
        "{\n  \"d\":{},\n  \"a\":[]\n}"
    );
}

#[test]
fn nested_compact() {
    let doc = doc! {
        "x": [1, "two", { "three": 3i64 }],
        "y": { "z": [[], [null]] },
    };
    assert_eq!(
        extjson::to_string(&doc).unwrap(),
        r#"{"x":[{"$numberInt":"1"},"two",{"three":{"$numberLong":"3"}}],"y":{"z":[[],[null]]}}"#
    );
    assert_eq!(extjson::to_vec(&doc).unwrap(), extjson::to_string(&doc).unwrap().into_bytes());
}

#[test]
fn nested_pretty() {
    let doc = doc! {
        "x": [1, { "y": true }],
        "s": "v",
    };
    let expected = r#"{
  "x":[
    {"$numberInt":"1"},
    {
      "y":true
    }
  ],
  "s":"v"
}"#;
    assert_eq!(extjson::to_string_pretty(&doc).unwrap(), expected);
}

#[test]
fn scope_is_compact_in_pretty_output() {
    let doc = doc! {
        "f": JavaScriptCodeWithScope {
            code: "x".to_owned(),
            scope: doc! { "a": [1], "b": {} },
        },
    };
    assert_eq!(
        extjson::to_string_pretty(&doc).unwrap(),
        "{\n  \"f\":{\"$code\":\"x\",\"$scope\":{\"a\":[{\"$numberInt\":\"1\"}],\"b\":{}}}\n}"
    );
}

#[test]
fn keys_are_escaped() {
    let doc = doc! { "a\"b": 1, "\n": 2, "\u{e9}": 3 };
    assert_eq!(
        extjson::to_string(&doc).unwrap(),
        "{\"a\\\"b\":{\"$numberInt\":\"1\"},\"\\n\":{\"$numberInt\":\"2\"},\"\u{e9}\":{\"$numberInt\":\"3\"}}"
    );
}

#[test]
fn encoding_is_deterministic() {
    let doc = doc! {
        "_id": ObjectId::from_bytes(*b"abcdefghijkl"),
        "when": DateTime::from_millis(1_600_000_000_000),
        "amount": "12.50".parse::<Decimal128>().unwrap(),
        "ts": Timestamp { time: 7, increment: 1 },
        "tags": ["a", "b"],
    };
    let first = extjson::to_vec(&doc).unwrap();
    let second = extjson::to_vec(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn to_writer_writes_compact_output() {
    let doc = doc! { "a": 1.5 };
    let mut out = Vec::new();
    doc.to_writer(&mut out).unwrap();
    assert_eq!(out, br#"{"a":{"$numberDouble":"1.5"}}"#);

    let mut out = Vec::new();
    extjson::to_writer(&doc, &mut out).unwrap();
    assert_eq!(out, br#"{"a":{"$numberDouble":"1.5"}}"#);
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn to_writer_reports_io_errors() {
    let err = doc! { "a": 1 }.to_writer(FailingWriter).unwrap_err();
    assert_matches!(err.kind, ErrorKind::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe);
}

fn nested_documents(levels: usize) -> Document {
    let mut doc = Document::new();
    for _ in 0..levels {
        doc = doc! { "n": doc };
    }
    doc
}

fn nested_arrays(levels: usize) -> Document {
    let mut value = Bson::Array(vec![]);
    for _ in 1..levels {
        value = Bson::Array(vec![value]);
    }
    doc! { "a": value }
}

#[test]
fn depth_limit() {
    // The innermost document of `nested_documents(n)` sits at depth n.
    assert!(extjson::to_string(&nested_documents(MAX_NESTING_DEPTH)).is_ok());

    let err = extjson::to_string(&nested_documents(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_matches!(
        err.kind,
        ErrorKind::DepthLimitExceeded { max_depth } if max_depth == MAX_NESTING_DEPTH
    );

    assert!(extjson::to_string(&nested_arrays(MAX_NESTING_DEPTH)).is_ok());
    let err = extjson::to_string(&nested_arrays(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert!(err.is_depth_limit_exceeded());
}

#[test]
fn depth_limit_applies_to_pretty_output() {
    let err = extjson::to_string_pretty(&nested_documents(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert!(err.is_depth_limit_exceeded());
}

#[test]
fn errors_record_innermost_location() {
    let mut deep = nested_documents(MAX_NESTING_DEPTH);
    deep = doc! { "inner": [1, 2, deep] };
    let doc = doc! { "outer": deep };

    let err = extjson::to_string(&doc).unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_eq!(err.key.as_deref(), Some("n"));
    assert_eq!(err.index, None);
    assert!(err.to_string().starts_with("Error at key \"n\": "));

    let arr = doc! { "list": [nested_arrays(MAX_NESTING_DEPTH)] };
    let err = extjson::to_string(&arr).unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_eq!(err.key, None);
    assert_eq!(err.index, Some(0));
}

#[test]
fn code_with_scope_writes_scope_one_level_deeper() {
    let scope = Document::new();
    let mut buf = Vec::new();
    CanonicalV2Generator
        .write_code_with_scope(&mut buf, "f", &scope, MAX_NESTING_DEPTH - 1)
        .unwrap();
    assert_eq!(buf, br#"{"$code":"f","$scope":{}}"#);

    let mut buf = Vec::new();
    let err = CanonicalV2Generator
        .write_code_with_scope(&mut buf, "f", &scope, MAX_NESTING_DEPTH)
        .unwrap_err();
    assert!(err.is_depth_limit_exceeded());
}

/// Delegates to the canonical generator and records the depth given to every code with scope.
#[derive(Default)]
struct DepthProbe {
    depths: RefCell<Vec<usize>>,
}

impl Generator for DepthProbe {
    fn write_null(&self, buf: &mut Vec<u8>) {
        CanonicalV2Generator.write_null(buf)
    }

    fn write_undefined(&self, buf: &mut Vec<u8>) {
        CanonicalV2Generator.write_undefined(buf)
    }

    fn write_string(&self, buf: &mut Vec<u8>, s: &str) -> Result<()> {
        CanonicalV2Generator.write_string(buf, s)
    }

    fn write_bool(&self, buf: &mut Vec<u8>, value: bool) {
        CanonicalV2Generator.write_bool(buf, value)
    }

    fn write_int32(&self, buf: &mut Vec<u8>, value: i32) {
        CanonicalV2Generator.write_int32(buf, value)
    }

    fn write_int64(&self, buf: &mut Vec<u8>, value: i64) {
        CanonicalV2Generator.write_int64(buf, value)
    }

    fn write_double(&self, buf: &mut Vec<u8>, value: f64) {
        CanonicalV2Generator.write_double(buf, value)
    }

    fn write_decimal128(&self, buf: &mut Vec<u8>, value: Decimal128) {
        CanonicalV2Generator.write_decimal128(buf, value)
    }

    fn write_date(&self, buf: &mut Vec<u8>, value: DateTime) {
        CanonicalV2Generator.write_date(buf, value)
    }

    fn write_db_ref(&self, buf: &mut Vec<u8>, namespace: &str, id: ObjectId) -> Result<()> {
        CanonicalV2Generator.write_db_ref(buf, namespace, id)
    }

    fn write_object_id(&self, buf: &mut Vec<u8>, value: ObjectId) {
        CanonicalV2Generator.write_object_id(buf, value)
    }

    fn write_timestamp(&self, buf: &mut Vec<u8>, value: Timestamp) {
        CanonicalV2Generator.write_timestamp(buf, value)
    }

    fn write_binary(&self, buf: &mut Vec<u8>, bytes: &[u8], subtype: BinarySubtype) {
        CanonicalV2Generator.write_binary(buf, bytes, subtype)
    }

    fn write_regex(&self, buf: &mut Vec<u8>, pattern: &str, options: &str) -> Result<()> {
        CanonicalV2Generator.write_regex(buf, pattern, options)
    }

    fn write_symbol(&self, buf: &mut Vec<u8>, symbol: &str) -> Result<()> {
        CanonicalV2Generator.write_symbol(buf, symbol)
    }

    fn write_code(&self, buf: &mut Vec<u8>, code: &str) -> Result<()> {
        CanonicalV2Generator.write_code(buf, code)
    }

    fn write_code_with_scope(
        &self,
        buf: &mut Vec<u8>,
        code: &str,
        scope: &Document,
        depth: usize,
    ) -> Result<()> {
        self.depths.borrow_mut().push(depth);
        CanonicalV2Generator.write_code_with_scope(buf, code, scope, depth)
    }

    fn write_min_key(&self, buf: &mut Vec<u8>) {
        CanonicalV2Generator.write_min_key(buf)
    }

    fn write_max_key(&self, buf: &mut Vec<u8>) {
        CanonicalV2Generator.write_max_key(buf)
    }

    fn write_padding(&self, buf: &mut Vec<u8>) {
        buf.push(b' ');
    }
}

#[test]
fn driver_passes_container_depth_to_generator() {
    let innermost = JavaScriptCodeWithScope {
        code: "g".to_owned(),
        scope: Document::new(),
    };
    let doc = doc! {
        "f": JavaScriptCodeWithScope {
            code: "f".to_owned(),
            scope: doc! { "g": innermost.clone() },
        },
        "sub": { "arr": [innermost] },
    };

    let probe = DepthProbe::default();
    let mut buf = Vec::new();
    doc.write_extjson(&probe, 0, false, &mut buf).unwrap();
    // The scope of "f" is written by the canonical generator itself, so only the outer two
    // reach the probe.
    assert_eq!(*probe.depths.borrow(), [0, 2]);
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        r#"{"f": {"$code":"f","$scope":{"g":{"$code":"g","$scope":{}}}},"sub": {"arr": [{"$code":"g","$scope":{}}]}}"#
    );
}

#[test]
fn scope_depth_is_one_below_its_container() {
    let code_at_top = |scope: Document| {
        doc! {
            "c": JavaScriptCodeWithScope {
                code: "f".to_owned(),
                scope,
            }
        }
    };

    // The scope sits at depth 1, so it may hold MAX_NESTING_DEPTH - 1 more levels.
    let probe = DepthProbe::default();
    let mut buf = Vec::new();
    code_at_top(nested_documents(MAX_NESTING_DEPTH - 1))
        .write_extjson(&probe, 0, false, &mut buf)
        .unwrap();
    assert_eq!(*probe.depths.borrow(), [0]);

    let probe = DepthProbe::default();
    let mut buf = Vec::new();
    let err = code_at_top(nested_documents(MAX_NESTING_DEPTH))
        .write_extjson(&probe, 0, false, &mut buf)
        .unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_eq!(err.key.as_deref(), Some("n"));
    assert_eq!(*probe.depths.borrow(), [0]);
}

#[test]
fn failed_writes_leave_buffer_untouched() {
    let too_deep = JavaScriptCodeWithScope {
        code: "f".to_owned(),
        scope: nested_documents(MAX_NESTING_DEPTH),
    };

    let mut buf = b"[".to_vec();
    let err = extjson::write_bson(
        &CanonicalV2Generator,
        &Bson::JavaScriptCodeWithScope(too_deep.clone()),
        0,
        false,
        &mut buf,
    )
    .unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_eq!(buf, b"[");

    let doc = doc! { "a": 1, "b": too_deep.clone() };
    let mut buf = b"prefix".to_vec();
    let err = doc
        .write_extjson(&CanonicalV2Generator, 0, true, &mut buf)
        .unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert_eq!(buf, b"prefix");

    let arr = vec![Bson::Int32(1), Bson::Document(nested_documents(MAX_NESTING_DEPTH))];
    let mut buf = Vec::new();
    let err = arr
        .as_slice()
        .write_extjson(&CanonicalV2Generator, 0, false, &mut buf)
        .unwrap_err();
    assert!(err.is_depth_limit_exceeded());
    assert!(buf.is_empty());

    let mut buf = b"{".to_vec();
    CanonicalV2Generator
        .write_code_with_scope(&mut buf, "f", &too_deep.scope, 0)
        .unwrap_err();
    assert_eq!(buf, b"{");
}

#[test]
fn padding_follows_every_colon() {
    let doc = doc! { "a": { "b": 1 } };
    let mut buf = Vec::new();
    doc.write_extjson(&DepthProbe::default(), 0, false, &mut buf).unwrap();
    assert_eq!(buf, br#"{"a": {"b": {"$numberInt":"1"}}}"#);
}
