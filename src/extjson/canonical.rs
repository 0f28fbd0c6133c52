use crate::{
    error::Result,
    oid::ObjectId,
    spec::BinarySubtype,
    DateTime,
    Decimal128,
    Document,
    Timestamp,
};

use super::{Generator, WriteExtJson};

/// Writes values in the canonical format of MongoDB Extended JSON v2.0.0.
///
/// Canonical mode preserves type information: every value that has no native JSON counterpart
/// is wrapped in a `$`-prefixed object, and all numbers are written as strings so that their
/// exact width and precision survive a round trip.
///
/// ```
/// use bson_extjson::{extjson::{self, CanonicalV2Generator}, Bson};
///
/// let mut buf = Vec::new();
/// extjson::write_bson(&CanonicalV2Generator, &Bson::Int64(42), 0, false, &mut buf)?;
/// assert_eq!(buf, br#"{"$numberLong":"42"}"#);
/// # Ok::<(), bson_extjson::error::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalV2Generator;

impl CanonicalV2Generator {
    /// Writes `{"<tag>":"<text>"}`, for tags whose payload is known to need no escaping.
    fn write_tagged(buf: &mut Vec<u8>, tag: &str, text: &str) {
        buf.extend_from_slice(b"{\"");
        buf.extend_from_slice(tag.as_bytes());
        buf.extend_from_slice(b"\":\"");
        buf.extend_from_slice(text.as_bytes());
        buf.extend_from_slice(b"\"}");
    }

    fn write_tagged_escaped(&self, buf: &mut Vec<u8>, tag: &str, text: &str) -> Result<()> {
        buf.extend_from_slice(b"{\"");
        buf.extend_from_slice(tag.as_bytes());
        buf.extend_from_slice(b"\":");
        self.write_string(buf, text)?;
        buf.push(b'}');
        Ok(())
    }
}

impl Generator for CanonicalV2Generator {
    fn write_null(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"null");
    }

    fn write_undefined(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(br#"{"$undefined":true}"#);
    }

    fn write_string(&self, buf: &mut Vec<u8>, s: &str) -> Result<()> {
        serde_json::to_writer(&mut *buf, s)?;
        Ok(())
    }

    fn write_bool(&self, buf: &mut Vec<u8>, value: bool) {
        let text: &[u8] = if value { b"true" } else { b"false" };
        buf.extend_from_slice(text);
    }

    fn write_int32(&self, buf: &mut Vec<u8>, value: i32) {
        Self::write_tagged(buf, "$numberInt", &value.to_string());
    }

    fn write_int64(&self, buf: &mut Vec<u8>, value: i64) {
        Self::write_tagged(buf, "$numberLong", &value.to_string());
    }

    fn write_double(&self, buf: &mut Vec<u8>, value: f64) {
        Self::write_tagged(buf, "$numberDouble", &format_double(value));
    }

    fn write_decimal128(&self, buf: &mut Vec<u8>, value: Decimal128) {
        Self::write_tagged(buf, "$numberDecimal", &value.to_string());
    }

    fn write_date(&self, buf: &mut Vec<u8>, value: DateTime) {
        buf.extend_from_slice(br#"{"$date":"#);
        self.write_int64(buf, value.timestamp_millis());
        buf.push(b'}');
    }

    fn write_db_ref(&self, buf: &mut Vec<u8>, namespace: &str, id: ObjectId) -> Result<()> {
        buf.extend_from_slice(br#"{"$ref":"#);
        self.write_string(buf, namespace)?;
        buf.extend_from_slice(br#","$id":""#);
        buf.extend_from_slice(id.to_hex().as_bytes());
        buf.extend_from_slice(b"\"}");
        Ok(())
    }

    fn write_object_id(&self, buf: &mut Vec<u8>, value: ObjectId) {
        Self::write_tagged(buf, "$oid", &value.to_hex());
    }

    fn write_timestamp(&self, buf: &mut Vec<u8>, value: Timestamp) {
        buf.extend_from_slice(
            format!(
                r#"{{"$timestamp":{{"t":{},"i":{}}}}}"#,
                value.time, value.increment
            )
            .as_bytes(),
        );
    }

    fn write_binary(&self, buf: &mut Vec<u8>, bytes: &[u8], subtype: BinarySubtype) {
        buf.extend_from_slice(br#"{"$binary":{"base64":""#);
        buf.extend_from_slice(crate::base64::encode(bytes).as_bytes());
        buf.extend_from_slice(br#"","subType":""#);
        buf.extend_from_slice(hex::encode([u8::from(subtype)]).as_bytes());
        buf.extend_from_slice(b"\"}}");
    }

    fn write_regex(&self, buf: &mut Vec<u8>, pattern: &str, options: &str) -> Result<()> {
        buf.extend_from_slice(br#"{"$regularExpression":{"pattern":"#);
        self.write_string(buf, pattern)?;
        buf.extend_from_slice(br#","options":"#);
        self.write_string(buf, options)?;
        buf.extend_from_slice(b"}}");
        Ok(())
    }

    fn write_symbol(&self, buf: &mut Vec<u8>, symbol: &str) -> Result<()> {
        self.write_tagged_escaped(buf, "$symbol", symbol)
    }

    fn write_code(&self, buf: &mut Vec<u8>, code: &str) -> Result<()> {
        self.write_tagged_escaped(buf, "$code", code)
    }

    fn write_code_with_scope(
        &self,
        buf: &mut Vec<u8>,
        code: &str,
        scope: &Document,
        depth: usize,
    ) -> Result<()> {
        super::writer::truncate_on_err(buf, |buf| {
            buf.extend_from_slice(br#"{"$code":"#);
            self.write_string(buf, code)?;
            buf.extend_from_slice(br#","$scope":"#);
            scope.write_extjson(self, depth + 1, false, buf)?;
            buf.push(b'}');
            Ok(())
        })
    }

    fn write_min_key(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(br#"{"$minKey":1}"#);
    }

    fn write_max_key(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(br#"{"$maxKey":1}"#);
    }

    fn write_padding(&self, _buf: &mut Vec<u8>) {}
}

/// Formats a double the way canonical extended JSON expects it: the shortest representation that
/// parses back to the same value, always with a fractional part, and in exponential notation
/// outside of `[1e-7, 1e21)`.
fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        }
        .to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let abs = value.abs();
    if (1e-7..1e21).contains(&abs) {
        let mut s = value.to_string();
        if !s.contains('.') {
            s.push_str(".0");
        }
        return s;
    }

    // `{:E}` always yields a mantissa and an exponent, e.g. "1E300", "-2.5E-8"
    let formatted = format!("{:E}", value);
    let (mantissa, exponent) = match formatted.split_once('E') {
        Some(parts) => parts,
        None => (formatted.as_str(), "0"),
    };
    let mut s = String::with_capacity(formatted.len() + 3);
    s.push_str(mantissa);
    if !mantissa.contains('.') {
        s.push_str(".0");
    }
    s.push('E');
    if !exponent.starts_with('-') {
        s.push('+');
    }
    s.push_str(exponent);
    s
}
