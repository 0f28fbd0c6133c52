use crate::{
    error::{Error, Result},
    Bson,
    Document,
};

use super::{Generator, WriteExtJson};

/// The deepest a document or array may be nested, counting the top-level document as depth 0.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Writes a single value that is a member of a container at `depth`.
///
/// Documents and arrays are written at `depth + 1`. All other values are handed to the
/// generator as-is. On error `buf` is left as it was before the call.
pub fn write_bson<G: Generator + ?Sized>(
    generator: &G,
    value: &Bson,
    depth: usize,
    pretty: bool,
    buf: &mut Vec<u8>,
) -> Result<()> {
    truncate_on_err(buf, |buf| write_value(generator, value, depth, pretty, buf))
}

fn write_value<G: Generator + ?Sized>(
    generator: &G,
    value: &Bson,
    depth: usize,
    pretty: bool,
    buf: &mut Vec<u8>,
) -> Result<()> {
    match value {
        Bson::Double(v) => generator.write_double(buf, *v),
        Bson::String(s) => generator.write_string(buf, s)?,
        Bson::Array(arr) => arr.write_extjson(generator, depth + 1, pretty, buf)?,
        Bson::Document(doc) => doc.write_extjson(generator, depth + 1, pretty, buf)?,
        Bson::Boolean(b) => generator.write_bool(buf, *b),
        Bson::Null => generator.write_null(buf),
        Bson::RegularExpression(regex) => {
            generator.write_regex(buf, &regex.pattern, &regex.options)?
        }
        Bson::JavaScriptCode(code) => generator.write_code(buf, code)?,
        Bson::JavaScriptCodeWithScope(cws) => {
            generator.write_code_with_scope(buf, &cws.code, &cws.scope, depth)?
        }
        Bson::Int32(v) => generator.write_int32(buf, *v),
        Bson::Int64(v) => generator.write_int64(buf, *v),
        Bson::Timestamp(ts) => generator.write_timestamp(buf, *ts),
        Bson::Binary(binary) => generator.write_binary(buf, &binary.bytes, binary.subtype),
        Bson::ObjectId(oid) => generator.write_object_id(buf, *oid),
        Bson::DateTime(dt) => generator.write_date(buf, *dt),
        Bson::Symbol(s) => generator.write_symbol(buf, s)?,
        Bson::Decimal128(d) => generator.write_decimal128(buf, *d),
        Bson::Undefined => generator.write_undefined(buf),
        Bson::MaxKey => generator.write_max_key(buf),
        Bson::MinKey => generator.write_min_key(buf),
        Bson::DbPointer(ptr) => generator.write_db_ref(buf, &ptr.namespace, ptr.id)?,
    }
    Ok(())
}

/// Runs `write` against `buf`, dropping whatever it appended if it fails.
pub(super) fn truncate_on_err<F>(buf: &mut Vec<u8>, write: F) -> Result<()>
where
    F: FnOnce(&mut Vec<u8>) -> Result<()>,
{
    let start = buf.len();
    let result = write(buf);
    if result.is_err() {
        buf.truncate(start);
    }
    result
}

pub(super) fn write_document<G: Generator + ?Sized>(
    generator: &G,
    doc: &Document,
    depth: usize,
    pretty: bool,
    buf: &mut Vec<u8>,
) -> Result<()> {
    check_depth(depth)?;

    buf.push(b'{');
    for (i, (key, value)) in doc.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        if pretty {
            indent(buf, depth + 1);
        }
        generator
            .write_string(buf, key)
            .map_err(|e| e.with_key(key.as_str()))?;
        buf.push(b':');
        generator.write_padding(buf);
        write_value(generator, value, depth, pretty, buf).map_err(|e| e.with_key(key.as_str()))?;
    }
    if pretty && !doc.is_empty() {
        indent(buf, depth);
    }
    buf.push(b'}');
    Ok(())
}

pub(super) fn write_array<G: Generator + ?Sized>(
    generator: &G,
    arr: &[Bson],
    depth: usize,
    pretty: bool,
    buf: &mut Vec<u8>,
) -> Result<()> {
    check_depth(depth)?;

    buf.push(b'[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        if pretty {
            indent(buf, depth + 1);
        }
        write_value(generator, value, depth, pretty, buf).map_err(|e| e.with_index(i))?;
    }
    if pretty && !arr.is_empty() {
        indent(buf, depth);
    }
    buf.push(b']');
    Ok(())
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::depth_limit_exceeded(MAX_NESTING_DEPTH));
    }
    Ok(())
}

fn indent(buf: &mut Vec<u8>, level: usize) {
    buf.push(b'\n');
    buf.resize(buf.len() + 2 * level, b' ');
}
