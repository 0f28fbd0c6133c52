use crate::{
    error::Result,
    oid::ObjectId,
    spec::BinarySubtype,
    Bson,
    DateTime,
    Decimal128,
    Document,
    Timestamp,
};

/// Per-type formatting rules for one flavor of extended JSON.
///
/// Each method appends the text for exactly one value to `buf` and nothing else: separators,
/// keys and brackets belong to the caller driving the traversal (see [`WriteExtJson`]).
/// Implementations hold no state, so one generator may be shared by any number of concurrent
/// writers as long as each uses its own buffer.
///
/// Methods writing caller-provided text are fallible only because the escaping primitive writes
/// through [`std::io::Write`]; appending to a `Vec<u8>` does not fail in practice.
pub trait Generator {
    fn write_null(&self, buf: &mut Vec<u8>);

    fn write_undefined(&self, buf: &mut Vec<u8>);

    /// Writes `s` as a quoted JSON string. Control characters, `"` and `\` are escaped and
    /// embedded NULs are preserved.
    fn write_string(&self, buf: &mut Vec<u8>, s: &str) -> Result<()>;

    fn write_bool(&self, buf: &mut Vec<u8>, value: bool);

    fn write_int32(&self, buf: &mut Vec<u8>, value: i32);

    fn write_int64(&self, buf: &mut Vec<u8>, value: i64);

    fn write_double(&self, buf: &mut Vec<u8>, value: f64);

    fn write_decimal128(&self, buf: &mut Vec<u8>, value: Decimal128);

    fn write_date(&self, buf: &mut Vec<u8>, value: DateTime);

    /// Writes a DBPointer as a reference to `id` in the collection `namespace`.
    fn write_db_ref(&self, buf: &mut Vec<u8>, namespace: &str, id: ObjectId) -> Result<()>;

    fn write_object_id(&self, buf: &mut Vec<u8>, value: ObjectId);

    fn write_timestamp(&self, buf: &mut Vec<u8>, value: Timestamp);

    fn write_binary(&self, buf: &mut Vec<u8>, bytes: &[u8], subtype: BinarySubtype);

    fn write_regex(&self, buf: &mut Vec<u8>, pattern: &str, options: &str) -> Result<()>;

    fn write_symbol(&self, buf: &mut Vec<u8>, symbol: &str) -> Result<()>;

    fn write_code(&self, buf: &mut Vec<u8>, code: &str) -> Result<()>;

    /// Writes code along with its scope document. `depth` is the nesting depth of the container
    /// holding this value; the scope is printed one level deeper.
    fn write_code_with_scope(
        &self,
        buf: &mut Vec<u8>,
        code: &str,
        scope: &Document,
        depth: usize,
    ) -> Result<()>;

    fn write_min_key(&self, buf: &mut Vec<u8>);

    fn write_max_key(&self, buf: &mut Vec<u8>);

    /// Whitespace written between a key and its value.
    fn write_padding(&self, buf: &mut Vec<u8>);
}

/// A container that can print its own structure as extended JSON, handing each contained value
/// to a [`Generator`].
///
/// This is the entry point a generator calls back into for nested documents, such as the scope
/// of a [`JavaScriptCodeWithScope`](crate::JavaScriptCodeWithScope).
pub trait WriteExtJson {
    /// Writes `self` to `buf`. `depth` is the nesting depth of `self`, with a top-level document
    /// at 0. When `pretty` is set, members are written one per line and indented.
    ///
    /// On error nothing is appended to `buf`.
    fn write_extjson<G: Generator + ?Sized>(
        &self,
        generator: &G,
        depth: usize,
        pretty: bool,
        buf: &mut Vec<u8>,
    ) -> Result<()>;
}

impl WriteExtJson for Document {
    fn write_extjson<G: Generator + ?Sized>(
        &self,
        generator: &G,
        depth: usize,
        pretty: bool,
        buf: &mut Vec<u8>,
    ) -> Result<()> {
        super::writer::truncate_on_err(buf, |buf| {
            super::writer::write_document(generator, self, depth, pretty, buf)
        })
    }
}

impl WriteExtJson for [Bson] {
    fn write_extjson<G: Generator + ?Sized>(
        &self,
        generator: &G,
        depth: usize,
        pretty: bool,
        buf: &mut Vec<u8>,
    ) -> Result<()> {
        super::writer::truncate_on_err(buf, |buf| {
            super::writer::write_array(generator, self, depth, pretty, buf)
        })
    }
}
