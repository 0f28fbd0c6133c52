//! Serialization of BSON values to [MongoDB Extended JSON v2](https://www.mongodb.com/docs/manual/reference/mongodb-extended-json/).
//!
//! ## Overview of Extended JSON
//!
//! MongoDB Extended JSON (abbreviated extJSON) is a format of JSON that allows for the encoding of
//! BSON type information. Normal JSON cannot unambiguously represent all BSON types losslessly, so
//! an extension was designed to include conventions for representing those types.
//!
//! For example, a BSON binary is represented by the following format:
//! ```text
//! {
//!    "$binary": {
//!        "base64": <base64 encoded payload as a string>,
//!        "subType": <subtype as a two character hex string>,
//!    }
//! }
//! ```
//!
//! This module produces the "Canonical" mode, which preserves type information for every value:
//! an `i32` and an `i64` holding the same number are written differently, and all numbers are
//! written as strings so no precision is lost.
//!
//! ```rust
//! use bson_extjson::{doc, extjson, DateTime};
//!
//! let doc = doc! { "x": 5, "d": DateTime::from_millis(1591050020711) };
//! assert_eq!(
//!     extjson::to_string(&doc)?,
//!     r#"{"x":{"$numberInt":"5"},"d":{"$date":{"$numberLong":"1591050020711"}}}"#,
//! );
//! # Ok::<(), bson_extjson::error::Error>(())
//! ```
//!
//! ## Structure
//!
//! Output is produced by two cooperating pieces: a [`Generator`] knows how to write each
//! individual kind of value, and [`WriteExtJson`] walks a document or array, writing braces,
//! keys and separators and handing each member to the generator. [`CanonicalV2Generator`] is the
//! generator for canonical mode.

mod canonical;
mod generator;
mod writer;

use std::io::Write;

pub use self::{
    canonical::CanonicalV2Generator,
    generator::{Generator, WriteExtJson},
    writer::{write_bson, MAX_NESTING_DEPTH},
};
use crate::{
    error::{Error, Result},
    Document,
};

/// Encodes `doc` as compact canonical extended JSON bytes.
pub fn to_vec(doc: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    doc.write_extjson(&CanonicalV2Generator, 0, false, &mut buf)?;
    Ok(buf)
}

/// Encodes `doc` as a compact canonical extended JSON string.
pub fn to_string(doc: &Document) -> Result<String> {
    into_string(to_vec(doc)?)
}

/// Encodes `doc` as canonical extended JSON, one member per line with two spaces of indentation
/// per level of nesting.
///
/// ```rust
/// use bson_extjson::{doc, extjson};
///
/// let doc = doc! { "a": [true], "b": {} };
/// assert_eq!(
///     extjson::to_string_pretty(&doc)?,
///     "{\n  \"a\":[\n    true\n  ],\n  \"b\":{}\n}",
/// );
/// # Ok::<(), bson_extjson::error::Error>(())
/// ```
pub fn to_string_pretty(doc: &Document) -> Result<String> {
    let mut buf = Vec::new();
    doc.write_extjson(&CanonicalV2Generator, 0, true, &mut buf)?;
    into_string(buf)
}

/// Encodes `doc` as compact canonical extended JSON into `writer`.
///
/// Nothing is written if encoding fails.
pub fn to_writer<W: Write>(doc: &Document, mut writer: W) -> Result<()> {
    let buf = to_vec(doc)?;
    writer.write_all(&buf)?;
    Ok(())
}

pub(crate) fn into_string(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|_| Error::utf8_encoding())
}
