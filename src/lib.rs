// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Canonical [MongoDB Extended JSON v2](https://www.mongodb.com/docs/manual/reference/mongodb-extended-json/)
//! output for BSON values.
//!
//! BSON is a binary format in which zero or more ordered key/value pairs are stored as a single
//! entity. We call this entity a document. Extended JSON is a textual rendering of the same data
//! which keeps the BSON type of every value, so that an `Int64` does not come back as an `Int32`
//! and a `Decimal128` does not lose digits through a double.
//!
//! This library provides an in-memory model of BSON values ([`Bson`], [`Document`] and the
//! types they contain) and writes them as canonical extended JSON.
//!
//! ## Basic usage
//!
//! ```rust
//! use bson_extjson::{doc, oid::ObjectId, Bson};
//!
//! let oid: ObjectId = "507f1f77bcf86cd799439011".parse()?;
//! let doc = doc! {
//!     "_id": oid,
//!     "name": "ducks",
//!     "count": 3i64,
//!     "tags": ["a", "b"],
//! };
//!
//! assert_eq!(
//!     doc.to_canonical_extjson_string()?,
//!     r#"{"_id":{"$oid":"507f1f77bcf86cd799439011"},"name":"ducks","count":{"$numberLong":"3"},"tags":["a","b"]}"#,
//! );
//! assert_eq!(Bson::Double(1.5).to_canonical_extjson_string()?, r#"{"$numberDouble":"1.5"}"#);
//! # Ok::<(), bson_extjson::error::Error>(())
//! ```
//!
//! See the [`extjson`] module for pretty printing, writing to an [`std::io::Write`], and the
//! [`Generator`](extjson::Generator) trait that defines how each kind of value is written.
//!
//! ## Feature flags
//!
//! | Feature      | Description                                                     |
//! |:-------------|:----------------------------------------------------------------|
//! | `chrono-0_4` | Conversions between [`DateTime`] and [`chrono::DateTime`]       |

#![allow(clippy::cognitive_complexity, clippy::derive_partial_eq_without_eq)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(inline)]
pub use self::{
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex, Timestamp},
    datetime::DateTime,
    decimal128::Decimal128,
    error::{Error, Result},
    oid::ObjectId,
};

#[macro_use]
mod macros;
mod base64;
mod binary;
mod bson;
pub mod datetime;
pub mod decimal128;
pub mod document;
pub mod error;
pub mod extjson;
pub mod oid;
pub mod spec;
