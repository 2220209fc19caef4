//! # remap
//!
//! This crate is a codec and lookup engine for source map v3 artifacts: it
//! decodes the compact `mappings` field into a line-indexed structure,
//! answers position queries in both directions, concatenates independent
//! maps and re-encodes the result back to the wire format.
//!
//! ## Getting Started
//!
//! ```
//! use remap::{Bias, SourceMap};
//!
//! let buf = br#"{
//!     "version": 3,
//!     "sources": ["sum.ts"],
//!     "names": ["sum"],
//!     "mappings": "AAAA,SAASA"
//! }"#
//! .to_vec();
//!
//! let sm = SourceMap::from(buf).unwrap();
//!
//! // Resolve the generated position (line 1, column 10)
//! let found = sm.position_by_generated(1, 10, Bias::Floor).unwrap();
//! assert_eq!(found.source, "sum.ts");
//! assert_eq!(found.name, Some("sum"));
//! ```
//!
//! ## Overview
//!
//! ### `BorrowedSourceMap`
//!
//! [BorrowedSourceMap] is a source map containing borrowed or owned strings.
//! It parses the JSON envelope in place, resolves queries against the
//! `sources`/`names`/`sourcesContent` arrays, and appends other maps via
//! [concat](BorrowedSourceMap::concat).
//!
//! ### `SourceMap`
//!
//! [SourceMap] is a source map that owns all its internal strings, providing
//! a more straightforward and safe API for users who do not need to manage
//! the lifetimes of the strings manually.
//!
//! ### `Mappings`
//!
//! [Mappings] is the decoded `mappings` blob: one [Frame] of [Segment]s per
//! generated line, dense, so a line lookup is O(1) and a column lookup is a
//! binary search within one frame. [MappingsDecoder] decodes blobs, also
//! into an existing map with seeded accumulators; [from_frames](Mappings::from_frames)
//! builds the structure directly.
//!
//! ### `Bias`
//!
//! [Bias] picks the neighbour to return when a queried column has no exact
//! mapping: the closest below ([Floor](Bias::Floor)), the closest above
//! ([Ceiling](Bias::Ceiling)), or none ([Exact](Bias::Exact)).
//!
//! ### VLQ
//!
//! [decode_vlq], [encode_vlq] and [encode_vlq_array] expose the base64 vlq
//! integer codec underneath the mappings format.
//!
//! Positions are 1-based in memory and 0-based on the wire; see [Position].

mod error;
mod lookup;
mod mappings;
mod segment;
mod sourcemap;
mod splitter;
mod vlq;

pub use error::*;
pub use lookup::*;
pub use mappings::*;
pub use segment::*;
pub use sourcemap::*;
pub use vlq::{decode_vlq, encode_vlq, encode_vlq_array};
