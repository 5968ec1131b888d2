//! # symdex - Symbol search index
//!
//! symdex loads the symbol tables that documentation generators emit for
//! their search boxes (Doxygen `searchData` files, or plain JSON) and
//! answers case-insensitive prefix queries and exact label lookups.
//!
//! ## Architecture
//!
//! - [`index`] - The immutable [`index::SymbolIndex`] and its record types
//! - [`payload`] - Readers turning serialized payloads into entries
//! - [`output`] - Terminal and JSON rendering of results
//! - [`logging`] - `tracing` subscriber setup
//! - [`utils`] - Configuration, text decoding and case folding
//!
//! ## Quick Start
//!
//! ```no_run
//! use symdex::index::SymbolIndex;
//! use symdex::payload::read_payload;
//! use std::path::Path;
//!
//! let entries = read_payload(Path::new("html/search/all_8.js")).unwrap();
//! let index = SymbolIndex::from_entries(entries).unwrap();
//!
//! for entry in index.query("halfedge") {
//!     for dest in &entry.destinations {
//!         println!("{} -> {}", entry.label, dest.href());
//!     }
//! }
//! ```

pub mod index;
pub mod logging;
pub mod output;
pub mod payload;
pub mod utils;
