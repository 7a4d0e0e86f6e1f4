//! CayenneLPP payload decoding.
//!
//! Each payload entry is self-describing: a channel byte, a type byte
//! looked up in the static registry, then a fixed number of value bytes
//! for that type. Multi-byte fields are big-endian; signed fields are
//! two's-complement before the fixed-point scale is applied.
//!
//! Errors report unknown type identifiers and truncated entries. The
//! registry and scaling rules are defined in `layout`, safe cursor reads
//! live in `reader`, and `encoder` builds well-formed payloads for tests
//! and fixtures.
//!
pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use encoder::LppWriter;
pub use error::LppError;
pub use parser::decode;
