//! Document transcoding between wire and runtime formats
//!
//! Applies a schema's codecs to whole or partial documents at system
//! boundaries:
//!
//! - `decode`: wire document → runtime document (validates the wire shape
//!   first, collecting every path-qualified issue)
//! - `encode`: runtime document → wire document (validates the runtime
//!   shape, applies codec encodes, strips absent-marker keys)
//! - `encode_partial`: patch encoding; only the fields present in the
//!   partial input, each against its own sub-schema
//!
//! Round-trip invariant: `decode(encode(d)) == d` for runtime documents and
//! `encode(decode(w)) == w` for wire documents accepted by the schema.

mod errors;
mod resolve;
mod transcoder;

pub use errors::{Issue, TranscodeError, TranscodeResult, ValidationError};
pub use resolve::SchemaMap;
pub use transcoder::{decode, encode, encode_partial, validate_wire};
