//! Codec registry and detection
//!
//! A codec pairs a wire-side schema with a runtime-side schema and an
//! inverse decode/encode transform pair. The wire schema determines what the
//! validator synthesizer emits for a codec-governed position; the runtime
//! schema is only ever seen by handler code.
//!
//! The process-wide registry is populated once at startup and never mutated
//! at request time, so concurrent reads need no locking.

mod builtin;
mod registry;
mod types;

pub use builtin::{date_codec, doc_ref_codec, DATE_CODEC, DOC_REF_PREFIX};
pub use registry::{find_codec, is_codec_like, CodecRegistry};
pub use types::{Codec, CodecError, DecodeFn, EncodeFn};
