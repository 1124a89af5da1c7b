//! docbridge - schema-driven validator derivation and document transcoding
//!
//! Describe data once with a composable schema tree and derive from that
//! single description:
//!
//! - a validator tree for an independent target schema/storage system
//!   ([`validator`])
//! - a bidirectional transcoder between the wire format the storage layer
//!   persists and the runtime format handler code operates on
//!   ([`transcode`])
//!
//! Around those sit the codec registry ([`codec`]), the interception hook
//! pipeline ([`hooks`]), and the invocation wrapper ([`invoke`]) that
//! guarantees handler code, success callbacks, and the wire boundary each
//! observe a document in the correct representation.

pub mod codec;
pub mod document;
pub mod export;
pub mod hooks;
pub mod invoke;
pub mod schema;
pub mod transcode;
pub mod validator;
