//! Handler invocation wrapper
//!
//! Orchestrates one handler call end to end: decode incoming wire
//! arguments, invoke the handler with runtime arguments and a
//! transcoding-aware document facade, validate/encode the handler's
//! runtime result, notify success callbacks with the runtime result, and
//! hand the wire result back to the caller.
//!
//! The ordering is the load-bearing invariant: success callbacks observe
//! rich runtime values before wire encoding erases them, and the wire
//! boundary never sees runtime-only types.

mod context;
mod errors;
mod facade;
mod registry;
mod wrapper;

pub use context::HandlerContext;
pub use errors::{InvokeError, InvokeResult};
pub use facade::{DocumentFacade, DocumentStore, InMemoryStore};
pub use registry::HandlerRegistry;
pub use wrapper::{handler, HandlerDef, HandlerFn, InvocationOutcome, Invoker, SuccessCallback};
