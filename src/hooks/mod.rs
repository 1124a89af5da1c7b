//! Interception hook pipeline
//!
//! Hooks intercept documents at four stages around the transcoder:
//! pre-decode and post-encode see wire documents, post-decode and
//! pre-encode see runtime documents. A "one" hook transforms a single
//! document or vetoes it by returning `None`; decode stages additionally
//! support "many" hooks that operate on a batch with a pre-bound "one"
//! delegate.
//!
//! Chains are composed once at registration time into a single
//! configuration: an explicit fold, not a dispatched interface hierarchy,
//! because the short-circuit and batch-delegation semantics read directly
//! off the fold.

mod compose;
mod types;

pub use compose::{run_many, run_one};
pub use types::{many, one, BoxFuture, HookConfig, HookContext, ManyHook, OneHook, WriteInfo};
