//! Hook composition and pipeline execution
//!
//! Composition rules:
//! - an empty hook list composes to "absent" (no-op)
//! - a single-hook list is returned as the same hook, not re-wrapped
//! - multiple hooks fold into one that threads the document through each
//!   in registration order; "one" chains short-circuit on the first `None`,
//!   "many" chains thread the full list with no list-level short-circuit
//!
//! Hooks are awaited in sequence, never concurrently with each other:
//! later hooks depend on earlier hooks' output.

use std::sync::Arc;

use super::types::{BoxFuture, HookConfig, HookContext, ManyHook, OneHook};

impl HookConfig {
    /// Composes an ordered list of hook configurations into one.
    pub fn compose(configs: Vec<HookConfig>) -> HookConfig {
        let mut pre_decode = Vec::new();
        let mut pre_decode_many = Vec::new();
        let mut post_decode = Vec::new();
        let mut post_decode_many = Vec::new();
        let mut pre_encode = Vec::new();
        let mut post_encode = Vec::new();

        for config in configs {
            pre_decode.extend(config.pre_decode);
            pre_decode_many.extend(config.pre_decode_many);
            post_decode.extend(config.post_decode);
            post_decode_many.extend(config.post_decode_many);
            pre_encode.extend(config.pre_encode);
            post_encode.extend(config.post_encode);
        }

        HookConfig {
            pre_decode: compose_one(pre_decode),
            pre_decode_many: compose_many(pre_decode_many),
            post_decode: compose_one(post_decode),
            post_decode_many: compose_many(post_decode_many),
            pre_encode: compose_one(pre_encode),
            post_encode: compose_one(post_encode),
        }
    }
}

fn compose_one<D: Send + 'static>(mut hooks: Vec<OneHook<D>>) -> Option<OneHook<D>> {
    match hooks.len() {
        0 => None,
        1 => hooks.pop(),
        _ => Some(Arc::new(move |ctx: Arc<HookContext>, doc: D| {
            let hooks = hooks.clone();
            let fut: BoxFuture<'static, Option<D>> = Box::pin(async move {
                let mut doc = doc;
                for hook in &hooks {
                    match hook(ctx.clone(), doc).await {
                        Some(next) => doc = next,
                        // Short-circuit: later hooks never run.
                        None => return None,
                    }
                }
                Some(doc)
            });
            fut
        })),
    }
}

fn compose_many<D: Send + 'static>(mut hooks: Vec<ManyHook<D>>) -> Option<ManyHook<D>> {
    match hooks.len() {
        0 => None,
        1 => hooks.pop(),
        _ => Some(Arc::new(
            move |ctx: Arc<HookContext>, docs: Vec<D>, delegate: Option<OneHook<D>>| {
                let hooks = hooks.clone();
                let fut: BoxFuture<'static, Vec<D>> = Box::pin(async move {
                    let mut docs = docs;
                    for hook in &hooks {
                        docs = hook(ctx.clone(), docs, delegate.clone()).await;
                    }
                    docs
                });
                fut
            },
        )),
    }
}

/// Runs a (possibly absent) "one" hook; absent means pass-through.
pub async fn run_one<D>(hook: &Option<OneHook<D>>, ctx: &Arc<HookContext>, doc: D) -> Option<D> {
    match hook {
        Some(hook) => hook(ctx.clone(), doc).await,
        None => Some(doc),
    }
}

/// Runs a stage over a batch.
///
/// With a "many" hook present it receives the list and the stage's "one"
/// hook as delegate. Otherwise the default batch behavior applies: each
/// item goes through the "one" hook sequentially and vetoed items are
/// dropped.
pub async fn run_many<D>(
    many: &Option<ManyHook<D>>,
    one: &Option<OneHook<D>>,
    ctx: &Arc<HookContext>,
    docs: Vec<D>,
) -> Vec<D> {
    match many {
        Some(many) => many(ctx.clone(), docs, one.clone()).await,
        None => {
            let mut kept = Vec::with_capacity(docs.len());
            for doc in docs {
                if let Some(doc) = run_one(one, ctx, doc).await {
                    kept.push(doc);
                }
            }
            kept
        }
    }
}
