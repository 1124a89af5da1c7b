//! Invocation wrapper
//!
//! Per-call state machine: Received → ArgsDecoded → HandlerRunning →
//! ResultValidated → SuccessNotified → Responded. A failed argument decode
//! surfaces before the handler ever runs; a failed result validation
//! surfaces after, and the handler's side effects are the host transaction
//! layer's problem, not this subsystem's.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::document::RuntimeValue;
use crate::hooks::{BoxFuture, HookConfig};
use crate::schema::SchemaRef;
use crate::transcode::{decode, encode, SchemaMap, TranscodeError};

use super::context::HandlerContext;
use super::errors::{InvokeError, InvokeResult};
use super::facade::{DocumentFacade, DocumentStore};

/// Handler body: runtime arguments in, runtime result out.
pub type HandlerFn =
    Arc<dyn Fn(HandlerContext, RuntimeValue) -> BoxFuture<'static, Result<RuntimeValue, String>> + Send + Sync>;

/// Success callback: observes the runtime result and the runtime context,
/// never the wire encoding.
pub type SuccessCallback = Arc<dyn Fn(&HandlerContext, &RuntimeValue) + Send + Sync>;

/// Wraps an async closure as a [`HandlerFn`].
pub fn handler<F, Fut>(body: F) -> HandlerFn
where
    F: Fn(HandlerContext, RuntimeValue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RuntimeValue, String>> + Send + 'static,
{
    Arc::new(move |ctx, args| Box::pin(body(ctx, args)))
}

/// One registered handler: argument schema, optional return schema, body,
/// and success callbacks.
#[derive(Clone)]
pub struct HandlerDef {
    pub name: String,
    pub args: SchemaRef,
    pub returns: Option<SchemaRef>,
    handler: HandlerFn,
    on_success: Vec<SuccessCallback>,
}

impl HandlerDef {
    pub fn new(name: impl Into<String>, args: SchemaRef, handler: HandlerFn) -> Self {
        Self {
            name: name.into(),
            args,
            returns: None,
            handler,
            on_success: Vec::new(),
        }
    }

    /// Declares the return schema. Without one, the raw handler result
    /// passes through unvalidated.
    pub fn returns(mut self, schema: SchemaRef) -> Self {
        self.returns = Some(schema);
        self
    }

    /// Registers a success callback. Callbacks fire in registration order.
    pub fn on_success(mut self, callback: SuccessCallback) -> Self {
        self.on_success.push(callback);
        self
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InvocationOutcome {
    /// Request ID assigned to the call.
    pub request_id: Uuid,
    /// Wire-encoded handler result.
    pub result: Value,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
}

/// Invocation wrapper over a schema map, composed hooks, and a store.
#[derive(Clone)]
pub struct Invoker {
    schemas: Arc<SchemaMap>,
    hooks: Arc<HookConfig>,
    store: Arc<dyn DocumentStore>,
}

impl Invoker {
    pub fn new(schemas: Arc<SchemaMap>, hooks: HookConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            schemas,
            hooks: Arc::new(hooks),
            store,
        }
    }

    /// Invokes a handler with wire arguments, returning the wire result.
    pub async fn invoke(&self, def: &HandlerDef, wire_args: Value) -> InvokeResult<Value> {
        let request_id = Uuid::new_v4();
        let outcome = self.invoke_with_request_id(def, wire_args, request_id).await?;
        Ok(outcome.result)
    }

    /// Invokes a handler and reports the outcome with timing.
    pub async fn invoke_traced(
        &self,
        def: &HandlerDef,
        wire_args: Value,
    ) -> InvokeResult<InvocationOutcome> {
        self.invoke_with_request_id(def, wire_args, Uuid::new_v4())
            .await
    }

    async fn invoke_with_request_id(
        &self,
        def: &HandlerDef,
        wire_args: Value,
        request_id: Uuid,
    ) -> InvokeResult<InvocationOutcome> {
        // Received → ArgsDecoded. Fail fast: the handler never runs on a
        // malformed call.
        let runtime_args = decode(&def.args, &wire_args).map_err(|e| match e {
            TranscodeError::Validation(v) => InvokeError::InvalidArguments(v),
            other => InvokeError::Transcode(other),
        })?;

        // ArgsDecoded → HandlerRunning.
        let ctx = HandlerContext::new(
            request_id,
            DocumentFacade::new(
                request_id,
                self.schemas.clone(),
                self.hooks.clone(),
                self.store.clone(),
            ),
        );
        let runtime_result = (def.handler)(ctx.clone(), runtime_args)
            .await
            .map_err(InvokeError::Handler)?;

        // HandlerRunning → ResultValidated. Without a declared return
        // schema the raw result passes through unchanged and unvalidated.
        let wire_result = match &def.returns {
            Some(schema) => encode(schema, &runtime_result).map_err(|e| match e {
                TranscodeError::Validation(v) => InvokeError::InvalidResult(v),
                other => InvokeError::Transcode(other),
            })?,
            None => runtime_result.to_wire(),
        };

        // ResultValidated → SuccessNotified. Callbacks observe the runtime
        // result before the wire boundary erases its rich values.
        for callback in &def.on_success {
            callback(&ctx, &runtime_result);
        }

        // SuccessNotified → Responded.
        Ok(InvocationOutcome {
            request_id,
            result: wire_result,
            duration_ms: ctx.elapsed_ms(),
        })
    }
}
