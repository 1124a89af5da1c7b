//! Handler registry
//!
//! Name → handler lookup so a host can dispatch wire calls by name.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{InvokeError, InvokeResult};
use super::wrapper::{HandlerDef, InvocationOutcome, Invoker};

/// Registry of invocable handlers
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, HandlerDef>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Duplicate names are rejected.
    pub fn register(&self, def: HandlerDef) -> InvokeResult<()> {
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| InvokeError::Handler("lock poisoned".into()))?;
        if handlers.contains_key(&def.name) {
            return Err(InvokeError::Handler(format!(
                "handler already registered: {}",
                def.name
            )));
        }
        handlers.insert(def.name.clone(), def);
        Ok(())
    }

    /// Gets a handler by name.
    pub fn get(&self, name: &str) -> InvokeResult<HandlerDef> {
        self.handlers
            .read()
            .map_err(|_| InvokeError::Handler("lock poisoned".into()))?
            .get(name)
            .cloned()
            .ok_or_else(|| InvokeError::UnknownHandler(name.to_string()))
    }

    /// Lists registered handler names.
    pub fn names(&self) -> Vec<String> {
        self.handlers
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.handlers.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Invoker {
    /// Dispatches a wire call to a registered handler by name.
    pub async fn invoke_named(
        &self,
        registry: &HandlerRegistry,
        name: &str,
        wire_args: Value,
    ) -> InvokeResult<InvocationOutcome> {
        let def = registry.get(name)?;
        self.invoke_traced(&def, wire_args).await
    }
}
