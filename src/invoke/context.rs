//! Handler context
//!
//! Context handed to handler code and success callbacks. Carries the
//! request identity and the transcoding-aware document facade.

use std::time::Instant;

use uuid::Uuid;

use super::facade::DocumentFacade;

/// Per-call context a handler operates in.
#[derive(Clone)]
pub struct HandlerContext {
    /// Request ID for tracing.
    pub request_id: Uuid,
    /// Transcoding-aware access to the underlying document store.
    pub db: DocumentFacade,
    /// Start time for duration tracking.
    started_at: Instant,
}

impl HandlerContext {
    pub fn new(request_id: Uuid, db: DocumentFacade) -> Self {
        Self {
            request_id,
            db,
            started_at: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookConfig;
    use crate::invoke::InMemoryStore;
    use crate::transcode::SchemaMap;
    use std::sync::Arc;

    #[test]
    fn test_context_tracks_elapsed_time() {
        let facade = DocumentFacade::new(
            Uuid::new_v4(),
            Arc::new(SchemaMap::new()),
            Arc::new(HookConfig::new()),
            Arc::new(InMemoryStore::new()),
        );
        let ctx = HandlerContext::new(Uuid::new_v4(), facade);
        // Freshly created; just confirm the counter is readable.
        let _ = ctx.elapsed_ms();
    }
}
