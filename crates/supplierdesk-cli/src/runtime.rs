// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;
use supplierdesk_app::{ApiCall, CallFailure, CallOutcome, PendingCall, SupplierBackend};
use supplierdesk_tui::{AppRuntime, InternalEvent};

/// Runs every backend call on its own worker thread and reports back over
/// the UI channel.
pub struct BackendRuntime<B> {
    backend: Arc<B>,
}

impl<B> BackendRuntime<B>
where
    B: SupplierBackend + Send + Sync + 'static,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl<B> AppRuntime for BackendRuntime<B>
where
    B: SupplierBackend + Send + Sync + 'static,
{
    fn execute(&mut self, call: &ApiCall) -> Result<CallOutcome, CallFailure> {
        call.execute(self.backend.as_ref())
    }

    fn spawn_call(&mut self, pending: PendingCall, tx: Sender<InternalEvent>) -> Result<()> {
        let backend = Arc::clone(&self.backend);
        let name = format!("call-{}", pending.seq);
        thread::Builder::new()
            .name(name)
            .spawn(move || {
                let started = Instant::now();
                let result = pending.call.execute(backend.as_ref());
                tracing::debug!(
                    seq = pending.seq,
                    call = %pending.call.describe(),
                    ok = result.is_ok(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "backend call finished"
                );
                if tx
                    .send(InternalEvent::CallCompleted { pending, result })
                    .is_err()
                {
                    tracing::debug!("ui closed before backend call finished");
                }
            })
            .context("spawn backend call thread")?;
        Ok(())
    }
}
