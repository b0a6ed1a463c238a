//! Retrieval coordinator: one task per device, full join barrier before
//! evaluation. Every task resolves to success or failure, so the barrier
//! terminates even when devices are unreachable.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::{AuditError, AuditResult};
use crate::source::{ConfigSource, DeviceTarget};

/// One device that did not contribute a source.
#[derive(Debug)]
pub struct FetchFailure {
    pub device: String,
    pub error: AuditError,
}

/// Outcome of the retrieval phase: sources in input device order, plus the
/// failures to surface in the final report.
#[derive(Debug)]
pub struct RetrievalReport {
    pub sources: Vec<ConfigSource>,
    pub failures: Vec<FetchFailure>,
}

pub struct RetrievalCoordinator;

impl RetrievalCoordinator {
    /// Fetch every device concurrently and wait for all of them.
    ///
    /// `fetch` maps a device to its retrieved line sequence; in production
    /// that is `NxapiClient::fetch_device_config`. Completion order across
    /// devices is unordered; results are reassembled into the input order.
    pub async fn retrieve_all<F, Fut>(devices: &[DeviceTarget], fetch: F) -> RetrievalReport
    where
        F: Fn(DeviceTarget) -> Fut,
        Fut: Future<Output = AuditResult<Vec<String>>> + Send + 'static,
    {
        let total = devices.len();
        // Incremented by each task as it finishes; progress reporting only,
        // the join loop below is the barrier.
        let completed = Arc::new(AtomicUsize::new(0));
        let mut tasks = JoinSet::new();

        for (slot, device) in devices.iter().enumerate() {
            let name = device.name.clone();
            let fut = fetch(device.clone());
            let completed = Arc::clone(&completed);
            tasks.spawn(async move {
                info!("connecting to {name}...");
                let outcome = fut.await;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                info!("retrieved {done}/{total} devices");
                (slot, name, outcome)
            });
        }

        let mut slots: Vec<Option<Result<ConfigSource, FetchFailure>>> =
            (0..total).map(|_| None).collect();
        let mut join_failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, name, Ok(lines))) => {
                    slots[slot] = Some(Ok(ConfigSource::from_device(&name, lines)));
                }
                Ok((slot, name, Err(error))) => {
                    warn!("fetch from {name} failed: {error}");
                    slots[slot] = Some(Err(FetchFailure {
                        device: name,
                        error,
                    }));
                }
                Err(join_error) => {
                    // A panicked fetch task still counts against the
                    // barrier; the slot stays empty and is reported below.
                    warn!("fetch task aborted: {join_error}");
                    join_failures.push(FetchFailure {
                        device: "<unknown>".to_string(),
                        error: AuditError::DeviceFetch {
                            device: "<unknown>".to_string(),
                            reason: join_error.to_string(),
                        },
                    });
                }
            }
        }

        let mut sources = Vec::new();
        let mut failures = Vec::new();
        for slot in slots.into_iter().flatten() {
            match slot {
                Ok(source) => sources.push(source),
                Err(failure) => failures.push(failure),
            }
        }
        failures.extend(join_failures);

        RetrievalReport { sources, failures }
    }
}
