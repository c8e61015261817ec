use blogwright_agents::{AgentContext, Pipeline};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tracing::warn;

use crate::error::{AppError, PIPELINE_AGENT};
use axum::http::StatusCode;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    run_permits: Arc<Semaphore>,
    max_runs: usize,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CapacitySnapshot {
    pub max_concurrent_runs: usize,
    pub available_permits: usize,
}

impl AppState {
    pub fn new(context: AgentContext, max_runs: usize) -> Self {
        let max_runs = max_runs.max(1);
        Self {
            pipeline: Arc::new(Pipeline::new(context)),
            run_permits: Arc::new(Semaphore::new(max_runs)),
            max_runs,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn capacity(&self) -> CapacitySnapshot {
        CapacitySnapshot {
            max_concurrent_runs: self.max_runs,
            available_permits: self.run_permits.available_permits(),
        }
    }

    /// Claim a pipeline slot without waiting.
    pub fn try_acquire_run(&self) -> Result<OwnedSemaphorePermit, AppError> {
        match self.run_permits.clone().try_acquire_owned() {
            Ok(permit) => Ok(permit),
            Err(TryAcquireError::NoPermits) => {
                warn!(max_runs = self.max_runs, "pipeline capacity reached");
                Err(AppError::new(
                    StatusCode::TOO_MANY_REQUESTS,
                    PIPELINE_AGENT,
                    "pipeline capacity reached; retry once a run finishes",
                ))
            }
            Err(TryAcquireError::Closed) => Err(AppError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                PIPELINE_AGENT,
                "pipeline is shutting down",
            )),
        }
    }
}
