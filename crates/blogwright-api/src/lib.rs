//! HTTP surface for the Blogwright agents.
//!
//! Each agent is reachable on its own under `/api/agents/*`; `/api/pipeline`
//! runs all three in order, bounded by a run semaphore.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
