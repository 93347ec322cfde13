//! Common types and utilities shared across jobwatch crates.
//!
//! This crate defines the shared error type, the per-invocation context and
//! the observability helpers used throughout the jobwatch workspace. It is
//! intentionally lightweight so every crate can depend on it.
//!
//! # Overview
//!
//! - [`JobwatchError`] and [`Result`]: Shared error handling
//! - [`InvocationContext`]: Identity of one run of the monitoring job
//! - [`observability`]: Centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use jobwatch_common::InvocationContext;
//!
//! let ctx = InvocationContext::new();
//! assert!(!ctx.request_id.is_nil());
//! ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod observability;

/// Identity of a single invocation of the job.
///
/// The scheduler hands the handler an opaque event plus this context. The
/// request id is attached to every log line emitted during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Unique id for correlating log output of one run.
    pub request_id: Uuid,
    /// Wall clock time at which the invocation started.
    pub started_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types used across the jobwatch system.
#[derive(thiserror::Error, Debug)]
pub enum JobwatchError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page could not be fetched or decoded.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The text-generation service failed or returned nothing usable.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Publishing the notification failed.
    #[error("Notification error: {0}")]
    Notify(String),

    /// Anything else bubbling up from a dependency.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`JobwatchError`].
pub type Result<T> = std::result::Result<T, JobwatchError>;
