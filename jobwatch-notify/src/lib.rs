//! Outbound notifications for jobwatch.
//!
//! A run produces exactly one [`Notification`]. The [`Notifier`] either hands
//! it to a [`Publisher`] (normally [`SnsPublisher`]) or, in local mode, only
//! logs that publishing was skipped.
pub mod sns;

use async_trait::async_trait;
use jobwatch_common::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use sns::SnsPublisher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Delivers a notification to its destination topic.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish once. Returns the provider's message id when it reports one.
    async fn publish(&self, notification: &Notification) -> Result<Option<String>>;
}

pub struct Notifier {
    publisher: Arc<dyn Publisher>,
    local: bool,
}

impl Notifier {
    pub fn new(publisher: Arc<dyn Publisher>, local: bool) -> Self {
        Self { publisher, local }
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Send `notification` unless running locally. Publish errors propagate;
    /// there is no retry.
    pub async fn send(&self, notification: &Notification) -> Result<Option<String>> {
        if self.local {
            tracing::info!(
                subject = %notification.subject,
                "Running in local env, skipping sending sns notification"
            );
            return Ok(None);
        }

        let message_id = self.publisher.publish(notification).await?;
        tracing::info!(subject = %notification.subject, ?message_id, "notification.published");
        Ok(message_id)
    }
}
