use crate::{Notification, Publisher};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::error::DisplayErrorContext;
use jobwatch_common::{JobwatchError, Result};

/// Publishes to a single SNS topic.
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(topic_arn: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(aws_sdk_sns::Client::new(&sdk_config), topic_arn)
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, notification: &Notification) -> Result<Option<String>> {
        tracing::debug!(topic_arn = %self.topic_arn, subject = %notification.subject, "sns.publish.start");
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(&notification.subject)
            .message(&notification.body)
            .send()
            .await
            .map_err(|e| {
                JobwatchError::Notify(format!(
                    "publish to {} failed: {}",
                    self.topic_arn,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(output.message_id().map(str::to_string))
    }
}
