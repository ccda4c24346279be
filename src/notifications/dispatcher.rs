use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::NotificationEvent;

#[derive(Error, Debug)]
#[error("notification delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Seam to the external delivery channel (push, in-app, mail). The worker
/// owns the only reference; the engine never calls deliver directly.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn deliver(&self, event: &NotificationEvent) -> Result<(), DeliveryError>;
}

/// Default channel: structured log lines. Stands in for the platform's
/// real delivery pipeline.
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    async fn deliver(&self, event: &NotificationEvent) -> Result<(), DeliveryError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| DeliveryError(e.to_string()))?;
        tracing::info!(event = %payload, "notification dispatched");
        Ok(())
    }
}

/// Drains the queue for the lifetime of the process. Delivery failures are
/// logged and swallowed; they never reach the transition that emitted the
/// event.
pub fn spawn_dispatch_worker(
    mut rx: mpsc::UnboundedReceiver<NotificationEvent>,
    channel: Arc<dyn NotificationChannel>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(e) = channel.deliver(&event).await {
                tracing::warn!(error = %e, ?event, "notification delivery failed");
            }
        }
        tracing::debug!("notification queue closed, worker exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::notification_channel;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct RecordingChannel {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationChannel for RecordingChannel {
        async fn deliver(&self, event: &NotificationEvent) -> Result<(), DeliveryError> {
            let payload = serde_json::to_string(event).map_err(|e| DeliveryError(e.to_string()))?;
            self.seen.lock().expect("lock").push(payload);
            Ok(())
        }
    }

    struct FailingChannel;

    #[async_trait]
    impl NotificationChannel for FailingChannel {
        async fn deliver(&self, _event: &NotificationEvent) -> Result<(), DeliveryError> {
            Err(DeliveryError("downstream unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn worker_drains_published_events() {
        let (notifier, rx) = notification_channel();
        let channel = Arc::new(RecordingChannel {
            seen: Mutex::new(Vec::new()),
        });
        let handle = spawn_dispatch_worker(rx, channel.clone());

        notifier.publish(NotificationEvent::TaskCompleted {
            task_id: Uuid::new_v4(),
            mentorship_id: Uuid::new_v4(),
        });
        notifier.publish(NotificationEvent::MentorshipCancelled {
            mentorship_id: Uuid::new_v4(),
            reason: "moved away".to_string(),
        });
        drop(notifier);

        handle.await.expect("worker exits cleanly");
        assert_eq!(channel.seen.lock().expect("lock").len(), 2);
    }

    #[tokio::test]
    async fn worker_swallows_delivery_failures() {
        let (notifier, rx) = notification_channel();
        let handle = spawn_dispatch_worker(rx, Arc::new(FailingChannel));

        notifier.publish(NotificationEvent::EvaluationSubmitted {
            mentorship_id: Uuid::new_v4(),
            evaluator_id: Uuid::new_v4(),
        });
        drop(notifier);

        // the worker must keep running through failures and exit only on
        // channel close
        handle.await.expect("worker exits cleanly");
    }
}
