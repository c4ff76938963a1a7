use super::subscriber::{subscriber, StatusSubscriber};
use crate::constants::event_name_for;
use crate::models::{Job, JobSnapshot};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Broadcast publisher turning job status changes into named lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub name: String,
    pub job: JobSnapshot,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl PublishedEvent {
    /// Convert to JSON for forwarding to external listeners
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event, returning how many receivers it reached.
    ///
    /// Publishing with nobody listening is not an error.
    pub fn publish(&self, event_name: impl Into<String>, job: JobSnapshot) -> usize {
        let event = PublishedEvent {
            name: event_name.into(),
            job,
            published_at: chrono::Utc::now(),
        };

        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                trace!(event = %event.name, "No receivers for job event");
                0
            }
        }
    }

    /// Subscriber publishing `job.<status>` with a snapshot of the job on
    /// every status change it observes
    pub fn status_subscriber(&self) -> StatusSubscriber {
        let publisher = self.clone();
        subscriber(move |job: &Job| {
            let snapshot = job.snapshot();
            publisher.publish(event_name_for(snapshot.status), snapshot);
        })
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000) // Default capacity of 1000 events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::events;
    use crate::models::{CapturedException, JobId, Task};
    use crate::state_machine::JobStatus;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_status_changes_become_events() {
        let publisher = EventPublisher::default();
        let mut receiver = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        let job = Job::new(JobId::new("job_1"), Arc::new(Task::new("task_1", "cfg")), false);
        job.on_status_change_all([publisher.status_subscriber()]);
        job.running().unwrap();
        job.update_status(vec![CapturedException::new("ValueError", "boom")])
            .unwrap();

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.name, events::JOB_RUNNING);
        assert_eq!(first.job.status, JobStatus::Running);

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.name, events::JOB_FAILED);
        assert_eq!(second.job.exceptions.len(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let publisher = EventPublisher::new(4);
        let mut receiver = publisher.subscribe();
        let job = Job::new(JobId::new("job_1"), Arc::new(Task::new("task_1", "cfg")), false);
        job.on_status_change_all([publisher.status_subscriber()]);
        job.cancelled().unwrap();

        let event = tokio_test::block_on(receiver.recv()).unwrap();
        let json = event.to_json().unwrap();
        assert_eq!(json["name"], events::JOB_CANCELLED);
        assert_eq!(json["job"]["id"], "job_1");
        assert_eq!(json["job"]["status"], "CANCELLED");

        let parsed = PublishedEvent::from_json(json).unwrap();
        assert_eq!(parsed.job, event.job);
    }

    #[test]
    fn test_publish_without_receivers() {
        let publisher = EventPublisher::new(4);
        let job = Job::new(JobId::new("job_1"), Arc::new(Task::new("task_1", "cfg")), false);
        assert_eq!(publisher.publish(events::JOB_SUBMITTED, job.snapshot()), 0);
    }
}
